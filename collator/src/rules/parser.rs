use super::{Anchor, Relation, RelationLevel, Reset, RuleItem, RuleSet, Setting};
use crate::error::{RuleErrorKind, RuleSyntaxError};
use crate::options::{AlternateHandling, CaseFirst, MaxVariable, Strength};

/// разобрать текст правил
pub fn parse(rules: &str) -> Result<RuleSet, RuleSyntaxError>
{
    Parser { rules, pos: 0 }.parse()
}

/// символы синтаксиса, завершающие текст (если не заключены в кавычки)
#[inline]
fn is_syntax(c: char) -> bool
{
    matches!(c, '&' | '<' | '=' | ';' | ',' | '/' | '[' | ']' | '@' | '|')
}

struct Parser<'a>
{
    rules: &'a str,
    pos: usize,
}

impl<'a> Parser<'a>
{
    fn parse(mut self) -> Result<RuleSet, RuleSyntaxError>
    {
        let mut items = vec![];
        // последний сброс, к которому относятся отношения
        let mut current = None;

        loop {
            self.skip_space();

            let start = self.pos;

            let c = match self.peek() {
                Some(c) => c,
                None => break,
            };

            match c {
                '&' => {
                    self.bump();

                    let reset = self.parse_reset(start)?;

                    current = Some(items.len());
                    items.push(RuleItem::Reset(reset));
                }
                '@' => {
                    self.bump();
                    items.push(RuleItem::Setting(Setting::Backwards));
                }
                '[' => {
                    let setting = self.parse_setting()?;
                    items.push(RuleItem::Setting(setting));
                }
                '<' | '=' | ';' | ',' => {
                    let relation = self.parse_relation()?;

                    match current.and_then(|i| items.get_mut(i)) {
                        Some(RuleItem::Reset(reset)) => reset.relations.push(relation),
                        _ => return Err(self.malformed(start, "relation without a preceding reset")),
                    }
                }
                '|' => return Err(self.malformed(start, "prefix rules are not supported")),
                c => return Err(self.malformed(start, &format!("unexpected character {:?}", c))),
            }
        }

        Ok(RuleSet { items })
    }

    #[inline]
    fn peek(&self) -> Option<char>
    {
        self.rules[self.pos ..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char>
    {
        let c = self.peek()?;
        self.pos += c.len_utf8();

        Some(c)
    }

    /// пропустить пробелы и комментарии
    fn skip_space(&mut self)
    {
        while let Some(c) = self.peek() {
            match c {
                '#' => self.skip_comment(),
                c if c.is_whitespace() => {
                    self.bump();
                }
                _ => return,
            }
        }
    }

    fn skip_comment(&mut self)
    {
        while let Some(c) = self.bump() {
            if c == '\n' || c == '\r' {
                return;
            }
        }
    }

    fn error(&self, position: usize, kind: RuleErrorKind) -> RuleSyntaxError
    {
        RuleSyntaxError::new(self.rules, position, kind)
    }

    fn malformed(&self, position: usize, message: &str) -> RuleSyntaxError
    {
        self.error(position, RuleErrorKind::Malformed(message.to_owned()))
    }

    /// сброс: & [before n] позиция
    fn parse_reset(&mut self, start: usize) -> Result<Reset, RuleSyntaxError>
    {
        let mut before = None;

        self.skip_space();

        if self.peek() == Some('[') {
            let position = self.pos;
            let words = self.parse_bracket()?;

            match words.as_slice() {
                ["before", level] => {
                    before = match *level {
                        "1" => Some(1),
                        "2" => Some(2),
                        "3" => Some(3),
                        _ => return Err(self.malformed(position, "[before] level must be 1, 2 or 3")),
                    };
                }
                _ => {
                    let anchor = self.special_anchor(position, &words)?;

                    return Ok(Reset {
                        position: start,
                        anchor,
                        before,
                        relations: vec![],
                    });
                }
            }
        }

        self.skip_space();

        let anchor = match self.peek() {
            Some('[') => {
                let position = self.pos;
                let words = self.parse_bracket()?;

                self.special_anchor(position, &words)?
            }
            _ => {
                let position = self.pos;
                let text = self.parse_text()?;

                if text.is_empty() {
                    return Err(self.malformed(position, "empty reset"));
                }

                Anchor::Text(text)
            }
        };

        Ok(Reset {
            position: start,
            anchor,
            before,
            relations: vec![],
        })
    }

    fn special_anchor(&self, position: usize, words: &[&str]) -> Result<Anchor, RuleSyntaxError>
    {
        match words {
            ["first", "variable"] => Ok(Anchor::FirstVariable),
            ["last", "variable"] => Ok(Anchor::LastVariable),
            ["first", "regular"] => Ok(Anchor::FirstRegular),
            ["last", "regular"] => Ok(Anchor::LastRegular),
            _ => Err(self.error(position, RuleErrorKind::UnknownAnchor(format!("[{}]", words.join(" "))))),
        }
    }

    /// отношение: оператор, цель, расширение
    fn parse_relation(&mut self) -> Result<Relation, RuleSyntaxError>
    {
        let position = self.pos;

        let level = match self.bump() {
            Some('=') => RelationLevel::Identical,
            Some(';') => RelationLevel::Secondary,
            Some(',') => RelationLevel::Tertiary,
            _ => {
                let mut count = 1;

                while self.peek() == Some('<') {
                    self.bump();
                    count += 1;
                }

                match count {
                    1 => RelationLevel::Primary,
                    2 => RelationLevel::Secondary,
                    3 => RelationLevel::Tertiary,
                    4 => RelationLevel::Quaternary,
                    _ => return Err(self.malformed(position, "too many '<' in relation")),
                }
            }
        };

        if self.peek() == Some('*') {
            return Err(self.malformed(position, "starred relations are not supported"));
        }

        let target_position = self.pos;
        let target = self.parse_text()?;

        if target.is_empty() {
            return Err(self.malformed(target_position, "missing relation target"));
        }

        self.skip_space();

        let extension = match self.peek() {
            Some('/') => {
                self.bump();

                let extension_position = self.pos;
                let extension = self.parse_text()?;

                if extension.is_empty() {
                    return Err(self.malformed(extension_position, "empty extension"));
                }

                Some(extension)
            }
            _ => None,
        };

        Ok(Relation {
            position,
            level,
            target,
            extension,
        })
    }

    /// текст: литералы, кавычки, экранирование; пробелы игнорируются
    fn parse_text(&mut self) -> Result<String, RuleSyntaxError>
    {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '#' => self.skip_comment(),
                '\'' => self.parse_quoted(&mut text)?,
                '\\' => {
                    let c = self.parse_escape()?;
                    text.push(c);
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                c if is_syntax(c) => break,
                c => {
                    self.bump();
                    text.push(c);
                }
            }
        }

        Ok(text)
    }

    /// 'текст' или '' (апостроф)
    fn parse_quoted(&mut self, text: &mut String) -> Result<(), RuleSyntaxError>
    {
        let start = self.pos;
        self.bump();

        if self.peek() == Some('\'') {
            self.bump();
            text.push('\'');

            return Ok(());
        }

        loop {
            match self.bump() {
                None => return Err(self.malformed(start, "unterminated quote")),
                Some('\'') => match self.peek() {
                    Some('\'') => {
                        self.bump();
                        text.push('\'');
                    }
                    _ => return Ok(()),
                },
                Some(c) => text.push(c),
            }
        }
    }

    /// \uXXXX, \UXXXXXXXX, \x{...}, \xXX, \cX, \t, \n, \r, \<символ>
    fn parse_escape(&mut self) -> Result<char, RuleSyntaxError>
    {
        let start = self.pos;
        self.bump();

        let invalid = |parser: &Self| parser.malformed(start, "invalid escape sequence");

        let code = match self.bump() {
            Some('u') => self.parse_hex(4, 4),
            Some('U') => self.parse_hex(8, 8),
            Some('x') => match self.peek() {
                Some('{') => {
                    self.bump();

                    let code = self.parse_hex(1, 6);

                    match self.bump() {
                        Some('}') => code,
                        _ => None,
                    }
                }
                _ => self.parse_hex(2, 2),
            },
            Some('c') => self.bump().map(|c| c as u32 & 0x1F),
            Some('t') => Some('\t' as u32),
            Some('n') => Some('\n' as u32),
            Some('r') => Some('\r' as u32),
            Some(c) => Some(c as u32),
            None => None,
        };

        code.and_then(char::from_u32).ok_or_else(|| invalid(self))
    }

    /// от min до max шестнадцатеричных цифр
    fn parse_hex(&mut self, min: usize, max: usize) -> Option<u32>
    {
        let mut value = 0u32;
        let mut count = 0;

        while count < max {
            let digit = match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => digit,
                None => break,
            };

            self.bump();
            value = value * 16 + digit;
            count += 1;
        }

        match count >= min {
            true => Some(value),
            false => None,
        }
    }

    /// содержимое [...] в виде слов
    fn parse_bracket(&mut self) -> Result<Vec<&'a str>, RuleSyntaxError>
    {
        let start = self.pos;
        self.bump();

        let rest = &self.rules[self.pos ..];

        let end = match rest.find(']') {
            Some(end) => end,
            None => return Err(self.malformed(start, "unterminated '['")),
        };

        let content = &rest[.. end];
        self.pos += end + 1;

        Ok(content.split_whitespace().collect())
    }

    /// настройка: [name value]
    fn parse_setting(&mut self) -> Result<Setting, RuleSyntaxError>
    {
        let position = self.pos;
        let words = self.parse_bracket()?;

        let flag = |value: &str| match value {
            "on" => Some(true),
            "off" => Some(false),
            _ => None,
        };

        let setting = match words.as_slice() {
            ["strength", "I"] => Some(Setting::Strength(Strength::Identical)),
            ["strength", level] => level
                .parse::<u8>()
                .ok()
                .and_then(Strength::from_level)
                .map(Setting::Strength),
            ["alternate", "shifted"] => Some(Setting::Alternate(AlternateHandling::Shifted)),
            ["alternate", "non-ignorable"] => Some(Setting::Alternate(AlternateHandling::NonIgnorable)),
            ["backwards", "2"] => Some(Setting::Backwards),
            ["caseFirst", "upper"] => Some(Setting::CaseFirst(CaseFirst::UpperFirst)),
            ["caseFirst", "lower"] => Some(Setting::CaseFirst(CaseFirst::LowerFirst)),
            ["caseFirst", "off"] => Some(Setting::CaseFirst(CaseFirst::Off)),
            ["caseLevel", value] => flag(value).map(Setting::CaseLevel),
            ["normalization", value] => flag(value).map(Setting::Normalization),
            ["numericOrdering", value] => flag(value).map(Setting::NumericOrdering),
            ["maxVariable", group] => MaxVariable::from_name(group).map(Setting::MaxVariable),
            _ => None,
        };

        setting.ok_or_else(|| self.malformed(position, &format!("unknown setting [{}]", words.join(" "))))
    }
}
