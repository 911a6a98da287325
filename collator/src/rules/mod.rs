// правила в синтаксисе ICU (подмножество):
//
//  & a < b << c <<< d <<<< e = f       сброс и отношения уровней 1 - 4, идентичность
//  & a ; b , c                         устаревшие формы << и <<<
//  & [before 2] a << x                 вставка перед позицией сброса
//  & [last regular] < x                специальные позиции сброса
//  & a < x / bc                        расширение
//  [strength 2] [alternate shifted] [backwards 2] @ [caseFirst upper] [caseLevel on]
//  [normalization on] [numericOrdering on] [maxVariable symbol]

use core::fmt::{Display, Formatter, Write};

use crate::options::{AlternateHandling, CaseFirst, MaxVariable, Strength};

pub use compiler::{compile, compile_with_base};
pub use parser::parse;

mod compiler;
mod parser;

/// разобранные правила
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet
{
    pub items: Vec<RuleItem>,
}

/// настройка или сброс с цепочкой отношений
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleItem
{
    Setting(Setting),
    Reset(Reset),
}

/// настройки, задаваемые правилами
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting
{
    Strength(Strength),
    Alternate(AlternateHandling),
    Backwards,
    CaseFirst(CaseFirst),
    CaseLevel(bool),
    Normalization(bool),
    NumericOrdering(bool),
    MaxVariable(MaxVariable),
}

/// позиция сброса
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor
{
    Text(String),
    FirstVariable,
    LastVariable,
    FirstRegular,
    LastRegular,
}

/// сброс: позиция, от которой отсчитываются отношения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset
{
    /// смещение в тексте правил (в байтах)
    pub position: usize,
    pub anchor: Anchor,
    /// [before 1 | 2 | 3]
    pub before: Option<u8>,
    pub relations: Vec<Relation>,
}

/// уровень отношения
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationLevel
{
    Primary = 1,
    Secondary = 2,
    Tertiary = 3,
    Quaternary = 4,
    Identical = 15,
}

impl RelationLevel
{
    pub fn operator(&self) -> &'static str
    {
        match self {
            Self::Primary => "<",
            Self::Secondary => "<<",
            Self::Tertiary => "<<<",
            Self::Quaternary => "<<<<",
            Self::Identical => "=",
        }
    }

    /// уровень весов (для идентичности - нет)
    pub fn level(&self) -> Option<u8>
    {
        match self {
            Self::Identical => None,
            level => Some(*level as u8),
        }
    }
}

/// отношение: цель располагается после предыдущего элемента цепочки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation
{
    /// смещение в тексте правил (в байтах)
    pub position: usize,
    pub level: RelationLevel,
    pub target: String,
    /// "/ текст": элементы текста добавляются к весам цели
    pub extension: Option<String>,
}

/// символ нужно заключать в кавычки при записи правил?
fn needs_quoting(c: char) -> bool
{
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '&' | '<' | '=' | ';' | ',' | '/' | '[' | ']' | '@' | '#' | '|' | '\\')
}

/// записать текст правил с экранированием
fn write_text(f: &mut Formatter<'_>, text: &str) -> core::fmt::Result
{
    for c in text.chars() {
        match c {
            '\'' => f.write_str("''")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c if needs_quoting(c) => write!(f, "'{}'", c)?,
            c => f.write_char(c)?,
        }
    }

    Ok(())
}

fn on_off(flag: bool) -> &'static str
{
    match flag {
        true => "on",
        false => "off",
    }
}

impl Display for Setting
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self {
            Self::Strength(strength) => match strength {
                Strength::Identical => f.write_str("[strength I]"),
                strength => write!(f, "[strength {}]", strength.levels()),
            },
            Self::Alternate(AlternateHandling::Shifted) => f.write_str("[alternate shifted]"),
            Self::Alternate(AlternateHandling::NonIgnorable) => {
                f.write_str("[alternate non-ignorable]")
            }
            Self::Backwards => f.write_str("[backwards 2]"),
            Self::CaseFirst(case_first) => match case_first {
                CaseFirst::Off => f.write_str("[caseFirst off]"),
                CaseFirst::LowerFirst => f.write_str("[caseFirst lower]"),
                CaseFirst::UpperFirst => f.write_str("[caseFirst upper]"),
            },
            Self::CaseLevel(flag) => write!(f, "[caseLevel {}]", on_off(*flag)),
            Self::Normalization(flag) => write!(f, "[normalization {}]", on_off(*flag)),
            Self::NumericOrdering(flag) => write!(f, "[numericOrdering {}]", on_off(*flag)),
            Self::MaxVariable(group) => write!(f, "[maxVariable {}]", group.name()),
        }
    }
}

impl Display for Reset
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        f.write_str("&")?;

        if let Some(level) = self.before {
            write!(f, "[before {}]", level)?;
        }

        match &self.anchor {
            Anchor::Text(text) => write_text(f, text)?,
            Anchor::FirstVariable => f.write_str("[first variable]")?,
            Anchor::LastVariable => f.write_str("[last variable]")?,
            Anchor::FirstRegular => f.write_str("[first regular]")?,
            Anchor::LastRegular => f.write_str("[last regular]")?,
        }

        for relation in self.relations.iter() {
            write!(f, " {} ", relation.level.operator())?;
            write_text(f, &relation.target)?;

            if let Some(extension) = &relation.extension {
                f.write_str(" / ")?;
                write_text(f, extension)?;
            }
        }

        Ok(())
    }
}

impl Display for RuleSet
{
    /// каноническая запись: одна настройка или сброс на строке
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        for (i, item) in self.items.iter().enumerate() {
            if i != 0 {
                f.write_char('\n')?;
            }

            match item {
                RuleItem::Setting(setting) => write!(f, "{}", setting)?,
                RuleItem::Reset(reset) => write!(f, "{}", reset)?,
            }
        }

        Ok(())
    }
}

impl RuleSet
{
    pub fn settings(&self) -> impl Iterator<Item = &Setting>
    {
        self.items.iter().filter_map(|item| match item {
            RuleItem::Setting(setting) => Some(setting),
            _ => None,
        })
    }

    pub fn resets(&self) -> impl Iterator<Item = &Reset>
    {
        self.items.iter().filter_map(|item| match item {
            RuleItem::Reset(reset) => Some(reset),
            _ => None,
        })
    }
}
