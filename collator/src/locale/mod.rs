// идентификаторы локалей: BCP 47 (de-DE-u-co-phonebk-ks-level1) и ICU (de_DE@collation=phonebook)
//
// цепочка поиска таблицы: lang-Script-REGION-variant -> ... -> lang -> root,
// на каждом уровне сначала пробуется тип сопоставления (lang/type)

use std::sync::Arc;

use log::{debug, warn};

use crate::error::{CollatorError, Result};
use crate::options::{Attribute, AttributeValue};
use crate::tailoring::Tailoring;

pub use provider::{BuiltinTailorings, TailoringProvider};

mod provider;

/// разобранный идентификатор локали
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleId
{
    /// язык в нижнем регистре; пустой - корневая локаль
    pub language: String,
    pub script: Option<String>,
    pub region: Option<String>,
    pub variants: Vec<String>,
    /// тип сопоставления: phonebook, traditional, ...
    pub collation: Option<String>,
    /// атрибуты, заданные ключевыми словами
    pub keywords: Vec<(Attribute, AttributeValue)>,
}

impl LocaleId
{
    /// разобрать идентификатор; неизвестные части и ключевые слова пропускаются
    pub fn parse(locale: &str) -> Self
    {
        let mut id = LocaleId::default();

        let (tag, icu_keywords) = match locale.split_once('@') {
            Some((tag, keywords)) => (tag, Some(keywords)),
            None => (locale, None),
        };

        let mut subtags = tag.split(&['-', '_'][..]).filter(|subtag| !subtag.is_empty());

        if let Some(language) = subtags.next() {
            id.language = match language.to_ascii_lowercase().as_str() {
                "root" | "und" => String::new(),
                language => language.to_owned(),
            };
        }

        while let Some(subtag) = subtags.next() {
            if subtag.eq_ignore_ascii_case("u") {
                id.parse_unicode_extension(&mut subtags);
                break;
            }

            // прочие расширения и частное использование: до конца тега
            if subtag.len() == 1 {
                break;
            }

            let is_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let is_digit = subtag.chars().all(|c| c.is_ascii_digit());

            match subtag.len() {
                4 if is_alpha && id.script.is_none() && id.region.is_none() => {
                    id.script = Some(title_case(subtag));
                }
                2 if is_alpha && id.region.is_none() => id.region = Some(subtag.to_ascii_uppercase()),
                3 if is_digit && id.region.is_none() => id.region = Some(subtag.to_owned()),
                _ => id.variants.push(subtag.to_ascii_uppercase()),
            }
        }

        if let Some(keywords) = icu_keywords {
            id.parse_icu_keywords(keywords);
        }

        id
    }

    /// -u-co-phonebk-ks-level2-...
    fn parse_unicode_extension<'a>(&mut self, subtags: &mut impl Iterator<Item = &'a str>)
    {
        let mut key: Option<String> = None;
        let mut values: Vec<String> = vec![];

        for subtag in subtags {
            // конец расширения - следующий синглтон
            if subtag.len() == 1 {
                break;
            }

            match subtag.len() {
                2 => {
                    if let Some(key) = key.take() {
                        self.apply_unicode_keyword(&key, &values.join("-"));
                    }

                    key = Some(subtag.to_ascii_lowercase());
                    values.clear();
                }
                _ => values.push(subtag.to_ascii_lowercase()),
            }
        }

        if let Some(key) = key {
            self.apply_unicode_keyword(&key, &values.join("-"));
        }
    }

    fn apply_unicode_keyword(&mut self, key: &str, value: &str)
    {
        use AttributeValue::*;

        let boolean = |value: &str| match value {
            "" | "true" => Some(On),
            "false" => Some(Off),
            _ => None,
        };

        let keyword = match key {
            "co" => {
                self.collation = match value {
                    "phonebk" => Some("phonebook".to_owned()),
                    "trad" => Some("traditional".to_owned()),
                    "" | "standard" => None,
                    value => Some(value.to_owned()),
                };

                return;
            }
            "ks" => {
                let strength = match value {
                    "level1" => Some(Primary),
                    "level2" => Some(Secondary),
                    "level3" => Some(Tertiary),
                    "level4" | "quarternary" => Some(Quaternary),
                    "identic" => Some(Identical),
                    _ => None,
                };

                strength.map(|value| (Attribute::Strength, value))
            }
            "ka" => match value {
                "shifted" => Some((Attribute::AlternateHandling, Shifted)),
                "noignore" => Some((Attribute::AlternateHandling, NonIgnorable)),
                _ => None,
            },
            "kf" => match value {
                "upper" => Some((Attribute::CaseFirst, UpperFirst)),
                "lower" => Some((Attribute::CaseFirst, LowerFirst)),
                "false" => Some((Attribute::CaseFirst, Off)),
                _ => None,
            },
            "kc" => boolean(value).map(|value| (Attribute::CaseLevel, value)),
            "kb" => boolean(value).map(|value| (Attribute::FrenchCollation, value)),
            "kk" => boolean(value).map(|value| (Attribute::NormalizationMode, value)),
            "kn" => boolean(value).map(|value| (Attribute::NumericCollation, value)),
            _ => None,
        };

        match keyword {
            Some(keyword) => self.keywords.push(keyword),
            None => debug!("ignoring collation keyword -u-{}-{}", key, value),
        }
    }

    /// @collation=phonebook;colStrength=primary;...
    fn parse_icu_keywords(&mut self, keywords: &str)
    {
        use AttributeValue::*;

        for keyword in keywords.split(';') {
            let (key, value) = match keyword.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim().to_ascii_lowercase()),
                None => continue,
            };

            let yes_no = |value: &str| match value {
                "yes" | "on" | "true" => Some(On),
                "no" | "off" | "false" => Some(Off),
                _ => None,
            };

            let parsed = match key.to_ascii_lowercase().as_str() {
                "collation" => {
                    self.collation = match value.as_str() {
                        "standard" | "" => None,
                        value => Some(value.to_owned()),
                    };

                    continue;
                }
                "colstrength" => match value.as_str() {
                    "primary" => Some((Attribute::Strength, Primary)),
                    "secondary" => Some((Attribute::Strength, Secondary)),
                    "tertiary" => Some((Attribute::Strength, Tertiary)),
                    "quaternary" => Some((Attribute::Strength, Quaternary)),
                    "identical" => Some((Attribute::Strength, Identical)),
                    _ => None,
                },
                "colalternate" => match value.as_str() {
                    "shifted" => Some((Attribute::AlternateHandling, Shifted)),
                    "non-ignorable" => Some((Attribute::AlternateHandling, NonIgnorable)),
                    _ => None,
                },
                "colcasefirst" => match value.as_str() {
                    "upper" => Some((Attribute::CaseFirst, UpperFirst)),
                    "lower" => Some((Attribute::CaseFirst, LowerFirst)),
                    "no" | "off" => Some((Attribute::CaseFirst, Off)),
                    _ => None,
                },
                "colcaselevel" => yes_no(&value).map(|value| (Attribute::CaseLevel, value)),
                "colbackwards" => yes_no(&value).map(|value| (Attribute::FrenchCollation, value)),
                "colnormalization" => {
                    yes_no(&value).map(|value| (Attribute::NormalizationMode, value))
                }
                "colnumeric" => yes_no(&value).map(|value| (Attribute::NumericCollation, value)),
                _ => None,
            };

            match parsed {
                Some(keyword) => self.keywords.push(keyword),
                None => debug!("ignoring collation keyword @{}={}", key, value),
            }
        }
    }

    /// корневая локаль?
    pub fn is_root(&self) -> bool
    {
        self.language.is_empty()
    }

    /// базовое имя: lang[-Script][-REGION][-VARIANT...]
    pub fn base_name(&self) -> String
    {
        let mut parts: Vec<&str> = vec![&self.language];

        parts.extend(self.script.as_deref());
        parts.extend(self.region.as_deref());
        parts.extend(self.variants.iter().map(|variant| variant.as_str()));

        parts.join("-")
    }

    /// имена для поиска таблицы, от самого точного к самому общему (без корневой)
    pub fn fallback_chain(&self) -> Vec<String>
    {
        if self.is_root() {
            return vec![];
        }

        let mut subtags: Vec<&str> = vec![&self.language];

        subtags.extend(self.script.as_deref());
        subtags.extend(self.region.as_deref());
        subtags.extend(self.variants.iter().map(|variant| variant.as_str()));

        let mut chain = vec![];

        while !subtags.is_empty() {
            let name = subtags.join("-");

            if let Some(collation) = &self.collation {
                chain.push(format!("{}/{}", name, collation));
            }

            chain.push(name);
            subtags.pop();
        }

        chain
    }
}

/// "Latn"
fn title_case(subtag: &str) -> String
{
    let lower = subtag.to_ascii_lowercase();
    let mut chars = lower.chars();

    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => lower,
    }
}

/// найти таблицу для локали; при отсутствии данных - корневая таблица
pub fn resolve(locale: &LocaleId, provider: &dyn TailoringProvider) -> Result<Arc<Tailoring>>
{
    for name in locale.fallback_chain() {
        if let Some(tailoring) = provider.load(&name) {
            debug!("collation for {:?} resolved to {:?}", locale.base_name(), name);
            return Ok(tailoring);
        }
    }

    if !locale.is_root() {
        warn!("no collation data for {:?}, falling back to root", locale.base_name());
    }

    provider.root().ok_or(CollatorError::RootDataUnavailable)
}
