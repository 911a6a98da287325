// все опции - см. UTS #35, https://www.unicode.org/reports/tr35/tr35-collation.html
// числовые значения атрибутов совпадают с ICU (UColAttribute / UColAttributeValue)

use crate::error::{CollatorError, Result};

/// уровень сравнения
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strength
{
    Primary = 0,   // базовые символы
    Secondary = 1, // диакритические знаки
    #[default]
    Tertiary = 2, // регистр / варианты
    Quaternary = 3, // пунктуация
    Identical = 15, // кодпоинты
}

impl Strength
{
    /// количество уровней весов, учитываемых при сравнении (без уровня идентичности)
    #[inline]
    pub fn levels(&self) -> u8
    {
        match self {
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Tertiary => 3,
            Self::Quaternary | Self::Identical => 4,
        }
    }

    /// уровень из числового значения настройки правил ([strength 1..4|I])
    pub fn from_level(level: u8) -> Option<Self>
    {
        match level {
            1 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            3 => Some(Self::Tertiary),
            4 => Some(Self::Quaternary),
            _ => None,
        }
    }
}

/// тип сравнения переменных весов
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlternateHandling
{
    #[default]
    NonIgnorable = 0, // переменные веса не игнорируются
    Shifted = 1, // со сдвигом переменных весов
}

/// порядок регистров
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseFirst
{
    #[default]
    Off = 0,
    LowerFirst = 1,
    UpperFirst = 2,
}

/// группа символов с переменными весами, [maxVariable ...]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxVariable
{
    Space = 0,
    #[default]
    Punctuation = 1,
    Symbol = 2,
    Currency = 3,
}

impl MaxVariable
{
    pub fn name(&self) -> &'static str
    {
        match self {
            Self::Space => "space",
            Self::Punctuation => "punct",
            Self::Symbol => "symbol",
            Self::Currency => "currency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self>
    {
        match name {
            "space" => Some(Self::Space),
            "punct" => Some(Self::Punctuation),
            "symbol" => Some(Self::Symbol),
            "currency" => Some(Self::Currency),
            _ => None,
        }
    }
}

/// изменяемые атрибуты коллатора
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute
{
    FrenchCollation = 0,
    AlternateHandling = 1,
    CaseFirst = 2,
    CaseLevel = 3,
    NormalizationMode = 4,
    Strength = 5,
    NumericCollation = 7,
}

/// значения атрибутов
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue
{
    Default = -1,
    Primary = 0,
    Secondary = 1,
    Tertiary = 2,
    Quaternary = 3,
    Identical = 15,
    Off = 16,
    On = 17,
    Shifted = 20,
    NonIgnorable = 21,
    LowerFirst = 24,
    UpperFirst = 25,
}

impl TryFrom<i32> for Attribute
{
    type Error = CollatorError;

    fn try_from(value: i32) -> Result<Self>
    {
        Ok(match value {
            0 => Self::FrenchCollation,
            1 => Self::AlternateHandling,
            2 => Self::CaseFirst,
            3 => Self::CaseLevel,
            4 => Self::NormalizationMode,
            5 => Self::Strength,
            7 => Self::NumericCollation,
            _ => return Err(CollatorError::InvalidAttribute { attribute: value, value: 0 }),
        })
    }
}

impl TryFrom<i32> for AttributeValue
{
    type Error = CollatorError;

    fn try_from(value: i32) -> Result<Self>
    {
        Ok(match value {
            -1 => Self::Default,
            0 => Self::Primary,
            1 => Self::Secondary,
            2 => Self::Tertiary,
            3 => Self::Quaternary,
            15 => Self::Identical,
            16 => Self::Off,
            17 => Self::On,
            20 => Self::Shifted,
            21 => Self::NonIgnorable,
            24 => Self::LowerFirst,
            25 => Self::UpperFirst,
            _ => return Err(CollatorError::InvalidAttribute { attribute: -1, value }),
        })
    }
}

impl From<Strength> for AttributeValue
{
    fn from(strength: Strength) -> Self
    {
        match strength {
            Strength::Primary => Self::Primary,
            Strength::Secondary => Self::Secondary,
            Strength::Tertiary => Self::Tertiary,
            Strength::Quaternary => Self::Quaternary,
            Strength::Identical => Self::Identical,
        }
    }
}

/// набор атрибутов коллатора
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollatorOptions
{
    /// уровень сравнения
    pub strength: Strength,
    /// тип сравнения переменных весов
    pub alternate: AlternateHandling,
    /// порядок регистров
    pub case_first: CaseFirst,
    /// отдельный уровень регистра
    pub case_level: bool,
    /// обратный порядок вторичных весов
    pub french: bool,
    /// каноническая декомпозиция исходного текста
    pub normalization: bool,
    /// последовательности цифр сравниваются по числовому значению
    pub numeric: bool,
}

impl CollatorOptions
{
    /// значение атрибута
    pub fn get(&self, attribute: Attribute) -> AttributeValue
    {
        let on_off = |flag: bool| match flag {
            true => AttributeValue::On,
            false => AttributeValue::Off,
        };

        match attribute {
            Attribute::FrenchCollation => on_off(self.french),
            Attribute::AlternateHandling => match self.alternate {
                AlternateHandling::NonIgnorable => AttributeValue::NonIgnorable,
                AlternateHandling::Shifted => AttributeValue::Shifted,
            },
            Attribute::CaseFirst => match self.case_first {
                CaseFirst::Off => AttributeValue::Off,
                CaseFirst::LowerFirst => AttributeValue::LowerFirst,
                CaseFirst::UpperFirst => AttributeValue::UpperFirst,
            },
            Attribute::CaseLevel => on_off(self.case_level),
            Attribute::NormalizationMode => on_off(self.normalization),
            Attribute::Strength => self.strength.into(),
            Attribute::NumericCollation => on_off(self.numeric),
        }
    }

    /// установить атрибут; Default - значение из таблицы. при ошибке опции не меняются
    pub fn set(
        &mut self,
        attribute: Attribute,
        value: AttributeValue,
        defaults: &CollatorOptions,
    ) -> Result<()>
    {
        let invalid = || CollatorError::InvalidAttribute {
            attribute: attribute as i32,
            value: value as i32,
        };

        let flag = |value: AttributeValue| match value {
            AttributeValue::On => Ok(true),
            AttributeValue::Off => Ok(false),
            _ => Err(invalid()),
        };

        if value == AttributeValue::Default {
            match attribute {
                Attribute::FrenchCollation => self.french = defaults.french,
                Attribute::AlternateHandling => self.alternate = defaults.alternate,
                Attribute::CaseFirst => self.case_first = defaults.case_first,
                Attribute::CaseLevel => self.case_level = defaults.case_level,
                Attribute::NormalizationMode => self.normalization = defaults.normalization,
                Attribute::Strength => self.strength = defaults.strength,
                Attribute::NumericCollation => self.numeric = defaults.numeric,
            }

            return Ok(());
        }

        match attribute {
            Attribute::FrenchCollation => self.french = flag(value)?,
            Attribute::CaseLevel => self.case_level = flag(value)?,
            Attribute::NormalizationMode => self.normalization = flag(value)?,
            Attribute::NumericCollation => self.numeric = flag(value)?,
            Attribute::AlternateHandling => {
                self.alternate = match value {
                    AttributeValue::Shifted => AlternateHandling::Shifted,
                    AttributeValue::NonIgnorable => AlternateHandling::NonIgnorable,
                    _ => return Err(invalid()),
                }
            }
            Attribute::CaseFirst => {
                self.case_first = match value {
                    AttributeValue::Off => CaseFirst::Off,
                    AttributeValue::LowerFirst => CaseFirst::LowerFirst,
                    AttributeValue::UpperFirst => CaseFirst::UpperFirst,
                    _ => return Err(invalid()),
                }
            }
            Attribute::Strength => {
                self.strength = match value {
                    AttributeValue::Primary => Strength::Primary,
                    AttributeValue::Secondary => Strength::Secondary,
                    AttributeValue::Tertiary => Strength::Tertiary,
                    AttributeValue::Quaternary => Strength::Quaternary,
                    AttributeValue::Identical => Strength::Identical,
                    _ => return Err(invalid()),
                }
            }
        }

        Ok(())
    }
}
