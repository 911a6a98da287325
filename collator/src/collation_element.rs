use core::fmt::Debug;

use smallvec::SmallVec;

use crate::weights::Weights;

// запись весов: 1111 1111  1111 1111    2222 2222  cc33 3344
// cc - биты регистра, входят в третичный вес

/// общий вторичный вес
pub const SECONDARY_COMMON: u8 = 0x05;
/// общий третичный вес (строчные буквы и символы без регистра)
pub const TERTIARY_COMMON: u8 = 0x02;
/// вариант совместимости (полная ширина, неразрывный пробел)
pub const TERTIARY_COMPAT: u8 = 0x03;
/// надстрочные символы, лигатуры, модификаторы
pub const TERTIARY_SUPER: u8 = 0x04;
/// конечные формы
pub const TERTIARY_FINAL: u8 = 0x05;
/// общий третичный вес прописных букв
pub const TERTIARY_UPPER: u8 = 0x22;

/// биты регистра
pub const CASE_LOWER: u8 = 0b00;
pub const CASE_MIXED: u8 = 0b01;
pub const CASE_UPPER: u8 = 0b10;

/// максимальные значения весов уровней
pub const SECONDARY_MAX: u8 = 0xFF;
pub const TERTIARY_MAX: u8 = 0x3F;
pub const QUATERNARY_MAX: u8 = 0x03;

/// элементы сопоставления фрагмента текста / записи таблицы
pub type Elements = SmallVec<[CollationElement; 8]>;

/// максимальное количество элементов в одной записи таблицы
pub const MAX_ELEMENTS_PER_MAPPING: usize = 31;

/// элемент сопоставления: упакованные веса четырёх уровней
///
/// сравнение упакованных значений как чисел эквивалентно сравнению весов уровень за уровнем
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CollationElement(u32);

impl CollationElement
{
    /// полностью игнорируемый элемент
    pub const IGNORABLE: Self = Self(0);

    /// маркер конца последовательности (для API дескрипторов)
    pub const NULL_ORDER: u32 = 0xFFFF_FFFF;

    #[inline(always)]
    pub const fn new(primary: u16, secondary: u8, tertiary: u8, quaternary: u8) -> Self
    {
        Self(
            ((primary as u32) << 16)
                | ((secondary as u32) << 8)
                | (((tertiary & TERTIARY_MAX) as u32) << 2)
                | (quaternary & QUATERNARY_MAX) as u32,
        )
    }

    /// элемент с общими весами нижних уровней
    #[inline(always)]
    pub const fn with_common(primary: u16) -> Self
    {
        Self::new(primary, SECONDARY_COMMON, TERTIARY_COMMON, 0)
    }

    #[inline(always)]
    pub const fn from_u32(value: u32) -> Self
    {
        Self(value)
    }

    #[inline(always)]
    pub const fn value(&self) -> u32
    {
        self.0
    }

    #[inline(always)]
    pub const fn primary(&self) -> u16
    {
        (self.0 >> 16) as u16
    }

    #[inline(always)]
    pub const fn secondary(&self) -> u8
    {
        (self.0 >> 8) as u8
    }

    /// третичный вес вместе с битами регистра
    #[inline(always)]
    pub const fn tertiary(&self) -> u8
    {
        (self.0 as u8) >> 2
    }

    #[inline(always)]
    pub const fn quaternary(&self) -> u8
    {
        self.0 as u8 & QUATERNARY_MAX
    }

    /// биты регистра
    #[inline(always)]
    pub const fn case_bits(&self) -> u8
    {
        self.tertiary() >> 4
    }

    #[inline(always)]
    pub const fn is_ignorable(&self) -> bool
    {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_primary_ignorable(&self) -> bool
    {
        self.primary() == 0
    }

    /// вес уровня (1 ..= 4)
    #[inline]
    pub const fn level_weight(&self, level: u8) -> u32
    {
        match level {
            1 => self.primary() as u32,
            2 => self.secondary() as u32,
            3 => self.tertiary() as u32,
            _ => self.quaternary() as u32,
        }
    }

    /// заменить вес уровня
    #[inline]
    pub const fn with_level_weight(self, level: u8, weight: u32) -> Self
    {
        match level {
            1 => Self::new(weight as u16, self.secondary(), self.tertiary(), self.quaternary()),
            2 => Self::new(self.primary(), weight as u8, self.tertiary(), self.quaternary()),
            3 => Self::new(self.primary(), self.secondary(), weight as u8, self.quaternary()),
            _ => Self::new(self.primary(), self.secondary(), self.tertiary(), weight as u8),
        }
    }
}

impl From<CollationElement> for u32
{
    fn from(value: CollationElement) -> Self
    {
        value.0
    }
}

impl Debug for CollationElement
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(Weights::from(*self).format().as_str())
    }
}
