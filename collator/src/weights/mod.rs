use crate::collation_element::CollationElement;

mod alloc;

pub use alloc::{
    level_limit, level_minimum, shift_delta, weight_between, weight_from_space, weight_to_space,
};

/// уровни сравнения весов
pub const PRIMARY: u8 = 1;
pub const SECONDARY: u8 = 2;
pub const TERTIARY: u8 = 3;
pub const QUATERNARY: u8 = 4;

/// первичные веса: оба байта не меньше 2, поэтому пространство весов - 254 x 254
const PRIMARY_BYTE_BASE: u16 = 2;
const PRIMARY_BYTES_COUNT: i64 = 254;

/// первый вес продолжений (вторые элементы вычисляемых весов, числовые последовательности)
pub const CONTINUATION_BASE: u16 = 0x8002;

/// порядковый номер первичного веса
#[inline]
pub fn primary_ordinal(primary: u16) -> i64
{
    if primary < 0x0202 {
        return -1;
    }

    let hi = (primary >> 8).saturating_sub(PRIMARY_BYTE_BASE) as i64;
    let lo = (primary & 0xFF).saturating_sub(PRIMARY_BYTE_BASE) as i64;

    hi * PRIMARY_BYTES_COUNT + lo
}

/// первичный вес по порядковому номеру
#[inline]
pub fn primary_from_ordinal(ordinal: i64) -> u16
{
    let hi = (ordinal / PRIMARY_BYTES_COUNT) as u16 + PRIMARY_BYTE_BASE;
    let lo = (ordinal % PRIMARY_BYTES_COUNT) as u16 + PRIMARY_BYTE_BASE;

    (hi << 8) | lo
}

/// веса для элемента сопоставления
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Weights
{
    pub primary: u16,
    pub secondary: u8,
    pub tertiary: u8,
    pub quaternary: u8,
}

impl Weights
{
    /// в виде, в котором веса представлены в allkeys
    pub fn format(&self) -> String
    {
        format!(
            "[.{:04X}.{:02X}.{:02X}.{}]",
            self.primary, self.secondary, self.tertiary, self.quaternary,
        )
    }
}

impl From<CollationElement> for Weights
{
    fn from(ce: CollationElement) -> Self
    {
        Self {
            primary: ce.primary(),
            secondary: ce.secondary(),
            tertiary: ce.tertiary(),
            quaternary: ce.quaternary(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn ordinals()
    {
        assert_eq!(primary_ordinal(0x0202), 0);
        assert_eq!(primary_ordinal(0x0203), 1);
        assert_eq!(primary_ordinal(0x0302), 254);
        assert_eq!(primary_ordinal(0), -1);

        for ordinal in [0, 1, 253, 254, 255, 1000, 32004, 56577] {
            let primary = primary_from_ordinal(ordinal);

            assert!(primary >> 8 >= 2 && primary & 0xFF >= 2);
            assert_eq!(primary_ordinal(primary), ordinal);
        }

        assert_eq!(primary_from_ordinal(primary_ordinal(CONTINUATION_BASE)), CONTINUATION_BASE);
    }

    #[test]
    fn format()
    {
        let weights = Weights::from(CollationElement::new(0x0302, 0x05, 0x22, 1));

        assert_eq!(weights.format(), "[.0302.05.22.1]");
    }
}
