// выбор весов при вставке между существующими: работаем в "пространстве" уровня, где
// первичные веса представлены порядковыми номерами, остальные - как есть

use super::{primary_from_ordinal, primary_ordinal, CONTINUATION_BASE, PRIMARY};
use crate::collation_element::{QUATERNARY_MAX, SECONDARY_MAX, TERTIARY_MAX};

/// максимальный шаг при вставке после / перед весом, по уровням
const STEPS: [i64; 4] = [8, 4, 2, 1];

/// сдвиг последующих весов при исчерпании промежутка, по уровням
const SHIFTS: [i64; 4] = [254, 4, 2, 1];

/// вес в пространство уровня
#[inline]
pub fn weight_to_space(level: u8, weight: u32) -> i64
{
    match level {
        PRIMARY => primary_ordinal(weight as u16),
        _ => weight as i64,
    }
}

/// вес из пространства уровня
#[inline]
pub fn weight_from_space(level: u8, value: i64) -> u32
{
    match level {
        PRIMARY => primary_from_ordinal(value) as u32,
        _ => value as u32,
    }
}

/// нижняя (не включаемая) граница допустимых весов уровня
#[inline]
pub fn level_minimum(level: u8) -> i64
{
    match level {
        PRIMARY => -1,
        2 => 1,
        3 => 0,
        _ => -1,
    }
}

/// верхняя (не включаемая) граница весов уровня, доступных для вставки
#[inline]
pub fn level_limit(level: u8) -> i64
{
    match level {
        PRIMARY => primary_ordinal(CONTINUATION_BASE),
        2 => SECONDARY_MAX as i64 + 1,
        3 => TERTIARY_MAX as i64 + 1,
        _ => QUATERNARY_MAX as i64 + 1,
    }
}

/// величина сдвига последующих весов
#[inline]
pub fn shift_delta(level: u8) -> i64
{
    SHIFTS[(level - 1) as usize]
}

/// вес строго между lower и upper: сразу после lower или непосредственно перед upper
#[inline]
pub fn weight_between(level: u8, lower: i64, upper: i64, after: bool) -> Option<i64>
{
    let gap = upper - lower;

    if gap < 2 {
        return None;
    }

    let step = (gap / 2).min(STEPS[(level - 1) as usize]);

    match after {
        true => Some(lower + step),
        false => Some(upper - step),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn between()
    {
        assert_eq!(weight_between(1, 0, 32, true), Some(8));
        assert_eq!(weight_between(1, 0, 32, false), Some(24));
        assert_eq!(weight_between(2, 5, 0x100, true), Some(9));
        assert_eq!(weight_between(3, 2, 4, true), Some(3));
        assert_eq!(weight_between(3, 2, 3, true), None);
        assert_eq!(weight_between(4, 0, 4, true), Some(1));
    }

    #[test]
    fn chained_insertions_stay_ordered()
    {
        let upper = 32;
        let mut lower = 0;

        while let Some(weight) = weight_between(1, lower, upper, true) {
            assert!(weight > lower && weight < upper);
            lower = weight;
        }

        assert_eq!(lower, upper - 1);
    }

    #[test]
    fn space_conversion()
    {
        assert_eq!(weight_from_space(1, weight_to_space(1, 0x0405)), 0x0405);
        assert_eq!(weight_from_space(2, weight_to_space(2, 0x09)), 0x09);
        assert!(level_limit(1) > weight_to_space(1, 0x7FFF));
    }
}
