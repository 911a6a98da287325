// числовое сравнение последовательностей цифр: [.ZZZZ.05.02.0] [.NNNN.00.00.0] [.PP02.00.00.0]...
//  ZZZZ - первичный вес цифры 0, NNNN - количество значащих цифр, PP - пары цифр (0x80 + 0 ..= 99)

use crate::collation_element::{CollationElement, Elements};

/// десятичные цифры, которые учитываются при числовом сравнении (начало блока)
const DIGIT_BLOCKS: [u32; 5] = [0x0030, 0x0660, 0x06F0, 0x0966, 0xFF10];

/// старший байт весов количества цифр и пар
const NUMERIC_LEAD: u16 = 0x80;
/// ограничение количества значащих цифр, чтобы веса не пересекались с вычисляемыми
const MAX_DIGITS_COUNT: usize = 0x70 * 254;

/// значение десятичной цифры
#[inline]
pub fn digit_value(code: u32) -> Option<u8>
{
    DIGIT_BLOCKS
        .iter()
        .find(|&&base| code.wrapping_sub(base) < 10)
        .map(|&base| (code - base) as u8)
}

/// кодпоинт - десятичная цифра?
#[inline(always)]
pub fn is_digit(code: u32) -> bool
{
    digit_value(code).is_some()
}

/// дописать элементы последовательности цифр
pub fn push_numeric_weights(digits: &[u8], zero_primary: u16, result: &mut Elements)
{
    // незначащие нули
    let significant = match digits.iter().position(|&d| d != 0) {
        Some(start) => &digits[start ..],
        None => &[0u8][..],
    };

    let count = significant.len().min(MAX_DIGITS_COUNT);

    result.push(CollationElement::with_common(zero_primary));
    result.push(CollationElement::new(
        ((NUMERIC_LEAD + (count / 254) as u16) << 8) | (2 + (count % 254) as u16),
        0,
        0,
        0,
    ));

    for pair in significant[.. count].chunks(2) {
        let value = match pair {
            [high, low] => high * 10 + low,
            [high] => high * 10,
            _ => 0,
        };

        result.push(CollationElement::new(((NUMERIC_LEAD + value as u16) << 8) | 0x02, 0, 0, 0));
    }
}
