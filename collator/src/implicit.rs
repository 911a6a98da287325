// веса получаются следующим образом: [.AAAA.05.02.0][.BBBB.00.00.0]
// первый элемент - группа и старшие биты кодпоинта, второй - младшие 13 бит кодпоинта

use crate::collation_element::CollationElement;
use crate::weights::{primary_from_ordinal, primary_ordinal, CONTINUATION_BASE};

/// основные иероглифы хань
const LEAD_HAN_CORE: u16 = 0xF402;
/// прочие иероглифы хань
const LEAD_HAN_OTHER: u16 = 0xF502;
/// тангутское письмо, нюй-шу, киданьская письменность
const LEAD_TANGUT: u16 = 0xF602;
const LEAD_NUSHU: u16 = 0xF603;
const LEAD_KHITAN: u16 = 0xF604;
/// любой другой кодпоинт
const LEAD_UNASSIGNED: u16 = 0xF702;

/// первый первичный вес вычисляемых элементов
pub const IMPLICIT_LEAD_FIRST: u16 = LEAD_HAN_CORE;

/// вторые элементы разнесены на 3 позиции, чтобы после них можно было вставлять веса правилами
pub const TRAIL_SPACING: i64 = 3;

/// рассчитать вычисляемые веса
#[inline(never)]
pub fn implicit_weights(code: u32) -> [CollationElement; 2]
{
    // сначала проверим хань

    if is_han_core(code) {
        return pair(LEAD_HAN_CORE + (code >> 13) as u16, code & 0x1FFF);
    }

    if is_han_other(code) {
        return pair(LEAD_HAN_OTHER + (code >> 13) as u16, code & 0x1FFF);
    }

    // вымершие письменности

    if is_tangut(code) {
        return pair(LEAD_TANGUT, code - 0x17000);
    }

    if is_nushu(code) {
        return pair(LEAD_NUSHU, code - 0x1B170);
    }

    if is_khitan(code) {
        return pair(LEAD_KHITAN, code - 0x18B00);
    }

    // любой другой кодпоинт
    pair(LEAD_UNASSIGNED + (code >> 13) as u16, code & 0x1FFF)
}

/// первичный вес второго элемента по младшим битам кодпоинта
#[inline]
pub fn trail_primary(low_bits: u32) -> u16
{
    primary_from_ordinal(primary_ordinal(CONTINUATION_BASE) + low_bits as i64 * TRAIL_SPACING)
}

/// первичный вес - первый элемент вычисляемых весов?
#[inline]
pub fn is_implicit_lead(primary: u16) -> bool
{
    primary >= IMPLICIT_LEAD_FIRST
}

/// первичный вес - второй элемент вычисляемых весов (или продолжение)?
#[inline]
pub fn is_continuation(primary: u16) -> bool
{
    (CONTINUATION_BASE .. IMPLICIT_LEAD_FIRST).contains(&primary)
}

#[inline(always)]
fn pair(lead: u16, low_bits: u32) -> [CollationElement; 2]
{
    [
        CollationElement::with_common(lead),
        CollationElement::new(trail_primary(low_bits), 0, 0, 0),
    ]
}

/// Основные иероглифы унификации Хань
///
/// Базовый блок иероглифов унификации Хань
///     U+4E00 ..= U+9FFF
///
/// TR10: Unified_Ideograph=True AND ((Block=CJK_Unified_Ideograph) OR (Block=CJK_Compatibility_Ideographs))
pub fn is_han_core(code: u32) -> bool
{
    (0x4E00 ..= 0x9FFF).contains(&code)
}

/// Иероглифы унификации Хань (прочие)
///
/// TR10: Unified_Ideograph=True AND NOT ((Block=CJK_Unified_Ideograph) OR (Block=CJK_Compatibility_Ideographs))
pub fn is_han_other(code: u32) -> bool
{
    [
        (0x3400 ..= 0x4DBF),
        (0x20000 ..= 0x2A6DF),
        (0x2A700 ..= 0x2B739),
        (0x2B740 ..= 0x2B81D),
        (0x2B820 ..= 0x2CEA1),
        (0x2CEB0 ..= 0x2EBE0),
        (0x2EBF0 ..= 0x2EE5D),
        (0x30000 ..= 0x3134A),
        (0x31350 ..= 0x323AF),
    ]
    .iter()
    .any(|range| range.contains(&code))
}

/// Тангутское письмо: Tangut, Tangut Components, Tangut Supplement
pub fn is_tangut(code: u32) -> bool
{
    [
        (0x17000 ..= 0x187F7),
        (0x18800 ..= 0x18AFF),
        (0x18D00 ..= 0x18D08),
    ]
    .iter()
    .any(|range| range.contains(&code))
}

/// Нюй-шу
pub fn is_nushu(code: u32) -> bool
{
    (0x1B170 ..= 0x1B2FB).contains(&code)
}

/// Киданьская письменность (малое письмо)
pub fn is_khitan(code: u32) -> bool
{
    (0x18B00 ..= 0x18CD5).contains(&code)
}
