use core::ops::RangeInclusive;

/// начало блока слогов хангыль
const HANGUL_S_BASE: u32 = 0xAC00;
/// количество слогов хангыль в Unicode
const HANGUL_S_COUNT: u32 = 11172;
/// количество гласных * количество завершающих согласных
const HANGUL_N_COUNT: u32 = 588;
/// количество завершающих согласных
const HANGUL_T_COUNT: u32 = 27;
/// количество кодпоинтов на блок LV
const HANGUL_T_BLOCK_SIZE: u32 = HANGUL_T_COUNT + 1;

/// ведущие согласные чамо (L)
pub const LEADING_JAMO: RangeInclusive<u32> = 0x1100 ..= 0x1112;
/// гласные чамо (V)
pub const VOWEL_JAMO: RangeInclusive<u32> = 0x1161 ..= 0x1175;
/// завершающие согласные чамо (T)
pub const TRAILING_JAMO: RangeInclusive<u32> = 0x11A8 ..= 0x11C2;

/// максимальное количество чамо в слоге
pub const MAX_JAMO_PER_SYLLABLE: usize = 3;

/*
    веса слога - веса составляющих его чамо: L V [T]. в корневой таблице веса L < V < T идут
    последовательно, поэтому слоги без завершающей согласной сортируются раньше слогов с ней.
*/

/// слог хангыль?
#[inline(always)]
pub fn is_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// разложить слог на чамо, возвращает кодпоинты и их количество
#[inline]
pub fn decompose_syllable(code: u32) -> Option<([u32; MAX_JAMO_PER_SYLLABLE], usize)>
{
    if !is_syllable(code) {
        return None;
    }

    let lvt = code - HANGUL_S_BASE;

    let l = lvt / HANGUL_N_COUNT;
    let v = (lvt % HANGUL_N_COUNT) / HANGUL_T_BLOCK_SIZE;
    let t = lvt % HANGUL_T_BLOCK_SIZE;

    let jamo = [
        LEADING_JAMO.start() + l,
        VOWEL_JAMO.start() + v,
        TRAILING_JAMO.start() + t - 1,
    ];

    match t != 0 {
        true => Some((jamo, 3)),
        false => Some((jamo, 2)),
    }
}

/// кодпоинт является чамо, из которых составляются слоги?
#[inline]
pub fn is_jamo(code: u32) -> bool
{
    LEADING_JAMO.contains(&code) || VOWEL_JAMO.contains(&code) || TRAILING_JAMO.contains(&code)
}
