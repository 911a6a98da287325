use core::fmt::{Debug, Formatter};

use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;

use crate::collation_element::CollationElement;
use crate::options::*;

/// разделитель уровней ключа
pub const LEVEL_SEPARATOR: u8 = 0x01;
/// завершение ключа
pub const KEY_TERMINATOR: u8 = 0x00;
/// минимальный байт веса
pub const BYTE_BASE: u8 = 0x02;
/// четвертичный вес непеременных элементов (при shifted) и всех элементов (при non-ignorable)
pub const QUATERNARY_BASE: u8 = 0xFC;

/// количество значений байта веса
const BYTE_VALUES: u32 = 254;

/// байты ключа: на стеке, пока помещаются
pub type KeyBytes = SmallVec<[u8; 64]>;

/// ключ сортировки: побайтовое сравнение ключей эквивалентно сравнению строк
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortKey(KeyBytes);

impl SortKey
{
    #[inline]
    pub fn as_bytes(&self) -> &[u8]
    {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8>
    {
        self.0.into_vec()
    }
}

impl AsRef<[u8]> for SortKey
{
    fn as_ref(&self) -> &[u8]
    {
        &self.0
    }
}

impl Debug for SortKey
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        f.write_str("[")?;

        for (i, byte) in self.0.iter().enumerate() {
            match i {
                0 => write!(f, "{:02X}", byte)?,
                _ => write!(f, " {:02X}", byte)?,
            }
        }

        f.write_str("]")
    }
}

/// переменный элемент (при shifted - переносится на четвертичный уровень)?
#[inline(always)]
pub fn is_variable(ce: CollationElement, options: &CollatorOptions, variable_top: u16) -> bool
{
    options.alternate == AlternateHandling::Shifted
        && ce.primary() != 0
        && ce.primary() <= variable_top
}

/// биты регистра с учётом порядка регистров: меньшее значение сортируется раньше
#[inline(always)]
fn case_order(case_bits: u8, case_first: CaseFirst) -> u8
{
    match case_first {
        CaseFirst::UpperFirst => 2 - case_bits.min(2),
        _ => case_bits,
    }
}

/// третичный вес в ключе
#[inline(always)]
fn tertiary_weight(ce: CollationElement, options: &CollatorOptions) -> u8
{
    let tertiary = ce.tertiary();
    let base = tertiary & 0x0F;

    if options.case_level {
        return base;
    }

    match options.case_first {
        CaseFirst::UpperFirst => (case_order(ce.case_bits(), options.case_first) << 4) | base,
        _ => tertiary,
    }
}

/// создать ключ сортировки из элементов сопоставления текста
///
/// уровни: первичный, вторичный, регистр, третичный, четвертичный, идентичный - до заданного
/// уровня сравнения; пустые уровни в конце ключа не записываются
pub fn compose_key(
    elements: &[CollationElement],
    text: &str,
    options: &CollatorOptions,
    variable_top: u16,
) -> SortKey
{
    let strength = options.strength.levels();
    let shifted = options.alternate == AlternateHandling::Shifted;

    let mut primary = KeyBytes::new();
    let mut secondary = KeyBytes::new();
    let mut case = KeyBytes::new();
    let mut tertiary = KeyBytes::new();
    let mut quaternary = KeyBytes::new();

    macro_rules! push {
        ($to: ident, $level: expr, $value: expr) => {
            if strength >= $level {
                $to.push($value);
            }
        };
    }

    let mut following_variable = false;

    for &ce in elements.iter().filter(|ce| !ce.is_ignorable()) {
        let p = ce.primary();

        if is_variable(ce, options, variable_top) {
            following_variable = true;

            push!(quaternary, 4, (p >> 8) as u8);
            push!(quaternary, 4, p as u8);

            continue;
        }

        // игнорируемые на первом уровне после переменного - игнорируются полностью
        if p == 0 && shifted && following_variable {
            continue;
        }

        if p != 0 {
            following_variable = false;

            primary.push((p >> 8) as u8);
            primary.push(p as u8);

            if options.case_level {
                case.push(case_order(ce.case_bits(), options.case_first) + BYTE_BASE);
            }
        }

        if ce.secondary() != 0 {
            push!(secondary, 2, ce.secondary());
        }

        if ce.tertiary() != 0 {
            push!(tertiary, 3, tertiary_weight(ce, options) + BYTE_BASE);
            push!(quaternary, 4, QUATERNARY_BASE + ce.quaternary());
        }
    }

    if options.french {
        secondary.reverse();
    }

    let mut levels: SmallVec<[KeyBytes; 6]> = SmallVec::new();

    levels.push(primary);

    if strength >= 2 {
        levels.push(secondary);
    }

    if options.case_level {
        levels.push(case);
    }

    if strength >= 3 {
        levels.push(tertiary);
    }

    if strength >= 4 {
        levels.push(quaternary);
    }

    if options.strength == Strength::Identical {
        levels.push(identical_level(text));
    }

    while levels.last().is_some_and(|level| level.is_empty()) {
        levels.pop();
    }

    let mut key = KeyBytes::new();

    for (i, level) in levels.iter().enumerate() {
        if i != 0 {
            key.push(LEVEL_SEPARATOR);
        }

        key.extend_from_slice(level);
    }

    key.push(KEY_TERMINATOR);

    SortKey(key)
}

/// идентичный уровень: кодпоинты NFD, по 3 байта (основание 254)
fn identical_level(text: &str) -> KeyBytes
{
    let mut result = KeyBytes::new();

    for c in text.nfd() {
        let code = c as u32;

        result.push((code / (BYTE_VALUES * BYTE_VALUES)) as u8 + BYTE_BASE);
        result.push((code / BYTE_VALUES % BYTE_VALUES) as u8 + BYTE_BASE);
        result.push((code % BYTE_VALUES) as u8 + BYTE_BASE);
    }

    result
}
