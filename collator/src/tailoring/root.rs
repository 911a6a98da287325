// корневая таблица: строится один раз из репертуара data.rs

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use super::{Tailoring, TailoringBuilder};
use crate::collation_element::{
    CollationElement, Elements, SECONDARY_COMMON, TERTIARY_COMMON, TERTIARY_UPPER,
};
use crate::data::*;
use crate::hangul::{LEADING_JAMO, TRAILING_JAMO, VOWEL_JAMO};
use crate::options::MaxVariable;
use crate::weights::primary_from_ordinal;

static ROOT: Lazy<Arc<Tailoring>> = Lazy::new(|| {
    let tailoring = build_root();

    debug!("root collation table: {} entries", tailoring.len());

    Arc::new(tailoring)
});

/// корневая таблица
pub fn root() -> Arc<Tailoring>
{
    Arc::clone(&ROOT)
}

/// последовательная раздача первичных весов
struct Primaries
{
    ordinal: i64,
}

impl Primaries
{
    fn next(&mut self) -> u16
    {
        let primary = primary_from_ordinal(self.ordinal);
        self.ordinal += ROOT_GAP;

        primary
    }
}

#[inline]
fn single(ce: CollationElement) -> Elements
{
    Elements::from_slice(&[ce])
}

/// каждому символу строки - свой первичный вес; возвращает последний
fn assign(builder: &mut TailoringBuilder, primaries: &mut Primaries, chars: &str) -> u16
{
    let mut last = 0;

    for c in chars.chars() {
        last = primaries.next();
        builder.insert(c.to_string(), single(CollationElement::with_common(last)));
    }

    last
}

/// буквы алфавита: строчные получают новый первичный вес, прописные - тот же с третичным весом
/// прописной буквы
fn assign_letters(builder: &mut TailoringBuilder, primaries: &mut Primaries, letters: &str)
{
    for c in letters.chars() {
        let primary = primaries.next();
        builder.insert(c.to_string(), single(CollationElement::with_common(primary)));

        let mut upper = c.to_uppercase();

        if let (Some(u), None) = (upper.next(), upper.next()) {
            let key = u.to_string();

            if u != c && !builder.contains(&key) {
                let ce = CollationElement::new(primary, SECONDARY_COMMON, TERTIARY_UPPER, 0);
                builder.insert(key, single(ce));
            }
        }
    }
}

/// веса последовательности с заменой третичного веса (биты регистра сохраняются)
fn variant(builder: &TailoringBuilder, base: &str, tertiary: u8) -> Elements
{
    builder
        .lookup(base)
        .iter()
        .map(|ce| {
            CollationElement::new(
                ce.primary(),
                ce.secondary(),
                (ce.tertiary() & 0x30) | tertiary,
                ce.quaternary(),
            )
        })
        .collect()
}

/// построить корневую таблицу
pub fn build_root() -> Tailoring
{
    let mut builder = TailoringBuilder::new();
    let mut primaries = Primaries {
        ordinal: ROOT_FIRST_ORDINAL,
    };

    for code in IGNORABLES.iter().cloned().flatten() {
        if let Some(c) = char::from_u32(code) {
            builder.insert(c.to_string(), Elements::new());
        }
    }

    // переменные веса
    for (group, chars) in [
        (MaxVariable::Space, SPACES),
        (MaxVariable::Punctuation, PUNCTUATION),
        (MaxVariable::Symbol, SYMBOLS),
        (MaxVariable::Currency, CURRENCY),
    ] {
        let top = assign(&mut builder, &mut primaries, chars);
        builder.set_group_top(group, top);
    }

    builder.set_max_variable(MaxVariable::Punctuation);

    // цифры
    assign(&mut builder, &mut primaries, DIGITS);

    for (i, digit) in DIGITS.chars().enumerate() {
        let elements = builder.lookup(&digit.to_string());

        for block in DIGIT_BLOCKS {
            if let Some(c) = char::from_u32(block + i as u32) {
                builder.insert(c.to_string(), elements.clone());
            }
        }
    }

    // алфавиты
    for letters in [LATIN, GREEK, CYRILLIC] {
        assign_letters(&mut builder, &mut primaries, letters);
    }

    // чамо хангыль: L, V, T
    for code in [LEADING_JAMO, VOWEL_JAMO, TRAILING_JAMO].into_iter().flatten() {
        if let Some(c) = char::from_u32(code) {
            let ce = CollationElement::with_common(primaries.next());
            builder.insert(c.to_string(), single(ce));
        }
    }

    // диакритические знаки: только вторичные веса
    for (i, code) in COMBINING_MARKS.enumerate() {
        if let Some(c) = char::from_u32(code) {
            let secondary = COMBINING_SECONDARY_BASE + COMBINING_SECONDARY_STEP * i as u8;
            let ce = CollationElement::new(0, secondary, TERTIARY_COMMON, 0);

            builder.insert(c.to_string(), single(ce));
        }
    }

    for (c, base, tertiary) in VARIANTS {
        let elements = variant(&builder, base, tertiary);
        builder.insert(c.to_string(), elements);
    }

    // формы полной ширины
    for code in FULLWIDTH {
        let (Some(c), Some(ascii)) = (char::from_u32(code), char::from_u32(code - FULLWIDTH_SHIFT))
        else {
            continue;
        };

        let elements: Elements = builder
            .lookup(&ascii.to_string())
            .iter()
            .map(|ce| match ce.tertiary() {
                0 => *ce,
                tertiary => ce.with_level_weight(3, tertiary as u32 + 1),
            })
            .collect();

        builder.insert(c.to_string(), elements);
    }

    builder.close_over_canonical(true);
    builder.bake(String::new())
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::collation_element::TERTIARY_COMPAT;

    #[test]
    fn groups_are_ordered()
    {
        let root = root();

        let space = root.elements_of(" ")[0];
        let comma = root.elements_of(",")[0];
        let plus = root.elements_of("+")[0];
        let dollar = root.elements_of("$")[0];
        let zero = root.elements_of("0")[0];
        let a = root.elements_of("a")[0];
        let alpha = root.elements_of("α")[0];
        let be = root.elements_of("б")[0];

        assert!(space < comma && comma < plus && plus < dollar && dollar < zero);
        assert!(zero < a && a < alpha && alpha < be);

        assert!(comma.primary() <= root.variable_top());
        assert!(plus.primary() > root.variable_top());
    }

    #[test]
    fn variants()
    {
        let root = root();

        let space = root.elements_of(" ")[0];
        let nbsp = root.elements_of("\u{A0}")[0];

        assert_eq!(space.primary(), nbsp.primary());
        assert_eq!(nbsp.tertiary(), TERTIARY_COMPAT);

        let fullwidth = root.elements_of("Ａ")[0];
        let upper = root.elements_of("A")[0];

        assert_eq!(fullwidth.primary(), upper.primary());
        assert_eq!(fullwidth.tertiary(), TERTIARY_UPPER + 1);

        let arabic = root.elements_of("\u{0663}");
        assert_eq!(arabic, root.elements_of("3"));
    }

    #[test]
    fn closure()
    {
        let root = root();

        assert_eq!(root.elements_of("É"), root.elements_of("E\u{301}"));
        assert_eq!(root.elements_of("ё"), root.elements_of("е\u{308}"));
        assert_eq!(root.elements_of("ά"), root.elements_of("α\u{301}"));
        assert_eq!(root.elements_of("\u{212B}"), root.elements_of("A\u{30A}"));
    }
}
