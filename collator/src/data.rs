// репертуар корневой таблицы: группы символов в порядке возрастания первичных весов

use core::ops::RangeInclusive;

use crate::collation_element::{TERTIARY_COMPAT, TERTIARY_FINAL, TERTIARY_SUPER};

/// полностью игнорируемые кодпоинты (управляющие символы, форматирование)
pub const IGNORABLES: [RangeInclusive<u32>; 9] = [
    0x0000 ..= 0x0008,
    0x000E ..= 0x001F,
    0x007F ..= 0x0084,
    0x0086 ..= 0x009F,
    0x00AD ..= 0x00AD,
    0x200B ..= 0x200F,
    0x2060 ..= 0x2064,
    0xFEFF ..= 0xFEFF,
    0xE0001 ..= 0xE007F,
];

/// пробельные символы (переменные веса)
pub const SPACES: &str = "\t\n\u{0B}\u{0C}\r\u{85}\u{2028}\u{2029} ";

/// знаки препинания (переменные веса)
pub const PUNCTUATION: &str =
    "_-\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2015},;:!¡?¿.\u{2026}·'\u{2018}\u{2019}\u{201A}\u{2039}\u{203A}\"\u{201C}\u{201D}\u{201E}«»()[]{}§¶@*/\\&#%\u{2030}\u{2020}\u{2021}\u{2022}";

/// символы
pub const SYMBOLS: &str = "`´^¯¨°©®+±÷×<=>¬|¦~";

/// символы валют
pub const CURRENCY: &str = "¤¢$£¥€\u{20BD}\u{20B9}";

/// десятичные цифры
pub const DIGITS: &str = "0123456789";

/// латиница (строчные)
pub const LATIN: &str = "aæbcdðđefghħiıjkĸlłmnŋoœøpqrstŧuvwxyzþ";

/// греческий алфавит (строчные)
pub const GREEK: &str = "αβγδεζηθικλμνξοπρστυφχψω";

/// кириллица (строчные)
pub const CYRILLIC: &str = "абвгґдђеєжзѕиіјклљмнњопрстћуфхцчџшщъыьэюя";

/// варианты символов: кодпоинт, последовательность базовых символов, третичный вес
pub const VARIANTS: [(char, &str, u8); 30] = [
    // пробелы
    ('\u{00A0}', " ", TERTIARY_COMPAT),
    ('\u{2002}', " ", TERTIARY_COMPAT),
    ('\u{2003}', " ", TERTIARY_COMPAT),
    ('\u{2009}', " ", TERTIARY_COMPAT),
    ('\u{3000}', " ", TERTIARY_COMPAT),
    // лигатуры и особые формы латиницы
    ('ß', "ss", TERTIARY_COMPAT),
    ('ĳ', "ij", TERTIARY_COMPAT),
    ('Ĳ', "IJ", TERTIARY_COMPAT),
    ('ſ', "s", TERTIARY_COMPAT),
    ('ª', "a", TERTIARY_SUPER),
    ('º', "o", TERTIARY_SUPER),
    ('µ', "μ", TERTIARY_COMPAT),
    ('ς', "σ", TERTIARY_FINAL),
    // надстрочные и подстрочные цифры
    ('⁰', "0", TERTIARY_SUPER),
    ('¹', "1", TERTIARY_SUPER),
    ('²', "2", TERTIARY_SUPER),
    ('³', "3", TERTIARY_SUPER),
    ('⁴', "4", TERTIARY_SUPER),
    ('⁵', "5", TERTIARY_SUPER),
    ('⁶', "6", TERTIARY_SUPER),
    ('⁷', "7", TERTIARY_SUPER),
    ('⁸', "8", TERTIARY_SUPER),
    ('⁹', "9", TERTIARY_SUPER),
    ('₀', "0", TERTIARY_SUPER),
    ('₁', "1", TERTIARY_SUPER),
    ('₂', "2", TERTIARY_SUPER),
    ('₃', "3", TERTIARY_SUPER),
    ('½', "1/2", TERTIARY_COMPAT),
    ('¼', "1/4", TERTIARY_COMPAT),
    ('¾', "3/4", TERTIARY_COMPAT),
];

/// цифры других письменностей: начало блока (веса - как у ASCII-цифр)
pub const DIGIT_BLOCKS: [u32; 4] = [0x0660, 0x06F0, 0x0966, 0xFF10];

/// формы полной ширины U+FF01 ..= U+FF5E соответствуют ASCII U+0021 ..= U+007E
pub const FULLWIDTH: RangeInclusive<u32> = 0xFF01 ..= 0xFF5E;
pub const FULLWIDTH_SHIFT: u32 = 0xFEE0;

/// комбинируемые диакритические знаки: вторичные веса идут в порядке кодпоинтов
pub const COMBINING_MARKS: RangeInclusive<u32> = 0x0300 ..= 0x036F;
/// вторичный вес первого комбинируемого знака, шаг между соседними
pub const COMBINING_SECONDARY_BASE: u8 = 0x10;
pub const COMBINING_SECONDARY_STEP: u8 = 2;

/// блоки, в которых веса символов с канонической декомпозицией вычисляются по их декомпозиции
pub const CLOSURE_RANGES: [RangeInclusive<u32>; 6] = [
    0x00C0 ..= 0x024F,
    0x0386 ..= 0x03CE,
    0x0400 ..= 0x04FF,
    0x1E00 ..= 0x1EFF,
    0x1F00 ..= 0x1FFF,
    0x212A ..= 0x212B,
];

/// промежуток между соседними первичными весами корневой таблицы
pub const ROOT_GAP: i64 = 32;

/// первый первичный вес корневой таблицы (порядковый номер)
pub const ROOT_FIRST_ORDINAL: i64 = ROOT_GAP;
