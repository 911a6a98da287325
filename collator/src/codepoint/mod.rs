mod iter;

pub use iter::CodepointsIter;

use smallvec::SmallVec;
use unicode_normalization::char::{canonical_combining_class, decompose_canonical};
use unicode_normalization::UnicodeNormalization;

use crate::collation_element::{CollationElement, Elements};
use crate::numeric::is_digit;
use crate::options::CollatorOptions;
use crate::tailoring::Tailoring;

/// битовая маска маркера хранимого значения информации о кодпоинте
pub const MARKER_MASK: u8 = 0b_111;

/// записи нет: веса вычисляются (слоги хангыль, декомпозиция, неявные веса)
pub const MARKER_IMPLICIT: u8 = 0b_000;
/// одинарные веса
pub const MARKER_SINGLE_WEIGHTS: u8 = 0b_001;
/// расширение
pub const MARKER_EXPANSION: u8 = 0b_010;
/// начало сокращения: позиция корня в боре
pub const MARKER_CONTRACTION: u8 = 0b_011;
/// полностью игнорируемый кодпоинт
pub const MARKER_IGNORABLE: u8 = 0b_100;

/// кодпоинты фрагмента текста, которые помещаются на стеке
pub type Codes = SmallVec<[u32; 32]>;

/// кодпоинт и сжатая информация о нём
#[derive(Debug, Clone, Copy)]
pub struct CodepointWithData
{
    pub data: u64,
    pub code: u32,
}

impl CodepointWithData
{
    /// маркер типа данных кодпоинта
    #[inline(always)]
    pub fn marker(&self) -> u8
    {
        self.data as u8 & MARKER_MASK
    }

    /// случай одинарных весов - они хранятся непосредственно в значении data
    #[inline(always)]
    pub fn single_weights(&self) -> CollationElement
    {
        CollationElement::from_u32((self.data >> 4) as u32)
    }

    /// веса из таблицы расширений
    #[inline(always)]
    pub fn expansion_weights<'a>(&self, expansions: &'a [u32]) -> &'a [u32]
    {
        let start = self.data_pos();
        let end = start + (self.data >> 36) as usize;

        expansions.get(start .. end).unwrap_or_default()
    }

    /// индекс начала данных в expansions / tries
    #[inline(always)]
    pub fn data_pos(&self) -> usize
    {
        ((self.data >> 4) as u32) as usize
    }
}

/// значение для индекса: одинарные веса
#[inline]
pub fn single_weights_value(ce: CollationElement) -> u64
{
    MARKER_SINGLE_WEIGHTS as u64 | ((ce.value() as u64) << 4)
}

/// значение для индекса: расширение
#[inline]
pub fn expansion_value(pos: usize, len: usize) -> u64
{
    MARKER_EXPANSION as u64 | ((pos as u64) << 4) | ((len as u64) << 36)
}

/// значение для индекса: сокращение
#[inline]
pub fn contraction_value(pos: usize) -> u64
{
    MARKER_CONTRACTION as u64 | ((pos as u64) << 4)
}

/// первый кодпоинт канонической декомпозиции
#[inline]
pub fn first_canonical_piece(c: char) -> char
{
    let mut first = None;

    decompose_canonical(c, |piece| {
        first.get_or_insert(piece);
    });

    first.unwrap_or(c)
}

/// разбиение текста на фрагменты, внутри которых элементы сопоставления вычисляются независимо
///
/// граница - начало и конец текста, а также позиция символа, который:
///  - начинается со стартера (проверяется, если включена нормализация),
///  - не является продолжением сокращения,
///  - не является цифрой, следующей за цифрой (при числовом сравнении)
///
/// сокращения, каноническая перестановка и числовые последовательности не пересекают границы,
/// поэтому проход текста вперёд и назад даёт одинаковые фрагменты
#[derive(Clone, Copy)]
pub struct Chunker<'a>
{
    tailoring: &'a Tailoring,
    normalization: bool,
    numeric: bool,
}

impl<'a> Chunker<'a>
{
    pub fn new(tailoring: &'a Tailoring, options: &CollatorOptions) -> Self
    {
        Self {
            tailoring,
            normalization: options.normalization,
            numeric: options.numeric,
        }
    }

    /// позиция (в байтах) является границей фрагмента?
    pub fn is_boundary(&self, text: &str, pos: usize) -> bool
    {
        if pos == 0 || pos >= text.len() {
            return true;
        }

        let c = match text.get(pos ..).and_then(|rest| rest.chars().next()) {
            Some(c) => c,
            None => return false,
        };

        let first = match self.normalization {
            true => first_canonical_piece(c),
            false => c,
        };

        if self.normalization && canonical_combining_class(first) != 0 {
            return false;
        }

        if self.tailoring.is_contraction_tail(c as u32)
            || self.tailoring.is_contraction_tail(first as u32)
        {
            return false;
        }

        if self.numeric && is_digit(c as u32) {
            let previous = text[.. pos].chars().next_back();

            if previous.is_some_and(|p| is_digit(p as u32)) {
                return false;
            }
        }

        true
    }

    /// следующая граница после pos
    pub fn next_boundary(&self, text: &str, pos: usize) -> usize
    {
        let mut pos = pos;

        loop {
            pos = match text.get(pos ..).and_then(|rest| rest.chars().next()) {
                Some(c) => pos + c.len_utf8(),
                None => return text.len(),
            };

            if self.is_boundary(text, pos) {
                return pos;
            }
        }
    }

    /// предыдущая граница перед pos
    pub fn previous_boundary(&self, text: &str, pos: usize) -> usize
    {
        let mut pos = pos;

        loop {
            pos = match text.get(.. pos).and_then(|head| head.chars().next_back()) {
                Some(c) => pos - c.len_utf8(),
                None => return 0,
            };

            if self.is_boundary(text, pos) {
                return pos;
            }
        }
    }

    /// ближайшая граница, не превышающая pos
    pub fn boundary_at_or_before(&self, text: &str, pos: usize) -> usize
    {
        match self.is_boundary(text, pos) {
            true => pos,
            false => self.previous_boundary(text, pos),
        }
    }

    /// кодпоинты фрагмента (в NFD, если включена нормализация)
    pub fn codes(&self, chunk: &str) -> Codes
    {
        match self.normalization {
            true => chunk.nfd().map(|c| c as u32).collect(),
            false => chunk.chars().map(|c| c as u32).collect(),
        }
    }

    /// элементы сопоставления фрагмента
    pub fn push_elements(&self, chunk: &str, result: &mut Elements)
    {
        let codes = self.codes(chunk);

        self.tailoring.push_elements(&codes, self.numeric, result);
    }
}
