use core::fmt::Debug;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use smallvec::SmallVec;
use unicode_normalization::char::decompose_canonical;

use crate::codepoint::{
    CodepointWithData, CodepointsIter, MARKER_CONTRACTION, MARKER_EXPANSION, MARKER_IGNORABLE,
    MARKER_SINGLE_WEIGHTS,
};
use crate::collation_element::{CollationElement, Elements};
use crate::hangul::decompose_syllable;
use crate::implicit::{implicit_weights, is_continuation, is_implicit_lead};
use crate::numeric::{digit_value, push_numeric_weights};
use crate::options::CollatorOptions;
use trie::{longest_match, TrieNode};

pub use builder::TailoringBuilder;

mod builder;
mod root;
mod trie;

/// ключ таблицы длин расширений: элементы с одинаковым первичным весом делят запись,
/// игнорируемые на первом уровне различаются целиком
#[inline(always)]
pub fn expansion_key(ce: CollationElement) -> u32
{
    match ce.primary() {
        0 => ce.value(),
        _ => ce.value() & 0xFFFF_0000,
    }
}

/// неизменяемая таблица весов: корневая или построенная по правилам
pub struct Tailoring
{
    /// кодпоинт -> одинарные веса / расширение / начало сокращения / игнорируемый
    index: HashMap<u32, u64>,
    /// расширения
    expansions: Vec<u32>,
    /// сокращения: бор весов
    tries: Vec<u32>,
    /// кодпоинты, встречающиеся в сокращениях не на первом месте
    tails: HashSet<u32>,
    /// первичный вес (элемент, если первичный вес нулевой) -> максимальная длина расширения
    max_expansions: HashMap<u32, u8>,
    /// последний переменный первичный вес
    variable_top: u16,
    /// последние первичные веса групп переменных символов
    group_tops: [u16; 4],
    /// первичный вес цифры 0 (для числового сравнения)
    digit_primary: u16,
    /// текст правил
    rules: String,
    /// значения атрибутов, заданные правилами
    options: CollatorOptions,
    /// исходные записи - для построения производных таблиц
    entries: BTreeMap<String, Elements>,
}

impl Tailoring
{
    /// корневая таблица
    pub fn root() -> Arc<Tailoring>
    {
        root::root()
    }

    /// текст правил, по которым построена таблица (у корневой - пустой)
    pub fn rules(&self) -> &str
    {
        &self.rules
    }

    /// значения атрибутов по умолчанию
    pub fn default_options(&self) -> &CollatorOptions
    {
        &self.options
    }

    /// последний переменный первичный вес
    pub fn variable_top(&self) -> u16
    {
        self.variable_top
    }

    /// количество последовательностей в таблице
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// кодпоинт встречается в сокращениях не на первом месте?
    #[inline(always)]
    pub fn is_contraction_tail(&self, code: u32) -> bool
    {
        self.tails.contains(&code)
    }

    /// максимальная длина расширения, в которое может входить элемент
    pub fn max_expansion(&self, element: u32) -> usize
    {
        let ce = CollationElement::from_u32(element);

        if let Some(&max) = self.max_expansions.get(&expansion_key(ce)) {
            return max as usize;
        }

        let primary = ce.primary();

        match is_implicit_lead(primary) || is_continuation(primary) {
            true => 2,
            false => 1,
        }
    }

    /// записанные в таблицу элементы последовательности
    pub fn mapping(&self, key: &str) -> Option<&[CollationElement]>
    {
        self.entries.get(key).map(|elements| elements.as_slice())
    }

    /// элементы сопоставления кодпоинтов фрагмента
    pub fn push_elements(&self, codes: &[u32], numeric: bool, result: &mut Elements)
    {
        let mut iter = CodepointsIter::new(codes, &self.index);

        while let Some(codepoint) = iter.next() {
            if numeric && digit_value(codepoint.code).is_some() {
                let digits: SmallVec<[u8; 32]> =
                    iter.remaining().iter().map_while(|&code| digit_value(code)).collect();

                iter.advance(digits.len() - 1);
                push_numeric_weights(&digits, self.digit_primary, result);

                continue;
            }

            match codepoint.marker() {
                MARKER_CONTRACTION => {
                    match longest_match(&self.tries, codepoint.data_pos(), iter.remaining()) {
                        Some((node, len)) => {
                            self.push_node_weights(node, result);
                            iter.advance(len - 1);
                        }
                        None => self.push_computed(codepoint.code, result),
                    }
                }
                _ => self.push_single(codepoint, result),
            }
        }
    }

    /// веса отдельного кодпоинта, без учёта сокращений
    fn push_single(&self, codepoint: CodepointWithData, result: &mut Elements)
    {
        match codepoint.marker() {
            MARKER_SINGLE_WEIGHTS => result.push(codepoint.single_weights()),
            MARKER_EXPANSION => result.extend(
                codepoint
                    .expansion_weights(&self.expansions)
                    .iter()
                    .map(|&value| CollationElement::from_u32(value)),
            ),
            MARKER_IGNORABLE => (),
            MARKER_CONTRACTION => match TrieNode::from_slice(&self.tries, codepoint.data_pos()) {
                Some(node) if node.has_mapping() => self.push_node_weights(node, result),
                _ => result.extend(implicit_weights(codepoint.code)),
            },
            _ => self.push_computed(codepoint.code, result),
        }
    }

    /// веса кодпоинта без записи в таблице: слоги хангыль, символы с декомпозицией, неявные веса
    fn push_computed(&self, code: u32, result: &mut Elements)
    {
        let mut pieces = SmallVec::<[u32; 4]>::new();

        match decompose_syllable(code) {
            Some((jamo, count)) => pieces.extend_from_slice(&jamo[.. count]),
            None => {
                if let Some(c) = char::from_u32(code) {
                    decompose_canonical(c, |piece| pieces.push(piece as u32));
                }
            }
        }

        if pieces.len() < 2 && pieces.first().map_or(true, |&piece| piece == code) {
            result.extend(implicit_weights(code));
            return;
        }

        for piece in pieces {
            let codepoint = CodepointWithData {
                data: self.index.get(&piece).copied().unwrap_or_default(),
                code: piece,
            };

            self.push_single(codepoint, result);
        }
    }

    #[inline(always)]
    fn push_node_weights(&self, node: TrieNode, result: &mut Elements)
    {
        result.extend(
            node.weights(&self.tries)
                .iter()
                .map(|&value| CollationElement::from_u32(value)),
        );
    }

    /// элементы сопоставления строки (без нормализации и числового сравнения)
    pub fn elements_of(&self, text: &str) -> Elements
    {
        let codes: SmallVec<[u32; 32]> = text.chars().map(|c| c as u32).collect();
        let mut result = Elements::new();

        self.push_elements(&codes, false, &mut result);

        result
    }
}

impl Debug for Tailoring
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.debug_struct("Tailoring")
            .field("entries", &self.entries.len())
            .field("contractions", &self.tails.len())
            .field("variable_top", &format_args!("{:04X}", self.variable_top))
            .field("rules", &self.rules)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::collation_element::{TERTIARY_COMMON, TERTIARY_UPPER};

    #[test]
    fn root_letters()
    {
        let root = Tailoring::root();

        let a = root.elements_of("a");
        let upper = root.elements_of("A");
        let b = root.elements_of("b");

        assert_eq!(a.len(), 1);
        assert_eq!(a[0].primary(), upper[0].primary());
        assert_eq!(a[0].tertiary(), TERTIARY_COMMON);
        assert_eq!(upper[0].tertiary(), TERTIARY_UPPER);
        assert!(a[0] < b[0]);
    }

    #[test]
    fn precomposed_and_decomposed()
    {
        let root = Tailoring::root();

        assert_eq!(root.elements_of("ä"), root.elements_of("a\u{308}"));
        assert_eq!(root.elements_of("ä").len(), 2);
        assert!(root.elements_of("\u{308}")[0].is_primary_ignorable());
    }

    #[test]
    fn computed_weights()
    {
        let root = Tailoring::root();

        // хангыль: 2 - 3 чамо
        assert_eq!(root.elements_of("가").len(), 2);
        assert_eq!(root.elements_of("각").len(), 3);
        assert_eq!(root.elements_of("가"), root.elements_of("\u{1100}\u{1161}"));

        // неявные веса
        assert_eq!(root.elements_of("\u{4E00}").len(), 2);
        assert!(root.elements_of("\u{4E00}") < root.elements_of("\u{4E01}"));

        // игнорируемые
        assert!(root.elements_of("\u{200B}").is_empty());
    }

    #[test]
    fn expansions()
    {
        let root = Tailoring::root();

        let sharp_s = root.elements_of("ß");
        let ss = root.elements_of("ss");

        assert_eq!(sharp_s.len(), 2);
        assert_eq!(sharp_s[0].primary(), ss[0].primary());
        assert!(root.max_expansion(sharp_s[0].value()) >= 2);
        assert!(root.max_expansion(root.elements_of("S")[0].value()) >= 2);
        assert_eq!(root.max_expansion(root.elements_of("q")[0].value()), 1);
        assert_eq!(root.max_expansion(root.elements_of("\u{1100}")[0].value()), 3);
    }

    #[test]
    fn numeric_elements()
    {
        let root = Tailoring::root();
        let codes: Vec<u32> = "a123b".chars().map(|c| c as u32).collect();

        let mut numeric = Elements::new();
        root.push_elements(&codes, true, &mut numeric);

        let mut plain = Elements::new();
        root.push_elements(&codes, false, &mut plain);

        // a, цифра 0, количество, 2 пары, b
        assert_eq!(numeric.len(), 6);
        assert_eq!(plain.len(), 5);
    }
}
