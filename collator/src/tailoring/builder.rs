use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::Bound::{Excluded, Included};

use log::trace;
use unicode_normalization::char::decompose_canonical;
use unicode_normalization::UnicodeNormalization;

use super::trie::TrieBuildNode;
use super::{expansion_key, Tailoring};
use crate::codepoint::{contraction_value, expansion_value, single_weights_value, MARKER_IGNORABLE};
use crate::collation_element::{
    CollationElement, Elements, SECONDARY_COMMON, TERTIARY_COMMON, TERTIARY_UPPER,
};
use crate::data::CLOSURE_RANGES;
use crate::error::RuleErrorKind;
use crate::hangul::{decompose_syllable, LEADING_JAMO, TRAILING_JAMO, VOWEL_JAMO};
use crate::implicit::{implicit_weights, is_continuation, is_implicit_lead, TRAIL_SPACING};
use crate::options::{CollatorOptions, MaxVariable};
use crate::weights::{
    level_limit, level_minimum, primary_ordinal, shift_delta, weight_between, weight_from_space,
    weight_to_space, PRIMARY, QUATERNARY, SECONDARY, TERTIARY,
};

/// ключ записи в таблице использования весов уровня: веса этого уровня и всех предыдущих
const KEY_MASKS: [u32; 4] = [0xFFFF_0000, 0xFFFF_FF00, 0xFFFF_FFFC, 0xFFFF_FFFF];

/// контекст уровня: веса предыдущих уровней
const CONTEXT_MASKS: [u32; 4] = [0, 0xFFFF_0000, 0xFFFF_FF00, 0xFFFF_FFFC];

/// нижняя граница третичных весов с битами прописной буквы
const TERTIARY_UPPER_FLOOR: i64 = 0x1F;

/// изменяемая таблица весов: из неё строится (и в неё разворачивается) Tailoring
#[derive(Clone, Default)]
pub struct TailoringBuilder
{
    /// последовательности кодпоинтов и их элементы сопоставления
    entries: BTreeMap<String, Elements>,
    /// количество использований весов, по уровням
    usage: [BTreeMap<u32, usize>; 4],
    /// наибольшая длина последовательности в записях (в кодпоинтах)
    max_key_chars: usize,
    /// последний первичный вес группы переменных символов
    variable_top: u16,
    /// последние первичные веса групп: пробелы, пунктуация, символы, валюты
    group_tops: [u16; 4],
    /// значения атрибутов, заданные правилами
    options: CollatorOptions,
    /// кодпоинты, веса которых были изменены правилами
    tailored: BTreeSet<char>,
    /// последовательности, заданные правилами явно
    explicit: BTreeSet<String>,
}

impl TailoringBuilder
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// развернуть таблицу для дальнейшего изменения
    pub fn from_tailoring(tailoring: &Tailoring) -> Self
    {
        let mut builder = Self {
            entries: tailoring.entries.clone(),
            variable_top: tailoring.variable_top,
            group_tops: tailoring.group_tops,
            options: tailoring.options,
            ..Default::default()
        };

        builder.rebuild_usage();

        builder
    }

    pub fn options(&self) -> &CollatorOptions
    {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut CollatorOptions
    {
        &mut self.options
    }

    pub fn variable_top(&self) -> u16
    {
        self.variable_top
    }

    /// граница переменных весов - последний вес группы
    pub fn set_max_variable(&mut self, group: MaxVariable)
    {
        self.variable_top = self.group_tops[group as usize];
    }

    /// последний первичный вес группы символов (при построении корневой таблицы)
    pub fn set_group_top(&mut self, group: MaxVariable, primary: u16)
    {
        self.group_tops[group as usize] = primary;

        if group == MaxVariable::Punctuation {
            self.variable_top = primary;
        }
    }

    pub fn entry(&self, key: &str) -> Option<&Elements>
    {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool
    {
        self.entries.contains_key(key)
    }

    /// записать элементы последовательности
    pub fn insert(&mut self, key: String, elements: Elements)
    {
        self.count_usage(&elements, true);
        self.max_key_chars = self.max_key_chars.max(key.chars().count());

        if let Some(previous) = self.entries.insert(key, elements) {
            self.count_usage(&previous, false);
        }
    }

    /// удалить запись о последовательности
    pub fn remove(&mut self, key: &str)
    {
        if let Some(previous) = self.entries.remove(key) {
            self.count_usage(&previous, false);
        }
    }

    /// канонически эквивалентные формы последовательности
    fn forms(text: &str) -> BTreeSet<String>
    {
        [text.to_owned(), text.nfd().collect(), text.nfc().collect()]
            .into_iter()
            .collect()
    }

    /// освободить веса последовательности перед её переносом в другое место
    pub fn release(&mut self, target: &str)
    {
        for form in Self::forms(target) {
            self.remove(&form);
        }
    }

    /// записать последовательность, заданную правилами (во всех канонически эквивалентных формах)
    pub fn tailor(&mut self, target: &str, elements: Elements)
    {
        for form in Self::forms(target) {
            self.tailored.extend(form.chars());
            self.explicit.insert(form.clone());
            self.insert(form, elements.clone());
        }
    }

    /// элементы сопоставления текста по текущему состоянию таблицы (наиболее длинные совпадения)
    pub fn lookup(&self, text: &str) -> Elements
    {
        let chars: Vec<char> = text.chars().collect();
        let mut result = Elements::new();
        let mut start = 0;

        while start < chars.len() {
            let longest = (chars.len() - start).min(self.max_key_chars);

            let matched = (1 ..= longest).rev().find_map(|len| {
                let key: String = chars[start .. start + len].iter().collect();

                self.entries.get(&key).map(|elements| (elements, len))
            });

            match matched {
                Some((elements, len)) => {
                    result.extend_from_slice(elements);
                    start += len;
                }
                None => {
                    self.push_computed(chars[start], &mut result);
                    start += 1;
                }
            }
        }

        result
    }

    /// веса кодпоинта без записи в таблице
    fn push_computed(&self, c: char, result: &mut Elements)
    {
        if let Some((jamo, count)) = decompose_syllable(c as u32) {
            let text: String = jamo[.. count].iter().filter_map(|&j| char::from_u32(j)).collect();
            result.extend(self.lookup(&text));

            return;
        }

        let mut decomposition = String::new();
        decompose_canonical(c, |piece| decomposition.push(piece));

        if decomposition.chars().ne([c]) {
            result.extend(self.lookup(&decomposition));

            return;
        }

        result.extend(implicit_weights(c as u32));
    }

    /// первичные веса, используемые в таблице, кроме игнорируемых
    fn used_primaries(&self) -> impl DoubleEndedIterator<Item = u16> + '_
    {
        self.usage[0]
            .keys()
            .map(|&key| CollationElement::from_u32(key).primary())
            .filter(|&primary| primary != 0)
    }

    /// элемент специальной позиции сброса: [first variable], [last regular], ...
    pub fn special_anchor(&self, first: bool, variable: bool) -> Option<CollationElement>
    {
        let variable_top = self.variable_top;

        let mut primaries = self
            .used_primaries()
            .filter(|&primary| !is_continuation(primary) && !is_implicit_lead(primary))
            .filter(|&primary| (primary <= variable_top) == variable);

        let primary = match first {
            true => primaries.next(),
            false => primaries.next_back(),
        }?;

        Some(CollationElement::with_common(primary))
    }

    /// выделить вес нового элемента на уровне level сразу после последнего элемента цепочки
    /// (или перед ним, если before); цепочка корректируется при сдвиге весов
    pub fn allocate(
        &mut self,
        chain: &mut Elements,
        level: u8,
        before: bool,
        uppercase: bool,
    ) -> Result<CollationElement, RuleErrorKind>
    {
        for _ in 0 .. 2 {
            let anchor = match chain.last() {
                Some(&anchor) => anchor,
                None => return Err(RuleErrorKind::ResetResolution("empty reset point".into())),
            };

            let (lower, upper, can_shift) = self.gap(level, anchor, before)?;

            // строчные не получают вес с битами регистра
            let (upper, can_shift) = match level == TERTIARY && !uppercase && !before {
                true => {
                    let end = case_band_end(lower);

                    (upper.min(end), can_shift && upper < end)
                }
                false => (upper, can_shift),
            };

            if let Some(weight) = choose_weight(level, lower, upper, before, uppercase) {
                let ce = new_element(anchor, level, weight_from_space(level, weight), uppercase);

                trace!("level {} weight {:?} after {:?}", level, ce, anchor);

                return Ok(ce);
            }

            if !can_shift {
                break;
            }

            self.shift(level, anchor, upper, chain)?;
        }

        Err(RuleErrorKind::WeightSpaceExhausted(level))
    }

    /// промежуток весов уровня для вставки: нижняя и верхняя (не включаемые) границы,
    /// можно ли сдвигать последующие веса
    fn gap(
        &self,
        level: u8,
        anchor: CollationElement,
        before: bool,
    ) -> Result<(i64, i64, bool), RuleErrorKind>
    {
        let weight = weight_to_space(level, anchor.level_weight(level));
        let primary = anchor.primary();

        if level == PRIMARY && is_implicit_lead(primary) {
            return Err(RuleErrorKind::ResetResolution(format!(
                "cannot insert next to implicit lead weight {:04X}",
                primary
            )));
        }

        // вторые элементы вычисляемых весов: вставляем между соседними кодпоинтами, без сдвига
        let trail = level == PRIMARY && is_continuation(primary);

        match before {
            false => {
                let next = self.next_used(level, anchor);

                let upper = match trail {
                    true => next.unwrap_or(i64::MAX).min(weight + TRAIL_SPACING),
                    false => next.unwrap_or(level_limit(level)).min(level_limit(level)),
                };

                Ok((weight, upper, !trail))
            }
            true => {
                let mut lower = self.previous_used(level, anchor).unwrap_or(level_minimum(level));

                if trail {
                    lower = lower.max(weight - TRAIL_SPACING);
                }

                Ok((lower, weight, !trail))
            }
        }
    }

    /// следующий используемый вес уровня в том же контексте
    fn next_used(&self, level: u8, anchor: CollationElement) -> Option<i64>
    {
        let i = (level - 1) as usize;
        let key = anchor.value() & KEY_MASKS[i];
        let context = anchor.value() & CONTEXT_MASKS[i];

        self.usage[i]
            .range((Excluded(key), Included(context | !CONTEXT_MASKS[i])))
            .next()
            .map(|(&used, _)| used_weight(level, used))
    }

    /// предыдущий используемый вес уровня в том же контексте
    fn previous_used(&self, level: u8, anchor: CollationElement) -> Option<i64>
    {
        let i = (level - 1) as usize;
        let key = anchor.value() & KEY_MASKS[i];
        let context = anchor.value() & CONTEXT_MASKS[i];

        self.usage[i]
            .range((Included(context), Excluded(key)))
            .next_back()
            .map(|(&used, _)| used_weight(level, used))
    }

    /// сдвинуть веса уровня, начиная с from, в контексте элемента anchor
    fn shift(
        &mut self,
        level: u8,
        anchor: CollationElement,
        from: i64,
        chain: &mut Elements,
    ) -> Result<(), RuleErrorKind>
    {
        let delta = shift_delta(level);
        let limit = match level {
            TERTIARY => case_band_end(from),
            _ => level_limit(level),
        };
        let mask = CONTEXT_MASKS[(level - 1) as usize];
        let context = anchor.value() & mask;

        let shifted = |ce: CollationElement| -> Option<i64> {
            if ce.is_ignorable() || (ce.value() & mask) != context {
                return None;
            }

            let weight = weight_to_space(level, ce.level_weight(level));

            match weight >= from && weight < limit {
                true => Some(weight + delta),
                false => None,
            }
        };

        let overflow = self
            .entries
            .values()
            .flatten()
            .chain(chain.iter())
            .filter_map(|&ce| shifted(ce))
            .any(|weight| weight >= limit);

        if overflow {
            return Err(RuleErrorKind::WeightSpaceExhausted(level));
        }

        let apply = |ce: &mut CollationElement| {
            if let Some(weight) = shifted(*ce) {
                *ce = ce.with_level_weight(level, weight_from_space(level, weight));
            }
        };

        self.entries.values_mut().flatten().for_each(apply);
        chain.iter_mut().for_each(apply);

        if level == PRIMARY {
            let shift_top = |top: &mut u16| {
                let weight = primary_ordinal(*top);

                if weight >= from && weight < limit {
                    *top = weight_from_space(PRIMARY, weight + delta) as u16;
                }
            };

            shift_top(&mut self.variable_top);
            self.group_tops.iter_mut().for_each(shift_top);
        }

        trace!("level {} weights from {} shifted by {}", level, from, delta);

        self.rebuild_usage();

        Ok(())
    }

    /// пересчитать веса составных символов, декомпозиция которых содержит изменённые кодпоинты
    /// (или всех, у которых нет собственной записи, если all)
    pub fn close_over_canonical(&mut self, all: bool)
    {
        if !all && self.tailored.is_empty() {
            return;
        }

        for code in CLOSURE_RANGES.iter().cloned().flatten() {
            let c = match char::from_u32(code) {
                Some(c) => c,
                None => continue,
            };

            let key = c.to_string();
            let decomposition: String = key.nfd().collect();

            if decomposition == key || self.explicit.contains(&key) {
                continue;
            }

            let affected = match all {
                true => !self.contains(&key),
                false => decomposition.chars().any(|piece| self.tailored.contains(&piece)),
            };

            if affected {
                let elements = self.lookup(&decomposition);
                self.insert(key, elements);
            }
        }
    }

    /// учесть (или убрать) использование весов элементов
    fn count_usage(&mut self, elements: &Elements, add: bool)
    {
        for ce in elements.iter().filter(|ce| !ce.is_ignorable()) {
            for (usage, mask) in self.usage.iter_mut().zip(KEY_MASKS) {
                let key = ce.value() & mask;

                match add {
                    true => *usage.entry(key).or_default() += 1,
                    false => {
                        if let Some(count) = usage.get_mut(&key) {
                            *count -= 1;

                            if *count == 0 {
                                usage.remove(&key);
                            }
                        }
                    }
                }
            }
        }
    }

    fn rebuild_usage(&mut self)
    {
        self.usage = Default::default();
        self.max_key_chars = 0;

        let entries = core::mem::take(&mut self.entries);

        for (key, elements) in entries.iter() {
            self.count_usage(elements, true);
            self.max_key_chars = self.max_key_chars.max(key.chars().count());
        }

        self.entries = entries;
    }

    /// собрать неизменяемую таблицу
    pub fn bake(self, rules: String) -> Tailoring
    {
        let mut index = HashMap::new();
        let mut expansions = vec![];
        let mut tries = vec![];
        let mut tails = HashSet::new();
        let mut max_expansions: HashMap<u32, u8> = HashMap::new();

        // записи, сгруппированные по первому кодпоинту
        let mut groups: BTreeMap<u32, Vec<(Vec<u32>, &Elements)>> = BTreeMap::new();

        for (key, elements) in self.entries.iter() {
            let codes: Vec<u32> = key.chars().map(|c| c as u32).collect();

            if let Some(&first) = codes.first() {
                groups.entry(first).or_default().push((codes, elements));
            }

            if elements.len() > 1 {
                for ce in elements.iter() {
                    let max = max_expansions.entry(expansion_key(*ce)).or_default();
                    *max = (*max).max(elements.len() as u8);
                }
            }
        }

        for (code, group) in groups {
            let is_contraction = group.iter().any(|(codes, _)| codes.len() > 1);

            if !is_contraction {
                let elements = group[0].1;

                let value = match elements.len() {
                    0 => MARKER_IGNORABLE as u64,
                    1 => single_weights_value(elements[0]),
                    len => {
                        let pos = expansions.len();
                        expansions.extend(elements.iter().map(|ce| ce.value()));

                        expansion_value(pos, len)
                    }
                };

                index.insert(code, value);
                continue;
            }

            let mut root = TrieBuildNode::default();

            for (codes, elements) in group {
                tails.extend(codes[1 ..].iter().copied());
                root.insert(&codes[1 ..], elements);
            }

            index.insert(code, contraction_value(tries.len()));
            root.write(code, true, &mut tries);
        }

        // слог хангыль раскладывается на 2-3 чамо
        for jamo in [LEADING_JAMO, VOWEL_JAMO, TRAILING_JAMO].into_iter().flatten() {
            let elements = self.lookup_single(jamo);

            for ce in elements.iter() {
                let max = max_expansions.entry(expansion_key(*ce)).or_default();
                *max = (*max).max(3);
            }
        }

        let digit_primary = self
            .entries
            .get("0")
            .and_then(|elements| elements.first())
            .map(|ce| ce.primary())
            .unwrap_or_default();

        Tailoring {
            index,
            expansions,
            tries,
            tails,
            max_expansions,
            variable_top: self.variable_top,
            group_tops: self.group_tops,
            digit_primary,
            rules,
            options: self.options,
            entries: self.entries,
        }
    }

    fn lookup_single(&self, code: u32) -> Elements
    {
        char::from_u32(code)
            .and_then(|c| self.entries.get(&c.to_string()).cloned())
            .unwrap_or_default()
    }
}

/// вес уровня из ключа таблицы использования
#[inline]
fn used_weight(level: u8, key: u32) -> i64
{
    weight_to_space(level, CollationElement::from_u32(key).level_weight(level))
}

/// выбрать вес в промежутке; прописным буквам по возможности достаётся вес с битами регистра
/// верхняя (не включаемая) граница третичных весов с теми же битами регистра, что у weight
#[inline]
fn case_band_end(weight: i64) -> i64
{
    match weight {
        w if w < 0x10 => 0x10,
        w if w <= TERTIARY_UPPER_FLOOR => TERTIARY_UPPER_FLOOR + 1,
        _ => level_limit(TERTIARY),
    }
}

fn choose_weight(level: u8, lower: i64, upper: i64, before: bool, uppercase: bool) -> Option<i64>
{
    if level == TERTIARY && uppercase {
        let common = TERTIARY_UPPER as i64;

        if lower < common && common < upper {
            return Some(common);
        }

        let floor = lower.max(TERTIARY_UPPER_FLOOR);

        if let Some(weight) = weight_between(level, floor, upper, !before) {
            return Some(weight);
        }
    }

    weight_between(level, lower, upper, !before)
}

/// новый элемент: вес уровня заменён, веса следующих уровней - общие
fn new_element(
    anchor: CollationElement,
    level: u8,
    weight: u32,
    uppercase: bool,
) -> CollationElement
{
    let mut ce = anchor.with_level_weight(level, weight);

    if level < SECONDARY {
        ce = ce.with_level_weight(SECONDARY, SECONDARY_COMMON as u32);
    }

    if level < TERTIARY {
        let tertiary = match uppercase {
            true => TERTIARY_UPPER,
            false => TERTIARY_COMMON,
        };

        ce = ce.with_level_weight(TERTIARY, tertiary as u32);
    }

    if level < QUATERNARY {
        ce = ce.with_level_weight(QUATERNARY, 0);
    }

    ce
}
