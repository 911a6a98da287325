use std::collections::BTreeMap;

use crate::collation_element::Elements;

// запись узла бора: ___c cccc  cccc cccc  cccc cccc  llll lmsh
//  h - есть потомки, s - последний среди соседних узлов, m - у узла есть веса
//  l - количество весов, следующих за записью, c - кодпоинт
// потомки узла записаны сразу после его весов

const FLAG_HAS_CHILDREN: u32 = 0b001;
const FLAG_LAST_SIBLING: u32 = 0b010;
const FLAG_HAS_MAPPING: u32 = 0b100;

/// узел бора весов
#[derive(Debug, Clone, Copy)]
pub struct TrieNode
{
    value: u32,
    pos: usize,
}

impl TrieNode
{
    /// из массива, где хранится бор
    #[inline(always)]
    pub fn from_slice(source: &[u32], pos: usize) -> Option<Self>
    {
        source.get(pos).map(|&value| Self { value, pos })
    }

    #[inline(always)]
    pub fn code(&self) -> u32
    {
        (self.value >> 8) & 0x1F_FFFF
    }

    #[inline(always)]
    pub fn pos(&self) -> usize
    {
        self.pos
    }

    #[inline(always)]
    pub fn has_children(&self) -> bool
    {
        (self.value & FLAG_HAS_CHILDREN) != 0
    }

    /// последний узел среди потомков родителя
    #[inline(always)]
    pub fn is_last(&self) -> bool
    {
        (self.value & FLAG_LAST_SIBLING) != 0
    }

    /// последовательность, заканчивающаяся этим узлом, есть в таблице
    #[inline(always)]
    pub fn has_mapping(&self) -> bool
    {
        (self.value & FLAG_HAS_MAPPING) != 0
    }

    #[inline(always)]
    pub fn weights_len(&self) -> usize
    {
        ((self.value >> 3) & 0x1F) as usize
    }

    /// позиция следующей записи (первого потомка, если он есть)
    #[inline(always)]
    pub fn next_pos(&self) -> usize
    {
        self.pos + 1 + self.weights_len()
    }

    /// веса узла
    #[inline(always)]
    pub fn weights<'a>(&self, source: &'a [u32]) -> &'a [u32]
    {
        source.get(self.pos + 1 .. self.next_pos()).unwrap_or_default()
    }
}

/// итератор по потомкам узла бора весов
pub struct TrieIter<'a>
{
    source: &'a [u32],
    pos: usize,
    is_first: bool,
}

impl<'a> Iterator for TrieIter<'a>
{
    type Item = TrieNode;

    /// следующий потомок узла
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item>
    {
        if self.is_first {
            self.is_first = false;

            return self.current_node();
        }

        // текущий элемент - последний?
        if self.current_node()?.is_last() {
            return None;
        }

        // промотаем до следующего элемента
        self.skip_to_next()?;

        self.current_node()
    }
}

impl<'a> TrieIter<'a>
{
    /// итератор по потомкам узла
    #[inline(always)]
    pub fn children(source: &'a [u32], node: TrieNode) -> Self
    {
        Self {
            source,
            pos: node.next_pos(),
            is_first: node.has_children(),
        }
    }

    /// промотка до следующего узла того же уровня
    #[inline(always)]
    fn skip_to_next(&mut self) -> Option<()>
    {
        let mut node = self.current_node()?;
        let mut level = 0;

        loop {
            // следующий элемент располагается на следующем уровне
            if node.has_children() {
                level += 1;
            }

            // пропускаем запись и веса
            self.pos = node.next_pos();
            node = self.current_node()?;

            // уровень = 0, т.е. полученный элемент - искомый
            if level == 0 {
                return Some(());
            }

            // прочитанный элемент - последний на своем уровне
            if node.is_last() {
                level -= 1;
            }
        }
    }

    #[inline(always)]
    fn current_node(&self) -> Option<TrieNode>
    {
        TrieNode::from_slice(self.source, self.pos)
    }
}

/// самая длинная последовательность из бора, начинающаяся с codes[0]: узел и длина
pub fn longest_match(source: &[u32], root: usize, codes: &[u32]) -> Option<(TrieNode, usize)>
{
    let mut node = TrieNode::from_slice(source, root)?;
    let mut best = node.has_mapping().then_some((node, 1));
    let mut consumed = 1;

    'outer: while node.has_children() && consumed < codes.len() {
        let code = codes[consumed];

        for child in TrieIter::children(source, node) {
            // потомки отсортированы по кодпоинтам
            if child.code() > code {
                break;
            }

            if child.code() == code {
                node = child;
                consumed += 1;

                if node.has_mapping() {
                    best = Some((node, consumed));
                }

                continue 'outer;
            }
        }

        break;
    }

    best
}

/// узел бора при построении таблицы
#[derive(Debug, Default)]
pub struct TrieBuildNode
{
    pub mapping: Option<Elements>,
    pub children: BTreeMap<u32, TrieBuildNode>,
}

impl TrieBuildNode
{
    /// добавить последовательность (без первого кодпоинта - он хранится в корне)
    pub fn insert(&mut self, tail: &[u32], elements: &Elements)
    {
        match tail.split_first() {
            Some((&code, rest)) => self.children.entry(code).or_default().insert(rest, elements),
            None => self.mapping = Some(elements.clone()),
        }
    }

    /// записать узел и его потомков (в прямом порядке)
    pub fn write(&self, code: u32, is_last: bool, result: &mut Vec<u32>)
    {
        let weights = self.mapping.as_deref().unwrap_or_default();

        let mut header = (code << 8) | ((weights.len() as u32 & 0x1F) << 3);

        if self.mapping.is_some() {
            header |= FLAG_HAS_MAPPING;
        }
        if is_last {
            header |= FLAG_LAST_SIBLING;
        }
        if !self.children.is_empty() {
            header |= FLAG_HAS_CHILDREN;
        }

        result.push(header);
        result.extend(weights.iter().map(|ce| ce.value()));

        let count = self.children.len();

        for (i, (&child_code, child)) in self.children.iter().enumerate() {
            child.write(child_code, i + 1 == count, result);
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::collation_element::CollationElement;

    fn elements(primary: u16) -> Elements
    {
        Elements::from_slice(&[CollationElement::with_common(primary)])
    }

    /// c -> 1, ch -> 2, chh -> 3, cz -> 4, cx... (нет)
    fn sample() -> Vec<u32>
    {
        let mut root = TrieBuildNode::default();

        root.insert(&[], &elements(0x0301));
        root.insert(&['h' as u32], &elements(0x0302));
        root.insert(&['h' as u32, 'h' as u32], &elements(0x0303));
        root.insert(&['z' as u32], &elements(0x0304));
        root.insert(&['x' as u32, 'y' as u32], &elements(0x0305));

        let mut result = vec![];
        root.write('c' as u32, true, &mut result);

        result
    }

    fn codes(text: &str) -> Vec<u32>
    {
        text.chars().map(|c| c as u32).collect()
    }

    #[test]
    fn children()
    {
        let trie = sample();
        let root = TrieNode::from_slice(&trie, 0).unwrap();

        let children: Vec<u32> = TrieIter::children(&trie, root).map(|node| node.code()).collect();

        assert_eq!(children, codes("hxz"));
    }

    #[test]
    fn longest()
    {
        let trie = sample();

        let check = |text: &str, primary: u16, len: usize| {
            let (node, consumed) = longest_match(&trie, 0, &codes(text)).unwrap();

            assert_eq!(CollationElement::from_u32(node.weights(&trie)[0]).primary(), primary);
            assert_eq!(consumed, len, "{}", text);
        };

        check("c", 0x0301, 1);
        check("ca", 0x0301, 1);
        check("ch", 0x0302, 2);
        check("chh", 0x0303, 3);
        check("chhh", 0x0303, 3);
        check("cz", 0x0304, 2);
        // cx не имеет весов - откатываемся к c
        check("cxz", 0x0301, 1);
        check("cxy", 0x0305, 3);
    }

    #[test]
    fn root_without_mapping()
    {
        let mut root = TrieBuildNode::default();
        root.insert(&['h' as u32], &elements(0x0302));

        let mut trie = vec![];
        root.write('c' as u32, true, &mut trie);

        assert!(longest_match(&trie, 0, &codes("ca")).is_none());
        assert_eq!(longest_match(&trie, 0, &codes("ch")).unwrap().1, 2);
    }
}
