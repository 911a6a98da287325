use core::ops::Range;

use crate::codepoint::Chunker;
use crate::collation_element::{CollationElement, Elements};
use crate::error::{CollatorError, Result};

/// сколько фрагментов вычисляется за один шаг назад
const LOOKAHEAD_CHUNKS: usize = 8;

/// направление последнего перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction
{
    Forward,
    Backward,
}

/// состояние курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState
{
    Positioned(usize),
    ExhaustedForward,
    ExhaustedBackward,
}

/// позиция итератора по элементам сопоставления текста
///
/// текущий фрагмент и индекс в его элементах - зафиксированная позиция: элементы фрагмента
/// до индекса пройдены при движении вперёд, после него - при движении назад
#[derive(Debug, Clone)]
pub struct ElementCursor
{
    text: String,
    /// границы текущего фрагмента (в байтах)
    chunk: Range<usize>,
    /// элементы текущего фрагмента
    elements: Elements,
    index: usize,
    direction: Direction,
    /// фрагменты перед текущим, вычисленные при движении назад (ближайший - последний)
    lookahead: Vec<(Range<usize>, Elements)>,
    exhausted: Option<Direction>,
}

impl ElementCursor
{
    pub fn new(text: &str) -> Self
    {
        Self {
            text: text.to_owned(),
            chunk: 0 .. 0,
            elements: Elements::new(),
            index: 0,
            direction: Direction::Forward,
            lookahead: vec![],
            exhausted: None,
        }
    }

    pub fn text(&self) -> &str
    {
        &self.text
    }

    pub fn state(&self) -> CursorState
    {
        match self.exhausted {
            Some(Direction::Forward) => CursorState::ExhaustedForward,
            Some(Direction::Backward) => CursorState::ExhaustedBackward,
            None => CursorState::Positioned(self.offset()),
        }
    }

    /// следующий элемент
    pub fn next(&mut self, chunker: &Chunker) -> Option<CollationElement>
    {
        if self.direction == Direction::Backward {
            self.lookahead.clear();
            self.direction = Direction::Forward;
        }

        loop {
            if let Some(&ce) = self.elements.get(self.index) {
                self.index += 1;
                self.exhausted = None;

                return Some(ce);
            }

            let start = self.chunk.end;

            if start >= self.text.len() {
                self.exhausted = Some(Direction::Forward);
                return None;
            }

            let end = chunker.next_boundary(&self.text, start);

            self.load(chunker, start .. end);
            self.index = 0;
        }
    }

    /// предыдущий элемент
    pub fn previous(&mut self, chunker: &Chunker) -> Option<CollationElement>
    {
        self.direction = Direction::Backward;

        loop {
            if self.index > 0 {
                self.index -= 1;
                self.exhausted = None;

                return Some(self.elements[self.index]);
            }

            if self.chunk.start == 0 {
                self.exhausted = Some(Direction::Backward);
                return None;
            }

            let (chunk, elements) = match self.lookahead.pop() {
                Some(entry) if entry.0.end == self.chunk.start => entry,
                _ => {
                    self.fill_lookahead(chunker);

                    match self.lookahead.pop() {
                        Some(entry) => entry,
                        None => {
                            self.exhausted = Some(Direction::Backward);
                            return None;
                        }
                    }
                }
            };

            self.chunk = chunk;
            self.elements = elements;
            self.index = self.elements.len();
        }
    }

    /// вычислить несколько фрагментов перед текущим
    fn fill_lookahead(&mut self, chunker: &Chunker)
    {
        self.lookahead.clear();

        let mut end = self.chunk.start;
        let mut chunks = vec![];

        while end > 0 && chunks.len() < LOOKAHEAD_CHUNKS {
            let start = chunker.previous_boundary(&self.text, end);
            chunks.push(start .. end);
            end = start;
        }

        // ближайший к текущему фрагмент извлекается первым
        for chunk in chunks.into_iter().rev() {
            let mut elements = Elements::new();
            chunker.push_elements(&self.text[chunk.clone()], &mut elements);

            self.lookahead.push((chunk, elements));
        }
    }

    fn load(&mut self, chunker: &Chunker, chunk: Range<usize>)
    {
        self.elements.clear();
        chunker.push_elements(&self.text[chunk.clone()], &mut self.elements);
        self.chunk = chunk;
    }

    /// смещение в тексте (в байтах)
    pub fn offset(&self) -> usize
    {
        let len = self.elements.len();

        match (self.index, self.direction) {
            (0, Direction::Backward) => self.chunk.start,
            (i, Direction::Forward) if i == len => self.chunk.end,
            (0, _) => self.chunk.start,
            (i, _) if i == len => self.chunk.end,
            (_, Direction::Forward) => self.chunk.end,
            (_, Direction::Backward) => self.chunk.start,
        }
    }

    /// перейти к смещению; смещение внутри фрагмента сдвигается к его началу
    pub fn set_offset(&mut self, chunker: &Chunker, offset: usize) -> Result<()>
    {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(CollatorError::InvalidOffset {
                offset: offset as i64,
                length: self.text.len(),
            });
        }

        if offset == self.offset() {
            return Ok(());
        }

        let position = chunker.boundary_at_or_before(&self.text, offset);
        self.position_at(position);

        Ok(())
    }

    /// в начало текста
    pub fn reset(&mut self)
    {
        self.position_at(0);
    }

    /// заменить текст, позиция - начало
    pub fn set_text(&mut self, text: &str)
    {
        self.text.clear();
        self.text.push_str(text);
        self.reset();
    }

    fn position_at(&mut self, position: usize)
    {
        self.chunk = position .. position;
        self.elements.clear();
        self.index = 0;
        self.direction = Direction::Forward;
        self.lookahead.clear();
        self.exhausted = None;
    }
}
