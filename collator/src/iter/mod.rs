use crate::codepoint::Chunker;
use crate::collation_element::CollationElement;
use crate::error::Result;
use crate::Collator;

pub use cursor::{CursorState, Direction, ElementCursor};

mod cursor;

/// итератор по элементам сопоставления текста (в обе стороны)
///
/// заимствует коллатор: таблица и атрибуты не меняются, пока итератор существует
#[derive(Debug, Clone)]
pub struct CollationElements<'c>
{
    collator: &'c Collator,
    cursor: ElementCursor,
}

impl<'c> CollationElements<'c>
{
    pub fn new(collator: &'c Collator, text: &str) -> Self
    {
        Self {
            collator,
            cursor: ElementCursor::new(text),
        }
    }

    #[inline(always)]
    fn chunker(&self) -> Chunker<'c>
    {
        Chunker::new(self.collator.tailoring(), self.collator.options())
    }

    /// предыдущий элемент
    pub fn previous(&mut self) -> Option<CollationElement>
    {
        let chunker = self.chunker();
        self.cursor.previous(&chunker)
    }

    /// смещение в тексте (в байтах)
    pub fn offset(&self) -> usize
    {
        self.cursor.offset()
    }

    pub fn set_offset(&mut self, offset: usize) -> Result<()>
    {
        let chunker = self.chunker();
        self.cursor.set_offset(&chunker, offset)
    }

    pub fn reset(&mut self)
    {
        self.cursor.reset();
    }

    pub fn set_text(&mut self, text: &str)
    {
        self.cursor.set_text(text);
    }

    pub fn text(&self) -> &str
    {
        self.cursor.text()
    }

    pub fn state(&self) -> CursorState
    {
        self.cursor.state()
    }

    /// максимальная длина расширения, в которое может входить элемент
    pub fn max_expansion(&self, element: CollationElement) -> usize
    {
        self.collator.max_expansion(element)
    }
}

impl<'c> Iterator for CollationElements<'c>
{
    type Item = CollationElement;

    #[inline]
    fn next(&mut self) -> Option<Self::Item>
    {
        let chunker = self.chunker();
        self.cursor.next(&chunker)
    }
}
