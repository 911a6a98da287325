use core::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use super::{Handle, HandleTable};
use crate::codepoint::Chunker;
use crate::collation_element::CollationElement;
use crate::error::{CollatorError, Result};
use crate::iter::ElementCursor;
use crate::locale::{BuiltinTailorings, TailoringProvider};
use crate::options::{Attribute, AttributeValue};
use crate::Collator;

/// итератор, открытый через дескриптор: снимок коллатора и позиция
struct OpenElements
{
    collator: Collator,
    cursor: ElementCursor,
}

impl OpenElements
{
    fn next(&mut self) -> Option<CollationElement>
    {
        let chunker = Chunker::new(self.collator.tailoring(), self.collator.options());
        self.cursor.next(&chunker)
    }

    fn previous(&mut self) -> Option<CollationElement>
    {
        let chunker = Chunker::new(self.collator.tailoring(), self.collator.options());
        self.cursor.previous(&chunker)
    }
}

/// элемент или NULL_ORDER (-1), если элементы закончились
#[inline]
fn order(element: Option<CollationElement>) -> i32
{
    element.map_or(CollationElement::NULL_ORDER, |ce| ce.value()) as i32
}

/// коллаторы и итераторы, доступные по дескрипторам
///
/// числовые атрибуты, их значения и результаты сравнения совпадают с ICU
pub struct CollationService
{
    collators: HandleTable<Collator>,
    elements: HandleTable<OpenElements>,
    provider: Arc<dyn TailoringProvider>,
}

impl Default for CollationService
{
    fn default() -> Self
    {
        Self::with_provider(Arc::new(BuiltinTailorings))
    }
}

impl CollationService
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_provider(provider: Arc<dyn TailoringProvider>) -> Self
    {
        Self {
            collators: HandleTable::new("collator"),
            elements: HandleTable::new("collation element iterator"),
            provider,
        }
    }

    /// коллатор для локали
    pub fn open_collator(&mut self, locale: Option<&str>) -> Result<Handle>
    {
        let locale = locale.ok_or(CollatorError::MissingText)?;
        let collator = Collator::open_with_provider(locale, self.provider.as_ref())?;

        let handle = self.collators.insert(collator);
        debug!("collator {:#x} opened for {:?}", handle, locale);

        Ok(handle)
    }

    /// коллатор по правилам
    pub fn open_collator_from_rules(
        &mut self,
        rules: Option<&str>,
        normalization: i32,
        strength: i32,
    ) -> Result<Handle>
    {
        let rules = rules.ok_or(CollatorError::MissingText)?;
        let normalization = AttributeValue::try_from(normalization).map_err(|_| {
            CollatorError::InvalidAttribute {
                attribute: Attribute::NormalizationMode as i32,
                value: normalization,
            }
        })?;
        let strength = AttributeValue::try_from(strength).map_err(|_| {
            CollatorError::InvalidAttribute {
                attribute: Attribute::Strength as i32,
                value: strength,
            }
        })?;

        let collator = Collator::from_rules(rules, normalization, strength)?;

        Ok(self.collators.insert(collator))
    }

    pub fn close_collator(&mut self, collator: Handle) -> Result<()>
    {
        self.collators.remove(collator).map(|_| ())
    }

    /// -1, 0, 1
    pub fn compare(&self, collator: Handle, a: Option<&str>, b: Option<&str>) -> Result<i32>
    {
        let collator = self.collators.get(collator)?;
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(CollatorError::MissingText),
        };

        Ok(match collator.compare(a, b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
    }

    pub fn get_attribute(&self, collator: Handle, attribute: i32) -> Result<i32>
    {
        let collator = self.collators.get(collator)?;
        let attribute = Attribute::try_from(attribute)?;

        Ok(collator.attribute(attribute) as i32)
    }

    pub fn set_attribute(&mut self, collator: Handle, attribute: i32, value: i32) -> Result<()>
    {
        let collator = self.collators.get_mut(collator)?;
        let invalid = CollatorError::InvalidAttribute { attribute, value };

        let kind = Attribute::try_from(attribute).map_err(|_| invalid.clone())?;
        let value = AttributeValue::try_from(value).map_err(|_| invalid)?;

        collator.set_attribute(kind, value)
    }

    /// независимая копия коллатора (таблица - общая)
    pub fn safe_clone(&mut self, collator: Handle) -> Result<Handle>
    {
        let clone = self.collators.get(collator)?.clone();

        Ok(self.collators.insert(clone))
    }

    pub fn get_rules(&self, collator: Handle) -> Result<String>
    {
        Ok(self.collators.get(collator)?.rules().to_owned())
    }

    pub fn get_sort_key(&self, collator: Handle, text: Option<&str>) -> Result<Vec<u8>>
    {
        let collator = self.collators.get(collator)?;
        let text = text.ok_or(CollatorError::MissingText)?;

        Ok(collator.sort_key(text).into_vec())
    }

    /// итератор по элементам текста; использует копию коллатора на момент открытия
    pub fn get_collation_element_iterator(
        &mut self,
        collator: Handle,
        text: Option<&str>,
    ) -> Result<Handle>
    {
        let collator = self.collators.get(collator)?.clone();
        let text = text.ok_or(CollatorError::MissingText)?;

        Ok(self.elements.insert(OpenElements {
            collator,
            cursor: ElementCursor::new(text),
        }))
    }

    pub fn close_elements(&mut self, elements: Handle) -> Result<()>
    {
        self.elements.remove(elements).map(|_| ())
    }

    /// следующий элемент или NULL_ORDER
    pub fn next(&mut self, elements: Handle) -> Result<i32>
    {
        Ok(order(self.elements.get_mut(elements)?.next()))
    }

    /// предыдущий элемент или NULL_ORDER
    pub fn previous(&mut self, elements: Handle) -> Result<i32>
    {
        Ok(order(self.elements.get_mut(elements)?.previous()))
    }

    pub fn reset(&mut self, elements: Handle) -> Result<()>
    {
        self.elements.get_mut(elements)?.cursor.reset();

        Ok(())
    }

    pub fn get_offset(&self, elements: Handle) -> Result<i32>
    {
        Ok(self.elements.get(elements)?.cursor.offset() as i32)
    }

    pub fn set_offset(&mut self, elements: Handle, offset: i32) -> Result<()>
    {
        let open = self.elements.get_mut(elements)?;

        let offset = usize::try_from(offset).map_err(|_| CollatorError::InvalidOffset {
            offset: offset as i64,
            length: open.cursor.text().len(),
        })?;

        let chunker = Chunker::new(open.collator.tailoring(), open.collator.options());

        open.cursor.set_offset(&chunker, offset)
    }

    pub fn set_text(&mut self, elements: Handle, text: Option<&str>) -> Result<()>
    {
        let open = self.elements.get_mut(elements)?;
        let text = text.ok_or(CollatorError::MissingText)?;

        open.cursor.set_text(text);

        Ok(())
    }

    /// максимальная длина расширения, в которое может входить элемент
    pub fn get_max_expansion(&self, elements: Handle, order: i32) -> Result<i32>
    {
        let open = self.elements.get(elements)?;
        let element = CollationElement::from_u32(order as u32);

        Ok(open.collator.max_expansion(element) as i32)
    }
}
