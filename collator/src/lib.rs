use core::cmp::Ordering;
use std::sync::Arc;

use collation_element::Elements;
use key::compose_key;
use locale::LocaleId;

pub use collation_element::CollationElement;
pub use error::{CollatorError, Result, RuleErrorKind, RuleSyntaxError};
pub use handles::{CollationService, Handle, HandleTable};
pub use iter::{CollationElements, CursorState, Direction, ElementCursor};
pub use key::SortKey;
pub use locale::{BuiltinTailorings, TailoringProvider};
pub use options::{
    AlternateHandling, Attribute, AttributeValue, CaseFirst, CollatorOptions, MaxVariable, Strength,
};
pub use rules::{compile, compile_with_base, parse};
pub use tailoring::{Tailoring, TailoringBuilder};

pub mod codepoint;
pub mod collation_element;
mod data;
pub mod error;
pub mod handles;
mod hangul;
mod implicit;
pub mod iter;
pub mod key;
pub mod locale;
mod numeric;
pub mod options;
pub mod rules;
pub mod tailoring;
mod weights;

/// коллатор: таблица весов и атрибуты сравнения
///
/// таблица неизменяема и разделяется между копиями коллатора, атрибуты у каждой копии свои
#[derive(Debug, Clone)]
pub struct Collator
{
    tailoring: Arc<Tailoring>,
    options: CollatorOptions,
}

impl Collator
{
    /// коллатор корневой локали
    pub fn root() -> Self
    {
        Self::from_tailoring(Tailoring::root())
    }

    /// коллатор для локали (встроенные таблицы)
    pub fn open(locale: &str) -> Result<Self>
    {
        Self::open_with_provider(locale, &BuiltinTailorings)
    }

    /// коллатор для локали; ключевые слова локали (-u-ks-level2, @colStrength=...) применяются
    /// поверх атрибутов таблицы
    pub fn open_with_provider(locale: &str, provider: &dyn TailoringProvider) -> Result<Self>
    {
        let id = LocaleId::parse(locale);
        let mut collator = Self::from_tailoring(locale::resolve(&id, provider)?);

        for &(attribute, value) in id.keywords.iter() {
            collator.set_attribute(attribute, value)?;
        }

        Ok(collator)
    }

    /// коллатор по правилам; normalization - Default / On / Off, strength - Default или уровень
    pub fn from_rules(
        rules: &str,
        normalization: AttributeValue,
        strength: AttributeValue,
    ) -> Result<Self>
    {
        if !matches!(
            normalization,
            AttributeValue::Default | AttributeValue::On | AttributeValue::Off
        ) {
            return Err(CollatorError::InvalidAttribute {
                attribute: Attribute::NormalizationMode as i32,
                value: normalization as i32,
            });
        }

        let mut collator = Self::from_tailoring(Arc::new(compile(rules)?));

        collator.set_attribute(Attribute::NormalizationMode, normalization)?;
        collator.set_attribute(Attribute::Strength, strength)?;

        Ok(collator)
    }

    /// коллатор с атрибутами, заданными в таблице
    pub fn from_tailoring(tailoring: Arc<Tailoring>) -> Self
    {
        let options = *tailoring.default_options();

        Self { tailoring, options }
    }

    #[inline(always)]
    pub fn tailoring(&self) -> &Tailoring
    {
        &self.tailoring
    }

    #[inline(always)]
    pub fn options(&self) -> &CollatorOptions
    {
        &self.options
    }

    #[inline(always)]
    pub fn options_mut(&mut self) -> &mut CollatorOptions
    {
        &mut self.options
    }

    /// текст правил таблицы
    pub fn rules(&self) -> &str
    {
        self.tailoring.rules()
    }

    pub fn attribute(&self, attribute: Attribute) -> AttributeValue
    {
        self.options.get(attribute)
    }

    /// установить атрибут; при недопустимом значении коллатор не меняется
    pub fn set_attribute(&mut self, attribute: Attribute, value: AttributeValue) -> Result<()>
    {
        self.options.set(attribute, value, self.tailoring.default_options())
    }

    /// итератор по элементам сопоставления текста
    pub fn elements<'c>(&'c self, text: &str) -> CollationElements<'c>
    {
        CollationElements::new(self, text)
    }

    /// ключ сортировки: побайтовое сравнение ключей совпадает с compare
    pub fn sort_key(&self, text: &str) -> SortKey
    {
        let elements: Elements = self.elements(text).collect();

        compose_key(&elements, text, &self.options, self.tailoring.variable_top())
    }

    /// максимальная длина расширения, в которое может входить элемент
    pub fn max_expansion(&self, element: CollationElement) -> usize
    {
        self.tailoring.max_expansion(element.value())
    }

    /// сравнить строки
    pub fn compare(&self, a: &str, b: &str) -> Ordering
    {
        if a == b {
            return Ordering::Equal;
        }

        // первичные веса сравниваются без построения ключей: чаще всего строки различаются уже здесь
        let variable_top = self.tailoring.variable_top();
        let significant = |ce: &CollationElement| {
            ce.primary() != 0 && !key::is_variable(*ce, &self.options, variable_top)
        };

        let mut left = self.elements(a).filter(&significant).map(|ce| ce.primary());
        let mut right = self.elements(b).filter(&significant).map(|ce| ce.primary());

        loop {
            match (left.next(), right.next()) {
                (None, None) => break,
                (Some(x), Some(y)) if x == y => continue,
                (x, y) => return x.cmp(&y),
            }
        }

        self.sort_key(a).cmp(&self.sort_key(b))
    }
}
