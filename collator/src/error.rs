use thiserror::Error;

/// ошибки коллатора
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollatorError
{
    #[error(transparent)]
    RuleSyntax(#[from] RuleSyntaxError),

    #[error("unsupported value {value} for collation attribute {attribute}")]
    InvalidAttribute { attribute: i32, value: i32 },

    #[error("offset {offset} is not a code point boundary of text of length {length}")]
    InvalidOffset { offset: i64, length: usize },

    #[error("{kind} handle {handle:#x} is closed or was never opened")]
    UnboundResource { kind: &'static str, handle: u64 },

    #[error("no source text")]
    MissingText,

    #[error("root collation data is unavailable")]
    RootDataUnavailable,
}

/// ошибка в тексте правил: позиция (в байтах), причина и фрагмент текста перед ней
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {position} (after {context:?})")]
pub struct RuleSyntaxError
{
    pub position: usize,
    pub kind: RuleErrorKind,
    pub context: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleErrorKind
{
    #[error("malformed rule: {0}")]
    Malformed(String),

    #[error("unknown reset anchor {0:?}")]
    UnknownAnchor(String),

    #[error("cannot resolve reset point: {0}")]
    ResetResolution(String),

    #[error("no room for a new weight at level {0}")]
    WeightSpaceExhausted(u8),
}

/// длина фрагмента текста правил, сохраняемого в ошибке
const CONTEXT_CHARS: usize = 16;

impl RuleSyntaxError
{
    /// ошибка в позиции position текста правил
    pub fn new(rules: &str, position: usize, kind: RuleErrorKind) -> Self
    {
        let position = position.min(rules.len());
        let before = rules.get(.. position).unwrap_or_default();
        let skip = before.chars().count().saturating_sub(CONTEXT_CHARS);

        Self {
            position,
            kind,
            context: before.chars().skip(skip).collect(),
        }
    }
}

pub type Result<T> = core::result::Result<T, CollatorError>;
