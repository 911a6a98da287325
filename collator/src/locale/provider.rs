use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};
use once_cell::sync::Lazy;

use crate::rules::compile;
use crate::tailoring::Tailoring;

/// источник таблиц для локалей
pub trait TailoringProvider: Send + Sync
{
    /// таблица для имени вида lang[-Script][-REGION][/type]; None - данных нет
    fn load(&self, locale: &str) -> Option<Arc<Tailoring>>;

    /// корневая таблица
    fn root(&self) -> Option<Arc<Tailoring>>
    {
        Some(Tailoring::root())
    }
}

const DANISH: &str = "[caseFirst upper]
    & z < æ <<< Æ << ä <<< Ä < ø <<< Ø << ö <<< Ö < å <<< Å <<< aa <<< Aa <<< AA";

const NORWEGIAN: &str =
    "& z < æ <<< Æ << ä <<< Ä < ø <<< Ø << ö <<< Ö < å <<< Å <<< aa <<< Aa <<< AA";

const SWEDISH: &str = "& z < å <<< Å < ä <<< Ä << æ <<< Æ < ö <<< Ö << ø <<< Ø";

const FINNISH: &str = "& y << ü <<< Ü
    & z < å <<< Å < ä <<< Ä << æ <<< Æ < ö <<< Ö << ø <<< Ø";

const GERMAN_PHONEBOOK: &str = "& ae << ä <<< Ä & oe << ö <<< Ö & ue << ü <<< Ü";

const SPANISH: &str = "& n < ñ <<< Ñ";

const SPANISH_TRADITIONAL: &str = "& n < ñ <<< Ñ
    & C < ch <<< Ch <<< CH
    & l < ll <<< Ll <<< LL";

const CZECH: &str = "& C < č <<< Č
    & H < ch <<< cH <<< Ch <<< CH
    & R < ř <<< Ř & S < š <<< Š & Z < ž <<< Ž";

const SLOVAK: &str = "& A < ä <<< Ä & C < č <<< Č
    & H < ch <<< cH <<< Ch <<< CH
    & O < ô <<< Ô & R < ř <<< Ř & S < š <<< Š & Z < ž <<< Ž";

const POLISH: &str = "& A < ą <<< Ą & C < ć <<< Ć & E < ę <<< Ę & L < ł <<< Ł
    & N < ń <<< Ń & O < ó <<< Ó & S < ś <<< Ś & Z < ź <<< Ź < ż <<< Ż";

const LITHUANIAN: &str = "& [before 1] j < y <<< Y
    & C < č <<< Č & S < š <<< Š & Z < ž <<< Ž";

const ESTONIAN: &str = "& [before 1] t < š <<< Š < z <<< Z < ž <<< Ž
    & [before 1] x < õ <<< Õ < ä <<< Ä < ö <<< Ö < ü <<< Ü";

const TURKISH: &str =
    "& c < ç <<< Ç & g < ğ <<< Ğ & [before 1] i < ı <<< I & i <<< İ & o < ö <<< Ö & s < ş <<< Ş & u < ü <<< Ü";

const CANADIAN_FRENCH: &str = "[backwards 2]";

/// правила встроенных таблиц
const BUILTIN_RULES: [(&str, &str); 16] = [
    ("da", DANISH),
    ("nb", NORWEGIAN),
    ("nn", NORWEGIAN),
    ("no", NORWEGIAN),
    ("sv", SWEDISH),
    ("fi", FINNISH),
    ("de/phonebook", GERMAN_PHONEBOOK),
    ("es", SPANISH),
    ("es/traditional", SPANISH_TRADITIONAL),
    ("cs", CZECH),
    ("sk", SLOVAK),
    ("pl", POLISH),
    ("lt", LITHUANIAN),
    ("et", ESTONIAN),
    ("tr", TURKISH),
    ("fr-CA", CANADIAN_FRENCH),
];

/// встроенные таблицы: компилируются один раз при первом обращении
static BUILTIN: Lazy<HashMap<&'static str, Arc<Tailoring>>> = Lazy::new(|| {
    let mut tailorings: HashMap<&'static str, Arc<Tailoring>> = HashMap::new();
    let mut compiled: HashMap<&'static str, Arc<Tailoring>> = HashMap::new();

    for (locale, rules) in BUILTIN_RULES {
        // одинаковые правила - общая таблица
        if let Some(tailoring) = compiled.get(rules) {
            tailorings.insert(locale, Arc::clone(tailoring));
            continue;
        }

        match compile(rules) {
            Ok(tailoring) => {
                let tailoring = Arc::new(tailoring);

                compiled.insert(rules, Arc::clone(&tailoring));
                tailorings.insert(locale, tailoring);
            }
            Err(e) => error!("built-in collation rules for {:?} are invalid: {}", locale, e),
        }
    }

    debug!("{} built-in tailorings compiled", tailorings.len());

    tailorings
});

/// таблицы для небольшого набора локалей
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTailorings;

impl BuiltinTailorings
{
    /// имена локалей, для которых есть таблицы
    pub fn locales() -> impl Iterator<Item = &'static str>
    {
        BUILTIN_RULES.iter().map(|&(locale, _)| locale)
    }
}

impl TailoringProvider for BuiltinTailorings
{
    fn load(&self, locale: &str) -> Option<Arc<Tailoring>>
    {
        BUILTIN.get(locale).cloned()
    }
}
