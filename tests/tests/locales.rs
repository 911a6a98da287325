use std::sync::Arc;

use tailored_collator::locale::LocaleId;
use tailored_collator::{
    compile, Attribute, AttributeValue, BuiltinTailorings, Collator, CollatorError, Tailoring,
    TailoringProvider,
};
use tailored_collator_tests::{assert_ascending, assert_equal, sorted};

#[test]
fn swedish_and_german()
{
    let swedish = Collator::open("sv_SE").unwrap();
    assert_eq!(
        sorted(&swedish, &["öl", "zon", "ål", "äpple", "ara"]),
        ["ara", "zon", "ål", "äpple", "öl"]
    );

    let german = Collator::open("de").unwrap();
    assert_eq!(
        sorted(&german, &["öl", "zon", "ål", "äpple", "ara"]),
        ["ål", "äpple", "ara", "öl", "zon"]
    );

    let phonebook = Collator::open("de-DE-u-co-phonebk").unwrap();
    assert_ascending(&phonebook, &["ad", "ae", "ä", "af"]);

    let icu = Collator::open("de@collation=phonebook").unwrap();
    assert_eq!(icu.rules(), phonebook.rules());
}

#[test]
fn spanish_variants()
{
    let modern = Collator::open("es").unwrap();
    assert_ascending(&modern, &["ch", "cz", "d", "n", "ñ", "o"]);

    let traditional = Collator::open("es-u-co-trad").unwrap();
    assert_ascending(&traditional, &["cz", "ch", "d", "lz", "ll", "m"]);
}

#[test]
fn danish_upper_first()
{
    let danish = Collator::open("da").unwrap();

    assert_ascending(&danish, &["A", "a", "ab", "z", "æ", "ø", "å"]);
    assert_ascending(&danish, &["ab", "z", "ø", "aa"]);
}

#[test]
fn canadian_french()
{
    let collator = Collator::open("fr-CA").unwrap();

    assert_eq!(collator.attribute(Attribute::FrenchCollation), AttributeValue::On);
    assert_ascending(&collator, &["cote", "côte", "coté", "côté"]);
}

#[test]
fn keywords_override_table()
{
    let collator = Collator::open("da@colCaseFirst=lower;colStrength=secondary").unwrap();

    assert_eq!(collator.attribute(Attribute::CaseFirst), AttributeValue::LowerFirst);
    assert_equal(&collator, "a", "A");

    let numeric = Collator::open("en-u-kn-true").unwrap();
    assert_ascending(&numeric, &["2", "10"]);
}

#[test]
fn unknown_locales_fall_back_to_root()
{
    let root = Collator::root();

    for locale in ["", "root", "en", "en_US", "zz-Zzzz-ZZ", "x-private"] {
        let collator = Collator::open(locale).unwrap();

        assert_eq!(collator.rules(), "", "{:?}", locale);
        assert_eq!(collator.options(), root.options());
    }
}

/// таблицы только из заданных правил, без корневой
struct Custom;

impl TailoringProvider for Custom
{
    fn load(&self, locale: &str) -> Option<Arc<Tailoring>>
    {
        match locale {
            "xx" => compile("& a < z").ok().map(Arc::new),
            _ => None,
        }
    }

    fn root(&self) -> Option<Arc<Tailoring>>
    {
        None
    }
}

#[test]
fn custom_provider()
{
    let collator = Collator::open_with_provider("xx-YY", &Custom).unwrap();
    assert_ascending(&collator, &["a", "z", "b"]);

    assert!(matches!(
        Collator::open_with_provider("yy", &Custom),
        Err(CollatorError::RootDataUnavailable)
    ));
}

#[test]
fn builtin_locales_resolve_to_themselves()
{
    for locale in BuiltinTailorings::locales() {
        let (name, collation) = match locale.split_once('/') {
            Some((name, collation)) => (name, Some(collation)),
            None => (locale, None),
        };

        let id = LocaleId::parse(&match collation {
            Some(collation) => format!("{}@collation={}", name, collation),
            None => name.to_owned(),
        });

        assert_eq!(id.fallback_chain()[0], locale);
        assert!(BuiltinTailorings.load(locale).is_some(), "{}", locale);
        assert!(!Collator::open(name).unwrap().rules().is_empty() || collation.is_some());
    }
}
