use tailored_collator::{
    compile, parse, Attribute, AttributeValue, Collator, CollatorError, RuleErrorKind, Strength,
};
use tailored_collator_tests::{assert_ascending, assert_equal, collator, sorted};

#[test]
fn primary_relations()
{
    let collator = collator("& a < c < b");

    assert_ascending(&collator, &["a", "c", "b", "d"]);
    assert_ascending(&collator, &["ac", "ab", "ba", "bc"]);
}

#[test]
fn weaker_relations()
{
    let collator = collator("& e << ë <<< Ë & o <<< ō = ȯ");

    assert_ascending(&collator, &["e", "E", "ë", "Ë", "f"]);
    assert_ascending(&collator, &["o", "ō", "O"]);
    assert_equal(&collator, "ō", "ȯ");
}

#[test]
fn contractions_and_expansions()
{
    let spanish = collator("& C < ch <<< Ch <<< CH & l < ll");
    assert_eq!(
        sorted(&spanish, &["chico", "cuna", "dedo", "llama", "luz", "Chile"]),
        ["cuna", "chico", "Chile", "dedo", "luz", "llama"]
    );

    // ä как ae
    let phonebook = collator("& ae << ä <<< Ä");
    assert_ascending(&phonebook, &["ad", "ae", "ä", "Ä", "af"]);

    // расширение через /
    let extension = collator("& a < æ / e");
    assert_ascending(&extension, &["a", "ae", "af", "æ", "b"]);
}

#[test]
fn before_reset()
{
    let collator = collator("& [before 1] b < ß");
    assert_ascending(&collator, &["a", "az", "ß", "b"]);

    let turkish = Collator::open("tr").unwrap();
    assert_ascending(&turkish, &["h", "ı", "I", "i", "İ", "j"]);
    assert_ascending(&turkish, &["c", "ç", "d"]);
}

#[test]
fn special_anchors()
{
    let collator = collator("& [first regular] < ☃ & [last regular] < ☄");

    assert_ascending(&collator, &["☃", "a", "я", "☄"]);
}

#[test]
fn settings_apply_as_defaults()
{
    let collator = collator("[strength 1] [caseFirst upper] [numericOrdering on] & a < b");

    assert_eq!(collator.options().strength, Strength::Primary);
    assert_eq!(collator.attribute(Attribute::CaseFirst), AttributeValue::UpperFirst);
    assert_equal(&collator, "a", "A");
    assert_ascending(&collator, &["x9", "x10"]);

    // явно заданный уровень сильнее правил
    let tertiary = Collator::from_rules("[strength 1]", AttributeValue::Default, AttributeValue::Tertiary)
        .unwrap();
    assert_ascending(&tertiary, &["a", "A"]);
}

#[test]
fn rules_round_trip_through_text()
{
    let text = "& a < b <<< B & [before 2] c << ĉ";
    let rules = parse(text).unwrap();

    assert_eq!(rules.resets().count(), 2);

    let canonical = rules.to_string();
    assert_eq!(parse(&canonical).unwrap().to_string(), canonical);

    assert_eq!(compile(text).unwrap().rules(), text);
}

#[test]
fn syntax_errors()
{
    let error = |rules: &str| match Collator::from_rules(rules, AttributeValue::Default, AttributeValue::Default)
    {
        Err(CollatorError::RuleSyntax(error)) => error,
        other => panic!("{:?}: {:?}", rules, other),
    };

    assert!(matches!(error("a < b").kind, RuleErrorKind::Malformed(_)));
    assert!(matches!(error("& a <<<<< b").kind, RuleErrorKind::Malformed(_)));
    assert!(matches!(error("& [first nothing] < a").kind, RuleErrorKind::UnknownAnchor(_)));
    assert!(matches!(error("& a < 'b").kind, RuleErrorKind::Malformed(_)));
    assert!(matches!(error("& [before 1] a << b").kind, RuleErrorKind::ResetResolution(_)));

    let located = error("& a < b\n& c <<< |d");
    assert!(located.position > 7);
    assert!(!located.context.is_empty());
}
