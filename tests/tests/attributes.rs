use core::cmp::Ordering;

use tailored_collator::{Attribute, AttributeValue, Collator, CollatorError};
use tailored_collator_tests::{assert_ascending, assert_equal, sorted};

#[test]
fn defaults()
{
    let collator = Collator::root();

    let expected = [
        (Attribute::FrenchCollation, AttributeValue::Off),
        (Attribute::AlternateHandling, AttributeValue::NonIgnorable),
        (Attribute::CaseFirst, AttributeValue::Off),
        (Attribute::CaseLevel, AttributeValue::Off),
        (Attribute::NormalizationMode, AttributeValue::Off),
        (Attribute::Strength, AttributeValue::Tertiary),
        (Attribute::NumericCollation, AttributeValue::Off),
    ];

    for (attribute, value) in expected {
        assert_eq!(collator.attribute(attribute), value, "{:?}", attribute);
    }
}

#[test]
fn invalid_values_are_rejected()
{
    let mut collator = Collator::root();

    let invalid = [
        (Attribute::Strength, AttributeValue::On),
        (Attribute::CaseFirst, AttributeValue::Shifted),
        (Attribute::AlternateHandling, AttributeValue::Primary),
        (Attribute::NumericCollation, AttributeValue::UpperFirst),
    ];

    for (attribute, value) in invalid {
        assert!(matches!(
            collator.set_attribute(attribute, value),
            Err(CollatorError::InvalidAttribute { .. })
        ));
    }

    assert_eq!(*collator.options(), *Collator::root().options());

    assert!(AttributeValue::try_from(42).is_err());
    assert!(Attribute::try_from(-3).is_err());
    assert_eq!(AttributeValue::try_from(17), Ok(AttributeValue::On));
    assert_eq!(Attribute::try_from(5), Ok(Attribute::Strength));
}

#[test]
fn default_restores_table_value()
{
    let mut collator = Collator::open("da").unwrap();

    assert_eq!(collator.attribute(Attribute::CaseFirst), AttributeValue::UpperFirst);

    collator.set_attribute(Attribute::CaseFirst, AttributeValue::Off).unwrap();
    assert_eq!(collator.attribute(Attribute::CaseFirst), AttributeValue::Off);

    collator.set_attribute(Attribute::CaseFirst, AttributeValue::Default).unwrap();
    assert_eq!(collator.attribute(Attribute::CaseFirst), AttributeValue::UpperFirst);
}

#[test]
fn case_first()
{
    let mut collator = Collator::root();
    let words = ["b", "a", "B", "A"];

    assert_eq!(sorted(&collator, &words), ["a", "A", "b", "B"]);

    collator.set_attribute(Attribute::CaseFirst, AttributeValue::UpperFirst).unwrap();
    assert_eq!(sorted(&collator, &words), ["A", "a", "B", "b"]);

    collator.set_attribute(Attribute::CaseFirst, AttributeValue::LowerFirst).unwrap();
    assert_eq!(sorted(&collator, &words), ["a", "A", "b", "B"]);
}

#[test]
fn case_level()
{
    let mut collator = Collator::root();

    collator.set_attribute(Attribute::Strength, AttributeValue::Primary).unwrap();
    collator.set_attribute(Attribute::CaseLevel, AttributeValue::On).unwrap();

    // регистр различается, диакритика - нет
    assert_ascending(&collator, &["a", "A"]);
    assert_equal(&collator, "a", "á");

    collator.set_attribute(Attribute::CaseFirst, AttributeValue::UpperFirst).unwrap();
    assert_ascending(&collator, &["A", "a"]);
}

#[test]
fn normalization()
{
    let mut collator = Collator::root();

    // порядок комбинируемых знаков после нормализации совпадает
    let a = "a\u{323}\u{302}";
    let b = "a\u{302}\u{323}";

    collator.set_attribute(Attribute::NormalizationMode, AttributeValue::On).unwrap();
    assert_eq!(collator.compare(a, b), Ordering::Equal);

    collator.set_attribute(Attribute::NormalizationMode, AttributeValue::Off).unwrap();
    assert_ne!(collator.compare(a, b), Ordering::Equal);
}

#[test]
fn numeric_collation()
{
    let mut collator = Collator::root();
    collator.set_attribute(Attribute::NumericCollation, AttributeValue::On).unwrap();

    assert_eq!(
        sorted(&collator, &["file10", "file2", "file1", "file100", "file02"]),
        ["file1", "file2", "file02", "file10", "file100"]
    );
    assert_ascending(&collator, &["0", "1", "9", "10", "99", "100", "1000000000000"]);
}
