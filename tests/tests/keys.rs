use tailored_collator::key::{KEY_TERMINATOR, LEVEL_SEPARATOR};
use tailored_collator::{Attribute, AttributeValue, Collator};
use tailored_collator_tests::{assert_ascending, assert_equal};

/// ключ без первичных байтов
fn tail(collator: &Collator, text: &str, primary_len: usize) -> Vec<u8>
{
    collator.sort_key(text).as_bytes()[primary_len ..].to_vec()
}

#[test]
fn empty_text()
{
    let mut collator = Collator::root();

    assert_eq!(collator.sort_key("").as_bytes(), [KEY_TERMINATOR]);

    collator.set_attribute(Attribute::Strength, AttributeValue::Identical).unwrap();
    assert_eq!(collator.sort_key("").as_bytes(), [KEY_TERMINATOR]);
}

#[test]
fn level_layout()
{
    let mut collator = Collator::root();

    // первичный вес - 2 байта, вторичный и третичный - общие
    assert_eq!(tail(&collator, "a", 2), [LEVEL_SEPARATOR, 0x05, LEVEL_SEPARATOR, 0x04, KEY_TERMINATOR]);

    collator.set_attribute(Attribute::Strength, AttributeValue::Primary).unwrap();
    assert_eq!(collator.sort_key("a").len(), 3);

    collator.set_attribute(Attribute::Strength, AttributeValue::Secondary).unwrap();
    assert_eq!(tail(&collator, "a", 2), [LEVEL_SEPARATOR, 0x05, KEY_TERMINATOR]);

    collator.set_attribute(Attribute::Strength, AttributeValue::Quaternary).unwrap();
    assert_eq!(
        tail(&collator, "a", 2),
        [LEVEL_SEPARATOR, 0x05, LEVEL_SEPARATOR, 0x04, LEVEL_SEPARATOR, 0xFC, KEY_TERMINATOR]
    );

    collator.set_attribute(Attribute::CaseLevel, AttributeValue::On).unwrap();
    collator.set_attribute(Attribute::Strength, AttributeValue::Primary).unwrap();

    // уровень регистра - после первичного, даже при strength = primary
    let lower = collator.sort_key("a");
    let upper = collator.sort_key("A");

    assert_eq!(lower.len(), 5);
    assert!(lower < upper);
}

#[test]
fn identical_level()
{
    let mut collator = Collator::root();
    collator.set_attribute(Attribute::Strength, AttributeValue::Identical).unwrap();

    let key = collator.sort_key("a");
    let bytes = key.as_bytes();

    // 'a' = 0x61: 0, 0, 0x61 в основании 254, плюс 2
    assert_eq!(bytes[bytes.len() - 4 ..], [0x02, 0x02, 0x63, KEY_TERMINATOR]);

    // композиция и декомпозиция дают одинаковый ключ
    assert_equal(&collator, "\u{E9}", "e\u{301}");
}

#[test]
fn key_order_follows_levels()
{
    let collator = Collator::root();

    assert_ascending(&collator, &["", "a", "A", "á", "Á", "ab", "b"]);
    assert_ascending(&collator, &["1", "9", "a", "z", "α", "я"]);
    assert_ascending(&collator, &[" ", "-", ".", "1"]);
}

#[test]
fn french_secondary()
{
    let mut collator = Collator::root();
    collator.set_attribute(Attribute::FrenchCollation, AttributeValue::On).unwrap();

    assert_ascending(&collator, &["cote", "côte", "coté", "côté"]);

    collator.set_attribute(Attribute::FrenchCollation, AttributeValue::Off).unwrap();
    assert_ascending(&collator, &["cote", "coté", "côte", "côté"]);
}

#[test]
fn shifted_keys()
{
    let mut collator = Collator::root();
    collator.set_attribute(Attribute::AlternateHandling, AttributeValue::Shifted).unwrap();

    assert_equal(&collator, "di-ce", "dice");
    assert_equal(&collator, "a b", "ab");

    collator.set_attribute(Attribute::Strength, AttributeValue::Quaternary).unwrap();
    assert_ascending(&collator, &["di-ce", "dice"]);
    assert_ascending(&collator, &["a b", "ab"]);
}
