use core::cmp::Ordering;

use proptest::prelude::*;
use tailored_collator::{Attribute, AttributeValue, CollationElement, Collator};

/// латиница с диакритикой, цифры, знаки, корейский и китайский
fn text() -> impl Strategy<Value = String>
{
    proptest::string::string_regex("[a-eA-Cchlñäöå0-9 \\-.\u{301}\u{308}\u{AC00}\u{4E00}]{0,8}")
        .unwrap()
}

fn collators() -> Vec<Collator>
{
    let mut shifted = Collator::root();
    shifted.set_attribute(Attribute::AlternateHandling, AttributeValue::Shifted).unwrap();
    shifted.set_attribute(Attribute::Strength, AttributeValue::Quaternary).unwrap();

    let mut numeric = Collator::open("es-u-co-trad").unwrap();
    numeric.set_attribute(Attribute::NumericCollation, AttributeValue::On).unwrap();
    numeric.set_attribute(Attribute::NormalizationMode, AttributeValue::On).unwrap();

    let mut french = Collator::open("sv").unwrap();
    french.set_attribute(Attribute::FrenchCollation, AttributeValue::On).unwrap();
    french.set_attribute(Attribute::CaseLevel, AttributeValue::On).unwrap();
    french.set_attribute(Attribute::CaseFirst, AttributeValue::UpperFirst).unwrap();

    let mut identical = Collator::open("da").unwrap();
    identical.set_attribute(Attribute::Strength, AttributeValue::Identical).unwrap();

    vec![Collator::root(), shifted, numeric, french, identical]
}

proptest! {
    #[test]
    fn compare_matches_sort_keys(a in text(), b in text())
    {
        for collator in collators() {
            let keys = collator.sort_key(&a).cmp(&collator.sort_key(&b));

            prop_assert_eq!(collator.compare(&a, &b), keys);
        }
    }

    #[test]
    fn antisymmetry(a in text(), b in text())
    {
        for collator in collators() {
            prop_assert_eq!(collator.compare(&a, &b), collator.compare(&b, &a).reverse());
        }
    }

    #[test]
    fn transitivity(a in text(), b in text(), c in text())
    {
        for collator in collators() {
            let mut words = [a.as_str(), b.as_str(), c.as_str()];
            words.sort_by(|x, y| collator.compare(x, y));

            prop_assert_ne!(collator.compare(words[0], words[1]), Ordering::Greater);
            prop_assert_ne!(collator.compare(words[1], words[2]), Ordering::Greater);
            prop_assert_ne!(collator.compare(words[0], words[2]), Ordering::Greater);
        }
    }

    #[test]
    fn backward_iteration_reverses_forward(text in text())
    {
        for collator in collators() {
            let forward: Vec<CollationElement> = collator.elements(&text).collect();

            let mut iter = collator.elements(&text);
            while iter.next().is_some() {}

            let mut backward = vec![];

            while let Some(ce) = iter.previous() {
                backward.push(ce);
            }

            backward.reverse();
            prop_assert_eq!(forward, backward);
        }
    }

    #[test]
    fn offsets_stay_on_char_boundaries(text in text(), offset in 0usize .. 32)
    {
        let collator = Collator::root();
        let mut iter = collator.elements(&text);

        match iter.set_offset(offset) {
            Ok(()) => {
                prop_assert!(iter.offset() <= offset);
                prop_assert!(text.is_char_boundary(iter.offset()));
            }
            Err(_) => prop_assert!(offset > text.len() || !text.is_char_boundary(offset)),
        }
    }
}
