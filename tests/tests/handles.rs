use tailored_collator::{CollationService, CollatorError};

/// ICU: UCOL_STRENGTH, UCOL_CASE_FIRST и значения атрибутов
const STRENGTH: i32 = 5;
const CASE_FIRST: i32 = 2;
const PRIMARY: i32 = 0;
const TERTIARY: i32 = 2;
const UPPER_FIRST: i32 = 25;
const NULL_ORDER: i32 = -1;

#[test]
fn compare_through_handles()
{
    let mut service = CollationService::new();
    let collator = service.open_collator(Some("es")).unwrap();

    assert_eq!(service.compare(collator, Some("n"), Some("ñ")), Ok(-1));
    assert_eq!(service.compare(collator, Some("ñ"), Some("o")), Ok(-1));
    assert_eq!(service.compare(collator, Some("o"), Some("ñ")), Ok(1));
    assert_eq!(service.compare(collator, Some(""), Some("")), Ok(0));

    assert_eq!(service.get_attribute(collator, STRENGTH), Ok(TERTIARY));
    service.set_attribute(collator, CASE_FIRST, UPPER_FIRST).unwrap();
    assert_eq!(service.compare(collator, Some("A"), Some("a")), Ok(-1));

    service.set_attribute(collator, STRENGTH, PRIMARY).unwrap();
    assert_eq!(service.compare(collator, Some("A"), Some("a")), Ok(0));

    assert!(service.get_attribute(collator, 42).is_err());
    assert!(service.set_attribute(collator, 6, 0).is_err());
}

#[test]
fn sort_keys_match_compare()
{
    let mut service = CollationService::new();
    let collator = service.open_collator_from_rules(Some("& a < b < c"), -1, -1).unwrap();

    let words = ["", "a", "A", "b", "c", "ab", "ba"];

    for a in words {
        for b in words {
            let keys = service
                .get_sort_key(collator, Some(a))
                .unwrap()
                .cmp(&service.get_sort_key(collator, Some(b)).unwrap());

            assert_eq!(service.compare(collator, Some(a), Some(b)), Ok(keys as i32));
        }
    }
}

#[test]
fn iterators_through_handles()
{
    let mut service = CollationService::new();
    let collator = service.open_collator_from_rules(Some("& C < ch"), -1, -1).unwrap();
    let elements = service.get_collation_element_iterator(collator, Some("och")).unwrap();

    let mut forward = vec![];

    loop {
        match service.next(elements).unwrap() {
            NULL_ORDER => break,
            order => forward.push(order),
        }
    }

    assert_eq!(forward.len(), 2);
    assert_eq!(service.get_offset(elements), Ok(3));

    let mut backward = vec![];

    loop {
        match service.previous(elements).unwrap() {
            NULL_ORDER => break,
            order => backward.push(order),
        }
    }

    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(service.get_offset(elements), Ok(0));

    // середина сокращения - его начало
    service.set_offset(elements, 2).unwrap();
    assert_eq!(service.get_offset(elements), Ok(1));
    assert_eq!(service.next(elements), Ok(forward[1]));
}

#[test]
fn stale_and_foreign_handles()
{
    let mut service = CollationService::new();

    let first = service.open_collator(Some("sv")).unwrap();
    service.close_collator(first).unwrap();

    // ячейка используется повторно, но старый дескриптор не действует
    let second = service.open_collator(Some("sv")).unwrap();
    assert_ne!(first, second);

    assert!(matches!(
        service.get_rules(first),
        Err(CollatorError::UnboundResource { .. })
    ));
    assert!(service.get_rules(second).is_ok());

    // дескриптор коллатора не является дескриптором итератора
    assert!(service.next(second).is_err());
    assert!(service.close_elements(second).is_err());

    assert_eq!(service.open_collator(None), Err(CollatorError::MissingText));
}
