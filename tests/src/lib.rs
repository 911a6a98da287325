use core::cmp::Ordering;

use tailored_collator::{AttributeValue, Collator};

/// коллатор по правилам с атрибутами таблицы
pub fn collator(rules: &str) -> Collator
{
    match Collator::from_rules(rules, AttributeValue::Default, AttributeValue::Default) {
        Ok(collator) => collator,
        Err(e) => panic!("rules {:?}: {}", rules, e),
    }
}

/// слова идут строго по возрастанию - и при сравнении, и по ключам
pub fn assert_ascending(collator: &Collator, words: &[&str])
{
    for pair in words.windows(2) {
        let (a, b) = (pair[0], pair[1]);

        assert_eq!(collator.compare(a, b), Ordering::Less, "{:?} < {:?}", a, b);
        assert_eq!(collator.compare(b, a), Ordering::Greater, "{:?} > {:?}", b, a);
        assert!(collator.sort_key(a) < collator.sort_key(b), "key {:?} < key {:?}", a, b);
    }
}

/// строки равны при текущих атрибутах
pub fn assert_equal(collator: &Collator, a: &str, b: &str)
{
    assert_eq!(collator.compare(a, b), Ordering::Equal, "{:?} = {:?}", a, b);
    assert_eq!(collator.sort_key(a), collator.sort_key(b), "key {:?} = key {:?}", a, b);
}

/// отсортировать слова коллатором
pub fn sorted(collator: &Collator, words: &[&str]) -> Vec<String>
{
    let mut words: Vec<String> = words.iter().map(|word| word.to_string()).collect();
    words.sort_by(|a, b| collator.compare(a, b));

    words
}
