use tailored_collator::{CollationElement, Collator, CursorState};
use tailored_collator_tests::collator;

fn backward(collator: &Collator, text: &str) -> Vec<CollationElement>
{
    let mut iter = collator.elements(text);
    while iter.next().is_some() {}

    let mut result = vec![];

    while let Some(ce) = iter.previous() {
        result.push(ce);
    }

    result.reverse();
    result
}

#[test]
fn both_directions_agree()
{
    let collator = collator("& C < ch & ae << ä");

    for text in ["", "a", "chch", "cha\u{301}", "aeä", "x\u{AC00}\u{4E00}y", "ß1-2"] {
        let forward: Vec<CollationElement> = collator.elements(text).collect();

        assert_eq!(forward, backward(&collator, text), "{:?}", text);
    }
}

#[test]
fn ignorables_produce_nothing()
{
    let collator = Collator::root();

    assert_eq!(collator.elements("\u{200B}\u{FEFF}").count(), 0);
    assert_eq!(collator.elements("a\u{200B}b").count(), 2);
}

#[test]
fn offsets_snap_to_chunks()
{
    let collator = collator("& C < ch");
    let mut iter = collator.elements("xchy");

    assert_eq!(iter.offset(), 0);
    assert_eq!(iter.state(), CursorState::Positioned(0));

    iter.next();
    assert_eq!(iter.offset(), 1);

    // середина сокращения - начало сокращения
    iter.set_offset(2).unwrap();
    assert_eq!(iter.offset(), 1);

    let ch = iter.next().unwrap();
    assert_eq!(collator.tailoring().elements_of("ch")[0], ch);

    iter.set_offset(4).unwrap();
    assert_eq!(iter.next(), None);
    assert_eq!(iter.state(), CursorState::ExhaustedForward);

    assert!(iter.set_offset(5).is_err());
    assert_eq!(iter.offset(), 4);
}

#[test]
fn set_text_and_reset()
{
    let collator = Collator::root();
    let mut iter = collator.elements("ab");

    let a = iter.next().unwrap();
    iter.set_text("ba");

    assert_eq!(iter.text(), "ba");
    assert_eq!(iter.offset(), 0);
    assert_ne!(iter.next(), Some(a));
    assert_eq!(iter.next(), Some(a));

    iter.reset();
    assert_eq!(iter.offset(), 0);
    assert_eq!(iter.state(), CursorState::Positioned(0));
}

#[test]
fn expansions()
{
    let collator = collator("& a < æ / e");
    let elements: Vec<CollationElement> = collator.elements("æ").collect();

    assert_eq!(elements.len(), 2);

    for ce in elements {
        assert!(collator.max_expansion(ce) >= 2);
    }

    let mut iter = collator.elements("æ");
    let first = iter.next().unwrap();
    assert_eq!(iter.max_expansion(first), collator.max_expansion(first));
}

#[test]
fn three_element_expansion()
{
    let collator = collator("& a < x / bc");
    let elements: Vec<CollationElement> = collator.elements("x").collect();

    assert_eq!(elements.len(), 3);
    assert!(elements.iter().all(|&ce| collator.max_expansion(ce) >= 3));

    // длина расширения определяется первичным весом: заглавная буква с тем же весом тоже может входить в x
    let upper = collator.tailoring().elements_of("B")[0];

    assert_eq!(upper.primary(), elements[1].primary());
    assert_ne!(upper, elements[1]);
    assert!(collator.max_expansion(upper) >= 3);
}

#[test]
fn setting_current_offset_keeps_position()
{
    let collator = collator("& a < æ / e");
    let mut iter = collator.elements("æb");

    let first = iter.next().unwrap();
    let offset = iter.offset();

    // внутри расширения: повторная установка смещения не сбрасывает позицию
    iter.set_offset(offset).unwrap();
    assert_eq!(iter.offset(), offset);

    let second = iter.next().unwrap();
    assert_ne!(first, second);
    assert_eq!(collator.tailoring().elements_of("æ")[1], second);
}
