use std::rc::Rc;

use indexmap::IndexMap;
use thrax_core::{Alphabet, IntSeq, Ranges, UnicodeAlphabet};

use super::{Quantifier, Re};

fn class(from: char, to: char) -> Re {
    Re::Set {
        ranges: Ranges::interval(&UnicodeAlphabet, from as u32, to as u32),
    }
}

#[test]
fn single_codepoint_literal_is_char() {
    assert_eq!(Re::literal(IntSeq::from("a")), Re::Char { codepoint: 97 });
    assert!(matches!(Re::literal(IntSeq::from("ab")), Re::Str { .. }));
    assert!(matches!(Re::literal(IntSeq::epsilon()), Re::Str { .. }));
}

#[test]
fn precedence_levels() {
    let a = Rc::new(Re::var("a"));
    let b = Rc::new(Re::var("b"));

    assert_eq!(Re::union(a.clone(), b.clone()).precedence(), 4);
    assert_eq!(Re::concat(a.clone(), b.clone()).precedence(), 3);
    assert_eq!(Re::kleene(a.clone(), Quantifier::ZeroOrMore).precedence(), 2);
    assert_eq!(
        Re::Output {
            input: a.clone(),
            output: IntSeq::from("x"),
        }
        .precedence(),
        1
    );
    assert_eq!(Re::compose(a.clone(), b.clone()).precedence(), 0);
    assert_eq!(Re::diff(a.clone(), b).precedence(), 0);
    assert_eq!(a.precedence(), 0);
    assert_eq!(Re::literal(IntSeq::from("abc")).precedence(), 0);
}

#[test]
fn set_precedence_follows_run_count() {
    let alphabet = UnicodeAlphabet;
    let single = class('a', 'c');
    assert_eq!(single.precedence(), 0);

    let ranges = Ranges::interval(&alphabet, 'a' as u32, 'c' as u32).union(
        &Ranges::interval(&alphabet, 'x' as u32, 'z' as u32),
        &alphabet,
    );
    assert_eq!(Re::Set { ranges }.precedence(), 4);

    let empty = Re::Set {
        ranges: Ranges::empty(&alphabet),
    };
    assert_eq!(empty.precedence(), 0);
}

#[test]
fn dual_views_of_leaves() {
    let alphabet = UnicodeAlphabet;
    let ch = Re::Char { codepoint: 'q' as u32 };

    assert!(ch.is_set_like());
    assert!(ch.is_str_like());
    assert_eq!(ch.as_str(), Some(IntSeq::from("q")));
    assert_eq!(
        ch.as_set(&alphabet),
        Some(Ranges::singleton(&alphabet, 'q' as u32))
    );

    let set = class('a', 'z');
    assert!(set.is_set_like());
    assert!(!set.is_str_like());
    assert_eq!(set.as_str(), None);

    let s = Re::literal(IntSeq::from("hi"));
    assert!(!s.is_set_like());
    assert_eq!(s.as_set(&alphabet), None);

    let v = Re::var("x");
    assert!(!v.is_set_like() && !v.is_str_like());
}

#[test]
fn char_outside_alphabet_has_no_class_view() {
    struct Ascii;
    impl Alphabet for Ascii {
        fn minimal(&self) -> u32 {
            0
        }
        fn maximal(&self) -> u32 {
            127
        }
    }

    assert_eq!(Re::Char { codepoint: 0xE9 }.as_set(&Ascii), None);
    assert!(Re::Char { codepoint: 65 }.as_set(&Ascii).is_some());
}

#[test]
fn counts_every_reference() {
    let x = Rc::new(Re::var("x"));
    let y = Rc::new(Re::var("y"));
    let body = Re::union(
        Rc::new(Re::concat(x.clone(), x.clone())),
        Rc::new(Re::kleene(
            Rc::new(Re::Output {
                input: y,
                output: IntSeq::from("o"),
            }),
            Quantifier::OneOrMore,
        )),
    );

    let mut counts = IndexMap::new();
    body.count_usages(&mut counts);
    Re::diff(x.clone(), Rc::new(class('a', 'b'))).count_usages(&mut counts);

    assert_eq!(counts.get("x"), Some(&3));
    assert_eq!(counts.get("y"), Some(&1));
    assert_eq!(counts.len(), 2);
}

#[test]
fn quantifier_markers() {
    for marker in ["*", "+", "?"] {
        let q = Quantifier::from_marker(marker).unwrap();
        assert_eq!(q.marker().to_string(), marker);
    }
    assert_eq!(Quantifier::from_marker("!"), None);
}

#[test]
fn serializes_tagged() {
    let re = Re::kleene(Rc::new(Re::Char { codepoint: 97 }), Quantifier::ZeroOrOne);
    let json = serde_json::to_string(&re).unwrap();
    insta::assert_snapshot!(json, @r#"{"kind":"kleene","operand":{"kind":"char","codepoint":97},"quantifier":"zero_or_one"}"#);
}

#[test]
fn children_in_source_order() {
    let a = Rc::new(Re::var("a"));
    let b = Rc::new(Re::var("b"));
    let union = Re::union(a.clone(), b.clone());
    let names: Vec<_> = union
        .children()
        .map(|child| match child.as_ref() {
            Re::Var { name } => name.as_str(),
            _ => "?",
        })
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    assert_eq!(Re::kleene(a, Quantifier::ZeroOrMore).children().count(), 1);
    assert_eq!(Re::var("c").children().count(), 0);
}

#[test]
fn deep_spine_is_counted_and_released() {
    let leaf = Rc::new(Re::var("v"));
    let mut spine = leaf.clone();
    for _ in 0..200_000 {
        spine = Rc::new(Re::concat(spine, leaf.clone()));
    }

    let mut counts = IndexMap::new();
    spine.count_usages(&mut counts);
    assert_eq!(counts.get("v"), Some(&200_001));

    drop(spine);
    assert_eq!(Rc::strong_count(&leaf), 1);
}
