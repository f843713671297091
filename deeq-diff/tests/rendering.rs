//! How diffs of each kind of value render.

use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use deeq_core::{Def, Peek, PeekMapping, Reflect, Shape, reflect_record};
use deeq_diff::{DiffOptions, diff_text};
use indoc::indoc;
use insta::assert_snapshot;

fn render<A: Reflect, B: Reflect>(a: &A, b: &B) -> String {
    deeq_testhelpers::setup();
    match diff_text(Peek::new(a), Peek::new(b), &DiffOptions::default()) {
        Ok(text) => text,
        Err(e) => panic!("diff failed: {e}"),
    }
}

#[test]
fn equal_values_render_nothing() {
    assert_eq!(render(&vec![1, 2, 3], &vec![1, 2, 3]), "");
    assert_eq!(render(&"same".to_string(), &"same".to_string()), "");
}

#[test]
fn changed_element_in_a_sequence() {
    assert_eq!(
        render(&vec![1, 2, 3], &vec![1, 2, 4]),
        indoc! {"
              Vec<i32>{
                1,
                2,
            -   3,
            +   4,
              }"}
    );
}

#[test]
fn swapped_elements_keep_one_match() {
    assert_eq!(
        render(&vec![1, 2], &vec![2, 1]),
        indoc! {"
              Vec<i32>{
            -   1,
                2,
            +   1,
              }"}
    );
}

#[test]
fn insertions_and_removals() {
    assert_eq!(
        render(&vec![1, 5], &vec![1, 2, 3, 4, 5]),
        indoc! {"
              Vec<i32>{
                1,
            +   2,
            +   3,
            +   4,
                5,
              }"}
    );
    assert_eq!(
        render(&vec![1, 3], &Vec::<i32>::new()),
        indoc! {"
              Vec<i32>{
            -   1,
            -   3,
              }"}
    );
}

struct S {
    a: i32,
    b: String,
}

reflect_record!(S { a, b });

struct AnotherS {
    a: i32,
    b: String,
}

reflect_record!(AnotherS { a, b });

#[test]
fn changed_record_field() {
    let left = S {
        a: 1,
        b: "hello".into(),
    };
    let right = S {
        a: 1,
        b: "world".into(),
    };
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              S{
                a: 1,
            -   b: "hello",
            +   b: "world",
              }"#}
    );
}

#[test]
fn type_mismatch_splits_whole_values() {
    let left = S {
        a: 1,
        b: "x".into(),
    };
    let right = AnotherS {
        a: 1,
        b: "x".into(),
    };
    let text = render(&left, &right);
    assert_snapshot!(text);
}

#[test]
fn scalar_type_mismatch() {
    assert_eq!(render(&1_i32, &"1".to_string()), "- 1\n+ \"1\"");
}

struct Outer {
    x: S,
    y: S,
}

reflect_record!(Outer { x, y });

#[test]
fn nested_records_show_every_changed_field() {
    let left = Outer {
        x: S {
            a: 1,
            b: "hello".into(),
        },
        y: S {
            a: 1,
            b: "world".into(),
        },
    };
    let right = Outer {
        x: S {
            a: 1,
            b: "world".into(),
        },
        y: S {
            a: 1,
            b: "hello".into(),
        },
    };
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              Outer{
                x: S{
                  a: 1,
            -     b: "hello",
            +     b: "world",
                },
                y: S{
                  a: 1,
            -     b: "world",
            +     b: "hello",
                },
              }"#}
    );
}

#[test]
fn changed_and_one_sided_map_keys() {
    let left: HashMap<String, i32> = [("a".into(), 1), ("b".into(), 2)].into();
    let changed: HashMap<String, i32> = [("a".into(), 1), ("b".into(), 3)].into();
    let other_key: HashMap<String, i32> = [("a".into(), 1), ("c".into(), 3)].into();
    assert_eq!(
        render(&left, &changed),
        indoc! {r#"
              HashMap<String, i32>{
                "a": 1,
            -   "b": 2,
            +   "b": 3,
              }"#}
    );
    assert_eq!(
        render(&left, &other_key),
        indoc! {r#"
              HashMap<String, i32>{
                "a": 1,
            -   "b": 2,
            +   "c": 3,
              }"#}
    );
}

#[test]
fn map_output_ignores_iteration_order() {
    let forward: HashMap<i32, i32> = (0..50).map(|i| (i, i)).collect();
    let mut backward: HashMap<i32, i32> = (0..50).rev().map(|i| (i, i)).collect();
    backward.insert(25, -25);
    let first = render(&forward, &backward);
    for _ in 0..5 {
        let shuffled: HashMap<i32, i32> = forward.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(render(&shuffled, &backward), first);
    }
    assert!(first.contains("-   25: 25,\n+   25: -25,"));
}

#[test]
fn integer_keys_sort_numerically() {
    let left: BTreeMap<u32, &'static str> = [(1, "a"), (2, "b"), (10, "c")].into();
    let right: BTreeMap<u32, &'static str> = [(1, "a"), (2, "x"), (10, "c")].into();
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              BTreeMap<u32, &str>{
                1: "a",
            -   2: "b",
            +   2: "x",
                10: "c",
              }"#}
    );
}

/// A mapping that can be absent, the way a nullable map would be.
struct Table(Option<BTreeMap<String, i32>>);

impl Reflect for Table {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Table")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        match &self.0 {
            Some(map) => Def::Mapping(
                map.iter()
                    .map(|(k, v)| (Peek::new(k), Peek::new(v)))
                    .collect(),
            ),
            None => Def::Mapping(PeekMapping::nil()),
        }
    }
}

#[test]
fn nil_versus_present_map() {
    let absent = Table(None);
    let present = Table(Some([("a".to_string(), 1)].into()));
    let text = render(&absent, &present);
    assert_snapshot!(text);
    assert_eq!(render(&Table(None), &Table(None)), "");
}

#[test]
fn references_render_with_an_ampersand() {
    assert_eq!(render(&Box::new(100), &Box::new(200)), "- &100\n+ &200");
    assert_eq!(render(&Arc::new(1_u8), &Arc::new(1_u8)), "");
}

struct Holder {
    value: Option<i32>,
}

reflect_record!(Holder { value });

#[test]
fn options_unwrap_or_show_nil() {
    assert_eq!(
        render(&Holder { value: Some(1) }, &Holder { value: None }),
        indoc! {"
              Holder{
            -   value: 1,
            +   value: Option<i32>(nil),
              }"}
    );
}

#[test]
fn multi_line_text_aligns_lines() {
    let left = "abc\ndef\nghi\njkl".to_string();
    let right = "abc\nghi\njkl\nmno".to_string();
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              String(
                "abc",
            -   "def",
                "ghi",
                "jkl",
            +   "mno",
              )"#}
    );
}

#[test]
fn single_line_text_splits() {
    assert_eq!(
        render(&"abc\ndef".to_string(), &"abd".to_string()),
        indoc! {r#"
            - "abc\ndef"
            + "abd""#}
    );
}

struct Nine {
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    f: u8,
    g: u8,
    h: u8,
    i: u8,
}

reflect_record!(Nine { a, b, c, d, e, f, g, h, i });

#[test]
fn distant_unchanged_fields_collapse() {
    let left = Nine {
        a: 1,
        b: 2,
        c: 3,
        d: 4,
        e: 5,
        f: 6,
        g: 7,
        h: 8,
        i: 9,
    };
    let right = Nine { e: 50, ..left };
    assert_eq!(
        render(&left, &right),
        indoc! {"
              Nine{
            :
                c: 3,
                d: 4,
            -   e: 5,
            +   e: 50,
                f: 6,
                g: 7,
            :
              }"}
    );
}

fn one() -> i32 {
    1
}

fn two() -> i32 {
    2
}

#[test]
fn callables_are_never_equal() {
    let (a, b): (fn() -> i32, fn() -> i32) = (one, two);
    assert_eq!(
        render(&a, &b),
        "- fn() -> i32 { ... }\n+ fn() -> i32 { ... }"
    );
}

#[test]
fn senders_of_different_channels_split() {
    let (a, _ra) = std::sync::mpsc::channel::<i32>();
    let (b, _rb) = std::sync::mpsc::channel::<i32>();
    assert_eq!(render(&a, &b), "- Sender<i32>\n+ Sender<i32>");
    assert_eq!(render(&a, &a), "");
}

#[test]
fn complex_numbers_print_both_parts() {
    use num_complex::Complex;

    assert_eq!(
        render(&Complex::new(1.0_f64, 2.0), &Complex::new(1.0_f64, -2.0)),
        "- 1.0+2.0i\n+ 1.0-2.0i"
    );
    assert_eq!(
        render(&vec![Complex::new(0.5_f32, 0.0)], &vec![Complex::new(0.5_f32, 0.0)]),
        ""
    );
}

fn map(key: &str, value: i32) -> BTreeMap<String, i32> {
    [(key.to_string(), value)].into()
}

#[test]
fn disjoint_maps_in_a_sequence_stay_apart() {
    let left = vec![map("a", 1), map("b", 2)];
    let right = vec![map("c", 3), map("a", 1)];
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              Vec<BTreeMap<String, i32>>{
            +   BTreeMap<String, i32>{
            +     "c": 3,
            +   },
                BTreeMap<String, i32>{
                  "a": 1,
                },
            -   BTreeMap<String, i32>{
            -     "b": 2,
            -   },
              }"#}
    );
}

#[test]
fn similar_records_in_a_sequence_pair_up() {
    let left = vec![
        S {
            a: 1,
            b: "x".into(),
        },
        S {
            a: 2,
            b: "y".into(),
        },
    ];
    let right = vec![
        S {
            a: 1,
            b: "x".into(),
        },
        S {
            a: 2,
            b: "z".into(),
        },
    ];
    assert_eq!(
        render(&left, &right),
        indoc! {r#"
              Vec<S>{
            :
                S{
                  a: 2,
            -     b: "y",
            +     b: "z",
                },
              }"#}
    );
}
