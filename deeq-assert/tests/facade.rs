//! What a test host sees through `Reporter`.

use std::collections::BTreeMap;

use deeq_assert::{Deeq, Reporter, Sameness, check, check_with};
use deeq_core::reflect_record;
use indoc::indoc;
use insta::assert_snapshot;

/// Keeps every message, the way a test framework collects failures.
#[derive(Default)]
struct Recorder {
    messages: Vec<String>,
}

impl Reporter for Recorder {
    fn error(&mut self, message: String) {
        self.messages.push(message);
    }
}

impl Recorder {
    fn only(&self) -> &str {
        match self.messages.as_slice() {
            [message] => message,
            other => panic!("expected exactly one report, got {other:?}"),
        }
    }
}

fn recorder() -> Recorder {
    deeq_testhelpers::setup();
    Recorder::default()
}

#[test]
fn equal_values_report_nothing() {
    let mut t = recorder();
    let deeq = Deeq::new();
    assert!(deeq.equal(&mut t, &vec![1, 2, 3], &vec![1, 2, 3]));
    let nan = vec![f64::NAN];
    assert!(deeq.equal(&mut t, &nan, &nan));
    assert!(t.messages.is_empty());
}

#[test]
fn composite_failures_carry_a_diff() {
    let mut t = recorder();
    assert!(!Deeq::new().equal(&mut t, &vec![1, 2, 3], &vec![1, 2, 4]));
    assert_eq!(
        t.only(),
        indoc! {"
            not equal
            differences:
            --- expected
            +++ actual
              Vec<i32>{
                1,
                2,
            -   3,
            +   4,
              }"}
    );
}

#[test]
fn scalars_and_type_mismatches_stay_on_one_line() {
    let deeq = Deeq::new();
    let mut t = recorder();
    assert!(!deeq.equal(&mut t, &1_i32, &2_i32));
    assert!(!deeq.equal(&mut t, &1_i32, &1_i64));
    assert!(!deeq.equal(&mut t, &"abc".to_string(), &"abd".to_string()));
    assert!(!deeq.equal(&mut t, &Some(1), &None::<i32>));
    assert_eq!(
        t.messages,
        [
            "expected 1, got 2",
            "expected 1, got 1",
            r#"expected "abc", got "abd""#,
            "expected 1, got Option<i32>(nil)",
        ]
    );
}

#[test]
fn long_texts_get_a_diff() {
    let mut t = recorder();
    let (a, b) = ("hello world!".to_string(), "hello there!".to_string());
    assert!(!Deeq::new().equal(&mut t, &a, &b));
    assert_eq!(
        t.only(),
        "not equal\ndifferences:\n--- expected\n+++ actual\n- \"hello world!\"\n+ \"hello there!\""
    );
}

struct Account {
    owner: String,
    balances: BTreeMap<String, i64>,
}

reflect_record!(Account { owner, balances });

#[test]
fn record_failure_report() {
    let mut t = recorder();
    let expected = Account {
        owner: "ann".into(),
        balances: [("eur".to_string(), 10), ("usd".to_string(), 5)].into(),
    };
    let actual = Account {
        owner: "ann".into(),
        balances: [("eur".to_string(), 10), ("gbp".to_string(), 5)].into(),
    };
    assert!(!Deeq::new().equal(&mut t, &expected, &actual));
    assert_snapshot!(t.only());
}

#[test]
fn formats_shape_one_line_reports() {
    let mut deeq = Deeq::new();
    deeq.add_format(|v: &i32| format!("#{v}"));
    let mut t = recorder();
    assert!(!deeq.equal(&mut t, &5, &6));
    assert_eq!(t.only(), r##"expected i32("#5"), got i32("#6")"##);
}

#[test]
fn not_equal_reports_equal_values() {
    let deeq = Deeq::new();
    let mut t = recorder();
    assert!(deeq.not_equal(&mut t, &1, &2));
    assert!(t.messages.is_empty());
    assert!(!deeq.not_equal(&mut t, &vec!["a"], &vec!["a"]));
    assert_eq!(t.only(), "values are structurally equal");
}

#[test]
fn not_equal_explains_rule_made_equality() {
    let mut deeq = Deeq::new();
    deeq.add_transform(|s: &String| s.to_lowercase());
    let mut t = recorder();
    assert!(!deeq.not_equal(&mut t, &"A".to_string(), &"a".to_string()));
    assert_eq!(
        t.only(),
        "expected \"A\" != \"a\"\nthe values differ structurally; custom rules made them equal"
    );
}

#[test]
fn panics_in_rules_are_reported() {
    let mut deeq = Deeq::new();
    deeq.add_transform(|_: &u16| -> u16 { panic!("bad transform") });
    let mut t = recorder();
    assert!(!deeq.equal(&mut t, &1_u16, &2_u16));
    assert_eq!(t.only(), "panic in deeq: bad transform");
    assert_eq!(
        check_with(&deeq, &1_u16, &2_u16),
        Sameness::Failed("panic in deeq: bad transform".into())
    );
}

#[test]
fn depth_limit_is_reported() {
    let deeq = Deeq::new().max_depth(2);
    let mut t = recorder();
    let deep = vec![vec![vec![vec![0]]]];
    assert!(!deeq.equal(&mut t, &deep, &deep.clone()));
    assert_eq!(t.only(), "maximum depth exceeded: went deeper than 2 levels");
}

#[test]
fn colors_are_opt_in() {
    let mut t = recorder();
    let colored = Deeq::new().with_colors(true);
    assert!(!colored.equal(&mut t, &vec![1], &vec![2]));
    assert!(!Deeq::new().equal(&mut t, &vec![1], &vec![2]));
    let [first, second] = t.messages.as_slice() else {
        panic!("expected two reports");
    };
    assert!(!second.contains('\x1b'));
    if std::env::var_os("NO_COLOR").is_none() {
        assert!(first.contains('\x1b'), "{first}");
    } else {
        assert_eq!(first, second);
    }
}

#[test]
fn check_mirrors_equal() {
    deeq_testhelpers::setup();
    assert_eq!(check(&(1, "x"), &(1, "x")), Sameness::Same);
    let Sameness::Different(report) = check(&(1, "x"), &(2, "x")) else {
        panic!("tuples differ");
    };
    assert!(report.starts_with("not equal\n"), "{report}");
}
