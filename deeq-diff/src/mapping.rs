//! Map key labels and their canonical order.

use core::cmp::Ordering;

use deeq_core::{Def, Peek};

use crate::print::{formatted_text, inline, null_text, scalar_text};
use crate::{Result, Rules};

/// A map key reduced to what it prints as and what it sorts by.
#[derive(Debug, Clone)]
pub(crate) struct KeySlot {
    order: KeyOrder,
    label: String,
}

#[derive(Debug, Clone)]
enum KeyOrder {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Other,
}

impl KeyOrder {
    fn of(key: Peek<'_>) -> Self {
        let Some(inner) = key.innermost() else {
            return KeyOrder::Other;
        };
        match inner.def() {
            Def::Text(s) => KeyOrder::Text(s.to_owned()),
            Def::Int(i) => KeyOrder::Int(i),
            Def::Uint(u) => KeyOrder::Uint(u),
            Def::Float(f) => KeyOrder::Float(f.to_f64()),
            Def::Bool(b) => KeyOrder::Bool(b),
            _ => KeyOrder::Other,
        }
    }
}

impl KeySlot {
    pub(crate) fn new(key: Peek<'_>, rules: &Rules) -> Result<Self> {
        Ok(Self {
            order: KeyOrder::of(key),
            label: key_label(key, rules)?,
        })
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Same-kind scalar keys compare by value; anything else, and ties,
    /// fall back to the label.
    pub(crate) fn compare(&self, other: &Self) -> Ordering {
        let by_value = match (&self.order, &other.order) {
            (KeyOrder::Text(a), KeyOrder::Text(b)) => a.cmp(b),
            (KeyOrder::Int(a), KeyOrder::Int(b)) => a.cmp(b),
            (KeyOrder::Uint(a), KeyOrder::Uint(b)) => a.cmp(b),
            (KeyOrder::Float(a), KeyOrder::Float(b)) => a.total_cmp(b),
            (KeyOrder::Bool(a), KeyOrder::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        };
        by_value.then_with(|| self.label.cmp(&other.label))
    }
}

/// What a key prints as before its value.
pub(crate) fn key_label(key: Peek<'_>, rules: &Rules) -> Result<String> {
    if let Some(text) = rules.display_text(key)? {
        return Ok(formatted_text(&key.shape(), &text));
    }
    match key.def() {
        Def::Dynamic(dynamic) => match dynamic.held() {
            Some(held) => key_label(held, rules),
            None => Ok(null_text(&key.shape())),
        },
        def => match scalar_text(&def) {
            Some(text) => Ok(text),
            None => inline(key, rules),
        },
    }
}

/// Map pairs in canonical key order.
pub(crate) fn sorted_entries<'mem>(
    entries: &[(Peek<'mem>, Peek<'mem>)],
    rules: &Rules,
) -> Result<Vec<(KeySlot, Peek<'mem>, Peek<'mem>)>> {
    let mut out = entries
        .iter()
        .map(|&(k, v)| Ok((KeySlot::new(k, rules)?, k, v)))
        .collect::<Result<Vec<_>>>()?;
    out.sort_by(|a, b| a.0.compare(&b.0));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use deeq_core::Reflect;

    use super::*;

    fn slot<T: Reflect>(v: &T, rules: &Rules) -> KeySlot {
        match KeySlot::new(Peek::new(v), rules) {
            Ok(slot) => slot,
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn numbers_sort_by_value_not_text() {
        let rules = Rules::new();
        let (nine, ten) = (9_i32, 10_i32);
        assert_eq!(slot(&nine, &rules).compare(&slot(&ten, &rules)), Ordering::Less);
    }

    #[test]
    fn described_keys_still_sort_by_value() {
        let rules = Rules::new();
        let ms = Duration::from_millis(1);
        let s = Duration::from_secs(1);
        let a = slot(&ms, &rules);
        let b = slot(&s, &rules);
        assert_eq!(a.label(), r#"Duration("1ms")"#);
        assert_eq!(b.label(), r#"Duration("1s")"#);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_fall_back_to_labels() {
        let rules = Rules::new();
        let text: Box<dyn Reflect> = Box::new(String::from("x"));
        let number: Box<dyn Reflect> = Box::new(1_i32);
        let flag: Box<dyn Reflect> = Box::new(true);
        let mut slots = [slot(&flag, &rules), slot(&number, &rules), slot(&text, &rules)];
        slots.sort_by(KeySlot::compare);
        let labels: Vec<_> = slots.iter().map(KeySlot::label).collect();
        assert_eq!(labels, [r#""x""#, "1", "true"]);
    }

    #[test]
    fn nil_dynamic_keys_name_their_type() {
        let rules = Rules::new();
        let none: Option<i32> = None;
        assert_eq!(slot(&none, &rules).label(), "Option<i32>(nil)");
    }
}
