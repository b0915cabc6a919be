//! Shared rendering helpers: list joining and pluralization.

use std::fmt::Display;

/// An element of a comma list: a scalar, or a nested list rendered in
/// place with its own terminator word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Scalar(String),
    Nested(Vec<ListItem>),
}

impl ListItem {
    pub fn scalar(value: impl Display) -> Self {
        Self::Scalar(value.to_string())
    }

    pub fn nested<T: Display>(values: &[T]) -> Self {
        Self::Nested(values.iter().map(Self::scalar).collect())
    }
}

/// Turn OR-groups of AND-joined values into a two-level list.
pub fn groups<T: Display>(groups: &[Vec<T>]) -> Vec<ListItem> {
    groups.iter().map(|group| ListItem::nested(group)).collect()
}

/// Render `items` as "a", "a <terminator> b" or "a, b, <terminator> c".
///
/// Nested lists use `inner[0]` as their terminator and pass the remainder
/// of `inner` further down; once `inner` runs out every deeper level ends
/// with "and".
pub fn comma_list(items: &[ListItem], terminator: &str, inner: &[&str]) -> String {
    let mut out = String::new();
    append_comma_list(&mut out, items, terminator, inner);
    out
}

pub fn append_comma_list(out: &mut String, items: &[ListItem], terminator: &str, inner: &[&str]) {
    let (inner_terminator, deeper) = match inner.split_first() {
        Some((first, rest)) => (*first, rest),
        None => ("and", &[][..]),
    };

    let len = items.len();
    for (i, item) in items.iter().enumerate() {
        match item {
            ListItem::Scalar(value) => out.push_str(value.trim()),
            ListItem::Nested(list) => append_comma_list(out, list, inner_terminator, deeper),
        }

        if len == 2 && i == 0 {
            out.push(' ');
            out.push_str(terminator);
            out.push(' ');
        } else if i + 2 < len {
            out.push_str(", ");
        } else if i + 2 == len {
            out.push_str(", ");
            out.push_str(terminator);
            out.push(' ');
        }
    }
}

/// Join values with a literal delimiter; no special case for two items.
pub fn delimiter_list<T: Display>(items: &[T], delimiter: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string().trim().to_string())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Heuristic English plural: "y" → "ies", "s" → "es", otherwise "s".
pub fn pluralize(word: &str) -> String {
    let Some(last) = word.chars().last() else {
        return String::new();
    };
    match last.to_ascii_lowercase() {
        'y' => format!("{}ies", &word[..word.len() - last.len_utf8()]),
        's' => format!("{}es", word),
        _ => format!("{}s", word),
    }
}
