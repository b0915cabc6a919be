//! Parse tokens: the flat records produced by the token parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The connective joining a token to its preceding sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// One `Type(args)` record from a line of notation.
///
/// A token declares an `id` when other tokens hang off it, or carries a
/// scalar `value` when it is a leaf. It never carries both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseToken {
    /// Type tag with its first letter capitalized (`Buy`, `Item`, `Name`).
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Option<String>,
    pub parent: Option<String>,
    pub value: Option<String>,
    pub logic: Option<LogicOp>,
    pub negated: bool,
}

impl ParseToken {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    /// Case-insensitive comparison of the token type against `name`.
    pub fn is_type(&self, name: &str) -> bool {
        self.kind.eq_ignore_ascii_case(name)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_or(&self) -> bool {
        self.logic == Some(LogicOp::Or)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_logic(mut self, logic: LogicOp) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }
}

fn field_or_null<T: fmt::Display>(field: &Option<T>) -> String {
    match field {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

impl fmt::Display for ParseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ Type: {}, ID: {}, Parent: {}, Value: {}, Logic Operation: {}, Negated: {} }}",
            self.kind,
            field_or_null(&self.id),
            field_or_null(&self.parent),
            field_or_null(&self.value),
            field_or_null(&self.logic),
            self.negated
        )
    }
}
