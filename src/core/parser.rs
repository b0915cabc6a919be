//! Token parser: one line of notation into a flat list of `ParseToken`s.
//!
//! Grammar: `[-]Type(arg1[,arg2]) [,|; [-]Type(...)]*`
//! - `,` joins a token to its predecessor with AND, `;` with OR
//! - a leading `-` negates the token
//! - `Type(id)` declares a root that owns children through `id`
//! - `Type(parent, id)` declares a nested parent node
//! - `Type(parent, "value")` is a leaf carrying a scalar value

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::schema::token::{LogicOp, ParseToken};

/// The single "could not parse" signal. `fragment` is the unparsed
/// remainder of the line at the point of failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error in \"{fragment}\": {reason}. Could not parse.")]
pub struct ParseError {
    pub fragment: String,
    pub reason: String,
}

impl ParseError {
    fn new(fragment: &str, reason: impl Into<String>) -> Self {
        Self {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

/// Scans lines of notation. Declared ids are tracked per call, so one
/// parser can be reused line after line.
#[derive(Debug, Default)]
pub struct TokenParser {
    declared: FxHashSet<String>,
}

impl TokenParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line. A failure discards every token built so far.
    pub fn parse(&mut self, line: &str) -> Result<Vec<ParseToken>, ParseError> {
        self.declared.clear();

        let mut tokens = Vec::new();
        let mut rest = line.trim();

        while !rest.is_empty() {
            let mut token = ParseToken::default();
            rest = read_prefix(rest, &mut token);

            let open = rest
                .find('(')
                .ok_or_else(|| ParseError::new(rest, "missing '(' to open the argument list"))?;
            let name = rest[..open].trim();
            if name.is_empty() {
                return Err(ParseError::new(rest, "missing token type before '('"));
            }
            token.kind = capitalize(name);
            rest = rest[open + 1..].trim();

            let close = rest
                .find(')')
                .ok_or_else(|| ParseError::new(rest, "missing ')' to close the argument list"))?;
            let args: Vec<&str> = rest[..close].split(',').map(str::trim).collect();
            self.read_args(&mut token, &args)
                .map_err(|reason| ParseError::new(rest, reason))?;

            tokens.push(token);
            rest = rest[close + 1..].trim();
        }

        Ok(tokens)
    }

    fn read_args(&mut self, token: &mut ParseToken, args: &[&str]) -> Result<(), String> {
        match args {
            [id] => {
                if !is_identifier(id) {
                    return Err(format!("'{}' is not a lowercase id", id));
                }
                self.declare(id)?;
                token.id = Some(id.to_string());
            }
            [parent, second] => {
                if !is_identifier(parent) || !self.declared.contains(*parent) {
                    return Err(format!("'{}' is not a declared parent id", parent));
                }
                token.parent = Some(parent.to_string());

                if is_identifier(second) {
                    self.declare(second)?;
                    token.id = Some(second.to_string());
                } else if second.is_empty() {
                    return Err("empty value argument".to_string());
                } else {
                    token.value = Some(second.replace(['"', '\''], "").trim().to_string());
                }
            }
            _ => {
                return Err(format!("expected 1 or 2 arguments, found {}", args.len()));
            }
        }
        Ok(())
    }

    fn declare(&mut self, id: &str) -> Result<(), String> {
        if !self.declared.insert(id.to_string()) {
            return Err(format!("id '{}' is already declared", id));
        }
        Ok(())
    }
}

/// Convenience wrapper for a one-off parse.
pub fn parse_tokens(line: &str) -> Result<Vec<ParseToken>, ParseError> {
    TokenParser::new().parse(line)
}

/// Consume an optional connective and an optional negation marker.
fn read_prefix<'a>(input: &'a str, token: &mut ParseToken) -> &'a str {
    let mut rest = input;

    let logic = match rest.as_bytes().first() {
        Some(b',') => Some(LogicOp::And),
        Some(b';') => Some(LogicOp::Or),
        _ => None,
    };
    if let Some(logic) = logic {
        token.logic = Some(logic);
        rest = rest[1..].trim_start_matches([' ', '\t']);
    }

    if let Some(stripped) = rest.strip_prefix('-') {
        token.negated = true;
        rest = stripped;
    }

    rest.trim()
}

fn is_identifier(arg: &str) -> bool {
    arg.chars().next().is_some_and(char::is_lowercase)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(parse_tokens("").unwrap().is_empty());
        assert!(parse_tokens("   \t ").unwrap().is_empty());
    }

    #[test]
    fn root_declares_id() {
        let tokens = parse_tokens("buy(a)").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, "Buy");
        assert_eq!(tokens[0].id.as_deref(), Some("a"));
        assert!(tokens[0].parent.is_none());
        assert!(tokens[0].logic.is_none());
    }

    #[test]
    fn leaf_value_strips_quotes() {
        let tokens = parse_tokens(r#"Buy(a), Name(a, " Sword ")"#).unwrap();
        assert_eq!(tokens[1].parent.as_deref(), Some("a"));
        assert_eq!(tokens[1].value.as_deref(), Some("Sword"));
        assert!(tokens[1].id.is_none());

        let tokens = parse_tokens("Buy(a), Quantity(a,'2')").unwrap();
        assert_eq!(tokens[1].value.as_deref(), Some("2"));
    }

    #[test]
    fn nested_parent_declares_new_id() {
        let tokens = parse_tokens("Buy(a), Item(a,b), Name(b,\"Sword\")").unwrap();
        assert_eq!(tokens[1].parent.as_deref(), Some("a"));
        assert_eq!(tokens[1].id.as_deref(), Some("b"));
        assert_eq!(tokens[2].parent.as_deref(), Some("b"));
    }

    #[test]
    fn connectives_and_negation() {
        let tokens =
            parse_tokens("Buy(a), Object(a,o); -Object(a,p),\t  -Object(a,q) -Object(a,r)").unwrap();
        assert_eq!(tokens[1].logic, Some(LogicOp::And));
        assert!(!tokens[1].negated);
        assert_eq!(tokens[2].logic, Some(LogicOp::Or));
        assert!(tokens[2].negated);
        assert_eq!(tokens[3].logic, Some(LogicOp::And));
        assert!(tokens[3].negated);
        assert_eq!(tokens[4].logic, None);
        assert!(tokens[4].negated);
    }

    #[test]
    fn missing_open_paren_names_fragment() {
        let err = parse_tokens("Buy(a), Item").unwrap_err();
        assert_eq!(err.fragment, "Item");
        assert!(err.to_string().contains("\"Item\""));
    }

    #[test]
    fn missing_close_paren_names_fragment() {
        let err = parse_tokens("Item(x").unwrap_err();
        assert_eq!(err.fragment, "x");
    }

    #[test]
    fn argument_count_is_checked() {
        assert!(parse_tokens("Buy(a), Name(a,b,c)").is_err());
        assert!(parse_tokens("Buy()").is_err());
    }

    #[test]
    fn ids_must_be_lowercase_and_unique() {
        assert!(parse_tokens("Buy(A)").is_err());
        assert!(parse_tokens("Buy(a), Sell(a)").is_err());
        assert!(parse_tokens("Buy(a), Item(a,a)").is_err());
    }

    #[test]
    fn parent_must_be_declared_first() {
        let err = parse_tokens("Item(b,c)").unwrap_err();
        assert!(err.reason.contains("'b'"));
        assert!(parse_tokens("Buy(a), Name(\"a\",\"x\")").is_err());
    }

    #[test]
    fn ids_are_scoped_to_one_call() {
        let mut parser = TokenParser::new();
        assert!(parser.parse("Buy(a)").is_ok());
        assert!(parser.parse("Sell(a)").is_ok());
        assert!(parser.parse("Buy(a), Buy(a)").is_err());
        assert!(parser.parse("Buy(a)").is_ok());
    }
}
