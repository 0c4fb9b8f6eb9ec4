//! Lexical coercion of `key=value` argument strings.
//!
//! ```rust
//! use vparse::{ArgValue, coerce_arguments};
//!
//! let args = coerce_arguments("hotel_id=123, city='Paris'");
//! assert_eq!(args.get("hotel_id"), Some(&ArgValue::Int(123)));
//! assert_eq!(args.get("city"), Some(&ArgValue::Text("Paris".to_string())));
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;

pub type ArgMap = BTreeMap<String, ArgValue>;

// Quoted alternatives come first so a quoted value may contain commas.
static ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*("[^"]*"|'[^']*'|[^,]+)"#)
        .expect("argument pattern compiles")
});

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Display for ArgValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Best-effort coercion of the text between an invocation's parentheses.
/// Fragments that do not fit the `key=value` grammar are skipped; a key
/// appearing twice keeps its last value. Never fails.
pub fn coerce_arguments(raw: &str) -> ArgMap {
    let mut args = ArgMap::new();

    for caps in ARG_RE.captures_iter(raw) {
        let key = caps[1].to_string();
        let value = classify(strip_quotes(caps[2].trim()));
        args.insert(key, value);
    }

    args
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    value
}

fn classify(value: &str) -> ArgValue {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(parsed) = value.parse::<i64>() {
            return ArgValue::Int(parsed);
        }
    }

    let dots = value.bytes().filter(|b| *b == b'.').count();
    if dots <= 1
        && value.bytes().any(|b| b.is_ascii_digit())
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        if let Ok(parsed) = value.parse::<f64>() {
            return ArgValue::Float(parsed);
        }
    }

    if value.eq_ignore_ascii_case("true") {
        return ArgValue::Bool(true);
    }

    if value.eq_ignore_ascii_case("false") {
        return ArgValue::Bool(false);
    }

    ArgValue::Text(value.to_string())
}
