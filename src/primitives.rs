//! Value primitives shared by both evaluators and the rule-set builder.
//!
//! Comparisons here implement the loose, coercive semantics form inputs need:
//! a submitted `"1"` must match a declared `1`, and `null`, `""`, `0` and `"0"`
//! all read as empty.

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

static NUMERIC_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
        .unwrap()
});

static INTEGER_STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?[0-9]+[ \t\n\r\x0B\x0C]*$").unwrap());

// ─── Declarations ───────────────────────────────────────────────────────────

/// Splits a dependency declaration into `(field, property)`.
///
/// `"category.slug"` gives `("category", "slug")`. Without a dot the property
/// is the field itself. Segments past the second are ignored.
pub fn split_declaration(declaration: &str) -> (String, String) {
    let mut parts = declaration.split('.');
    let field = parts.next().unwrap_or_default().to_string();
    let property = match parts.next() {
        Some(p) => p.to_string(),
        None => field.clone(),
    };
    (field, property)
}

/// Splits a pipe-delimited rule string (`"required|max:255"`) into its rules.
/// Blank segments are dropped.
pub fn split_rule_string(rules: &str) -> Vec<String> {
    rules
        .split('|')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Truthiness ─────────────────────────────────────────────────────────────

/// Boolean reading of a value: null, false, zero, `""`, `"0"` and empty
/// collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Emptiness test used by display-mode Empty/NotEmpty.
pub fn is_empty_value(value: &Value) -> bool {
    !is_truthy(value)
}

fn is_integer_zero(n: &Number) -> bool {
    (n.is_i64() || n.is_u64()) && n.as_i64() == Some(0)
}

/// Strict membership in `{null, 0, "0"}`. Floats, `false`, `""` and empty
/// collections are not members.
pub fn is_null_or_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => is_integer_zero(n),
        Value::String(s) => s == "0",
        _ => false,
    }
}

/// Strict membership in `{null, 0, "0", ""}`, the request-mode variant.
pub fn is_null_zero_or_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty() || s == "0",
        other => is_null_or_zero(other),
    }
}

// ─── Loose comparison ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn from_number(n: &Number) -> Option<Numeric> {
        if let Some(i) = n.as_i64() {
            Some(Numeric::Int(i))
        } else {
            n.as_f64().map(Numeric::Float)
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    fn equals(self, other: Numeric) -> bool {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// Parses a numeric string. Leading and trailing whitespace is allowed;
/// leading-numeric strings such as `"12abc"` are not numeric.
fn parse_numeric_string(s: &str) -> Option<Numeric> {
    if !NUMERIC_STRING_RE.is_match(s) {
        return None;
    }
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B');
    if INTEGER_STRING_RE.is_match(s)
        && let Ok(i) = trimmed.parse::<i64>()
    {
        return Some(Numeric::Int(i));
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// Returns true when `s` is a numeric string.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

/// Loose (coercive) equality between two values.
///
/// - booleans compare against the other side's truthiness;
/// - null equals `""` and any falsy value;
/// - numbers and numeric strings compare numerically;
/// - two non-numeric strings compare byte-wise;
/// - arrays and objects compare element-wise with loose equality;
/// - a collection never equals a scalar other than null or a boolean.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == is_truthy(other),
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        (Value::Number(x), Value::Number(y)) => match (Numeric::from_number(x), Numeric::from_number(y)) {
            (Some(x), Some(y)) => x.equals(y),
            _ => false,
        },
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (Numeric::from_number(n), parse_numeric_string(s)) {
                (Some(x), Some(y)) => x.equals(y),
                _ => false,
            }
        }
        (Value::String(x), Value::String(y)) => {
            match (parse_numeric_string(x), parse_numeric_string(y)) {
                (Some(nx), Some(ny)) => nx.equals(ny),
                _ => x == y,
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| loose_equals(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| loose_equals(v, other)))
        }
        (Value::Array(x), Value::Object(y)) | (Value::Object(y), Value::Array(x)) => {
            x.is_empty() && y.is_empty()
        }
        _ => false,
    }
}

/// Loose membership: true when any item loosely equals `value`.
pub fn loose_contains(items: &[Value], value: &Value) -> bool {
    items.iter().any(|item| loose_equals(value, item))
}

// ─── String form ────────────────────────────────────────────────────────────

/// String form of a scalar, used for relation type suffix matching.
///
/// Null and false are `""`, true is `"1"`, integral floats drop the
/// fraction. Arrays and objects have no string form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(n) => match Numeric::from_number(n)? {
            Numeric::Int(i) => Some(i.to_string()),
            Numeric::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
            Numeric::Float(f) => Some(f.to_string()),
        },
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// True when a relation type tag such as `App\Models\Post` names the class `expected`.
pub fn type_tag_matches(type_tag: &Value, expected: &Value) -> bool {
    if type_tag.is_null() {
        return false;
    }
    match (scalar_to_string(type_tag), scalar_to_string(expected)) {
        (Some(tag), Some(name)) => tag.ends_with(&format!("\\{}", name)),
        _ => false,
    }
}
