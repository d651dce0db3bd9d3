use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// `{{name}}` or `{{group.name}}`. Anything deeper does not match and stays literal.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)?)\}\}").expect("placeholder pattern is valid")
});

/// Most segments a placeholder path may have.
pub const MAX_SEGMENTS: usize = 2;

/// A parsed placeholder identifier, e.g. `contact.email` → `["contact", "email"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> PlaceholderPath<'a> {
    /// Split a dotted identifier into segments.
    /// Returns `None` for empty segments, non-word characters, or more than
    /// `MAX_SEGMENTS` segments.
    pub fn parse(identifier: &'a str) -> Option<Self> {
        let segments: Vec<&str> = identifier.split('.').collect();
        if segments.len() > MAX_SEGMENTS {
            return None;
        }
        let valid = segments
            .iter()
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
        if !valid {
            return None;
        }
        Some(PlaceholderPath { segments })
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Walk the path from `data`. Objects are keyed by name, arrays by
    /// canonical index or `length`, strings by `length` or character index.
    /// Stops at the first missing step or `null`.
    pub fn resolve<'v>(&self, data: &'v Value) -> Option<Cow<'v, Value>> {
        let mut current = Cow::Borrowed(data);
        for segment in &self.segments {
            current = match current {
                Cow::Borrowed(value) => step(value, segment)?,
                Cow::Owned(value) => Cow::Owned(step(&value, segment)?.into_owned()),
            };
            if current.is_null() {
                return None;
            }
        }
        Some(current)
    }
}

fn step<'v>(value: &'v Value, segment: &str) -> Option<Cow<'v, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) => match segment {
            "length" => Some(Cow::Owned(Value::from(items.len()))),
            _ => items.get(array_index(segment)?).map(Cow::Borrowed),
        },
        Value::String(s) => match segment {
            "length" => Some(Cow::Owned(Value::from(s.encode_utf16().count()))),
            _ => {
                // Indexes count UTF-16 units; half a surrogate pair is not
                // representable as a Rust string, so it stays absent.
                let unit = *s.encode_utf16().collect::<Vec<_>>().get(array_index(segment)?)?;
                let ch = char::from_u32(u32::from(unit))?;
                Some(Cow::Owned(Value::String(ch.to_string())))
            }
        },
        _ => None,
    }
}

/// Only canonical decimal indexes: `0`, `12`, never `01`.
fn array_index(segment: &str) -> Option<usize> {
    let index: usize = segment.parse().ok()?;
    (index.to_string() == segment).then_some(index)
}

/// Replace every `{{path}}` in `source` with the value found in `data`.
/// Unresolved placeholders are left in the output unchanged.
pub fn render_template(source: &str, data: &Value) -> String {
    PLACEHOLDER
        .replace_all(source, |caps: &Captures| {
            let resolved = PlaceholderPath::parse(&caps[1]).and_then(|path| path.resolve(data));
            match resolved {
                Some(value) => display_value(&value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// String form of a JSON value the way a browser script would coerce it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        // Outside [1e-6, 1e21) scripts switch to exponent form: 1e-7, 1.5e+21
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => {
            let formatted = format!("{:e}", f);
            match formatted.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
                _ => formatted,
            }
        }
        // 3.0 prints as "3"
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
