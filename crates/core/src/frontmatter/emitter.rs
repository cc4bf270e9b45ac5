//! Canonical block-style YAML rendering of frontmatter.
//!
//! Nested mappings and sequences are indented by two spaces under their key,
//! scalars are plain unless they would read back as something else, and lines
//! are never wrapped.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::value::{Metadata, Value};

const INDENT: usize = 2;

// Plain scalars a YAML reader would resolve to a number.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:[0-9][0-9_]*(?:\.[0-9_]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?|[-+]?0x[0-9a-fA-F_]+|[-+]?0o[0-7_]+|[-+]?0b[01_]+|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .unwrap()
});

const RESERVED_WORDS: &[&str] = &[
    "null", "Null", "NULL", "~", "true", "True", "TRUE", "false", "False", "FALSE", "yes",
    "Yes", "YES", "no", "No", "NO", "on", "On", "ON", "off", "Off", "OFF", "y", "Y", "n", "N",
];

/// Render a mapping as YAML text. Every line, including the last, ends with
/// `\n`; an empty mapping renders as an empty string.
pub fn to_yaml(fields: &Metadata) -> String {
    let mut out = String::new();
    write_mapping(&mut out, fields, 0, false);
    out
}

fn write_mapping(out: &mut String, map: &Metadata, indent: usize, inline_first: bool) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str(&scalar_string(key));
        out.push(':');
        match value {
            Value::Mapping(nested) if !nested.is_empty() => {
                out.push('\n');
                write_mapping(out, nested, indent + INDENT, false);
            }
            Value::Sequence(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, indent + INDENT, false);
            }
            _ => {
                out.push(' ');
                out.push_str(&inline(value));
                out.push('\n');
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], indent: usize, inline_first: bool) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str("- ");
        match item {
            Value::Mapping(nested) if !nested.is_empty() => {
                write_mapping(out, nested, indent + INDENT, true);
            }
            Value::Sequence(nested) if !nested.is_empty() => {
                write_sequence(out, nested, indent + INDENT, true);
            }
            _ => {
                out.push_str(&inline(item));
                out.push('\n');
            }
        }
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

/// Single-line rendering for scalars and empty collections.
fn inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => float_string(*f),
        Value::String(s) => scalar_string(s),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
    }
}

fn float_string(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        // Debug keeps a decimal point or exponent, so it reads back as a float.
        format!("{f:?}")
    }
}

/// Characters that cannot appear literally in a plain or single-quoted scalar:
/// C0/C1 controls, Unicode line and paragraph separators, the byte order mark
/// and the noncharacters YAML excludes from its printable set.
fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

fn scalar_string(s: &str) -> String {
    if s.chars().any(needs_escape) {
        double_quoted(s)
    } else if needs_quotes(s) {
        format!("'{}'", s.replace('\'', "''"))
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };

    if first.is_whitespace() || s.ends_with(char::is_whitespace) {
        return true;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) || s.starts_with("...") {
        return true;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return true;
    }
    RESERVED_WORDS.contains(&s) || NUMERIC_RE.is_match(s)
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if needs_escape(c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
