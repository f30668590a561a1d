//! [`Value`] → JavaScript literal source.
//!
//! The output re-parses to an equal value: floats keep a `.` or exponent,
//! `undefined` stays `undefined`, and keys that are not plain identifiers are
//! quoted. Compact output separates items with `", "`; pretty output puts each
//! container item on its own line but keeps all-primitive arrays inline.

use crate::value::Value;
use std::fmt;

/// Compact single-line literal source.
pub fn to_source(value: &Value) -> String {
    let mut out = String::new();
    write_compact(value, &mut out);
    out
}

/// Multi-line literal source indented by `indent` spaces per level.
pub fn to_source_pretty(value: &Value, indent: usize) -> String {
    let mut out = String::new();
    write_pretty(value, indent, 0, &mut out);
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_source(self))
    }
}

fn write_compact(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(key, out);
                out.push_str(": ");
                write_compact(item, out);
            }
            out.push('}');
        }
        primitive => write_primitive(primitive, out),
    }
}

fn write_pretty(value: &Value, indent: usize, depth: usize, out: &mut String) {
    match value {
        Value::Array(items) if items.is_empty() || items.iter().all(is_primitive) => {
            write_compact(value, out);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                out.push_str(&make_indent(indent, depth + 1));
                write_pretty(item, indent, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&make_indent(indent, depth));
            out.push(']');
        }
        Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                out.push_str(&make_indent(indent, depth + 1));
                write_key(key, out);
                out.push_str(": ");
                write_pretty(item, indent, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&make_indent(indent, depth));
            out.push('}');
        }
        primitive => write_primitive(primitive, out),
    }
}

fn write_primitive(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Undefined => out.push_str("undefined"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_quoted(s, out),
        Value::Array(_) | Value::Object(_) => write_compact(value, out),
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn make_indent(indent: usize, depth: usize) -> String {
    " ".repeat(indent * depth)
}

/// Keys that lex as identifiers or keywords go out bare; everything else is
/// quoted.
fn write_key(key: &str, out: &mut String) {
    if is_identifier_name(key) {
        out.push_str(key);
    } else {
        write_quoted(key, out);
    }
}

fn is_identifier_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Double-quoted string with the escapes the lexer understands.
pub(crate) fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
