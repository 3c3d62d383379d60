//! Value formatting and MySQL escaping.
//!
//! - String literals are single-quoted. An embedded `'` is doubled, which
//!   MySQL reads the same way with or without `NO_BACKSLASH_ESCAPES`; `\0`,
//!   `\n`, `\r`, `\`, `"` and Ctrl-Z are backslash-escaped as
//!   `mysql_real_escape_string` does, so supplied text can never terminate
//!   the literal.
//! - Identifiers are backtick-quoted; an embedded backtick is doubled.
//! - `NULL` is always rendered bare.
//!
//! All writers take the byte offset of the placeholder being rendered so
//! that shape errors point back into the template.

use crate::error::{BuildError, BuildResult};
use crate::value::Value;
use std::fmt::Write as _;

pub(crate) const NULL: &str = "NULL";

/// Append `s` as a single-quoted MySQL string literal.
pub fn write_literal(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("''"),
            '"' => out.push_str("\\\""),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

/// Render `s` as a single-quoted MySQL string literal.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_literal(&mut out, s);
    out
}

/// Append `name` as a backtick-quoted identifier.
///
/// MySQL identifiers cannot contain U+0000, so those are rejected.
pub fn write_ident(out: &mut String, name: &str, offset: usize) -> BuildResult<()> {
    if name.contains('\0') {
        return Err(BuildError::type_mismatch(
            offset,
            "identifier cannot contain NUL character",
        ));
    }
    out.reserve(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push_str("``");
        } else {
            out.push(ch);
        }
    }
    out.push('`');
    Ok(())
}

/// Render `name` as a backtick-quoted identifier.
pub fn quote_ident(name: &str) -> BuildResult<String> {
    let mut out = String::with_capacity(name.len() + 2);
    write_ident(&mut out, name, 0)?;
    Ok(out)
}

/// Integer cast used by `?d`.
///
/// Text keeps its leading numeric prefix (`"12abc"` -> 12, `"abc"` -> 0),
/// floats truncate toward zero and containers become 0 when empty, else 1.
pub(crate) fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null | Value::Skip => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Int(i) => *i,
        // `as` saturates and maps NaN to 0
        Value::Float(f) => *f as i64,
        Value::Text(s) => parse_int_prefix(s),
        Value::Sequence(items) => i64::from(!items.is_empty()),
        Value::Mapping(pairs) => i64::from(!pairs.is_empty()),
    }
}

/// Float cast used by `?f`, analogous to [`to_int`].
pub(crate) fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null | Value::Skip => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Text(s) => parse_float_prefix(s),
        Value::Sequence(items) => f64::from(u8::from(!items.is_empty())),
        Value::Mapping(pairs) => f64::from(u8::from(!pairs.is_empty())),
    }
}

fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    if has_exponent(s) {
        // `as` saturates, so "1e30" becomes i64::MAX.
        return parse_float_prefix(s) as i64;
    }
    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    let mut n: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = i64::from(b - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(digit)
        } else {
            n.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }
    n
}

/// Whether the numeric prefix of `s` carries an exponent, as in `"1e3"` or
/// `"-2.5E+2x"`.
fn has_exponent(s: &str) -> bool {
    float_prefix_len(s).is_some_and(|len| s[..len].contains(['e', 'E']))
}

fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    float_prefix_len(s)
        .and_then(|len| s[..len].parse().ok())
        .unwrap_or(0.0)
}

/// Byte length of the leading float literal in `s`, `None` when there are no
/// mantissa digits.
fn float_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    Some(end)
}

/// Append an integer rendering of `value` (`?d`).
pub(crate) fn write_int(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str(NULL),
        v => {
            let _ = write!(out, "{}", to_int(v));
        }
    }
}

/// Append a decimal float rendering of `value` (`?f`).
pub(crate) fn write_float(out: &mut String, value: &Value, offset: usize) -> BuildResult<()> {
    match value {
        Value::Null => {
            out.push_str(NULL);
            Ok(())
        }
        v => push_finite(out, to_float(v), offset),
    }
}

fn push_finite(out: &mut String, f: f64, offset: usize) -> BuildResult<()> {
    if !f.is_finite() {
        return Err(BuildError::type_mismatch(
            offset,
            format!("cannot render non-finite float {f}"),
        ));
    }
    // `Display` for f64 never uses exponent notation or locale separators.
    let _ = write!(out, "{f}");
    Ok(())
}

/// Append a scalar rendered according to its own kind (`?` and the elements
/// of `?a`).
pub(crate) fn write_scalar(out: &mut String, value: &Value, offset: usize) -> BuildResult<()> {
    match value {
        Value::Null => out.push_str(NULL),
        Value::Bool(b) => out.push(if *b { '1' } else { '0' }),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => push_finite(out, *f, offset)?,
        Value::Text(s) => write_literal(out, s),
        other => {
            return Err(BuildError::type_mismatch(
                offset,
                format!("expected a scalar value, got {}", other.kind()),
            ));
        }
    }
    Ok(())
}

/// Append an array placeholder (`?a`).
///
/// A sequence becomes `v1, v2, ...` (an empty one becomes `NULL`), a mapping
/// becomes `` `k1` = v1, `k2` = v2, ... ``.
pub(crate) fn write_array(out: &mut String, value: &Value, offset: usize) -> BuildResult<()> {
    match value {
        Value::Null => out.push_str(NULL),
        Value::Sequence(items) if items.is_empty() => out.push_str(NULL),
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar(out, item, offset)?;
            }
        }
        Value::Mapping(pairs) if pairs.is_empty() => {
            return Err(BuildError::type_mismatch(
                offset,
                "?a cannot render an empty mapping",
            ));
        }
        Value::Mapping(pairs) => {
            for (i, (key, item)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_ident(out, key, offset)?;
                out.push_str(" = ");
                write_scalar(out, item, offset)?;
            }
        }
        other => {
            return Err(BuildError::type_mismatch(
                offset,
                format!("?a expects a sequence or mapping, got {}", other.kind()),
            ));
        }
    }
    Ok(())
}

/// Append an identifier placeholder (`?#`): one name or a list of names.
pub(crate) fn write_idents(out: &mut String, value: &Value, offset: usize) -> BuildResult<()> {
    match value {
        Value::Null => out.push_str(NULL),
        Value::Text(name) => write_ident(out, name, offset)?,
        Value::Sequence(items) if items.is_empty() => {
            return Err(BuildError::type_mismatch(
                offset,
                "?# cannot render an empty identifier list",
            ));
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match item {
                    Value::Text(name) => write_ident(out, name, offset)?,
                    other => {
                        return Err(BuildError::type_mismatch(
                            offset,
                            format!("?# list items must be text, got {}", other.kind()),
                        ));
                    }
                }
            }
        }
        other => {
            return Err(BuildError::type_mismatch(
                offset,
                format!("?# expects text or a sequence of text, got {}", other.kind()),
            ));
        }
    }
    Ok(())
}
