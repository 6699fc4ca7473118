// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Formatting helpers shared by the renderers.

use std::fmt::Write as _;

/// Display form of the null pointer.
pub(crate) const NULL_POINTER: &str = "null";

/// Six-decimal fixed form, or the shortest general form when the fixed
/// form would read as zero.
pub(crate) fn c_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let fixed = format!("{:.6}", value);
    if fixed == "0.000000" || fixed == "-0.000000" {
        general(value)
    } else {
        fixed
    }
}

/// Six significant digits, trailing zeros removed, exponent form outside
/// `1e-4..1e6`.
fn general(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    if (-4..6).contains(&exponent) {
        let decimals = (5 - exponent).max(0) as usize;
        return trim_fraction(format!("{:.*}", decimals, value));
    }

    let scientific = format!("{:.5e}", value);
    let (mantissa, exp) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    format!(
        "{}e{}{:02}",
        trim_fraction(mantissa.to_string()),
        if exp < 0 { '-' } else { '+' },
        exp.abs()
    )
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Escape non-printable bytes (except CR and LF) and `%` as `%XX`.
pub(crate) fn escape_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &byte in data {
        let printable = (32..=126).contains(&byte) || byte == b'\n' || byte == b'\r';
        if !printable || byte == b'%' {
            let _ = write!(out, "%{:02X}", byte);
        } else {
            out.push(byte as char);
        }
    }
    out
}

/// Percent-escape a value for `key=value` output.
///
/// Non-printables and the characters `` %`()\&"<>+ `` and space are encoded.
pub(crate) fn percent_escape(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &byte in data {
        let reserved = matches!(
            byte,
            b'%' | b'`' | b'(' | b')' | b'\\' | b'&' | b'"' | b'<' | b'>' | b'+' | b' '
        );
        if !(32..=126).contains(&byte) || reserved {
            let _ = write!(out, "%{:02X}", byte);
        } else {
            out.push(byte as char);
        }
    }
    out
}

/// Prefix every line of `text` with `columns` spaces.
///
/// A trailing newline is kept but does not start a new indented line.
pub(crate) fn indent_text(text: &str, columns: usize) -> String {
    let pad = " ".repeat(columns);
    let mut out = String::with_capacity(text.len() + columns * 4);
    out.push_str(&pad);
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        if pos + 1 == rest.len() {
            break;
        }
        out.push_str(&rest[..=pos]);
        out.push_str(&pad);
        rest = &rest[pos + 1..];
    }
    out.push_str(rest);
    out
}

/// JSON string literal, quotes included.
pub(crate) fn json_quote(text: &str) -> String {
    serde_json::Value::String(text.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_double() {
        assert_eq!(c_double(1.5), "1.500000");
        assert_eq!(c_double(-2.0), "-2.000000");
        assert_eq!(c_double(0.0), "0");
        assert_eq!(c_double(1e-7), "1e-07");
        assert_eq!(c_double(-3.5e-9), "-3.5e-09");
        assert_eq!(c_double(f64::NAN), "nan");
    }

    #[test]
    fn test_escape_bytes_keeps_newlines() {
        assert_eq!(escape_bytes(b"a\r\nb"), "a\r\nb");
        assert_eq!(escape_bytes(&[0x00, 0x7f, b'%']), "%00%7F%25");
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(percent_escape(b"a b+c"), "a%20b%2Bc");
        assert_eq!(percent_escape(b"x\ny"), "x%0Ay");
        assert_eq!(percent_escape(b"plain"), "plain");
    }

    #[test]
    fn test_indent_text() {
        assert_eq!(indent_text("a\nb", 2), "  a\n  b");
        assert_eq!(indent_text("a\n", 2), "  a\n");
        assert_eq!(indent_text("", 3), "   ");
    }

    #[test]
    fn test_json_quote() {
        assert_eq!(json_quote("a\"b"), r#""a\"b""#);
        assert_eq!(json_quote("line\n"), r#""line\n""#);
    }
}
