// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Human-readable dumps and `key=value` strings.

use std::fmt;

use super::format::{indent_text, percent_escape};
use super::{list_rows, vector_rows, Row};
use crate::config::TEXT_VALUE_INDENT;
use crate::error::{Error, Result};
use crate::list::List;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::vector::Vector;

/// Text of `value`, double-quoted when it is a plain string.
fn quoted_if_string(value: &Value) -> String {
    match value {
        Value::String(text) => format!("\"{}\"", text),
        other => other.to_display_string(),
    }
}

fn dump<'a>(len: usize, key_type: &TypeDescriptor, rows: impl Iterator<Item = Row<'a>>) -> String {
    let mut out = format!("{{\n  size={}\n  keyType={}", len, key_type.name());
    for row in rows {
        let key = match row.key {
            Some(key) => quoted_if_string(key),
            None => row.key_text(),
        };
        out.push_str("\n  {\n    address=");
        out.push_str(&row.address);
        out.push_str("\n    valueType=");
        out.push_str(row.value.type_descriptor().name());
        out.push_str("\n    key={\n");
        out.push_str(&indent_text(&key, TEXT_VALUE_INDENT));
        out.push_str("\n    }\n    value={\n");
        out.push_str(&indent_text(&quoted_if_string(row.value), TEXT_VALUE_INDENT));
        out.push_str("\n    }\n  }");
    }
    out.push_str("\n}");
    out
}

fn flat<'a>(len: usize, rows: impl Iterator<Item = Row<'a>>) -> Vec<u8> {
    let mut out = format!("size={}\n{{", len);
    let mut any = false;
    for row in rows {
        any = true;
        out.push_str("\n  {\n    key={\n");
        out.push_str(&indent_text(&row.key_text(), TEXT_VALUE_INDENT));
        out.push_str("\n    }\n    value={\n");
        out.push_str(&indent_text(&row.value.to_display_string(), TEXT_VALUE_INDENT));
        out.push_str("\n    }\n  }");
    }
    if any {
        out.push('\n');
    }
    out.push('}');
    out.into_bytes()
}

/// Raw text for string-like values, display text otherwise.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) | Value::StringCi(text) => text.to_string(),
        Value::Bytes(data) => String::from_utf8_lossy(data).into_owned(),
        other => other.to_display_string(),
    }
}

impl List {
    /// Multi-line dump of the list, its key type and every node.
    pub fn to_display_string(&self) -> String {
        dump(self.len(), self.key_type(), list_rows(self))
    }

    /// Flat `size=N` dump used when a list is embedded as a byte value.
    pub fn to_bytes(&self) -> Vec<u8> {
        flat(self.len(), list_rows(self))
    }

    /// `key=value` pairs joined by `separator`, values percent-escaped.
    ///
    /// Only lists whose keys render directly as text qualify.
    pub fn to_key_value_string(&self, separator: &str) -> Result<String> {
        if !self.key_type().is_string_like() {
            log::warn!(
                "[list] key type {} cannot form key=value pairs",
                self.key_type()
            );
            return Err(Error::UnsupportedType(self.key_type().name().to_string()));
        }
        let pairs: Vec<String> = self
            .iter()
            .map(|node| {
                format!(
                    "{}={}",
                    plain_text(node.key()),
                    percent_escape(plain_text(node.value()).as_bytes())
                )
            })
            .collect();
        Ok(pairs.join(separator))
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl Vector {
    /// Multi-line dump over populated entries; the address is the index.
    pub fn to_display_string(&self) -> String {
        dump(self.len(), self.key_type(), vector_rows(self))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        flat(self.len(), vector_rows(self))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
