// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON rendering, and parsing via `serde_json`.

use serde_json::{Map, Number, Value as Json};

use super::format::{indent_text, json_quote, NULL_POINTER};
use crate::config::NESTED_INDENT;
use crate::error::{Error, Result};
use crate::list::List;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::vector::Vector;

/// JSON text of a non-container value.
fn scalar_json(value: &Value) -> String {
    match value {
        Value::String(text) | Value::StringCi(text) => json_quote(text),
        Value::Bytes(data) => json_quote(&String::from_utf8_lossy(data)),
        Value::Null => NULL_POINTER.to_string(),
        Value::Custom(custom) => json_quote(&custom.to_display_string()),
        other => other.to_display_string(),
    }
}

/// Nested container JSON, or `None` for anything inline.
fn nested_json(value: &Value) -> Option<String> {
    match value {
        Value::List(list) => Some(list.to_json()),
        Value::Vector(vector) => Some(vector.to_json()),
        _ => None,
    }
}

impl List {
    /// Render as a JSON object, one member per node in list order.
    ///
    /// Keys use their display text. A later duplicate key is still emitted.
    pub fn to_json(&self) -> String {
        let members: Vec<String> = self
            .iter()
            .map(|node| {
                let key = json_quote(&node.key().to_display_string());
                match nested_json(node.value()) {
                    Some(nested) => {
                        // `  {` becomes `: {` so the member reads `"key": {`.
                        let mut indented = indent_text(&nested, NESTED_INDENT);
                        indented.replace_range(..1, ":");
                        format!("  {}{}", key, indented)
                    }
                    None => format!("  {}: {}", key, scalar_json(node.value())),
                }
            })
            .collect();
        format!("{{\n{}\n}}", members.join(",\n"))
    }

    /// Parse a JSON object into a string-keyed list.
    ///
    /// Strings become bytes, integers `i64` (or `u64` past `i64::MAX`),
    /// other numbers doubles, `null` the null pointer, objects nested lists
    /// and arrays nested vectors.
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str(text)? {
            Json::Object(members) => object_to_list(members),
            other => Err(not_a("object", &other)),
        }
    }
}

impl Vector {
    /// Render as a JSON array over populated entries; keys are dropped.
    pub fn to_json(&self) -> String {
        let items: Vec<String> = self
            .iter()
            .map(|entry| match nested_json(entry.value()) {
                Some(nested) => indent_text(&nested, NESTED_INDENT),
                None => format!("  {}", scalar_json(entry.value())),
            })
            .collect();
        format!("[\n{}\n]", items.join(",\n"))
    }

    /// Parse a JSON array into a vector with string key type and no keys.
    ///
    /// Inline scalars must all share one type; strings, containers and
    /// `null` may mix.
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str(text)? {
            Json::Array(items) => array_to_vector(items),
            other => Err(not_a("array", &other)),
        }
    }
}

fn not_a(expected: &str, found: &Json) -> Error {
    let found = match found {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    };
    log::warn!("[json] expected a top-level {}, found {}", expected, found);
    Error::Malformed {
        format: "json",
        reason: format!("expected {}, found {}", expected, found),
    }
}

/// How JSON strings are stored.
#[derive(Clone, Copy)]
enum Strings {
    Bytes,
    Text,
}

fn object_to_list(members: Map<String, Json>) -> Result<List> {
    let mut list = List::new(TypeDescriptor::STRING);
    for (key, value) in members {
        list.add_back(key, from_json_value(value, Strings::Bytes)?)?;
    }
    Ok(list)
}

fn array_to_vector(items: Vec<Json>) -> Result<Vector> {
    let mut vector = Vector::with_key_type(TypeDescriptor::STRING);
    for item in items {
        vector.add_entry(from_json_value(item, Strings::Text)?)?;
    }
    Ok(vector)
}

fn from_json_value(value: Json, strings: Strings) -> Result<Value> {
    Ok(match value {
        Json::Null => Value::Null,
        Json::Bool(flag) => Value::Bool(flag),
        Json::Number(number) => from_number(&number)?,
        Json::String(text) => match strings {
            Strings::Bytes => Value::from(text.into_bytes()),
            Strings::Text => Value::from(text),
        },
        Json::Array(items) => Value::from(array_to_vector(items)?),
        Json::Object(members) => Value::from(object_to_list(members)?),
    })
}

fn from_number(number: &Number) -> Result<Value> {
    if let Some(int) = number.as_i64() {
        Ok(Value::I64(int))
    } else if let Some(int) = number.as_u64() {
        Ok(Value::U64(int))
    } else if let Some(float) = number.as_f64() {
        Ok(Value::Double(float))
    } else {
        Err(Error::Malformed {
            format: "json",
            reason: format!("unrepresentable number {}", number),
        })
    }
}
