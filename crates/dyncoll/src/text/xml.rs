// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML rendering and the lenient request/response scanner.

use super::format::indent_text;
use super::{list_rows, vector_rows, Row};
use crate::config::NESTED_INDENT;
use crate::list::List;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::vector::Vector;

/// Tag used for entries that have no key.
const KEYLESS_TAG: &str = "item";

fn render<'a>(rows: impl Iterator<Item = Row<'a>>, element: &str, indent: bool) -> String {
    let newline = if indent { "\n" } else { "" };
    let mut out = format!("<{}>{}", element, newline);
    for row in rows {
        let tag = match row.key {
            Some(key) => key.to_display_string(),
            None => KEYLESS_TAG.to_string(),
        };
        if indent {
            out.push_str("  ");
        }
        out.push('<');
        out.push_str(&tag);
        out.push('>');
        out.push_str(&element_body(row.value, &tag, indent));
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
        out.push_str(newline);
    }
    out.push_str("</");
    out.push_str(element);
    out.push('>');
    out
}

fn element_body(value: &Value, tag: &str, indent: bool) -> String {
    let nested = match value {
        Value::String(text) | Value::StringCi(text) => return text.to_string(),
        Value::Bytes(data) => return String::from_utf8_lossy(data).into_owned(),
        Value::Null => return String::new(),
        Value::List(list) => list.to_xml(&format!("{}{}", tag, TypeDescriptor::LIST.name()), indent),
        Value::Vector(vector) => {
            vector.to_xml(&format!("{}{}", tag, TypeDescriptor::VECTOR.name()), indent)
        }
        other => return other.to_display_string(),
    };
    if indent {
        format!("\n{}\n", indent_text(&nested, NESTED_INDENT))
    } else {
        nested
    }
}

impl List {
    /// Render as `<element><key>value</key>...</element>`.
    ///
    /// Nested containers become child elements named after their key and
    /// type (`<k><kList>...</kList></k>`). String and bytes values are
    /// inserted verbatim, without escaping.
    pub fn to_xml(&self, element: &str, indent: bool) -> String {
        render(list_rows(self), element, indent)
    }
}

impl Vector {
    /// Same shape as [`List::to_xml`], over populated entries. Keyless
    /// entries use an `item` tag.
    pub fn to_xml(&self, element: &str, indent: bool) -> String {
        render(vector_rows(self), element, indent)
    }
}

fn find_byte(text: &str, from: usize, byte: u8) -> Option<usize> {
    text.as_bytes()
        .get(from..)?
        .iter()
        .position(|&b| b == byte)
        .map(|pos| from + pos)
}

/// Offset of the `<` that opens the first field, skipping the wrapper.
fn first_field(text: &str) -> Option<usize> {
    let anchor = text
        .find("Request")
        .or_else(|| text.find("Response"))
        .or_else(|| text.find('>').map(|gt| gt.saturating_sub(1)))?;
    let gt = find_byte(text, anchor, b'>')?;
    find_byte(text, gt, b'<')
}

/// Scan flat or lightly nested XML into a string-keyed list.
///
/// This is a heuristic scanner, not an XML parser. It skips the outer
/// element (preferring one whose name contains `Request` or `Response`) and
/// turns each child element into an entry. Element text that itself looks
/// like markup becomes a nested list; anything else is stored as bytes.
/// Attributes are ignored and entities are not decoded. A self-closing
/// `<name/>` is stored under the key `name/` with an empty value.
///
/// Returns `None` when the input does not start with `<` after leading
/// whitespace.
pub fn xml_to_list(input: &str) -> Option<List> {
    let text = input.trim_start_matches([' ', '\t', '\n']);
    if !text.starts_with('<') {
        log::warn!("[xml] input does not start with an element");
        return None;
    }

    let bytes = text.as_bytes();
    let mut list = List::new(TypeDescriptor::STRING);
    let mut cursor = first_field(text);

    while let Some(open) = cursor {
        if bytes.get(open + 1) == Some(&b'/') {
            break;
        }
        let name_start = open + 1;
        let line_end = find_byte(text, open, b'\n').unwrap_or(text.len());
        let gt = find_byte(text, name_start, b'>');
        let tag_end = match (find_byte(text, name_start, b' '), gt) {
            (Some(space), Some(gt)) if gt < space => Some(gt),
            (Some(space), _) if space <= line_end => Some(space),
            _ => gt,
        };
        let Some(tag_end) = tag_end else {
            log::debug!("[xml] unterminated tag at offset {}", open);
            cursor = find_byte(text, name_start, b'<');
            continue;
        };

        let closes_tag = bytes[tag_end] == b'>';
        let self_closing = closes_tag && tag_end > name_start && bytes[tag_end - 1] == b'/';
        let value_start = if self_closing {
            None
        } else if closes_tag {
            Some(tag_end + 1)
        } else {
            find_byte(text, name_start + 1, b'>').map(|gt| gt + 1)
        };

        // `<name/>` keeps its slash in the key.
        let key = &text[name_start..tag_end];
        let close_tag = format!("</{}", key);
        let value_end = value_start
            .and_then(|start| text.get(start..)?.find(&close_tag).map(|pos| start + pos));
        let value = match (value_start, value_end) {
            (Some(start), Some(end)) => &text[start..end],
            _ => "",
        };

        let looks_nested = match (value.find('<'), value.rfind('>')) {
            (Some(lt), Some(gt)) => lt < gt,
            _ => false,
        };
        let entry = if looks_nested {
            let wrapped = format!("<{key}>\n{value}</{key}>\n", key = key, value = value);
            xml_to_list(&wrapped).map(Value::from)
        } else {
            Some(Value::bytes(value.as_bytes()))
        };
        if let Some(entry) = entry {
            if let Err(err) = list.add_back(key, entry) {
                log::error!("[xml] could not store element {}: {}", key, err);
            }
        }

        cursor = match value_end {
            Some(end) => find_byte(text, end + 1, b'<'),
            None => find_byte(text, name_start, b'<'),
        };
    }

    log::debug!("[xml] scanned {} elements", list.len());
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_text(list: &List, key: &str) -> Option<Vec<u8>> {
        list.get_forward(&key.into())
            .and_then(|node| node.value().as_bytes())
            .map(<[u8]>::to_vec)
    }

    #[test]
    fn test_flat_elements() {
        let list = xml_to_list("<list><a>1</a><b>2</b></list>").expect("parsed");
        assert_eq!(list.len(), 2);
        let keys: Vec<_> = list.iter().filter_map(|n| n.key().as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(value_text(&list, "a"), Some(b"1".to_vec()));
        assert_eq!(value_text(&list, "b"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_request_wrapper_and_whitespace() {
        let input = "  \n<?xml version=\"1.0\"?>\n<loginRequest>\n  <user>bob</user>\n  <pass>x</pass>\n</loginRequest>\n";
        let list = xml_to_list(input).expect("parsed");
        assert_eq!(list.len(), 2);
        assert_eq!(value_text(&list, "user"), Some(b"bob".to_vec()));
    }

    #[test]
    fn test_nested_markup_becomes_list() {
        let input = "<r><outer><x>1</x><y>2</y></outer><z>3</z></r>";
        let list = xml_to_list(input).expect("parsed");
        assert_eq!(list.len(), 2);
        let outer = list
            .get_forward(&"outer".into())
            .and_then(|node| node.value().as_list())
            .expect("nested list");
        assert_eq!(outer.len(), 2);
        assert_eq!(value_text(outer, "y"), Some(b"2".to_vec()));
        assert_eq!(value_text(&list, "z"), Some(b"3".to_vec()));
    }

    #[test]
    fn test_self_closing_and_attributes() {
        let list = xml_to_list("<r><empty/><a id=\"7\">v</a><gap /></r>").expect("parsed");
        let keys: Vec<_> = list.iter().filter_map(|n| n.key().as_str()).collect();
        assert_eq!(keys, ["empty/", "a", "gap"]);
        assert_eq!(value_text(&list, "empty/"), Some(Vec::new()));
        assert_eq!(value_text(&list, "gap"), Some(Vec::new()));
        assert_eq!(value_text(&list, "a"), Some(b"v".to_vec()));
    }

    #[test]
    fn test_rejects_non_markup() {
        assert!(xml_to_list("plain text").is_none());
        let list = xml_to_list("<r></r>").expect("parsed");
        assert!(list.is_empty());
    }

    #[test]
    fn test_to_xml_shapes() {
        let mut inner = List::new(TypeDescriptor::STRING);
        inner.add_back("x", 1_i32).expect("add");
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("name", "bob").expect("add");
        list.add_back("sub", inner).expect("add");

        assert_eq!(
            list.to_xml("root", false),
            "<root><name>bob</name><sub><subList><x>1</x></subList></sub></root>"
        );
        assert_eq!(
            list.to_xml("root", true),
            "<root>\n  <name>bob</name>\n  <sub>\n  <subList>\n    <x>1</x>\n  </subList>\n</sub>\n</root>"
        );
    }

    #[test]
    fn test_rendered_xml_scans_back() {
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("a", "1").expect("add");
        list.add_back("b", 2_i64).expect("add");
        let back = xml_to_list(&list.to_xml("data", true)).expect("parsed");
        assert_eq!(back.len(), 2);
        assert_eq!(value_text(&back, "b"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_vector_to_xml() {
        let mut vector = Vector::new(TypeDescriptor::U8);
        vector.add_entry(4_u8).expect("add");
        assert_eq!(vector.to_xml("v", false), "<v><item>4</item></v>");
    }
}
