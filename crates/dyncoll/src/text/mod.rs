// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Textual renderers and parsers for both containers.
//!
//! Lists and vectors share one rendering path: each is walked as a
//! sequence of [`Row`]s, so the string dump, the flat byte dump and the XML
//! form come out identical in shape for either container.

pub(crate) mod format;
mod json;
mod string;
mod xml;

pub use xml::xml_to_list;

use crate::list::List;
use crate::value::Value;
use crate::vector::Vector;

/// One entry as the renderers see it.
pub(crate) struct Row<'a> {
    /// Node identity shown in the string dump.
    address: String,
    /// `None` for entries of a keyless vector.
    key: Option<&'a Value>,
    value: &'a Value,
}

impl Row<'_> {
    fn key_text(&self) -> String {
        self.key.map_or_else(
            || format::NULL_POINTER.to_string(),
            Value::to_display_string,
        )
    }
}

pub(crate) fn list_rows(list: &List) -> impl Iterator<Item = Row<'_>> {
    list.iter().map(|node| Row {
        address: node.id().to_string(),
        key: Some(node.key()),
        value: node.value(),
    })
}

pub(crate) fn vector_rows(vector: &Vector) -> impl Iterator<Item = Row<'_>> {
    vector.iter().map(|entry| Row {
        address: entry.index().to_string(),
        key: entry.key(),
        value: entry.value(),
    })
}
