// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use super::document::Document;

pub(crate) fn word(ids: &str, text: &str) -> Value {
    json!({ "tags": ["word"], "attributes": { "data-corrid": ids, "data-category": "word" }, "text": text })
}

pub(crate) fn line(key: Option<&str>, words: Vec<Value>) -> Value {
    match key {
        Some(key) => json!({ "tags": ["line"], "attributes": { "data-line": key }, "children": words }),
        None => json!({ "tags": ["line"], "children": words }),
    }
}

pub(crate) fn block(lang: &str, heading: &str, lines: Vec<Value>) -> Value {
    let mut children = vec![json!({ "tags": ["heading"], "text": heading })];
    children.extend(lines);
    json!({ "tags": ["block", lang], "attributes": { "lang": lang }, "children": children })
}

/// Two translations of "The cat. The cat sleeps." plus an unrelated structure group that
/// reuses the same identity tokens.
///
/// Indexed items of the translation, in order:
/// `0:"1"` `1:"2"` `2:"2"` `3:"3"` (en) and `4:"1"` `5:"2"` `6:"4"` `7:"2,3"` (fr).
pub(crate) fn parallel_translation() -> Document {
    Document::from_json_value(json!({
        "tags": ["page"],
        "children": [
            {
                "tags": ["translation"],
                "children": [
                    block("en", "English", vec![
                        line(Some("a"), vec![word("1", "The"), word("2", "cat")]),
                        line(Some("b"), vec![word("2", "cat"), word("3", "sleeps")]),
                    ]),
                    block("fr", "Français", vec![
                        line(Some("a"), vec![word("1", "Le"), word("2", "chat"), word(" ", "!")]),
                        line(Some("b"), vec![word("4", "Il"), word("2,3", "dort")]),
                    ]),
                ]
            },
            {
                "tags": ["structure-group"],
                "children": [
                    block("left", "Left", vec![line(None, vec![word("1", "x"), word("1", "y")])]),
                    block("right", "Right", vec![line(None, vec![word("1", "z")])]),
                ]
            }
        ]
    }))
    .expect("fixture document")
}
