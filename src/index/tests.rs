// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::json;

use super::{ItemIndex, RebuildError};
use crate::config::Markers;
use crate::interleave::Interleaver;
use crate::model::fixtures::{block, line, parallel_translation, word};
use crate::model::{discover_groups, Document, ItemId, StructureIndex};

fn translation_index(document: &Document) -> ItemIndex {
    let markers = Markers::default();
    let groups = discover_groups(document, &markers);
    ItemIndex::build(document, groups[0], &markers)
}

fn texts(document: &Document, index: &ItemIndex, ids: &[ItemId]) -> Vec<String> {
    ids.iter()
        .map(|id| document.text_content(index.item(*id).expect("item").node()))
        .collect()
}

#[test]
fn indexes_items_in_document_order_with_structure_positions() {
    let document = parallel_translation();
    let index = translation_index(&document);

    assert_eq!(index.len(), 8);
    assert_eq!(index.outline().structures().len(), 2);

    let structures = index.items().map(|(_, item)| item.structure().index()).collect::<Vec<_>>();
    assert_eq!(structures, [0, 0, 0, 0, 1, 1, 1, 1]);
    assert_eq!(index.item(ItemId::new(7)).expect("item").identities().len(), 2);
    assert_eq!(index.item(ItemId::new(0)).expect("item").category(), "word");
}

#[test]
fn multi_identity_items_fan_into_every_bucket() {
    let document = parallel_translation();
    let index = translation_index(&document);

    assert_eq!(texts(&document, &index, index.bearers("2")), ["cat", "cat", "chat", "dort"]);
    assert_eq!(texts(&document, &index, index.bearers("3")), ["sleeps", "dort"]);
    assert!(index.bearers("missing").is_empty());
}

#[test]
fn items_without_identities_are_not_indexed() {
    let document = parallel_translation();
    let index = translation_index(&document);

    let unindexed = document
        .descendants(document.root())
        .find(|id| document.text_content(*id) == "!")
        .expect("blank item");
    assert_eq!(index.item_for_node(unindexed), None);
}

#[test]
fn repeated_identity_is_indexed_once_per_occurrence() {
    let document = Document::from_json_value(json!({
        "tags": ["translation"],
        "children": [block("en", "English", vec![line(None, vec![word("5,5", "echo")])])]
    }))
    .expect("document");
    let index = ItemIndex::build(&document, document.root(), &Markers::default());

    assert_eq!(index.bearers("5"), &[ItemId::new(0), ItemId::new(0)]);
}

#[test]
fn category_falls_back_to_configured_default() {
    let document = Document::from_json_value(json!({
        "tags": ["translation"],
        "children": [{ "tags": ["block"], "children": [
            { "attributes": { "data-corrid": "1" } }
        ]}]
    }))
    .expect("document");
    let index = ItemIndex::build(&document, document.root(), &Markers::default());

    assert_eq!(index.item(ItemId::new(0)).expect("item").category(), "item");
    assert_eq!(index.item(ItemId::new(0)).expect("item").structure(), StructureIndex::new(0));
}

#[test]
fn rebuild_replaces_previous_state() {
    let mut document = parallel_translation();
    let markers = Markers::default();
    let root = discover_groups(&document, &markers)[0];
    let mut index = ItemIndex::build(&document, root, &markers);

    let first_word = index.item(ItemId::new(0)).expect("item").node();
    document.set_attribute(first_word, "data-corrid", "9").expect("set attribute");
    index.rebuild(&document, &markers).expect("rebuild");
    index.rebuild(&document, &markers).expect("rebuild again");

    assert_eq!(index.len(), 8);
    assert_eq!(index.bearers("1").len(), 1);
    assert_eq!(index.bearers("9"), &[ItemId::new(0)]);
}

#[test]
fn rebuild_is_rejected_while_interleaved() {
    let mut document = parallel_translation();
    let markers = Markers::default();
    let root = discover_groups(&document, &markers)[0];
    let mut index = ItemIndex::build(&document, root, &markers);
    let mut interleaver = Interleaver::setup(&mut document, index.outline(), &markers)
        .expect("valid group")
        .expect("eligible group");
    interleaver.interleave(&mut document).expect("interleave");

    let err = index.rebuild(&document, &markers).unwrap_err();

    assert_eq!(err, RebuildError::Interleaved { group_root: root });
    assert_eq!(index.len(), 8);

    interleaver.uninterleave(&mut document).expect("uninterleave");
    index.rebuild(&document, &markers).expect("rebuild after restore");
    assert_eq!(index.len(), 8);
}
