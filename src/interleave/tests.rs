// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use super::{is_eligible, Interleaver, SetupIssue};
use crate::config::Markers;
use crate::model::fixtures::{block, line, parallel_translation, word};
use crate::model::{discover_groups, lines_of, Document, GroupOutline, NodeId, StructureIndex};

fn group(document: &Document) -> GroupOutline {
    let markers = Markers::default();
    let root = discover_groups(document, &markers)[0];
    GroupOutline::read(document, root, &markers)
}

fn translation(blocks: Vec<Value>) -> Document {
    Document::from_json_value(json!({ "tags": ["translation"], "children": blocks }))
        .expect("document")
}

fn setup(document: &mut Document) -> Interleaver {
    let outline = group(document);
    Interleaver::setup(document, &outline, &Markers::default())
        .expect("valid layout")
        .expect("eligible layout")
}

fn setup_issues(document: &mut Document) -> Vec<SetupIssue> {
    let outline = group(document);
    Interleaver::setup(document, &outline, &Markers::default())
        .expect_err("invalid layout")
        .issues()
        .to_vec()
}

/// `(key, [cell texts])` for every wrapper currently below the group root.
fn key_major(document: &Document, root: NodeId) -> Vec<(String, Vec<String>)> {
    document
        .children(root)
        .iter()
        .filter(|child| document.has_tag(**child, "interleaved-line"))
        .map(|wrapper| {
            let key = document.attribute(*wrapper, "data-line").unwrap_or_default().to_owned();
            let cells = document
                .children(*wrapper)
                .iter()
                .map(|cell| document.text_content(*cell))
                .collect();
            (key, cells)
        })
        .collect()
}

#[test]
fn interleave_groups_lines_by_key() {
    let mut document = translation(vec![
        block("en", "EN", vec![
            line(Some("a"), vec![word("1", "a1")]),
            line(Some("b"), vec![word("2", "b1")]),
        ]),
        block("fr", "FR", vec![
            line(Some("a"), vec![word("1", "a2")]),
            line(Some("b"), vec![word("2", "b2")]),
        ]),
    ]);
    let root = document.root();
    let mut interleaver = setup(&mut document);

    assert!(interleaver.interleave(&mut document).expect("interleave"));

    assert_eq!(
        key_major(&document, root),
        vec![
            ("a".to_owned(), vec!["ENa1".to_owned(), "FRa2".to_owned()]),
            ("b".to_owned(), vec!["b1".to_owned(), "b2".to_owned()]),
        ]
    );
    let first_cell = document.children(interleaver.wrappers()[0])[0];
    assert!(document.has_tag(first_cell, "block"));
    assert!(document.has_tag(first_cell, "en"));
    assert_eq!(document.attribute(first_cell, "lang"), Some("en"));

    assert!(interleaver.uninterleave(&mut document).expect("uninterleave"));

    let outline = group(&document);
    let texts = outline
        .structures()
        .iter()
        .map(|s| document.text_content(*s))
        .collect::<Vec<_>>();
    assert_eq!(texts, ["ENa1b1", "FRa2b2"]);
}

#[test]
fn round_trip_restores_the_authored_tree_on_every_toggle() {
    let mut document = parallel_translation();
    let outline = group(&document);
    let before = document.to_spec(document.root()).expect("spec");
    let markers = Markers::default();
    let lines_before = outline
        .structures()
        .iter()
        .map(|s| lines_of(&document, *s, &markers))
        .collect::<Vec<_>>();
    let mut interleaver = setup(&mut document);

    for _ in 0..3 {
        interleaver.set_interleaved(&mut document, true).expect("interleave");
        assert_ne!(document.to_spec(document.root()).expect("spec"), before);
        interleaver.set_interleaved(&mut document, false).expect("uninterleave");
        assert_eq!(document.to_spec(document.root()).expect("spec"), before);
    }

    let lines_after = outline
        .structures()
        .iter()
        .map(|s| lines_of(&document, *s, &markers))
        .collect::<Vec<_>>();
    assert_eq!(lines_after, lines_before);
}

#[test]
fn toggling_to_the_current_layout_is_a_no_op() {
    let mut document = parallel_translation();
    let mut interleaver = setup(&mut document);

    assert!(!interleaver.uninterleave(&mut document).expect("uninterleave"));
    assert!(interleaver.set_interleaved(&mut document, true).expect("interleave"));
    let interleaved = document.clone();
    assert!(!interleaver.set_interleaved(&mut document, true).expect("interleave again"));
    assert_eq!(document, interleaved);
    assert!(interleaver.is_interleaved());
}

#[test]
fn lines_are_moved_not_cloned() {
    let mut document = parallel_translation();
    let outline = group(&document);
    let markers = Markers::default();
    let first_line = lines_of(&document, outline.structures()[0], &markers)[0];
    let nodes_before = document.len();
    let mut interleaver = setup(&mut document);
    let nodes_after_setup = document.len();

    interleaver.interleave(&mut document).expect("interleave");

    assert_eq!(document.len(), nodes_after_setup);
    assert!(nodes_after_setup > nodes_before);
    let cell = document.parent(first_line).expect("cell");
    assert_eq!(document.parent(cell), Some(interleaver.wrappers()[0]));
}

#[test]
fn annotations_appear_once_in_the_first_present_key() {
    let mut document = translation(vec![
        block("en", "EN", vec![
            line(Some("a"), vec![word("1", "a1")]),
            line(Some("b"), vec![word("2", "b1")]),
        ]),
        block("fr", "FR", vec![line(Some("b"), vec![word("2", "b2")])]),
    ]);
    let root = document.root();
    let mut interleaver = setup(&mut document);

    interleaver.interleave(&mut document).expect("interleave");

    assert_eq!(
        key_major(&document, root),
        vec![
            ("a".to_owned(), vec!["ENa1".to_owned()]),
            ("b".to_owned(), vec!["b1".to_owned(), "FRb2".to_owned()]),
        ]
    );
}

#[test]
fn first_structure_lines_without_keys_use_their_position() {
    let mut document = translation(vec![
        block("en", "EN", vec![line(None, vec![]), line(None, vec![])]),
        block("fr", "FR", vec![line(Some("2"), vec![])]),
    ]);
    let interleaver = setup(&mut document);

    let keys = interleaver.keys().iter().map(|k| k.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, ["1", "2"]);
}

#[test]
fn validation_collects_every_issue() {
    let mut document = translation(vec![
        block("en", "EN", vec![line(Some("a"), vec![]), line(Some("b"), vec![])]),
        block("fr", "FR", vec![
            line(None, vec![]),
            line(Some("a"), vec![]),
            line(Some("a"), vec![]),
            line(Some("z"), vec![]),
        ]),
    ]);
    let before = document.clone();

    let issues = setup_issues(&mut document);

    let second = StructureIndex::new(1);
    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0], SetupIssue::MissingKey { structure: second, line: 0 });
    assert!(matches!(&issues[1], SetupIssue::DuplicateKey { structure, key }
        if *structure == second && key.as_str() == "a"));
    assert!(matches!(&issues[2], SetupIssue::UnknownKey { structure, key }
        if *structure == second && key.as_str() == "z"));
    assert_eq!(document, before);
}

#[test]
fn duplicate_key_in_first_structure_is_rejected() {
    let mut document = translation(vec![
        block("en", "EN", vec![line(Some("a"), vec![]), line(Some("a"), vec![])]),
    ]);

    let issues = setup_issues(&mut document);

    assert!(matches!(&issues[..], [SetupIssue::DuplicateKey { key, .. }] if key.as_str() == "a"));
}

#[test]
fn setup_error_reads_as_one_diagnostic() {
    let mut document = translation(vec![
        block("en", "EN", vec![line(Some("a"), vec![]), line(Some("b"), vec![])]),
        block("fr", "FR", vec![line(None, vec![]), line(Some("q"), vec![])]),
    ]);
    let outline = group(&document);

    let err = Interleaver::setup(&mut document, &outline, &Markers::default()).unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "cannot interleave group {}: structure 1: line 0 has no alignment key; \
             structure 1: alignment key 'q' is not defined by the first structure",
            document.root()
        )
    );
}

#[test]
fn groups_without_two_lines_in_the_first_structure_are_not_eligible() {
    let markers = Markers::default();
    for document in [
        translation(vec![]),
        translation(vec![block("en", "EN", vec![line(Some("a"), vec![])])]),
        translation(vec![
            block("en", "EN", vec![line(Some("a"), vec![])]),
            block("fr", "FR", vec![line(Some("a"), vec![]), line(Some("b"), vec![])]),
        ]),
    ] {
        let mut document = document;
        let outline = group(&document);
        assert!(!is_eligible(&document, &outline, &markers));
        let setup = Interleaver::setup(&mut document, &outline, &markers).expect("no errors");
        assert!(setup.is_none());
    }
}
