// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::Markers;

use super::document::Document;
use super::ids::{NodeId, StructureIndex};

/// The group/structure skeleton of one group, as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutline {
    root: NodeId,
    structures: Vec<NodeId>,
}

impl GroupOutline {
    /// Reads the structures of the group rooted at `root`: its direct children carrying a
    /// structure tag, in child order.
    pub fn read(document: &Document, root: NodeId, markers: &Markers) -> Self {
        let structures = document
            .children(root)
            .iter()
            .copied()
            .filter(|child| is_structure(document, *child, markers))
            .collect();
        Self { root, structures }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn structures(&self) -> &[NodeId] {
        &self.structures
    }

    pub fn structure(&self, index: StructureIndex) -> Option<NodeId> {
        self.structures.get(index.index()).copied()
    }

    pub fn structure_index_of(&self, node: NodeId) -> Option<StructureIndex> {
        self.structures.iter().position(|s| *s == node).map(StructureIndex::new)
    }
}

/// Finds group roots in document order. Groups nested inside another group are part of
/// the outer group and are not reported separately.
pub fn discover_groups(document: &Document, markers: &Markers) -> Vec<NodeId> {
    let mut groups = Vec::new();
    let mut stack = vec![document.root()];
    while let Some(id) = stack.pop() {
        if is_group(document, id, markers) {
            groups.push(id);
            continue;
        }
        stack.extend(document.children(id).iter().rev().copied());
    }
    groups
}

pub fn is_group(document: &Document, id: NodeId, markers: &Markers) -> bool {
    document
        .node(id)
        .is_ok_and(|node| node.tags().iter().any(|tag| markers.is_group_tag(tag)))
}

pub fn is_structure(document: &Document, id: NodeId, markers: &Markers) -> bool {
    document
        .node(id)
        .is_ok_and(|node| node.tags().iter().any(|tag| markers.is_structure_tag(tag)))
}

/// Alignment units of a structure: its direct children carrying the line tag.
pub fn lines_of(document: &Document, structure: NodeId, markers: &Markers) -> Vec<NodeId> {
    document
        .children(structure)
        .iter()
        .copied()
        .filter(|child| document.has_tag(*child, &markers.line_tag))
        .collect()
}
