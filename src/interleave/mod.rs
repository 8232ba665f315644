// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interleaving: reflow a group from structure-major to alignment-key-major order and back.
//!
//! Structure-major layout (as authored):
//!
//! ```text
//! group ── S1 ── heading, line a, line b
//!       └─ S2 ── heading, line a, line b
//! ```
//!
//! Key-major layout (interleaved):
//!
//! ```text
//! group ── [a] ── cell(S1) ── heading, line a
//!       │      └─ cell(S2) ── heading, line a
//!       └─ [b] ── cell(S1) ── line b
//!              └─ cell(S2) ── line b
//! ```
//!
//! Cells carry a copy of their structure's tags and attributes so per-structure styling
//! keeps working. Lines and annotations are moved, never cloned. Wrappers and cells are
//! created once at setup and reused by every later toggle.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::Markers;
use crate::model::{
    lines_of, AlignmentKey, Document, DocumentError, GroupOutline, NodeId, StructureIndex,
    TokenError,
};

/// A problem found while preparing a group for interleaving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupIssue {
    /// A line after the first structure has no alignment key. `line` is 0-based among the
    /// structure's lines.
    MissingKey { structure: StructureIndex, line: usize },
    InvalidKey { structure: StructureIndex, line: usize, value: String, reason: TokenError },
    DuplicateKey { structure: StructureIndex, key: AlignmentKey },
    /// A key the first structure does not define.
    UnknownKey { structure: StructureIndex, key: AlignmentKey },
    /// The group's nodes could not be read or extended while preparing the layout.
    Document(DocumentError),
}

impl fmt::Display for SetupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { structure, line } => {
                write!(f, "structure {structure}: line {line} has no alignment key")
            }
            Self::InvalidKey { structure, line, value, reason } => write!(
                f,
                "structure {structure}: line {line} has invalid alignment key '{value}': {reason}"
            ),
            Self::DuplicateKey { structure, key } => {
                write!(f, "structure {structure}: alignment key '{key}' is used more than once")
            }
            Self::UnknownKey { structure, key } => write!(
                f,
                "structure {structure}: alignment key '{key}' is not defined by the first structure"
            ),
            Self::Document(err) => write!(f, "{err}"),
        }
    }
}

/// Every issue found for one group, reported as a single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterleaveSetupError {
    group_root: NodeId,
    issues: Vec<SetupIssue>,
}

impl InterleaveSetupError {
    pub fn group_root(&self) -> NodeId {
        self.group_root
    }

    pub fn issues(&self) -> &[SetupIssue] {
        &self.issues
    }
}

impl fmt::Display for InterleaveSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot interleave group {}: ", self.group_root)?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InterleaveSetupError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterleaveError {
    Document(DocumentError),
}

impl fmt::Display for InterleaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(err) => write!(f, "cannot move group content: {err}"),
        }
    }
}

impl std::error::Error for InterleaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
        }
    }
}

impl From<DocumentError> for InterleaveError {
    fn from(err: DocumentError) -> Self {
        Self::Document(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StructureLayout {
    node: NodeId,
    /// Child order as authored; restored verbatim by `uninterleave`.
    children: Vec<NodeId>,
    annotations: Vec<NodeId>,
    /// Line per key position, `None` where the structure skips a key.
    units: Vec<Option<NodeId>>,
    /// Cell per key position, present exactly where `units` is.
    cells: Vec<Option<NodeId>>,
}

impl StructureLayout {
    fn first_present_key(&self) -> Option<usize> {
        self.units.iter().position(Option::is_some)
    }
}

/// Precomputed two-way mapping between the structure-major and key-major layouts of a
/// group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interleaver {
    root: NodeId,
    keys: Vec<AlignmentKey>,
    structures: Vec<StructureLayout>,
    wrappers: Vec<NodeId>,
    /// Children of the group root as they were before interleaving.
    root_children: Vec<NodeId>,
    interleaved: bool,
}

/// Whether a group can be interleaved at all: it needs a structure whose first member has
/// at least two lines.
pub fn is_eligible(document: &Document, outline: &GroupOutline, markers: &Markers) -> bool {
    outline
        .structures()
        .first()
        .is_some_and(|first| lines_of(document, *first, markers).len() >= 2)
}

impl Interleaver {
    /// Validates the group and precomputes both layouts.
    ///
    /// Returns `Ok(None)` when the group is not eligible, and every validation issue at
    /// once when it is eligible but malformed.
    pub fn setup(
        document: &mut Document,
        outline: &GroupOutline,
        markers: &Markers,
    ) -> Result<Option<Self>, InterleaveSetupError> {
        if !is_eligible(document, outline, markers) {
            return Ok(None);
        }

        let mut issues = Vec::new();
        let mut keys = Vec::<AlignmentKey>::new();
        let mut key_positions = BTreeMap::<AlignmentKey, usize>::new();
        let mut keyed_lines = Vec::<Vec<(AlignmentKey, NodeId)>>::new();

        for (position, structure) in outline.structures().iter().enumerate() {
            let structure_index = StructureIndex::new(position);
            let is_first = position == 0;
            let mut seen = BTreeSet::<AlignmentKey>::new();
            let mut lines = Vec::new();

            let structure_lines = lines_of(document, *structure, markers);
            for (line_position, line) in structure_lines.into_iter().enumerate() {
                let raw = document
                    .attribute(line, &markers.alignment_attribute)
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty());
                let key = match raw {
                    Some(raw) => match AlignmentKey::new(raw) {
                        Ok(key) => key,
                        Err(reason) => {
                            issues.push(SetupIssue::InvalidKey {
                                structure: structure_index,
                                line: line_position,
                                value: raw.to_owned(),
                                reason,
                            });
                            continue;
                        }
                    },
                    None if is_first => match AlignmentKey::new((line_position + 1).to_string()) {
                        Ok(key) => key,
                        Err(_) => continue,
                    },
                    None => {
                        issues.push(SetupIssue::MissingKey {
                            structure: structure_index,
                            line: line_position,
                        });
                        continue;
                    }
                };

                if !seen.insert(key.clone()) {
                    issues.push(SetupIssue::DuplicateKey { structure: structure_index, key });
                    continue;
                }
                if is_first {
                    key_positions.insert(key.clone(), keys.len());
                    keys.push(key.clone());
                } else if !key_positions.contains_key(&key) {
                    issues.push(SetupIssue::UnknownKey { structure: structure_index, key });
                    continue;
                }
                lines.push((key, line));
            }
            keyed_lines.push(lines);
        }

        if !issues.is_empty() {
            let err = InterleaveSetupError { group_root: outline.root(), issues };
            tracing::warn!(
                group_root = %outline.root(),
                diagnostic = %err,
                "interleaving disabled"
            );
            return Err(err);
        }

        let mut structures = Vec::with_capacity(outline.structures().len());
        for (structure, lines) in outline.structures().iter().zip(keyed_lines) {
            let mut units = vec![None; keys.len()];
            for (key, line) in &lines {
                if let Some(position) = key_positions.get(key) {
                    units[*position] = Some(*line);
                }
            }
            let line_nodes = lines.iter().map(|(_, line)| *line).collect::<BTreeSet<_>>();
            let children = document.children(*structure).to_vec();
            let annotations = children
                .iter()
                .copied()
                .filter(|child| !line_nodes.contains(child))
                .collect();
            let cells = units
                .iter()
                .map(|unit| unit.map(|_| create_cell(document, *structure)).transpose())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| InterleaveSetupError::document(outline.root(), err))?;
            structures.push(StructureLayout {
                node: *structure,
                children,
                annotations,
                units,
                cells,
            });
        }

        let mut wrappers = Vec::with_capacity(keys.len());
        for key in &keys {
            let wrapper = document.create_element([markers.interleaved_line_tag.clone()]);
            document
                .set_attribute(wrapper, markers.alignment_attribute.clone(), key.as_str())
                .map_err(|err| InterleaveSetupError::document(outline.root(), err))?;
            wrappers.push(wrapper);
        }

        tracing::debug!(
            group_root = %outline.root(),
            keys = keys.len(),
            structures = structures.len(),
            "interleaving available"
        );

        Ok(Some(Self {
            root: outline.root(),
            keys,
            structures,
            wrappers,
            root_children: Vec::new(),
            interleaved: false,
        }))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn keys(&self) -> &[AlignmentKey] {
        &self.keys
    }

    /// Key-major wrappers, one per key in first-structure order.
    pub fn wrappers(&self) -> &[NodeId] {
        &self.wrappers
    }

    pub fn is_interleaved(&self) -> bool {
        self.interleaved
    }

    /// Switches to the requested layout. Returns whether anything moved.
    pub fn set_interleaved(
        &mut self,
        document: &mut Document,
        interleaved: bool,
    ) -> Result<bool, InterleaveError> {
        if interleaved {
            self.interleave(document)
        } else {
            self.uninterleave(document)
        }
    }

    /// Structure-major → key-major. No-op when already interleaved.
    pub fn interleave(&mut self, document: &mut Document) -> Result<bool, InterleaveError> {
        if self.interleaved {
            return Ok(false);
        }

        self.root_children = document.children(self.root).to_vec();
        let insert_at = self
            .root_children
            .iter()
            .position(|child| self.structures.iter().any(|s| s.node == *child))
            .unwrap_or(self.root_children.len());

        for structure in &self.structures {
            document.detach(structure.node)?;
        }
        for (offset, wrapper) in self.wrappers.iter().enumerate() {
            document.insert_child(self.root, insert_at + offset, *wrapper)?;
        }

        for (key_position, wrapper) in self.wrappers.iter().enumerate() {
            for structure in &self.structures {
                let (Some(unit), Some(cell)) =
                    (structure.units[key_position], structure.cells[key_position])
                else {
                    continue;
                };
                document.append_child(*wrapper, cell)?;
                if structure.first_present_key() == Some(key_position) {
                    for annotation in &structure.annotations {
                        document.append_child(cell, *annotation)?;
                    }
                }
                document.append_child(cell, unit)?;
            }
        }

        self.interleaved = true;
        tracing::debug!(group_root = %self.root, keys = self.keys.len(), "interleaved group");
        Ok(true)
    }

    /// Key-major → structure-major, restoring the authored child order exactly. No-op when
    /// not interleaved.
    pub fn uninterleave(&mut self, document: &mut Document) -> Result<bool, InterleaveError> {
        if !self.interleaved {
            return Ok(false);
        }

        for structure in &self.structures {
            for child in &structure.children {
                document.append_child(structure.node, *child)?;
            }
        }
        for wrapper in &self.wrappers {
            document.detach(*wrapper)?;
        }
        for child in &self.root_children {
            document.append_child(self.root, *child)?;
        }

        self.interleaved = false;
        tracing::debug!(group_root = %self.root, "uninterleaved group");
        Ok(true)
    }
}

impl InterleaveSetupError {
    fn document(group_root: NodeId, err: DocumentError) -> Self {
        Self { group_root, issues: vec![SetupIssue::Document(err)] }
    }
}

/// Creates a detached cell copying the tags and attributes of `structure`.
fn create_cell(document: &mut Document, structure: NodeId) -> Result<NodeId, DocumentError> {
    let node = document.node(structure)?;
    let tags = node.tags().to_vec();
    let attributes = node.attributes().clone();
    let cell = document.create_element(tags);
    for (name, value) in attributes {
        document.set_attribute(cell, name, value)?;
    }
    Ok(cell)
}

#[cfg(test)]
mod tests;
