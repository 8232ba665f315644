// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Item index: which items of a group carry which identity.
//!
//! The index owns the items of one group as an arena; everything downstream refers to
//! them by [`ItemId`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::config::Markers;
use crate::model::{Document, GroupOutline, Identity, ItemId, NodeId, StructureIndex};

/// Identity list of one item. Most items carry a single identity.
pub type Identities = SmallVec<[Identity; 2]>;

/// A node that takes part in correspondences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    node: NodeId,
    structure: StructureIndex,
    identities: Identities,
    category: SmolStr,
}

impl Item {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn structure(&self) -> StructureIndex {
        self.structure
    }

    /// Identities in attribute order, duplicates included.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Style category (e.g. `word`) used to prefix state classes.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Set equality of the identity lists, ignoring order and repeats.
    pub fn same_identities(&self, other: &Item) -> bool {
        self.identities.iter().all(|id| other.identities.contains(id))
            && other.identities.iter().all(|id| self.identities.contains(id))
    }

    pub fn shares_identity(&self, other: &Item) -> bool {
        self.identities.iter().any(|id| other.identities.contains(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIndex {
    outline: GroupOutline,
    items: Vec<Item>,
    by_identity: BTreeMap<Identity, Vec<ItemId>>,
    by_node: HashMap<NodeId, ItemId>,
}

impl ItemIndex {
    /// Indexes the group rooted at `root`.
    pub fn build(document: &Document, root: NodeId, markers: &Markers) -> Self {
        let outline = GroupOutline::read(document, root, markers);
        let mut items = Vec::<Item>::new();
        let mut by_identity = BTreeMap::<Identity, Vec<ItemId>>::new();
        let mut by_node = HashMap::<NodeId, ItemId>::new();

        for (position, structure) in outline.structures().iter().enumerate() {
            let structure_index = StructureIndex::new(position);
            for node in document.descendants(*structure) {
                let Some(raw) = document.attribute(node, &markers.identity_attribute) else {
                    continue;
                };
                let identities = Identities::from_vec(Identity::parse_list(raw));
                if identities.is_empty() {
                    continue;
                }

                let category = document
                    .attribute(node, &markers.category_attribute)
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(SmolStr::new)
                    .unwrap_or_else(|| markers.default_category.clone());

                let item_id = ItemId::new(items.len());
                for identity in &identities {
                    by_identity.entry(identity.clone()).or_default().push(item_id);
                }
                by_node.insert(node, item_id);
                items.push(Item {
                    node,
                    structure: structure_index,
                    identities,
                    category,
                });
            }
        }

        tracing::info!(
            group_root = %root,
            structures = outline.structures().len(),
            items = items.len(),
            identities = by_identity.len(),
            "indexed correspondence group"
        );

        Self { outline, items, by_identity, by_node }
    }

    /// Re-reads the same group from `document`, discarding all prior state.
    ///
    /// The group must be in its authored layout; while interleaved its structures are
    /// detached and the call is rejected with the index left untouched.
    pub fn rebuild(&mut self, document: &Document, markers: &Markers) -> Result<(), RebuildError> {
        let root = self.outline.root();
        let interleaved = document
            .children(root)
            .iter()
            .any(|child| document.has_tag(*child, &markers.interleaved_line_tag));
        if interleaved {
            return Err(RebuildError::Interleaved { group_root: root });
        }
        *self = Self::build(document, root, markers);
        Ok(())
    }

    pub fn outline(&self) -> &GroupOutline {
        &self.outline
    }

    pub fn root(&self) -> NodeId {
        self.outline.root()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn items(&self) -> impl ExactSizeIterator<Item = (ItemId, &Item)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (ItemId::new(i), item))
    }

    pub fn item_for_node(&self, node: NodeId) -> Option<ItemId> {
        self.by_node.get(&node).copied()
    }

    /// Items carrying `identity`, in index order. An item appears once per occurrence of
    /// the identity in its attribute.
    pub fn bearers(&self, identity: &str) -> &[ItemId] {
        self.by_identity.get(identity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn identities(&self) -> impl Iterator<Item = &Identity> + '_ {
        self.by_identity.keys()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildError {
    Interleaved { group_root: NodeId },
}

impl fmt::Display for RebuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interleaved { group_root } => {
                write!(f, "cannot re-index group {group_root} while it is interleaved")
            }
        }
    }
}

impl std::error::Error for RebuildError {}

#[cfg(test)]
mod tests;
