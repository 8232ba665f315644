// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Correspondence linker: sibling and cousin lists for every indexed item.

use std::fmt;
use std::str::FromStr;

use crate::index::ItemIndex;
use crate::model::ItemId;

/// Whether two corresponding items carry the same identity set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Full,
    Partial,
}

impl MatchKind {
    pub fn is_partial(self) -> bool {
        self == Self::Partial
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a corresponding item sits relative to the source item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Same structure.
    Sibling,
    /// Different structure of the same group.
    Cousin,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sibling => "sibling",
            Self::Cousin => "cousin",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLinkTagError;

impl fmt::Display for ParseLinkTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid correspondence tag")
    }
}

impl std::error::Error for ParseLinkTagError {}

impl FromStr for MatchKind {
    type Err = ParseLinkTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            _ => Err(ParseLinkTagError),
        }
    }
}

impl FromStr for Relation {
    type Err = ParseLinkTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sibling" => Ok(Self::Sibling),
            "cousin" => Ok(Self::Cousin),
            _ => Err(ParseLinkTagError),
        }
    }
}

/// Directed correspondence from a source item to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    target: ItemId,
    kind: MatchKind,
}

impl Edge {
    pub fn new(target: ItemId, kind: MatchKind) -> Self {
        Self { target, kind }
    }

    pub fn target(&self) -> ItemId {
        self.target
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLinks {
    siblings: Vec<Edge>,
    cousins: Vec<Edge>,
}

impl ItemLinks {
    pub fn siblings(&self) -> &[Edge] {
        &self.siblings
    }

    pub fn cousins(&self) -> &[Edge] {
        &self.cousins
    }

    pub fn edges(&self, relation: Relation) -> &[Edge] {
        match relation {
            Relation::Sibling => &self.siblings,
            Relation::Cousin => &self.cousins,
        }
    }
}

/// Sibling/cousin lists for every item of one [`ItemIndex`], indexed by [`ItemId`].
///
/// Lists keep first-encountered order: the source's identities in attribute order, then
/// the bearers of each identity in index order. A pair of items sharing several
/// identities yields a single edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    per_item: Vec<ItemLinks>,
}

impl Links {
    pub fn build(index: &ItemIndex) -> Self {
        // `visited_by[target]` holds the last source that reached `target`.
        let mut visited_by = vec![usize::MAX; index.len()];
        let mut per_item = Vec::with_capacity(index.len());

        for (source_id, source) in index.items() {
            let mut links = ItemLinks::default();
            for identity in source.identities() {
                for &target_id in index.bearers(identity.as_str()) {
                    if target_id == source_id || visited_by[target_id.index()] == source_id.index()
                    {
                        continue;
                    }
                    visited_by[target_id.index()] = source_id.index();

                    let Some(target) = index.item(target_id) else {
                        continue;
                    };
                    let kind = if source.same_identities(target) {
                        MatchKind::Full
                    } else {
                        MatchKind::Partial
                    };
                    let edge = Edge::new(target_id, kind);
                    if target.structure() == source.structure() {
                        links.siblings.push(edge);
                    } else {
                        links.cousins.push(edge);
                    }
                }
            }
            per_item.push(links);
        }

        let edge_count = per_item
            .iter()
            .map(|l: &ItemLinks| l.siblings.len() + l.cousins.len())
            .sum::<usize>();
        tracing::debug!(items = per_item.len(), edges = edge_count, "linked correspondence group");

        Self { per_item }
    }

    pub fn len(&self) -> usize {
        self.per_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_item.is_empty()
    }

    pub fn of(&self, item: ItemId) -> Option<&ItemLinks> {
        self.per_item.get(item.index())
    }

    /// How `to` relates to `from`, if they correspond at all.
    pub fn relation(&self, from: ItemId, to: ItemId) -> Option<(Relation, MatchKind)> {
        let links = self.of(from)?;
        [Relation::Sibling, Relation::Cousin].into_iter().find_map(|relation| {
            links
                .edges(relation)
                .iter()
                .find(|edge| edge.target == to)
                .map(|edge| (relation, edge.kind))
        })
    }
}
