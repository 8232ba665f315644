// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-selection state machine of one group.
//!
//! At most one item per group is selected. Selecting always clears the previous
//! selection first, so two items are never styled as selected at the same time.

use std::fmt;

use crate::config::ShowPolicy;
use crate::index::ItemIndex;
use crate::link::{Links, Relation};
use crate::model::{Document, DocumentError, ItemId};
use crate::style::StyleBook;

/// Read-only view of the derived data a selection transition needs.
#[derive(Debug, Clone, Copy)]
pub struct GroupView<'a> {
    pub index: &'a ItemIndex,
    pub links: &'a Links,
    pub styles: &'a StyleBook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected { item: ItemId, shown: ShowPolicy },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current: Selection,
    rev: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self { current: Selection::Idle, rev: 0 }
    }
}

impl SelectionState {
    pub fn current(&self) -> Selection {
        self.current
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        match self.current {
            Selection::Idle => None,
            Selection::Selected { item, .. } => Some(item),
        }
    }

    /// Bumped on every transition that changed styles.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Selects `item`, lighting up the relations `shown` asks for.
    ///
    /// Unknown items are rejected before any style is touched. Returns the previously
    /// selected item, if any.
    pub fn select(
        &mut self,
        document: &mut Document,
        view: GroupView<'_>,
        item: ItemId,
        shown: ShowPolicy,
    ) -> Result<Option<ItemId>, SelectionError> {
        let (Some(styles), Some(links)) = (view.styles.of(item), view.links.of(item)) else {
            return Err(SelectionError::UnknownItem(item));
        };
        if view.index.item(item).is_none() {
            return Err(SelectionError::UnknownItem(item));
        }

        let previous = self.clear(document, view)?;

        styles.selected().apply(document)?;
        for relation in [Relation::Sibling, Relation::Cousin] {
            let visible = match relation {
                Relation::Sibling => shown.siblings,
                Relation::Cousin => shown.cousins,
            };
            if visible {
                apply_relation(document, view, links.edges(relation), relation)?;
            }
        }

        self.current = Selection::Selected { item, shown };
        self.rev = self.rev.wrapping_add(1);
        tracing::debug!(
            group_root = %view.index.root(),
            item = %item,
            siblings = shown.siblings,
            cousins = shown.cousins,
            "selected item"
        );
        Ok(previous)
    }

    /// Returns to `Idle`, removing every style the current selection applied.
    pub fn clear(
        &mut self,
        document: &mut Document,
        view: GroupView<'_>,
    ) -> Result<Option<ItemId>, SelectionError> {
        let Selection::Selected { item, .. } = self.current else {
            return Ok(None);
        };
        let (Some(styles), Some(links)) = (view.styles.of(item), view.links.of(item)) else {
            return Err(SelectionError::UnknownItem(item));
        };

        styles.selected().remove(document)?;
        for edge in links.siblings().iter().chain(links.cousins()) {
            if let Some(target) = view.styles.of(edge.target()) {
                target.remove_match(document)?;
            }
        }

        self.current = Selection::Idle;
        self.rev = self.rev.wrapping_add(1);
        tracing::debug!(group_root = %view.index.root(), item = %item, "cleared selection");
        Ok(Some(item))
    }

    /// Additionally lights up the cousins of the current selection. Sibling styles and the
    /// selection itself are left alone. Returns false from `Idle`.
    pub fn show_cousins(
        &mut self,
        document: &mut Document,
        view: GroupView<'_>,
    ) -> Result<bool, SelectionError> {
        let Selection::Selected { item, shown } = self.current else {
            return Ok(false);
        };
        let links = view.links.of(item).ok_or(SelectionError::UnknownItem(item))?;

        apply_relation(document, view, links.cousins(), Relation::Cousin)?;
        if !shown.cousins {
            self.current = Selection::Selected {
                item,
                shown: ShowPolicy { cousins: true, ..shown },
            };
            self.rev = self.rev.wrapping_add(1);
        }
        Ok(true)
    }
}

fn apply_relation(
    document: &mut Document,
    view: GroupView<'_>,
    edges: &[crate::link::Edge],
    relation: Relation,
) -> Result<(), SelectionError> {
    for edge in edges {
        let styles = view
            .styles
            .of(edge.target())
            .ok_or(SelectionError::UnknownItem(edge.target()))?;
        styles.apply_match(document, relation, edge.kind())?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownItem(ItemId),
    Document(DocumentError),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem(item) => write!(f, "item is not indexed in this group (id={item})"),
            Self::Document(err) => write!(f, "cannot restyle item: {err}"),
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            Self::UnknownItem(_) => None,
        }
    }
}

impl From<DocumentError> for SelectionError {
    fn from(err: DocumentError) -> Self {
        Self::Document(err)
    }
}
