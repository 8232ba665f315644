// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::Config;
use crate::index::ItemIndex;
use crate::interleave::{InterleaveSetupError, Interleaver};
use crate::link::{ItemLinks, Links};
use crate::model::{Document, DocumentError, GroupId, ItemId, NodeId};
use crate::selection::{GroupView, SelectionState};
use crate::style::StyleBook;

/// Interleaving availability of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterleaveStatus {
    /// `setup_interleaving` has not run yet.
    Pending,
    /// No control is offered: no structure, or fewer than two lines in the first one.
    NotEligible,
    /// The layout is malformed; the control stays disabled.
    Disabled(InterleaveSetupError),
    Available(Interleaver),
}

impl InterleaveStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn is_interleaved(&self) -> bool {
        matches!(self, Self::Available(interleaver) if interleaver.is_interleaved())
    }
}

/// Everything derived for one group: index, links, styles, selection and interleaving.
#[derive(Debug, Clone)]
pub struct GroupState {
    group_id: GroupId,
    index: ItemIndex,
    links: Links,
    styles: StyleBook,
    selection: SelectionState,
    interleave: InterleaveStatus,
}

impl GroupState {
    pub(crate) fn build(
        document: &mut Document,
        group_id: GroupId,
        root: NodeId,
        config: &Config,
    ) -> Result<Self, DocumentError> {
        let index = ItemIndex::build(document, root, &config.markers);
        let links = Links::build(&index);
        let styles = StyleBook::build(&index, &config.classes);
        styles.install_defaults(document)?;
        Ok(Self {
            group_id,
            index,
            links,
            styles,
            selection: SelectionState::default(),
            interleave: InterleaveStatus::Pending,
        })
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn root(&self) -> NodeId {
        self.index.root()
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn links_of(&self, item: ItemId) -> Option<&ItemLinks> {
        self.links.of(item)
    }

    pub fn styles(&self) -> &StyleBook {
        &self.styles
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn interleave_status(&self) -> &InterleaveStatus {
        &self.interleave
    }

    pub(crate) fn set_interleave_status(&mut self, status: InterleaveStatus) {
        self.interleave = status;
    }

    pub(crate) fn interleaver_mut(&mut self) -> Option<&mut Interleaver> {
        match &mut self.interleave {
            InterleaveStatus::Available(interleaver) => Some(interleaver),
            _ => None,
        }
    }

    /// Splits the state into the selection slot and the read-only data it operates on.
    pub(crate) fn selection_parts(&mut self) -> (&mut SelectionState, GroupView<'_>) {
        let view = GroupView { index: &self.index, links: &self.links, styles: &self.styles };
        (&mut self.selection, view)
    }
}
