// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Group coordinator: owns the document and one state bundle per group, and routes host
//! events to the group they belong to.
//!
//! Groups never affect one another; an event on an item of group A only ever touches
//! group A's selection.
//!
//! Notifications are delivered synchronously to the subscribed observers while the
//! coordinator is borrowed, so observers record what they need and act afterwards.
//! [`Concordance::dispatch`] bundles the usual wiring (select on enter, clear on an
//! outside click) for hosts that do not need their own.

mod events;
mod group;

use std::collections::HashMap;
use std::fmt;

use crate::config::{Config, ConfigError, ShowPolicy};
use crate::interleave::{InterleaveError, Interleaver};
use crate::model::{discover_groups, Document, DocumentError, GroupId, ItemId, NodeId};
use crate::selection::SelectionError;

pub use events::{HostEvent, ItemRef, Notification};
pub use group::{GroupState, InterleaveStatus};

type Observer = Box<dyn FnMut(&Notification)>;

pub struct Concordance {
    document: Document,
    config: Config,
    groups: Vec<GroupState>,
    items_by_node: HashMap<NodeId, ItemRef>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Concordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Concordance")
            .field("groups", &self.groups.len())
            .field("items", &self.items_by_node.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Concordance {
    /// Indexes and links every group of `document`.
    pub fn new(mut document: Document, config: Config) -> Result<Self, CoordinatorError> {
        config.validate().map_err(CoordinatorError::Config)?;

        let roots = discover_groups(&document, &config.markers);
        let mut groups = Vec::with_capacity(roots.len());
        let mut items_by_node = HashMap::new();
        for (position, root) in roots.into_iter().enumerate() {
            let group_id = GroupId::new(position);
            let group = GroupState::build(&mut document, group_id, root, &config)
                .map_err(CoordinatorError::Document)?;
            for (item_id, item) in group.index().items() {
                items_by_node.insert(item.node(), ItemRef::new(group_id, item_id));
            }
            groups.push(group);
        }

        tracing::info!(groups = groups.len(), items = items_by_node.len(), "concordance ready");

        Ok(Self { document, config, groups, items_by_node, observers: Vec::new() })
    }

    pub fn with_defaults(document: Document) -> Result<Self, CoordinatorError> {
        Self::new(document, Config::default())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn groups(&self) -> &[GroupState] {
        &self.groups
    }

    pub fn group(&self, group: GroupId) -> Result<&GroupState, CoordinatorError> {
        self.groups.get(group.index()).ok_or(CoordinatorError::UnknownGroup(group))
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Notification) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer(&notification);
        }
    }

    /// The item `node` belongs to: the node itself or its nearest indexed ancestor.
    pub fn item_at(&self, node: NodeId) -> Option<ItemRef> {
        std::iter::once(node)
            .chain(self.document.ancestors(node))
            .find_map(|candidate| self.items_by_node.get(&candidate).copied())
    }

    pub fn node_of(&self, item: ItemRef) -> Option<NodeId> {
        let group = self.groups.get(item.group.index())?;
        group.index().item(item.item).map(|item| item.node())
    }

    /// Pointer entered `node`. Notifies `MouseEnterItem` when it belongs to an item.
    pub fn pointer_entered(&mut self, node: NodeId) -> Option<ItemRef> {
        let item = self.item_at(node)?;
        let item_node = self.node_of(item)?;
        self.notify(Notification::mouse_enter(item, item_node));
        Some(item)
    }

    /// Pointer left `node`. Notifies `MouseLeaveItem` when it belongs to an item.
    pub fn pointer_left(&mut self, node: NodeId) -> Option<ItemRef> {
        let item = self.item_at(node)?;
        let item_node = self.node_of(item)?;
        self.notify(Notification::mouse_leave(item, item_node));
        Some(item)
    }

    /// Click on `node`. Notifies `ClickOutsideItems` and returns true when the click did not
    /// land on any item.
    pub fn clicked(&mut self, node: NodeId) -> bool {
        if self.item_at(node).is_some() {
            return false;
        }
        self.notify(Notification::ClickOutsideItems);
        true
    }

    /// Selects `item` in its group, replacing that group's previous selection.
    pub fn set_selected(
        &mut self,
        item: ItemRef,
        show_siblings: bool,
        show_cousins: bool,
    ) -> Result<Option<ItemId>, CoordinatorError> {
        let group = self
            .groups
            .get_mut(item.group.index())
            .ok_or(CoordinatorError::UnknownGroup(item.group))?;
        let shown = ShowPolicy::new(show_siblings, show_cousins);
        let (selection, view) = group.selection_parts();
        selection
            .select(&mut self.document, view, item.item, shown)
            .map_err(|source| CoordinatorError::Selection { group: item.group, source })
    }

    pub fn selected_item(&self, group: GroupId) -> Option<ItemRef> {
        let state = self.groups.get(group.index())?;
        state.selection().selected_item().map(|item| ItemRef::new(group, item))
    }

    /// Clears the selection of every group.
    pub fn clear_current_selection(&mut self) -> Result<(), CoordinatorError> {
        for position in 0..self.groups.len() {
            self.clear_group_selection(GroupId::new(position))?;
        }
        Ok(())
    }

    pub fn clear_group_selection(
        &mut self,
        group: GroupId,
    ) -> Result<Option<ItemId>, CoordinatorError> {
        let state =
            self.groups.get_mut(group.index()).ok_or(CoordinatorError::UnknownGroup(group))?;
        let (selection, view) = state.selection_parts();
        selection
            .clear(&mut self.document, view)
            .map_err(|source| CoordinatorError::Selection { group, source })
    }

    /// Lights up the cousins of whatever is selected, in every group that has a selection.
    /// Returns how many groups were affected.
    pub fn show_cousins_of_selected_item(&mut self) -> Result<usize, CoordinatorError> {
        let mut affected = 0;
        for (position, state) in self.groups.iter_mut().enumerate() {
            let (selection, view) = state.selection_parts();
            let shown = selection
                .show_cousins(&mut self.document, view)
                .map_err(|source| CoordinatorError::Selection {
                    group: GroupId::new(position),
                    source,
                })?;
            if shown {
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Validates every group for interleaving and prepares the eligible, valid ones.
    /// Failures disable only the affected group's control. Returns how many groups offer
    /// the control.
    ///
    /// Each group is set up at most once; later calls keep the existing layout, including
    /// one that is currently interleaved.
    pub fn setup_interleaving(&mut self) -> usize {
        let mut available = 0;
        for state in &mut self.groups {
            match state.interleave_status() {
                InterleaveStatus::Pending => {}
                InterleaveStatus::Available(_) => {
                    available += 1;
                    continue;
                }
                InterleaveStatus::NotEligible | InterleaveStatus::Disabled(_) => continue,
            }
            let status = match Interleaver::setup(
                &mut self.document,
                state.index().outline(),
                &self.config.markers,
            ) {
                Ok(Some(interleaver)) => {
                    available += 1;
                    InterleaveStatus::Available(interleaver)
                }
                Ok(None) => InterleaveStatus::NotEligible,
                Err(err) => InterleaveStatus::Disabled(err),
            };
            state.set_interleave_status(status);
        }
        available
    }

    pub fn interleave_status(
        &self,
        group: GroupId,
    ) -> Result<&InterleaveStatus, CoordinatorError> {
        self.group(group).map(GroupState::interleave_status)
    }

    /// Drives a group's interleaving toggle. Returns whether the layout changed.
    pub fn set_interleaved(
        &mut self,
        group: GroupId,
        interleaved: bool,
    ) -> Result<bool, CoordinatorError> {
        let state =
            self.groups.get_mut(group.index()).ok_or(CoordinatorError::UnknownGroup(group))?;
        let Some(interleaver) = state.interleaver_mut() else {
            return Err(CoordinatorError::InterleaveNotOffered(group));
        };
        interleaver
            .set_interleaved(&mut self.document, interleaved)
            .map_err(|source| CoordinatorError::Interleave { group, source })
    }

    /// Default wiring: notify, then select on pointer enter and clear everything on a click
    /// outside items. Pointer leave only notifies.
    pub fn dispatch(
        &mut self,
        event: HostEvent,
        policy: ShowPolicy,
    ) -> Result<(), CoordinatorError> {
        match event {
            HostEvent::PointerEnter(node) => {
                if let Some(item) = self.pointer_entered(node) {
                    self.set_selected(item, policy.siblings, policy.cousins)?;
                }
            }
            HostEvent::PointerLeave(node) => {
                self.pointer_left(node);
            }
            HostEvent::Click(node) => {
                if self.clicked(node) {
                    self.clear_current_selection()?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum CoordinatorError {
    Config(ConfigError),
    Document(DocumentError),
    UnknownGroup(GroupId),
    Selection { group: GroupId, source: SelectionError },
    InterleaveNotOffered(GroupId),
    Interleave { group: GroupId, source: InterleaveError },
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Document(err) => write!(f, "cannot prepare document: {err}"),
            Self::UnknownGroup(group) => write!(f, "unknown group (id={group})"),
            Self::Selection { group, source } => {
                write!(f, "selection failed in group {group}: {source}")
            }
            Self::InterleaveNotOffered(group) => {
                write!(f, "interleaving is not offered for group {group}")
            }
            Self::Interleave { group, source } => {
                write!(f, "interleaving failed in group {group}: {source}")
            }
        }
    }
}

impl std::error::Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Selection { source, .. } => Some(source),
            Self::Interleave { source, .. } => Some(source),
            Self::UnknownGroup(_) | Self::InterleaveNotOffered(_) => None,
        }
    }
}
