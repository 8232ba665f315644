// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{GroupId, ItemId, NodeId};

/// An indexed item addressed across groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemRef {
    pub group: GroupId,
    pub item: ItemId,
}

impl ItemRef {
    pub fn new(group: GroupId, item: ItemId) -> Self {
        Self { group, item }
    }
}

/// Low-level signals delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    PointerEnter(NodeId),
    PointerLeave(NodeId),
    Click(NodeId),
}

/// Group-level notifications for external wiring.
///
/// Serialised as `{"event": "mouse_enter_item", "group": 0, "item": 3, "node": 12}` so
/// host glue can consume them without linking against this crate's types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    MouseEnterItem { group: usize, item: usize, node: usize },
    MouseLeaveItem { group: usize, item: usize, node: usize },
    ClickOutsideItems,
}

impl Notification {
    pub(crate) fn mouse_enter(item: ItemRef, node: NodeId) -> Self {
        Self::MouseEnterItem {
            group: item.group.index(),
            item: item.item.index(),
            node: node.index(),
        }
    }

    pub(crate) fn mouse_leave(item: ItemRef, node: NodeId) -> Self {
        Self::MouseLeaveItem {
            group: item.group.index(),
            item: item.item.index(),
            node: node.index(),
        }
    }

    pub fn item_ref(&self) -> Option<ItemRef> {
        match *self {
            Self::MouseEnterItem { group, item, .. } | Self::MouseLeaveItem { group, item, .. } => {
                Some(ItemRef::new(GroupId::new(group), ItemId::new(item)))
            }
            Self::ClickOutsideItems => None,
        }
    }
}
