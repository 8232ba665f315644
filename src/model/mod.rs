// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document model and typed ids.
//!
//! A document is an arena tree; groups, structures and lines are recognised by the tags
//! configured in [`crate::config::Markers`].

pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod outline;

pub use document::{Descendants, Document, DocumentError, LoadError, Node, NodeSpec};
pub use ids::{
    AlignmentKey, GroupId, Identity, ItemId, NodeId, StructureIndex, Token, TokenError,
};
pub use outline::{discover_groups, lines_of, GroupOutline};
