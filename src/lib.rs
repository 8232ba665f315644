// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Concordance: cross-structure correspondence highlighting and line interleaving.
//!
//! A document holds one or more groups of parallel structures (translations, aligned
//! listings). Items inside the structures carry identity tokens; items sharing a token are
//! linked as siblings (same structure) or cousins (different structures). Selecting an item
//! styles it and its correspondents, and eligible groups can be toggled into a line-by-line
//! interleaved layout and back.

pub mod config;
pub mod coordinator;
pub mod index;
pub mod interleave;
pub mod link;
pub mod model;
pub mod selection;
pub mod style;

pub use config::{Config, ConfigError, Markers, ShowPolicy, StyleClasses};
pub use coordinator::{
    Concordance, CoordinatorError, GroupState, HostEvent, InterleaveStatus, ItemRef, Notification,
};
pub use model::{Document, GroupId, ItemId, NodeId};
