// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Style targets: bindings of item nodes to the state classes written on them.

use std::fmt;

use smol_str::{format_smolstr, SmolStr};

use crate::config::StyleClasses;
use crate::index::ItemIndex;
use crate::link::{MatchKind, Relation};
use crate::model::{Document, DocumentError, ItemId, NodeId};

/// Abstract visual state an item can be put in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    Selected,
    Match,
    PartialMatch,
    Highlighted,
}

impl StateClass {
    pub fn class_name(self, classes: &StyleClasses) -> &SmolStr {
        match self {
            Self::Selected => &classes.selected,
            Self::Match => &classes.matched,
            Self::PartialMatch => &classes.partial_match,
            Self::Highlighted => &classes.highlighted,
        }
    }

    /// State used for corresponding items in the given relation.
    pub fn for_relation(relation: Relation) -> Self {
        match relation {
            Relation::Sibling => Self::Highlighted,
            Relation::Cousin => Self::Match,
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Selected => "selected",
            Self::Match => "match",
            Self::PartialMatch => "partial-match",
            Self::Highlighted => "highlighted",
        })
    }
}

/// Binding of one node to one state, with the class names resolved up front.
///
/// Applying writes the state class and its category-prefixed variant (`word-match`) and
/// takes the default class off; removing does the reverse. Both are idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTarget {
    node: NodeId,
    state: StateClass,
    class: SmolStr,
    prefixed: SmolStr,
    default_class: Option<SmolStr>,
}

impl StyleTarget {
    pub fn new(node: NodeId, state: StateClass, category: &str, classes: &StyleClasses) -> Self {
        let class = state.class_name(classes).clone();
        let prefixed = format_smolstr!("{category}-{class}");
        let default_class = default_class(category, classes);
        Self { node, state, class, prefixed, default_class }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> StateClass {
        self.state
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn prefixed_class(&self) -> &str {
        &self.prefixed
    }

    pub fn default_class(&self) -> Option<&str> {
        self.default_class.as_deref()
    }

    pub fn is_applied(&self, document: &Document) -> bool {
        document.has_tag(self.node, &self.class) && document.has_tag(self.node, &self.prefixed)
    }

    pub fn apply(&self, document: &mut Document) -> Result<(), DocumentError> {
        if let Some(default_class) = &self.default_class {
            document.remove_tag(self.node, default_class)?;
        }
        document.add_tag(self.node, &self.class)?;
        document.add_tag(self.node, &self.prefixed)?;
        Ok(())
    }

    pub fn remove(&self, document: &mut Document) -> Result<(), DocumentError> {
        document.remove_tag(self.node, &self.class)?;
        document.remove_tag(self.node, &self.prefixed)?;
        if let Some(default_class) = &self.default_class {
            document.add_tag(self.node, default_class)?;
        }
        Ok(())
    }
}

fn default_class(category: &str, classes: &StyleClasses) -> Option<SmolStr> {
    classes
        .default_state
        .as_ref()
        .map(|state| format_smolstr!("{category}-{state}"))
}

/// The four targets every item gets at index time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStyles {
    selected: StyleTarget,
    sibling: StyleTarget,
    cousin: StyleTarget,
    partial: StyleTarget,
}

impl ItemStyles {
    pub fn selected(&self) -> &StyleTarget {
        &self.selected
    }

    pub fn for_relation(&self, relation: Relation) -> &StyleTarget {
        match relation {
            Relation::Sibling => &self.sibling,
            Relation::Cousin => &self.cousin,
        }
    }

    pub fn partial(&self) -> &StyleTarget {
        &self.partial
    }

    /// Marks this item as a `relation` correspondence of kind `kind`.
    pub fn apply_match(
        &self,
        document: &mut Document,
        relation: Relation,
        kind: MatchKind,
    ) -> Result<(), DocumentError> {
        self.for_relation(relation).apply(document)?;
        if kind.is_partial() {
            self.partial.apply(document)?;
        }
        Ok(())
    }

    /// Takes off every match state, whatever relation or kind put it there.
    pub fn remove_match(&self, document: &mut Document) -> Result<(), DocumentError> {
        self.sibling.remove(document)?;
        self.cousin.remove(document)?;
        self.partial.remove(document)
    }
}

/// Style targets of every item in a group, indexed by [`ItemId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleBook {
    per_item: Vec<ItemStyles>,
}

impl StyleBook {
    pub fn build(index: &ItemIndex, classes: &StyleClasses) -> Self {
        let per_item = index
            .items()
            .map(|(_, item)| {
                let target = |state| StyleTarget::new(item.node(), state, item.category(), classes);
                ItemStyles {
                    selected: target(StateClass::Selected),
                    sibling: target(StateClass::for_relation(Relation::Sibling)),
                    cousin: target(StateClass::for_relation(Relation::Cousin)),
                    partial: target(StateClass::PartialMatch),
                }
            })
            .collect();
        Self { per_item }
    }

    pub fn of(&self, item: ItemId) -> Option<&ItemStyles> {
        self.per_item.get(item.index())
    }

    /// Puts every item into its default state.
    pub fn install_defaults(&self, document: &mut Document) -> Result<(), DocumentError> {
        for styles in &self.per_item {
            if let Some(default_class) = styles.selected.default_class() {
                document.add_tag(styles.selected.node(), default_class)?;
            }
        }
        Ok(())
    }
}
