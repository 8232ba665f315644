// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration for how documents are read and how states are written back.
//!
//! Every field has a default, so hosts only spell out what they change.

use std::fmt;

use serde::Deserialize;
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markers: Markers,
    pub classes: StyleClasses,
}

impl Config {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markers.group_tags.is_empty() {
            return Err(ConfigError::Empty { field: "markers.group_tags" });
        }
        if self.markers.structure_tags.is_empty() {
            return Err(ConfigError::Empty { field: "markers.structure_tags" });
        }
        let named = [
            ("markers.line_tag", &self.markers.line_tag),
            ("markers.identity_attribute", &self.markers.identity_attribute),
            ("markers.alignment_attribute", &self.markers.alignment_attribute),
            ("markers.default_category", &self.markers.default_category),
            ("classes.selected", &self.classes.selected),
            ("classes.matched", &self.classes.matched),
            ("classes.partial_match", &self.classes.partial_match),
            ("classes.highlighted", &self.classes.highlighted),
        ];
        for (field, value) in named {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        Ok(())
    }
}

/// Tag and attribute names that mark groups, structures, lines and items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub group_tags: Vec<SmolStr>,
    pub structure_tags: Vec<SmolStr>,
    pub line_tag: SmolStr,
    pub identity_attribute: SmolStr,
    pub alignment_attribute: SmolStr,
    pub category_attribute: SmolStr,
    pub default_category: SmolStr,
    /// Tag put on the per-key wrappers the interleaver creates.
    pub interleaved_line_tag: SmolStr,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            group_tags: vec![SmolStr::new("translation"), SmolStr::new("structure-group")],
            structure_tags: vec![SmolStr::new("block"), SmolStr::new("structure")],
            line_tag: SmolStr::new("line"),
            identity_attribute: SmolStr::new("data-corrid"),
            alignment_attribute: SmolStr::new("data-line"),
            category_attribute: SmolStr::new("data-category"),
            default_category: SmolStr::new("item"),
            interleaved_line_tag: SmolStr::new("interleaved-line"),
        }
    }
}

impl Markers {
    pub fn is_group_tag(&self, tag: &str) -> bool {
        self.group_tags.iter().any(|t| t == tag)
    }

    pub fn is_structure_tag(&self, tag: &str) -> bool {
        self.structure_tags.iter().any(|t| t == tag)
    }
}

/// Names of the state classes written onto nodes.
///
/// The default state is what an item shows while no state applies, written as
/// `<category>-<default_state>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleClasses {
    pub selected: SmolStr,
    pub matched: SmolStr,
    pub partial_match: SmolStr,
    pub highlighted: SmolStr,
    pub default_state: Option<SmolStr>,
}

impl Default for StyleClasses {
    fn default() -> Self {
        Self {
            selected: SmolStr::new("selected"),
            matched: SmolStr::new("match"),
            partial_match: SmolStr::new("partial-match"),
            highlighted: SmolStr::new("highlighted"),
            default_state: Some(SmolStr::new("plain")),
        }
    }
}

/// Which relations a selection lights up. Supplied by callers, never decided here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct ShowPolicy {
    pub siblings: bool,
    pub cousins: bool,
}

impl Default for ShowPolicy {
    fn default() -> Self {
        Self { siblings: true, cousins: true }
    }
}

impl ShowPolicy {
    pub fn new(siblings: bool, cousins: bool) -> Self {
        Self { siblings, cousins }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Empty { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "invalid config json: {source}"),
            Self::Empty { field } => write!(f, "config field {field} must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
            Self::Empty { .. } => None,
        }
    }
}
