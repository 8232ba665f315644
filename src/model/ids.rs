// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;

/// A validated, cheap-to-clone token read from a document attribute.
///
/// Tokens are trimmed on construction and must be non-empty and free of `,`, because
/// attribute values carry several tokens as a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Token<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, TokenError> {
        let value = value.as_ref().trim();
        validate_token(value)?;
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Parses a comma-separated list, keeping order and skipping blank entries.
    ///
    /// Duplicates are kept; callers that need set semantics dedupe themselves.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .filter_map(|part| Self::new(part).ok())
            .collect()
    }
}

impl<T> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Token<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Token<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Token<T> {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Empty,
    ContainsComma,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("token must not be empty"),
            Self::ContainsComma => f.write_str("token must not contain ','"),
        }
    }
}

impl std::error::Error for TokenError {}

fn validate_token(value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        return Err(TokenError::Empty);
    }
    if value.contains(',') {
        return Err(TokenError::ContainsComma);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityTag {}
/// A unit of meaning; items sharing an identity correspond to one another.
pub type Identity = Token<IdentityTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlignmentKeyTag {}
/// Key that lines up corresponding lines across the structures of a group.
pub type AlignmentKey = Token<AlignmentKeyTag>;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

arena_index!(
    /// Position of a node in a [`crate::model::Document`] arena.
    NodeId
);
arena_index!(
    /// Position of an item in its group's [`crate::index::ItemIndex`].
    ItemId
);
arena_index!(
    /// 0-based position of a structure among its group's structures.
    StructureIndex
);
arena_index!(
    /// 0-based position of a group in document order.
    GroupId
);
