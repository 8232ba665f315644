// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Concordance and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::NodeId;

/// One element of a [`Document`].
///
/// Tags behave like a class list: ordered, but never holding the same tag twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    tags: Vec<SmolStr>,
    attributes: BTreeMap<SmolStr, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn tags(&self) -> &[SmolStr] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn attributes(&self) -> &BTreeMap<SmolStr, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed document tree the correspondence engine reads and restyles.
///
/// Nodes are never freed; detaching only unlinks a node from its parent so it can be
/// re-attached elsewhere (the interleaver relies on this to move lines around).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            root: NodeId::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes.get(id.index()).ok_or(DocumentError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes.get_mut(id.index()).ok_or(DocumentError::UnknownNode(id))
    }

    /// Creates a detached element.
    pub fn create_element<I, S>(&mut self, tags: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut node = Node::default();
        for tag in tags {
            let tag = tag.into();
            if !node.tags.contains(&tag) {
                node.tags.push(tag);
            }
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<String>) -> Result<(), DocumentError> {
        self.node_mut(id)?.text = text;
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<SmolStr>,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.node_mut(id)?.attributes.insert(name.into(), value.into());
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id.index()).and_then(|node| node.attribute(name))
    }

    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.nodes.get(id.index()).is_some_and(|node| node.has_tag(tag))
    }

    /// Adds `tag` unless already present. Returns whether the tag list changed.
    pub fn add_tag(&mut self, id: NodeId, tag: &str) -> Result<bool, DocumentError> {
        let node = self.node_mut(id)?;
        if node.has_tag(tag) {
            return Ok(false);
        }
        node.tags.push(SmolStr::new(tag));
        Ok(true)
    }

    /// Removes `tag` if present. Returns whether the tag list changed.
    pub fn remove_tag(&mut self, id: NodeId, tag: &str) -> Result<bool, DocumentError> {
        let node = self.node_mut(id)?;
        let before = node.tags.len();
        node.tags.retain(|t| t != tag);
        Ok(node.tags.len() != before)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.index()).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Appends `child` as the last child of `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        let len = self.node(parent)?.children.len();
        let position = match self.parent(child) {
            // Moving within the same parent shifts the tail by one.
            Some(current) if current == parent => len - 1,
            _ => len,
        };
        self.insert_child(parent, position, child)
    }

    /// Inserts `child` at `position` among the children of `parent`.
    ///
    /// `position` is interpreted after `child` has been detached from its current parent.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        position: usize,
        child: NodeId,
    ) -> Result<(), DocumentError> {
        self.node(parent)?;
        self.node(child)?;
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(DocumentError::WouldCreateCycle { parent, child });
        }

        self.detach(child)?;
        let node = self.node_mut(parent)?;
        let len = node.children.len();
        if position > len {
            return Err(DocumentError::PositionOutOfBounds { parent, position, len });
        }
        node.children.insert(position, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlinks `id` from its parent, returning the former parent and position.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<(NodeId, usize)>, DocumentError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(None);
        };
        let siblings = &mut self.node_mut(parent)?.children;
        let position = siblings.iter().position(|c| *c == id);
        if let Some(position) = position {
            siblings.remove(position);
        }
        self.node_mut(id)?.parent = None;
        Ok(position.map(|position| (parent, position)))
    }

    /// Returns true when `ancestor` is a proper ancestor of `id`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Walks parents from the parent of `id` up to the detached top.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Preorder walk of the subtree below `id` (excluding `id` itself).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = self.children(id).to_vec();
        stack.reverse();
        Descendants { document: self, stack }
    }

    /// Concatenated text of `id` and its subtree, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.nodes.get(id.index()).and_then(|n| n.text.as_deref()) {
            out.push_str(text);
        }
        for descendant in self.descendants(id) {
            if let Some(text) = self.nodes[descendant.index()].text.as_deref() {
                out.push_str(text);
            }
        }
        out
    }

    /// Builds a document whose root is `spec`.
    pub fn from_spec(spec: &NodeSpec) -> Self {
        let mut document = Self::new();
        let root = document.root;
        document.fill_from_spec(root, spec);
        document
    }

    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        let spec: NodeSpec = serde_json::from_str(input).map_err(LoadError::Json)?;
        Ok(Self::from_spec(&spec))
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, LoadError> {
        let spec: NodeSpec = serde_json::from_value(value).map_err(LoadError::Json)?;
        Ok(Self::from_spec(&spec))
    }

    fn fill_from_spec(&mut self, id: NodeId, spec: &NodeSpec) {
        let mut stack = vec![(id, spec)];
        while let Some((id, spec)) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            for tag in &spec.tags {
                let tag = SmolStr::new(tag);
                if !node.tags.contains(&tag) {
                    node.tags.push(tag);
                }
            }
            node.attributes = spec
                .attributes
                .iter()
                .map(|(k, v)| (SmolStr::new(k), v.clone()))
                .collect();
            node.text = spec.text.clone();

            for child_spec in &spec.children {
                let child = NodeId::new(self.nodes.len());
                self.nodes.push(Node {
                    parent: Some(id),
                    ..Node::default()
                });
                self.nodes[id.index()].children.push(child);
                stack.push((child, child_spec));
            }
        }
    }

    /// Snapshot of the subtree at `id`, suitable for comparisons and serialisation.
    pub fn to_spec(&self, id: NodeId) -> Result<NodeSpec, DocumentError> {
        let node = self.node(id)?;
        let children = node
            .children
            .iter()
            .map(|child| self.to_spec(*child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NodeSpec {
            tags: node.tags.iter().map(|t| t.to_string()).collect(),
            attributes: node
                .attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            text: node.text.clone(),
            children,
        })
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(self.document.children(next).iter().rev().copied());
        Some(next)
    }
}

/// Serialisable description of a node subtree, used to hand documents across the host
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    UnknownNode(NodeId),
    WouldCreateCycle { parent: NodeId, child: NodeId },
    PositionOutOfBounds { parent: NodeId, position: usize, len: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node (id={id})"),
            Self::WouldCreateCycle { parent, child } => {
                write!(f, "cannot attach node {child} below its own descendant {parent}")
            }
            Self::PositionOutOfBounds { parent, position, len } => write!(
                f,
                "child position out of bounds (parent={parent}, position={position}, len={len})"
            ),
        }
    }
}

impl std::error::Error for DocumentError {}

#[derive(Debug)]
pub enum LoadError {
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "invalid document json: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
        }
    }
}
