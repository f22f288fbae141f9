//! Outline node types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style property carrying the font weight.
pub const FONT_WEIGHT: &str = "fo:font-weight";

/// Style property carrying the font style.
pub const FONT_STYLE: &str = "fo:font-style";

/// One element of the outline tree (a "topic" in mind-map terms).
///
/// Children order is render order. Nodes are never mutated by the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Title text, possibly multi-line and carrying inline directive tokens
    pub title: String,

    /// Ordered children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,

    /// Style attributes
    #[serde(default, skip_serializing_if = "NodeStyle::is_empty")]
    pub style: NodeStyle,

    /// Markers (tags, flags, priorities...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

impl OutlineNode {
    /// Create a leaf node with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replace the children of this node.
    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Append one child.
    pub fn child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mark the node as bold.
    pub fn bold(mut self) -> Self {
        self.style.set(FONT_WEIGHT, "bold");
        self
    }

    /// Mark the node as italic.
    pub fn italic(mut self) -> Self {
        self.style.set(FONT_STYLE, "italic");
        self
    }

    /// Add a marker.
    pub fn with_marker(mut self, id: impl Into<String>) -> Self {
        self.markers.push(Marker::new(id));
        self
    }

    /// Whether the font weight is bold.
    pub fn is_bold(&self) -> bool {
        self.style.get(FONT_WEIGHT) == Some("bold")
    }

    /// Whether the font style is italic.
    pub fn is_italic(&self) -> bool {
        self.style.get(FONT_STYLE) == Some("italic")
    }

    /// Whether the node carries the given marker.
    pub fn has_marker(&self, id: &str) -> bool {
        self.markers.iter().any(|m| m.id == id)
    }

    /// Whether the node carries any marker.
    pub fn is_tagged(&self) -> bool {
        !self.markers.is_empty()
    }

    /// Title of the first child, if any.
    pub fn first_child_title(&self) -> Option<&str> {
        self.children.first().map(|c| c.title.as_str())
    }

    /// Whether the node has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Pre-order iterator over this subtree.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over an outline subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a OutlineNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a OutlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Node style attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Raw style properties (e.g. `fo:font-weight` -> `bold`)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl NodeStyle {
    /// Get a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|s| s.as_str())
    }

    /// Set a property value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A marker attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker identifier (e.g. `tag-red`, `priority-1`)
    pub id: String,
}

impl Marker {
    /// Create a marker.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
