#![forbid(unsafe_code)]

//! Raw input tree.
//!
//! [`RawNode`] is the externally supplied weighted hierarchy before layout.
//! Trees are typically loaded from a JSON profile (enable the `serde`
//! feature; field names follow the camelCase schema, e.g.
//! `backgroundColor`) or built programmatically with the builder methods.
//!
//! # Example
//!
//! ```
//! use fgv_core::raw::RawNode;
//!
//! let tree = RawNode::new("root", 10.0)
//!     .child(RawNode::new("tokenize", 4.0))
//!     .child(RawNode::new("parse", 6.0).with_tooltip("parse: 6ms"));
//!
//! assert_eq!(tree.children.len(), 2);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of the raw weighted tree.
///
/// `value` must be finite and non-negative; a parent's value is expected to
/// be at least the sum of its children's values (any excess renders as
/// trailing whitespace). Both are checked at flatten time, not here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawNode {
    /// Optional stable identifier. When absent, the flattener synthesizes
    /// one from the pre-order visit counter.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,

    /// Display label.
    pub name: String,

    /// Weight of this node, in the caller's unit (samples, ms, bytes).
    pub value: f64,

    /// Child nodes, left to right.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<RawNode>,

    /// Explicit fill color; overrides the gradient-derived one.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub background_color: Option<String>,

    /// Explicit label color; overrides the gradient-derived one.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub color: Option<String>,

    /// Optional tooltip text shown on hover.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub tooltip: Option<String>,
}

impl RawNode {
    /// Create a leaf node with the given label and weight.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            value,
            children: Vec::new(),
            background_color: None,
            color: None,
            tooltip: None,
        }
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: RawNode) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<RawNode>) -> Self {
        self.children = nodes;
        self
    }

    /// Set an explicit stable identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit fill color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set an explicit label color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the tooltip text.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Count of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RawNode::node_count).sum::<usize>()
    }
}
