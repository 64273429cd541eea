#![forbid(unsafe_code)]

//! Scaling inputs for the external viewport renderer.
//!
//! The core never windows rows or draws rectangles itself; the host's
//! renderer does that. What it needs from us is the focus frame: the
//! normalized span of the currently zoomed node, against which absolute
//! layout coordinates become screen coordinates
//! (`(left - focus.left) / focus.width * available_width`).

use crate::layout::{Layout, LayoutNode};

/// The horizontal span of the focused node, in normalized layout
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusFrame {
    /// Left edge of the focused node.
    pub left: f64,
    /// Width of the focused node. Positive for any focusable node with
    /// weight; a zero-width focus degenerates every projection to the left
    /// edge.
    pub width: f64,
}

impl FocusFrame {
    /// Frame for the node named by `focus`, or `None` when the uid is not
    /// in the layout.
    #[must_use]
    pub fn for_focus(layout: &Layout, focus: &str) -> Option<Self> {
        layout.get(focus).map(Self::from_node)
    }

    /// Frame for an already-resolved node.
    #[must_use]
    pub fn from_node(node: &LayoutNode) -> Self {
        Self {
            left: node.left,
            width: node.width,
        }
    }

    /// Project a normalized left edge into screen coordinates so the focus
    /// spans the full available width.
    #[must_use]
    pub fn screen_x(&self, node_left: f64, available_width: f64) -> f64 {
        if self.width == 0.0 {
            return 0.0;
        }
        (node_left - self.left) / self.width * available_width
    }

    /// Project a normalized width into screen coordinates.
    #[must_use]
    pub fn screen_width(&self, node_width: f64, available_width: f64) -> f64 {
        if self.width == 0.0 {
            return 0.0;
        }
        node_width / self.width * available_width
    }

    /// Whether any part of the node overlaps the focus span (i.e. the
    /// renderer has something to draw for it at this zoom).
    #[must_use]
    pub fn overlaps(&self, node: &LayoutNode) -> bool {
        node.left < self.left + self.width && node.left + node.width > self.left
    }
}
