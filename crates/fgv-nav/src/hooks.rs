#![forbid(unsafe_code)]

//! Host callbacks.
//!
//! All hooks are optional and invoked synchronously within the operation
//! that triggered them, never batched or deferred. An absent hook means
//! "do nothing".

use std::fmt;

use fgv_core::layout::LayoutNode;
use fgv_core::raw::RawNode;

/// Pointer position forwarded to hover hooks, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl PointerEvent {
    /// Event at the given position.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

type FocusHook<'a> = Box<dyn FnMut(&LayoutNode, &str) + 'a>;
type HoverHook<'a> = Box<dyn FnMut(&PointerEvent, &RawNode) + 'a>;

/// Optional callbacks a host wires into the controller.
#[derive(Default)]
pub struct NavHooks<'a> {
    pub(crate) on_focus_change: Option<FocusHook<'a>>,
    pub(crate) on_hover_enter: Option<HoverHook<'a>>,
    pub(crate) on_hover_leave: Option<HoverHook<'a>>,
    pub(crate) on_hover_move: Option<HoverHook<'a>>,
}

impl<'a> NavHooks<'a> {
    /// No hooks at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every successful focus change with the new focus node
    /// and its uid.
    #[must_use]
    pub fn on_focus_change(mut self, hook: impl FnMut(&LayoutNode, &str) + 'a) -> Self {
        self.on_focus_change = Some(Box::new(hook));
        self
    }

    /// Called when the pointer enters a node's rectangle.
    #[must_use]
    pub fn on_hover_enter(mut self, hook: impl FnMut(&PointerEvent, &RawNode) + 'a) -> Self {
        self.on_hover_enter = Some(Box::new(hook));
        self
    }

    /// Called when the pointer leaves a node's rectangle.
    #[must_use]
    pub fn on_hover_leave(mut self, hook: impl FnMut(&PointerEvent, &RawNode) + 'a) -> Self {
        self.on_hover_leave = Some(Box::new(hook));
        self
    }

    /// Called when the pointer moves within a node's rectangle.
    #[must_use]
    pub fn on_hover_move(mut self, hook: impl FnMut(&PointerEvent, &RawNode) + 'a) -> Self {
        self.on_hover_move = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for NavHooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavHooks")
            .field("on_focus_change", &self.on_focus_change.is_some())
            .field("on_hover_enter", &self.on_hover_enter.is_some())
            .field("on_hover_leave", &self.on_hover_leave.is_some())
            .field("on_hover_move", &self.on_hover_move.is_some())
            .finish()
    }
}
