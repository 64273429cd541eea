#![forbid(unsafe_code)]

//! Flame graph view core: public facade crate.
//!
//! This crate re-exports the stable surface of the member crates and
//! offers a lightweight prelude. The typical flow is one-way: build a
//! [`RawNode`] tree, flatten it once into a [`Layout`], then drive a
//! [`NavController`] against it while your renderer consumes the layout
//! plus the controller's focus frame.
//!
//! # Example
//!
//! ```
//! use fgv::prelude::*;
//!
//! let raw = RawNode::new("root", 10.0)
//!     .child(RawNode::new("parse", 4.0))
//!     .child(RawNode::new("eval", 6.0));
//! let layout = Layout::from_raw(&raw)?;
//!
//! let mut nav = NavController::new(&layout, NavHooks::new());
//! nav.move_to_child();
//! nav.confirm();
//! assert_eq!(nav.focus_uid(), "_1");
//! # Ok::<(), fgv::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use fgv_core::color::{BACKGROUND_GRADIENT, TEXT_GRADIENT};
pub use fgv_core::layout::{FlattenError, Layout, LayoutNode, MAX_DEPTH, Uid};
pub use fgv_core::raw::RawNode;
pub use fgv_core::viewport::FocusFrame;

// --- Navigation re-exports -------------------------------------------------

pub use fgv_nav::command::{Key, KeyBindings, KeyPress, Modifiers, NavCommand};
pub use fgv_nav::controller::{Lateral, NavController, NavError, NavNoopReason, NavOutcome};
pub use fgv_nav::hooks::{NavHooks, PointerEvent};

// --- Errors ---------------------------------------------------------------

/// Top-level error type covering both flattening and navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The raw tree violated a flatten-time precondition.
    Flatten(FlattenError),
    /// A navigation request named an unknown node.
    Nav(NavError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flatten(err) => write!(f, "{err}"),
            Self::Nav(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Flatten(err) => Some(err),
            Self::Nav(err) => Some(err),
        }
    }
}

impl From<FlattenError> for Error {
    fn from(err: FlattenError) -> Self {
        Self::Flatten(err)
    }
}

impl From<NavError> for Error {
    fn from(err: NavError) -> Self {
        Self::Nav(err)
    }
}

/// Standard result type for fgv APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    //! One-line import for the common surface.
    pub use crate::{
        Error, FocusFrame, Key, KeyBindings, KeyPress, Lateral, Layout, LayoutNode, Modifiers,
        NavCommand, NavController, NavHooks, NavOutcome, PointerEvent, RawNode, Result,
    };
}
