#![forbid(unsafe_code)]

//! Navigation over a flattened flame graph.
//!
//! [`controller::NavController`] holds two independent cursors into an
//! immutable [`fgv_core::Layout`]: the *focus* (the zoom frame) and the
//! *keyboard cursor* (what directional commands target). Logical commands
//! live in [`command`], host callbacks in [`hooks`].

pub mod command;
pub mod controller;
pub mod hooks;

pub use command::{Key, KeyBindings, KeyPress, Modifiers, NavCommand};
pub use controller::{Lateral, NavController, NavError, NavNoopReason, NavOutcome};
pub use hooks::{NavHooks, PointerEvent};
