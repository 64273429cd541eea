#![forbid(unsafe_code)]

//! Core data model for flame graph rendering.
//!
//! A raw weighted tree ([`raw::RawNode`]) is flattened once into a
//! [`layout::Layout`]: an index-addressable arena of nodes with normalized
//! horizontal coordinates and a depth-indexed level list. The layout is
//! immutable for the lifetime of a rendering session; navigation and
//! rendering consume it without copying.

pub mod color;
pub mod layout;
pub mod logging;
pub mod raw;
pub mod viewport;

pub use layout::{FlattenError, Layout, LayoutNode, MAX_DEPTH, Uid};
pub use raw::RawNode;
pub use viewport::FocusFrame;
