#![forbid(unsafe_code)]

//! Tree flattening.
//!
//! [`Layout::from_raw`] converts a raw weighted tree into the flat,
//! index-addressable form everything downstream consumes: an arena of
//! [`LayoutNode`]s keyed by uid, a depth-indexed list of the uids on each
//! level (left to right), and normalized horizontal coordinates where the
//! root always spans `[0, 1)`.
//!
//! The transform is a single pre-order pass. It either succeeds completely
//! or fails fast with a [`FlattenError`]; no partial layout is ever
//! produced.

use std::collections::HashMap;
use std::fmt;

use crate::color;
use crate::raw::RawNode;

/// Stable node identifier: either the raw node's supplied `id` or a
/// synthesized `_N` from the pre-order visit counter.
pub type Uid = String;

/// Maximum tree depth the flattener will recurse into. Deeper input is
/// rejected with [`FlattenError::DepthLimitExceeded`] instead of risking
/// call-stack exhaustion.
pub const MAX_DEPTH: usize = 512;

/// One flattened node.
///
/// `left` and `width` are normalized to the root's value: the root occupies
/// `[0, 1)`, a child's `left` starts at its parent's `left` and advances by
/// each prior sibling's `width`, so siblings pack contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    /// Stable identifier, unique across the whole layout.
    pub uid: Uid,
    /// Display label.
    pub name: String,
    /// 0 for the root, `parent.depth + 1` otherwise.
    pub depth: usize,
    /// Normalized left edge in `[0, 1]`.
    pub left: f64,
    /// Normalized width: `value / root_value`. Zero-weight nodes keep a
    /// zero width and stay addressable.
    pub width: f64,
    /// Fill color (explicit, or gradient-derived from the weight ratio).
    pub background_color: String,
    /// Label color (explicit, or gradient-derived).
    pub color: String,
    /// Tooltip text, if any.
    pub tooltip: Option<String>,
    /// Parent uid; `None` only for the root.
    pub parent_uid: Option<Uid>,
    /// Child uids, left to right.
    pub child_uids: Vec<Uid>,
    /// The raw node's own fields. Its nested children are not duplicated
    /// here; they live on as `child_uids` into the arena.
    pub source: RawNode,
}

/// The flattened tree: arena, levels, root.
///
/// Immutable once built. A new raw tree produces a wholly new layout; there
/// is no incremental patching.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    root: Uid,
    levels: Vec<Vec<Uid>>,
    nodes: HashMap<Uid, LayoutNode>,
}

impl Layout {
    /// Flatten a raw weighted tree.
    ///
    /// # Errors
    ///
    /// Fails fast on malformed input: non-finite or negative values, a
    /// zero-valued root (normalization would be undefined), duplicate uids,
    /// or a tree deeper than [`MAX_DEPTH`].
    pub fn from_raw(raw: &RawNode) -> Result<Self, FlattenError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("flatten", root = %raw.name).entered();

        validate_value(raw)?;
        if raw.value == 0.0 {
            return Err(FlattenError::ZeroRootValue);
        }

        let mut cx = FlattenCx {
            root_value: raw.value,
            uid_counter: 0,
            nodes: HashMap::new(),
            levels: Vec::new(),
        };
        let (root, _) = convert_node(&mut cx, raw, 0, 0.0, None)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = cx.nodes.len(),
            depth = cx.levels.len(),
            "layout built"
        );

        Ok(Self {
            root,
            levels: cx.levels,
            nodes: cx.nodes,
        })
    }

    /// Uid of the root node.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root node record.
    #[must_use]
    pub fn root_node(&self) -> &LayoutNode {
        &self.nodes[&self.root]
    }

    /// Number of levels (max node depth + 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Look up a node by uid.
    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&LayoutNode> {
        self.nodes.get(uid)
    }

    /// Whether a uid names a node in this layout.
    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.nodes.contains_key(uid)
    }

    /// Uids at the given depth, left to right. Empty slice when out of range.
    #[must_use]
    pub fn level(&self, depth: usize) -> &[Uid] {
        self.levels.get(depth).map_or(&[], Vec::as_slice)
    }

    /// All levels, indexed by depth.
    #[must_use]
    pub fn levels(&self) -> &[Vec<Uid>] {
        &self.levels
    }

    /// Total node count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the layout holds no nodes. Never true for a built layout.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all node records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.values()
    }
}

/// Traversal context threaded through the pre-order walk. Keeping the uid
/// counter here (rather than in ambient state) keeps the transform a pure
/// function of its input.
struct FlattenCx {
    root_value: f64,
    uid_counter: u64,
    nodes: HashMap<Uid, LayoutNode>,
    levels: Vec<Vec<Uid>>,
}

fn validate_value(raw: &RawNode) -> Result<(), FlattenError> {
    if !raw.value.is_finite() {
        return Err(FlattenError::NonFiniteValue {
            name: raw.name.clone(),
        });
    }
    if raw.value < 0.0 {
        return Err(FlattenError::NegativeValue {
            name: raw.name.clone(),
            value: raw.value,
        });
    }
    Ok(())
}

/// Visit one node, record it, then recurse into its children while
/// advancing the running left offset by each child's width.
///
/// Returns the node's uid and normalized width so the parent can advance
/// its offset.
fn convert_node(
    cx: &mut FlattenCx,
    raw: &RawNode,
    depth: usize,
    left: f64,
    parent_uid: Option<&str>,
) -> Result<(Uid, f64), FlattenError> {
    if depth >= MAX_DEPTH {
        return Err(FlattenError::DepthLimitExceeded { limit: MAX_DEPTH });
    }
    validate_value(raw)?;

    let uid: Uid = match &raw.id {
        Some(id) => id.clone(),
        None => format!("_{}", cx.uid_counter),
    };
    let width = raw.value / cx.root_value;

    let node = LayoutNode {
        uid: uid.clone(),
        name: raw.name.clone(),
        depth,
        left,
        width,
        background_color: raw
            .background_color
            .clone()
            .unwrap_or_else(|| color::background_color_for(raw.value, cx.root_value).to_string()),
        color: raw
            .color
            .clone()
            .unwrap_or_else(|| color::text_color_for(raw.value, cx.root_value).to_string()),
        tooltip: raw.tooltip.clone(),
        parent_uid: parent_uid.map(str::to_string),
        child_uids: Vec::with_capacity(raw.children.len()),
        source: own_fields(raw),
    };
    if cx.nodes.insert(uid.clone(), node).is_some() {
        return Err(FlattenError::DuplicateUid { uid });
    }

    if cx.levels.len() <= depth {
        cx.levels.push(Vec::new());
    }
    cx.levels[depth].push(uid.clone());

    // The counter advances once per visited node even when the node
    // supplied its own id, so synthesized uids stay deterministic in
    // source order.
    cx.uid_counter += 1;

    let mut child_uids = Vec::with_capacity(raw.children.len());
    let mut offset = left;
    for child in &raw.children {
        let (child_uid, child_width) = convert_node(cx, child, depth + 1, offset, Some(&uid))?;
        offset += child_width;
        child_uids.push(child_uid);
    }
    if let Some(node) = cx.nodes.get_mut(&uid) {
        node.child_uids = child_uids;
    }

    Ok((uid, width))
}

/// The raw node's own fields, with the nested children left out (the arena
/// carries them as `child_uids`).
fn own_fields(raw: &RawNode) -> RawNode {
    RawNode {
        id: raw.id.clone(),
        name: raw.name.clone(),
        value: raw.value,
        children: Vec::new(),
        background_color: raw.background_color.clone(),
        color: raw.color.clone(),
        tooltip: raw.tooltip.clone(),
    }
}

/// Precondition violations detected while flattening.
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenError {
    /// A node's value was NaN or infinite.
    NonFiniteValue {
        /// Name of the offending node.
        name: String,
    },
    /// A node's value was negative.
    NegativeValue {
        /// Name of the offending node.
        name: String,
        /// The rejected value.
        value: f64,
    },
    /// The root's value was zero, so widths cannot be normalized.
    ZeroRootValue,
    /// Two nodes resolved to the same uid (supplied ids colliding with each
    /// other or with a synthesized `_N`).
    DuplicateUid {
        /// The colliding uid.
        uid: Uid,
    },
    /// The tree exceeded [`MAX_DEPTH`].
    DepthLimitExceeded {
        /// The enforced limit.
        limit: usize,
    },
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteValue { name } => {
                write!(f, "node {name:?} has a non-finite value")
            }
            Self::NegativeValue { name, value } => {
                write!(f, "node {name:?} has a negative value ({value})")
            }
            Self::ZeroRootValue => write!(f, "root value must be positive to normalize widths"),
            Self::DuplicateUid { uid } => write!(f, "duplicate node uid {uid:?}"),
            Self::DepthLimitExceeded { limit } => {
                write!(f, "tree exceeds the maximum depth of {limit}")
            }
        }
    }
}

impl std::error::Error for FlattenError {}
