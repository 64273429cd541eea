#![forbid(unsafe_code)]

//! Navigation state machine.
//!
//! [`NavController`] maintains two independent cursors into an immutable
//! [`Layout`]: the *focus* (the node defining the zoom frame) and the
//! *keyboard cursor* (the node directional commands act on). Pointer
//! selection changes the focus directly; keyboard movement only changes
//! the cursor until a confirm commits it.
//!
//! The controller also keeps the *ancestor stack*: the root-down path of
//! the last descent. Moving to the parent does not discard the deeper part
//! of that path, which is what lets a following child-move restore the
//! previously visited descendant instead of snapping to the first child.
//! Lateral and jump moves rebuild the stack to the exact root-to-cursor
//! path.
//!
//! Blocked movements (level edges, the focus-span constraint, a leaf with
//! no children) are defined no-op outcomes, not errors.

use std::fmt;

use fgv_core::layout::{Layout, LayoutNode, Uid};
use fgv_core::viewport::FocusFrame;

use crate::command::{KeyBindings, KeyPress, NavCommand};
use crate::hooks::{NavHooks, PointerEvent};

/// Tolerance for the focus-span test, absorbing float dust accumulated by
/// sibling packing.
const SPAN_EPS: f64 = 1e-9;

/// Direction of a lateral (same-level) move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lateral {
    /// Toward the previous sibling slot (left).
    Prev,
    /// Toward the next sibling slot (right).
    Next,
}

impl Lateral {
    /// Index offset within the level list.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Why a navigation command was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavNoopReason {
    /// No keyboard cursor exists and the command has no entry transition.
    CursorAbsent,
    /// The cursor node has no children to descend into.
    NoChild,
    /// A lateral move ran off the end of the level (no wraparound).
    AtLevelEdge,
    /// The lateral candidate lies outside the focused node's span and is
    /// not visually reachable at the current zoom.
    OutsideFocusSpan,
}

/// Observable result of one navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The cursor moved to (or re-landed on) the named node.
    Moved {
        /// The new cursor uid.
        uid: Uid,
    },
    /// The cursor was absent and got re-initialized to the root.
    Entered,
    /// A parent-move from the root cleared the cursor and stack.
    Exited,
    /// The focus changed to the named node.
    Focused {
        /// The new focus uid.
        uid: Uid,
    },
    /// Nothing happened; state is untouched.
    Ignored(NavNoopReason),
}

/// A navigation request that named a node not present in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The uid is not in the layout.
    UnknownUid(Uid),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUid(uid) => write!(f, "unknown node uid {uid:?}"),
        }
    }
}

impl std::error::Error for NavError {}

/// Focus and keyboard-cursor state over a borrowed layout.
///
/// The layout must outlive the controller; the controller holds uid
/// references into it and never copies node records.
#[derive(Debug)]
pub struct NavController<'a> {
    layout: &'a Layout,
    bindings: KeyBindings,
    hooks: NavHooks<'a>,
    focus: Uid,
    cursor: Option<Uid>,
    stack: Vec<Uid>,
}

impl<'a> NavController<'a> {
    /// Keyboard-enabled controller: focus and cursor both start at the
    /// root, with a single-element ancestor stack.
    #[must_use]
    pub fn new(layout: &'a Layout, hooks: NavHooks<'a>) -> Self {
        let root = layout.root().to_string();
        Self {
            layout,
            bindings: KeyBindings::default(),
            hooks,
            focus: root.clone(),
            cursor: Some(root.clone()),
            stack: vec![root],
        }
    }

    /// Pointer-only controller: focus starts at the root, no keyboard
    /// cursor until a directional command arrives.
    #[must_use]
    pub fn without_keyboard(layout: &'a Layout, hooks: NavHooks<'a>) -> Self {
        let root = layout.root().to_string();
        Self {
            layout,
            bindings: KeyBindings::default(),
            hooks,
            focus: root,
            cursor: None,
            stack: Vec::new(),
        }
    }

    /// Replace the key binding table.
    #[must_use]
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// The layout this controller navigates.
    #[must_use]
    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    /// The current binding table.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Mutable access to the binding table.
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Uid of the focused (zoomed) node.
    #[must_use]
    pub fn focus_uid(&self) -> &str {
        &self.focus
    }

    /// The focused node record. Focus uids are validated on every write,
    /// so this falls back to the root only if the layout was swapped out
    /// from under the controller (which the lifetime prevents).
    #[must_use]
    pub fn focus_node(&self) -> &'a LayoutNode {
        let layout = self.layout;
        layout.get(&self.focus).unwrap_or_else(|| layout.root_node())
    }

    /// The focus span, ready for the viewport renderer's scaling.
    #[must_use]
    pub fn focus_frame(&self) -> FocusFrame {
        FocusFrame::from_node(self.focus_node())
    }

    /// Uid of the keyboard cursor, if one exists.
    #[must_use]
    pub fn cursor_uid(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// The keyboard cursor's node record, if a cursor exists.
    #[must_use]
    pub fn cursor_node(&self) -> Option<&'a LayoutNode> {
        self.cursor_state().map(|(_, node)| node)
    }

    /// The cached root-down descent path. Its prefix up to the cursor's
    /// depth always matches the layout's parent links.
    #[must_use]
    pub fn ancestor_stack(&self) -> &[Uid] {
        &self.stack
    }

    /// Set the focus directly (the pointer-driven "zoom" path).
    ///
    /// Fires the focus-change hook on success.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownUid`] when the uid is not in the layout; state is
    /// left untouched.
    pub fn set_focus(&mut self, uid: &str) -> Result<(), NavError> {
        if self.apply_focus(uid) {
            Ok(())
        } else {
            Err(NavError::UnknownUid(uid.to_string()))
        }
    }

    /// Commit the keyboard cursor as the new focus. Ignored when no cursor
    /// exists.
    pub fn confirm(&mut self) -> NavOutcome {
        match self.cursor.clone() {
            Some(uid) => {
                self.apply_focus(&uid);
                NavOutcome::Focused { uid }
            }
            None => NavOutcome::Ignored(NavNoopReason::CursorAbsent),
        }
    }

    /// Move the cursor to its parent.
    ///
    /// From the root this exits navigation entirely (cursor and stack are
    /// cleared); any later directional command re-enters at the root. The
    /// deeper stack entries survive an ordinary parent-move so the next
    /// child-move can restore them.
    pub fn move_to_parent(&mut self) -> NavOutcome {
        let Some((_, node)) = self.cursor_state() else {
            return NavOutcome::Ignored(NavNoopReason::CursorAbsent);
        };
        match node.parent_uid.clone() {
            Some(parent) => {
                self.cursor = Some(parent.clone());
                NavOutcome::Moved { uid: parent }
            }
            None => {
                self.cursor = None;
                self.stack.clear();
                NavOutcome::Exited
            }
        }
    }

    /// Move the cursor down one level.
    ///
    /// Restores the cached descent path when one extends below the cursor;
    /// otherwise takes the first child. Ignored on a leaf.
    pub fn move_to_child(&mut self) -> NavOutcome {
        let Some((_, node)) = self.cursor_state() else {
            return self.enter_at_root();
        };
        let child_depth = node.depth + 1;
        if self.stack.len() > child_depth {
            let uid = self.stack[child_depth].clone();
            self.cursor = Some(uid.clone());
            return NavOutcome::Moved { uid };
        }
        match node.child_uids.first() {
            Some(child) => {
                let uid = child.clone();
                self.stack.push(uid.clone());
                self.cursor = Some(uid.clone());
                NavOutcome::Moved { uid }
            }
            None => NavOutcome::Ignored(NavNoopReason::NoChild),
        }
    }

    /// Move the cursor one slot left or right within its level.
    ///
    /// No wraparound, and the candidate must lie within the focused node's
    /// horizontal span; otherwise the move is ignored.
    pub fn move_lateral(&mut self, direction: Lateral) -> NavOutcome {
        let Some((cursor, node)) = self.cursor_state() else {
            return self.enter_at_root();
        };
        let layout = self.layout;
        let level = layout.level(node.depth);
        let Some(index) = level.iter().position(|uid| *uid == cursor) else {
            return NavOutcome::Ignored(NavNoopReason::CursorAbsent);
        };

        let new_index = index as isize + direction.offset();
        if new_index < 0 || new_index >= level.len() as isize {
            return NavOutcome::Ignored(NavNoopReason::AtLevelEdge);
        }
        let candidate_uid = level[new_index as usize].clone();
        let Some(candidate) = layout.get(&candidate_uid) else {
            return NavOutcome::Ignored(NavNoopReason::CursorAbsent);
        };

        let focus = self.focus_node();
        if candidate.left < focus.left - SPAN_EPS
            || candidate.left + candidate.width > focus.left + focus.width + SPAN_EPS
        {
            return NavOutcome::Ignored(NavNoopReason::OutsideFocusSpan);
        }

        self.jump_to(candidate_uid)
    }

    /// Jump to the leftmost node of the cursor's level.
    ///
    /// Unlike lateral movement this ignores the focus span (a deliberate
    /// jump-to-extreme override). Ignored when no cursor exists.
    pub fn move_to_first(&mut self) -> NavOutcome {
        let Some((cursor, node)) = self.cursor_state() else {
            return NavOutcome::Ignored(NavNoopReason::CursorAbsent);
        };
        let uid = self
            .layout
            .level(node.depth)
            .first()
            .cloned()
            .unwrap_or(cursor);
        self.jump_to(uid)
    }

    /// Jump to the rightmost node of the cursor's level. Same contract as
    /// [`Self::move_to_first`].
    pub fn move_to_last(&mut self) -> NavOutcome {
        let Some((cursor, node)) = self.cursor_state() else {
            return NavOutcome::Ignored(NavNoopReason::CursorAbsent);
        };
        let uid = self
            .layout
            .level(node.depth)
            .last()
            .cloned()
            .unwrap_or(cursor);
        self.jump_to(uid)
    }

    /// Execute one logical command.
    pub fn run(&mut self, command: NavCommand) -> NavOutcome {
        #[cfg(feature = "tracing")]
        tracing::trace!(?command, "nav command");
        match command {
            NavCommand::Confirm => self.confirm(),
            NavCommand::Parent => self.move_to_parent(),
            NavCommand::Child => self.move_to_child(),
            NavCommand::PrevSibling => self.move_lateral(Lateral::Prev),
            NavCommand::NextSibling => self.move_lateral(Lateral::Next),
            NavCommand::FirstInLevel => self.move_to_first(),
            NavCommand::LastInLevel => self.move_to_last(),
        }
    }

    /// Look up the key in the binding table and execute the bound command.
    ///
    /// `None` means the key is unbound and the host should keep its default
    /// handling; `Some` means the input was consumed.
    pub fn dispatch_key(&mut self, press: impl Into<KeyPress>) -> Option<NavOutcome> {
        let command = self.bindings.command_for(&press.into())?;
        Some(self.run(command))
    }

    /// Pointer-driven zoom: identical to [`Self::set_focus`].
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownUid`] when the uid is not in the layout.
    pub fn pointer_focus(&mut self, uid: &str) -> Result<(), NavError> {
        self.set_focus(uid)
    }

    /// Forward a pointer-enter over the named node to the hover hook.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownUid`] when the uid is not in the layout.
    pub fn pointer_enter(&mut self, event: &PointerEvent, uid: &str) -> Result<(), NavError> {
        let layout = self.layout;
        let node = lookup(layout, uid)?;
        if let Some(hook) = self.hooks.on_hover_enter.as_mut() {
            hook(event, &node.source);
        }
        Ok(())
    }

    /// Forward a pointer-leave over the named node to the hover hook.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownUid`] when the uid is not in the layout.
    pub fn pointer_leave(&mut self, event: &PointerEvent, uid: &str) -> Result<(), NavError> {
        let layout = self.layout;
        let node = lookup(layout, uid)?;
        if let Some(hook) = self.hooks.on_hover_leave.as_mut() {
            hook(event, &node.source);
        }
        Ok(())
    }

    /// Forward a pointer-move within the named node to the hover hook.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownUid`] when the uid is not in the layout.
    pub fn pointer_move(&mut self, event: &PointerEvent, uid: &str) -> Result<(), NavError> {
        let layout = self.layout;
        let node = lookup(layout, uid)?;
        if let Some(hook) = self.hooks.on_hover_move.as_mut() {
            hook(event, &node.source);
        }
        Ok(())
    }

    fn cursor_state(&self) -> Option<(Uid, &'a LayoutNode)> {
        let layout = self.layout;
        let uid = self.cursor.clone()?;
        let node = layout.get(&uid)?;
        Some((uid, node))
    }

    fn apply_focus(&mut self, uid: &str) -> bool {
        let layout = self.layout;
        let Some(node) = layout.get(uid) else {
            return false;
        };
        self.focus = node.uid.clone();
        #[cfg(feature = "tracing")]
        tracing::debug!(uid = %node.uid, "focus changed");
        if let Some(hook) = self.hooks.on_focus_change.as_mut() {
            hook(node, &node.uid);
        }
        true
    }

    fn enter_at_root(&mut self) -> NavOutcome {
        let root = self.layout.root().to_string();
        self.stack = vec![root.clone()];
        self.cursor = Some(root);
        NavOutcome::Entered
    }

    /// Land the cursor on `uid`, rebuilding the stack to the exact
    /// root-to-node path (this drops any cached deeper tail).
    fn jump_to(&mut self, uid: Uid) -> NavOutcome {
        self.stack = self.build_stack(&uid);
        self.cursor = Some(uid.clone());
        NavOutcome::Moved { uid }
    }

    fn build_stack(&self, uid: &str) -> Vec<Uid> {
        let layout = self.layout;
        let mut stack = Vec::new();
        let mut current = layout.get(uid);
        while let Some(node) = current {
            stack.push(node.uid.clone());
            current = node.parent_uid.as_deref().and_then(|p| layout.get(p));
        }
        stack.reverse();
        stack
    }
}

fn lookup<'a>(layout: &'a Layout, uid: &str) -> Result<&'a LayoutNode, NavError> {
    layout
        .get(uid)
        .ok_or_else(|| NavError::UnknownUid(uid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Key;
    use fgv_core::raw::RawNode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_level() -> Layout {
        let raw = RawNode::new("root", 10.0)
            .child(RawNode::new("a", 4.0))
            .child(RawNode::new("b", 6.0));
        Layout::from_raw(&raw).unwrap()
    }

    fn deep_chain() -> Layout {
        let raw = RawNode::new("root", 4.0)
            .with_id("root")
            .child(RawNode::new("mid", 4.0).with_id("mid").child(
                RawNode::new("leaf", 4.0).with_id("leaf"),
            ));
        Layout::from_raw(&raw).unwrap()
    }

    /// Two subtrees with one child each, ids spelled out.
    fn focus_tree() -> Layout {
        let raw = RawNode::new("root", 10.0)
            .with_id("root")
            .child(
                RawNode::new("a", 4.0)
                    .with_id("a")
                    .child(RawNode::new("a1", 4.0).with_id("a1")),
            )
            .child(
                RawNode::new("b", 6.0)
                    .with_id("b")
                    .child(RawNode::new("b1", 6.0).with_id("b1")),
            );
        Layout::from_raw(&raw).unwrap()
    }

    #[test]
    fn new_seeds_root_cursor() {
        let layout = two_level();
        let nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(nav.focus_uid(), "_0");
        assert_eq!(nav.cursor_uid(), Some("_0"));
        assert_eq!(nav.ancestor_stack(), ["_0".to_string()]);
    }

    #[test]
    fn without_keyboard_has_no_cursor() {
        let layout = two_level();
        let nav = NavController::without_keyboard(&layout, NavHooks::new());
        assert_eq!(nav.focus_uid(), "_0");
        assert_eq!(nav.cursor_uid(), None);
        assert!(nav.ancestor_stack().is_empty());
    }

    #[test]
    fn confirm_commits_cursor_and_fires_hook() {
        let layout = two_level();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let hooks = NavHooks::new().on_focus_change(move |node, uid| {
            assert_eq!(node.uid, uid);
            sink.borrow_mut().push(uid.to_string());
        });
        let mut nav = NavController::new(&layout, hooks);

        assert_eq!(
            nav.move_to_child(),
            NavOutcome::Moved { uid: "_1".into() }
        );
        assert_eq!(nav.focus_uid(), "_0");
        assert_eq!(nav.confirm(), NavOutcome::Focused { uid: "_1".into() });
        assert_eq!(nav.focus_uid(), "_1");
        assert_eq!(*seen.borrow(), vec!["_1".to_string()]);
    }

    #[test]
    fn confirm_without_cursor_is_ignored() {
        let layout = two_level();
        let mut nav = NavController::without_keyboard(&layout, NavHooks::new());
        assert_eq!(
            nav.confirm(),
            NavOutcome::Ignored(NavNoopReason::CursorAbsent)
        );
        assert_eq!(nav.focus_uid(), "_0");
    }

    #[test]
    fn set_focus_rejects_unknown_uid() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(
            nav.set_focus("ghost"),
            Err(NavError::UnknownUid("ghost".into()))
        );
        assert_eq!(nav.focus_uid(), "_0");
    }

    #[test]
    fn parent_from_root_exits_and_child_reenters() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(nav.move_to_parent(), NavOutcome::Exited);
        assert_eq!(nav.cursor_uid(), None);
        assert!(nav.ancestor_stack().is_empty());

        assert_eq!(nav.move_to_child(), NavOutcome::Entered);
        assert_eq!(nav.cursor_uid(), Some("_0"));
        assert_eq!(nav.ancestor_stack(), ["_0".to_string()]);
    }

    #[test]
    fn parent_move_is_ignored_without_cursor() {
        let layout = two_level();
        let mut nav = NavController::without_keyboard(&layout, NavHooks::new());
        assert_eq!(
            nav.move_to_parent(),
            NavOutcome::Ignored(NavNoopReason::CursorAbsent)
        );
    }

    #[test]
    fn descend_restores_previous_path() {
        let layout = deep_chain();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(nav.move_to_child(), NavOutcome::Moved { uid: "mid".into() });
        assert_eq!(nav.move_to_child(), NavOutcome::Moved { uid: "leaf".into() });
        assert_eq!(nav.ancestor_stack().len(), 3);

        assert_eq!(nav.move_to_parent(), NavOutcome::Moved { uid: "mid".into() });
        // The deeper entry stayed cached.
        assert_eq!(nav.ancestor_stack().len(), 3);
        assert_eq!(nav.move_to_child(), NavOutcome::Moved { uid: "leaf".into() });
        assert_eq!(nav.cursor_uid(), Some("leaf"));
    }

    #[test]
    fn child_move_on_leaf_is_ignored() {
        let layout = deep_chain();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.move_to_child();
        nav.move_to_child();
        let stack_before = nav.ancestor_stack().to_vec();
        assert_eq!(
            nav.move_to_child(),
            NavOutcome::Ignored(NavNoopReason::NoChild)
        );
        assert_eq!(nav.cursor_uid(), Some("leaf"));
        assert_eq!(nav.ancestor_stack(), stack_before.as_slice());
    }

    #[test]
    fn lateral_moves_within_level_and_stops_at_edges() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.move_to_child();

        assert_eq!(
            nav.move_lateral(Lateral::Next),
            NavOutcome::Moved { uid: "_2".into() }
        );
        assert_eq!(nav.ancestor_stack(), ["_0".to_string(), "_2".to_string()]);

        // Rightmost slot: no wraparound, state untouched.
        assert_eq!(
            nav.move_lateral(Lateral::Next),
            NavOutcome::Ignored(NavNoopReason::AtLevelEdge)
        );
        assert_eq!(nav.cursor_uid(), Some("_2"));
        assert_eq!(nav.ancestor_stack(), ["_0".to_string(), "_2".to_string()]);

        assert_eq!(
            nav.move_lateral(Lateral::Prev),
            NavOutcome::Moved { uid: "_1".into() }
        );
        assert_eq!(
            nav.move_lateral(Lateral::Prev),
            NavOutcome::Ignored(NavNoopReason::AtLevelEdge)
        );
    }

    #[test]
    fn lateral_from_absent_cursor_enters_root() {
        let layout = two_level();
        let mut nav = NavController::without_keyboard(&layout, NavHooks::new());
        assert_eq!(nav.move_lateral(Lateral::Next), NavOutcome::Entered);
        assert_eq!(nav.cursor_uid(), Some("_0"));
    }

    #[test]
    fn lateral_respects_focus_span() {
        let layout = focus_tree();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.set_focus("a").unwrap();
        nav.move_to_child(); // a
        nav.move_to_child(); // a1

        assert_eq!(
            nav.move_lateral(Lateral::Next),
            NavOutcome::Ignored(NavNoopReason::OutsideFocusSpan)
        );
        assert_eq!(nav.cursor_uid(), Some("a1"));
    }

    #[test]
    fn lateral_allows_full_span_under_root_focus() {
        let layout = focus_tree();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.move_to_child(); // a
        nav.move_to_child(); // a1
        assert_eq!(
            nav.move_lateral(Lateral::Next),
            NavOutcome::Moved { uid: "b1".into() }
        );
        assert_eq!(
            nav.ancestor_stack(),
            ["root".to_string(), "b".to_string(), "b1".to_string()]
        );
    }

    #[test]
    fn first_and_last_ignore_focus_span() {
        let layout = focus_tree();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.set_focus("a").unwrap();
        nav.move_to_child();
        nav.move_to_child(); // a1, focus pinned to "a"

        assert_eq!(nav.move_to_last(), NavOutcome::Moved { uid: "b1".into() });
        assert_eq!(
            nav.ancestor_stack(),
            ["root".to_string(), "b".to_string(), "b1".to_string()]
        );
        assert_eq!(nav.move_to_first(), NavOutcome::Moved { uid: "a1".into() });
    }

    #[test]
    fn first_last_without_cursor_are_ignored() {
        let layout = two_level();
        let mut nav = NavController::without_keyboard(&layout, NavHooks::new());
        assert_eq!(
            nav.move_to_first(),
            NavOutcome::Ignored(NavNoopReason::CursorAbsent)
        );
        assert_eq!(
            nav.move_to_last(),
            NavOutcome::Ignored(NavNoopReason::CursorAbsent)
        );
    }

    #[test]
    fn jump_rebuilds_stack_and_drops_memo() {
        let layout = Layout::from_raw(
            &RawNode::new("root", 10.0)
                .with_id("root")
                .child(
                    RawNode::new("a", 10.0)
                        .with_id("a")
                        .child(RawNode::new("a1", 4.0).with_id("a1"))
                        .child(RawNode::new("a2", 6.0).with_id("a2")),
                ),
        )
        .unwrap();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.move_to_child(); // a
        nav.move_to_child(); // a1
        nav.move_lateral(Lateral::Next); // a2
        nav.move_to_parent(); // a, memo tail = a2

        assert_eq!(nav.move_to_first(), NavOutcome::Moved { uid: "a".into() });
        assert_eq!(nav.ancestor_stack(), ["root".to_string(), "a".to_string()]);
        // The memo is gone: descending snaps to the first child again.
        assert_eq!(nav.move_to_child(), NavOutcome::Moved { uid: "a1".into() });
    }

    #[test]
    fn dispatch_key_runs_bound_command() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(
            nav.dispatch_key(Key::Down),
            Some(NavOutcome::Moved { uid: "_1".into() })
        );
        assert_eq!(
            nav.dispatch_key(Key::Char(' ')),
            Some(NavOutcome::Focused { uid: "_1".into() })
        );
        assert_eq!(nav.focus_uid(), "_1");
    }

    #[test]
    fn dispatch_unbound_key_returns_none() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(nav.dispatch_key(Key::Escape), None);
        assert_eq!(nav.cursor_uid(), Some("_0"));
    }

    #[test]
    fn pointer_focus_fires_hook() {
        let layout = two_level();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let hooks = NavHooks::new().on_focus_change(move |_, uid| {
            sink.borrow_mut().push(uid.to_string());
        });
        let mut nav = NavController::without_keyboard(&layout, hooks);
        nav.pointer_focus("_2").unwrap();
        assert_eq!(nav.focus_uid(), "_2");
        assert_eq!(*seen.borrow(), vec!["_2".to_string()]);
    }

    #[test]
    fn pointer_hover_forwards_raw_source() {
        let layout = two_level();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let hooks = NavHooks::new().on_hover_enter(move |event, raw| {
            assert_eq!(event.x, 3.0);
            sink.borrow_mut().push(raw.name.clone());
        });
        let mut nav = NavController::new(&layout, hooks);
        nav.pointer_enter(&PointerEvent::at(3.0, 7.0), "_2").unwrap();
        assert_eq!(*seen.borrow(), vec!["b".to_string()]);
    }

    #[test]
    fn pointer_hover_without_hook_is_fine() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        let event = PointerEvent::default();
        nav.pointer_enter(&event, "_1").unwrap();
        nav.pointer_move(&event, "_1").unwrap();
        nav.pointer_leave(&event, "_1").unwrap();
    }

    #[test]
    fn pointer_hover_unknown_uid_errors() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        assert_eq!(
            nav.pointer_enter(&PointerEvent::default(), "ghost"),
            Err(NavError::UnknownUid("ghost".into()))
        );
    }

    #[test]
    fn focus_frame_tracks_focus() {
        let layout = two_level();
        let mut nav = NavController::new(&layout, NavHooks::new());
        nav.set_focus("_2").unwrap();
        let frame = nav.focus_frame();
        assert!((frame.left - 0.4).abs() < 1e-9);
        assert!((frame.width - 0.6).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_command() -> impl Strategy<Value = NavCommand> {
            prop_oneof![
                Just(NavCommand::Confirm),
                Just(NavCommand::Parent),
                Just(NavCommand::Child),
                Just(NavCommand::PrevSibling),
                Just(NavCommand::NextSibling),
                Just(NavCommand::FirstInLevel),
                Just(NavCommand::LastInLevel),
            ]
        }

        fn check_invariants(nav: &NavController<'_>) -> Result<(), TestCaseError> {
            let layout = nav.layout();
            prop_assert!(layout.contains(nav.focus_uid()));
            match nav.cursor_uid() {
                Some(cursor) => {
                    let node = layout.get(cursor).unwrap();
                    let stack = nav.ancestor_stack();
                    prop_assert!(stack.len() > node.depth);
                    prop_assert_eq!(stack[node.depth].as_str(), cursor);
                    prop_assert_eq!(stack[0].as_str(), layout.root());
                    for pair in stack.windows(2) {
                        let child = layout.get(&pair[1]).unwrap();
                        prop_assert_eq!(
                            child.parent_uid.as_deref(),
                            Some(pair[0].as_str())
                        );
                    }
                }
                None => prop_assert!(nav.ancestor_stack().is_empty()),
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn any_command_sequence_preserves_invariants(
                commands in proptest::collection::vec(arb_command(), 0..40)
            ) {
                let layout = focus_tree();
                let mut nav = NavController::new(&layout, NavHooks::new());
                for command in commands {
                    nav.run(command);
                    check_invariants(&nav)?;
                }
            }

            #[test]
            fn ignored_commands_leave_state_untouched(
                commands in proptest::collection::vec(arb_command(), 0..40)
            ) {
                let layout = focus_tree();
                let mut nav = NavController::new(&layout, NavHooks::new());
                for command in commands {
                    let cursor_before = nav.cursor_uid().map(str::to_string);
                    let stack_before = nav.ancestor_stack().to_vec();
                    let focus_before = nav.focus_uid().to_string();
                    if let NavOutcome::Ignored(_) = nav.run(command) {
                        prop_assert_eq!(nav.cursor_uid().map(str::to_string), cursor_before);
                        prop_assert_eq!(nav.ancestor_stack(), stack_before.as_slice());
                        prop_assert_eq!(nav.focus_uid(), focus_before);
                    }
                }
            }
        }
    }
}
