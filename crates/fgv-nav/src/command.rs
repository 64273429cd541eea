#![forbid(unsafe_code)]

//! Logical navigation commands and key bindings.
//!
//! The state machine only understands [`NavCommand`]s. Physical input is
//! mapped to commands through a rebindable [`KeyBindings`] table, so no
//! platform key-naming scheme leaks into the traversal logic.

use std::collections::HashMap;

use bitflags::bitflags;

/// A logical navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    /// Commit the keyboard cursor as the new focus.
    Confirm,
    /// Move the cursor to its parent (or exit navigation from the root).
    Parent,
    /// Move the cursor to a child, restoring the last descended path.
    Child,
    /// Move one slot left within the current level.
    PrevSibling,
    /// Move one slot right within the current level.
    NextSibling,
    /// Jump to the leftmost node of the current level.
    FirstInLevel,
    /// Jump to the rightmost node of the current level.
    LastInLevel,
}

/// Platform-neutral key identity.
///
/// Hosts translate whatever their input layer produces into this before
/// dispatch; only keys that can carry a binding are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A regular character key (`Char(' ')` is the space bar).
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Function key (F1-F24).
    F(u8),
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL = 0b0010;
        /// Alt/Option key.
        const ALT = 0b0100;
        /// Super/Command/Windows key.
        const SUPER = 0b1000;
    }
}

/// A key together with its modifiers; the unit keyed by the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The logical key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// A press with no modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A press with the given modifiers.
    #[must_use]
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// Mapping from physical key presses to logical commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<KeyPress, NavCommand>,
}

impl Default for KeyBindings {
    /// The conventional flame graph bindings: Space confirms, arrows move,
    /// Home/End jump to the level extremes.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(Key::Char(' '), NavCommand::Confirm);
        bindings.bind(Key::Up, NavCommand::Parent);
        bindings.bind(Key::Down, NavCommand::Child);
        bindings.bind(Key::Left, NavCommand::PrevSibling);
        bindings.bind(Key::Right, NavCommand::NextSibling);
        bindings.bind(Key::Home, NavCommand::FirstInLevel);
        bindings.bind(Key::End, NavCommand::LastInLevel);
        bindings
    }
}

impl KeyBindings {
    /// A table with no bindings at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a key press to a command, replacing any previous binding.
    pub fn bind(&mut self, press: impl Into<KeyPress>, command: NavCommand) {
        self.map.insert(press.into(), command);
    }

    /// Remove a binding. Returns the command it carried, if any.
    pub fn unbind(&mut self, press: impl Into<KeyPress>) -> Option<NavCommand> {
        self.map.remove(&press.into())
    }

    /// The command bound to a press. `Some` also signals the host to
    /// suppress its default handling of that input.
    #[must_use]
    pub fn command_for(&self, press: &KeyPress) -> Option<NavCommand> {
        self.map.get(press).copied()
    }

    /// Number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
