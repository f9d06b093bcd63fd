//! Abstract input oracle consumed by the simulation.

use glam::Vec2;

/// Logical keys the simulation reacts to.
///
/// Adapters decide which physical buttons feed each logical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Move the player towards decreasing `x`.
    Left,
    /// Move the player towards increasing `x`.
    Right,
    /// Jump impulse, consumed on the tick it is pressed.
    Jump,
    /// Reset the player to the spawn point.
    Respawn,
    /// Advance to the next colour theme.
    CycleTheme,
    /// Toggle the debug overlay.
    ToggleDebug,
    /// Inspect the tile under the cursor while the debug overlay is shown.
    Inspect,
    /// Stop the frame pump.
    Quit,
}

impl Key {
    /// Every logical key, in declaration order.
    pub const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Jump,
        Key::Respawn,
        Key::CycleTheme,
        Key::ToggleDebug,
        Key::Inspect,
        Key::Quit,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Compact set of logical keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeySet(u16);

impl KeySet {
    /// Set containing no keys.
    pub const EMPTY: KeySet = KeySet(0);

    /// Adds the key to the set.
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    /// Reports whether the key is part of the set.
    #[must_use]
    pub const fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Reports whether the set holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Keys contained in either set.
    #[must_use]
    pub const fn union(self, other: KeySet) -> KeySet {
        KeySet(self.0 | other.0)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Discrete input queries answered once per tick.
pub trait InputOracle {
    /// Reports whether the key is currently held down.
    fn is_held(&self, key: Key) -> bool;

    /// Reports whether the key went down during this tick.
    fn was_pressed(&self, key: Key) -> bool;

    /// Cursor position in logical screen coordinates.
    fn cursor_position(&self) -> Vec2;
}

/// Input snapshot gathered by an adapter before a tick runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Keys held down during the tick.
    pub held: KeySet,
    /// Keys whose press edge was observed this tick.
    pub pressed: KeySet,
    /// Cursor position in logical screen coordinates.
    pub cursor: Vec2,
}

impl FrameInput {
    /// Returns a copy with the key marked as held.
    #[must_use]
    pub fn with_held(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Returns a copy with the key marked as pressed this tick.
    ///
    /// A freshly pressed key is also held.
    #[must_use]
    pub fn with_pressed(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self.held.insert(key);
        self
    }

    /// Returns a copy with the cursor moved to the provided position.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Vec2) -> Self {
        self.cursor = cursor;
        self
    }

    /// Returns a copy that keeps held keys but drops every press edge.
    ///
    /// Used when one rendered frame drives several simulation ticks so a
    /// single key press is not replayed.
    #[must_use]
    pub fn without_edges(self) -> Self {
        Self {
            pressed: KeySet::EMPTY,
            ..self
        }
    }
}

impl InputOracle for FrameInput {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }
}
