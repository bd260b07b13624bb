/// Logical key the player can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Soft drop while held.
    Down,
    /// Rotate clockwise.
    Up,
    /// Shift one column left.
    Left,
    /// Shift one column right.
    Right,
}

/// Key event delivered by the host's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum InputEvent {
    /// Key pressed. `repeat` is set for auto-repeat presses while held.
    KeyDown { key: Direction, repeat: bool },
    /// Key released.
    KeyUp { key: Direction },
}

impl InputEvent {
    #[must_use]
    pub const fn press(key: Direction) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    #[must_use]
    pub const fn repeat(key: Direction) -> Self {
        Self::KeyDown { key, repeat: true }
    }

    #[must_use]
    pub const fn release(key: Direction) -> Self {
        Self::KeyUp { key }
    }
}
