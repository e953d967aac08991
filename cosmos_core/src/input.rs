// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard input types.

use bitflags::bitflags;

/// A pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Middle button (wheel click).
    Middle,
    /// Secondary button.
    Right,
    /// First extra button.
    X1,
    /// Second extra button.
    X2,
}

impl MouseButton {
    /// Returns the [`ButtonState`] bit for this button.
    #[must_use]
    pub const fn state(self) -> ButtonState {
        match self {
            Self::Left => ButtonState::LEFT,
            Self::Middle => ButtonState::MIDDLE,
            Self::Right => ButtonState::RIGHT,
            Self::X1 => ButtonState::X1,
            Self::X2 => ButtonState::X2,
        }
    }
}

bitflags! {
    /// Buttons held down while the pointer moves.
    ///
    /// Hover routing only runs when no button is held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonState: u8 {
        /// Primary button.
        const LEFT = 0b0000_0001;
        /// Middle button.
        const MIDDLE = 0b0000_0010;
        /// Secondary button.
        const RIGHT = 0b0000_0100;
        /// First extra button.
        const X1 = 0b0000_1000;
        /// Second extra button.
        const X2 = 0b0001_0000;
    }
}

bitflags! {
    /// Keyboard modifiers active during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CTRL = 0b0000_0010;
        /// Alt/Option key.
        const ALT = 0b0000_0100;
        /// Super/Command/Windows key.
        const SUPER = 0b0000_1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_state_bits() {
        let held = MouseButton::Left.state() | MouseButton::Right.state();
        assert!(held.contains(ButtonState::LEFT));
        assert!(!held.contains(ButtonState::MIDDLE));
        assert!(ButtonState::default().is_empty());
    }

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::ALT));
    }
}
