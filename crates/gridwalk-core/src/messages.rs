//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use crate::screen::ScreenPos;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Space,
    /// Any other printable character.
    Char(char),
}

/// A mouse button held down, either just pressed or dragged over a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Left button.
    Main,
    /// Right button.
    Secondary,
}

/// A message delivered to [`Model::update`](crate::app::Model::update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Sent once before any input.
    Init,
    KeyDown { key: Key },
    Mouse { action: MouseAction, pos: ScreenPos },
    /// The terminal was resized.
    Resize { width: i32, height: i32 },
    /// Sent once per loop iteration while the model asked for animation.
    Tick,
    /// The back-end asked to quit.
    Quit,
}

impl Msg {
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    pub fn mouse(action: MouseAction, pos: ScreenPos) -> Self {
        Self::Mouse { action, pos }
    }
}
