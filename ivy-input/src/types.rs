use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Platform assigned mouse button identifier.
pub type ButtonCode = u16;

/// Identifies a capture target, such as a window, across host notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetId(pub u64);

/// Raw cursor movement as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CursorMoved {
    /// Absolute cursor position in viewport pixels
    pub position: Vec2,
    /// Movement since the previous notification, in pixels
    pub delta: Vec2,
    /// Cursor position relative to the element which received the notification.
    ///
    /// Only read for target scoped notifications.
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    pub fn is_pressed(&self) -> bool {
        matches!(self, ButtonState::Pressed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MouseInput {
    pub button: ButtonCode,
    pub state: ButtonState,
    /// Absolute cursor position in viewport pixels at the time of the press
    pub position: Vec2,
}

impl MouseInput {
    pub fn pressed(button: ButtonCode) -> Self {
        Self {
            button,
            state: ButtonState::Pressed,
            position: Vec2::ZERO,
        }
    }

    pub fn released(button: ButtonCode) -> Self {
        Self {
            button,
            state: ButtonState::Released,
            position: Vec2::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// The host's capture state changed.
///
/// A host may expose the currently captured element through several accessors. Each accessor
/// which reports an element contributes one entry; the bound target is considered locked if any
/// of them matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockChange {
    pub captured: Vec<TargetId>,
}

impl LockChange {
    /// Nothing is captured
    pub fn released() -> Self {
        Self::default()
    }

    pub fn captured(target: TargetId) -> Self {
        Self {
            captured: vec![target],
        }
    }

    pub fn is_captured(&self, target: TargetId) -> bool {
        self.captured.contains(&target)
    }
}
