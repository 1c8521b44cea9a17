use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ButtonCode, ButtonState, PointerError, PointerEventKind};

/// The named mouse buttons and their fixed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Next,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::Back,
        MouseButton::Next,
    ];

    #[inline]
    pub fn code(self) -> ButtonCode {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Next => 4,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
            MouseButton::Back => "back",
            MouseButton::Next => "next",
        }
    }

    pub fn from_code(code: ButtonCode) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == code)
    }

    /// Looks up a button by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    /// Returns the button specific event for a press or release
    pub fn event(self, state: ButtonState) -> PointerEventKind {
        use PointerEventKind::*;
        match (self, state) {
            (MouseButton::Left, ButtonState::Pressed) => LeftDown,
            (MouseButton::Left, ButtonState::Released) => LeftUp,
            (MouseButton::Middle, ButtonState::Pressed) => MiddleDown,
            (MouseButton::Middle, ButtonState::Released) => MiddleUp,
            (MouseButton::Right, ButtonState::Pressed) => RightDown,
            (MouseButton::Right, ButtonState::Released) => RightUp,
            (MouseButton::Back, ButtonState::Pressed) => BackDown,
            (MouseButton::Back, ButtonState::Released) => BackUp,
            (MouseButton::Next, ButtonState::Pressed) => NextDown,
            (MouseButton::Next, ButtonState::Released) => NextUp,
        }
    }
}

impl Display for MouseButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the code of the named button. Case insensitive.
pub fn code_of(name: &str) -> Option<ButtonCode> {
    MouseButton::from_name(name).map(MouseButton::code)
}

/// Returns the name of the button with the given code.
pub fn name_of(code: ButtonCode) -> Option<&'static str> {
    MouseButton::from_code(code).map(MouseButton::name)
}

/// Anything which can identify a mouse button when querying press state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRef<'a> {
    Name(&'a str),
    Code(ButtonCode),
    Button(MouseButton),
}

impl ButtonRef<'_> {
    pub fn resolve(&self) -> Result<ButtonCode, PointerError> {
        match *self {
            ButtonRef::Name(name) => {
                code_of(name).ok_or_else(|| PointerError::UnknownButton(name.to_string()))
            }
            ButtonRef::Code(code) => Ok(code),
            ButtonRef::Button(button) => Ok(button.code()),
        }
    }
}

impl<'a> From<&'a str> for ButtonRef<'a> {
    fn from(v: &'a str) -> Self {
        Self::Name(v)
    }
}

impl From<ButtonCode> for ButtonRef<'_> {
    fn from(v: ButtonCode) -> Self {
        Self::Code(v)
    }
}

impl From<MouseButton> for ButtonRef<'_> {
    fn from(v: MouseButton) -> Self {
        Self::Button(v)
    }
}
