use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CursorMoved, MouseInput, PointerError};

/// The closed set of events a [`crate::PointerState`] publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointerEventKind {
    Move,
    AnyDown,
    AnyUp,
    Unlock,
    Lock,
    LockChange,
    LockError,
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
    BackDown,
    BackUp,
    NextDown,
    NextUp,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 17] = [
        Self::Move,
        Self::AnyDown,
        Self::AnyUp,
        Self::Unlock,
        Self::Lock,
        Self::LockChange,
        Self::LockError,
        Self::LeftDown,
        Self::LeftUp,
        Self::RightDown,
        Self::RightUp,
        Self::MiddleDown,
        Self::MiddleUp,
        Self::BackDown,
        Self::BackUp,
        Self::NextDown,
        Self::NextUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::AnyDown => "anydown",
            Self::AnyUp => "anyup",
            Self::Unlock => "unlock",
            Self::Lock => "lock",
            Self::LockChange => "lockchange",
            Self::LockError => "lockerror",
            Self::LeftDown => "leftdown",
            Self::LeftUp => "leftup",
            Self::RightDown => "rightdown",
            Self::RightUp => "rightup",
            Self::MiddleDown => "middledown",
            Self::MiddleUp => "middleup",
            Self::BackDown => "backdown",
            Self::BackUp => "backup",
            Self::NextDown => "nextdown",
            Self::NextUp => "nextup",
        }
    }
}

impl Display for PointerEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointerEventKind {
    type Err = PointerError;

    /// Names are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| PointerError::UnknownEvent(s.to_string()))
    }
}

/// Conversion into an event kind at the subscription boundary.
pub trait IntoEventKind {
    fn into_event_kind(self) -> Result<PointerEventKind, PointerError>;
}

impl IntoEventKind for PointerEventKind {
    fn into_event_kind(self) -> Result<PointerEventKind, PointerError> {
        Ok(self)
    }
}

impl IntoEventKind for &str {
    fn into_event_kind(self) -> Result<PointerEventKind, PointerError> {
        self.parse()
    }
}

impl IntoEventKind for &String {
    fn into_event_kind(self) -> Result<PointerEventKind, PointerError> {
        self.parse()
    }
}

/// Payload handed to listeners
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointerEvent {
    /// The raw movement notification
    Move(CursorMoved),
    /// The raw button notification
    Button(MouseInput),
    /// The new lock state
    LockChange(bool),
    Empty,
}
