use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps a pixel position onto [-1, 1] relative to `size`.
///
/// Values are not clamped; a position outside of `size` yields a coordinate outside of the
/// range.
#[inline]
pub fn normalize_position(pixel: Vec2, size: Vec2) -> Vec2 {
    (pixel / size - 0.5) * 2.0
}

/// Scales a pixel movement the same way as [`normalize_position`], without moving the origin.
///
/// Only the scale is shared with positions, so zero movement normalizes to zero.
#[inline]
pub fn normalize_delta(pixel: Vec2, size: Vec2) -> Vec2 {
    pixel / size * 2.0
}

/// A cursor position both in pixels and normalized to [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub normalized: Vec2,
    pub pixel: Vec2,
}

impl Position {
    pub const ZERO: Self = Self {
        normalized: Vec2::ZERO,
        pixel: Vec2::ZERO,
    };

    pub fn new(pixel: Vec2, size: Vec2) -> Self {
        Self {
            normalized: normalize_position(pixel, size),
            pixel,
        }
    }
}

/// Cursor movement since the previous move notification
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Delta {
    pub normalized: Vec2,
    pub pixel: Vec2,
}

impl Delta {
    pub const ZERO: Self = Self {
        normalized: Vec2::ZERO,
        pixel: Vec2::ZERO,
    };

    pub fn new(pixel: Vec2, size: Vec2) -> Self {
        Self {
            normalized: normalize_delta(pixel, size),
            pixel,
        }
    }
}
