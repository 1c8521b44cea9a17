//! # Ivy Pointer
//!
//! ## What it is
//!
//! A small convenience layer over mouse input. It normalizes the cursor position, movement,
//! button state and pointer lock status into a single observable object.
//!
//! This crate exports the [`ivy_input`] crate, which can just as well be used directly.
//!
//! ## How it works
//!
//! ### State
//! A [`PointerState`] is created per input target. The host feeds it raw
//! notifications, such as cursor movement, button presses and lock changes.
//! From these it keeps
//!
//! - the cursor position relative to the viewport, both in pixels and
//!   normalized to [-1, 1].
//! - the movement since the previous notification.
//! - the cursor position relative to the bound target, if any.
//! - the set of pressed buttons, and whether the pointer is locked.
//!
//! ### Events
//! Each notification is republished as one or more named events, such as
//! `move`, `leftdown` or `lockchange`. A [`Listener`] subscribes to an event
//! by name and is invoked synchronously, in subscription order.
//!
//! ### Host
//! Dimensions are read through a [`Viewport`] and the pointer is locked
//! through a [`CaptureTarget`]. Both are queried on demand. With the default
//! `winit` feature, a winit window implements both.

pub use ivy_input as input;

pub use ivy_input::{
    code_of, name_of, ButtonCode, ButtonState, CaptureMode, CaptureTarget, CursorMoved, Delta,
    Listener, LockChange, MouseButton, MouseInput, PointerError, PointerEvent, PointerEventKind,
    PointerState, Position, TargetId, Unsubscribe, Viewport,
};
