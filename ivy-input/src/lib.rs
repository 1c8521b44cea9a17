//! Mouse input state for Ivy.
//!
//! [`PointerState`] normalizes the cursor position, movement, pressed buttons and pointer lock
//! into a single object, and republishes the raw host notifications as a fixed set of named
//! events which [`Listener`]s can subscribe to.
//!
//! The host is reached through [`Viewport`] and [`CaptureTarget`]. With the `winit` feature,
//! winit windows implement both and window/device events can be fed directly into the state.
mod button;
mod error;
mod events;
pub mod host;
mod listeners;
mod position;
mod state;
mod types;
#[cfg(feature = "winit")]
pub mod window;

pub use button::*;
pub use error::PointerError;
pub use events::*;
pub use host::{BoundTarget, CaptureMode, CaptureTarget, Viewport};
pub use listeners::{Listener, ListenerRegistry};
pub use position::*;
pub use state::*;
pub use types::*;
