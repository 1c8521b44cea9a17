//! Feeds a [`PointerState`] from winit and lets a winit window act as the capture target.
use anyhow::Context;
use glam::{vec2, Vec2};
use winit::{
    event::{DeviceEvent, ElementState, WindowEvent},
    window::{CursorGrabMode, Window},
};

use crate::{
    ButtonCode, ButtonState, CaptureMode, CaptureTarget, CursorMoved, MouseInput, PointerState,
    TargetId, Viewport,
};

/// Maps a winit mouse button onto its button code.
pub fn mouse_button_code(button: winit::event::MouseButton) -> ButtonCode {
    match button {
        winit::event::MouseButton::Left => 0,
        winit::event::MouseButton::Middle => 1,
        winit::event::MouseButton::Right => 2,
        winit::event::MouseButton::Back => 3,
        winit::event::MouseButton::Forward => 4,
        winit::event::MouseButton::Other(v) => v,
    }
}

impl From<ElementState> for ButtonState {
    fn from(v: ElementState) -> Self {
        match v {
            ElementState::Pressed => ButtonState::Pressed,
            ElementState::Released => ButtonState::Released,
        }
    }
}

impl From<CaptureMode> for CursorGrabMode {
    fn from(v: CaptureMode) -> Self {
        match v {
            CaptureMode::Locked => CursorGrabMode::Locked,
            CaptureMode::Confined => CursorGrabMode::Confined,
        }
    }
}

const CAN_CONFINE: bool = !cfg!(any(target_os = "macos", target_arch = "wasm32"));

/// Grab modes attempted in order when capturing with `mode`.
fn grab_modes(mode: CaptureMode) -> &'static [CursorGrabMode] {
    match mode {
        CaptureMode::Locked if CAN_CONFINE => &[CursorGrabMode::Locked, CursorGrabMode::Confined],
        CaptureMode::Locked => &[CursorGrabMode::Locked],
        CaptureMode::Confined => &[CursorGrabMode::Confined],
    }
}

fn inner_size(window: &Window) -> Vec2 {
    let size = window.inner_size();
    vec2(size.width as f32, size.height as f32)
}

impl Viewport for Window {
    fn size(&self) -> Vec2 {
        inner_size(self)
    }
}

impl CaptureTarget for Window {
    fn id(&self) -> TargetId {
        TargetId(u64::from(Window::id(self)))
    }

    fn rendered_size(&self) -> Vec2 {
        inner_size(self)
    }

    /// Windows cannot lock and macOS and the web cannot confine. Whether locking works on Linux
    /// depends on the display server, so it is assumed and [`Self::capture`] falls back to
    /// confining at runtime.
    fn supports(&self, mode: CaptureMode) -> bool {
        match mode {
            CaptureMode::Locked => !cfg!(target_os = "windows"),
            CaptureMode::Confined => CAN_CONFINE,
        }
    }

    fn capture(&self, mode: CaptureMode) -> anyhow::Result<()> {
        let mut result = Ok(());
        for &grab in grab_modes(mode) {
            result = self.set_cursor_grab(grab);
            match &result {
                Ok(()) => break,
                Err(err) => tracing::debug!("Cursor grab {grab:?} failed: {err}"),
            }
        }

        result.with_context(|| format!("Failed to grab cursor using {mode:?}"))?;
        self.set_cursor_visible(false);
        Ok(())
    }

    fn release(&self) -> anyhow::Result<()> {
        self.set_cursor_grab(CursorGrabMode::None)
            .context("Failed to release cursor grab")?;
        self.set_cursor_visible(true);
        Ok(())
    }
}

impl PointerState {
    /// Handles the cursor and button events of the window the state tracks.
    ///
    /// Cursor movement over the window is treated as movement over the bound target, if any.
    pub fn handle_window_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_window_cursor(vec2(position.x as f32, position.y as f32))
            }
            &WindowEvent::MouseInput { state, button, .. } => {
                self.handle_window_button(button, state)
            }
            _ => {}
        }
    }

    /// Handles the cursor moving to `position` in window pixels.
    ///
    /// The delta is taken from the previously known position.
    pub fn handle_window_cursor(&self, position: Vec2) {
        let event = CursorMoved {
            position,
            delta: position - self.document_position().pixel,
            offset: position,
        };

        if self.has_target() {
            self.handle_target_cursor_moved(&event)
        } else {
            self.handle_cursor_moved(&event)
        }
    }

    pub fn handle_window_button(&self, button: winit::event::MouseButton, state: ElementState) {
        self.handle_mouse_input(&MouseInput {
            button: mouse_button_code(button),
            state: state.into(),
            position: self.document_position().pixel,
        })
    }

    /// Handles raw mouse motion.
    ///
    /// The cursor does not move while locked, so the motion is reported with the last known
    /// position.
    pub fn handle_device_event(&self, event: &DeviceEvent) {
        if let &DeviceEvent::MouseMotion { delta: (x, y) } = event {
            let position = self.document_position().pixel;
            self.handle_cursor_moved(&CursorMoved {
                position,
                delta: vec2(x as f32, y as f32),
                offset: self.target_position().map_or(position, |v| v.pixel),
            })
        }
    }
}
