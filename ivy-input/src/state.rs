use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
};

use crate::{
    BoundTarget, ButtonCode, ButtonRef, CaptureTarget, CursorMoved, Delta, IntoEventKind,
    Listener, ListenerRegistry, LockChange, MouseButton, MouseInput, PointerError, PointerEvent,
    PointerEventKind, Position, Viewport,
};

/// Which listeners to remove when unsubscribing
#[derive(Debug, Clone, Copy)]
pub enum Unsubscribe<'a> {
    /// Every listener of the event
    All,
    /// The first occurrence of the listener
    Listener(&'a Listener),
}

impl<'a> From<&'a Listener> for Unsubscribe<'a> {
    fn from(v: &'a Listener) -> Self {
        Self::Listener(v)
    }
}

/// Keeps track of the cursor position, movement, pressed buttons and pointer lock, and
/// republishes raw host notifications as [`PointerEventKind`] events.
///
/// All handlers take `&self` and dispatch synchronously, which allows listeners to query the
/// state or (un)subscribe while an event is in flight. Such changes to the listener list apply
/// from the next dispatch.
pub struct PointerState {
    viewport: Box<dyn Viewport>,
    target: Option<BoundTarget>,
    document_position: Cell<Position>,
    document_delta: Cell<Delta>,
    target_position: Cell<Option<Position>>,
    pressed: RefCell<BTreeSet<ButtonCode>>,
    locked: Cell<bool>,
    listeners: ListenerRegistry,
}

impl PointerState {
    /// Creates a new pointer state without a capture target
    pub fn new(viewport: impl 'static + Viewport) -> Self {
        Self {
            viewport: Box::new(viewport),
            target: None,
            document_position: Cell::new(Position::ZERO),
            document_delta: Cell::new(Delta::ZERO),
            target_position: Cell::new(None),
            pressed: RefCell::new(BTreeSet::new()),
            locked: Cell::new(false),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Creates a new pointer state bound to `target`.
    ///
    /// Target relative positions are tracked and the pointer can be locked to the target. The
    /// binding is permanent; create a new state to track another target.
    pub fn with_target(
        viewport: impl 'static + Viewport,
        target: impl 'static + CaptureTarget,
    ) -> Self {
        let mut state = Self::new(viewport);
        state.target = Some(BoundTarget::bind(target));
        state.target_position.set(Some(Position::ZERO));
        state
    }

    /// Subscribes `listener` to `event`. Returns false and emits a warning if the event is not
    /// recognized.
    pub fn subscribe(&self, event: impl IntoEventKind, listener: &Listener) -> bool {
        self.try_subscribe(event, listener)
            .map_err(|err| tracing::warn!("Failed to subscribe: {err}"))
            .is_ok()
    }

    pub fn try_subscribe(
        &self,
        event: impl IntoEventKind,
        listener: &Listener,
    ) -> Result<(), PointerError> {
        let kind = event.into_event_kind()?;
        self.listeners.subscribe(kind, listener.clone());
        Ok(())
    }

    /// Removes a single listener, or all of them, from `event`.
    ///
    /// Returns false and emits a warning if the event is not recognized or the listener is not
    /// subscribed.
    pub fn unsubscribe<'a>(
        &self,
        event: impl IntoEventKind,
        listener: impl Into<Unsubscribe<'a>>,
    ) -> bool {
        self.try_unsubscribe(event, listener)
            .map_err(|err| tracing::warn!("Failed to unsubscribe: {err}"))
            .is_ok()
    }

    pub fn try_unsubscribe<'a>(
        &self,
        event: impl IntoEventKind,
        listener: impl Into<Unsubscribe<'a>>,
    ) -> Result<(), PointerError> {
        let kind = event.into_event_kind()?;
        match listener.into() {
            Unsubscribe::All => {
                self.listeners.clear(kind);
                Ok(())
            }
            Unsubscribe::Listener(listener) => {
                if self.listeners.unsubscribe(kind, listener) {
                    Ok(())
                } else {
                    Err(PointerError::NotSubscribed(kind))
                }
            }
        }
    }

    /// Returns the number of listeners currently subscribed to `kind`
    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.listeners.len(kind)
    }

    /// Handles cursor movement over the whole viewport.
    pub fn handle_cursor_moved(&self, event: &CursorMoved) {
        let size = self.viewport.size();

        self.document_position
            .set(Position::new(event.position, size));
        self.document_delta.set(Delta::new(event.delta, size));

        self.listeners
            .dispatch(PointerEventKind::Move, &PointerEvent::Move(*event));
    }

    /// Handles cursor movement over the bound target.
    ///
    /// Updates the target relative position before handling the movement as a viewport movement,
    /// so `move` is dispatched once per notification.
    pub fn handle_target_cursor_moved(&self, event: &CursorMoved) {
        match &self.target {
            Some(target) => self
                .target_position
                .set(Some(Position::new(event.offset, target.rendered_size()))),
            None => tracing::debug!("target movement without a bound target"),
        }

        self.handle_cursor_moved(event)
    }

    /// Handles a mouse button being pressed or released.
    pub fn handle_mouse_input(&self, event: &MouseInput) {
        let (any, updated) = if event.state.is_pressed() {
            (
                PointerEventKind::AnyDown,
                self.pressed.borrow_mut().insert(event.button),
            )
        } else {
            (
                PointerEventKind::AnyUp,
                self.pressed.borrow_mut().remove(&event.button),
            )
        };

        if !updated {
            tracing::trace!(button = event.button, state = ?event.state, "repeated button state");
        }

        let payload = PointerEvent::Button(*event);
        match MouseButton::from_code(event.button) {
            Some(button) => self
                .listeners
                .dispatch(button.event(event.state), &payload),
            None => tracing::debug!(
                button = event.button,
                "no named event for button, dispatching {any} only"
            ),
        }

        self.listeners.dispatch(any, &payload);
    }

    /// Handles a change of the host's captured element.
    pub fn handle_lock_change(&self, event: &LockChange) {
        let locked = self
            .target
            .as_ref()
            .is_some_and(|target| event.is_captured(target.id()));

        self.locked.set(locked);

        self.listeners.dispatch(
            PointerEventKind::LockChange,
            &PointerEvent::LockChange(locked),
        );

        let kind = if locked {
            PointerEventKind::Lock
        } else {
            PointerEventKind::Unlock
        };

        self.listeners.dispatch(kind, &PointerEvent::Empty);
    }

    /// Handles the host failing to capture the pointer.
    pub fn handle_lock_error(&self) {
        self.listeners
            .dispatch(PointerEventKind::LockError, &PointerEvent::Empty);
    }

    /// Requests the pointer to be locked to the bound target.
    ///
    /// Does nothing but emit a warning when no target is bound. The lock takes effect once the
    /// host reports it through [`Self::handle_lock_change`]. A host error is dispatched as
    /// `lockerror`.
    pub fn request_lock(&self) {
        let Some(target) = self.bound_target() else {
            return;
        };

        if let Err(err) = target.lock() {
            tracing::error!("{:?}", err.context("Failed to lock pointer"));
            self.handle_lock_error();
        }
    }

    /// Requests the pointer to be released from the bound target.
    pub fn request_unlock(&self) {
        let Some(target) = self.bound_target() else {
            return;
        };

        if let Err(err) = target.unlock() {
            tracing::error!("{:?}", err.context("Failed to unlock pointer"));
        }
    }

    fn bound_target(&self) -> Option<&BoundTarget> {
        if self.target.is_none() {
            tracing::warn!("{}", PointerError::NoTarget);
        }

        self.target.as_ref()
    }

    /// Returns true if the given button is currently held down.
    ///
    /// Accepts a case insensitive name, a raw code or a [`MouseButton`]. Unknown names emit a
    /// warning and are never pressed.
    pub fn is_pressed<'a>(&self, button: impl Into<ButtonRef<'a>>) -> bool {
        match button.into().resolve() {
            Ok(code) => self.pressed.borrow().contains(&code),
            Err(err) => {
                tracing::warn!("{err}");
                false
            }
        }
    }

    /// Returns the codes of all buttons currently held down in ascending order
    pub fn pressed_buttons(&self) -> Vec<ButtonCode> {
        self.pressed.borrow().iter().copied().collect()
    }

    /// Returns the cursor position relative to the viewport
    #[inline]
    pub fn document_position(&self) -> Position {
        self.document_position.get()
    }

    /// Returns the movement of the last move notification
    #[inline]
    pub fn document_delta(&self) -> Delta {
        self.document_delta.get()
    }

    /// Returns the cursor position relative to the bound target, if any.
    #[inline]
    pub fn target_position(&self) -> Option<Position> {
        self.target_position.get()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&BoundTarget> {
        self.target.as_ref()
    }
}

impl std::fmt::Debug for PointerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerState")
            .field("target", &self.target)
            .field("document_position", &self.document_position.get())
            .field("document_delta", &self.document_delta.get())
            .field("target_position", &self.target_position.get())
            .field("pressed", &self.pressed.borrow())
            .field("locked", &self.locked.get())
            .field("listeners", &self.listeners)
            .finish()
    }
}
