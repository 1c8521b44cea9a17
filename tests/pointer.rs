use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
    rc::Rc,
};

use glam::{vec2, Vec2};
use ivy_pointer::{
    ButtonState, CaptureMode, CaptureTarget, CursorMoved, Listener, LockChange, MouseInput,
    PointerEvent, PointerEventKind, PointerState, TargetId, Unsubscribe,
};
use tracing_subscriber::{
    fmt::TestWriter, layer::SubscriberExt, registry, util::SubscriberInitExt, EnvFilter,
};
use tracing_tree::HierarchicalLayer;

fn init_logging() {
    registry()
        .with(EnvFilter::from_default_env())
        .with(HierarchicalLayer::new(2).with_writer(TestWriter::new()))
        .try_init()
        .ok();
}

struct MockTarget {
    id: TargetId,
    size: Cell<Vec2>,
    modes: Vec<CaptureMode>,
    fail: bool,
    captures: RefCell<Vec<CaptureMode>>,
    releases: Cell<usize>,
}

impl MockTarget {
    fn new(id: u64, size: Vec2) -> Self {
        Self {
            id: TargetId(id),
            size: Cell::new(size),
            modes: vec![CaptureMode::Locked, CaptureMode::Confined],
            fail: false,
            captures: RefCell::new(Vec::new()),
            releases: Cell::new(0),
        }
    }
}

impl CaptureTarget for MockTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn rendered_size(&self) -> Vec2 {
        self.size.get()
    }

    fn supports(&self, mode: CaptureMode) -> bool {
        self.modes.contains(&mode)
    }

    fn capture(&self, mode: CaptureMode) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("capture refused");
        }

        self.captures.borrow_mut().push(mode);
        Ok(())
    }

    fn release(&self) -> anyhow::Result<()> {
        self.releases.set(self.releases.get() + 1);
        Ok(())
    }
}

/// Records every dispatch of `kinds` in order
fn record(
    state: &PointerState,
    kinds: &[PointerEventKind],
) -> flume::Receiver<(PointerEventKind, PointerEvent)> {
    let (tx, rx) = flume::unbounded();
    for &kind in kinds {
        let tx = tx.clone();
        assert!(state.subscribe(
            kind,
            &Listener::new(move |event| {
                tx.send((kind, event.clone())).ok();
            })
        ));
    }

    rx
}

fn moved(x: f32, y: f32) -> CursorMoved {
    CursorMoved {
        position: vec2(x, y),
        ..Default::default()
    }
}

trait SubscribeChannel {
    fn subscribe_channel(&self) -> flume::Receiver<PointerEvent>;
}

impl SubscribeChannel for PointerState {
    fn subscribe_channel(&self) -> flume::Receiver<PointerEvent> {
        let (tx, rx) = flume::unbounded();
        assert!(self.subscribe("move", &Listener::from_sender(tx)));
        rx
    }
}

#[test]
fn normalized_document_position() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let events = state.subscribe_channel();

    state.handle_cursor_moved(&moved(500.0, 250.0));
    assert_eq!(state.document_position().normalized, Vec2::ZERO);
    assert_eq!(state.document_position().pixel, vec2(500.0, 250.0));

    state.handle_cursor_moved(&moved(1000.0, 500.0));
    assert_eq!(state.document_position().normalized, Vec2::ONE);

    // Outside of the viewport
    state.handle_cursor_moved(&moved(1500.0, -250.0));
    assert_eq!(state.document_position().normalized, vec2(2.0, -2.0));

    assert_eq!(events.try_iter().count(), 3);
}

#[test]
fn dimensions_are_read_on_demand() {
    init_logging();
    let viewport = Rc::new(Cell::new(vec2(1000.0, 500.0)));
    let state = PointerState::new(viewport.clone());

    state.handle_cursor_moved(&CursorMoved {
        position: vec2(500.0, 250.0),
        delta: vec2(100.0, 50.0),
        offset: Vec2::ZERO,
    });
    assert_eq!(state.document_position().normalized, Vec2::ZERO);
    assert_eq!(state.document_delta().normalized, vec2(0.2, 0.2));

    viewport.set(vec2(500.0, 250.0));
    state.handle_cursor_moved(&CursorMoved {
        position: vec2(500.0, 250.0),
        delta: vec2(100.0, 50.0),
        offset: Vec2::ZERO,
    });
    assert_eq!(state.document_position().normalized, Vec2::ONE);
    assert_eq!(state.document_delta().normalized, vec2(0.4, 0.4));
    assert_eq!(state.document_delta().pixel, vec2(100.0, 50.0));
}

#[test]
fn target_movement() {
    init_logging();
    let target = Rc::new(MockTarget::new(1, vec2(200.0, 100.0)));
    let state = PointerState::with_target(vec2(1000.0, 500.0), target.clone());
    let events = state.subscribe_channel();

    assert_eq!(state.target_position().map(|v| v.pixel), Some(Vec2::ZERO));

    let event = CursorMoved {
        position: vec2(750.0, 375.0),
        delta: vec2(4.0, 2.0),
        offset: vec2(150.0, 75.0),
    };
    state.handle_target_cursor_moved(&event);

    let target_position = state.target_position().unwrap();
    assert_eq!(target_position.pixel, vec2(150.0, 75.0));
    assert_eq!(target_position.normalized, vec2(0.5, 0.5));
    assert_eq!(state.document_position().normalized, vec2(0.5, 0.5));

    // Target resized
    target.size.set(vec2(300.0, 150.0));
    state.handle_target_cursor_moved(&event);
    assert_eq!(state.target_position().unwrap().normalized, Vec2::ZERO);

    // Viewport movement leaves the target position as is
    state.handle_cursor_moved(&moved(0.0, 0.0));
    assert_eq!(state.target_position().unwrap().pixel, vec2(150.0, 75.0));

    assert!(events.try_iter().eq([
        PointerEvent::Move(event),
        PointerEvent::Move(event),
        PointerEvent::Move(moved(0.0, 0.0)),
    ]));
}

#[test]
fn target_movement_without_target() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let events = state.subscribe_channel();

    state.handle_target_cursor_moved(&CursorMoved {
        position: vec2(250.0, 125.0),
        delta: Vec2::ZERO,
        offset: vec2(10.0, 10.0),
    });

    assert_eq!(state.target_position(), None);
    assert_eq!(state.document_position().normalized, vec2(-0.5, -0.5));
    assert_eq!(events.try_iter().count(), 1);
}

#[test]
fn left_down() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let (tx, rx) = flume::unbounded();
    assert!(state.subscribe("leftdown", &Listener::from_sender(tx)));

    let event = MouseInput::pressed(0).with_position(vec2(12.0, 34.0));
    state.handle_mouse_input(&event);

    assert!(rx.try_iter().eq([PointerEvent::Button(event)]));
    assert_eq!(state.pressed_buttons(), [0]);
    assert!(state.is_pressed("left"));
}

#[test]
fn button_event_order() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let events = record(
        &state,
        &[
            PointerEventKind::AnyDown,
            PointerEventKind::AnyUp,
            PointerEventKind::RightDown,
            PointerEventKind::RightUp,
            PointerEventKind::NextDown,
        ],
    );

    state.handle_mouse_input(&MouseInput::pressed(2));
    state.handle_mouse_input(&MouseInput::pressed(4));
    state.handle_mouse_input(&MouseInput::released(2));

    let kinds = events.try_iter().map(|v| v.0).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [
            PointerEventKind::RightDown,
            PointerEventKind::AnyDown,
            PointerEventKind::NextDown,
            PointerEventKind::AnyDown,
            PointerEventKind::RightUp,
            PointerEventKind::AnyUp,
        ]
    );
    assert_eq!(state.pressed_buttons(), [4]);
}

#[test]
fn unknown_button_code() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let named = |suffix: &str, any: PointerEventKind| {
        PointerEventKind::ALL
            .into_iter()
            .filter(|v| v.as_str().ends_with(suffix) && *v != any)
            .collect::<Vec<_>>()
    };
    let named_down = record(&state, &named("down", PointerEventKind::AnyDown));
    let named_up = record(&state, &named("up", PointerEventKind::AnyUp));
    let any_down = record(&state, &[PointerEventKind::AnyDown]);
    let any_up = record(&state, &[PointerEventKind::AnyUp]);

    state.handle_mouse_input(&MouseInput::pressed(7));

    assert_eq!(named_down.try_iter().count(), 0);
    assert_eq!(any_down.try_iter().count(), 1);
    assert!(state.is_pressed(7u16));

    state.handle_mouse_input(&MouseInput::released(7));

    assert_eq!(named_up.try_iter().count(), 0);
    assert_eq!(any_up.try_iter().count(), 1);
    assert_eq!(any_down.try_iter().count(), 0);
    assert!(!state.is_pressed(7u16));
    assert!(state.pressed_buttons().is_empty());
}

#[test]
fn pressed_buttons_replay() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));

    let sequence = [
        (0, ButtonState::Pressed),
        (2, ButtonState::Pressed),
        (0, ButtonState::Pressed),
        (2, ButtonState::Released),
        (4, ButtonState::Pressed),
        (9, ButtonState::Pressed),
        (1, ButtonState::Released),
        (0, ButtonState::Released),
        (3, ButtonState::Pressed),
        (9, ButtonState::Released),
        (2, ButtonState::Pressed),
    ];

    let mut expected = BTreeSet::new();
    for (button, state_) in sequence {
        state.handle_mouse_input(&MouseInput {
            button,
            state: state_,
            position: Vec2::ZERO,
        });

        match state_ {
            ButtonState::Pressed => expected.insert(button),
            ButtonState::Released => expected.remove(&button),
        };

        assert_eq!(state.pressed_buttons(), expected.iter().copied().collect::<Vec<_>>());
    }

    assert_eq!(state.pressed_buttons(), [2, 3, 4]);
    assert!(state.is_pressed("BACK"));
    assert!(state.is_pressed("next"));
    assert!(!state.is_pressed("left"));
}

#[test]
fn subscribe_then_unsubscribe() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let other = Listener::new(|_| {});
    let listener = Listener::new(|_| {});

    assert!(state.subscribe(PointerEventKind::Move, &other));
    let before = state.listener_count(PointerEventKind::Move);

    assert!(state.subscribe("move", &listener));
    assert_eq!(state.listener_count(PointerEventKind::Move), before + 1);

    assert!(state.unsubscribe("move", &listener));
    assert_eq!(state.listener_count(PointerEventKind::Move), before);

    assert!(!state.unsubscribe("move", &listener));
    assert!(!state.subscribe("mousemove", &listener));
}

#[test]
fn unsubscribe_all() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let calls = Rc::new(Cell::new(0));

    for _ in 0..4 {
        let calls = calls.clone();
        state.subscribe(
            PointerEventKind::AnyUp,
            &Listener::new(move |_| calls.set(calls.get() + 1)),
        );
    }

    assert!(state.unsubscribe(PointerEventKind::AnyUp, Unsubscribe::All));
    assert_eq!(state.listener_count(PointerEventKind::AnyUp), 0);

    state.handle_mouse_input(&MouseInput::released(0));
    assert_eq!(calls.get(), 0);

    // Already empty
    assert!(state.unsubscribe("anyup", Unsubscribe::All));
}

#[test]
fn unsubscribe_during_dispatch() {
    init_logging();
    let state = Rc::new(PointerState::new(vec2(1000.0, 500.0)));
    let calls = Rc::new(RefCell::new(Vec::new()));

    let once: Rc<RefCell<Option<Listener>>> = Default::default();
    let listener = {
        let state = Rc::downgrade(&state);
        let once = once.clone();
        let calls = calls.clone();
        Listener::new(move |_| {
            calls.borrow_mut().push("once");
            let (Some(state), Some(listener)) = (state.upgrade(), once.borrow().clone()) else {
                return;
            };

            assert!(state.unsubscribe("move", &listener));
        })
    };
    *once.borrow_mut() = Some(listener.clone());

    let after = {
        let calls = calls.clone();
        Listener::new(move |_| calls.borrow_mut().push("after"))
    };

    state.subscribe("move", &listener);
    state.subscribe("move", &after);

    state.handle_cursor_moved(&moved(1.0, 1.0));
    state.handle_cursor_moved(&moved(2.0, 2.0));

    assert_eq!(*calls.borrow(), ["once", "after", "after"]);
}

#[test]
fn listeners_read_state() {
    init_logging();
    let state = Rc::new(PointerState::new(vec2(1000.0, 500.0)));
    let seen = Rc::new(Cell::new(None));

    let listener = {
        let state = Rc::downgrade(&state);
        let seen = seen.clone();
        Listener::new(move |_| {
            if let Some(state) = state.upgrade() {
                seen.set(Some(state.document_position().normalized));
            }
        })
    };

    state.subscribe(PointerEventKind::Move, &listener);
    state.handle_cursor_moved(&moved(1000.0, 500.0));

    assert_eq!(seen.get(), Some(Vec2::ONE));
}

#[test]
fn lock_without_target() {
    init_logging();
    let state = PointerState::new(vec2(1000.0, 500.0));
    let events = record(&state, &PointerEventKind::ALL);

    state.request_lock();
    state.request_unlock();

    assert!(!state.is_locked());
    assert!(!state.has_target());
    assert_eq!(events.try_iter().count(), 0);
}

#[test]
fn lock_change() {
    init_logging();
    let target = Rc::new(MockTarget::new(7, vec2(200.0, 100.0)));
    let state = PointerState::with_target(vec2(1000.0, 500.0), target.clone());
    let events = record(
        &state,
        &[
            PointerEventKind::LockChange,
            PointerEventKind::Lock,
            PointerEventKind::Unlock,
        ],
    );

    state.request_lock();
    assert_eq!(*target.captures.borrow(), [CaptureMode::Locked]);
    // Not locked until the host reports it
    assert!(!state.is_locked());

    state.handle_lock_change(&LockChange::captured(TargetId(7)));
    assert!(state.is_locked());

    // Any matching accessor is sufficient
    state.handle_lock_change(&LockChange {
        captured: vec![TargetId(3), TargetId(7)],
    });
    assert!(state.is_locked());

    state.request_unlock();
    assert_eq!(target.releases.get(), 1);

    state.handle_lock_change(&LockChange::released());
    assert!(!state.is_locked());

    state.handle_lock_change(&LockChange::captured(TargetId(3)));
    assert!(!state.is_locked());

    let events = events.try_iter().collect::<Vec<_>>();
    assert_eq!(
        events,
        [
            (PointerEventKind::LockChange, PointerEvent::LockChange(true)),
            (PointerEventKind::Lock, PointerEvent::Empty),
            (PointerEventKind::LockChange, PointerEvent::LockChange(true)),
            (PointerEventKind::Lock, PointerEvent::Empty),
            (PointerEventKind::LockChange, PointerEvent::LockChange(false)),
            (PointerEventKind::Unlock, PointerEvent::Empty),
            (PointerEventKind::LockChange, PointerEvent::LockChange(false)),
            (PointerEventKind::Unlock, PointerEvent::Empty),
        ]
    );
}

#[test]
fn capture_mode_probing() {
    init_logging();
    let confined = Rc::new(MockTarget {
        modes: vec![CaptureMode::Confined],
        ..MockTarget::new(1, vec2(10.0, 10.0))
    });

    let state = PointerState::with_target(vec2(1000.0, 500.0), confined.clone());
    assert_eq!(state.target().and_then(|v| v.mode()), Some(CaptureMode::Confined));
    state.request_lock();
    assert_eq!(*confined.captures.borrow(), [CaptureMode::Confined]);

    let unsupported = Rc::new(MockTarget {
        modes: Vec::new(),
        ..MockTarget::new(2, vec2(10.0, 10.0))
    });

    let state = PointerState::with_target(vec2(1000.0, 500.0), unsupported.clone());
    assert_eq!(state.target().and_then(|v| v.mode()), None);
    state.request_lock();
    state.request_unlock();
    assert!(unsupported.captures.borrow().is_empty());
    assert_eq!(unsupported.releases.get(), 0);
}

#[test]
fn capture_failure_is_lock_error() {
    init_logging();
    let target = Rc::new(MockTarget {
        fail: true,
        ..MockTarget::new(1, vec2(10.0, 10.0))
    });

    let state = PointerState::with_target(vec2(1000.0, 500.0), target);
    let events = record(
        &state,
        &[PointerEventKind::LockError, PointerEventKind::LockChange],
    );

    state.request_lock();
    state.handle_lock_error();

    assert!(!state.is_locked());
    assert!(events.try_iter().eq([
        (PointerEventKind::LockError, PointerEvent::Empty),
        (PointerEventKind::LockError, PointerEvent::Empty),
    ]));
}
