use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use crate::{PointerEvent, PointerEventKind};

/// A callback subscribed to pointer events.
///
/// Listeners are compared by identity: clones of the same listener are equal, two listeners
/// created from identical closures are not. Keep a clone around to unsubscribe later.
#[derive(Clone)]
pub struct Listener {
    func: Rc<dyn Fn(&PointerEvent)>,
}

impl Listener {
    pub fn new(func: impl 'static + Fn(&PointerEvent)) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    /// Forwards each event through a channel. Events sent after the receiver is dropped are
    /// discarded.
    pub fn from_sender(tx: flume::Sender<PointerEvent>) -> Self {
        Self::new(move |event| {
            tx.send(event.clone()).ok();
        })
    }

    #[inline]
    pub fn call(&self, event: &PointerEvent) {
        (self.func)(event)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Listener {}

impl Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// Ordered listener lists for every [`PointerEventKind`].
///
/// Dispatch iterates a snapshot of the list, so listeners added or removed while an event is
/// being dispatched only take part in subsequent dispatches.
pub struct ListenerRegistry {
    lists: RefCell<HashMap<PointerEventKind, Vec<Listener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            lists: RefCell::new(
                PointerEventKind::ALL
                    .into_iter()
                    .map(|kind| (kind, Vec::new()))
                    .collect(),
            ),
        }
    }

    pub fn subscribe(&self, kind: PointerEventKind, listener: Listener) {
        self.lists.borrow_mut().entry(kind).or_default().push(listener);
    }

    /// Removes the first occurrence of `listener`. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, kind: PointerEventKind, listener: &Listener) -> bool {
        let mut lists = self.lists.borrow_mut();
        let Some(list) = lists.get_mut(&kind) else {
            return false;
        };

        match list.iter().position(|v| v == listener) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self, kind: PointerEventKind) {
        if let Some(list) = self.lists.borrow_mut().get_mut(&kind) {
            list.clear();
        }
    }

    pub fn len(&self, kind: PointerEventKind) -> usize {
        self.lists.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Invokes every listener of `kind` in registration order.
    pub fn dispatch(&self, kind: PointerEventKind, event: &PointerEvent) {
        let snapshot = match self.lists.borrow().get(&kind) {
            Some(list) if !list.is_empty() => list.clone(),
            _ => return,
        };

        tracing::trace!(%kind, count = snapshot.len(), "dispatching");
        for listener in &snapshot {
            listener.call(event);
        }
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                PointerEventKind::ALL
                    .iter()
                    .map(|kind| (kind.as_str(), self.len(*kind))),
            )
            .finish()
    }
}
