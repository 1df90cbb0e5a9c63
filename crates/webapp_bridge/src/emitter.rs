//! String-keyed event emitter backing [`crate::BridgeClient`].

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
/// Event delivered to emitter listeners.
pub struct BridgeEvent {
    /// Event name.
    pub name: String,
    /// Event payload; [`Value::Null`] when the event carries no detail.
    pub detail: Value,
}

impl BridgeEvent {
    /// Returns the detail as text when it is a JSON string.
    pub fn detail_str(&self) -> Option<&str> {
        self.detail.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle returned by [`EventEmitter::add_listener`], used for removal.
pub struct ListenerId(pub u64);

type Listener = Rc<dyn Fn(&BridgeEvent)>;

#[derive(Default)]
struct EmitterState {
    next_id: u64,
    listeners: HashMap<String, Vec<(ListenerId, Listener)>>,
}

#[derive(Clone, Default)]
/// Shared, single-threaded event emitter. Clones share the same listener table.
pub struct EventEmitter {
    inner: Rc<RefCell<EmitterState>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        let mut names: Vec<&str> = state.listeners.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("events", &names)
            .finish()
    }
}

impl EventEmitter {
    /// Registers `listener` for events named `name`. Listeners run in registration order.
    pub fn add_listener(
        &self,
        name: impl Into<String>,
        listener: impl Fn(&BridgeEvent) + 'static,
    ) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state
            .listeners
            .entry(name.into())
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` is not registered under `name`.
    pub fn remove_listener(&self, name: &str, id: ListenerId) -> bool {
        let mut state = self.inner.borrow_mut();
        let Some(listeners) = state.listeners.get_mut(name) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            state.listeners.remove(name);
        }
        removed
    }

    /// Delivers an event to every listener registered for `name` at the time of the call.
    ///
    /// Listeners may register, remove, or dispatch from inside the callback. Listeners added
    /// during delivery are not invoked for this event; listeners removed during delivery are
    /// skipped if they have not run yet.
    pub fn dispatch(&self, name: &str, detail: Value) {
        let snapshot: Vec<(ListenerId, Listener)> = match self.inner.borrow().listeners.get(name) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        let event = BridgeEvent {
            name: name.to_string(),
            detail,
        };
        for (id, listener) in snapshot {
            if self.is_registered(name, id) {
                listener(&event);
            }
        }
    }

    fn is_registered(&self, name: &str, id: ListenerId) -> bool {
        self.inner
            .borrow()
            .listeners
            .get(name)
            .is_some_and(|listeners| listeners.iter().any(|(listener_id, _)| *listener_id == id))
    }

    /// Number of listeners registered for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(name)
            .map_or(0, Vec::len)
    }
}
