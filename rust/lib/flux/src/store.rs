use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::pattern::Patterns;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-matched change notifications.
///
/// `set` stores a value and then calls every subscriber whose pattern
/// matches the path. Subscribers run synchronously on the setting thread,
/// after the new value is visible to `get`.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Patterns<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Patterns::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
            values.insert(path.to_string(), value.clone());
        }
        for entry in self.handlers.match_topic(path) {
            (entry.handler)(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(path).cloned()
    }

    /// Read the value at `path` as an owned `T`.
    ///
    /// `None` if nothing is set there or it holds a different type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Read-modify-write the `T` at `path` under one lock, then notify.
    ///
    /// Returns `None` without touching anything if the path is unset or
    /// holds another type. Subscribers run after the lock is released.
    pub fn update_as<T, R, F>(&self, path: &str, f: F) -> Option<R>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce(&mut T) -> R,
    {
        let (value, out) = {
            let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
            let mut current = values.get(path)?.downcast_ref::<T>()?.clone();
            let out = f(&mut current);
            let value = StateValue::new(current);
            values.insert(path.to_string(), value.clone());
            (value, out)
        };
        for entry in self.handlers.match_topic(path) {
            (entry.handler)(path, &value);
        }
        Some(out)
    }

    /// Remove the value at `path`. Does not notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.contains_key(path)
    }

    /// All stored paths, in order.
    pub fn paths(&self) -> Vec<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.keys().cloned().collect()
    }

    /// Subscribe to changes on paths matching `pattern` (`+`/`#` wildcards).
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
