use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// The client state engine.
///
/// Three primitives, all path-based:
/// - `get(path)`: read state at a path
/// - `emit(path, payload)`: send a request to the matching handler(s)
/// - `subscribe(pattern)`: observe state changes
///
/// ```ignore
/// let flux = Flux::new();
///
/// flux.on("users/list/load", |_, _, store| async move {
///     store.set("users/list", UserListState::default());
/// });
///
/// flux.emit("users/list/load", ()).await;
/// let list = flux.get_as::<UserListState>("users/list");
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read the state at `path` as an owned `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    /// Emit a request and wait for every matching handler to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    ///
    /// The handler receives the request path, the type-erased payload
    /// (downcast inside), and the state store.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Subscribe to state changes matching a pattern.
    ///
    /// The handler runs synchronously on whichever task calls `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    #[test]
    fn new_flux_is_empty() {
        let flux = Flux::new();
        assert!(flux.get("anything").is_none());
    }

    #[tokio::test]
    async fn emit_without_handler_is_silent() {
        let flux = Flux::new();
        flux.emit("nonexistent", ()).await;
        assert!(flux.store().paths().is_empty());
    }

    #[tokio::test]
    async fn handler_reads_and_updates_state() {
        let flux = Flux::new();
        flux.store().set("counter", 0u32);

        flux.on("increment", |_, payload, store: Arc<StateStore>| async move {
            let by = payload.downcast_ref::<u32>().copied().unwrap_or(1);
            let current = store.get_as::<u32>("counter").unwrap_or(0);
            store.set("counter", current + by);
        });

        flux.emit("increment", ()).await;
        flux.emit("increment", 5u32).await;
        assert_eq!(flux.get_as::<u32>("counter"), Some(6));
    }

    #[tokio::test]
    async fn subscribers_observe_handler_writes() {
        let flux = Flux::new();
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let s = seen.clone();
        flux.subscribe("users/#", move |path, _| {
            s.lock().unwrap().push(path.to_string());
        });

        flux.on("users/list/load", |_, _, store: Arc<StateStore>| async move {
            store.set("users/list", 1u32);
            store.set("app/route", 2u32);
        });
        flux.emit("users/list/load", ()).await;

        assert_eq!(*seen.lock().unwrap(), vec!["users/list"]);
    }

    #[tokio::test]
    async fn unsubscribe_stops_notifications() {
        let flux = Flux::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        let id = flux.subscribe("#", move |_, _| {
            c.fetch_add(1, Ordering::Relaxed);
        });

        flux.store().set("a", 1u32);
        flux.unsubscribe("#", id);
        flux.store().set("a", 2u32);
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
