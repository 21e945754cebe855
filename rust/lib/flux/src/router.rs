use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::trace;

use crate::pattern::Patterns;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased payload carried by a request.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers.
///
/// Every handler whose pattern matches a dispatched path runs, one after
/// another, in registration order. A path with no handler is a no-op.
pub struct Router {
    handlers: Patterns<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Patterns::new(),
        }
    }

    /// Register an async handler for a path pattern (`+`/`#` wildcards).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.handlers.insert(pattern, handler);
    }

    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.handlers.match_topic(path);
        trace!("dispatch {} to {} handler(s)", path, handlers.len());
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    fn test_store() -> Arc<StateStore> {
        Arc::new(StateStore::new())
    }

    #[tokio::test]
    async fn dispatch_exact_and_miss() {
        let router = Router::new();
        let called = Arc::new(AtomicU64::new(0));
        let c = called.clone();
        router.on("users/list/load", move |_, _, _| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
            }
        });

        router.dispatch("users/list/load", Arc::new(()), test_store()).await;
        router.dispatch("users/list/reload", Arc::new(()), test_store()).await;
        assert_eq!(called.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn handler_gets_path_payload_and_store() {
        struct Rename {
            name: String,
        }

        let router = Router::new();
        router.on("users/+/rename", |path, payload, store: Arc<StateStore>| async move {
            if let Some(req) = payload.downcast_ref::<Rename>() {
                store.set(&path, req.name.clone());
            }
        });

        let store = test_store();
        router
            .dispatch("users/form/rename", Arc::new(Rename { name: "Ann".into() }), store.clone())
            .await;
        assert_eq!(store.get_as::<String>("users/form/rename"), Some("Ann".to_string()));
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::<u32>::new()));
        for n in [1u32, 2, 3] {
            let o = order.clone();
            let pattern = if n == 2 { "#" } else { "test" };
            router.on(pattern, move |_, _, _| {
                let o = o.clone();
                async move {
                    o.lock().unwrap().push(n);
                }
            });
        }

        router.dispatch("test", Arc::new(()), test_store()).await;
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }
}
