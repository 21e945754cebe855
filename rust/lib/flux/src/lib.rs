//! Flux: a client state engine.
//!
//! A path-addressed state store with pub/sub, plus a request router. The
//! client views keep all of their state here; a front end only reads
//! state and emits requests.
//!
//! # Path Addressing
//!
//! State and requests share one flat namespace with `/` as separator:
//! `app/route`, `users/list`, `users/form/submit`.
//!
//! # Patterns
//!
//! Subscriptions and request handlers use MQTT-style wildcards:
//! - Exact: `users/list`
//! - Single-level: `users/+` matches `users/list`, `users/form`
//! - Multi-level: `users/#` matches everything under `users/`
//! - All: `#`

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use pattern::topic_matches;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
