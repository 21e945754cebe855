//! Users module: the record access API.
//!
//! # Resources
//!
//! - **User**: `{id, name, email, age}`, persisted as a JSON document
//!   under `users:{id}` in the KV store.
//!
//! # Routes
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/getusers` | list |
//! | GET | `/getusers/{id}` | get by id |
//! | POST | `/createusers` | create |
//! | PUT | `/updateuser/{id}` | full replacement |
//! | DELETE | `/deleteuser/{id}` | delete |
//!
//! Create and update run the shared record rule set before the store is
//! touched.
//!
//! # Usage
//!
//! ```ignore
//! use users::UsersModule;
//!
//! let module = UsersModule::new(kv);
//! let router = module.routes();
//! ```

pub mod api;
pub mod service;

use std::sync::Arc;

use axum::Router;

use userbase_core::Module;
use userbase_kv::KVStore;

use crate::service::UserService;

/// Users module implementing the Module trait.
pub struct UsersModule {
    service: Arc<UserService>,
}

impl UsersModule {
    /// Create a new UsersModule over the given store.
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            service: UserService::new(kv),
        }
    }
}

impl Module for UsersModule {
    fn name(&self) -> &str {
        "users"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
