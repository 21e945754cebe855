mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::UserService;

/// Shared application state.
pub type AppState = Arc<UserService>;

/// Build the users API router.
///
/// Paths are absolute; the caller merges them at the root.
pub fn build_router(svc: Arc<UserService>) -> Router {
    Router::new().merge(users::routes()).with_state(svc)
}
