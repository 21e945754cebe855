//! Listing handlers (load, delete with confirmation, error dismissal).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use userbase_client::UserApi;
use userbase_flux::StateStore;

use crate::request::*;
use crate::state::*;

/// How long a delete error stays up before it clears itself.
pub const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

fn ensure_state(store: &StateStore) {
    if !store.contains(UserListState::PATH) {
        store.set(UserListState::PATH, UserListState::default());
    }
}

/// Handle `users/list/load`.
pub async fn handle_load(store: &StateStore, api: &dyn UserApi) {
    ensure_state(store);
    store.update_as::<UserListState, _, _>(UserListState::PATH, |list| list.loading = true);

    let result = api.list().await;
    store.update_as::<UserListState, _, _>(UserListState::PATH, |list| {
        list.loading = false;
        match result {
            Ok(users) => {
                debug!("listed {} users", users.len());
                list.users = users;
                list.clear_error();
            }
            Err(e) => {
                warn!("list users failed: {}", e);
                list.set_error(LOAD_LIST_FAILED);
            }
        }
    });
}

/// Handle `users/list/delete/request`.
pub async fn handle_request_delete(req: &RequestDeleteReq, store: &StateStore) {
    ensure_state(store);
    store.update_as::<UserListState, _, _>(UserListState::PATH, |list| {
        if req.id.trim().is_empty() {
            list.pending_delete = None;
            list.set_error(INVALID_ID);
        } else {
            list.pending_delete = Some(req.id.clone());
        }
    });
}

/// Handle `users/list/delete/cancel`.
pub async fn handle_cancel_delete(store: &StateStore) {
    store.update_as::<UserListState, _, _>(UserListState::PATH, |list| {
        list.pending_delete = None;
    });
}

/// Handle `users/list/delete/confirm`. Returns true if the record was
/// deleted.
pub async fn handle_confirm_delete(store: &Arc<StateStore>, api: &dyn UserApi) -> bool {
    let pending = store
        .update_as::<UserListState, _, _>(UserListState::PATH, |list| list.pending_delete.take())
        .flatten();
    let Some(id) = pending else {
        return false;
    };

    match api.delete(&id).await {
        Ok(_) => {
            debug!("deleted user {}", id);
            handle_load(store, api).await;
            true
        }
        Err(e) => {
            warn!("delete user {} failed: {}", id, e);
            let message = e.server_message().unwrap_or(DELETE_FAILED).to_string();
            let seq = store.update_as::<UserListState, _, _>(UserListState::PATH, |list| {
                list.set_error(message)
            });
            if let Some(seq) = seq {
                schedule_dismiss(Arc::clone(store), seq);
            }
            false
        }
    }
}

/// Handle `users/list/error/dismiss`.
pub async fn handle_dismiss(store: &StateStore) {
    store.update_as::<UserListState, _, _>(UserListState::PATH, |list| list.clear_error());
}

/// Clear the error numbered `seq` after `ERROR_DISMISS_AFTER`, unless a
/// newer error replaced it first.
fn schedule_dismiss(store: Arc<StateStore>, seq: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(ERROR_DISMISS_AFTER).await;
        store.update_as::<UserListState, _, _>(UserListState::PATH, |list| {
            if list.error_seq == seq {
                list.clear_error();
            }
        });
    });
}
