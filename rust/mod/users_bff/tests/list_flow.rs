mod common;

use std::time::Duration;

use common::{flux_with, FakeApi, Op};
use userbase_flux::Flux;
use users_bff::handlers::list_handlers::ERROR_DISMISS_AFTER;
use users_bff::*;

fn list(flux: &Flux) -> UserListState {
    flux.get_as::<UserListState>(UserListState::PATH).unwrap()
}

async fn delete(flux: &Flux, id: &str) {
    flux.emit(RequestDeleteReq::PATH, RequestDeleteReq { id: id.to_string() }).await;
    flux.emit(ConfirmDeleteReq::PATH, ConfirmDeleteReq).await;
}

#[tokio::test]
async fn load_lists_in_server_order() {
    let api = FakeApi::new();
    api.seed("Ann", "ann@x.com", 30);
    api.seed("Bo", "bo@x.com", 41);
    let flux = flux_with(&api);

    flux.emit(LoadListReq::PATH, LoadListReq).await;

    let l = list(&flux);
    assert!(!l.loading);
    assert_eq!(l.error, None);
    let names: Vec<&str> = l.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bo"]);
}

#[tokio::test]
async fn load_failure_sets_error() {
    let api = FakeApi::new();
    api.fail(Op::List, 400, "storage error");
    let flux = flux_with(&api);

    flux.emit(LoadListReq::PATH, LoadListReq).await;

    let l = list(&flux);
    assert!(!l.loading);
    assert_eq!(l.error.as_deref(), Some(LOAD_LIST_FAILED));
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let api = FakeApi::new();
    let ann = api.seed("Ann", "ann@x.com", 30);
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;

    flux.emit(RequestDeleteReq::PATH, RequestDeleteReq { id: ann.id.clone() }).await;
    assert_eq!(list(&flux).pending_delete.as_deref(), Some(ann.id.as_str()));
    assert_eq!(api.calls(Op::Delete), 0);

    flux.emit(CancelDeleteReq::PATH, CancelDeleteReq).await;
    assert_eq!(list(&flux).pending_delete, None);

    // Confirming with nothing pending does nothing.
    flux.emit(ConfirmDeleteReq::PATH, ConfirmDeleteReq).await;
    assert_eq!(api.calls(Op::Delete), 0);
    assert_eq!(list(&flux).users.len(), 1);
}

#[tokio::test]
async fn confirmed_delete_refreshes_listing() {
    let api = FakeApi::new();
    let ann = api.seed("Ann", "ann@x.com", 30);
    api.seed("Bo", "bo@x.com", 41);
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;

    delete(&flux, &ann.id).await;

    let l = list(&flux);
    assert_eq!(l.pending_delete, None);
    assert_eq!(l.users.len(), 1);
    assert_eq!(l.users[0].name, "Bo");
    assert_eq!(api.calls(Op::List), 2);
}

#[tokio::test]
async fn empty_id_is_rejected_without_network() {
    let api = FakeApi::new();
    let flux = flux_with(&api);

    flux.emit(RequestDeleteReq::PATH, RequestDeleteReq { id: String::new() }).await;
    flux.emit(ConfirmDeleteReq::PATH, ConfirmDeleteReq).await;

    let l = list(&flux);
    assert_eq!(l.error.as_deref(), Some(INVALID_ID));
    assert_eq!(l.pending_delete, None);
    assert_eq!(api.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn delete_error_shows_server_message_then_clears() {
    let api = FakeApi::new();
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;

    // Already gone on the server.
    delete(&flux, "0000000000000000000000000000abcd").await;
    assert_eq!(list(&flux).error.as_deref(), Some("User not found"));

    tokio::time::sleep(ERROR_DISMISS_AFTER - Duration::from_millis(100)).await;
    assert!(list(&flux).error.is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(list(&flux).error, None);
}

#[tokio::test(start_paused = true)]
async fn delete_error_without_message_uses_generic_text() {
    let api = FakeApi::new();
    let ann = api.seed("Ann", "ann@x.com", 30);
    api.fail(Op::Delete, 500, "");
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;

    delete(&flux, &ann.id).await;
    assert_eq!(list(&flux).error.as_deref(), Some(DELETE_FAILED));
    assert_eq!(list(&flux).users.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn newer_error_outlives_older_timer() {
    let api = FakeApi::new();
    api.fail(Op::Delete, 500, "first");
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;

    delete(&flux, "00000000000000000000000000000001").await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    api.heal();
    api.fail(Op::Delete, 500, "second");
    delete(&flux, "00000000000000000000000000000001").await;
    assert_eq!(list(&flux).error.as_deref(), Some("second"));

    // The first timer fires at 5s and must leave the second error alone.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(list(&flux).error.as_deref(), Some("second"));

    // The second timer fires at 8s.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(list(&flux).error, None);
}

#[tokio::test]
async fn dismiss_clears_error_immediately() {
    let api = FakeApi::new();
    api.fail(Op::List, 500, "");
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;
    assert!(list(&flux).error.is_some());

    flux.emit(DismissErrorReq::PATH, DismissErrorReq).await;
    assert_eq!(list(&flux).error, None);
}

#[tokio::test]
async fn successful_reload_clears_previous_error() {
    let api = FakeApi::new();
    api.fail(Op::List, 500, "");
    let flux = flux_with(&api);
    flux.emit(LoadListReq::PATH, LoadListReq).await;
    assert_eq!(list(&flux).error.as_deref(), Some(LOAD_LIST_FAILED));

    api.heal();
    flux.emit(LoadListReq::PATH, LoadListReq).await;
    assert_eq!(list(&flux).error, None);
}
