//! Record form handlers (open, edit, submit, cancel).

use tracing::{debug, warn};

use userbase_client::UserApi;
use userbase_flux::StateStore;
use userbase_types::Draft;
use userbase_validate::ErrorMap;

use crate::handlers::list_handlers;
use crate::request::*;
use crate::state::*;

/// Handle `users/form/open`.
pub async fn handle_open(req: &OpenFormReq, store: &StateStore, api: &dyn UserApi) {
    let Some(id) = req.id.as_deref() else {
        store.set(UserFormState::PATH, UserFormState::create());
        store.set(AppRoute::PATH, AppRoute(Route::Create));
        return;
    };

    store.set(UserFormState::PATH, UserFormState::loading(id));
    store.set(AppRoute::PATH, AppRoute(Route::Edit(id.to_string())));

    let result = api.get(id).await;
    if let Err(e) = &result {
        warn!("load user {} failed: {}", id, e);
    }

    store.update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
        // The form may have been cancelled or reopened while we waited.
        if form.phase != FormPhase::Loading || form.mode != FormMode::Update(id.to_string()) {
            return;
        }
        form.phase = FormPhase::Editing;
        match result {
            Ok(user) => {
                form.draft = Draft::from_user(&user);
                form.errors = ErrorMap::new();
            }
            Err(_) => form.banner = Some(LOAD_USER_FAILED.to_string()),
        }
    });
}

/// Handle `users/form/edit`. Clears that field's error without
/// re-validating.
pub async fn handle_edit(req: &EditFieldReq, store: &StateStore) {
    store.update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
        if matches!(form.phase, FormPhase::Loading | FormPhase::NavigatedAway) {
            return;
        }
        form.draft.set(req.field, req.value.clone());
        form.errors.clear(req.field);
    });
}

/// Handle `users/form/submit`. Returns true if the record was saved.
pub async fn handle_submit(store: &StateStore, api: &dyn UserApi) -> bool {
    let started = store
        .update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
            if !form.can_submit() {
                debug!("submit ignored in phase {:?}", form.phase);
                return None;
            }
            form.banner = None;
            match userbase_validate::validated(&form.draft) {
                Err(errors) => {
                    form.errors = errors;
                    None
                }
                Ok(fields) => {
                    form.errors = ErrorMap::new();
                    form.phase = FormPhase::Submitting;
                    Some((form.mode.clone(), fields))
                }
            }
        })
        .flatten();

    let Some((mode, fields)) = started else {
        return false;
    };

    let result = match &mode {
        FormMode::Create => api.create(&fields).await,
        FormMode::Update(id) => api.update(id, &fields).await,
    };

    match result {
        Ok(user) => {
            debug!("saved user {}", user.id);
            let left = store
                .update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
                    if !still_submitting(form, &mode) {
                        return false;
                    }
                    form.phase = FormPhase::NavigatedAway;
                    form.draft = Draft::default();
                    true
                })
                .unwrap_or(false);
            if left {
                navigate_to_list(store, api).await;
            }
            true
        }
        Err(e) => {
            warn!("submit failed: {}", e);
            store.update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
                if !still_submitting(form, &mode) {
                    return;
                }
                form.phase = FormPhase::Editing;
                form.banner = Some(form.submit_failed_message().to_string());
            });
            false
        }
    }
}

/// Is `form` still the submission started in `mode`? A form reopened
/// while the request was in flight is not.
fn still_submitting(form: &UserFormState, mode: &FormMode) -> bool {
    form.phase == FormPhase::Submitting && form.mode == *mode
}

/// Handle `users/form/cancel`. Ignored while a submission is in flight.
pub async fn handle_cancel(store: &StateStore, api: &dyn UserApi) {
    let left = store
        .update_as::<UserFormState, _, _>(UserFormState::PATH, |form| {
            if form.phase == FormPhase::Submitting {
                return false;
            }
            form.phase = FormPhase::NavigatedAway;
            form.draft = Draft::default();
            form.errors = ErrorMap::new();
            form.banner = None;
            true
        })
        .unwrap_or(false);

    if left {
        navigate_to_list(store, api).await;
    }
}

async fn navigate_to_list(store: &StateStore, api: &dyn UserApi) {
    store.set(AppRoute::PATH, AppRoute(Route::List));
    list_handlers::handle_load(store, api).await;
}
