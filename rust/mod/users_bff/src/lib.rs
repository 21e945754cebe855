//! Users client views: the record form and the listing, as flux state
//! machines driven through the record API.
//!
//! # State
//!
//! | Path | Type |
//! |---|---|
//! | `app/route` | [`AppRoute`] |
//! | `users/form` | [`UserFormState`] |
//! | `users/list` | [`UserListState`] |
//!
//! # Requests
//!
//! Form: `users/form/{open,edit,submit,cancel}`.
//! Listing: `users/list/load`, `users/list/delete/{request,confirm,cancel}`,
//! `users/list/error/dismiss`.
//!
//! The form runs the shared record rules before any network call; a
//! successful submit or a cancel navigates to the listing and reloads it.

pub mod handlers;
pub mod request;
pub mod state;

use std::sync::Arc;

use tracing::warn;

use userbase_client::UserApi;
use userbase_flux::{Flux, StateStore};

use crate::handlers::{form_handlers, list_handlers};
pub use crate::request::*;
pub use crate::state::*;

/// Register all users handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, api: Arc<dyn UserApi>) {
    // users/form/open
    {
        let api = api.clone();
        flux.on(OpenFormReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let api = api.clone();
            async move {
                let Some(req) = payload.downcast_ref::<OpenFormReq>() else {
                    warn!("{}: unexpected payload", path);
                    return;
                };
                form_handlers::handle_open(req, &store, api.as_ref()).await;
            }
        });
    }

    // users/form/edit
    flux.on(EditFieldReq::PATH, |path, payload, store: Arc<StateStore>| async move {
        let Some(req) = payload.downcast_ref::<EditFieldReq>() else {
            warn!("{}: unexpected payload", path);
            return;
        };
        form_handlers::handle_edit(req, &store).await;
    });

    // users/form/submit
    {
        let api = api.clone();
        flux.on(SubmitFormReq::PATH, move |_, _, store: Arc<StateStore>| {
            let api = api.clone();
            async move {
                form_handlers::handle_submit(&store, api.as_ref()).await;
            }
        });
    }

    // users/form/cancel
    {
        let api = api.clone();
        flux.on(CancelFormReq::PATH, move |_, _, store: Arc<StateStore>| {
            let api = api.clone();
            async move {
                form_handlers::handle_cancel(&store, api.as_ref()).await;
            }
        });
    }

    // users/list/load
    {
        let api = api.clone();
        flux.on(LoadListReq::PATH, move |_, _, store: Arc<StateStore>| {
            let api = api.clone();
            async move {
                list_handlers::handle_load(&store, api.as_ref()).await;
            }
        });
    }

    // users/list/delete/request
    flux.on(RequestDeleteReq::PATH, |path, payload, store: Arc<StateStore>| async move {
        let Some(req) = payload.downcast_ref::<RequestDeleteReq>() else {
            warn!("{}: unexpected payload", path);
            return;
        };
        list_handlers::handle_request_delete(req, &store).await;
    });

    // users/list/delete/confirm
    {
        let api = api.clone();
        flux.on(ConfirmDeleteReq::PATH, move |_, _, store: Arc<StateStore>| {
            let api = api.clone();
            async move {
                list_handlers::handle_confirm_delete(&store, api.as_ref()).await;
            }
        });
    }

    // users/list/delete/cancel
    flux.on(CancelDeleteReq::PATH, |_, _, store: Arc<StateStore>| async move {
        list_handlers::handle_cancel_delete(&store).await;
    });

    // users/list/error/dismiss
    flux.on(DismissErrorReq::PATH, |_, _, store: Arc<StateStore>| async move {
        list_handlers::handle_dismiss(&store).await;
    });
}

/// Build a Flux with the users handlers registered.
pub fn build(api: Arc<dyn UserApi>) -> Flux {
    let flux = Flux::new();
    register_handlers(&flux, api);
    flux
}
