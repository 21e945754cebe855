//! Subcommand implementations.

pub mod delete;
pub mod form;
pub mod records;

use anyhow::{anyhow, Result};

use userbase_client::ApiError;
use userbase_flux::Flux;
use users_bff::UserListState;

/// Turn an API error into the message the server gave, if any.
fn api_error(err: ApiError) -> anyhow::Error {
    match err.server_message() {
        Some(message) => anyhow!("Error ({}): {}", err.status().unwrap_or_default(), message),
        None => anyhow!(err),
    }
}

fn list_state(flux: &Flux) -> Result<UserListState> {
    flux.get_as::<UserListState>(UserListState::PATH)
        .ok_or_else(|| anyhow!("listing state missing"))
}
