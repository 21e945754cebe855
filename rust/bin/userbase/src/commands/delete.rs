//! `delete`, driven through the listing's confirmation step.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Result};

use userbase_client::UserApi;
use userbase_flux::Flux;
use users_bff::{CancelDeleteReq, ConfirmDeleteReq, RequestDeleteReq, LOAD_LIST_FAILED};

use super::list_state;

/// What happened to a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    /// Deleted, but the listing could not be reloaded afterwards.
    DeletedStale,
    Cancelled,
}

pub async fn run(api: Arc<dyn UserApi>, id: &str, yes: bool) -> Result<()> {
    let flux = users_bff::build(api);
    let outcome = delete(&flux, id, |id| yes || prompt(id)).await?;
    match outcome {
        Outcome::Deleted => println!("User {} deleted.", id),
        Outcome::DeletedStale => {
            println!("User {} deleted.", id);
            eprintln!("{}", LOAD_LIST_FAILED);
        }
        Outcome::Cancelled => println!("Aborted."),
    }
    Ok(())
}

/// Request deletion of `id`, ask `confirm`, then confirm or cancel.
pub async fn delete(
    flux: &Flux,
    id: &str,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<Outcome> {
    let req = RequestDeleteReq { id: id.to_string() };
    flux.emit(RequestDeleteReq::PATH, req).await;
    if let Some(error) = list_state(flux)?.error {
        bail!(error);
    }

    if !confirm(id) {
        flux.emit(CancelDeleteReq::PATH, CancelDeleteReq).await;
        return Ok(Outcome::Cancelled);
    }

    flux.emit(ConfirmDeleteReq::PATH, ConfirmDeleteReq).await;
    match list_state(flux)?.error {
        None => Ok(Outcome::Deleted),
        Some(error) if error == LOAD_LIST_FAILED => Ok(Outcome::DeletedStale),
        Some(error) => bail!(error),
    }
}

fn prompt(id: &str) -> bool {
    eprint!("Delete user {}? [y/N] ", id);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
