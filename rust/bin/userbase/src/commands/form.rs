//! `create` and `update`, driven through the record form.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use userbase_client::UserApi;
use userbase_flux::Flux;
use userbase_types::Field;
use users_bff::{EditFieldReq, FormMode, FormPhase, OpenFormReq, SubmitFormReq, UserFormState};

use super::list_state;
use crate::output;

/// Field values given on the command line. `None` leaves the draft as
/// loaded.
#[derive(Debug, Default, Clone)]
pub struct Edits {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
}

impl Edits {
    fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        [
            (Field::Name, self.name.as_deref()),
            (Field::Email, self.email.as_deref()),
            (Field::Age, self.age.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

pub async fn run(
    api: Arc<dyn UserApi>,
    id: Option<String>,
    edits: &Edits,
    json: bool,
) -> Result<()> {
    let flux = users_bff::build(api);
    let form = submit(&flux, id, edits).await?;
    let verb = match form.mode {
        FormMode::Create => "created",
        FormMode::Update(_) => "updated",
    };
    println!("User {}.", verb);

    // The form reloads the listing after a successful submit.
    let list = list_state(&flux)?;
    match list.error {
        None => output::print_users(&list.users, json),
        Some(message) => {
            eprintln!("{}", message);
            Ok(())
        }
    }
}

/// Open the form, apply `edits`, and submit. Returns the final form
/// state on success; validation and submit failures become errors.
pub async fn submit(flux: &Flux, id: Option<String>, edits: &Edits) -> Result<UserFormState> {
    flux.emit(OpenFormReq::PATH, OpenFormReq { id }).await;
    let form = form_state(flux)?;
    if let Some(banner) = form.banner {
        bail!(banner);
    }

    for (field, value) in edits.iter() {
        flux.emit(
            EditFieldReq::PATH,
            EditFieldReq {
                field,
                value: value.to_string(),
            },
        )
        .await;
    }
    flux.emit(SubmitFormReq::PATH, SubmitFormReq).await;

    let form = form_state(flux)?;
    if form.phase == FormPhase::NavigatedAway {
        return Ok(form);
    }
    if !form.errors.is_empty() {
        let lines: Vec<String> = form
            .errors
            .iter()
            .map(|(field, v)| format!("  {}: {}", field, v.message))
            .collect();
        bail!("invalid record:\n{}", lines.join("\n"));
    }
    let fallback = form.submit_failed_message();
    Err(anyhow!(form.banner.unwrap_or_else(|| fallback.to_string())))
}

fn form_state(flux: &Flux) -> Result<UserFormState> {
    flux.get_as::<UserFormState>(UserFormState::PATH)
        .ok_or_else(|| anyhow!("form state missing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::serve;
    use users_bff::LOAD_USER_FAILED;

    fn all(name: &str, email: &str, age: &str) -> Edits {
        Edits {
            name: Some(name.into()),
            email: Some(email.into()),
            age: Some(age.into()),
        }
    }

    #[tokio::test]
    async fn create_then_partial_update() {
        let (api, _dir) = serve().await;
        let flux = users_bff::build(api.clone());

        submit(&flux, None, &all("Ann", "ann@x.com", "30")).await.unwrap();
        let users = api.list().await.unwrap();
        assert_eq!(users.len(), 1);
        let id = users[0].id.clone();

        let edits = Edits {
            age: Some("31".into()),
            ..Default::default()
        };
        let form = submit(&flux, Some(id.clone()), &edits).await.unwrap();
        assert_eq!(form.mode, FormMode::Update(id.clone()));

        let stored = api.get(&id).await.unwrap();
        assert_eq!(stored.name, "Ann");
        assert_eq!(stored.email, "ann@x.com");
        assert_eq!(stored.age, 31);
    }

    #[tokio::test]
    async fn invalid_fields_are_reported_without_sending() {
        let (api, _dir) = serve().await;
        let flux = users_bff::build(api.clone());

        let err = submit(&flux, None, &all("Ann", "nope", "0")).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("email: Please enter a valid email address"));
        assert!(text.contains("age: Please enter a valid age (1-120)"));
        assert!(!text.contains("name:"));
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_reports_load_failure() {
        let (api, _dir) = serve().await;
        let flux = users_bff::build(api);

        let err = submit(&flux, Some("0000000000000000000000000000abcd".into()), &Edits::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), LOAD_USER_FAILED);
    }
}
