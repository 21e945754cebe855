//! Read-only commands: `list` and `get`.

use anyhow::Result;

use userbase_client::UserApi;

use super::api_error;
use crate::output;

pub async fn list(api: &dyn UserApi, json: bool) -> Result<()> {
    let users = api.list().await.map_err(api_error)?;
    output::print_users(&users, json)
}

pub async fn get(api: &dyn UserApi, id: &str, json: bool) -> Result<()> {
    let user = api.get(id).await.map_err(api_error)?;
    output::print_user(&user, json)
}
