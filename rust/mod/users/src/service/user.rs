use serde_json::Value;
use tracing::debug;

use userbase_core::new_id;
use userbase_types::User;

use crate::service::{draft_from_body, UserError, UserService};

impl UserService {
    /// Create a new user from a request body.
    ///
    /// Any `id` in the body is ignored; the store assigns one.
    pub fn create_user(&self, body: &Value) -> Result<User, UserError> {
        let fields = self.accept(&draft_from_body(body)?)?;

        let user = User::new(new_id(), fields);
        self.insert_doc(&user)?;
        debug!("created user {}", user.id);
        Ok(user)
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Result<User, UserError> {
        Self::check_id(id)?;
        self.find_doc(id)?.ok_or_else(Self::not_found)
    }

    /// List all users in creation order.
    pub fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.scan_docs()
    }

    /// Replace all three fields of an existing user.
    ///
    /// The body must carry every field; a missing one fails validation
    /// rather than clearing the stored value.
    pub fn update_user(&self, id: &str, body: &Value) -> Result<User, UserError> {
        Self::check_id(id)?;
        let fields = self.accept(&draft_from_body(body)?)?;

        let user = User::new(id, fields);
        if !self.replace_doc(&user)? {
            return Err(Self::not_found());
        }
        debug!("updated user {}", id);
        Ok(user)
    }

    /// Delete a user by id, returning the removed record.
    ///
    /// Deleting an id that has no record is `NotFound`, so a repeated
    /// delete is reported rather than silently succeeding.
    pub fn delete_user(&self, id: &str) -> Result<User, UserError> {
        Self::check_id(id)?;
        let removed = self.delete_doc(id)?.ok_or_else(Self::not_found)?;
        debug!("deleted user {}", id);
        Ok(removed)
    }
}
