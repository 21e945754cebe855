pub mod user;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use userbase_core::{is_valid_id, ServiceError};
use userbase_kv::{KVError, KVStore};
use userbase_types::{Draft, Field, User, UserFields};
use userbase_validate::{ErrorMap, RecordRules, Rule, RuleSet};

/// KV key prefix for user documents.
pub const KEY_PREFIX: &str = "users:";

/// Message returned when an id names no record.
pub const NOT_FOUND_MESSAGE: &str = "User not found";

/// Users service error type.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(ErrorMap),

    #[error("invalid user id '{0}'")]
    InvalidId(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<KVError> for UserError {
    fn from(e: KVError) -> Self {
        warn!("record store failure: {}", e);
        UserError::Storage(e.to_string())
    }
}

impl From<UserError> for ServiceError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(m) => ServiceError::NotFound(m),
            UserError::Validation(errors) => ServiceError::validation(errors.to_messages()),
            e @ UserError::InvalidId(_) => ServiceError::BadRequest(e.to_string()),
            UserError::InvalidBody(m) => ServiceError::BadRequest(m),
            UserError::Storage(m) => ServiceError::Storage(m),
            UserError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// The users service. Holds the record store and the rule set every
/// write is checked against.
pub struct UserService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) rules: Arc<dyn RuleSet>,
}

impl UserService {
    /// Create a new UserService using the standard record rules.
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Self::with_rules(kv, Arc::new(RecordRules))
    }

    /// Create a new UserService with a custom rule set.
    pub fn with_rules(kv: Arc<dyn KVStore>, rules: Arc<dyn RuleSet>) -> Arc<Self> {
        Arc::new(Self { kv, rules })
    }

    // ── Document helpers ──

    fn make_key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    /// Reject ids that cannot name a record before they reach the store.
    pub(crate) fn check_id(id: &str) -> Result<(), UserError> {
        if is_valid_id(id) {
            Ok(())
        } else {
            Err(UserError::InvalidId(id.to_string()))
        }
    }

    fn encode(user: &User) -> Result<Vec<u8>, UserError> {
        serde_json::to_vec(user).map_err(|e| UserError::Internal(format!("serialize: {}", e)))
    }

    fn decode(bytes: &[u8]) -> Result<User, UserError> {
        serde_json::from_slice(bytes)
            .map_err(|e| UserError::Internal(format!("deserialize: {}", e)))
    }

    /// Insert a new document.
    pub(crate) fn insert_doc(&self, user: &User) -> Result<(), UserError> {
        let bytes = Self::encode(user)?;
        self.kv.set(&Self::make_key(&user.id), &bytes)?;
        Ok(())
    }

    /// Get a document by id, or None.
    pub(crate) fn find_doc(&self, id: &str) -> Result<Option<User>, UserError> {
        match self.kv.get(&Self::make_key(id))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Replace an existing document. Returns false if there was none.
    pub(crate) fn replace_doc(&self, user: &User) -> Result<bool, UserError> {
        let bytes = Self::encode(user)?;
        Ok(self.kv.replace(&Self::make_key(&user.id), &bytes)?)
    }

    /// Delete a document, returning what was removed.
    pub(crate) fn delete_doc(&self, id: &str) -> Result<Option<User>, UserError> {
        match self.kv.delete(&Self::make_key(id))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All documents in key order.
    pub(crate) fn scan_docs(&self) -> Result<Vec<User>, UserError> {
        let entries = self.kv.scan(KEY_PREFIX)?;
        let mut users = Vec::with_capacity(entries.len());
        for (_key, bytes) in entries {
            users.push(Self::decode(&bytes)?);
        }
        Ok(users)
    }

    /// Run the rule set over `draft` and, if it passes, read out the typed
    /// fields. An age the rule set let through must still fit a `u32`.
    pub(crate) fn accept(&self, draft: &Draft) -> Result<UserFields, UserError> {
        let errors = self.rules.validate(draft);
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }
        let Ok(age) = draft.age.trim().parse::<u32>() else {
            let mut errors = ErrorMap::new();
            errors.insert(Field::Age, Rule::Range);
            return Err(UserError::Validation(errors));
        };
        Ok(UserFields {
            name: draft.name.clone(),
            email: draft.email.clone(),
            age,
        })
    }

    pub(crate) fn not_found() -> UserError {
        UserError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }
}

/// Read a request body into a draft, mapping shape errors to `InvalidBody`.
pub(crate) fn draft_from_body(body: &Value) -> Result<Draft, UserError> {
    Draft::from_json(body).map_err(|e| UserError::InvalidBody(e.to_string()))
}
