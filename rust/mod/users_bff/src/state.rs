//! Client view state, addressed by path in the flux store.

use userbase_types::{Draft, User};
use userbase_validate::ErrorMap;

/// Banner shown when a create submission fails.
pub const CREATE_FAILED: &str = "Failed to create user. Please try again.";
/// Banner shown when an update submission fails.
pub const UPDATE_FAILED: &str = "Failed to update user. Please try again.";
/// Banner shown when the record to edit cannot be fetched.
pub const LOAD_USER_FAILED: &str = "Failed to load user data. Please try again.";
/// Listing error when the list cannot be fetched.
pub const LOAD_LIST_FAILED: &str = "Failed to load users. Please try again later.";
/// Listing error when a delete fails without a server message.
pub const DELETE_FAILED: &str = "Failed to delete user. Please try again.";
/// Listing error when delete is asked for an empty id.
pub const INVALID_ID: &str = "Invalid user ID. Please try again.";

/// Which view is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Edit(String),
}

/// Navigation route, stored at `app/route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute(pub Route);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}

/// Whether the form makes a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Fetching the record to edit (update mode only).
    Loading,
    Editing,
    Submitting,
    /// Terminal: the form was submitted or cancelled.
    NavigatedAway,
}

/// Record form state, stored at `users/form`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFormState {
    pub mode: FormMode,
    pub phase: FormPhase,
    pub draft: Draft,
    /// Per-field messages from the last submit attempt.
    pub errors: ErrorMap,
    /// Submit-level or fetch-level failure message.
    pub banner: Option<String>,
}

impl UserFormState {
    pub const PATH: &'static str = "users/form";

    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Editing,
            draft: Draft::default(),
            errors: ErrorMap::new(),
            banner: None,
        }
    }

    pub fn loading(id: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Update(id.into()),
            phase: FormPhase::Loading,
            draft: Draft::default(),
            errors: ErrorMap::new(),
            banner: None,
        }
    }

    /// The submit control is enabled only while editing.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    /// Banner text for a failed submission in this mode.
    pub fn submit_failed_message(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_FAILED,
            FormMode::Update(_) => UPDATE_FAILED,
        }
    }
}

/// Listing view state, stored at `users/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id waiting for the user to confirm deletion.
    pub pending_delete: Option<String>,
    /// Bumped on every error change; a dismiss timer only clears the
    /// error it was started for.
    pub error_seq: u64,
}

impl UserListState {
    pub const PATH: &'static str = "users/list";

    pub(crate) fn set_error(&mut self, message: impl Into<String>) -> u64 {
        self.error = Some(message.into());
        self.error_seq += 1;
        self.error_seq
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
        self.error_seq += 1;
    }
}
