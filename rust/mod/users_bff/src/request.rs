//! Requests the client views emit.

use userbase_types::Field;

/// Open the record form. `id: None` opens it in create mode; `Some(id)`
/// loads that record for update.
#[derive(Debug, Clone)]
pub struct OpenFormReq {
    pub id: Option<String>,
}

impl OpenFormReq {
    pub const PATH: &'static str = "users/form/open";
}

/// Change one field of the draft.
#[derive(Debug, Clone)]
pub struct EditFieldReq {
    pub field: Field,
    pub value: String,
}

impl EditFieldReq {
    pub const PATH: &'static str = "users/form/edit";
}

#[derive(Debug, Clone)]
pub struct SubmitFormReq;

impl SubmitFormReq {
    pub const PATH: &'static str = "users/form/submit";
}

#[derive(Debug, Clone)]
pub struct CancelFormReq;

impl CancelFormReq {
    pub const PATH: &'static str = "users/form/cancel";
}

/// (Re)load the listing.
#[derive(Debug, Clone)]
pub struct LoadListReq;

impl LoadListReq {
    pub const PATH: &'static str = "users/list/load";
}

/// Ask to delete a record. Nothing is sent until it is confirmed.
#[derive(Debug, Clone)]
pub struct RequestDeleteReq {
    pub id: String,
}

impl RequestDeleteReq {
    pub const PATH: &'static str = "users/list/delete/request";
}

#[derive(Debug, Clone)]
pub struct ConfirmDeleteReq;

impl ConfirmDeleteReq {
    pub const PATH: &'static str = "users/list/delete/confirm";
}

#[derive(Debug, Clone)]
pub struct CancelDeleteReq;

impl CancelDeleteReq {
    pub const PATH: &'static str = "users/list/delete/cancel";
}

#[derive(Debug, Clone)]
pub struct DismissErrorReq;

impl DismissErrorReq {
    pub const PATH: &'static str = "users/list/error/dismiss";
}
