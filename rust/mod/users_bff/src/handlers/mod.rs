//! Handler implementations for the record form and the listing.

pub mod form_handlers;
pub mod list_handlers;
