//! Shared record types for the user registry.
//!
//! - [`User`]: a persisted record, as it travels over the wire.
//! - [`UserFields`]: the three writable fields, validated and typed.
//! - [`Draft`]: the unvalidated text a form (or a request body) holds.
//! - [`Field`]: names the writable fields.

mod draft;
mod field;
mod user;

pub use draft::{Draft, DraftError};
pub use field::Field;
pub use user::{User, UserFields};
