use serde::{Deserialize, Serialize};

/// A persisted user record.
///
/// `id` is assigned by the store on create and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
}

/// The writable part of a record: what a create or a full-replacement
/// update carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl User {
    /// Build a record from validated fields and a store-assigned id.
    pub fn new(id: impl Into<String>, fields: UserFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            email: fields.email,
            age: fields.age,
        }
    }

    /// The writable fields of this record.
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}
