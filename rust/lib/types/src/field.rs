use std::fmt;

use serde::{Deserialize, Serialize};

/// A writable record field.
///
/// Ordering follows declaration order, which is also the order the rule
/// set checks fields in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Age,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Age];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
