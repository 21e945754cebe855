use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::field::Field;
use crate::user::User;

/// Unvalidated field text, as typed into a form or sent in a request body.
///
/// Every field is kept as text so that "empty" and "not a number" can be
/// reported by the rule set rather than rejected during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub age: String,
}

/// A request body that cannot be read as a draft at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("field '{0}' must be a string or a number")]
    InvalidType(Field),
}

impl Draft {
    /// A draft pre-filled from an existing record (update mode).
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Age => &self.age,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Age => self.age = value,
        }
    }

    /// Read a draft out of a JSON request body.
    ///
    /// Strings are taken as-is, numbers and booleans as their text, and a
    /// missing or null field as empty text. Unknown keys (including `id`)
    /// are ignored. Arrays and objects are rejected.
    pub fn from_json(body: &Value) -> Result<Self, DraftError> {
        let obj = body.as_object().ok_or(DraftError::NotAnObject)?;
        let mut draft = Draft::default();
        for field in Field::ALL {
            let text = match obj.get(field.as_str()) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => number_text(n),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Array(_)) | Some(Value::Object(_)) => {
                    return Err(DraftError::InvalidType(field));
                }
            };
            draft.set(field, text);
        }
        Ok(draft)
    }
}

/// Text of a JSON number. A float with no fractional part reads as the
/// integer it equals (`30.0` is `"30"`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
