//! Record rule set.
//!
//! One implementation of "what is a valid user record", consumed by the
//! record API before it touches the store and by the client form before
//! it touches the network. Both layers therefore accept and reject exactly
//! the same drafts.
//!
//! Every field is checked independently; the result reports all failing
//! fields at once, never just the first.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use userbase_types::{Draft, Field, UserFields};

/// Smallest accepted age.
pub const MIN_AGE: u32 = 1;
/// Largest accepted age.
pub const MAX_AGE: u32 = 120;

/// `local@domain.tld`, searched anywhere in the value (not anchored).
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|e| panic!("email pattern: {e}"))
});

/// Which rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field is empty.
    Required,
    /// The email does not have the `local@domain.tld` shape.
    Format,
    /// The age is not an integer in range.
    Range,
}

impl Rule {
    /// Human-readable message for a failure of this rule on `field`.
    pub fn message(&self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, _) => "Name is required",
            (Field::Email, Rule::Required) => "Email is required",
            (Field::Email, _) => "Please enter a valid email address",
            (Field::Age, Rule::Required) => "Age is required",
            (Field::Age, _) => "Please enter a valid age (1-120)",
        }
    }
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

/// Field name → failure. Empty iff the draft is acceptable.
///
/// Serializes as `{"name": "Name is required", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<Field, Violation>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record a failure for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, rule: Rule) {
        self.entries.insert(
            field,
            Violation {
                rule,
                message: rule.message(field).to_string(),
            },
        );
    }

    /// Forget the failure for `field`. Returns true if there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.entries.remove(&field).is_some()
    }

    /// Message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(|v| v.message.as_str())
    }

    /// Rule `field` failed, if it failed.
    pub fn rule(&self, field: Field) -> Option<Rule> {
        self.entries.get(&field).map(|v| v.rule)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// Failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &Violation)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    /// Plain `field name → message` map, as carried in API error bodies.
    pub fn to_messages(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(f, v)| (f.as_str().to_string(), v.message.clone()))
            .collect()
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, violation) in &self.entries {
            map.serialize_entry(field.as_str(), &violation.message)?;
        }
        map.end()
    }
}

/// Capability: decide whether a draft is an acceptable record.
pub trait RuleSet: Send + Sync {
    fn validate(&self, draft: &Draft) -> ErrorMap;
}

/// The user record rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordRules;

impl RuleSet for RecordRules {
    fn validate(&self, draft: &Draft) -> ErrorMap {
        let mut errors = ErrorMap::new();

        if draft.name.trim().is_empty() {
            errors.insert(Field::Name, Rule::Required);
        }

        if draft.email.is_empty() {
            errors.insert(Field::Email, Rule::Required);
        } else if !EMAIL_SHAPE.is_match(&draft.email) {
            errors.insert(Field::Email, Rule::Format);
        }

        if draft.age.trim().is_empty() {
            errors.insert(Field::Age, Rule::Required);
        } else if parse_age(&draft.age).is_none() {
            errors.insert(Field::Age, Rule::Range);
        }

        errors
    }
}

/// Validate a draft with [`RecordRules`].
pub fn validate(draft: &Draft) -> ErrorMap {
    RecordRules.validate(draft)
}

/// Validate a draft and, if it passes, return its typed fields.
pub fn validated(draft: &Draft) -> Result<UserFields, ErrorMap> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }
    match parse_age(&draft.age) {
        Some(age) => Ok(UserFields {
            name: draft.name.clone(),
            email: draft.email.clone(),
            age,
        }),
        None => {
            let mut errors = ErrorMap::new();
            errors.insert(Field::Age, Rule::Range);
            Err(errors)
        }
    }
}

/// Parse an age: an integer (surrounding whitespace allowed) in
/// `MIN_AGE..=MAX_AGE`.
pub fn parse_age(text: &str) -> Option<u32> {
    let n: i64 = text.trim().parse().ok()?;
    let n = u32::try_from(n).ok()?;
    (MIN_AGE..=MAX_AGE).contains(&n).then_some(n)
}
