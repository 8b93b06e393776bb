//! Canonical entity reference keys
//!
//! Backend payloads reference related records in three shapes: a bare
//! identifier scalar, a populated object carrying `_id`/`id` (plus `name` and
//! whatever else the endpoint chose to join in), or nothing at all. Mixed
//! shapes for the same record are routine, so every comparison in this crate
//! goes through [`key_of`] and [`IdentityKey::matches`] — raw reference
//! fields are never compared directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Canonical comparable form of an entity reference.
///
/// Both operands of every comparison are stringified on construction, so a
/// numeric-looking identifier and its string form land on the same key.
/// The empty key means "no reference".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// The canonical "no reference" key.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join predicate: equal and non-empty.
    ///
    /// Two absent references never match each other — a lead with no agent
    /// must not be counted under an agent filter that is itself unset.
    pub fn matches(&self, other: &IdentityKey) -> bool {
        !self.0.is_empty() && self.0 == other.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IdentityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdentityKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Normalize any wire reference to its [`IdentityKey`].
///
/// Rules, in order:
/// 1. `null`, empty string, or anything unresolvable → the empty key.
/// 2. An object carrying `_id` or `id` → recurse on that field's value
///    (a present-but-empty `_id` falls through to `id`); an object carrying
///    only `$oid` — the serialized form of the backend's object-identifier
///    type — unwraps to the inner string.
/// 3. Any other scalar → its canonical string form.
///
/// Pure and total: never panics, never errors.
pub fn key_of(reference: &Value) -> IdentityKey {
    match reference {
        Value::Null => IdentityKey::empty(),
        Value::String(s) => IdentityKey(s.clone()),
        Value::Number(n) => IdentityKey(n.to_string()),
        Value::Bool(b) => IdentityKey(b.to_string()),
        Value::Object(fields) => {
            for field in ["_id", "id"] {
                if let Some(inner) = fields.get(field) {
                    let key = key_of(inner);
                    if !key.is_empty() {
                        return key;
                    }
                }
            }
            match fields.get("$oid") {
                Some(inner) => key_of(inner),
                None => IdentityKey::empty(),
            }
        }
        Value::Array(_) => IdentityKey::empty(),
    }
}

/// [`key_of`] over an optional reference field.
pub fn key_of_opt(reference: Option<&Value>) -> IdentityKey {
    reference.map(key_of).unwrap_or_default()
}

/// First non-empty key across a fallback chain of reference fields.
///
/// Backend rows carry the same relationship under several generations of
/// field names; callers list them in preference order.
pub fn first_key<'a, I>(references: I) -> IdentityKey
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    for reference in references {
        let key = key_of_opt(reference);
        if !key.is_empty() {
            return key;
        }
    }
    IdentityKey::empty()
}

/// Whether two wire references denote the same backend record.
pub fn same_entity(a: &Value, b: &Value) -> bool {
    key_of(a).matches(&key_of(b))
}
