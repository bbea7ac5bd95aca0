//! Series record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Fields supplied by an update, merged shallowly over a stored record.
pub type Patch = Map<String, Value>;

/// A single series entry.
///
/// Stored as the raw JSON object so any field a caller merges in is kept
/// as-is, whatever its type. The accessors read the well-known fields
/// (`id`, `name`, `gender`, `seasons`, `liked`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Serie(Map<String, Value>);

impl Serie {
    /// Create a fresh, not-yet-liked record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<Value>,
        gender: impl Into<Value>,
        seasons: impl Into<Value>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.into()));
        fields.insert("name".to_string(), name.into());
        fields.insert("gender".to_string(), gender.into());
        fields.insert("seasons".to_string(), seasons.into());
        fields.insert("liked".to_string(), Value::Bool(false));
        Self(fields)
    }

    /// Raw value of any field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The id, when it is a string. Only string ids can be looked up.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&Value> {
        self.get("name")
    }

    pub fn gender(&self) -> Option<&Value> {
        self.get("gender")
    }

    pub fn seasons(&self) -> Option<&Value> {
        self.get("seasons")
    }

    /// Whether `liked` holds a truthy value. Absent means not liked.
    pub fn liked(&self) -> bool {
        self.get("liked").is_some_and(is_truthy)
    }

    /// Case-insensitive genre comparison. Non-string genres never match.
    pub fn has_gender(&self, gender: &str) -> bool {
        self.gender()
            .and_then(Value::as_str)
            .is_some_and(|g| g.to_lowercase() == gender.to_lowercase())
    }

    /// Overlay `patch` on top of this record.
    ///
    /// Every key in the patch replaces the stored value, `id` included.
    /// Existing keys keep their position, new keys are appended.
    pub fn merged(&self, patch: &Patch) -> Serie {
        let mut fields = self.0.clone();
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        Serie(fields)
    }
}

/// Creation input. Every field is optional so presence can be checked by the
/// service rather than by the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSerie {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub seasons: Option<Value>,
}

impl NewSerie {
    pub fn new(
        name: impl Into<Value>,
        gender: impl Into<Value>,
        seasons: impl Into<Value>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            gender: Some(gender.into()),
            seasons: Some(seasons.into()),
        }
    }

    /// Returns `(name, gender, seasons)` when all three are present and truthy.
    pub(crate) fn validate(self) -> Result<(Value, Value, Value)> {
        match (self.name, self.gender, self.seasons) {
            (Some(name), Some(gender), Some(seasons))
                if is_truthy(&name) && is_truthy(&gender) && is_truthy(&seasons) =>
            {
                Ok((name, gender, seasons))
            }
            _ => Err(Error::InvalidInput(
                "name, gender and seasons are required".to_string(),
            )),
        }
    }
}

/// Loose truthiness: null, false, zero and the empty string are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
