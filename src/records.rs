use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::RecordError;

// @module: CDLI artifact records as found in JSON exports

// @struct: Inscription object embedded in an artifact record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InscriptionData {
    // @field: Inscription identifier
    #[serde(default)]
    pub id: Option<i64>,

    // @field: Raw ATF; `None` if the key is absent, `Some(None)` if null
    #[serde(default, deserialize_with = "present_nullable")]
    pub atf: Option<Option<String>>,
}

impl InscriptionData {
    /// Raw ATF text, if the record carries any
    pub fn raw_atf(&self) -> Option<&str> {
        self.atf.as_ref().and_then(|atf| atf.as_deref())
    }

    /// Whether the record carries an `atf` key at all, null included
    pub fn has_atf_field(&self) -> bool {
        self.atf.is_some()
    }
}

// @struct: Single artifact record of a CDLI export
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtifactRecord {
    // @field: Artifact (root) identifier
    pub id: i64,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub designation: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub composite_no: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub artifact_type_comments: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub excavation_no: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub museum_no: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub findspot_comments: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub findspot_square: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub thickness: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub height: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_text")]
    pub width: Option<String>,

    // @field: Embedded inscription; anything but an object counts as absent
    #[serde(default, deserialize_with = "object_or_none")]
    pub inscription: Option<InscriptionData>,
}

impl ArtifactRecord {
    /// Build a record from one JSON value of an export file
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        let id = object.get("id").ok_or(RecordError::MissingId)?;

        serde_json::from_value(value.clone()).map_err(|source| RecordError::Malformed {
            id: id.to_string(),
            source,
        })
    }
}

fn present_nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// Dimensions and catalogue numbers show up as strings or numbers
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn object_or_none<'de, D>(deserializer: D) -> Result<Option<InscriptionData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
