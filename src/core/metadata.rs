//! Decoding of raw front matter into structured metadata
//!
//! The extraction engine never looks inside a front matter block. Decoding
//! happens here, on demand, with the decoder picked from the first
//! non-whitespace byte of the block: `-` for YAML, `+` for TOML and `{` for
//! JSON. YAML and TOML blocks have their delimiter lines removed before
//! parsing; JSON blocks are parsed as they are.

use crate::error::{PageError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Front matter serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
    Json,
}

impl FrontMatterFormat {
    /// Format implied by the lead byte of a front matter block
    pub fn from_lead(lead: u8) -> Option<Self> {
        match lead {
            b'-' => Some(Self::Yaml),
            b'+' => Some(Self::Toml),
            b'{' => Some(Self::Json),
            _ => None,
        }
    }

    /// Lowercase format name
    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for FrontMatterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded front matter, keeping the value type of its own format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metadata {
    Yaml(serde_yaml::Value),
    Toml(toml::Value),
    Json(serde_json::Value),
}

impl Metadata {
    /// The format this value was decoded from
    pub fn format(&self) -> FrontMatterFormat {
        match self {
            Self::Yaml(_) => FrontMatterFormat::Yaml,
            Self::Toml(_) => FrontMatterFormat::Toml,
            Self::Json(_) => FrontMatterFormat::Json,
        }
    }

    /// Convert to a JSON value regardless of the source format
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Self::Yaml(value) => Ok(serde_json::to_value(value)?),
            Self::Toml(value) => Ok(toml_to_json(value)),
            Self::Json(value) => Ok(value.clone()),
        }
    }

    /// Deserialize the metadata into a specific type
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Yaml(value) => Ok(serde_yaml::from_value(value.clone())?),
            Self::Toml(value) => Ok(value.clone().try_into()?),
            Self::Json(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }

    /// Get a top-level string field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self {
            Self::Yaml(value) => value.get(key)?.as_str(),
            Self::Toml(value) => value.get(key)?.as_str(),
            Self::Json(value) => value.get(key)?.as_str(),
        }
    }

    /// Whether the block decoded to nothing (null or an empty table)
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Yaml(value) => {
                value.is_null() || value.as_mapping().is_some_and(|m| m.is_empty())
            }
            Self::Toml(value) => value.as_table().is_some_and(|t| t.is_empty()),
            Self::Json(value) => {
                value.is_null() || value.as_object().is_some_and(|o| o.is_empty())
            }
        }
    }
}

/// TOML datetimes become their RFC 3339 text; non-finite floats become null
fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        toml::Value::String(s) => Json::String(s.clone()),
        toml::Value::Integer(i) => Json::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        toml::Value::Boolean(b) => Json::Bool(*b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Json::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Format of a front matter block, from its first non-whitespace byte
pub fn detect_format(front_matter: &[u8]) -> Option<FrontMatterFormat> {
    front_matter
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .and_then(|&lead| FrontMatterFormat::from_lead(lead))
}

/// Decode a raw front matter block
///
/// Returns `Ok(None)` for an empty block.
pub fn decode(front_matter: &[u8]) -> Result<Option<Metadata>> {
    let Some(&lead) = front_matter.iter().find(|b| !b.is_ascii_whitespace()) else {
        return Ok(None);
    };
    let format = FrontMatterFormat::from_lead(lead)
        .ok_or_else(|| PageError::unsupported_format(lead))?;
    decode_as(format, front_matter).map(Some)
}

/// Decode a raw front matter block with an explicit format
pub fn decode_as(format: FrontMatterFormat, front_matter: &[u8]) -> Result<Metadata> {
    match format {
        FrontMatterFormat::Yaml => {
            let inner = inner_block(as_text(front_matter)?, "---");
            if inner.trim().is_empty() {
                return Ok(Metadata::Yaml(serde_yaml::Value::Null));
            }
            Ok(Metadata::Yaml(serde_yaml::from_str(inner)?))
        }
        FrontMatterFormat::Toml => {
            let inner = inner_block(as_text(front_matter)?, "+++");
            Ok(Metadata::Toml(toml::from_str(inner)?))
        }
        FrontMatterFormat::Json => Ok(Metadata::Json(serde_json::from_slice(front_matter)?)),
    }
}

fn as_text(front_matter: &[u8]) -> Result<&str> {
    std::str::from_utf8(front_matter).map_err(|_| PageError::invalid_utf8("front matter"))
}

/// Strip the opening and closing delimiter lines
fn inner_block<'a>(text: &'a str, delim: &str) -> &'a str {
    let body = text.trim_start();
    let body = match body.strip_prefix(delim) {
        Some(rest) => rest.split_once('\n').map_or("", |(_, rest)| rest),
        None => body,
    };
    let body = body.trim_end();
    body.strip_suffix(delim).map_or(body, str::trim_end)
}
