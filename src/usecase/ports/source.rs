use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::row::{Dataset, Row};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("transport failure{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (HTTP {code})"))
        .unwrap_or_default()
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport {
            status: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(value) => Some(*value as f64),
            ParamValue::Float(value) => Some(*value),
            ParamValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    // Integers and floats win over text when the input looks numeric.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return ParamValue::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() {
                return ParamValue::Float(value);
            }
        }
        ParamValue::Text(raw.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

pub type QueryParams = BTreeMap<String, ParamValue>;

pub trait DataSource: Send + Sync {
    fn fetch(&self, params: &QueryParams) -> Result<Dataset, FetchError>;
}

pub fn dataset_from_json(payload: serde_json::Value) -> Result<Dataset, FetchError> {
    let serde_json::Value::Array(items) = payload else {
        return Err(FetchError::MalformedPayload(format!(
            "expected a JSON array, got {}",
            json_kind(&payload)
        )));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            serde_json::Value::Object(object) => rows.push(Row::from_json_object(object)),
            other => {
                return Err(FetchError::MalformedPayload(format!(
                    "element {idx} is {}, expected an object",
                    json_kind(&other)
                )))
            }
        }
    }

    Ok(Dataset::from_rows(rows))
}

pub fn dataset_from_json_reader(reader: impl std::io::Read) -> Result<Dataset, FetchError> {
    let payload: serde_json::Value = serde_json::from_reader(reader).map_err(|err| {
        if err.is_io() {
            FetchError::transport(format!("failed to read response body: {err}"))
        } else {
            FetchError::MalformedPayload(format!("invalid JSON: {err}"))
        }
    })?;
    dataset_from_json(payload)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: serde_json::Value,
}

impl StaticSource {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }
}

impl DataSource for StaticSource {
    fn fetch(&self, _params: &QueryParams) -> Result<Dataset, FetchError> {
        dataset_from_json(self.payload.clone())
    }
}
