//! `HX-Location` and history directive values.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::htmx::error::{HtmxError, HtmxResult};

/// Structured `HX-Location` target.
///
/// `path` is mandatory; the other fields mirror the client's ajax context.
/// A location with only `path` set renders as the bare path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HxLocation {
    /// URL to load the response from.
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
}

impl HxLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: None,
            event: None,
            target: None,
            swap: None,
            values: None,
            headers: None,
        }
    }

    /// Source element of the request.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Event that "triggered" the request.
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Selector of the element to swap the response into.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn swap(mut self, swap: impl Into<String>) -> Self {
        self.swap = Some(swap.into());
        self
    }

    /// Values submitted with the request.
    pub fn values(mut self, values: Value) -> Self {
        self.values = Some(values);
        self
    }

    /// Headers submitted with the request.
    pub fn headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    /// True when no field other than `path` is set.
    ///
    /// Fields set to empty values still count as set.
    pub fn is_path_only(&self) -> bool {
        self.source.is_none()
            && self.event.is_none()
            && self.target.is_none()
            && self.swap.is_none()
            && self.values.is_none()
            && self.headers.is_none()
    }
}

/// Argument of [`Htmx::location`](crate::htmx::Htmx::location).
#[derive(Debug, Clone, PartialEq)]
pub enum LocationTarget {
    Path(String),
    Detailed(HxLocation),
    /// Untyped object with a `path` key; other keys are sent as given.
    Json(Map<String, Value>),
}

impl LocationTarget {
    /// Render the header value: the bare path, or compact JSON.
    pub fn to_header_value(&self) -> HtmxResult<String> {
        match self {
            LocationTarget::Path(path) => Ok(path.clone()),
            LocationTarget::Detailed(location) if location.is_path_only() => {
                Ok(location.path.clone())
            }
            LocationTarget::Detailed(location) => Ok(serde_json::to_string(location)?),
            LocationTarget::Json(map) if map.len() == 1 => match map.get("path") {
                Some(Value::String(path)) => Ok(path.clone()),
                _ => Ok(serde_json::to_string(map)?),
            },
            LocationTarget::Json(map) => Ok(serde_json::to_string(map)?),
        }
    }
}

impl From<&str> for LocationTarget {
    fn from(path: &str) -> Self {
        LocationTarget::Path(path.to_owned())
    }
}

impl From<String> for LocationTarget {
    fn from(path: String) -> Self {
        LocationTarget::Path(path)
    }
}

impl From<HxLocation> for LocationTarget {
    fn from(location: HxLocation) -> Self {
        LocationTarget::Detailed(location)
    }
}

impl TryFrom<Value> for LocationTarget {
    type Error = HtmxError;

    /// Accepts a JSON string (bare path) or an object with a `path` key.
    /// Only the presence of `path` is checked.
    fn try_from(value: Value) -> HtmxResult<Self> {
        match value {
            Value::String(path) => Ok(LocationTarget::Path(path)),
            Value::Object(map) if map.contains_key("path") => Ok(LocationTarget::Json(map)),
            Value::Object(_) => Err(HtmxError::InvalidArgument("path is required".into())),
            other => Err(HtmxError::InvalidArgument(format!(
                "location must be a string or an object, got {other}"
            ))),
        }
    }
}

/// Value of `HX-Push-Url` / `HX-Replace-Url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryUpdate {
    Url(String),
    /// Leave the browser history untouched.
    Disabled,
}

impl HistoryUpdate {
    /// An empty URL is treated like [`HistoryUpdate::Disabled`].
    pub fn as_str(&self) -> &str {
        match self {
            HistoryUpdate::Url(url) if !url.is_empty() => url,
            _ => "false",
        }
    }
}

impl From<&str> for HistoryUpdate {
    fn from(url: &str) -> Self {
        HistoryUpdate::Url(url.to_owned())
    }
}

impl From<String> for HistoryUpdate {
    fn from(url: String) -> Self {
        HistoryUpdate::Url(url)
    }
}

impl From<Option<String>> for HistoryUpdate {
    fn from(url: Option<String>) -> Self {
        url.map_or(HistoryUpdate::Disabled, HistoryUpdate::Url)
    }
}
