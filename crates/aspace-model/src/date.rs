//! Date records read from archival objects and written to digital objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label carried by every resolved date.
pub const CREATION_LABEL: &str = "creation";

/// A structured date entry on an archival object. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DateRecord {
    pub fn with_type(date_type: &str) -> Self {
        Self {
            date_type: Some(date_type.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn begin(mut self, begin: &str) -> Self {
        self.begin = Some(begin.to_string());
        self
    }

    #[must_use]
    pub fn end(mut self, end: &str) -> Self {
        self.end = Some(end.to_string());
        self
    }

    #[must_use]
    pub fn expression(mut self, expression: &str) -> Self {
        self.expression = Some(expression.to_string());
        self
    }
}

/// Collection-level `[start, end]` bounds taken from a `start/end` column.
///
/// Used to fill in undated items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionDateRange {
    parts: Vec<String>,
}

impl CollectionDateRange {
    /// Split a `"1875/1879"` style value on `/`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            parts: trimmed.split('/').map(|part| part.trim().to_string()).collect(),
        }
    }

    pub fn from_bounds(start: &str, end: &str) -> Self {
        Self {
            parts: vec![start.to_string(), end.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn bound(&self, index: usize) -> Option<&str> {
        if self.parts.len() < 2 {
            return None;
        }
        self.parts
            .get(index)
            .map(String::as_str)
            .filter(|part| !part.is_empty())
    }

    /// First element, when the range has at least two and it is non-empty.
    pub fn start(&self) -> Option<&str> {
        self.bound(0)
    }

    /// Second element, when it is non-empty.
    pub fn end(&self) -> Option<&str> {
        self.bound(1)
    }
}

/// A normalized date ready to attach to a digital object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub jsonmodel_type: String,
    pub date_type: String,
    pub expression: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl ResolvedDate {
    pub fn new(date_type: &str, expression: String) -> Self {
        Self {
            jsonmodel_type: "date".to_string(),
            date_type: date_type.to_string(),
            expression,
            label: CREATION_LABEL.to_string(),
            begin: None,
            end: None,
        }
    }
}
