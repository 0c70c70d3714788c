//! Structured retrieval plans
//!
//! A plan names a target label, property filters to apply, and relationship
//! hops to traverse. Plans are produced by the query translator and consumed
//! by the executor; the lenient JSON parser here absorbs the field-name and
//! shape variations LLMs produce.

use crate::graph::{Direction, EdgeKind, Label, PropertyValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while interpreting a plan document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("plan is not a JSON object")]
    NotAnObject,

    #[error("plan is missing a target label")]
    MissingTargetLabel,

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("unknown relationship type: {0}")]
    UnknownEdgeKind(String),

    #[error("invalid filter for key {0}")]
    InvalidFilter(String),

    #[error("invalid hop entry: {0}")]
    InvalidHop(String),
}

/// Comparison operator for a property filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Exact scalar equality
    Eq,
    /// Case-insensitive substring match on string values
    Contains,
}

/// A single property constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub key: String,
    pub op: FilterOp,
    pub value: PropertyValue,
}

impl PropertyFilter {
    pub fn eq(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        PropertyFilter {
            key: key.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn contains(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        PropertyFilter {
            key: key.into(),
            op: FilterOp::Contains,
            value: value.into(),
        }
    }

    /// Does the given property value satisfy this filter?
    ///
    /// A missing property (None) never matches.
    pub fn matches(&self, actual: Option<&PropertyValue>) -> bool {
        let Some(actual) = actual else { return false };
        match self.op {
            FilterOp::Eq => actual == &self.value,
            FilterOp::Contains => match (actual.as_str(), self.value.as_str()) {
                (Some(haystack), Some(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                // Substring only makes sense on strings; fall back to equality
                _ => actual == &self.value,
            },
        }
    }
}

/// A relationship traversal step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub kind: EdgeKind,
    pub direction: Direction,
}

impl Hop {
    pub fn outgoing(kind: EdgeKind) -> Self {
        Hop {
            kind,
            direction: Direction::Outgoing,
        }
    }

    pub fn incoming(kind: EdgeKind) -> Self {
        Hop {
            kind,
            direction: Direction::Incoming,
        }
    }
}

/// A structured retrieval plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub target_label: Label,
    pub property_filters: Vec<PropertyFilter>,
    pub hops: Vec<Hop>,
}

impl Plan {
    /// A plan that scans one label with no filters or hops
    pub fn scan(target_label: Label) -> Self {
        Plan {
            target_label,
            property_filters: Vec::new(),
            hops: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.property_filters.push(filter);
        self
    }

    pub fn with_hop(mut self, hop: Hop) -> Self {
        self.hops.push(hop);
        self
    }

    /// Interpret a JSON document produced by the query translator
    ///
    /// Accepts snake_case and camelCase field names, filters either as a
    /// plain `{key: value}` map (substring match for strings, equality
    /// otherwise) or as `{key: {"op": ..., "value": ...}}`, and hops either
    /// as bare edge-kind names (outgoing) or as
    /// `{"kind": ..., "direction": ...}` objects.
    pub fn from_json_value(doc: &Value) -> Result<Plan, PlanError> {
        let obj = doc.as_object().ok_or(PlanError::NotAnObject)?;

        let label_value = obj
            .get("target_label")
            .or_else(|| obj.get("targetLabel"))
            .or_else(|| obj.get("label"))
            .and_then(|v| v.as_str())
            .ok_or(PlanError::MissingTargetLabel)?;
        let target_label = Label::from_str(label_value)
            .map_err(|_| PlanError::UnknownLabel(label_value.to_string()))?;

        let mut property_filters = Vec::new();
        let filters = obj
            .get("filters")
            .or_else(|| obj.get("property_filters"))
            .or_else(|| obj.get("propertyFilters"));
        if let Some(filters) = filters {
            let map = filters
                .as_object()
                .ok_or_else(|| PlanError::InvalidFilter("filters".to_string()))?;
            for (key, raw) in map {
                property_filters.push(parse_filter(key, raw)?);
            }
        }

        let mut hops = Vec::new();
        let hop_list = obj
            .get("hops")
            .or_else(|| obj.get("relationships"))
            .and_then(|v| v.as_array());
        if let Some(hop_list) = hop_list {
            for entry in hop_list {
                hops.push(parse_hop(entry)?);
            }
        }

        Ok(Plan {
            target_label,
            property_filters,
            hops,
        })
    }
}

fn scalar_from_json(key: &str, value: &Value) -> Result<PropertyValue, PlanError> {
    match value {
        Value::String(s) => Ok(PropertyValue::String(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PropertyValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(PropertyValue::Float(f))
            } else {
                Err(PlanError::InvalidFilter(key.to_string()))
            }
        }
        Value::Bool(b) => Ok(PropertyValue::Boolean(*b)),
        Value::Null => Ok(PropertyValue::Null),
        _ => Err(PlanError::InvalidFilter(key.to_string())),
    }
}

fn parse_filter(key: &str, raw: &Value) -> Result<PropertyFilter, PlanError> {
    // Declared-operator form: {"op": "eq"|"contains", "value": ...}
    if let Some(obj) = raw.as_object() {
        let op = match obj.get("op").and_then(|v| v.as_str()) {
            Some("eq") | Some("equals") => FilterOp::Eq,
            Some("contains") | Some("substring") | None => FilterOp::Contains,
            Some(_) => return Err(PlanError::InvalidFilter(key.to_string())),
        };
        let value = obj
            .get("value")
            .ok_or_else(|| PlanError::InvalidFilter(key.to_string()))?;
        return Ok(PropertyFilter {
            key: key.to_string(),
            op,
            value: scalar_from_json(key, value)?,
        });
    }

    // Shorthand form: bare scalar, substring match for strings
    let value = scalar_from_json(key, raw)?;
    let op = match value {
        PropertyValue::String(_) => FilterOp::Contains,
        _ => FilterOp::Eq,
    };
    Ok(PropertyFilter {
        key: key.to_string(),
        op,
        value,
    })
}

fn parse_hop(entry: &Value) -> Result<Hop, PlanError> {
    if let Some(name) = entry.as_str() {
        let kind = EdgeKind::from_str(name)
            .map_err(|_| PlanError::UnknownEdgeKind(name.to_string()))?;
        return Ok(Hop::outgoing(kind));
    }
    if let Some(obj) = entry.as_object() {
        let name = obj
            .get("kind")
            .or_else(|| obj.get("type"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| PlanError::InvalidHop(entry.to_string()))?;
        let kind = EdgeKind::from_str(name)
            .map_err(|_| PlanError::UnknownEdgeKind(name.to_string()))?;
        let direction = match obj.get("direction").and_then(|v| v.as_str()) {
            Some("incoming") | Some("in") => Direction::Incoming,
            _ => Direction::Outgoing,
        };
        return Ok(Hop { kind, direction });
    }
    Err(PlanError::InvalidHop(entry.to_string()))
}
