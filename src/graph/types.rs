//! Core type definitions for the provenance graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a record (e.g. "SUP001", "CERT004")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

/// Record label — the closed set of entity types in the supply chain schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Label {
    Supplier,
    Material,
    Factory,
    Certification,
    Collection,
    Product,
}

impl Label {
    /// All labels, in schema order
    pub const ALL: [Label; 6] = [
        Label::Supplier,
        Label::Material,
        Label::Factory,
        Label::Certification,
        Label::Collection,
        Label::Product,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Supplier => "Supplier",
            Label::Material => "Material",
            Label::Factory => "Factory",
            Label::Certification => "Certification",
            Label::Collection => "Collection",
            Label::Product => "Product",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Edge kind — the closed set of relationship types between records
///
/// Serialized with the upper-snake wire names used by the dataset
/// (PROVIDES, SUPPLIED_TO, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum EdgeKind {
    #[serde(rename = "PROVIDES")]
    Provides,
    #[serde(rename = "SUPPLIED_TO")]
    SuppliedTo,
    #[serde(rename = "MANUFACTURES")]
    Manufactures,
    #[serde(rename = "PART_OF")]
    PartOf,
    #[serde(rename = "HAS_CERTIFICATION")]
    HasCertification,
    #[serde(rename = "REQUIRES_CERTIFICATION")]
    RequiresCertification,
}

impl EdgeKind {
    /// All edge kinds, in schema order
    pub const ALL: [EdgeKind; 6] = [
        EdgeKind::Provides,
        EdgeKind::SuppliedTo,
        EdgeKind::Manufactures,
        EdgeKind::PartOf,
        EdgeKind::HasCertification,
        EdgeKind::RequiresCertification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Provides => "PROVIDES",
            EdgeKind::SuppliedTo => "SUPPLIED_TO",
            EdgeKind::Manufactures => "MANUFACTURES",
            EdgeKind::PartOf => "PART_OF",
            EdgeKind::HasCertification => "HAS_CERTIFICATION",
            EdgeKind::RequiresCertification => "REQUIRES_CERTIFICATION",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeKind::ALL
            .iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Traversal direction relative to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Error returned when parsing a label or edge kind from an unknown name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id() {
        let id = RecordId::new("SUP001");
        assert_eq!(id.as_str(), "SUP001");
        assert_eq!(format!("{}", id), "SUP001");

        let id2: RecordId = "MAT001".into();
        assert_eq!(id2.as_str(), "MAT001");
    }

    #[test]
    fn test_label_roundtrip() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>().unwrap(), label);
        }
        assert_eq!("supplier".parse::<Label>().unwrap(), Label::Supplier);
        assert!("Widget".parse::<Label>().is_err());
    }

    #[test]
    fn test_edge_kind_roundtrip() {
        for kind in EdgeKind::ALL {
            assert_eq!(kind.as_str().parse::<EdgeKind>().unwrap(), kind);
        }
        assert_eq!("provides".parse::<EdgeKind>().unwrap(), EdgeKind::Provides);
        assert!("KNOWS".parse::<EdgeKind>().is_err());
    }

    #[test]
    fn test_edge_kind_wire_names() {
        let json = serde_json::to_string(&EdgeKind::SuppliedTo).unwrap();
        assert_eq!(json, "\"SUPPLIED_TO\"");
        let kind: EdgeKind = serde_json::from_str("\"HAS_CERTIFICATION\"").unwrap();
        assert_eq!(kind, EdgeKind::HasCertification);
    }
}
