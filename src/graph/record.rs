//! Record implementation — a typed entity node in the provenance graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, RecordId};
use serde::{Deserialize, Serialize};

/// A typed record in the provenance graph
///
/// Records are created during store population and are immutable for the
/// lifetime of a session. Identity is the record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,

    /// Entity type
    pub label: Label,

    /// Flat scalar properties
    pub properties: PropertyMap,
}

impl Record {
    /// Create a record with no properties
    pub fn new(id: impl Into<RecordId>, label: Label) -> Self {
        Record {
            id: id.into(),
            label,
            properties: PropertyMap::new(),
        }
    }

    /// Create a record with properties
    pub fn with_properties(
        id: impl Into<RecordId>,
        label: Label,
        properties: PropertyMap,
    ) -> Self {
        Record {
            id: id.into(),
            label,
            properties,
        }
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Get a property as a string slice, if present and a string
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// The record's display name: its `name` property, falling back to its id
    pub fn display_name(&self) -> &str {
        self.property_str("name").unwrap_or_else(|| self.id.as_str())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}

impl std::hash::Hash for Record {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), "Como Silk Mills".into());
        props.insert("location".to_string(), "Como, Italy".into());
        Record::with_properties("SUP002", Label::Supplier, props)
    }

    #[test]
    fn test_record_properties() {
        let record = sample();
        assert_eq!(record.label, Label::Supplier);
        assert_eq!(record.property_str("name"), Some("Como Silk Mills"));
        assert!(record.has_property("location"));
        assert!(!record.has_property("country"));
        assert_eq!(record.property_count(), 2);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let record = sample();
        assert_eq!(record.display_name(), "Como Silk Mills");

        let anonymous = Record::new("MAT009", Label::Material);
        assert_eq!(anonymous.display_name(), "MAT009");
    }

    #[test]
    fn test_record_identity() {
        let a = sample();
        let mut b = sample();
        b.properties.insert("extra".to_string(), "x".into());
        assert_eq!(a, b); // same id
        assert_ne!(a, Record::new("SUP003", Label::Supplier));
    }
}
