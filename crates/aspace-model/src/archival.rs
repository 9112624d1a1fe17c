//! Archival object records as returned by the repository.
//!
//! Only the fields the batch process reads are typed. Everything else is kept
//! in `extra` so an updated record posts back without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::date::DateRecord;

/// Instance type marking a link to a digital object.
pub const DIGITAL_OBJECT_INSTANCE: &str = "digital_object";

/// A `{"ref": uri}` pointer to another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    #[serde(rename = "ref")]
    pub uri: String,
}

impl RecordRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// One entry in an archival object's `instances` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub instance_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_object: Option<RecordRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Instance {
    /// Build an instance pointing at a digital object.
    pub fn digital_object(uri: impl Into<String>) -> Self {
        Self {
            instance_type: DIGITAL_OBJECT_INSTANCE.to_string(),
            digital_object: Some(RecordRef::new(uri)),
            extra: Map::new(),
        }
    }

    pub fn is_digital(&self) -> bool {
        self.instance_type.to_lowercase().contains("digital")
    }
}

/// An archival object record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchivalObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_string: Option<String>,
    #[serde(default)]
    pub dates: Vec<DateRecord>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArchivalObject {
    /// The authoritative date entry. Later entries are ignored.
    pub fn first_date(&self) -> Option<&DateRecord> {
        self.dates.first()
    }

    /// Instance types of the physical (non-digital) instances, in record order.
    pub fn physical_instance_types(&self) -> Vec<&str> {
        self.instances
            .iter()
            .filter(|instance| !instance.is_digital())
            .map(|instance| instance.instance_type.as_str())
            .collect()
    }

    /// Append a link to a newly created digital object.
    pub fn link_digital_object(&mut self, uri: impl Into<String>) {
        self.instances.push(Instance::digital_object(uri));
    }

    pub fn is_linked_to(&self, uri: &str) -> bool {
        self.instances.iter().any(|instance| {
            instance
                .digital_object
                .as_ref()
                .is_some_and(|link| link.uri == uri)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = json!({
            "uri": "/repositories/2/archival_objects/77",
            "title": "Letter",
            "lock_version": 4,
            "level": "item",
            "dates": [{"begin": "1900", "date_type": "single", "label": "creation"}],
            "instances": [{
                "instance_type": "mixed_materials",
                "sub_container": {"top_container": {"ref": "/repositories/2/top_containers/9"}}
            }]
        });
        let record: ArchivalObject = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.extra.get("lock_version"), Some(&json!(4)));
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn physical_instances_exclude_digital_links() {
        let mut record = ArchivalObject {
            instances: vec![Instance {
                instance_type: "Text".to_string(),
                digital_object: None,
                extra: Map::new(),
            }],
            ..ArchivalObject::default()
        };
        record.link_digital_object("/repositories/2/digital_objects/1");
        assert_eq!(record.physical_instance_types(), vec!["Text"]);
        assert!(record.is_linked_to("/repositories/2/digital_objects/1"));
        assert!(!record.is_linked_to("/repositories/2/digital_objects/2"));
    }
}
