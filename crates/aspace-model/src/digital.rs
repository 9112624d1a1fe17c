//! Outbound digital object and digital object component payloads.

use serde::{Deserialize, Serialize};

use crate::archival::RecordRef;
use crate::date::ResolvedDate;

/// Kind of a digital object note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Conditions governing use.
    Userestrict,
    Dimensions,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalObjectNote {
    pub jsonmodel_type: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub content: Vec<String>,
}

impl DigitalObjectNote {
    pub fn new(note_type: NoteType, content: impl Into<String>) -> Self {
        Self {
            jsonmodel_type: "note_digital_object".to_string(),
            note_type,
            content: vec![content.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageAndScript {
    pub jsonmodel_type: String,
    pub language: String,
}

/// Language of the described materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangMaterial {
    pub jsonmodel_type: String,
    pub language_and_script: LanguageAndScript,
}

impl LangMaterial {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            jsonmodel_type: "lang_material".to_string(),
            language_and_script: LanguageAndScript {
                jsonmodel_type: "language_and_script".to_string(),
                language: language.into(),
            },
        }
    }
}

/// A digital object created for one archival item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalObject {
    pub jsonmodel_type: String,
    pub title: String,
    pub digital_object_id: String,
    pub digital_object_type: String,
    pub publish: bool,
    pub dates: Vec<ResolvedDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lang_materials: Vec<LangMaterial>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<RecordRef>,
    #[serde(default)]
    pub notes: Vec<DigitalObjectNote>,
}

/// One file of a digital object, described by its technical metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    pub jsonmodel_type: String,
    pub file_uri: String,
    pub use_statement: String,
    pub checksum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_method: Option<String>,
    pub file_size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format_name: Option<String>,
}

/// A component hanging off a digital object, one per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalObjectComponent {
    pub jsonmodel_type: String,
    pub title: String,
    pub display_string: String,
    pub component_id: String,
    pub digital_object: RecordRef,
    pub file_versions: Vec<FileVersion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_type_key() {
        let note = DigitalObjectNote::new(NoteType::Userestrict, "Open for research.");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["type"], "userestrict");
        assert_eq!(json["content"][0], "Open for research.");
    }

    #[test]
    fn lang_material_nests_language() {
        let json = serde_json::to_value(LangMaterial::new("eng")).unwrap();
        assert_eq!(json["language_and_script"]["language"], "eng");
    }
}
