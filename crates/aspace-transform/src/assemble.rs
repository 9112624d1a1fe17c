//! Outbound record assembly.

use aspace_model::{
    DigitalObject, DigitalObjectComponent, DigitalObjectNote, FileVersion, LangMaterial, NoteType,
    RecordRef, ResolvedDate, TechMetadataRecord, TechMetadataTable,
};

use crate::error::{Result, TransformError};
use crate::lookup::{FileType, checksum_method, file_type, format_code};

/// Default format note attached to every digital object.
pub const REFORMATTED_DIGITAL: &str = "reformatted digital";

/// Run-wide settings for digital object payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalObjectSettings {
    /// Resolver URL plus handle prefix, e.g. `http://hdl.handle.net/2345.2`.
    pub identifier_base: String,
    pub format_note: String,
    pub publish: bool,
}

impl DigitalObjectSettings {
    pub fn new(resolver_base: &str, handle_prefix: &str) -> Self {
        Self {
            identifier_base: format!(
                "{}/{}",
                resolver_base.trim_end_matches('/'),
                handle_prefix.trim_matches('/')
            ),
            format_note: REFORMATTED_DIGITAL.to_string(),
            publish: true,
        }
    }

    pub fn digital_object_id(&self, component_id: &str) -> String {
        format!("{}/{component_id}", self.identifier_base)
    }
}

/// Everything derived for one item before any record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescription<'a> {
    pub component_id: &'a str,
    pub title: String,
    pub date: ResolvedDate,
    pub resource_type: &'static str,
    pub subject: &'static str,
    pub language: &'a str,
    pub use_restriction: &'a str,
    pub unit_count: &'a str,
}

/// A file with its type and technical metadata resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedFile {
    pub filename: String,
    pub file_type: FileType,
    pub tech: TechMetadataRecord,
}

impl PreparedFile {
    /// Filename up to the first `.`.
    pub fn stem(&self) -> &str {
        self.filename
            .split_once('.')
            .map_or(self.filename.as_str(), |(stem, _)| stem)
    }
}

/// Resolve type and technical metadata for every file of an item.
///
/// Fails on the first file that cannot be described, so no records are
/// created for a partially described item.
pub fn prepare_files(filenames: &[String], tech: &TechMetadataTable) -> Result<Vec<PreparedFile>> {
    filenames
        .iter()
        .map(|filename| -> Result<PreparedFile> {
            let file_type = file_type(filename)?;
            let record = tech
                .get(filename)
                .ok_or_else(|| TransformError::MissingTechMetadata(filename.clone()))?;
            Ok(PreparedFile {
                filename: filename.clone(),
                file_type,
                tech: record.clone(),
            })
        })
        .collect()
}

/// Extent phrase for the dimensions note. A bare unit ("folder") counts as one.
pub fn dimensions_note(unit_count: &str) -> Option<String> {
    let trimmed = unit_count.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.starts_with(|ch: char| ch.is_ascii_digit()) {
        Some(trimmed.to_string())
    } else {
        Some(format!("1 {trimmed}"))
    }
}

fn mime_list(files: &[PreparedFile]) -> String {
    let mut mimes: Vec<&str> = Vec::new();
    for file in files {
        if !mimes.contains(&file.file_type.mime) {
            mimes.push(file.file_type.mime);
        }
    }
    mimes.join(", ")
}

pub fn build_digital_object(
    item: &ItemDescription<'_>,
    files: &[PreparedFile],
    settings: &DigitalObjectSettings,
) -> DigitalObject {
    let mut notes = Vec::new();
    if !item.use_restriction.trim().is_empty() {
        notes.push(DigitalObjectNote::new(
            NoteType::Userestrict,
            item.use_restriction.trim(),
        ));
    }
    if let Some(extent) = dimensions_note(item.unit_count) {
        notes.push(DigitalObjectNote::new(NoteType::Dimensions, extent));
    }
    notes.push(DigitalObjectNote::new(
        NoteType::Note,
        settings.format_note.clone(),
    ));
    if !files.is_empty() {
        notes.push(DigitalObjectNote::new(NoteType::Note, mime_list(files)));
    }

    let language = item.language.trim();
    DigitalObject {
        jsonmodel_type: "digital_object".to_string(),
        title: item.title.clone(),
        digital_object_id: settings.digital_object_id(item.component_id),
        digital_object_type: item.resource_type.to_string(),
        publish: settings.publish,
        dates: vec![item.date.clone()],
        lang_materials: if language.is_empty() {
            Vec::new()
        } else {
            vec![LangMaterial::new(language)]
        },
        subjects: vec![RecordRef::new(item.subject)],
        notes,
    }
}

pub fn build_component(file: &PreparedFile, digital_object_uri: &str) -> DigitalObjectComponent {
    let stem = file.stem().to_string();
    DigitalObjectComponent {
        jsonmodel_type: "digital_object_component".to_string(),
        title: stem.clone(),
        display_string: stem.clone(),
        component_id: stem,
        digital_object: RecordRef::new(digital_object_uri),
        file_versions: vec![FileVersion {
            jsonmodel_type: "file_version".to_string(),
            file_uri: file.filename.clone(),
            use_statement: file.file_type.use_statement.to_string(),
            checksum: file.tech.checksum.clone(),
            checksum_method: checksum_method(&file.tech.checksum).map(str::to_string),
            file_size_bytes: file.tech.filesize,
            file_format_name: format_code(&file.tech.format).map(str::to_string),
        }],
    }
}
