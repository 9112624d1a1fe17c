//! Fixed lookup tables.

use crate::error::{Result, TransformError};

/// Physical instance type → digital object type.
const RESOURCE_TYPES: &[(&str, &str)] = &[
    ("audio", "sound_recording"),
    ("books", "text"),
    ("computer_disks", "software_multimedia"),
    ("graphic_materials", "still_image"),
    ("maps", "cartographic"),
    ("microform", "still_image"),
    ("mixed_materials", "mixed_materials"),
    ("moving_images", "moving_image"),
    ("realia", "three_dimensional_object"),
    ("text", "text"),
];

/// Genre term (lower-cased) → subject record.
const GENRE_SUBJECTS: &[(&str, &str)] = &[
    ("architectural drawings", "/subjects/1052"),
    ("audiotapes", "/subjects/2267"),
    ("broadsides", "/subjects/1841"),
    ("clippings", "/subjects/688"),
    ("correspondence", "/subjects/24"),
    ("diaries", "/subjects/1209"),
    ("drawings", "/subjects/1010"),
    ("manuscripts", "/subjects/467"),
    ("maps", "/subjects/612"),
    ("photographs", "/subjects/43"),
    ("postcards", "/subjects/1389"),
    ("posters", "/subjects/1290"),
    ("programs", "/subjects/1150"),
    ("scrapbooks", "/subjects/373"),
    ("sound recordings", "/subjects/2266"),
    ("video recordings", "/subjects/2271"),
];

/// MIME type and use statement for one file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    pub mime: &'static str,
    pub use_statement: &'static str,
}

const ARCHIVE_IMAGE: &str = "archive image";
const REFERENCE_IMAGE: &str = "reference image";

const FILE_TYPES: &[(&str, FileType)] = &[
    ("tif", FileType { mime: "image/tiff", use_statement: ARCHIVE_IMAGE }),
    ("tiff", FileType { mime: "image/tiff", use_statement: ARCHIVE_IMAGE }),
    ("jp2", FileType { mime: "image/jp2", use_statement: ARCHIVE_IMAGE }),
    ("jpg", FileType { mime: "image/jpeg", use_statement: REFERENCE_IMAGE }),
    ("jpeg", FileType { mime: "image/jpeg", use_statement: REFERENCE_IMAGE }),
    ("pdf", FileType { mime: "application/pdf", use_statement: "text-master" }),
    ("txt", FileType { mime: "text/plain", use_statement: "text-ocr-unedited" }),
    ("wav", FileType { mime: "audio/x-wav", use_statement: "audio-master" }),
    ("mp3", FileType { mime: "audio/mpeg", use_statement: "audio-service" }),
    ("mp4", FileType { mime: "video/mp4", use_statement: "video-service" }),
];

/// Tool-reported format description fragment → format code. First match wins.
const FORMAT_CODES: &[(&str, &str)] = &[
    ("tagged image file", "tiff"),
    ("tiff", "tiff"),
    ("jpeg 2000", "jp2"),
    ("jp2", "jp2"),
    ("jpeg", "jpeg"),
    ("jfif", "jpeg"),
    ("portable document", "pdf"),
    ("pdf", "pdf"),
    ("graphics interchange", "gif"),
    ("waveform audio", "wav"),
    ("wave", "wav"),
    ("mpeg-1 audio layer 3", "mp3"),
    ("mp3", "mp3"),
    ("mpeg-4", "mp4"),
    ("audio interchange", "aiff"),
    ("plain text", "txt"),
];

fn find<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

/// Digital object type for the first non-digital instance type.
pub fn resource_type(instance_types: &[&str]) -> Result<&'static str> {
    let first = instance_types
        .iter()
        .copied()
        .find(|instance_type| !instance_type.to_lowercase().contains("digital"))
        .ok_or(TransformError::NoPhysicalInstance)?;
    find(RESOURCE_TYPES, &first.trim().to_lowercase())
        .ok_or_else(|| TransformError::UnknownResourceType(first.to_string()))
}

/// Subject record for a genre term, case-insensitive.
pub fn genre_subject(term: &str) -> Result<&'static str> {
    find(GENRE_SUBJECTS, &term.trim().to_lowercase())
        .ok_or_else(|| TransformError::UnknownGenre(term.to_string()))
}

/// File type from the filename extension, case-insensitive.
pub fn file_type(filename: &str) -> Result<FileType> {
    filename
        .rsplit_once('.')
        .and_then(|(_, extension)| find(FILE_TYPES, &extension.to_lowercase()))
        .ok_or_else(|| TransformError::UnknownFileType(filename.to_string()))
}

/// Short format code for a tool-reported format. `None` is not an error.
pub fn format_code(format: &str) -> Option<&'static str> {
    let lowered = format.to_lowercase();
    FORMAT_CODES
        .iter()
        .find(|(needle, _)| lowered.contains(*needle))
        .map(|(_, code)| *code)
}

/// Digest algorithm implied by a hex checksum's length.
pub fn checksum_method(checksum: &str) -> Option<&'static str> {
    let checksum = checksum.trim();
    if !checksum.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    match checksum.len() {
        32 => Some("md5"),
        40 => Some("sha-1"),
        64 => Some("sha-256"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_skips_digital_instances() {
        assert_eq!(
            resource_type(&["digital_object", "Graphic_Materials"]),
            Ok("still_image")
        );
        assert_eq!(resource_type(&["text", "audio"]), Ok("text"));
    }

    #[test]
    fn resource_type_failures() {
        assert_eq!(
            resource_type(&["digital_object"]),
            Err(TransformError::NoPhysicalInstance)
        );
        assert_eq!(
            resource_type(&[]),
            Err(TransformError::NoPhysicalInstance)
        );
        assert_eq!(
            resource_type(&["accession"]),
            Err(TransformError::UnknownResourceType("accession".to_string()))
        );
    }

    #[test]
    fn format_code_matches_substrings() {
        assert_eq!(format_code("Tagged Image File Format"), Some("tiff"));
        assert_eq!(format_code("JPEG File Interchange Format"), Some("jpeg"));
        assert_eq!(format_code("JPEG 2000 JP2"), Some("jp2"));
        assert_eq!(format_code("Waveform Audio"), Some("wav"));
        assert_eq!(format_code("Unknown Binary"), None);
    }

    #[test]
    fn checksum_method_by_length() {
        assert_eq!(checksum_method("d41d8cd98f00b204e9800998ecf8427e"), Some("md5"));
        assert_eq!(
            checksum_method("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            Some("sha-1")
        );
        assert_eq!(checksum_method("xyz"), None);
        assert_eq!(checksum_method("abc"), None);
    }

    #[test]
    fn file_type_without_extension_fails() {
        assert_eq!(
            file_type("README"),
            Err(TransformError::UnknownFileType("README".to_string()))
        );
    }
}
