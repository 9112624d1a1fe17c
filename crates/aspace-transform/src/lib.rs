//! Pure transformations from archival object metadata to digital object records.
//!
//! - **correlate**: map raw technical-metadata filenames onto item identifiers
//! - **date**: resolve a possibly partial date entry into one normalized date
//! - **lookup**: fixed tables for resource type, genre, file type, and format
//! - **title**: ordered title extraction
//! - **assemble**: build the outbound digital object and component payloads
//!
//! Nothing here performs I/O.

pub mod assemble;
pub mod correlate;
pub mod date;
mod error;
pub mod lookup;
pub mod title;

pub use assemble::{
    DigitalObjectSettings, ItemDescription, PreparedFile, build_component, build_digital_object,
    dimensions_note, prepare_files,
};
pub use correlate::{FileListing, canonical_key, tolerant_variants};
pub use date::resolve_date;
pub use error::{Result, TransformError};
pub use lookup::{FileType, checksum_method, file_type, format_code, genre_subject, resource_type};
pub use title::extract_title;
