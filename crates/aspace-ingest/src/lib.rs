//! Input loading for batch digital object creation.
//!
//! - **Tabular rows**: the tab-delimited archival object export, one
//!   [`TabularRow`] per line in fixed column order
//! - **Technical metadata**: the JSON dump of per-file checksum, size, and
//!   format, keyed by raw filename
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use aspace_ingest::{load_tech_metadata, read_tabular_rows};
//!
//! let rows = read_tabular_rows(Path::new("ead_export.tsv"))?;
//! let tech = load_tech_metadata(Path::new("fits_dump.json"))?;
//! ```

mod error;
mod tabular;
mod tech;

pub use error::{IngestError, Result};
pub use tabular::{REF_ID_PREFIX_LEN, TabularRow, parse_row, read_tabular_rows};
pub use tech::load_tech_metadata;
