//! Technical metadata JSON loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use aspace_model::TechMetadataTable;

use crate::error::{IngestError, Result};

/// Load a `{filename: {checksum, filesize, format}}` dump.
pub fn load_tech_metadata(path: &Path) -> Result<TechMetadataTable> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let table: TechMetadataTable =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            IngestError::MetadataParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
    debug!(path = %path.display(), file_count = table.len(), "loaded technical metadata");
    Ok(table)
}
