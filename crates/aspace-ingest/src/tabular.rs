//! Tab-delimited archival object export.
//!
//! Column order is fixed:
//!
//! | Index | Content |
//! |---|---|
//! | 0 | component display id (`BC2001_074_64862`) |
//! | 1 | prefixed reference id (`aspace_<refid>`) |
//! | 2 | unit-count phrase |
//! | 3 | usage restriction |
//! | 4 | collection dates, `start/end` |
//! | 5 | language code |
//! | 6 | genre term |

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use aspace_model::CollectionDateRange;

use crate::error::{IngestError, Result};

/// Length of the `aspace_` prefix on column 1.
pub const REF_ID_PREFIX_LEN: usize = 7;

/// One line of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub component_id: String,
    pub ref_id: String,
    pub unit_count: String,
    pub use_restriction: String,
    pub collection_dates: CollectionDateRange,
    pub language: String,
    pub genre: String,
}

fn cell(record: &StringRecord, index: usize) -> String {
    record.get(index).map(str::trim).unwrap_or("").to_string()
}

fn strip_ref_prefix(raw: &str) -> String {
    raw.chars().skip(REF_ID_PREFIX_LEN).collect()
}

/// Map a raw record onto the fixed column layout.
///
/// Short rows are padded with empty values; deciding whether a row is usable
/// is left to the caller.
pub fn parse_row(record: &StringRecord, line: u64) -> TabularRow {
    TabularRow {
        line,
        component_id: cell(record, 0),
        ref_id: strip_ref_prefix(&cell(record, 1)),
        unit_count: cell(record, 2),
        use_restriction: cell(record, 3),
        collection_dates: CollectionDateRange::parse(&cell(record, 4)),
        language: cell(record, 5),
        genre: cell(record, 6),
    }
}

/// Read every non-blank line of a tab-delimited export.
pub fn read_tabular_rows(path: &Path) -> Result<Vec<TabularRow>> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let line = reader.position().line();
        let more = reader
            .read_record(&mut record)
            .map_err(|e| IngestError::TabularParse {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })?;
        if !more {
            break;
        }
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(line, csv::Position::line);
        rows.push(parse_row(&record, line));
    }
    debug!(path = %path.display(), row_count = rows.len(), "read tabular rows");
    Ok(rows)
}
