//! Per-row outcomes and the run report.

use std::fmt;

use thiserror::Error;

use aspace_client::ClientError;
use aspace_transform::TransformError;

/// Why a row produced no digital object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no component id")]
    MissingComponentId,

    #[error("no archival object with ref id {ref_id}")]
    NotFound { ref_id: String },

    #[error("{count} archival objects share ref id {ref_id}")]
    Ambiguous { ref_id: String, count: usize },

    #[error("archival object has no title")]
    MissingTitle,

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("no files correlate with this item")]
    NoFiles,

    #[error("digital object already exists")]
    AlreadyExists,

    #[error("repository error: {0}")]
    Repository(String),
}

/// A record that failed after its digital object was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadRecord {
    /// File name, or the archival object uri for a failed link.
    pub target: String,
    pub reason: String,
}

impl fmt::Display for BadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub digital_object_uri: String,
    pub components_created: usize,
    pub bad_records: Vec<BadRecord>,
}

/// A repository error that stops the run.
#[derive(Debug, Error)]
#[error("run-fatal repository error")]
pub struct FatalRowError {
    #[source]
    pub error: ClientError,
    /// What the row had already written when the error hit.
    pub partial: Option<CreatedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Created(CreatedItem),
    /// Dry run: everything resolved, nothing written.
    Planned { file_count: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub line: u64,
    pub component_id: String,
    pub outcome: RowOutcome,
}

impl fmt::Display for RowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} {}: ", self.line, self.component_id)?;
        match &self.outcome {
            RowOutcome::Created(item) => {
                write!(
                    f,
                    "created {} with {} component(s)",
                    item.digital_object_uri, item.components_created
                )?;
                for bad in &item.bad_records {
                    write!(f, "; FAILED {bad}")?;
                }
                Ok(())
            }
            RowOutcome::Planned { file_count } => {
                write!(f, "dry run, would create {file_count} component(s)")
            }
            RowOutcome::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub rows: Vec<RowReport>,
}

impl RunReport {
    pub fn created_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.outcome, RowOutcome::Created(_)))
            .count()
    }

    pub fn planned_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.outcome, RowOutcome::Planned { .. }))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&RowReport, &SkipReason)> {
        self.rows.iter().filter_map(|row| match &row.outcome {
            RowOutcome::Skipped(reason) => Some((row, reason)),
            _ => None,
        })
    }

    pub fn bad_records(&self) -> impl Iterator<Item = (&RowReport, &BadRecord)> {
        self.rows.iter().flat_map(|row| {
            let bad: &[BadRecord] = match &row.outcome {
                RowOutcome::Created(item) => &item.bad_records,
                _ => &[],
            };
            bad.iter().map(move |record| (row, record))
        })
    }

    pub fn components_created(&self) -> usize {
        self.rows
            .iter()
            .map(|row| match &row.outcome {
                RowOutcome::Created(item) => item.components_created,
                _ => 0,
            })
            .sum()
    }

    /// True when any row was skipped or any record failed.
    pub fn has_failures(&self) -> bool {
        self.skipped().next().is_some() || self.bad_records().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: u64, outcome: RowOutcome) -> RowReport {
        RowReport {
            line,
            component_id: format!("BC2001_074_{line}"),
            outcome,
        }
    }

    #[test]
    fn counts_and_failures() {
        let report = RunReport {
            rows: vec![
                row(
                    1,
                    RowOutcome::Created(CreatedItem {
                        digital_object_uri: "/repositories/2/digital_objects/1".to_string(),
                        components_created: 2,
                        bad_records: vec![BadRecord {
                            target: "BC2001_074_1_0003.tif".to_string(),
                            reason: "repository error".to_string(),
                        }],
                    }),
                ),
                row(2, RowOutcome::Skipped(SkipReason::MissingTitle)),
            ],
        };
        assert_eq!(report.created_count(), 1);
        assert_eq!(report.components_created(), 2);
        assert_eq!(report.skipped().count(), 1);
        assert_eq!(report.bad_records().count(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn clean_dry_run_has_no_failures() {
        let report = RunReport {
            rows: vec![row(1, RowOutcome::Planned { file_count: 3 })],
        };
        assert_eq!(report.planned_count(), 1);
        assert!(!report.has_failures());
    }

    #[test]
    fn row_report_line_text() {
        let report = row(
            4,
            RowOutcome::Skipped(SkipReason::Transform(TransformError::UnknownGenre(
                "Broadsides".to_string(),
            ))),
        );
        assert_eq!(
            report.to_string(),
            "line 4 BC2001_074_4: skipped: unknown genre 'Broadsides'"
        );
    }
}
