//! Batch digital object creation.
//!
//! Each row goes through these stages in order:
//! 1. **Locate**: resolve the ref id to exactly one archival object
//! 2. **Describe**: title, date, resource type, subject, correlated files
//! 3. **Create**: digital object, archival object link, one component per file
//!
//! Everything in stages 1 and 2 happens before the first write, so a row that
//! cannot be fully described leaves no trace in the repository. Rows are
//! processed strictly in file order.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use aspace_client::{ClientError, CreateOutcome, RepositoryClient};
use aspace_ingest::TabularRow;
use aspace_model::{ArchivalObject, TechMetadataTable};
use aspace_transform::{
    DigitalObjectSettings, FileListing, ItemDescription, PreparedFile, TransformError,
    build_component, build_digital_object, extract_title, genre_subject, prepare_files,
    resolve_date, resource_type,
};

use crate::types::{
    BadRecord, CreatedItem, FatalRowError, RowOutcome, RowReport, RunReport, SkipReason,
};
use crate::writers::RunWriters;

/// Shared, read-only inputs for a batch.
pub struct BatchContext<'a, C: RepositoryClient + ?Sized> {
    pub client: &'a C,
    pub listing: &'a FileListing,
    pub tech: &'a TechMetadataTable,
    pub settings: &'a DigitalObjectSettings,
    /// Resolve everything but write nothing.
    pub dry_run: bool,
}

enum RowError {
    Skip(SkipReason),
    Fatal(ClientError),
    /// Fatal after the digital object was created.
    FatalAfterCreate(CreatedItem, ClientError),
}

impl From<SkipReason> for RowError {
    fn from(reason: SkipReason) -> Self {
        Self::Skip(reason)
    }
}

impl From<TransformError> for RowError {
    fn from(error: TransformError) -> Self {
        Self::Skip(SkipReason::Transform(error))
    }
}

impl From<ClientError> for RowError {
    fn from(error: ClientError) -> Self {
        if error.is_run_fatal() {
            Self::Fatal(error)
        } else {
            Self::Skip(SkipReason::Repository(error.to_string()))
        }
    }
}

/// Everything resolved for a row before any write.
struct PlannedItem<'r> {
    archival_object_uri: String,
    record: ArchivalObject,
    description: ItemDescription<'r>,
    files: Vec<PreparedFile>,
}

/// Process one row.
///
/// Returns `Err` only for failures that should stop the whole run; every
/// row-level problem comes back as [`RowOutcome::Skipped`]. A fatal error
/// after the digital object exists carries the partial item with it.
pub fn process_row<C: RepositoryClient + ?Sized>(
    ctx: &BatchContext<'_, C>,
    row: &TabularRow,
) -> std::result::Result<RowOutcome, FatalRowError> {
    let result = plan_item(ctx, row).and_then(|planned| {
        if ctx.dry_run {
            Ok(RowOutcome::Planned {
                file_count: planned.files.len(),
            })
        } else {
            create_item(ctx, planned).map(RowOutcome::Created)
        }
    });
    match result {
        Ok(outcome) => Ok(outcome),
        Err(RowError::Skip(reason)) => Ok(RowOutcome::Skipped(reason)),
        Err(RowError::Fatal(error)) => Err(FatalRowError {
            error,
            partial: None,
        }),
        Err(RowError::FatalAfterCreate(partial, error)) => Err(FatalRowError {
            error,
            partial: Some(partial),
        }),
    }
}

fn plan_item<'r, C: RepositoryClient + ?Sized>(
    ctx: &BatchContext<'_, C>,
    row: &'r TabularRow,
) -> std::result::Result<PlannedItem<'r>, RowError> {
    let component_id = row.component_id.as_str();
    if component_id.is_empty() {
        return Err(SkipReason::MissingComponentId.into());
    }

    let uris = ctx.client.find_by_ref_id(&row.ref_id)?;
    let archival_object_uri = match uris.as_slice() {
        [uri] => uri.clone(),
        [] => {
            return Err(SkipReason::NotFound {
                ref_id: row.ref_id.clone(),
            }
            .into());
        }
        many => {
            return Err(SkipReason::Ambiguous {
                ref_id: row.ref_id.clone(),
                count: many.len(),
            }
            .into());
        }
    };
    debug!(uri = %archival_object_uri, "located archival object");

    let record = ctx.client.fetch_archival_object(&archival_object_uri)?;
    let title = extract_title(&record).ok_or(SkipReason::MissingTitle)?;
    let date = resolve_date(record.first_date(), &row.collection_dates)?;
    let resource_type = resource_type(&record.physical_instance_types())?;
    let subject = genre_subject(&row.genre)?;
    let filenames = ctx
        .listing
        .files_for(component_id)
        .ok_or(SkipReason::NoFiles)?;
    let files = prepare_files(&filenames, ctx.tech)?;
    debug!(
        title = %title,
        date = %date.expression,
        resource_type,
        subject,
        files = files.len(),
        "described item"
    );

    Ok(PlannedItem {
        archival_object_uri,
        record,
        description: ItemDescription {
            component_id,
            title,
            date,
            resource_type,
            subject,
            language: &row.language,
            use_restriction: &row.use_restriction,
            unit_count: &row.unit_count,
        },
        files,
    })
}

fn create_item<C: RepositoryClient + ?Sized>(
    ctx: &BatchContext<'_, C>,
    planned: PlannedItem<'_>,
) -> std::result::Result<CreatedItem, RowError> {
    let PlannedItem {
        archival_object_uri,
        mut record,
        description,
        files,
    } = planned;

    let object = build_digital_object(&description, &files, ctx.settings);
    let digital_object_uri = match ctx.client.create_digital_object(&object)? {
        CreateOutcome::Created { uri } => uri,
        CreateOutcome::AlreadyExists => return Err(SkipReason::AlreadyExists.into()),
    };
    info!(uri = %digital_object_uri, "created digital object");

    // The digital object exists from here on; later failures are recorded, not skipped.
    let mut item = CreatedItem {
        digital_object_uri,
        components_created: 0,
        bad_records: Vec::new(),
    };
    record.link_digital_object(&item.digital_object_uri);
    if let Err(error) = ctx
        .client
        .update_archival_object(&archival_object_uri, &record)
    {
        warn!(uri = %archival_object_uri, %error, "failed to link digital object");
        item.bad_records.push(BadRecord {
            target: archival_object_uri.clone(),
            reason: error.to_string(),
        });
        if error.is_run_fatal() {
            return Err(RowError::FatalAfterCreate(item, error));
        }
    }

    for file in &files {
        let component = build_component(file, &item.digital_object_uri);
        let reason = match ctx.client.create_component(&component) {
            Ok(CreateOutcome::Created { uri }) => {
                debug!(%uri, file = %file.filename, "created component");
                item.components_created += 1;
                continue;
            }
            Ok(CreateOutcome::AlreadyExists) => "component already exists".to_string(),
            Err(error) if error.is_run_fatal() => {
                warn!(file = %file.filename, %error, "component not created");
                item.bad_records.push(BadRecord {
                    target: file.filename.clone(),
                    reason: error.to_string(),
                });
                return Err(RowError::FatalAfterCreate(item, error));
            }
            Err(error) => error.to_string(),
        };
        warn!(file = %file.filename, %reason, "component not created");
        item.bad_records.push(BadRecord {
            target: file.filename.clone(),
            reason,
        });
    }

    Ok(item)
}

/// Process every row in order, writing the row report and new identifiers.
///
/// Stops at the first run-fatal repository error; rows already processed
/// stay in the output files, as does a partly created item on the failing row.
pub fn run_batch<C, W>(
    ctx: &BatchContext<'_, C>,
    rows: &[TabularRow],
    writers: &mut RunWriters<W>,
) -> Result<RunReport>
where
    C: RepositoryClient + ?Sized,
    W: Write,
{
    let mut report = RunReport::default();
    for (index, row) in rows.iter().enumerate() {
        let span = info_span!("row", index, component_id = %row.component_id);
        let _guard = span.enter();

        let outcome = match process_row(ctx, row) {
            Ok(outcome) => outcome,
            Err(mut fatal) => {
                if let Some(partial) = fatal.partial.take() {
                    record_outcome(writers, &mut report, row, RowOutcome::Created(partial))?;
                }
                return Err(fatal).with_context(|| format!("run aborted at line {}", row.line));
            }
        };
        record_outcome(writers, &mut report, row, outcome)?;
    }
    Ok(report)
}

fn record_outcome<W: Write>(
    writers: &mut RunWriters<W>,
    report: &mut RunReport,
    row: &TabularRow,
    outcome: RowOutcome,
) -> Result<()> {
    match &outcome {
        RowOutcome::Created(item) => {
            writers
                .record_identifier(&row.component_id)
                .context("write new identifier")?;
            info!(
                components = item.components_created,
                failed = item.bad_records.len(),
                "item created"
            );
        }
        RowOutcome::Planned { file_count } => {
            info!(files = file_count, "dry run: item resolved");
        }
        RowOutcome::Skipped(reason) => warn!(%reason, "row skipped"),
    }

    let row_report = RowReport {
        line: row.line,
        component_id: row.component_id.clone(),
        outcome,
    };
    writers
        .log_line(&row_report.to_string())
        .context("write row report")?;
    report.rows.push(row_report);
    Ok(())
}
