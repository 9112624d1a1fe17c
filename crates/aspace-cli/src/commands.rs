use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{info, info_span, warn};

use aspace_cli::config::{load_optional, resolve_dao_settings, resolve_handle_settings};
use aspace_cli::handles::create_handle_batch;
use aspace_cli::pipeline::{BatchContext, run_batch};
use aspace_cli::types::RunReport;
use aspace_cli::writers::{RunPaths, RunWriters};
use aspace_client::HttpRepositoryClient;
use aspace_ingest::{load_tech_metadata, read_tabular_rows};
use aspace_transform::{DigitalObjectSettings, FileListing};

use crate::cli::{DaoArgs, HandleArgs};

#[derive(Debug)]
pub struct DaoResult {
    pub report: RunReport,
    pub paths: Option<RunPaths>,
    pub dry_run: bool,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

#[derive(Debug)]
pub struct HandleResult {
    pub path: PathBuf,
    pub written: usize,
    pub rows: usize,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

fn run_stamp(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

pub fn run_dao(args: &DaoArgs, config_path: Option<&Path>) -> Result<DaoResult> {
    let started = Local::now();
    let span = info_span!("dao", dry_run = args.dry_run);
    let _guard = span.enter();

    let file_config = load_optional(config_path)?;
    let settings = resolve_dao_settings(args.overrides(), &file_config)?;

    let rows = read_tabular_rows(&args.tab_file).context("read tab export")?;
    let tech = load_tech_metadata(&args.tech_metadata).context("load technical metadata")?;
    let listing = FileListing::build(tech.filenames());
    info!(
        rows = rows.len(),
        files = tech.len(),
        keys = listing.len(),
        "inputs loaded"
    );
    if listing.is_empty() {
        warn!("technical metadata lists no files, every row will be skipped");
    }

    let client =
        HttpRepositoryClient::login(&settings.client).context("log in to ArchivesSpace")?;
    let object_settings =
        DigitalObjectSettings::new(&settings.resolver_base, &settings.handle_prefix);
    let ctx = BatchContext {
        client: &client,
        listing: &listing,
        tech: &tech,
        settings: &object_settings,
        dry_run: args.dry_run,
    };

    let mut writers = RunWriters::create(&settings.output_dir, &run_stamp(&started))
        .with_context(|| format!("create run files in {}", settings.output_dir.display()))?;
    let paths = writers.paths().cloned();
    let report = run_batch(&ctx, &rows, &mut writers)?;
    writers.finish().context("flush run files")?;

    Ok(DaoResult {
        report,
        paths,
        dry_run: args.dry_run,
        started,
        finished: Local::now(),
    })
}

pub fn run_handles(args: &HandleArgs, config_path: Option<&Path>) -> Result<HandleResult> {
    let started = Local::now();
    let file_config = load_optional(config_path)?;
    let settings = resolve_handle_settings(args.overrides(), &file_config)?;

    let rows = read_tabular_rows(&args.tab_file).context("read tab export")?;
    info!(rows = rows.len(), "creating handle batches");
    let (path, written) = create_handle_batch(&settings, &rows, &run_stamp(&started))
        .with_context(|| format!("write handle batch in {}", settings.output_dir.display()))?;

    Ok(HandleResult {
        path,
        written,
        rows: rows.len(),
        started,
        finished: Local::now(),
    })
}
