//! Per-run output files.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const LOG_DIR: &str = "LOGS";

/// Row report and new-identifier sinks for one run.
///
/// Both sinks are buffered; dropping the writers flushes them, and
/// [`RunWriters::finish`] does so while surfacing any error.
pub struct RunWriters<W: Write = BufWriter<File>> {
    log: W,
    ids: W,
    paths: Option<RunPaths>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub log: PathBuf,
    pub ids: PathBuf,
}

impl RunPaths {
    pub fn new(output_dir: &Path, stamp: &str) -> Self {
        let dir = output_dir.join(LOG_DIR);
        Self {
            log: dir.join(format!("aspace_batch_dao-{stamp}.log")),
            ids: dir.join(format!("new_ids-{stamp}.txt")),
        }
    }
}

impl RunWriters {
    /// Create `LOGS/` under `output_dir` and open both files.
    pub fn create(output_dir: &Path, stamp: &str) -> io::Result<Self> {
        let paths = RunPaths::new(output_dir, stamp);
        fs::create_dir_all(output_dir.join(LOG_DIR))?;
        let log = BufWriter::new(File::create(&paths.log)?);
        let ids = BufWriter::new(File::create(&paths.ids)?);
        Ok(Self {
            log,
            ids,
            paths: Some(paths),
        })
    }
}

impl<W: Write> RunWriters<W> {
    /// Wrap arbitrary sinks, e.g. in-memory buffers.
    pub fn from_writers(log: W, ids: W) -> Self {
        Self {
            log,
            ids,
            paths: None,
        }
    }

    pub fn paths(&self) -> Option<&RunPaths> {
        self.paths.as_ref()
    }

    pub fn log_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.log, "{line}")
    }

    pub fn record_identifier(&mut self, component_id: &str) -> io::Result<()> {
        writeln!(self.ids, "{component_id}")
    }

    /// Flush both sinks and hand them back.
    pub fn finish(mut self) -> io::Result<(W, W)> {
        self.log.flush()?;
        self.ids.flush()?;
        Ok((self.log, self.ids))
    }
}
