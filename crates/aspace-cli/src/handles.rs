//! Handle server batch text.
//!
//! One `CREATE` block per item, in the batch format the handle server's
//! admin tool accepts:
//!
//! ```text
//! CREATE 2345.2/BC2001_074_64862
//! 100 HS_ADMIN 86400 1110 ADMIN 300:111111111111:2345.2/BC2001_074_64862
//! 300 HS_SECKEY 86400 1100 UTF8 <password>
//! 201 URL 86400 1110 UTF8 https://library.bc.edu/iiif/view/BC2001_074_64862
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use aspace_ingest::TabularRow;

use crate::config::HandleSettings;

pub const HANDLE_DIR: &str = "HANDLES";

pub fn handle_batch_path(output_dir: &Path, stamp: &str) -> PathBuf {
    output_dir
        .join(HANDLE_DIR)
        .join(format!("handle_batch_text-{stamp}.txt"))
}

pub fn iiif_view_url(iiif_host: &str, component_id: &str) -> String {
    format!("https://{iiif_host}/iiif/view/{component_id}")
}

/// Write one `CREATE` block followed by a blank line.
pub fn write_handle_record<W: Write>(
    out: &mut W,
    settings: &HandleSettings,
    component_id: &str,
) -> io::Result<()> {
    let handle = format!("{}/{component_id}", settings.prefix);
    writeln!(out, "CREATE {handle}")?;
    writeln!(out, "100 HS_ADMIN 86400 1110 ADMIN 300:111111111111:{handle}")?;
    writeln!(out, "300 HS_SECKEY 86400 1100 UTF8 {}", settings.password)?;
    writeln!(
        out,
        "201 URL 86400 1110 UTF8 {}",
        iiif_view_url(&settings.iiif_host, component_id)
    )?;
    writeln!(out)
}

/// Write a block for every row with a component id; returns the block count.
pub fn write_handle_batch<W: Write>(
    out: &mut W,
    settings: &HandleSettings,
    rows: &[TabularRow],
) -> io::Result<usize> {
    let mut written = 0;
    for row in rows {
        if row.component_id.is_empty() {
            warn!(line = row.line, "row has no component id, no handle written");
            continue;
        }
        write_handle_record(out, settings, &row.component_id)?;
        written += 1;
    }
    Ok(written)
}

/// Create `HANDLES/` under the output directory and write the batch file.
pub fn create_handle_batch(
    settings: &HandleSettings,
    rows: &[TabularRow],
    stamp: &str,
) -> io::Result<(PathBuf, usize)> {
    let path = handle_batch_path(&settings.output_dir, stamp);
    fs::create_dir_all(settings.output_dir.join(HANDLE_DIR))?;
    let mut out = BufWriter::new(File::create(&path)?);
    let written = write_handle_batch(&mut out, settings, rows)?;
    out.flush()?;
    debug!(path = %path.display(), written, "wrote handle batch");
    Ok((path, written))
}
