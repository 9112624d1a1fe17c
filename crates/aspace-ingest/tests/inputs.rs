//! Integration tests for input loading.

use std::io::Write;

use aspace_ingest::{IngestError, load_tech_metadata, read_tabular_rows};
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{contents}").expect("write temp file");
    file
}

#[test]
fn reads_rows_and_skips_blank_lines() {
    let file = temp_file(
        "BC2001_074_64862\taspace_ref1\t12 pages\tOpen\t1875/1879\teng\tScrapbooks\n\
         \n\
         BC2001_074_64863\taspace_ref2\tfolder\t\"Restricted\"\t1880/1890\tfre\tPhotographs\n",
    );
    let rows = read_tabular_rows(file.path()).expect("read rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].ref_id, "ref1");
    assert_eq!(rows[1].component_id, "BC2001_074_64863");
    assert_eq!(rows[1].use_restriction, "\"Restricted\"");
}

#[test]
fn missing_tabular_file_is_reported() {
    let err = read_tabular_rows(std::path::Path::new("/nonexistent/rows.tsv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn loads_tech_metadata_dump() {
    let file = temp_file(
        r#"{"BC2001_074_64862_0000.tif": {"checksum": "d41d8cd98f00b204e9800998ecf8427e", "filesize": 10, "format": "TIFF"}}"#,
    );
    let table = load_tech_metadata(file.path()).expect("load tech metadata");
    let record = table.get("BC2001_074_64862_0000.tif").expect("record");
    assert_eq!(record.filesize, 10);
    assert_eq!(record.format, "TIFF");
}

#[test]
fn malformed_tech_metadata_is_a_parse_error() {
    let file = temp_file("[1, 2, 3]");
    let err = load_tech_metadata(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::MetadataParse { .. }));
}
