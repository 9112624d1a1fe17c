use std::fs;
use std::path::PathBuf;

use aspace_cli::config::HandleSettings;
use aspace_cli::handles::{create_handle_batch, write_handle_batch, write_handle_record};
use aspace_ingest::read_tabular_rows;

fn settings(output_dir: PathBuf) -> HandleSettings {
    HandleSettings {
        prefix: "2345.2".to_string(),
        password: "hunter2".to_string(),
        iiif_host: "library.bc.edu".to_string(),
        output_dir,
    }
}

#[test]
fn single_record_layout() {
    let mut out = Vec::new();
    write_handle_record(&mut out, &settings(PathBuf::from(".")), "BC1986_020E_3940").unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "CREATE 2345.2/BC1986_020E_3940\n\
         100 HS_ADMIN 86400 1110 ADMIN 300:111111111111:2345.2/BC1986_020E_3940\n\
         300 HS_SECKEY 86400 1100 UTF8 hunter2\n\
         201 URL 86400 1110 UTF8 https://library.bc.edu/iiif/view/BC1986_020E_3940\n\
         \n"
    );
}

#[test]
fn batch_from_tab_export() {
    let dir = tempfile::tempdir().unwrap();
    let tab = dir.path().join("export.tsv");
    fs::write(
        &tab,
        "BC2001_074_64862\taspace_abc123\t3 leaves\t\t1900/1950\teng\tCorrespondence\n\
         \taspace_def456\t\t\t\t\t\n\
         BC2001_074_64863\taspace_ghi789\t1 folder\t\t1900/1950\teng\tPhotographs\n",
    )
    .unwrap();
    let rows = read_tabular_rows(&tab).unwrap();

    let mut out = Vec::new();
    let written = write_handle_batch(&mut out, &settings(dir.path().to_path_buf()), &rows).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    CREATE 2345.2/BC2001_074_64862
    100 HS_ADMIN 86400 1110 ADMIN 300:111111111111:2345.2/BC2001_074_64862
    300 HS_SECKEY 86400 1100 UTF8 hunter2
    201 URL 86400 1110 UTF8 https://library.bc.edu/iiif/view/BC2001_074_64862

    CREATE 2345.2/BC2001_074_64863
    100 HS_ADMIN 86400 1110 ADMIN 300:111111111111:2345.2/BC2001_074_64863
    300 HS_SECKEY 86400 1100 UTF8 hunter2
    201 URL 86400 1110 UTF8 https://library.bc.edu/iiif/view/BC2001_074_64863
    ");
}

#[test]
fn batch_file_lands_in_handles_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tab = dir.path().join("export.tsv");
    fs::write(&tab, "BC2001_074_64862\taspace_abc123\n").unwrap();
    let rows = read_tabular_rows(&tab).unwrap();

    let (path, written) =
        create_handle_batch(&settings(dir.path().to_path_buf()), &rows, "20240102-030405").unwrap();

    assert_eq!(written, 1);
    assert_eq!(
        path,
        dir.path()
            .join("HANDLES")
            .join("handle_batch_text-20240102-030405.txt")
    );
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("CREATE 2345.2/BC2001_074_64862\n"));
    assert!(text.ends_with("/iiif/view/BC2001_074_64862\n\n"));
}
