use cloudpdf_engine::{ensure_output_dir, AtomicFileWriter};

#[test]
fn writes_artifact_bytes_and_replaces_on_rewrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let writer = AtomicFileWriter::new(dir.path().to_path_buf());

    let path = writer
        .write("report_cloudpdf.docx", b"%PDF-1.7 body")
        .expect("first write");
    assert_eq!(std::fs::read(&path).expect("read back"), b"%PDF-1.7 body");

    // Repeated downloads are idempotent: same name, same bytes.
    let again = writer
        .write("report_cloudpdf.docx", b"%PDF-1.7 body")
        .expect("second write");
    assert_eq!(again, path);
    assert_eq!(std::fs::read(&path).expect("read back"), b"%PDF-1.7 body");
}

#[test]
fn creates_missing_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("artifacts").join("today");

    ensure_output_dir(&nested).expect("create nested dir");
    assert!(nested.is_dir());
}

#[test]
fn rejects_a_file_standing_in_for_the_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("not_a_dir");
    std::fs::write(&file_path, b"occupied").expect("write blocker");

    ensure_output_dir(&file_path).expect_err("path is not a directory");
}
