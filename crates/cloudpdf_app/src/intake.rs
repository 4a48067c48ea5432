use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use cloudpdf_core::InputFile;

/// Reads the given paths into intake files, inferring the declared media
/// type from each extension. Size and type filtering stays a front-end
/// concern; the lifecycle only requires that the set is non-empty.
pub fn load_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<InputFile>> {
    paths.iter().map(|path| load_input(path)).collect()
}

fn load_input(path: &Path) -> anyhow::Result<InputFile> {
    let payload =
        fs::read(path).with_context(|| format!("reading input {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input")
        .to_string();
    Ok(InputFile {
        media_type: media_type_for(path).to_string(),
        name,
        bytes: Bytes::from(payload),
    })
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_follows_the_extension() {
        assert_eq!(media_type_for(Path::new("a.pdf")), "application/pdf");
        assert_eq!(media_type_for(Path::new("scan.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(
            media_type_for(Path::new("unknown.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            media_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn loads_payload_and_keeps_the_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.7 body").expect("write fixture");

        let inputs = load_inputs(&[path]).expect("load inputs");
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].name, "report.pdf");
        assert_eq!(inputs[0].media_type, "application/pdf");
        assert_eq!(inputs[0].bytes.as_ref(), b"%PDF-1.7 body");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.pdf");
        assert!(load_inputs(&[missing]).is_err());
    }
}
