use crate::tool::ToolKind;

/// Windows-safe download filename: `{sanitized_stem}_cloudpdf{extension}`,
/// where the extension depends only on the tool. Falls back to
/// `cloudpdf_result{extension}` when no input name is available.
pub fn download_filename(tool: ToolKind, first_input_name: Option<&str>) -> String {
    let extension = tool.profile().download_extension;
    match first_input_name {
        Some(name) => format!("{}_cloudpdf{extension}", sanitize_stem(stem_of(name))),
        None => format!("cloudpdf_result{extension}"),
    }
}

/// The input name without its final extension. A name without a dot (or a
/// dotfile-style name) is its own stem.
fn stem_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

fn sanitize_stem(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "document".to_string();
    }
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut stem = compacted;
    if stem.len() > 80 {
        let mut end = 80;
        while end > 0 && !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem.truncate(end);
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_the_tool() {
        assert_eq!(
            download_filename(ToolKind::PdfToWord, Some("report.pdf")),
            "report_cloudpdf.docx"
        );
        assert_eq!(
            download_filename(ToolKind::PdfToJpg, Some("report.pdf")),
            "report_cloudpdf.jpg"
        );
        assert_eq!(
            download_filename(ToolKind::JpgToPdf, Some("scan.jpg")),
            "scan_cloudpdf.pdf"
        );
        assert_eq!(
            download_filename(ToolKind::Merge, Some("report.pdf")),
            "report_cloudpdf.pdf"
        );
    }

    #[test]
    fn extensionless_name_is_its_own_stem() {
        assert_eq!(
            download_filename(ToolKind::Compress, Some("minutes")),
            "minutes_cloudpdf.pdf"
        );
    }

    #[test]
    fn missing_input_falls_back_to_the_generic_name() {
        assert_eq!(
            download_filename(ToolKind::PdfToWord, None),
            "cloudpdf_result.docx"
        );
    }

    #[test]
    fn forbidden_characters_are_replaced() {
        assert_eq!(
            download_filename(ToolKind::Merge, Some("a/b:c*d.pdf")),
            "a_b_c_d_cloudpdf.pdf"
        );
    }

    #[test]
    fn reserved_device_names_are_suffixed() {
        assert_eq!(
            download_filename(ToolKind::Merge, Some("CON.pdf")),
            "CON__cloudpdf.pdf"
        );
    }

    #[test]
    fn long_multibyte_stem_is_cut_at_a_char_boundary() {
        // 30 three-byte characters: 90 bytes, and byte 80 falls inside a
        // character.
        let name = format!("{}.pdf", "あ".repeat(30));
        let filename = download_filename(ToolKind::Merge, Some(&name));

        let stem = filename.strip_suffix("_cloudpdf.pdf").expect("suffix");
        assert_eq!(stem.chars().count(), 26);
        assert!(stem.len() <= 80);
        assert!(stem.chars().all(|c| c == 'あ'));
    }

    #[test]
    fn repeated_naming_is_idempotent() {
        let first = download_filename(ToolKind::PdfToWord, Some("report.pdf"));
        let second = download_filename(ToolKind::PdfToWord, Some("report.pdf"));
        assert_eq!(first, second);
    }
}
