/// The fixed operation driving one simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Merge,
    Split,
    Compress,
    PdfToWord,
    PdfToJpg,
    JpgToPdf,
    Watermark,
    Rotate,
    AiChat,
    AiSummarize,
}

/// How a tool labels its fabricated result and what extra step runs at
/// completion. The bytes themselves are never transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolProfile {
    /// Media type stamped on the result; `None` keeps the first input's own.
    pub result_media_type: Option<&'static str>,
    /// Extension used for the download filename.
    pub download_extension: &'static str,
    pub post: PostProcess,
}

/// Extra fabrication step performed when the completion delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    None,
    /// Fabricate size statistics over all inputs.
    CompressionReport,
    /// Ask the collaborator for a narrative summary of the extracted text.
    Summarize,
    /// Open the transcript with a fixed assistant greeting.
    ChatGreeting,
}

const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl ToolKind {
    /// The single place the tool-to-output mapping lives. Every variant is
    /// matched so adding a tool forces a decision here.
    pub fn profile(self) -> ToolProfile {
        match self {
            ToolKind::Merge => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::None,
            },
            ToolKind::Split => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::None,
            },
            ToolKind::Compress => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::CompressionReport,
            },
            ToolKind::PdfToWord => ToolProfile {
                result_media_type: Some(DOCX_MEDIA_TYPE),
                download_extension: ".docx",
                post: PostProcess::None,
            },
            ToolKind::PdfToJpg => ToolProfile {
                result_media_type: Some("image/jpeg"),
                download_extension: ".jpg",
                post: PostProcess::None,
            },
            ToolKind::JpgToPdf => ToolProfile {
                result_media_type: Some("application/pdf"),
                download_extension: ".pdf",
                post: PostProcess::None,
            },
            ToolKind::Watermark => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::None,
            },
            ToolKind::Rotate => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::None,
            },
            ToolKind::AiChat => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::ChatGreeting,
            },
            ToolKind::AiSummarize => ToolProfile {
                result_media_type: None,
                download_extension: ".pdf",
                post: PostProcess::Summarize,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converters_relabel_the_result() {
        assert_eq!(
            ToolKind::PdfToWord.profile().result_media_type,
            Some(DOCX_MEDIA_TYPE)
        );
        assert_eq!(
            ToolKind::PdfToJpg.profile().result_media_type,
            Some("image/jpeg")
        );
        assert_eq!(
            ToolKind::JpgToPdf.profile().result_media_type,
            Some("application/pdf")
        );
    }

    #[test]
    fn non_converters_keep_the_input_media_type() {
        for tool in [
            ToolKind::Merge,
            ToolKind::Split,
            ToolKind::Compress,
            ToolKind::Watermark,
            ToolKind::Rotate,
            ToolKind::AiChat,
            ToolKind::AiSummarize,
        ] {
            assert_eq!(tool.profile().result_media_type, None, "{tool:?}");
        }
    }

    #[test]
    fn download_extension_is_a_pure_function_of_the_tool() {
        assert_eq!(ToolKind::PdfToWord.profile().download_extension, ".docx");
        assert_eq!(ToolKind::PdfToJpg.profile().download_extension, ".jpg");
        assert_eq!(ToolKind::JpgToPdf.profile().download_extension, ".pdf");
        assert_eq!(ToolKind::Merge.profile().download_extension, ".pdf");
        assert_eq!(ToolKind::AiSummarize.profile().download_extension, ".pdf");
    }
}
