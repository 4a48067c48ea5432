use std::fmt;
use std::str::FromStr;

/// The fixed operation the user selected for a job.
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

/// Grouping used by the tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Edit,
    Convert,
    Optimize,
    Ai,
}

impl ToolCategory {
    pub fn label(self) -> &'static str {
        match self {
            ToolCategory::Edit => "edit",
            ToolCategory::Convert => "convert",
            ToolCategory::Optimize => "optimize",
            ToolCategory::Ai => "ai",
        }
    }
}

impl ToolKind {
    /// Every tool, in catalog order.
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Merge,
        ToolKind::Split,
        ToolKind::Compress,
        ToolKind::PdfToWord,
        ToolKind::PdfToJpg,
        ToolKind::JpgToPdf,
        ToolKind::Watermark,
        ToolKind::Rotate,
        ToolKind::AiChat,
        ToolKind::AiSummarize,
    ];

    /// Stable string identifier, as used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Merge => "merge",
            ToolKind::Split => "split",
            ToolKind::Compress => "compress",
            ToolKind::PdfToWord => "pdf-to-word",
            ToolKind::PdfToJpg => "pdf-to-jpg",
            ToolKind::JpgToPdf => "jpg-to-pdf",
            ToolKind::Watermark => "watermark",
            ToolKind::Rotate => "rotate",
            ToolKind::AiChat => "ai-chat",
            ToolKind::AiSummarize => "ai-summarize",
        }
    }

    pub fn from_id(id: &str) -> Option<ToolKind> {
        ToolKind::ALL.into_iter().find(|tool| tool.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            ToolKind::Merge => "Merge PDF",
            ToolKind::Split => "Split PDF",
            ToolKind::Compress => "Compress PDF",
            ToolKind::PdfToWord => "PDF to Word",
            ToolKind::PdfToJpg => "PDF to JPG",
            ToolKind::JpgToPdf => "JPG to PDF",
            ToolKind::Watermark => "Watermark",
            ToolKind::Rotate => "Rotate PDF",
            ToolKind::AiChat => "Chat with PDF",
            ToolKind::AiSummarize => "AI Summarize",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ToolKind::Merge => "Combine multiple PDF files into one single document easily.",
            ToolKind::Split => "Extract pages from your PDF or save each page as a separate PDF.",
            ToolKind::Compress => "Reduce file size while optimizing for maximal PDF quality.",
            ToolKind::PdfToWord => "Convert your PDF documents to Word documents with high accuracy.",
            ToolKind::PdfToJpg => "Extract images from your PDF or save each page as a JPG image.",
            ToolKind::JpgToPdf => "Turn JPG images into a single PDF document in seconds.",
            ToolKind::Watermark => "Stamp an image or text over your PDF in seconds.",
            ToolKind::Rotate => "Rotate your PDF pages how you need them. Even multiple PDFs!",
            ToolKind::AiChat => "Ask questions, get summaries, and extract insights using AI.",
            ToolKind::AiSummarize => {
                "Instantly summarize long PDF documents into key bullet points."
            }
        }
    }

    pub fn category(self) -> ToolCategory {
        match self {
            ToolKind::Merge | ToolKind::Split | ToolKind::Watermark | ToolKind::Rotate => {
                ToolCategory::Edit
            }
            ToolKind::PdfToWord | ToolKind::PdfToJpg | ToolKind::JpgToPdf => ToolCategory::Convert,
            ToolKind::Compress => ToolCategory::Optimize,
            ToolKind::AiChat | ToolKind::AiSummarize => ToolCategory::Ai,
        }
    }

    /// Whether the tool involves the AI text collaborator surface.
    pub fn is_ai(self) -> bool {
        matches!(self, ToolKind::AiChat | ToolKind::AiSummarize)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a tool identifier does not name a known tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTool(pub String);

impl fmt::Display for UnknownTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tool {:?}", self.0)
    }
}

impl std::error::Error for UnknownTool {}

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::from_id(s).ok_or_else(|| UnknownTool(s.to_string()))
    }
}
