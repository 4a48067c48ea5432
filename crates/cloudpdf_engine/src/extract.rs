/// Stand-in for real document text extraction.
///
/// The contract is only that the returned text is non-empty and descriptive
/// of the named input; a document-processing service replaces this later.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, file_name: &str) -> String;
}

/// Placeholder that sketches a description from the file name alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameSketchExtractor;

impl TextExtractor for NameSketchExtractor {
    fn extract(&self, file_name: &str) -> String {
        format!(
            "Simulated extraction of the text content of {file_name}. In a production \
             deployment a document-processing service extracts the real page text from this \
             document before it reaches the collaborator."
        )
    }
}
