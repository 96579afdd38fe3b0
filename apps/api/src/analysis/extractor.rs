//! PDF text extraction for uploaded resumes.

use bytes::Bytes;

use crate::analysis::AnalysisError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// An uploaded resume as received from the form.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    pub data: Bytes,
}

impl ResumeDocument {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// Turns an uploaded document into plain text.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &ResumeDocument) -> Result<String, AnalysisError>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &ResumeDocument) -> Result<String, AnalysisError> {
        if !looks_like_pdf(&document.data) {
            return Err(AnalysisError::Extraction {
                document: document.file_name.clone(),
                reason: "file is not a PDF document".to_string(),
            });
        }

        pdf_extract::extract_text_from_mem(&document.data).map_err(|e| {
            AnalysisError::Extraction {
                document: document.file_name.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// True when the payload starts with the `%PDF` header, ignoring leading whitespace.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..].starts_with(PDF_MAGIC)
}

/// True when the upload name carries a `.pdf` extension (case-insensitive).
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf")
}
