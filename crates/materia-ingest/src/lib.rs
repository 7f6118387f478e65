use thiserror::Error;
use tracing::debug;

// Re-export domain types for convenience
pub use materia_core::{FileKind, SourceFile};
pub use materia_docx::DocxError;
pub use materia_pdf::PdfError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("image files cannot be converted to text (.{extension})")]
    UnsupportedMediaKind { extension: String },
    #[error("old .doc files are not supported; convert the file to .docx")]
    UnsupportedLegacyFormat,
    #[error("unsupported file type: {extension:?}")]
    UnknownFormat { extension: String },
    #[error("could not extract PDF text: {0}")]
    Pdf(#[from] PdfError),
    #[error("could not extract DOCX text: {0}")]
    Docx(#[from] DocxError),
}

/// Extract the plain-text content of an uploaded course material file.
///
/// Dispatches on the file-name extension (case-insensitive):
/// - `.pdf` → PDF extractor
/// - `.docx` → DOCX extractor
/// - `.txt` → plain-text extractor with encoding fallback
///
/// Image formats and legacy `.doc` files are rejected with dedicated
/// errors; any other extension fails as [`ExtractError::UnknownFormat`].
/// Every successful result has its encoding repaired and surrounding
/// whitespace trimmed; it may be empty (e.g. a PDF with no text).
pub fn extract_text_from_file(file: &SourceFile<'_>) -> Result<String, ExtractError> {
    let kind = file.kind();
    debug!(name = file.name, ?kind, "dispatching extraction");

    match kind {
        FileKind::Pdf => Ok(materia_pdf::extract_text(file.bytes)?),
        FileKind::Docx => Ok(materia_docx::extract_text(file.bytes)?),
        FileKind::PlainText => Ok(materia_core::extract_plain_text(file.bytes)),
        FileKind::Image => Err(ExtractError::UnsupportedMediaKind {
            extension: lowercase_extension(file),
        }),
        FileKind::LegacyDoc => Err(ExtractError::UnsupportedLegacyFormat),
        FileKind::Unknown => Err(ExtractError::UnknownFormat {
            extension: lowercase_extension(file),
        }),
    }
}

fn lowercase_extension(file: &SourceFile<'_>) -> String {
    file.extension().unwrap_or_default().to_lowercase()
}
