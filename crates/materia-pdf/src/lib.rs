//! PDF text extraction backed by [`lopdf`].
//!
//! Only text-run content is collected; raster and vector objects on a page
//! are ignored. The layout model is deliberately lossy: runs on a page are
//! joined with single spaces regardless of their position, pages with a
//! newline, so column and table structure is not reconstructed.

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

use materia_core::repair_encoding;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("encrypted PDFs are not supported")]
    Encrypted,
}

/// Extract the text of every page of a PDF byte buffer, in ascending page
/// order, then repair the encoding and trim surrounding whitespace.
///
/// A document with zero pages yields `Ok("")`. Any parser-level failure
/// (malformed structure, unsupported encryption) surfaces as a single
/// [`PdfError`]; there is no partial per-page result.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let doc = Document::load_mem(bytes)?;

    if doc.is_encrypted() {
        return Err(PdfError::Encrypted);
    }

    let pages = doc.get_pages();
    debug!(page_count = pages.len(), "loaded PDF document");

    let mut page_texts = Vec::with_capacity(pages.len());
    // get_pages returns a BTreeMap keyed by page number, so iteration is
    // already in ascending document order.
    for &page_number in pages.keys() {
        let raw = doc.extract_text(&[page_number])?;
        page_texts.push(join_page_runs(&raw));
    }

    let combined = page_texts.join("\n");
    Ok(repair_encoding(&combined).trim().to_string())
}

/// Collapse a page's extracted runs onto one line with single spaces.
fn join_page_runs(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
