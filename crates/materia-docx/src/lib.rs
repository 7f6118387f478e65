//! DOCX text extraction.
//!
//! A DOCX file is a zip package; the visible body text lives in
//! `word/document.xml`. The extractor streams that part with `quick-xml`
//! and keeps only textual runs — embedded images, drawings, and other
//! non-text OOXML elements are discarded.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

use materia_core::repair_encoding;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("failed to open DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("package has no {DOCUMENT_PART} part")]
    MissingDocumentPart,
    #[error("failed to parse document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the visible text of a DOCX byte buffer, repaired and trimmed.
///
/// Paragraphs are preserved in document order and joined with blank lines;
/// a package whose body holds no text yields `Ok("")`. Malformed zip or XML
/// surfaces as a single [`DocxError`] with no partial result.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocxError> {
    let xml = read_document_part(bytes)?;
    let text = document_xml_to_text(&xml)?;
    Ok(repair_encoding(&text).trim().to_string())
}

/// Pull the main content part out of the zip package.
fn read_document_part(bytes: &[u8]) -> Result<Vec<u8>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| DocxError::MissingDocumentPart)?;

    let mut xml = Vec::with_capacity(part.size() as usize);
    part.read_to_end(&mut xml)?;
    debug!(bytes = xml.len(), "read document part");
    Ok(xml)
}

/// Walk the OOXML event stream and collect paragraph text.
///
/// Only `w:t` run content is kept; `w:tab` and `w:br` become whitespace;
/// everything inside a `w:drawing` subtree is skipped. Element names are
/// matched on their local part so namespace prefixes do not matter.
fn document_xml_to_text(xml: &[u8]) -> Result<String, DocxError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut drawing_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"drawing" => drawing_depth += 1,
                b"t" if drawing_depth == 0 => in_text_run = true,
                b"tab" if drawing_depth == 0 => current.push('\t'),
                b"br" if drawing_depth == 0 => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if drawing_depth == 0 => current.push('\t'),
                b"br" if drawing_depth == 0 => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"drawing" => drawing_depth = drawing_depth.saturating_sub(1),
                b"t" => in_text_run = false,
                b"p" if drawing_depth == 0 => {
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Text(t) if in_text_run && drawing_depth == 0 => {
                let text = t.unescape().map_err(quick_xml::Error::from)?;
                current.push_str(&text);
            }
            // CDATA content is already literal; no unescaping applies.
            Event::CData(t) if in_text_run && drawing_depth == 0 => {
                current.push_str(&String::from_utf8_lossy(&t));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n\n"))
}
