pub mod encoding;

// Re-export the text-level API for convenience
pub use encoding::{decode_text_bytes, extract_plain_text, repair_encoding};

/// A file handed to the extraction pipeline: a raw byte buffer plus the
/// file name the buffer came from. The name is used only to derive the
/// extension; the bytes are borrowed for the duration of one call and
/// never mutated or retained.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> SourceFile<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }

    /// The extension of the file name: the text after the last `.`,
    /// without case normalization. `None` only for dotless names, so a
    /// name like `.txt` still has the extension `txt`.
    pub fn extension(&self) -> Option<&'a str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }

    /// Resolve the extraction route for this file from its extension.
    pub fn kind(&self) -> FileKind {
        self.extension()
            .map(FileKind::from_extension)
            .unwrap_or(FileKind::Unknown)
    }
}

/// Extraction route for a file, resolved once at the dispatcher boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    PlainText,
    /// Raster image formats; never convertible to text.
    Image,
    /// Legacy binary `.doc`; unsupported, must be converted to `.docx`.
    LegacyDoc,
    Unknown,
}

impl FileKind {
    /// Map an extension (any case, no leading dot) to its route.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "docx" => FileKind::Docx,
            "txt" => FileKind::PlainText,
            "jpg" | "jpeg" | "png" | "gif" => FileKind::Image,
            "doc" => FileKind::LegacyDoc,
            _ => FileKind::Unknown,
        }
    }
}
