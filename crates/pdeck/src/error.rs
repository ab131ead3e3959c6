use std::path::PathBuf;

use thiserror::Error;

/// Invalid page list or a document that cannot be mapped to slides.
/// Always fatal: reported before any window opens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the audience page list is empty")]
    Empty,

    #[error("audience page {0} is invalid: page numbers start at 1")]
    BelowOne(i64),

    #[error("audience page {page} is past the end of the document ({page_count} pages)")]
    PastEnd { page: i64, page_count: usize },

    #[error("the document has no pages")]
    EmptyDocument,

    #[error("failed to read page list {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },
}

/// The PDF could not be opened.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "failed to load the PDFium library ({0}). Install PDFium or place it next to the executable \
         (https://github.com/bblanchon/pdfium-binaries)"
    )]
    Library(String),

    #[error("failed to open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },
}

/// A single page failed to rasterize. Recoverable: the surface shows a placeholder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("page {page} does not exist (document has {page_count} pages)")]
    NoSuchPage { page: usize, page_count: usize },

    #[error("page {page} could not be rendered: {message}")]
    Rasterize { page: usize, message: String },
}

/// A jump to a slide number outside `1..=slide_count`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no slide {requested} (slides 1-{slide_count})")]
pub struct OutOfRange {
    pub requested: usize,
    pub slide_count: usize,
}
