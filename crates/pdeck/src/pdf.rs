use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use crate::error::{FileError, RenderError};

/// Anything that can hand out page sizes and rasterized pages.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Page size in PDF points (width, height).
    fn page_size(&self, page: usize) -> Result<(f32, f32), RenderError>;

    /// Rasterize a page to fit within `width` x `height` pixels, keeping its
    /// aspect ratio.
    fn render(&self, page: usize, width: u32, height: u32) -> Result<image::RgbaImage, RenderError>;
}

/// A PDF opened through PDFium.
pub struct PdfSource {
    path: PathBuf,
    document: PdfDocument<'static>,
}

impl std::fmt::Debug for PdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSource")
            .field("path", &self.path)
            .field("page_count", &self.page_count())
            .finish()
    }
}

impl PdfSource {
    pub fn open(path: &Path) -> Result<Self, FileError> {
        if !path.is_file() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }

        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| FileError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    fn page(&self, page: usize) -> Result<PdfPage<'_>, RenderError> {
        let no_such_page = || RenderError::NoSuchPage {
            page,
            page_count: self.page_count(),
        };
        let index = PdfPageIndex::try_from(page).map_err(|_| no_such_page())?;
        self.document.pages().get(index).map_err(|_| no_such_page())
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, page: usize) -> Result<(f32, f32), RenderError> {
        let p = self.page(page)?;
        Ok((p.width().value, p.height().value))
    }

    fn render(&self, page: usize, width: u32, height: u32) -> Result<image::RgbaImage, RenderError> {
        let rasterize_error = |message: String| RenderError::Rasterize { page, message };

        let config = PdfRenderConfig::new()
            .set_target_width(width.max(1) as i32)
            .set_maximum_height(height.max(1) as i32);

        let pdf_page = self.page(page)?;
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| rasterize_error(e.to_string()))?;

        let (w, h) = (bitmap.width() as u32, bitmap.height() as u32);
        image::RgbaImage::from_raw(w, h, bitmap.as_rgba_bytes())
            .ok_or_else(|| rasterize_error(format!("bitmap size mismatch ({w}x{h})")))
    }
}

/// Bind PDFium, preferring a copy next to the executable, then the working
/// directory, then the system library. The binding lives for the rest of the
/// process so documents can borrow it for `'static`.
fn bind_pdfium() -> Result<&'static Pdfium, FileError> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = exe_dir {
        candidates.push(Pdfium::pdfium_platform_library_name_at_path(&dir));
    }
    candidates.push(Pdfium::pdfium_platform_library_name_at_path("./"));

    let mut last_error = None;
    for candidate in &candidates {
        match Pdfium::bind_to_library(candidate) {
            Ok(bindings) => {
                tracing::debug!(library = %candidate.display(), "bound PDFium");
                return Ok(Box::leak(Box::new(Pdfium::new(bindings))));
            }
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            tracing::debug!("bound system PDFium");
            Ok(Box::leak(Box::new(Pdfium::new(bindings))))
        }
        Err(e) => Err(FileError::Library(
            last_error.map_or_else(|| e.to_string(), |l| format!("{e}; {l}")),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.pdf");
        let err = PdfSource::open(&path).unwrap_err();
        assert!(matches!(err, FileError::NotFound(p) if p == path));
    }

    #[test]
    fn test_directory_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }
}
