use std::path::Path;

use anyhow::Result;

use crate::pdf::{PageSource, PdfSource};
use crate::slides::{self, SlideMapping, page_list};

/// An opened PDF together with its slide mapping.
pub struct Deck {
    pub source: PdfSource,
    pub mapping: SlideMapping,
}

impl Deck {
    /// Open the PDF and map its pages to slides. File and page-list errors
    /// are returned before anything is shown.
    pub fn open(pdf: &Path, pages: Option<&Path>) -> Result<Self> {
        let source = PdfSource::open(pdf)?;
        let page_count = source.page_count();
        tracing::info!(file = %source.file_name(), page_count, "loaded PDF");

        let page_list = pages.map(page_list::load).transpose()?;
        let mapping = slides::mapping_for(page_count, page_list.as_ref())?;

        if page_count < 2 {
            tracing::warn!("PDF has fewer than 2 pages; presenter notes will be empty");
        }
        let unreachable = mapping.unreachable_pages();
        if !unreachable.is_empty() {
            tracing::warn!(
                "pages 1-{} come before the first audience page and will not be shown",
                unreachable.end
            );
        }
        tracing::info!(slides = mapping.len(), "mapped pages to slides");

        Ok(Self { source, mapping })
    }
}
