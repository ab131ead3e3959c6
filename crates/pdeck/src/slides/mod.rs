pub mod page_list;

use std::ops::Range;

use crate::error::ConfigError;

pub use page_list::PageList;

/// One audience page and the presenter pages that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideGroup {
    /// 0-indexed page shown to the audience.
    pub audience_page: usize,
    /// 0-indexed pages shown to the presenter, ascending.
    pub note_pages: Vec<usize>,
}

/// Ordered slide groups covering a document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideMapping {
    groups: Vec<SlideGroup>,
    page_count: usize,
}

impl SlideMapping {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[SlideGroup] {
        &self.groups
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Pages before the first audience page. No slide group owns these, so
    /// they can never be shown.
    pub fn unreachable_pages(&self) -> Range<usize> {
        0..self.groups.first().map_or(0, |g| g.audience_page)
    }
}

/// Build the slide mapping for a document of `page_count` pages.
///
/// `audience_pages` holds 1-indexed page numbers. Without it, odd pages
/// (1, 3, 5, ...) go to the audience and each even page becomes the notes of
/// the page before it.
pub fn build_mapping(
    page_count: usize,
    audience_pages: Option<&[i64]>,
) -> Result<SlideMapping, ConfigError> {
    if page_count == 0 {
        return Err(ConfigError::EmptyDocument);
    }

    let starts = match audience_pages {
        Some(pages) => validate(page_count, pages)?,
        None => (0..page_count).step_by(2).collect(),
    };

    Ok(SlideMapping {
        groups: partition(page_count, &starts),
        page_count,
    })
}

/// Build the mapping from an optional parsed page-list file.
pub fn mapping_for(
    page_count: usize,
    page_list: Option<&PageList>,
) -> Result<SlideMapping, ConfigError> {
    build_mapping(page_count, page_list.map(|l| l.pages.as_slice()))
}

/// Check 1-indexed page numbers against the document and convert them to
/// sorted, distinct 0-indexed audience pages.
fn validate(page_count: usize, pages: &[i64]) -> Result<Vec<usize>, ConfigError> {
    let mut pages = pages.to_vec();
    pages.sort_unstable();
    pages.dedup();

    if pages.is_empty() {
        return Err(ConfigError::Empty);
    }

    pages
        .into_iter()
        .map(|page| {
            if page < 1 {
                Err(ConfigError::BelowOne(page))
            } else if page as u64 > page_count as u64 {
                Err(ConfigError::PastEnd { page, page_count })
            } else {
                Ok(page as usize - 1)
            }
        })
        .collect()
}

/// Split `0..page_count` at each audience page. `starts` must be sorted,
/// distinct and non-empty; the last group runs to the end of the document.
fn partition(page_count: usize, starts: &[usize]) -> Vec<SlideGroup> {
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(page_count);
            SlideGroup {
                audience_page: start,
                note_pages: (start + 1..end).collect(),
            }
        })
        .collect()
}
