pub mod page_cache;

use std::collections::HashMap;

use eframe::egui;

use crate::error::RenderError;
use crate::pdf::PageSource;
use crate::slides::SlideMapping;
use crate::theme::Theme;

use page_cache::{PageCache, PageKey};

/// Fraction of the limiting dimension a page fills.
const PAGE_MARGIN: f32 = 0.95;
/// Surfaces smaller than this (in points) are not drawn.
const MIN_SURFACE: f32 = 10.0;
const CELL_GAP: f32 = 12.0;

pub type RenderedPage = Result<egui::TextureHandle, RenderError>;

/// The largest rect with the page's aspect ratio that fits in `area`,
/// shrunk by the page margin and centred.
pub fn fit_rect(page_size: egui::Vec2, area: egui::Rect) -> Option<egui::Rect> {
    if area.width() < MIN_SURFACE || area.height() < MIN_SURFACE {
        return None;
    }
    if page_size.x <= 0.0 || page_size.y <= 0.0 {
        return None;
    }
    let scale = (area.width() / page_size.x).min(area.height() / page_size.y) * PAGE_MARGIN;
    Some(egui::Rect::from_center_size(area.center(), page_size * scale))
}

/// Split `area` into `count` equal cells, row by row, left to right.
///
/// The row/column split is the one that shows a page of `page_size` largest.
/// Ties go to fewer columns.
pub fn note_grid(area: egui::Rect, count: usize, page_size: egui::Vec2) -> Vec<egui::Rect> {
    if count == 0 {
        return Vec::new();
    }
    let page = egui::vec2(page_size.x.max(1.0), page_size.y.max(1.0));
    let cell_size = |cols: usize| {
        let rows = count.div_ceil(cols);
        egui::vec2(
            ((area.width() - CELL_GAP * (cols as f32 - 1.0)) / cols as f32).max(0.0),
            ((area.height() - CELL_GAP * (rows as f32 - 1.0)) / rows as f32).max(0.0),
        )
    };
    let scale = |cell: egui::Vec2| (cell.x / page.x).min(cell.y / page.y);

    let mut cols = 1;
    for candidate in 2..=count {
        if scale(cell_size(candidate)) > scale(cell_size(cols)) {
            cols = candidate;
        }
    }

    let cell = cell_size(cols);
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            egui::Rect::from_min_size(
                egui::pos2(
                    area.left() + col as f32 * (cell.x + CELL_GAP),
                    area.top() + row as f32 * (cell.y + CELL_GAP),
                ),
                cell,
            )
        })
        .collect()
}

/// LRU capacity for a deck: at least every page a single frame draws, so
/// repainting the same slide never re-rasterizes.
pub fn cache_capacity(configured: usize, mapping: &SlideMapping) -> usize {
    let per_frame = mapping
        .groups()
        .iter()
        .map(|g| g.note_pages.len() + 1)
        .max()
        .unwrap_or(1);
    configured.max(per_frame)
}

/// Rasterizes pages on demand and keeps the results as textures.
pub struct PageRenderer<S> {
    source: S,
    cache: PageCache<RenderedPage>,
    sizes: HashMap<usize, Result<egui::Vec2, RenderError>>,
}

impl<S: PageSource> PageRenderer<S> {
    pub fn new(source: S, cache_pages: usize) -> Self {
        let cache = PageCache::new(cache_pages);
        tracing::debug!(capacity = cache.capacity(), "page cache ready");
        Self {
            source,
            cache,
            sizes: HashMap::new(),
        }
    }

    pub fn page_size(&mut self, page: usize) -> Result<egui::Vec2, RenderError> {
        self.sizes
            .entry(page)
            .or_insert_with(|| {
                self.source
                    .page_size(page)
                    .map(|(w, h)| egui::vec2(w, h))
            })
            .clone()
    }

    /// Texture for `page` at exactly `size` pixels, rendered on first use.
    pub fn texture(&mut self, ctx: &egui::Context, page: usize, size: [u32; 2]) -> RenderedPage {
        let key = PageKey {
            page,
            width: size[0],
            height: size[1],
        };
        let source = &self.source;
        self.cache.get_or_insert_with(key, || {
            tracing::trace!(page, width = size[0], height = size[1], "rendering page");
            let rendered = source.render(page, size[0], size[1]).map(|img| {
                let (w, h) = img.dimensions();
                let color = egui::ColorImage::from_rgba_unmultiplied(
                    [w as usize, h as usize],
                    img.as_raw(),
                );
                ctx.load_texture(format!("page-{page}"), color, egui::TextureOptions::LINEAR)
            });
            if let Err(e) = &rendered {
                tracing::warn!("{e}");
            }
            rendered
        })
    }

    /// Draw `page` fitted and centred in `area`, or a placeholder if it
    /// cannot be rendered.
    pub fn paint(&mut self, ui: &egui::Ui, page: usize, area: egui::Rect, theme: &Theme) {
        let target = match self.page_size(page) {
            Ok(size) => fit_rect(size, area),
            Err(e) => return paint_placeholder(ui, area, &e.to_string(), theme),
        };
        let Some(target) = target else {
            // Too small for a page; still mark where it belongs.
            if area.width() > 0.0 && area.height() > 0.0 {
                ui.painter().rect_filled(area, 2.0, theme.panel);
            }
            return;
        };

        let ppp = ui.ctx().pixels_per_point();
        let pixels = [
            (target.width() * ppp).round().max(1.0) as u32,
            (target.height() * ppp).round().max(1.0) as u32,
        ];

        match self.texture(ui.ctx(), page, pixels) {
            Ok(texture) => {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter()
                    .image(texture.id(), target, uv, egui::Color32::WHITE);
            }
            Err(_) => paint_placeholder(
                ui,
                target,
                &format!("Page {} could not be rendered", page + 1),
                theme,
            ),
        }
    }
}

/// Centered message on a panel, used where a page should have been.
pub fn paint_placeholder(ui: &egui::Ui, area: egui::Rect, message: &str, theme: &Theme) {
    ui.painter().rect_filled(area, 4.0, theme.panel);
    paint_centered_text(ui, area, message, Theme::with_opacity(theme.warning, 0.9));
}

pub fn paint_centered_text(ui: &egui::Ui, area: egui::Rect, text: &str, color: egui::Color32) {
    let galley = ui.painter().layout(
        text.to_string(),
        egui::FontId::proportional(24.0),
        color,
        area.width() * 0.9,
    );
    let pos = area.center() - galley.rect.size() / 2.0;
    ui.painter().galley(pos, galley, color);
}
