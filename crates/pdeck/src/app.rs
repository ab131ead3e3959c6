use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::controller::{
    AudienceView, FullscreenChange, Input, Outcome, PresenterController, Window,
};
use crate::deck::Deck;
use crate::pdf::PdfSource;
use crate::render::{self, PageRenderer};
use crate::theme::Theme;

const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];
const AUDIENCE_POSITION: [f32; 2] = [50.0, 50.0];
const PRESENTER_POSITION: [f32; 2] = [900.0, 50.0];
const EMBEDDED_AUDIENCE_SIZE: [f32; 2] = [480.0, 360.0];
const STATUS_BAR_HEIGHT: f32 = 36.0;
const TOAST_DURATION: f32 = 2.0;
const TOAST_FADE_START: f32 = 1.5;

/// Keys understood by both windows. Anything not listed is `Input::Other`.
const KEY_BINDINGS: &[(egui::Key, Input)] = &[
    (egui::Key::ArrowRight, Input::Next),
    (egui::Key::Space, Input::Next),
    (egui::Key::PageDown, Input::Next),
    (egui::Key::ArrowLeft, Input::Previous),
    (egui::Key::PageUp, Input::Previous),
    (egui::Key::Home, Input::First),
    (egui::Key::End, Input::Last),
    (egui::Key::Enter, Input::Enter),
    (egui::Key::B, Input::ToggleBlank),
    (egui::Key::F11, Input::ToggleFullscreen),
    (egui::Key::Escape, Input::ExitFullscreen),
    (egui::Key::H, Input::ToggleHelp),
    (egui::Key::Q, Input::Quit),
    (egui::Key::Num0, Input::Digit(0)),
    (egui::Key::Num1, Input::Digit(1)),
    (egui::Key::Num2, Input::Digit(2)),
    (egui::Key::Num3, Input::Digit(3)),
    (egui::Key::Num4, Input::Digit(4)),
    (egui::Key::Num5, Input::Digit(5)),
    (egui::Key::Num6, Input::Digit(6)),
    (egui::Key::Num7, Input::Digit(7)),
    (egui::Key::Num8, Input::Digit(8)),
    (egui::Key::Num9, Input::Digit(9)),
];

fn input_for(key: egui::Key) -> Input {
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(Input::Other, |(_, input)| *input)
}

/// Key presses of the current viewport, in the order they arrived.
fn collect_inputs(ctx: &egui::Context) -> Vec<Input> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !modifiers.command => Some(input_for(*key)),
                _ => None,
            })
            .collect()
    })
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Launch options from the command line.
pub struct Options {
    pub start_slide: Option<usize>,
    pub fullscreen: bool,
}

/// The presenter window is the root viewport; the audience window is an
/// immediate child viewport drawn from the same `update`.
struct PresenterApp {
    controller: PresenterController,
    renderer: PageRenderer<PdfSource>,
    theme: Theme,
    blank: egui::Color32,
    file_name: String,
    audience_id: egui::ViewportId,
    audience_builder: egui::ViewportBuilder,
    audience_title: String,
    presenter_title: String,
    show_help: bool,
    toast: Option<Toast>,
}

impl PresenterApp {
    fn handle_inputs(&mut self, ctx: &egui::Context, window: Window) {
        for input in collect_inputs(ctx) {
            let outcome = self.controller.handle(window, input);
            self.apply(ctx, outcome);
        }
    }

    /// Carry out an outcome in the viewport the input came from.
    fn apply(&mut self, ctx: &egui::Context, outcome: Outcome) {
        match outcome {
            Outcome::Navigated(cursor) => {
                tracing::debug!(
                    slide = cursor.current_slide + 1,
                    blanked = cursor.audience_blanked,
                    "navigated"
                );
                ctx.request_repaint_of(egui::ViewportId::ROOT);
            }
            Outcome::Rejected(e) => {
                tracing::debug!("{e}");
                self.toast = Some(Toast::new(e.to_string()));
            }
            Outcome::Buffered => ctx.request_repaint_of(egui::ViewportId::ROOT),
            Outcome::Fullscreen(Window::Presenter, FullscreenChange::Exit) if self.show_help => {
                self.show_help = false;
            }
            Outcome::Fullscreen(_, change) => {
                let current = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                let wanted = match change {
                    FullscreenChange::Toggle => !current,
                    FullscreenChange::Exit => false,
                };
                if wanted != current {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(wanted));
                }
            }
            Outcome::ToggleHelp => self.show_help = !self.show_help,
            Outcome::Quit => {
                ctx.send_viewport_cmd_to(egui::ViewportId::ROOT, egui::ViewportCommand::Close);
            }
            Outcome::Ignored => {}
        }
    }

    fn audience_frame(&mut self, ctx: &egui::Context, class: egui::ViewportClass) {
        if matches!(class, egui::ViewportClass::Embedded) {
            // No second native window available: show the audience view
            // inside the presenter window. Input is already handled there.
            egui::Window::new("Audience View")
                .resizable(false)
                .show(ctx, |ui| {
                    let (_, rect) = ui.allocate_space(EMBEDDED_AUDIENCE_SIZE.into());
                    ui.painter().rect_filled(rect, 0.0, self.theme.stage);
                    self.draw_audience(ui, rect);
                });
            return;
        }

        self.handle_inputs(ctx, Window::Audience);

        if ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd_to(egui::ViewportId::ROOT, egui::ViewportCommand::Close);
        }

        let title = self.controller.view().audience_title();
        if title != self.audience_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.audience_title = title;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.stage).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_audience(ui, rect);
            });
    }

    fn draw_audience(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        match self.controller.view().audience {
            AudienceView::Blank => {
                ui.painter().rect_filled(rect, 0.0, self.blank);
            }
            AudienceView::Page(page) => self.renderer.paint(ui, page, rect, &self.theme),
        }
    }

    fn presenter_frame(&mut self, ctx: &egui::Context) {
        let title = self.controller.view().presenter_title();
        if title != self.presenter_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.presenter_title = title;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let split = rect.bottom() - STATUS_BAR_HEIGHT;
                let notes_rect = egui::Rect::from_min_max(rect.min, egui::pos2(rect.right(), split));
                let status_rect =
                    egui::Rect::from_min_max(egui::pos2(rect.left(), split), rect.max);

                self.draw_notes(ui, notes_rect);
                self.draw_status_bar(ui, status_rect);

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, toast, &self.theme, notes_rect);
                    ctx.request_repaint();
                }

                if self.show_help {
                    draw_help(ui, &self.theme, rect);
                }
            });
    }

    fn draw_notes(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        let notes = self.controller.view().notes.to_vec();
        if notes.is_empty() {
            let color = Theme::with_opacity(self.theme.foreground, 0.5);
            render::paint_centered_text(ui, rect, "No notes for this slide", color);
            return;
        }
        // Note pages usually share one size; lay out by the first.
        let page_size = self
            .renderer
            .page_size(notes[0])
            .unwrap_or(egui::vec2(4.0, 3.0));
        let cells = render::note_grid(rect, notes.len(), page_size);
        for (page, cell) in notes.into_iter().zip(cells) {
            self.renderer.paint(ui, page, cell, &self.theme);
        }
    }

    fn draw_status_bar(&self, ui: &egui::Ui, rect: egui::Rect) {
        ui.painter().rect_filled(rect, 0.0, self.theme.panel);

        let view = self.controller.view();
        let font = egui::FontId::monospace(14.0);
        let text_color = Theme::with_opacity(self.theme.foreground, 0.8);
        let y = rect.center().y;

        let counter = ui.painter().layout_no_wrap(
            format!("Slide {} / {}", view.slide_number, view.slide_count),
            font.clone(),
            text_color,
        );
        let counter_width = counter.rect.width();
        let counter_pos = egui::pos2(rect.left() + 12.0, y - counter.rect.height() / 2.0);
        ui.painter().galley(counter_pos, counter, text_color);

        if view.is_blanked() {
            let blanked = ui.painter().layout_no_wrap(
                "BLANKED".to_string(),
                font.clone(),
                self.theme.warning,
            );
            let pos = egui::pos2(
                counter_pos.x + counter_width + 16.0,
                y - blanked.rect.height() / 2.0,
            );
            ui.painter().galley(pos, blanked, self.theme.warning);
        }

        let pending = self.controller.pending_jump();
        if !pending.is_empty() {
            let galley = ui.painter().layout_no_wrap(
                format!("Go to slide: {pending}_"),
                font.clone(),
                self.theme.accent,
            );
            let pos = egui::pos2(
                rect.center().x - galley.rect.width() / 2.0,
                y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, self.theme.accent);
        }

        let hint_color = Theme::with_opacity(self.theme.foreground, 0.4);
        let hint = ui.painter().layout_no_wrap(
            format!("{}  |  H: help", self.file_name),
            font,
            hint_color,
        );
        let pos = egui::pos2(
            rect.right() - hint.rect.width() - 12.0,
            y - hint.rect.height() / 2.0,
        );
        ui.painter().galley(pos, hint, hint_color);
    }
}

impl eframe::App for PresenterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_inputs(ctx, Window::Presenter);

        // Audience first, then presenter, both from the same cursor.
        let builder = self.audience_builder.clone();
        ctx.show_viewport_immediate(self.audience_id, builder, |ctx, class| {
            self.audience_frame(ctx, class);
        });

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        self.presenter_frame(ctx);
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let bg = Theme::with_opacity(theme.panel, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0),
        color,
    );
    let padding = 16.0;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - galley.rect.height() - padding * 2.0 - 24.0,
        ),
        galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
    );
    ui.painter().rect_filled(toast_rect, 8.0, bg);
    ui.painter()
        .galley(toast_rect.min + egui::vec2(padding, padding), galley, color);
}

fn draw_help(ui: &egui::Ui, theme: &Theme, rect: egui::Rect) {
    let shortcuts = [
        ("\u{2192} / Space / PgDn", "Next slide"),
        ("\u{2190} / PgUp", "Previous slide"),
        ("Home", "First slide"),
        ("End", "Last slide"),
        ("Number + Enter", "Jump to slide"),
        ("B", "Blank audience screen"),
        ("F11", "Toggle fullscreen"),
        ("Esc", "Exit fullscreen / close help"),
        ("H", "Toggle this help"),
        ("Q / close window", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel, 0.95);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 20.0;
    let line_height = 26.0;
    let height = shortcuts.len() as f32 * line_height + padding * 2.0 + 36.0;
    let width = 400.0_f32.min(rect.width() - 16.0);
    let help_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(width, height));
    ui.painter().rect_filled(help_rect, 10.0, bg);

    let title = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(18.0),
        text_color,
    );
    ui.painter().galley(
        egui::pos2(help_rect.left() + padding, help_rect.top() + padding),
        title,
        text_color,
    );

    let mut y = help_rect.top() + padding + 36.0;
    for (key, desc) in shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(13.0),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(help_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(13.0),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(help_rect.left() + padding + 170.0, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

pub fn run(pdf: PathBuf, pages: Option<PathBuf>, options: Options) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let deck = Deck::open(&pdf, pages.as_deref())?;

    let cache_pages = render::cache_capacity(config.cache_pages(), &deck.mapping);
    let mut controller = PresenterController::new(deck.mapping);
    if let Some(n) = options.start_slide {
        if let Err(e) = controller.start_at(n) {
            tracing::warn!("{e}; starting at slide 1");
        }
    }

    let file_name = deck.source.file_name();
    let renderer = PageRenderer::new(deck.source, cache_pages);
    let theme = Theme::from_name(config.theme());
    let fullscreen = options.fullscreen || config.fullscreen();
    tracing::debug!(theme = %theme.name, fullscreen, "presenter settings");

    let audience_builder = egui::ViewportBuilder::default()
        .with_title("Audience View")
        .with_inner_size(WINDOW_SIZE)
        .with_position(AUDIENCE_POSITION)
        .with_fullscreen(fullscreen);

    let viewport = egui::ViewportBuilder::default()
        .with_title("Presenter Notes")
        .with_inner_size(WINDOW_SIZE)
        .with_position(PRESENTER_POSITION);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!("move 'Audience View' to the projector and press F11 for fullscreen");

    let app = PresenterApp {
        controller,
        renderer,
        theme,
        blank: config.blank().color(),
        file_name,
        audience_id: egui::ViewportId::from_hash_of("pdeck-audience"),
        audience_builder,
        audience_title: String::new(),
        presenter_title: String::new(),
        show_help: false,
        toast: None,
    };

    eframe::run_native("pdeck", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}
