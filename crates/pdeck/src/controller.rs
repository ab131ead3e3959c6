use crate::error::OutOfRange;
use crate::navigation::{NavigationCursor, NavigationState};
use crate::slides::SlideMapping;

/// Longest slide number the jump buffer accepts.
const MAX_PENDING_DIGITS: usize = 6;

/// A discrete input, independent of the GUI toolkit that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Next,
    Previous,
    First,
    Last,
    Digit(u8),
    Enter,
    ToggleBlank,
    ToggleFullscreen,
    ExitFullscreen,
    ToggleHelp,
    Quit,
    /// Any key without a binding. Cancels a pending jump.
    Other,
}

/// Which window an input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Audience,
    Presenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    Toggle,
    Exit,
}

/// What the GUI layer has to do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cursor may have changed: redraw both windows.
    Navigated(NavigationCursor),
    /// A jump to a slide that does not exist. Slide unchanged.
    Rejected(OutOfRange),
    /// The jump buffer changed.
    Buffered,
    /// Change fullscreen state of the window the input came from.
    Fullscreen(Window, FullscreenChange),
    ToggleHelp,
    Quit,
    Ignored,
}

/// What the audience window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudienceView {
    Page(usize),
    Blank,
}

/// Everything both windows need to draw the current slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView<'a> {
    /// 1-indexed, for display.
    pub slide_number: usize,
    pub slide_count: usize,
    pub audience: AudienceView,
    pub notes: &'a [usize],
}

impl SlideView<'_> {
    pub fn is_blanked(&self) -> bool {
        self.audience == AudienceView::Blank
    }

    pub fn audience_title(&self) -> String {
        self.title("Audience View")
    }

    pub fn presenter_title(&self) -> String {
        self.title("Presenter Notes")
    }

    fn title(&self, prefix: &str) -> String {
        let blank = if self.is_blanked() { " [BLANKED]" } else { "" };
        format!(
            "{prefix} - Slide {}/{}{blank}",
            self.slide_number, self.slide_count
        )
    }
}

/// Turns inputs from either window into navigation calls.
pub struct PresenterController {
    mapping: SlideMapping,
    navigation: NavigationState,
    pending: String,
}

impl PresenterController {
    pub fn new(mapping: SlideMapping) -> Self {
        let navigation = NavigationState::new(&mapping);
        Self {
            mapping,
            navigation,
            pending: String::new(),
        }
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.navigation.cursor()
    }

    /// Digits typed so far for a jump, empty when none is pending.
    pub fn pending_jump(&self) -> &str {
        &self.pending
    }

    /// Jump straight to a 1-indexed slide, e.g. from `--slide`.
    pub fn start_at(&mut self, slide_number: usize) -> Result<NavigationCursor, OutOfRange> {
        self.navigation.jump_to(slide_number)
    }

    pub fn handle(&mut self, window: Window, input: Input) -> Outcome {
        if let Input::Digit(d) = input {
            if self.pending.len() >= MAX_PENDING_DIGITS {
                return Outcome::Ignored;
            }
            self.pending.push(char::from(b'0' + d.min(9)));
            return Outcome::Buffered;
        }

        let pending = std::mem::take(&mut self.pending);

        let outcome = match input {
            Input::Next => Outcome::Navigated(self.navigation.next()),
            Input::Previous => Outcome::Navigated(self.navigation.previous()),
            Input::First => Outcome::Navigated(self.navigation.first()),
            Input::Last => Outcome::Navigated(self.navigation.last()),
            Input::Enter if pending.is_empty() => Outcome::Ignored,
            Input::Enter => {
                // At most MAX_PENDING_DIGITS digits, so this always fits.
                let number = pending.parse::<usize>().unwrap_or(0);
                match self.navigation.jump_to(number) {
                    Ok(cursor) => Outcome::Navigated(cursor),
                    Err(e) => Outcome::Rejected(e),
                }
            }
            Input::ToggleBlank => Outcome::Navigated(self.navigation.toggle_blank()),
            Input::ToggleFullscreen => Outcome::Fullscreen(window, FullscreenChange::Toggle),
            Input::ExitFullscreen => Outcome::Fullscreen(window, FullscreenChange::Exit),
            Input::ToggleHelp if window == Window::Presenter => Outcome::ToggleHelp,
            Input::Quit => Outcome::Quit,
            Input::ToggleHelp | Input::Other | Input::Digit(_) => {
                if pending.is_empty() {
                    Outcome::Ignored
                } else {
                    Outcome::Buffered
                }
            }
        };

        tracing::trace!(?window, ?input, ?outcome, "input handled");
        outcome
    }

    /// The pages to draw for the current cursor.
    pub fn view(&self) -> SlideView<'_> {
        let cursor = self.navigation.cursor();
        // The cursor stays within 0..slide_count, one slide per group.
        let group = &self.mapping.groups()[cursor.current_slide];

        SlideView {
            slide_number: cursor.current_slide + 1,
            slide_count: self.navigation.slide_count(),
            audience: if cursor.audience_blanked {
                AudienceView::Blank
            } else {
                AudienceView::Page(group.audience_page)
            },
            notes: &group.note_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::build_mapping;

    fn controller(page_count: usize, pages: Option<&[i64]>) -> PresenterController {
        PresenterController::new(build_mapping(page_count, pages).unwrap())
    }

    fn press(c: &mut PresenterController, inputs: &[Input]) -> Outcome {
        let mut last = Outcome::Ignored;
        for &input in inputs {
            last = c.handle(Window::Presenter, input);
        }
        last
    }

    #[test]
    fn test_initial_view() {
        let c = controller(6, Some(&[1, 4]));
        let view = c.view();
        assert_eq!(view.slide_number, 1);
        assert_eq!(view.slide_count, 2);
        assert_eq!(view.audience, AudienceView::Page(0));
        assert_eq!(view.notes, &[1, 2]);
    }

    #[test]
    fn test_next_moves_both_views() {
        let mut c = controller(6, Some(&[1, 4]));
        press(&mut c, &[Input::Next]);
        let view = c.view();
        assert_eq!(view.audience, AudienceView::Page(3));
        assert_eq!(view.notes, &[4, 5]);
    }

    #[test]
    fn test_same_inputs_from_either_window() {
        let mut c = controller(8, None);
        c.handle(Window::Audience, Input::Next);
        c.handle(Window::Presenter, Input::Next);
        c.handle(Window::Audience, Input::Previous);
        assert_eq!(c.cursor().current_slide, 1);
    }

    #[test]
    fn test_home_and_end() {
        let mut c = controller(10, None);
        press(&mut c, &[Input::Last]);
        assert_eq!(c.view().audience, AudienceView::Page(8));
        press(&mut c, &[Input::First]);
        assert_eq!(c.view().audience, AudienceView::Page(0));
    }

    #[test]
    fn test_view_matches_mapping_on_every_slide() {
        let mut c = controller(10, Some(&[1, 4, 8]));
        let groups = c.mapping.groups().to_vec();
        for (i, group) in groups.iter().enumerate() {
            let view = c.view();
            assert_eq!(view.slide_number, i + 1);
            assert_eq!(view.audience, AudienceView::Page(group.audience_page));
            assert_eq!(view.notes, group.note_pages.as_slice());
            press(&mut c, &[Input::Next]);
        }
        // Next on the last slide keeps the last group in view.
        assert_eq!(c.view().audience, AudienceView::Page(7));
        assert_eq!(c.view().notes, &[8, 9]);
    }

    #[test]
    fn test_digits_then_enter_jumps() {
        let mut c = controller(30, None);
        assert_eq!(press(&mut c, &[Input::Digit(1)]), Outcome::Buffered);
        assert_eq!(press(&mut c, &[Input::Digit(2)]), Outcome::Buffered);
        assert_eq!(c.pending_jump(), "12");
        let outcome = press(&mut c, &[Input::Enter]);
        assert!(matches!(outcome, Outcome::Navigated(cursor) if cursor.current_slide == 11));
        assert_eq!(c.pending_jump(), "");
    }

    #[test]
    fn test_jump_out_of_range_is_reported() {
        let mut c = controller(10, None);
        let outcome = press(&mut c, &[Input::Digit(9), Input::Enter]);
        assert_eq!(
            outcome,
            Outcome::Rejected(OutOfRange {
                requested: 9,
                slide_count: 5
            })
        );
        assert_eq!(c.cursor().current_slide, 0);
    }

    #[test]
    fn test_jump_to_zero_is_rejected() {
        let mut c = controller(10, None);
        let outcome = press(&mut c, &[Input::Digit(0), Input::Enter]);
        assert!(matches!(outcome, Outcome::Rejected(_)));
    }

    #[test]
    fn test_enter_without_digits_is_ignored() {
        let mut c = controller(10, None);
        assert_eq!(press(&mut c, &[Input::Enter]), Outcome::Ignored);
    }

    #[test]
    fn test_unbound_key_cancels_jump() {
        let mut c = controller(10, None);
        press(&mut c, &[Input::Digit(3), Input::Other]);
        assert_eq!(c.pending_jump(), "");
        assert_eq!(press(&mut c, &[Input::Enter]), Outcome::Ignored);
        assert_eq!(c.cursor().current_slide, 0);
    }

    #[test]
    fn test_navigation_cancels_jump() {
        let mut c = controller(10, None);
        press(&mut c, &[Input::Digit(4), Input::Next]);
        assert_eq!(c.pending_jump(), "");
        assert_eq!(c.cursor().current_slide, 1);
    }

    #[test]
    fn test_jump_buffer_is_bounded() {
        let mut c = controller(10, None);
        for _ in 0..MAX_PENDING_DIGITS {
            press(&mut c, &[Input::Digit(9)]);
        }
        assert_eq!(press(&mut c, &[Input::Digit(9)]), Outcome::Ignored);
        assert_eq!(c.pending_jump().len(), MAX_PENDING_DIGITS);
    }

    #[test]
    fn test_blank_then_next_restores_audience() {
        let mut c = controller(10, None);
        press(&mut c, &[Input::ToggleBlank]);
        let view = c.view();
        assert_eq!(view.audience, AudienceView::Blank);
        assert_eq!(view.notes, &[1]);
        assert!(view.audience_title().ends_with("[BLANKED]"));

        press(&mut c, &[Input::Next]);
        assert_eq!(c.view().audience, AudienceView::Page(2));
    }

    #[test]
    fn test_fullscreen_targets_source_window() {
        let mut c = controller(4, None);
        assert_eq!(
            c.handle(Window::Audience, Input::ToggleFullscreen),
            Outcome::Fullscreen(Window::Audience, FullscreenChange::Toggle)
        );
        assert_eq!(
            c.handle(Window::Presenter, Input::ExitFullscreen),
            Outcome::Fullscreen(Window::Presenter, FullscreenChange::Exit)
        );
        assert_eq!(c.cursor().current_slide, 0);
    }

    #[test]
    fn test_help_only_from_presenter() {
        let mut c = controller(4, None);
        assert_eq!(c.handle(Window::Audience, Input::ToggleHelp), Outcome::Ignored);
        assert_eq!(
            c.handle(Window::Presenter, Input::ToggleHelp),
            Outcome::ToggleHelp
        );
    }

    #[test]
    fn test_titles() {
        let mut c = controller(10, None);
        press(&mut c, &[Input::Next]);
        let view = c.view();
        assert_eq!(view.audience_title(), "Audience View - Slide 2/5");
        assert_eq!(view.presenter_title(), "Presenter Notes - Slide 2/5");
    }

    #[test]
    fn test_start_at() {
        let mut c = controller(10, None);
        assert!(c.start_at(4).is_ok());
        assert_eq!(c.view().audience, AudienceView::Page(6));
        assert!(c.start_at(99).is_err());
        assert_eq!(c.cursor().current_slide, 3);
    }
}
