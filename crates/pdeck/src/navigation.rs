use crate::error::OutOfRange;
use crate::slides::SlideMapping;

/// Where the presentation is and whether the audience screen is blanked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationCursor {
    pub current_slide: usize,
    pub audience_blanked: bool,
}

/// Cursor over the slide groups of a mapping.
///
/// The slide index always stays within `0..slide_count`. Every navigation
/// call, including one that hits a boundary, un-blanks the audience.
#[derive(Debug, Clone)]
pub struct NavigationState {
    cursor: NavigationCursor,
    slide_count: usize,
}

impl NavigationState {
    /// `mapping` is never empty; `build_mapping` rejects empty documents.
    pub fn new(mapping: &SlideMapping) -> Self {
        debug_assert!(!mapping.groups().is_empty());
        Self {
            cursor: NavigationCursor::default(),
            slide_count: mapping.len(),
        }
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_blanked(&self) -> bool {
        self.cursor.audience_blanked
    }

    pub fn next(&mut self) -> NavigationCursor {
        let last = self.slide_count - 1;
        self.move_to((self.cursor.current_slide + 1).min(last))
    }

    pub fn previous(&mut self) -> NavigationCursor {
        self.move_to(self.cursor.current_slide.saturating_sub(1))
    }

    pub fn first(&mut self) -> NavigationCursor {
        self.move_to(0)
    }

    pub fn last(&mut self) -> NavigationCursor {
        self.move_to(self.slide_count - 1)
    }

    /// Jump to a 1-indexed slide number. Out-of-range numbers leave the slide
    /// unchanged.
    pub fn jump_to(&mut self, slide_number: usize) -> Result<NavigationCursor, OutOfRange> {
        self.cursor.audience_blanked = false;
        if slide_number == 0 || slide_number > self.slide_count {
            return Err(OutOfRange {
                requested: slide_number,
                slide_count: self.slide_count,
            });
        }
        Ok(self.move_to(slide_number - 1))
    }

    pub fn toggle_blank(&mut self) -> NavigationCursor {
        self.cursor.audience_blanked = !self.cursor.audience_blanked;
        self.cursor
    }

    fn move_to(&mut self, index: usize) -> NavigationCursor {
        self.cursor = NavigationCursor {
            current_slide: index,
            audience_blanked: false,
        };
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::build_mapping;

    /// Five slides with the default odd/even split.
    fn five_slides() -> NavigationState {
        NavigationState::new(&build_mapping(10, None).unwrap())
    }

    #[test]
    fn test_starts_at_first_slide() {
        let nav = five_slides();
        assert_eq!(nav.cursor(), NavigationCursor::default());
        assert_eq!(nav.slide_count(), 5);
    }

    #[test]
    fn test_next_and_previous() {
        let mut nav = five_slides();
        assert_eq!(nav.next().current_slide, 1);
        assert_eq!(nav.next().current_slide, 2);
        assert_eq!(nav.previous().current_slide, 1);
    }

    #[test]
    fn test_next_at_last_slide_is_noop() {
        let mut nav = five_slides();
        nav.last();
        assert_eq!(nav.cursor().current_slide, 4);
        assert_eq!(nav.next().current_slide, 4);
    }

    #[test]
    fn test_previous_at_first_slide_is_noop() {
        let mut nav = five_slides();
        assert_eq!(nav.previous().current_slide, 0);
    }

    #[test]
    fn test_first_and_last() {
        let mut nav = five_slides();
        assert_eq!(nav.last().current_slide, 4);
        assert_eq!(nav.first().current_slide, 0);
    }

    #[test]
    fn test_jump_to() {
        let mut nav = five_slides();
        assert_eq!(nav.jump_to(3).unwrap().current_slide, 2);
    }

    #[test]
    fn test_jump_out_of_range_rejected() {
        let mut nav = five_slides();
        nav.jump_to(2).unwrap();
        assert_eq!(
            nav.jump_to(0),
            Err(OutOfRange {
                requested: 0,
                slide_count: 5
            })
        );
        assert!(nav.jump_to(6).is_err());
        assert_eq!(nav.cursor().current_slide, 1);
    }

    #[test]
    fn test_toggle_blank_keeps_slide() {
        let mut nav = five_slides();
        nav.next();
        let cursor = nav.toggle_blank();
        assert!(cursor.audience_blanked);
        assert_eq!(cursor.current_slide, 1);
        assert!(!nav.toggle_blank().audience_blanked);
    }

    #[test]
    fn test_navigation_clears_blank() {
        let mut nav = five_slides();
        nav.toggle_blank();
        assert!(!nav.next().audience_blanked);
    }

    #[test]
    fn test_boundary_noop_still_clears_blank() {
        let mut nav = five_slides();
        nav.toggle_blank();
        let cursor = nav.previous();
        assert_eq!(cursor.current_slide, 0);
        assert!(!cursor.audience_blanked);
    }

    #[test]
    fn test_rejected_jump_clears_blank() {
        let mut nav = five_slides();
        nav.toggle_blank();
        assert!(nav.jump_to(42).is_err());
        assert!(!nav.is_blanked());
    }

    #[test]
    fn test_single_slide_mapping() {
        let mut nav = NavigationState::new(&build_mapping(2, None).unwrap());
        assert_eq!(nav.next().current_slide, 0);
        assert_eq!(nav.last().current_slide, 0);
        assert!(nav.jump_to(1).is_ok());
    }
}
