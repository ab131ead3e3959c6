use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::deck::Deck;
use crate::slides::{SlideGroup, SlideMapping};

pub fn run(pdf: &Path, pages: Option<&Path>) -> Result<()> {
    let deck = Deck::open(pdf, pages)?;
    print_mapping(&deck.source.file_name(), &deck.mapping);
    Ok(())
}

fn print_mapping(file_name: &str, mapping: &SlideMapping) {
    println!(
        "{}: {} pages, {} slides",
        file_name.bold(),
        mapping.page_count(),
        mapping.len()
    );
    println!();
    for (i, group) in mapping.groups().iter().enumerate() {
        println!("  {}", slide_line(i, group));
    }

    let unreachable = mapping.unreachable_pages();
    if !unreachable.is_empty() {
        println!();
        println!(
            "{} {} come before the first audience page and are never shown",
            "warning:".yellow().bold(),
            page_span(&unreachable.collect::<Vec<_>>())
        );
    }
}

/// `Slide 2   audience p4    notes p5-p6`
fn slide_line(index: usize, group: &SlideGroup) -> String {
    let notes = if group.note_pages.is_empty() {
        "-".to_string()
    } else {
        page_span(&group.note_pages)
    };
    format!(
        "Slide {:<4} audience p{:<5} notes {}",
        index + 1,
        group.audience_page + 1,
        notes
    )
}

/// 1-indexed label for a run of consecutive 0-indexed pages.
fn page_span(pages: &[usize]) -> String {
    match pages {
        [] => String::new(),
        [only] => format!("p{}", only + 1),
        [first, .., last] => format!("p{}-p{}", first + 1, last + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::build_mapping;

    #[test]
    fn test_page_span() {
        assert_eq!(page_span(&[]), "");
        assert_eq!(page_span(&[4]), "p5");
        assert_eq!(page_span(&[1, 2, 3]), "p2-p4");
    }

    #[test]
    fn test_slide_line() {
        let mapping = build_mapping(6, Some(&[1, 4])).unwrap();
        let lines: Vec<String> = mapping
            .groups()
            .iter()
            .enumerate()
            .map(|(i, g)| slide_line(i, g))
            .collect();
        assert_eq!(lines[0], "Slide 1    audience p1     notes p2-p3");
        assert_eq!(lines[1], "Slide 2    audience p4     notes p5-p6");
    }

    #[test]
    fn test_slide_line_without_notes() {
        let mapping = build_mapping(3, None).unwrap();
        let line = slide_line(1, &mapping.groups()[1]);
        assert!(line.ends_with("notes -"), "{line}");
    }
}
