use std::path::Path;

use crate::error::ConfigError;

/// Audience page numbers read from a page-list file, 1-indexed as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList {
    /// Sorted ascending, no duplicates. Not yet checked against a page count.
    pub pages: Vec<i64>,
    /// Tokens that were not integers and were skipped.
    pub skipped: Vec<String>,
}

/// Parse a comma-separated list such as `1, 4, 8`.
///
/// Whitespace around tokens and empty tokens are ignored. Tokens that are not
/// integers are collected in `skipped` rather than failing the parse, so a
/// stray character in a hand-edited file only costs that one entry. Range
/// checks happen later, once the page count is known.
pub fn parse(text: &str) -> PageList {
    let mut pages = Vec::new();
    let mut skipped = Vec::new();

    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<i64>() {
            Ok(n) => pages.push(n),
            Err(_) => skipped.push(token.to_string()),
        }
    }

    pages.sort_unstable();
    pages.dedup();

    PageList { pages, skipped }
}

/// Read and parse a page-list file.
pub fn load(path: &Path) -> Result<PageList, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let list = parse(&text);
    for token in &list.skipped {
        tracing::warn!(path = %path.display(), token, "skipping non-numeric page number");
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_list() {
        let list = parse("1,4,8");
        assert_eq!(list.pages, vec![1, 4, 8]);
        assert!(list.skipped.is_empty());
    }

    #[test]
    fn test_whitespace_around_tokens() {
        let list = parse("  1 ,  4,8 \n");
        assert_eq!(list.pages, vec![1, 4, 8]);
    }

    #[test]
    fn test_empty_tokens_ignored() {
        let list = parse("1,,4, ,8,");
        assert_eq!(list.pages, vec![1, 4, 8]);
        assert!(list.skipped.is_empty());
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        assert_eq!(parse("4,1,4,8"), parse("1,4,8"));
    }

    #[test]
    fn test_non_numeric_tokens_skipped() {
        let list = parse("1, two, 4, 8x");
        assert_eq!(list.pages, vec![1, 4]);
        assert_eq!(list.skipped, vec!["two".to_string(), "8x".to_string()]);
    }

    #[test]
    fn test_negative_numbers_kept_for_validation() {
        let list = parse("-2, 3");
        assert_eq!(list.pages, vec![-2, 3]);
    }

    #[test]
    fn test_empty_text() {
        let list = parse("   ");
        assert!(list.pages.is_empty());
        assert!(list.skipped.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1, 4, 8").unwrap();
        let list = load(file.path()).unwrap();
        assert_eq!(list.pages, vec![1, 4, 8]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }
}
