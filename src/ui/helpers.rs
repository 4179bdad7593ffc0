//! Shared text utilities for card rendering.
//!
//! - **HTML stripping**: course summaries arrive as HTML fragments
//! - **Preview truncation**: character-based, UTF-8 safe
//! - **Match highlighting**: character ranges of the search term inside a title

use crate::app::model::fold_char;

/// ANSI sequence enabling bold text.
const BOLD: &str = "\u{1b}[1m";

/// ANSI sequence resetting all attributes.
const RESET: &str = "\u{1b}[0m";

/// Removes everything between `<` and `>`, inclusive.
///
/// # Example
///
/// ```rust
/// use edu_listing::ui::helpers::strip_html;
///
/// assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
#[must_use]
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Keeps the first `max_chars` characters of `text` and appends `"..."`.
///
/// The ellipsis is always appended, matching how card previews read in the
/// catalogue.
#[must_use]
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

/// Character ranges `(start, end)` of every non-overlapping, case-insensitive
/// occurrence of the trimmed `needle` in `text`.
///
/// # Example
///
/// ```rust
/// use edu_listing::ui::helpers::highlight_ranges;
///
/// assert_eq!(highlight_ranges("Jeddah Excellence School", " SCHOOL "), vec![(18, 24)]);
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.trim().chars().map(fold_char).collect();
    if needle.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.chars().map(fold_char).collect();
    let mut ranges = Vec::new();
    let mut start = 0;

    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }

    ranges
}

/// Renders `text` with the given character ranges in bold.
///
/// With `ansi` disabled the ranges are wrapped in square brackets instead, which
/// keeps plain-text output readable.
#[must_use]
pub fn render_highlighted(text: &str, ranges: &[(usize, usize)], ansi: bool) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let (open, close) = if ansi { (BOLD, RESET) } else { ("[", "]") };
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut ranges = ranges.iter().peekable();

    for (idx, c) in text.chars().enumerate() {
        if ranges.peek().is_some_and(|(start, _)| *start == idx) {
            out.push_str(open);
        }
        out.push(c);
        if let Some(&&(_, end)) = ranges.peek() {
            if idx + 1 == end {
                out.push_str(close);
                ranges.next();
            }
        }
    }

    out
}
