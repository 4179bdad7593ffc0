//! Plain-text renderer for listing view states.
//!
//! The renderer only paints: it takes a [`ViewState`], converts the visible
//! records into [`Card`]s and writes them out. Loading, failed and empty states
//! replace the card list with their [`StatusMessage`](super::viewmodel::StatusMessage).
//!
//! ```text
//! ── Schools (1) ─ search "jeddah" ─ updated 09:14 UTC ──
//!
//!   [Jeddah] Excellence School (JES)                 active
//!     Fostering excellence in education
//!     Jeddah, Saudi Arabia · 220 users · 35 courses
//! ```

use crate::ui::helpers::render_highlighted;
use crate::ui::viewmodel::{Card, IntoCard, ViewState};
use std::io::{self, Write};

/// Writes view states as text cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    /// Line width used for the header rule and badge alignment.
    pub width: usize,
    /// Emit ANSI bold for highlights instead of brackets.
    pub ansi: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { width: 72, ansi: false }
    }
}

impl TextRenderer {
    #[must_use]
    pub const fn new(width: usize, ansi: bool) -> Self {
        Self { width, ansi }
    }

    /// Renders `view` into `out`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn render<T: IntoCard>(&self, view: &ViewState<T>, out: &mut impl Write) -> io::Result<()> {
        self.render_header(view, out)?;
        writeln!(out)?;

        if let Some(status) = view.status_message() {
            writeln!(out, "  {}", status.message)?;
            if !status.subtitle.is_empty() {
                writeln!(out, "  {}", status.subtitle)?;
            }
            return Ok(());
        }

        let search_term = view.criteria.search_term.as_str();
        for item in &view.visible_items {
            self.render_card(&item.to_card(search_term), out)?;
        }
        Ok(())
    }

    /// Renders `view` into a `String`.
    #[must_use]
    pub fn render_to_string<T: IntoCard>(&self, view: &ViewState<T>) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(view, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn render_header<T>(&self, view: &ViewState<T>, out: &mut impl Write) -> io::Result<()> {
        let mut header = format!("── {} ", view.title());
        let search = view.criteria.search_term.trim();
        if !search.is_empty() {
            header.push_str(&format!("─ search \"{search}\" "));
        }
        if let Some(loaded_at) = view.loaded_at {
            header.push_str(&format!("─ updated {} ", loaded_at.format("%H:%M UTC")));
        }
        let used = header.chars().count();
        header.push_str(&"─".repeat(self.width.saturating_sub(used)));
        writeln!(out, "{header}")
    }

    fn render_card(&self, card: &Card, out: &mut impl Write) -> io::Result<()> {
        let mut title = render_highlighted(&card.title, &card.highlight_ranges, self.ansi);
        if let Some(subtitle) = &card.subtitle {
            title.push_str(&format!(" ({subtitle})"));
        }

        // Pad on visible characters so escape codes do not skew alignment.
        let visible = card.title.chars().count()
            + card.subtitle.as_ref().map_or(0, |s| s.chars().count() + 3)
            + if self.ansi { 0 } else { card.highlight_ranges.len() * 2 };
        let padding = self
            .width
            .saturating_sub(visible + card.badge.chars().count() + 2)
            .max(1);

        writeln!(out, "  {title}{}{}", " ".repeat(padding), card.badge)?;
        if let Some(body) = &card.body {
            writeln!(out, "    {body}")?;
        }
        if !card.details.is_empty() {
            writeln!(out, "    {}", card.details.join(" · "))?;
        }
        writeln!(out)
    }
}
