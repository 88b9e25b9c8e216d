use crate::search::SearchResult;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use textwrap::wrap;

/// Result list component with selection and scrolling
///
/// Holds only presentation state (which entry is selected, scroll
/// position); the results themselves live in the session and are passed
/// in at render time.
pub struct ResultList {
    selected: usize,
    scroll_offset: u16,
}

impl ResultList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Forget selection and scroll, for when a new result set arrives
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Index of the currently selected entry
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection down
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move the selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Render the result list
    pub fn render(&mut self, frame: &mut Frame, area: Rect, results: &[SearchResult]) {
        if results.is_empty() {
            return;
        }
        if self.selected >= results.len() {
            self.selected = results.len() - 1;
        }

        let snippet_width = (area.width.saturating_sub(6) as usize).max(10);

        let mut lines: Vec<Line> = Vec::new();
        // (first line, one-past-last line) of each entry, for scrolling
        let mut entry_spans: Vec<(usize, usize)> = Vec::new();

        for (idx, result) in results.iter().enumerate() {
            let start = lines.len();
            let is_selected = idx == self.selected;

            let marker = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(result.title.clone(), title_style),
            ]));

            lines.push(Line::from(Span::styled(
                format!("    {}", result.url),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            )));

            if let Some(snippet) = &result.snippet {
                for wrapped in wrap(snippet, snippet_width) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", wrapped),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }

            lines.push(Line::default());
            entry_spans.push((start, lines.len()));
        }

        self.scroll_to_selection(&entry_spans, area.height);

        let paragraph = Paragraph::new(Text::from(lines)).scroll((self.scroll_offset, 0));
        frame.render_widget(paragraph, area);
    }

    /// Keep the selected entry inside the viewport
    fn scroll_to_selection(&mut self, entry_spans: &[(usize, usize)], viewport: u16) {
        let Some(&(start, end)) = entry_spans.get(self.selected) else {
            return;
        };
        let start = start as u16;
        // The trailing blank line may hang off-screen for the last entry.
        let end = (end as u16).saturating_sub(1);

        if start < self.scroll_offset {
            self.scroll_offset = start;
        } else if end > self.scroll_offset + viewport {
            self.scroll_offset = end.saturating_sub(viewport);
        }
    }
}

impl Default for ResultList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut list = ResultList::new();
        list.select_prev();
        assert_eq!(list.selected(), 0);

        list.select_next(3);
        list.select_next(3);
        list.select_next(3);
        assert_eq!(list.selected(), 2);

        list.select_next(0);
        assert_eq!(list.selected(), 2);

        list.reset();
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut list = ResultList::new();
        // Three entries of four lines each.
        let spans = vec![(0, 4), (4, 8), (8, 12)];

        list.selected = 2;
        list.scroll_to_selection(&spans, 5);
        assert!(list.scroll_offset >= 6);

        list.selected = 0;
        list.scroll_to_selection(&spans, 5);
        assert_eq!(list.scroll_offset, 0);
    }
}
