use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_textarea::TextArea;

/// Name input wrapper around tui-textarea
///
/// Single-line by contract: Enter never reaches the textarea (the app
/// treats it as submit), so the widget only ever holds one line.
pub struct InputWidget {
    textarea: TextArea<'static>,
}

fn framed_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                " Name (Enter=search │ Esc=clear) ",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    textarea.set_placeholder_text("Type a person's name...");
    textarea.set_cursor_line_style(Style::default());
    textarea
}

impl InputWidget {
    /// Create a new input widget
    pub fn new() -> Self {
        Self {
            textarea: framed_textarea(),
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.textarea.input(key);
    }

    /// Get the current text
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.textarea = framed_textarea();
    }

    /// Render the input widget
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

impl Default for InputWidget {
    fn default() -> Self {
        Self::new()
    }
}
