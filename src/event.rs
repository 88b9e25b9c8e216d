use crossterm::event::{KeyEvent, MouseEvent};

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal mouse event
    Mouse(MouseEvent),
    /// Terminal resize event (the next draw picks up the new size)
    Resize(u16, u16),
    /// Tick event for periodic updates (spinner animation)
    Tick,
    /// Request to quit the application
    #[allow(dead_code)]
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
