use instant::Instant;
use std::time::Duration;

/// Informational overlay bound to a single marker
#[derive(Debug, Clone)]
pub struct Popup {
    pub content: Option<String>,
    visible: bool,
    opened_at: Option<Instant>,
    open_count: u32,
}

impl Popup {
    pub fn new() -> Self {
        Self {
            content: None,
            visible: false,
            opened_at: None,
            open_count: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.opened_at = Some(Instant::now());
        self.open_count += 1;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.opened_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// How long the popup has been showing, if it is
    pub fn open_for(&self) -> Option<Duration> {
        self.opened_at.map(|at| at.elapsed())
    }

    /// Number of times the popup was shown
    pub fn open_count(&self) -> u32 {
        self.open_count
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}
