//! Transient user-facing notices.
//!
//! A notice is shown until its timeout elapses. Each notice schedules its own
//! [`DismissMsg`]; newer notices replace older ones on screen, and a dismiss
//! for a notice that is no longer shown is ignored.
//!
//! ```rust
//! use bubbletea_gallery::notify::{Level, Model};
//! use std::time::Duration;
//!
//! let mut notices = Model::new(Duration::from_secs(3));
//! let _dismiss = notices.failure("Something went wrong");
//! assert_eq!(notices.current().unwrap().level, Level::Failure);
//! ```

use std::time::Duration;

use bubbletea_rs::{Cmd, Msg};
use lipgloss_extras::prelude::*;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Something went wrong or nothing was found.
    Failure,
    /// Neutral information.
    Info,
    /// An operation succeeded.
    Success,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Identifies the notice for dismissal.
    pub id: u64,
    /// Severity.
    pub level: Level,
    /// Text shown.
    pub message: String,
}

/// Removes the notice with the given id when it is still shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissMsg {
    /// Notice to remove.
    pub id: u64,
}

/// Notice styles per level.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Failure notices.
    pub failure: Style,
    /// Info notices.
    pub info: Style,
    /// Success notices.
    pub success: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let base = Style::new()
            .foreground(Color::from("#FFFFFF"))
            .padding(0, 1, 0, 1);
        Self {
            failure: base.clone().background(Color::from("#FF5549")),
            info: base.clone().background(Color::from("#26C0D3")),
            success: base.background(Color::from("#32C682")),
        }
    }
}

/// Holds the notice currently on screen.
#[derive(Debug, Clone)]
pub struct Model {
    current: Option<Notice>,
    next_id: u64,
    timeout: Duration,
    /// Styles per level.
    pub styles: Styles,
}

impl Model {
    /// Creates an empty notice area with the given display time.
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: None,
            next_id: 1,
            timeout,
            styles: Styles::default(),
        }
    }

    /// Shows a notice and returns the command that will dismiss it.
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> Cmd {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Notice {
            id,
            level,
            message: message.into(),
        });
        bubbletea_rs::tick(self.timeout, move |_| Box::new(DismissMsg { id }) as Msg)
    }

    /// Shows a failure notice.
    pub fn failure(&mut self, message: impl Into<String>) -> Cmd {
        self.push(Level::Failure, message)
    }

    /// Shows an info notice.
    pub fn info(&mut self, message: impl Into<String>) -> Cmd {
        self.push(Level::Info, message)
    }

    /// Shows a success notice.
    pub fn success(&mut self, message: impl Into<String>) -> Cmd {
        self.push(Level::Success, message)
    }

    /// The notice on screen, if any.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Handles [`DismissMsg`].
    pub fn update(&mut self, msg: &Msg) {
        if let Some(dismiss) = msg.downcast_ref::<DismissMsg>() {
            if self.current.as_ref().map(|n| n.id) == Some(dismiss.id) {
                self.current = None;
            }
        }
    }

    /// Renders the current notice, or an empty string.
    pub fn view(&self) -> String {
        match &self.current {
            Some(notice) => {
                let style = match notice.level {
                    Level::Failure => &self.styles.failure,
                    Level::Info => &self.styles.info,
                    Level::Success => &self.styles.success,
                };
                style.render(&notice.message)
            }
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    fn dismiss(id: u64) -> Msg {
        Box::new(DismissMsg { id }) as Msg
    }

    #[test]
    fn test_newer_notice_replaces_older() {
        let mut model = Model::new(Duration::from_millis(10));
        let _ = model.failure("first");
        let _ = model.info("second");

        let notice = model.current().unwrap();
        assert_eq!(notice.message, "second");
        assert_eq!(notice.level, Level::Info);
        assert_eq!(notice.id, 2);
    }

    #[test]
    fn test_stale_dismiss_is_ignored() {
        let mut model = Model::new(Duration::from_millis(10));
        let _ = model.failure("first");
        let _ = model.success("second");

        model.update(&dismiss(1));
        assert_eq!(model.current().unwrap().message, "second");

        model.update(&dismiss(2));
        assert!(model.current().is_none());
        assert_eq!(model.view(), "");
    }

    #[test]
    fn test_view_shows_message() {
        let mut model = Model::new(Duration::from_millis(10));
        let _ = model.failure("No images found");
        assert!(lipgloss::strip_ansi(&model.view()).contains("No images found"));
    }
}
