//! Buttons owned by the pagination widget.

/// What a control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRole {
    /// Jump to page 1.
    Start,
    /// Go back one page.
    Previous,
    /// Go to the page shown in window slot `n`.
    Page(usize),
    /// Go forward one page.
    Next,
    /// Jump to the last page.
    End,
}

impl ControlRole {
    /// The fixed label for the navigation roles; page controls are labelled
    /// with their page number instead.
    pub fn fixed_label(self) -> Option<&'static str> {
        match self {
            ControlRole::Start => Some("Start"),
            ControlRole::Previous => Some("Previous"),
            ControlRole::Next => Some("Next"),
            ControlRole::End => Some("End"),
            ControlRole::Page(_) => None,
        }
    }

    /// True for numbered page controls.
    pub fn is_page(self) -> bool {
        matches!(self, ControlRole::Page(_))
    }
}

/// A single button in the pagination row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// The control's role.
    pub role: ControlRole,
    /// Text shown on the button.
    pub label: String,
    /// Disabled controls ignore activation.
    pub disabled: bool,
    /// Set on the page control for the current page.
    pub active: bool,
}

impl Control {
    pub(crate) fn new(role: ControlRole) -> Self {
        Self {
            role,
            label: role.fixed_label().unwrap_or_default().to_string(),
            disabled: false,
            active: false,
        }
    }

    /// The page number on a page control.
    pub fn page(&self) -> Option<u32> {
        if self.role.is_page() {
            self.label.parse().ok()
        } else {
            None
        }
    }
}
