//! Styles for the pagination button row.

use lipgloss_extras::lipgloss::AdaptiveColor;
use lipgloss_extras::prelude::*;

/// Styling for each button state.
#[derive(Debug, Clone)]
pub struct Styles {
    /// An enabled, inactive button.
    pub button: Style,
    /// The button for the current page.
    pub active: Style,
    /// A button that cannot be activated.
    pub disabled: Style,
    /// The button holding keyboard focus.
    pub focused: Style,
    /// Text placed between buttons.
    pub separator: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            button: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1A1A1A",
                    Dark: "#DDDDDD",
                })
                .padding(0, 1, 0, 1),
            active: Style::new()
                .foreground(Color::from("#FFFDF5"))
                .background(Color::from("#3F51B5"))
                .bold(true)
                .padding(0, 1, 0, 1),
            disabled: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B2B2B2",
                    Dark: "#4A4A4A",
                })
                .padding(0, 1, 0, 1),
            focused: Style::new()
                .foreground(Color::from("#FF6E00"))
                .underline(true)
                .padding(0, 1, 0, 1),
            separator: " ".to_string(),
        }
    }
}
