//! A help line generated from key bindings.
//!
//! Short mode renders bindings on one line separated by bullets and truncates
//! with an ellipsis when a width is set. Full mode renders one column per
//! binding group.
//!
//! ```rust
//! use bubbletea_gallery::help::Model;
//! use bubbletea_gallery::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
//! let search = Binding::new(vec![KeyCode::Enter]).with_help("enter", "search");
//!
//! let help = Model::new();
//! let line = help.short_help_view(vec![&search, &quit]);
//! assert!(lipgloss_extras::lipgloss::strip_ansi(&line).contains("enter search"));
//! ```

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::lipgloss::AdaptiveColor;
use lipgloss_extras::prelude::*;

/// Styles for the help line.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Key labels.
    pub key: Style,
    /// Binding descriptions.
    pub desc: Style,
    /// Separators and the ellipsis.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// Renders key help.
#[derive(Debug, Clone)]
pub struct Model {
    /// Render all groups as columns instead of one line.
    pub show_all: bool,
    /// Maximum width; 0 means unlimited.
    pub width: usize,
    /// Separator between short-help items.
    pub short_separator: String,
    /// Separator between full-help columns.
    pub full_separator: String,
    /// Marker for truncated output.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders short or full help depending on `show_all`.
    pub fn view<K: KeyMap + ?Sized>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// One line of `key desc` items. Disabled bindings are skipped.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styles.separator.render(&self.short_separator);
        let mut out = String::new();
        let mut total_width = 0;

        for binding in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = binding.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.key.render(&help.key),
                self.styles.desc.render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if self.width > 0 && total_width + item_width > self.width {
                let tail = format!(" {}", self.styles.separator.render(&self.ellipsis));
                if total_width + lipgloss::width_visible(&tail) < self.width {
                    out.push_str(&tail);
                }
                break;
            }
            total_width += item_width;
            out.push_str(&item);
        }
        out
    }

    /// One column per group, joined side by side.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let columns: Vec<String> = groups
            .iter()
            .filter_map(|group| {
                let rows: Vec<String> = group
                    .iter()
                    .filter(|b| b.enabled())
                    .map(|b| {
                        let help = b.help();
                        format!(
                            "{} {}",
                            self.styles.key.render(&help.key),
                            self.styles.desc.render(&help.desc)
                        )
                    })
                    .collect();
                (!rows.is_empty()).then(|| rows.join("\n"))
            })
            .collect();

        let mut parts: Vec<&str> = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(self.full_separator.as_str());
            }
            parts.push(col.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn bindings() -> (key::Binding, key::Binding, key::Binding) {
        (
            key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "search"),
            key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next pane"),
            key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "back"),
        )
    }

    #[test]
    fn test_short_help_joins_with_bullets() {
        let (a, b, _) = bindings();
        let out = lipgloss::strip_ansi(&Model::new().short_help_view(vec![&a, &b]));
        assert_eq!(out, "enter search • tab next pane");
    }

    #[test]
    fn test_short_help_skips_disabled() {
        let (a, mut b, c) = bindings();
        b.set_enabled(false);
        let out = lipgloss::strip_ansi(&Model::new().short_help_view(vec![&a, &b, &c]));
        assert_eq!(out, "enter search • esc back");
    }

    #[test]
    fn test_short_help_truncates() {
        let (a, b, c) = bindings();
        let out = lipgloss::strip_ansi(&Model::new().with_width(20).short_help_view(vec![&a, &b, &c]));
        assert!(out.starts_with("enter search"));
        assert!(out.ends_with('…'));
        assert!(!out.contains("next pane"));
    }

    #[test]
    fn test_full_help_has_every_binding() {
        let (a, b, c) = bindings();
        let out = lipgloss::strip_ansi(&Model::new().full_help_view(vec![vec![&a, &b], vec![&c]]));
        assert!(out.contains("enter search"));
        assert!(out.contains("tab next pane"));
        assert!(out.contains("esc back"));
    }
}
