//! Key bindings for the pagination widget.

use crate::key::{self, KeyMap};

/// Key bindings for moving between and activating pagination buttons.
///
/// ```rust
/// use bubbletea_gallery::pagination::PaginationKeyMap;
/// use bubbletea_gallery::key::KeyMap;
///
/// let keymap = PaginationKeyMap::default();
/// assert_eq!(keymap.short_help().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PaginationKeyMap {
    /// Move focus to the previous enabled button.
    pub focus_prev: key::Binding,
    /// Move focus to the next enabled button.
    pub focus_next: key::Binding,
    /// Activate the focused button.
    pub activate: key::Binding,
    /// Shortcut for the Previous button.
    pub prev_page: key::Binding,
    /// Shortcut for the Next button.
    pub next_page: key::Binding,
    /// Shortcut for the Start button.
    pub first_page: key::Binding,
    /// Shortcut for the End button.
    pub last_page: key::Binding,
}

impl Default for PaginationKeyMap {
    fn default() -> Self {
        Self {
            focus_prev: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←/h", "prev button"),
            ]),
            focus_next: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→/l", "next button"),
            ]),
            activate: key::new_binding(vec![
                key::with_keys_str(&["enter", "space"]),
                key::with_help("enter", "go to page"),
            ]),
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup"]),
                key::with_help("pgup", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown"]),
                key::with_help("pgdn", "next page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home", "g"]),
                key::with_help("g/home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end", "G"]),
                key::with_help("G/end", "last page"),
            ]),
        }
    }
}

impl KeyMap for PaginationKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.focus_prev, &self.focus_next, &self.activate, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.focus_prev, &self.focus_next, &self.activate],
            vec![&self.prev_page, &self.next_page, &self.first_page, &self.last_page],
        ]
    }
}
