//! The result gallery: a grid of cards with a lightbox viewer.
//!
//! The grid lays cards out in as many columns as the width allows and
//! scrolls by rows to keep the selected card visible. Enter opens the
//! selected hit in the [`Lightbox`].
//!
//! ```rust
//! use bubbletea_gallery::gallery::Model;
//! use bubbletea_gallery::search::Hit;
//!
//! let mut gallery = Model::new(80, 20);
//! gallery.set_hits(Vec::<Hit>::new());
//! assert!(gallery.is_empty());
//! ```

pub mod card;
pub mod lightbox;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use lipgloss_extras::lipgloss;

use crate::key::{self, KeyMap};
use crate::search::Hit;
use crate::Component;

pub use card::{render_card, truncate, CardStyles, CARD_HEIGHT, CARD_WIDTH};
pub use lightbox::{CaptionMsg, Lightbox, CAPTION_DELAY};

/// Columns between cards.
const GAP: usize = 1;
/// Border columns around a card.
const FRAME: usize = 2;

/// Key bindings for the grid and the lightbox.
#[derive(Debug, Clone)]
pub struct GalleryKeyMap {
    /// Select the card above.
    pub up: key::Binding,
    /// Select the card below.
    pub down: key::Binding,
    /// Select the card to the left.
    pub left: key::Binding,
    /// Select the card to the right.
    pub right: key::Binding,
    /// Open the lightbox.
    pub open: key::Binding,
    /// Close the lightbox.
    pub close: key::Binding,
    /// Previous image in the lightbox.
    pub prev_image: key::Binding,
    /// Next image in the lightbox.
    pub next_image: key::Binding,
}

impl Default for GalleryKeyMap {
    fn default() -> Self {
        Self {
            up: key::new_binding(vec![key::with_keys_str(&["up", "k"]), key::with_help("↑/k", "up")]),
            down: key::new_binding(vec![
                key::with_keys_str(&["down", "j"]),
                key::with_help("↓/j", "down"),
            ]),
            left: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←/h", "left"),
            ]),
            right: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→/l", "right"),
            ]),
            open: key::new_binding(vec![
                key::with_keys_str(&["enter", "space"]),
                key::with_help("enter", "view"),
            ]),
            close: key::new_binding(vec![
                key::with_keys_str(&["esc", "q"]),
                key::with_help("esc", "close"),
            ]),
            prev_image: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←", "prev image"),
            ]),
            next_image: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→", "next image"),
            ]),
        }
    }
}

impl KeyMap for GalleryKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.left, &self.right, &self.open]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.left, &self.right, &self.open],
            vec![&self.prev_image, &self.next_image, &self.close],
        ]
    }
}

/// The gallery grid.
#[derive(Debug, Clone)]
pub struct Model {
    hits: Vec<Hit>,
    selected: usize,
    offset: usize,
    width: usize,
    height: usize,
    focused: bool,
    /// Full-size viewer.
    pub lightbox: Lightbox,
    /// Key bindings.
    pub keymap: GalleryKeyMap,
    /// Card styles.
    pub styles: CardStyles,
}

impl Model {
    /// Creates an empty gallery of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            hits: Vec::new(),
            selected: 0,
            offset: 0,
            width,
            height,
            focused: false,
            lightbox: Lightbox::new(),
            keymap: GalleryKeyMap::default(),
            styles: CardStyles::default(),
        }
    }

    /// Replaces the shown hits.
    ///
    /// The first hit is selected, unless the lightbox stays open on an index
    /// that still exists; then that hit is.
    pub fn set_hits(&mut self, hits: Vec<Hit>) {
        self.hits = hits;
        self.offset = 0;
        self.lightbox.refresh(self.hits.len());
        self.selected = self.lightbox.index().unwrap_or(0);
        self.scroll_to_selection();
    }

    /// Removes every hit.
    pub fn clear(&mut self) {
        self.set_hits(Vec::new());
    }

    /// Resizes the grid.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.scroll_to_selection();
    }

    /// The shown hits.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// True when there are no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Index of the selected hit.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected hit.
    pub fn selected_hit(&self) -> Option<&Hit> {
        self.hits.get(self.selected)
    }

    /// Cards per row for the current width.
    pub fn columns(&self) -> usize {
        (self.width / (CARD_WIDTH + FRAME + GAP)).max(1)
    }

    fn visible_rows(&self) -> usize {
        (self.height / CARD_HEIGHT).max(1)
    }

    fn select(&mut self, index: usize) {
        if index < self.hits.len() {
            self.selected = index;
            self.scroll_to_selection();
        }
    }

    fn scroll_to_selection(&mut self) {
        let row = self.selected / self.columns();
        let rows = self.visible_rows();
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + rows {
            self.offset = row + 1 - rows;
        }
    }

    /// Handles navigation keys, lightbox keys and [`CaptionMsg`].
    ///
    /// Captions are processed even while blurred.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        self.lightbox.update(msg);
        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        let len = self.hits.len();

        if self.lightbox.is_open() {
            if self.keymap.close.matches(key_msg) {
                self.lightbox.close();
            } else if self.keymap.next_image.matches(key_msg) {
                let cmd = self.lightbox.next(len);
                if let Some(i) = self.lightbox.index() {
                    self.select(i);
                }
                return cmd;
            } else if self.keymap.prev_image.matches(key_msg) {
                let cmd = self.lightbox.prev(len);
                if let Some(i) = self.lightbox.index() {
                    self.select(i);
                }
                return cmd;
            }
            return None;
        }

        let cols = self.columns();
        if self.keymap.open.matches(key_msg) {
            return self.lightbox.open(self.selected, len);
        } else if self.keymap.up.matches(key_msg) {
            if let Some(i) = self.selected.checked_sub(cols) {
                self.select(i);
            }
        } else if self.keymap.down.matches(key_msg) {
            self.select(self.selected + cols);
        } else if self.keymap.left.matches(key_msg) {
            if self.selected % cols > 0 {
                self.select(self.selected - 1);
            }
        } else if self.keymap.right.matches(key_msg) && (self.selected + 1) % cols != 0 {
            self.select(self.selected + 1);
        }
        None
    }

    /// Renders the lightbox when open, otherwise the visible rows of cards.
    pub fn view(&self) -> String {
        if let Some(i) = self.lightbox.index() {
            if let Some(hit) = self.hits.get(i) {
                return self.lightbox.view(hit, self.hits.len());
            }
        }
        if self.hits.is_empty() {
            return String::new();
        }

        let cols = self.columns();
        let gap = " ".repeat(GAP);
        self.hits
            .chunks(cols)
            .enumerate()
            .skip(self.offset)
            .take(self.visible_rows())
            .map(|(row, hits)| {
                let cards: Vec<String> = hits
                    .iter()
                    .enumerate()
                    .map(|(col, hit)| {
                        let selected = self.focused && row * cols + col == self.selected;
                        render_card(hit, selected, &self.styles)
                    })
                    .collect();
                let mut parts: Vec<&str> = Vec::new();
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        parts.push(gap.as_str());
                    }
                    parts.push(card.as_str());
                }
                lipgloss::join_horizontal(lipgloss::TOP, &parts)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn hits(n: u64) -> Vec<Hit> {
        (1..=n)
            .map(|id| Hit {
                id,
                webformat_url: format!("https://cdn.example/{id}_640.jpg"),
                large_image_url: format!("https://cdn.example/{id}_1280.jpg"),
                tags: format!("tag{id}"),
                likes: id,
                views: id * 10,
                comments: 0,
                downloads: id * 2,
            })
            .collect()
    }

    fn focused_gallery(width: usize, n: u64) -> Model {
        let mut gallery = Model::new(width, 40);
        gallery.set_hits(hits(n));
        gallery.focus();
        gallery
    }

    #[test]
    fn test_columns_from_width() {
        assert_eq!(Model::new(10, 10).columns(), 1);
        assert_eq!(Model::new(66, 10).columns(), 2);
        assert_eq!(Model::new(100, 10).columns(), 3);
    }

    #[test]
    fn test_grid_navigation() {
        let mut gallery = focused_gallery(100, 7);
        assert_eq!(gallery.columns(), 3);

        gallery.update(&key(KeyCode::Right));
        gallery.update(&key(KeyCode::Right));
        assert_eq!(gallery.selected(), 2);
        // Already in the last column.
        gallery.update(&key(KeyCode::Right));
        assert_eq!(gallery.selected(), 2);

        gallery.update(&key(KeyCode::Down));
        assert_eq!(gallery.selected(), 5);
        // Nothing below index 5 in a 7-item, 3-column grid.
        gallery.update(&key(KeyCode::Down));
        assert_eq!(gallery.selected(), 5);

        gallery.update(&key(KeyCode::Up));
        gallery.update(&key(KeyCode::Left));
        assert_eq!(gallery.selected(), 1);
    }

    #[test]
    fn test_lightbox_follows_selection() {
        let mut gallery = focused_gallery(100, 3);
        assert!(gallery.update(&key(KeyCode::Enter)).is_some());
        assert!(gallery.lightbox.is_open());

        gallery.update(&key(KeyCode::Left));
        assert_eq!(gallery.lightbox.index(), Some(2));
        assert_eq!(gallery.selected(), 2);

        let view = lipgloss::strip_ansi(&gallery.view());
        assert!(view.contains("Image 3 of 3"));
        assert!(view.contains("3_1280.jpg"));

        gallery.update(&key(KeyCode::Esc));
        assert!(!gallery.lightbox.is_open());
    }

    #[test]
    fn test_new_hits_reset_selection_and_lightbox() {
        let mut gallery = focused_gallery(100, 5);
        gallery.update(&key(KeyCode::Down));
        gallery.update(&key(KeyCode::Enter));
        assert!(gallery.lightbox.is_open());

        gallery.set_hits(hits(2));
        assert_eq!(gallery.selected(), 0);
        assert!(!gallery.lightbox.is_open());
    }

    #[test]
    fn test_open_lightbox_keeps_selection_in_step() {
        let mut gallery = focused_gallery(100, 5);
        gallery.update(&key(KeyCode::Right));
        gallery.update(&key(KeyCode::Enter));
        assert_eq!(gallery.lightbox.index(), Some(1));

        gallery.set_hits(hits(4));
        assert_eq!(gallery.lightbox.index(), Some(1));
        assert_eq!(gallery.selected(), 1);
        assert_eq!(gallery.selected_hit().map(|h| h.id), Some(2));

        gallery.update(&key(KeyCode::Esc));
        assert_eq!(gallery.selected(), 1);
    }

    #[test]
    fn test_view_renders_cards() {
        let gallery = focused_gallery(100, 2);
        let view = lipgloss::strip_ansi(&gallery.view());
        assert!(view.contains("tag1"));
        assert!(view.contains("tag2"));
        assert!(view.contains("Likes"));
    }
}
