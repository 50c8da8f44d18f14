//! Full-size viewer over the gallery's hits.
//!
//! The lightbox shows one hit at a time. Its caption (the hit's tags) appears
//! after a short delay each time the shown image changes; a stale
//! [`CaptionMsg`] from an earlier image is ignored.

use std::time::Duration;

use bubbletea_rs::{Cmd, Msg};
use lipgloss_extras::prelude::*;

use crate::search::Hit;

/// Delay before the caption is shown.
pub const CAPTION_DELAY: Duration = Duration::from_millis(250);

/// Reveals the caption for the image shown under `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionMsg {
    /// Matches [`Lightbox`]'s tag at the time the image was shown.
    pub tag: u64,
}

/// Lightbox state.
#[derive(Debug, Clone)]
pub struct Lightbox {
    index: Option<usize>,
    caption_visible: bool,
    tag: u64,
    /// Delay before the caption appears.
    pub caption_delay: Duration,
    /// Style for the title line.
    pub title_style: Style,
    /// Style for the caption.
    pub caption_style: Style,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self {
            index: None,
            caption_visible: false,
            tag: 0,
            caption_delay: CAPTION_DELAY,
            title_style: Style::new().bold(true),
            caption_style: Style::new()
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#333333"))
                .padding(0, 1, 0, 1),
        }
    }
}

impl Lightbox {
    /// Creates a closed lightbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image is shown.
    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Index of the shown hit.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether the caption has appeared.
    pub fn caption_visible(&self) -> bool {
        self.caption_visible
    }

    /// Shows hit `index` of `len`. Out-of-range indexes are ignored.
    pub fn open(&mut self, index: usize, len: usize) -> Option<Cmd> {
        if index >= len {
            return None;
        }
        Some(self.show(index))
    }

    /// Closes the lightbox.
    pub fn close(&mut self) {
        self.index = None;
        self.caption_visible = false;
    }

    /// Shows the next hit, wrapping to the first.
    pub fn next(&mut self, len: usize) -> Option<Cmd> {
        let i = self.index?;
        if len == 0 {
            return None;
        }
        Some(self.show((i + 1) % len))
    }

    /// Shows the previous hit, wrapping to the last.
    pub fn prev(&mut self, len: usize) -> Option<Cmd> {
        let i = self.index?;
        if len == 0 {
            return None;
        }
        Some(self.show((i + len - 1) % len))
    }

    /// Re-checks the shown index after the hit list changed.
    pub fn refresh(&mut self, len: usize) {
        if matches!(self.index, Some(i) if i >= len) {
            self.close();
        }
    }

    /// Handles [`CaptionMsg`].
    pub fn update(&mut self, msg: &Msg) {
        if let Some(caption) = msg.downcast_ref::<CaptionMsg>() {
            if self.is_open() && caption.tag == self.tag {
                self.caption_visible = true;
            }
        }
    }

    /// Renders the shown hit out of `len`.
    pub fn view(&self, hit: &Hit, len: usize) -> String {
        let Some(i) = self.index else {
            return String::new();
        };
        let mut lines = vec![
            self.title_style.render(&format!("Image {} of {}", i + 1, len)),
            String::new(),
            hit.large_image_url.clone(),
            format!("preview: {}", hit.webformat_url),
            format!(
                "♥ {}  views {}  comments {}  downloads {}",
                hit.likes, hit.views, hit.comments, hit.downloads
            ),
            String::new(),
        ];
        if self.caption_visible {
            lines.push(self.caption_style.render(&hit.tags));
        }
        lines.join("\n")
    }

    fn show(&mut self, index: usize) -> Cmd {
        self.index = Some(index);
        self.caption_visible = false;
        self.tag += 1;
        let tag = self.tag;
        bubbletea_rs::tick(self.caption_delay, move |_| Box::new(CaptionMsg { tag }) as Msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption(tag: u64) -> Msg {
        Box::new(CaptionMsg { tag }) as Msg
    }

    #[test]
    fn test_open_and_wrap() {
        let mut lb = Lightbox::new();
        assert!(lb.open(5, 3).is_none());
        assert!(!lb.is_open());

        assert!(lb.open(2, 3).is_some());
        assert!(lb.next(3).is_some());
        assert_eq!(lb.index(), Some(0));
        assert!(lb.prev(3).is_some());
        assert_eq!(lb.index(), Some(2));

        lb.close();
        assert!(lb.next(3).is_none());
    }

    #[test]
    fn test_caption_waits_for_current_tag() {
        let mut lb = Lightbox::new();
        let _ = lb.open(0, 2);
        let _ = lb.next(2);

        lb.update(&caption(1));
        assert!(!lb.caption_visible());

        lb.update(&caption(2));
        assert!(lb.caption_visible());

        let _ = lb.next(2);
        assert!(!lb.caption_visible());
    }

    #[test]
    fn test_refresh_closes_when_item_vanishes() {
        let mut lb = Lightbox::new();
        let _ = lb.open(4, 5);
        lb.refresh(5);
        assert!(lb.is_open());
        lb.refresh(2);
        assert!(!lb.is_open());
    }
}
