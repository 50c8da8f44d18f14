//! A single result card.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::search::Hit;

/// Inner width of a card, in columns.
pub const CARD_WIDTH: usize = 30;
/// Lines a card occupies including its border.
pub const CARD_HEIGHT: usize = 5;
/// Marker for truncated text.
pub const ELLIPSIS: &str = "…";

/// Styles for cards.
#[derive(Debug, Clone)]
pub struct CardStyles {
    /// A card that is not selected.
    pub normal: Style,
    /// The selected card.
    pub selected: Style,
    /// Counter labels ("Likes", "Views", …).
    pub label: Style,
    /// Counter values.
    pub value: Style,
}

impl Default for CardStyles {
    fn default() -> Self {
        let frame = Style::new()
            .border_style(lipgloss::normal_border())
            .border_top(true)
            .border_bottom(true)
            .border_left(true)
            .border_right(true)
            .width(CARD_WIDTH as i32);
        Self {
            normal: frame.clone(),
            selected: frame.foreground(Color::from("#FF6E00")).bold(true),
            label: Style::new().foreground(Color::from("#3F51B5")),
            value: Style::new().foreground(Color::from("#FF6E00")),
        }
    }
}

/// Cuts `s` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    let limit = width.saturating_sub(ELLIPSIS.width());
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Renders the inner lines of a card: tags, then two rows of counters.
pub fn card_lines(hit: &Hit, styles: &CardStyles) -> Vec<String> {
    let counter = |label: &str, value: u64| {
        format!(
            "{} {}",
            styles.label.render(label),
            styles.value.render(&value.to_string())
        )
    };
    vec![
        truncate(&hit.tags, CARD_WIDTH),
        format!("{}  {}", counter("Likes", hit.likes), counter("Views", hit.views)),
        format!(
            "{}  {}",
            counter("Comments", hit.comments),
            counter("Downloads", hit.downloads)
        ),
    ]
}

/// Renders a framed card.
pub fn render_card(hit: &Hit, selected: bool, styles: &CardStyles) -> String {
    let frame = if selected { &styles.selected } else { &styles.normal };
    frame.render(&card_lines(hit, styles).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> Hit {
        Hit {
            id: 1,
            webformat_url: "https://cdn.example/small.jpg".to_string(),
            large_image_url: "https://cdn.example/large.jpg".to_string(),
            tags: "tulips, flowers, spring".to_string(),
            likes: 12,
            views: 3400,
            comments: 3,
            downloads: 900,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long tag list", 8), "a very …");
        assert_eq!(truncate("a very long tag list", 8).width(), 8);
    }

    #[test]
    fn test_card_lines_show_counters() {
        let lines: Vec<String> = card_lines(&hit(), &CardStyles::default())
            .iter()
            .map(|l| lipgloss::strip_ansi(l))
            .collect();
        assert_eq!(lines[0], "tulips, flowers, spring");
        assert_eq!(lines[1], "Likes 12  Views 3400");
        assert_eq!(lines[2], "Comments 3  Downloads 900");
    }

    #[test]
    fn test_rendered_card_contains_tags() {
        let card = lipgloss::strip_ansi(&render_card(&hit(), true, &CardStyles::default()));
        assert!(card.contains("tulips"));
        assert!(card.contains("Downloads 900"));
    }
}
