//! The sliding window of page numbers shown as buttons.

use crate::error::PaginationError;

/// Computes which page numbers are visible for the given position.
///
/// The window is centred on `current` where possible: it starts flush with
/// page 1 while `current` is within the first half, slides forward one page at
/// a time after that, and sits flush against `total` near the end. The result
/// has `min(max_visible, total)` consecutive entries, all within `[1, total]`,
/// and always contains `current`.
///
/// A `total` of zero yields an empty window.
///
/// # Errors
///
/// Returns [`PaginationError::InvalidArgument`] when `max_visible` is zero or
/// `current` is outside `[1, total]`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_gallery::pagination::compute_window;
///
/// assert_eq!(compute_window(100, 10, 1).unwrap(), (1..=10).collect::<Vec<_>>());
/// assert_eq!(compute_window(100, 10, 50).unwrap(), (46..=55).collect::<Vec<_>>());
/// assert_eq!(compute_window(100, 10, 100).unwrap(), (91..=100).collect::<Vec<_>>());
/// // Fewer pages than buttons: the window shrinks to the available pages.
/// assert_eq!(compute_window(5, 10, 1).unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
pub fn compute_window(total: u32, max_visible: u32, current: u32) -> Result<Vec<u32>, PaginationError> {
    if max_visible == 0 {
        return Err(PaginationError::InvalidArgument(
            "max_visible must be at least 1".to_string(),
        ));
    }
    if total == 0 {
        return Ok(Vec::new());
    }
    if current == 0 || current > total {
        return Err(PaginationError::InvalidArgument(format!(
            "page {current} is outside 1..={total}"
        )));
    }

    let (total, max, current) = (i64::from(total), i64::from(max_visible), i64::from(current));
    let half = (max + 1) / 2;

    let mut end = max;
    if current + half >= total {
        end = total;
    } else if current > half {
        end = current + half;
    }
    let raw_start = end - max;

    // Clamp into [1, total], then slide so that `current` stays visible.
    let len = max.min(total);
    let start = raw_start
        .clamp(0, total - len)
        .clamp(current - len, current - 1);

    // All values are within 1..=total, which came from a u32.
    Ok((start + 1..=start + len).map(|p| p as u32).collect())
}

/// Half of the window, rounded up. Pages past this point slide the window.
pub fn half_window(max_visible: u32) -> u32 {
    max_visible.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: u32, to: u32) -> Vec<u32> {
        (from..=to).collect()
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(compute_window(100, 10, 1).unwrap(), range(1, 10));
        assert_eq!(compute_window(100, 10, 5).unwrap(), range(1, 10));
    }

    #[test]
    fn test_window_slides_past_half() {
        assert_eq!(compute_window(100, 10, 6).unwrap(), range(2, 11));
        assert_eq!(compute_window(100, 10, 50).unwrap(), range(46, 55));
    }

    #[test]
    fn test_window_flush_at_end() {
        assert_eq!(compute_window(100, 10, 100).unwrap(), range(91, 100));
        assert_eq!(compute_window(100, 10, 95).unwrap(), range(91, 100));
        assert_eq!(compute_window(100, 10, 94).unwrap(), range(90, 99));
    }

    #[test]
    fn test_odd_window_rounds_half_up() {
        assert_eq!(half_window(7), 4);
        assert_eq!(half_window(10), 5);
        assert_eq!(half_window(1), 1);
        assert_eq!(compute_window(100, 7, 50).unwrap(), range(48, 54));
    }

    #[test]
    fn test_fewer_pages_than_buttons_is_clamped() {
        assert_eq!(compute_window(5, 10, 1).unwrap(), range(1, 5));
        assert_eq!(compute_window(5, 10, 5).unwrap(), range(1, 5));
        assert_eq!(compute_window(9, 10, 2).unwrap(), range(1, 9));
        assert_eq!(compute_window(3, 10, 1).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_button_window_follows_current() {
        assert_eq!(compute_window(5, 1, 1).unwrap(), vec![1]);
        assert_eq!(compute_window(5, 1, 2).unwrap(), vec![2]);
        assert_eq!(compute_window(5, 1, 5).unwrap(), vec![5]);
    }

    #[test]
    fn test_zero_total_is_empty() {
        assert!(compute_window(0, 10, 1).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            compute_window(10, 0, 1),
            Err(PaginationError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_window(10, 5, 0),
            Err(PaginationError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_window(10, 5, 11),
            Err(PaginationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_window_properties_hold_everywhere() {
        for total in 1..=40u32 {
            for max in 1..=12u32 {
                for current in 1..=total {
                    let w = compute_window(total, max, current).unwrap();
                    assert_eq!(w.len() as u32, max.min(total), "len t={total} m={max} c={current}");
                    assert!(w.windows(2).all(|p| p[1] == p[0] + 1), "consecutive");
                    assert!(w[0] >= 1 && *w.last().unwrap() <= total, "in range");
                    assert!(w.contains(&current), "contains current t={total} m={max} c={current}");
                }
            }
        }
    }
}
