//! Scroll-shadow edge detection for scroll containers.

/// Which edges of a scroll container have hidden content beyond them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollShadow {
    /// Content is scrolled past the top edge.
    pub top: bool,
    /// More content remains below the bottom edge.
    pub bottom: bool,
}

/// Pixels of slack before an edge counts as scrolled; absorbs sub-pixel rounding.
pub const SCROLL_EDGE_TOLERANCE: f64 = 1.0;

/// Derives shadow flags from an element's scroll metrics.
pub fn scroll_shadow(scroll_top: f64, scroll_height: f64, client_height: f64) -> ScrollShadow {
    let remaining = scroll_height - client_height - scroll_top;
    ScrollShadow {
        top: scroll_top > SCROLL_EDGE_TOLERANCE,
        bottom: remaining > SCROLL_EDGE_TOLERANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_that_fits_has_no_shadows() {
        assert_eq!(scroll_shadow(0.0, 200.0, 200.0), ScrollShadow::default());
    }

    #[test]
    fn middle_scroll_shows_both_shadows() {
        assert_eq!(
            scroll_shadow(50.0, 400.0, 200.0),
            ScrollShadow {
                top: true,
                bottom: true
            }
        );
    }

    #[test]
    fn subpixel_bottom_counts_as_end() {
        assert_eq!(
            scroll_shadow(199.5, 400.0, 200.0),
            ScrollShadow {
                top: true,
                bottom: false
            }
        );
    }
}
