//! Floating content placement: side flipping, viewport shifting, and arrow alignment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// Axis-aligned rectangle in CSS pixels.
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Rectangle from its origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical centre.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Size of the rectangle.
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// Width and height in CSS pixels.
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Side of the trigger the content is placed on.
pub enum Side {
    /// Above.
    Top,
    /// To the right.
    Right,
    /// Below.
    #[default]
    Bottom,
    /// To the left.
    Left,
}

impl Side {
    /// The side across the trigger.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Whether the content stacks vertically relative to the trigger.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Value for `data-side`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Alignment along the trigger edge.
pub enum Align {
    /// Start edges line up.
    Start,
    /// Centres line up.
    #[default]
    Center,
    /// End edges line up.
    End,
}

impl Align {
    /// Value for `data-align`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Placement preferences.
pub struct PlacementOptions {
    /// Preferred side.
    pub side: Side,
    /// Alignment along the trigger edge.
    pub align: Align,
    /// Gap between trigger and content.
    pub side_offset: f64,
    /// Shift along the alignment axis, towards the content for `End`.
    pub align_offset: f64,
    /// Viewport margin the content keeps clear of.
    pub collision_padding: f64,
    /// Flip and shift to stay inside the viewport.
    pub avoid_collisions: bool,
    /// Arrow width along the content edge; zero when there is no arrow.
    pub arrow_size: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Center,
            side_offset: 4.0,
            align_offset: 0.0,
            collision_padding: 8.0,
            avoid_collisions: true,
            arrow_size: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Resolved content position.
pub struct Placement {
    /// Content left edge.
    pub x: f64,
    /// Content top edge.
    pub y: f64,
    /// Side actually used after flipping.
    pub side: Side,
    /// Requested alignment.
    pub align: Align,
    /// Arrow offset from the content's start edge along the trigger edge.
    pub arrow_offset: f64,
}

/// Places `content` next to `trigger` inside `viewport`.
///
/// The content flips to the opposite side when the preferred side overflows and the
/// opposite overflows less. It then shifts along the cross axis to stay inside the padded
/// viewport. The arrow points at the trigger centre, clamped to the content edge.
pub fn compute_position(
    trigger: Rect,
    content: Size,
    viewport: Rect,
    options: PlacementOptions,
) -> Placement {
    let mut side = options.side;
    let (mut x, mut y) = place(trigger, content, side, &options);

    if options.avoid_collisions {
        let overflow = main_overflow(viewport, content, side, x, y, options.collision_padding);
        if overflow > 0.0 {
            let flipped = side.opposite();
            let (fx, fy) = place(trigger, content, flipped, &options);
            let flipped_overflow =
                main_overflow(viewport, content, flipped, fx, fy, options.collision_padding);
            if flipped_overflow < overflow {
                side = flipped;
                x = fx;
                y = fy;
            }
        }

        let padding = options.collision_padding;
        if side.is_vertical() {
            x = shift(x, content.width, viewport.x + padding, viewport.right() - padding);
        } else {
            y = shift(y, content.height, viewport.y + padding, viewport.bottom() - padding);
        }
    }

    let arrow_offset = if side.is_vertical() {
        arrow(trigger.center_x() - x, content.width, options.arrow_size)
    } else {
        arrow(trigger.center_y() - y, content.height, options.arrow_size)
    };

    Placement {
        x,
        y,
        side,
        align: options.align,
        arrow_offset,
    }
}

fn place(trigger: Rect, content: Size, side: Side, options: &PlacementOptions) -> (f64, f64) {
    let offset = options.side_offset;
    let cross = |start: f64, length: f64, center: f64, end: f64| match options.align {
        Align::Start => start + options.align_offset,
        Align::Center => center - length / 2.0,
        Align::End => end - length - options.align_offset,
    };
    match side {
        Side::Top => (
            cross(trigger.x, content.width, trigger.center_x(), trigger.right()),
            trigger.y - offset - content.height,
        ),
        Side::Bottom => (
            cross(trigger.x, content.width, trigger.center_x(), trigger.right()),
            trigger.bottom() + offset,
        ),
        Side::Left => (
            trigger.x - offset - content.width,
            cross(trigger.y, content.height, trigger.center_y(), trigger.bottom()),
        ),
        Side::Right => (
            trigger.right() + offset,
            cross(trigger.y, content.height, trigger.center_y(), trigger.bottom()),
        ),
    }
}

/// Pixels by which the content crosses the padded viewport edge on its side.
fn main_overflow(viewport: Rect, content: Size, side: Side, x: f64, y: f64, padding: f64) -> f64 {
    match side {
        Side::Top => viewport.y + padding - y,
        Side::Bottom => y + content.height - (viewport.bottom() - padding),
        Side::Left => viewport.x + padding - x,
        Side::Right => x + content.width - (viewport.right() - padding),
    }
}

/// Keeps `[start, start + length]` inside `[min, max]`, favouring `min` when it cannot fit.
fn shift(start: f64, length: f64, min: f64, max: f64) -> f64 {
    start.min(max - length).max(min)
}

fn arrow(center: f64, length: f64, arrow_size: f64) -> f64 {
    let upper = (length - arrow_size).max(0.0);
    (center - arrow_size / 2.0).clamp(0.0, upper)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
    const CONTENT: Size = Size {
        width: 80.0,
        height: 40.0,
    };

    fn with_arrow() -> PlacementOptions {
        PlacementOptions {
            arrow_size: 10.0,
            ..PlacementOptions::default()
        }
    }

    #[test]
    fn bottom_center_below_trigger() {
        let trigger = Rect::new(100.0, 100.0, 50.0, 20.0);
        let placement = compute_position(trigger, CONTENT, VIEWPORT, with_arrow());
        assert_eq!(
            placement,
            Placement {
                x: 85.0,
                y: 124.0,
                side: Side::Bottom,
                align: Align::Center,
                arrow_offset: 35.0,
            }
        );
    }

    #[test]
    fn flips_when_bottom_overflows() {
        let trigger = Rect::new(100.0, 570.0, 50.0, 20.0);
        let placement = compute_position(trigger, CONTENT, VIEWPORT, with_arrow());
        assert_eq!(placement.side, Side::Top);
        assert_eq!(placement.y, 526.0);
    }

    #[test]
    fn keeps_side_when_opposite_is_worse() {
        let trigger = Rect::new(100.0, 20.0, 50.0, 560.0);
        let placement = compute_position(trigger, CONTENT, VIEWPORT, with_arrow());
        assert_eq!(placement.side, Side::Bottom);
    }

    #[test]
    fn shifts_inside_viewport_and_clamps_arrow() {
        let trigger = Rect::new(0.0, 100.0, 20.0, 20.0);
        let placement = compute_position(trigger, CONTENT, VIEWPORT, with_arrow());
        assert_eq!(placement.x, 8.0);
        assert_eq!(placement.arrow_offset, 0.0);
    }

    #[test]
    fn collisions_can_be_ignored() {
        let trigger = Rect::new(0.0, 100.0, 20.0, 20.0);
        let options = PlacementOptions {
            avoid_collisions: false,
            ..PlacementOptions::default()
        };
        let placement = compute_position(trigger, CONTENT, VIEWPORT, options);
        assert_eq!(placement.x, -30.0);
    }

    #[test]
    fn side_alignment_uses_vertical_cross_axis() {
        let trigger = Rect::new(100.0, 100.0, 50.0, 20.0);
        let options = PlacementOptions {
            side: Side::Right,
            align: Align::Start,
            align_offset: 2.0,
            ..with_arrow()
        };
        let placement = compute_position(trigger, CONTENT, VIEWPORT, options);
        assert_eq!((placement.x, placement.y), (154.0, 102.0));
        assert_eq!(placement.arrow_offset, 3.0);
    }

    #[test]
    fn end_alignment_lines_up_right_edges() {
        let trigger = Rect::new(300.0, 100.0, 50.0, 20.0);
        let options = PlacementOptions {
            align: Align::End,
            ..PlacementOptions::default()
        };
        let placement = compute_position(trigger, CONTENT, VIEWPORT, options);
        assert_eq!(placement.x, 270.0);
    }
}
