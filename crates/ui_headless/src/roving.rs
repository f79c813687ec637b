//! Keyboard focus movement across a list of items, skipping disabled entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Axis along which arrow keys move focus.
pub enum Orientation {
    /// Left/Right arrows.
    #[default]
    Horizontal,
    /// Up/Down arrows.
    Vertical,
    /// All four arrows.
    Both,
}

impl Orientation {
    /// Value for `aria-orientation` and `data-orientation`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Horizontal | Self::Both => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scan direction.
pub enum Direction {
    /// Towards higher indexes.
    Forward,
    /// Towards lower indexes.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Navigation intent decoded from a key.
pub enum NavKey {
    /// Next item.
    Next,
    /// Previous item.
    Previous,
    /// First item.
    First,
    /// Last item.
    Last,
}

impl NavKey {
    /// Decodes a `KeyboardEvent.key` value for the given orientation.
    pub fn from_key(key: &str, orientation: Orientation) -> Option<Self> {
        let horizontal = matches!(orientation, Orientation::Horizontal | Orientation::Both);
        let vertical = matches!(orientation, Orientation::Vertical | Orientation::Both);
        match key {
            "ArrowRight" if horizontal => Some(Self::Next),
            "ArrowLeft" if horizontal => Some(Self::Previous),
            "ArrowDown" if vertical => Some(Self::Next),
            "ArrowUp" if vertical => Some(Self::Previous),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }
}

/// First enabled index.
pub fn first_enabled(disabled: &[bool]) -> Option<usize> {
    disabled.iter().position(|disabled| !disabled)
}

/// Last enabled index.
pub fn last_enabled(disabled: &[bool]) -> Option<usize> {
    disabled.iter().rposition(|disabled| !disabled)
}

/// Next enabled index from `from` in `direction`.
///
/// With no current index (or a stale one) the scan starts at the matching end of the list.
/// Returns `None` when nothing further is reachable: the list is empty, every entry is
/// disabled, or the end was hit without `loop_focus`. Callers keep the current focus then.
pub fn next_enabled(
    disabled: &[bool],
    from: Option<usize>,
    direction: Direction,
    loop_focus: bool,
) -> Option<usize> {
    let len = disabled.len();
    let from = match from.filter(|index| *index < len) {
        Some(from) => from,
        None => {
            return match direction {
                Direction::Forward => first_enabled(disabled),
                Direction::Backward => last_enabled(disabled),
            }
        }
    };

    for step in 1..len {
        let candidate = match direction {
            Direction::Forward => {
                let index = from + step;
                if index >= len {
                    if !loop_focus {
                        return None;
                    }
                    index - len
                } else {
                    index
                }
            }
            Direction::Backward => {
                if step > from {
                    if !loop_focus {
                        return None;
                    }
                    from + len - step
                } else {
                    from - step
                }
            }
        };
        if !disabled[candidate] {
            return Some(candidate);
        }
    }
    None
}

/// Resolves a [`NavKey`] to a target index.
pub fn navigate(
    disabled: &[bool],
    from: Option<usize>,
    key: NavKey,
    loop_focus: bool,
) -> Option<usize> {
    match key {
        NavKey::Next => next_enabled(disabled, from, Direction::Forward, loop_focus),
        NavKey::Previous => next_enabled(disabled, from, Direction::Backward, loop_focus),
        NavKey::First => first_enabled(disabled),
        NavKey::Last => last_enabled(disabled),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn forward_wraps_and_skips_disabled() {
        let disabled = [true, false, true, false];
        assert_eq!(next_enabled(&disabled, Some(1), Direction::Forward, true), Some(3));
        assert_eq!(next_enabled(&disabled, Some(3), Direction::Forward, true), Some(1));
    }

    #[test]
    fn backward_wraps_from_first() {
        let disabled = [false, false, true];
        assert_eq!(next_enabled(&disabled, Some(0), Direction::Backward, true), Some(1));
    }

    #[test]
    fn without_loop_edges_stop() {
        let disabled = [false, false, false];
        assert_eq!(next_enabled(&disabled, Some(2), Direction::Forward, false), None);
        assert_eq!(next_enabled(&disabled, Some(0), Direction::Backward, false), None);
        assert_eq!(next_enabled(&disabled, Some(1), Direction::Backward, false), Some(0));
    }

    #[test]
    fn no_current_starts_at_matching_end() {
        let disabled = [true, false, false, true];
        assert_eq!(next_enabled(&disabled, None, Direction::Forward, true), Some(1));
        assert_eq!(next_enabled(&disabled, None, Direction::Backward, true), Some(2));
        assert_eq!(next_enabled(&disabled, Some(9), Direction::Forward, true), Some(1));
    }

    #[test]
    fn all_disabled_or_empty_yields_none() {
        assert_eq!(next_enabled(&[true, true], Some(0), Direction::Forward, true), None);
        assert_eq!(next_enabled(&[], None, Direction::Forward, true), None);
        assert_eq!(navigate(&[true], None, NavKey::First, true), None);
    }

    #[test]
    fn single_enabled_item_has_nowhere_to_go() {
        assert_eq!(next_enabled(&[false], Some(0), Direction::Forward, true), None);
    }

    #[test]
    fn orientation_filters_arrow_keys() {
        assert_eq!(
            NavKey::from_key("ArrowDown", Orientation::Horizontal),
            None
        );
        assert_eq!(
            NavKey::from_key("ArrowDown", Orientation::Vertical),
            Some(NavKey::Next)
        );
        assert_eq!(
            NavKey::from_key("ArrowLeft", Orientation::Both),
            Some(NavKey::Previous)
        );
        assert_eq!(NavKey::from_key("End", Orientation::Vertical), Some(NavKey::Last));
    }
}
