//! Navigation menu open state and trigger focus movement.

use serde::{Deserialize, Serialize};

use crate::roving::{navigate, NavKey, Orientation};

/// Hover time before a closed menu opens.
pub const OPEN_DELAY_MS: u64 = 200;
/// Window after closing during which hovering another trigger opens it immediately.
pub const SKIP_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Direction content slides in when switching between open items.
pub enum MotionDirection {
    /// New item is before the previous one.
    FromStart,
    /// New item is after the previous one.
    FromEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Registered trigger values and which one is open.
pub struct NavigationMenuState {
    items: Vec<String>,
    active: Option<String>,
    previous: Option<String>,
}

impl NavigationMenuState {
    /// Empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a trigger value in mount order.
    pub fn register(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.items.contains(&value) {
            self.items.push(value);
        }
    }

    /// Removes a trigger value, closing it if open.
    pub fn unregister(&mut self, value: &str) {
        self.items.retain(|item| item != value);
        if self.active.as_deref() == Some(value) {
            self.active = None;
        }
        if self.previous.as_deref() == Some(value) {
            self.previous = None;
        }
    }

    /// Registered values.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Open value.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `value` is open.
    pub fn is_open(&self, value: &str) -> bool {
        self.active.as_deref() == Some(value)
    }

    /// Whether any item is open.
    pub fn is_any_open(&self) -> bool {
        self.active.is_some()
    }

    /// Opens `value`. Unregistered values are ignored.
    pub fn open(&mut self, value: &str) -> bool {
        if !self.items.iter().any(|item| item == value) || self.is_open(value) {
            return false;
        }
        self.previous = self.active.take();
        self.active = Some(value.to_string());
        true
    }

    /// Closes the open item.
    pub fn close(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                self.previous = Some(active);
                true
            }
            None => false,
        }
    }

    /// Opens `value`, or closes it when already open.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.is_open(value) {
            self.close()
        } else {
            self.open(value)
        }
    }

    /// Slide direction for the open item relative to the previously open one.
    ///
    /// `None` when the menu opened from closed or is closed.
    pub fn motion_direction(&self) -> Option<MotionDirection> {
        let active = self.index(self.active.as_deref()?)?;
        let previous = self.index(self.previous.as_deref()?)?;
        match active.cmp(&previous) {
            std::cmp::Ordering::Less => Some(MotionDirection::FromStart),
            std::cmp::Ordering::Greater => Some(MotionDirection::FromEnd),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// `data-motion` value for the content of `value`.
    ///
    /// Entering content slides `from-start`/`from-end`; the content being replaced slides
    /// `to-start`/`to-end` in the opposite direction.
    pub fn content_motion(&self, value: &str) -> Option<&'static str> {
        let direction = self.motion_direction()?;
        if self.is_open(value) {
            return Some(match direction {
                MotionDirection::FromStart => "from-start",
                MotionDirection::FromEnd => "from-end",
            });
        }
        if self.previous.as_deref() == Some(value) {
            return Some(match direction {
                MotionDirection::FromStart => "to-end",
                MotionDirection::FromEnd => "to-start",
            });
        }
        None
    }

    /// Trigger value to focus for `key` pressed on the trigger `from`.
    pub fn focus_target(&self, from: &str, key: &str, orientation: Orientation) -> Option<&str> {
        let nav = NavKey::from_key(key, orientation)?;
        let disabled = vec![false; self.items.len()];
        navigate(&disabled, self.index(from), nav, true).map(|index| self.items[index].as_str())
    }

    fn index(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn menu() -> NavigationMenuState {
        let mut menu = NavigationMenuState::new();
        for value in ["getting-started", "components", "docs"] {
            menu.register(value);
        }
        menu
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut menu = menu();
        assert!(menu.toggle("components"));
        assert!(menu.is_open("components"));
        assert!(menu.toggle("components"));
        assert_eq!(menu.active(), None);
        assert!(!menu.open("missing"));
    }

    #[test]
    fn motion_follows_item_order() {
        let mut menu = menu();
        menu.open("components");
        assert_eq!(menu.motion_direction(), None);
        menu.open("docs");
        assert_eq!(menu.motion_direction(), Some(MotionDirection::FromEnd));
        assert_eq!(menu.content_motion("docs"), Some("from-end"));
        assert_eq!(menu.content_motion("components"), Some("to-start"));
        menu.open("getting-started");
        assert_eq!(menu.motion_direction(), Some(MotionDirection::FromStart));
        assert_eq!(menu.content_motion("docs"), Some("to-end"));
    }

    #[test]
    fn closing_clears_motion() {
        let mut menu = menu();
        menu.open("docs");
        menu.close();
        assert_eq!(menu.motion_direction(), None);
        menu.open("components");
        assert_eq!(menu.motion_direction(), None);
    }

    #[test]
    fn unregister_closes_open_item() {
        let mut menu = menu();
        menu.open("docs");
        menu.unregister("docs");
        assert!(!menu.is_any_open());
        assert_eq!(menu.items().len(), 2);
    }

    #[test]
    fn trigger_focus_wraps() {
        let menu = menu();
        assert_eq!(
            menu.focus_target("docs", "ArrowRight", Orientation::Horizontal),
            Some("getting-started")
        );
        assert_eq!(
            menu.focus_target("docs", "Home", Orientation::Horizontal),
            Some("getting-started")
        );
        assert_eq!(
            menu.focus_target("docs", "ArrowDown", Orientation::Horizontal),
            None
        );
    }
}
