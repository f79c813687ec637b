//! Keyboard shortcut parsing and matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Platform family deciding what the `mod` modifier means.
pub enum Platform {
    /// macOS and iOS: `mod` is Meta (Command).
    Apple,
    /// Everything else: `mod` is Ctrl.
    #[default]
    Other,
}

impl Platform {
    /// Detects the family from `navigator.platform` or a user agent string.
    pub fn detect(platform: &str) -> Self {
        let platform = platform.to_ascii_lowercase();
        if ["mac", "iphone", "ipad", "ipod"]
            .iter()
            .any(|needle| platform.contains(needle))
        {
            Self::Apple
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// A key event reduced to what shortcuts compare.
pub struct KeyPress {
    /// `KeyboardEvent.key`.
    pub key: String,
    /// Ctrl held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt/Option held.
    pub alt: bool,
    /// Meta/Command held.
    pub meta: bool,
}

impl KeyPress {
    /// Key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// A key combined with exact modifier state, written like `mod+shift+k`.
pub struct KeyShortcut {
    /// Normalised key: lowercase for single characters, canonical names otherwise.
    pub key: String,
    /// Requires Ctrl.
    pub ctrl: bool,
    /// Requires Shift.
    pub shift: bool,
    /// Requires Alt/Option.
    pub alt: bool,
    /// Requires Meta/Command.
    pub meta: bool,
}

impl KeyShortcut {
    /// Parses a shortcut, reading `mod` as Ctrl.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] for empty input, unknown modifiers, a missing
    /// key, or more than one key.
    pub fn parse(text: &str) -> Result<Self, UiError> {
        Self::parse_for(text, Platform::Other)
    }

    /// Parses a shortcut, resolving `mod` for `platform`.
    ///
    /// # Errors
    ///
    /// See [`KeyShortcut::parse`].
    pub fn parse_for(text: &str, platform: Platform) -> Result<Self, UiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(invalid("shortcut is empty"));
        }
        let tokens: Vec<&str> = text.split('+').map(str::trim).collect();
        let (key_token, modifiers) = tokens
            .split_last()
            .ok_or_else(|| invalid("shortcut is empty"))?;

        let mut shortcut = Self {
            key: String::new(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        };
        for token in modifiers {
            if token.is_empty() {
                return Err(invalid(format!("`{text}` has an empty segment")));
            }
            if !shortcut.apply_modifier(token, platform) {
                if token.chars().count() == 1 {
                    return Err(invalid(format!(
                        "`{text}` names more than one key ({token}, {key_token})"
                    )));
                }
                return Err(invalid(format!("unknown modifier `{token}`")));
            }
        }
        if key_token.is_empty() || is_modifier(key_token) {
            return Err(invalid(format!("`{text}` has no key")));
        }
        shortcut.key = normalize_key(key_token);
        Ok(shortcut)
    }

    /// Whether `press` carries this key and exactly these modifiers.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.ctrl == self.ctrl
            && press.shift == self.shift
            && press.alt == self.alt
            && press.meta == self.meta
            && normalize_key(&press.key) == self.key
    }

    fn apply_modifier(&mut self, token: &str, platform: Platform) -> bool {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => self.ctrl = true,
            "shift" => self.shift = true,
            "alt" | "option" => self.alt = true,
            "meta" | "cmd" | "command" | "super" => self.meta = true,
            "mod" => match platform {
                Platform::Apple => self.meta = true,
                Platform::Other => self.ctrl = true,
            },
            _ => return false,
        }
        true
    }
}

impl FromStr for KeyShortcut {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyShortcut {
    type Error = UiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyShortcut> for String {
    fn from(value: KeyShortcut) -> Self {
        value.to_string()
    }
}

impl fmt::Display for KeyShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, label) in [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ] {
            if held {
                write!(f, "{label}+")?;
            }
        }
        match self.key.as_str() {
            " " => f.write_str("Space"),
            "+" => f.write_str("Plus"),
            key if key.chars().count() == 1 => f.write_str(&key.to_uppercase()),
            key => f.write_str(key),
        }
    }
}

fn invalid(reason: impl Into<String>) -> UiError {
    UiError::invalid("KeyboardShortcut", reason)
}

fn is_modifier(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "ctrl" | "control" | "shift" | "alt" | "option" | "meta" | "cmd" | "command" | "super" | "mod"
    )
}

/// Canonical form of a key name or `KeyboardEvent.key` value.
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        return key.to_lowercase();
    }
    let canonical = match key.to_ascii_lowercase().as_str() {
        "esc" | "escape" => "Escape",
        "enter" | "return" => "Enter",
        "space" | "spacebar" => " ",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "del" | "delete" => "Delete",
        "up" | "arrowup" => "ArrowUp",
        "down" | "arrowdown" => "ArrowDown",
        "left" | "arrowleft" => "ArrowLeft",
        "right" | "arrowright" => "ArrowRight",
        "home" => "Home",
        "end" => "End",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        "plus" => "+",
        _ => return key.to_string(),
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mod_resolves_per_platform() {
        let other = KeyShortcut::parse("mod+shift+k").expect("shortcut");
        assert!(other.ctrl && other.shift && !other.meta);
        assert_eq!(other.key, "k");

        let apple = KeyShortcut::parse_for("mod+k", Platform::Apple).expect("shortcut");
        assert!(apple.meta && !apple.ctrl);
    }

    #[test]
    fn platform_detection() {
        assert_eq!(Platform::detect("MacIntel"), Platform::Apple);
        assert_eq!(Platform::detect("Win32"), Platform::Other);
    }

    #[test]
    fn invalid_shortcuts_are_rejected() {
        for text in ["", "ctrl+", "hyper+k", "ctrl+shift", "a+b"] {
            assert!(
                matches!(KeyShortcut::parse(text), Err(UiError::InvalidParameter { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn matching_is_exact_on_modifiers_and_loose_on_case() {
        let shortcut: KeyShortcut = "ctrl+shift+k".parse().expect("shortcut");
        let press = KeyPress {
            key: "K".to_string(),
            ctrl: true,
            shift: true,
            ..KeyPress::default()
        };
        assert!(shortcut.matches(&press));
        assert!(!shortcut.matches(&KeyPress {
            alt: true,
            ..press.clone()
        }));
        assert!(!shortcut.matches(&KeyPress::new("k")));
    }

    #[test]
    fn aliases_match_event_keys() {
        let escape = KeyShortcut::parse("esc").expect("shortcut");
        assert!(escape.matches(&KeyPress::new("Escape")));
        let space = KeyShortcut::parse("alt+space").expect("shortcut");
        assert_eq!(space.to_string(), "Alt+Space");
    }

    #[test]
    fn display_orders_modifiers() {
        let shortcut = KeyShortcut::parse("shift+ctrl+b").expect("shortcut");
        assert_eq!(shortcut.to_string(), "Ctrl+Shift+B");
        let plus = KeyShortcut::parse("ctrl+plus").expect("shortcut");
        assert_eq!(plus.to_string(), "Ctrl+Plus");
    }
}
