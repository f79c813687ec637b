//! One-time-password slot state: typed entry, deletion, paste, and caret movement.

use serde::{Deserialize, Serialize};

use crate::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Characters a slot accepts.
pub enum OtpPattern {
    /// ASCII digits.
    #[default]
    Digits,
    /// ASCII letters and digits.
    Alphanumeric,
    /// Any non-whitespace character.
    Any,
}

impl OtpPattern {
    /// Whether `ch` may be entered into a slot.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Digits => ch.is_ascii_digit(),
            Self::Alphanumeric => ch.is_ascii_alphanumeric(),
            Self::Any => !ch.is_whitespace() && !ch.is_control(),
        }
    }

    /// Value for the hidden input's `inputmode` attribute.
    pub fn input_mode(self) -> &'static str {
        match self {
            Self::Digits => "numeric",
            Self::Alphanumeric | Self::Any => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fixed-length slot array with an active (caret) slot.
pub struct OtpState {
    slots: Vec<Option<char>>,
    active: usize,
    pattern: OtpPattern,
}

impl OtpState {
    /// Empty state with `length` slots.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] when `length` is zero.
    pub fn new(length: usize, pattern: OtpPattern) -> Result<Self, UiError> {
        if length == 0 {
            return Err(UiError::invalid("InputOtp", "length must be at least 1"));
        }
        Ok(Self {
            slots: vec![None; length],
            active: 0,
            pattern,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: zero-length states are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot contents.
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// Character in slot `index`.
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Active slot index.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Accepted pattern.
    pub fn pattern(&self) -> OtpPattern {
        self.pattern
    }

    /// Filled characters in slot order.
    pub fn value(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Writes `ch` into the active slot and advances. Returns false if the pattern rejects it.
    pub fn input(&mut self, ch: char) -> bool {
        if !self.pattern.accepts(ch) {
            return false;
        }
        self.slots[self.active] = Some(ch);
        if self.active + 1 < self.len() {
            self.active += 1;
        }
        true
    }

    /// Clears the active slot, or moves left and clears when it is already empty.
    pub fn backspace(&mut self) -> bool {
        if self.slots[self.active].is_some() {
            self.slots[self.active] = None;
            return true;
        }
        if self.active == 0 {
            return false;
        }
        self.active -= 1;
        self.slots[self.active] = None;
        true
    }

    /// Clears the active slot without moving.
    pub fn delete(&mut self) -> bool {
        self.slots[self.active].take().is_some()
    }

    /// Pastes `text`, keeping only accepted characters.
    ///
    /// A paste carrying a full code replaces every slot; a shorter one fills from the active
    /// slot. The caret lands after the last pasted character. Returns how many characters
    /// were written.
    pub fn paste(&mut self, text: &str) -> usize {
        let pattern = self.pattern;
        let accepted: Vec<char> = text.chars().filter(|ch| pattern.accepts(*ch)).collect();
        if accepted.is_empty() {
            return 0;
        }
        let start = if accepted.len() >= self.len() {
            0
        } else {
            self.active
        };
        let mut written = 0;
        for (slot, ch) in self.slots[start..].iter_mut().zip(accepted) {
            *slot = Some(ch);
            written += 1;
        }
        self.active = (start + written).min(self.len() - 1);
        written
    }

    /// Replaces the value from the first slot.
    pub fn set_value(&mut self, value: &str) {
        self.clear();
        let pattern = self.pattern;
        let accepted = value.chars().filter(|ch| pattern.accepts(*ch));
        let mut written = 0;
        for (slot, ch) in self.slots.iter_mut().zip(accepted) {
            *slot = Some(ch);
            written += 1;
        }
        self.active = written.min(self.len() - 1);
    }

    /// Clears every slot and moves the caret to the start.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.active = 0;
    }

    /// Moves the caret to `index`, never past the first empty slot.
    pub fn focus(&mut self, index: usize) {
        self.active = index.min(self.last_reachable());
    }

    /// Moves the caret one slot left.
    pub fn move_left(&mut self) -> bool {
        if self.active == 0 {
            return false;
        }
        self.active -= 1;
        true
    }

    /// Moves the caret one slot right, up to the first empty slot.
    pub fn move_right(&mut self) -> bool {
        if self.active >= self.last_reachable() {
            return false;
        }
        self.active += 1;
        true
    }

    /// Routes caret and deletion keys. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.move_left(),
            "ArrowRight" => self.move_right(),
            "Home" => {
                self.active = 0;
                true
            }
            "End" => {
                self.active = self.last_reachable();
                true
            }
            "Backspace" => self.backspace(),
            "Delete" => self.delete(),
            _ => false,
        }
    }

    fn last_reachable(&self) -> usize {
        self.slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.len() - 1)
    }
}

/// Splits `0..length` into consecutive groups of the given sizes.
///
/// Slots beyond the listed sizes form a final group; sizes past the end are truncated.
pub fn slot_groups(length: usize, group_sizes: &[usize]) -> Vec<Vec<usize>> {
    let mut groups = Vec::new();
    let mut next = 0;
    for size in group_sizes {
        if next >= length {
            break;
        }
        let end = (next + size).min(length);
        if end > next {
            groups.push((next..end).collect());
        }
        next = end;
    }
    if next < length {
        groups.push((next..length).collect());
    }
    groups
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn six() -> OtpState {
        OtpState::new(6, OtpPattern::Digits).expect("otp state")
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(
            OtpState::new(0, OtpPattern::Digits),
            Err(UiError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn typing_advances_and_stays_on_last_slot() {
        let mut state = OtpState::new(3, OtpPattern::Digits).expect("otp state");
        assert!(state.input('1'));
        assert!(!state.input('x'));
        assert!(state.input('2'));
        assert!(state.input('3'));
        assert_eq!(state.active(), 2);
        assert!(state.input('4'));
        assert_eq!(state.value(), "124");
        assert!(state.is_complete());
    }

    #[test]
    fn backspace_clears_then_moves_left() {
        let mut state = six();
        state.set_value("12");
        assert_eq!(state.active(), 2);
        assert!(state.backspace());
        assert_eq!(state.active(), 1);
        assert_eq!(state.value(), "1");
        assert!(state.backspace());
        assert_eq!(state.value(), "");
        assert_eq!(state.active(), 0);
        assert!(!state.backspace());
    }

    #[test]
    fn full_paste_replaces_every_slot() {
        let mut state = six();
        state.set_value("99");
        assert_eq!(state.paste("123-456"), 6);
        assert_eq!(state.value(), "123456");
        assert_eq!(state.active(), 5);
    }

    #[test]
    fn partial_paste_fills_from_active_slot() {
        let mut state = six();
        state.set_value("12");
        assert_eq!(state.paste("34"), 2);
        assert_eq!(state.value(), "1234");
        assert_eq!(state.active(), 4);
        assert_eq!(state.paste("abc"), 0);
    }

    #[test]
    fn focus_never_passes_first_empty_slot() {
        let mut state = six();
        state.set_value("12");
        state.focus(5);
        assert_eq!(state.active(), 2);
        state.focus(0);
        assert_eq!(state.active(), 0);
        assert!(state.handle_key("End"));
        assert_eq!(state.active(), 2);
        assert!(!state.handle_key("ArrowRight"));
    }

    #[test]
    fn delete_keeps_caret_in_place() {
        let mut state = six();
        state.set_value("123");
        state.focus(1);
        assert!(state.handle_key("Delete"));
        assert_eq!(state.slots()[1], None);
        assert_eq!(state.active(), 1);
        assert_eq!(state.value(), "13");
    }

    #[test]
    fn alphanumeric_pattern_accepts_letters() {
        let mut state = OtpState::new(4, OtpPattern::Alphanumeric).expect("otp state");
        assert_eq!(state.paste("ab-9Z"), 4);
        assert_eq!(state.value(), "ab9Z");
    }

    #[test]
    fn slot_groups_split_with_remainder() {
        assert_eq!(
            slot_groups(6, &[3, 3]),
            vec![vec![0, 1, 2], vec![3, 4, 5]]
        );
        assert_eq!(slot_groups(5, &[2]), vec![vec![0, 1], vec![2, 3, 4]]);
        assert_eq!(slot_groups(2, &[4, 4]), vec![vec![0, 1]]);
    }
}
