//! Selection over a registered option set, shared by radio groups and toggle groups.
//!
//! Items register themselves as they mount, usually after the group has received its initial
//! value. Requested values that are not registered yet are parked as pending and promoted when
//! the matching option registers, so [`SelectionState::selected`] only ever reports registered
//! options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Whether a group holds one or many selected values.
pub enum SelectionMode {
    /// At most one value.
    #[default]
    Single,
    /// Any number of values.
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered option.
pub struct SelectionOption<V> {
    /// Option value.
    pub value: V,
    /// Disabled options cannot be toggled or focused.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Selected values constrained to a registered option set.
pub struct SelectionState<V> {
    mode: SelectionMode,
    allow_deselect: bool,
    options: Vec<SelectionOption<V>>,
    selected: Vec<V>,
    pending: Vec<V>,
}

impl<V> Default for SelectionState<V> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            allow_deselect: true,
            options: Vec::new(),
            selected: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<V: Clone + PartialEq> SelectionState<V> {
    /// Empty selection in the given mode. Single mode allows deselecting by default.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Radio semantics: single selection that can never be cleared by toggling.
    pub fn radio() -> Self {
        Self::new(SelectionMode::Single).with_allow_deselect(false)
    }

    /// Sets whether toggling the selected value in single mode clears it.
    pub fn with_allow_deselect(mut self, allow_deselect: bool) -> Self {
        self.allow_deselect = allow_deselect;
        self
    }

    /// Selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Registered options in registration order.
    pub fn options(&self) -> &[SelectionOption<V>] {
        &self.options
    }

    /// Index of a registered value.
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.options.iter().position(|option| option.value == *value)
    }

    /// Whether `value` is registered.
    pub fn is_registered(&self, value: &V) -> bool {
        self.index_of(value).is_some()
    }

    /// Whether `value` is registered and disabled.
    pub fn is_disabled(&self, value: &V) -> bool {
        self.options
            .iter()
            .any(|option| option.value == *value && option.disabled)
    }

    /// Disabled flags aligned with [`Self::options`], for roving focus.
    pub fn disabled_flags(&self) -> Vec<bool> {
        self.options.iter().map(|option| option.disabled).collect()
    }

    /// Registers an option, or updates the disabled flag of an existing one.
    pub fn register(&mut self, value: V, disabled: bool) {
        match self.options.iter_mut().find(|option| option.value == value) {
            Some(option) => option.disabled = disabled,
            None => {
                self.options.push(SelectionOption {
                    value: value.clone(),
                    disabled,
                });
                if let Some(index) = self.pending.iter().position(|pending| *pending == value) {
                    self.pending.remove(index);
                    self.insert_selected(value);
                }
            }
        }
    }

    /// Removes an option. A selected value is parked as pending so a remount restores it.
    pub fn unregister(&mut self, value: &V) {
        self.options.retain(|option| option.value != *value);
        if let Some(index) = self.selected.iter().position(|selected| selected == value) {
            let removed = self.selected.remove(index);
            self.pending.push(removed);
        }
    }

    /// Updates the disabled flag of a registered option.
    pub fn set_disabled(&mut self, value: &V, disabled: bool) {
        if let Some(option) = self.options.iter_mut().find(|option| option.value == *value) {
            option.disabled = disabled;
        }
    }

    /// Whether `value` is currently selected.
    pub fn is_selected(&self, value: &V) -> bool {
        self.selected.contains(value)
    }

    /// Selected values in selection order.
    pub fn selected(&self) -> &[V] {
        &self.selected
    }

    /// The single selected value, or the earliest one in multiple mode.
    pub fn first_selected(&self) -> Option<&V> {
        self.selected.first()
    }

    /// Toggles `value`, returning whether the selection changed.
    ///
    /// Disabled and unregistered options are ignored. In single mode the selected value is only
    /// cleared when deselection is allowed.
    pub fn toggle(&mut self, value: &V) -> bool {
        if !self.is_selectable(value) {
            return false;
        }
        if self.is_selected(value) {
            if self.mode == SelectionMode::Single && !self.allow_deselect {
                return false;
            }
            self.selected.retain(|selected| selected != value);
            return true;
        }
        self.insert_selected(value.clone());
        true
    }

    /// Selects `value` without toggling, returning whether the selection changed.
    pub fn select(&mut self, value: &V) -> bool {
        if !self.is_selectable(value) || self.is_selected(value) {
            return false;
        }
        self.insert_selected(value.clone());
        true
    }

    /// Deselects `value`, pending or not, returning whether the selection changed.
    pub fn deselect(&mut self, value: &V) -> bool {
        let before = self.selected.len() + self.pending.len();
        self.selected.retain(|selected| selected != value);
        self.pending.retain(|pending| pending != value);
        before != self.selected.len() + self.pending.len()
    }

    /// Clears the selection and any pending values.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.pending.clear();
    }

    /// Replaces the selection. Unregistered values wait as pending until they register.
    /// Single mode keeps only the last requested value.
    pub fn set_selected(&mut self, values: impl IntoIterator<Item = V>) {
        self.clear();
        let mut values: Vec<V> = values.into_iter().collect();
        if self.mode == SelectionMode::Single {
            values = values.pop().into_iter().collect();
        }
        for value in values {
            if self.is_registered(&value) {
                if !self.is_selected(&value) {
                    self.selected.push(value);
                }
            } else if !self.pending.contains(&value) {
                self.pending.push(value);
            }
        }
    }

    fn is_selectable(&self, value: &V) -> bool {
        self.options
            .iter()
            .any(|option| option.value == *value && !option.disabled)
    }

    fn insert_selected(&mut self, value: V) {
        if self.mode == SelectionMode::Single {
            self.selected.clear();
            self.pending.clear();
        }
        self.selected.push(value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn group(mode: SelectionMode) -> SelectionState<&'static str> {
        let mut state = SelectionState::new(mode);
        state.register("bold", false);
        state.register("italic", false);
        state.register("underline", true);
        state
    }

    #[test]
    fn single_toggle_replaces_and_deselects() {
        let mut state = group(SelectionMode::Single);
        assert!(state.toggle(&"bold"));
        assert!(state.toggle(&"italic"));
        assert_eq!(state.selected(), &["italic"]);
        assert!(state.toggle(&"italic"));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn radio_never_deselects_by_toggle() {
        let mut state = SelectionState::radio();
        state.register("comfortable", false);
        state.register("compact", false);
        assert!(state.toggle(&"compact"));
        assert!(!state.toggle(&"compact"));
        assert_eq!(state.first_selected(), Some(&"compact"));
    }

    #[test]
    fn multiple_toggle_accumulates() {
        let mut state = group(SelectionMode::Multiple);
        state.toggle(&"bold");
        state.toggle(&"italic");
        state.toggle(&"bold");
        assert_eq!(state.selected(), &["italic"]);
    }

    #[test]
    fn disabled_and_unknown_options_are_ignored() {
        let mut state = group(SelectionMode::Multiple);
        assert!(!state.toggle(&"underline"));
        assert!(!state.toggle(&"strike"));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn pending_value_promotes_on_registration() {
        let mut state = SelectionState::radio();
        state.set_selected(["compact"]);
        assert!(state.selected().is_empty());
        state.register("default", false);
        state.register("compact", false);
        assert_eq!(state.selected(), &["compact"]);
    }

    #[test]
    fn unregister_parks_selected_value() {
        let mut state = group(SelectionMode::Multiple);
        state.toggle(&"bold");
        state.unregister(&"bold");
        assert!(state.selected().is_empty());
        assert!(!state.is_registered(&"bold"));
        state.register("bold", false);
        assert_eq!(state.selected(), &["bold"]);
    }

    #[test]
    fn set_selected_single_mode_keeps_last_value() {
        let mut state = group(SelectionMode::Single);
        state.set_selected(["bold", "italic"]);
        assert_eq!(state.selected(), &["italic"]);
    }

    #[test]
    fn disabled_flags_follow_registration_order() {
        let state = group(SelectionMode::Single);
        assert_eq!(state.disabled_flags(), vec![false, false, true]);
        assert_eq!(state.index_of(&"underline"), Some(2));
    }

    #[test]
    fn deselect_drops_parked_value() {
        let mut state = group(SelectionMode::Multiple);
        state.toggle(&"bold");
        state.unregister(&"bold");
        assert!(state.deselect(&"bold"));
        state.register("bold", false);
        assert!(state.selected().is_empty());

        state.set_selected(["strike"]);
        assert!(state.deselect(&"strike"));
        state.register("strike", false);
        assert!(state.selected().is_empty());
        assert!(!state.deselect(&"strike"));
    }
}
