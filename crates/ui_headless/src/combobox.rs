//! Searchable single-select list: query filtering, highlight movement, and selection.

use serde::{Deserialize, Serialize};

use crate::roving::{self, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// One selectable combobox entry.
pub struct ComboboxOption {
    /// Stable value reported on selection.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Extra search terms that do not appear in the label.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Disabled options are listed but never highlighted or selected.
    #[serde(default)]
    pub disabled: bool,
    /// Optional group heading.
    #[serde(default)]
    pub group: Option<String>,
}

impl ComboboxOption {
    /// Enabled option without keywords or group.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Adds search keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Places the option under a group heading.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Marks the option disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn matches(&self, terms: &[String]) -> bool {
        if terms.is_empty() {
            return true;
        }
        let mut haystack = format!("{} {}", self.label, self.value).to_lowercase();
        for keyword in &self.keywords {
            haystack.push(' ');
            haystack.push_str(&keyword.to_lowercase());
        }
        terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of routing a key through [`ComboboxState::handle_key`].
pub enum ComboboxOutcome {
    /// The key changed highlight or open state.
    Handled,
    /// Selection changed to the contained value (`None` when cleared).
    Selected(Option<String>),
    /// The list closed.
    Closed,
    /// The key is not a combobox key; let it through.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Filtered options sharing a group heading.
pub struct ComboboxGroup<'a> {
    /// Heading, `None` for ungrouped options.
    pub heading: Option<&'a str>,
    /// Options in list order.
    pub options: Vec<&'a ComboboxOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Combobox state: options, search query, highlight, and the selected value.
pub struct ComboboxState {
    options: Vec<ComboboxOption>,
    query: String,
    terms: Vec<String>,
    open: bool,
    highlighted: Option<String>,
    selected: Option<String>,
    loop_focus: bool,
}

impl Default for ComboboxState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ComboboxState {
    /// Closed combobox over `options` with wrap-around highlighting.
    pub fn new(options: Vec<ComboboxOption>) -> Self {
        Self {
            options,
            query: String::new(),
            terms: Vec::new(),
            open: false,
            highlighted: None,
            selected: None,
            loop_focus: true,
        }
    }

    /// Sets whether highlight movement wraps at the ends of the list.
    pub fn with_loop_focus(mut self, loop_focus: bool) -> Self {
        self.loop_focus = loop_focus;
        self
    }

    /// Starts with `value` selected when it names a registered option.
    pub fn with_selected(mut self, value: Option<String>) -> Self {
        self.selected = value.filter(|value| self.option(value).is_some());
        self
    }

    /// All options.
    pub fn options(&self) -> &[ComboboxOption] {
        &self.options
    }

    /// Replaces the option list, dropping a selection or highlight that no longer exists.
    pub fn set_options(&mut self, options: Vec<ComboboxOption>) {
        self.options = options;
        if let Some(selected) = self.selected.clone() {
            if self.option(&selected).is_none() {
                self.selected = None;
            }
        }
        if !self.highlight_is_visible() {
            self.highlight_edge(Direction::Forward);
        }
    }

    /// Option by value.
    pub fn option(&self, value: &str) -> Option<&ComboboxOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected value.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label of the selected option.
    pub fn selected_label(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .and_then(|value| self.option(value))
            .map(|option| option.label.as_str())
    }

    /// Highlighted value.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Index of the highlighted option within [`Self::filtered`].
    pub fn highlighted_index(&self) -> Option<usize> {
        let highlighted = self.highlighted.as_deref()?;
        self.filtered()
            .iter()
            .position(|option| option.value == highlighted)
    }

    /// Options matching the query, in list order.
    ///
    /// Matching is case-insensitive: every whitespace-separated query term must occur in the
    /// option's label, value, or keywords.
    pub fn filtered(&self) -> Vec<&ComboboxOption> {
        self.options
            .iter()
            .filter(|option| option.matches(&self.terms))
            .collect()
    }

    /// Whether the query filtered every option out.
    pub fn is_empty_result(&self) -> bool {
        !self.options.iter().any(|option| option.matches(&self.terms))
    }

    /// Filtered options grouped by heading, groups in first-seen order.
    pub fn grouped(&self) -> Vec<ComboboxGroup<'_>> {
        let mut groups: Vec<ComboboxGroup<'_>> = Vec::new();
        for option in self.filtered() {
            let heading = option.group.as_deref();
            match groups.iter_mut().find(|group| group.heading == heading) {
                Some(group) => group.options.push(option),
                None => groups.push(ComboboxGroup {
                    heading,
                    options: vec![option],
                }),
            }
        }
        groups
    }

    /// Opens the list and highlights the selected option, or the first enabled one.
    pub fn open(&mut self) {
        self.open = true;
        let selected_visible = self.selected.as_deref().is_some_and(|selected| {
            self.filtered()
                .iter()
                .any(|option| option.value == selected && !option.disabled)
        });
        if selected_visible {
            self.highlighted = self.selected.clone();
        } else if !self.highlight_is_visible() {
            self.highlight_edge(Direction::Forward);
        }
    }

    /// Closes the list and clears the query.
    pub fn close(&mut self) {
        self.open = false;
        self.set_query("");
    }

    /// Toggles the list.
    pub fn toggle_open(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Updates the query and resets the highlight to the first enabled match.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.terms = query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        self.highlighted = None;
        self.highlight_edge(Direction::Forward);
    }

    /// Moves the highlight to the next enabled match.
    pub fn highlight_next(&mut self) {
        self.step(Direction::Forward);
    }

    /// Moves the highlight to the previous enabled match.
    pub fn highlight_prev(&mut self) {
        self.step(Direction::Backward);
    }

    /// Highlights the first enabled match.
    pub fn highlight_first(&mut self) {
        self.highlight_edge(Direction::Forward);
    }

    /// Highlights the last enabled match.
    pub fn highlight_last(&mut self) {
        self.highlight_edge(Direction::Backward);
    }

    /// Highlights `value` if it is a visible, enabled match (pointer hover).
    pub fn highlight_value(&mut self, value: &str) -> bool {
        let visible = self
            .filtered()
            .iter()
            .any(|option| option.value == value && !option.disabled);
        if visible {
            self.highlighted = Some(value.to_string());
        }
        visible
    }

    /// Selects `value`; selecting the current value clears it. Closes the list.
    ///
    /// Returns the new selection, or `None` when `value` is unknown or disabled.
    pub fn select(&mut self, value: &str) -> Option<Option<String>> {
        let option = self.option(value)?;
        if option.disabled {
            return None;
        }
        self.selected = if self.selected.as_deref() == Some(value) {
            None
        } else {
            Some(value.to_string())
        };
        self.close();
        Some(self.selected.clone())
    }

    /// Selects the highlighted option.
    pub fn select_highlighted(&mut self) -> Option<Option<String>> {
        let value = self.highlighted.clone()?;
        self.select(&value)
    }

    /// Replaces the selection without toggling. Unknown values clear it.
    pub fn set_selected(&mut self, value: Option<String>) {
        self.selected = value.filter(|value| self.option(value).is_some());
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Routes a `KeyboardEvent.key` value.
    pub fn handle_key(&mut self, key: &str) -> ComboboxOutcome {
        match key {
            "ArrowDown" => {
                if self.open {
                    self.highlight_next();
                } else {
                    self.open();
                }
                ComboboxOutcome::Handled
            }
            "ArrowUp" => {
                if self.open {
                    self.highlight_prev();
                } else {
                    self.open();
                    self.highlight_last();
                }
                ComboboxOutcome::Handled
            }
            "Home" if self.open => {
                self.highlight_first();
                ComboboxOutcome::Handled
            }
            "End" if self.open => {
                self.highlight_last();
                ComboboxOutcome::Handled
            }
            "Enter" if self.open => match self.select_highlighted() {
                Some(selected) => ComboboxOutcome::Selected(selected),
                None => ComboboxOutcome::Ignored,
            },
            "Escape" if !self.query.is_empty() => {
                self.set_query("");
                ComboboxOutcome::Handled
            }
            "Escape" | "Tab" if self.open => {
                self.close();
                ComboboxOutcome::Closed
            }
            _ => ComboboxOutcome::Ignored,
        }
    }

    fn disabled_flags(filtered: &[&ComboboxOption]) -> Vec<bool> {
        filtered.iter().map(|option| option.disabled).collect()
    }

    fn highlight_is_visible(&self) -> bool {
        self.highlighted_index().is_some()
    }

    fn highlight_edge(&mut self, direction: Direction) {
        let filtered = self.filtered();
        let disabled = Self::disabled_flags(&filtered);
        let index = match direction {
            Direction::Forward => roving::first_enabled(&disabled),
            Direction::Backward => roving::last_enabled(&disabled),
        };
        self.highlighted = index.map(|index| filtered[index].value.clone());
    }

    fn step(&mut self, direction: Direction) {
        let filtered = self.filtered();
        let disabled = Self::disabled_flags(&filtered);
        let current = self.highlighted.as_deref().and_then(|highlighted| {
            filtered
                .iter()
                .position(|option| option.value == highlighted)
        });
        if let Some(index) = roving::next_enabled(&disabled, current, direction, self.loop_focus)
        {
            self.highlighted = Some(filtered[index].value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn frameworks() -> ComboboxState {
        ComboboxState::new(vec![
            ComboboxOption::new("next", "Next.js").in_group("React"),
            ComboboxOption::new("remix", "Remix").in_group("React"),
            ComboboxOption::new("sveltekit", "SvelteKit")
                .with_keywords(["svelte"])
                .disabled(),
            ComboboxOption::new("nuxt", "Nuxt.js").in_group("Vue"),
            ComboboxOption::new("astro", "Astro"),
        ])
    }

    fn values(state: &ComboboxState) -> Vec<&str> {
        state
            .filtered()
            .into_iter()
            .map(|option| option.value.as_str())
            .collect()
    }

    #[test]
    fn query_matches_label_value_and_keywords_case_insensitively() {
        let mut state = frameworks();
        state.set_query("JS");
        assert_eq!(values(&state), vec!["next", "nuxt"]);
        state.set_query("svelte");
        assert_eq!(values(&state), vec!["sveltekit"]);
        state.set_query("nu js");
        assert_eq!(values(&state), vec!["nuxt"]);
    }

    #[test]
    fn set_selected_ignores_unknown_values() {
        let mut state = frameworks();
        state.set_selected(Some("remix".to_string()));
        assert_eq!(state.selected_label(), Some("Remix"));
        state.set_selected(Some("angular".to_string()));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn empty_result_is_reported() {
        let mut state = frameworks();
        state.set_query("angular");
        assert!(state.is_empty_result());
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn highlight_wraps_and_skips_disabled() {
        let mut state = frameworks();
        state.open();
        assert_eq!(state.highlighted(), Some("next"));
        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.highlighted(), Some("nuxt"));
        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.highlighted(), Some("next"));
        state.highlight_prev();
        assert_eq!(state.highlighted(), Some("astro"));
    }

    #[test]
    fn highlight_stops_at_edges_without_loop() {
        let mut state = frameworks().with_loop_focus(false);
        state.open();
        state.highlight_prev();
        assert_eq!(state.highlighted(), Some("next"));
        state.highlight_last();
        state.highlight_next();
        assert_eq!(state.highlighted(), Some("astro"));
    }

    #[test]
    fn query_change_resets_highlight_to_first_match() {
        let mut state = frameworks();
        state.open();
        state.highlight_last();
        state.set_query("re");
        assert_eq!(state.highlighted(), Some("remix"));
        assert_eq!(state.highlighted_index(), Some(0));
    }

    #[test]
    fn selecting_current_value_clears_it() {
        let mut state = frameworks();
        assert_eq!(state.select("remix"), Some(Some("remix".to_string())));
        assert_eq!(state.selected_label(), Some("Remix"));
        assert!(!state.is_open());
        assert_eq!(state.select("remix"), Some(None));
        assert_eq!(state.select("sveltekit"), None);
        assert_eq!(state.select("gatsby"), None);
    }

    #[test]
    fn keyboard_flow_opens_moves_and_selects() {
        let mut state = frameworks();
        assert_eq!(state.handle_key("ArrowDown"), ComboboxOutcome::Handled);
        assert!(state.is_open());
        assert_eq!(state.handle_key("ArrowDown"), ComboboxOutcome::Handled);
        assert_eq!(
            state.handle_key("Enter"),
            ComboboxOutcome::Selected(Some("remix".to_string()))
        );
        assert_eq!(state.handle_key("Enter"), ComboboxOutcome::Ignored);
    }

    #[test]
    fn escape_clears_query_before_closing() {
        let mut state = frameworks();
        state.open();
        state.set_query("nu");
        assert_eq!(state.handle_key("Escape"), ComboboxOutcome::Handled);
        assert_eq!(state.query(), "");
        assert_eq!(state.handle_key("Escape"), ComboboxOutcome::Closed);
        assert_eq!(state.handle_key("Escape"), ComboboxOutcome::Ignored);
    }

    #[test]
    fn reopening_highlights_selected_option() {
        let mut state = frameworks();
        state.select("nuxt");
        state.open();
        assert_eq!(state.highlighted(), Some("nuxt"));
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let state = frameworks();
        let groups = state.grouped();
        let headings: Vec<_> = groups.iter().map(|group| group.heading).collect();
        assert_eq!(headings, vec![Some("React"), None, Some("Vue")]);
        assert_eq!(groups[0].options.len(), 2);
        assert_eq!(groups[1].options.len(), 2);
    }

    #[test]
    fn replacing_options_drops_missing_selection() {
        let mut state = frameworks().with_selected(Some("astro".to_string()));
        assert_eq!(state.selected(), Some("astro"));
        state.set_options(vec![ComboboxOption::new("next", "Next.js")]);
        assert_eq!(state.selected(), None);
    }
}
