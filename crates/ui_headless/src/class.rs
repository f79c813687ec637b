//! Utility-class composition with last-wins conflict resolution.
//!
//! Component defaults are written as utility-class strings and callers append their own
//! overrides. [`cn`] keeps the result free of contradictory utilities: when two classes target
//! the same property under the same variant prefix (`hover:`, `md:`, `data-[state=on]:`), only
//! the later one survives.

use std::collections::HashSet;

const DISPLAY: &[&str] = &[
    "block",
    "inline-block",
    "inline",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "contents",
    "flow-root",
    "table",
    "hidden",
];
const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];
const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];
const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];
const SHADOW_SIZES: &[&str] = &["sm", "md", "lg", "xl", "2xl", "inner", "none", "xs"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];
const ROUNDED_SIDES: &[(&str, &str)] = &[
    ("tl", "rounded-tl"),
    ("tr", "rounded-tr"),
    ("br", "rounded-br"),
    ("bl", "rounded-bl"),
    ("ss", "rounded-ss"),
    ("se", "rounded-se"),
    ("es", "rounded-es"),
    ("ee", "rounded-ee"),
    ("t", "rounded-t"),
    ("r", "rounded-r"),
    ("b", "rounded-b"),
    ("l", "rounded-l"),
    ("s", "rounded-s"),
    ("e", "rounded-e"),
];
const BORDER_SIDES: &[(&str, &str, &str)] = &[
    ("x", "border-w-x", "border-color-x"),
    ("y", "border-w-y", "border-color-y"),
    ("t", "border-w-t", "border-color-t"),
    ("r", "border-w-r", "border-color-r"),
    ("b", "border-w-b", "border-color-b"),
    ("l", "border-w-l", "border-color-l"),
    ("s", "border-w-s", "border-color-s"),
    ("e", "border-w-e", "border-color-e"),
];
// Longest prefixes first so `min-w-` wins over `m-` style matches.
const PREFIX_GROUPS: &[(&str, &str)] = &[
    ("underline-offset-", "underline-offset"),
    ("pointer-events-", "pointer-events"),
    ("translate-x-", "translate-x"),
    ("translate-y-", "translate-y"),
    ("overflow-x-", "overflow-x"),
    ("overflow-y-", "overflow-y"),
    ("whitespace-", "whitespace"),
    ("grid-cols-", "grid-cols"),
    ("grid-rows-", "grid-rows"),
    ("col-span-", "col-span"),
    ("row-span-", "row-span"),
    ("overflow-", "overflow"),
    ("inset-x-", "inset-x"),
    ("inset-y-", "inset-y"),
    ("space-x-", "space-x"),
    ("space-y-", "space-y"),
    ("duration-", "duration"),
    ("tracking-", "tracking"),
    ("opacity-", "opacity"),
    ("leading-", "leading"),
    ("justify-", "justify"),
    ("content-", "content"),
    ("animate-", "animate"),
    ("min-w-", "min-w"),
    ("min-h-", "min-h"),
    ("max-w-", "max-w"),
    ("max-h-", "max-h"),
    ("gap-x-", "gap-x"),
    ("gap-y-", "gap-y"),
    ("cursor-", "cursor"),
    ("bottom-", "bottom"),
    ("rotate-", "rotate"),
    ("aspect-", "aspect"),
    ("select-", "select"),
    ("stroke-", "stroke"),
    ("inset-", "inset"),
    ("items-", "items"),
    ("right-", "right"),
    ("scale-", "scale"),
    ("delay-", "delay"),
    ("basis-", "basis"),
    ("order-", "order"),
    ("self-", "self"),
    ("size-", "size"),
    ("left-", "left"),
    ("ease-", "ease"),
    ("fill-", "fill"),
    ("gap-", "gap"),
    ("top-", "top"),
    ("px-", "px"),
    ("py-", "py"),
    ("pt-", "pt"),
    ("pr-", "pr"),
    ("pb-", "pb"),
    ("pl-", "pl"),
    ("ps-", "ps"),
    ("pe-", "pe"),
    ("mx-", "mx"),
    ("my-", "my"),
    ("mt-", "mt"),
    ("mr-", "mr"),
    ("mb-", "mb"),
    ("ml-", "ml"),
    ("ms-", "ms"),
    ("me-", "me"),
    ("p-", "p"),
    ("m-", "m"),
    ("w-", "w"),
    ("h-", "h"),
    ("z-", "z"),
];

/// Merges class fragments into one class string.
///
/// Fragments are split on whitespace and empty pieces are dropped. Exact duplicates and
/// utilities that conflict with a later utility are removed; survivors keep the position of
/// their last occurrence.
pub fn cn<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = parts
        .into_iter()
        .flat_map(|part| {
            part.as_ref()
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut seen_tokens = HashSet::new();
    let mut seen_groups = HashSet::new();
    let mut kept = Vec::with_capacity(tokens.len());
    for token in tokens.iter().rev() {
        if !seen_tokens.insert(token.as_str()) {
            continue;
        }
        if let Some(group) = conflict_key(token) {
            if !seen_groups.insert(group) {
                continue;
            }
        }
        kept.push(token.as_str());
    }
    kept.reverse();
    kept.join(" ")
}

/// Incremental builder for conditional class lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    parts: Vec<String>,
}

impl ClassList {
    /// Starts a list from a base class string.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            parts: vec![base.into()],
        }
    }

    /// Appends a fragment.
    pub fn push(mut self, class: impl Into<String>) -> Self {
        self.parts.push(class.into());
        self
    }

    /// Appends a fragment only when `condition` holds.
    pub fn push_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition {
            self.push(class)
        } else {
            self
        }
    }

    /// Appends an optional fragment, typically a caller-supplied `class` prop.
    pub fn extend(mut self, class: Option<&str>) -> Self {
        if let Some(class) = class {
            self.parts.push(class.to_string());
        }
        self
    }

    /// Resolves the list through [`cn`].
    pub fn build(&self) -> String {
        cn(&self.parts)
    }
}

fn conflict_key(token: &str) -> Option<String> {
    let (variants, utility) = split_variants(token);
    let utility = utility.strip_prefix('!').unwrap_or(utility);
    let utility = utility.strip_prefix('-').unwrap_or(utility);
    utility_group(utility).map(|group| format!("{variants}{group}"))
}

/// Splits `md:hover:px-4` into (`md:hover:`, `px-4`), ignoring colons inside brackets.
fn split_variants(token: &str) -> (&str, &str) {
    let mut depth = 0i32;
    let mut split_at = None;
    for (index, ch) in token.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ':' if depth == 0 => split_at = Some(index),
            _ => {}
        }
    }
    match split_at {
        Some(index) => (&token[..=index], &token[index + 1..]),
        None => ("", token),
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

fn is_arbitrary_length(value: &str) -> bool {
    value.starts_with('[')
        && value.ends_with(']')
        && ["px", "rem", "em", "%", "vh", "vw"]
            .iter()
            .any(|unit| value.trim_end_matches(']').ends_with(unit))
}

fn utility_group(utility: &str) -> Option<&'static str> {
    if DISPLAY.contains(&utility) {
        return Some("display");
    }
    if POSITION.contains(&utility) {
        return Some("position");
    }
    match utility {
        "visible" | "invisible" => return Some("visibility"),
        "italic" | "not-italic" => return Some("font-style"),
        "underline" | "overline" | "line-through" | "no-underline" => {
            return Some("text-decoration")
        }
        "uppercase" | "lowercase" | "capitalize" | "normal-case" => {
            return Some("text-transform")
        }
        "truncate" => return Some("text-overflow"),
        "shadow" => return Some("shadow"),
        "rounded" => return Some("rounded"),
        "border" => return Some("border-width"),
        "ring" => return Some("ring-width"),
        "transition" => return Some("transition"),
        "grow" => return Some("grow"),
        "shrink" => return Some("shrink"),
        _ => {}
    }

    if let Some(value) = utility.strip_prefix("text-") {
        return Some(if TEXT_SIZES.contains(&value) || is_arbitrary_length(value) {
            "text-size"
        } else if TEXT_ALIGN.contains(&value) {
            "text-align"
        } else if matches!(value, "wrap" | "nowrap" | "balance" | "pretty") {
            "text-wrap"
        } else {
            "text-color"
        });
    }
    if let Some(value) = utility.strip_prefix("font-") {
        return Some(if matches!(value, "sans" | "serif" | "mono") {
            "font-family"
        } else {
            "font-weight"
        });
    }
    if let Some(value) = utility.strip_prefix("bg-") {
        return Some(match value {
            "cover" | "contain" | "auto" => "bg-size",
            "fixed" | "local" | "scroll" => "bg-attachment",
            "center" | "top" | "bottom" | "left" | "right" => "bg-position",
            "repeat" | "no-repeat" | "repeat-x" | "repeat-y" => "bg-repeat",
            _ => "bg-color",
        });
    }
    if let Some(value) = utility.strip_prefix("rounded-") {
        for (side, group) in ROUNDED_SIDES {
            if value == *side || value.strip_prefix(side).is_some_and(|rest| rest.starts_with('-'))
            {
                return Some(*group);
            }
        }
        return Some("rounded");
    }
    if let Some(value) = utility.strip_prefix("border-") {
        if is_numeric(value) || is_arbitrary_length(value) {
            return Some("border-width");
        }
        if BORDER_STYLES.contains(&value) {
            return Some("border-style");
        }
        if matches!(value, "collapse" | "separate") {
            return Some("border-collapse");
        }
        for (side, width_group, color_group) in BORDER_SIDES {
            if value == *side {
                return Some(*width_group);
            }
            if let Some(rest) = value.strip_prefix(side).and_then(|r| r.strip_prefix('-')) {
                return Some(if is_numeric(rest) || is_arbitrary_length(rest) {
                    *width_group
                } else {
                    *color_group
                });
            }
        }
        return Some("border-color");
    }
    if let Some(value) = utility.strip_prefix("shadow-") {
        return Some(if SHADOW_SIZES.contains(&value) {
            "shadow"
        } else {
            "shadow-color"
        });
    }
    if let Some(value) = utility.strip_prefix("ring-offset-") {
        return Some(if is_numeric(value) {
            "ring-offset-width"
        } else {
            "ring-offset-color"
        });
    }
    if let Some(value) = utility.strip_prefix("ring-") {
        return Some(if is_numeric(value) || is_arbitrary_length(value) {
            "ring-width"
        } else if value == "inset" {
            "ring-inset"
        } else {
            "ring-color"
        });
    }
    if let Some(value) = utility.strip_prefix("outline-") {
        return Some(
            if matches!(value, "none" | "dashed" | "dotted" | "double" | "solid") {
                "outline-style"
            } else if is_numeric(value) {
                "outline-width"
            } else if value.starts_with("offset-") {
                "outline-offset"
            } else {
                "outline-color"
            },
        );
    }
    if let Some(value) = utility.strip_prefix("flex-") {
        return Some(match value {
            "row" | "row-reverse" | "col" | "col-reverse" => "flex-direction",
            "wrap" | "wrap-reverse" | "nowrap" => "flex-wrap",
            _ => "flex",
        });
    }
    if utility.starts_with("grow-") {
        return Some("grow");
    }
    if utility.starts_with("shrink-") {
        return Some("shrink");
    }
    if utility.starts_with("transition-") {
        return Some("transition");
    }

    PREFIX_GROUPS
        .iter()
        .find(|(prefix, _)| utility.starts_with(prefix))
        .map(|(_, group)| *group)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn later_padding_overrides_earlier_on_same_axis() {
        assert_eq!(cn(["px-2 py-1", "px-4"]), "py-1 px-4");
    }

    #[test]
    fn padding_axes_do_not_conflict_with_each_other() {
        assert_eq!(cn(["p-2", "px-4"]), "p-2 px-4");
    }

    #[test]
    fn text_size_and_color_are_independent_groups() {
        assert_eq!(
            cn(["text-sm text-muted-foreground", "text-lg"]),
            "text-muted-foreground text-lg"
        );
        assert_eq!(
            cn(["text-sm text-muted-foreground", "text-red-500"]),
            "text-sm text-red-500"
        );
    }

    #[test]
    fn variant_prefixes_scope_conflicts() {
        assert_eq!(
            cn(["bg-primary hover:bg-primary/90", "bg-secondary"]),
            "hover:bg-primary/90 bg-secondary"
        );
        assert_eq!(
            cn(["data-[state=on]:bg-accent", "data-[state=on]:bg-muted"]),
            "data-[state=on]:bg-muted"
        );
    }

    #[test]
    fn drops_empty_fragments_and_duplicates() {
        assert_eq!(cn(["", "  flex  ", "items-center", "flex"]), "items-center flex");
    }

    #[test]
    fn border_width_style_and_color_are_separate() {
        assert_eq!(
            cn(["border border-input", "border-2 border-dashed border-red-500"]),
            "border-2 border-dashed border-red-500"
        );
        assert_eq!(cn(["border-t-2", "border-t-4 border-b"]), "border-t-4 border-b");
    }

    #[test]
    fn display_utilities_conflict() {
        assert_eq!(cn(["flex items-center", "hidden"]), "items-center hidden");
        assert_eq!(cn(["md:flex", "md:grid"]), "md:grid");
    }

    #[test]
    fn rounded_sides_are_independent_from_all_corners() {
        assert_eq!(cn(["rounded-md rounded-t-none", "rounded-lg"]), "rounded-t-none rounded-lg");
    }

    #[test]
    fn arbitrary_values_with_colons_are_not_split() {
        assert_eq!(
            cn(["bg-[url(https://x.test/a.png)]", "bg-red-500"]),
            "bg-red-500"
        );
    }

    #[test]
    fn unknown_utilities_are_kept() {
        assert_eq!(cn(["sr-only peer", "group"]), "sr-only peer group");
    }

    #[test]
    fn class_list_applies_conditions_and_caller_override() {
        let classes = ClassList::new("h-9 px-4")
            .push_if(true, "opacity-50")
            .push_if(false, "ring-2")
            .extend(Some("h-12"))
            .build();
        assert_eq!(classes, "px-4 opacity-50 h-12");
    }
}
