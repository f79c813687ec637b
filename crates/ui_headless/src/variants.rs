//! Style tokens for the variant-driven components.

use serde::{Deserialize, Serialize};

use crate::cn;

const BUTTON_BASE: &str = "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-colors focus-visible:outline-none focus-visible:ring-1 focus-visible:ring-ring disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg]:size-4 [&_svg]:shrink-0";
const TOGGLE_BASE: &str = "inline-flex items-center justify-center gap-2 rounded-md text-sm font-medium transition-colors hover:bg-muted hover:text-muted-foreground focus-visible:outline-none focus-visible:ring-1 focus-visible:ring-ring disabled:pointer-events-none disabled:opacity-50 data-[state=on]:bg-accent data-[state=on]:text-accent-foreground [&_svg]:pointer-events-none [&_svg]:size-4 [&_svg]:shrink-0";
const BADGE_BASE: &str = "inline-flex items-center rounded-md border px-2.5 py-0.5 text-xs font-semibold transition-colors focus:outline-none focus:ring-2 focus:ring-ring focus:ring-offset-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Visual button variants.
pub enum ButtonVariant {
    /// Filled primary action.
    #[default]
    Default,
    /// Destructive action.
    Destructive,
    /// Bordered button on the page background.
    Outline,
    /// Muted filled button.
    Secondary,
    /// Transparent until hovered.
    Ghost,
    /// Text link styled as a button.
    Link,
}

impl ButtonVariant {
    /// Utility classes for this variant.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "bg-primary text-primary-foreground shadow hover:bg-primary/90",
            Self::Destructive => {
                "bg-destructive text-destructive-foreground shadow-sm hover:bg-destructive/90"
            }
            Self::Outline => {
                "border border-input bg-background shadow-sm hover:bg-accent hover:text-accent-foreground"
            }
            Self::Secondary => {
                "bg-secondary text-secondary-foreground shadow-sm hover:bg-secondary/80"
            }
            Self::Ghost => "hover:bg-accent hover:text-accent-foreground",
            Self::Link => "text-primary underline-offset-4 hover:underline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Button sizing tokens.
pub enum ButtonSize {
    /// Regular height.
    #[default]
    Default,
    /// Dense.
    Sm,
    /// Large.
    Lg,
    /// Square icon-only button.
    Icon,
}

impl ButtonSize {
    /// Utility classes for this size.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "h-9 px-4 py-2",
            Self::Sm => "h-8 rounded-md px-3 text-xs",
            Self::Lg => "h-10 rounded-md px-8",
            Self::Icon => "h-9 w-9",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Toggle and toggle-group item variants.
pub enum ToggleVariant {
    /// Transparent toggle.
    #[default]
    Default,
    /// Bordered toggle.
    Outline,
}

impl ToggleVariant {
    /// Utility classes for this variant.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "bg-transparent",
            Self::Outline => {
                "border border-input bg-transparent shadow-sm hover:bg-accent hover:text-accent-foreground"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Toggle sizing tokens.
pub enum ToggleSize {
    /// Regular.
    #[default]
    Default,
    /// Dense.
    Sm,
    /// Large.
    Lg,
}

impl ToggleSize {
    /// Utility classes for this size.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "h-9 px-2 min-w-9",
            Self::Sm => "h-8 px-1.5 min-w-8",
            Self::Lg => "h-10 px-2.5 min-w-10",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Badge variants.
pub enum BadgeVariant {
    /// Primary badge.
    #[default]
    Default,
    /// Muted badge.
    Secondary,
    /// Destructive badge.
    Destructive,
    /// Bordered badge.
    Outline,
}

impl BadgeVariant {
    /// Utility classes for this variant.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => {
                "border-transparent bg-primary text-primary-foreground shadow hover:bg-primary/80"
            }
            Self::Secondary => {
                "border-transparent bg-secondary text-secondary-foreground hover:bg-secondary/80"
            }
            Self::Destructive => {
                "border-transparent bg-destructive text-destructive-foreground shadow hover:bg-destructive/80"
            }
            Self::Outline => "text-foreground",
        }
    }
}

/// Full class string for a button, with the caller's `extra` classes applied last.
pub fn button_classes(variant: ButtonVariant, size: ButtonSize, extra: Option<&str>) -> String {
    cn([
        BUTTON_BASE,
        variant.classes(),
        size.classes(),
        extra.unwrap_or_default(),
    ])
}

/// Full class string for a toggle, with the caller's `extra` classes applied last.
pub fn toggle_classes(variant: ToggleVariant, size: ToggleSize, extra: Option<&str>) -> String {
    cn([
        TOGGLE_BASE,
        variant.classes(),
        size.classes(),
        extra.unwrap_or_default(),
    ])
}

/// Full class string for a badge.
pub fn badge_classes(variant: BadgeVariant, extra: Option<&str>) -> String {
    cn([BADGE_BASE, variant.classes(), extra.unwrap_or_default()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(classes: &str) -> Vec<&str> {
        classes.split_whitespace().collect()
    }

    #[test]
    fn caller_height_overrides_size_height() {
        let classes = button_classes(ButtonVariant::Default, ButtonSize::Sm, Some("h-12"));
        let tokens = tokens(&classes);
        assert!(tokens.contains(&"h-12"));
        assert!(!tokens.contains(&"h-8"));
        assert!(tokens.contains(&"px-3"));
    }

    #[test]
    fn size_text_overrides_base_text_size_only() {
        let classes = button_classes(ButtonVariant::Default, ButtonSize::Sm, None);
        let tokens = tokens(&classes);
        assert!(tokens.contains(&"text-xs"));
        assert!(!tokens.contains(&"text-sm"));
        assert!(tokens.contains(&"text-primary-foreground"));
        assert_eq!(tokens.iter().filter(|t| **t == "rounded-md").count(), 1);
    }

    #[test]
    fn outline_toggle_keeps_state_on_background() {
        let classes = toggle_classes(ToggleVariant::Outline, ToggleSize::Lg, None);
        let tokens = tokens(&classes);
        assert!(tokens.contains(&"data-[state=on]:bg-accent"));
        assert!(tokens.contains(&"bg-transparent"));
        assert!(tokens.contains(&"min-w-10"));
    }

    #[test]
    fn badge_outline_has_no_transparent_border() {
        let classes = badge_classes(BadgeVariant::Outline, None);
        assert!(!classes.contains("border-transparent"));
        assert!(classes.contains("text-foreground"));
    }
}
