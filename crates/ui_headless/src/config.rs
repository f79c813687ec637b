//! Library-wide defaults, loadable from TOML.
//!
//! ```toml
//! [date]
//! week_start = "monday"
//!
//! [pagination]
//! sibling_count = 2
//!
//! [combobox]
//! empty_text = "Nothing matches."
//! ```
//!
//! Every section and field is optional; missing values keep their defaults.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// First day of the calendar week.
pub enum WeekStart {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    #[default]
    Sunday,
}

impl From<WeekStart> for Weekday {
    fn from(value: WeekStart) -> Self {
        match value {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[date]` section.
pub struct DateConfig {
    /// First weekday column.
    pub week_start: WeekStart,
    /// Always render six weeks.
    pub fixed_weeks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[pagination]` section.
pub struct PaginationConfig {
    /// Pages shown on each side of the current page.
    pub sibling_count: u32,
    /// Pages always shown at each end.
    pub boundary_count: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            sibling_count: 1,
            boundary_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[popover]` section.
pub struct PopoverConfig {
    /// Gap between trigger and content in pixels.
    pub side_offset: f64,
    /// Viewport margin in pixels.
    pub collision_padding: f64,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            side_offset: 4.0,
            collision_padding: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[otp]` section.
pub struct OtpConfig {
    /// Slot count when a component does not set one.
    pub default_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { default_length: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[combobox]` section.
pub struct ComboboxConfig {
    /// Arrow keys wrap around the list.
    pub loop_focus: bool,
    /// Text shown when the filter matches nothing.
    pub empty_text: String,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            loop_focus: true,
            empty_text: "No results found.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// `[slider]` section.
pub struct SliderConfig {
    /// Step when a slider does not set one.
    pub default_step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { default_step: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Defaults shared by every component.
pub struct UiConfig {
    /// Calendar defaults.
    pub date: DateConfig,
    /// Pagination defaults.
    pub pagination: PaginationConfig,
    /// Popover defaults.
    pub popover: PopoverConfig,
    /// OTP input defaults.
    pub otp: OtpConfig,
    /// Combobox defaults.
    pub combobox: ComboboxConfig,
    /// Slider defaults.
    pub slider: SliderConfig,
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] for malformed TOML, unknown keys, or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self, UiError> {
        let config: Self = toml::from_str(text)
            .map_err(|err| UiError::Config(format!("failed to parse: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] when serialization fails.
    pub fn to_toml_string(&self) -> Result<String, UiError> {
        toml::to_string(self).map_err(|err| UiError::Config(format!("failed to serialize: {err}")))
    }

    /// Checks value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), UiError> {
        if self.otp.default_length == 0 {
            return Err(UiError::Config(
                "otp.default_length must be at least 1".to_string(),
            ));
        }
        if !(self.slider.default_step.is_finite() && self.slider.default_step > 0.0) {
            return Err(UiError::Config(
                "slider.default_step must be a positive number".to_string(),
            ));
        }
        for (field, value) in [
            ("popover.side_offset", self.popover.side_offset),
            ("popover.collision_padding", self.popover.collision_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(UiError::Config(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    /// Configured week start as a chrono weekday.
    pub fn week_start(&self) -> Weekday {
        self.date.week_start.into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = UiConfig::from_toml_str("").expect("config");
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.week_start(), Weekday::Sun);
        assert_eq!(config.combobox.empty_text, "No results found.");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = UiConfig::from_toml_str(
            r#"
            [date]
            week_start = "monday"

            [pagination]
            sibling_count = 2
            "#,
        )
        .expect("config");
        assert_eq!(config.week_start(), Weekday::Mon);
        assert_eq!(config.pagination.sibling_count, 2);
        assert_eq!(config.pagination.boundary_count, 1);
        assert_eq!(config.otp.default_length, 6);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for text in [
            "[otp]\ndefault_length = 0",
            "[slider]\ndefault_step = -1.0",
            "[popover]\nside_offset = -4.0",
            "[date]\nweek_start = \"someday\"",
            "[pagination]\nsiblings = 2",
        ] {
            assert!(
                matches!(UiConfig::from_toml_str(text), Err(UiError::Config(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = UiConfig::default();
        config.combobox.loop_focus = false;
        let text = config.to_toml_string().expect("toml");
        assert_eq!(UiConfig::from_toml_str(&text).expect("config"), config);
    }
}
