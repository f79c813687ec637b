//! Library defaults shared through the Leptos context tree.

use leptos::*;
use ui_headless::UiConfig;

/// Makes `config` the defaults for every component rendered below the current owner.
pub fn provide_ui_config(config: UiConfig) {
    provide_context(config);
}

/// Defaults in effect for the current owner, or the built-in defaults when none were provided.
pub fn use_ui_config() -> UiConfig {
    use_context::<UiConfig>().unwrap_or_default()
}

#[component]
/// Provides library defaults to its children, either as a value or as TOML text.
///
/// Invalid TOML is logged and replaced by the built-in defaults.
pub fn UiConfigProvider(
    #[prop(optional)] config: Option<UiConfig>,
    #[prop(optional)] toml: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let config = match (config, toml) {
        (Some(config), _) => config,
        (None, Some(text)) => UiConfig::from_toml_str(text).unwrap_or_else(|err| {
            logging::warn!("ui config rejected, using defaults: {err}");
            UiConfig::default()
        }),
        (None, None) => UiConfig::default(),
    };
    provide_ui_config(config);
    children().into_view()
}
