//! Provider lookup shared by the compound components.

use leptos::use_context;
use ui_headless::UiError;

/// Looks up the context `provider` installs for `component`.
pub(crate) fn try_context<T: Clone + 'static>(
    component: &'static str,
    provider: &'static str,
) -> Result<T, UiError> {
    use_context::<T>().ok_or_else(|| UiError::missing_context(component, provider))
}

/// Like [`try_context`], panicking with the missing-context message.
///
/// # Panics
///
/// Panics when `component` is rendered outside `provider`.
pub(crate) fn expect_context<T: Clone + 'static>(
    component: &'static str,
    provider: &'static str,
) -> T {
    match try_context(component, provider) {
        Ok(context) => context,
        Err(err) => panic!("{err}"),
    }
}
