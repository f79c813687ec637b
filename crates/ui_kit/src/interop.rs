//! Browser shims for measurement, dialog animation, scroll shadows, shortcuts, and charts.
//!
//! wasm32 builds talk to the DOM through `web-sys` plus a small inline JS module for the
//! charting library. Other targets get a fallback shim that reports
//! [`UiError::Interop`] so the crate still builds and tests natively.

use chrono::NaiveDate;
use ui_headless::chart::ChartOption;
use ui_headless::placement::{Placement, Rect};
use ui_headless::shortcut::{KeyPress, KeyShortcut, Platform};
use ui_headless::UiError;

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::*;
    use crate::components::bool_token;
    use ui_headless::scroll::scroll_shadow;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    #[wasm_bindgen(inline_js = r#"
const charts = new WeakMap();

export function jsMountChart(element, optionJson) {
  const lib = globalThis.echarts;
  if (!lib || typeof lib.init !== 'function') {
    throw new Error('echarts is not loaded on this page');
  }
  let entry = charts.get(element);
  if (!entry) {
    const chart = lib.init(element, null, { renderer: 'canvas' });
    const observer = typeof ResizeObserver === 'undefined'
      ? null
      : new ResizeObserver(() => chart.resize());
    if (observer) {
      observer.observe(element);
    }
    entry = { chart, observer };
    charts.set(element, entry);
  }
  entry.chart.setOption(JSON.parse(optionJson), true);
}

export function jsDisposeChart(element) {
  const entry = charts.get(element);
  if (!entry) {
    return;
  }
  if (entry.observer) {
    entry.observer.disconnect();
  }
  entry.chart.dispose();
  charts.delete(element);
}
"#)]
    extern "C" {
        #[wasm_bindgen(catch, js_name = jsMountChart)]
        fn js_mount_chart(element: &web_sys::Element, option_json: &str) -> Result<(), JsValue>;
        #[wasm_bindgen(catch, js_name = jsDisposeChart)]
        fn js_dispose_chart(element: &web_sys::Element) -> Result<(), JsValue>;
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    fn window(operation: &'static str) -> Result<web_sys::Window, UiError> {
        web_sys::window().ok_or_else(|| UiError::interop(operation, "window unavailable"))
    }

    /// Event listener that detaches itself when dropped.
    pub struct ListenerHandle {
        target: web_sys::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl ListenerHandle {
        fn attach(
            operation: &'static str,
            target: web_sys::EventTarget,
            event: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Result<Self, UiError> {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
            target
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .map_err(|err| UiError::interop(operation, js_error_to_string(err)))?;
            Ok(Self {
                target,
                event,
                closure,
            })
        }
    }

    impl Drop for ListenerHandle {
        fn drop(&mut self) {
            let _ = self.target.remove_event_listener_with_callback(
                self.event,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }

    pub fn register_shortcut(
        shortcut: KeyShortcut,
        callback: Box<dyn Fn(KeyPress)>,
    ) -> Result<ListenerHandle, UiError> {
        let target: web_sys::EventTarget = window("register_shortcut")?.into();
        ListenerHandle::attach("register_shortcut", target, "keydown", move |ev| {
            let Some(ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if ev.default_prevented() || ev.repeat() {
                return;
            }
            let press = key_press(ev);
            if shortcut.matches(&press) {
                ev.prevent_default();
                callback(press);
            }
        })
    }

    pub fn observe_scroll_shadow(element: web_sys::HtmlElement) -> Result<ListenerHandle, UiError> {
        fn apply(element: &web_sys::HtmlElement) {
            let shadow = scroll_shadow(
                f64::from(element.scroll_top()),
                f64::from(element.scroll_height()),
                f64::from(element.client_height()),
            );
            let _ = element.set_attribute("data-scroll-top", bool_token(shadow.top));
            let _ = element.set_attribute("data-scroll-bottom", bool_token(shadow.bottom));
        }

        apply(&element);
        let observed = element.clone();
        ListenerHandle::attach(
            "observe_scroll_shadow",
            element.into(),
            "scroll",
            move |_| apply(&observed),
        )
    }

    pub fn animate_dialog(dialog: &web_sys::HtmlDialogElement, open: bool) -> Result<(), UiError> {
        if open {
            let _ = dialog.set_attribute("data-state", "open");
            if !dialog.open() {
                dialog
                    .show_modal()
                    .map_err(|err| UiError::interop("animate_dialog", js_error_to_string(err)))?;
            }
            return Ok(());
        }

        if !dialog.open() {
            return Ok(());
        }
        let _ = dialog.set_attribute("data-state", "closed");
        let window = window("animate_dialog")?;
        let duration = window
            .get_computed_style(dialog)
            .ok()
            .flatten()
            .map(|style| {
                let read = |name: &str| style.get_property_value(name).unwrap_or_default();
                exit_animation_ms(&read("animation-duration"), &read("animation-delay"))
            })
            .unwrap_or(0);
        if duration == 0 {
            dialog.close();
            return Ok(());
        }
        let closing = dialog.clone();
        let callback = Closure::once_into_js(move || {
            if closing.get_attribute("data-state").as_deref() == Some("closed") {
                closing.close();
            }
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                duration,
            )
            .map_err(|err| UiError::interop("animate_dialog", js_error_to_string(err)))?;
        Ok(())
    }

    pub fn measure_rect(element: &web_sys::Element) -> Result<Rect, UiError> {
        let rect = element.get_bounding_client_rect();
        Ok(Rect::new(rect.x(), rect.y(), rect.width(), rect.height()))
    }

    pub fn viewport_rect() -> Result<Rect, UiError> {
        let window = window("viewport_rect")?;
        let read = |value: Result<JsValue, JsValue>| {
            value
                .map_err(|err| UiError::interop("viewport_rect", js_error_to_string(err)))?
                .as_f64()
                .ok_or_else(|| UiError::interop("viewport_rect", "viewport size is not a number"))
        };
        let width = read(window.inner_width())?;
        let height = read(window.inner_height())?;
        Ok(Rect::new(0.0, 0.0, width, height))
    }

    pub fn apply_position(
        element: &web_sys::HtmlElement,
        placement: &Placement,
    ) -> Result<(), UiError> {
        let style = element.style();
        let set = |name: &str, value: String| {
            style
                .set_property(name, &value)
                .map_err(|err| UiError::interop("apply_position", js_error_to_string(err)))
        };
        set("position", "fixed".to_string())?;
        set("left", format!("{}px", placement.x.round()))?;
        set("top", format!("{}px", placement.y.round()))?;
        set("--ui-arrow-offset", format!("{}px", placement.arrow_offset.round()))?;
        let _ = element.set_attribute("data-side", placement.side.as_str());
        let _ = element.set_attribute("data-align", placement.align.as_str());
        Ok(())
    }

    pub fn mount_chart(element: &web_sys::Element, option_json: &str) -> Result<(), UiError> {
        js_mount_chart(element, option_json)
            .map_err(|err| UiError::interop("mount_chart", js_error_to_string(err)))
    }

    pub fn dispose_chart(element: &web_sys::Element) -> Result<(), UiError> {
        js_dispose_chart(element)
            .map_err(|err| UiError::interop("dispose_chart", js_error_to_string(err)))
    }

    pub fn today() -> NaiveDate {
        let now = js_sys::Date::new_0();
        let year = i32::try_from(now.get_full_year()).unwrap_or(1970);
        NaiveDate::from_ymd_opt(year, now.get_month() + 1, now.get_date()).unwrap_or_default()
    }

    pub fn platform() -> Platform {
        web_sys::window()
            .and_then(|window| window.navigator().platform().ok())
            .map_or(Platform::Other, |platform| Platform::detect(&platform))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::*;

    fn unsupported(operation: &'static str) -> UiError {
        UiError::interop(operation, "browser APIs are only available when compiled for wasm32")
    }

    /// Placeholder handle; nothing is attached outside the browser.
    pub struct ListenerHandle;

    pub fn register_shortcut(
        _shortcut: KeyShortcut,
        _callback: Box<dyn Fn(KeyPress)>,
    ) -> Result<ListenerHandle, UiError> {
        Err(unsupported("register_shortcut"))
    }

    pub fn observe_scroll_shadow(_element: web_sys::HtmlElement) -> Result<ListenerHandle, UiError> {
        Err(unsupported("observe_scroll_shadow"))
    }

    pub fn animate_dialog(_dialog: &web_sys::HtmlDialogElement, _open: bool) -> Result<(), UiError> {
        Err(unsupported("animate_dialog"))
    }

    pub fn measure_rect(_element: &web_sys::Element) -> Result<Rect, UiError> {
        Err(unsupported("measure_rect"))
    }

    pub fn viewport_rect() -> Result<Rect, UiError> {
        Err(unsupported("viewport_rect"))
    }

    pub fn apply_position(
        _element: &web_sys::HtmlElement,
        _placement: &Placement,
    ) -> Result<(), UiError> {
        Err(unsupported("apply_position"))
    }

    pub fn mount_chart(_element: &web_sys::Element, _option_json: &str) -> Result<(), UiError> {
        Err(unsupported("mount_chart"))
    }

    pub fn dispose_chart(_element: &web_sys::Element) -> Result<(), UiError> {
        Ok(())
    }

    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub fn platform() -> Platform {
        Platform::Other
    }
}

/// Window `keydown` listener for one shortcut; dropping it unregisters the listener.
pub struct ShortcutHandle {
    _listener: imp::ListenerHandle,
}

/// Scroll listener maintaining `data-scroll-top`/`data-scroll-bottom`; dropping it detaches.
pub struct ScrollShadowHandle {
    _listener: imp::ListenerHandle,
}

/// Calls `callback` whenever `shortcut` is pressed anywhere in the window.
///
/// Matching presses have their default action prevented. Auto-repeat presses are ignored.
pub fn register_shortcut(
    shortcut: KeyShortcut,
    callback: impl Fn(KeyPress) + 'static,
) -> Result<ShortcutHandle, UiError> {
    imp::register_shortcut(shortcut, Box::new(callback)).map(|listener| ShortcutHandle {
        _listener: listener,
    })
}

/// Tracks whether `element` can scroll further up or down.
pub fn observe_scroll_shadow(element: web_sys::HtmlElement) -> Result<ScrollShadowHandle, UiError> {
    imp::observe_scroll_shadow(element).map(|listener| ScrollShadowHandle {
        _listener: listener,
    })
}

/// Opens a `<dialog>` modally, or closes it once its exit animation has run.
pub fn animate_dialog(dialog: &web_sys::HtmlDialogElement, open: bool) -> Result<(), UiError> {
    imp::animate_dialog(dialog, open)
}

/// Viewport-relative bounding box of `element`.
pub fn measure_rect(element: &web_sys::Element) -> Result<Rect, UiError> {
    imp::measure_rect(element)
}

/// The layout viewport as a rectangle at the origin.
pub fn viewport_rect() -> Result<Rect, UiError> {
    imp::viewport_rect()
}

/// Moves floating content to `placement` and exposes the arrow offset as
/// `--ui-arrow-offset`.
pub fn apply_position(element: &web_sys::HtmlElement, placement: &Placement) -> Result<(), UiError> {
    imp::apply_position(element, placement)
}

/// Creates or updates the chart rendered into `element`.
pub fn mount_chart(element: &web_sys::Element, option: &ChartOption) -> Result<(), UiError> {
    let json = option.to_json_string()?;
    imp::mount_chart(element, &json)
}

/// Releases the chart rendered into `element`, if any.
pub fn dispose_chart(element: &web_sys::Element) -> Result<(), UiError> {
    imp::dispose_chart(element)
}

/// The user's local date.
pub fn today() -> NaiveDate {
    imp::today()
}

/// Platform family of the running browser.
pub fn platform() -> Platform {
    imp::platform()
}

/// Reduces a keyboard event to the fields shortcuts compare.
pub fn key_press(ev: &web_sys::KeyboardEvent) -> KeyPress {
    KeyPress {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        shift: ev.shift_key(),
        alt: ev.alt_key(),
        meta: ev.meta_key(),
    }
}

/// Longest `duration + delay` across a computed `animation-duration`/`animation-delay` pair,
/// in whole milliseconds.
pub fn exit_animation_ms(durations: &str, delays: &str) -> i32 {
    let durations: Vec<f64> = durations.split(',').map(parse_css_time_ms).collect();
    let delays: Vec<f64> = delays.split(',').map(parse_css_time_ms).collect();
    let longest = durations
        .iter()
        .enumerate()
        .map(|(index, duration)| {
            let delay = if delays.is_empty() {
                0.0
            } else {
                delays[index % delays.len()]
            };
            duration + delay
        })
        .fold(0.0_f64, f64::max);
    longest.round().clamp(0.0, f64::from(i32::MAX)) as i32
}

fn parse_css_time_ms(value: &str) -> f64 {
    let value = value.trim();
    let parsed = if let Some(ms) = value.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()
    } else if let Some(seconds) = value.strip_suffix('s') {
        seconds.trim().parse::<f64>().ok().map(|seconds| seconds * 1000.0)
    } else {
        None
    };
    parsed.filter(|ms| ms.is_finite() && *ms > 0.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exit_animation_takes_longest_duration_plus_delay() {
        assert_eq!(exit_animation_ms("0.2s, 150ms", "0s, 100ms"), 250);
        assert_eq!(exit_animation_ms("0s", "0s"), 0);
        assert_eq!(exit_animation_ms("", ""), 0);
        assert_eq!(exit_animation_ms("300ms", "50ms"), 350);
    }

    #[test]
    fn delays_repeat_across_durations() {
        assert_eq!(exit_animation_ms("100ms, 200ms", "50ms"), 250);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_fallback_reports_interop_errors() {
        assert!(matches!(
            viewport_rect(),
            Err(UiError::Interop { operation: "viewport_rect", .. })
        ));
        assert_eq!(platform(), Platform::Other);
    }
}
