use leptos::ev::PointerEvent;
use ui_headless::placement::Rect;
use ui_headless::roving::Orientation;
use ui_headless::slider::SliderState;

use super::*;
use crate::config::use_ui_config;
use crate::interop::measure_rect;

/// Track position of a pointer as a 0..1 ratio, bottom-up for vertical sliders.
fn pointer_ratio(rect: &Rect, x: f64, y: f64, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Vertical if rect.height > 0.0 => (rect.bottom() - y) / rect.height,
        Orientation::Horizontal | Orientation::Both if rect.width > 0.0 => {
            (x - rect.x) / rect.width
        }
        _ => 0.0,
    }
}

#[component]
/// Range input with one thumb per value, driven by pointer drags and the keyboard.
///
/// `min >= max` is logged and replaced by a 0 to 100 slider. `step` defaults to the
/// configured slider step.
pub fn Slider(
    #[prop(optional)] value: Option<RwSignal<Vec<f64>>>,
    #[prop(optional)] default_value: Vec<f64>,
    #[prop(default = 0.0)] min: f64,
    #[prop(default = 100.0)] max: f64,
    #[prop(optional)] step: Option<f64>,
    #[prop(optional)] min_steps_between: u32,
    #[prop(optional)] orientation: Orientation,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<Vec<f64>>>,
    #[prop(optional)] on_value_commit: Option<Callback<Vec<f64>>>,
) -> impl IntoView {
    let step = step.unwrap_or_else(|| use_ui_config().slider.default_step);
    let initial = value.map(|value| value.get_untracked()).unwrap_or(default_value);
    let state = match SliderState::new(initial, min, max, step) {
        Ok(state) => state.with_min_steps_between(min_steps_between),
        Err(err) => {
            logging::warn!("{err}");
            SliderState::default()
        }
    };
    let state = create_rw_signal(state);

    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            let current = state.with_untracked(|state| state.values().to_vec());
            if requested != current {
                state.update(|state| {
                    for (thumb, raw) in requested.iter().enumerate() {
                        state.set_value(thumb, *raw);
                    }
                });
            }
        });
    }

    let publish = move |changed: bool| {
        if !changed {
            return;
        }
        let values = state.with_untracked(|state| state.values().to_vec());
        if let Some(value) = value {
            value.set(values.clone());
        }
        if let Some(on_value_change) = on_value_change.as_ref() {
            on_value_change.call(values);
        }
    };
    let commit = move || {
        if let Some(on_value_commit) = on_value_commit.as_ref() {
            on_value_commit.call(state.with_untracked(|state| state.values().to_vec()));
        }
    };

    let root = create_node_ref::<html::Span>();
    let active_thumb = create_rw_signal(None::<usize>);
    let value_at_pointer = move |ev: &PointerEvent| -> Option<f64> {
        let root = root.get_untracked()?;
        match measure_rect(&root) {
            Ok(rect) => {
                let ratio = pointer_ratio(
                    &rect,
                    f64::from(ev.client_x()),
                    f64::from(ev.client_y()),
                    orientation,
                );
                Some(state.with_untracked(|state| state.value_from_ratio(ratio)))
            }
            Err(err) => {
                logging::warn!("{err}");
                None
            }
        }
    };

    let on_pointerdown = move |ev: PointerEvent| {
        if disabled.get_untracked() || ev.button() != 0 {
            return;
        }
        let Some(raw) = value_at_pointer(&ev) else {
            return;
        };
        ev.prevent_default();
        if let Some(root) = root.get_untracked() {
            let _ = root.set_pointer_capture(ev.pointer_id());
        }
        let thumb = state.with_untracked(|state| state.closest_thumb(raw));
        active_thumb.set(Some(thumb));
        let mut changed = false;
        state.update(|state| changed = state.set_value(thumb, raw));
        publish(changed);
    };
    let on_pointermove = move |ev: PointerEvent| {
        let Some(thumb) = active_thumb.get_untracked() else {
            return;
        };
        let Some(raw) = value_at_pointer(&ev) else {
            return;
        };
        let mut changed = false;
        state.update(|state| changed = state.set_value(thumb, raw));
        publish(changed);
    };
    let on_pointerup = move |ev: PointerEvent| {
        if active_thumb.get_untracked().is_none() {
            return;
        }
        active_thumb.set(None);
        if let Some(root) = root.get_untracked() {
            let _ = root.release_pointer_capture(ev.pointer_id());
        }
        commit();
    };

    let thumb_count = create_memo(move |_| state.with(|state| state.values().len()));
    let range_style = move || {
        let (start, end) = state.with(SliderState::range_percent);
        match orientation {
            Orientation::Vertical => format!("bottom: {start}%; height: {}%;", end - start),
            Orientation::Horizontal | Orientation::Both => {
                format!("left: {start}%; width: {}%;", end - start)
            }
        }
    };
    let thumbs = move || {
        (0..thumb_count.get())
            .map(|thumb| {
                let percent = move || state.with(|state| state.percent(thumb));
                let thumb_style = move || match orientation {
                    Orientation::Vertical => format!("bottom: {}%; transform: translateY(50%);", percent()),
                    Orientation::Horizontal | Orientation::Both => {
                        format!("left: {}%; transform: translateX(-50%);", percent())
                    }
                };
                view! {
                    <span
                        role="slider"
                        tabindex=move || if disabled.get() { -1 } else { 0 }
                        aria-label=aria_label.clone()
                        aria-valuemin=move || state.with(SliderState::min)
                        aria-valuemax=move || state.with(SliderState::max)
                        aria-valuenow=move || state.with(|state| state.value(thumb))
                        aria-orientation=orientation.token()
                        aria-disabled=move || disabled.get().then_some("true")
                        class="absolute block size-4 rounded-full border border-primary/50 bg-background shadow transition-colors focus-visible:outline-none focus-visible:ring-1 focus-visible:ring-ring disabled:pointer-events-none disabled:opacity-50"
                        style=thumb_style
                        data-slot="slider-thumb"
                        on:keydown=move |ev: KeyboardEvent| {
                            if disabled.get_untracked() {
                                return;
                            }
                            let key = ev.key();
                            let mut handled = false;
                            let mut changed = false;
                            state.update(|state| {
                                let before = state.values().to_vec();
                                handled = state.handle_key(thumb, &key, ev.shift_key());
                                changed = before != state.values();
                            });
                            if handled {
                                ev.prevent_default();
                                publish(changed);
                                if changed {
                                    commit();
                                }
                            }
                        }
                    ></span>
                }
            })
            .collect_view()
    };

    let class = merge_class(
        "relative flex w-full touch-none select-none items-center data-[orientation=vertical]:h-full data-[orientation=vertical]:w-auto data-[orientation=vertical]:flex-col data-[disabled]:opacity-50",
        class.as_deref(),
    );
    view! {
        <span
            node_ref=root
            class=class
            data-orientation=orientation.token()
            data-disabled=move || disabled.get().then_some("")
            data-slot="slider"
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:pointercancel=on_pointerup
        >
            <span
                class="relative h-1.5 w-full grow overflow-hidden rounded-full bg-primary/20 data-[orientation=vertical]:h-full data-[orientation=vertical]:w-1.5"
                data-orientation=orientation.token()
                data-slot="slider-track"
            >
                <span
                    class="absolute bg-primary data-[orientation=horizontal]:h-full data-[orientation=vertical]:w-full"
                    data-orientation=orientation.token()
                    style=range_style
                    data-slot="slider-range"
                ></span>
            </span>
            {thumbs}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn horizontal_ratio_is_measured_from_the_left() {
        let rect = Rect::new(100.0, 0.0, 200.0, 20.0);
        assert_eq!(pointer_ratio(&rect, 150.0, 10.0, Orientation::Horizontal), 0.25);
    }

    #[test]
    fn vertical_ratio_is_measured_from_the_bottom() {
        let rect = Rect::new(0.0, 0.0, 20.0, 200.0);
        assert_eq!(pointer_ratio(&rect, 10.0, 150.0, Orientation::Vertical), 0.25);
    }

    #[test]
    fn collapsed_track_yields_zero() {
        let rect = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(pointer_ratio(&rect, 10.0, 10.0, Orientation::Horizontal), 0.0);
    }
}
