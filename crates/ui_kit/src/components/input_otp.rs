use web_sys::ClipboardEvent;
use ui_headless::otp::{slot_groups, OtpPattern, OtpState};
use ui_headless::UiError;

use super::*;
use crate::config::use_ui_config;

/// Slots for `length`, falling back to `fallback` when `length` is rejected.
fn initial_state(
    length: usize,
    fallback: usize,
    pattern: OtpPattern,
) -> Result<OtpState, UiError> {
    OtpState::new(length, pattern).or_else(|err| {
        logging::warn!("{err}");
        OtpState::new(fallback, pattern)
    })
}

/// The single character a key produces, if it produces exactly one.
fn typed_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Applies a keydown to `state`. Returns whether the key was consumed and whether the value
/// changed.
fn apply_key(state: &mut OtpState, key: &str) -> (bool, bool) {
    let before = state.value();
    let handled = state.handle_key(key);
    let typed = typed_char(key);
    if let (false, Some(ch)) = (handled, typed) {
        state.input(ch);
    }
    (handled || typed.is_some(), state.value() != before)
}

#[derive(Clone, Copy)]
/// Shared state of an [`InputOtp`].
pub struct InputOtpContext {
    /// Slot contents and caret.
    pub state: RwSignal<OtpState>,
    /// Whether the hidden input has focus.
    pub focused: RwSignal<bool>,
    /// Disables entry.
    pub disabled: Signal<bool>,
    input: NodeRef<html::Input>,
}

impl InputOtpContext {
    /// Moves the caret to `index` and focuses the input.
    pub fn focus_slot(&self, index: usize) {
        if self.disabled.get_untracked() {
            return;
        }
        self.state.update(|state| state.focus(index));
        if let Some(input) = self.input.get_untracked() {
            let _ = input.focus();
        }
    }
}

/// The enclosing [`InputOtp`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside an [`InputOtp`].
pub fn try_use_input_otp() -> Result<InputOtpContext, UiError> {
    try_context("InputOtpSlot", "InputOtp")
}

#[component]
/// One-time-code entry split across fixed slots.
///
/// `length` defaults to the `[otp]` configuration; a zero length is logged and replaced by
/// that default. Without children the slots are rendered in `groups` separated by
/// [`InputOtpSeparator`]. `on_complete` fires each time the last empty slot is filled.
pub fn InputOtp(
    #[prop(optional)] length: Option<usize>,
    #[prop(optional)] pattern: OtpPattern,
    #[prop(optional)] value: Option<RwSignal<String>>,
    #[prop(optional)] groups: Vec<usize>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
    #[prop(optional)] on_complete: Option<Callback<String>>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let default_length = use_ui_config().otp.default_length;
    let mut initial = match initial_state(length.unwrap_or(default_length), default_length, pattern)
    {
        Ok(state) => state,
        Err(err) => {
            logging::warn!("{err}");
            return ().into_view();
        }
    };
    if let Some(value) = value {
        value.with_untracked(|value| initial.set_value(value));
    }
    let slot_count = initial.len();
    let state = create_rw_signal(initial);
    let input = create_node_ref::<html::Input>();
    let disabled = Signal::derive(move || disabled.get());
    let context = InputOtpContext {
        state,
        focused: create_rw_signal(false),
        disabled,
        input,
    };
    provide_context(context);

    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            if state.with_untracked(|state| state.value() != requested) {
                state.update(|state| state.set_value(&requested));
            }
        });
    }

    let was_complete = store_value(state.with_untracked(OtpState::is_complete));
    let publish = move || {
        let (current, complete) = state.with_untracked(|state| (state.value(), state.is_complete()));
        if let Some(value) = value {
            if value.with_untracked(|value| *value != current) {
                value.set(current.clone());
            }
        }
        if let Some(on_change) = on_change.as_ref() {
            on_change.call(current.clone());
        }
        if complete && !was_complete.get_value() {
            if let Some(on_complete) = on_complete.as_ref() {
                on_complete.call(current);
            }
        }
        was_complete.set_value(complete);
    };

    let on_keydown = move |ev: KeyboardEvent| {
        if disabled.get_untracked() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        let key = ev.key();
        let (mut consumed, mut changed) = (false, false);
        state.update(|state| (consumed, changed) = apply_key(state, &key));
        if consumed {
            ev.prevent_default();
        }
        if changed {
            publish();
        }
    };
    let on_paste = move |ev: ClipboardEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        let Some(text) = ev
            .clipboard_data()
            .and_then(|data| data.get_data("text").ok())
        else {
            return;
        };
        let mut written = 0;
        state.update(|state| written = state.paste(&text));
        if written > 0 {
            publish();
        }
    };
    // Virtual keyboards may insert text without a usable keydown.
    let on_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        if let Some(input) = input.get_untracked() {
            input.set_value("");
        }
        if text.is_empty() || disabled.get_untracked() {
            return;
        }
        let mut changed = false;
        state.update(|state| {
            for ch in text.chars() {
                changed |= state.input(ch);
            }
        });
        if changed {
            publish();
        }
    };

    let slots = match children {
        Some(children) => children().into_view(),
        None => {
            let groups = slot_groups(slot_count, &groups);
            let last = groups.len().saturating_sub(1);
            groups
                .into_iter()
                .enumerate()
                .map(|(position, group)| {
                    view! {
                        <InputOtpGroup>
                            {group
                                .into_iter()
                                .map(|index| view! { <InputOtpSlot index=index/> })
                                .collect_view()}
                        </InputOtpGroup>
                        {(position < last).then(|| view! { <InputOtpSeparator/> })}
                    }
                })
                .collect_view()
        }
    };

    view! {
        <div
            class=merge_class(
                "relative flex items-center gap-2 has-[:disabled]:opacity-50",
                class.as_deref(),
            )
            data-slot="input-otp"
            on:click=move |_| {
                if let Some(input) = input.get_untracked() {
                    let _ = input.focus();
                }
            }
        >
            <input
                node_ref=input
                type="text"
                class="pointer-events-none absolute inset-0 opacity-0"
                autocomplete="one-time-code"
                inputmode=pattern.input_mode()
                maxlength=slot_count
                aria-label=aria_label
                disabled=move || disabled.get()
                on:keydown=on_keydown
                on:paste=move |ev: ev::Event| on_paste(ev.unchecked_into::<ClipboardEvent>())
                on:input=on_input
                on:focus=move |_| context.focused.set(true)
                on:blur=move |_| context.focused.set(false)
            />
            {slots}
        </div>
    }
    .into_view()
}

#[component]
/// Visual run of adjacent slots.
pub fn InputOtpGroup(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=merge_class("flex items-center", class.as_deref()) data-slot="input-otp-group">
            {children()}
        </div>
    }
}

#[component]
/// Box showing slot `index` and, when it is the active empty slot, a blinking caret.
///
/// # Panics
///
/// Panics when rendered outside an [`InputOtp`].
pub fn InputOtpSlot(
    index: usize,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: InputOtpContext = expect_context("InputOtpSlot", "InputOtp");
    let filled = move || context.state.with(|state| state.slot(index));
    let active =
        move || context.focused.get() && context.state.with(|state| state.active() == index);

    view! {
        <div
            class=merge_class(
                "relative flex h-9 w-9 items-center justify-center border-y border-r border-input text-sm shadow-sm transition-all first:rounded-l-md first:border-l last:rounded-r-md data-[active=true]:z-10 data-[active=true]:ring-1 data-[active=true]:ring-ring",
                class.as_deref(),
            )
            data-active=move || bool_token(active())
            data-slot="input-otp-slot"
            on:pointerdown=move |ev| {
                ev.prevent_default();
                context.focus_slot(index);
            }
        >
            {move || filled().map(String::from)}
            <Show when=move || active() && filled().is_none()>
                <div class="pointer-events-none absolute inset-0 flex items-center justify-center">
                    <div class="h-4 w-px animate-caret-blink bg-foreground duration-1000"></div>
                </div>
            </Show>
        </div>
    }
}

#[component]
/// Divider between slot groups.
pub fn InputOtpSeparator(#[prop(optional, into)] class: Option<String>) -> impl IntoView {
    view! {
        <div role="separator" class=class data-slot="input-otp-separator">
            <span aria-hidden="true">"-"</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_length_falls_back() {
        let state = initial_state(0, 4, OtpPattern::Digits).expect("fallback state");
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn zero_fallback_is_an_error() {
        assert!(initial_state(0, 0, OtpPattern::Digits).is_err());
    }

    #[test]
    fn only_single_characters_are_typed() {
        assert_eq!(typed_char("7"), Some('7'));
        assert_eq!(typed_char("ArrowLeft"), None);
        assert_eq!(typed_char(""), None);
    }

    #[test]
    fn caret_keys_leave_the_value_alone() {
        let mut state = OtpState::new(4, OtpPattern::Digits).expect("state");
        state.set_value("12");
        assert_eq!(apply_key(&mut state, "ArrowLeft"), (true, false));
        assert_eq!(apply_key(&mut state, "Home"), (true, false));
        assert_eq!(apply_key(&mut state, "End"), (true, false));
        assert_eq!(apply_key(&mut state, "x"), (true, false));
        assert_eq!(apply_key(&mut state, "3"), (true, true));
        assert_eq!(apply_key(&mut state, "Backspace"), (true, true));
        assert_eq!(state.value(), "12");
    }
}
