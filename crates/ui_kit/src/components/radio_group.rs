use ui_headless::roving::{navigate, NavKey, Orientation};
use ui_headless::selection::SelectionState;
use ui_headless::UiError;

use super::*;

const ITEM_SELECTOR: &str = "[data-slot=\"radio-group-item\"]";

#[derive(Clone, Copy)]
/// Shared state of a [`RadioGroup`].
pub struct RadioGroupContext {
    /// Registered items and the checked value.
    pub selection: RwSignal<SelectionState<String>>,
    /// Disables the whole group.
    pub disabled: Signal<bool>,
    /// Arrow-key axis.
    pub orientation: Orientation,
    /// Whether arrow keys wrap around.
    pub loop_focus: bool,
    name: Option<StoredValue<String>>,
    root: NodeRef<html::Div>,
    value: Option<RwSignal<Option<String>>>,
    on_value_change: Option<Callback<String>>,
}

impl RadioGroupContext {
    /// Checks `value`. A checked radio stays checked when chosen again.
    pub fn check(&self, value: &str) {
        if self.disabled.get_untracked() {
            return;
        }
        let value = value.to_string();
        let mut changed = false;
        self.selection
            .update(|selection| changed = selection.select(&value));
        if !changed {
            return;
        }
        if let Some(signal) = self.value {
            signal.set(Some(value.clone()));
        }
        if let Some(on_value_change) = self.on_value_change.as_ref() {
            on_value_change.call(value);
        }
    }

    /// Moves focus for an arrow key and checks the newly focused item.
    fn navigate_from(&self, value: &str, key: &str) -> bool {
        let Some(nav) = NavKey::from_key(key, self.orientation) else {
            return false;
        };
        let target = self.selection.with_untracked(|selection| {
            let from = selection.index_of(&value.to_string());
            navigate(&selection.disabled_flags(), from, nav, self.loop_focus).and_then(|index| {
                selection
                    .options()
                    .get(index)
                    .map(|option| (index, option.value.clone()))
            })
        });
        let Some((index, target)) = target else {
            return true;
        };
        if let Some(root) = self.root.get_untracked() {
            focus_nth(&root, ITEM_SELECTOR, index);
        }
        self.check(&target);
        true
    }
}

/// The enclosing [`RadioGroup`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`RadioGroup`].
pub fn try_use_radio_group() -> Result<RadioGroupContext, UiError> {
    try_context("RadioGroupItem", "RadioGroup")
}

#[component]
/// Set of mutually exclusive options navigated with arrow keys.
pub fn RadioGroup(
    #[prop(optional)] value: Option<RwSignal<Option<String>>>,
    #[prop(optional, into)] default_value: Option<String>,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(default = Orientation::Both)] orientation: Orientation,
    #[prop(default = true)] loop_focus: bool,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<String>>,
    children: Children,
) -> impl IntoView {
    let mut initial = SelectionState::radio();
    initial.set_selected(
        value
            .and_then(|value| value.get_untracked())
            .or(default_value),
    );
    let selection = create_rw_signal(initial);

    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            let current = selection.with_untracked(|selection| selection.first_selected().cloned());
            if requested != current {
                selection.update(|selection| selection.set_selected(requested));
            }
        });
    }

    let aria_orientation = match orientation {
        Orientation::Both => None,
        other => Some(other.token()),
    };
    let root = create_node_ref::<html::Div>();
    provide_context(RadioGroupContext {
        selection,
        disabled: Signal::derive(move || disabled.get()),
        orientation,
        loop_focus,
        name: name.map(store_value),
        root,
        value,
        on_value_change,
    });

    view! {
        <div
            node_ref=root
            role="radiogroup"
            aria-label=aria_label
            aria-orientation=aria_orientation
            class=merge_class("grid gap-2", class.as_deref())
            data-slot="radio-group"
        >
            {children()}
        </div>
    }
}

#[component]
/// One option inside a [`RadioGroup`].
///
/// # Panics
///
/// Panics when rendered outside a [`RadioGroup`].
pub fn RadioGroupItem(
    #[prop(into)] value: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: RadioGroupContext = expect_context("RadioGroupItem", "RadioGroup");
    context
        .selection
        .update(|selection| selection.register(value.clone(), disabled));
    {
        let value = value.clone();
        on_cleanup(move || {
            context
                .selection
                .try_update(|selection| selection.unregister(&value));
        });
    }

    let value = store_value(value);
    let checked = create_memo(move |_| {
        context
            .selection
            .with(|selection| value.with_value(|value| selection.is_selected(value)))
    });
    let is_disabled = move || disabled || context.disabled.get();
    let tab_index = move || {
        context.selection.with(|selection| {
            let own = value.with_value(|value| selection.index_of(value));
            let focusable = selection
                .first_selected()
                .and_then(|selected| selection.index_of(selected))
                .or_else(|| selection.disabled_flags().iter().position(|flag| !flag));
            if own.is_some() && own == focusable {
                0
            } else {
                -1
            }
        })
    };
    let class = merge_class(
        "aspect-square size-4 shrink-0 rounded-full border border-primary text-primary shadow focus-visible:outline-none focus-visible:ring-1 focus-visible:ring-ring disabled:cursor-not-allowed disabled:opacity-50",
        class.as_deref(),
    );

    view! {
        <button
            type="button"
            role="radio"
            id=id
            class=class
            aria-label=aria_label
            aria-checked=move || bool_token(checked.get())
            disabled=is_disabled
            tabindex=tab_index
            data-state=move || checked_token(checked.get())
            data-disabled=move || is_disabled().then_some("")
            data-value=value.get_value()
            data-slot="radio-group-item"
            on:click=move |_| context.check(&value.get_value())
            on:keydown=move |ev: KeyboardEvent| {
                if context.navigate_from(&value.get_value(), &ev.key()) {
                    ev.prevent_default();
                }
            }
        >
            <Show when=move || checked.get()>
                <span
                    class="flex items-center justify-center"
                    data-slot="radio-group-indicator"
                >
                    <span class="size-2 rounded-full bg-primary"></span>
                </span>
            </Show>
        </button>
        {context.name.map(|name| {
            view! {
                <input
                    type="radio"
                    aria-hidden="true"
                    tabindex="-1"
                    class="pointer-events-none absolute size-px opacity-0"
                    name=name.get_value()
                    value=value.get_value()
                    prop:checked=move || checked.get()
                    disabled=is_disabled
                />
            }
        })}
    }
}
