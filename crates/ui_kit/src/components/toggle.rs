use ui_headless::roving::{navigate, NavKey, Orientation};
use ui_headless::selection::{SelectionMode, SelectionState};
use ui_headless::variants::{toggle_classes, ToggleSize, ToggleVariant};
use ui_headless::UiError;

use super::*;

const ITEM_SELECTOR: &str = "[data-slot=\"toggle-group-item\"]";

#[component]
/// Two-state button. Pass `pressed` to control it, or `default_pressed` to let it own its state.
pub fn Toggle(
    #[prop(optional)] pressed: Option<RwSignal<bool>>,
    #[prop(optional)] default_pressed: bool,
    #[prop(optional)] variant: ToggleVariant,
    #[prop(optional)] size: ToggleSize,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_pressed_change: Option<Callback<bool>>,
    children: Children,
) -> impl IntoView {
    let pressed = pressed.unwrap_or_else(|| create_rw_signal(default_pressed));
    view! {
        <button
            type="button"
            class=toggle_classes(variant, size, class.as_deref())
            aria-label=aria_label
            aria-pressed=move || bool_token(pressed.get())
            disabled=move || disabled.get()
            data-state=move || on_token(pressed.get())
            data-disabled=move || disabled.get().then_some("")
            data-slot="toggle"
            on:click=move |_| {
                if disabled.get_untracked() {
                    return;
                }
                let next = !pressed.get_untracked();
                pressed.set(next);
                if let Some(on_pressed_change) = on_pressed_change.as_ref() {
                    on_pressed_change.call(next);
                }
            }
        >
            {children()}
        </button>
    }
}

#[derive(Clone, Copy)]
/// Shared state of a [`ToggleGroup`].
pub struct ToggleGroupContext {
    /// Registered items and the pressed values.
    pub selection: RwSignal<SelectionState<String>>,
    /// Variant applied to every item.
    pub variant: ToggleVariant,
    /// Size applied to every item.
    pub size: ToggleSize,
    /// Disables the whole group.
    pub disabled: Signal<bool>,
    /// Arrow-key axis.
    pub orientation: Orientation,
    /// Whether arrow keys wrap around.
    pub loop_focus: bool,
    root: NodeRef<html::Div>,
    value: Option<RwSignal<Vec<String>>>,
    on_value_change: Option<Callback<Vec<String>>>,
}

impl ToggleGroupContext {
    /// Flips `value` and publishes the new selection.
    pub fn toggle(&self, value: &str) {
        if self.disabled.get_untracked() {
            return;
        }
        let mut changed = false;
        self.selection
            .update(|selection| changed = selection.toggle(&value.to_string()));
        if !changed {
            return;
        }
        let selected = self.selection.with_untracked(|selection| selection.selected().to_vec());
        if let Some(value) = self.value {
            value.set(selected.clone());
        }
        if let Some(on_value_change) = self.on_value_change.as_ref() {
            on_value_change.call(selected);
        }
    }

    fn focus_from(&self, value: &str, key: &str) -> bool {
        let Some(nav) = NavKey::from_key(key, self.orientation) else {
            return false;
        };
        let target = self.selection.with_untracked(|selection| {
            let from = selection.index_of(&value.to_string());
            navigate(&selection.disabled_flags(), from, nav, self.loop_focus)
        });
        if let (Some(index), Some(root)) = (target, self.root.get_untracked()) {
            focus_nth(&root, ITEM_SELECTOR, index);
        }
        true
    }
}

/// The enclosing [`ToggleGroup`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`ToggleGroup`].
pub fn try_use_toggle_group() -> Result<ToggleGroupContext, UiError> {
    try_context("ToggleGroupItem", "ToggleGroup")
}

#[component]
/// Set of toggles sharing one selection, single or multiple.
///
/// `value` makes the selection controlled; otherwise `default_value` seeds it. Values that name
/// items which have not mounted yet are applied once those items register.
pub fn ToggleGroup(
    #[prop(optional)] mode: SelectionMode,
    #[prop(optional)] value: Option<RwSignal<Vec<String>>>,
    #[prop(optional)] default_value: Vec<String>,
    #[prop(default = true)] allow_deselect: bool,
    #[prop(optional)] variant: ToggleVariant,
    #[prop(optional)] size: ToggleSize,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] orientation: Orientation,
    #[prop(default = true)] loop_focus: bool,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<Vec<String>>>,
    children: Children,
) -> impl IntoView {
    let mut initial = SelectionState::new(mode).with_allow_deselect(allow_deselect);
    initial.set_selected(
        value
            .map(|value| value.get_untracked())
            .unwrap_or(default_value),
    );
    let selection = create_rw_signal(initial);

    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            let current = selection.with_untracked(|selection| selection.selected().to_vec());
            if requested != current {
                selection.update(|selection| selection.set_selected(requested));
            }
        });
    }

    let variant_token = match variant {
        ToggleVariant::Default => "default",
        ToggleVariant::Outline => "outline",
    };
    let root = create_node_ref::<html::Div>();
    let context = ToggleGroupContext {
        selection,
        variant,
        size,
        disabled: Signal::derive(move || disabled.get()),
        orientation,
        loop_focus,
        root,
        value,
        on_value_change,
    };
    provide_context(context);

    view! {
        <div
            node_ref=root
            role="group"
            aria-label=aria_label
            class=merge_class("flex w-fit items-center gap-1 rounded-md", class.as_deref())
            data-orientation=orientation.token()
            data-variant=variant_token
            data-slot="toggle-group"
        >
            {children()}
        </div>
    }
}

#[component]
/// A toggle inside a [`ToggleGroup`].
///
/// # Panics
///
/// Panics when rendered outside a [`ToggleGroup`].
pub fn ToggleGroupItem(
    #[prop(into)] value: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: ToggleGroupContext = expect_context("ToggleGroupItem", "ToggleGroup");
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
    let pressed = create_memo(move |_| {
        context
            .selection
            .with(|selection| value.with_value(|value| selection.is_selected(value)))
    });
    let is_disabled = move || disabled || context.disabled.get();
    let tab_index = move || {
        context.selection.with(|selection| {
            let own = value.with_value(|value| selection.index_of(value));
            let active = selection
                .selected()
                .iter()
                .find_map(|selected| selection.index_of(selected))
                .or_else(|| selection.disabled_flags().iter().position(|flag| !flag));
            if own.is_some() && own == active {
                0
            } else {
                -1
            }
        })
    };

    view! {
        <button
            type="button"
            class=toggle_classes(context.variant, context.size, class.as_deref())
            aria-label=aria_label
            aria-pressed=move || bool_token(pressed.get())
            disabled=is_disabled
            tabindex=tab_index
            data-state=move || on_token(pressed.get())
            data-disabled=move || is_disabled().then_some("")
            data-value=value.get_value()
            data-slot="toggle-group-item"
            on:click=move |_| context.toggle(&value.get_value())
            on:keydown=move |ev: KeyboardEvent| {
                if context.focus_from(&value.get_value(), &ev.key()) {
                    ev.prevent_default();
                }
            }
        >
            {children()}
        </button>
    }
}
