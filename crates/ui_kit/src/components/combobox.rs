use ui_headless::combobox::{ComboboxOption, ComboboxOutcome, ComboboxState};
use ui_headless::variants::{button_classes, ButtonSize, ButtonVariant};
use ui_headless::UiError;

use super::*;
use crate::config::use_ui_config;

/// Element id for an option, safe for `aria-activedescendant`.
fn option_id(list_id: &str, value: &str) -> String {
    let value: String = value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect();
    format!("{list_id}-{value}")
}

#[derive(Clone, Copy)]
/// Shared state of a [`Combobox`].
pub struct ComboboxContext {
    /// Options, query, highlight, and selection.
    pub state: RwSignal<ComboboxState>,
    list_id: StoredValue<String>,
    placeholder: StoredValue<String>,
    empty_text: StoredValue<String>,
    input: NodeRef<html::Input>,
    value: Option<RwSignal<Option<String>>>,
    on_value_change: Option<Callback<Option<String>>>,
}

impl ComboboxContext {
    /// Selects `value` (clearing it when already selected) and publishes the change.
    pub fn select(&self, value: &str) {
        let mut outcome = None;
        self.state.update(|state| outcome = state.select(value));
        if let Some(selected) = outcome {
            self.publish(selected);
        }
    }

    /// Routes a key from the trigger or the search input.
    pub fn handle_key(&self, ev: &KeyboardEvent) {
        let mut outcome = ComboboxOutcome::Ignored;
        self.state.update(|state| outcome = state.handle_key(&ev.key()));
        match outcome {
            ComboboxOutcome::Ignored => {}
            ComboboxOutcome::Selected(selected) => {
                ev.prevent_default();
                self.publish(selected);
            }
            ComboboxOutcome::Handled | ComboboxOutcome::Closed => ev.prevent_default(),
        }
    }

    fn publish(&self, selected: Option<String>) {
        if let Some(value) = self.value {
            value.set(selected.clone());
        }
        if let Some(on_value_change) = self.on_value_change.as_ref() {
            on_value_change.call(selected);
        }
    }
}

/// The enclosing [`Combobox`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`Combobox`].
pub fn try_use_combobox() -> Result<ComboboxContext, UiError> {
    try_context("ComboboxItem", "Combobox")
}

#[component]
/// Searchable single-select list.
///
/// Compose it from [`ComboboxTrigger`], [`ComboboxInput`], and [`ComboboxList`]. Selecting the
/// selected option again clears it. Clicking outside closes the list. `loop_focus` and the
/// empty text default to the `[combobox]` configuration.
pub fn Combobox(
    #[prop(into)] options: MaybeSignal<Vec<ComboboxOption>>,
    #[prop(optional)] value: Option<RwSignal<Option<String>>>,
    #[prop(optional, into)] default_value: Option<String>,
    #[prop(optional)] loop_focus: Option<bool>,
    #[prop(default = "Select an option...".to_string(), into)] placeholder: String,
    #[prop(optional, into)] empty_text: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<Option<String>>>,
    children: Children,
) -> impl IntoView {
    let config = use_ui_config().combobox;
    let initial = value
        .and_then(|value| value.get_untracked())
        .or(default_value);
    let state = ComboboxState::new(options.get_untracked())
        .with_loop_focus(loop_focus.unwrap_or(config.loop_focus))
        .with_selected(initial);
    let state = create_rw_signal(state);

    create_effect(move |previous: Option<()>| {
        let options = options.get();
        if previous.is_some() {
            state.update(|state| state.set_options(options));
        }
    });
    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            let current = state.with_untracked(|state| state.selected().map(str::to_string));
            if requested != current {
                state.update(|state| state.set_selected(requested));
            }
        });
    }

    let context = ComboboxContext {
        state,
        list_id: store_value(next_id("combobox-list")),
        placeholder: store_value(placeholder),
        empty_text: store_value(empty_text.unwrap_or(config.empty_text)),
        input: create_node_ref::<html::Input>(),
        value,
        on_value_change,
    };
    provide_context(context);

    let root = create_node_ref::<html::Div>();
    let outside = window_event_listener(ev::pointerdown, move |ev| {
        if !state.with_untracked(ComboboxState::is_open) {
            return;
        }
        let Some(root) = root.get_untracked() else {
            return;
        };
        let target = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
        if !root.contains(target.as_ref()) {
            state.update(ComboboxState::close);
        }
    });
    on_cleanup(move || outside.remove());

    view! {
        <div
            node_ref=root
            class=merge_class("relative w-[200px]", class.as_deref())
            data-state=move || open_token(state.with(ComboboxState::is_open))
            data-slot="combobox"
        >
            {children()}
        </div>
    }
}

#[component]
/// Button showing the selected label and toggling the list.
///
/// # Panics
///
/// Panics when rendered outside a [`Combobox`].
pub fn ComboboxTrigger(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let context: ComboboxContext = expect_context("ComboboxTrigger", "Combobox");
    let state = context.state;
    let label = move || {
        state.with(|state| {
            state
                .selected_label()
                .map(str::to_string)
                .unwrap_or_else(|| context.placeholder.get_value())
        })
    };

    view! {
        <button
            type="button"
            role="combobox"
            class=button_classes(
                ButtonVariant::Outline,
                ButtonSize::Default,
                Some(&cn(["w-full justify-between", class.as_deref().unwrap_or_default()])),
            )
            aria-expanded=move || bool_token(state.with(ComboboxState::is_open))
            aria-controls=context.list_id.get_value()
            aria-haspopup="listbox"
            data-placeholder=move || state.with(|state| state.selected().is_none()).then_some("")
            data-slot="combobox-trigger"
            on:click=move |_| {
                state.update(ComboboxState::toggle_open);
                if let Some(input) = context.input.get_untracked() {
                    let _ = input.focus();
                }
            }
            on:keydown=move |ev: KeyboardEvent| context.handle_key(&ev)
        >
            <span class="truncate">{label}</span>
            {children.map(|children| children())}
            <span aria-hidden="true" class="ml-2 shrink-0 opacity-50">"⌄"</span>
        </button>
    }
}

#[component]
/// Search field filtering the options as the user types.
///
/// # Panics
///
/// Panics when rendered outside a [`Combobox`].
pub fn ComboboxInput(
    #[prop(default = "Search...".to_string(), into)] placeholder: String,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: ComboboxContext = expect_context("ComboboxInput", "Combobox");
    let state = context.state;
    let list_id = context.list_id.get_value();
    let active_descendant = move || {
        state.with(|state| {
            state
                .is_open()
                .then(|| state.highlighted())
                .flatten()
                .map(|value| option_id(&list_id, value))
        })
    };

    let input_ref = context.input;
    view! {
        <input
            node_ref=input_ref
            type="text"
            role="searchbox"
            autocomplete="off"
            placeholder=placeholder
            class=merge_class(
                "flex h-9 w-full rounded-md bg-transparent py-3 text-sm outline-none placeholder:text-muted-foreground disabled:cursor-not-allowed disabled:opacity-50",
                class.as_deref(),
            )
            aria-controls=context.list_id.get_value()
            aria-activedescendant=active_descendant
            prop:value=move || state.with(|state| state.query().to_string())
            data-slot="combobox-input"
            on:input=move |ev| {
                let query = event_target_value(&ev);
                state.update(|state| {
                    state.set_query(&query);
                    if !state.is_open() {
                        state.open();
                    }
                });
            }
            on:keydown=move |ev: KeyboardEvent| context.handle_key(&ev)
        />
    }
}

#[component]
/// Listbox shown while the combobox is open.
///
/// Without children it renders every filtered option, grouped under their headings, followed
/// by [`ComboboxEmpty`].
///
/// # Panics
///
/// Panics when rendered outside a [`Combobox`].
pub fn ComboboxList(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    let context: ComboboxContext = expect_context("ComboboxList", "Combobox");
    let state = context.state;
    let class = merge_class(
        "absolute z-50 mt-1 max-h-[300px] w-full overflow-y-auto overflow-x-hidden rounded-md border bg-popover p-1 text-popover-foreground shadow-md",
        class.as_deref(),
    );
    let children = store_value(children);

    let layout = create_memo(move |_| {
        state.with(|state| {
            state
                .grouped()
                .into_iter()
                .map(|group| {
                    let values: Vec<String> = group
                        .options
                        .into_iter()
                        .map(|option| option.value.clone())
                        .collect();
                    (group.heading.map(str::to_string), values)
                })
                .collect::<Vec<_>>()
        })
    });
    let generated = move || {
        let groups = layout
            .get()
            .into_iter()
            .map(|(heading, values)| {
                view! {
                    <div role="group" class="overflow-hidden p-1" data-slot="combobox-group">
                        {heading.map(|heading| {
                            view! {
                                <div class="px-2 py-1.5 text-xs font-medium text-muted-foreground">
                                    {heading}
                                </div>
                            }
                        })}
                        {values
                            .into_iter()
                            .map(|value| view! { <ComboboxItem value=value /> })
                            .collect_view()}
                    </div>
                }
            })
            .collect_view();
        view! {
            {groups}
            <ComboboxEmpty />
        }
    };

    view! {
        <Show when=move || state.with(ComboboxState::is_open)>
            <div
                id=context.list_id.get_value()
                role="listbox"
                class=class.clone()
                data-slot="combobox-list"
            >
                {move || match children.get_value() {
                    Some(children) => children().into_view(),
                    None => generated.into_view(),
                }}
            </div>
        </Show>
    }
}

#[component]
/// Message shown when the query matches nothing. Defaults to the configured empty text.
///
/// # Panics
///
/// Panics when rendered outside a [`Combobox`].
pub fn ComboboxEmpty(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    let context: ComboboxContext = expect_context("ComboboxEmpty", "Combobox");
    let state = context.state;
    let class = merge_class("py-6 text-center text-sm", class.as_deref());
    let children = store_value(children);

    view! {
        <Show when=move || state.with(ComboboxState::is_empty_result)>
            <div class=class.clone() data-slot="combobox-empty">
                {match children.get_value() {
                    Some(children) => children().into_view(),
                    None => context.empty_text.get_value().into_view(),
                }}
            </div>
        </Show>
    }
}

#[component]
/// One option row. Hidden while the query filters it out.
///
/// # Panics
///
/// Panics when rendered outside a [`Combobox`].
pub fn ComboboxItem(
    #[prop(into)] value: String,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    let context: ComboboxContext = expect_context("ComboboxItem", "Combobox");
    let state = context.state;
    let id = option_id(&context.list_id.get_value(), &value);
    let value = store_value(value);
    let children = store_value(children);

    let visible = move || {
        state.with(|state| {
            value.with_value(|value| state.filtered().iter().any(|option| option.value == *value))
        })
    };
    let highlighted = move || {
        state.with(|state| value.with_value(|value| state.highlighted() == Some(value.as_str())))
    };
    let selected = move || {
        state.with(|state| value.with_value(|value| state.selected() == Some(value.as_str())))
    };
    let disabled = move || {
        state.with(|state| {
            value.with_value(|value| state.option(value).is_some_and(|option| option.disabled))
        })
    };
    let label = move || {
        state.with(|state| {
            value.with_value(|value| {
                state
                    .option(value)
                    .map_or_else(|| value.clone(), |option| option.label.clone())
            })
        })
    };
    let class = merge_class(
        "relative flex cursor-default select-none items-center gap-2 rounded-sm px-2 py-1.5 text-sm outline-none data-[disabled=true]:pointer-events-none data-[highlighted=true]:bg-accent data-[highlighted=true]:text-accent-foreground data-[disabled=true]:opacity-50",
        class.as_deref(),
    );

    view! {
        <Show when=visible>
            <div
                id=id.clone()
                role="option"
                class=class.clone()
                aria-selected=move || bool_token(selected())
                aria-disabled=move || disabled().then_some("true")
                data-highlighted=move || bool_token(highlighted())
                data-disabled=move || bool_token(disabled())
                data-value=value.get_value()
                data-slot="combobox-item"
                on:pointermove=move |_| {
                    if !highlighted() {
                        let value = value.get_value();
                        state.update(|state| {
                            state.highlight_value(&value);
                        });
                    }
                }
                on:mousedown=move |ev: MouseEvent| ev.prevent_default()
                on:click=move |_| context.select(&value.get_value())
            >
                {match children.get_value() {
                    Some(children) => children().into_view(),
                    None => label.into_view(),
                }}
                <span
                    aria-hidden="true"
                    class="ml-auto"
                    style:visibility=move || if selected() { "visible" } else { "hidden" }
                >
                    "✓"
                </span>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn option_ids_are_valid_idrefs() {
        assert_eq!(option_id("combobox-list-3", "next.js app"), "combobox-list-3-next-js-app");
    }
}
