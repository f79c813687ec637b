use ui_headless::roving::Orientation;
use ui_headless::variants::{
    badge_classes, button_classes, BadgeVariant, ButtonSize, ButtonVariant,
};

use super::*;

#[component]
/// Button styled by variant and size tokens.
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    let class = button_classes(variant, size, class.as_deref());
    view! {
        <button
            type="button"
            class=class
            id=id
            aria-label=aria_label
            disabled=move || disabled.get()
            data-slot="button"
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown.as_ref() {
                    on_keydown.call(ev);
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
/// Small status label.
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=badge_classes(variant, class.as_deref()) data-slot="badge">
            {children()}
        </span>
    }
}

#[component]
/// Horizontal or vertical rule. Decorative separators are hidden from assistive technology.
pub fn Separator(
    #[prop(optional)] orientation: Orientation,
    #[prop(default = true)] decorative: bool,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let orientation = orientation.token();
    let class = merge_class(
        "shrink-0 bg-border data-[orientation=horizontal]:h-px data-[orientation=horizontal]:w-full data-[orientation=vertical]:h-full data-[orientation=vertical]:w-px",
        class.as_deref(),
    );
    view! {
        <div
            class=class
            role=if decorative { "none" } else { "separator" }
            aria-orientation=(!decorative).then_some(orientation)
            data-orientation=orientation
            data-slot="separator"
        ></div>
    }
}
