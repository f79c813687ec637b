use ui_headless::pagination::{PageItem, PaginationState};
use ui_headless::variants::{button_classes, ButtonSize, ButtonVariant};

use crate::config::use_ui_config;

use super::*;

#[component]
/// Pagination landmark.
pub fn Pagination(#[prop(optional, into)] class: Option<String>, children: Children) -> impl IntoView {
    view! {
        <nav
            role="navigation"
            aria-label="pagination"
            class=merge_class("mx-auto flex w-full justify-center", class.as_deref())
            data-slot="pagination"
        >
            {children()}
        </nav>
    }
}

#[component]
/// Row of pagination items.
pub fn PaginationContent(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <ul class=merge_class("flex flex-row items-center gap-1", class.as_deref()) data-slot="pagination-content">
            {children()}
        </ul>
    }
}

#[component]
/// One pagination entry.
pub fn PaginationItem(#[prop(optional, into)] class: Option<String>, children: Children) -> impl IntoView {
    view! {
        <li class=class data-slot="pagination-item">
            {children()}
        </li>
    }
}

#[component]
/// Page link styled as a ghost button, outlined when it is the current page.
pub fn PaginationLink(
    #[prop(into, default = None)] href: Option<String>,
    #[prop(optional, into)] is_active: MaybeSignal<bool>,
    #[prop(default = ButtonSize::Icon)] size: ButtonSize,
    #[prop(into, default = None)] aria_label: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(into, default = None)] class: Option<String>,
    #[prop(into, default = None)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        let variant = if is_active.get() {
            ButtonVariant::Outline
        } else {
            ButtonVariant::Ghost
        };
        button_classes(variant, size, class.as_deref())
    };
    view! {
        <a
            href=href
            role="link"
            aria-label=aria_label
            aria-current=move || is_active.get().then_some("page")
            aria-disabled=move || disabled.get().then_some("true")
            class=class
            data-slot="pagination-link"
            data-active=move || bool_token(is_active.get())
            on:click=move |ev| {
                if disabled.get_untracked() {
                    ev.prevent_default();
                    return;
                }
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {children()}
        </a>
    }
}

#[component]
/// Link to the previous page.
pub fn PaginationPrevious(
    #[prop(into, default = None)] href: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(into, default = None)] on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    view! {
        <PaginationLink
            href=href
            size=ButtonSize::Default
            aria_label="Go to previous page".to_string()
            disabled=disabled
            class=cn(["gap-1 pl-2.5", class.as_deref().unwrap_or_default()])
            on_click=on_click
        >
            <span aria-hidden="true">"‹"</span>
            <span>"Previous"</span>
        </PaginationLink>
    }
}

#[component]
/// Link to the next page.
pub fn PaginationNext(
    #[prop(into, default = None)] href: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(into, default = None)] on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    view! {
        <PaginationLink
            href=href
            size=ButtonSize::Default
            aria_label="Go to next page".to_string()
            disabled=disabled
            class=cn(["gap-1 pr-2.5", class.as_deref().unwrap_or_default()])
            on_click=on_click
        >
            <span>"Next"</span>
            <span aria-hidden="true">"›"</span>
        </PaginationLink>
    }
}

#[component]
/// Gap marker between page ranges.
pub fn PaginationEllipsis(#[prop(optional, into)] class: Option<String>) -> impl IntoView {
    view! {
        <span
            aria-hidden="true"
            class=merge_class("flex h-9 w-9 items-center justify-center", class.as_deref())
            data-slot="pagination-ellipsis"
        >
            "…"
            <span class="sr-only">"More pages"</span>
        </span>
    }
}

#[component]
/// Complete pagination bound to a page signal, with ellipses for long ranges.
///
/// Sibling and boundary counts default to the `[pagination]` section of the ui config.
pub fn PaginationControl(
    page: RwSignal<u32>,
    #[prop(into)] total_pages: MaybeSignal<u32>,
    #[prop(optional)] siblings: Option<u32>,
    #[prop(optional)] boundaries: Option<u32>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_page_change: Option<Callback<u32>>,
) -> impl IntoView {
    let config = use_ui_config();
    let siblings = siblings.unwrap_or(config.pagination.sibling_count);
    let boundaries = boundaries.unwrap_or(config.pagination.boundary_count);
    let state = create_memo(move |_| PaginationState::new(page.get(), total_pages.get()));

    let apply = move |update: &dyn Fn(&mut PaginationState) -> bool| {
        let mut next = state.get_untracked();
        if update(&mut next) {
            page.set(next.page());
            if let Some(on_page_change) = on_page_change.as_ref() {
                on_page_change.call(next.page());
            }
        }
    };

    view! {
        <Pagination class=class.unwrap_or_default()>
            <PaginationContent>
                <PaginationItem>
                    <PaginationPrevious
                        disabled=Signal::derive(move || !state.get().has_previous())
                        on_click=Callback::new(move |ev: MouseEvent| {
                            ev.prevent_default();
                            apply(&|state| state.previous());
                        })
                    />
                </PaginationItem>
                {move || {
                    let current = state.get();
                    current
                        .range(siblings, boundaries)
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page(number) => {
                                let active = number == current.page();
                                view! {
                                    <PaginationItem>
                                        <PaginationLink
                                            is_active=active
                                            aria_label=format!("Go to page {number}")
                                            on_click=Callback::new(move |ev: MouseEvent| {
                                                ev.prevent_default();
                                                apply(&|state| state.go_to(number));
                                            })
                                        >
                                            {number}
                                        </PaginationLink>
                                    </PaginationItem>
                                }
                                .into_view()
                            }
                            PageItem::Ellipsis => {
                                view! {
                                    <PaginationItem>
                                        <PaginationEllipsis />
                                    </PaginationItem>
                                }
                                .into_view()
                            }
                        })
                        .collect_view()
                }}
                <PaginationItem>
                    <PaginationNext
                        disabled=Signal::derive(move || !state.get().has_next())
                        on_click=Callback::new(move |ev: MouseEvent| {
                            ev.prevent_default();
                            apply(&|state| state.next());
                        })
                    />
                </PaginationItem>
            </PaginationContent>
        </Pagination>
    }
}
