use ui_headless::breadcrumb::{collapse_trail, BreadcrumbSlot};

use super::*;

#[component]
/// Breadcrumb landmark.
pub fn Breadcrumb(#[prop(optional, into)] class: Option<String>, children: Children) -> impl IntoView {
    view! {
        <nav aria-label="breadcrumb" class=class data-slot="breadcrumb">
            {children()}
        </nav>
    }
}

#[component]
/// Ordered list of crumbs.
pub fn BreadcrumbList(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <ol
            class=merge_class(
                "flex flex-wrap items-center gap-1.5 break-words text-sm text-muted-foreground sm:gap-2.5",
                class.as_deref(),
            )
            data-slot="breadcrumb-list"
        >
            {children()}
        </ol>
    }
}

#[component]
/// One crumb.
pub fn BreadcrumbItem(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <li class=merge_class("inline-flex items-center gap-1.5", class.as_deref()) data-slot="breadcrumb-item">
            {children()}
        </li>
    }
}

#[component]
/// Link to an ancestor page.
pub fn BreadcrumbLink(
    #[prop(into)] href: String,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <a
            href=href
            class=merge_class("transition-colors hover:text-foreground", class.as_deref())
            data-slot="breadcrumb-link"
        >
            {children()}
        </a>
    }
}

#[component]
/// The current page, rendered as text.
pub fn BreadcrumbPage(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            role="link"
            aria-disabled="true"
            aria-current="page"
            class=merge_class("font-normal text-foreground", class.as_deref())
            data-slot="breadcrumb-page"
        >
            {children()}
        </span>
    }
}

#[component]
/// Divider between crumbs; defaults to a chevron.
pub fn BreadcrumbSeparator(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <li
            role="presentation"
            aria-hidden="true"
            class=merge_class("[&>svg]:w-3.5 [&>svg]:h-3.5", class.as_deref())
            data-slot="breadcrumb-separator"
        >
            {match children {
                Some(children) => children().into_view(),
                None => view! { <span>"›"</span> }.into_view(),
            }}
        </li>
    }
}

#[component]
/// Placeholder for collapsed crumbs.
pub fn BreadcrumbEllipsis(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    view! {
        <span
            role="presentation"
            aria-hidden="true"
            title=title
            class=merge_class("flex h-9 w-9 items-center justify-center", class.as_deref())
            data-slot="breadcrumb-ellipsis"
        >
            "…"
            <span class="sr-only">"More"</span>
        </span>
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of a [`BreadcrumbTrail`].
pub struct BreadcrumbEntry {
    /// Visible text.
    pub label: String,
    /// Target; the last entry is always rendered as the current page.
    pub href: Option<String>,
}

impl BreadcrumbEntry {
    /// Entry linking to `href`.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    /// Entry without a link.
    pub fn page(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

#[component]
/// Complete breadcrumb built from entries, collapsing the middle of long trails.
pub fn BreadcrumbTrail(
    entries: Vec<BreadcrumbEntry>,
    #[prop(default = 4)] max_items: usize,
    #[prop(default = 1)] items_before: usize,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let last = entries.len().saturating_sub(1);
    let slots = collapse_trail(&entries, max_items, items_before);
    let count = slots.len();
    let mut position = 0;
    let items = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let crumb = match slot {
                BreadcrumbSlot::Entry(entry) => {
                    let is_last = position == last;
                    position += 1;
                    match entry.href {
                        Some(href) if !is_last => {
                            view! { <BreadcrumbLink href=href>{entry.label}</BreadcrumbLink> }
                                .into_view()
                        }
                        _ => view! { <BreadcrumbPage>{entry.label}</BreadcrumbPage> }.into_view(),
                    }
                }
                BreadcrumbSlot::Ellipsis(hidden) => {
                    position += hidden.len();
                    let title = hidden
                        .iter()
                        .map(|entry| entry.label.as_str())
                        .collect::<Vec<_>>()
                        .join(" / ");
                    view! { <BreadcrumbEllipsis title=title /> }.into_view()
                }
            };
            view! {
                <BreadcrumbItem>{crumb}</BreadcrumbItem>
                {(index + 1 < count).then(|| view! { <BreadcrumbSeparator /> })}
            }
        })
        .collect_view();

    view! {
        <Breadcrumb class=class.unwrap_or_default()>
            <BreadcrumbList>{items}</BreadcrumbList>
        </Breadcrumb>
    }
}
