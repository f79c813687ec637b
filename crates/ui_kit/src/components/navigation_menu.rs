use std::time::Duration;
use leptos::leptos_dom::helpers::TimeoutHandle;

use ui_headless::navigation_menu::{NavigationMenuState, OPEN_DELAY_MS, SKIP_DELAY_MS};
use ui_headless::roving::Orientation;
use ui_headless::UiError;

use super::*;

#[derive(Clone, Copy)]
/// Shared state of a [`NavigationMenu`].
pub struct NavigationMenuContext {
    /// Registered items and the open one.
    pub state: RwSignal<NavigationMenuState>,
    /// Axis the triggers are laid out along.
    pub orientation: Orientation,
    root: NodeRef<html::Nav>,
    open_timer: StoredValue<Option<TimeoutHandle>>,
    close_timer: StoredValue<Option<TimeoutHandle>>,
    skip_delay: RwSignal<bool>,
    on_value_change: Option<Callback<Option<String>>>,
}

impl NavigationMenuContext {
    fn notify(&self) {
        if let Some(on_value_change) = self.on_value_change.as_ref() {
            let active = self
                .state
                .with_untracked(|state| state.active().map(str::to_string));
            on_value_change.call(active);
        }
    }

    fn cancel_timers(&self) {
        for timer in [self.open_timer, self.close_timer] {
            if let Some(Some(handle)) = timer.try_update_value(Option::take) {
                handle.clear();
            }
        }
    }

    /// Opens the content of `value` immediately.
    pub fn open(&self, value: &str) {
        self.cancel_timers();
        let mut changed = false;
        self.state.update(|state| changed = state.open(value));
        if changed {
            self.notify();
        }
    }

    /// Closes any open content, then opens the next hovered item without delay for a short
    /// while.
    pub fn close(&self) {
        self.cancel_timers();
        let mut changed = false;
        self.state.update(|state| changed = state.close());
        if !changed {
            return;
        }
        self.notify();
        self.skip_delay.set(true);
        let skip_delay = self.skip_delay;
        let reset = move || {
            skip_delay.try_set(false);
        };
        if let Err(err) = set_timeout_with_handle(reset, Duration::from_millis(SKIP_DELAY_MS)) {
            logging::warn!("{err:?}");
            skip_delay.set(false);
        }
    }

    /// Opens or closes the content of `value`.
    pub fn toggle(&self, value: &str) {
        if self.state.with_untracked(|state| state.is_open(value)) {
            self.close();
        } else {
            self.open(value);
        }
    }

    fn schedule_open(&self, value: String) {
        if self.skip_delay.get_untracked()
            || self.state.with_untracked(NavigationMenuState::is_any_open)
        {
            self.open(&value);
            return;
        }
        self.cancel_timers();
        let context = *self;
        let delayed = move || {
            context.open_timer.set_value(None);
            context.open(&value);
        };
        match set_timeout_with_handle(delayed, Duration::from_millis(OPEN_DELAY_MS)) {
            Ok(handle) => self.open_timer.set_value(Some(handle)),
            Err(err) => logging::warn!("{err:?}"),
        }
    }

    fn schedule_close(&self) {
        self.cancel_timers();
        let context = *self;
        let delayed = move || {
            context.close_timer.set_value(None);
            context.close();
        };
        match set_timeout_with_handle(delayed, Duration::from_millis(OPEN_DELAY_MS)) {
            Ok(handle) => self.close_timer.set_value(Some(handle)),
            Err(err) => logging::warn!("{err:?}"),
        }
    }

    fn focus_trigger(&self, value: &str) {
        let Some(root) = self.root.get_untracked() else {
            return;
        };
        let selector = format!("[data-slot=\"navigation-menu-trigger\"][data-value=\"{value}\"]");
        if let Ok(Some(trigger)) = root.query_selector(&selector) {
            if let Ok(trigger) = trigger.dyn_into::<web_sys::HtmlElement>() {
                let _ = trigger.focus();
            }
        }
    }
}

/// The enclosing [`NavigationMenu`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`NavigationMenu`].
pub fn try_use_navigation_menu() -> Result<NavigationMenuContext, UiError> {
    try_context("NavigationMenuItem", "NavigationMenu")
}

#[derive(Clone, Copy)]
struct NavigationMenuItemContext {
    value: StoredValue<String>,
}

#[component]
/// Site navigation bar whose triggers reveal content panels on click or hover.
///
/// Hovering opens an item after a short delay; moving between items while one is open
/// switches immediately. Escape closes the open item and returns focus to its trigger.
pub fn NavigationMenu(
    #[prop(optional)] orientation: Orientation,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<Option<String>>>,
    children: Children,
) -> impl IntoView {
    let root = create_node_ref::<html::Nav>();
    let context = NavigationMenuContext {
        state: create_rw_signal(NavigationMenuState::new()),
        orientation,
        root,
        open_timer: store_value(None),
        close_timer: store_value(None),
        skip_delay: create_rw_signal(false),
        on_value_change,
    };
    provide_context(context);
    on_cleanup(move || context.cancel_timers());

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        let Some(active) = context
            .state
            .with_untracked(|state| state.active().map(str::to_string))
        else {
            return;
        };
        ev.prevent_default();
        context.close();
        context.focus_trigger(&active);
    };

    view! {
        <nav
            node_ref=root
            aria-label="Main"
            class=merge_class(
                "relative z-10 flex max-w-max flex-1 items-center justify-center",
                class.as_deref(),
            )
            data-orientation=orientation.token()
            data-slot="navigation-menu"
            on:keydown=on_keydown
            on:pointerleave=move |_| context.schedule_close()
        >
            {children()}
        </nav>
    }
}

#[component]
/// List wrapping the menu's items.
pub fn NavigationMenuList(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <ul
            class=merge_class(
                "group flex flex-1 list-none items-center justify-center gap-1",
                class.as_deref(),
            )
            data-slot="navigation-menu-list"
        >
            {children()}
        </ul>
    }
}

#[component]
/// Item identified by `value`, holding a trigger and its content or a plain link.
///
/// # Panics
///
/// Panics when rendered outside a [`NavigationMenu`].
pub fn NavigationMenuItem(
    #[prop(into)] value: String,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: NavigationMenuContext = expect_context("NavigationMenuItem", "NavigationMenu");
    context.state.update(|state| state.register(value.clone()));
    let stored = store_value(value);
    on_cleanup(move || {
        let value = stored.get_value();
        context.state.try_update(|state| state.unregister(&value));
    });
    provide_context(NavigationMenuItemContext { value: stored });

    view! {
        <li class=merge_class("relative", class.as_deref()) data-slot="navigation-menu-item">
            {children()}
        </li>
    }
}

#[component]
/// Button opening its item's content.
///
/// Arrow keys move between triggers; ArrowDown (or ArrowRight in a vertical menu) opens.
///
/// # Panics
///
/// Panics when rendered outside a [`NavigationMenuItem`].
pub fn NavigationMenuTrigger(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: NavigationMenuContext = expect_context("NavigationMenuTrigger", "NavigationMenu");
    let item: NavigationMenuItemContext =
        expect_context("NavigationMenuTrigger", "NavigationMenuItem");
    let value = item.value.get_value();
    let open = {
        let value = value.clone();
        move || context.state.with(|state| state.is_open(&value))
    };
    let content_id = format!("navigation-menu-content-{value}");
    let open_key = match context.orientation {
        Orientation::Vertical => "ArrowRight",
        Orientation::Horizontal | Orientation::Both => "ArrowDown",
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let value = item.value.get_value();
        let key = ev.key();
        if key == open_key {
            ev.prevent_default();
            context.open(&value);
            return;
        }
        let target = context.state.with_untracked(|state| {
            state
                .focus_target(&value, &key, context.orientation)
                .map(str::to_string)
        });
        if let Some(target) = target {
            ev.prevent_default();
            context.focus_trigger(&target);
        }
    };

    view! {
        <button
            type="button"
            class=merge_class(
                "group inline-flex h-9 w-max items-center justify-center rounded-md bg-background px-4 py-2 text-sm font-medium transition-colors hover:bg-accent hover:text-accent-foreground focus:bg-accent focus:text-accent-foreground focus-visible:outline-none disabled:pointer-events-none disabled:opacity-50 data-[state=open]:bg-accent/50",
                class.as_deref(),
            )
            aria-expanded={
                let open = open.clone();
                move || bool_token(open())
            }
            aria-controls=content_id
            data-state={
                let open = open.clone();
                move || open_token(open())
            }
            data-value=value
            data-slot="navigation-menu-trigger"
            on:click=move |_| context.toggle(&item.value.get_value())
            on:pointerenter=move |ev| {
                if ev.pointer_type() == "mouse" {
                    context.schedule_open(item.value.get_value());
                }
            }
            on:keydown=on_keydown
        >
            {children()}
            <span
                aria-hidden="true"
                class="relative top-px ml-1 inline-block size-3 transition duration-300 group-data-[state=open]:rotate-180"
            >
                "⌄"
            </span>
        </button>
    }
}

#[component]
/// Panel shown while its item is open, tagged with `data-motion` for slide transitions.
///
/// # Panics
///
/// Panics when rendered outside a [`NavigationMenuItem`].
pub fn NavigationMenuContent(
    #[prop(optional, into)] class: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let context: NavigationMenuContext = expect_context("NavigationMenuContent", "NavigationMenu");
    let item: NavigationMenuItemContext =
        expect_context("NavigationMenuContent", "NavigationMenuItem");
    let value = item.value.get_value();
    let content_id = format!("navigation-menu-content-{value}");
    let open = move || context.state.with(|state| state.is_open(&item.value.get_value()));
    let motion = move || {
        context
            .state
            .with(|state| state.content_motion(&item.value.get_value()))
    };
    let class = merge_class(
        "absolute left-0 top-full mt-1.5 w-full overflow-hidden rounded-md border bg-popover p-2 text-popover-foreground shadow md:w-auto data-[motion=from-end]:slide-in-from-right-52 data-[motion=from-start]:slide-in-from-left-52 data-[motion=to-end]:slide-out-to-right-52 data-[motion=to-start]:slide-out-to-left-52",
        class.as_deref(),
    );
    let children = store_value(children);

    view! {
        <Show when=open>
            <div
                id=content_id.clone()
                class=class.clone()
                data-state="open"
                data-motion=motion
                data-slot="navigation-menu-content"
                on:pointerenter=move |_| context.cancel_timers()
            >
                {children.with_value(|children| children())}
            </div>
        </Show>
    }
}

#[component]
/// Navigation anchor; `active` marks the current page.
pub fn NavigationMenuLink(
    #[prop(into)] href: String,
    #[prop(optional, into)] active: MaybeSignal<bool>,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context = try_use_navigation_menu().ok();
    view! {
        <a
            href=href
            class=merge_class(
                "flex flex-col gap-1 rounded-sm p-2 text-sm transition-all outline-none hover:bg-accent hover:text-accent-foreground focus:bg-accent focus:text-accent-foreground focus-visible:ring-1 data-[active=true]:bg-accent/50",
                class.as_deref(),
            )
            aria-current=move || active.get().then_some("page")
            data-active=move || bool_token(active.get())
            data-slot="navigation-menu-link"
            on:click=move |_| {
                if let Some(context) = context {
                    context.close();
                }
            }
        >
            {children()}
        </a>
    }
}
