use ui_headless::UiError;

use super::*;
use crate::interop::animate_dialog;

#[derive(Clone, Copy)]
/// Shared state of a [`Dialog`].
pub struct DialogContext {
    /// Whether the dialog is shown.
    pub open: RwSignal<bool>,
    title_id: StoredValue<String>,
    description_id: StoredValue<String>,
    on_open_change: Option<Callback<bool>>,
}

impl DialogContext {
    /// Opens or closes the dialog and notifies `on_open_change`.
    pub fn set_open(&self, open: bool) {
        if self.open.get_untracked() == open {
            return;
        }
        self.open.set(open);
        if let Some(on_open_change) = self.on_open_change.as_ref() {
            on_open_change.call(open);
        }
    }
}

/// The enclosing [`Dialog`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`Dialog`].
pub fn try_use_dialog() -> Result<DialogContext, UiError> {
    try_context("DialogContent", "Dialog")
}

#[component]
/// Modal dialog. Pass `open` to control it, or `default_open` to let it own its state.
pub fn Dialog(
    #[prop(optional)] open: Option<RwSignal<bool>>,
    #[prop(optional)] default_open: bool,
    #[prop(optional)] on_open_change: Option<Callback<bool>>,
    children: Children,
) -> impl IntoView {
    provide_context(DialogContext {
        open: open.unwrap_or_else(|| create_rw_signal(default_open)),
        title_id: store_value(next_id("dialog-title")),
        description_id: store_value(next_id("dialog-description")),
        on_open_change,
    });
    children().into_view()
}

#[component]
/// Button opening the enclosing [`Dialog`].
///
/// # Panics
///
/// Panics when rendered outside a [`Dialog`].
pub fn DialogTrigger(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: DialogContext = expect_context("DialogTrigger", "Dialog");
    view! {
        <button
            type="button"
            class=class
            aria-haspopup="dialog"
            aria-expanded=move || bool_token(context.open.get())
            data-state=move || open_token(context.open.get())
            data-slot="dialog-trigger"
            on:click=move |_| context.set_open(true)
        >
            {children()}
        </button>
    }
}

#[component]
/// Native `<dialog>` shown modally while open.
///
/// Closing waits for the exit animation declared on `data-state="closed"`. Escape and clicks
/// on the backdrop close it.
///
/// # Panics
///
/// Panics when rendered outside a [`Dialog`].
pub fn DialogContent(
    #[prop(default = true)] show_close_button: bool,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: DialogContext = expect_context("DialogContent", "Dialog");
    let dialog = create_node_ref::<html::Dialog>();

    create_effect(move |previous: Option<bool>| {
        let open = context.open.get();
        let Some(element) = dialog.get() else {
            return open;
        };
        if previous.is_some() || open {
            if let Err(err) = animate_dialog(&element, open) {
                logging::warn!("{err}");
            }
        }
        open
    });

    let on_cancel = move |ev: ev::Event| {
        ev.prevent_default();
        context.set_open(false);
    };
    let on_backdrop = move |ev: MouseEvent| {
        let Some(element) = dialog.get_untracked() else {
            return;
        };
        let on_dialog = ev.target().is_some_and(|target| {
            let element: &web_sys::EventTarget = &element;
            target == *element
        });
        if on_dialog {
            context.set_open(false);
        }
    };

    view! {
        <dialog
            node_ref=dialog
            class=merge_class(
                "fixed left-1/2 top-1/2 z-50 grid w-full max-w-lg -translate-x-1/2 -translate-y-1/2 gap-4 border bg-background p-6 shadow-lg backdrop:bg-black/80 sm:rounded-lg data-[state=open]:animate-in data-[state=closed]:animate-out data-[state=closed]:fade-out-0 data-[state=open]:fade-in-0 data-[state=closed]:zoom-out-95 data-[state=open]:zoom-in-95",
                class.as_deref(),
            )
            aria-labelledby=context.title_id.get_value()
            aria-describedby=context.description_id.get_value()
            data-state=move || open_token(context.open.get())
            data-slot="dialog-content"
            on:cancel=on_cancel
            on:click=on_backdrop
        >
            {children()}
            {show_close_button
                .then(|| {
                    view! {
                        <DialogClose class="absolute right-4 top-4 rounded-sm opacity-70 transition-opacity hover:opacity-100 focus:outline-none focus:ring-2 focus:ring-ring focus:ring-offset-2">
                            <span aria-hidden="true">"×"</span>
                            <span class="sr-only">"Close"</span>
                        </DialogClose>
                    }
                })}
        </dialog>
    }
}

#[component]
/// Title and description block.
pub fn DialogHeader(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_class("flex flex-col gap-1.5 text-center sm:text-left", class.as_deref())
            data-slot="dialog-header"
        >
            {children()}
        </div>
    }
}

#[component]
/// Action row, stacked on narrow screens.
pub fn DialogFooter(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_class(
                "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end",
                class.as_deref(),
            )
            data-slot="dialog-footer"
        >
            {children()}
        </div>
    }
}

#[component]
/// Heading that labels the dialog.
///
/// # Panics
///
/// Panics when rendered outside a [`Dialog`].
pub fn DialogTitle(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: DialogContext = expect_context("DialogTitle", "Dialog");
    view! {
        <h2
            id=context.title_id.get_value()
            class=merge_class("text-lg font-semibold leading-none", class.as_deref())
            data-slot="dialog-title"
        >
            {children()}
        </h2>
    }
}

#[component]
/// Text that describes the dialog.
///
/// # Panics
///
/// Panics when rendered outside a [`Dialog`].
pub fn DialogDescription(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: DialogContext = expect_context("DialogDescription", "Dialog");
    view! {
        <p
            id=context.description_id.get_value()
            class=merge_class("text-sm text-muted-foreground", class.as_deref())
            data-slot="dialog-description"
        >
            {children()}
        </p>
    }
}

#[component]
/// Button closing the enclosing [`Dialog`].
///
/// # Panics
///
/// Panics when rendered outside a [`Dialog`].
pub fn DialogClose(
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: DialogContext = expect_context("DialogClose", "Dialog");
    view! {
        <button
            type="button"
            class=class
            data-slot="dialog-close"
            on:click=move |_| context.set_open(false)
        >
            {children()}
        </button>
    }
}
