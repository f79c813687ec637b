use ui_headless::placement::{compute_position, Align, Placement, PlacementOptions, Side};
use ui_headless::UiError;

use super::*;
use crate::config::use_ui_config;
use crate::interop::{apply_position, measure_rect, viewport_rect};

/// Inline style pinning an arrow of `width` x `height` to the edge facing the trigger.
fn arrow_style(side: Side, width: f64, height: f64) -> String {
    let (edge, axis) = match side {
        Side::Bottom => ("top", "left"),
        Side::Top => ("bottom", "left"),
        Side::Right => ("left", "top"),
        Side::Left => ("right", "top"),
    };
    let (box_width, box_height) = if side.is_vertical() {
        (width, height)
    } else {
        (height, width)
    };
    format!(
        "position: absolute; {edge}: -{height}px; {axis}: var(--ui-arrow-offset, 0px); width: {box_width}px; height: {box_height}px;"
    )
}

#[derive(Clone, Copy)]
/// Shared state of a [`Popover`].
pub struct PopoverContext {
    /// Whether the content is shown.
    pub open: RwSignal<bool>,
    /// Last resolved placement, `None` until the content has been measured.
    pub placement: RwSignal<Option<Placement>>,
    arrow_size: RwSignal<f64>,
    content_id: StoredValue<String>,
    trigger: NodeRef<html::Button>,
    on_open_change: Option<Callback<bool>>,
}

impl PopoverContext {
    /// Opens or closes the popover and notifies `on_open_change`.
    pub fn set_open(&self, open: bool) {
        if self.open.get_untracked() == open {
            return;
        }
        self.open.set(open);
        if let Some(on_open_change) = self.on_open_change.as_ref() {
            on_open_change.call(open);
        }
    }

    /// Flips the open state.
    pub fn toggle(&self) {
        self.set_open(!self.open.get_untracked());
    }
}

/// The enclosing [`Popover`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`Popover`].
pub fn try_use_popover() -> Result<PopoverContext, UiError> {
    try_context("PopoverContent", "Popover")
}

#[component]
/// Floating panel anchored to a [`PopoverTrigger`].
///
/// Pass `open` to control the state, or `default_open` to let the popover own it.
pub fn Popover(
    #[prop(optional)] open: Option<RwSignal<bool>>,
    #[prop(optional)] default_open: bool,
    #[prop(optional)] on_open_change: Option<Callback<bool>>,
    children: Children,
) -> impl IntoView {
    provide_context(PopoverContext {
        open: open.unwrap_or_else(|| create_rw_signal(default_open)),
        placement: create_rw_signal(None),
        arrow_size: create_rw_signal(0.0),
        content_id: store_value(next_id("popover-content")),
        trigger: create_node_ref::<html::Button>(),
        on_open_change,
    });
    children().into_view()
}

#[component]
/// Button toggling the enclosing [`Popover`].
///
/// # Panics
///
/// Panics when rendered outside a [`Popover`].
pub fn PopoverTrigger(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: PopoverContext = expect_context("PopoverTrigger", "Popover");
    let trigger_ref = context.trigger;
    view! {
        <button
            node_ref=trigger_ref
            type="button"
            class=class
            aria-label=aria_label
            aria-haspopup="dialog"
            aria-expanded=move || bool_token(context.open.get())
            aria-controls=context.content_id.get_value()
            data-state=move || open_token(context.open.get())
            data-slot="popover-trigger"
            on:click=move |_| context.toggle()
        >
            {children()}
        </button>
    }
}

#[component]
/// Floating content, positioned against the trigger and kept inside the viewport.
///
/// Escape and clicks outside the trigger and content close it. `side_offset` and
/// `collision_padding` default to the `[popover]` configuration.
///
/// # Panics
///
/// Panics when rendered outside a [`Popover`].
pub fn PopoverContent(
    #[prop(optional)] side: Side,
    #[prop(optional)] align: Align,
    #[prop(optional)] side_offset: Option<f64>,
    #[prop(optional)] align_offset: f64,
    #[prop(optional)] collision_padding: Option<f64>,
    #[prop(default = true)] avoid_collisions: bool,
    #[prop(optional, into)] class: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let context: PopoverContext = expect_context("PopoverContent", "Popover");
    let config = use_ui_config().popover;
    let side_offset = side_offset.unwrap_or(config.side_offset);
    let collision_padding = collision_padding.unwrap_or(config.collision_padding);
    let content = create_node_ref::<html::Div>();

    let reposition = move || {
        let (Some(trigger), Some(element)) =
            (context.trigger.get_untracked(), content.get_untracked())
        else {
            return;
        };
        let measured = measure_rect(&trigger).and_then(|trigger| {
            let size = measure_rect(&element)?.size();
            let viewport = viewport_rect()?;
            let options = PlacementOptions {
                side,
                align,
                side_offset,
                align_offset,
                collision_padding,
                avoid_collisions,
                arrow_size: context.arrow_size.get_untracked(),
            };
            let placement = compute_position(trigger, size, viewport, options);
            apply_position(&element, &placement)?;
            Ok(placement)
        });
        match measured {
            Ok(placement) => context.placement.set(Some(placement)),
            Err(err) => logging::warn!("{err}"),
        }
    };

    create_effect(move |_| {
        if context.open.get() && content.get().is_some() {
            request_animation_frame(reposition);
        }
    });

    let on_resize = window_event_listener(ev::resize, move |_| {
        if context.open.get_untracked() {
            reposition();
        }
    });
    let on_escape = window_event_listener(ev::keydown, move |ev| {
        if context.open.get_untracked() && ev.key() == "Escape" {
            context.set_open(false);
            if let Some(trigger) = context.trigger.get_untracked() {
                let _ = trigger.focus();
            }
        }
    });
    let on_outside = window_event_listener(ev::pointerdown, move |ev| {
        if !context.open.get_untracked() {
            return;
        }
        let target = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
        let inside_content = content
            .get_untracked()
            .is_some_and(|element| element.contains(target.as_ref()));
        let inside_trigger = context
            .trigger
            .get_untracked()
            .is_some_and(|trigger| trigger.contains(target.as_ref()));
        if !inside_content && !inside_trigger {
            context.set_open(false);
        }
    });
    on_cleanup(move || {
        on_resize.remove();
        on_escape.remove();
        on_outside.remove();
    });

    let class = merge_class(
        "z-50 w-72 rounded-md border bg-popover p-4 text-popover-foreground shadow-md outline-none",
        class.as_deref(),
    );
    let children = store_value(children);

    view! {
        <Show when=move || context.open.get()>
            <div
                node_ref=content
                id=context.content_id.get_value()
                role="dialog"
                tabindex="-1"
                class=class.clone()
                style="position: fixed; left: 0px; top: 0px;"
                data-state=move || open_token(context.open.get())
                data-side=side.as_str()
                data-align=align.as_str()
                data-slot="popover-content"
            >
                {children.with_value(|children| children())}
            </div>
        </Show>
    }
}

#[component]
/// Arrow pointing from the content at the trigger centre.
///
/// # Panics
///
/// Panics when rendered outside a [`Popover`].
pub fn PopoverArrow(
    #[prop(default = 10.0)] width: f64,
    #[prop(default = 5.0)] height: f64,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: PopoverContext = expect_context("PopoverArrow", "Popover");
    context.arrow_size.set(width);
    on_cleanup(move || {
        context.arrow_size.try_set(0.0);
    });
    let side = move || {
        context
            .placement
            .with(|placement| placement.map_or(Side::Bottom, |placement| placement.side))
    };

    view! {
        <span
            aria-hidden="true"
            class=merge_class("block overflow-hidden", class.as_deref())
            style=move || arrow_style(side(), width, height)
            data-side=move || side().as_str()
            data-slot="popover-arrow"
        >
            <svg
                viewBox="0 0 30 10"
                preserveAspectRatio="none"
                class="block size-full fill-popover data-[side=left]:-rotate-90 data-[side=right]:rotate-90 data-[side=top]:rotate-180"
                data-side=move || side().as_str()
            >
                <polygon points="0,10 30,10 15,0"></polygon>
            </svg>
        </span>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bottom_arrow_sits_above_the_content() {
        assert_eq!(
            arrow_style(Side::Bottom, 10.0, 5.0),
            "position: absolute; top: -5px; left: var(--ui-arrow-offset, 0px); width: 10px; height: 5px;"
        );
    }

    #[test]
    fn side_arrows_swap_their_box() {
        assert_eq!(
            arrow_style(Side::Left, 10.0, 5.0),
            "position: absolute; right: -5px; top: var(--ui-arrow-offset, 0px); width: 5px; height: 10px;"
        );
    }
}
