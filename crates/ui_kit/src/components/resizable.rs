use leptos::ev::PointerEvent;
use ui_headless::resizable::{delta_from_pointer, PanelConstraints, PanelLayout};
use ui_headless::roving::Orientation;
use ui_headless::UiError;

use super::*;
use crate::interop::measure_rect;

#[derive(Clone, Copy)]
/// Shared state of a [`ResizablePanelGroup`].
pub struct ResizableContext {
    /// Axis the panels are laid out along.
    pub orientation: Orientation,
    /// Current sizes; `None` while the registered constraints cannot be satisfied.
    pub layout: RwSignal<Option<PanelLayout>>,
    panels: RwSignal<Vec<(usize, PanelConstraints)>>,
    next_panel: StoredValue<usize>,
    root: NodeRef<html::Div>,
    on_layout: Option<Callback<Vec<f64>>>,
}

impl ResizableContext {
    fn register(&self, constraints: PanelConstraints) -> usize {
        let id = self.next_panel.get_value();
        self.next_panel.set_value(id + 1);
        self.panels.update(|panels| panels.push((id, constraints)));
        self.rebuild();
        id
    }

    fn unregister(&self, id: usize) {
        let removed = self
            .panels
            .try_update(|panels| panels.retain(|(panel, _)| *panel != id));
        if removed.is_some() {
            self.rebuild();
        }
    }

    fn rebuild(&self) {
        let constraints: Vec<PanelConstraints> = self
            .panels
            .with_untracked(|panels| panels.iter().map(|(_, constraints)| *constraints).collect());
        let layout = match PanelLayout::new(constraints) {
            Ok(layout) => Some(layout),
            Err(err) => {
                logging::warn!("{err}");
                None
            }
        };
        let _ = self.layout.try_set(layout);
    }

    /// Position of a registered panel.
    fn panel_index(&self, id: usize) -> Option<usize> {
        self.panels
            .with(|panels| panels.iter().position(|(panel, _)| *panel == id))
    }

    /// Number of panels registered so far.
    pub fn panel_count(&self) -> usize {
        self.panels.with_untracked(Vec::len)
    }

    /// Size of panel `index` in percent.
    pub fn size(&self, index: usize) -> Option<f64> {
        self.layout
            .with(|layout| layout.as_ref().and_then(|layout| layout.size(index)))
    }

    /// Replaces the layout and notifies `on_layout`.
    pub fn set_layout(&self, layout: PanelLayout) {
        let sizes = layout.sizes().to_vec();
        self.layout.set(Some(layout));
        if let Some(on_layout) = self.on_layout.as_ref() {
            on_layout.call(sizes);
        }
    }

    fn group_extent(&self) -> Option<f64> {
        let root = self.root.get_untracked()?;
        match measure_rect(&root) {
            Ok(rect) => Some(match self.orientation {
                Orientation::Vertical => rect.height,
                Orientation::Horizontal | Orientation::Both => rect.width,
            }),
            Err(err) => {
                logging::warn!("{err}");
                None
            }
        }
    }
}

/// The enclosing [`ResizablePanelGroup`]'s context.
///
/// # Errors
///
/// Returns [`UiError::MissingContext`] outside a [`ResizablePanelGroup`].
pub fn try_use_resizable() -> Result<ResizableContext, UiError> {
    try_context("ResizablePanel", "ResizablePanelGroup")
}

#[component]
/// Row or column of panels separated by draggable handles.
///
/// Panels register in render order. Constraints that cannot fit in the group are logged and
/// the panels share the space evenly.
pub fn ResizablePanelGroup(
    #[prop(optional)] orientation: Orientation,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_layout: Option<Callback<Vec<f64>>>,
    children: Children,
) -> impl IntoView {
    let root = create_node_ref::<html::Div>();
    provide_context(ResizableContext {
        orientation,
        layout: create_rw_signal(None),
        panels: create_rw_signal(Vec::new()),
        next_panel: store_value(0),
        root,
        on_layout,
    });

    view! {
        <div
            node_ref=root
            class=merge_class(
                "flex h-full w-full data-[panel-group-direction=vertical]:flex-col",
                class.as_deref(),
            )
            data-panel-group-direction=orientation.token()
            data-slot="resizable-panel-group"
        >
            {children()}
        </div>
    }
}

#[component]
/// One panel of a [`ResizablePanelGroup`]. Sizes are percentages of the group.
///
/// # Panics
///
/// Panics when rendered outside a [`ResizablePanelGroup`].
pub fn ResizablePanel(
    #[prop(optional)] default_size: Option<f64>,
    #[prop(default = 0.0)] min_size: f64,
    #[prop(default = 100.0)] max_size: f64,
    #[prop(optional)] collapsible: bool,
    #[prop(default = 0.0)] collapsed_size: f64,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context: ResizableContext = expect_context("ResizablePanel", "ResizablePanelGroup");
    let mut constraints = PanelConstraints {
        default_size,
        ..PanelConstraints::default()
    }
    .with_min(min_size)
    .with_max(max_size);
    if collapsible {
        constraints = constraints.collapsible(collapsed_size);
    }
    let id = context.register(constraints);
    on_cleanup(move || context.unregister(id));

    let size = move || {
        context
            .panel_index(id)
            .and_then(|index| context.size(index))
    };
    let style = move || match size() {
        Some(size) => format!("flex: {size} 1 0px; overflow: hidden;"),
        None => "flex: 1 1 0px; overflow: hidden;".to_string(),
    };
    let collapsed = move || {
        context.panel_index(id).is_some_and(|index| {
            context
                .layout
                .with(|layout| layout.as_ref().is_some_and(|layout| layout.is_collapsed(index)))
        })
    };

    view! {
        <div
            class=class
            style=style
            data-state=move || if collapsed() { "collapsed" } else { "expanded" }
            data-slot="resizable-panel"
        >
            {children()}
        </div>
    }
}

#[derive(Clone)]
struct Drag {
    origin: f64,
    extent: f64,
    start: PanelLayout,
}

#[component]
/// Draggable divider between the panels rendered before and after it.
///
/// # Panics
///
/// Panics when rendered outside a [`ResizablePanelGroup`].
pub fn ResizableHandle(
    #[prop(optional)] with_handle: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: ResizableContext = expect_context("ResizableHandle", "ResizablePanelGroup");
    let handle = context.panel_count().saturating_sub(1);
    let vertical = context.orientation == Orientation::Vertical;
    let drag = create_rw_signal(None::<Drag>);
    let handle_ref = create_node_ref::<html::Div>();

    let pointer_position = move |ev: &PointerEvent| {
        if vertical {
            f64::from(ev.client_y())
        } else {
            f64::from(ev.client_x())
        }
    };

    let on_pointerdown = move |ev: PointerEvent| {
        if disabled.get_untracked() || ev.button() != 0 {
            return;
        }
        let Some(start) = context.layout.get_untracked() else {
            return;
        };
        let Some(extent) = context.group_extent() else {
            return;
        };
        ev.prevent_default();
        if let Some(element) = handle_ref.get_untracked() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
        drag.set(Some(Drag {
            origin: pointer_position(&ev),
            extent,
            start,
        }));
    };
    let on_pointermove = move |ev: PointerEvent| {
        let Some(Drag {
            origin,
            extent,
            mut start,
        }) = drag.get_untracked()
        else {
            return;
        };
        let delta = delta_from_pointer(pointer_position(&ev) - origin, extent);
        start.resize_handle(handle, delta);
        if context.layout.with_untracked(|layout| layout.as_ref() != Some(&start)) {
            context.set_layout(start);
        }
    };
    let on_pointerup = move |ev: PointerEvent| {
        if drag.get_untracked().is_none() {
            return;
        }
        drag.set(None);
        if let Some(element) = handle_ref.get_untracked() {
            let _ = element.release_pointer_capture(ev.pointer_id());
        }
    };
    let on_keydown = move |ev: KeyboardEvent| {
        if disabled.get_untracked() {
            return;
        }
        let Some(mut layout) = context.layout.get_untracked() else {
            return;
        };
        if !layout.handle_key(handle, &ev.key(), context.orientation) {
            return;
        }
        ev.prevent_default();
        context.set_layout(layout);
    };

    let class = merge_class(
        "relative flex w-px items-center justify-center bg-border after:absolute after:inset-y-0 after:left-1/2 after:w-1 after:-translate-x-1/2 focus-visible:outline-none focus-visible:ring-1 focus-visible:ring-ring data-[panel-group-direction=vertical]:h-px data-[panel-group-direction=vertical]:w-full",
        class.as_deref(),
    );
    let separator_orientation = if vertical { "horizontal" } else { "vertical" };

    view! {
        <div
            node_ref=handle_ref
            role="separator"
            tabindex=move || if disabled.get() { -1 } else { 0 }
            class=class
            aria-orientation=separator_orientation
            aria-valuemin=0
            aria-valuemax=100
            aria-valuenow=move || context.size(handle).map(f64::round)
            aria-disabled=move || disabled.get().then_some("true")
            data-panel-group-direction=context.orientation.token()
            data-state=move || if drag.with(Option::is_some) { "drag" } else { "inactive" }
            data-slot="resizable-handle"
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:pointercancel=on_pointerup
            on:keydown=on_keydown
        >
            {with_handle
                .then(|| {
                    view! {
                        <div class="z-10 flex h-4 w-3 items-center justify-center rounded-sm border bg-border">
                            <span class="h-2.5 w-px bg-foreground/40"></span>
                        </div>
                    }
                })}
        </div>
    }
}
