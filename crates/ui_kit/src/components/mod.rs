//! Leptos components: thin markup wrappers over the `ui_headless` state containers.
//!
//! Every component accepts an optional `class` merged last through [`cn`], so callers can
//! override any utility, and marks its root with `data-slot` for styling hooks.

use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use ui_headless::cn;
use wasm_bindgen::JsCast;

use crate::context::{expect_context, try_context};

mod breadcrumb;
mod button;
mod calendar;
mod chart;
mod combobox;
mod dialog;
mod input_otp;
mod navigation_menu;
mod pagination;
mod popover;
mod radio_group;
mod resizable;
mod scroll_area;
mod shortcut;
mod slider;
mod toggle;

pub use breadcrumb::{
    Breadcrumb, BreadcrumbEllipsis, BreadcrumbEntry, BreadcrumbItem, BreadcrumbLink,
    BreadcrumbList, BreadcrumbPage, BreadcrumbSeparator, BreadcrumbTrail,
};
pub use button::{Badge, Button, Separator};
pub use calendar::Calendar;
pub use chart::{ChartContainer, ChartLegendContent};
pub use combobox::{
    try_use_combobox, Combobox, ComboboxContext, ComboboxEmpty, ComboboxInput, ComboboxItem,
    ComboboxList, ComboboxTrigger,
};
pub use dialog::{
    try_use_dialog, Dialog, DialogClose, DialogContent, DialogContext, DialogDescription,
    DialogFooter, DialogHeader, DialogTitle, DialogTrigger,
};
pub use input_otp::{
    try_use_input_otp, InputOtp, InputOtpContext, InputOtpGroup, InputOtpSeparator, InputOtpSlot,
};
pub use navigation_menu::{
    try_use_navigation_menu, NavigationMenu, NavigationMenuContent, NavigationMenuContext,
    NavigationMenuItem, NavigationMenuLink, NavigationMenuList, NavigationMenuTrigger,
};
pub use pagination::{
    Pagination, PaginationContent, PaginationControl, PaginationEllipsis, PaginationItem,
    PaginationLink, PaginationNext, PaginationPrevious,
};
pub use popover::{
    try_use_popover, Popover, PopoverArrow, PopoverContent, PopoverContext, PopoverTrigger,
};
pub use radio_group::{try_use_radio_group, RadioGroup, RadioGroupContext, RadioGroupItem};
pub use resizable::{
    try_use_resizable, ResizableContext, ResizableHandle, ResizablePanel, ResizablePanelGroup,
};
pub use scroll_area::ScrollArea;
pub use shortcut::{use_keyboard_shortcut, Kbd, KeyboardShortcut};
pub use slider::Slider;
pub use toggle::{try_use_toggle_group, Toggle, ToggleGroup, ToggleGroupContext, ToggleGroupItem};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Document-unique id for wiring `aria-controls` and `aria-labelledby`.
pub(crate) fn next_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

pub(crate) fn merge_class(base: &str, class: Option<&str>) -> String {
    cn([base, class.unwrap_or_default()])
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Focuses the `index`-th descendant of `root` matching `selector`.
pub(crate) fn focus_nth(root: &web_sys::Element, selector: &str, index: usize) {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return;
    };
    let Some(node) = u32::try_from(index).ok().and_then(|index| nodes.item(index)) else {
        return;
    };
    if let Ok(element) = node.dyn_into::<web_sys::HtmlElement>() {
        let _ = element.focus();
    }
}

/// `data-state` for open/closed surfaces.
pub(crate) fn open_token(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

/// `data-state` for pressable items.
pub(crate) fn on_token(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

/// `data-state` for checkable items.
pub(crate) fn checked_token(checked: bool) -> &'static str {
    if checked {
        "checked"
    } else {
        "unchecked"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn caller_class_wins_conflicts() {
        assert_eq!(merge_class("px-2 py-1", Some("px-4")), "py-1 px-4");
        assert_eq!(merge_class("px-2", None), "px-2");
    }

    #[test]
    fn ids_are_unique_per_prefix() {
        let first = next_id("popover");
        let second = next_id("popover");
        assert!(first.starts_with("popover-"));
        assert_ne!(first, second);
    }

    #[test]
    fn state_tokens() {
        assert_eq!(open_token(true), "open");
        assert_eq!(on_token(false), "off");
        assert_eq!(checked_token(true), "checked");
        assert_eq!(bool_token(false), "false");
    }
}
