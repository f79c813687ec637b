//! Leptos component library styled with Tailwind utility classes.
//!
//! Components are thin wrappers over the `ui_headless` state containers: they own signals,
//! attach DOM listeners, and render markup carrying `data-slot`, `data-state`, and ARIA
//! attributes. Compound components share state through context and panic with a descriptive
//! message when a part is rendered outside its provider; the `try_use_*` accessors return
//! [`UiError::MissingContext`] instead.
//!
//! Library-wide defaults come from [`UiConfig`], installed with [`UiConfigProvider`] or
//! [`provide_ui_config`]. Browser-only work (measurement, dialogs, charts, shortcuts) goes
//! through [`interop`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod components;
pub mod config;
mod context;
pub mod interop;

pub use components::{
    try_use_combobox, try_use_dialog, try_use_input_otp, try_use_navigation_menu,
    try_use_popover, try_use_radio_group, try_use_resizable, try_use_toggle_group,
    use_keyboard_shortcut, Badge, Breadcrumb, BreadcrumbEllipsis, BreadcrumbEntry,
    BreadcrumbItem, BreadcrumbLink, BreadcrumbList, BreadcrumbPage, BreadcrumbSeparator,
    BreadcrumbTrail, Button, Calendar, ChartContainer, ChartLegendContent, Combobox,
    ComboboxContext, ComboboxEmpty, ComboboxInput, ComboboxItem, ComboboxList, ComboboxTrigger,
    Dialog, DialogClose, DialogContent, DialogContext, DialogDescription, DialogFooter,
    DialogHeader, DialogTitle, DialogTrigger, InputOtp, InputOtpContext, InputOtpGroup,
    InputOtpSeparator, InputOtpSlot, Kbd, KeyboardShortcut, NavigationMenu,
    NavigationMenuContent, NavigationMenuContext, NavigationMenuItem, NavigationMenuLink,
    NavigationMenuList, NavigationMenuTrigger, Pagination, PaginationContent, PaginationControl,
    PaginationEllipsis, PaginationItem, PaginationLink, PaginationNext, PaginationPrevious,
    Popover, PopoverArrow, PopoverContent, PopoverContext, PopoverTrigger, RadioGroup,
    RadioGroupContext, RadioGroupItem, ResizableContext, ResizableHandle, ResizablePanel,
    ResizablePanelGroup, ScrollArea, Separator, Slider, Toggle, ToggleGroup, ToggleGroupContext,
    ToggleGroupItem,
};
pub use config::{provide_ui_config, use_ui_config, UiConfigProvider};
pub use ui_headless::calendar::{CalendarMode, DateSelection};
pub use ui_headless::chart::{ChartConfig, ChartOption, ChartSeriesConfig};
pub use ui_headless::otp::OtpPattern;
pub use ui_headless::placement::{Align, Side};
pub use ui_headless::roving::Orientation;
pub use ui_headless::selection::SelectionMode;
pub use ui_headless::shortcut::{KeyPress, KeyShortcut};
pub use ui_headless::variants::{BadgeVariant, ButtonSize, ButtonVariant, ToggleSize, ToggleVariant};
pub use ui_headless::{cn, UiConfig, UiError};

/// Convenience imports for applications composing the component set.
pub mod prelude {
    pub use crate::{
        cn, provide_ui_config, use_keyboard_shortcut, use_ui_config, Align, Badge, BadgeVariant,
        Breadcrumb, BreadcrumbEllipsis, BreadcrumbEntry, BreadcrumbItem, BreadcrumbLink,
        BreadcrumbList, BreadcrumbPage, BreadcrumbSeparator, BreadcrumbTrail, Button, ButtonSize,
        ButtonVariant, Calendar, CalendarMode, ChartConfig, ChartContainer, ChartLegendContent,
        ChartOption, ChartSeriesConfig, Combobox, ComboboxEmpty, ComboboxInput, ComboboxItem,
        ComboboxList, ComboboxTrigger, DateSelection, Dialog, DialogClose, DialogContent,
        DialogDescription, DialogFooter, DialogHeader, DialogTitle, DialogTrigger, InputOtp,
        InputOtpGroup, InputOtpSeparator, InputOtpSlot, Kbd, KeyboardShortcut, NavigationMenu,
        NavigationMenuContent, NavigationMenuItem, NavigationMenuLink, NavigationMenuList,
        NavigationMenuTrigger, Orientation, OtpPattern, Pagination, PaginationContent,
        PaginationControl, PaginationEllipsis, PaginationItem, PaginationLink, PaginationNext,
        PaginationPrevious, Popover, PopoverArrow, PopoverContent, PopoverTrigger, RadioGroup,
        RadioGroupItem, ResizableHandle, ResizablePanel, ResizablePanelGroup, ScrollArea,
        SelectionMode, Separator, Side, Slider, Toggle, ToggleGroup, ToggleGroupItem,
        ToggleSize, ToggleVariant, UiConfig, UiConfigProvider,
    };
}
