//! Framework-free state containers behind the shared component library.
//!
//! Every widget with behavior beyond markup keeps its state here: selection sets, roving focus,
//! combobox filtering, OTP slots, calendar grids, slider values, panel layouts, and popover
//! placement. The Leptos layer in `ui_kit` owns signals and DOM wiring and delegates every state
//! transition to these types so they can be exercised without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod breadcrumb;
pub mod calendar;
pub mod chart;
pub mod class;
pub mod combobox;
pub mod config;
mod error;
pub mod navigation_menu;
pub mod otp;
pub mod pagination;
pub mod placement;
pub mod resizable;
pub mod roving;
pub mod scroll;
pub mod selection;
pub mod shortcut;
pub mod slider;
pub mod variants;

pub use class::{cn, ClassList};
pub use config::UiConfig;
pub use error::UiError;
