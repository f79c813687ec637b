use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::interop::{observe_scroll_shadow, ScrollShadowHandle};

#[component]
/// Scrollable region that marks which edges have hidden content.
///
/// The viewport carries `data-scroll-top` and `data-scroll-bottom`, which the default classes
/// turn into fading edge shadows.
pub fn ScrollArea(
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional, into)] viewport_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let viewport = create_node_ref::<html::Div>();
    let observer: Rc<RefCell<Option<ScrollShadowHandle>>> = Rc::new(RefCell::new(None));

    {
        let observer = Rc::clone(&observer);
        viewport.on_load(move |element| {
            let element: web_sys::HtmlElement = (*element).clone().into();
            match observe_scroll_shadow(element) {
                Ok(handle) => *observer.borrow_mut() = Some(handle),
                Err(err) => logging::warn!("{err}"),
            }
        });
    }
    on_cleanup(move || {
        observer.borrow_mut().take();
    });

    view! {
        <div class=merge_class("relative overflow-hidden", class.as_deref()) data-slot="scroll-area">
            <div
                node_ref=viewport
                class=merge_class(
                    "size-full overflow-auto rounded-[inherit] outline-none focus-visible:ring-1 focus-visible:ring-ring data-[scroll-top=true]:shadow-[inset_0_8px_8px_-8px_rgba(0,0,0,0.2)] data-[scroll-bottom=true]:shadow-[inset_0_-8px_8px_-8px_rgba(0,0,0,0.2)]",
                    viewport_class.as_deref(),
                )
                tabindex="0"
                data-slot="scroll-area-viewport"
            >
                {children()}
            </div>
        </div>
    }
}
