use std::cell::RefCell;
use std::rc::Rc;

use ui_headless::chart::{ChartConfig, ChartOption};

use super::*;
use crate::interop::{dispose_chart, mount_chart};

#[derive(Clone, Copy)]
struct ChartContext {
    config: StoredValue<ChartConfig>,
}

#[component]
/// Chart surface rendering `option` through the page's charting library.
///
/// `config` names each series and exposes its colour as `--color-{key}` to the children, so
/// legends and tooltips share the chart palette. Options without their own palette get the
/// configured colours. The chart is disposed with the component.
pub fn ChartContainer(
    #[prop(into)] option: MaybeSignal<ChartOption>,
    #[prop(optional)] config: ChartConfig,
    #[prop(optional, into)] dark: MaybeSignal<bool>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let chart_id = format!("chart-{}", id.unwrap_or_else(|| next_id("c")));
    let style_rules = config.style_rules(&chart_id);
    let config = store_value(config);
    provide_context(ChartContext { config });

    let surface = create_node_ref::<html::Div>();
    let mounted: Rc<RefCell<Option<web_sys::Element>>> = Rc::new(RefCell::new(None));

    {
        let mounted = Rc::clone(&mounted);
        create_effect(move |_| {
            let mut option = option.get();
            let dark = dark.get();
            let Some(surface) = surface.get() else {
                return;
            };
            config.with_value(|config| config.apply_palette(&mut option, dark));
            let element: web_sys::Element = (*surface).clone().into();
            if let Err(err) = mount_chart(&element, &option) {
                logging::warn!("{err}");
                return;
            }
            *mounted.borrow_mut() = Some(element);
        });
    }
    on_cleanup(move || {
        if let Some(element) = mounted.borrow_mut().take() {
            if let Err(err) = dispose_chart(&element) {
                logging::warn!("{err}");
            }
        }
    });

    view! {
        <div
            class=merge_class(
                "flex aspect-video flex-col justify-center text-xs",
                class.as_deref(),
            )
            data-chart=chart_id
            data-slot="chart"
        >
            <style>{style_rules}</style>
            <div node_ref=surface class="min-h-0 w-full flex-1" data-slot="chart-surface"></div>
            {children.map(|children| children())}
        </div>
    }
}

#[component]
/// Legend listing the configured series of the enclosing [`ChartContainer`].
///
/// `keys` restricts and orders the entries; by default every configured series is shown.
///
/// # Panics
///
/// Panics when rendered outside a [`ChartContainer`].
pub fn ChartLegendContent(
    #[prop(optional)] keys: Option<Vec<String>>,
    #[prop(optional)] hide_icon: bool,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context: ChartContext = expect_context("ChartLegendContent", "ChartContainer");
    let entries: Vec<(String, String)> = context.config.with_value(|config| match keys {
        Some(keys) => keys
            .into_iter()
            .map(|key| {
                let label = config.label(&key).to_string();
                (key, label)
            })
            .collect(),
        None => config
            .iter()
            .map(|(key, entry)| (key.to_string(), entry.label.clone()))
            .collect(),
    });

    view! {
        <div
            class=merge_class("flex items-center justify-center gap-4 pt-3", class.as_deref())
            data-slot="chart-legend"
        >
            {entries
                .into_iter()
                .map(|(key, label)| {
                    let swatch = format!("background-color: {};", ChartConfig::color_var(&key));
                    view! {
                        <div class="flex items-center gap-1.5" data-key=key>
                            {(!hide_icon)
                                .then(|| {
                                    view! {
                                        <div class="size-2 shrink-0 rounded-[2px]" style=swatch></div>
                                    }
                                })}
                            <span>{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
