use chrono::{Datelike, NaiveDate, Weekday};
use ui_headless::calendar::{weekday_labels, CalendarDay, CalendarMode, CalendarState, DateSelection};
use ui_headless::variants::{button_classes, ButtonSize, ButtonVariant};

use super::*;
use crate::config::use_ui_config;
use crate::interop;

fn focus_day(root: &web_sys::Element, date: NaiveDate) {
    let selector = format!("[data-day=\"{date}\"]");
    if let Ok(Some(cell)) = root.query_selector(&selector) {
        if let Ok(cell) = cell.dyn_into::<web_sys::HtmlElement>() {
            let _ = cell.focus();
        }
    }
}

#[component]
/// Month grid date picker for single dates, date sets, or ranges.
///
/// `week_start` and `fixed_weeks` default to the `[date]` configuration; `today` defaults to
/// the browser's local date.
pub fn Calendar(
    #[prop(optional)] mode: CalendarMode,
    #[prop(optional)] selection: Option<RwSignal<DateSelection>>,
    #[prop(optional)] today: Option<NaiveDate>,
    #[prop(optional)] min: Option<NaiveDate>,
    #[prop(optional)] max: Option<NaiveDate>,
    #[prop(optional)] disabled_weekdays: Vec<Weekday>,
    #[prop(optional)] disabled_dates: Vec<NaiveDate>,
    #[prop(optional)] week_start: Option<Weekday>,
    #[prop(optional)] fixed_weeks: Option<bool>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] on_select: Option<Callback<DateSelection>>,
) -> impl IntoView {
    let config = use_ui_config();
    let week_start = week_start.unwrap_or_else(|| config.week_start());
    let initial = selection
        .map(|selection| selection.get_untracked())
        .unwrap_or_else(|| DateSelection::empty(mode));
    let state = CalendarState::new(today.unwrap_or_else(interop::today), initial)
        .with_week_start(week_start)
        .with_fixed_weeks(fixed_weeks.unwrap_or(config.date.fixed_weeks))
        .with_bounds(min, max)
        .with_disabled_weekdays(disabled_weekdays)
        .with_disabled_dates(disabled_dates);
    let state = create_rw_signal(state);

    if let Some(selection) = selection {
        create_effect(move |_| {
            let requested = selection.get();
            if state.with_untracked(|state| *state.selection() != requested) {
                state.update(|state| state.set_selection(requested));
            }
        });
    }

    let publish = move || {
        let current = state.with_untracked(|state| state.selection().clone());
        if let Some(selection) = selection {
            selection.set(current.clone());
        }
        if let Some(on_select) = on_select.as_ref() {
            on_select.call(current);
        }
    };

    let root = create_node_ref::<html::Div>();
    let caption_id = next_id("calendar-caption");
    let grid = create_memo(move |_| state.with(CalendarState::grid));
    let caption = move || state.with(|state| state.month().caption());

    let on_grid_keydown = move |ev: KeyboardEvent| {
        let key = ev.key();
        if key == "Enter" || key == " " {
            ev.prevent_default();
            let mut changed = false;
            state.update(|state| changed = state.select_focused());
            if changed {
                publish();
            }
            return;
        }
        let mut moved = false;
        state.update(|state| moved = state.move_focus(&key));
        if !moved {
            return;
        }
        ev.prevent_default();
        if let Some(root) = root.get_untracked() {
            focus_day(&root, state.with_untracked(CalendarState::focused));
        }
    };

    let day_cell = move |day: CalendarDay| {
        let date = day.date;
        let selected = move || state.with(|state| state.selection().contains(date));
        let disabled = move || state.with(|state| state.is_disabled(date));
        view! {
            <td
                role="presentation"
                class="relative p-0 text-center text-sm focus-within:relative focus-within:z-20"
            >
                <button
                    type="button"
                    role="gridcell"
                    class=button_classes(
                        ButtonVariant::Ghost,
                        ButtonSize::Icon,
                        Some(
                            "size-8 p-0 font-normal aria-selected:opacity-100 data-[selected=true]:bg-primary data-[selected=true]:text-primary-foreground data-[outside=true]:text-muted-foreground data-[today=true]:bg-accent data-[range-middle=true]:rounded-none data-[range-middle=true]:bg-accent data-[range-middle=true]:text-accent-foreground",
                        ),
                    )
                    tabindex=move || if state.with(|state| state.focused() == date) { 0 } else { -1 }
                    aria-selected=move || bool_token(selected())
                    aria-label=date.format("%A, %B %-d, %Y").to_string()
                    disabled=disabled
                    data-day=date.to_string()
                    data-selected=move || bool_token(selected())
                    data-outside=bool_token(day.outside)
                    data-today=move || bool_token(state.with(|state| state.today() == date))
                    data-range-start=move || bool_token(state.with(|state| state.selection().is_range_start(date)))
                    data-range-end=move || bool_token(state.with(|state| state.selection().is_range_end(date)))
                    data-range-middle=move || bool_token(state.with(|state| state.selection().is_range_middle(date)))
                    on:click=move |_| {
                        let mut changed = false;
                        state.update(|state| changed = state.select(date));
                        if changed {
                            publish();
                        }
                    }
                >
                    {date.day()}
                </button>
            </td>
        }
    };

    let weekdays = weekday_labels(week_start)
        .into_iter()
        .map(|label| {
            view! {
                <th
                    scope="col"
                    class="w-8 rounded-md text-[0.8rem] font-normal text-muted-foreground"
                >
                    {label}
                </th>
            }
        })
        .collect_view();

    let nav_class = button_classes(
        ButtonVariant::Outline,
        ButtonSize::Icon,
        Some("absolute size-7 bg-transparent p-0 opacity-50 hover:opacity-100"),
    );

    view! {
        <div node_ref=root class=merge_class("p-3", class.as_deref()) data-slot="calendar">
            <div class="relative flex items-center justify-center pt-1" data-slot="calendar-caption">
                <button
                    type="button"
                    class=cn([nav_class.as_str(), "left-1"])
                    aria-label="Go to previous month"
                    disabled=move || !state.with(CalendarState::can_go_previous)
                    on:click=move |_| {
                        state.update(|state| {
                            state.previous_month();
                        });
                    }
                >
                    "‹"
                </button>
                <div id=caption_id.clone() class="text-sm font-medium" aria-live="polite">
                    {caption}
                </div>
                <button
                    type="button"
                    class=cn([nav_class.as_str(), "right-1"])
                    aria-label="Go to next month"
                    disabled=move || !state.with(CalendarState::can_go_next)
                    on:click=move |_| {
                        state.update(|state| {
                            state.next_month();
                        });
                    }
                >
                    "›"
                </button>
            </div>
            <table
                role="grid"
                aria-labelledby=caption_id
                aria-multiselectable=(mode == CalendarMode::Multiple).then_some("true")
                class="mt-4 w-full border-collapse space-y-1"
                on:keydown=on_grid_keydown
            >
                <thead>
                    <tr class="flex">{weekdays}</tr>
                </thead>
                <tbody>
                    {move || {
                        grid.get()
                            .into_iter()
                            .map(|week| {
                                view! {
                                    <tr class="mt-2 flex w-full">
                                        {week.into_iter().map(day_cell).collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
