//! カレンダーウィジェット
//!
//! 月グリッドはLeptosで `#calendar` に描画し、前月/翌月/リセットボタンと
//! ギャラリー項目はページ側のマークアップをそのまま操作する。

use gloo::console;
use gloo::events::EventListener;
use leptos::prelude::*;
use photo_timeline_common::{
    filter_items, render_month, CalendarCell, CalendarState, EventDateSet, YearMonth,
};

use crate::api::client;
use crate::dom::{self, ids, GALLERY_ITEM_SELECTOR};

/// 今日の年月
fn current_month() -> YearMonth {
    let today = js_sys::Date::new_0();
    YearMonth::new(today.get_full_year() as i32, today.get_month() + 1)
        .unwrap_or(YearMonth { year: 1970, month: 1 })
}

/// ギャラリーを日付で絞り込む
///
/// ページネーションで増えた項目も含めて毎回すべて走査し直す。
pub fn filter_gallery(date: &str) {
    let items = dom::query_all(GALLERY_ITEM_SELECTOR);
    let dates: Vec<Option<String>> = items.iter().map(|item| item.get_attribute("data-date")).collect();
    let outcome = filter_items(dates.iter().map(|d| d.as_deref()), date);

    for (item, visible) in items.iter().zip(&outcome.visibility) {
        dom::set_display(item, if *visible { "block" } else { "none" });
    }

    if outcome.show_no_results() {
        dom::show_id(ids::NO_PHOTOS_MSG, "block");
    } else {
        dom::hide_id(ids::NO_PHOTOS_MSG);
    }
}

/// 絞り込みを解除して全項目を表示
pub fn show_all_items() {
    for item in dom::query_all(GALLERY_ITEM_SELECTOR) {
        dom::set_display(&item, "block");
    }
    dom::hide_id(ids::NO_PHOTOS_MSG);
}

#[component]
pub fn CalendarGrid(
    state: RwSignal<CalendarState>,
    dates: ReadSignal<EventDateSet>,
) -> impl IntoView {
    // 月ラベルはグリッド外の要素
    Effect::new(move |_| {
        let label = state.with(|s| s.cursor.label());
        dom::set_text_id(ids::CURRENT_MONTH, &label);
    });

    let cells = move || dates.with(|d| state.with(|s| render_month(s, d)));

    view! {
        {move || {
            cells()
                .into_iter()
                .map(|cell| view! { <CalendarCellView cell=cell state=state /> })
                .collect_view()
        }}
    }
}

#[component]
fn CalendarCellView(cell: CalendarCell, state: RwSignal<CalendarState>) -> impl IntoView {
    let class = cell.class_name();
    let text = cell.text();

    match cell {
        CalendarCell::Day(day) => {
            let date = day.date;
            view! {
                <div class=class on:click=move |_| select_date(state, &date)>
                    {text}
                </div>
            }
            .into_any()
        }
        _ => view! { <div class=class>{text}</div> }.into_any(),
    }
}

fn select_date(state: RwSignal<CalendarState>, date: &str) {
    state.update(|s| s.select(date));
    dom::show_id(ids::RESET_FILTER, "block");
    filter_gallery(date);
}

fn reset_filter(state: RwSignal<CalendarState>) {
    state.update(|s| s.reset());
    show_all_items();
    dom::hide_id(ids::RESET_FILTER);
}

/// カレンダーウィジェット
#[derive(Clone, Copy)]
pub struct CalendarWidget {
    state: RwSignal<CalendarState>,
}

impl CalendarWidget {
    /// `#calendar` があれば描画し、日付一覧の取得を開始する
    pub fn mount() -> Option<Self> {
        let container = dom::by_id(ids::CALENDAR)?;

        let state = RwSignal::new(CalendarState::new(current_month()));
        let (dates, set_dates) = signal(EventDateSet::default());

        container.set_inner_html("");
        leptos::mount::mount_to(container, move || view! { <CalendarGrid state=state dates=dates /> })
            .forget();

        let widget = Self { state };
        widget.wire_controls();

        wasm_bindgen_futures::spawn_local(async move {
            match client::fetch_archive_dates().await {
                Ok(fetched) => set_dates.set(fetched),
                // 取得失敗時は印なしのまま操作可能
                Err(e) => console::warn!(format!("Failed to fetch archive dates for calendar: {}", e)),
            }
        });

        Some(widget)
    }

    fn wire_controls(&self) {
        fn bind(id: &str, state: RwSignal<CalendarState>, handler: fn(RwSignal<CalendarState>)) {
            if let Some(button) = dom::by_id(id) {
                EventListener::new(&button, "click", move |_| handler(state)).forget();
            }
        }

        bind(ids::PREV_MONTH, self.state, |state| state.update(|s| s.prev_month()));
        bind(ids::NEXT_MONTH, self.state, |state| state.update(|s| s.next_month()));
        bind(ids::RESET_FILTER, self.state, reset_filter);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn setup(html: &str) {
        dom::body().expect("body").set_inner_html(html);
    }

    fn display(id: &str) -> String {
        dom::by_id(id)
            .and_then(|el| el.style().get_property_value("display").ok())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn wasm_filter_gallery_shows_matching_items() {
        setup(
            r#"
            <div id="a" class="masonry-item" data-date="2024-01-05"></div>
            <div id="b" class="masonry-item" data-date="2024-01-06"></div>
            <div id="c" class="masonry-item" data-date="2024-01-05"></div>
            <p id="noPhotosMsg" style="display:none"></p>
            "#,
        );

        filter_gallery("2024-01-05");

        assert_eq!(display("a"), "block");
        assert_eq!(display("b"), "none");
        assert_eq!(display("c"), "block");
        assert_eq!(display("noPhotosMsg"), "none");
    }

    #[wasm_bindgen_test]
    fn wasm_filter_gallery_no_match_shows_message() {
        setup(
            r#"
            <div id="a" class="masonry-item" data-date="2024-01-06"></div>
            <p id="noPhotosMsg" style="display:none"></p>
            "#,
        );

        filter_gallery("2024-01-05");

        assert_eq!(display("a"), "none");
        assert_eq!(display("noPhotosMsg"), "block");
    }

    #[wasm_bindgen_test]
    fn wasm_reset_shows_everything() {
        setup(
            r#"
            <div id="a" class="masonry-item" data-date="2024-01-06" style="display:none"></div>
            <p id="noPhotosMsg" style="display:block"></p>
            <button id="resetFilter" style="display:block"></button>
            "#,
        );

        let state = RwSignal::new(CalendarState::new(YearMonth::new(2024, 1).unwrap()));
        state.update(|s| s.select("2024-01-05"));
        reset_filter(state);

        assert_eq!(display("a"), "block");
        assert_eq!(display("noPhotosMsg"), "none");
        assert_eq!(display("resetFilter"), "none");
        assert_eq!(state.with(|s| s.selected().map(str::to_string)), None);
    }
}
