//! DOM操作ヘルパー
//!
//! ページ側のマークアップに要素がない場合は何もしない（エラーにしない）。

use photo_timeline_common::ElementInfo;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

/// ページ側マークアップの要素ID
pub mod ids {
    pub const CALENDAR: &str = "calendar";
    pub const CURRENT_MONTH: &str = "currentMonth";
    pub const PREV_MONTH: &str = "prevMonth";
    pub const NEXT_MONTH: &str = "nextMonth";
    pub const RESET_FILTER: &str = "resetFilter";
    pub const NO_PHOTOS_MSG: &str = "noPhotosMsg";

    pub const ARCHIVE_CONFIG: &str = "archive-config";
    pub const LOAD_MORE_BUTTON: &str = "loadMoreArchiveBtn";
    pub const LOADING_TEXT: &str = "loadingArchiveText";
    pub const GALLERY_GRID: &str = "galleryGrid";
    pub const LOAD_MORE_CONTAINER: &str = "loadMoreContainer";

    pub const DETAIL_MODAL: &str = "detailModal";
    pub const DETAIL_DATE: &str = "detailDate";
    pub const DETAIL_LOCATION: &str = "detailLocation";
    pub const DETAIL_WEATHER: &str = "detailWeather";
    pub const DETAIL_WEATHER_WRAPPER: &str = "detailWeatherWrapper";
    pub const MODAL_MEDIA: &str = "modalMedia";
    pub const DETAIL_STORY: &str = "detailStory";
    pub const DETAIL_AUTHOR: &str = "detailAuthor";
    pub const DETAIL_SUMMARY: &str = "detailSummary";
    pub const DETAIL_PEOPLE: &str = "detailPeople";
    pub const DETAIL_PEOPLE_WRAPPER: &str = "detailPeopleWrapper";

    pub const STACK_MODAL: &str = "stackModal";
    pub const STACK_GRID_CONTAINER: &str = "stackGridContainer";
}

/// ギャラリー項目のセレクタ
pub const GALLERY_ITEM_SELECTOR: &str = ".masonry-item";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn set_display(el: &HtmlElement, display: &str) {
    let _ = el.style().set_property("display", display);
}

pub fn hide(el: &HtmlElement) {
    set_display(el, "none");
}

pub fn is_hidden(el: &HtmlElement) -> bool {
    el.style()
        .get_property_value("display")
        .map(|d| d == "none" || d.is_empty())
        .unwrap_or(true)
}

/// IDで要素を探して表示（なければ何もしない）
pub fn show_id(id: &str, display: &str) {
    if let Some(el) = by_id(id) {
        set_display(&el, display);
    }
}

pub fn hide_id(id: &str) {
    if let Some(el) = by_id(id) {
        hide(&el);
    }
}

pub fn set_text_id(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// モーダル表示中はページのスクロールを止める
pub fn lock_scroll() {
    if let Some(body) = body() {
        let _ = body.style().set_property("overflow", "hidden");
    }
}

pub fn restore_scroll() {
    if let Some(body) = body() {
        let _ = body.style().remove_property("overflow");
    }
}

/// セレクタに一致するHTML要素をすべて取得（毎回DOMを走査する）
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn non_empty_attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.is_empty())
}

/// 要素の判定情報を取得
pub fn element_info(el: &Element) -> ElementInfo {
    ElementInfo {
        tag: el.tag_name().to_lowercase(),
        id: Some(el.id()).filter(|id| !id.is_empty()),
        classes: el
            .get_attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        src: el
            .dyn_ref::<HtmlImageElement>()
            .map(|img| img.src())
            .filter(|src| !src.is_empty()),
        href: non_empty_attr(el, "href"),
        event_id: non_empty_attr(el, "data-event-id"),
        stack_id: non_empty_attr(el, "data-stack-id"),
        scroll_date: non_empty_attr(el, "data-scroll-date"),
    }
}

/// クリック対象からルートまでの要素列
pub fn element_path(target: &Element) -> Vec<ElementInfo> {
    let mut path = vec![element_info(target)];
    let mut current = target.parent_element();
    while let Some(el) = current {
        path.push(element_info(&el));
        current = el.parent_element();
    }
    path
}
