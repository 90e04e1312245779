//! イベント詳細モーダル
//!
//! 取得前にモーダルを表示し、取得後に各欄を独立して埋める。
//! 欄の要素がページにない場合はその欄だけ飛ばす。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use photo_timeline_common::{EventDetail, MapTarget, MediaView, Narrative, PersonChip};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::api::client;
use crate::dom::{self, ids};

/// 取得失敗時のアラート
const DETAIL_UNAVAILABLE: &str = "Details not available.";

/// 地図モーダルのグローバル関数名（map_modal側で定義）
const MAP_MODAL_FN: &str = "openMapModal";

#[derive(Clone, Default)]
pub struct DetailModal {
    /// 場所ラベルのクリックリスナー（開くたびに差し替え）
    location_listener: Rc<RefCell<Option<EventListener>>>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// モーダルを開いて詳細を取得
    ///
    /// 連続で開いた場合は後から届いたレスポンスで上書きされる。
    pub fn open(&self, event_id: String) {
        let Some(modal) = dom::by_id(ids::DETAIL_MODAL) else {
            return;
        };
        dom::set_display(&modal, "flex");
        dom::lock_scroll();

        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match client::fetch_event_detail(&event_id).await {
                Ok(detail) => this.on_loaded(&detail),
                Err(e) => {
                    console::error!(format!("Failed to load details: {}", e));
                    gloo::dialogs::alert(DETAIL_UNAVAILABLE);
                    this.close();
                }
            }
        });
    }

    /// 取得完了時。待っている間に閉じられていたら何も描画しない
    fn on_loaded(&self, detail: &EventDetail) {
        match dom::by_id(ids::DETAIL_MODAL) {
            Some(modal) if !dom::is_hidden(&modal) => self.render(detail),
            _ => {}
        }
    }

    /// モーダルを閉じる（再生中の動画も止める）
    ///
    /// メディアは表示状態に関係なく必ず消す。
    pub fn close(&self) {
        if let Some(media) = dom::by_id(ids::MODAL_MEDIA) {
            media.set_inner_html("");
        }
        let Some(modal) = dom::by_id(ids::DETAIL_MODAL) else {
            return;
        };
        if dom::is_hidden(&modal) {
            return;
        }
        dom::hide(&modal);
        dom::restore_scroll();
    }

    fn render(&self, detail: &EventDetail) {
        dom::set_text_id(ids::DETAIL_DATE, detail.date.as_deref().unwrap_or(""));
        self.render_location(detail);
        render_weather(detail);
        render_media(detail.media());
        render_narrative(&detail.narrative());
        render_people(&detail.people_chips());
    }

    fn render_location(&self, detail: &EventDetail) {
        let Some(label) = dom::by_id(ids::DETAIL_LOCATION) else {
            return;
        };
        label.set_text_content(Some(detail.location_text()));

        // 前回の状態をリセット
        let _ = label.style().set_property("cursor", "default");
        let _ = label.remove_attribute("title");
        let _ = label.class_list().remove_1("has-coords");
        self.location_listener.borrow_mut().take();

        if let Some(target) = detail.map_target() {
            let _ = label.style().set_property("cursor", "pointer");
            label.set_title("Click to view on map");
            let _ = label.class_list().add_1("has-coords");

            let listener = EventListener::new(&label, "click", move |event| {
                event.stop_propagation();
                open_map_modal(target);
            });
            *self.location_listener.borrow_mut() = Some(listener);
        }
    }
}

/// グローバルの `openMapModal(lat, lng, id)` を呼ぶ（なければログのみ）
fn open_map_modal(target: MapTarget) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let function = js_sys::Reflect::get(&window, &JsValue::from_str(MAP_MODAL_FN))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    let Some(function) = function else {
        console::error!("Map Modal function not found");
        return;
    };

    let id = target.id.map(|id| JsValue::from_f64(id as f64)).unwrap_or(JsValue::NULL);
    if let Err(e) = function.call3(
        &JsValue::NULL,
        &JsValue::from_f64(target.lat),
        &JsValue::from_f64(target.lng),
        &id,
    ) {
        console::error!("openMapModal failed", e);
    }
}

fn render_weather(detail: &EventDetail) {
    let weather = detail.weather_text();
    dom::set_text_id(ids::DETAIL_WEATHER, weather.unwrap_or(""));

    match weather {
        Some(_) => dom::show_id(ids::DETAIL_WEATHER_WRAPPER, "block"),
        None => dom::hide_id(ids::DETAIL_WEATHER_WRAPPER),
    }
}

fn render_media(media: Option<MediaView>) {
    let Some(container) = dom::by_id(ids::MODAL_MEDIA) else {
        return;
    };
    container.set_inner_html("");

    let Some(document) = dom::document() else {
        return;
    };
    let element = match media {
        Some(MediaView::Video { src }) => document.create_element("video").and_then(|video| {
            video.set_attribute("src", &src)?;
            video.set_attribute("controls", "")?;
            video.set_attribute("autoplay", "")?;
            video.set_attribute("style", "width:100%; height:100%")?;
            Ok(video)
        }),
        Some(MediaView::Image { src, alt }) => document.create_element("img").and_then(|img| {
            img.set_attribute("src", &src)?;
            img.set_attribute("alt", &alt)?;
            Ok(img)
        }),
        None => return,
    };

    match element {
        Ok(element) => {
            let _ = container.append_child(&element);
        }
        Err(e) => console::error!("Failed to render media", e),
    }
}

fn render_narrative(narrative: &Narrative) {
    let Some(story) = dom::by_id(ids::DETAIL_STORY) else {
        return;
    };
    story.set_text_content(Some(narrative.story()));

    let author = dom::by_id(ids::DETAIL_AUTHOR);
    let summary = dom::by_id(ids::DETAIL_SUMMARY);

    match narrative.author_line() {
        Some(line) => {
            if let Some(author) = &author {
                author.set_text_content(Some(&line));
                dom::set_display(author, "block");
            }
            if let Some(summary) = &summary {
                match narrative.ai_excerpt() {
                    Some(excerpt) => {
                        summary.set_text_content(Some(excerpt));
                        dom::set_display(summary, "block");
                    }
                    None => dom::hide(summary),
                }
            }
        }
        // AIキャプションのみ
        None => {
            author.iter().for_each(dom::hide);
            summary.iter().for_each(dom::hide);
        }
    }
}

fn people_chip(document: &web_sys::Document, chip: &PersonChip) -> Result<HtmlElement, JsValue> {
    let span: HtmlElement = document.create_element("span")?.dyn_into()?;
    span.set_class_name("people-tag");
    span.append_child(&document.create_text_node(&chip.name))?;

    if let (Some(emotion), Some(emoji)) = (chip.emotion, chip.emoji()) {
        span.append_child(&document.create_text_node(" "))?;
        let badge = document.create_element("span")?;
        badge.set_attribute("title", emotion.as_str())?;
        badge.set_text_content(Some(emoji));
        span.append_child(&badge)?;
    }
    Ok(span)
}

fn render_people(chips: &[PersonChip]) {
    let Some(container) = dom::by_id(ids::DETAIL_PEOPLE) else {
        return;
    };
    container.set_inner_html("");

    if chips.is_empty() {
        dom::hide_id(ids::DETAIL_PEOPLE_WRAPPER);
        return;
    }
    dom::show_id(ids::DETAIL_PEOPLE_WRAPPER, "block");

    let Some(document) = dom::document() else {
        return;
    };
    for chip in chips {
        match people_chip(&document, chip) {
            Ok(span) => {
                let _ = container.append_child(&span);
            }
            Err(e) => console::error!("Failed to render person", e),
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MODAL_HTML: &str = r#"
        <div id="detailModal" style="display:none">
            <span id="detailDate"></span>
            <span id="detailLocation"></span>
            <div id="detailWeatherWrapper"><span id="detailWeather"></span></div>
            <div id="modalMedia"></div>
            <p id="detailStory"></p>
            <p id="detailAuthor"></p>
            <p id="detailSummary"></p>
            <div id="detailPeopleWrapper"><div id="detailPeople"></div></div>
        </div>
    "#;

    fn text(id: &str) -> String {
        dom::by_id(id).and_then(|el| el.text_content()).unwrap_or_default()
    }

    fn display(id: &str) -> String {
        dom::by_id(id)
            .and_then(|el| el.style().get_property_value("display").ok())
            .unwrap_or_default()
    }

    fn render_json(json: &str) {
        dom::body().expect("body").set_inner_html(MODAL_HTML);
        let detail = EventDetail::from_json(json).expect("parse");
        DetailModal::new().render(&detail);
    }

    #[wasm_bindgen_test]
    fn wasm_render_user_memory() {
        render_json(
            r#"{"date": "2024-01-05", "user_memory": "A day at the beach", "user_memory_author": "Mom", "summary": "line1\nline2"}"#,
        );

        assert_eq!(text("detailDate"), "2024-01-05");
        assert_eq!(text("detailStory"), "A day at the beach");
        assert_eq!(text("detailAuthor"), "- Mom -");
        assert_eq!(text("detailSummary"), "AI Analysis: line1");
        assert_eq!(display("detailSummary"), "block");
        assert_eq!(display("detailWeatherWrapper"), "none");
        assert_eq!(display("detailPeopleWrapper"), "none");
    }

    #[wasm_bindgen_test]
    fn wasm_render_caption_and_people() {
        render_json(
            r#"{"summary": "para one\n\npara two", "weather": "Rain", "people": ["Alice", {"name": "Bob", "emotion": "happy"}]}"#,
        );

        assert_eq!(text("detailStory"), "para two");
        assert_eq!(display("detailAuthor"), "none");
        assert_eq!(display("detailSummary"), "none");
        assert_eq!(text("detailWeather"), "Rain");
        assert_eq!(display("detailWeatherWrapper"), "block");
        assert_eq!(text("detailPeople"), "AliceBob 😄");
    }

    #[wasm_bindgen_test]
    fn wasm_render_video() {
        render_json(r#"{"image_url": "/v.mp4", "media_type": "video"}"#);
        let media = dom::by_id("modalMedia").expect("media");
        let video = media.first_element_child().expect("video");
        assert_eq!(video.tag_name().to_lowercase(), "video");
        assert!(video.has_attribute("controls"));
        assert!(video.has_attribute("autoplay"));
    }

    #[wasm_bindgen_test]
    fn wasm_close_clears_media() {
        render_json(r#"{"image_url": "/p.jpg"}"#);
        let modal = dom::by_id("detailModal").expect("modal");
        dom::set_display(&modal, "flex");

        DetailModal::new().close();

        assert_eq!(display("detailModal"), "none");
        assert_eq!(dom::by_id("modalMedia").expect("media").inner_html(), "");
    }

    #[wasm_bindgen_test]
    fn wasm_late_response_after_close_is_dropped() {
        dom::body().expect("body").set_inner_html(MODAL_HTML);
        let modal = DetailModal::new();
        let detail = EventDetail::from_json(r#"{"image_url": "/v.mp4", "media_type": "video"}"#)
            .expect("parse");

        // 閉じた後に届いたレスポンス
        modal.on_loaded(&detail);

        assert_eq!(dom::by_id("modalMedia").expect("media").inner_html(), "");
        assert_eq!(text("detailStory"), "");
    }

    #[wasm_bindgen_test]
    fn wasm_close_clears_media_even_when_hidden() {
        dom::body().expect("body").set_inner_html(MODAL_HTML);
        let media = dom::by_id("modalMedia").expect("media");
        media.set_inner_html(r#"<video src="/v.mp4" autoplay></video>"#);

        DetailModal::new().close();

        assert_eq!(media.inner_html(), "");
        assert_eq!(display("detailModal"), "none");
    }
}
