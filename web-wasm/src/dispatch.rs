//! ドキュメント全体のクリック・キー入力の振り分け
//!
//! クリック位置の要素列を `resolve_click` に渡し、返ってきた動作を
//! 各コンポーネントのメソッドへ明示的に配線する。

use gloo::events::EventListener;
use photo_timeline_common::role::is_dismiss_key;
use photo_timeline_common::{resolve_click, ClickAction};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::components::{
    detail_modal::DetailModal, lightbox::Lightbox, navigator::TimelineNavigator,
    stack_modal::StackModal,
};
use crate::dom;

/// ページ上のコンポーネント
#[derive(Clone)]
pub struct Page {
    pub lightbox: Option<Lightbox>,
    pub detail: DetailModal,
    pub stack: StackModal,
    pub navigator: TimelineNavigator,
}

impl Page {
    pub fn dispatch(&self, action: ClickAction, event: &Event) {
        match action {
            ClickAction::OpenLightbox { src } => {
                if let Some(lightbox) = &self.lightbox {
                    lightbox.open(src);
                }
            }
            ClickAction::CloseLightbox => self.close_lightbox(),
            ClickAction::OpenDetail { event_id } => self.detail.open(event_id),
            ClickAction::CloseDetail => self.detail.close(),
            ClickAction::OpenStack { stack_id } => self.stack.open(stack_id, Some(event)),
            ClickAction::CloseStack => self.stack.close(),
            ClickAction::ScrollToEvent { date } => {
                event.prevent_default();
                self.navigator.scroll_to_event(&date);
            }
            ClickAction::ScrollToAnchor { target_id } => {
                event.prevent_default();
                self.navigator.scroll_to_anchor(&target_id);
            }
            ClickAction::Ignore => {}
        }
    }

    fn close_lightbox(&self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.close();
        }
    }

    /// Escapeキー: 開いているものをすべて閉じる
    pub fn dismiss_all(&self) {
        self.close_lightbox();
        self.detail.close();
        self.stack.close();
    }
}

/// ドキュメントにクリック・キーダウンのリスナーを1つずつ登録
pub fn install(page: Page) {
    let Some(document) = dom::document() else {
        return;
    };

    let click_page = page.clone();
    EventListener::new(&document, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let action = resolve_click(&dom::element_path(&target));
        click_page.dispatch(action, event);
    })
    .forget();

    EventListener::new(&document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if is_dismiss_key(&key_event.key()) {
            page.dismiss_all();
        }
    })
    .forget();
}
