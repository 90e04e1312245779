//! スタック（関連写真グループ）モーダル

use gloo::console;
use photo_timeline_common::stack::{STACK_ERROR_HTML, STACK_FAILED_HTML, STACK_LOADING_HTML};
use photo_timeline_common::Error;
use web_sys::Event;

use crate::api::client;
use crate::dom::{self, ids};

#[derive(Clone, Copy, Default)]
pub struct StackModal;

impl StackModal {
    /// モーダルを開いてスタックのHTML断片を取得
    ///
    /// 親要素のクリック処理（詳細モーダル等）を起動しないよう、
    /// トリガーイベントの既定動作と伝播を止める。
    pub fn open(&self, stack_id: String, trigger: Option<&Event>) {
        if let Some(event) = trigger {
            event.stop_propagation();
            event.prevent_default();
        }

        let (Some(modal), Some(container)) =
            (dom::by_id(ids::STACK_MODAL), dom::by_id(ids::STACK_GRID_CONTAINER))
        else {
            return;
        };

        dom::set_display(&modal, "flex");
        dom::lock_scroll();
        container.set_inner_html(STACK_LOADING_HTML);

        wasm_bindgen_futures::spawn_local(async move {
            // 失敗時もモーダルは閉じずにエラー表示
            match client::fetch_stack(&stack_id).await {
                Ok(html) => container.set_inner_html(&html),
                Err(Error::Status(status)) => {
                    console::warn!(format!("Stack load failed: HTTP {}", status));
                    container.set_inner_html(STACK_FAILED_HTML);
                }
                Err(e) => {
                    console::error!(format!("Stack load error: {}", e));
                    container.set_inner_html(STACK_ERROR_HTML);
                }
            }
        });
    }

    pub fn close(&self) {
        let Some(modal) = dom::by_id(ids::STACK_MODAL) else {
            return;
        };
        if dom::is_hidden(&modal) {
            return;
        }
        dom::hide(&modal);
        dom::restore_scroll();
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_open_shows_loading_placeholder() {
        dom::body().expect("body").set_inner_html(
            r#"<div id="stackModal" style="display:none"><div id="stackGridContainer"></div></div>"#,
        );

        StackModal.open("missing".to_string(), None);

        let modal = dom::by_id("stackModal").expect("modal");
        assert_eq!(modal.style().get_property_value("display").unwrap(), "flex");
        let container = dom::by_id("stackGridContainer").expect("container");
        assert!(container.inner_html().contains("Loading stack..."));

        StackModal.close();
        assert!(dom::is_hidden(&modal));
    }
}
