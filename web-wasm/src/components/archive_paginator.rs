//! アーカイブの「さらに読み込む」

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use photo_timeline_common::{ArchiveConfig, PageStep, PaginationCursor, Result};
use web_sys::HtmlElement;

use crate::api::client;
use crate::dom::{self, ids};

pub struct ArchivePaginator {
    cursor: RefCell<PaginationCursor>,
    button: HtmlElement,
}

impl ArchivePaginator {
    /// 読み込みボタンがあればクリックを登録
    pub fn mount(config: ArchiveConfig) {
        let Some(button) = dom::by_id(ids::LOAD_MORE_BUTTON) else {
            return;
        };
        let paginator = Rc::new(Self {
            cursor: RefCell::new(PaginationCursor::from(config)),
            button: button.clone(),
        });

        EventListener::new(&button, "click", move |_| {
            let paginator = Rc::clone(&paginator);
            wasm_bindgen_futures::spawn_local(async move { paginator.load_more().await });
        })
        .forget();
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            dom::hide(&self.button);
            let _ = self.button.set_attribute("disabled", "");
            dom::show_id(ids::LOADING_TEXT, "inline-block");
        } else {
            dom::set_display(&self.button, "inline-block");
            let _ = self.button.remove_attribute("disabled");
            dom::hide_id(ids::LOADING_TEXT);
        }
    }

    async fn load_more(&self) {
        if self.cursor.borrow().is_exhausted() {
            return;
        }
        self.set_busy(true);

        let snapshot = self.cursor.borrow().clone();
        let result = client::fetch_archive_page(&snapshot).await;
        self.finish_load(result);
    }

    /// 取得結果をグリッドとボタンに反映
    fn finish_load(&self, result: Result<String>) -> PageStep {
        let step = match result {
            Ok(html) => {
                let step = self.cursor.borrow_mut().on_fragment(&html);
                if step.appends() {
                    if let Some(grid) = dom::by_id(ids::GALLERY_GRID) {
                        let _ = grid.insert_adjacent_html("beforeend", &html);
                    }
                }
                step
            }
            Err(e) => {
                console::error!(format!("Error loading more items: {}", e));
                self.cursor.borrow().on_failure()
            }
        };

        match step {
            PageStep::Append | PageStep::Retry => self.set_busy(false),
            PageStep::AppendAndFinish | PageStep::Finish => dom::hide_id(ids::LOAD_MORE_CONTAINER),
        }
        step
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use photo_timeline_common::Error;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TILE: &str = r#"<div class="masonry-item" data-date="2024-01-05"></div>"#;

    fn setup() -> ArchivePaginator {
        dom::body().expect("body").set_inner_html(
            r#"
            <div id="galleryGrid"></div>
            <div id="loadMoreContainer">
                <button id="loadMoreArchiveBtn">Load more</button>
                <span id="loadingArchiveText" style="display:none">Loading...</span>
            </div>
            "#,
        );
        let config = ArchiveConfig { initial_skip: 0, limit: 20, total: 25, media_type: None };
        ArchivePaginator {
            cursor: RefCell::new(PaginationCursor::from(config)),
            button: dom::by_id(ids::LOAD_MORE_BUTTON).expect("button"),
        }
    }

    fn display(id: &str) -> String {
        dom::by_id(id)
            .and_then(|el| el.style().get_property_value("display").ok())
            .unwrap_or_default()
    }

    fn tile_count() -> u32 {
        dom::query_all(".masonry-item").len() as u32
    }

    #[wasm_bindgen_test]
    fn wasm_busy_state_toggles_button() {
        let paginator = setup();

        paginator.set_busy(true);
        assert_eq!(display("loadMoreArchiveBtn"), "none");
        assert!(paginator.button.has_attribute("disabled"));
        assert_eq!(display("loadingArchiveText"), "inline-block");

        paginator.set_busy(false);
        assert_eq!(display("loadMoreArchiveBtn"), "inline-block");
        assert!(!paginator.button.has_attribute("disabled"));
        assert_eq!(display("loadingArchiveText"), "none");
    }

    #[wasm_bindgen_test]
    fn wasm_append_then_finish_at_total() {
        let paginator = setup();

        paginator.set_busy(true);
        assert_eq!(paginator.finish_load(Ok(TILE.to_string())), PageStep::Append);
        assert_eq!(tile_count(), 1);
        assert_eq!(display("loadMoreArchiveBtn"), "inline-block");
        assert_ne!(display("loadMoreContainer"), "none");

        paginator.set_busy(true);
        assert_eq!(paginator.finish_load(Ok(TILE.to_string())), PageStep::AppendAndFinish);
        assert_eq!(tile_count(), 2);
        assert_eq!(display("loadMoreContainer"), "none");
        assert!(paginator.cursor.borrow().is_exhausted());
    }

    #[wasm_bindgen_test]
    fn wasm_failure_reenables_without_advancing() {
        let paginator = setup();

        paginator.set_busy(true);
        assert_eq!(paginator.finish_load(Err(Error::Status(500))), PageStep::Retry);
        assert_eq!(paginator.cursor.borrow().skip, 0);
        assert_eq!(tile_count(), 0);
        assert_eq!(display("loadMoreArchiveBtn"), "inline-block");
        assert!(!paginator.button.has_attribute("disabled"));
    }

    #[wasm_bindgen_test]
    fn wasm_empty_fragment_hides_container() {
        let paginator = setup();

        assert_eq!(paginator.finish_load(Ok("  \n ".to_string())), PageStep::Finish);
        assert_eq!(tile_count(), 0);
        assert_eq!(display("loadMoreContainer"), "none");
        assert_eq!(paginator.cursor.borrow().skip, 0);
    }
}
