//! タイムライン内の移動
//!
//! 「この日の思い出」リンク（日付の項目へスクロールして強調）と
//! ページ内アンカーのスムーズスクロール。

use gloo::timers::callback::Timeout;
use photo_timeline_common::navigation::{
    timeline_fallback_url, timeline_item_selector, HIGHLIGHT_CLASS, HIGHLIGHT_MS,
};
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

#[derive(Clone, Copy, Default)]
pub struct TimelineNavigator;

fn smooth_scroll(el: &Element, block: Option<ScrollLogicalPosition>) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    if let Some(block) = block {
        options.set_block(block);
    }
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

impl TimelineNavigator {
    /// 指定日付の項目へスクロールし、一定時間強調表示する
    ///
    /// ページ内に項目がなければタイムラインページへ遷移。
    pub fn scroll_to_event(&self, date: &str) {
        let found = dom::document()
            .and_then(|d| d.query_selector(&timeline_item_selector(date)).ok().flatten());

        match found {
            Some(el) => {
                smooth_scroll(&el, Some(ScrollLogicalPosition::Center));
                let _ = el.class_list().add_1(HIGHLIGHT_CLASS);
                Timeout::new(HIGHLIGHT_MS, move || {
                    let _ = el.class_list().remove_1(HIGHLIGHT_CLASS);
                })
                .forget();
            }
            None => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&timeline_fallback_url(date));
                }
            }
        }
    }

    /// ページ内アンカーへスクロール（対象がなければ何もしない）
    pub fn scroll_to_anchor(&self, target_id: &str) {
        if let Some(el) = dom::document().and_then(|d| d.get_element_by_id(target_id)) {
            smooth_scroll(&el, None);
        }
    }
}
