//! ページ起動処理
//!
//! サーバー描画済みのページに各コンポーネントを取り付ける。
//! コンポーネント同士は状態を共有せず、DOMだけを共有する。

use gloo::console;
use gloo::events::EventListener;

use crate::components::{
    archive_paginator::ArchivePaginator, calendar::CalendarWidget, detail_modal::DetailModal,
    lightbox::Lightbox, navigator::TimelineNavigator, stack_modal::StackModal,
};
use crate::{config, dispatch, dom};

fn boot() {
    let archive_config = config::read_archive_config();

    if CalendarWidget::mount().is_none() {
        console::debug!("No calendar on this page");
    }
    ArchivePaginator::mount(archive_config);

    dispatch::install(dispatch::Page {
        lightbox: Lightbox::mount(),
        detail: DetailModal::new(),
        stack: StackModal,
        navigator: TimelineNavigator,
    });
}

/// DOM構築完了後に起動
pub fn start() {
    let Some(document) = dom::document() else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}
