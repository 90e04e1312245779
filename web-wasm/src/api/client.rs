//! タイムラインAPIクライアント（fetch）
//!
//! - GET /api/archive-dates      → イベント日付一覧（JSON）
//! - GET /api/archive-items      → アーカイブ項目（HTML断片）
//! - GET /api/events/{id}        → イベント詳細（JSON）
//! - GET /api/events/stack/{id}  → スタック（HTML断片）
//!
//! 通信失敗は `Error::Transport`、HTTPエラーは `Error::Status` として返す。

use photo_timeline_common::{
    event_path, stack_path, Error, EventDateSet, EventDetail, PaginationCursor, Result,
    ARCHIVE_DATES_PATH,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_error(value: JsValue) -> Error {
    Error::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// GETリクエスト（共通処理）
async fn get(path: &str, accept: &str) -> Result<Response> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts).map_err(js_error)?;
    request.headers().set("Accept", accept).map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Transport("window がありません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(Error::Status(resp.status()));
    }
    Ok(resp)
}

/// レスポンス本文をテキストとして取得
async fn get_text(path: &str, accept: &str) -> Result<String> {
    let resp = get(path, accept).await?;
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| Error::Transport("レスポンスが文字列ではありません".into()))
}

/// イベント日付一覧
pub async fn fetch_archive_dates() -> Result<EventDateSet> {
    let body = get_text(ARCHIVE_DATES_PATH, "application/json").await?;
    EventDateSet::from_json(&body)
}

/// アーカイブ次ページのHTML断片
pub async fn fetch_archive_page(cursor: &PaginationCursor) -> Result<String> {
    get_text(&cursor.request_path(), "text/html").await
}

/// イベント詳細
pub async fn fetch_event_detail(event_id: &str) -> Result<EventDetail> {
    let body = get_text(&event_path(event_id), "application/json").await?;
    EventDetail::from_json(&body)
}

/// スタックのHTML断片
pub async fn fetch_stack(stack_id: &str) -> Result<String> {
    get_text(&stack_path(stack_id), "text/html").await
}
