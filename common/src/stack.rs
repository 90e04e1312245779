//! スタック（関連写真グループ）表示用の定数

/// 読み込み中の表示
pub const STACK_LOADING_HTML: &str = r#"<div class="spinner"></div> Loading stack..."#;

/// HTTPエラー時の表示
pub const STACK_FAILED_HTML: &str = r#"<p class="text-center text-red-500">Failed to load stack.</p>"#;

/// 通信エラー時の表示
pub const STACK_ERROR_HTML: &str = r#"<p class="text-center text-red-500">Error loading stack.</p>"#;

/// スタックAPIのパス
pub fn stack_path(stack_id: &str) -> String {
    format!("/api/events/stack/{}", stack_id)
}
