//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// フロントエンド（WASM / CLI）で発生する失敗の分類:
/// 通信失敗・HTTPステータス異常・レスポンス不正・設定不正
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 通信レベルの失敗か（リトライで回復し得るもの）
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
