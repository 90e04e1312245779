use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("サーバーに接続できません: {0}")]
    Http(#[from] reqwest::Error),

    #[error("サーバーがエラーを返しました: HTTP {0}")]
    Status(u16),

    #[error("引数が不正です: {0}")]
    InvalidArgument(String),

    #[error("レスポンスの解析に失敗: {0}")]
    Response(#[from] photo_timeline_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
