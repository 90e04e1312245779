//! アーカイブのページネーション
//!
//! `/api/archive-items` から取得したHTML断片を追記していくためのカーソル。
//! skipは空でない断片を受け取るたびにlimitずつ進み、
//! `skip >= total` または空の断片で打ち切りとなる。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 1ページあたりの既定件数
pub const DEFAULT_LIMIT: u32 = 20;

/// アーカイブ項目APIのパス
pub const ARCHIVE_ITEMS_PATH: &str = "/api/archive-items";

/// ページ埋め込み設定（`#archive-config` のdata属性）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// 最初の追加読み込みで使うオフセット
    pub initial_skip: u32,
    pub limit: u32,
    pub total: u32,
    /// メディア種別フィルタ（photo / video）
    pub media_type: Option<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            initial_skip: DEFAULT_LIMIT,
            limit: DEFAULT_LIMIT,
            total: 0,
            media_type: None,
        }
    }
}

fn parse_count(name: &str, value: Option<&str>) -> Result<Option<u32>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::Config(format!("data-{} が数値ではありません: {}", name, v))),
        None => Ok(None),
    }
}

impl ArchiveConfig {
    /// data属性の値から設定を構築
    ///
    /// 不正な属性はその項目だけ既定値に戻し、エラーとして返す（他の属性は有効なまま）。
    /// `data-skip` がなければ、サーバーが初回描画した件数（= limit）から開始する。
    pub fn from_attrs(
        skip: Option<&str>,
        limit: Option<&str>,
        total: Option<&str>,
        media_type: Option<&str>,
    ) -> (Self, Vec<Error>) {
        let mut errors = Vec::new();
        let mut field = |name: &str, value: Option<&str>| {
            parse_count(name, value).unwrap_or_else(|e| {
                errors.push(e);
                None
            })
        };

        let mut limit_value = field("limit", limit);
        let skip_value = field("skip", skip);
        let total_value = field("total", total);

        if limit_value == Some(0) {
            errors.push(Error::Config("data-limit は1以上で指定してください".into()));
            limit_value = None;
        }
        let limit = limit_value.unwrap_or(DEFAULT_LIMIT);
        let media_type = media_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let config = Self {
            initial_skip: skip_value.unwrap_or(limit),
            limit,
            total: total_value.unwrap_or(0),
            media_type,
        };
        (config, errors)
    }
}

/// 取得結果に対する次の動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// 断片を追記し、読み込みボタンを再度有効化
    Append,
    /// 断片を追記し、読み込みボタンを恒久的に隠す
    AppendAndFinish,
    /// 追記なしで恒久的に隠す（空の断片）
    Finish,
    /// 失敗。状態は変えずボタンを再度有効化
    Retry,
}

impl PageStep {
    pub fn appends(&self) -> bool {
        matches!(self, PageStep::Append | PageStep::AppendAndFinish)
    }

    pub fn finishes(&self) -> bool {
        matches!(self, PageStep::AppendAndFinish | PageStep::Finish)
    }
}

/// ページネーションカーソル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    pub skip: u32,
    pub limit: u32,
    pub total: u32,
    pub media_type: Option<String>,
    exhausted: bool,
}

impl From<ArchiveConfig> for PaginationCursor {
    fn from(config: ArchiveConfig) -> Self {
        Self {
            skip: config.initial_skip,
            limit: config.limit,
            total: config.total,
            media_type: config.media_type,
            exhausted: false,
        }
    }
}

impl PaginationCursor {
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// 次ページのリクエストパス
    pub fn request_path(&self) -> String {
        let mut path = format!("{}?skip={}&limit={}", ARCHIVE_ITEMS_PATH, self.skip, self.limit);
        if let Some(media_type) = &self.media_type {
            path.push_str("&media_type=");
            path.push_str(media_type);
        }
        path
    }

    /// 取得したHTML断片を反映
    pub fn on_fragment(&mut self, html: &str) -> PageStep {
        if html.trim().is_empty() {
            self.exhausted = true;
            return PageStep::Finish;
        }

        self.skip = self.skip.saturating_add(self.limit);
        if self.skip >= self.total {
            self.exhausted = true;
            PageStep::AppendAndFinish
        } else {
            PageStep::Append
        }
    }

    /// 通信失敗・HTTPエラー
    pub fn on_failure(&self) -> PageStep {
        PageStep::Retry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(initial_skip: u32) -> PaginationCursor {
        ArchiveConfig {
            initial_skip,
            limit: 20,
            total: 25,
            media_type: None,
        }
        .into()
    }

    #[test]
    fn test_from_attrs_full() {
        let (config, errors) =
            ArchiveConfig::from_attrs(Some("5"), Some("20"), Some("25"), Some("video"));
        assert!(errors.is_empty());
        assert_eq!(config.initial_skip, 5);
        assert_eq!(config.limit, 20);
        assert_eq!(config.total, 25);
        assert_eq!(config.media_type.as_deref(), Some("video"));
    }

    #[test]
    fn test_from_attrs_skip_defaults_to_rendered_count() {
        let (config, _) = ArchiveConfig::from_attrs(None, Some("30"), Some("100"), None);
        assert_eq!(config.initial_skip, 30);
    }

    #[test]
    fn test_from_attrs_defaults() {
        let (config, errors) = ArchiveConfig::from_attrs(None, None, None, Some(""));
        assert!(errors.is_empty());
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.initial_skip, DEFAULT_LIMIT);
        assert_eq!(config.total, 0);
        assert_eq!(config.media_type, None);
    }

    #[test]
    fn test_from_attrs_invalid_limit_falls_back() {
        let (config, errors) = ArchiveConfig::from_attrs(None, Some("abc"), None, None);
        assert!(matches!(errors.as_slice(), [Error::Config(_)]));
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.initial_skip, DEFAULT_LIMIT);

        let (config, errors) = ArchiveConfig::from_attrs(None, Some("0"), None, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(config.limit, DEFAULT_LIMIT);
    }

    /// 1つの属性が不正でも、他の属性は生きたまま
    #[test]
    fn test_bad_total_keeps_other_attrs() {
        let (config, errors) = ArchiveConfig::from_attrs(None, Some("20"), Some("abc"), Some("video"));
        assert_eq!(errors.len(), 1);
        assert_eq!(config.limit, 20);
        assert_eq!(config.initial_skip, 20);
        assert_eq!(config.total, 0);
        assert_eq!(config.media_type.as_deref(), Some("video"));

        let c = PaginationCursor::from(config);
        assert_eq!(c.request_path(), "/api/archive-items?skip=20&limit=20&media_type=video");
    }

    #[test]
    fn test_bad_skip_defaults_to_limit() {
        let (config, errors) = ArchiveConfig::from_attrs(Some("-1"), Some("30"), Some("100"), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(config.initial_skip, 30);
        assert_eq!(config.total, 100);
    }

    #[test]
    fn test_default_skips_server_rendered_page() {
        let config = ArchiveConfig::default();
        assert_eq!(config.initial_skip, config.limit);
        assert_eq!(config, ArchiveConfig::from_attrs(None, None, None, None).0);
    }

    #[test]
    fn test_request_path() {
        let mut c = cursor(0);
        assert_eq!(c.request_path(), "/api/archive-items?skip=0&limit=20");

        c.media_type = Some("photo".into());
        assert_eq!(c.request_path(), "/api/archive-items?skip=0&limit=20&media_type=photo");
    }

    #[test]
    fn test_skip_advances_then_finishes() {
        let mut c = cursor(0);
        assert_eq!(c.skip, 0);

        assert_eq!(c.on_fragment("<div class=\"masonry-item\"></div>"), PageStep::Append);
        assert_eq!(c.skip, 20);
        assert!(!c.is_exhausted());

        assert_eq!(c.on_fragment("<div class=\"masonry-item\"></div>"), PageStep::AppendAndFinish);
        assert_eq!(c.skip, 40);
        assert!(c.is_exhausted());
    }

    #[test]
    fn test_configured_initial_skip() {
        let mut c = cursor(20);
        assert_eq!(c.request_path(), "/api/archive-items?skip=20&limit=20");

        let step = c.on_fragment("<div></div>");
        assert!(step.appends());
        assert!(step.finishes());
        assert_eq!(c.skip, 40);
    }

    #[test]
    fn test_empty_fragment_finishes_without_advancing() {
        let mut c = cursor(0);
        assert_eq!(c.on_fragment("  \n "), PageStep::Finish);
        assert_eq!(c.skip, 0);
        assert!(c.is_exhausted());
        assert!(!PageStep::Finish.appends());
    }

    #[test]
    fn test_failure_keeps_state() {
        let c = cursor(0);
        let before = c.clone();
        assert_eq!(c.on_failure(), PageStep::Retry);
        assert_eq!(c, before);
        assert!(!PageStep::Retry.finishes());
    }
}
