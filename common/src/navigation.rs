//! タイムライン内の移動（「この日の思い出」リンク）

/// 強調表示のクラス
pub const HIGHLIGHT_CLASS: &str = "highlight-glow";

/// 強調表示を外すまでの時間（ミリ秒）
pub const HIGHLIGHT_MS: u32 = 2000;

/// 指定日付のタイムライン項目を探すセレクタ
pub fn timeline_item_selector(date: &str) -> String {
    let escaped = date.replace('\\', "\\\\").replace('"', "\\\"");
    format!(".timeline-item[data-date=\"{}\"]", escaped)
}

/// ページ内に項目がない場合の遷移先
pub fn timeline_fallback_url(date: &str) -> String {
    format!("/?date={}#timeline", date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_item_selector() {
        assert_eq!(
            timeline_item_selector("2023-05-01"),
            ".timeline-item[data-date=\"2023-05-01\"]"
        );
        assert_eq!(
            timeline_item_selector("x\"]"),
            ".timeline-item[data-date=\"x\\\"]\"]"
        );
    }

    #[test]
    fn test_timeline_fallback_url() {
        assert_eq!(timeline_fallback_url("2023-05-01"), "/?date=2023-05-01#timeline");
    }
}
