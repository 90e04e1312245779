//! ギャラリーの日付フィルタ
//!
//! ページネーションで項目が追加されるため、フィルタ時は毎回すべての項目を
//! 走査し直す。ここでは項目の `data-date` 列だけを受け取る。

/// フィルタ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 入力順の表示/非表示
    pub visibility: Vec<bool>,
    pub visible_count: usize,
}

impl FilterOutcome {
    /// 「該当写真なし」メッセージを出すか
    pub fn show_no_results(&self) -> bool {
        self.visible_count == 0
    }

    pub fn hidden_count(&self) -> usize {
        self.visibility.len() - self.visible_count
    }
}

/// 指定日付に一致する項目だけを表示する
///
/// `data-date` 属性のない項目は常に非表示。
pub fn filter_items<'a, I>(item_dates: I, target: &str) -> FilterOutcome
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let visibility: Vec<bool> = item_dates
        .into_iter()
        .map(|date| date == Some(target))
        .collect();
    let visible_count = visibility.iter().filter(|v| **v).count();

    FilterOutcome { visibility, visible_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_shows_matching_hides_rest() {
        let dates = vec![
            Some("2024-01-05"),
            Some("2024-01-06"),
            Some("2024-01-05"),
            None,
            Some("2024-02-05"),
        ];
        let outcome = filter_items(dates, "2024-01-05");

        assert_eq!(outcome.visibility, vec![true, false, true, false, false]);
        assert_eq!(outcome.visible_count, 2);
        assert_eq!(outcome.hidden_count(), 3);
        assert!(!outcome.show_no_results());
    }

    #[test]
    fn test_filter_no_match_shows_message() {
        let outcome = filter_items(vec![Some("2024-01-06"), Some("2024-01-07")], "2024-01-05");
        assert_eq!(outcome.visible_count, 0);
        assert_eq!(outcome.hidden_count(), 2);
        assert!(outcome.show_no_results());
    }

    #[test]
    fn test_filter_empty_gallery() {
        let outcome = filter_items(Vec::<Option<&str>>::new(), "2024-01-05");
        assert!(outcome.visibility.is_empty());
        assert!(outcome.show_no_results());
    }

    #[test]
    fn test_filter_is_exact_string_match() {
        let outcome = filter_items(vec![Some("2024-1-5"), Some("2024-01-05 ")], "2024-01-05");
        assert_eq!(outcome.visible_count, 0);
    }
}
