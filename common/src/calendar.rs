//! カレンダー（月グリッド）の状態と描画ロジック
//!
//! DOMに依存しない純粋関数として実装し、WASM側とCLI側で共有する:
//! - YearMonth: 表示中の月カーソル
//! - EventDateSet: サーバーから取得したイベント日付（YYYY-MM-DD文字列）の集合
//! - CalendarState: 月カーソル + 選択日
//! - render_month: 状態から描画セル列を生成

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 曜日ヘッダー（日曜始まり）
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// 日付キーを生成（ゼロ埋め YYYY-MM-DD）
///
/// Date型の比較ではなく文字列比較でイベント判定するためのキー。
/// タイムゾーンによる日付ずれを避ける。
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// 年月カーソル（monthは1〜12）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// 年月を生成（monthが範囲外ならNone）
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 前月（1月なら前年12月）
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// 翌月（12月なら翌年1月）
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 1日の曜日インデックス（日曜=0）
    ///
    /// 先頭の空白セル数に等しい。
    pub fn first_weekday(&self) -> u32 {
        self.first_day()
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// 月の日数（翌月0日目の日付）
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(28)
    }

    /// 月ラベル（例: "2024.01"）
    pub fn label(&self) -> String {
        format!("{}.{:02}", self.year, self.month)
    }

    /// この月の指定日の日付キー
    pub fn date_key(&self, day: u32) -> String {
        date_key(self.year, self.month, day)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// "YYYY-MM" 形式をパース
    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::Config(format!("年月の形式が不正です (YYYY-MM): {}", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::Config(format!("年が不正です: {}", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::Config(format!("月が不正です: {}", s)))?;
        YearMonth::new(year, month)
            .ok_or_else(|| Error::Config(format!("月は1〜12で指定してください: {}", s)))
    }
}

/// イベントが存在する日付の集合
///
/// 初期化時に一度だけ取得し、以後は不変。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventDateSet(BTreeSet<String>);

impl EventDateSet {
    /// `/api/archive-dates` のレスポンス（JSON文字列配列）をパース
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn contains(&self, date: &str) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 指定月に含まれる日付数
    pub fn count_in_month(&self, month: YearMonth) -> usize {
        let prefix = format!("{}-", month);
        self.0.iter().filter(|d| d.starts_with(&prefix)).count()
    }
}

impl<S: Into<String>> FromIterator<S> for EventDateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// カレンダーの状態
///
/// 選択状態は「未選択」か「選択日1つ」のどちらか。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub cursor: YearMonth,
    selected: Option<String>,
}

impl CalendarState {
    pub fn new(cursor: YearMonth) -> Self {
        Self { cursor, selected: None }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, date: &str) -> bool {
        self.selected.as_deref() == Some(date)
    }

    /// 日付を選択
    pub fn select(&mut self, date: impl Into<String>) {
        self.selected = Some(date.into());
    }

    /// 選択を解除
    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }
}

/// 日セル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: String,
    pub has_event: bool,
    pub selected: bool,
}

/// カレンダーの描画セル
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// 曜日ヘッダー
    Header(&'static str),
    /// 1日より前の空白
    Blank,
    Day(DayCell),
}

impl CalendarCell {
    /// DOM要素のclass属性値
    pub fn class_name(&self) -> String {
        match self {
            CalendarCell::Header(_) => "calendar-day header".to_string(),
            CalendarCell::Blank => "calendar-day empty".to_string(),
            CalendarCell::Day(cell) => {
                let mut classes = vec!["calendar-day"];
                if cell.has_event {
                    classes.push("has-event");
                }
                if cell.selected {
                    classes.push("selected");
                }
                classes.join(" ")
            }
        }
    }

    /// セルの表示テキスト
    pub fn text(&self) -> String {
        match self {
            CalendarCell::Header(name) => name.to_string(),
            CalendarCell::Blank => String::new(),
            CalendarCell::Day(cell) => cell.day.to_string(),
        }
    }

    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::Day(cell) => Some(cell),
            _ => None,
        }
    }
}

/// 月グリッドを生成
///
/// 構成: 曜日ヘッダー7個 → 空白（1日の曜日インデックス分）→ 1〜末日の日セル
pub fn render_month(state: &CalendarState, dates: &EventDateSet) -> Vec<CalendarCell> {
    let month = state.cursor;
    let blanks = month.first_weekday() as usize;
    let last_day = month.days_in_month();

    let mut cells = Vec::with_capacity(WEEKDAYS.len() + blanks + last_day as usize);
    cells.extend(WEEKDAYS.into_iter().map(CalendarCell::Header));
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(blanks));

    for day in 1..=last_day {
        let date = month.date_key(day);
        cells.push(CalendarCell::Day(DayCell {
            day,
            has_event: dates.contains(&date),
            selected: state.is_selected(&date),
            date,
        }));
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_2024() -> YearMonth {
        YearMonth::new(2024, 1).unwrap()
    }

    #[test]
    fn test_date_key_zero_padded() {
        assert_eq!(date_key(2024, 1, 5), "2024-01-05");
        assert_eq!(date_key(2023, 12, 31), "2023-12-31");
    }

    #[test]
    fn test_year_month_rollover() {
        let jan = jan_2024();
        assert_eq!(jan.prev(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);
        assert_eq!(YearMonth::new(2024, 12).unwrap().next(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_year_month_rejects_invalid_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_first_weekday() {
        // 2024-01-01 は月曜日
        assert_eq!(jan_2024().first_weekday(), 1);
        // 2023-10-01 は日曜日
        assert_eq!(YearMonth::new(2023, 10).unwrap().first_weekday(), 0);
        // 2024-06-01 は土曜日
        assert_eq!(YearMonth::new(2024, 6).unwrap().first_weekday(), 6);
    }

    #[test]
    fn test_label() {
        assert_eq!(jan_2024().label(), "2024.01");
        assert_eq!(YearMonth::new(2024, 11).unwrap().label(), "2024.11");
    }

    #[test]
    fn test_year_month_from_str() {
        let ym: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(ym, YearMonth::new(2024, 3).unwrap());
        assert_eq!(ym.to_string(), "2024-03");
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_event_date_set_from_json() {
        let dates = EventDateSet::from_json(r#"["2024-01-05", "2024-02-10", "2024-01-05"]"#).unwrap();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains("2024-01-05"));
        assert!(!dates.contains("2024-1-5"));
        assert_eq!(dates.count_in_month(jan_2024()), 1);
    }

    #[test]
    fn test_event_date_set_from_json_invalid() {
        assert!(EventDateSet::from_json(r#"{"dates": []}"#).is_err());
    }

    #[test]
    fn test_cell_count_matches_blanks_plus_days_for_all_months() {
        let dates = EventDateSet::default();
        for year in 1990..=2030 {
            for month in 1..=12 {
                let ym = YearMonth::new(year, month).unwrap();
                let cells = render_month(&CalendarState::new(ym), &dates);

                let headers = cells.iter().filter(|c| matches!(c, CalendarCell::Header(_))).count();
                let blanks = cells.iter().filter(|c| matches!(c, CalendarCell::Blank)).count();
                let days = cells.iter().filter(|c| c.as_day().is_some()).count();

                assert_eq!(headers, 7);
                assert_eq!(blanks as u32, ym.first_weekday(), "{}", ym);
                assert_eq!(days as u32, ym.days_in_month(), "{}", ym);
                assert_eq!(cells.len() - headers, blanks + days);
            }
        }
    }

    #[test]
    fn test_only_event_day_is_marked() {
        let dates: EventDateSet = ["2024-01-05"].into_iter().collect();
        let cells = render_month(&CalendarState::new(jan_2024()), &dates);

        let marked: Vec<u32> = cells
            .iter()
            .filter_map(|c| c.as_day())
            .filter(|d| d.has_event)
            .map(|d| d.day)
            .collect();
        assert_eq!(marked, vec![5]);
    }

    #[test]
    fn test_event_in_other_month_not_marked() {
        let dates: EventDateSet = ["2024-02-05"].into_iter().collect();
        let cells = render_month(&CalendarState::new(jan_2024()), &dates);
        assert!(cells.iter().filter_map(|c| c.as_day()).all(|d| !d.has_event));
    }

    #[test]
    fn test_selected_day_class() {
        let dates: EventDateSet = ["2024-01-05"].into_iter().collect();
        let mut state = CalendarState::new(jan_2024());
        state.select("2024-01-05");

        let cells = render_month(&state, &dates);
        let selected: Vec<&CalendarCell> = cells
            .iter()
            .filter(|c| c.as_day().map(|d| d.selected).unwrap_or(false))
            .collect();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].class_name(), "calendar-day has-event selected");
        assert_eq!(selected[0].text(), "5");
    }

    #[test]
    fn test_header_and_blank_classes() {
        let cells = render_month(&CalendarState::new(jan_2024()), &EventDateSet::default());
        assert_eq!(cells[0].class_name(), "calendar-day header");
        assert_eq!(cells[0].text(), "Sun");
        assert_eq!(cells[7].class_name(), "calendar-day empty");
        assert_eq!(cells[8].class_name(), "calendar-day");
        assert_eq!(cells[8].text(), "1");
    }

    #[test]
    fn test_select_and_reset() {
        let mut state = CalendarState::new(jan_2024());
        assert_eq!(state.selected(), None);

        state.select("2024-01-10");
        assert!(state.is_selected("2024-01-10"));

        state.select("2024-01-11");
        assert!(!state.is_selected("2024-01-10"));
        assert_eq!(state.selected(), Some("2024-01-11"));

        state.reset();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut state = CalendarState::new(jan_2024());
        state.select("2024-01-10");
        state.next_month();
        assert_eq!(state.cursor, YearMonth::new(2024, 2).unwrap());
        assert!(render_month(&state, &EventDateSet::default())
            .iter()
            .filter_map(|c| c.as_day())
            .all(|d| !d.selected));

        state.prev_month();
        state.prev_month();
        assert_eq!(state.cursor, YearMonth::new(2023, 12).unwrap());
        assert_eq!(state.selected(), Some("2024-01-10"));
    }
}
