use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use photo_timeline_common::{CalendarState, YearMonth};

use crate::error::{Result, TimelineError};

#[derive(Parser)]
#[command(name = "photo-timeline")]
#[command(about = "写真タイムライン閲覧クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 月カレンダーを表示（イベントのある日に印）
    Calendar {
        /// 表示する月（YYYY-MM、デフォルト: 今月）
        #[arg(short, long)]
        month: Option<String>,

        /// 選択する日付（YYYY-MM-DD）
        #[arg(short, long)]
        select: Option<String>,
    },

    /// アーカイブの1ページを取得
    Archive {
        /// 開始位置
        #[arg(long, default_value = "0")]
        skip: u32,

        /// 取得件数（デフォルト: 設定ファイルの default_limit）
        #[arg(short, long)]
        limit: Option<u32>,

        /// メディア種別 (photo/video)
        #[arg(short = 't', long)]
        media_type: Option<String>,

        /// HTML断片をそのまま出力
        #[arg(long)]
        raw: bool,
    },

    /// イベント詳細を表示
    Event {
        /// イベントID
        id: String,
    },

    /// スタック（関連写真グループ）を表示
    Stack {
        /// スタックID
        id: String,
    },

    /// 設定を管理
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `calendar` の引数から表示状態を作る
///
/// 月指定がなければ選択日の月、それもなければ `today` の月。
pub fn calendar_state(
    month: Option<&str>,
    select: Option<&str>,
    today: NaiveDate,
) -> Result<CalendarState> {
    let selected = select
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                TimelineError::InvalidArgument(format!("日付の形式が不正です (YYYY-MM-DD): {}", s))
            })
        })
        .transpose()?;

    let cursor = match (month, selected) {
        (Some(m), _) => m.parse::<YearMonth>()?,
        (None, Some(date)) => YearMonth::new(date.year(), date.month())
            .ok_or_else(|| TimelineError::InvalidArgument(date.to_string()))?,
        (None, None) => YearMonth::new(today.year(), today.month())
            .ok_or_else(|| TimelineError::InvalidArgument(today.to_string()))?,
    };

    let mut state = CalendarState::new(cursor);
    if let Some(date) = selected {
        state.select(date.format("%Y-%m-%d").to_string());
    }
    Ok(state)
}
