//! Photo Timeline Common Library
//!
//! CLIとWeb(WASM)で共有される状態と描画ロジック（DOM非依存）

pub mod calendar;
pub mod detail;
pub mod error;
pub mod gallery;
pub mod navigation;
pub mod pagination;
pub mod role;
pub mod stack;

/// イベント日付一覧APIのパス
pub const ARCHIVE_DATES_PATH: &str = "/api/archive-dates";

pub use calendar::{render_month, CalendarCell, CalendarState, DayCell, EventDateSet, YearMonth};
pub use detail::{event_path, Emotion, EventDetail, MapTarget, MediaView, Narrative, Person, PersonChip};
pub use error::{Error, Result};
pub use gallery::{filter_items, FilterOutcome};
pub use pagination::{ArchiveConfig, PageStep, PaginationCursor};
pub use role::{resolve_click, ClickAction, ElementInfo, ElementRole};
pub use stack::stack_path;
