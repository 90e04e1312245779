//! 端末向けの表示整形

use photo_timeline_common::calendar::WEEKDAYS;
use photo_timeline_common::{
    render_month, CalendarCell, CalendarState, EventDateSet, EventDetail, MediaView, PageStep,
};

/// 月カレンダー（`*` = イベントあり、`[..]` = 選択日）
pub fn render_calendar(state: &CalendarState, dates: &EventDateSet) -> String {
    let mut out = format!(
        "{}  ({} days with photos)\n",
        state.cursor.label(),
        dates.count_in_month(state.cursor)
    );

    let mut line = String::new();
    for (i, cell) in render_month(state, dates).iter().enumerate() {
        let text = match cell {
            CalendarCell::Header(name) => format!(" {} ", &name[..2]),
            CalendarCell::Blank => "    ".to_string(),
            CalendarCell::Day(day) if day.selected => format!("[{:>2}]", day.day),
            CalendarCell::Day(day) if day.has_event => format!(" {:>2}*", day.day),
            CalendarCell::Day(day) => format!(" {:>2} ", day.day),
        };
        line.push_str(&text);

        if (i + 1) % WEEKDAYS.len() == 0 {
            out.push_str(line.trim_end());
            out.push('\n');
            line.clear();
        }
    }
    if !line.is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// HTML断片に含まれるアーカイブタイル数
pub fn count_tiles(html: &str) -> usize {
    html.matches("masonry-item").count()
}

pub fn archive_summary(html: &str, step: PageStep, next_skip: u32) -> String {
    let tiles = count_tiles(html);
    if step.finishes() {
        format!("{} items loaded (end of archive)", tiles)
    } else {
        format!("{} items loaded (next: --skip {})", tiles, next_skip)
    }
}

/// イベント詳細
pub fn render_detail(detail: &EventDetail) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Date:     {}", detail.date.as_deref().unwrap_or("")));

    let mut location = format!("Location: {}", detail.location_text());
    if let Some(target) = detail.map_target() {
        location.push_str(&format!("  (map: {}, {})", target.lat, target.lng));
    }
    lines.push(location);

    if let Some(weather) = detail.weather_text() {
        lines.push(format!("Weather:  {}", weather));
    }

    match detail.media() {
        Some(MediaView::Video { src }) => lines.push(format!("Video:    {}", src)),
        Some(MediaView::Image { src, .. }) => lines.push(format!("Image:    {}", src)),
        None => {}
    }

    let narrative = detail.narrative();
    lines.push(String::new());
    lines.push(narrative.story().to_string());
    if let Some(author) = narrative.author_line().filter(|a| !a.is_empty()) {
        lines.push(author);
    }
    if let Some(excerpt) = narrative.ai_excerpt() {
        lines.push(excerpt.to_string());
    }

    let chips = detail.people_chips();
    if !chips.is_empty() {
        lines.push(String::new());
        let labels: Vec<String> = chips.iter().map(|c| c.label()).collect();
        lines.push(format!("People:   {}", labels.join(", ")));
    }

    lines.join("\n")
}
