//! イベント詳細（`/api/events/{id}`）の型と表示ロジック
//!
//! 各フィールドは独立して表示されるため、型が合わないフィールドは
//! 全体を失敗させずに None として扱う。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// ナラティブが何もない場合の表示
pub const NO_DETAILS: &str = "No details.";

/// AI要約抜粋の接頭辞
pub const AI_ANALYSIS_PREFIX: &str = "AI Analysis: ";

/// イベント詳細APIのパス
pub fn event_path(event_id: &str) -> String {
    format!("/api/events/{}", event_id)
}

/// 型が合わなければNoneにする
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// 配列の要素ごとに型チェックし、不正な要素だけを捨てる
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// 空文字列をNone扱いにする
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// イベント詳細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,

    /// "video" 以外は画像として扱う
    #[serde(default, deserialize_with = "lenient")]
    pub media_type: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// AIキャプション
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    /// ユーザーが書いた思い出
    #[serde(default, deserialize_with = "lenient")]
    pub user_memory: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub user_memory_author: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub user_memory_question: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub people: Option<Vec<Person>>,

    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    pub lng: Option<f64>,
}

impl EventDetail {
    /// JSONオブジェクト以外（配列など）はエラー
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::Config("event detail is not an object".into()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// 天気（空ならセクションごと非表示）
    pub fn weather_text(&self) -> Option<&str> {
        non_empty(&self.weather)
    }

    /// 緯度・経度が両方ある場合のみ地図を開ける
    pub fn map_target(&self) -> Option<MapTarget> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(MapTarget { lat, lng, id: self.id }),
            _ => None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_type.as_deref() == Some("video")
    }

    pub fn media(&self) -> Option<MediaView> {
        let src = non_empty(&self.image_url)?.to_string();
        Some(if self.is_video() {
            MediaView::Video { src }
        } else {
            MediaView::Image {
                src,
                alt: self.title.clone().unwrap_or_default(),
            }
        })
    }

    pub fn narrative(&self) -> Narrative {
        Narrative::from_detail(self)
    }

    /// 人物タグ（空なら非表示）
    pub fn people_chips(&self) -> Vec<PersonChip> {
        self.people
            .iter()
            .flatten()
            .map(PersonChip::from)
            .collect()
    }
}

/// 地図モーダルの呼び出し引数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTarget {
    pub lat: f64,
    pub lng: f64,
    pub id: Option<i64>,
}

/// メディア表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    /// controls + autoplay
    Video { src: String },
    Image { src: String, alt: String },
}

/// ストーリー欄の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrative {
    /// ユーザーの思い出あり
    UserMemory {
        story: String,
        author: Option<String>,
        /// AI要約の1行目（"AI Analysis: " 付き）
        ai_excerpt: Option<String>,
    },
    /// AIキャプションのみ（作者・抜粋は非表示）
    AiCaption { story: String },
}

impl Narrative {
    pub fn from_detail(detail: &EventDetail) -> Self {
        let summary = non_empty(&detail.summary);

        if let Some(memory) = non_empty(&detail.user_memory) {
            let ai_excerpt = summary.map(|s| {
                let first_line = s.split('\n').next().unwrap_or("");
                format!("{}{}", AI_ANALYSIS_PREFIX, first_line)
            });
            return Narrative::UserMemory {
                story: memory.to_string(),
                author: non_empty(&detail.user_memory_author).map(str::to_string),
                ai_excerpt,
            };
        }

        let story = match summary {
            // 第2段落があればそれを、なければ全文
            Some(s) => s
                .split("\n\n")
                .nth(1)
                .filter(|p| !p.is_empty())
                .unwrap_or(s)
                .to_string(),
            None => NO_DETAILS.to_string(),
        };
        Narrative::AiCaption { story }
    }

    pub fn story(&self) -> &str {
        match self {
            Narrative::UserMemory { story, .. } | Narrative::AiCaption { story } => story,
        }
    }

    /// 作者行（例: "- Mom -"）。思い出ありで作者なしなら空文字列
    pub fn author_line(&self) -> Option<String> {
        match self {
            Narrative::UserMemory { author, .. } => Some(
                author
                    .as_deref()
                    .map(|a| format!("- {} -", a))
                    .unwrap_or_default(),
            ),
            Narrative::AiCaption { .. } => None,
        }
    }

    pub fn ai_excerpt(&self) -> Option<&str> {
        match self {
            Narrative::UserMemory { ai_excerpt, .. } => ai_excerpt.as_deref(),
            Narrative::AiCaption { .. } => None,
        }
    }
}

/// 人物（旧形式の名前文字列、または名前+感情）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Person {
    Name(String),
    Tagged {
        name: String,
        #[serde(default)]
        emotion: Option<String>,
    },
}

impl Person {
    pub fn name(&self) -> &str {
        match self {
            Person::Name(name) | Person::Tagged { name, .. } => name,
        }
    }

    pub fn emotion(&self) -> Option<&str> {
        match self {
            Person::Name(_) => None,
            Person::Tagged { emotion, .. } => non_empty(emotion),
        }
    }
}

/// 感情タグ（固定語彙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
    Neutral,
}

impl Emotion {
    /// 語彙外ならNone
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "surprise" => Some(Emotion::Surprise),
            "fear" => Some(Emotion::Fear),
            "disgust" => Some(Emotion::Disgust),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Neutral => "neutral",
        }
    }

    /// neutralは絵文字なし
    pub fn emoji(&self) -> Option<&'static str> {
        match self {
            Emotion::Happy => Some("😄"),
            Emotion::Sad => Some("😢"),
            Emotion::Angry => Some("😠"),
            Emotion::Surprise => Some("😲"),
            Emotion::Fear => Some("😱"),
            Emotion::Disgust => Some("🤢"),
            Emotion::Neutral => None,
        }
    }
}

/// 人物タグ1個分の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonChip {
    pub name: String,
    /// 絵文字がある感情のみ
    pub emotion: Option<Emotion>,
}

impl PersonChip {
    pub fn emoji(&self) -> Option<&'static str> {
        self.emotion.and_then(|e| e.emoji())
    }

    /// テキスト表示（例: "Bob 😄"）
    pub fn label(&self) -> String {
        match self.emoji() {
            Some(emoji) => format!("{} {}", self.name, emoji),
            None => self.name.clone(),
        }
    }
}

impl From<&Person> for PersonChip {
    fn from(person: &Person) -> Self {
        let emotion = person
            .emotion()
            .and_then(Emotion::parse)
            .filter(|e| e.emoji().is_some());
        Self {
            name: person.name().to_string(),
            emotion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_path() {
        assert_eq!(event_path("42"), "/api/events/42");
    }

    #[test]
    fn test_deserialize_full_detail() {
        let json = r#"{
            "id": 7,
            "date": "2024-01-05",
            "image_url": "/static/uploads/beach.jpg",
            "media_type": "photo",
            "title": "Beach",
            "summary": "Sunny beach",
            "user_memory": null,
            "location": "Kamakura",
            "weather": "Sunny, 12°C",
            "tags": "beach,sea",
            "people": [{"name": "Alice", "emotion": "happy"}],
            "lat": 35.31,
            "lng": 139.55
        }"#;
        let detail = EventDetail::from_json(json).expect("パース失敗");

        assert_eq!(detail.id, Some(7));
        assert_eq!(detail.date.as_deref(), Some("2024-01-05"));
        assert_eq!(detail.weather_text(), Some("Sunny, 12°C"));
        assert_eq!(
            detail.map_target(),
            Some(MapTarget { lat: 35.31, lng: 139.55, id: Some(7) })
        );
        assert_eq!(detail.people_chips().len(), 1);
    }

    #[test]
    fn test_malformed_field_degrades_alone() {
        let json = r#"{"date": "2024-01-05", "lat": "north", "lng": 139.5, "weather": 12, "people": "Alice"}"#;
        let detail = EventDetail::from_json(json).expect("パース失敗");

        assert_eq!(detail.date.as_deref(), Some("2024-01-05"));
        assert_eq!(detail.lat, None);
        assert_eq!(detail.map_target(), None);
        assert_eq!(detail.weather_text(), None);
        assert!(detail.people_chips().is_empty());
    }

    #[test]
    fn test_not_an_object_is_error() {
        assert!(matches!(EventDetail::from_json("[1, 2]"), Err(Error::Config(_))));
        assert!(matches!(EventDetail::from_json("\"text\""), Err(Error::Config(_))));
        assert!(matches!(EventDetail::from_json("null"), Err(Error::Config(_))));
        assert!(matches!(EventDetail::from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_map_target_requires_both_coordinates() {
        let detail = EventDetail { lat: Some(35.0), ..Default::default() };
        assert_eq!(detail.map_target(), None);
    }

    #[test]
    fn test_empty_weather_is_hidden() {
        let detail = EventDetail { weather: Some(String::new()), ..Default::default() };
        assert_eq!(detail.weather_text(), None);
    }

    #[test]
    fn test_media_video_and_image() {
        let video = EventDetail {
            image_url: Some("/v.mp4".into()),
            media_type: Some("video".into()),
            ..Default::default()
        };
        assert_eq!(video.media(), Some(MediaView::Video { src: "/v.mp4".into() }));

        let image = EventDetail {
            image_url: Some("/p.jpg".into()),
            media_type: Some("photo".into()),
            title: Some("Park".into()),
            ..Default::default()
        };
        assert_eq!(
            image.media(),
            Some(MediaView::Image { src: "/p.jpg".into(), alt: "Park".into() })
        );

        assert_eq!(EventDetail::default().media(), None);
    }

    #[test]
    fn test_narrative_with_user_memory() {
        let detail = EventDetail::from_json(
            r#"{"user_memory": "A day at the beach", "user_memory_author": "Mom", "summary": "line1\nline2"}"#,
        )
        .unwrap();
        let narrative = detail.narrative();

        assert_eq!(narrative.story(), "A day at the beach");
        assert_eq!(narrative.author_line().as_deref(), Some("- Mom -"));
        assert_eq!(narrative.ai_excerpt(), Some("AI Analysis: line1"));
    }

    #[test]
    fn test_narrative_user_memory_without_author_or_summary() {
        let detail = EventDetail { user_memory: Some("Snow day".into()), ..Default::default() };
        let narrative = detail.narrative();

        assert_eq!(narrative.story(), "Snow day");
        assert_eq!(narrative.author_line().as_deref(), Some(""));
        assert_eq!(narrative.ai_excerpt(), None);
    }

    #[test]
    fn test_narrative_second_paragraph() {
        let detail = EventDetail::from_json(r#"{"summary": "para one\n\npara two"}"#).unwrap();
        let narrative = detail.narrative();

        assert_eq!(narrative.story(), "para two");
        assert_eq!(narrative.author_line(), None);
        assert_eq!(narrative.ai_excerpt(), None);
    }

    #[test]
    fn test_narrative_only_second_paragraph_of_many() {
        let detail = EventDetail { summary: Some("a\n\nb\n\nc".into()), ..Default::default() };
        assert_eq!(detail.narrative().story(), "b");
    }

    #[test]
    fn test_narrative_single_paragraph_summary() {
        let detail = EventDetail { summary: Some("just one".into()), ..Default::default() };
        assert_eq!(detail.narrative().story(), "just one");
    }

    #[test]
    fn test_narrative_fallback() {
        assert_eq!(EventDetail::default().narrative().story(), NO_DETAILS);

        let empty_memory = EventDetail { user_memory: Some(String::new()), ..Default::default() };
        assert_eq!(empty_memory.narrative(), Narrative::AiCaption { story: NO_DETAILS.into() });
    }

    #[test]
    fn test_people_both_forms() {
        let detail = EventDetail::from_json(
            r#"{"people": ["Alice", {"name": "Bob", "emotion": "happy"}, {"name": "Carol", "emotion": "bored"}, {"name": "Dan", "emotion": "neutral"}, {"emotion": "sad"}]}"#,
        )
        .unwrap();
        let chips = detail.people_chips();

        assert_eq!(chips.len(), 4);
        assert_eq!(chips[0].label(), "Alice");
        assert_eq!(chips[1].label(), "Bob 😄");
        assert_eq!(chips[1].emotion, Some(Emotion::Happy));
        assert_eq!(chips[2].label(), "Carol");
        assert_eq!(chips[2].emoji(), None);
        assert_eq!(chips[3].label(), "Dan");
    }

    #[test]
    fn test_emotion_vocabulary() {
        let expected = [
            ("happy", Some("😄")),
            ("sad", Some("😢")),
            ("angry", Some("😠")),
            ("surprise", Some("😲")),
            ("fear", Some("😱")),
            ("disgust", Some("🤢")),
            ("neutral", None),
        ];
        for (tag, emoji) in expected {
            let emotion = Emotion::parse(tag).expect(tag);
            assert_eq!(emotion.as_str(), tag);
            assert_eq!(emotion.emoji(), emoji);
        }
        assert_eq!(Emotion::parse("Happy"), None);
    }
}
