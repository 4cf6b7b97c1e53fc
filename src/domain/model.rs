//! Entity shapes shared with the storage layer.
//!
//! Field names and encodings follow the stored records exactly: snake_case
//! keys, RFC 3339 timestamps, UUID identifiers, and `"N5"`..`"N1"` for JLPT
//! grades. Nothing here checks invariants; see `utils::validation` for the
//! checks applied when records enter the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::error::KotobaError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(VocabularyId);
entity_id!(KanjiId);
entity_id!(ProgressId);
entity_id!(FavoriteId);
entity_id!(
    /// Identifies a user account. A `Profile` is keyed by the same id.
    UserId
);

/// JLPT grade. Variants are declared from easiest to hardest, so `N5 < N1`.
/// Parsed case-insensitively from every source (stored records, TOML, CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JlptLevel {
    type Err = KotobaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        JlptLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| KotobaError::InvalidConfigValueError {
                field: "jlpt_level".to_string(),
                value: s.to_string(),
                reason: "Expected one of N5, N4, N3, N2, N1".to_string(),
            })
    }
}

impl TryFrom<String> for JlptLevel {
    type Error = KotobaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored as `null` by some exports for kana-only words.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: VocabularyId,
    /// Written form; empty for words usually written in kana.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub kanji: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub furigana: String,
    pub romaji: String,
    pub meaning_ko: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_en: Option<String>,
    pub jlpt_level: JlptLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vocabulary {
    /// The written form when there is one, otherwise the reading.
    pub fn search_word(&self) -> &str {
        if self.kanji.is_empty() {
            &self.furigana
        } else {
            &self.kanji
        }
    }
}

/// A vocabulary record with its derived search links. Rendered, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWithLinks {
    #[serde(flatten)]
    pub vocabulary: Vocabulary,
    pub youtube_url: String,
    pub google_url: String,
}

impl AsRef<Vocabulary> for VocabularyWithLinks {
    fn as_ref(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kanji {
    pub id: KanjiId,
    pub character: String,
    pub meaning_ko: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_en: Option<String>,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
    pub strokes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radical_meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jlpt_level: Option<JlptLevel>,
    /// Lower is more frequent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_rank: Option<u32>,
    /// Opaque; the producer owns the schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_order: Option<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Vocabulary,
    Kanji,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Vocabulary => "vocabulary",
            ItemType::Kanji => "kanji",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference from a progress or favorite record to the studied item.
///
/// On the wire this is the flat pair `item_type` + `item_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawItemRef", into = "RawItemRef")]
pub enum ItemRef {
    Vocabulary(VocabularyId),
    Kanji(KanjiId),
}

impl ItemRef {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemRef::Vocabulary(_) => ItemType::Vocabulary,
            ItemRef::Kanji(_) => ItemType::Kanji,
        }
    }

    pub fn item_id(&self) -> Uuid {
        match self {
            ItemRef::Vocabulary(id) => id.0,
            ItemRef::Kanji(id) => id.0,
        }
    }
}

impl From<VocabularyId> for ItemRef {
    fn from(id: VocabularyId) -> Self {
        ItemRef::Vocabulary(id)
    }
}

impl From<KanjiId> for ItemRef {
    fn from(id: KanjiId) -> Self {
        ItemRef::Kanji(id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawItemRef {
    item_type: ItemType,
    item_id: Uuid,
}

impl From<RawItemRef> for ItemRef {
    fn from(raw: RawItemRef) -> Self {
        match raw.item_type {
            ItemType::Vocabulary => ItemRef::Vocabulary(VocabularyId(raw.item_id)),
            ItemType::Kanji => ItemRef::Kanji(KanjiId(raw.item_id)),
        }
    }
}

impl From<ItemRef> for RawItemRef {
    fn from(item: ItemRef) -> Self {
        RawItemRef {
            item_type: item.item_type(),
            item_id: item.item_id(),
        }
    }
}

/// One user's mastery state for one item. Scheduling rules live elsewhere;
/// this crate only reads the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: ProgressId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub item: ItemRef,
    pub mastery_level: f64,
    pub correct_count: u32,
    pub incorrect_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    /// Days until the next review.
    pub review_interval: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFavorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub item: ItemRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form label, usually a JLPT grade.
    pub level: String,
    pub target_level: String,
    /// Consecutive study days.
    pub study_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vocabulary_json() -> Value {
        json!({
            "id": "6f1c2a4e-8d8b-4b5e-9a31-2c0f4d7e9b10",
            "kanji": "食べる",
            "furigana": "たべる",
            "romaji": "taberu",
            "meaning_ko": "먹다",
            "jlpt_level": "N5",
            "category": "verb",
            "created_at": "2024-03-01T09:00:00Z",
            "updated_at": "2024-03-02T09:00:00+00:00"
        })
    }

    #[test]
    fn test_vocabulary_from_stored_record() {
        let vocab: Vocabulary = serde_json::from_value(vocabulary_json()).unwrap();
        assert_eq!(vocab.kanji, "食べる");
        assert_eq!(vocab.jlpt_level, JlptLevel::N5);
        assert_eq!(vocab.category.as_deref(), Some("verb"));
        assert!(vocab.meaning_en.is_none());
        assert!(vocab.audio_url.is_none());
    }

    #[test]
    fn test_null_kanji_reads_as_empty() {
        let mut raw = vocabulary_json();
        raw["kanji"] = Value::Null;
        let vocab: Vocabulary = serde_json::from_value(raw).unwrap();
        assert_eq!(vocab.kanji, "");
        assert_eq!(vocab.search_word(), "たべる");
    }

    #[test]
    fn test_absent_optionals_are_not_written() {
        let vocab: Vocabulary = serde_json::from_value(vocabulary_json()).unwrap();
        let out = serde_json::to_value(&vocab).unwrap();
        assert!(out.get("meaning_en").is_none());
        assert!(out.get("audio_url").is_none());
        assert_eq!(out["jlpt_level"], "N5");
    }

    #[test]
    fn test_jlpt_order_runs_easy_to_hard() {
        assert!(JlptLevel::N5 < JlptLevel::N4);
        assert!(JlptLevel::N2 < JlptLevel::N1);
        assert_eq!(JlptLevel::ALL.iter().max(), Some(&JlptLevel::N1));
    }

    #[test]
    fn test_jlpt_parse() {
        assert_eq!("n3".parse::<JlptLevel>().unwrap(), JlptLevel::N3);
        assert_eq!(" N1 ".parse::<JlptLevel>().unwrap(), JlptLevel::N1);
        assert!("N6".parse::<JlptLevel>().is_err());
        assert!(serde_json::from_value::<JlptLevel>(json!("N0")).is_err());
        assert_eq!(
            serde_json::from_value::<JlptLevel>(json!("n2")).unwrap(),
            JlptLevel::N2
        );
        assert_eq!(serde_json::to_value(JlptLevel::N2).unwrap(), json!("N2"));
    }

    #[test]
    fn test_progress_item_reference_is_flat_on_the_wire() {
        let raw = json!({
            "id": "0b7a0d36-6d4e-4f52-9c1b-7f0f7c1f3a01",
            "user_id": "1d5c3a50-3a51-4b1e-8d4c-9b0c1e2f3a4b",
            "item_type": "kanji",
            "item_id": "a3e1c7f2-4b5d-4c6e-8f9a-0b1c2d3e4f50",
            "mastery_level": 2,
            "correct_count": 7,
            "incorrect_count": 1,
            "next_review": "2024-05-01T00:00:00Z",
            "review_interval": 3.5,
            "created_at": "2024-04-01T00:00:00Z",
            "updated_at": "2024-04-28T00:00:00Z"
        });

        let progress: UserProgress = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(progress.item.item_type(), ItemType::Kanji);
        assert!(matches!(progress.item, ItemRef::Kanji(_)));
        assert_eq!(progress.mastery_level, 2.0);
        assert!(progress.last_reviewed.is_none());

        let out = serde_json::to_value(&progress).unwrap();
        assert_eq!(out["item_type"], "kanji");
        assert_eq!(out["item_id"], raw["item_id"]);
        assert!(out.get("item").is_none());
    }

    #[test]
    fn test_unknown_item_type_is_rejected() {
        let raw = json!({
            "id": "0b7a0d36-6d4e-4f52-9c1b-7f0f7c1f3a01",
            "user_id": "1d5c3a50-3a51-4b1e-8d4c-9b0c1e2f3a4b",
            "item_type": "grammar",
            "item_id": "a3e1c7f2-4b5d-4c6e-8f9a-0b1c2d3e4f50",
            "created_at": "2024-04-01T00:00:00Z"
        });
        assert!(serde_json::from_value::<UserFavorite>(raw).is_err());
    }

    #[test]
    fn test_profile_preferences_default_to_empty() {
        let raw = json!({
            "id": "1d5c3a50-3a51-4b1e-8d4c-9b0c1e2f3a4b",
            "username": "hana",
            "email": "hana@example.com",
            "level": "N4",
            "target_level": "N2",
            "study_streak": 12,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-05T00:00:00Z"
        });
        let profile: Profile = serde_json::from_value(raw).unwrap();
        assert!(profile.preferences.is_empty());
        assert_eq!(profile.study_streak, 12);
    }

    #[test]
    fn test_links_serialize_alongside_vocabulary_fields() {
        let vocab: Vocabulary = serde_json::from_value(vocabulary_json()).unwrap();
        let linked = VocabularyWithLinks {
            vocabulary: vocab,
            youtube_url: "https://www.youtube.com/results?search_query=x".to_string(),
            google_url: "https://www.google.com/search?q=x".to_string(),
        };
        let out = serde_json::to_value(&linked).unwrap();
        assert_eq!(out["kanji"], "食べる");
        assert_eq!(out["google_url"], "https://www.google.com/search?q=x");
        assert_eq!(linked.as_ref().romaji, "taberu");
    }
}
