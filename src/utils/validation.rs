use crate::domain::model::{Kanji, Profile, UserFavorite, UserProgress, Vocabulary};
use crate::utils::error::{KotobaError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use url::Url;

/// Checks applied where records and configs enter the crate.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(KotobaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" if url.query().is_none() => Ok(()),
            "http" | "https" => Err(KotobaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: "Base URL must not carry a query string".to_string(),
            }),
            scheme => Err(KotobaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(KotobaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(KotobaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(KotobaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[&str],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(KotobaError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(KotobaError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KotobaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn check_timestamps(
    entity: &'static str,
    id: impl ToString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    if updated_at < created_at {
        return Err(KotobaError::invalid_record(
            entity,
            id,
            format!("updated_at {} precedes created_at {}", updated_at, created_at),
        ));
    }
    Ok(())
}

fn check_non_negative(entity: &'static str, id: impl ToString, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(KotobaError::invalid_record(
            entity,
            id,
            format!("{} must be a non-negative number, got {}", field, value),
        ));
    }
    Ok(())
}

impl Validate for Vocabulary {
    fn validate(&self) -> Result<()> {
        if self.kanji.trim().is_empty() && self.furigana.trim().is_empty() {
            return Err(KotobaError::invalid_record(
                "vocabulary",
                self.id,
                "kanji and furigana are both empty",
            ));
        }
        if self.meaning_ko.trim().is_empty() {
            return Err(KotobaError::invalid_record("vocabulary", self.id, "meaning_ko is empty"));
        }
        check_timestamps("vocabulary", self.id, self.created_at, self.updated_at)
    }
}

impl Validate for Kanji {
    fn validate(&self) -> Result<()> {
        if self.character.trim().is_empty() {
            return Err(KotobaError::invalid_record("kanji", self.id, "character is empty"));
        }
        if self.strokes == 0 {
            return Err(KotobaError::invalid_record("kanji", self.id, "strokes must be positive"));
        }
        if self.frequency_rank == Some(0) {
            return Err(KotobaError::invalid_record(
                "kanji",
                self.id,
                "frequency_rank must be positive",
            ));
        }
        Ok(())
    }
}

impl Validate for UserProgress {
    fn validate(&self) -> Result<()> {
        check_non_negative("user_progress", self.id, "mastery_level", self.mastery_level)?;
        check_non_negative("user_progress", self.id, "review_interval", self.review_interval)?;
        check_timestamps("user_progress", self.id, self.created_at, self.updated_at)
    }
}

impl Validate for UserFavorite {
    // Ids and the item tag are checked by the type system.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Validate for Profile {
    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(KotobaError::invalid_record("profile", self.id, "username is empty"));
        }
        if !self.email.contains('@') {
            return Err(KotobaError::invalid_record(
                "profile",
                self.id,
                format!("email '{}' is not an address", self.email),
            ));
        }
        check_timestamps("profile", self.id, self.created_at, self.updated_at)
    }
}

/// Deserializes a JSON array and validates every element.
pub fn parse_records<T>(data: &[u8]) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned + Validate,
{
    let records: Vec<T> = serde_json::from_slice(data)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ItemRef, JlptLevel, KanjiId, ProgressId, UserId, VocabularyId,
    };
    use chrono::TimeZone;

    fn vocab() -> Vocabulary {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Vocabulary {
            id: VocabularyId::new(),
            kanji: "水".to_string(),
            furigana: "みず".to_string(),
            romaji: "mizu".to_string(),
            meaning_ko: "물".to_string(),
            meaning_en: Some("water".to_string()),
            jlpt_level: JlptLevel::N5,
            category: None,
            part_of_speech: Some("noun".to_string()),
            example_sentence: None,
            example_translation: None,
            audio_url: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("search.example_base", "https://www.google.co.jp/search").is_ok());
        assert!(validate_url("search.example_base", "http://localhost:8080/search").is_ok());
        assert!(validate_url("search.example_base", "").is_err());
        assert!(validate_url("search.example_base", "invalid-url").is_err());
        assert!(validate_url("search.example_base", "ftp://example.com").is_err());
        assert!(validate_url("search.example_base", "https://example.com/s?hl=ja").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        assert!(validate_file_extensions("source.input_path", &["export.json"], &["json"]).is_ok());
        assert!(validate_file_extensions("source.input_path", &["export.csv"], &["json"]).is_err());
        assert!(validate_file_extensions("source.input_path", &["export"], &["json"]).is_err());
    }

    #[test]
    fn test_vocabulary_needs_a_written_form_or_reading() {
        let mut v = vocab();
        assert!(v.validate().is_ok());

        v.kanji.clear();
        assert!(v.validate().is_ok());

        v.furigana = "  ".to_string();
        let err = v.validate().unwrap_err();
        assert!(err.to_string().contains("kanji and furigana"));
    }

    #[test]
    fn test_vocabulary_timestamps_ordered() {
        let mut v = vocab();
        v.updated_at = v.created_at - chrono::Duration::days(1);
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_kanji_strokes_and_rank_positive() {
        let mut k = Kanji {
            id: KanjiId::new(),
            character: "水".to_string(),
            meaning_ko: "물 수".to_string(),
            meaning_en: None,
            onyomi: vec!["スイ".to_string()],
            kunyomi: vec!["みず".to_string()],
            strokes: 4,
            radical: Some("水".to_string()),
            radical_meaning: None,
            jlpt_level: Some(JlptLevel::N5),
            frequency_rank: Some(223),
            stroke_order: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        assert!(k.validate().is_ok());

        k.frequency_rank = Some(0);
        assert!(k.validate().is_err());

        k.frequency_rank = None;
        k.strokes = 0;
        assert!(k.validate().is_err());
    }

    fn progress() -> UserProgress {
        let ts = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        UserProgress {
            id: ProgressId::new(),
            user_id: UserId::new(),
            item: ItemRef::Kanji(KanjiId::new()),
            mastery_level: 2.0,
            correct_count: 5,
            incorrect_count: 2,
            last_reviewed: Some(ts),
            next_review: Some(ts + chrono::Duration::days(3)),
            review_interval: 3.0,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn profile() -> Profile {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Profile {
            id: UserId::new(),
            username: "hana".to_string(),
            email: "hana@example.com".to_string(),
            display_name: None,
            level: "N4".to_string(),
            target_level: "N2".to_string(),
            study_streak: 3,
            last_active: None,
            preferences: serde_json::Map::new(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_progress_numbers_must_be_finite_and_non_negative() {
        assert!(progress().validate().is_ok());

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut p = progress();
            p.mastery_level = bad;
            assert!(p.validate().is_err(), "mastery_level {}", bad);

            let mut p = progress();
            p.review_interval = bad;
            assert!(p.validate().is_err(), "review_interval {}", bad);
        }

        let mut p = progress();
        p.mastery_level = 0.0;
        p.review_interval = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_progress_timestamps_ordered() {
        let mut p = progress();
        p.updated_at = p.created_at - chrono::Duration::seconds(1);
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("precedes created_at"));
    }

    #[test]
    fn test_profile_rules() {
        assert!(profile().validate().is_ok());

        let mut p = profile();
        p.username = "  ".to_string();
        assert!(p.validate().is_err());

        let mut p = profile();
        p.email = "hana.example.com".to_string();
        assert!(p.validate().is_err());

        let mut p = profile();
        p.updated_at = p.created_at - chrono::Duration::days(1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_parse_records_rejects_invalid_element() {
        let mut bad = vocab();
        bad.meaning_ko = String::new();
        let data = serde_json::to_vec(&vec![vocab(), bad]).unwrap();
        assert!(parse_records::<Vocabulary>(&data).is_err());

        let data = serde_json::to_vec(&vec![vocab()]).unwrap();
        assert_eq!(parse_records::<Vocabulary>(&data).unwrap().len(), 1);
    }
}
