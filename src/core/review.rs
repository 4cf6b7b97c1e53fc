//! Read-only queries over progress records, and an in-memory catalog that
//! resolves item references. Nothing here changes mastery or schedules.

use crate::domain::model::{ItemRef, Kanji, KanjiId, UserProgress, Vocabulary, VocabularyId};
use crate::utils::error::{KotobaError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

impl UserProgress {
    /// A record with no `next_review` has never been scheduled and is not due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_some_and(|at| at <= now)
    }

    pub fn total_reviews(&self) -> u64 {
        u64::from(self.correct_count) + u64::from(self.incorrect_count)
    }

    /// Share of correct answers, or `None` before the first review.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total_reviews() {
            0 => None,
            total => Some(f64::from(self.correct_count) / total as f64),
        }
    }
}

/// Due records, earliest `next_review` first. Ties keep their input order.
pub fn due_for_review(progress: &[UserProgress], now: DateTime<Utc>) -> Vec<&UserProgress> {
    let mut due: Vec<&UserProgress> = progress.iter().filter(|p| p.is_due(now)).collect();
    due.sort_by_key(|p| p.next_review);
    due
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogItem<'a> {
    Vocabulary(&'a Vocabulary),
    Kanji(&'a Kanji),
}

impl CatalogItem<'_> {
    pub fn headword(&self) -> &str {
        match self {
            CatalogItem::Vocabulary(vocab) => vocab.search_word(),
            CatalogItem::Kanji(kanji) => &kanji.character,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vocabulary: HashMap<VocabularyId, Vocabulary>,
    kanji: HashMap<KanjiId, Kanji>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        vocabulary: impl IntoIterator<Item = Vocabulary>,
        kanji: impl IntoIterator<Item = Kanji>,
    ) -> Self {
        let mut catalog = Self::new();
        vocabulary.into_iter().for_each(|v| catalog.insert_vocabulary(v));
        kanji.into_iter().for_each(|k| catalog.insert_kanji(k));
        catalog
    }

    pub fn insert_vocabulary(&mut self, vocab: Vocabulary) {
        self.vocabulary.insert(vocab.id, vocab);
    }

    pub fn insert_kanji(&mut self, kanji: Kanji) {
        self.kanji.insert(kanji.id, kanji);
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len() + self.kanji.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve(&self, item: ItemRef) -> Option<CatalogItem<'_>> {
        match item {
            ItemRef::Vocabulary(id) => self.vocabulary.get(&id).map(CatalogItem::Vocabulary),
            ItemRef::Kanji(id) => self.kanji.get(&id).map(CatalogItem::Kanji),
        }
    }

    pub fn check_reference(&self, item: ItemRef) -> Result<CatalogItem<'_>> {
        self.resolve(item)
            .ok_or_else(|| KotobaError::DanglingReferenceError {
                item_type: item.item_type().as_str(),
                id: item.item_id().to_string(),
            })
    }
}
