//! External search links for vocabulary entries.
//!
//! Each link is a plain query URL: a fixed base, a fixed query key, and the
//! percent-encoded text `"<word> <suffix>"`. Encoding escapes every byte
//! outside the RFC 3986 unreserved set (space becomes `%20`), so decoding a
//! produced query and encoding it again yields the same URL.

use crate::domain::model::{Vocabulary, VocabularyWithLinks};
use serde::{Deserialize, Serialize};

pub const USAGE_SEARCH_BASE: &str = "https://www.youtube.com/results";
pub const EXAMPLE_SEARCH_BASE: &str = "https://www.google.com/search";

pub const USAGE_QUERY_KEY: &str = "search_query";
pub const EXAMPLE_QUERY_KEY: &str = "q";

/// "how to use"
pub const USAGE_SUFFIX: &str = "使い方";
/// "example sentence"
pub const EXAMPLE_SUFFIX: &str = "例文";

fn search_url(base: &str, key: &str, word: &str, suffix: &str) -> String {
    let query = format!("{} {}", word, suffix);
    format!("{}?{}={}", base, key, urlencoding::encode(&query))
}

/// Video search for how `word` is used.
pub fn build_usage_search_url(word: &str) -> String {
    search_url(USAGE_SEARCH_BASE, USAGE_QUERY_KEY, word, USAGE_SUFFIX)
}

/// Web search for example sentences containing `word`.
pub fn build_example_search_url(word: &str) -> String {
    search_url(EXAMPLE_SEARCH_BASE, EXAMPLE_QUERY_KEY, word, EXAMPLE_SUFFIX)
}

/// Returns a new record; `vocab` is left as it was.
pub fn enrich_vocabulary(vocab: &Vocabulary) -> VocabularyWithLinks {
    SearchLinks::default().enrich(vocab)
}

pub fn enrich_vocabulary_list(vocab_list: &[Vocabulary]) -> Vec<VocabularyWithLinks> {
    SearchLinks::default().enrich_all(vocab_list)
}

/// Search targets with overridable base URLs, e.g. a regional Google domain.
/// Query keys and suffixes do not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLinks {
    pub usage_base: String,
    pub example_base: String,
}

impl Default for SearchLinks {
    fn default() -> Self {
        Self {
            usage_base: USAGE_SEARCH_BASE.to_string(),
            example_base: EXAMPLE_SEARCH_BASE.to_string(),
        }
    }
}

impl SearchLinks {
    pub fn new(usage_base: impl Into<String>, example_base: impl Into<String>) -> Self {
        Self {
            usage_base: usage_base.into(),
            example_base: example_base.into(),
        }
    }

    pub fn usage_url(&self, word: &str) -> String {
        search_url(&self.usage_base, USAGE_QUERY_KEY, word, USAGE_SUFFIX)
    }

    pub fn example_url(&self, word: &str) -> String {
        search_url(&self.example_base, EXAMPLE_QUERY_KEY, word, EXAMPLE_SUFFIX)
    }

    pub fn enrich(&self, vocab: &Vocabulary) -> VocabularyWithLinks {
        let word = vocab.search_word();
        VocabularyWithLinks {
            youtube_url: self.usage_url(word),
            google_url: self.example_url(word),
            vocabulary: vocab.clone(),
        }
    }

    pub fn enrich_all(&self, vocab_list: &[Vocabulary]) -> Vec<VocabularyWithLinks> {
        vocab_list.iter().map(|vocab| self.enrich(vocab)).collect()
    }
}
