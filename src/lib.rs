pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::search_links::{
    build_example_search_url, build_usage_search_url, enrich_vocabulary, enrich_vocabulary_list,
    SearchLinks,
};
pub use core::{etl::EnrichEngine, pipeline::EnrichPipeline};
pub use domain::model::{
    ItemRef, ItemType, JlptLevel, Kanji, Profile, UserFavorite, UserProgress, Vocabulary,
    VocabularyWithLinks,
};
pub use utils::error::{KotobaError, Result};
