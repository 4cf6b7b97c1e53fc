use crate::core::search_links::SearchLinks;
use crate::domain::model::{JlptLevel, Vocabulary, VocabularyWithLinks};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "vocabulary.csv",
            OutputFormat::Tsv => "vocabulary.tsv",
            OutputFormat::Json => "vocabulary.json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::utils::error::KotobaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(crate::utils::error::KotobaError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    /// Empty means every level.
    fn jlpt_levels(&self) -> &[JlptLevel];
    fn search_links(&self) -> SearchLinks {
        SearchLinks::default()
    }
    fn compress(&self) -> bool;
    fn skip_invalid(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct EnrichResult {
    pub records: Vec<VocabularyWithLinks>,
    pub outputs: Vec<(OutputFormat, String)>,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Vocabulary>>;
    async fn transform(&self, data: Vec<Vocabulary>) -> Result<EnrichResult>;
    async fn load(&self, result: EnrichResult) -> Result<String>;
}
