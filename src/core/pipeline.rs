use crate::core::search_links::SearchLinks;
use crate::core::{ConfigProvider, EnrichResult, OutputFormat, Pipeline, Storage};
use crate::domain::model::{Vocabulary, VocabularyWithLinks};
use crate::utils::error::{KotobaError, Result};
use crate::utils::validation::Validate;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ZIP_FILE_NAME: &str = "vocabulary_links.zip";

const COLUMNS: [&str; 8] = [
    "id",
    "kanji",
    "furigana",
    "romaji",
    "meaning_ko",
    "jlpt_level",
    "youtube_url",
    "google_url",
];

/// Reads a vocabulary export, attaches search links and writes the exports.
pub struct EnrichPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    links: SearchLinks,
}

impl<S: Storage, C: ConfigProvider> EnrichPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let links = config.search_links();
        Self {
            storage,
            config,
            links,
        }
    }

    fn keep_level(&self, vocab: &Vocabulary) -> bool {
        let levels = self.config.jlpt_levels();
        levels.is_empty() || levels.contains(&vocab.jlpt_level)
    }
}

pub fn render_delimited(records: &[VocabularyWithLinks], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        let vocab = &record.vocabulary;
        let id = vocab.id.to_string();
        writer.write_record([
            id.as_str(),
            vocab.kanji.as_str(),
            vocab.furigana.as_str(),
            vocab.romaji.as_str(),
            vocab.meaning_ko.as_str(),
            vocab.jlpt_level.as_str(),
            record.youtube_url.as_str(),
            record.google_url.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| KotobaError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| KotobaError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

fn render(format: OutputFormat, records: &[VocabularyWithLinks]) -> Result<String> {
    match format {
        OutputFormat::Csv => render_delimited(records, b','),
        OutputFormat::Tsv => render_delimited(records, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EnrichPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Vocabulary>> {
        tracing::debug!("Reading vocabulary export: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let raw: Vec<Vocabulary> = serde_json::from_slice(&data)?;
        let total = raw.len();

        let mut records = Vec::with_capacity(total);
        for vocab in raw {
            if let Err(e) = vocab.validate() {
                if self.config.skip_invalid() {
                    tracing::warn!("Skipping record: {}", e);
                    continue;
                }
                return Err(e);
            }
            if self.keep_level(&vocab) {
                records.push(vocab);
            }
        }

        tracing::debug!("Kept {} of {} records", records.len(), total);
        Ok(records)
    }

    async fn transform(&self, data: Vec<Vocabulary>) -> Result<EnrichResult> {
        let records = self.links.enrich_all(&data);

        let mut outputs = Vec::new();
        for &format in self.config.output_formats() {
            outputs.push((format, render(format, &records)?));
        }

        Ok(EnrichResult { records, outputs })
    }

    async fn load(&self, result: EnrichResult) -> Result<String> {
        if self.config.compress() {
            tracing::debug!("Creating ZIP file with {} files", result.outputs.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (format, content) in &result.outputs {
                    zip.start_file::<_, ()>(format.file_name(), FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ZIP_FILE_NAME, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), ZIP_FILE_NAME));
        }

        for (format, content) in &result.outputs {
            tracing::debug!("Writing {} ({} bytes)", format.file_name(), content.len());
            self.storage
                .write_file(format.file_name(), content.as_bytes())
                .await?;
        }
        Ok(self.config.output_path().to_string())
    }
}
