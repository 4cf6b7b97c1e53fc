pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::search_links::{SearchLinks, EXAMPLE_SEARCH_BASE, USAGE_SEARCH_BASE};
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, OutputFormat};
#[cfg(feature = "cli")]
use crate::domain::model::JlptLevel;
#[cfg(feature = "cli")]
use crate::utils::error::{KotobaError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "kotoba-links")]
#[command(about = "Attach usage and example-sentence search links to a vocabulary export")]
pub struct CliConfig {
    /// JSON array of vocabulary records
    #[arg(long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,tsv,json")]
    pub formats: Vec<OutputFormat>,

    /// Only keep these JLPT levels, e.g. N5,N4
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<JlptLevel>,

    #[arg(long, default_value = USAGE_SEARCH_BASE)]
    pub usage_base: String,

    #[arg(long, default_value = EXAMPLE_SEARCH_BASE)]
    pub example_base: String,

    #[arg(long, help = "Bundle all outputs into one zip file")]
    pub zip: bool,

    #[arg(long, help = "Drop records that fail validation instead of aborting")]
    pub skip_invalid: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn jlpt_levels(&self) -> &[JlptLevel] {
        &self.levels
    }

    fn search_links(&self) -> SearchLinks {
        SearchLinks::new(&self.usage_base, &self.example_base)
    }

    fn compress(&self) -> bool {
        self.zip
    }

    fn skip_invalid(&self) -> bool {
        self.skip_invalid
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions("input", &[self.input.as_str()], &["json"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_url("usage_base", &self.usage_base)?;
        validation::validate_url("example_base", &self.example_base)?;

        if self.formats.is_empty() {
            return Err(KotobaError::MissingConfigError {
                field: "formats".to_string(),
            });
        }
        Ok(())
    }
}
