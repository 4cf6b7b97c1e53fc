use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EnrichEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EnrichEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting enrichment...");

        let vocabulary = self.pipeline.extract().await?;
        tracing::info!("Extracted {} vocabulary records", vocabulary.len());

        let result = self.pipeline.transform(vocabulary).await?;
        tracing::info!(
            "Enriched {} records into {} output(s)",
            result.records.len(),
            result.outputs.len()
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
