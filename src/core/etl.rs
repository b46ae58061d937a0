use crate::core::{Pipeline, TransformResult};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let result = self.preview().await?;

        tracing::info!("Loading {} records...", result.records.len());
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// Extract and transform only; nothing is written.
    pub async fn preview(&self) -> Result<TransformResult> {
        let lines = self.pipeline.extract().await?;
        tracing::info!("Extracted {} lines", lines.len());

        let result = self.pipeline.transform(lines).await?;
        log_summary(&result);

        Ok(result)
    }
}

fn log_summary(result: &TransformResult) {
    tracing::info!("DONE. Categorized {} parts.", result.records.len());
    for (category, count) in result.category_counts() {
        tracing::info!("  {}: {}", category, count);
    }
    if result.skipped_markers > 0 {
        tracing::warn!(
            "Skipped {} marker line(s) without a part number",
            result.skipped_markers
        );
    }
    if result.trailing_lines > 0 {
        tracing::warn!(
            "{} line(s) after the last marker line had no part number and were dropped",
            result.trailing_lines
        );
    }
}
