use crate::core::rules::CatalogRules;
use crate::core::segment::{decode_input, normalize_lines};
use crate::core::transform::transform_lines;
use crate::core::{ConfigProvider, PartRecord, Pipeline, Storage, TransformResult};
use crate::domain::model::OutputFormat;
use crate::utils::error::{EtlError, Result};

pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) rules: CatalogRules,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C, rules: CatalogRules) -> Self {
        Self {
            storage,
            config,
            rules,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        tracing::info!("Reading {}...", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        Ok(normalize_lines(&decode_input(&bytes)))
    }

    async fn transform(&self, lines: Vec<String>) -> Result<TransformResult> {
        tracing::info!(
            "Processing with marker {:?}, skipping {} header line(s)",
            self.rules.marker,
            self.rules.header_lines
        );
        Ok(transform_lines(lines.as_slice(), &self.rules))
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let data = match self.config.output_format() {
            OutputFormat::Json => serde_json::to_string_pretty(&result.records)?.into_bytes(),
            OutputFormat::Csv => render_csv(&result.records, self.rules.retain_bin_code)?,
        };

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(&output_path, &data).await?;

        Ok(output_path)
    }
}

/// Same columns as the JSON keys. `binCode` is present only when retained, so
/// every row has the same width.
fn render_csv(records: &[PartRecord], retain_bin_code: bool) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "brand",
        "category",
        "shortDescription",
        "description",
        "partNumber",
    ];
    if retain_bin_code {
        header.push("binCode");
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.brand.as_str(),
            record.category.as_str(),
            record.short_description.as_str(),
            record.description.as_str(),
            record.part_number.as_str(),
        ];
        if retain_bin_code {
            row.push(record.bin_code.as_deref().unwrap_or(""));
        }
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rules::RulesConfig;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        fn empty() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| EtlError::InputNotFound {
                    path: path.to_string(),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        format: OutputFormat,
        output: String,
    }

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> &str {
            "Part-Numbers.csv"
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    const EXPORT: &[u8] = b"\"PART NUMBER LIST\"\n\"Printed 01/02/2024\"\n\n\"LAMP, MINIATURE, 12V\"\n\"BRO 4411 C-100-200-30-40\"\n\"BRO 4412 BRACKET, NF, GILLIG\"\n";

    fn pipeline(
        storage: MockStorage,
        format: OutputFormat,
        output: &str,
    ) -> CatalogPipeline<MockStorage, TestConfig> {
        let rules = RulesConfig::default().compile().unwrap();
        let config = TestConfig {
            format,
            output: output.to_string(),
        };
        CatalogPipeline::new(storage, config, rules)
    }

    #[tokio::test]
    async fn test_extract_normalizes_lines() {
        let storage = MockStorage::with_file("Part-Numbers.csv", EXPORT);
        let lines = pipeline(storage, OutputFormat::Json, "parts.json")
            .extract()
            .await
            .unwrap();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "PART NUMBER LIST");
        assert_eq!(lines[2], "LAMP, MINIATURE, 12V");
    }

    #[tokio::test]
    async fn test_extract_missing_input() {
        let result = pipeline(MockStorage::empty(), OutputFormat::Json, "parts.json")
            .extract()
            .await;
        assert!(matches!(result, Err(EtlError::InputNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_writes_pretty_json() {
        let storage = MockStorage::with_file("Part-Numbers.csv", EXPORT);
        let pipeline = pipeline(storage.clone(), OutputFormat::Json, "parts.json");

        let lines = pipeline.extract().await.unwrap();
        let result = pipeline.transform(lines).await.unwrap();
        let path = pipeline.load(result).await.unwrap();
        assert_eq!(path, "parts.json");

        let written = String::from_utf8(storage.get_file("parts.json").await.unwrap()).unwrap();
        assert!(written.starts_with("[\n  {\n    \"brand\": \"Generic\""));

        let records: Vec<PartRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].part_number, "4411");
        assert_eq!(records[0].description, "LAMP, MINIATURE, 12V");
        assert_eq!(records[0].short_description, "LAMP, MINIATURE");
        assert_eq!(records[1].brand, "Multi-Brand");
    }

    #[tokio::test]
    async fn test_load_writes_csv() {
        let storage = MockStorage::with_file("Part-Numbers.csv", EXPORT);
        let pipeline = pipeline(storage.clone(), OutputFormat::Csv, "parts.csv");

        let lines = pipeline.extract().await.unwrap();
        let result = pipeline.transform(lines).await.unwrap();
        pipeline.load(result).await.unwrap();

        let written = String::from_utf8(storage.get_file("parts.csv").await.unwrap()).unwrap();
        let mut rows = written.lines();
        assert_eq!(
            rows.next(),
            Some("brand,category,shortDescription,description,partNumber")
        );
        assert_eq!(
            rows.next(),
            Some("Generic,Universal,\"LAMP, MINIATURE\",\"LAMP, MINIATURE, 12V\",4411")
        );
    }
}
