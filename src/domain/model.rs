use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "New Flyer")]
    NewFlyer,
    Gillig,
    Universal,
    Misc,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NewFlyer => "New Flyer",
            Category::Gillig => "Gillig",
            Category::Universal => "Universal",
            Category::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One marker line plus the description text buffered ahead of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub part_number: String,
    pub text: String,
}

/// Output row. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRecord {
    pub brand: String,
    pub category: Category,
    pub short_description: String,
    pub description: String,
    pub part_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_code: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<PartRecord>,
    /// Marker lines with fewer than two tokens.
    pub skipped_markers: usize,
    /// Buffered lines after the last marker line.
    pub trailing_lines: usize,
}

impl TransformResult {
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}
