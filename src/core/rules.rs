use crate::core::classify::Classifier;
use regex::Regex;

/// Compiled parsing and classification policy, built from a `RulesConfig`.
#[derive(Debug, Clone)]
pub struct CatalogRules {
    pub marker: String,
    pub header_lines: usize,
    pub bin_code: Regex,
    pub strip_phrase: String,
    pub classifier: Classifier,
    pub short_description_min_length: usize,
    pub retain_bin_code: bool,
}

impl CatalogRules {
    pub fn with_retained_bin_code(mut self, retain: bool) -> Self {
        self.retain_bin_code = retain;
        self
    }
}
