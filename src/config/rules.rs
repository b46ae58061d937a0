use crate::core::classify::{Classifier, FallbackBrand};
use crate::core::rules::CatalogRules;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    compile_pattern, validate_non_empty_list, validate_non_empty_string, validate_positive_number,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable classification policy. Every field is optional in the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub parser: ParserConfig,
    pub brands: BrandsConfig,
    pub universal: UniversalConfig,
    pub fallback: FallbackConfig,
    pub short_description: ShortDescriptionConfig,
    pub output: OutputRulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub marker: String,
    pub header_lines: usize,
    pub bin_code_pattern: String,
    pub strip_phrase: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: "BRO".to_string(),
            header_lines: 2,
            bin_code_pattern: r"[A-Z]-[0-9]{3}-[0-9]{3}-[0-9]{2}-[0-9]{2}".to_string(),
            strip_phrase: "OEM ONLY".to_string(),
        }
    }
}

/// Case-insensitive regex indicators per brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandsConfig {
    pub new_flyer: Vec<String>,
    pub gillig: Vec<String>,
}

impl Default for BrandsConfig {
    fn default() -> Self {
        Self {
            new_flyer: vec![
                r"\bNEW FLYER".to_string(),
                // No trailing boundary: NF-ALL, NFPA and NFC all count as New Flyer.
                r"\bNF".to_string(),
                r"\bN\.F\.".to_string(),
            ],
            gillig: vec![r"\bGILLIG".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversalConfig {
    pub keywords: Vec<String>,
}

impl Default for UniversalConfig {
    fn default() -> Self {
        let keywords = [
            "BOLT", "NUT", "WASHER", "SCREW", "RIVET", "CLAMP", "HOSE", "FITTING", "CONNECTOR",
            "TERMINAL", "WIRE", "CABLE", "FUSE", "BULB", "LAMP", "PAINT", "SEALANT", "ADHESIVE",
            "TAPE", "OIL", "FLUID", "GREASE", "CLEANER", "BATTERY", "RELAY", "SWITCH", "GROMMET",
            "BEARING", "BUSHING",
        ];
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Matched against the uppercased text; capture group 1 is the brand.
    pub brand_pattern: String,
    pub default_brand: String,
    pub strip_tokens: Vec<String>,
    /// When the captured brand is empty after stripping, emit `default_brand`
    /// instead of an empty string.
    pub empty_uses_default: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            brand_pattern: r"OEM ONLY,?\s*([^,]+)".to_string(),
            default_brand: "Genuine".to_string(),
            strip_tokens: vec!["INC".to_string(), ".".to_string()],
            empty_uses_default: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortDescriptionConfig {
    pub min_length: usize,
}

impl Default for ShortDescriptionConfig {
    fn default() -> Self {
        Self { min_length: 15 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRulesConfig {
    pub retain_bin_code: bool,
}

impl RulesConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("parser.marker", &self.parser.marker)?;
        validate_non_empty_string("fallback.default_brand", &self.fallback.default_brand)?;
        validate_positive_number(
            "short_description.min_length",
            self.short_description.min_length,
            1,
        )?;
        validate_non_empty_list("brands.new_flyer", &self.brands.new_flyer)?;
        validate_non_empty_list("brands.gillig", &self.brands.gillig)?;
        validate_non_empty_list("universal.keywords", &self.universal.keywords)?;

        compile_pattern("parser.bin_code_pattern", &self.parser.bin_code_pattern, false)?;
        self.compile_brands()?;

        let fallback = compile_pattern("fallback.brand_pattern", &self.fallback.brand_pattern, true)?;
        if fallback.captures_len() < 2 {
            return Err(EtlError::ConfigValidationError {
                field: "fallback.brand_pattern".to_string(),
                message: "Pattern needs a capture group for the brand".to_string(),
            });
        }

        Ok(())
    }

    fn compile_brands(&self) -> Result<(Vec<Regex>, Vec<Regex>)> {
        let compile_all = |field: &str, patterns: &[String]| -> Result<Vec<Regex>> {
            patterns
                .iter()
                .map(|p| compile_pattern(field, p, true))
                .collect()
        };
        Ok((
            compile_all("brands.new_flyer", &self.brands.new_flyer)?,
            compile_all("brands.gillig", &self.brands.gillig)?,
        ))
    }

    /// Validates, then compiles every pattern into the runtime rule set.
    pub fn compile(&self) -> Result<CatalogRules> {
        self.validate_config()?;

        let (new_flyer, gillig) = self.compile_brands()?;
        let fallback = FallbackBrand {
            pattern: compile_pattern("fallback.brand_pattern", &self.fallback.brand_pattern, true)?,
            default_brand: self.fallback.default_brand.clone(),
            strip_tokens: self.fallback.strip_tokens.clone(),
            empty_uses_default: self.fallback.empty_uses_default,
        };

        Ok(CatalogRules {
            marker: self.parser.marker.clone(),
            header_lines: self.parser.header_lines,
            bin_code: compile_pattern("parser.bin_code_pattern", &self.parser.bin_code_pattern, false)?,
            strip_phrase: self.parser.strip_phrase.clone(),
            classifier: Classifier::new(
                new_flyer,
                gillig,
                self.universal.keywords.clone(),
                fallback,
            ),
            short_description_min_length: self.short_description.min_length,
            retain_bin_code: self.output.retain_bin_code,
        })
    }
}

impl Validate for RulesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RulesConfig::from_toml_str("").unwrap();
        assert_eq!(config.parser.marker, "BRO");
        assert_eq!(config.parser.header_lines, 2);
        assert_eq!(config.universal.keywords.len(), 29);
        assert_eq!(config.short_description.min_length, 15);
        assert!(!config.output.retain_bin_code);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let toml_content = r#"
[brands]
gillig = ['\bGILLIG', '\bGIL\b']

[universal]
keywords = ["WIPER"]

[output]
retain_bin_code = true
"#;

        let config = RulesConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.brands.gillig.len(), 2);
        // Untouched sections keep their defaults.
        assert_eq!(config.brands.new_flyer.len(), 3);

        let rules = config.compile().unwrap();
        assert!(rules.retain_bin_code);
        assert_eq!(rules.classifier.classify("MIRROR GIL").category, Category::Gillig);
        assert_eq!(rules.classifier.classify("wiper arm").brand, "Generic");
        assert_eq!(rules.classifier.classify("BOLT").category, Category::Misc);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let toml_content = r#"
[brands]
new_flyer = ["(NEW FLYER"]
"#;

        let config = RulesConfig::from_toml_str(toml_content).unwrap();
        let err = config.compile().unwrap_err();
        assert!(matches!(err, EtlError::PatternError { ref field, .. } if field == "brands.new_flyer"));
    }

    #[test]
    fn test_fallback_pattern_needs_capture_group() {
        let toml_content = r#"
[fallback]
brand_pattern = "OEM ONLY"
"#;

        let config = RulesConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_empty_fallback_brand_can_stay_empty() {
        let defaults = RulesConfig::default().compile().unwrap();
        assert_eq!(defaults.classifier.classify("GASKET OEM ONLY, INC.").brand, "Genuine");

        let config = RulesConfig::from_toml_str("[fallback]\nempty_uses_default = false\n").unwrap();
        let rules = config.compile().unwrap();

        let c = rules.classifier.classify("GASKET OEM ONLY, INC.");
        assert_eq!(c.category, Category::Misc);
        assert_eq!(c.brand, "");
        let trailing = rules.classifier.classify("GASKET OEM ONLY ");
        assert_eq!(trailing.brand, "");
        // No marker at all still gets the default brand.
        assert_eq!(rules.classifier.classify("GASKET, DOOR").brand, "Genuine");
    }

    #[test]
    fn test_malformed_toml() {
        let err = RulesConfig::from_toml_str("[parser\nmarker = ").unwrap_err();
        assert!(matches!(err, EtlError::TomlError(_)));
    }

    #[test]
    fn test_rules_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[parser]\nmarker = \"PN\"\nheader_lines = 1\n")
            .unwrap();

        let config = RulesConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.parser.marker, "PN");
        assert_eq!(config.parser.header_lines, 1);
    }
}
