use crate::core::classify::IntronProximityClassifier;
use crate::core::filter::FrequencyFilter;
use crate::domain::model::{FilterCriterion, ReportField};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_threshold, Validate};
use serde::Deserialize;
use std::path::Path;

/// Tunable report settings. Every section is optional; missing ones fall
/// back to the standard exome report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub filter: FilterConfig,
    pub intronic: IntronicConfig,
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub criteria: Vec<CriterionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CriterionConfig {
    pub field: String,
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntronicConfig {
    pub donor_max_offset: u64,
    pub acceptor_max_offset: u64,
    pub marker: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub enabled: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let criteria = FrequencyFilter::default()
            .criteria()
            .iter()
            .map(|c| CriterionConfig {
                field: c.field.source_name().to_string(),
                threshold: c.threshold,
            })
            .collect();
        Self { criteria }
    }
}

impl Default for IntronicConfig {
    fn default() -> Self {
        Self {
            donor_max_offset: 6,
            acceptor_max_offset: 20,
            marker: "u".to_string(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ReportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn criteria(&self) -> Result<Vec<FilterCriterion>> {
        self.filter
            .criteria
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let key = format!("filter.criteria[{}].field", i);
                let field = c.field.parse::<ReportField>().map_err(|reason| {
                    ReportError::InvalidConfigValueError {
                        field: key.clone(),
                        value: c.field.clone(),
                        reason,
                    }
                })?;
                if !field.is_frequency() {
                    return Err(ReportError::InvalidConfigValueError {
                        field: key,
                        value: c.field.clone(),
                        reason: "not a population-frequency column".to_string(),
                    });
                }
                validate_threshold(&format!("filter.criteria[{}].threshold", i), c.threshold)?;
                Ok(FilterCriterion::new(field, c.threshold))
            })
            .collect()
    }

    pub fn frequency_filter(&self) -> Result<FrequencyFilter> {
        Ok(FrequencyFilter::new(self.criteria()?))
    }

    pub fn classifier(&self) -> IntronProximityClassifier {
        IntronProximityClassifier::new(
            self.intronic.donor_max_offset,
            self.intronic.acceptor_max_offset,
        )
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        self.criteria()?;
        validate_non_empty_string("intronic.marker", &self.intronic.marker)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.criteria().unwrap(),
            FrequencyFilter::default().criteria().to_vec()
        );
        assert_eq!(config.intronic.marker, "u");
        assert!(config.panel.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[[filter.criteria]]
field = "ExAC_NFE"
threshold = 0.02

[intronic]
donor_max_offset = 10
acceptor_max_offset = 30
marker = "x"

[panel]
enabled = false
"#;
        let config = ReportConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.criteria().unwrap(),
            vec![FilterCriterion::new(ReportField::ExacNfe, 0.02)]
        );
        assert_eq!(config.intronic.donor_max_offset, 10);
        assert!(!config.panel.enabled);
        assert!(config.classifier().is_deep_intronic("c.1-31"));
        assert!(!config.classifier().is_deep_intronic("c.1-30"));
    }

    #[test]
    fn test_partial_intronic_section() {
        let config = ReportConfig::from_toml_str("[intronic]\nmarker = \"D\"\n").unwrap();
        assert_eq!(config.intronic.donor_max_offset, 6);
        assert_eq!(config.intronic.marker, "D");
    }

    #[test]
    fn test_rejects_unknown_field() {
        let config = ReportConfig::from_toml_str(
            "[[filter.criteria]]\nfield = \"gnomAD\"\nthreshold = 0.1\n",
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_non_frequency_field() {
        let config = ReportConfig::from_toml_str(
            "[[filter.criteria]]\nfield = \"Gene\"\nthreshold = 0.1\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_threshold_and_empty_marker() {
        let config = ReportConfig::from_toml_str(
            "[[filter.criteria]]\nfield = \"1000g\"\nthreshold = -1.0\n",
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = ReportConfig::from_toml_str("[intronic]\nmarker = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_syntax_error() {
        let err = ReportConfig::from_toml_str("[filter").unwrap_err();
        assert!(matches!(err, ReportError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[panel]\nenabled = false\n")
            .unwrap();
        let config = ReportConfig::from_file(temp_file.path()).unwrap();
        assert!(!config.panel.enabled);
    }
}
