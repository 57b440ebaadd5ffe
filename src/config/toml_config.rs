use crate::core::ConfigProvider;
use crate::utils::error::{PlacekitError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Which generation wins when a record carries both: "structured"
    /// (default) or "legacy".
    pub prefer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// "skip" (default) or "fail" for records in neither format.
    pub on_unrecognized_record: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlacekitError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlacekitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitutes `${VAR_NAME}` placeholders with process environment
    /// variables; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.source.r#type != "file" {
            return Err(PlacekitError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: self.source.r#type.clone(),
                reason: "Only 'file' sources are supported".to_string(),
            });
        }

        crate::utils::validation::validate_path("source.path", &self.source.path)?;
        crate::utils::validation::validate_file_extensions(
            "source.path",
            std::slice::from_ref(&self.source.path),
            &["json"],
        )?;

        crate::utils::validation::validate_path("load.output_path", &self.load.output_path)?;

        if self.load.output_formats.is_empty() {
            return Err(PlacekitError::ConfigValidationError {
                field: "load.output_formats".to_string(),
                message: "At least one output format is required".to_string(),
            });
        }

        let valid_formats = ["json", "csv"];
        for format in &self.load.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(PlacekitError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        if let Some(prefer) = &self.transform.prefer {
            if prefer != "structured" && prefer != "legacy" {
                return Err(PlacekitError::InvalidConfigValueError {
                    field: "transform.prefer".to_string(),
                    value: prefer.clone(),
                    reason: "Must be 'structured' or 'legacy'".to_string(),
                });
            }
        }

        if let Some(error_handling) = &self.error_handling {
            if let Some(policy) = &error_handling.on_unrecognized_record {
                if policy != "skip" && policy != "fail" {
                    return Err(PlacekitError::InvalidConfigValueError {
                        field: "error_handling.on_unrecognized_record".to_string(),
                        value: policy.clone(),
                        reason: "Must be 'skip' or 'fail'".to_string(),
                    });
                }
            }
        }

        if let Some(max_records) = self.extract.max_records {
            crate::utils::validation::validate_positive_number(
                "extract.max_records",
                max_records,
                1,
            )?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn max_records(&self) -> Option<usize> {
        self.extract.max_records
    }

    fn prefer_legacy(&self) -> bool {
        self.transform.prefer.as_deref() == Some("legacy")
    }

    fn strict(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_unrecognized_record.as_deref())
            == Some("fail")
    }

    fn compression(&self) -> bool {
        self.load
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "places-normalize"
description = "Normalize place responses"
version = "1.0.0"

[source]
type = "file"
path = "places_response.json"

[extract]
max_records = 100

[transform]
prefer = "structured"

[load]
output_path = "./test-output"
output_formats = ["json", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "places-normalize");
        assert_eq!(config.input_path(), "places_response.json");
        assert_eq!(config.max_records(), Some(100));
        assert!(!config.prefer_legacy());
        assert!(!config.strict());
        assert!(!config.compression());
    }

    #[test]
    fn test_prefer_legacy_and_strict_mode() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[source]
type = "file"
path = "input.json"

[extract]

[transform]
prefer = "legacy"

[load]
output_path = "./output"
output_formats = ["json"]

[error_handling]
on_unrecognized_record = "fail"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.prefer_legacy());
        assert!(config.strict());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_PLACES_INPUT", "regional_places.json");

        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[source]
type = "file"
path = "${TEST_PLACES_INPUT}"

[extract]

[transform]

[load]
output_path = "./output"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "regional_places.json");

        std::env::remove_var("TEST_PLACES_INPUT");
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[source]
type = "file"
path = "input.json"

[extract]

[transform]
prefer = "newest"

[load]
output_path = "./output"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_unknown_format() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[source]
type = "file"
path = "input.json"

[extract]

[transform]

[load]
output_path = "./output"
output_formats = ["xml"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_json_source() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[source]
type = "file"
path = "input.csv"

[extract]

[transform]

[load]
output_path = "./output"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"
description = "File test"
version = "1.0"

[source]
type = "file"
path = "input.json"

[extract]

[transform]

[load]
output_path = "./output"
output_formats = ["json"]

[load.compression]
enabled = true

[monitoring]
enabled = true
log_level = "debug"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert!(config.compression());
        assert!(config.monitoring_enabled());
    }
}
