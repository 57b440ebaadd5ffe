#[cfg(feature = "cli")]
pub mod cli;
pub mod policy;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "placekit")]
#[command(about = "Normalizes place API responses into one canonical shape")]
pub struct CliConfig {
    #[arg(long, default_value = "places_response.json")]
    pub input_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Process at most this many records")]
    pub max_records: Option<usize>,

    #[arg(long, help = "Prefer legacy fields when a record carries both formats")]
    pub prefer_legacy: bool,

    #[arg(long, help = "Fail on records with no recognizable format")]
    pub strict: bool,

    #[arg(long, help = "Bundle outputs into a single ZIP archive")]
    pub compress: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn max_records(&self) -> Option<usize> {
        self.max_records
    }

    fn prefer_legacy(&self) -> bool {
        self.prefer_legacy
    }

    fn strict(&self) -> bool {
        self.strict
    }

    fn compression(&self) -> bool {
        self.compress
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_path("input_path", &self.input_path)?;
        crate::utils::validation::validate_file_extensions(
            "input_path",
            std::slice::from_ref(&self.input_path),
            &["json"],
        )?;
        crate::utils::validation::validate_path("output_path", &self.output_path)?;

        let valid_formats = ["json", "csv"];
        for format in &self.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(crate::utils::error::PlacekitError::InvalidConfigValueError {
                    field: "output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        if let Some(max_records) = self.max_records {
            crate::utils::validation::validate_positive_number("max_records", max_records, 1)?;
        }

        Ok(())
    }
}
