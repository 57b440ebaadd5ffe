use crate::utils::error::{PlacekitError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Identifier of the one plugin the default policy configures: strips
/// console calls from emitted output in production builds.
pub const REMOVE_CONSOLE_PLUGIN: &str = "transform-remove-console";

/// One plugin entry as the external build tool expects it on the wire:
/// either a bare identifier or an `[identifier, options]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginEntry {
    Name(String),
    WithOptions(String, PluginOptions),
}

impl PluginEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::WithOptions(name, _) => name,
        }
    }

    pub fn options(&self) -> Option<&PluginOptions> {
        match self {
            Self::Name(_) => None,
            Self::WithOptions(_, options) => Some(options),
        }
    }
}

/// Per-plugin options. `exclude` is the one option the known plugin takes
/// (console method names left untouched); anything else rides along in the
/// open map so unknown plugin options survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvOverride {
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// Environment-conditioned transform configuration for the external build
/// tool. Constructed once at start-up and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformPolicy {
    /// Base plugins applied in every environment. Empty in the default
    /// policy.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
    /// Per-environment overrides, keyed by exact environment name.
    #[serde(default)]
    pub env: HashMap<String, EnvOverride>,
}

impl Default for TransformPolicy {
    /// The shipped policy: production builds drop console output but keep
    /// `console.error` and `console.warn` calls untouched.
    fn default() -> Self {
        let mut env = HashMap::new();
        env.insert(
            "production".to_string(),
            EnvOverride {
                plugins: vec![PluginEntry::WithOptions(
                    REMOVE_CONSOLE_PLUGIN.to_string(),
                    PluginOptions {
                        exclude: vec!["error".to_string(), "warn".to_string()],
                        extra: HashMap::new(),
                    },
                )],
            },
        );

        Self {
            plugins: Vec::new(),
            env,
        }
    }
}

impl TransformPolicy {
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

    /// Resolves the ordered plugin list for a build environment.
    ///
    /// The lookup is exact and case-sensitive. An environment with no
    /// override receives the base list unchanged; with the default policy
    /// that means no transforms at all. Never an error.
    pub fn resolve(&self, environment: &str) -> Vec<PluginEntry> {
        let mut plugins = self.plugins.clone();
        if let Some(override_entry) = self.env.get(environment) {
            plugins.extend(override_entry.plugins.iter().cloned());
        }
        plugins
    }

    pub fn environments(&self) -> Vec<&str> {
        self.env.keys().map(String::as_str).collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        for entry in self.plugins.iter() {
            Self::validate_entry("plugins", entry)?;
        }

        for (env_name, override_entry) in &self.env {
            validate_non_empty_string("env", env_name)?;

            let field = format!("env.{}.plugins", env_name);
            for entry in &override_entry.plugins {
                Self::validate_entry(&field, entry)?;
            }
        }

        Ok(())
    }

    fn validate_entry(field: &str, entry: &PluginEntry) -> Result<()> {
        validate_non_empty_string(field, entry.name())?;

        if let Some(options) = entry.options() {
            for method in &options.exclude {
                validate_non_empty_string(&format!("{}.exclude", field), method)?;
            }
        }

        Ok(())
    }
}

impl Validate for TransformPolicy {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
