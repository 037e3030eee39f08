use crate::core::area_grouper::UNASSIGNED_AREA;
use crate::core::output::SUPPORTED_FORMATS;
use crate::core::ConfigProvider;
use crate::utils::error::{LabelError, Result};
use crate::utils::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub horeca: HorecaConfig,
    pub nutritional: NutritionalConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HorecaConfig {
    pub labels_per_chunk: usize,
    /// Applied to ingredients that declare no per-label maximum.
    pub default_max_quantity_per_label: Option<Decimal>,
}

impl Default for HorecaConfig {
    fn default() -> Self {
        Self {
            labels_per_chunk: 150,
            default_max_quantity_per_label: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionalConfig {
    pub labels_per_chunk: usize,
    pub unassigned_area_name: String,
}

impl Default for NutritionalConfig {
    fn default() -> Self {
        Self {
            labels_per_chunk: 100,
            unassigned_area_name: UNASSIGNED_AREA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub archive: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: "./labels".to_string(),
            formats: vec!["csv".to_string()],
            archive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl LabelConfig {
    /// Loads and parses a TOML file. Missing sections fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LabelError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LabelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LabelError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_positive_number("horeca.labels_per_chunk", self.horeca.labels_per_chunk, 1)?;
        validation::validate_positive_number(
            "nutritional.labels_per_chunk",
            self.nutritional.labels_per_chunk,
            1,
        )?;
        validation::validate_non_empty_string(
            "nutritional.unassigned_area_name",
            &self.nutritional.unassigned_area_name,
        )?;

        if self.output.formats.is_empty() {
            return Err(LabelError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        validation::validate_allowed_values("output.formats", &self.output.formats, &SUPPORTED_FORMATS)?;

        if let Some(max) = self.horeca.default_max_quantity_per_label {
            if max <= Decimal::ZERO {
                return Err(LabelError::InvalidConfigValueError {
                    field: "horeca.default_max_quantity_per_label".to_string(),
                    value: max.to_string(),
                    reason: "Value must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for LabelConfig {
    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn archive_output(&self) -> bool {
        self.output.archive
    }

    fn horeca_labels_per_chunk(&self) -> usize {
        self.horeca.labels_per_chunk
    }

    fn default_max_quantity_per_label(&self) -> Option<Decimal> {
        self.horeca.default_max_quantity_per_label
    }

    fn nutritional_labels_per_chunk(&self) -> usize {
        self.nutritional.labels_per_chunk
    }

    fn unassigned_area_name(&self) -> &str {
        &self.nutritional.unassigned_area_name
    }
}

impl Validate for LabelConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
