use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("No labels to generate: {message}")]
    EmptyResult { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl LabelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LabelError::ConfigError { .. }
            | LabelError::ConfigValidationError { .. }
            | LabelError::InvalidConfigValueError { .. }
            | LabelError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LabelError::EmptyResult { .. }
            | LabelError::ValidationError { .. }
            | LabelError::SerializationError(_) => ErrorCategory::Data,
            LabelError::ZipError(_) | LabelError::CsvError(_) | LabelError::IoError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // nothing to print fails the run but is not a crash
            LabelError::EmptyResult { .. }
            | LabelError::ValidationError { .. }
            | LabelError::SerializationError(_) => ErrorSeverity::Medium,
            LabelError::ConfigError { .. }
            | LabelError::ConfigValidationError { .. }
            | LabelError::InvalidConfigValueError { .. }
            | LabelError::MissingConfigError { .. }
            | LabelError::CsvError(_) => ErrorSeverity::High,
            LabelError::ZipError(_) | LabelError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LabelError::EmptyResult { message } => message.clone(),
            LabelError::ConfigError { message } => format!("Configuración inválida: {}", message),
            LabelError::ConfigValidationError { field, message } => {
                format!("Configuración inválida en '{}': {}", field, message)
            }
            LabelError::InvalidConfigValueError { field, value, reason } => {
                format!("Valor '{}' inválido para '{}': {}", value, field, reason)
            }
            LabelError::MissingConfigError { field } => {
                format!("Falta el campo de configuración '{}'", field)
            }
            LabelError::ValidationError { message } => format!("Datos inválidos: {}", message),
            LabelError::SerializationError(e) => format!("No se pudo leer el archivo de datos: {}", e),
            LabelError::CsvError(e) => format!("Error al escribir etiquetas CSV: {}", e),
            LabelError::ZipError(e) => format!("Error al crear el archivo ZIP: {}", e),
            LabelError::IoError(e) => format!("Error de archivo: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the TOML configuration file and CLI arguments",
            ErrorCategory::Data => {
                "Verify the requested ids exist in the snapshot and have label data enabled"
            }
            ErrorCategory::Output => "Check that the output path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
