//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Levels accepted by the log filter.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A capture older than this is unlikely to reflect what the user meant.
const LONG_CAPTURE_TTL_SECONDS: u64 = 600;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse errors into a single [`ConfigError::Invalid`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_storage(config, &mut result);
        Self::validate_learning(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        let storage = &config.storage;

        if storage.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "storage.path",
                "Storage path cannot be empty",
            ));
        }

        for (path, record) in [
            ("storage.mappings_record", &storage.mappings_record),
            ("storage.profile_record", &storage.profile_record),
        ] {
            if record.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Record name cannot be empty"));
            }
        }

        if storage.mappings_record == storage.profile_record {
            result.add_error(ValidationError::new(
                "storage",
                format!(
                    "mappings_record and profile_record are both '{}'",
                    storage.mappings_record
                ),
            ));
        }
    }

    fn validate_learning(config: &Config, result: &mut ValidationResult) {
        let ttl = config.learning.capture_ttl_seconds;
        if ttl == 0 {
            result.add_error(ValidationError::new(
                "learning.capture_ttl_seconds",
                "capture_ttl_seconds must be greater than 0",
            ));
        } else if ttl > LONG_CAPTURE_TTL_SECONDS {
            result.add_warning(ValidationWarning::new(
                "learning.capture_ttl_seconds",
                format!(
                    "capture_ttl_seconds is very high (>{}), stale captures may be bound",
                    LONG_CAPTURE_TTL_SECONDS
                ),
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let logging = &config.logging;

        if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    logging.level, LOG_LEVELS
                ),
            ));
        }

        if logging.file_output {
            if logging.directory.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "logging.directory",
                    "Log directory cannot be empty when file_output is enabled",
                ));
            }
            if logging.max_files == 0 {
                result.add_warning(ValidationWarning::new(
                    "logging.max_files",
                    "max_files is 0, rotated log files will never be pruned",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
