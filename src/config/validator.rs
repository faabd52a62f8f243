use thiserror::Error;

use crate::config::{GeneratorConfig, ProjectSettings, ServerSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_generator(&settings.generator) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_projects(&settings.projects) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_generator(generator: &GeneratorConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if generator.max_array_size == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generator.max_array_size".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&generator.optional_omit_probability) {
            errors.push(ValidationError::InvalidValue {
                field: "generator.optional_omit_probability".to_string(),
                reason: "Must be between 0.0 and 1.0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_projects(projects: &ProjectSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if projects.default_expiration_hours == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "projects.default_expiration_hours".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if projects.max_projects == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "projects.max_projects".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if projects.cleanup_interval_seconds == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "projects.cleanup_interval_seconds".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if projects.base_url.is_empty() {
            errors.push(ValidationError::MissingField("projects.base_url".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
