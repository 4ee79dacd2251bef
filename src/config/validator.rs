use reqwest::Url;
use thiserror::Error;

use crate::config::{ServerSettings, Settings, SourceSettings};
use crate::form::FormSettings;

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

        if let Err(e) = Self::validate_source(&settings.source) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_form(&settings.form) {
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

    /// Parse a service path or origin, accepting only absolute http(s) URLs
    pub fn validate_service_url(field: &str, value: &str) -> Result<Url, ValidationError> {
        let invalid = || ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{}' is not an http(s) URL", value),
        };

        let url = Url::parse(value).map_err(|_| invalid())?;
        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(url),
            _ => Err(invalid()),
        }
    }

    fn validate_source(source: &SourceSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(service_path) = &source.service_path {
            if let Err(e) = Self::validate_service_url("source.service_path", service_path) {
                errors.push(e);
            }
        }

        for origin in &source.allowed_origins {
            if let Err(e) = Self::validate_service_url("source.allowed_origins", origin) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(form: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.void_message_type.trim().is_empty() {
            errors.push(ValidationError::MissingField("form.void_message_type".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
