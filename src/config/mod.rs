use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::form::{FormSettings, VOID_MESSAGE_TYPE};
use self::validator::{ConfigValidator, ValidationError};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub form: FormSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Where file sets come from
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceSettings {
    /// Base path of the service, e.g. "http://localhost:8080/music"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_path: Option<String>,
    /// Extra origins, e.g. "https://api.example.com", whose services may be
    /// named per request. The origin of `service_path` is always allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,
}

impl SourceSettings {
    /// Service path for one request.
    ///
    /// Without a request value the configured path is used. A request value
    /// is either an absolute path on the configured origin (`/other`) or a
    /// full http(s) URL on an allowed origin; anything else is rejected.
    pub fn resolve_service_path(&self, requested: Option<&str>) -> Result<String, ValidationError> {
        let Some(requested) = requested else {
            return self
                .service_path
                .clone()
                .ok_or_else(|| ValidationError::MissingField("service_path".to_string()));
        };

        let url = if requested.starts_with('/') && !requested.starts_with("//") {
            let base = self
                .service_path
                .as_deref()
                .ok_or_else(|| ValidationError::InvalidValue {
                    field: "service_path".to_string(),
                    reason: format!("'{}' is relative but no service_path is configured", requested),
                })?;
            let base = ConfigValidator::validate_service_url("source.service_path", base)?;
            base.join(requested).map_err(|e| ValidationError::InvalidValue {
                field: "service_path".to_string(),
                reason: e.to_string(),
            })?
        } else {
            ConfigValidator::validate_service_url("service_path", requested)?
        };

        if !self.is_allowed(&url) {
            return Err(ValidationError::InvalidValue {
                field: "service_path".to_string(),
                reason: format!("origin of '{}' is not allowed", requested),
            });
        }
        Ok(url.to_string())
    }

    fn is_allowed(&self, url: &reqwest::Url) -> bool {
        let origin = url.origin();
        self.service_path
            .iter()
            .chain(self.allowed_origins.iter())
            .filter_map(|allowed| reqwest::Url::parse(allowed).ok())
            .any(|allowed| allowed.origin() == origin)
    }
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder(&cli.config)?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("protoform");
        let s = Self::builder(&config_path)?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder(config_path: &Path) -> Result<Config, anyhow::Error> {
        Ok(Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("form.void_message_type", VOID_MESSAGE_TYPE)?
            .set_default("form.package_match", "prefix")?
            .build()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(service_path) = &cli.service_path {
            self.source.service_path = Some(service_path.clone());
        }
        if let Some(void_message_type) = &cli.void_message_type {
            self.form.void_message_type = void_message_type.clone();
        }
        if let Some(package_match) = cli.package_match {
            self.form.package_match = package_match.into();
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
