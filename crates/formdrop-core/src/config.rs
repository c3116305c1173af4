//! Configuration module
//!
//! Settings for the HTTP server, the submission schema and the optional content store
//! connection. Everything is read from the environment (a `.env` file is loaded first).

use std::env;

use crate::submission::SubmissionSchema;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_SIZE_MB: usize = 40;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CMS_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_lowercase().as_str() {
            "compact" | "" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'compact' or 'json', got '{}'",
                other
            )),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_body_size_mb: usize,
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
}

/// External content store connection. Absent means validate-only mode.
#[derive(Clone, Debug)]
pub struct CmsConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct FormdropConfig {
    pub server: ServerConfig,
    pub caption_enabled: bool,
    pub cms: Option<CmsConfig>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FormdropConfig>);

impl Config {
    fn inner(&self) -> &FormdropConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = FormdropConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.inner().server.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().server.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().server.cors_origins
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.inner().server.max_body_size_mb * 1024 * 1024
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().server.request_timeout_secs
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().server.log_format
    }

    pub fn caption_enabled(&self) -> bool {
        self.inner().caption_enabled
    }

    /// Schema variant selected by `SUBMISSION_CAPTION_ENABLED`.
    pub fn submission_schema(&self) -> SubmissionSchema {
        if self.caption_enabled() {
            SubmissionSchema::with_caption()
        } else {
            SubmissionSchema::core()
        }
    }

    pub fn cms(&self) -> Option<&CmsConfig> {
        self.inner().cms.as_ref()
    }

    pub fn is_forwarding(&self) -> bool {
        self.cms().is_some()
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_bool(key: &str, value: &str) -> Result<bool, anyhow::Error> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!("{} must be a boolean, got '{}'", key, value)),
    }
}

impl FormdropConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = non_empty("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let log_format = match non_empty("LOG_FORMAT") {
            Some(format) => LogFormat::parse(&format)?,
            None => LogFormat::default(),
        };

        let server = ServerConfig {
            server_port,
            environment,
            cors_origins,
            max_body_size_mb: non_empty("MAX_BODY_SIZE_MB")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE_MB),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_format,
        };

        let caption_enabled = match non_empty("SUBMISSION_CAPTION_ENABLED") {
            Some(value) => parse_bool("SUBMISSION_CAPTION_ENABLED", &value)?,
            None => true,
        };

        let cms = non_empty("CMS_BASE_URL").map(|base_url| CmsConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_token: non_empty("CMS_API_TOKEN"),
            timeout_secs: non_empty("CMS_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_CMS_TIMEOUT_SECS),
        });

        Ok(FormdropConfig {
            server,
            caption_enabled,
            cms,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.max_body_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB must be greater than 0"));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be greater than 0"));
        }

        if let Some(cms) = &self.cms {
            if !(cms.base_url.starts_with("http://") || cms.base_url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "CMS_BASE_URL must start with http:// or https://"
                ));
            }
            if cms.timeout_secs == 0 {
                return Err(anyhow::anyhow!("CMS_TIMEOUT_SECS must be greater than 0"));
            }
        }

        Ok(())
    }
}
