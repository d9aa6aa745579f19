//! Intake endpoint configuration loaded from environment variables.
//!
//! | Env Var                | Required | Default        |
//! |------------------------|----------|----------------|
//! | `INTAKE_URL`           | yes      | --             |
//! | `INTAKE_ENCODING`      | no       | `multipart`    |
//! | `INTAKE_RESPONSE_MODE` | no       | `acknowledged` |

use reqwest::Url;

pub const ENV_INTAKE_URL: &str = "INTAKE_URL";
pub const ENV_INTAKE_ENCODING: &str = "INTAKE_ENCODING";
pub const ENV_INTAKE_RESPONSE_MODE: &str = "INTAKE_RESPONSE_MODE";

/// How the enquiry fields are encoded in the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEncoding {
    /// `multipart/form-data`.
    #[default]
    Multipart,
    /// `application/x-www-form-urlencoded`.
    UrlEncoded,
}

impl FieldEncoding {
    pub fn from_str_config(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multipart" => Some(Self::Multipart),
            "urlencoded" => Some(Self::UrlEncoded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multipart => "multipart",
            Self::UrlEncoded => "urlencoded",
        }
    }
}

/// How much of the intake response can be trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Status and JSON acknowledgment are inspected.
    #[default]
    Acknowledged,
    /// The response is treated as opaque: any completed request is an
    /// acceptance, matching a cross-origin `no-cors` submission.
    Opaque,
}

impl ResponseMode {
    pub fn from_str_config(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acknowledged" => Some(Self::Acknowledged),
            "opaque" => Some(Self::Opaque),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acknowledged => "acknowledged",
            Self::Opaque => "opaque",
        }
    }
}

/// Errors raised while reading intake configuration.
#[derive(Debug, thiserror::Error)]
pub enum IntakeConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where and how enquiries are delivered.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub url: Url,
    pub encoding: FieldEncoding,
    pub mode: ResponseMode,
}

impl IntakeConfig {
    /// Config for `url` with the default encoding and response mode.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            encoding: FieldEncoding::default(),
            mode: ResponseMode::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, IntakeConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IntakeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(ENV_INTAKE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(IntakeConfigError::Missing(ENV_INTAKE_URL))?;
        let url = parse_url(&raw_url)?;

        let encoding = match lookup(ENV_INTAKE_ENCODING) {
            Some(raw) => FieldEncoding::from_str_config(&raw).ok_or_else(|| {
                IntakeConfigError::Invalid {
                    var: ENV_INTAKE_ENCODING,
                    value: raw.clone(),
                    reason: "must be one of: multipart, urlencoded".to_string(),
                }
            })?,
            None => FieldEncoding::default(),
        };

        let mode = match lookup(ENV_INTAKE_RESPONSE_MODE) {
            Some(raw) => ResponseMode::from_str_config(&raw).ok_or_else(|| {
                IntakeConfigError::Invalid {
                    var: ENV_INTAKE_RESPONSE_MODE,
                    value: raw.clone(),
                    reason: "must be one of: acknowledged, opaque".to_string(),
                }
            })?,
            None => ResponseMode::default(),
        };

        Ok(Self {
            url,
            encoding,
            mode,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, IntakeConfigError> {
    let invalid = |reason: String| IntakeConfigError::Invalid {
        var: ENV_INTAKE_URL,
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
