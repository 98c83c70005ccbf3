//! Server configuration loaded from environment variables.

use axum::http::HeaderValue;
use camino::Utf8PathBuf;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_MEDIA_URL_TTL_SECS: i64 = 365 * 24 * 60 * 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_JWT_EXPIRY_MINS: i64 = 60;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// An explicit allow-list.
    List(Vec<HeaderValue>),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Bounds applied to task submissions at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    /// Maximum review text length, in characters.
    pub review_text_max_chars: usize,
    /// Maximum number of photo links.
    pub max_images: usize,
    /// Maximum number of screenshot links.
    pub max_screenshots: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            review_text_max_chars: 500,
            max_images: 3,
            max_screenshots: 3,
        }
    }
}

impl SubmissionLimits {
    /// Checks submission content against the limits.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message naming the first violated bound.
    pub fn check(
        &self,
        review_text: &str,
        image_urls: &[String],
        screenshot_urls: &[String],
    ) -> Result<(), String> {
        if review_text.trim().is_empty() {
            return Err("reviewText must not be empty".to_owned());
        }
        if review_text.chars().count() > self.review_text_max_chars {
            return Err(format!(
                "reviewText must be at most {} characters",
                self.review_text_max_chars
            ));
        }
        if image_urls.is_empty() || image_urls.len() > self.max_images {
            return Err(format!(
                "imageUrls must contain between 1 and {} entries",
                self.max_images
            ));
        }
        if screenshot_urls.len() > self.max_screenshots {
            return Err(format!(
                "screenshotUrls must contain at most {} entries",
                self.max_screenshots
            ));
        }
        if image_urls
            .iter()
            .chain(screenshot_urls)
            .any(|url| url.trim().is_empty())
        {
            return Err("file links must not be empty".to_owned());
        }
        Ok(())
    }
}

/// Complete server configuration.
///
/// | Variable | Default |
/// |---|---|
/// | `HOST` | `0.0.0.0` |
/// | `PORT` | `8000` |
/// | `CORS_ORIGINS` | `*` |
/// | `REQUEST_TIMEOUT_SECS` | `30` |
/// | `DATABASE_URL` | unset (in-memory store) |
/// | `DATABASE_POOL_SIZE` | `8` |
/// | `MEDIA_ROOT` | unset (in-memory object store) |
/// | `PUBLIC_BASE_URL` | `http://localhost:<PORT>` |
/// | `MEDIA_SIGNING_SECRET` | value of `JWT_SECRET` |
/// | `MEDIA_URL_TTL_SECS` | one year |
/// | `MAX_UPLOAD_BYTES` | 10 MiB |
/// | `JWT_SECRET` | required |
/// | `JWT_EXPIRY_MINS` | `60` |
/// | `SEED_ON_STARTUP` | `false` |
/// | `REVIEW_TEXT_MAX_CHARS` | `500` |
/// | `MAX_IMAGES` | `3` |
/// | `MAX_SCREENSHOTS` | `3` |
/// | `LOG_FORMAT` | `text` |
#[derive(Clone)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// CORS allow-list.
    pub cors_origins: CorsOrigins,
    /// Per-request timeout.
    pub request_timeout: std::time::Duration,
    /// `PostgreSQL` connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub database_pool_size: u32,
    /// Directory for uploaded files; kept in memory when unset.
    pub media_root: Option<Utf8PathBuf>,
    /// Base URL used in signed download links.
    pub public_base_url: String,
    /// Secret for signing download links.
    pub media_signing_secret: String,
    /// Lifetime of signed download links.
    pub media_url_ttl: chrono::Duration,
    /// Largest accepted request body on the upload route.
    pub max_upload_bytes: usize,
    /// Secret for signing access tokens.
    pub jwt_secret: String,
    /// Lifetime of access tokens.
    pub jwt_expiry: chrono::Duration,
    /// Whether to write sample postings into an empty catalog at start-up.
    pub seed_on_startup: bool,
    /// Submission bounds.
    pub limits: SubmissionLimits,
    /// Log output format.
    pub log_format: LogFormat,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout", &self.request_timeout)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_pool_size", &self.database_pool_size)
            .field("media_root", &self.media_root)
            .field("public_base_url", &self.public_base_url)
            .field("media_url_ttl", &self.media_url_ttl)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("jwt_expiry", &self.jwt_expiry)
            .field("seed_on_startup", &self.seed_on_startup)
            .field("limits", &self.limits)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = parse_or(var("PORT"), "PORT", DEFAULT_PORT)?;
        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt_expiry_mins = parse_or(var("JWT_EXPIRY_MINS"), "JWT_EXPIRY_MINS", DEFAULT_JWT_EXPIRY_MINS)?;
        let media_url_ttl_secs = parse_or(
            var("MEDIA_URL_TTL_SECS"),
            "MEDIA_URL_TTL_SECS",
            DEFAULT_MEDIA_URL_TTL_SECS,
        )?;
        let defaults = SubmissionLimits::default();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            cors_origins: parse_cors_origins(var("CORS_ORIGINS"))?,
            request_timeout: std::time::Duration::from_secs(parse_or(
                var("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            database_url: var("DATABASE_URL"),
            database_pool_size: parse_or(
                var("DATABASE_POOL_SIZE"),
                "DATABASE_POOL_SIZE",
                DEFAULT_POOL_SIZE,
            )?,
            media_root: var("MEDIA_ROOT").map(Utf8PathBuf::from),
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            media_signing_secret: var("MEDIA_SIGNING_SECRET").unwrap_or_else(|| jwt_secret.clone()),
            media_url_ttl: positive_duration("MEDIA_URL_TTL_SECS", media_url_ttl_secs, chrono::Duration::try_seconds)?,
            max_upload_bytes: parse_or(
                var("MAX_UPLOAD_BYTES"),
                "MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            jwt_secret,
            jwt_expiry: positive_duration("JWT_EXPIRY_MINS", jwt_expiry_mins, chrono::Duration::try_minutes)?,
            seed_on_startup: parse_flag(var("SEED_ON_STARTUP"), "SEED_ON_STARTUP")?,
            limits: SubmissionLimits {
                review_text_max_chars: parse_or(
                    var("REVIEW_TEXT_MAX_CHARS"),
                    "REVIEW_TEXT_MAX_CHARS",
                    defaults.review_text_max_chars,
                )?,
                max_images: parse_or(var("MAX_IMAGES"), "MAX_IMAGES", defaults.max_images)?,
                max_screenshots: parse_or(
                    var("MAX_SCREENSHOTS"),
                    "MAX_SCREENSHOTS",
                    defaults.max_screenshots,
                )?,
            },
            log_format: parse_log_format(var("LOG_FORMAT"))?,
        })
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
        })
    })
}

fn positive_duration(
    name: &'static str,
    amount: i64,
    build: fn(i64) -> Option<chrono::Duration>,
) -> Result<chrono::Duration, ConfigError> {
    build(amount)
        .filter(|duration| *duration > chrono::Duration::zero())
        .ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("{amount} is not a positive duration"),
        })
}

fn parse_flag(raw: Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("'{value}' is not a boolean"),
        }),
    }
}

fn parse_cors_origins(raw: Option<String>) -> Result<CorsOrigins, ConfigError> {
    let Some(value) = raw else {
        return Ok(CorsOrigins::Any);
    };
    if value.trim() == "*" {
        return Ok(CorsOrigins::Any);
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|err| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                reason: format!("'{origin}': {err}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

fn parse_log_format(raw: Option<String>) -> Result<LogFormat, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("text" | "pretty") => Ok(LogFormat::Text),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(ConfigError::Invalid {
            name: "LOG_FORMAT",
            reason: format!("'{other}' is neither text nor json"),
        }),
    }
}
