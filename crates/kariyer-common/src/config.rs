//! Service configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and plain environment variables in
//! production. Precedence: env vars > .env file > config.toml > defaults.
//!
//! Variable names are flat and unprefixed (`JWT_SECRET`, `S3_BUCKET_NAME`, ...)
//! so existing deployments keep working unchanged.

use serde::Deserialize;
use std::sync::OnceLock;

pub use config::ConfigError;

pub const JWT_SECRET: &str = "JWT_SECRET";
pub const MAILJET_API_KEY: &str = "MAILJET_API_KEY";
pub const MAILJET_SECRET_KEY: &str = "MAILJET_SECRET_KEY";
pub const MAILJET_API_URL: &str = "MAILJET_API_URL";
pub const MAIL_SENDER_EMAIL: &str = "MAIL_SENDER_EMAIL";
pub const MAIL_SENDER_NAME: &str = "MAIL_SENDER_NAME";
pub const FRONTEND_BASE_URL: &str = "FRONTEND_BASE_URL";
pub const SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
pub const ENABLE_SLACK_NOTIFICATIONS: &str = "ENABLE_SLACK_NOTIFICATIONS";
pub const DOCUMENT_BASE_PATH: &str = "DOCUMENT_BASE_PATH";
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const S3_REGION: &str = "S3_REGION";
pub const S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
pub const S3_ACCESS_KEY_ID: &str = "S3_ACCESS_KEY_ID";
pub const S3_SECRET_KEY: &str = "S3_SECRET_KEY";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Get the global settings snapshot, if [`init`] has run.
pub fn get() -> Option<&'static Settings> {
    SETTINGS.get()
}

/// Initialize the global settings from the environment.
///
/// Should be called once at startup. Later calls return the first snapshot.
pub fn init() -> Result<&'static Settings, ConfigError> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }
    let settings = Settings::load()?;
    Ok(SETTINGS.get_or_init(|| settings))
}

/// Flat snapshot of every setting the library understands.
///
/// Field names are the lowercase form of the environment variable names.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// HS256 signing secret. There is deliberately no default; an unset or
    /// empty value makes token issuance fail.
    pub jwt_secret: Option<String>,
    pub mailjet_api_key: String,
    pub mailjet_secret_key: String,
    pub mailjet_api_url: String,
    pub mail_sender_email: String,
    pub mail_sender_name: String,
    pub frontend_base_url: String,
    pub slack_webhook_url: String,
    pub enable_slack_notifications: bool,
    pub document_base_path: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_bucket_name: String,
    pub s3_access_key_id: String,
    pub s3_secret_key: String,
}

impl Settings {
    /// Build a fresh snapshot without touching the global one.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let cfg = config::Config::builder()
            .set_default("mailjet_api_key", "")?
            .set_default("mailjet_secret_key", "")?
            .set_default("mailjet_api_url", "https://api.mailjet.com")?
            .set_default("mail_sender_email", "kariyerklubu.com@gmail.com")?
            .set_default("mail_sender_name", "kariyerklubu")?
            .set_default("frontend_base_url", "")?
            .set_default("slack_webhook_url", "")?
            .set_default("enable_slack_notifications", false)?
            .set_default("document_base_path", "test")?
            .set_default("s3_endpoint", "http://localhost:9000")?
            .set_default("s3_region", "us-east-1")?
            .set_default("s3_bucket_name", "kariyerklubu")?
            .set_default("s3_access_key_id", "minio")?
            .set_default("s3_secret_key", "minio123")?
            // Optional config file
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }

    /// Read an arbitrary variable from the live process environment.
    ///
    /// Unlike the snapshot fields this is resolved at call time.
    pub fn env(key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    pub fn mail(&self) -> MailSettings {
        MailSettings {
            api_key: self.mailjet_api_key.clone(),
            secret_key: self.mailjet_secret_key.clone(),
            api_url: self.mailjet_api_url.clone(),
            sender_email: self.mail_sender_email.clone(),
            sender_name: self.mail_sender_name.clone(),
        }
    }

    pub fn alert(&self) -> AlertSettings {
        AlertSettings {
            webhook_url: self.slack_webhook_url.clone(),
            enabled: self.enable_slack_notifications,
        }
    }

    pub fn storage(&self) -> StorageSettings {
        StorageSettings {
            endpoint: self.s3_endpoint.clone(),
            region: self.s3_region.clone(),
            bucket: self.s3_bucket_name.clone(),
            access_key: self.s3_access_key_id.clone(),
            secret_key: self.s3_secret_key.clone(),
            base_path: self.document_base_path.clone(),
        }
    }
}

/// Mailjet credentials and sender identity.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_key: String,
    pub secret_key: String,
    /// Base URL of the Send API, without the `/v3.1/send` suffix.
    pub api_url: String,
    pub sender_email: String,
    pub sender_name: String,
}

/// Slack incoming-webhook settings.
#[derive(Debug, Clone)]
pub struct AlertSettings {
    pub webhook_url: String,
    /// Feature flag; when false, notifications are dropped silently.
    pub enabled: bool,
}

/// S3-compatible object store settings.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Endpoint URL (e.g. `http://localhost:9000` for MinIO)
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Prefix prepended to every object key.
    pub base_path: String,
}
