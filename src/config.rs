// src/config.rs
use std::env;

/// Mailer credentials for the Brevo transactional API.
/// When absent, reset links are logged instead of mailed.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, e.g. "127.0.0.1:3000".
    pub addr: String,
    /// SQLite database file path.
    pub db_path: String,
    /// Absolute base URL used when building links in outbound mail.
    pub base_url: String,
    pub mailer: Option<MailerConfig>,
}

impl AppConfig {
    /// Load configuration from the environment (after dotenvy has run).
    pub fn from_env() -> Self {
        let mailer = match env::var("BREVO_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => Some(MailerConfig {
                api_key,
                sender_email: env::var("BREVO_SENDER_EMAIL")
                    .unwrap_or_else(|_| "no-reply@leadledger.local".to_string()),
                sender_name: env::var("BREVO_SENDER_NAME")
                    .unwrap_or_else(|_| "LeadLedger".to_string()),
            }),
            _ => None,
        };

        Self {
            addr: env::var("LEADLEDGER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            db_path: env::var("LEADLEDGER_DB").unwrap_or_else(|_| "leadledger.sqlite3".to_string()),
            base_url: env::var("LEADLEDGER_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
            mailer,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            db_path: "leadledger.sqlite3".to_string(),
            base_url: "http://127.0.0.1:3000".to_string(),
            mailer: None,
        }
    }
}
