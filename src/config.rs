use std::env;

use crate::error::AppError;

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub secret_key: String,
    pub session_hours: i64,
    pub tasks_per_page: i64,
    pub smtp: SmtpConfig,
}

/// Outgoing mail settings. Without a host the mailer only logs messages.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let secret_key = env::var("SECRET_KEY")
            .map_err(|_| AppError::Configuration("SECRET_KEY must be set".into()))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tasklog.db".to_string()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            secret_key,
            session_hours: parse_var("SESSION_HOURS", 24)?,
            tasks_per_page: parse_var("TASKS_PER_PAGE", 5)?,
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
                port: parse_var("SMTP_PORT", 587)?,
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
                sender: env::var("MAIL_SENDER")
                    .unwrap_or_else(|_| "noreply@tasklog.local".to_string()),
            },
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a number", name))),
        Err(_) => Ok(default),
    }
}
