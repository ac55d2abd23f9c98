//! Outgoing mail.
//!
//! Messages are built with `lettre` and sent through an SMTP relay when one is
//! configured. Without `SMTP_HOST` the message is logged instead of sent,
//! which is what development and the test suite use.

use std::time::Duration;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::error::AppError;
use crate::models::User;
use crate::views::escape;

/// How long a single SMTP exchange may take before it is abandoned.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// An email ready to be sent.
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// Builds the message sent after a successful registration.
pub fn welcome_email(user: &User) -> Email {
    Email {
        to: user.email.clone(),
        subject: "Welcome to Tasklog".to_string(),
        body: format!(
            "<h1>Welcome, {}!</h1><p>Your account is ready. Log in any time to keep track of your tasks.</p>",
            escape(&user.username)
        ),
    }
}

#[derive(Clone)]
pub struct Mailer {
    sender: String,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, AppError> {
        let transport = match &config.host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| {
                        AppError::Configuration(format!("Invalid SMTP host {}: {}", host, e))
                    })?
                    .port(config.port);
                if let (Some(username), Some(password)) = (&config.username, &config.password) {
                    builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
                }
                log::info!("Mail goes through {}:{}", host, config.port);
                Some(builder.build())
            }
            None => {
                log::warn!("SMTP_HOST not set; emails will be logged, not sent");
                None
            }
        };

        Ok(Self {
            sender: config.sender.clone(),
            transport,
        })
    }

    /// A mailer that only logs what it would send.
    pub fn log_only(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            transport: None,
        }
    }

    fn build(&self, email: &Email) -> Result<Message, AppError> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e| AppError::InternalServerError(format!("Invalid sender address: {}", e)))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::InternalServerError(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.body.clone())
            .map_err(|e| AppError::InternalServerError(format!("Failed to build email: {}", e)))
    }

    pub async fn send(&self, email: &Email) -> Result<(), AppError> {
        let message = self.build(email)?;

        match &self.transport {
            Some(transport) => {
                tokio::time::timeout(SEND_TIMEOUT, transport.send(message))
                    .await
                    .map_err(|_| {
                        AppError::InternalServerError("Timed out sending email".to_string())
                    })?
                    .map_err(|e| {
                        AppError::InternalServerError(format!("Failed to send email: {}", e))
                    })?;
                log::info!("Sent \"{}\" to {}", email.subject, email.to);
            }
            None => {
                log::info!(
                    "=== EMAIL (not sent) ===\nFrom: {}\nTo: {}\nSubject: {}\n{}",
                    self.sender,
                    email.to,
                    email.subject,
                    email.body
                );
            }
        }
        Ok(())
    }

    /// Sends `email` on a separate task. The caller never waits for the mail
    /// server, and failures are only logged.
    pub fn send_in_background(&self, email: Email) {
        let mailer = self.clone();
        actix_web::rt::spawn(async move {
            if let Err(e) = mailer.send(&email).await {
                log::error!("Could not deliver \"{}\" to {}: {}", email.subject, email.to, e);
            }
        });
    }
}
