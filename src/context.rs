//! Shared application state, handed to every handler as `web::Data<AppContext>`.

use crate::auth::SessionKeys;
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::error::AppError;
use crate::mail::Mailer;

pub struct AppContext {
    pub pool: DbPool,
    pub sessions: SessionKeys,
    pub mailer: Mailer,
    pub tasks_per_page: i64,
}

impl AppContext {
    pub fn new(pool: DbPool, sessions: SessionKeys, mailer: Mailer, tasks_per_page: i64) -> Self {
        Self {
            pool,
            sessions,
            mailer,
            tasks_per_page: tasks_per_page.max(1),
        }
    }

    /// Connects to the database, brings the schema up to date and wires up
    /// sessions and mail from `config`.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;

        Ok(Self::new(
            pool,
            SessionKeys::new(&config.secret_key, config.session_hours),
            Mailer::from_config(&config.smtp)?,
            config.tasks_per_page,
        ))
    }
}
