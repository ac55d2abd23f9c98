pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{user, Task, User};

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_against_dummy, verify_password};
pub use session::{end_session, Claims, SessionKeys, SESSION_COOKIE};

/// The user behind a valid session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

/// Checks a username/password pair against the stored hash.
///
/// An unknown username and a wrong password are indistinguishable to the
/// caller: both return `Ok(None)`, and both pay for one bcrypt verify.
pub async fn authenticate(
    pool: &DbPool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match user::get_by_username(pool, username).await? {
        Some(user) => user,
        None => {
            verify_against_dummy(password)?;
            return Ok(None);
        }
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Lets `task` through only when it belongs to `user_id`.
///
/// Someone else's task is reported exactly like a missing one, so task ids
/// reveal nothing about other accounts.
pub fn ensure_owner(task: Task, user_id: i64) -> Result<Task, AppError> {
    if task.user_id == user_id {
        Ok(task)
    } else {
        Err(AppError::NotFound("Task not found".into()))
    }
}
