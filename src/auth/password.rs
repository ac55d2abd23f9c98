use crate::error::AppError;
use bcrypt::{hash, verify};
use lazy_static::lazy_static;

/// bcrypt work factor for stored passwords.
pub const PASSWORD_COST: u32 = 12;

lazy_static! {
    // Stand-in hash checked when a login names no existing user.
    static ref DUMMY_HASH: Option<String> = hash("tasklog-no-such-user", PASSWORD_COST).ok();
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, PASSWORD_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Spends the same bcrypt work as `verify_password` on a known account, so a
/// missing user cannot be told apart by response time.
pub fn verify_against_dummy(password: &str) -> Result<(), AppError> {
    match DUMMY_HASH.as_deref() {
        Some(dummy) => verify_password(password, dummy).map(|_| ()),
        None => Err(AppError::InternalServerError(
            "Failed to prepare dummy password hash".into(),
        )),
    }
}
