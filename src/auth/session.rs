//! Login sessions.
//!
//! A session is a signed JWT kept in an HttpOnly cookie. The token carries the
//! user id and username, so protected pages can be rendered without looking the
//! user up again. Logging out replaces the cookie with an expired one.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::SessionUser;
use crate::error::AppError;
use crate::models::User;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token, the user's identifier.
    pub sub: i64,
    /// Username, for display.
    pub name: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Key material and lifetime for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: chrono::Duration::hours(lifetime_hours),
        }
    }

    /// Signs a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let expiration = (chrono::Utc::now() + self.lifetime).timestamp().max(0) as usize;

        let claims = Claims {
            sub: user.id,
            name: user.username.clone(),
            exp: expiration,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verifies a token and returns the user it was issued to.
    ///
    /// Malformed, tampered or expired tokens all yield `None`.
    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        match decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(SessionUser {
                id: data.claims.sub,
                username: data.claims.name,
            }),
            Err(e) => {
                log::debug!("Rejected session token: {}", e);
                None
            }
        }
    }

    /// Starts a session for `user`, returning the cookie to set on the response.
    pub fn start_session(&self, user: &User) -> Result<Cookie<'static>, AppError> {
        let token = self.issue(user)?;
        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish())
    }

    /// Reads the session cookie of `req`, if it holds a valid token.
    pub fn current_session(&self, req: &HttpRequest) -> Option<SessionUser> {
        req.cookie(SESSION_COOKIE)
            .and_then(|cookie| self.verify(cookie.value()))
    }
}

/// Returns a cookie that clears the session in the browser.
pub fn end_session() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}
