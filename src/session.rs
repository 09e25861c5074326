//! Cookie-backed sessions.
//!
//! On login the handler serializes a minimal identity (user id + display
//! name) into signed HS256 claims and hands the browser a `session` cookie
//! holding the token. The cookie payload is signed, not encrypted, and the
//! cookie carries no Max-Age so it lives for the browser session. Requests
//! without a valid token are simply unauthenticated; no error is raised.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::HttpRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::{SessionUser, User};

pub const SESSION_COOKIE: &str = "session";

const SESSION_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // user id (ObjectId hex)
    pub name: String, // display label
    pub iat: usize,
    pub exp: usize,
}

/// Sign a session token for a freshly authenticated user.
pub fn issue(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    let claims = Claims {
        sub: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: user.label(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(SESSION_HOURS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a session token and return its claims.
pub fn validate(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Restore the request-scoped identity from the session cookie.
///
/// Missing, tampered, or expired cookies all mean "not signed in".
pub fn current_user(req: &HttpRequest, config: &AppConfig) -> Option<SessionUser> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let claims = validate(cookie.value(), &config.session_secret).ok()?;

    Some(SessionUser {
        id: claims.sub,
        name: claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn test_user() -> User {
        User {
            id: Some(ObjectId::new()),
            username: Some("ada@example.com".to_string()),
            password_hash: Some("$2b$12$irrelevant".to_string()),
            google_id: None,
            display_name: None,
            secret: None,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let user = test_user();
        let token = issue(&user, "test-secret").expect("should sign token");

        let claims = validate(&token, "test-secret").expect("should validate token");
        assert_eq!(claims.sub, user.id.unwrap().to_hex());
        assert_eq!(claims.name, "ada@example.com");
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate("not-a-token", "test-secret").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(&test_user(), "test-secret").expect("should sign token");
        assert!(validate(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = Claims {
            sub: ObjectId::new().to_hex(),
            name: String::new(),
            iat: past,
            exp: past + 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        assert!(validate(&token, "test-secret").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        // Session-lifetime cookie: no Max-Age
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
