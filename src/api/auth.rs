use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::{html, server_error};
use crate::config::AppConfig;
use crate::database::MongoDb;
use crate::models::User;
use crate::services::{auth_service, oauth_service, secret_service};
use crate::utils::AppError;
use crate::{session, views};

/// Sign-in stops once this many secrets are on display.
const SECRET_CAPACITY: u64 = 500;

fn registration_open(secrets_stored: u64) -> bool {
    secrets_stored < SECRET_CAPACITY
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    #[allow(dead_code)]
    state: Option<String>,
    error: Option<String>,
}

/// Issue the session cookie for a freshly authenticated user and send the
/// browser to the secrets page.
fn start_session(user: &User, config: &AppConfig) -> HttpResponse {
    match session::issue(user, &config.session_secret) {
        Ok(token) => HttpResponse::Found()
            .cookie(session::session_cookie(token))
            .append_header(("Location", "/secrets"))
            .finish(),
        Err(e) => {
            log::error!("Failed to issue session token: {}", e);
            server_error()
        }
    }
}

/// Registration and login forms share the capacity guard: past the
/// threshold the error page renders instead of the form.
async fn render_gated_form(db: &MongoDb, form: String) -> HttpResponse {
    match secret_service::secret_count(db).await {
        Ok(count) if registration_open(count) => html(form),
        Ok(count) => {
            log::warn!("Secret capacity reached ({}), refusing sign-ins", count);
            html(views::error_page())
        }
        Err(e) => {
            log::error!("Failed to count stored secrets: {}", e);
            server_error()
        }
    }
}

pub async fn show_register(db: web::Data<MongoDb>) -> HttpResponse {
    render_gated_form(&db, views::register()).await
}

pub async fn show_login(db: web::Data<MongoDb>) -> HttpResponse {
    render_gated_form(&db, views::login()).await
}

pub async fn register(
    db: web::Data<MongoDb>,
    config: web::Data<AppConfig>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    log::info!("POST /register - username: {}", form.username);

    match auth_service::register(&db, &form.username, &form.password).await {
        Ok(user) => start_session(&user, &config),
        Err(AppError::Database(e)) => {
            log::error!("Registration failed: {}", e);
            server_error()
        }
        Err(e) => {
            log::warn!("Registration rejected for {}: {}", form.username, e);
            HttpResponse::Found()
                .append_header(("Location", "/register"))
                .finish()
        }
    }
}

pub async fn login(
    db: web::Data<MongoDb>,
    config: web::Data<AppConfig>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    log::info!("POST /login - username: {}", form.username);

    match auth_service::verify(&db, &form.username, &form.password).await {
        Ok(user) => start_session(&user, &config),
        Err(AppError::Database(e)) => {
            log::error!("Login failed: {}", e);
            server_error()
        }
        Err(e) => {
            log::warn!("Login rejected for {}: {}", form.username, e);
            HttpResponse::Found()
                .append_header(("Location", "/login"))
                .finish()
        }
    }
}

pub async fn google_begin(config: web::Data<AppConfig>) -> HttpResponse {
    let auth_url = oauth_service::authorization_url(&config);

    HttpResponse::Found()
        .append_header(("Location", auth_url))
        .finish()
}

pub async fn google_callback(
    db: web::Data<MongoDb>,
    config: web::Data<AppConfig>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    if let Some(error) = &query.error {
        log::warn!("Google sign-in denied: {}", error);
        return HttpResponse::Found()
            .append_header(("Location", "/login"))
            .finish();
    }

    let code = match &query.code {
        Some(code) => code,
        None => {
            log::warn!("Google callback without authorization code");
            return HttpResponse::Found()
                .append_header(("Location", "/login"))
                .finish();
        }
    };

    match oauth_service::handle_callback(&db, &config, code).await {
        Ok(user) => start_session(&user, &config),
        Err(AppError::Database(e)) => {
            log::error!("Google sign-in failed: {}", e);
            server_error()
        }
        Err(e) => {
            log::error!("Google sign-in failed: {}", e);
            HttpResponse::Found()
                .append_header(("Location", "/login"))
                .finish()
        }
    }
}

/// Idempotent: clearing an absent cookie is a no-op.
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .cookie(session::clear_cookie())
        .append_header(("Location", "/"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_threshold() {
        assert!(registration_open(0));
        assert!(registration_open(499));
        assert!(!registration_open(500));
        assert!(!registration_open(501));
    }
}
