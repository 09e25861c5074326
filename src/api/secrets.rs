use actix_web::{web, HttpRequest, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use super::{html, server_error};
use crate::config::AppConfig;
use crate::database::MongoDb;
use crate::services::secret_service;
use crate::{session, views};

#[derive(Debug, Deserialize)]
pub struct SecretForm {
    pub secret: String,
}

/// Public listing; only the button label depends on the auth state.
pub async fn secrets(
    db: web::Data<MongoDb>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
) -> HttpResponse {
    let authenticated = session::current_user(&req, &config).is_some();

    match secret_service::users_with_secret(&db).await {
        Ok(users) => {
            let texts: Vec<&str> = users.iter().filter_map(|u| u.secret.as_deref()).collect();
            html(views::secrets(&texts, authenticated))
        }
        Err(e) => {
            log::error!("Failed to load secrets: {}", e);
            server_error()
        }
    }
}

pub async fn show_submit(config: web::Data<AppConfig>, req: HttpRequest) -> HttpResponse {
    if session::current_user(&req, &config).is_none() {
        return HttpResponse::Found()
            .append_header(("Location", "/login"))
            .finish();
    }

    html(views::submit())
}

pub async fn submit(
    db: web::Data<MongoDb>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
    form: web::Form<SecretForm>,
) -> HttpResponse {
    let user = match session::current_user(&req, &config) {
        Some(user) => user,
        None => {
            return HttpResponse::Found()
                .append_header(("Location", "/login"))
                .finish();
        }
    };

    let user_id = match ObjectId::parse_str(&user.id) {
        Ok(id) => id,
        Err(_) => {
            log::warn!("Session carries malformed user id: {}", user.id);
            return HttpResponse::Found()
                .cookie(session::clear_cookie())
                .append_header(("Location", "/login"))
                .finish();
        }
    };

    match secret_service::store_secret(&db, user_id, &form.secret).await {
        Ok(()) => {
            log::info!("Secret stored for user {}", user.id);
            HttpResponse::Found()
                .append_header(("Location", "/secrets"))
                .finish()
        }
        Err(e) => {
            log::error!("Failed to store secret: {}", e);
            server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use mongodb::bson::oid::ObjectId;

    use crate::models::User;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "mongodb://127.0.0.1:27017/userDB".to_string(),
            session_secret: "test-secret".to_string(),
            google_client_id: "client-id".to_string(),
            google_client_secret: "client-secret".to_string(),
            google_redirect_uri: "http://localhost:3000/auth/google/secrets".to_string(),
        }
    }

    fn session_cookie_for_test() -> actix_web::cookie::Cookie<'static> {
        let user = User {
            id: Some(ObjectId::new()),
            username: Some("ada@example.com".to_string()),
            password_hash: Some("$2b$12$irrelevant".to_string()),
            google_id: None,
            display_name: None,
            secret: None,
            created_at: None,
            last_login: None,
        };
        let token = session::issue(&user, "test-secret").unwrap();
        session::session_cookie(token)
    }

    #[actix_web::test]
    async fn test_show_submit_redirects_when_unauthenticated() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .route("/submit", web::get().to(show_submit)),
        )
        .await;

        let req = test::TestRequest::get().uri("/submit").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[actix_web::test]
    async fn test_show_submit_renders_for_session_holder() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .route("/submit", web::get().to(show_submit)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/submit")
            .cookie(session_cookie_for_test())
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_tampered_session_treated_as_unauthenticated() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .route("/submit", web::get().to(show_submit)),
        )
        .await;

        let user = User {
            id: Some(ObjectId::new()),
            username: Some("eve@example.com".to_string()),
            password_hash: None,
            google_id: None,
            display_name: None,
            secret: None,
            created_at: None,
            last_login: None,
        };
        // Signed with a different secret than the app expects
        let token = session::issue(&user, "attacker-secret").unwrap();

        let req = test::TestRequest::get()
            .uri("/submit")
            .cookie(session::session_cookie(token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }
}
