use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::MongoDb;
use crate::models::User;
use crate::utils::AppError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug)]
struct GoogleProfile {
    id: String,
    name: Option<String>,
}

/// Build the Google authorization URL the browser is redirected to.
pub fn authorization_url(config: &AppConfig) -> String {
    let state = Uuid::new_v4().to_string();

    let params = vec![
        ("client_id", config.google_client_id.as_str()),
        ("redirect_uri", config.google_redirect_uri.as_str()),
        ("response_type", "code"),
        ("scope", "profile"),
        ("state", state.as_str()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", GOOGLE_AUTH_URL, query_string)
}

/// Complete the callback half of the handshake: exchange the authorization
/// code, fetch the profile, then find-or-create the local user.
///
/// The insert happens only after the profile is fully resolved, so a failed
/// handshake never leaves a partial record behind.
pub async fn handle_callback(
    db: &MongoDb,
    config: &AppConfig,
    code: &str,
) -> Result<User, AppError> {
    let profile = fetch_profile(config, code).await?;
    find_or_create(db, profile).await
}

async fn fetch_profile(config: &AppConfig, code: &str) -> Result<GoogleProfile, AppError> {
    let client = reqwest::Client::new();

    let token_response = client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.as_str()),
            ("redirect_uri", config.google_redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AppError::OAuth(format!("failed to exchange code: {}", e)))?;

    if !token_response.status().is_success() {
        return Err(AppError::OAuth(format!(
            "code exchange rejected: {}",
            token_response.status()
        )));
    }

    let tokens: serde_json::Value = token_response
        .json()
        .await
        .map_err(|e| AppError::OAuth(format!("invalid token response: {}", e)))?;

    let access_token = tokens["access_token"]
        .as_str()
        .ok_or_else(|| AppError::OAuth("no access token in response".to_string()))?;

    let user_info: serde_json::Value = client
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::OAuth(format!("failed to fetch profile: {}", e)))?
        .json()
        .await
        .map_err(|e| AppError::OAuth(format!("invalid profile response: {}", e)))?;

    let id = user_info["id"]
        .as_str()
        .ok_or_else(|| AppError::OAuth("no profile id in response".to_string()))?
        .to_string();

    Ok(GoogleProfile {
        id,
        name: user_info["name"].as_str().map(String::from),
    })
}

/// Idempotent upsert keyed by the provider-assigned id: a repeat login
/// reuses the record, a first login creates it.
async fn find_or_create(db: &MongoDb, profile: GoogleProfile) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "google_id": &profile.id })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if let Some(mut user) = existing {
        let mut updates = doc! { "last_login": BsonDateTime::now() };
        if let Some(name) = &profile.name {
            updates.insert("display_name", name);
            user.display_name = Some(name.clone());
        }

        if let Some(id) = user.id {
            collection
                .update_one(doc! { "_id": id }, doc! { "$set": updates })
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        user.last_login = Some(BsonDateTime::now());

        log::info!("Google sign-in for existing user: {}", profile.id);
        return Ok(user);
    }

    let user = User {
        id: Some(ObjectId::new()),
        username: None,
        password_hash: None,
        google_id: Some(profile.id.clone()),
        display_name: profile.name,
        secret: None,
        created_at: Some(BsonDateTime::now()),
        last_login: Some(BsonDateTime::now()),
    };

    collection
        .insert_one(&user)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    log::info!("Created user for Google profile: {}", profile.id);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_authorization_url_shape() {
        let url = authorization_url(&test_config());

        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=profile"));
        assert!(url.contains("state="));
        assert!(url.contains(&format!(
            "redirect_uri={}",
            urlencoding::encode("http://localhost:3000/auth/google/secrets")
        )));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_find_or_create_is_idempotent() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/userDB".to_string());
        let db = MongoDb::new(&uri).await.expect("MongoDB must be running");

        let google_id = Uuid::new_v4().to_string();

        let first = find_or_create(
            &db,
            GoogleProfile {
                id: google_id.clone(),
                name: Some("Ada".to_string()),
            },
        )
        .await
        .unwrap();

        let second = find_or_create(
            &db,
            GoogleProfile {
                id: google_id,
                name: Some("Ada".to_string()),
            },
        )
        .await
        .unwrap();

        // Same record reused, no duplicate created
        assert_eq!(first.id, second.id);
        assert!(second.password_hash.is_none());
    }
}
