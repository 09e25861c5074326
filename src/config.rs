use std::env;

/// Application configuration loaded once at startup and passed to handlers
/// as shared state.
///
/// Required env vars:
/// - `DATABASE_URL`: MongoDB connection string
/// - `SESSION_SECRET`: signing secret for session cookies
/// - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`: OAuth client credentials
/// - `GOOGLE_REDIRECT_URI`: OAuth callback URL
///
/// `HOST` and `PORT` are optional (0.0.0.0:3000 by default).
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "PORT must be a number".to_string())?;

        Ok(Self {
            host,
            port,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| "DATABASE_URL must be set".to_string())?,
            session_secret: env::var("SESSION_SECRET")
                .map_err(|_| "SESSION_SECRET must be set".to_string())?,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| "GOOGLE_CLIENT_ID must be set".to_string())?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map_err(|_| "GOOGLE_CLIENT_SECRET must be set".to_string())?,
            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .map_err(|_| "GOOGLE_REDIRECT_URI must be set".to_string())?,
        })
    }
}
