pub mod auth_service;
pub mod oauth_service;
pub mod secret_service;
