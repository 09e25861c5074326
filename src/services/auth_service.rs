use bcrypt::{hash, DEFAULT_COST};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

use crate::database::MongoDb;
use crate::models::User;
use crate::utils::AppError;

/// Register a local account.
///
/// Rejects with `DuplicateUser` when the username is taken; otherwise stores
/// a salted bcrypt hash and inserts the document. The plaintext never
/// reaches the store.
pub async fn register(db: &MongoDb, username: &str, password: &str) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "username": username })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::DuplicateUser);
    }

    let password_hash =
        hash(password, DEFAULT_COST).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User {
        id: Some(ObjectId::new()),
        username: Some(username.to_string()),
        password_hash: Some(password_hash),
        google_id: None,
        display_name: None,
        secret: None,
        created_at: Some(BsonDateTime::now()),
        last_login: Some(BsonDateTime::now()),
    };

    collection
        .insert_one(&user)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    log::info!("User registered: {}", username);

    Ok(user)
}

/// Check a submitted password against the stored hash.
///
/// Fails with the same `InvalidCredentials` whether the username is unknown,
/// the account is OAuth-only, or the password does not match.
pub async fn verify(db: &MongoDb, username: &str, password: &str) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "username": username })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or(AppError::InvalidCredentials)?;

    let stored_hash = user
        .password_hash
        .as_ref()
        .ok_or(AppError::InvalidCredentials)?;

    let valid =
        bcrypt::verify(password, stored_hash).map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    if let Some(id) = user.id {
        collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "last_login": BsonDateTime::now() } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    Ok(user)
}
