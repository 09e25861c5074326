use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDb;
use crate::models::User;
use crate::utils::AppError;

/// Matches documents whose `secret` field exists and is non-null.
fn with_secret_filter() -> mongodb::bson::Document {
    doc! { "secret": { "$ne": null } }
}

pub async fn secret_count(db: &MongoDb) -> Result<u64, AppError> {
    db.collection::<User>("users")
        .count_documents(with_secret_filter())
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

pub async fn users_with_secret(db: &MongoDb) -> Result<Vec<User>, AppError> {
    let cursor = db
        .collection::<User>("users")
        .find(with_secret_filter())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Overwrite the caller's secret. A single atomic update keyed by `_id`;
/// concurrent submissions by one user are last-write-wins.
pub async fn store_secret(db: &MongoDb, user_id: ObjectId, secret: &str) -> Result<(), AppError> {
    db.collection::<User>("users")
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "secret": secret } },
        )
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(())
}
