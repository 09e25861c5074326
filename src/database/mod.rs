use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("userDB");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the unique sparse indexes that back duplicate-registration
    /// checks and find-or-create by Google id.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        let users = self.db.collection::<mongodb::bson::Document>("users");

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();

        match users.create_index(username_index).await {
            Ok(_) => log::info!("Index ready: users(username)"),
            Err(e) => log::debug!("Index already exists: {}", e),
        }

        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();

        match users.create_index(google_id_index).await {
            Ok(_) => log::info!("Index ready: users(google_id)"),
            Err(e) => log::debug!("Index already exists: {}", e),
        }

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Check that the connection is still healthy.
    pub async fn ping(&self) -> Result<(), Box<dyn Error>> {
        self.db.list_collection_names().await?;
        Ok(())
    }
}
