use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::stores::mongo::{MongoFeedbackStore, MongoSubjectStore, MongoUserProfileStore};
use crate::stores::AppState;

pub async fn establish_connection() -> Result<AppState, mongodb::error::Error> {
    dotenv().ok();

    let uri = env::var("MONGODB_URI").unwrap_or_else(|_| {
        log::warn!("MONGODB_URI not set, falling back to mongodb://localhost:27017");
        "mongodb://localhost:27017".to_string()
    });
    let database_name =
        env::var("MONGODB_DATABASE").unwrap_or_else(|_| "student_feedback".to_string());

    let options = ClientOptions::parse(&uri).await?;
    let client = Client::with_options(options)?;
    let database = client.database(&database_name);

    // Fail at startup rather than on the first request.
    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| {
            log::error!("mongodb ping failed: {:?}", e);
            e
        })?;

    Ok(AppState {
        feedback: Arc::new(MongoFeedbackStore::new(&database)),
        subjects: Arc::new(MongoSubjectStore::new(&database)),
        users: Arc::new(MongoUserProfileStore::new(&database)),
    })
}
