//! The persistence seam. Controllers and the aggregator only ever see these
//! traits; the MongoDB implementations live in [`mongo`] and are constructed
//! once in `db::establish_connection`. No module-level client state.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::feedback::{FeedbackRecord, NewFeedback};
use crate::models::subject::Subject;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Every feedback record for the subject, in storage order. No
    /// pagination; per-subject feedback volume is assumed to fit in memory.
    async fn find_by_subject(&self, subject_id: &str) -> Result<Vec<FeedbackRecord>, AppError>;

    /// The first record matching both subject and user, if any. Submissions
    /// are additive, so more than one may exist; callers get the first.
    async fn find_by_user_and_subject(
        &self,
        subject_id: &str,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, AppError>;

    /// Only the records carrying a non-empty comment, newest first.
    async fn list_reviews_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<FeedbackRecord>, AppError>;

    /// Inserts a record, assigning id and creation time. Returns the new id.
    async fn add(&self, feedback: NewFeedback) -> Result<String, AppError>;
}

#[async_trait]
pub trait SubjectStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Subject>, AppError>;

    async fn find_by_id(&self, subject_id: &str) -> Result<Option<Subject>, AppError>;
}

#[async_trait]
pub trait UserProfileStore: Send + Sync {
    /// Batch display-name lookup. Ids with no profile (or no name set) are
    /// simply absent from the returned map.
    async fn find_names_by_ids(
        &self,
        ids: &HashSet<String>,
    ) -> Result<HashMap<String, String>, AppError>;
}

/// Injected into every handler via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub feedback: Arc<dyn FeedbackStore>,
    pub subjects: Arc<dyn SubjectStore>,
    pub users: Arc<dyn UserProfileStore>,
}
