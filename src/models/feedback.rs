// src/models/feedback.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rating and/or text review, as validated at the store boundary.
///
/// A record carries a rating, a comment, or both; never neither. Submission
/// enforces that, reads tolerate whatever is in the collection. `rating` is
/// `None` for review-only records and for stored values that are not an
/// integral number; range checking is left to the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub subject_id: String,
    pub user_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload of POST /api/feedback/rating.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub subject_id: String,
    pub user_id: String,
    pub rating: i32,
}

/// Payload of POST /api/feedback/review.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub subject_id: String,
    pub user_id: String,
    pub comment: String,
}

/// What the controllers hand to the store; the store assigns `id` and
/// `created_at` on insertion.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub subject_id: String,
    pub user_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// A review enriched with the submitter's display name for the listing
/// endpoint. `created_at` is epoch milliseconds, which is what the frontend
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub id: String,
    pub user_id: String,
    pub rating: Option<i32>,
    pub comment: String,
    pub created_at: i64,
    pub user_name: String,
}
