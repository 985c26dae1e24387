// src/reviews.rs
use std::collections::HashSet;

use crate::error::AppError;
use crate::models::feedback::ReviewEntry;
use crate::stores::{FeedbackStore, UserProfileStore};

/// Text reviews for a subject, newest first, each enriched with a display
/// name. Names are resolved in one batch call against the user profiles
/// rather than one lookup per review.
pub async fn list_reviews_with_names(
    feedback: &dyn FeedbackStore,
    users: &dyn UserProfileStore,
    subject_id: &str,
) -> Result<Vec<ReviewEntry>, AppError> {
    if subject_id.trim().is_empty() {
        return Err(AppError::invalid("subject id is required"));
    }

    let records = feedback.list_reviews_by_subject(subject_id).await?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let ids: HashSet<String> = records.iter().map(|r| r.user_id.clone()).collect();
    let names = users.find_names_by_ids(&ids).await?;

    Ok(records
        .into_iter()
        .filter_map(|record| {
            // The store already filters on non-empty comments; records that
            // slipped through without one are dropped here too.
            let comment = record.comment?;
            let user_name = names
                .get(&record.user_id)
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| fallback_name(&record.user_id));

            Some(ReviewEntry {
                id: record.id,
                user_id: record.user_id,
                rating: record.rating,
                comment,
                created_at: record.created_at.timestamp_millis(),
                user_name,
            })
        })
        .collect())
}

// "User ab3f2..." when no profile name exists.
fn fallback_name(user_id: &str) -> String {
    let short: String = user_id.chars().take(5).collect();
    format!("User {}...", short)
}
