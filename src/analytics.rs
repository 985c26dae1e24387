// src/analytics.rs
use std::sync::Arc;

use crate::error::AppError;
use crate::models::analytics::{RatingBucket, SubjectSummary};
use crate::models::feedback::FeedbackRecord;
use crate::stores::FeedbackStore;

/// Computes on-demand rating statistics for a single subject.
///
/// Read-only against the injected store: one retrieval, one pass, no
/// caching, no retry. A retrieval failure surfaces as
/// [`AppError::StorageUnavailable`] with no partial summary.
pub struct RatingAggregator {
    store: Arc<dyn FeedbackStore>,
}

impl RatingAggregator {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    pub async fn compute_summary(&self, subject_id: &str) -> Result<SubjectSummary, AppError> {
        if subject_id.trim().is_empty() {
            return Err(AppError::invalid("subject id is required"));
        }

        let records = self.store.find_by_subject(subject_id).await?;
        Ok(summarize(&records))
    }
}

/// Single pass over the record set.
///
/// A record contributes to the sum and its bucket only when its rating is
/// present and within 1..=5; everything else (review-only records, out of
/// range values) is skipped for the numeric computation but still counted
/// in `total_submissions`. The frontend displays both numbers side by side,
/// so that asymmetry is part of the contract.
pub fn summarize(records: &[FeedbackRecord]) -> SubjectSummary {
    let mut counts = [0i64; 5];
    let mut sum: i64 = 0;
    let mut valid: i64 = 0;

    for record in records {
        if let Some(rating) = record.rating {
            if (1..=5).contains(&rating) {
                counts[(rating - 1) as usize] += 1;
                sum += rating as i64;
                valid += 1;
            }
        }
    }

    let average_rating = if valid > 0 {
        round_two(sum as f64 / valid as f64)
    } else {
        0.0
    };

    SubjectSummary {
        average_rating,
        total_submissions: records.len() as i64,
        distribution: (1..=5)
            .map(|rating| RatingBucket {
                rating,
                count: counts[(rating - 1) as usize],
            })
            .collect(),
    }
}

// Two decimal digits, applied uniformly here and nowhere else; the wire
// value is what the charts render.
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
