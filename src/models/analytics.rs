// src/models/analytics.rs
use serde::Serialize;

/// On-demand aggregate statistics for one subject. Never persisted, never
/// cached; recomputed per request.
///
/// `total_submissions` counts every feedback record examined, including
/// review-only records and records whose rating was unusable, while the
/// average and the buckets cover valid ratings only. The frontend shows both
/// numbers together, so the asymmetry is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub average_rating: f64,
    pub total_submissions: i64,
    pub distribution: Vec<RatingBucket>,
}

/// One histogram bucket. The distribution always contains the five buckets
/// 1..=5 in ascending order, even when every count is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

impl SubjectSummary {
    /// The terminal case for a subject with no feedback at all.
    pub fn empty() -> Self {
        SubjectSummary {
            average_rating: 0.0,
            total_submissions: 0,
            distribution: (1..=5).map(|rating| RatingBucket { rating, count: 0 }).collect(),
        }
    }
}
