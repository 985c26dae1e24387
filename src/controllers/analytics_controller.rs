// src/controllers/analytics_controller.rs
use actix_web::{get, web, HttpResponse};

use crate::analytics::RatingAggregator;
use crate::error::AppError;
use crate::stores::AppState;

// Summary statistics for one subject: average, submission count, histogram.
#[get("/api/analytics/{subject_id}")]
pub async fn get_subject_analytics(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subject_id = path.into_inner();
    if subject_id.trim().is_empty() {
        return Err(AppError::invalid("subject id is required"));
    }

    let aggregator = RatingAggregator::new(state.feedback.clone());
    let summary = aggregator.compute_summary(&subject_id).await?;

    Ok(HttpResponse::Ok().json(summary))
}
