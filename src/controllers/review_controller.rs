// src/controllers/review_controller.rs
use actix_web::{get, web, HttpResponse};

use crate::error::AppError;
use crate::reviews;
use crate::stores::AppState;

// Text reviews for a subject, newest first, with resolved display names.
#[get("/api/reviews/{subject_id}")]
pub async fn get_reviews(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subject_id = path.into_inner();
    if subject_id.trim().is_empty() {
        return Err(AppError::invalid("subject id is required"));
    }

    let entries = reviews::list_reviews_with_names(
        state.feedback.as_ref(),
        state.users.as_ref(),
        &subject_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(entries))
}
