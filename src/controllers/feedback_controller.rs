// src/controllers/feedback_controller.rs
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::models::feedback::{NewFeedback, RatingSubmission, ReviewSubmission};
use crate::stores::AppState;

// Submit a star rating (1-5) for a subject.
#[post("/api/feedback/rating")]
pub async fn submit_rating(
    state: web::Data<AppState>,
    data: web::Json<RatingSubmission>,
) -> Result<HttpResponse, AppError> {
    let data = data.into_inner();

    if data.subject_id.trim().is_empty() || data.user_id.trim().is_empty() {
        return Err(AppError::invalid("subjectId and userId are required"));
    }
    if !(1..=5).contains(&data.rating) {
        return Err(AppError::invalid("rating must be between 1 and 5"));
    }

    let id = state
        .feedback
        .add(NewFeedback {
            subject_id: data.subject_id,
            user_id: data.user_id,
            rating: Some(data.rating),
            comment: None,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Rating submitted successfully",
        "id": id
    })))
}

// Submit a text review for a subject; no star rating attached.
#[post("/api/feedback/review")]
pub async fn submit_review(
    state: web::Data<AppState>,
    data: web::Json<ReviewSubmission>,
) -> Result<HttpResponse, AppError> {
    let data = data.into_inner();

    if data.subject_id.trim().is_empty() || data.user_id.trim().is_empty() {
        return Err(AppError::invalid("subjectId and userId are required"));
    }

    let comment = data.comment.trim().to_string();
    if comment.len() < 5 {
        return Err(AppError::invalid(
            "a comment of at least 5 characters is required",
        ));
    }

    let id = state
        .feedback
        .add(NewFeedback {
            subject_id: data.subject_id,
            user_id: data.user_id,
            rating: None,
            comment: Some(comment),
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Review submitted successfully",
        "id": id
    })))
}

// The caller's own feedback for a subject, if any; drives the "already
// rated" state on the subject card.
#[get("/api/feedback/{subject_id}/{user_id}")]
pub async fn get_user_feedback(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (subject_id, user_id) = path.into_inner();
    if subject_id.trim().is_empty() || user_id.trim().is_empty() {
        return Err(AppError::invalid("subject id and user id are required"));
    }

    match state
        .feedback
        .find_by_user_and_subject(&subject_id, &user_id)
        .await?
    {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "no feedback found for this subject and user"
        }))),
    }
}
