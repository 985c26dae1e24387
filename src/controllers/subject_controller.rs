// src/controllers/subject_controller.rs
use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::stores::AppState;

#[get("/api/subjects")]
pub async fn get_subjects(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let subjects = state.subjects.list().await?;
    Ok(HttpResponse::Ok().json(subjects))
}

// Name lookup for the analytics and review pages.
#[get("/api/subjects/{subject_id}")]
pub async fn get_subject_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subject_id = path.into_inner();
    if subject_id.trim().is_empty() {
        return Err(AppError::invalid("subject id is required"));
    }

    match state.subjects.find_by_id(&subject_id).await? {
        Some(subject) => Ok(HttpResponse::Ok().json(subject)),
        None => Ok(HttpResponse::NotFound().json(json!({ "error": "subject not found" }))),
    }
}
