// src/stores/memory.rs
//! In-memory store implementations for tests. Kept behind `cfg(test)`; the
//! running service only ever uses the MongoDB stores.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{FeedbackStore, SubjectStore, UserProfileStore};
use crate::error::AppError;
use crate::models::feedback::{FeedbackRecord, NewFeedback};
use crate::models::subject::Subject;

#[derive(Default)]
pub struct InMemoryFeedbackStore {
    records: Mutex<Vec<FeedbackRecord>>,
    fail: bool,
}

impl InMemoryFeedbackStore {
    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fail: false,
        }
    }

    /// A store whose every call reports `StorageUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::StorageUnavailable("test store down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn find_by_subject(&self, subject_id: &str) -> Result<Vec<FeedbackRecord>, AppError> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_and_subject(
        &self,
        subject_id: &str,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, AppError> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.subject_id == subject_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_reviews_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<FeedbackRecord>, AppError> {
        self.check()?;
        let records = self.records.lock().unwrap();
        let mut reviews: Vec<FeedbackRecord> = records
            .iter()
            .filter(|r| {
                r.subject_id == subject_id
                    && r.comment.as_deref().map(|c| !c.is_empty()).unwrap_or(false)
            })
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn add(&self, feedback: NewFeedback) -> Result<String, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let id = format!("mem-{}", records.len() + 1);
        records.push(FeedbackRecord {
            id: id.clone(),
            subject_id: feedback.subject_id,
            user_id: feedback.user_id,
            rating: feedback.rating,
            comment: feedback.comment,
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

#[derive(Default)]
pub struct InMemorySubjectStore {
    subjects: Vec<Subject>,
}

impl InMemorySubjectStore {
    pub fn with_subjects(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }
}

#[async_trait]
impl SubjectStore for InMemorySubjectStore {
    async fn list(&self) -> Result<Vec<Subject>, AppError> {
        Ok(self.subjects.clone())
    }

    async fn find_by_id(&self, subject_id: &str) -> Result<Option<Subject>, AppError> {
        Ok(self.subjects.iter().find(|s| s.id == subject_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserProfileStore {
    names: HashMap<String, String>,
}

impl InMemoryUserProfileStore {
    pub fn with_names(names: HashMap<String, String>) -> Self {
        Self { names }
    }
}

#[async_trait]
impl UserProfileStore for InMemoryUserProfileStore {
    async fn find_names_by_ids(
        &self,
        ids: &HashSet<String>,
    ) -> Result<HashMap<String, String>, AppError> {
        Ok(self
            .names
            .iter()
            .filter(|(id, _)| ids.contains(*id))
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect())
    }
}
