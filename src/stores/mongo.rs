// src/stores/mongo.rs
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::{FeedbackStore, SubjectStore, UserProfileStore};
use crate::error::AppError;
use crate::models::feedback::{FeedbackRecord, NewFeedback};
use crate::models::subject::Subject;

const FEEDBACK_COLLECTION: &str = "feedback";
const SUBJECTS_COLLECTION: &str = "subjects";
const USERS_COLLECTION: &str = "users";

pub struct MongoFeedbackStore {
    collection: Collection<Document>,
}

pub struct MongoSubjectStore {
    collection: Collection<Document>,
}

pub struct MongoUserProfileStore {
    collection: Collection<Document>,
}

impl MongoFeedbackStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(FEEDBACK_COLLECTION),
        }
    }
}

impl MongoSubjectStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(SUBJECTS_COLLECTION),
        }
    }
}

impl MongoUserProfileStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(USERS_COLLECTION),
        }
    }
}

fn storage_err(e: mongodb::error::Error) -> AppError {
    log::error!("mongodb error: {:?}", e);
    AppError::StorageUnavailable(e.to_string())
}

fn id_from_document(document: &Document) -> Option<String> {
    match document.get("_id") {
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// `_id` filter that works for both ObjectId keys and legacy string keys.
fn id_filter(id: &str) -> Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id },
    }
}

/// Boundary validation for the dynamically shaped feedback documents. The
/// collection was written by several app versions, so `rating` may be an
/// int, a double, a string, null, or missing. Anything that is not an
/// integral number becomes `None`; range checks belong to the aggregator.
pub(crate) fn record_from_document(document: &Document) -> Option<FeedbackRecord> {
    let id = id_from_document(document)?;
    let subject_id = document.get_str("subjectId").ok()?.to_string();
    let user_id = document.get_str("userId").ok()?.to_string();

    let rating = match document.get("rating") {
        Some(Bson::Int32(n)) => Some(*n),
        Some(Bson::Int64(n)) => i32::try_from(*n).ok(),
        Some(Bson::Double(f)) if f.fract() == 0.0 => Some(*f as i32),
        _ => None,
    };

    let comment = document
        .get_str("comment")
        .ok()
        .map(str::to_string)
        .filter(|c| !c.is_empty());

    let created_at = document
        .get_datetime("createdAt")
        .ok()
        .and_then(|dt| chrono::DateTime::from_timestamp_millis(dt.timestamp_millis()))?;

    Some(FeedbackRecord {
        id,
        subject_id,
        user_id,
        rating,
        comment,
        created_at,
    })
}

pub(crate) fn subject_from_document(document: &Document) -> Option<Subject> {
    let id = id_from_document(document)?;
    let name = document.get_str("name").ok()?.to_string();
    let code = document.get_str("code").ok().map(str::to_string);
    Some(Subject { id, name, code })
}

async fn collect_records(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<FeedbackRecord>, AppError> {
    let mut cursor = collection.find(filter, options).await.map_err(storage_err)?;

    let mut records = Vec::new();
    while let Some(document) = cursor.try_next().await.map_err(storage_err)? {
        match record_from_document(&document) {
            Some(record) => records.push(record),
            None => log::warn!(
                "skipping malformed feedback document: {:?}",
                document.get("_id")
            ),
        }
    }

    Ok(records)
}

#[async_trait]
impl FeedbackStore for MongoFeedbackStore {
    async fn find_by_subject(&self, subject_id: &str) -> Result<Vec<FeedbackRecord>, AppError> {
        collect_records(&self.collection, doc! { "subjectId": subject_id }, None).await
    }

    async fn find_by_user_and_subject(
        &self,
        subject_id: &str,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, AppError> {
        let filter = doc! { "subjectId": subject_id, "userId": user_id };
        let document = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(storage_err)?;

        Ok(document.as_ref().and_then(record_from_document))
    }

    async fn list_reviews_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<FeedbackRecord>, AppError> {
        let filter = doc! {
            "subjectId": subject_id,
            "comment": { "$exists": true, "$nin": [Bson::Null, ""] },
        };
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        collect_records(&self.collection, filter, Some(options)).await
    }

    async fn add(&self, feedback: NewFeedback) -> Result<String, AppError> {
        let mut document = doc! {
            "subjectId": &feedback.subject_id,
            "userId": &feedback.user_id,
            "createdAt": BsonDateTime::from_millis(Utc::now().timestamp_millis()),
        };

        // `totalScore` mirrors `rating`; older frontend builds still read it.
        match feedback.rating {
            Some(rating) => {
                document.insert("rating", rating);
                document.insert("totalScore", rating);
            }
            None => {
                document.insert("rating", Bson::Null);
                document.insert("totalScore", Bson::Null);
            }
        }
        match feedback.comment {
            Some(ref comment) => document.insert("comment", comment.as_str()),
            None => document.insert("comment", Bson::Null),
        };

        let result = self
            .collection
            .insert_one(document, None)
            .await
            .map_err(storage_err)?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl SubjectStore for MongoSubjectStore {
    async fn list(&self) -> Result<Vec<Subject>, AppError> {
        let mut cursor = self
            .collection
            .find(None, None)
            .await
            .map_err(storage_err)?;

        let mut subjects = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(storage_err)? {
            match subject_from_document(&document) {
                Some(subject) => subjects.push(subject),
                None => log::warn!(
                    "skipping malformed subject document: {:?}",
                    document.get("_id")
                ),
            }
        }

        Ok(subjects)
    }

    async fn find_by_id(&self, subject_id: &str) -> Result<Option<Subject>, AppError> {
        let document = self
            .collection
            .find_one(id_filter(subject_id), None)
            .await
            .map_err(storage_err)?;

        Ok(document.as_ref().and_then(subject_from_document))
    }
}

#[async_trait]
impl UserProfileStore for MongoUserProfileStore {
    async fn find_names_by_ids(
        &self,
        ids: &HashSet<String>,
    ) -> Result<HashMap<String, String>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // User documents may be keyed by ObjectId or by the auth provider's
        // string uid; match either form in one query.
        let mut keys: Vec<Bson> = Vec::new();
        for id in ids {
            if let Ok(oid) = ObjectId::parse_str(id) {
                keys.push(Bson::ObjectId(oid));
            }
            keys.push(Bson::String(id.clone()));
        }

        let filter = doc! { "_id": { "$in": keys } };
        let mut cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(storage_err)?;

        let mut names = HashMap::new();
        while let Some(document) = cursor.try_next().await.map_err(storage_err)? {
            let id = match id_from_document(&document) {
                Some(id) => id,
                None => continue,
            };
            if let Ok(name) = document.get_str("name") {
                if !name.trim().is_empty() {
                    names.insert(id, name.to_string());
                }
            }
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_conversion_reads_a_well_formed_document() {
        let document = doc! {
            "_id": ObjectId::new(),
            "subjectId": "dsa-101",
            "userId": "u1",
            "rating": 4,
            "comment": "solid course",
            "createdAt": BsonDateTime::from_millis(1_700_000_000_000),
        };

        let record = record_from_document(&document).unwrap();
        assert_eq!(record.subject_id, "dsa-101");
        assert_eq!(record.rating, Some(4));
        assert_eq!(record.comment.as_deref(), Some("solid course"));
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn wrong_typed_rating_becomes_none() {
        let document = doc! {
            "_id": "abc",
            "subjectId": "dsa-101",
            "userId": "u1",
            "rating": "3",
            "comment": "ok",
            "createdAt": BsonDateTime::from_millis(0),
        };

        let record = record_from_document(&document).unwrap();
        assert_eq!(record.rating, None);
    }

    #[test]
    fn null_rating_and_empty_comment_become_none() {
        let document = doc! {
            "_id": "abc",
            "subjectId": "dsa-101",
            "userId": "u1",
            "rating": Bson::Null,
            "comment": "",
            "createdAt": BsonDateTime::from_millis(0),
        };

        let record = record_from_document(&document).unwrap();
        assert_eq!(record.rating, None);
        assert_eq!(record.comment, None);
    }

    #[test]
    fn integral_double_rating_is_kept() {
        let document = doc! {
            "_id": "abc",
            "subjectId": "dsa-101",
            "userId": "u1",
            "rating": 5.0,
            "createdAt": BsonDateTime::from_millis(0),
        };

        let record = record_from_document(&document).unwrap();
        assert_eq!(record.rating, Some(5));
    }

    #[test]
    fn fractional_double_rating_is_dropped() {
        let document = doc! {
            "_id": "abc",
            "subjectId": "dsa-101",
            "userId": "u1",
            "rating": 4.5,
            "createdAt": BsonDateTime::from_millis(0),
        };

        let record = record_from_document(&document).unwrap();
        assert_eq!(record.rating, None);
    }

    #[test]
    fn document_without_required_fields_is_rejected() {
        let document = doc! { "_id": "abc", "rating": 3 };
        assert!(record_from_document(&document).is_none());
    }

    #[test]
    fn subject_conversion_handles_optional_code() {
        let with_code = doc! { "_id": "s1", "name": "Algorithms", "code": "DSA-101" };
        let without_code = doc! { "_id": "s2", "name": "Databases" };

        assert_eq!(
            subject_from_document(&with_code).unwrap().code.as_deref(),
            Some("DSA-101")
        );
        assert_eq!(subject_from_document(&without_code).unwrap().code, None);
    }
}
