//! Wire DTOs for the learning service.
//!
//! # Design
//! Every endpoint answers with one of two envelopes: a single `Resource`
//! (user, summary) or a paginated `Collection` of resources. Both are generic
//! over the type-specific `data` payload, so each endpoint is just an alias.
//! Field names match the JSON exactly; nullable or absent fields are
//! `Option`. Decoded values are never mutated, only replaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Timestamp = DateTime<Utc>;

/// Pagination cursors of a collection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesInfo {
    pub next_url: Option<String>,
    pub previous_url: Option<String>,
    pub per_page: u32,
}

/// A single entity. Reports such as the summary carry no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<T> {
    pub id: Option<u64>,
    pub object: String,
    pub url: String,
    pub data_updated_at: Timestamp,
    pub data: T,
}

/// One page of resources of a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub object: String,
    pub url: String,
    pub pages: PagesInfo,
    pub total_count: u64,
    /// Null when the collection is empty.
    pub data_updated_at: Option<Timestamp>,
    pub data: Vec<Resource<T>>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the service reports further pages beyond this one.
    pub fn has_next_page(&self) -> bool {
        self.pages.next_url.is_some()
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub username: String,
    pub level: u32,
    pub started_at: Timestamp,
    pub subscribed: bool,
    pub current_vacation_started_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// Radical artwork; only radicals carry images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterImage {
    pub content_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningInfo {
    pub meaning: String,
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingInfo {
    pub reading: String,
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectData {
    pub level: u32,
    pub created_at: Timestamp,
    pub slug: Option<String>,
    pub character: Option<String>,
    pub character_images: Option<Vec<CharacterImage>>,
    pub meanings: Option<Vec<MeaningInfo>>,
    pub readings: Option<Vec<ReadingInfo>>,
    pub parts_of_speech: Option<Vec<String>>,
    pub subject_component_ids: Option<Vec<u64>>,
    pub document_url: String,
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentData {
    pub subject_id: u64,
    pub subject_type: String,
    pub level: u32,
    pub srs_stage: u32,
    pub srs_stage_name: String,
    pub unlocked_at: Option<Timestamp>,
    pub started_at: Option<Timestamp>,
    pub passed_at: Option<Timestamp>,
    pub burned_at: Option<Timestamp>,
    pub available_at: Option<Timestamp>,
    pub passed: bool,
    pub resurrected: bool,
}

// ---------------------------------------------------------------------------
// Review statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStatisticData {
    pub created_at: Timestamp,
    pub subject_id: u64,
    pub subject_type: String,
    pub meaning_correct: u32,
    pub meaning_incorrect: u32,
    pub meaning_max_streak: u32,
    pub meaning_current_streak: u32,
    pub reading_correct: u32,
    pub reading_incorrect: u32,
    pub reading_max_streak: u32,
    pub reading_current_streak: u32,
    pub percentage_correct: u32,
}

// ---------------------------------------------------------------------------
// Study materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMaterialData {
    pub created_at: Timestamp,
    pub subject_id: u64,
    pub subject_type: String,
    pub meaning_note: Option<String>,
    pub reading_note: Option<String>,
    pub meaning_synonyms: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub available_at: Timestamp,
    pub subject_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryData {
    pub review_subject_ids: Vec<u64>,
    pub lesson_subject_ids: Vec<u64>,
    pub reviews_per_hour: Vec<ReviewSummary>,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewData {
    pub created_at: Timestamp,
    pub assignment_id: u64,
    pub starting_srs_stage: u32,
    pub starting_srs_stage_name: String,
    pub incorrect_meaning_answers: Option<u32>,
    pub incorrect_reading_answers: Option<u32>,
}

// ---------------------------------------------------------------------------
// Level progression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgressionData {
    pub created_at: Timestamp,
    pub level: u32,
    pub unlocked_at: Option<Timestamp>,
    pub started_at: Option<Timestamp>,
    pub passed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub abandoned_at: Option<Timestamp>,
}

pub type User = Resource<UserData>;
pub type Summary = Resource<SummaryData>;
pub type Subject = Resource<SubjectData>;
pub type Assignment = Resource<AssignmentData>;
pub type ReviewStatistic = Resource<ReviewStatisticData>;
pub type StudyMaterial = Resource<StudyMaterialData>;
pub type Review = Resource<ReviewData>;
pub type LevelProgression = Resource<LevelProgressionData>;

pub type SubjectsIndex = Collection<SubjectData>;
pub type AssignmentsIndex = Collection<AssignmentData>;
pub type ReviewStatisticsIndex = Collection<ReviewStatisticData>;
pub type StudyMaterialsIndex = Collection<StudyMaterialData>;
pub type ReviewsIndex = Collection<ReviewData>;
pub type LevelProgressionsIndex = Collection<LevelProgressionData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_accepts_null_and_absent_timestamps() {
        let json = r#"{
            "subject_id": 440,
            "subject_type": "kanji",
            "level": 1,
            "srs_stage": 1,
            "srs_stage_name": "Apprentice I",
            "unlocked_at": "2017-09-05T23:38:10.695133Z",
            "started_at": null,
            "passed_at": null,
            "passed": false,
            "resurrected": false
        }"#;
        let data: AssignmentData = serde_json::from_str(json).unwrap();
        assert!(data.unlocked_at.is_some());
        assert!(data.started_at.is_none());
        assert!(data.burned_at.is_none());
        assert!(data.available_at.is_none());
    }

    #[test]
    fn radical_subject_decodes_without_readings() {
        let json = r#"{
            "level": 1,
            "created_at": "2012-02-27T18:08:16.000000Z",
            "slug": "ground",
            "character": "一",
            "character_images": [{"content_type": "image/svg+xml", "url": "https://cdn.example/1.svg"}],
            "meanings": [{"meaning": "Ground", "primary": true}],
            "document_url": "https://www.wanikani.com/radicals/ground"
        }"#;
        let data: SubjectData = serde_json::from_str(json).unwrap();
        assert_eq!(data.character.as_deref(), Some("一"));
        assert_eq!(data.character_images.unwrap().len(), 1);
        assert!(data.readings.is_none());
        assert!(data.parts_of_speech.is_none());
    }

    #[test]
    fn summary_resource_has_no_id() {
        let json = r#"{
            "object": "report",
            "url": "https://api.example/v2/summary",
            "data_updated_at": "2018-04-11T21:00:00.000000Z",
            "data": {
                "lesson_subject_ids": [25, 26],
                "review_subject_ids": [21, 23, 24],
                "reviews_per_hour": [
                    {"available_at": "2018-04-11T21:00:00.000000Z", "subject_ids": [21, 23]}
                ]
            }
        }"#;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert!(summary.id.is_none());
        assert_eq!(summary.data.lesson_subject_ids, vec![25, 26]);
        assert_eq!(summary.data.reviews_per_hour[0].subject_ids, vec![21, 23]);
    }

    #[test]
    fn empty_collection_has_null_updated_at() {
        let json = r#"{
            "object": "collection",
            "url": "https://api.example/v2/study_materials",
            "pages": {"next_url": null, "previous_url": null, "per_page": 500},
            "total_count": 0,
            "data_updated_at": null,
            "data": []
        }"#;
        let index: StudyMaterialsIndex = serde_json::from_str(json).unwrap();
        assert!(index.is_empty());
        assert!(!index.has_next_page());
        assert!(index.data_updated_at.is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"created_at": "2017-01-01T00:00:00Z", "assignment_id": 1}"#;
        assert!(serde_json::from_str::<ReviewData>(json).is_err());
    }
}
