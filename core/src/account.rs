//! Local account snapshot assembled from decoded responses.
//!
//! # Design
//! One slot per kind, each holding nothing or the most recently decoded
//! payload. `merge` overwrites a slot wholesale; there is no versioning and
//! no field-level merge. The account is serialized as JSON for an opaque
//! key-value store owned by the host.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::schema::{Kind, Payload};
use crate::types::{
    AssignmentsIndex, LevelProgressionsIndex, ReviewStatisticsIndex, ReviewsIndex,
    StudyMaterialsIndex, SubjectsIndex, Summary, User,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user: Option<User>,
    pub summary: Option<Summary>,
    pub subjects: Option<SubjectsIndex>,
    pub assignments: Option<AssignmentsIndex>,
    pub review_statistics: Option<ReviewStatisticsIndex>,
    pub study_materials: Option<StudyMaterialsIndex>,
    pub reviews: Option<ReviewsIndex>,
    pub level_progressions: Option<LevelProgressionsIndex>,
}

impl Account {
    /// Key the account is stored under in the host's store.
    pub const STORAGE_KEY: &'static str = "waniKaniAccount";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot for the payload's kind.
    pub fn merge(&mut self, payload: Payload) {
        match payload {
            Payload::User(v) => self.user = Some(v),
            Payload::Subjects(v) => self.subjects = Some(v),
            Payload::Assignments(v) => self.assignments = Some(v),
            Payload::ReviewStatistics(v) => self.review_statistics = Some(v),
            Payload::StudyMaterials(v) => self.study_materials = Some(v),
            Payload::Summary(v) => self.summary = Some(v),
            Payload::Reviews(v) => self.reviews = Some(v),
            Payload::LevelProgression(v) => self.level_progressions = Some(v),
        }
    }

    /// A copy of the slot for `kind`, if populated.
    pub fn snapshot(&self, kind: Kind) -> Option<Payload> {
        match kind {
            Kind::User => self.user.clone().map(Payload::User),
            Kind::Subjects => self.subjects.clone().map(Payload::Subjects),
            Kind::Assignments => self.assignments.clone().map(Payload::Assignments),
            Kind::ReviewStatistics => self.review_statistics.clone().map(Payload::ReviewStatistics),
            Kind::StudyMaterials => self.study_materials.clone().map(Payload::StudyMaterials),
            Kind::Summary => self.summary.clone().map(Payload::Summary),
            Kind::Reviews => self.reviews.clone().map(Payload::Reviews),
            Kind::LevelProgression => self.level_progressions.clone().map(Payload::LevelProgression),
        }
    }

    pub fn has(&self, kind: Kind) -> bool {
        match kind {
            Kind::User => self.user.is_some(),
            Kind::Subjects => self.subjects.is_some(),
            Kind::Assignments => self.assignments.is_some(),
            Kind::ReviewStatistics => self.review_statistics.is_some(),
            Kind::StudyMaterials => self.study_materials.is_some(),
            Kind::Summary => self.summary.is_some(),
            Kind::Reviews => self.reviews.is_some(),
            Kind::LevelProgression => self.level_progressions.is_some(),
        }
    }

    /// Populated kinds, in registration order.
    pub fn kinds(&self) -> Vec<Kind> {
        Kind::ALL.into_iter().filter(|k| self.has(*k)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(self).map_err(|e| PersistError::Serialize(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        serde_json::from_slice(bytes).map_err(|e| PersistError::Deserialize(e.to_string()))
    }

    pub fn save_to<S: AccountStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistError> {
        let bytes = self.to_bytes()?;
        store.save(Self::STORAGE_KEY, &bytes)
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub fn load_from<S: AccountStore + ?Sized>(store: &S) -> Result<Option<Self>, PersistError> {
        match store.load(Self::STORAGE_KEY)? {
            Some(bytes) => Self::from_bytes(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

/// Opaque key-value store provided by the host.
pub trait AccountStore {
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), PersistError>;
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;
}
