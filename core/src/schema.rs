//! Schema registry: which response shapes the client understands.
//!
//! # Design
//! Each resource or collection kind is described by a `SchemaDescriptor`: a
//! URL rule deciding whether a response belongs to it and a decode function
//! producing the typed `Payload`. Descriptors live in an ordered `Vec` and are
//! scanned linearly. Order matters: collection rules match on substring and
//! resource rules on suffix, so a URL can satisfy more than one rule and the
//! first registered descriptor wins.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::types::{
    AssignmentsIndex, LevelProgressionsIndex, ReviewStatisticsIndex, ReviewsIndex,
    StudyMaterialsIndex, SubjectsIndex, Summary, User,
};

/// One of the eight resource/collection categories the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    User,
    Subjects,
    Assignments,
    ReviewStatistics,
    StudyMaterials,
    Summary,
    Reviews,
    LevelProgression,
}

impl Kind {
    /// All kinds in registration order.
    pub const ALL: [Kind; 8] = [
        Kind::User,
        Kind::Subjects,
        Kind::Assignments,
        Kind::ReviewStatistics,
        Kind::StudyMaterials,
        Kind::Summary,
        Kind::Reviews,
        Kind::LevelProgression,
    ];

    /// Path suffix appended to the API root to fetch this kind.
    pub fn path(self) -> &'static str {
        match self {
            Kind::User => "/user",
            Kind::Subjects => "/subjects",
            Kind::Assignments => "/assignments",
            Kind::ReviewStatistics => "/review_statistics",
            Kind::StudyMaterials => "/study_materials",
            Kind::Summary => "/summary",
            Kind::Reviews => "/reviews",
            Kind::LevelProgression => "/level_progression",
        }
    }

    /// Whether the endpoint answers with a paginated collection.
    pub fn is_collection(self) -> bool {
        !matches!(self, Kind::User | Kind::Summary)
    }

    /// The URL rule responses of this kind are matched with.
    pub fn rule(self) -> UrlRule {
        if self.is_collection() {
            UrlRule::Contains(self.path())
        } else {
            UrlRule::EndsWith(self.path())
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path()[1..])
    }
}

impl FromStr for Kind {
    type Err = String;

    /// Accepts the path form with or without the leading slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/');
        Kind::ALL
            .into_iter()
            .find(|kind| &kind.path()[1..] == name)
            .ok_or_else(|| format!("unknown endpoint kind: {s}"))
    }
}

/// URL matching rule. Fixed per kind, not configurable per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// Collections: the pattern may appear anywhere (query strings follow it).
    Contains(&'static str),
    /// Single resources and reports: the URL must end with the pattern.
    EndsWith(&'static str),
}

impl UrlRule {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlRule::Contains(pattern) => url.contains(pattern),
            UrlRule::EndsWith(pattern) => url.ends_with(pattern),
        }
    }
}

/// A decoded response body, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    User(User),
    Subjects(SubjectsIndex),
    Assignments(AssignmentsIndex),
    ReviewStatistics(ReviewStatisticsIndex),
    StudyMaterials(StudyMaterialsIndex),
    Summary(Summary),
    Reviews(ReviewsIndex),
    LevelProgression(LevelProgressionsIndex),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::User(_) => Kind::User,
            Payload::Subjects(_) => Kind::Subjects,
            Payload::Assignments(_) => Kind::Assignments,
            Payload::ReviewStatistics(_) => Kind::ReviewStatistics,
            Payload::StudyMaterials(_) => Kind::StudyMaterials,
            Payload::Summary(_) => Kind::Summary,
            Payload::Reviews(_) => Kind::Reviews,
            Payload::LevelProgression(_) => Kind::LevelProgression,
        }
    }
}

pub type DecodeFn = fn(&[u8]) -> Result<Payload, serde_json::Error>;

/// Immutable description of one response schema.
#[derive(Clone, Copy)]
pub struct SchemaDescriptor {
    pub kind: Kind,
    pub rule: UrlRule,
    pub decode: DecodeFn,
}

impl SchemaDescriptor {
    /// The built-in descriptor for `kind`.
    pub fn for_kind(kind: Kind) -> Self {
        let decode: DecodeFn = match kind {
            Kind::User => |b: &[u8]| serde_json::from_slice(b).map(Payload::User),
            Kind::Subjects => |b: &[u8]| serde_json::from_slice(b).map(Payload::Subjects),
            Kind::Assignments => |b: &[u8]| serde_json::from_slice(b).map(Payload::Assignments),
            Kind::ReviewStatistics => |b: &[u8]| serde_json::from_slice(b).map(Payload::ReviewStatistics),
            Kind::StudyMaterials => |b: &[u8]| serde_json::from_slice(b).map(Payload::StudyMaterials),
            Kind::Summary => |b: &[u8]| serde_json::from_slice(b).map(Payload::Summary),
            Kind::Reviews => |b: &[u8]| serde_json::from_slice(b).map(Payload::Reviews),
            Kind::LevelProgression => |b: &[u8]| serde_json::from_slice(b).map(Payload::LevelProgression),
        };
        Self {
            kind,
            rule: kind.rule(),
            decode,
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.rule.matches(url)
    }
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("kind", &self.kind)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

/// Ordered set of descriptors. Append-only; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    descriptors: Vec<SchemaDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in kind, in `Kind::ALL` order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for kind in Kind::ALL {
            registry.register(SchemaDescriptor::for_kind(kind));
        }
        registry
    }

    /// Process-wide standard registry, built on first use.
    pub fn global() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(SchemaRegistry::standard)
    }

    pub fn register(&mut self, descriptor: SchemaDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Descriptors in registration order.
    pub fn all(&self) -> &[SchemaDescriptor] {
        &self.descriptors
    }

    /// First descriptor whose rule matches `url`.
    pub fn find(&self, url: &str) -> Option<&SchemaDescriptor> {
        self.descriptors.iter().find(|d| d.matches(url))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_keeps_registration_order() {
        let registry = SchemaRegistry::standard();
        let kinds: Vec<Kind> = registry.all().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, Kind::ALL.to_vec());
    }

    #[test]
    fn collection_rule_matches_substring() {
        let rule = Kind::Reviews.rule();
        assert!(rule.matches("https://api.example/v2/reviews"));
        assert!(rule.matches("https://api.example/v2/reviews?page_after_id=10"));
        assert!(!rule.matches("https://api.example/v2/summary"));
    }

    #[test]
    fn resource_rule_requires_suffix() {
        let rule = Kind::User.rule();
        assert!(rule.matches("https://api.example/v2/user"));
        assert!(!rule.matches("https://api.example/v2/user?x=1"));
        assert!(!rule.matches("https://api.example/v2/users/5"));
    }

    #[test]
    fn kind_parses_path_forms() {
        assert_eq!("reviews".parse::<Kind>().unwrap(), Kind::Reviews);
        assert_eq!("/level_progression".parse::<Kind>().unwrap(), Kind::LevelProgression);
        assert_eq!(" summary ".parse::<Kind>().unwrap(), Kind::Summary);
        assert!("lessons".parse::<Kind>().is_err());
    }

    #[test]
    fn kind_display_drops_leading_slash() {
        assert_eq!(Kind::ReviewStatistics.to_string(), "review_statistics");
    }

    #[test]
    fn find_returns_first_registered_match() {
        let mut registry = SchemaRegistry::new();
        registry.register(SchemaDescriptor::for_kind(Kind::Subjects));
        registry.register(SchemaDescriptor {
            kind: Kind::Summary,
            rule: UrlRule::EndsWith("/summary"),
            decode: SchemaDescriptor::for_kind(Kind::Summary).decode,
        });
        let found = registry.find("https://api.example/v2/subjects/summary").unwrap();
        assert_eq!(found.kind, Kind::Subjects);
    }

    #[test]
    fn global_registry_is_standard() {
        assert_eq!(SchemaRegistry::global().len(), Kind::ALL.len());
    }
}
