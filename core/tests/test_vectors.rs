//! Verify classification against the JSON vectors in `test-vectors/`.
//!
//! Each case gives a response URL and body and the expected outcome:
//! decoded into a kind, unrecognized, or a decode error for a kind.

use wanikani_core::types::{
    AssignmentsIndex, LevelProgressionsIndex, ReviewStatisticsIndex, ReviewsIndex,
    StudyMaterialsIndex, SubjectsIndex, Summary, User,
};
use wanikani_core::{classify_and_decode, Kind, Payload, SchemaRegistry};

/// Decode `body` directly into the concrete type for `kind`.
fn reference_decode(kind: Kind, body: &[u8]) -> Payload {
    match kind {
        Kind::User => Payload::User(serde_json::from_slice::<User>(body).unwrap()),
        Kind::Subjects => Payload::Subjects(serde_json::from_slice::<SubjectsIndex>(body).unwrap()),
        Kind::Assignments => {
            Payload::Assignments(serde_json::from_slice::<AssignmentsIndex>(body).unwrap())
        }
        Kind::ReviewStatistics => Payload::ReviewStatistics(
            serde_json::from_slice::<ReviewStatisticsIndex>(body).unwrap(),
        ),
        Kind::StudyMaterials => {
            Payload::StudyMaterials(serde_json::from_slice::<StudyMaterialsIndex>(body).unwrap())
        }
        Kind::Summary => Payload::Summary(serde_json::from_slice::<Summary>(body).unwrap()),
        Kind::Reviews => Payload::Reviews(serde_json::from_slice::<ReviewsIndex>(body).unwrap()),
        Kind::LevelProgression => Payload::LevelProgression(
            serde_json::from_slice::<LevelProgressionsIndex>(body).unwrap(),
        ),
    }
}

fn total_count(payload: &Payload) -> Option<u64> {
    match payload {
        Payload::Subjects(c) => Some(c.total_count),
        Payload::Assignments(c) => Some(c.total_count),
        Payload::ReviewStatistics(c) => Some(c.total_count),
        Payload::StudyMaterials(c) => Some(c.total_count),
        Payload::Reviews(c) => Some(c.total_count),
        Payload::LevelProgression(c) => Some(c.total_count),
        Payload::User(_) | Payload::Summary(_) => None,
    }
}

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let registry = SchemaRegistry::standard();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let body = match case.get("body_raw") {
            Some(raw) => raw.as_str().unwrap().as_bytes().to_vec(),
            None => serde_json::to_vec(&case["body"]).unwrap(),
        };
        let expected_kind: Option<Kind> = case
            .get("kind")
            .map(|k| serde_json::from_value(k.clone()).unwrap());

        let result = classify_and_decode(&registry, url, &body);

        match case["outcome"].as_str().unwrap() {
            "decoded" => {
                let payload = result
                    .unwrap_or_else(|e| panic!("{name}: unexpected decode error: {e}"))
                    .unwrap_or_else(|| panic!("{name}: unexpectedly unrecognized"));
                assert_eq!(Some(payload.kind()), expected_kind, "{name}: kind");
                assert_eq!(payload, reference_decode(payload.kind(), &body), "{name}: payload");
                if let Some(expected) = case.get("total_count") {
                    assert_eq!(total_count(&payload), expected.as_u64(), "{name}: total_count");
                }
            }
            "unrecognized" => {
                assert!(matches!(result, Ok(None)), "{name}: expected unrecognized");
            }
            "decode_error" => {
                let err = result.expect_err(name);
                assert_eq!(Some(err.kind), expected_kind, "{name}: kind");
                assert_eq!(err.body, body, "{name}: raw body retained");
            }
            other => panic!("{name}: unknown outcome: {other}"),
        }
    }
}

#[test]
fn every_kind_has_a_decoded_vector() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let mut covered: Vec<Kind> = vectors["cases"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|case| case["outcome"] == "decoded")
        .map(|case| serde_json::from_value(case["kind"].clone()).unwrap())
        .collect();
    covered.sort();
    covered.dedup();
    assert_eq!(covered, Kind::ALL.to_vec());
}
