//! Canned response bodies, one per endpoint.

use serde_json::{json, Value};

const API: &str = "https://api.wanikani.com/v2";

fn collection(path: &str, per_page: u32, updated_at: Option<&str>, data: Vec<Value>) -> Value {
    json!({
        "object": "collection",
        "url": format!("{API}{path}"),
        "pages": {"next_url": null, "previous_url": null, "per_page": per_page},
        "total_count": data.len(),
        "data_updated_at": updated_at,
        "data": data,
    })
}

pub fn user() -> Value {
    json!({
        "object": "user",
        "url": format!("{API}/user"),
        "data_updated_at": "2018-04-06T14:26:53.022245Z",
        "data": {
            "username": "Hinata",
            "level": 5,
            "started_at": "2012-05-11T00:52:18.958466Z",
            "subscribed": true,
            "current_vacation_started_at": null
        }
    })
}

pub fn summary() -> Value {
    json!({
        "object": "report",
        "url": format!("{API}/summary"),
        "data_updated_at": "2018-04-11T21:00:00.000000Z",
        "data": {
            "lesson_subject_ids": [25, 26],
            "review_subject_ids": [21, 23, 24],
            "reviews_per_hour": [
                {"available_at": "2018-04-11T21:00:00.000000Z", "subject_ids": [21, 23]},
                {"available_at": "2018-04-11T22:00:00.000000Z", "subject_ids": [24]}
            ]
        }
    })
}

pub fn subjects() -> Value {
    collection(
        "/subjects",
        1000,
        Some("2018-04-09T18:08:59.946969Z"),
        vec![
            json!({
                "id": 1,
                "object": "radical",
                "url": format!("{API}/subjects/1"),
                "data_updated_at": "2018-03-29T23:13:14.064836Z",
                "data": {
                    "level": 1,
                    "created_at": "2012-02-27T18:08:16.000000Z",
                    "slug": "ground",
                    "character": "一",
                    "character_images": [],
                    "meanings": [{"meaning": "Ground", "primary": true}],
                    "document_url": "https://www.wanikani.com/radicals/ground"
                }
            }),
            json!({
                "id": 440,
                "object": "kanji",
                "url": format!("{API}/subjects/440"),
                "data_updated_at": "2018-03-29T23:14:30.805034Z",
                "data": {
                    "level": 1,
                    "created_at": "2012-02-27T19:55:19.000000Z",
                    "slug": "一",
                    "character": "一",
                    "meanings": [{"meaning": "One", "primary": true}],
                    "readings": [
                        {"reading": "いち", "primary": true},
                        {"reading": "ひと", "primary": false}
                    ],
                    "subject_component_ids": [1],
                    "document_url": "https://www.wanikani.com/kanji/%E4%B8%80"
                }
            }),
        ],
    )
}

pub fn assignments() -> Value {
    collection(
        "/assignments",
        500,
        Some("2017-11-29T19:37:03.571377Z"),
        vec![json!({
            "id": 80463006,
            "object": "assignment",
            "url": format!("{API}/assignments/80463006"),
            "data_updated_at": "2017-11-29T19:37:03.571377Z",
            "data": {
                "subject_id": 8761,
                "subject_type": "radical",
                "level": 1,
                "srs_stage": 8,
                "srs_stage_name": "Enlightened",
                "unlocked_at": "2017-09-05T23:38:10.695133Z",
                "started_at": "2017-09-05T23:41:28.980679Z",
                "passed_at": "2017-09-07T17:14:14.491889Z",
                "burned_at": null,
                "available_at": "2018-02-27T00:00:00.000000Z",
                "passed": true,
                "resurrected": false
            }
        })],
    )
}

pub fn review_statistics() -> Value {
    collection(
        "/review_statistics",
        500,
        Some("2018-04-05T04:59:06.512658Z"),
        vec![json!({
            "id": 80461982,
            "object": "review_statistic",
            "url": format!("{API}/review_statistics/80461982"),
            "data_updated_at": "2018-04-05T04:59:06.512658Z",
            "data": {
                "created_at": "2017-09-05T23:38:10.964821Z",
                "subject_id": 8761,
                "subject_type": "radical",
                "meaning_correct": 8,
                "meaning_incorrect": 0,
                "meaning_max_streak": 8,
                "meaning_current_streak": 8,
                "reading_correct": 1,
                "reading_incorrect": 0,
                "reading_max_streak": 1,
                "reading_current_streak": 1,
                "percentage_correct": 100
            }
        })],
    )
}

/// A learner with no notes yet: empty page, null `data_updated_at`.
pub fn study_materials() -> Value {
    collection("/study_materials", 500, None, Vec::new())
}

pub fn reviews() -> Value {
    collection(
        "/reviews",
        1000,
        Some("2017-12-20T01:10:17.578705Z"),
        vec![
            json!({
                "id": 534342,
                "object": "review",
                "url": format!("{API}/reviews/534342"),
                "data_updated_at": "2017-12-20T01:10:17.578705Z",
                "data": {
                    "created_at": "2017-12-20T01:00:59.255427Z",
                    "assignment_id": 32132,
                    "starting_srs_stage": 4,
                    "starting_srs_stage_name": "Apprentice IV",
                    "incorrect_meaning_answers": 1,
                    "incorrect_reading_answers": 0
                }
            }),
            json!({
                "id": 534343,
                "object": "review",
                "url": format!("{API}/reviews/534343"),
                "data_updated_at": "2017-12-20T01:12:40.112350Z",
                "data": {
                    "created_at": "2017-12-20T01:02:11.733311Z",
                    "assignment_id": 32133,
                    "starting_srs_stage": 1,
                    "starting_srs_stage_name": "Apprentice I",
                    "incorrect_meaning_answers": null,
                    "incorrect_reading_answers": null
                }
            }),
        ],
    )
}

pub fn level_progression() -> Value {
    collection(
        "/level_progression",
        500,
        Some("2017-09-28T01:24:11.715238Z"),
        vec![json!({
            "id": 49392,
            "object": "level_progression",
            "url": format!("{API}/level_progressions/49392"),
            "data_updated_at": "2017-09-28T01:24:11.715238Z",
            "data": {
                "created_at": "2017-09-28T01:24:11.715238Z",
                "level": 13,
                "unlocked_at": "2017-09-28T01:24:11.715238Z",
                "started_at": "2017-09-28T01:24:11.715238Z",
                "passed_at": null,
                "completed_at": null,
                "abandoned_at": null
            }
        })],
    )
}
