mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_team_membership_end_to_end() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "alice", "email": "alice@example.com", "password": "password123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let alice: Value = test::read_body_json(resp).await;
    assert!(alice.get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/api/teams/")
        .set_json(json!({"name": "Alpha"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let team: Value = test::read_body_json(resp).await;
    assert_eq!(team["members"], json!([]));

    let members_uri = format!("/api/teams/{}/members/", team["id"]);
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&members_uri)
            .set_json(json!({"user": alice["id"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri(&members_uri).to_request();
    let members: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        members,
        json!([{"id": alice["id"], "username": "alice", "email": "alice@example.com"}])
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/teams/{}", team["id"]))
        .to_request();
    let team: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(team["members"], json!([alice["id"]]));
}

#[actix_web::test]
async fn test_user_validation_and_duplicates() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"email": "nobody@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["username"], json!(["This field is required."]));

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "bob"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "bob"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["username"].is_array());
}

#[actix_web::test]
async fn test_malformed_body_and_unknown_ids() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    for uri in ["/api/users/99", "/api/teams/99/", "/api/activities/99", "/api/workouts/99", "/api/leaderboard/99"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_activity_with_unknown_user_is_rejected() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/activities/")
        .set_json(json!({
            "user": 404,
            "activity_type": "run",
            "duration": 30,
            "calories": 250,
            "date": "2024-01-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["user"].is_array());
}

#[actix_web::test]
async fn test_activity_update_and_delete() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "carol"}))
        .to_request();
    let carol: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/activities/")
        .set_json(json!({
            "user": carol["id"],
            "activity_type": "swim",
            "duration": 60,
            "calories": 500,
            "date": "2024-01-03"
        }))
        .to_request();
    let activity: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(activity["user"], carol["id"]);
    let uri = format!("/api/activities/{}/", activity["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({"calories": 550}))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["calories"], 550);
    assert_eq!(patched["activity_type"], "swim");

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"calories": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["activity_type"].is_array());

    let req = test::TestRequest::get()
        .uri(&format!("/api/activities/?user={}", carol["id"]))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_leaderboard_ranking_over_http() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let mut team_ids = Vec::new();
    for name in ["Team Alpha", "Team Beta"] {
        let req = test::TestRequest::post()
            .uri("/api/teams/")
            .set_json(json!({"name": name}))
            .to_request();
        let team: Value = test::call_and_read_body_json(&app, req).await;
        team_ids.push(team["id"].clone());
    }

    for (team, score) in [(&team_ids[0], 500), (&team_ids[1], 650)] {
        let req = test::TestRequest::post()
            .uri("/api/leaderboard/")
            .set_json(json!({"team": team, "score": score, "week": "2024-01-07"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/leaderboard/")
        .set_json(json!({"team": team_ids[0], "score": 1, "week": "2024-01-07"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/leaderboard/").to_request();
    let entries: Value = test::call_and_read_body_json(&app, req).await;
    let scores: Vec<i64> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![650, 500]);
    assert_eq!(entries[0]["team"], team_ids[1]);
    assert_eq!(entries[0]["week"], "2024-01-07");
}

#[actix_web::test]
async fn test_workout_partial_update_keeps_suggestions() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "alice"}))
        .to_request();
    let alice: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/workouts/")
        .set_json(json!({
            "name": "Cardio Blast",
            "description": "Intense cardio",
            "difficulty": "Medium",
            "suggested_for": [alice["id"]]
        }))
        .to_request();
    let workout: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(workout["suggested_for"], json!([alice["id"]]));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/workouts/{}/", workout["id"]))
        .set_json(json!({"difficulty": "High"}))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["difficulty"], "High");
    assert_eq!(patched["suggested_for"], json!([alice["id"]]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/workouts/{}/suggested_for/{}/", workout["id"], alice["id"]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/workouts/{}/suggested_for/", workout["id"]))
        .to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users, json!([]));
}

#[actix_web::test]
async fn test_invalid_pagination_rejected() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::get().uri("/api/users/?limit=-1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/users/?limit=many").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_api_root_lists_collections() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::get().uri("/api/").to_request();
    let root: Value = test::call_and_read_body_json(&app, req).await;
    for collection in ["users", "teams", "activities", "workouts", "leaderboard"] {
        assert!(root.get(collection).is_some());
    }
}

#[actix_web::test]
async fn test_wrong_types_are_reported_per_field() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/activities/")
        .set_json(json!({
            "user": 1,
            "activity_type": "run",
            "duration": "thirty",
            "calories": 250,
            "date": "2024-13-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["duration"], json!(["A valid integer is required."]));
    assert!(body["fields"]["date"].is_array());
    assert!(body["fields"].get("calories").is_none());

    let req = test::TestRequest::post()
        .uri("/api/teams/")
        .set_json(json!(["Team Alpha"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["non_field_errors"].is_array());
}

#[actix_web::test]
async fn test_null_is_not_absent() {
    let store = common::test_store().await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .set_json(json!({"username": "alice", "email": "alice@example.com"}))
        .to_request();
    let alice: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/users/{}", alice["id"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"username": "alice", "email": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["email"], json!(["This field may not be null."]));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored["email"], "alice@example.com");

    let req = test::TestRequest::post()
        .uri("/api/teams/")
        .set_json(json!({"name": "Team Alpha", "members": [alice["id"]], "id": 77}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}
