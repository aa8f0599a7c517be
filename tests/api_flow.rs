#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end behaviour against PostgreSQL. Needs `TEST_DATABASE_URL`; each test
//! runs in its own schema and drops it afterwards.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use support::{send, TestApp};

fn user(n: u32) -> Value {
    json!({
        "name": format!("Student {n}"),
        "email": format!("s{n}@uni.edu"),
        "age": 18 + n,
        "student_id": format!("S{n}"),
    })
}

#[tokio::test]
async fn walkthrough_create_conflict_cascade() {
    let Some(app) = TestApp::spawn().await else { return };

    let (status, created) = app
        .post("/api/users", json!({ "name": "A", "email": "a@x.com", "age": 20, "student_id": "S1" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, body) = app
        .post("/api/users", json!({ "name": "B", "email": "a@x.com", "age": 22, "student_id": "S2" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "detail": "User already exists" }));

    let (status, project) = app.post("/api/projects", json!({ "name": "Thesis", "owner_id": 1 })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.delete("/api/users/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, projects) = app.get("/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!projects
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["project_id"] == project["project_id"]));

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_keys_leave_store_unchanged() {
    let Some(app) = TestApp::spawn().await else { return };

    assert_eq!(app.post("/api/users", user(1)).await.0, StatusCode::CREATED);

    let same_email = json!({ "name": "Other", "email": "s1@uni.edu", "age": 30, "student_id": "S99" });
    let same_student_id = json!({ "name": "Other", "email": "other@uni.edu", "age": 30, "student_id": "S1" });
    assert_eq!(app.post("/api/users", same_email).await.0, StatusCode::CONFLICT);
    assert_eq!(app.post("/api/users", same_student_id).await.0, StatusCode::CONFLICT);

    let (_, users) = app.get("/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["student_id"], "S1");
    assert_eq!(app.count("users").await, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn concurrent_duplicate_creates_have_one_winner() {
    let Some(app) = TestApp::spawn().await else { return };

    let (a, b) = tokio::join!(
        send(&app.router, Method::POST, "/api/users", Some(user(7))),
        send(&app.router, Method::POST, "/api/users", Some(user(7))),
    );
    let mut statuses = [a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(app.count("users").await, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn listing_and_reading_users() {
    let Some(app) = TestApp::spawn().await else { return };

    for n in [3, 1, 2] {
        assert_eq!(app.post("/api/users", user(n)).await.0, StatusCode::CREATED);
    }
    let (status, users) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = users.as_array().unwrap().iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let (status, second) = app.get("/api/users/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["student_id"], "S1");

    let (status, body) = app.get("/api/users/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");

    app.cleanup().await;
}

#[tokio::test]
async fn deleting_a_user_removes_every_owned_project() {
    let Some(app) = TestApp::spawn().await else { return };

    let (_, owner) = app.post("/api/users", user(1)).await;
    let (_, other) = app.post("/api/users", user(2)).await;
    let owner_id = owner["id"].as_i64().unwrap();
    for n in 0..3 {
        let (status, _) = app
            .post(&format!("/api/users/{owner_id}/projects"), json!({ "name": format!("P{n}") }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, kept) = app
        .post("/api/projects", json!({ "name": "Keep", "owner_id": other["id"] }))
        .await;

    assert_eq!(app.delete(&format!("/api/users/{owner_id}")).await.0, StatusCode::NO_CONTENT);

    let (owned,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
        .bind(owner_id as i32)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(owned, 0);
    let (_, projects) = app.get("/api/projects").await;
    assert_eq!(projects, json!([kept]));

    assert_eq!(app.get(&format!("/api/users/{owner_id}")).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&format!("/api/users/{owner_id}")).await.0, StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let Some(app) = TestApp::spawn().await else { return };

    let (_, before) = app.post("/api/users", user(1)).await;
    let (status, after) = app.patch("/api/users/S1", json!({ "age": 40, "name": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["age"], 40);
    for field in ["id", "name", "email", "student_id"] {
        assert_eq!(after[field], before[field], "{field} changed");
    }

    let (status, _) = app.patch("/api/users/S404", json!({ "age": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn put_requires_and_replaces_every_field() {
    let Some(app) = TestApp::spawn().await else { return };

    let (_, before) = app.post("/api/users", user(1)).await;

    let (status, body) = app.put("/api/users/S1", json!({ "name": "Only name" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let replacement = json!({ "name": "Renamed", "email": "new@uni.edu", "age": 33, "student_id": "S100" });
    let (status, after) = app.put("/api/users/S1", replacement).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["email"], "new@uni.edu");
    assert_eq!(after["student_id"], "S100");

    assert_eq!(app.patch("/api/users/S1", json!({ "age": 1 })).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/users/1").await.1["student_id"], "S100");

    app.cleanup().await;
}

#[tokio::test]
async fn updates_colliding_with_another_user_conflict() {
    let Some(app) = TestApp::spawn().await else { return };

    app.post("/api/users", user(1)).await;
    let (_, second) = app.post("/api/users", user(2)).await;

    let (status, body) = app.patch("/api/users/S2", json!({ "email": "s1@uni.edu" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User already exists");

    let mut replacement = user(2);
    replacement["student_id"] = json!("S1");
    assert_eq!(app.put("/api/users/S2", replacement).await.0, StatusCode::CONFLICT);

    let (_, unchanged) = app.get("/api/users/2").await;
    assert_eq!(unchanged, second);

    app.cleanup().await;
}

#[tokio::test]
async fn invalid_user_payloads_are_rejected_before_the_store() {
    let Some(app) = TestApp::spawn().await else { return };

    let cases = [
        json!({ "name": "A", "email": "a@x.com", "age": -1, "student_id": "S1" }),
        json!({ "name": "A", "email": "nope", "age": 20, "student_id": "S1" }),
        json!({ "name": "", "email": "a@x.com", "age": 20, "student_id": "S1" }),
        json!({ "name": "A", "email": "a@x.com", "age": "twenty", "student_id": "S1" }),
    ];
    for payload in cases {
        let (status, body) = app.post("/api/users", payload.clone()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
        assert!(body["detail"].is_string());
    }
    assert_eq!(app.count("users").await, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn project_for_missing_owner_is_not_found_and_not_persisted() {
    let Some(app) = TestApp::spawn().await else { return };

    let (status, body) = app.post("/api/projects", json!({ "name": "Orphan", "owner_id": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");

    let (status, _) = app.post("/api/users/99/projects", json!({ "name": "Orphan" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(app.count("projects").await, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn project_reads_embed_owner_and_filter_by_user() {
    let Some(app) = TestApp::spawn().await else { return };

    let (_, owner) = app.post("/api/users", user(1)).await;
    let (_, project) = app
        .post(
            "/api/users/1/projects",
            json!({ "name": "Compiler", "description": "LLVM backend" }),
        )
        .await;
    assert_eq!(project["owner_id"], 1);
    assert_eq!(project["description"], "LLVM backend");

    let (status, detailed) = app.get(&format!("/api/projects/{}", project["project_id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detailed["name"], "Compiler");
    assert_eq!(detailed["owner"], owner);

    assert_eq!(app.get("/api/projects/999").await.0, StatusCode::NOT_FOUND);

    let (_, mine) = app.get("/api/users/1/projects").await;
    assert_eq!(mine, json!([project]));
    let (status, nobody) = app.get("/api/users/42/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nobody, json!([]));

    app.cleanup().await;
}

#[tokio::test]
async fn project_updates_apply_full_and_partial_semantics() {
    let Some(app) = TestApp::spawn().await else { return };

    app.post("/api/users", user(1)).await;
    app.post("/api/users", user(2)).await;
    let (_, project) = app
        .post("/api/projects", json!({ "name": "Draft", "description": "v1", "owner_id": 1 }))
        .await;
    let uri = format!("/api/projects/{}", project["project_id"]);

    let (status, patched) = app.patch(&uri, json!({ "owner_id": 2, "description": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["owner_id"], 2);
    assert_eq!(patched["name"], "Draft");
    assert_eq!(patched["description"], "v1");

    let (status, replaced) = app.put(&uri, json!({ "name": "Final", "owner_id": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Final");
    assert_eq!(replaced["description"], Value::Null);

    let (status, body) = app.put(&uri, json!({ "name": "Final", "owner_id": 77 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Project already exists or owner invalid");
    assert_eq!(app.patch(&uri, json!({ "owner_id": 77 })).await.0, StatusCode::CONFLICT);

    let (_, current) = app.get(&uri).await;
    assert_eq!(current["owner_id"], 1);

    assert_eq!(app.patch("/api/projects/999", json!({ "name": "x" })).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        app.put("/api/projects/999", json!({ "name": "x", "owner_id": 1 })).await.0,
        StatusCode::NOT_FOUND
    );

    app.cleanup().await;
}

#[tokio::test]
async fn courses_page_by_ascending_id() {
    let Some(app) = TestApp::spawn().await else { return };

    for n in 1..=15 {
        let (status, _) = app
            .post(
                "/api/courses",
                json!({ "code": format!("C{n}"), "name": format!("Course {n}"), "credits": 3 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app.get("/api/courses?limit=5&offset=10").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = page.as_array().unwrap().iter().map(|c| c["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![11, 12, 13, 14, 15]);

    let (_, first) = app.get("/api/courses").await;
    assert_eq!(first.as_array().unwrap().len(), 10);
    assert_eq!(first[0]["code"], "C1");

    let (_, past_end) = app.get("/api/courses?offset=20").await;
    assert_eq!(past_end, json!([]));

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_course_code_conflicts() {
    let Some(app) = TestApp::spawn().await else { return };

    let course = json!({ "code": "CS101", "name": "Intro", "credits": 4 });
    assert_eq!(app.post("/api/courses", course.clone()).await.0, StatusCode::CREATED);
    let (status, body) = app.post("/api/courses", course).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Course already exists");
    assert_eq!(app.count("courses").await, 1);

    app.cleanup().await;
}
