mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    create_test_principal, generate_unique_email, get_auth_token, seed_class, seed_student,
    seed_teacher, setup_test_app,
};

async fn token_for_role(app: &axum::Router, pool: &PgPool, role: &str) -> String {
    let email = generate_unique_email();
    create_test_principal(pool, &email, "password123", role).await;
    get_auth_token(app.clone(), &email, "password123", role).await
}

fn authed_json(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_class_and_it_is_listed(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;
    let teacher_id = seed_teacher(&pool, "Ms. Frizzle", "female", 48000.0).await;

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/classes",
            &token,
            json!({
                "name": "4B",
                "year": 2024,
                "teacher_id": teacher_id,
                "student_fees": 1200.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(created["name"], "4B");
    assert_eq!(created["teacher_id"], json!(teacher_id));
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(authed("GET", "/api/classes", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let list: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert!(list.iter().any(|c| c["id"] == json!(id)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_with_unknown_teacher_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/classes",
            &token,
            json!({
                "name": "4B",
                "year": 2024,
                "teacher_id": Uuid::new_v4(),
                "student_fees": 1200.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admin_cannot_write_classes(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let teacher_token = token_for_role(&app, &pool, "teacher").await;
    let student_token = token_for_role(&app, &pool, "student").await;
    let class_id = seed_class(&pool, "3C", 900.0, None).await;

    let payload = json!({
        "name": "X",
        "year": 2024,
        "teacher_id": null,
        "student_fees": 100.0
    });

    for token in [&teacher_token, &student_token] {
        let response = app
            .clone()
            .oneshot(authed_json("POST", "/api/classes", token, payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(authed(
                "DELETE",
                &format!("/api/classes/{}", class_id),
                token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_can_read_but_not_write_classes(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "student").await;
    let class_id = seed_class(&pool, "3C", 900.0, None).await;

    let response = app
        .clone()
        .oneshot(authed("GET", &format!("/api/classes/{}", class_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/classes/{}", class_id),
            &token,
            json!({ "name": "hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_classes_require_a_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/classes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_class_blocked_while_students_enrolled(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;
    let class_id = seed_class(&pool, "2A", 800.0, None).await;
    seed_student(&pool, "Enrolled Kid", "male", 400.0, Some(class_id)).await;

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/classes/{}", class_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // class survives the attempt
    let response = app
        .oneshot(authed("GET", &format!("/api/classes/{}", class_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_class_blocked_while_teacher_assigned(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;
    let class_id = seed_class(&pool, "2B", 800.0, None).await;
    let teacher_id = seed_teacher(&pool, "Mr. Chips", "male", 51000.0).await;
    sqlx::query("UPDATE teachers SET assigned_class_id = $1 WHERE id = $2")
        .bind(class_id)
        .bind(teacher_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/classes/{}", class_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unreferenced_class_succeeds(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;
    let class_id = seed_class(&pool, "Empty Class", 800.0, None).await;

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/classes/{}", class_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed("GET", &format!("/api/classes/{}", class_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_leaves_other_fields_alone(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;
    let class_id = seed_class(&pool, "5A", 1500.0, None).await;

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/classes/{}", class_id),
            &token,
            json!({ "name": "5A Renamed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let updated: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["name"], "5A Renamed");
    assert_eq!(updated["year"], 2024);
    assert_eq!(updated["student_fees"], 1500.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_class_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/classes/{}", Uuid::new_v4()),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
