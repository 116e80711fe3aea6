mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
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

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gender_distribution_counts_per_class(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    let class_id = seed_class(&pool, "Counted", 500.0, None).await;
    let other_class = seed_class(&pool, "Other", 500.0, None).await;
    seed_student(&pool, "A", "male", 0.0, Some(class_id)).await;
    seed_student(&pool, "B", "male", 0.0, Some(class_id)).await;
    seed_student(&pool, "C", "female", 0.0, Some(class_id)).await;
    seed_student(&pool, "D", "other", 0.0, Some(class_id)).await;
    // must not leak into the counted class
    seed_student(&pool, "E", "female", 0.0, Some(other_class)).await;
    seed_student(&pool, "F", "female", 0.0, None).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/analytics/classes/{}/genders", class_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let distribution: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(distribution["male"], 2);
    assert_eq!(distribution["female"], 1);
    assert_eq!(distribution["other"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gender_distribution_empty_class_is_all_zero(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "student").await;
    let class_id = seed_class(&pool, "Empty", 500.0, None).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/analytics/classes/{}/genders", class_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let distribution: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(distribution["male"], 0);
    assert_eq!(distribution["female"], 0);
    assert_eq!(distribution["other"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gender_distribution_unknown_class_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/analytics/classes/{}/genders", Uuid::new_v4()),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_financial_summary_math(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    seed_teacher(&pool, "T1", "female", 40000.0).await;
    seed_teacher(&pool, "T2", "male", 35000.0).await;

    // 3 students at 1000 each, 1 student at 500, one unenrolled student
    let class_a = seed_class(&pool, "A", 1000.0, None).await;
    let class_b = seed_class(&pool, "B", 500.0, None).await;
    seed_class(&pool, "No Students", 2000.0, None).await;
    seed_student(&pool, "S1", "male", 1000.0, Some(class_a)).await;
    seed_student(&pool, "S2", "female", 0.0, Some(class_a)).await;
    seed_student(&pool, "S3", "other", 500.0, Some(class_a)).await;
    seed_student(&pool, "S4", "male", 500.0, Some(class_b)).await;
    seed_student(&pool, "S5", "male", 0.0, None).await;

    let response = app
        .oneshot(authed("GET", "/api/analytics/financial-summary", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let summary: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary["total_salaries"], 75000.0);
    assert_eq!(summary["total_fees"], 3500.0);
    assert_eq!(summary["net_balance"], -71500.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_financial_summary_empty_school_is_zero(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = token_for_role(&app, &pool, "admin").await;

    let response = app
        .oneshot(authed("GET", "/api/analytics/financial-summary", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let summary: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary["total_salaries"], 0.0);
    assert_eq!(summary["total_fees"], 0.0);
    assert_eq!(summary["net_balance"], 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_financial_summary_is_admin_only(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let teacher_token = token_for_role(&app, &pool, "teacher").await;
    let student_token = token_for_role(&app, &pool, "student").await;

    for token in [&teacher_token, &student_token] {
        let response = app
            .clone()
            .oneshot(authed("GET", "/api/analytics/financial-summary", token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gender_distribution_requires_a_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let class_id = seed_class(&pool, "Locked", 500.0, None).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/analytics/classes/{}/genders", class_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
