use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use schoolhouse::config::cors::CorsConfig;
use schoolhouse::config::jwt::JwtConfig;
use schoolhouse::router::init_router;
use schoolhouse::state::AppState;
use schoolhouse::utils::password::hash_password;

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

/// Inserts a principal with a hashed password.
/// `role` is one of "admin", "teacher", "student".
#[allow(dead_code)]
pub async fn create_test_principal(pool: &PgPool, email: &str, password: &str, role: &str) -> Uuid {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO principals (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs in and returns the bearer token. Consumes the app.
#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str, role: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password,
                "role": role
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub async fn seed_teacher(pool: &PgPool, name: &str, gender: &str, salary: f64) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO teachers (name, gender, dob, contact_details, salary)
         VALUES ($1, $2, '1980-06-15', 'teacher@school.test', $3)
         RETURNING id",
    )
    .bind(name)
    .bind(gender)
    .bind(salary)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn seed_class(
    pool: &PgPool,
    name: &str,
    student_fees: f64,
    teacher_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (name, year, teacher_id, student_fees)
         VALUES ($1, 2024, $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind(teacher_id)
    .bind(student_fees)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn seed_student(
    pool: &PgPool,
    name: &str,
    gender: &str,
    fees_paid: f64,
    class_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (name, gender, dob, contact_details, fees_paid, class_id)
         VALUES ($1, $2, '2012-03-01', 'parent@example.com', $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(gender)
    .bind(fees_paid)
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
