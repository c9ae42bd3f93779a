//! Shared helpers for the records integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use p3510_records::{build_router, db, AppState};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

pub async fn setup() -> (Router, SqlitePool) {
    let pool = db::connect_in_memory().await.expect("in-memory database");
    let app = build_router(AppState::new(pool.clone()));
    (app, pool)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(encode_form(pairs)))
        .unwrap()
}

pub fn post_json(uri: &str, value: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(text: &str) -> String {
    let mut out = String::new();
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => out.push(byte as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert a dean and return its id
pub async fn seed_dean(pool: &SqlitePool) -> i64 {
    sqlx::query(
        "INSERT INTO Deans (name, email, school, title, active) \
         VALUES ('Grace Hopper', 'grace@school.edu', 'Computing', 'Dean', 1)",
    )
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

/// Insert a student directly and return its id
pub async fn seed_student(pool: &SqlitePool, dean_id: i64, name: &str, email: &str, ssn: &str, zip: i64) -> i64 {
    sqlx::query(
        "INSERT INTO Students (name, ssn, email, date_of_birth, country_of_birth, gender, grad_year, \
         insurance_provider, race, zip, street, academic_difficulty, dean_id, active) \
         VALUES (?, ?, ?, '2004-05-06', 'Canada', 'Female', 2026, 'Aetna', 'White', ?, '1 Main St', 0, ?, 1)",
    )
    .bind(name)
    .bind(ssn)
    .bind(email)
    .bind(zip)
    .bind(dean_id)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}
