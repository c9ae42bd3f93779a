//! Integration tests for the records CRUD pages
//!
//! Tests cover:
//! - Navigation pages and list pages
//! - Student creation with duplicate email/SSN rejection
//! - Format validation messages on re-rendered forms
//! - Edit with self-exclusion from uniqueness checks
//! - Delete and missing-row handling

mod support;

use axum::http::StatusCode;
use support::*;

fn student_form<'a>(dean_id: &'a str, email: &'a str, ssn: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("name", "Ada Lovelace"),
        ("ssn", ssn),
        ("email", email),
        ("date_of_birth", "2004-12-10"),
        ("country_of_birth", "United Kingdom"),
        ("gender", "Female"),
        ("grad_year", "2026"),
        ("insurance_provider", "Blue Cross"),
        ("race", "White"),
        ("zip", "84101"),
        ("street", "12 St James Square"),
        ("academic_difficulty", "0"),
        ("dean_id", dean_id),
        ("consent_scope", ""),
        ("active", "1"),
    ]
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup().await;

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "p3510-records");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_navigation_pages() {
    let (app, _pool) = setup().await;

    let home = send(&app, get("/")).await;
    assert_eq!(home.status(), StatusCode::OK);
    let html = body_text(home).await;
    assert!(html.contains("Most Common"));
    assert!(html.contains(r#"href="/students""#));

    let tab = send(&app, get("/visitstab")).await;
    assert_eq!(tab.status(), StatusCode::OK);
    assert!(body_text(tab).await.contains(r#"href="/visits""#));

    for path in ["/peopletab", "/followupstab", "/misctab", "/visits", "/followups", "/providers"] {
        let response = send(&app, get(path)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let (app, _pool) = setup().await;

    let response = send(&app, get("/wizards")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_form_offers_references() {
    let (app, pool) = setup().await;
    let dean_id = seed_dean(&pool).await;

    let response = send(&app, get("/students/new")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(&format!(r#"<option value="{}">Grace Hopper</option>"#, dean_id)));
    assert!(html.contains(r#"name="ssn""#));
}

#[tokio::test]
async fn test_create_student_and_reject_duplicates() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await.to_string();

    let created = send(
        &app,
        post_form("/students/new", &student_form(&dean, "ada@school.edu", "123-45-6789")),
    )
    .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(created.headers()["location"], "/students");

    let stored: String = sqlx::query_scalar("SELECT ssn FROM Students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "123456789");

    let same_email = send(
        &app,
        post_form("/students/new", &student_form(&dean, "ada@school.edu", "987-65-4321")),
    )
    .await;
    assert_eq!(same_email.status(), StatusCode::OK);
    let html = body_text(same_email).await;
    assert!(html.contains("This email is already in use by another student."));
    assert!(!html.contains("This ssn is already in use"));

    // Same SSN written differently still collides
    let same_ssn = send(
        &app,
        post_form("/students/new", &student_form(&dean, "lovelace@school.edu", "123 45 6789")),
    )
    .await;
    assert_eq!(same_ssn.status(), StatusCode::OK);
    let html = body_text(same_ssn).await;
    assert!(html.contains("This ssn is already in use by another student."));
    assert!(html.contains(r#"value="lovelace@school.edu""#));

    assert_eq!(count(&pool, "Students").await, 1);
}

#[tokio::test]
async fn test_invalid_fields_are_reported_together() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await.to_string();

    let mut form = student_form(&dean, "ada@school", "12-34");
    form[0] = ("name", "Ada 2");
    form[6] = ("grad_year", "twenty");

    let response = send(&app, post_form("/students/new", &form)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Invalid string. Only letters are allowed."));
    assert!(html.contains("Invalid SSN format. Expected format: 123-45-6789"));
    assert!(html.contains("Invalid email. Email must include @ and end in 3-letter top level domain."));
    assert!(html.contains("Invalid integer. Only digits are allowed."));
    assert_eq!(count(&pool, "Students").await, 0);
}

#[tokio::test]
async fn test_course_code_validation() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await;
    let student = seed_student(&pool, dean, "Ada", "ada@school.edu", "123456789", 84101).await.to_string();

    let bad = send(
        &app,
        post_form("/struggle_courses/new", &[("student_id", &student), ("course_number", "MATH1010")]),
    )
    .await;
    assert!(body_text(bad).await.contains("Invalid course format. Expected format: ABCD-1234"));

    let good = send(
        &app,
        post_form("/struggle_courses/new", &[("student_id", &student), ("course_number", "MATH-1010")]),
    )
    .await;
    assert_eq!(good.status(), StatusCode::SEE_OTHER);

    let again = send(
        &app,
        post_form("/struggle_courses/new", &[("student_id", &student), ("course_number", "MATH-1010")]),
    )
    .await;
    assert!(body_text(again).await.contains("This student is already struggling with this course."));
    assert_eq!(count(&pool, "Struggle_Courses").await, 1);
}

#[tokio::test]
async fn test_edit_keeps_own_email_and_updates() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await;

    let edit = send(&app, get(&format!("/deans/{}/edit", dean))).await;
    assert_eq!(edit.status(), StatusCode::OK);
    assert!(body_text(edit).await.contains(r#"value="grace@school.edu""#));

    let response = send(
        &app,
        post_form(
            &format!("/deans/{}/edit", dean),
            &[
                ("name", "Grace Brewster Hopper"),
                ("email", "grace@school.edu"),
                ("school", "Computing"),
                ("title", "Dean"),
                ("active", "0"),
            ],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (name, active): (String, i64) = sqlx::query_as("SELECT name, active FROM Deans WHERE dean_id = ?")
        .bind(dean)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Grace Brewster Hopper");
    assert_eq!(active, 0);
}

#[tokio::test]
async fn test_date_order_on_assignments() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await;
    let student = seed_student(&pool, dean, "Ada", "ada@school.edu", "123456789", 84101).await.to_string();
    let counselor = sqlx::query(
        "INSERT INTO Counselors (name, ssn, email, salary, highest_degree, highest_degree_school, \
         yrs_experience, yrs_here, specialization, active) \
         VALUES ('Carl Rogers', '111223333', 'carl@school.edu', 60000, 'PhD', 'Columbia', 20, 5, 'Therapy', 1)",
    )
    .execute(&pool)
    .await
    .unwrap()
    .last_insert_rowid()
    .to_string();

    let response = send(
        &app,
        post_form(
            "/counselor_assignments/new",
            &[
                ("student_id", &student),
                ("counselor_id", &counselor),
                ("start_date", "2025-09-01"),
                ("end_date", "2025-01-01"),
                ("is_primary", "1"),
            ],
        ),
    )
    .await;
    assert!(body_text(response).await.contains("End date must be after start date."));
    assert_eq!(count(&pool, "Counselor_Assignments").await, 0);

    let response = send(
        &app,
        post_form(
            "/counselor_assignments/new",
            &[
                ("student_id", &student),
                ("counselor_id", &counselor),
                ("start_date", "2025-09-01"),
                ("end_date", ""),
                ("is_primary", "1"),
            ],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let list = body_text(send(&app, get("/counselor_assignments")).await).await;
    assert!(list.contains("Carl Rogers"));
    assert!(list.contains("ada@school.edu"));
}

#[tokio::test]
async fn test_delete_and_missing_rows() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await;

    let response = send(&app, get(&format!("/deans/{}/delete", dean))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/deans");
    assert_eq!(count(&pool, "Deans").await, 0);

    let edit = send(&app, get(&format!("/deans/{}/edit", dean))).await;
    assert_eq!(edit.status(), StatusCode::NOT_FOUND);

    let update = send(
        &app,
        post_form(&format!("/deans/{}/edit", dean), &[("name", "Nobody")]),
    )
    .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dean_with_students_is_not_deleted() {
    let (app, pool) = setup().await;
    let dean = seed_dean(&pool).await;
    seed_student(&pool, dean, "Ada Lovelace", "ada@school.edu", "123456789", 84101).await;

    let response = send(&app, get(&format!("/deans/{}/delete", dean))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count(&pool, "Deans").await, 1);
    assert_eq!(count(&pool, "Students").await, 1);
}

#[tokio::test]
async fn test_records_persist_in_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project3510.db");

    let pool = p3510_records::db::connect(&path).await.unwrap();
    let app = p3510_records::build_router(p3510_records::AppState::new(pool.clone()));
    let response = send(&app, post_form("/symptoms/new", &[("symptom", "Fatigue")])).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    pool.close().await;

    let reopened = p3510_records::db::connect(&path).await.unwrap();
    assert_eq!(count(&reopened, "Symptoms").await, 1);
}
