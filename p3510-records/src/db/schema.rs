//! Records schema
//!
//! Applied at startup; every statement is idempotent. Uniqueness rules live in
//! the entity descriptors and are checked before writes, not as constraints.
//! Rows referencing a deleted parent go with it, except optional references
//! on Issues, which are cleared. A dean cannot be deleted while students
//! still belong to them.

pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS Deans (
        dean_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        school TEXT NOT NULL,
        title TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Students (
        student_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        ssn TEXT NOT NULL,
        email TEXT NOT NULL,
        date_of_birth TEXT NOT NULL,
        country_of_birth TEXT NOT NULL,
        gender TEXT NOT NULL,
        grad_year INTEGER NOT NULL,
        insurance_provider TEXT NOT NULL,
        race TEXT NOT NULL,
        zip INTEGER NOT NULL,
        street TEXT NOT NULL,
        academic_difficulty INTEGER NOT NULL DEFAULT 0,
        dean_id INTEGER NOT NULL REFERENCES Deans(dean_id) ON DELETE RESTRICT,
        consent_scope TEXT,
        active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Counselors (
        counselor_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        ssn TEXT NOT NULL,
        email TEXT NOT NULL,
        salary INTEGER NOT NULL,
        highest_degree TEXT NOT NULL,
        highest_degree_school TEXT NOT NULL,
        yrs_experience INTEGER NOT NULL,
        yrs_here INTEGER NOT NULL,
        specialization TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Counselor_Assignments (
        assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        counselor_id INTEGER NOT NULL REFERENCES Counselors(counselor_id) ON DELETE CASCADE,
        start_date TEXT NOT NULL,
        end_date TEXT,
        is_primary INTEGER NOT NULL DEFAULT 0
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Healthcare_Providers (
        provider_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        address TEXT NOT NULL,
        specialization TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Symptoms (
        symptom_id INTEGER PRIMARY KEY AUTOINCREMENT,
        symptom TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Diagnoses (
        diagnosis_id INTEGER PRIMARY KEY AUTOINCREMENT,
        diagnosis TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Visits (
        visit_id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        in_person INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Issues (
        issue_id INTEGER PRIMARY KEY AUTOINCREMENT,
        diagnosis_id INTEGER NOT NULL REFERENCES Diagnoses(diagnosis_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        provider_id INTEGER REFERENCES Healthcare_Providers(provider_id) ON DELETE SET NULL,
        counselor_id INTEGER REFERENCES Counselors(counselor_id) ON DELETE SET NULL,
        visit_id INTEGER REFERENCES Visits(visit_id) ON DELETE SET NULL,
        comments TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Reported_Symptoms (
        reported_symptom_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        symptom_id INTEGER NOT NULL REFERENCES Symptoms(symptom_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Diagnosis_Categorization (
        diagnosis_categorization_id INTEGER PRIMARY KEY AUTOINCREMENT,
        diagnosis_id INTEGER NOT NULL REFERENCES Diagnoses(diagnosis_id) ON DELETE CASCADE,
        category_id INTEGER NOT NULL REFERENCES Categories(category_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Symptom_Categorization (
        symptom_categorization_id INTEGER PRIMARY KEY AUTOINCREMENT,
        symptom_id INTEGER NOT NULL REFERENCES Symptoms(symptom_id) ON DELETE CASCADE,
        category_id INTEGER NOT NULL REFERENCES Categories(category_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Visit_Counselors (
        visit_counselor_id INTEGER PRIMARY KEY AUTOINCREMENT,
        visit_id INTEGER NOT NULL REFERENCES Visits(visit_id) ON DELETE CASCADE,
        counselor_id INTEGER NOT NULL REFERENCES Counselors(counselor_id) ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Visit_Comments (
        visit_comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        visit_id INTEGER NOT NULL REFERENCES Visits(visit_id) ON DELETE CASCADE,
        counselor_id INTEGER NOT NULL REFERENCES Counselors(counselor_id) ON DELETE CASCADE,
        comment TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Critical_Situations (
        situation_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        start_date TEXT NOT NULL,
        end_date TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Follow_Ups (
        follow_up_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        counselor_id INTEGER NOT NULL REFERENCES Counselors(counselor_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Tutors (
        tutor_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        specialty TEXT NOT NULL,
        age INTEGER NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Employment_Events (
        event_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        location TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Healthcare_Referrals (
        referral_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        provider_id INTEGER NOT NULL REFERENCES Healthcare_Providers(provider_id) ON DELETE CASCADE,
        resolution_details TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Dean_Referrals (
        referral_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        dean_id INTEGER NOT NULL REFERENCES Deans(dean_id) ON DELETE CASCADE,
        resolution_details TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Tutor_Referrals (
        referral_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        tutor_id INTEGER NOT NULL REFERENCES Tutors(tutor_id) ON DELETE CASCADE,
        resolution_details TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Job_Referrals (
        referral_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        event_id INTEGER NOT NULL REFERENCES Employment_Events(event_id) ON DELETE CASCADE,
        resolution_details TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Struggle_Courses (
        struggle_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        course_number TEXT NOT NULL
    )"#,
];
