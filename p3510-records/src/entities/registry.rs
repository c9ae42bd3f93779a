use super::{DateOrder, EntitySpec, Field, FieldKind::*, Reference, Tab, UniqueKey};

const STUDENT: Reference = Reference {
    table: "Students",
    id_column: "student_id",
    label_column: "name",
};
const COUNSELOR: Reference = Reference {
    table: "Counselors",
    id_column: "counselor_id",
    label_column: "name",
};
const DEAN: Reference = Reference {
    table: "Deans",
    id_column: "dean_id",
    label_column: "name",
};
const PROVIDER: Reference = Reference {
    table: "Healthcare_Providers",
    id_column: "provider_id",
    label_column: "name",
};
const TUTOR: Reference = Reference {
    table: "Tutors",
    id_column: "tutor_id",
    label_column: "name",
};
const EVENT: Reference = Reference {
    table: "Employment_Events",
    id_column: "event_id",
    label_column: "name",
};
const SYMPTOM: Reference = Reference {
    table: "Symptoms",
    id_column: "symptom_id",
    label_column: "symptom",
};
const DIAGNOSIS: Reference = Reference {
    table: "Diagnoses",
    id_column: "diagnosis_id",
    label_column: "diagnosis",
};
const CATEGORY: Reference = Reference {
    table: "Categories",
    id_column: "category_id",
    label_column: "category",
};
const VISIT: Reference = Reference {
    table: "Visits",
    id_column: "visit_id",
    label_column: "date",
};

pub static ENTITIES: &[&EntitySpec] = &[
    &STUDENTS,
    &COUNSELORS,
    &DEANS,
    &TUTORS,
    &PROVIDERS,
    &COUNSELOR_ASSIGNMENTS,
    &VISITS,
    &VISIT_COUNSELORS,
    &VISIT_COMMENTS,
    &ISSUES,
    &REPORTED_SYMPTOMS,
    &CRITICAL_SITUATIONS,
    &FOLLOW_UPS,
    &HEALTHCARE_REFERRALS,
    &DEAN_REFERRALS,
    &TUTOR_REFERRALS,
    &JOB_REFERRALS,
    &SYMPTOMS,
    &DIAGNOSES,
    &CATEGORIES,
    &DIAGNOSIS_CATEGORIZATION,
    &SYMPTOM_CATEGORIZATION,
    &EMPLOYMENT_EVENTS,
    &STRUGGLE_COURSES,
];

// ---- People ----

static STUDENTS: EntitySpec = EntitySpec {
    path: "students",
    table: "Students",
    id_column: "student_id",
    title: "Students",
    singular: "Student",
    tab: Tab::People,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("ssn", "SSN", Ssn),
        Field::required("email", "Email", Email),
        Field::required("date_of_birth", "Date of Birth", Date),
        Field::required("country_of_birth", "Country of Birth", Name),
        Field::required("gender", "Gender", Name),
        Field::required("grad_year", "Graduation Year", Int),
        Field::required("insurance_provider", "Insurance Provider", Name),
        Field::required("race", "Race", Name),
        Field::required("zip", "Zip", Int),
        Field::required("street", "Street", Text),
        Field::required("academic_difficulty", "Academic Difficulty", Bool),
        Field::required("dean_id", "Dean", Ref(DEAN)),
        Field::optional("consent_scope", "Consent Scope", Text),
        Field::required("active", "Active", Bool),
    ],
    unique: &[
        UniqueKey {
            columns: &["email"],
            message: "This email is already in use by another student.",
        },
        UniqueKey {
            columns: &["ssn"],
            message: "This ssn is already in use by another student.",
        },
    ],
    date_order: None,
    list_sql: "SELECT s.student_id, s.name, s.email, s.grad_year, d.name, s.active \
               FROM Students s LEFT JOIN Deans d ON d.dean_id = s.dean_id \
               ORDER BY s.name",
    list_headers: &["Name", "Email", "Grad Year", "Dean", "Active"],
};

static COUNSELORS: EntitySpec = EntitySpec {
    path: "counselors",
    table: "Counselors",
    id_column: "counselor_id",
    title: "Counselors",
    singular: "Counselor",
    tab: Tab::People,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("ssn", "SSN", Ssn),
        Field::required("email", "Email", Email),
        Field::required("salary", "Salary", Int),
        Field::required("highest_degree", "Highest Degree", Name),
        Field::required("highest_degree_school", "Highest Degree School", Name),
        Field::required("yrs_experience", "Years of Experience", Int),
        Field::required("yrs_here", "Years Here", Int),
        Field::required("specialization", "Specialization", Name),
        Field::required("active", "Active", Bool),
    ],
    unique: &[
        UniqueKey {
            columns: &["email"],
            message: "This email is already in use by another counselor.",
        },
        UniqueKey {
            columns: &["ssn"],
            message: "This ssn is already in use by another counselor.",
        },
    ],
    date_order: None,
    list_sql: "SELECT counselor_id, name, email, specialization, yrs_experience, salary, active \
               FROM Counselors ORDER BY name",
    list_headers: &["Name", "Email", "Specialization", "Experience", "Salary", "Active"],
};

static DEANS: EntitySpec = EntitySpec {
    path: "deans",
    table: "Deans",
    id_column: "dean_id",
    title: "Deans",
    singular: "Dean",
    tab: Tab::People,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("email", "Email", Email),
        Field::required("school", "School", Name),
        Field::required("title", "Title", Name),
        Field::required("active", "Active", Bool),
    ],
    unique: &[UniqueKey {
        columns: &["email"],
        message: "This email is already in use by another dean.",
    }],
    date_order: None,
    list_sql: "SELECT dean_id, name, email, school, title, active FROM Deans ORDER BY name",
    list_headers: &["Name", "Email", "School", "Title", "Active"],
};

static TUTORS: EntitySpec = EntitySpec {
    path: "tutors",
    table: "Tutors",
    id_column: "tutor_id",
    title: "Tutors",
    singular: "Tutor",
    tab: Tab::People,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("email", "Email", Email),
        Field::required("specialty", "Specialty", Name),
        Field::required("age", "Age", Int),
        Field::required("active", "Active", Bool),
    ],
    unique: &[UniqueKey {
        columns: &["email"],
        message: "This email is already in use by another tutor.",
    }],
    date_order: None,
    list_sql: "SELECT tutor_id, name, email, specialty, age, active FROM Tutors ORDER BY name",
    list_headers: &["Name", "Email", "Specialty", "Age", "Active"],
};

static PROVIDERS: EntitySpec = EntitySpec {
    path: "providers",
    table: "Healthcare_Providers",
    id_column: "provider_id",
    title: "Healthcare Providers",
    singular: "Healthcare Provider",
    tab: Tab::People,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("email", "Email", Email),
        Field::required("address", "Address", Text),
        Field::required("specialization", "Specialization", Name),
        Field::required("active", "Active", Bool),
    ],
    unique: &[UniqueKey {
        columns: &["email"],
        message: "This email is already in use by another healthcare provider.",
    }],
    date_order: None,
    list_sql: "SELECT provider_id, name, email, address, specialization, active \
               FROM Healthcare_Providers ORDER BY name",
    list_headers: &["Name", "Email", "Address", "Specialization", "Active"],
};

static COUNSELOR_ASSIGNMENTS: EntitySpec = EntitySpec {
    path: "counselor_assignments",
    table: "Counselor_Assignments",
    id_column: "assignment_id",
    title: "Counselor Assignments",
    singular: "Counselor Assignment",
    tab: Tab::People,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("counselor_id", "Counselor", Ref(COUNSELOR)),
        Field::required("start_date", "Start Date", Date),
        Field::optional("end_date", "End Date", Date),
        Field::required("is_primary", "Primary", Bool),
    ],
    unique: &[UniqueKey {
        columns: &["student_id", "counselor_id", "start_date"],
        message: "This assignment is already in the database.",
    }],
    date_order: Some(DateOrder {
        start: "start_date",
        end: "end_date",
    }),
    list_sql: "SELECT a.assignment_id, s.name, s.email, c.name, c.email, \
               a.start_date, a.end_date, a.is_primary \
               FROM Counselor_Assignments a \
               JOIN Students s ON s.student_id = a.student_id \
               JOIN Counselors c ON c.counselor_id = a.counselor_id \
               ORDER BY a.start_date DESC",
    list_headers: &[
        "Student",
        "Student Email",
        "Counselor",
        "Counselor Email",
        "Start",
        "End",
        "Primary",
    ],
};

// ---- Visits ----

static VISITS: EntitySpec = EntitySpec {
    path: "visits",
    table: "Visits",
    id_column: "visit_id",
    title: "Visits",
    singular: "Visit",
    tab: Tab::Visits,
    fields: &[
        Field::required("date", "Date", Date),
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("in_person", "In Person", Bool),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT v.visit_id, v.date, s.name, v.in_person \
               FROM Visits v JOIN Students s ON s.student_id = v.student_id \
               ORDER BY v.date DESC",
    list_headers: &["Date", "Student", "In Person"],
};

static VISIT_COUNSELORS: EntitySpec = EntitySpec {
    path: "visit_counselors",
    table: "Visit_Counselors",
    id_column: "visit_counselor_id",
    title: "Visit Counselors",
    singular: "Visit Counselor",
    tab: Tab::Visits,
    fields: &[
        Field::required("visit_id", "Visit", Ref(VISIT)),
        Field::required("counselor_id", "Counselor", Ref(COUNSELOR)),
    ],
    unique: &[UniqueKey {
        columns: &["visit_id", "counselor_id"],
        message: "This counselor is already assigned to this visit.",
    }],
    date_order: None,
    list_sql: "SELECT vc.visit_counselor_id, v.date, s.name, c.name \
               FROM Visit_Counselors vc \
               JOIN Visits v ON v.visit_id = vc.visit_id \
               JOIN Students s ON s.student_id = v.student_id \
               JOIN Counselors c ON c.counselor_id = vc.counselor_id \
               ORDER BY v.date DESC",
    list_headers: &["Visit Date", "Student", "Counselor"],
};

static VISIT_COMMENTS: EntitySpec = EntitySpec {
    path: "visit_comments",
    table: "Visit_Comments",
    id_column: "visit_comment_id",
    title: "Visit Comments",
    singular: "Visit Comment",
    tab: Tab::Visits,
    fields: &[
        Field::required("visit_id", "Visit", Ref(VISIT)),
        Field::required("counselor_id", "Counselor", Ref(COUNSELOR)),
        Field::required("comment", "Comment", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT vm.visit_comment_id, v.date, c.name, vm.comment \
               FROM Visit_Comments vm \
               JOIN Visits v ON v.visit_id = vm.visit_id \
               JOIN Counselors c ON c.counselor_id = vm.counselor_id \
               ORDER BY v.date DESC",
    list_headers: &["Visit Date", "Counselor", "Comment"],
};

static ISSUES: EntitySpec = EntitySpec {
    path: "issues",
    table: "Issues",
    id_column: "issue_id",
    title: "Issues",
    singular: "Issue",
    tab: Tab::Visits,
    fields: &[
        Field::required("diagnosis_id", "Diagnosis", Ref(DIAGNOSIS)),
        Field::required("date", "Date", Date),
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::optional("provider_id", "Provider", Ref(PROVIDER)),
        Field::optional("counselor_id", "Counselor", Ref(COUNSELOR)),
        Field::optional("visit_id", "Visit", Ref(VISIT)),
        Field::optional("comments", "Comments", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT i.issue_id, i.date, s.name, d.diagnosis, p.name, c.name, i.comments \
               FROM Issues i \
               JOIN Students s ON s.student_id = i.student_id \
               JOIN Diagnoses d ON d.diagnosis_id = i.diagnosis_id \
               LEFT JOIN Healthcare_Providers p ON p.provider_id = i.provider_id \
               LEFT JOIN Counselors c ON c.counselor_id = i.counselor_id \
               ORDER BY i.date DESC",
    list_headers: &["Date", "Student", "Diagnosis", "Provider", "Counselor", "Comments"],
};

static REPORTED_SYMPTOMS: EntitySpec = EntitySpec {
    path: "reported_symptoms",
    table: "Reported_Symptoms",
    id_column: "reported_symptom_id",
    title: "Reported Symptoms",
    singular: "Reported Symptom",
    tab: Tab::Visits,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("date", "Date", Date),
        Field::required("symptom_id", "Symptom", Ref(SYMPTOM)),
    ],
    unique: &[UniqueKey {
        columns: &["student_id", "date", "symptom_id"],
        message: "This symptom has already been reported.",
    }],
    date_order: None,
    list_sql: "SELECT r.reported_symptom_id, r.date, s.name, y.symptom \
               FROM Reported_Symptoms r \
               JOIN Students s ON s.student_id = r.student_id \
               JOIN Symptoms y ON y.symptom_id = r.symptom_id \
               ORDER BY r.date DESC",
    list_headers: &["Date", "Student", "Symptom"],
};

static CRITICAL_SITUATIONS: EntitySpec = EntitySpec {
    path: "critical_situations",
    table: "Critical_Situations",
    id_column: "situation_id",
    title: "Critical Situations",
    singular: "Critical Situation",
    tab: Tab::Visits,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("start_date", "Start Date", Date),
        Field::optional("end_date", "End Date", Date),
    ],
    unique: &[UniqueKey {
        columns: &["student_id", "start_date"],
        message: "This student is already in a critical situation beginning on this date.",
    }],
    date_order: Some(DateOrder {
        start: "start_date",
        end: "end_date",
    }),
    list_sql: "SELECT cs.situation_id, s.name, cs.start_date, cs.end_date \
               FROM Critical_Situations cs JOIN Students s ON s.student_id = cs.student_id \
               ORDER BY cs.start_date DESC",
    list_headers: &["Student", "Start", "End"],
};

// ---- Follow ups and referrals ----

static FOLLOW_UPS: EntitySpec = EntitySpec {
    path: "followups",
    table: "Follow_Ups",
    id_column: "follow_up_id",
    title: "Follow Ups",
    singular: "Follow Up",
    tab: Tab::FollowUps,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("counselor_id", "Counselor", Ref(COUNSELOR)),
        Field::required("date", "Date", Date),
        Field::required("completed", "Completed", Bool),
    ],
    unique: &[UniqueKey {
        columns: &["student_id", "counselor_id", "date"],
        message: "This student is already scheduled for a follow up with this counselor on this date.",
    }],
    date_order: None,
    list_sql: "SELECT f.follow_up_id, f.date, s.name, c.name, f.completed \
               FROM Follow_Ups f \
               JOIN Students s ON s.student_id = f.student_id \
               JOIN Counselors c ON c.counselor_id = f.counselor_id \
               ORDER BY f.date DESC",
    list_headers: &["Date", "Student", "Counselor", "Completed"],
};

static HEALTHCARE_REFERRALS: EntitySpec = EntitySpec {
    path: "healthcare_referrals",
    table: "Healthcare_Referrals",
    id_column: "referral_id",
    title: "Healthcare Referrals",
    singular: "Healthcare Referral",
    tab: Tab::FollowUps,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("date", "Date", Date),
        Field::required("provider_id", "Provider", Ref(PROVIDER)),
        Field::optional("resolution_details", "Resolution Details", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT r.referral_id, r.date, s.name, p.name, r.resolution_details \
               FROM Healthcare_Referrals r \
               LEFT JOIN Students s ON s.student_id = r.student_id \
               LEFT JOIN Healthcare_Providers p ON p.provider_id = r.provider_id \
               ORDER BY r.date DESC",
    list_headers: &["Date", "Student", "Provider", "Resolution"],
};

static DEAN_REFERRALS: EntitySpec = EntitySpec {
    path: "dean_referrals",
    table: "Dean_Referrals",
    id_column: "referral_id",
    title: "Dean Referrals",
    singular: "Dean Referral",
    tab: Tab::FollowUps,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("date", "Date", Date),
        Field::required("dean_id", "Dean", Ref(DEAN)),
        Field::optional("resolution_details", "Resolution Details", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT r.referral_id, r.date, s.name, d.name, r.resolution_details \
               FROM Dean_Referrals r \
               LEFT JOIN Students s ON s.student_id = r.student_id \
               LEFT JOIN Deans d ON d.dean_id = r.dean_id \
               ORDER BY r.date DESC",
    list_headers: &["Date", "Student", "Dean", "Resolution"],
};

static TUTOR_REFERRALS: EntitySpec = EntitySpec {
    path: "tutor_referrals",
    table: "Tutor_Referrals",
    id_column: "referral_id",
    title: "Tutor Referrals",
    singular: "Tutor Referral",
    tab: Tab::FollowUps,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("date", "Date", Date),
        Field::required("tutor_id", "Tutor", Ref(TUTOR)),
        Field::optional("resolution_details", "Resolution Details", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT r.referral_id, r.date, s.name, t.name, r.resolution_details \
               FROM Tutor_Referrals r \
               LEFT JOIN Students s ON s.student_id = r.student_id \
               LEFT JOIN Tutors t ON t.tutor_id = r.tutor_id \
               ORDER BY r.date DESC",
    list_headers: &["Date", "Student", "Tutor", "Resolution"],
};

static JOB_REFERRALS: EntitySpec = EntitySpec {
    path: "job_referrals",
    table: "Job_Referrals",
    id_column: "referral_id",
    title: "Job Referrals",
    singular: "Job Referral",
    tab: Tab::FollowUps,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("date", "Date", Date),
        Field::required("event_id", "Employment Event", Ref(EVENT)),
        Field::optional("resolution_details", "Resolution Details", Text),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT r.referral_id, r.date, s.name, e.name, r.resolution_details \
               FROM Job_Referrals r \
               LEFT JOIN Students s ON s.student_id = r.student_id \
               LEFT JOIN Employment_Events e ON e.event_id = r.event_id \
               ORDER BY r.date DESC",
    list_headers: &["Date", "Student", "Event", "Resolution"],
};

// ---- Misc lookups ----

static SYMPTOMS: EntitySpec = EntitySpec {
    path: "symptoms",
    table: "Symptoms",
    id_column: "symptom_id",
    title: "Symptoms",
    singular: "Symptom",
    tab: Tab::Misc,
    fields: &[Field::required("symptom", "Symptom", Name)],
    unique: &[],
    date_order: None,
    list_sql: "SELECT symptom_id, symptom FROM Symptoms ORDER BY symptom",
    list_headers: &["Symptom"],
};

static DIAGNOSES: EntitySpec = EntitySpec {
    path: "diagnoses",
    table: "Diagnoses",
    id_column: "diagnosis_id",
    title: "Diagnoses",
    singular: "Diagnosis",
    tab: Tab::Misc,
    fields: &[Field::required("diagnosis", "Diagnosis", Name)],
    unique: &[],
    date_order: None,
    list_sql: "SELECT diagnosis_id, diagnosis FROM Diagnoses ORDER BY diagnosis",
    list_headers: &["Diagnosis"],
};

static CATEGORIES: EntitySpec = EntitySpec {
    path: "categories",
    table: "Categories",
    id_column: "category_id",
    title: "Categories",
    singular: "Category",
    tab: Tab::Misc,
    fields: &[Field::required("category", "Category", Name)],
    unique: &[],
    date_order: None,
    list_sql: "SELECT category_id, category FROM Categories ORDER BY category",
    list_headers: &["Category"],
};

static DIAGNOSIS_CATEGORIZATION: EntitySpec = EntitySpec {
    path: "diagnosis_categorization",
    table: "Diagnosis_Categorization",
    id_column: "diagnosis_categorization_id",
    title: "Diagnosis Categorization",
    singular: "Diagnosis Category",
    tab: Tab::Misc,
    fields: &[
        Field::required("diagnosis_id", "Diagnosis", Ref(DIAGNOSIS)),
        Field::required("category_id", "Category", Ref(CATEGORY)),
    ],
    unique: &[UniqueKey {
        columns: &["diagnosis_id", "category_id"],
        message: "This diagnosis is already categorized as such.",
    }],
    date_order: None,
    list_sql: "SELECT dc.diagnosis_categorization_id, d.diagnosis, c.category \
               FROM Diagnosis_Categorization dc \
               JOIN Diagnoses d ON d.diagnosis_id = dc.diagnosis_id \
               JOIN Categories c ON c.category_id = dc.category_id \
               ORDER BY d.diagnosis",
    list_headers: &["Diagnosis", "Category"],
};

static SYMPTOM_CATEGORIZATION: EntitySpec = EntitySpec {
    path: "symptom_categorization",
    table: "Symptom_Categorization",
    id_column: "symptom_categorization_id",
    title: "Symptom Categorization",
    singular: "Symptom Category",
    tab: Tab::Misc,
    fields: &[
        Field::required("symptom_id", "Symptom", Ref(SYMPTOM)),
        Field::required("category_id", "Category", Ref(CATEGORY)),
    ],
    unique: &[UniqueKey {
        columns: &["symptom_id", "category_id"],
        message: "This symptom is already categorized as such.",
    }],
    date_order: None,
    list_sql: "SELECT sc.symptom_categorization_id, y.symptom, c.category \
               FROM Symptom_Categorization sc \
               JOIN Symptoms y ON y.symptom_id = sc.symptom_id \
               JOIN Categories c ON c.category_id = sc.category_id \
               ORDER BY y.symptom",
    list_headers: &["Symptom", "Category"],
};

static EMPLOYMENT_EVENTS: EntitySpec = EntitySpec {
    path: "employment_events",
    table: "Employment_Events",
    id_column: "event_id",
    title: "Employment Events",
    singular: "Employment Event",
    tab: Tab::Misc,
    fields: &[
        Field::required("name", "Name", Name),
        Field::required("date", "Date", Date),
        Field::required("type", "Type", Name),
        Field::required("location", "Location", Name),
    ],
    unique: &[],
    date_order: None,
    list_sql: "SELECT event_id, name, date, type, location \
               FROM Employment_Events ORDER BY date DESC",
    list_headers: &["Name", "Date", "Type", "Location"],
};

static STRUGGLE_COURSES: EntitySpec = EntitySpec {
    path: "struggle_courses",
    table: "Struggle_Courses",
    id_column: "struggle_id",
    title: "Struggle Courses",
    singular: "Struggle Course",
    tab: Tab::Misc,
    fields: &[
        Field::required("student_id", "Student", Ref(STUDENT)),
        Field::required("course_number", "Course Number", Course),
    ],
    unique: &[UniqueKey {
        columns: &["student_id", "course_number"],
        message: "This student is already struggling with this course.",
    }],
    date_order: None,
    list_sql: "SELECT sc.struggle_id, s.name, sc.course_number \
               FROM Struggle_Courses sc JOIN Students s ON s.student_id = sc.student_id \
               ORDER BY s.name",
    list_headers: &["Student", "Course"],
};
