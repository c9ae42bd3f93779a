//! The report dispatch table and its query templates

use super::catalog::{require_column, require_table};
use super::format::{ReportOutput, SalaryStats};
use crate::db::values::row_texts;
use crate::db::cell_text;
use p3510_common::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use sqlx::{Column, Row, SqlitePool};
use std::collections::HashMap;

/// How the form collects a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A table name from `/get_tables`
    Table,
    /// A column of the table named by `depends_on`
    Column,
    Str,
    /// A value picked from `source_table.source_column`
    ValueFromColumn,
    Int,
    Float,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_table: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_column: Option<&'static str>,
}

impl ParamSpec {
    const fn table(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Table,
            label,
            depends_on: None,
            source_table: None,
            source_column: None,
        }
    }

    const fn column(name: &'static str, label: &'static str, table_param: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Column,
            label,
            depends_on: Some(table_param),
            source_table: None,
            source_column: None,
        }
    }

    const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Str,
            label,
            depends_on: None,
            source_table: None,
            source_column: None,
        }
    }
}

/// Query template behind a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    MostCommon,
    Distinct,
    CountDistinctGroupBy,
    TwoJoins { negate: bool },
    StudentsPerIssueCategory,
    DistinctWhereNot,
    SalaryStats,
    StudentsWithMultipleIssues,
    StudentsBySymptom,
    StudentsWithIssuesByZip,
}

#[derive(Debug)]
pub struct ReportSpec {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    pub query: Query,
}

const TWO_JOIN_PARAMS: &[ParamSpec] = &[
    ParamSpec::table("base_table", "Base Table"),
    ParamSpec::column("display_join_on", "Display Join Column", "base_table"),
    ParamSpec::table("display_table", "Display Table"),
    ParamSpec::column("display_col", "Display Column", "display_table"),
    ParamSpec::column("filter_join_on", "Filter Join Column", "base_table"),
    ParamSpec::table("filter_table", "Filter Table"),
    ParamSpec::column("filter_col", "Filter Column", "filter_table"),
    ParamSpec::text("filter_value", "Filter Value"),
];

pub static FUNCTIONS: &[ReportSpec] = &[
    ReportSpec {
        name: "Most Common",
        params: &[
            ParamSpec::table("table_name", "Table Name"),
            ParamSpec::column("column_name", "Column Name", "table_name"),
        ],
        query: Query::MostCommon,
    },
    ReportSpec {
        name: "Get Distinct",
        params: &[
            ParamSpec::table("table_name", "Table Name"),
            ParamSpec::column("column_name", "Column Name", "table_name"),
        ],
        query: Query::Distinct,
    },
    ReportSpec {
        name: "Count Distinct Groupby",
        params: &[
            ParamSpec::table("base_table", "Base Table"),
            ParamSpec::column("display_join_on", "Join Column", "base_table"),
            ParamSpec::table("display_table", "Display Table"),
            ParamSpec::column("display_col", "Display Column", "display_table"),
            ParamSpec::column("distinct_col", "Count Distinct Column", "base_table"),
        ],
        query: Query::CountDistinctGroupBy,
    },
    ReportSpec {
        name: "Get Two Joins",
        params: TWO_JOIN_PARAMS,
        query: Query::TwoJoins { negate: false },
    },
    ReportSpec {
        name: "Count Unique Students by Issue Category",
        params: &[],
        query: Query::StudentsPerIssueCategory,
    },
    ReportSpec {
        name: "Get Distinct Given NOT Attribute",
        params: &[
            ParamSpec::table("table_name", "Table Name"),
            ParamSpec::column("select_col", "Select Column", "table_name"),
            ParamSpec::column("filter_col", "Filter Column", "table_name"),
            ParamSpec::text("filter_value", "Filter Value"),
        ],
        query: Query::DistinctWhereNot,
    },
    ReportSpec {
        name: "Get Two Joins (NOT)",
        params: TWO_JOIN_PARAMS,
        query: Query::TwoJoins { negate: true },
    },
    ReportSpec {
        name: "Counselor Salary Stats",
        params: &[],
        query: Query::SalaryStats,
    },
    ReportSpec {
        name: "Get Students With Multiple Issues",
        params: &[],
        query: Query::StudentsWithMultipleIssues,
    },
    ReportSpec {
        name: "Get Students By Symptom",
        params: &[ParamSpec {
            name: "symptom_name",
            kind: ParamKind::ValueFromColumn,
            label: "Symptom Name",
            depends_on: None,
            source_table: Some("Symptoms"),
            source_column: Some("symptom"),
        }],
        query: Query::StudentsBySymptom,
    },
    ReportSpec {
        name: "Count Students With Issues (by Zip)",
        params: &[],
        query: Query::StudentsWithIssuesByZip,
    },
];

pub fn find(name: &str) -> Option<&'static ReportSpec> {
    FUNCTIONS.iter().find(|r| r.name == name)
}

/// A request parameter after type coercion
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    fn as_text(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(f) => f.to_string(),
        }
    }
}

/// Coerced parameters keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(HashMap<&'static str, ParamValue>);

impl Params {
    pub fn text(&self, name: &str) -> Result<String> {
        self.0
            .get(name)
            .map(ParamValue::as_text)
            .ok_or_else(|| Error::InvalidInput(format!("Missing parameter: {}", name)))
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    async fn table(&self, pool: &SqlitePool, name: &str) -> Result<String> {
        require_table(pool, &self.text(name)?).await
    }

    async fn column(&self, pool: &SqlitePool, table: &str, name: &str) -> Result<String> {
        require_column(pool, table, &self.text(name)?).await
    }
}

/// Convert raw JSON parameters to the types the report declares
///
/// `int` and `float` parameters accept numbers or numeric strings; every
/// other kind is taken as text.
pub fn coerce_params(
    specs: &'static [ParamSpec],
    raw: &serde_json::Map<String, Value>,
) -> Result<Params> {
    let mut params = HashMap::with_capacity(specs.len());

    for spec in specs {
        let text = match raw.get(spec.name) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "Missing value for {}",
                    spec.label
                )))
            }
        };

        let value = match spec.kind {
            ParamKind::Int => text.parse().map(ParamValue::Int).map_err(|_| {
                Error::InvalidInput(format!("{} must be a whole number, got '{}'", spec.label, text))
            })?,
            ParamKind::Float => text.parse().map(ParamValue::Float).map_err(|_| {
                Error::InvalidInput(format!("{} must be a number, got '{}'", spec.label, text))
            })?,
            _ => ParamValue::Text(text),
        };

        params.insert(spec.name, value);
    }

    Ok(Params(params))
}

/// Run a report against the database
pub async fn run(pool: &SqlitePool, report: &ReportSpec, params: &Params) -> Result<ReportOutput> {
    match report.query {
        Query::MostCommon => {
            let table = params.table(pool, "table_name").await?;
            let column = params.column(pool, &table, "column_name").await?;
            let sql = format!(
                "SELECT {c} FROM {t} GROUP BY {c} ORDER BY COUNT(*) DESC, {c} LIMIT 1",
                c = column,
                t = table
            );
            let row = sqlx::query(&sql).fetch_optional(pool).await?;
            Ok(row
                .and_then(|row| cell_text(&row, 0))
                .map(ReportOutput::Single)
                .unwrap_or(ReportOutput::Empty))
        }

        Query::Distinct => {
            let table = params.table(pool, "table_name").await?;
            let column = params.column(pool, &table, "column_name").await?;
            let sql = format!("SELECT DISTINCT {c} FROM {t} ORDER BY {c}", c = column, t = table);
            fetch_list(pool, &sql, None).await
        }

        Query::CountDistinctGroupBy => {
            let base = params.table(pool, "base_table").await?;
            let join_on = params.column(pool, &base, "display_join_on").await?;
            let display = params.table(pool, "display_table").await?;
            let display_col = params.column(pool, &display, "display_col").await?;
            let distinct_col = params.column(pool, &base, "distinct_col").await?;
            // Join column must exist on the display side as well
            require_column(pool, &display, &join_on).await?;

            let sql = format!(
                "SELECT d.{display_col}, COUNT(DISTINCT b.{distinct_col}) AS cnt \
                 FROM {base} b JOIN {display} d ON b.{join_on} = d.{join_on} \
                 GROUP BY d.{display_col} ORDER BY cnt DESC, d.{display_col}"
            );
            fetch_table(pool, &sql, None).await
        }

        Query::TwoJoins { negate } => {
            let base = params.table(pool, "base_table").await?;
            let display_join = params.column(pool, &base, "display_join_on").await?;
            let display = params.table(pool, "display_table").await?;
            let display_col = params.column(pool, &display, "display_col").await?;
            let filter_join = params.column(pool, &base, "filter_join_on").await?;
            let filter = params.table(pool, "filter_table").await?;
            let filter_col = params.column(pool, &filter, "filter_col").await?;
            let value = params.text("filter_value")?;
            require_column(pool, &display, &display_join).await?;
            require_column(pool, &filter, &filter_join).await?;

            let op = if negate { "!=" } else { "=" };
            let sql = format!(
                "SELECT DISTINCT d.{display_col} FROM {base} b \
                 JOIN {filter} f ON b.{filter_join} = f.{filter_join} \
                 JOIN {display} d ON b.{display_join} = d.{display_join} \
                 WHERE f.{filter_col} {op} ? ORDER BY d.{display_col}"
            );
            fetch_list(pool, &sql, Some(value)).await
        }

        Query::StudentsPerIssueCategory => {
            fetch_table(
                pool,
                "SELECT c.category_id, c.category, COUNT(DISTINCT i.student_id) AS student_count \
                 FROM Issues i \
                 JOIN Diagnosis_Categorization dc ON i.diagnosis_id = dc.diagnosis_id \
                 JOIN Categories c ON dc.category_id = c.category_id \
                 GROUP BY c.category_id, c.category \
                 ORDER BY student_count DESC, c.category",
                None,
            )
            .await
        }

        Query::DistinctWhereNot => {
            let table = params.table(pool, "table_name").await?;
            let select_col = params.column(pool, &table, "select_col").await?;
            let filter_col = params.column(pool, &table, "filter_col").await?;
            let value = params.text("filter_value")?;
            let sql = format!(
                "SELECT DISTINCT {select_col} FROM {table} WHERE {filter_col} != ? ORDER BY {select_col}"
            );
            fetch_list(pool, &sql, Some(value)).await
        }

        Query::SalaryStats => {
            let row = sqlx::query(
                "SELECT CAST(MIN(salary) AS REAL), CAST(MAX(salary) AS REAL), CAST(AVG(salary) AS REAL) \
                 FROM Counselors WHERE salary IS NOT NULL AND salary > 0",
            )
            .fetch_one(pool)
            .await?;

            let min: Option<f64> = row.try_get(0)?;
            let max: Option<f64> = row.try_get(1)?;
            let avg: Option<f64> = row.try_get(2)?;

            Ok(ReportOutput::SalaryStats(match (min, max, avg) {
                (Some(min), Some(max), Some(avg)) => Some(SalaryStats { min, max, avg }),
                _ => None,
            }))
        }

        Query::StudentsWithMultipleIssues => {
            fetch_table(
                pool,
                "SELECT i.student_id, s.name, COUNT(*) AS cnt \
                 FROM Issues i JOIN Students s ON i.student_id = s.student_id \
                 GROUP BY i.student_id, s.name \
                 HAVING COUNT(*) > 1 \
                 ORDER BY cnt DESC, s.name",
                None,
            )
            .await
        }

        Query::StudentsBySymptom => {
            let symptom = params.text("symptom_name")?;
            fetch_table(
                pool,
                "SELECT DISTINCT s.student_id, s.name \
                 FROM Reported_Symptoms rs \
                 JOIN Symptoms sy ON rs.symptom_id = sy.symptom_id \
                 JOIN Students s ON rs.student_id = s.student_id \
                 WHERE sy.symptom = ? \
                 ORDER BY s.name",
                Some(symptom),
            )
            .await
        }

        Query::StudentsWithIssuesByZip => {
            fetch_table(
                pool,
                "SELECT s.zip, COUNT(DISTINCT s.student_id) AS student_count \
                 FROM Students s JOIN Issues i ON s.student_id = i.student_id \
                 GROUP BY s.zip \
                 ORDER BY student_count DESC, s.zip",
                None,
            )
            .await
        }
    }
}

async fn fetch_list(pool: &SqlitePool, sql: &str, filter: Option<String>) -> Result<ReportOutput> {
    let mut query = sqlx::query(sql);
    if let Some(value) = filter {
        query = query.bind(value);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(ReportOutput::List(
        rows.iter().filter_map(|row| cell_text(row, 0)).collect(),
    ))
}

async fn fetch_table(pool: &SqlitePool, sql: &str, filter: Option<String>) -> Result<ReportOutput> {
    let mut query = sqlx::query(sql);
    if let Some(value) = filter {
        query = query.bind(value);
    }
    let rows = query.fetch_all(pool).await?;

    let Some(first) = rows.first() else {
        return Ok(ReportOutput::Empty);
    };

    let headers = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    Ok(ReportOutput::Table {
        headers,
        rows: rows.iter().map(row_texts).collect(),
    })
}
