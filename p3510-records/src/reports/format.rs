//! Report result rendering

use p3510_common::html::escape;

pub const NO_RESULTS: &str = "No results found";
pub const NO_SALARY_DATA: &str = "No salary data found";

const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 8px; text-align: left;";
const HEADER_STYLE: &str = " background-color: #667eea; color: white; font-weight: bold;";

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// What a report query produced
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    /// The query matched nothing
    Empty,
    Single(String),
    List(Vec<String>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// `None` when no counselor has a salary on file
    SalaryStats(Option<SalaryStats>),
}

/// Render a report result as the HTML fragment returned by `/execute`
pub fn format_result(output: &ReportOutput) -> String {
    match output {
        ReportOutput::Empty => NO_RESULTS.to_string(),
        ReportOutput::Single(value) => escape(value),
        ReportOutput::List(items) if items.is_empty() => NO_RESULTS.to_string(),
        ReportOutput::List(items) => escape(&items.join(", ")),
        ReportOutput::Table { rows, .. } if rows.is_empty() => NO_RESULTS.to_string(),
        ReportOutput::Table { headers, rows } => render_table(headers, rows),
        ReportOutput::SalaryStats(None) => NO_SALARY_DATA.to_string(),
        ReportOutput::SalaryStats(Some(stats)) => format!(
            "Min: {} | Max: {} | Avg: {}",
            format_money(stats.min),
            format_money(stats.max),
            format_money(stats.avg)
        ),
    }
}

fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut html =
        String::from("<table style='width:100%; border-collapse: collapse; margin-top: 10px;'>");

    html.push_str("<tr>");
    for header in headers {
        html.push_str(&format!(
            "<th style='{}{}'>{}</th>",
            CELL_STYLE,
            HEADER_STYLE,
            escape(header)
        ));
    }
    html.push_str("</tr>");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td style='{}'>{}</td>", CELL_STYLE, escape(cell)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// Dollar amount with thousands separators and two decimals: `$1,234.50`
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.5), "$999.50");
        assert_eq!(format_money(1000.0), "$1,000.00");
        assert_eq!(format_money(52345.678), "$52,345.68");
        assert_eq!(format_money(1234567.0), "$1,234,567.00");
        assert_eq!(format_money(-1500.0), "-$1,500.00");
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(format_result(&ReportOutput::Empty), NO_RESULTS);
        assert_eq!(format_result(&ReportOutput::List(vec![])), NO_RESULTS);
        assert_eq!(
            format_result(&ReportOutput::Table {
                headers: vec!["zip".into()],
                rows: vec![]
            }),
            NO_RESULTS
        );
        assert_eq!(format_result(&ReportOutput::SalaryStats(None)), NO_SALARY_DATA);
    }

    #[test]
    fn test_single_and_list() {
        assert_eq!(format_result(&ReportOutput::Single("Anxiety".into())), "Anxiety");
        assert_eq!(
            format_result(&ReportOutput::List(vec!["A".into(), "B & C".into()])),
            "A, B &amp; C"
        );
    }

    #[test]
    fn test_salary_stats() {
        let output = ReportOutput::SalaryStats(Some(SalaryStats {
            min: 40000.0,
            max: 85000.0,
            avg: 61666.666,
        }));
        assert_eq!(
            format_result(&output),
            "Min: $40,000.00 | Max: $85,000.00 | Avg: $61,666.67"
        );
    }

    #[test]
    fn test_table_has_header_row() {
        let html = format_result(&ReportOutput::Table {
            headers: vec!["zip".into(), "student_count".into()],
            rows: vec![vec!["84101".into(), "2".into()]],
        });
        assert!(html.starts_with("<table"));
        assert!(html.contains("#667eea"));
        assert!(html.contains(">zip</th>"));
        assert!(html.contains(">84101</td>"));
        assert_eq!(html.matches("<tr>").count(), 2);
    }
}
