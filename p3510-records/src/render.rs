//! HTML pages for the records app

use crate::db::repository::ListRow;
use crate::entities::{self, EntitySpec, FieldKind, Tab};
use crate::reports::FUNCTIONS;
use p3510_common::html::{escape, flash, layout, options};
use std::collections::HashMap;

/// Dropdown choices per foreign-key column: `(id, label)` pairs
pub type Choices = HashMap<&'static str, Vec<(String, String)>>;

fn nav() -> Vec<(&'static str, &'static str)> {
    let mut links = vec![("/", "Home")];
    links.extend(Tab::ALL.iter().map(|t| (t.path(), t.title())));
    links
}

pub fn list_path(spec: &EntitySpec) -> String {
    format!("/{}", spec.path)
}

pub fn new_path(spec: &EntitySpec) -> String {
    format!("/{}/new", spec.path)
}

pub fn edit_path(spec: &EntitySpec, id: i64) -> String {
    format!("/{}/{}/edit", spec.path, id)
}

pub fn list_page(spec: &EntitySpec, rows: &[ListRow]) -> String {
    let mut body = format!(
        r#"<p><a href="{}">Add {}</a></p>"#,
        new_path(spec),
        escape(spec.singular)
    );

    if rows.is_empty() {
        body.push_str(r#"<p class="notice">No records yet.</p>"#);
        return layout(spec.title, &nav(), &body);
    }

    body.push_str("<table><tr>");
    for header in spec.list_headers {
        body.push_str(&format!("<th>{}</th>", escape(header)));
    }
    body.push_str("<th></th></tr>");

    for row in rows {
        body.push_str("<tr>");
        for cell in &row.cells {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str(&format!(
            r#"<td><a href="{edit}">Edit</a> <a href="/{path}/{id}/delete" onclick="return confirm('Delete this record?');">Delete</a></td>"#,
            edit = edit_path(spec, row.id),
            path = spec.path,
            id = row.id
        ));
        body.push_str("</tr>");
    }
    body.push_str("</table>");

    layout(spec.title, &nav(), &body)
}

/// Create or edit form; `values` prefill the inputs, `messages` are shown above
pub fn form_page(
    spec: &EntitySpec,
    action: &str,
    values: &HashMap<String, String>,
    choices: &Choices,
    messages: Option<&str>,
) -> String {
    let title = if action.ends_with("/new") {
        format!("New {}", spec.singular)
    } else {
        format!("Edit {}", spec.singular)
    };

    let mut body = flash(messages.unwrap_or(""));
    body.push_str(&format!(r#"<form method="post" action="{}">"#, escape(action)));

    for field in spec.fields {
        let current = values.get(field.column).map(String::as_str).unwrap_or("");
        let name = field.column;
        body.push_str(&format!(r#"<label for="{name}">{}</label>"#, escape(field.label)));

        let input = match field.kind {
            FieldKind::Bool => format!(
                r#"<select id="{name}" name="{name}">{}</select>"#,
                options([("1", "Yes"), ("0", "No")], current)
            ),
            FieldKind::Ref(_) => {
                let list = choices.get(name).map(Vec::as_slice).unwrap_or(&[]);
                let placeholder = if field.required { "-- select --" } else { "-- none --" };
                format!(
                    r#"<select id="{name}" name="{name}"><option value="">{}</option>{}</select>"#,
                    placeholder,
                    options(list.iter().map(|(v, l)| (v.as_str(), l.as_str())), current)
                )
            }
            FieldKind::Date => format!(
                r#"<input type="date" id="{name}" name="{name}" value="{}">"#,
                escape(current)
            ),
            _ => format!(
                r#"<input type="text" id="{name}" name="{name}" value="{}">"#,
                escape(current)
            ),
        };
        body.push_str(&input);
    }

    body.push_str(&format!(
        r#"<p><button type="submit">Save</button> <a href="{}">Cancel</a></p></form>"#,
        list_path(spec)
    ));

    layout(&title, &nav(), &body)
}

fn entity_links(tab: Tab) -> String {
    let items: String = entities::in_tab(tab)
        .map(|e| format!(r#"<li><a href="{}">{}</a></li>"#, list_path(e), escape(e.title)))
        .collect();
    format!("<ul>{}</ul>", items)
}

pub fn tab_page(tab: Tab) -> String {
    layout(tab.title(), &nav(), &entity_links(tab))
}

pub fn home_page() -> String {
    let mut body = String::new();
    for tab in Tab::ALL {
        body.push_str(&format!(
            r#"<h2><a href="{}">{}</a></h2>{}"#,
            tab.path(),
            tab.title(),
            entity_links(tab)
        ));
    }

    let functions: String = FUNCTIONS
        .iter()
        .map(|f| format!(r#"<option value="{0}">{0}</option>"#, escape(f.name)))
        .collect();

    body.push_str(&format!(
        r#"<h2>Reports</h2>
<select id="function"><option value="">-- choose a report --</option>{}</select>
<div id="params"></div>
<p><button type="button" id="run">Run</button></p>
<div id="result"></div>"#,
        functions
    ));
    body.push_str(REPORT_SCRIPT);

    layout("Student Support Records", &nav(), &body)
}

const REPORT_SCRIPT: &str = r#"<script>
const paramsDiv = document.getElementById('params');
const resultDiv = document.getElementById('result');

async function getJson(url) {
    const response = await fetch(url);
    return response.json();
}

function fillSelect(select, values) {
    select.innerHTML = '<option value="">--</option>';
    for (const value of values) {
        const option = document.createElement('option');
        option.value = value;
        option.textContent = value;
        select.appendChild(option);
    }
}

async function buildForm(name) {
    paramsDiv.innerHTML = '';
    resultDiv.innerHTML = '';
    if (!name) return;
    const params = await getJson('/get_params/' + encodeURIComponent(name));
    const tables = await getJson('/get_tables');
    for (const param of params) {
        const label = document.createElement('label');
        label.textContent = param.label;
        paramsDiv.appendChild(label);
        let input;
        if (param.type === 'table') {
            input = document.createElement('select');
            fillSelect(input, tables);
        } else if (param.type === 'column') {
            input = document.createElement('select');
            fillSelect(input, []);
        } else if (param.type === 'value_from_column') {
            input = document.createElement('select');
            fillSelect(input, await getJson('/get_column_values/' + param.source_table + '/' + param.source_column));
        } else {
            input = document.createElement('input');
            input.type = 'text';
        }
        input.id = 'param_' + param.name;
        input.dataset.name = param.name;
        paramsDiv.appendChild(input);
    }
    for (const param of params) {
        if (param.type === 'column' && param.depends_on) {
            const parent = document.getElementById('param_' + param.depends_on);
            const child = document.getElementById('param_' + param.name);
            parent.addEventListener('change', async () => {
                fillSelect(child, parent.value ? await getJson('/get_columns/' + parent.value) : []);
            });
        }
    }
}

document.getElementById('function').addEventListener('change', (e) => buildForm(e.target.value));

document.getElementById('run').addEventListener('click', async () => {
    const name = document.getElementById('function').value;
    if (!name) return;
    const params = {};
    for (const input of paramsDiv.querySelectorAll('[data-name]')) {
        params[input.dataset.name] = input.value;
    }
    const response = await fetch('/execute', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({function_name: name, params: params}),
    });
    const data = await response.json();
    resultDiv.innerHTML = data.result !== undefined ? data.result : '<p class="flash">' + data.error + '</p>';
});
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::find;

    #[test]
    fn test_form_page_renders_inputs_and_messages() {
        let spec = find("counselor_assignments").unwrap();
        let mut choices = Choices::new();
        choices.insert("student_id", vec![("3".into(), "Ada".into())]);
        let mut values = HashMap::new();
        values.insert("student_id".to_string(), "3".to_string());
        values.insert("is_primary".to_string(), "0".to_string());

        let html = form_page(spec, "/counselor_assignments/new", &values, &choices, Some("End date must be after start date."));

        assert!(html.contains("New Counselor Assignment"));
        assert!(html.contains(r#"<option value="3" selected>Ada</option>"#));
        assert!(html.contains(r#"<option value="0" selected>No</option>"#));
        assert!(html.contains(r#"type="date" id="start_date""#));
        assert!(html.contains("End date must be after start date."));
    }

    #[test]
    fn test_list_page_links_rows() {
        let spec = find("symptoms").unwrap();
        let rows = vec![ListRow { id: 7, cells: vec!["<Cough>".into()] }];
        let html = list_page(spec, &rows);
        assert!(html.contains(r#"href="/symptoms/7/edit""#));
        assert!(html.contains(r#"href="/symptoms/7/delete""#));
        assert!(html.contains("&lt;Cough&gt;"));
        assert!(html.contains(r#"href="/symptoms/new""#));
    }

    #[test]
    fn test_home_lists_every_report() {
        let html = home_page();
        for report in FUNCTIONS {
            assert!(html.contains(&escape(report.name)), "{}", report.name);
        }
        assert!(html.contains(r#"href="/peopletab""#));
    }
}
