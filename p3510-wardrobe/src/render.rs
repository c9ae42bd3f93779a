//! HTML pages for the wardrobe app

use crate::model::{Attribute, AttributeKind, OutfitRule, Slot, User};
use crate::service::{attribute_input, ItemView};
use p3510_common::html::{escape, flash, layout, options};
use std::collections::HashMap;

pub type FormValues = HashMap<String, String>;

fn nav(user: Option<&User>) -> Vec<(String, String)> {
    let mut links = vec![("/users".to_string(), "Users".to_string())];
    if let Some(user) = user {
        links.push((user_path(user, "slots"), format!("{}'s slots", user.username)));
        links.push((user_path(user, "items"), "Items".to_string()));
        links.push((user_path(user, "rules"), "Outfit rules".to_string()));
    }
    links
}

fn page(title: &str, user: Option<&User>, body: &str) -> String {
    let links = nav(user);
    let refs: Vec<(&str, &str)> = links.iter().map(|(h, l)| (h.as_str(), l.as_str())).collect();
    layout(title, &refs, body)
}

pub fn user_path(user: &User, section: &str) -> String {
    format!("/users/{}/{}", user.id, section)
}

pub fn slot_path(slot: &Slot) -> String {
    format!("/users/{}/slots/{}/attributes", slot.user_id, slot.id)
}

fn form_title(action: &str, singular: &str) -> String {
    if action.ends_with("/new") {
        format!("New {}", singular)
    } else {
        format!("Edit {}", singular)
    }
}

fn value<'a>(form: &'a FormValues, name: &str) -> &'a str {
    form.get(name).map(String::as_str).unwrap_or_default()
}

fn text_input(form: &FormValues, name: &str, label: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}">"#,
        name = name,
        label = escape(label),
        value = escape(value(form, name))
    )
}

fn form(action: &str, messages: Option<&str>, fields: &str, cancel: &str) -> String {
    format!(
        r#"{flash}<form method="post" action="{action}">{fields}<p><button type="submit">Save</button> <a href="{cancel}">Cancel</a></p></form>"#,
        flash = flash(messages.unwrap_or_default()),
        action = escape(action),
        fields = fields,
        cancel = escape(cancel)
    )
}

fn table(headers: &[&str], rows: Vec<Vec<String>>, empty: &str) -> String {
    if rows.is_empty() {
        return format!(r#"<p class="notice">{}</p>"#, escape(empty));
    }

    let mut html = String::from("<table><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("<th></th></tr>");
    for row in rows {
        html.push_str("<tr>");
        // Last cell holds pre-rendered action links
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.into_iter().enumerate() {
            if i == last {
                html.push_str(&format!("<td>{}</td>", cell));
            } else {
                html.push_str(&format!("<td>{}</td>", escape(&cell)));
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn links(pairs: &[(String, &str)]) -> String {
    pairs
        .iter()
        .map(|(href, label)| {
            let confirm = if *label == "Delete" {
                r#" onclick="return confirm('Delete this record?');""#
            } else {
                ""
            };
            format!(r#"<a href="{}"{}>{}</a>"#, escape(href), confirm, label)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---- users ----

pub fn users_page(users: &[User]) -> String {
    let rows = users
        .iter()
        .map(|u| {
            vec![
                u.username.clone(),
                u.email.clone(),
                links(&[
                    (user_path(u, "items"), "Items"),
                    (user_path(u, "slots"), "Slots"),
                    (user_path(u, "rules"), "Rules"),
                    (user_path(u, "edit"), "Edit"),
                    (user_path(u, "delete"), "Delete"),
                ]),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="/users/new">Add User</a></p>{}"#,
        table(&["Username", "Email"], rows, "No users yet.")
    );
    page("Users", None, &body)
}

pub fn user_form(action: &str, values: &FormValues, messages: Option<&str>) -> String {
    let fields = [
        text_input(values, "username", "Username"),
        text_input(values, "email", "Email"),
    ]
    .concat();
    page(&form_title(action, "User"), None, &form(action, messages, &fields, "/users"))
}

// ---- slots ----

pub fn slots_page(user: &User, slots: &[Slot]) -> String {
    let rows = slots
        .iter()
        .map(|s| {
            let base = format!("/users/{}/slots/{}", user.id, s.id);
            vec![
                s.position.to_string(),
                s.name.clone(),
                links(&[
                    (slot_path(s), "Attributes"),
                    (format!("{}/up", base), "Up"),
                    (format!("{}/down", base), "Down"),
                    (format!("{}/edit", base), "Edit"),
                    (format!("{}/delete", base), "Delete"),
                ]),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="{}">Add Slot</a></p>{}"#,
        user_path(user, "slots/new"),
        table(&["#", "Name"], rows, "No slots yet.")
    );
    page(&format!("Slots for {}", user.username), Some(user), &body)
}

pub fn slot_form(user: &User, action: &str, values: &FormValues, messages: Option<&str>) -> String {
    let fields = text_input(values, "name", "Name");
    page(
        &form_title(action, "Slot"),
        Some(user),
        &form(action, messages, &fields, &user_path(user, "slots")),
    )
}

// ---- attributes ----

pub fn attributes_page(user: &User, slot: &Slot, attributes: &[Attribute]) -> String {
    let rows = attributes
        .iter()
        .map(|a| {
            let base = format!("{}/{}", slot_path(slot), a.id);
            vec![
                a.position.to_string(),
                a.name.clone(),
                a.kind.to_string(),
                a.options.join(", "),
                links(&[
                    (format!("{}/up", base), "Up"),
                    (format!("{}/down", base), "Down"),
                    (format!("{}/edit", base), "Edit"),
                    (format!("{}/delete", base), "Delete"),
                ]),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="{}/new">Add Attribute</a></p>{}"#,
        slot_path(slot),
        table(&["#", "Name", "Kind", "Options"], rows, "No attributes yet.")
    );
    page(&format!("{} attributes", slot.name), Some(user), &body)
}

pub fn attribute_form(
    user: &User,
    slot: &Slot,
    action: &str,
    values: &FormValues,
    messages: Option<&str>,
) -> String {
    let kinds = AttributeKind::ALL.iter().map(|k| (k.as_str(), k.as_str()));
    let fields = format!(
        r#"{name}<label for="kind">Kind</label><select id="kind" name="kind">{kinds}</select>{options}<p class="notice">Options apply to enum attributes, separated by commas.</p>"#,
        name = text_input(values, "name", "Name"),
        kinds = options(kinds, value(values, "kind")),
        options = text_input(values, "options", "Options"),
    );
    page(
        &form_title(action, "Attribute"),
        Some(user),
        &form(action, messages, &fields, &slot_path(slot)),
    )
}

// ---- items ----

pub fn items_page(user: &User, items: &[ItemView], notice: Option<&str>) -> String {
    let rows = items
        .iter()
        .map(|view| {
            let base = format!("/users/{}/items/{}", user.id, view.item.id);
            let attributes = view
                .values
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            vec![
                view.item.name.clone(),
                view.slot_name.clone(),
                attributes,
                view.item.notes.clone().unwrap_or_default(),
                links(&[(format!("{}/edit", base), "Edit"), (format!("{}/delete", base), "Delete")]),
            ]
        })
        .collect();

    let notice = notice
        .map(|n| format!(r#"<p class="notice">{}</p>"#, escape(n)))
        .unwrap_or_default();
    let body = format!(
        r#"{}<p><a href="{}">Add Item</a></p>{}"#,
        notice,
        user_path(user, "items/new"),
        table(&["Name", "Slot", "Attributes", "Notes"], rows, "No items yet.")
    );
    page(&format!("{}'s items", user.username), Some(user), &body)
}

/// Input for one attribute value, named `attr_<id>`
pub fn attribute_field(attribute: &Attribute, current: &str) -> String {
    let name = attribute_input(&attribute.id);
    let input = match attribute.kind {
        AttributeKind::Enum => format!(
            r#"<select id="{name}" name="{name}"><option value="">--</option>{}</select>"#,
            options(attribute.options.iter().map(|o| (o.as_str(), o.as_str())), current),
        ),
        AttributeKind::Boolean => format!(
            r#"<select id="{name}" name="{name}"><option value="">--</option>{}</select>"#,
            options([("true", "Yes"), ("false", "No")], current),
        ),
        AttributeKind::Number => format!(
            r#"<input type="number" step="any" id="{name}" name="{name}" value="{}">"#,
            escape(current)
        ),
        AttributeKind::Text => format!(
            r#"<input type="text" id="{name}" name="{name}" value="{}">"#,
            escape(current)
        ),
    };
    format!(
        r#"<label for="{name}">{}</label>{input}"#,
        escape(&attribute.name)
    )
}

const ITEM_SCRIPT: &str = r#"<script>
document.getElementById('slot_id').addEventListener('change', async (event) => {
    const box = document.getElementById('attributes');
    box.innerHTML = '';
    if (!event.target.value) return;
    const response = await fetch('/api/slots/' + encodeURIComponent(event.target.value) + '/attributes');
    if (!response.ok) return;
    for (const attr of await response.json()) {
        const name = 'attr_' + attr.id;
        const label = document.createElement('label');
        label.htmlFor = name;
        label.textContent = attr.name;
        let input;
        if (attr.kind === 'enum' || attr.kind === 'boolean') {
            input = document.createElement('select');
            const choices = attr.kind === 'enum'
                ? attr.options.map(o => [o, o])
                : [['true', 'Yes'], ['false', 'No']];
            input.add(new Option('--', ''));
            for (const [value, text] of choices) input.add(new Option(text, value));
        } else {
            input = document.createElement('input');
            input.type = attr.kind === 'number' ? 'number' : 'text';
            if (attr.kind === 'number') input.step = 'any';
        }
        input.id = name;
        input.name = name;
        box.append(label, input);
    }
});
</script>"#;

pub fn item_form(
    user: &User,
    action: &str,
    slots: &[Slot],
    attributes: &[Attribute],
    values: &FormValues,
    messages: Option<&str>,
) -> String {
    let slot_choices = slots.iter().map(|s| (s.id.as_str(), s.name.as_str()));
    let attribute_fields: String = attributes
        .iter()
        .map(|a| attribute_field(a, value(values, &attribute_input(&a.id))))
        .collect();

    let fields = format!(
        r#"{name}<label for="slot_id">Slot</label><select id="slot_id" name="slot_id"><option value="">-- choose a slot --</option>{slots}</select><div id="attributes">{attributes}</div>{notes}"#,
        name = text_input(values, "name", "Name"),
        slots = options(slot_choices, value(values, "slot_id")),
        attributes = attribute_fields,
        notes = text_input(values, "notes", "Notes"),
    );

    let body = format!(
        "{}{}",
        form(action, messages, &fields, &user_path(user, "items")),
        ITEM_SCRIPT
    );
    page(&form_title(action, "Item"), Some(user), &body)
}

// ---- rules ----

pub fn rules_page(user: &User, rules: &[OutfitRule]) -> String {
    let rows = rules
        .iter()
        .map(|r| {
            let base = format!("/users/{}/rules/{}", user.id, r.id);
            vec![
                r.rule.clone(),
                links(&[(format!("{}/edit", base), "Edit"), (format!("{}/delete", base), "Delete")]),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="{}">Add Rule</a></p>{}"#,
        user_path(user, "rules/new"),
        table(&["Rule"], rows, "No outfit rules yet.")
    );
    page(&format!("{}'s outfit rules", user.username), Some(user), &body)
}

pub fn rule_form(user: &User, action: &str, values: &FormValues, messages: Option<&str>) -> String {
    let fields = text_input(values, "rule", "Rule");
    page(
        &form_title(action, "Outfit Rule"),
        Some(user),
        &form(action, messages, &fields, &user_path(user, "rules")),
    )
}
