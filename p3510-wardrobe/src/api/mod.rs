//! HTTP handlers for the wardrobe app

pub mod attributes;
pub mod items;
pub mod rules;
pub mod slots;
pub mod users;

use axum::response::{IntoResponse, Redirect, Response};
use std::collections::HashMap;

/// Trimmed form value, or a "{label} is required." message when blank
fn required(form: &HashMap<String, String>, name: &str, label: &str, messages: &mut Vec<String>) -> String {
    let value = form.get(name).map(|v| v.trim()).unwrap_or_default();
    if value.is_empty() {
        messages.push(format!("{} is required.", label));
    }
    value.to_string()
}

fn see_other(path: &str) -> Response {
    Redirect::to(path).into_response()
}
