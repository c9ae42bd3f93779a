//! Outfit rule pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use std::collections::HashMap;
use tracing::info;

use super::{required, see_other};
use crate::error::ApiResult;
use crate::model::{OutfitRule, User};
use crate::render::{self, FormValues};
use crate::service;
use crate::store::{create, eq, fetch_all, fetch_one, remove, save};
use crate::AppState;

fn check_rule(form: &FormValues) -> Result<String, String> {
    let mut messages = Vec::new();
    let rule = required(form, "rule", "Rule", &mut messages);
    if messages.is_empty() {
        Ok(rule)
    } else {
        Err(messages.join("\n"))
    }
}

fn rule_action(rule: &OutfitRule, action: &str) -> String {
    format!("/users/{}/rules/{}/{}", rule.user_id, rule.id, action)
}

/// GET /users/:uid/rules
pub async fn list_rules(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let rules: Vec<OutfitRule> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;
    Ok(Html(render::rules_page(&user, &rules)))
}

/// GET /users/:uid/rules/new
pub async fn new_rule_form(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Html<String>> {
    let user: User = fetch_one(state.store.as_ref(), &uid).await?;
    let action = render::user_path(&user, "rules/new");
    Ok(Html(render::rule_form(&user, &action, &FormValues::new(), None)))
}

/// POST /users/:uid/rules/new
pub async fn create_rule(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;

    match check_rule(&form) {
        Ok(rule) => {
            let draft = OutfitRule {
                id: String::new(),
                user_id: uid.clone(),
                rule,
            };
            let created = create(store, &draft).await?;
            info!("Created rule {} for user {}", created.id, uid);
            Ok(see_other(&render::user_path(&user, "rules")))
        }
        Err(messages) => {
            let action = render::user_path(&user, "rules/new");
            Ok(Html(render::rule_form(&user, &action, &form, Some(&messages))).into_response())
        }
    }
}

/// GET /users/:uid/rules/:rid/edit
pub async fn edit_rule_form(
    State(state): State<AppState>,
    Path((uid, rid)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let rule = service::owned_rule(store, &uid, &rid).await?;

    let values = HashMap::from([("rule".to_string(), rule.rule.clone())]);
    Ok(Html(render::rule_form(&user, &rule_action(&rule, "edit"), &values, None)))
}

/// POST /users/:uid/rules/:rid/edit
pub async fn update_rule(
    State(state): State<AppState>,
    Path((uid, rid)): Path<(String, String)>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let existing = service::owned_rule(store, &uid, &rid).await?;

    match check_rule(&form) {
        Ok(rule) => {
            save(store, &OutfitRule { rule, ..existing }).await?;
            Ok(see_other(&render::user_path(&user, "rules")))
        }
        Err(messages) => Ok(Html(render::rule_form(
            &user,
            &rule_action(&existing, "edit"),
            &form,
            Some(&messages),
        ))
        .into_response()),
    }
}

/// GET /users/:uid/rules/:rid/delete
pub async fn delete_rule(
    State(state): State<AppState>,
    Path((uid, rid)): Path<(String, String)>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    service::owned_rule(store, &uid, &rid).await?;
    remove::<OutfitRule>(store, &[eq("id", rid.as_str())]).await?;
    Ok(see_other(&format!("/users/{}/rules", uid)))
}
