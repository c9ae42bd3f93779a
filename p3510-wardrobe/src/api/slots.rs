//! Slot pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use std::collections::HashMap;
use tracing::{debug, info};

use super::{required, see_other};
use crate::error::ApiResult;
use crate::model::{Slot, User};
use crate::render::{self, FormValues};
use crate::service::{self, Direction};
use crate::store::{eq, fetch_all, fetch_one, save};
use crate::AppState;

fn check_slot(form: &FormValues) -> Result<String, String> {
    let mut messages = Vec::new();
    let name = required(form, "name", "Name", &mut messages);
    if messages.is_empty() {
        Ok(name)
    } else {
        Err(messages.join("\n"))
    }
}

fn slot_action(slot: &Slot, action: &str) -> String {
    format!("/users/{}/slots/{}/{}", slot.user_id, slot.id, action)
}

/// GET /users/:uid/slots
pub async fn list_slots(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;
    Ok(Html(render::slots_page(&user, &slots)))
}

/// GET /users/:uid/slots/new
pub async fn new_slot_form(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Html<String>> {
    let user: User = fetch_one(state.store.as_ref(), &uid).await?;
    let action = render::user_path(&user, "slots/new");
    Ok(Html(render::slot_form(&user, &action, &FormValues::new(), None)))
}

/// POST /users/:uid/slots/new
pub async fn create_slot(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;

    match check_slot(&form) {
        Ok(name) => {
            let slot = service::create_slot(store, &uid, &name).await?;
            info!("Created slot {} for user {}", slot.id, uid);
            Ok(see_other(&render::user_path(&user, "slots")))
        }
        Err(messages) => {
            let action = render::user_path(&user, "slots/new");
            Ok(Html(render::slot_form(&user, &action, &form, Some(&messages))).into_response())
        }
    }
}

/// GET /users/:uid/slots/:sid/edit
pub async fn edit_slot_form(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let slot = service::owned_slot(store, &uid, &sid).await?;

    let values = HashMap::from([("name".to_string(), slot.name.clone())]);
    Ok(Html(render::slot_form(&user, &slot_action(&slot, "edit"), &values, None)))
}

/// POST /users/:uid/slots/:sid/edit
pub async fn update_slot(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let slot = service::owned_slot(store, &uid, &sid).await?;

    match check_slot(&form) {
        Ok(name) => {
            save(store, &Slot { name, ..slot }).await?;
            Ok(see_other(&render::user_path(&user, "slots")))
        }
        Err(messages) => Ok(Html(render::slot_form(
            &user,
            &slot_action(&slot, "edit"),
            &form,
            Some(&messages),
        ))
        .into_response()),
    }
}

/// GET /users/:uid/slots/:sid/delete
///
/// Later slots move down one position.
pub async fn delete_slot(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Response> {
    service::delete_slot(state.store.as_ref(), &uid, &sid).await?;
    info!("Deleted slot {} of user {}", sid, uid);
    Ok(see_other(&format!("/users/{}/slots", uid)))
}

async fn move_slot(state: AppState, uid: String, sid: String, direction: Direction) -> ApiResult<Response> {
    let moved = service::move_slot(state.store.as_ref(), &uid, &sid, direction).await?;
    debug!("Move slot {} {:?}: {}", sid, direction, moved);
    Ok(see_other(&format!("/users/{}/slots", uid)))
}

/// GET /users/:uid/slots/:sid/up
pub async fn move_slot_up(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Response> {
    move_slot(state, uid, sid, Direction::Up).await
}

/// GET /users/:uid/slots/:sid/down
pub async fn move_slot_down(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Response> {
    move_slot(state, uid, sid, Direction::Down).await
}
