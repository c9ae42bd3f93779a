//! User pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;
use tracing::{info, warn};

use super::{required, see_other};
use crate::error::ApiResult;
use crate::model::User;
use crate::render::{self, FormValues};
use crate::service;
use crate::store::{fetch_all, fetch_one, save};
use crate::AppState;

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/users")
}

fn check_user(form: &FormValues) -> Result<User, String> {
    let mut messages = Vec::new();
    let username = required(form, "username", "Username", &mut messages);
    let email = required(form, "email", "Email", &mut messages);
    if !email.is_empty() && !email.contains('@') {
        messages.push("Invalid email.".to_string());
    }

    if messages.is_empty() {
        Ok(User {
            id: String::new(),
            username,
            email,
        })
    } else {
        Err(messages.join("\n"))
    }
}

fn user_values(user: &User) -> FormValues {
    HashMap::from([
        ("username".to_string(), user.username.clone()),
        ("email".to_string(), user.email.clone()),
    ])
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let users: Vec<User> = fetch_all(state.store.as_ref(), &[]).await?;
    Ok(Html(render::users_page(&users)))
}

/// GET /users/new
pub async fn new_user_form() -> Html<String> {
    Html(render::user_form("/users/new", &FormValues::new(), None))
}

/// POST /users/new
///
/// Copies the template user's slots and attributes when one is configured.
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let draft = match check_user(&form) {
        Ok(draft) => draft,
        Err(messages) => {
            warn!("Rejected new user: {}", messages.replace('\n', "; "));
            return Ok(Html(render::user_form("/users/new", &form, Some(&messages))).into_response());
        }
    };

    let (user, copied) =
        service::create_user(state.store.as_ref(), &draft, state.template_user.as_deref()).await?;
    info!("User {} starts with {} default records", user.id, copied);
    Ok(see_other(&render::user_path(&user, "items")))
}

/// GET /users/:uid/edit
pub async fn edit_user_form(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Html<String>> {
    let user: User = fetch_one(state.store.as_ref(), &uid).await?;
    Ok(Html(render::user_form(
        &render::user_path(&user, "edit"),
        &user_values(&user),
        None,
    )))
}

/// POST /users/:uid/edit
pub async fn update_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let user: User = fetch_one(state.store.as_ref(), &uid).await?;

    match check_user(&form) {
        Ok(draft) => {
            save(state.store.as_ref(), &User { id: user.id, ..draft }).await?;
            info!("Updated user {}", uid);
            Ok(see_other("/users"))
        }
        Err(messages) => {
            let action = render::user_path(&user, "edit");
            Ok(Html(render::user_form(&action, &form, Some(&messages))).into_response())
        }
    }
}

/// GET /users/:uid/delete
pub async fn delete_user(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Response> {
    service::delete_user(state.store.as_ref(), &uid).await?;
    Ok(see_other("/users"))
}
