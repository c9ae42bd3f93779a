//! Generic list/create/edit/delete handlers
//!
//! The same handlers serve every entity; [`entity_routes`] binds them to one
//! descriptor under `/<path>`.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::db::repository::reference_options;
use crate::db::Repository;
use crate::entities::EntitySpec;
use crate::error::{ApiError, ApiResult};
use crate::render::{self, Choices};
use crate::validation::{check_submission, Outcome};
use crate::AppState;

/// List, create, edit and delete routes for one entity
pub fn entity_routes(spec: &'static EntitySpec) -> Router<AppState> {
    let base = render::list_path(spec);

    Router::new()
        .route(&base, get(move |state: State<AppState>| list(state, spec)))
        .route(
            &format!("{}/new", base),
            get(move |state: State<AppState>| new_form(state, spec)).post(
                move |state: State<AppState>, form: Form<HashMap<String, String>>| {
                    create(state, form, spec)
                },
            ),
        )
        .route(
            &format!("{}/:id/edit", base),
            get(move |state: State<AppState>, id: Path<i64>| edit_form(state, id, spec)).post(
                move |state: State<AppState>, id: Path<i64>, form: Form<HashMap<String, String>>| {
                    update(state, id, form, spec)
                },
            ),
        )
        .route(
            &format!("{}/:id/delete", base),
            get(move |state: State<AppState>, id: Path<i64>| delete(state, id, spec)),
        )
}

async fn load_choices(pool: &SqlitePool, spec: &EntitySpec) -> ApiResult<Choices> {
    let mut choices = Choices::new();
    for (column, reference) in spec.references() {
        choices.insert(column, reference_options(pool, reference).await?);
    }
    Ok(choices)
}

/// GET /<path>
pub async fn list(State(state): State<AppState>, spec: &'static EntitySpec) -> ApiResult<Html<String>> {
    let rows = Repository::new(&state.db, spec).list().await?;
    Ok(Html(render::list_page(spec, &rows)))
}

/// GET /<path>/new
pub async fn new_form(
    State(state): State<AppState>,
    spec: &'static EntitySpec,
) -> ApiResult<Html<String>> {
    let choices = load_choices(&state.db, spec).await?;
    Ok(Html(render::form_page(
        spec,
        &render::new_path(spec),
        &HashMap::new(),
        &choices,
        None,
    )))
}

/// POST /<path>/new
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
    spec: &'static EntitySpec,
) -> ApiResult<Response> {
    match check_submission(&state.db, spec, &form, None).await? {
        Outcome::Accepted(values) => {
            let id = Repository::new(&state.db, spec).insert(&values).await?;
            info!("Created {} {}", spec.table, id);
            Ok(Redirect::to(&render::list_path(spec)).into_response())
        }
        Outcome::Rejected(messages) => {
            warn!("Rejected new {}: {}", spec.table, messages.replace('\n', "; "));
            let choices = load_choices(&state.db, spec).await?;
            let page = render::form_page(spec, &render::new_path(spec), &form, &choices, Some(&messages));
            Ok(Html(page).into_response())
        }
    }
}

/// GET /<path>/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    spec: &'static EntitySpec,
) -> ApiResult<Html<String>> {
    let values = Repository::new(&state.db, spec)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", spec.singular, id)))?;

    let choices = load_choices(&state.db, spec).await?;
    Ok(Html(render::form_page(
        spec,
        &render::edit_path(spec, id),
        &values,
        &choices,
        None,
    )))
}

/// POST /<path>/:id/edit
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
    spec: &'static EntitySpec,
) -> ApiResult<Response> {
    let repo = Repository::new(&state.db, spec);

    if repo.get(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("{} {} not found", spec.singular, id)));
    }

    match check_submission(&state.db, spec, &form, Some(id)).await? {
        Outcome::Accepted(values) => {
            repo.update(id, &values).await?;
            info!("Updated {} {}", spec.table, id);
            Ok(Redirect::to(&render::list_path(spec)).into_response())
        }
        Outcome::Rejected(messages) => {
            warn!("Rejected edit of {} {}: {}", spec.table, id, messages.replace('\n', "; "));
            let choices = load_choices(&state.db, spec).await?;
            let page = render::form_page(spec, &render::edit_path(spec, id), &form, &choices, Some(&messages));
            Ok(Html(page).into_response())
        }
    }
}

/// GET /<path>/:id/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    spec: &'static EntitySpec,
) -> ApiResult<Redirect> {
    if Repository::new(&state.db, spec).delete(id).await? {
        info!("Deleted {} {}", spec.table, id);
    } else {
        warn!("Delete of missing {} {}", spec.table, id);
    }

    Ok(Redirect::to(&render::list_path(spec)))
}
