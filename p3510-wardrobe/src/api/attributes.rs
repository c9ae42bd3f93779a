//! Attribute pages and the JSON attribute list used by the item form

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use std::collections::HashMap;
use tracing::{debug, info};

use super::{required, see_other};
use crate::error::ApiResult;
use crate::model::{Attribute, AttributeKind, Slot, User};
use crate::render::{self, FormValues};
use crate::service::{self, Direction};
use crate::store::{eq, fetch_all, fetch_one, save};
use crate::AppState;

/// Name, kind and options of a submitted attribute form
fn check_attribute(form: &FormValues) -> Result<Attribute, String> {
    let mut messages = Vec::new();
    let name = required(form, "name", "Name", &mut messages);

    let kind = match form.get("kind").map(String::as_str).unwrap_or("text").parse::<AttributeKind>() {
        Ok(kind) => kind,
        Err(message) => {
            messages.push(message);
            AttributeKind::Text
        }
    };

    let options: Vec<String> = form
        .get("options")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if kind == AttributeKind::Enum && options.is_empty() {
        messages.push("Enum attributes need at least one option.".to_string());
    }

    if messages.is_empty() {
        Ok(Attribute {
            name,
            kind,
            // Only enum attributes keep options
            options: if kind == AttributeKind::Enum { options } else { Vec::new() },
            ..Default::default()
        })
    } else {
        Err(messages.join("\n"))
    }
}

fn attribute_values(attribute: &Attribute) -> FormValues {
    HashMap::from([
        ("name".to_string(), attribute.name.clone()),
        ("kind".to_string(), attribute.kind.to_string()),
        ("options".to_string(), attribute.options.join(", ")),
    ])
}

async fn user_and_slot(state: &AppState, uid: &str, sid: &str) -> ApiResult<(User, Slot)> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, uid).await?;
    let slot = service::owned_slot(store, uid, sid).await?;
    Ok((user, slot))
}

/// GET /users/:uid/slots/:sid/attributes
pub async fn list_attributes(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let (user, slot) = user_and_slot(&state, &uid, &sid).await?;
    let attributes: Vec<Attribute> = fetch_all(state.store.as_ref(), &[eq("slot_id", sid.as_str())]).await?;
    Ok(Html(render::attributes_page(&user, &slot, &attributes)))
}

/// GET /users/:uid/slots/:sid/attributes/new
pub async fn new_attribute_form(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let (user, slot) = user_and_slot(&state, &uid, &sid).await?;
    let action = format!("{}/new", render::slot_path(&slot));
    Ok(Html(render::attribute_form(&user, &slot, &action, &FormValues::new(), None)))
}

/// POST /users/:uid/slots/:sid/attributes/new
pub async fn create_attribute(
    State(state): State<AppState>,
    Path((uid, sid)): Path<(String, String)>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let (user, slot) = user_and_slot(&state, &uid, &sid).await?;

    match check_attribute(&form) {
        Ok(draft) => {
            let attribute = service::create_attribute(state.store.as_ref(), &slot, &draft).await?;
            info!("Created attribute {} in slot {}", attribute.id, sid);
            Ok(see_other(&render::slot_path(&slot)))
        }
        Err(messages) => {
            let action = format!("{}/new", render::slot_path(&slot));
            Ok(Html(render::attribute_form(&user, &slot, &action, &form, Some(&messages))).into_response())
        }
    }
}

/// GET /users/:uid/slots/:sid/attributes/:aid/edit
pub async fn edit_attribute_form(
    State(state): State<AppState>,
    Path((uid, sid, aid)): Path<(String, String, String)>,
) -> ApiResult<Html<String>> {
    let (user, slot) = user_and_slot(&state, &uid, &sid).await?;
    let attribute = service::slot_attribute(state.store.as_ref(), &sid, &aid).await?;

    let action = format!("{}/{}/edit", render::slot_path(&slot), aid);
    Ok(Html(render::attribute_form(
        &user,
        &slot,
        &action,
        &attribute_values(&attribute),
        None,
    )))
}

/// POST /users/:uid/slots/:sid/attributes/:aid/edit
pub async fn update_attribute(
    State(state): State<AppState>,
    Path((uid, sid, aid)): Path<(String, String, String)>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let (user, slot) = user_and_slot(&state, &uid, &sid).await?;
    let attribute = service::slot_attribute(state.store.as_ref(), &sid, &aid).await?;

    match check_attribute(&form) {
        Ok(draft) => {
            let updated = Attribute {
                name: draft.name,
                kind: draft.kind,
                options: draft.options,
                ..attribute
            };
            save(state.store.as_ref(), &updated).await?;
            Ok(see_other(&render::slot_path(&slot)))
        }
        Err(messages) => {
            let action = format!("{}/{}/edit", render::slot_path(&slot), aid);
            Ok(Html(render::attribute_form(&user, &slot, &action, &form, Some(&messages))).into_response())
        }
    }
}

/// GET /users/:uid/slots/:sid/attributes/:aid/delete
///
/// Later attributes of the slot move down one position.
pub async fn delete_attribute(
    State(state): State<AppState>,
    Path((uid, sid, aid)): Path<(String, String, String)>,
) -> ApiResult<Response> {
    let (_, slot) = user_and_slot(&state, &uid, &sid).await?;
    service::delete_attribute(state.store.as_ref(), &sid, &aid).await?;
    info!("Deleted attribute {} of slot {}", aid, sid);
    Ok(see_other(&render::slot_path(&slot)))
}

async fn move_attribute(
    state: AppState,
    (uid, sid, aid): (String, String, String),
    direction: Direction,
) -> ApiResult<Response> {
    let (_, slot) = user_and_slot(&state, &uid, &sid).await?;
    let moved = service::move_attribute(state.store.as_ref(), &sid, &aid, direction).await?;
    debug!("Move attribute {} {:?}: {}", aid, direction, moved);
    Ok(see_other(&render::slot_path(&slot)))
}

/// GET /users/:uid/slots/:sid/attributes/:aid/up
pub async fn move_attribute_up(
    State(state): State<AppState>,
    Path(ids): Path<(String, String, String)>,
) -> ApiResult<Response> {
    move_attribute(state, ids, Direction::Up).await
}

/// GET /users/:uid/slots/:sid/attributes/:aid/down
pub async fn move_attribute_down(
    State(state): State<AppState>,
    Path(ids): Path<(String, String, String)>,
) -> ApiResult<Response> {
    move_attribute(state, ids, Direction::Down).await
}

/// GET /api/slots/:sid/attributes
pub async fn slot_attributes_json(
    State(state): State<AppState>,
    Path(sid): Path<String>,
) -> ApiResult<Json<Vec<Attribute>>> {
    let store = state.store.as_ref();
    let slot: Slot = fetch_one(store, &sid).await?;
    let attributes = fetch_all(store, &[eq("slot_id", slot.id.as_str())]).await?;
    Ok(Json(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_check_attribute_enum_needs_options() {
        let err = check_attribute(&form(&[("name", "Color"), ("kind", "enum"), ("options", " , ")])).unwrap_err();
        assert_eq!(err, "Enum attributes need at least one option.");

        let attribute =
            check_attribute(&form(&[("name", "Color"), ("kind", "enum"), ("options", "red, blue,")])).unwrap();
        assert_eq!(attribute.options, vec!["red", "blue"]);
    }

    #[test]
    fn test_check_attribute_drops_options_for_other_kinds() {
        let attribute =
            check_attribute(&form(&[("name", "Size"), ("kind", "number"), ("options", "S, M")])).unwrap();
        assert_eq!(attribute.kind, AttributeKind::Number);
        assert!(attribute.options.is_empty());
    }

    #[test]
    fn test_check_attribute_reports_every_problem() {
        let err = check_attribute(&form(&[("name", ""), ("kind", "colour")])).unwrap_err();
        assert_eq!(err, "Name is required.\nUnknown attribute kind: colour");
    }
}
