//! Item pages
//!
//! Item forms carry one `attr_<id>` input per attribute of the chosen slot.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{required, see_other};
use crate::error::ApiResult;
use crate::model::{Attribute, Item, Slot, User};
use crate::render::{self, FormValues};
use crate::service;
use crate::store::{eq, fetch_all, fetch_one, StoreError, WardrobeStore};
use crate::AppState;

pub const ITEMS_UNAVAILABLE: &str = "Items could not be loaded right now.";

#[derive(Debug, Default, Deserialize)]
pub struct SlotChoice {
    pub slot_id: Option<String>,
}

/// A checked item form: the item to save, or the messages to show
struct Submission {
    item: Item,
    attributes: Vec<Attribute>,
    outcome: Result<Vec<(String, String)>, String>,
}

async fn slot_attributes(store: &dyn WardrobeStore, slot_id: &str) -> ApiResult<Vec<Attribute>> {
    Ok(fetch_all(store, &[eq("slot_id", slot_id)]).await?)
}

async fn check_item(store: &dyn WardrobeStore, user_id: &str, form: &FormValues) -> ApiResult<Submission> {
    let mut messages = Vec::new();
    let name = required(form, "name", "Name", &mut messages);
    let slot_id = required(form, "slot_id", "Slot", &mut messages);

    let mut attributes = Vec::new();
    if !slot_id.is_empty() {
        match service::owned_slot(store, user_id, &slot_id).await {
            Ok(slot) => attributes = slot_attributes(store, &slot.id).await?,
            Err(StoreError::NotFound(_)) => messages.push("Unknown slot.".to_string()),
            Err(e) => return Err(e.into()),
        }
    }

    let values = match service::collect_values(&attributes, form) {
        Ok(values) => values,
        Err(problems) => {
            messages.extend(problems);
            Vec::new()
        }
    };

    let notes = form
        .get("notes")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(Submission {
        item: Item {
            id: String::new(),
            user_id: user_id.to_string(),
            slot_id,
            name,
            notes,
        },
        attributes,
        outcome: if messages.is_empty() {
            Ok(values)
        } else {
            Err(messages.join("\n"))
        },
    })
}

/// GET /users/:uid/items
///
/// A store failure while loading items still renders the page, empty and
/// with a notice.
pub async fn list_items(State(state): State<AppState>, Path(uid): Path<String>) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;

    let page = match service::list_items(store, &uid).await {
        Ok(items) => render::items_page(&user, &items, None),
        Err(e) => {
            error!("Failed to load items for user {}: {}", uid, e);
            render::items_page(&user, &[], Some(ITEMS_UNAVAILABLE))
        }
    };
    Ok(Html(page))
}

/// GET /users/:uid/items/new?slot_id=
pub async fn new_item_form(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Query(choice): Query<SlotChoice>,
) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;

    let mut values = FormValues::new();
    let mut attributes = Vec::new();
    if let Some(slot) = choice
        .slot_id
        .and_then(|id| slots.iter().find(|s| s.id == id))
    {
        values.insert("slot_id".to_string(), slot.id.clone());
        attributes = slot_attributes(store, &slot.id).await?;
    }

    let action = render::user_path(&user, "items/new");
    Ok(Html(render::item_form(&user, &action, &slots, &attributes, &values, None)))
}

/// POST /users/:uid/items/new
pub async fn create_item(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let submission = check_item(store, &uid, &form).await?;

    match submission.outcome {
        Ok(values) => {
            let item = service::save_item(store, &submission.item, &values).await?;
            info!("Created item {} with {} values", item.id, values.len());
            Ok(see_other(&render::user_path(&user, "items")))
        }
        Err(messages) => {
            warn!("Rejected new item: {}", messages.replace('\n', "; "));
            let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;
            let action = render::user_path(&user, "items/new");
            Ok(Html(render::item_form(
                &user,
                &action,
                &slots,
                &submission.attributes,
                &form,
                Some(&messages),
            ))
            .into_response())
        }
    }
}

/// GET /users/:uid/items/:iid/edit
pub async fn edit_item_form(
    State(state): State<AppState>,
    Path((uid, iid)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let item = service::owned_item(store, &uid, &iid).await?;

    let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;
    let attributes = slot_attributes(store, &item.slot_id).await?;
    let values = service::item_form_values(store, &item).await?;

    let action = format!("/users/{}/items/{}/edit", uid, iid);
    Ok(Html(render::item_form(&user, &action, &slots, &attributes, &values, None)))
}

/// POST /users/:uid/items/:iid/edit
///
/// Replaces every attribute value of the item.
pub async fn update_item(
    State(state): State<AppState>,
    Path((uid, iid)): Path<(String, String)>,
    Form(form): Form<FormValues>,
) -> ApiResult<Response> {
    let store = state.store.as_ref();
    let user: User = fetch_one(store, &uid).await?;
    let existing = service::owned_item(store, &uid, &iid).await?;
    let submission = check_item(store, &uid, &form).await?;

    match submission.outcome {
        Ok(values) => {
            let item = Item {
                id: existing.id,
                ..submission.item
            };
            service::save_item(store, &item, &values).await?;
            info!("Updated item {}", iid);
            Ok(see_other(&render::user_path(&user, "items")))
        }
        Err(messages) => {
            let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", uid.as_str())]).await?;
            let action = format!("/users/{}/items/{}/edit", uid, iid);
            Ok(Html(render::item_form(
                &user,
                &action,
                &slots,
                &submission.attributes,
                &form,
                Some(&messages),
            ))
            .into_response())
        }
    }
}

/// GET /users/:uid/items/:iid/delete
pub async fn delete_item(
    State(state): State<AppState>,
    Path((uid, iid)): Path<(String, String)>,
) -> ApiResult<Response> {
    service::delete_item(state.store.as_ref(), &uid, &iid).await?;
    info!("Deleted item {} of user {}", iid, uid);
    Ok(see_other(&format!("/users/{}/items", uid)))
}
