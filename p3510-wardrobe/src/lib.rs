//! p3510-wardrobe library - clothing catalogue per user
//!
//! Users own slots (clothing categories), per-slot ordered attributes, items
//! with attribute values, and free-text outfit rules. Records live in a
//! [`store::WardrobeStore`]: the hosted REST backend, or memory.

use axum::Router;
use p3510_common::health::health_routes;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod model;
pub mod render;
pub mod service;
pub mod store;

use store::WardrobeStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WardrobeStore>,
    /// User whose slots and attributes new users start with
    pub template_user: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn WardrobeStore>, template_user: Option<String>) -> Self {
        Self {
            store,
            template_user,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use api::{attributes, items, rules, slots, users};
    use axum::routing::get;

    let users = Router::new()
        .route("/", get(users::index))
        .route("/users", get(users::list_users))
        .route("/users/new", get(users::new_user_form).post(users::create_user))
        .route("/users/:uid/edit", get(users::edit_user_form).post(users::update_user))
        .route("/users/:uid/delete", get(users::delete_user));

    let slots = Router::new()
        .route("/users/:uid/slots", get(slots::list_slots))
        .route("/users/:uid/slots/new", get(slots::new_slot_form).post(slots::create_slot))
        .route("/users/:uid/slots/:sid/edit", get(slots::edit_slot_form).post(slots::update_slot))
        .route("/users/:uid/slots/:sid/delete", get(slots::delete_slot))
        .route("/users/:uid/slots/:sid/up", get(slots::move_slot_up))
        .route("/users/:uid/slots/:sid/down", get(slots::move_slot_down));

    let attributes = Router::new()
        .route("/users/:uid/slots/:sid/attributes", get(attributes::list_attributes))
        .route(
            "/users/:uid/slots/:sid/attributes/new",
            get(attributes::new_attribute_form).post(attributes::create_attribute),
        )
        .route(
            "/users/:uid/slots/:sid/attributes/:aid/edit",
            get(attributes::edit_attribute_form).post(attributes::update_attribute),
        )
        .route("/users/:uid/slots/:sid/attributes/:aid/delete", get(attributes::delete_attribute))
        .route("/users/:uid/slots/:sid/attributes/:aid/up", get(attributes::move_attribute_up))
        .route("/users/:uid/slots/:sid/attributes/:aid/down", get(attributes::move_attribute_down))
        .route("/api/slots/:sid/attributes", get(attributes::slot_attributes_json));

    let items = Router::new()
        .route("/users/:uid/items", get(items::list_items))
        .route("/users/:uid/items/new", get(items::new_item_form).post(items::create_item))
        .route("/users/:uid/items/:iid/edit", get(items::edit_item_form).post(items::update_item))
        .route("/users/:uid/items/:iid/delete", get(items::delete_item));

    let rules = Router::new()
        .route("/users/:uid/rules", get(rules::list_rules))
        .route("/users/:uid/rules/new", get(rules::new_rule_form).post(rules::create_rule))
        .route("/users/:uid/rules/:rid/edit", get(rules::edit_rule_form).post(rules::update_rule))
        .route("/users/:uid/rules/:rid/delete", get(rules::delete_rule));

    Router::new()
        .merge(users)
        .merge(slots)
        .merge(attributes)
        .merge(items)
        .merge(rules)
        .merge(health_routes::<AppState>(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
