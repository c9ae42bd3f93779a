//! Integration tests for the wardrobe app
//!
//! Tests cover:
//! - Default slot/attribute copy for new users, including partial failure
//! - Position reindexing when slots are deleted
//! - Item forms with per-attribute inputs
//! - Item listing fallback when the store fails
//! - JSON attribute list and health endpoints

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use p3510_wardrobe::model::{Attribute, AttributeKind, Item, ItemAttributeValue, Slot, User};
use p3510_wardrobe::service;
use p3510_wardrobe::store::{create, eq, fetch_all, Filter, MemoryStore, StoreError, StoreResult, WardrobeStore};
use p3510_wardrobe::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

/// Memory store that fails reads or inserts on chosen tables
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing_select: Option<&'static str>,
    failing_insert: Option<&'static str>,
}

fn unavailable() -> StoreError {
    StoreError::Api {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl WardrobeStore for FlakyStore {
    async fn select(
        &self,
        table: &'static str,
        filters: &[Filter],
        order: Option<&'static str>,
    ) -> StoreResult<Vec<Value>> {
        if self.failing_select == Some(table) {
            return Err(unavailable());
        }
        self.inner.select(table, filters, order).await
    }

    async fn insert(&self, table: &'static str, row: Value) -> StoreResult<Value> {
        if self.failing_insert == Some(table) {
            return Err(unavailable());
        }
        self.inner.insert(table, row).await
    }

    async fn update(&self, table: &'static str, id: &str, changes: Value) -> StoreResult<()> {
        self.inner.update(table, id, changes).await
    }

    async fn delete(&self, table: &'static str, filters: &[Filter]) -> StoreResult<usize> {
        self.inner.delete(table, filters).await
    }
}

fn app(store: Arc<dyn WardrobeStore>, template_user: Option<String>) -> Router {
    build_router(AppState::new(store, template_user))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

async fn add_user(store: &dyn WardrobeStore, name: &str) -> User {
    let draft = User {
        username: name.to_string(),
        email: format!("{}@example.com", name),
        ..Default::default()
    };
    create(store, &draft).await.unwrap()
}

async fn add_attribute(store: &dyn WardrobeStore, slot: &Slot, name: &str, kind: AttributeKind, options: &[&str]) -> Attribute {
    let draft = Attribute {
        name: name.to_string(),
        kind,
        options: options.iter().map(|o| o.to_string()).collect(),
        ..Default::default()
    };
    service::create_attribute(store, slot, &draft).await.unwrap()
}

/// Template user with "tops" (Color, Size) and "shoes" (Color)
async fn seed_template(store: &dyn WardrobeStore) -> User {
    let template = add_user(store, "template").await;
    let tops = service::create_slot(store, &template.id, "tops").await.unwrap();
    let shoes = service::create_slot(store, &template.id, "shoes").await.unwrap();
    add_attribute(store, &tops, "Color", AttributeKind::Enum, &["red", "blue"]).await;
    add_attribute(store, &tops, "Size", AttributeKind::Number, &[]).await;
    add_attribute(store, &shoes, "Color", AttributeKind::Text, &[]).await;
    template
}

async fn slots_of(store: &dyn WardrobeStore, user_id: &str) -> Vec<Slot> {
    fetch_all(store, &[eq("user_id", user_id)]).await.unwrap()
}

/// Id of the user a `/users/:uid/items` redirect points at
fn user_id_from(location: &str) -> String {
    location
        .trim_start_matches("/users/")
        .trim_end_matches("/items")
        .to_string()
}

#[tokio::test]
async fn test_health_and_root_redirect() {
    let app = app(Arc::new(MemoryStore::new()), None);

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["module"], "p3510-wardrobe");

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");
}

#[tokio::test]
async fn test_new_user_gets_template_defaults() {
    let store = Arc::new(MemoryStore::new());
    let template = seed_template(store.as_ref()).await;
    let app = app(store.clone(), Some(template.id.clone()));

    let response = send(&app, post_form("/users/new", "username=grace&email=grace%40example.com")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let user_id = user_id_from(&location(&response));

    let slots = slots_of(store.as_ref(), &user_id).await;
    let names: Vec<(&str, i64)> = slots.iter().map(|s| (s.name.as_str(), s.position)).collect();
    assert_eq!(names, vec![("tops", 0), ("shoes", 1)]);

    let tops_attributes: Vec<Attribute> = fetch_all(store.as_ref(), &[eq("slot_id", slots[0].id.as_str())])
        .await
        .unwrap();
    assert_eq!(tops_attributes.len(), 2);
    assert_eq!(tops_attributes[0].name, "Color");
    assert_eq!(tops_attributes[0].options, vec!["red", "blue"]);
    assert_eq!(tops_attributes[0].user_id, user_id);
    assert_eq!(tops_attributes[1].kind, AttributeKind::Number);

    // Template keeps its own records
    assert_eq!(slots_of(store.as_ref(), &template.id).await.len(), 2);
}

#[tokio::test]
async fn test_partial_default_copy_keeps_user() {
    let store = Arc::new(FlakyStore {
        failing_insert: Some("attributes"),
        ..Default::default()
    });
    // Seed through the inner store so the template itself is complete
    let template = seed_template(&store.inner).await;
    let app = app(store.clone(), Some(template.id.clone()));

    let response = send(&app, post_form("/users/new", "username=grace&email=grace%40example.com")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let user_id = user_id_from(&location(&response));

    // First slot copied, then the attribute insert failed and copying stopped
    let slots = slots_of(store.as_ref(), &user_id).await;
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name, "tops");

    let users: Vec<User> = fetch_all(store.as_ref(), &[eq("id", user_id.as_str())]).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_delete_slot_shifts_later_positions() {
    let store = Arc::new(MemoryStore::new());
    let ada = add_user(store.as_ref(), "ada").await;
    for name in ["tops", "pants", "shoes", "hats"] {
        service::create_slot(store.as_ref(), &ada.id, name).await.unwrap();
    }
    let pants = slots_of(store.as_ref(), &ada.id).await[1].clone();
    let app = app(store.clone(), None);

    let response = send(&app, get(&format!("/users/{}/slots/{}/delete", ada.id, pants.id))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/users/{}/slots", ada.id));

    let slots = slots_of(store.as_ref(), &ada.id).await;
    let names: Vec<(&str, i64)> = slots.iter().map(|s| (s.name.as_str(), s.position)).collect();
    assert_eq!(names, vec![("tops", 0), ("shoes", 1), ("hats", 2)]);
}

#[tokio::test]
async fn test_move_slot_down_and_unknown_slot() {
    let store = Arc::new(MemoryStore::new());
    let ada = add_user(store.as_ref(), "ada").await;
    let tops = service::create_slot(store.as_ref(), &ada.id, "tops").await.unwrap();
    service::create_slot(store.as_ref(), &ada.id, "shoes").await.unwrap();
    let app = app(store.clone(), None);

    let response = send(&app, get(&format!("/users/{}/slots/{}/down", ada.id, tops.id))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let names: Vec<String> = slots_of(store.as_ref(), &ada.id).await.into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["shoes", "tops"]);

    let response = send(&app, get(&format!("/users/{}/slots/missing/down", ada.id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/users/nobody/slots")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_item_with_attribute_values() {
    let store = Arc::new(MemoryStore::new());
    let ada = add_user(store.as_ref(), "ada").await;
    let tops = service::create_slot(store.as_ref(), &ada.id, "tops").await.unwrap();
    let color = add_attribute(store.as_ref(), &tops, "Color", AttributeKind::Enum, &["red", "blue"]).await;
    let size = add_attribute(store.as_ref(), &tops, "Size", AttributeKind::Number, &[]).await;
    let app = app(store.clone(), None);

    let form_page = body_text(send(&app, get(&format!("/users/{}/items/new?slot_id={}", ada.id, tops.id))).await).await;
    assert!(form_page.contains(&format!(r#"name="attr_{}""#, color.id)));
    assert!(form_page.contains(&format!(r#"name="attr_{}""#, size.id)));

    // Invalid number is reported and nothing is stored
    let bad = format!(
        "name=Oxford+shirt&slot_id={}&attr_{}=blue&attr_{}=large&notes=",
        tops.id, color.id, size.id
    );
    let response = send(&app, post_form(&format!("/users/{}/items/new", ada.id), &bad)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Size must be a number."));
    assert!(fetch_all::<Item>(store.as_ref(), &[]).await.unwrap().is_empty());

    let good = format!(
        "name=Oxford+shirt&slot_id={}&attr_{}=blue&attr_{}=40&notes=",
        tops.id, color.id, size.id
    );
    let response = send(&app, post_form(&format!("/users/{}/items/new", ada.id), &good)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let values: Vec<ItemAttributeValue> = fetch_all(store.as_ref(), &[]).await.unwrap();
    assert_eq!(values.len(), 2);

    let listing = body_text(send(&app, get(&format!("/users/{}/items", ada.id))).await).await;
    assert!(listing.contains("Oxford shirt"));
    assert!(listing.contains("Color: blue; Size: 40"));
}

#[tokio::test]
async fn test_item_listing_falls_back_when_store_fails() {
    let store = Arc::new(FlakyStore {
        failing_select: Some("items"),
        ..Default::default()
    });
    let ada = add_user(store.as_ref(), "ada").await;
    let app = app(store.clone(), None);

    let response = send(&app, get(&format!("/users/{}/items", ada.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Items could not be loaded right now."));
    assert!(html.contains("No items yet."));
}

#[tokio::test]
async fn test_slot_attributes_json() {
    let store = Arc::new(MemoryStore::new());
    let ada = add_user(store.as_ref(), "ada").await;
    let tops = service::create_slot(store.as_ref(), &ada.id, "tops").await.unwrap();
    add_attribute(store.as_ref(), &tops, "Color", AttributeKind::Enum, &["red"]).await;
    add_attribute(store.as_ref(), &tops, "Fabric", AttributeKind::Text, &[]).await;
    let app = app(store.clone(), None);

    let response = send(&app, get(&format!("/api/slots/{}/attributes", tops.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let attributes = body.as_array().unwrap();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0]["name"], "Color");
    assert_eq!(attributes[0]["kind"], "enum");
    assert_eq!(attributes[1]["position"], 1);

    let response = send(&app, get("/api/slots/missing/attributes")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rules_and_user_validation() {
    let store = Arc::new(MemoryStore::new());
    let ada = add_user(store.as_ref(), "ada").await;
    let app = app(store.clone(), None);

    let response = send(&app, post_form(&format!("/users/{}/rules/new", ada.id), "rule=")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Rule is required."));

    let response = send(
        &app,
        post_form(&format!("/users/{}/rules/new", ada.id), "rule=No+brown+shoes+after+six"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let rules = body_text(send(&app, get(&format!("/users/{}/rules", ada.id))).await).await;
    assert!(rules.contains("No brown shoes after six"));

    let response = send(&app, post_form("/users/new", "username=&email=nobody")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Username is required."));
    assert!(html.contains("Invalid email."));
}
