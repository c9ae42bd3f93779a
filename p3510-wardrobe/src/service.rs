//! Multi-step wardrobe operations
//!
//! None of these are atomic against the backend: each step is its own store
//! call and a failure part way leaves the earlier steps applied.

use crate::model::{Attribute, Item, ItemAttributeValue, OutfitRule, Positioned, Slot, User};
use crate::store::{create, eq, fetch_all, fetch_one, remove, save, Filter, StoreError, StoreResult, WardrobeStore};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Form input name carrying the value of one attribute
pub fn attribute_input(attribute_id: &str) -> String {
    format!("attr_{}", attribute_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// An item with its slot name and `(attribute, value)` pairs in attribute order
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub item: Item,
    pub slot_name: String,
    pub values: Vec<(String, String)>,
}

fn not_found(what: &str, id: &str) -> StoreError {
    StoreError::NotFound(format!("{} {}", what, id))
}

// ---- ownership lookups ----

pub async fn owned_slot(store: &dyn WardrobeStore, user_id: &str, slot_id: &str) -> StoreResult<Slot> {
    let slot: Slot = fetch_one(store, slot_id).await?;
    if slot.user_id != user_id {
        return Err(not_found("slot", slot_id));
    }
    Ok(slot)
}

pub async fn slot_attribute(
    store: &dyn WardrobeStore,
    slot_id: &str,
    attribute_id: &str,
) -> StoreResult<Attribute> {
    let attribute: Attribute = fetch_one(store, attribute_id).await?;
    if attribute.slot_id != slot_id {
        return Err(not_found("attribute", attribute_id));
    }
    Ok(attribute)
}

pub async fn owned_item(store: &dyn WardrobeStore, user_id: &str, item_id: &str) -> StoreResult<Item> {
    let item: Item = fetch_one(store, item_id).await?;
    if item.user_id != user_id {
        return Err(not_found("item", item_id));
    }
    Ok(item)
}

pub async fn owned_rule(store: &dyn WardrobeStore, user_id: &str, rule_id: &str) -> StoreResult<OutfitRule> {
    let rule: OutfitRule = fetch_one(store, rule_id).await?;
    if rule.user_id != user_id {
        return Err(not_found("rule", rule_id));
    }
    Ok(rule)
}

// ---- ordering ----

/// Move every sibling after `removed` down one place
async fn close_gap<R: Positioned>(
    store: &dyn WardrobeStore,
    siblings: &[Filter],
    removed: i64,
) -> StoreResult<usize> {
    let mut shifted = 0;
    for mut record in fetch_all::<R>(store, siblings).await? {
        if record.position() > removed {
            record.set_position(record.position() - 1);
            save(store, &record).await?;
            shifted += 1;
        }
    }
    Ok(shifted)
}

/// Swap positions with the neighbour in `direction`; `false` at either end
async fn swap_with_neighbour<R: Positioned>(
    store: &dyn WardrobeStore,
    siblings: &[Filter],
    id: &str,
    direction: Direction,
) -> StoreResult<bool> {
    let mut records = fetch_all::<R>(store, siblings).await?;
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found(R::TABLE, id))?;

    let neighbour = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&i| i < records.len()),
    };
    let Some(neighbour) = neighbour else {
        return Ok(false);
    };

    let (here, there) = (records[index].position(), records[neighbour].position());
    records[index].set_position(there);
    records[neighbour].set_position(here);
    save(store, &records[index]).await?;
    save(store, &records[neighbour]).await?;
    Ok(true)
}

// ---- users ----

/// Create a user and give them the template user's slots and attributes
///
/// Returns the new user and the number of records copied. A failed copy is
/// logged and does not fail the creation.
pub async fn create_user(
    store: &dyn WardrobeStore,
    user: &User,
    template_user: Option<&str>,
) -> StoreResult<(User, usize)> {
    let created = create(store, user).await?;
    info!("Created user {} ({})", created.username, created.id);

    let copied = match template_user {
        Some(template) if !template.is_empty() && template != created.id => {
            copy_defaults(store, template, &created.id).await
        }
        _ => 0,
    };
    Ok((created, copied))
}

/// Copy the template user's slots and attributes to `user_id`
///
/// Stops at the first failure and keeps whatever was copied so far.
pub async fn copy_defaults(store: &dyn WardrobeStore, template_id: &str, user_id: &str) -> usize {
    let mut copied = 0;
    match copy_slots(store, template_id, user_id, &mut copied).await {
        Ok(()) => info!("Copied {} default records from {} to {}", copied, template_id, user_id),
        Err(e) => error!(
            "Default copy from {} to {} failed after {} records: {}",
            template_id, user_id, copied, e
        ),
    }
    copied
}

async fn copy_slots(
    store: &dyn WardrobeStore,
    template_id: &str,
    user_id: &str,
    copied: &mut usize,
) -> StoreResult<()> {
    let slots: Vec<Slot> = fetch_all(store, &[eq("user_id", template_id)]).await?;

    for slot in slots {
        let new_slot = create(
            store,
            &Slot {
                id: String::new(),
                user_id: user_id.to_string(),
                ..slot.clone()
            },
        )
        .await?;
        *copied += 1;

        let attributes: Vec<Attribute> = fetch_all(store, &[eq("slot_id", slot.id.as_str())]).await?;
        for attribute in attributes {
            create(
                store,
                &Attribute {
                    id: String::new(),
                    user_id: user_id.to_string(),
                    slot_id: new_slot.id.clone(),
                    ..attribute
                },
            )
            .await?;
            *copied += 1;
        }
    }
    Ok(())
}

/// Remove a user and everything they own
pub async fn delete_user(store: &dyn WardrobeStore, user_id: &str) -> StoreResult<()> {
    let user: User = fetch_one(store, user_id).await?;

    for item in fetch_all::<Item>(store, &[eq("user_id", user_id)]).await? {
        remove::<ItemAttributeValue>(store, &[eq("item_id", item.id.as_str())]).await?;
    }
    remove::<Item>(store, &[eq("user_id", user_id)]).await?;
    remove::<Attribute>(store, &[eq("user_id", user_id)]).await?;
    remove::<Slot>(store, &[eq("user_id", user_id)]).await?;
    remove::<OutfitRule>(store, &[eq("user_id", user_id)]).await?;
    remove::<User>(store, &[eq("id", user_id)]).await?;

    info!("Deleted user {} ({})", user.username, user_id);
    Ok(())
}

// ---- slots ----

/// Append a slot after the user's existing slots
pub async fn create_slot(store: &dyn WardrobeStore, user_id: &str, name: &str) -> StoreResult<Slot> {
    let count = fetch_all::<Slot>(store, &[eq("user_id", user_id)]).await?.len();
    create(
        store,
        &Slot {
            id: String::new(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            position: count as i64,
        },
    )
    .await
}

/// Delete a slot with its attributes and items, then close the position gap
pub async fn delete_slot(store: &dyn WardrobeStore, user_id: &str, slot_id: &str) -> StoreResult<()> {
    let slot = owned_slot(store, user_id, slot_id).await?;

    for item in fetch_all::<Item>(store, &[eq("slot_id", slot_id)]).await? {
        remove::<ItemAttributeValue>(store, &[eq("item_id", item.id.as_str())]).await?;
    }
    remove::<Item>(store, &[eq("slot_id", slot_id)]).await?;
    remove::<Attribute>(store, &[eq("slot_id", slot_id)]).await?;
    remove::<Slot>(store, &[eq("id", slot_id)]).await?;

    let shifted = close_gap::<Slot>(store, &[eq("user_id", user_id)], slot.position).await?;
    debug!("Deleted slot {}; shifted {} later slots", slot_id, shifted);
    Ok(())
}

pub async fn move_slot(
    store: &dyn WardrobeStore,
    user_id: &str,
    slot_id: &str,
    direction: Direction,
) -> StoreResult<bool> {
    owned_slot(store, user_id, slot_id).await?;
    swap_with_neighbour::<Slot>(store, &[eq("user_id", user_id)], slot_id, direction).await
}

// ---- attributes ----

/// Append an attribute after the slot's existing attributes
pub async fn create_attribute(
    store: &dyn WardrobeStore,
    slot: &Slot,
    draft: &Attribute,
) -> StoreResult<Attribute> {
    let count = fetch_all::<Attribute>(store, &[eq("slot_id", slot.id.as_str())])
        .await?
        .len();
    create(
        store,
        &Attribute {
            id: String::new(),
            user_id: slot.user_id.clone(),
            slot_id: slot.id.clone(),
            position: count as i64,
            ..draft.clone()
        },
    )
    .await
}

/// Delete an attribute and its item values, then close the position gap
pub async fn delete_attribute(
    store: &dyn WardrobeStore,
    slot_id: &str,
    attribute_id: &str,
) -> StoreResult<()> {
    let attribute = slot_attribute(store, slot_id, attribute_id).await?;

    remove::<ItemAttributeValue>(store, &[eq("attribute_id", attribute_id)]).await?;
    remove::<Attribute>(store, &[eq("id", attribute_id)]).await?;

    close_gap::<Attribute>(store, &[eq("slot_id", slot_id)], attribute.position).await?;
    Ok(())
}

pub async fn move_attribute(
    store: &dyn WardrobeStore,
    slot_id: &str,
    attribute_id: &str,
    direction: Direction,
) -> StoreResult<bool> {
    slot_attribute(store, slot_id, attribute_id).await?;
    swap_with_neighbour::<Attribute>(store, &[eq("slot_id", slot_id)], attribute_id, direction).await
}

// ---- items ----

/// Check the `attr_<id>` inputs of a submitted item form
///
/// Blank inputs are skipped. Returns `(attribute id, value)` pairs or one
/// message per rejected value.
pub fn collect_values(
    attributes: &[Attribute],
    form: &HashMap<String, String>,
) -> Result<Vec<(String, String)>, Vec<String>> {
    let mut values = Vec::new();
    let mut messages = Vec::new();

    for attribute in attributes {
        let raw = form
            .get(&attribute_input(&attribute.id))
            .map(|v| v.trim())
            .unwrap_or_default();
        if raw.is_empty() {
            continue;
        }
        match attribute.check_value(raw) {
            Ok(value) => values.push((attribute.id.clone(), value)),
            Err(message) => messages.push(message),
        }
    }

    if messages.is_empty() {
        Ok(values)
    } else {
        Err(messages)
    }
}

/// Insert or update an item and replace its attribute values
pub async fn save_item(
    store: &dyn WardrobeStore,
    item: &Item,
    values: &[(String, String)],
) -> StoreResult<Item> {
    let saved = if item.id.is_empty() {
        create(store, item).await?
    } else {
        save(store, item).await?;
        item.clone()
    };

    remove::<ItemAttributeValue>(store, &[eq("item_id", saved.id.as_str())]).await?;
    for (attribute_id, value) in values {
        create(
            store,
            &ItemAttributeValue {
                id: String::new(),
                item_id: saved.id.clone(),
                attribute_id: attribute_id.clone(),
                value: value.clone(),
            },
        )
        .await?;
    }
    Ok(saved)
}

/// Current values of an item keyed by form input name
pub async fn item_form_values(store: &dyn WardrobeStore, item: &Item) -> StoreResult<HashMap<String, String>> {
    let mut form: HashMap<String, String> = fetch_all::<ItemAttributeValue>(store, &[eq("item_id", item.id.as_str())])
        .await?
        .into_iter()
        .map(|v| (attribute_input(&v.attribute_id), v.value))
        .collect();

    form.insert("name".to_string(), item.name.clone());
    form.insert("slot_id".to_string(), item.slot_id.clone());
    form.insert("notes".to_string(), item.notes.clone().unwrap_or_default());
    Ok(form)
}

pub async fn list_items(store: &dyn WardrobeStore, user_id: &str) -> StoreResult<Vec<ItemView>> {
    let slots: HashMap<String, String> = fetch_all::<Slot>(store, &[eq("user_id", user_id)])
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let attributes: HashMap<String, Attribute> = fetch_all::<Attribute>(store, &[eq("user_id", user_id)])
        .await?
        .into_iter()
        .map(|a| (a.id.clone(), a))
        .collect();

    let mut views = Vec::new();
    for item in fetch_all::<Item>(store, &[eq("user_id", user_id)]).await? {
        let mut values: Vec<(i64, String, String)> =
            fetch_all::<ItemAttributeValue>(store, &[eq("item_id", item.id.as_str())])
                .await?
                .into_iter()
                .filter_map(|v| {
                    attributes
                        .get(&v.attribute_id)
                        .map(|a| (a.position, a.name.clone(), v.value))
                })
                .collect();
        values.sort_by_key(|(position, _, _)| *position);

        views.push(ItemView {
            slot_name: slots.get(&item.slot_id).cloned().unwrap_or_default(),
            values: values.into_iter().map(|(_, name, value)| (name, value)).collect(),
            item,
        });
    }
    Ok(views)
}

pub async fn delete_item(store: &dyn WardrobeStore, user_id: &str, item_id: &str) -> StoreResult<()> {
    owned_item(store, user_id, item_id).await?;
    remove::<ItemAttributeValue>(store, &[eq("item_id", item_id)]).await?;
    remove::<Item>(store, &[eq("id", item_id)]).await?;
    Ok(())
}
