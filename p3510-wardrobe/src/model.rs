//! Wardrobe records
//!
//! Ids are opaque strings assigned by the store. An empty id marks a record
//! that has not been inserted yet and is left out of the serialized row.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A row type stored in one store table
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: &'static str;
    /// Column the table is listed by, ascending
    const ORDER: Option<&'static str>;

    fn id(&self) -> &str;
}

/// Records kept in a gap-free `0..n` sequence among their siblings
pub trait Positioned: Record {
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

macro_rules! record {
    ($ty:ty, $table:literal, $order:expr) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;
            const ORDER: Option<&'static str> = $order;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

macro_rules! positioned {
    ($ty:ty) => {
        impl Positioned for $ty {
            fn position(&self) -> i64 {
                self.position
            }

            fn set_position(&mut self, position: i64) {
                self.position = position;
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A clothing category such as "tops" or "shoes"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub position: i64,
}

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    #[default]
    Text,
    Enum,
    Number,
    Boolean,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Text,
        AttributeKind::Enum,
        AttributeKind::Number,
        AttributeKind::Boolean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Enum => "enum",
            AttributeKind::Number => "number",
            AttributeKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown attribute kind: {}", s))
    }
}

/// A typed property of the items in one slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub slot_id: String,
    pub name: String,
    #[serde(default)]
    pub kind: AttributeKind,
    /// Allowed values of an `enum` attribute
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<String>,
    pub position: i64,
}

impl Attribute {
    /// Check a submitted value against the attribute's kind
    pub fn check_value(&self, value: &str) -> Result<String, String> {
        let value = value.trim();
        match self.kind {
            AttributeKind::Text => Ok(value.to_string()),
            AttributeKind::Number => value
                .parse::<f64>()
                .map(|_| value.to_string())
                .map_err(|_| format!("{} must be a number.", self.name)),
            AttributeKind::Boolean => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok("true".to_string()),
                "false" | "no" | "0" => Ok("false".to_string()),
                _ => Err(format!("{} must be yes or no.", self.name)),
            },
            AttributeKind::Enum => self
                .options
                .iter()
                .find(|o| o.as_str() == value)
                .cloned()
                .ok_or_else(|| format!("{} must be one of: {}.", self.name, self.options.join(", "))),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub slot_id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Value of one attribute on one item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributeValue {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub item_id: String,
    pub attribute_id: String,
    pub value: String,
}

/// Free-text styling rule such as "no brown shoes with black belts"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub rule: String,
}

record!(User, "users", Some("username"));
record!(Slot, "slots", Some("position"));
record!(Attribute, "attributes", Some("position"));
record!(Item, "items", Some("name"));
record!(ItemAttributeValue, "item_attribute_values", None);
record!(OutfitRule, "outfit_rules", None);

positioned!(Slot);
positioned!(Attribute);
