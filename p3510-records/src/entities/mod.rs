//! Entity descriptors
//!
//! Every table the records app edits is described by a static [`EntitySpec`]:
//! its route segment, columns with their input rules, uniqueness keys and the
//! query behind its list page. The generic handlers, the repository and the
//! validator all read from these descriptors.

mod registry;

pub use registry::ENTITIES;

/// How a submitted form value is checked and stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Letters and spaces only
    Name,
    /// Free text, stored as given
    Text,
    Email,
    /// Stored as its nine digits
    Ssn,
    /// Non-negative whole number
    Int,
    /// Yes/No select, stored as 1/0
    Bool,
    /// `YYYY-MM-DD`
    Date,
    /// Course code such as `MATH-1010`
    Course,
    /// Id of a row in another table, offered as a dropdown
    Ref(Reference),
}

/// Foreign-key target used to populate dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: &'static str,
    pub id_column: &'static str,
    pub label_column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Empty optional fields are stored as NULL
    pub required: bool,
}

impl Field {
    pub const fn required(column: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            column,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(column: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            column,
            label,
            kind,
            required: false,
        }
    }
}

/// Column set that may appear on at most one row
#[derive(Debug, Clone, Copy)]
pub struct UniqueKey {
    pub columns: &'static [&'static str],
    pub message: &'static str,
}

/// `end` must fall after `start` when both are present
#[derive(Debug, Clone, Copy)]
pub struct DateOrder {
    pub start: &'static str,
    pub end: &'static str,
}

/// Navigation group an entity is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    People,
    Visits,
    FollowUps,
    Misc,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::People, Tab::Visits, Tab::FollowUps, Tab::Misc];

    pub fn path(self) -> &'static str {
        match self {
            Tab::People => "/peopletab",
            Tab::Visits => "/visitstab",
            Tab::FollowUps => "/followupstab",
            Tab::Misc => "/misctab",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::People => "People",
            Tab::Visits => "Visits",
            Tab::FollowUps => "Follow Ups",
            Tab::Misc => "Misc",
        }
    }
}

#[derive(Debug)]
pub struct EntitySpec {
    /// Route segment, e.g. `students` for `/students`
    pub path: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    pub title: &'static str,
    pub singular: &'static str,
    pub tab: Tab,
    pub fields: &'static [Field],
    pub unique: &'static [UniqueKey],
    pub date_order: Option<DateOrder>,
    /// First selected column must be the row id
    pub list_sql: &'static str,
    /// Headers for the remaining list columns
    pub list_headers: &'static [&'static str],
}

impl EntitySpec {
    pub fn field(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column == column)
    }

    pub fn references(&self) -> impl Iterator<Item = (&'static str, Reference)> + '_ {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Ref(r) => Some((f.column, r)),
            _ => None,
        })
    }
}

/// Look up an entity by its route segment
pub fn find(path: &str) -> Option<&'static EntitySpec> {
    ENTITIES.iter().copied().find(|e| e.path == path)
}

/// Entities listed under `tab`, in registry order
pub fn in_tab(tab: Tab) -> impl Iterator<Item = &'static EntitySpec> {
    ENTITIES.iter().copied().filter(move |e| e.tab == tab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_and_tables_are_unique() {
        let paths: HashSet<_> = ENTITIES.iter().map(|e| e.path).collect();
        let tables: HashSet<_> = ENTITIES.iter().map(|e| e.table).collect();
        assert_eq!(paths.len(), ENTITIES.len());
        assert_eq!(tables.len(), ENTITIES.len());
    }

    #[test]
    fn test_unique_keys_name_real_fields() {
        for entity in ENTITIES {
            for key in entity.unique {
                for column in key.columns {
                    assert!(
                        entity.field(column).is_some(),
                        "{}: unique key column {} is not a field",
                        entity.table,
                        column
                    );
                }
            }
            if let Some(order) = entity.date_order {
                assert_eq!(entity.field(order.start).map(|f| f.kind), Some(FieldKind::Date));
                assert_eq!(entity.field(order.end).map(|f| f.kind), Some(FieldKind::Date));
            }
        }
    }

    #[test]
    fn test_list_sql_starts_with_id() {
        for entity in ENTITIES {
            assert!(entity.list_sql.starts_with("SELECT "), "{}", entity.table);
            assert!(
                entity.list_sql.contains(entity.id_column),
                "{} list query does not select its id",
                entity.table
            );
        }
    }

    #[test]
    fn test_find_and_tabs() {
        assert_eq!(find("students").map(|e| e.table), Some("Students"));
        assert_eq!(find("providers").map(|e| e.table), Some("Healthcare_Providers"));
        assert_eq!(find("followups").map(|e| e.table), Some("Follow_Ups"));
        assert!(find("nope").is_none());

        let total: usize = Tab::ALL.iter().map(|t| in_tab(*t).count()).sum();
        assert_eq!(total, ENTITIES.len());
    }
}
