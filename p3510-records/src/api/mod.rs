//! HTTP handlers for the records app

pub mod crud;
pub mod nav;
pub mod reports;

pub use crud::entity_routes;
pub use nav::{followups_tab, home, misc_tab, people_tab, visits_tab};
pub use reports::{execute, get_column_values, get_columns, get_params, get_tables};
