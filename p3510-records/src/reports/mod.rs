//! Ad-hoc reporting
//!
//! A fixed table of named report queries ([`FUNCTIONS`]) with declared
//! parameter schemas. The home page builds its form from the schemas, fills
//! table and column choices from the live catalog, and posts the chosen
//! report to `/execute`.

pub mod catalog;
pub mod format;
pub mod functions;

pub use format::{format_result, ReportOutput, SalaryStats};
pub use functions::{coerce_params, find, run, ParamKind, ParamSpec, Params, ReportSpec, FUNCTIONS};
