//! Data layer of the ORB dashboard.
//!
//! - [`models`]: the typed row schema and [`models::Dataset`].
//! - [`io`]: CSV → polars frame → typed rows.
//! - [`selector`]: the combinations table and [`selector::DatasetKey`].
//! - [`providers`]: where tables come from, and the never-failing
//!   [`providers::fetch_or_empty`] boundary.
//! - [`cache`]: the process-wide read-through cache cleared on login.

pub mod cache;
pub mod io;
pub mod models;
pub mod providers;
pub mod selector;
