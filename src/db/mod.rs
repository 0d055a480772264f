//! Database module: models, filters and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `filter.rs`: parameterized predicates for settings listings
//! - `schema.rs`: install-script helpers and table names
//! - `sqlite.rs`: storage handles over a SQLite pool

pub mod filter;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use filter::{Comparison, FilterValue, SettingColumn, SettingFilter};
pub use models::{Setting, User};
pub use sqlite::{SchemaInstaller, SettingsStorage, SqlitePool, UserStorage, open_pool};
