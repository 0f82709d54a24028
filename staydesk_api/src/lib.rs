//! Typed HTTP client for the booking backend: list query codec, paginated
//! envelope model, entity DTOs, and a raw error type carrying the
//! structured failure body.

mod client;
mod errors;
pub mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{ListDefaults, ListQuery, SortDirection, SortKey, DEFAULT_PAGE_SIZE};
