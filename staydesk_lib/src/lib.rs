//! Screen layer for the staydesk admin console: failure classification,
//! list controls over canonical query state, the stale-response-guarded
//! list screen, form schemas, and the form/delete flows built on them.

pub mod forms;
pub mod listing;
pub mod outcome;
pub mod schema;
pub mod session;

pub use staydesk_api;
pub use staydesk_api::types;
pub use staydesk_api::{Client, Error, ListDefaults, ListQuery, SortDirection, SortKey};

pub use outcome::{classify, ui_action, Failure, Flash, FlashLevel, UiAction};
pub use session::ListScreen;
