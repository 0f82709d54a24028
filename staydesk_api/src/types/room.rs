//! Room DTO.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::envelope::Links;
use crate::query::ListDefaults;

/// A room as exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Null until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub room_number: i32,

    pub room_type: String,

    pub capacity: i32,

    /// Decimal amount serialized as a string, e.g. `"75.08"`.
    pub price: String,

    pub amenities: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl Room {
    /// Key of the room collection inside a list envelope.
    pub const COLLECTION_KEY: &'static str = "roomDTOList";

    /// Server-side list defaults for rooms.
    pub fn list_defaults() -> ListDefaults {
        ListDefaults::sorted_by("id")
    }
}
