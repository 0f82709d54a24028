//! Booking DTO and related types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::envelope::Links;
use crate::query::ListDefaults;

/// A booking as exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Null until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub checkin_date: NaiveDate,

    pub checkout_date: NaiveDate,

    /// Optional on submission; the server rejects a missing status with a
    /// field error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,

    /// Referenced user id.
    pub user: i64,

    /// Referenced room id.
    pub room: Uuid,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl Booking {
    /// Key of the booking collection inside a list envelope.
    pub const COLLECTION_KEY: &'static str = "bookingDTOList";

    /// Server-side list defaults for bookings.
    pub fn list_defaults() -> ListDefaults {
        ListDefaults::sorted_by("id")
    }
}

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "ACTIVE")]
    Active,

    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BookingStatus::Active => "ACTIVE",
                BookingStatus::Cancelled => "CANCELLED",
            }
        )
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(BookingStatus::Active),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            _ => Err(()),
        }
    }
}
