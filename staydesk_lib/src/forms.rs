//! Form and entity-action flows: screen setup, submission, delete and
//! cancel. Every network failure goes through the outcome normalizer;
//! nothing escapes raw.

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use staydesk_api::types::{Booking, Room};
use staydesk_api::{Client, Error};

use crate::outcome::{ui_action, Flash, UiAction};
use crate::schema::{booking_schema, room_schema};

/// List view path of the booking screens.
pub const BOOKING_LIST_PATH: &str = "/bookings";
/// List view path of the room screens.
pub const ROOM_LIST_PATH: &str = "/rooms";

/// Raw form input, keyed by wire field name.
pub type FieldValues = BTreeMap<String, String>;

/// Everything the booking form needs before it can render.
pub struct BookingFormContext {
    /// User dropdown source: id to email.
    pub user_values: BTreeMap<i64, String>,
    /// Room dropdown source: id to room type.
    pub room_values: BTreeMap<Uuid, String>,
    /// The booking under edit; absent on the add screen.
    pub booking: Option<Booking>,
}

/// Fetches the booking form's reference data and, when editing, the
/// booking itself. The fetches run concurrently; the first failure aborts
/// the whole setup.
pub async fn prepare_booking_form(
    client: &Client,
    id: Option<Uuid>,
) -> Result<BookingFormContext, Error> {
    match id {
        Some(id) => {
            let (user_values, room_values, booking) = tokio::try_join!(
                client.booking_user_values(),
                client.booking_room_values(),
                client.get_booking(id),
            )?;
            Ok(BookingFormContext {
                user_values,
                room_values,
                booking: Some(booking),
            })
        }
        None => {
            let (user_values, room_values) = tokio::try_join!(
                client.booking_user_values(),
                client.booking_room_values(),
            )?;
            Ok(BookingFormContext {
                user_values,
                room_values,
                booking: None,
            })
        }
    }
}

/// Fetches the room under edit; the add screen needs nothing.
pub async fn prepare_room_form(client: &Client, id: Option<Uuid>) -> Result<Option<Room>, Error> {
    match id {
        Some(id) => client.get_room(id).await.map(Some),
        None => Ok(None),
    }
}

/// How a submission or entity action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Navigate to `to` and show the flash there, once.
    Done { to: String, flash: Flash },
    /// The normalized failure action; field errors keep the form alive.
    Action(UiAction),
}

impl FlowOutcome {
    fn done(to: &str, flash: Flash) -> Self {
        FlowOutcome::Done {
            to: to.to_string(),
            flash,
        }
    }
}

/// Validates and submits the booking form. `id` present means update.
/// Client-side schema rejections and server-side validation failures both
/// surface as field errors on the form.
pub async fn save_booking(client: &Client, id: Option<Uuid>, input: &FieldValues) -> FlowOutcome {
    let mut values = match booking_schema().validate(input) {
        Ok(values) => values,
        Err(errors) => return FlowOutcome::Action(UiAction::FieldErrors(errors)),
    };
    if let Some(id) = id {
        values.insert("id".to_string(), Value::String(id.to_string()));
    }
    let booking: Booking = match serde_json::from_value(Value::Object(values)) {
        Ok(booking) => booking,
        Err(e) => {
            tracing::error!("validated booking input failed to assemble: {}", e);
            return FlowOutcome::Action(UiAction::ErrorScreen);
        }
    };

    let result = match id {
        Some(id) => client.update_booking(id, &booking).await,
        None => client.create_booking(&booking).await,
    };
    match result {
        Ok(_) => FlowOutcome::done(
            BOOKING_LIST_PATH,
            Flash::success(if id.is_some() {
                "booking.update.success"
            } else {
                "booking.create.success"
            }),
        ),
        Err(err) => FlowOutcome::Action(ui_action(&err, BOOKING_LIST_PATH)),
    }
}

/// Validates and submits the room form. `id` present means update.
pub async fn save_room(client: &Client, id: Option<Uuid>, input: &FieldValues) -> FlowOutcome {
    let mut values = match room_schema().validate(input) {
        Ok(values) => values,
        Err(errors) => return FlowOutcome::Action(UiAction::FieldErrors(errors)),
    };
    if let Some(id) = id {
        values.insert("id".to_string(), Value::String(id.to_string()));
    }
    let room: Room = match serde_json::from_value(Value::Object(values)) {
        Ok(room) => room,
        Err(e) => {
            tracing::error!("validated room input failed to assemble: {}", e);
            return FlowOutcome::Action(UiAction::ErrorScreen);
        }
    };

    let result = match id {
        Some(id) => client.update_room(id, &room).await,
        None => client.create_room(&room).await,
    };
    match result {
        Ok(_) => FlowOutcome::done(
            ROOM_LIST_PATH,
            Flash::success(if id.is_some() {
                "room.update.success"
            } else {
                "room.create.success"
            }),
        ),
        Err(err) => FlowOutcome::Action(ui_action(&err, ROOM_LIST_PATH)),
    }
}

/// Deletes a booking; back to the list with an info flash.
pub async fn delete_booking(client: &Client, id: Uuid) -> FlowOutcome {
    match client.delete_booking(id).await {
        Ok(()) => FlowOutcome::done(BOOKING_LIST_PATH, Flash::info("booking.delete.success")),
        Err(err) => FlowOutcome::Action(ui_action(&err, BOOKING_LIST_PATH)),
    }
}

/// Deletes a room. A room still referenced by a booking comes back as a
/// conflict redirect carrying the interpolated flash error; the room
/// stays listed.
pub async fn delete_room(client: &Client, id: Uuid) -> FlowOutcome {
    match client.delete_room(id).await {
        Ok(()) => FlowOutcome::done(ROOM_LIST_PATH, Flash::info("room.delete.success")),
        Err(err) => FlowOutcome::Action(ui_action(&err, ROOM_LIST_PATH)),
    }
}

/// Cancels a booking without deleting it.
pub async fn cancel_booking(client: &Client, id: Uuid) -> FlowOutcome {
    match client.cancel_booking(id).await {
        Ok(()) => FlowOutcome::done(BOOKING_LIST_PATH, Flash::info("booking.cancel.success")),
        Err(err) => FlowOutcome::Action(ui_action(&err, BOOKING_LIST_PATH)),
    }
}
