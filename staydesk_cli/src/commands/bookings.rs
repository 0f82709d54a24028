//! The `bookings` subcommand: list, inspect and manage bookings.

use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

use staydesk_lib::forms::{self, BookingFormContext, FieldValues};
use staydesk_lib::listing::booking_sort_options;
use staydesk_lib::outcome::UiAction;
use staydesk_lib::types::{Booking, FieldError};
use staydesk_lib::Client;

use crate::commands::ListArgs;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Subcommand)]
pub enum BookingsCommand {
    /// List bookings
    List(ListArgs),
    /// Show one booking
    Get { id: Uuid },
    /// Create a booking
    Add(BookingInput),
    /// Update a booking
    Edit {
        id: Uuid,
        #[command(flatten)]
        input: BookingInput,
    },
    /// Delete a booking
    Delete { id: Uuid },
    /// Cancel a booking without deleting it
    Cancel { id: Uuid },
    /// Show the user dropdown source
    UserValues,
    /// Show the room dropdown source
    RoomValues,
}

/// Booking form fields. Values are handed to the form schema verbatim; an
/// omitted flag behaves like an untouched form input.
#[derive(Args)]
pub struct BookingInput {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub checkin_date: Option<String>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub checkout_date: Option<String>,

    /// Booking status: ACTIVE or CANCELLED
    #[arg(long)]
    pub status: Option<String>,

    /// Id of the booking user
    #[arg(long)]
    pub user: Option<String>,

    /// Id of the booked room
    #[arg(long)]
    pub room: Option<String>,
}

impl BookingInput {
    fn merge_into(&self, values: &mut FieldValues) {
        let fields = [
            ("checkinDate", &self.checkin_date),
            ("checkoutDate", &self.checkout_date),
            ("status", &self.status),
            ("user", &self.user),
            ("room", &self.room),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                values.insert(name.to_string(), value.clone());
            }
        }
    }
}

fn prefill(booking: &Booking) -> FieldValues {
    let mut values = FieldValues::new();
    values.insert("checkinDate".to_string(), booking.checkin_date.to_string());
    values.insert("checkoutDate".to_string(), booking.checkout_date.to_string());
    if let Some(status) = booking.status {
        values.insert("status".to_string(), status.to_string());
    }
    values.insert("user".to_string(), booking.user.to_string());
    values.insert("room".to_string(), booking.room.to_string());
    values
}

/// The form's dropdowns only offer the fetched values; a user or room id
/// the backend does not offer is rejected before submission. Unparseable
/// ids fall through to the schema, which reports the type error.
fn check_references(context: &BookingFormContext, values: &FieldValues) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(user) = values.get("user") {
        if let Ok(id) = user.parse::<i64>() {
            if !context.user_values.contains_key(&id) {
                errors.push(FieldError::new("user", "invalid.option"));
            }
        }
    }
    if let Some(room) = values.get("room") {
        if let Ok(id) = room.parse::<Uuid>() {
            if !context.room_values.contains_key(&id) {
                errors.push(FieldError::new("room", "invalid.option"));
            }
        }
    }
    errors
}

pub async fn run(args: &BookingsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        BookingsCommand::List(list) => {
            let query = list.to_query(&Booking::list_defaults(), &booking_sort_options())?;
            match client.list_bookings(&query).await {
                Ok(page) => {
                    output::print_bookings(&page, format);
                    Ok(())
                }
                Err(err) => output::fail(&err, forms::BOOKING_LIST_PATH),
            }
        }
        BookingsCommand::Get { id } => match client.get_booking(*id).await {
            Ok(booking) => {
                output::print_booking(&booking, format);
                Ok(())
            }
            Err(err) => output::fail(&err, forms::BOOKING_LIST_PATH),
        },
        BookingsCommand::Add(input) => {
            let context = match forms::prepare_booking_form(client, None).await {
                Ok(context) => context,
                Err(err) => return output::fail(&err, forms::BOOKING_LIST_PATH),
            };
            let mut values = FieldValues::new();
            input.merge_into(&mut values);
            let reference_errors = check_references(&context, &values);
            if !reference_errors.is_empty() {
                return output::render_action(UiAction::FieldErrors(reference_errors));
            }
            output::render_outcome(forms::save_booking(client, None, &values).await)
        }
        BookingsCommand::Edit { id, input } => {
            let context = match forms::prepare_booking_form(client, Some(*id)).await {
                Ok(context) => context,
                Err(err) => return output::fail(&err, forms::BOOKING_LIST_PATH),
            };
            let mut values = context.booking.as_ref().map(prefill).unwrap_or_default();
            input.merge_into(&mut values);
            let reference_errors = check_references(&context, &values);
            if !reference_errors.is_empty() {
                return output::render_action(UiAction::FieldErrors(reference_errors));
            }
            output::render_outcome(forms::save_booking(client, Some(*id), &values).await)
        }
        BookingsCommand::Delete { id } => {
            output::render_outcome(forms::delete_booking(client, *id).await)
        }
        BookingsCommand::Cancel { id } => {
            output::render_outcome(forms::cancel_booking(client, *id).await)
        }
        BookingsCommand::UserValues => match client.booking_user_values().await {
            Ok(values) => {
                output::print_values(&values, format);
                Ok(())
            }
            Err(err) => output::fail(&err, forms::BOOKING_LIST_PATH),
        },
        BookingsCommand::RoomValues => match client.booking_room_values().await {
            Ok(values) => {
                output::print_values(&values, format);
                Ok(())
            }
            Err(err) => output::fail(&err, forms::BOOKING_LIST_PATH),
        },
    }
}
