//! The `rooms` subcommand: list, inspect and manage rooms.

use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

use staydesk_lib::forms::{self, FieldValues};
use staydesk_lib::listing::room_sort_options;
use staydesk_lib::types::Room;
use staydesk_lib::Client;

use crate::commands::ListArgs;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    List(ListArgs),
    /// Show one room
    Get { id: Uuid },
    /// Create a room
    Add(RoomInput),
    /// Update a room
    Edit {
        id: Uuid,
        #[command(flatten)]
        input: RoomInput,
    },
    /// Delete a room. Rejected while a booking still references it.
    Delete { id: Uuid },
}

/// Room form fields, handed to the form schema verbatim.
#[derive(Args)]
pub struct RoomInput {
    /// Room number
    #[arg(long)]
    pub room_number: Option<String>,

    /// Room type, e.g. SINGLE or DOUBLE
    #[arg(long)]
    pub room_type: Option<String>,

    /// Number of guests the room sleeps
    #[arg(long)]
    pub capacity: Option<String>,

    /// Price per night, e.g. 75.08
    #[arg(long)]
    pub price: Option<String>,

    /// Comma-separated amenities
    #[arg(long)]
    pub amenities: Option<String>,

    /// Whether the room is bookable: true or false
    #[arg(long)]
    pub active: Option<String>,
}

impl RoomInput {
    fn merge_into(&self, values: &mut FieldValues) {
        let fields = [
            ("roomNumber", &self.room_number),
            ("roomType", &self.room_type),
            ("capacity", &self.capacity),
            ("price", &self.price),
            ("amenities", &self.amenities),
            ("active", &self.active),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                values.insert(name.to_string(), value.clone());
            }
        }
    }
}

fn prefill(room: &Room) -> FieldValues {
    let mut values = FieldValues::new();
    values.insert("roomNumber".to_string(), room.room_number.to_string());
    values.insert("roomType".to_string(), room.room_type.clone());
    values.insert("capacity".to_string(), room.capacity.to_string());
    values.insert("price".to_string(), room.price.clone());
    values.insert("amenities".to_string(), room.amenities.clone());
    if let Some(active) = room.active {
        values.insert("active".to_string(), active.to_string());
    }
    values
}

pub async fn run(args: &RoomsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        RoomsCommand::List(list) => {
            let query = list.to_query(&Room::list_defaults(), &room_sort_options())?;
            match client.list_rooms(&query).await {
                Ok(page) => {
                    output::print_rooms(&page, format);
                    Ok(())
                }
                Err(err) => output::fail(&err, forms::ROOM_LIST_PATH),
            }
        }
        RoomsCommand::Get { id } => match client.get_room(*id).await {
            Ok(room) => {
                output::print_room(&room, format);
                Ok(())
            }
            Err(err) => output::fail(&err, forms::ROOM_LIST_PATH),
        },
        RoomsCommand::Add(input) => {
            let mut values = FieldValues::new();
            input.merge_into(&mut values);
            output::render_outcome(forms::save_room(client, None, &values).await)
        }
        RoomsCommand::Edit { id, input } => {
            let room = match forms::prepare_room_form(client, Some(*id)).await {
                Ok(room) => room,
                Err(err) => return output::fail(&err, forms::ROOM_LIST_PATH),
            };
            let mut values = room.as_ref().map(prefill).unwrap_or_default();
            input.merge_into(&mut values);
            output::render_outcome(forms::save_room(client, Some(*id), &values).await)
        }
        RoomsCommand::Delete { id } => {
            output::render_outcome(forms::delete_room(client, *id).await)
        }
    }
}
