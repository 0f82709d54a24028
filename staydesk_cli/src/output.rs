use std::collections::BTreeMap;
use std::fmt;

use anyhow::{bail, Result};
use tabled::{Table, Tabled};

use staydesk_lib::forms::FlowOutcome;
use staydesk_lib::listing::page_links;
use staydesk_lib::outcome::{ui_action, Flash, FlashLevel, UiAction};
use staydesk_lib::types::{Booking, FieldError, ListPage, PageMetadata, Room};
use staydesk_lib::Error;

use crate::messages;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Check-in")]
    checkin: String,
    #[tabled(rename = "Check-out")]
    checkout: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "User")]
    user: i64,
    #[tabled(rename = "Room")]
    room: String,
}

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Number")]
    number: i32,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Capacity")]
    capacity: i32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Amenities")]
    amenities: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
}

// -- Row builders --

fn build_booking_rows(bookings: &[Booking]) -> Vec<BookingRow> {
    bookings
        .iter()
        .map(|b| BookingRow {
            id: b.id.map(|id| id.to_string()).unwrap_or_default(),
            checkin: b.checkin_date.to_string(),
            checkout: b.checkout_date.to_string(),
            status: b.status.map(|s| s.to_string()).unwrap_or_default(),
            user: b.user,
            room: b.room.to_string(),
        })
        .collect()
}

fn build_room_rows(rooms: &[Room]) -> Vec<RoomRow> {
    rooms
        .iter()
        .map(|r| RoomRow {
            id: r.id.map(|id| id.to_string()).unwrap_or_default(),
            number: r.room_number,
            room_type: r.room_type.clone(),
            capacity: r.capacity,
            price: r.price.clone(),
            amenities: r.amenities.clone(),
            active: r.active.map(|a| a.to_string()).unwrap_or_default(),
        })
        .collect()
}

// -- List output --

pub fn print_bookings(page: &ListPage<Booking>, format: &OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_booking_rows(&page.items))),
        OutputFormat::Json => print_json(&page.items),
    }
    print_page_footer(&page.page);
}

pub fn print_rooms(page: &ListPage<Room>, format: &OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_room_rows(&page.items))),
        OutputFormat::Json => print_json(&page.items),
    }
    print_page_footer(&page.page);
}

/// Page links derived from the metadata, current page bracketed. Nothing
/// with a single page or less.
fn pages_line(page: &PageMetadata) -> Option<String> {
    let links = page_links(page);
    if links.is_empty() {
        return None;
    }
    let rendered: Vec<String> = links
        .iter()
        .map(|link| {
            if link.current {
                format!("[{}]", link.index)
            } else {
                link.index.to_string()
            }
        })
        .collect();
    Some(rendered.join(" "))
}

fn print_page_footer(page: &PageMetadata) {
    eprintln!(
        "Page {}/{} ({} total)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    if let Some(line) = pages_line(page) {
        eprintln!("Pages: {}", line);
    }
}

// -- Single-entity output --

pub fn print_booking(booking: &Booking, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(build_booking_rows(std::slice::from_ref(booking))))
        }
        OutputFormat::Json => print_json(booking),
    }
}

pub fn print_room(room: &Room, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(build_room_rows(std::slice::from_ref(room))))
        }
        OutputFormat::Json => print_json(room),
    }
}

/// Prints a dropdown value source: id to display label.
pub fn print_values<K>(values: &BTreeMap<K, String>, format: &OutputFormat)
where
    K: fmt::Display + serde::Serialize,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<ValueRow> = values
                .iter()
                .map(|(id, label)| ValueRow {
                    id: id.to_string(),
                    label: label.clone(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Json => print_json(values),
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Outcome rendering --

fn render_flash(flash: &Flash) -> String {
    let text = messages::render(&flash.key, flash.arg.as_deref());
    match flash.level {
        FlashLevel::Error => format!("error: {}", text),
        FlashLevel::Info | FlashLevel::Success => text,
    }
}

fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {}: {}", error.field, messages::render(&error.message, None));
    }
}

/// Renders a form or entity-action outcome. Anything but a success becomes
/// a process failure, so scripts can rely on the exit code.
pub fn render_outcome(outcome: FlowOutcome) -> Result<()> {
    match outcome {
        FlowOutcome::Done { flash, .. } => {
            println!("{}", render_flash(&flash));
            Ok(())
        }
        FlowOutcome::Action(action) => render_action(action),
    }
}

/// Renders a normalized failure action.
pub fn render_action(action: UiAction) -> Result<()> {
    match action {
        UiAction::FieldErrors(errors) => {
            print_field_errors(&errors);
            bail!("validation failed");
        }
        UiAction::Redirect { flash, .. } => bail!("{}", render_flash(&flash)),
        UiAction::AuthScreen => {
            bail!("authentication required; pass --token or set STAYDESK_TOKEN")
        }
        UiAction::ErrorScreen => bail!("the request could not be completed"),
    }
}

/// Normalizes and renders a failed read request.
pub fn fail(err: &Error, list_path: &str) -> Result<()> {
    render_action(ui_action(err, list_path))
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
