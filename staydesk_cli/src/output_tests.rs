use super::*;

use staydesk_lib::types::BookingStatus;
use uuid::Uuid;

fn room_id() -> Uuid {
    "3d9a7a3e-6a54-4f29-9f2b-48c1a2d0b7c4".parse().unwrap()
}

fn sample_booking(id: Option<Uuid>) -> Booking {
    Booking {
        id,
        checkin_date: "2024-09-12".parse().unwrap(),
        checkout_date: "2024-09-15".parse().unwrap(),
        status: Some(BookingStatus::Active),
        user: 1002,
        room: room_id(),
        links: None,
    }
}

fn sample_room() -> Room {
    Room {
        id: Some(room_id()),
        room_number: 204,
        room_type: "DOUBLE".to_string(),
        capacity: 2,
        price: "75.08".to_string(),
        amenities: "wifi, minibar".to_string(),
        active: Some(true),
        links: None,
    }
}

// -- Row builder tests --

#[test]
fn booking_rows_map_every_column() {
    let id = Uuid::new_v4();
    let rows = build_booking_rows(&[sample_booking(Some(id))]);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.id, id.to_string());
    assert_eq!(row.checkin, "2024-09-12");
    assert_eq!(row.checkout, "2024-09-15");
    assert_eq!(row.status, "ACTIVE");
    assert_eq!(row.user, 1002);
    assert_eq!(row.room, room_id().to_string());
}

#[test]
fn unpersisted_booking_renders_blank_id_and_status() {
    let mut booking = sample_booking(None);
    booking.status = None;
    let rows = build_booking_rows(&[booking]);
    assert_eq!(rows[0].id, "");
    assert_eq!(rows[0].status, "");
}

#[test]
fn room_rows_map_every_column() {
    let rows = build_room_rows(&[sample_room()]);
    let row = &rows[0];
    assert_eq!(row.number, 204);
    assert_eq!(row.room_type, "DOUBLE");
    assert_eq!(row.capacity, 2);
    assert_eq!(row.price, "75.08");
    assert_eq!(row.active, "true");
}

#[test]
fn empty_lists_build_no_rows() {
    assert!(build_booking_rows(&[]).is_empty());
    assert!(build_room_rows(&[]).is_empty());
}

// -- Pagination footer tests --

#[test]
fn pages_line_brackets_the_current_page() {
    let page = PageMetadata {
        size: 10,
        total_elements: 25,
        total_pages: 3,
        number: 2,
    };
    assert_eq!(pages_line(&page).as_deref(), Some("0 1 [2]"));
}

#[test]
fn single_page_has_no_pages_line() {
    let page = PageMetadata {
        size: 20,
        total_elements: 3,
        total_pages: 1,
        number: 0,
    };
    assert_eq!(pages_line(&page), None);
}

// -- Outcome rendering tests --

#[test]
fn success_outcome_renders_ok() {
    let outcome = FlowOutcome::Done {
        to: "/bookings".to_string(),
        flash: Flash::success("booking.create.success"),
    };
    assert!(render_outcome(outcome).is_ok());
}

#[test]
fn field_errors_fail_the_process() {
    let action = UiAction::FieldErrors(vec![FieldError::new("checkinDate", "required")]);
    let err = render_action(action).unwrap_err();
    assert_eq!(err.to_string(), "validation failed");
}

#[test]
fn conflict_redirect_fails_with_the_interpolated_flash() {
    let action = UiAction::Redirect {
        to: "/rooms".to_string(),
        flash: Flash::error("room.booking.room.referenced").with_arg("42"),
    };
    let err = render_action(action).unwrap_err();
    assert_eq!(
        err.to_string(),
        "error: This room cannot be deleted, booking 42 still references it."
    );
}

#[test]
fn auth_and_transport_failures_fail_the_process() {
    assert!(render_action(UiAction::AuthScreen).is_err());
    assert!(render_action(UiAction::ErrorScreen).is_err());
}

#[test]
fn flash_rendering_prefixes_errors_only() {
    assert_eq!(
        render_flash(&Flash::info("booking.delete.success")),
        "Booking was removed successfully."
    );
    assert!(render_flash(&Flash::error("room.delete.referenced").with_arg("7"))
        .starts_with("error: "));
}
