//! Operator-facing message catalog: the translation keys carried by flash
//! messages and field errors, with their English templates. `{id}` is
//! filled from the message argument.

const MESSAGES: &[(&str, &str)] = &[
    ("booking.create.success", "Booking was created successfully."),
    ("booking.update.success", "Booking was updated successfully."),
    ("booking.delete.success", "Booking was removed successfully."),
    ("booking.cancel.success", "Booking was cancelled successfully."),
    ("room.create.success", "Room was created successfully."),
    ("room.update.success", "Room was updated successfully."),
    ("room.delete.success", "Room was removed successfully."),
    (
        "room.booking.room.referenced",
        "This room cannot be deleted, booking {id} still references it.",
    ),
    (
        "room.delete.referenced",
        "This room cannot be deleted, booking {id} still references it.",
    ),
    ("required", "This field is required."),
    ("maxLength", "The value is too long."),
    ("invalid.date", "Not a valid date, expected YYYY-MM-DD."),
    ("invalid.number", "Not a valid whole number."),
    ("invalid.uuid", "Not a valid id."),
    ("invalid.decimal", "Not a valid amount."),
    ("invalid.boolean", "Expected true or false."),
    ("invalid.option", "Not one of the offered values."),
];

/// Renders a message key with its optional argument. Unknown keys render
/// as themselves, so a message the catalog misses is still visible.
pub fn render(key: &str, arg: Option<&str>) -> String {
    let template = MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, template)| *template)
        .unwrap_or(key);
    match arg {
        Some(arg) => template.replace("{id}", arg),
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_render_their_template() {
        assert_eq!(
            render("booking.create.success", None),
            "Booking was created successfully."
        );
    }

    #[test]
    fn the_argument_fills_the_id_placeholder() {
        assert_eq!(
            render("room.booking.room.referenced", Some("42")),
            "This room cannot be deleted, booking 42 still references it."
        );
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        assert_eq!(render("room.ceiling.collapsed", None), "room.ceiling.collapsed");
    }
}
