//! Failure classification: turns a raw request error into the one UI
//! outcome every screen handles the same way.

use staydesk_api::types::{ErrorBody, FieldError};
use staydesk_api::Error;

/// Classified request failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The server rejected individual form fields. Recoverable in place.
    Validation(Vec<FieldError>),
    /// The delete target is still referenced by another record. `key` is a
    /// translation key and `referencing_id` the record holding the
    /// reference.
    Referenced {
        key: String,
        referencing_id: String,
    },
    /// A `REFERENCED` conflict whose payload did not split into a key and
    /// an id. Treated like a generic failure downstream, but kept distinct
    /// so the malformed payload is visible.
    MalformedConflict,
    /// Not authenticated or not allowed. Requires re-authentication.
    Auth,
    /// Everything else: network failure, server error, malformed body.
    Transport,
}

/// Classifies a failed request.
///
/// Priority: field validation, then referential conflicts, then auth,
/// then the generic transport bucket.
pub fn classify(err: &Error) -> Failure {
    match err {
        Error::Status {
            status: 422,
            body: Some(body),
        } if body.field_errors().is_some() => {
            Failure::Validation(body.field_errors().unwrap_or_default().to_vec())
        }
        Error::Status {
            status: 409 | 400,
            body: Some(body),
        } if body.code.as_deref() == Some("REFERENCED") => match split_conflict(body) {
            Some((key, referencing_id)) => Failure::Referenced {
                key,
                referencing_id,
            },
            None => {
                tracing::warn!("REFERENCED conflict with malformed payload: {:?}", body.message);
                Failure::MalformedConflict
            }
        },
        Error::Status {
            status: 401 | 403, ..
        } => Failure::Auth,
        _ => Failure::Transport,
    }
}

/// Splits a conflict message of the form `"<i18nKey>,<referencingId>"`.
/// Anything but exactly two non-empty parts is malformed.
fn split_conflict(body: &ErrorBody) -> Option<(String, String)> {
    let message = body.message.as_deref()?;
    let mut parts = message.split(',');
    let key = parts.next()?;
    let id = parts.next()?;
    if parts.next().is_some() || key.is_empty() || id.is_empty() {
        return None;
    }
    Some((key.to_string(), id.to_string()))
}

/// Severity of a one-shot, navigation-carried message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

/// A flash message: shown once on the destination screen, then gone.
/// `key` is a translation key; `arg` fills its `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub key: String,
    pub arg: Option<String>,
}

impl Flash {
    pub fn info(key: &str) -> Self {
        Flash {
            level: FlashLevel::Info,
            key: key.to_string(),
            arg: None,
        }
    }

    pub fn success(key: &str) -> Self {
        Flash {
            level: FlashLevel::Success,
            key: key.to_string(),
            arg: None,
        }
    }

    pub fn error(key: &str) -> Self {
        Flash {
            level: FlashLevel::Error,
            key: key.to_string(),
            arg: None,
        }
    }

    pub fn with_arg(mut self, arg: &str) -> Self {
        self.arg = Some(arg.to_string());
        self
    }
}

/// What the UI does with a failure. Attaching field errors is the only
/// outcome that keeps the current screen; every navigation replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Attach errors to the named fields; all other fields keep their
    /// entered values.
    FieldErrors(Vec<FieldError>),
    /// Replace the current view with `to`, carrying a flash message.
    Redirect { to: String, flash: Flash },
    /// Replace the current view with the session/auth error view,
    /// discarding any in-flight form state.
    AuthScreen,
    /// Replace the current view with the generic error view.
    ErrorScreen,
}

/// Maps a failed request to its UI outcome. `list_path` is the entity's
/// list view, the destination for conflict redirects.
pub fn ui_action(err: &Error, list_path: &str) -> UiAction {
    match classify(err) {
        Failure::Validation(errors) => UiAction::FieldErrors(errors),
        Failure::Referenced {
            key,
            referencing_id,
        } => UiAction::Redirect {
            to: list_path.to_string(),
            flash: Flash::error(&key).with_arg(&referencing_id),
        },
        Failure::Auth => UiAction::AuthScreen,
        Failure::MalformedConflict | Failure::Transport => UiAction::ErrorScreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, body: serde_json::Value) -> Error {
        Error::Status {
            status,
            body: Some(serde_json::from_value(body).unwrap()),
        }
    }

    #[test]
    fn unprocessable_with_errors_is_validation() {
        let err = status(
            422,
            serde_json::json!({
                "errors": [{ "field": "checkinDate", "message": "required" }]
            }),
        );
        match classify(&err) {
            Failure::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("checkinDate", "required")]);
            }
            other => panic!("expected validation, got {:?}", other),
        }
        // stays on the current screen
        assert!(matches!(
            ui_action(&err, "/bookings"),
            UiAction::FieldErrors(_)
        ));
    }

    #[test]
    fn unprocessable_without_errors_is_transport() {
        let err = status(422, serde_json::json!({ "message": "unprocessable" }));
        assert_eq!(classify(&err), Failure::Transport);

        let err = status(422, serde_json::json!({ "errors": [] }));
        assert_eq!(classify(&err), Failure::Transport);
    }

    #[test]
    fn referenced_conflict_redirects_with_interpolated_flash() {
        let err = status(
            409,
            serde_json::json!({
                "code": "REFERENCED",
                "message": "room.delete.referenced,42"
            }),
        );
        assert_eq!(
            classify(&err),
            Failure::Referenced {
                key: "room.delete.referenced".to_string(),
                referencing_id: "42".to_string(),
            }
        );
        assert_eq!(
            ui_action(&err, "/rooms"),
            UiAction::Redirect {
                to: "/rooms".to_string(),
                flash: Flash::error("room.delete.referenced").with_arg("42"),
            }
        );
    }

    #[test]
    fn referenced_conflict_on_bad_request_status_counts_too() {
        let err = status(
            400,
            serde_json::json!({
                "code": "REFERENCED",
                "message": "room.booking.room.referenced,c0a80121-7ac0-4e1b-9d2f-5b6a8c3d1e42"
            }),
        );
        assert!(matches!(classify(&err), Failure::Referenced { .. }));
    }

    #[test]
    fn malformed_conflict_payloads_are_their_own_failure() {
        for message in ["room.delete.referenced", "a,b,c", ",42", "room.delete.referenced,", ""] {
            let err = status(
                409,
                serde_json::json!({ "code": "REFERENCED", "message": message }),
            );
            assert_eq!(classify(&err), Failure::MalformedConflict, "message: {}", message);
            assert_eq!(ui_action(&err, "/rooms"), UiAction::ErrorScreen);
        }

        let err = status(409, serde_json::json!({ "code": "REFERENCED" }));
        assert_eq!(classify(&err), Failure::MalformedConflict);
    }

    #[test]
    fn other_conflicts_fall_through_to_transport() {
        let err = status(
            409,
            serde_json::json!({
                "code": "CONFLICT",
                "message": "Room 204 is not available for the selected dates"
            }),
        );
        assert_eq!(classify(&err), Failure::Transport);
    }

    #[test]
    fn auth_statuses_route_to_the_auth_screen() {
        for code in [401u16, 403] {
            let err = Error::Status {
                status: code,
                body: None,
            };
            assert_eq!(classify(&err), Failure::Auth);
            assert_eq!(ui_action(&err, "/bookings"), UiAction::AuthScreen);
        }
    }

    #[test]
    fn network_failure_routes_to_the_error_screen() {
        assert_eq!(classify(&Error::RequestFailed), Failure::Transport);
        assert_eq!(ui_action(&Error::RequestFailed, "/bookings"), UiAction::ErrorScreen);
        assert_eq!(classify(&Error::UnexpectedBody), Failure::Transport);
    }

    #[test]
    fn plain_server_errors_route_to_the_error_screen() {
        let err = Error::Status {
            status: 500,
            body: None,
        };
        assert_eq!(ui_action(&err, "/rooms"), UiAction::ErrorScreen);

        let err = status(404, serde_json::json!({ "code": "NOT_FOUND", "message": "NOT_FOUND" }));
        assert_eq!(ui_action(&err, "/rooms"), UiAction::ErrorScreen);
    }
}
