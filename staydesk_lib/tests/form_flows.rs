use serde_json::json;
use staydesk_lib::forms::{self, FieldValues, FlowOutcome};
use staydesk_lib::outcome::{Flash, UiAction};
use staydesk_lib::types::{FieldError, Room};
use staydesk_lib::{Client, ListQuery};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Client {
    Client::new(&server.uri()).unwrap()
}

fn room_id() -> Uuid {
    "3d9a7a3e-6a54-4f29-9f2b-48c1a2d0b7c4".parse().unwrap()
}

fn user_values_body() -> serde_json::Value {
    json!({ "1002": "ana@example.com", "1007": "omar@example.com" })
}

fn room_values_body() -> serde_json::Value {
    json!({ "3d9a7a3e-6a54-4f29-9f2b-48c1a2d0b7c4": "DOUBLE" })
}

fn booking_input() -> FieldValues {
    [
        ("checkinDate", "2024-09-12"),
        ("checkoutDate", "2024-09-15"),
        ("status", "ACTIVE"),
        ("user", "1002"),
        ("room", "3d9a7a3e-6a54-4f29-9f2b-48c1a2d0b7c4"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn room_input() -> FieldValues {
    [
        ("roomNumber", "204"),
        ("roomType", "DOUBLE"),
        ("capacity", "2"),
        ("price", "75.08"),
        ("amenities", "wifi, minibar"),
        ("active", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

async fn mount_reference_data(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings/userValues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_values_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings/roomValues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_values_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn add_screen_setup_fetches_the_reference_data() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    let context = forms::prepare_booking_form(&client(&server), None)
        .await
        .unwrap();
    assert_eq!(context.user_values.len(), 2);
    assert_eq!(
        context.room_values.get(&room_id()).map(String::as_str),
        Some("DOUBLE")
    );
    assert!(context.booking.is_none());
}

#[tokio::test]
async fn edit_screen_setup_also_fetches_the_booking() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/bookings/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "checkinDate": "2024-09-12",
            "checkoutDate": "2024-09-15",
            "status": "ACTIVE",
            "user": 1002,
            "room": room_id()
        })))
        .mount(&server)
        .await;

    let context = forms::prepare_booking_form(&client(&server), Some(id))
        .await
        .unwrap();
    let booking = context.booking.unwrap();
    assert_eq!(booking.id, Some(id));
    assert_eq!(booking.user, 1002);
}

#[tokio::test]
async fn any_setup_failure_aborts_the_whole_setup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings/userValues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_values_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings/roomValues"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = forms::prepare_booking_form(&client(&server), None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn client_side_rejection_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bookings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = forms::save_booking(&client(&server), None, &FieldValues::new()).await;
    match outcome {
        FlowOutcome::Action(UiAction::FieldErrors(errors)) => {
            assert!(errors.contains(&FieldError::new("checkinDate", "required")));
            assert!(errors.contains(&FieldError::new("room", "required")));
        }
        other => panic!("expected field errors, got {:?}", other),
    }
}

#[tokio::test]
async fn creating_a_booking_redirects_with_a_success_flash() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bookings"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "value": Uuid::new_v4() })),
        )
        .mount(&server)
        .await;

    let outcome = forms::save_booking(&client(&server), None, &booking_input()).await;
    assert_eq!(
        outcome,
        FlowOutcome::Done {
            to: "/bookings".to_string(),
            flash: Flash::success("booking.create.success"),
        }
    );
}

#[tokio::test]
async fn server_side_validation_merges_into_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bookings"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{ "field": "checkoutDate", "message": "checkout.before.checkin" }]
        })))
        .mount(&server)
        .await;

    let outcome = forms::save_booking(&client(&server), None, &booking_input()).await;
    assert_eq!(
        outcome,
        FlowOutcome::Action(UiAction::FieldErrors(vec![FieldError::new(
            "checkoutDate",
            "checkout.before.checkin"
        )]))
    );
}

#[tokio::test]
async fn updating_a_room_redirects_with_a_success_flash() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/rooms/{}", room_id())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": room_id() })))
        .mount(&server)
        .await;

    let outcome = forms::save_room(&client(&server), Some(room_id()), &room_input()).await;
    assert_eq!(
        outcome,
        FlowOutcome::Done {
            to: "/rooms".to_string(),
            flash: Flash::success("room.update.success"),
        }
    );
}

#[tokio::test]
async fn deleting_a_referenced_room_flashes_and_leaves_it_listed() {
    let server = MockServer::start().await;
    let booking = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/rooms/{}", room_id())))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "REFERENCED",
            "message": format!("room.booking.room.referenced,{}", booking)
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "roomDTOList": [{
                "id": room_id(),
                "roomNumber": 204,
                "roomType": "DOUBLE",
                "capacity": 2,
                "price": "75.08",
                "amenities": "wifi, minibar",
                "active": true
            }]},
            "page": { "size": 20, "totalElements": 1, "totalPages": 1, "number": 0 }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let outcome = forms::delete_room(&client, room_id()).await;
    assert_eq!(
        outcome,
        FlowOutcome::Action(UiAction::Redirect {
            to: "/rooms".to_string(),
            flash: Flash::error("room.booking.room.referenced").with_arg(&booking.to_string()),
        })
    );

    // the delete did not happen; the room is still on the list
    let page = client
        .list_rooms(&ListQuery::new(&Room::list_defaults()))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, Some(room_id()));
}

#[tokio::test]
async fn deleting_a_free_room_redirects_with_an_info_flash() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/rooms/{}", room_id())))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let outcome = forms::delete_room(&client(&server), room_id()).await;
    assert_eq!(
        outcome,
        FlowOutcome::Done {
            to: "/rooms".to_string(),
            flash: Flash::info("room.delete.success"),
        }
    );
}

#[tokio::test]
async fn cancelling_a_booking_redirects_with_an_info_flash() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/bookings/{}/cancel", id)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let outcome = forms::cancel_booking(&client(&server), id).await;
    assert_eq!(
        outcome,
        FlowOutcome::Done {
            to: "/bookings".to_string(),
            flash: Flash::info("booking.cancel.success"),
        }
    );
}

#[tokio::test]
async fn expired_credentials_route_every_flow_to_the_auth_screen() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/bookings/{}", id)))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let outcome = forms::delete_booking(&client(&server), id).await;
    assert_eq!(outcome, FlowOutcome::Action(UiAction::AuthScreen));
}
