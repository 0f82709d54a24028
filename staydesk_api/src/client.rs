//! HTTP client for the booking backend's REST API.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::{
    query::ListQuery,
    types::{Booking, ErrorBody, ListEnvelope, ListPage, Room, SimpleValue},
    Error,
};

/// HTTP client for the booking backend.
///
/// Holds the base URL and an optional bearer token; every request is JSON
/// in and out with a 30-second timeout. All failures are reported through
/// [`Error`], never surfaced raw.
pub struct Client {
    base_url: String,
    bearer_token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the given base URL, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
            http,
        })
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_token(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_string());
        self
    }

    fn get_url(&self, path: &str, query: Option<&str>) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        url.set_query(query);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<(u16, String), Error> {
        let url = self.get_url(path, query)?;
        let mut request = self
            .http
            .request(method, url)
            .header("accept", "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await.map_err(|e| {
            tracing::error!("failed to reach backend: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&text);
            tracing::error!("request failed with status {}: {}", status, snippet);
            let parsed = serde_json::from_str::<ErrorBody>(&text).ok();
            return Err(Error::Status {
                status: status.as_u16(),
                body: parsed,
            });
        }

        Ok((status.as_u16(), text))
    }

    async fn fetch<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let (_, text) = self.send(method, path, query, body).await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            tracing::error!(
                "failed to parse response: {} | body: {}",
                e,
                truncate_body(&text)
            );
            Error::UnexpectedBody
        })
    }

    async fn execute(&self, method: Method, path: &str) -> Result<(), Error> {
        self.send(method, path, None, None::<&()>).await.map(|_| ())
    }

    async fn list<T>(
        &self,
        path: &str,
        collection: &str,
        raw_query: &str,
    ) -> Result<ListPage<T>, Error>
    where
        T: DeserializeOwned,
    {
        let envelope: ListEnvelope<T> = self
            .fetch(Method::GET, path, Some(raw_query), None::<&()>)
            .await?;
        envelope.into_page(collection).map_err(|e| {
            tracing::error!("list response violated its contract: {}", e);
            Error::UnexpectedBody
        })
    }

    /// Fetches one page of bookings matching the given query.
    pub async fn list_bookings(&self, query: &ListQuery) -> Result<ListPage<Booking>, Error> {
        let raw = query.encode(&Booking::list_defaults());
        self.list("/api/v1/bookings", Booking::COLLECTION_KEY, &raw)
            .await
    }

    /// Fetches a single booking by id.
    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, Error> {
        self.fetch(
            Method::GET,
            &format!("/api/v1/bookings/{}", id),
            None,
            None::<&()>,
        )
        .await
    }

    /// Creates a booking and returns the persisted id.
    pub async fn create_booking(&self, booking: &Booking) -> Result<Uuid, Error> {
        let created: SimpleValue<Uuid> = self
            .fetch(Method::POST, "/api/v1/bookings", None, Some(booking))
            .await?;
        Ok(created.value)
    }

    /// Updates a booking in place.
    pub async fn update_booking(&self, id: Uuid, booking: &Booking) -> Result<Uuid, Error> {
        let updated: SimpleValue<Uuid> = self
            .fetch(
                Method::PUT,
                &format!("/api/v1/bookings/{}", id),
                None,
                Some(booking),
            )
            .await?;
        Ok(updated.value)
    }

    /// Deletes a booking.
    pub async fn delete_booking(&self, id: Uuid) -> Result<(), Error> {
        self.execute(Method::DELETE, &format!("/api/v1/bookings/{}", id))
            .await
    }

    /// Cancels a booking without deleting it.
    pub async fn cancel_booking(&self, id: Uuid) -> Result<(), Error> {
        self.execute(Method::PATCH, &format!("/api/v1/bookings/{}/cancel", id))
            .await
    }

    /// Value source for the booking form's user dropdown: id to email.
    pub async fn booking_user_values(&self) -> Result<BTreeMap<i64, String>, Error> {
        self.fetch(Method::GET, "/api/v1/bookings/userValues", None, None::<&()>)
            .await
    }

    /// Value source for the booking form's room dropdown: id to room type.
    pub async fn booking_room_values(&self) -> Result<BTreeMap<Uuid, String>, Error> {
        self.fetch(Method::GET, "/api/v1/bookings/roomValues", None, None::<&()>)
            .await
    }

    /// Fetches one page of rooms matching the given query.
    pub async fn list_rooms(&self, query: &ListQuery) -> Result<ListPage<Room>, Error> {
        let raw = query.encode(&Room::list_defaults());
        self.list("/api/v1/rooms", Room::COLLECTION_KEY, &raw).await
    }

    /// Fetches a single room by id.
    pub async fn get_room(&self, id: Uuid) -> Result<Room, Error> {
        self.fetch(
            Method::GET,
            &format!("/api/v1/rooms/{}", id),
            None,
            None::<&()>,
        )
        .await
    }

    /// Creates a room and returns the persisted id.
    pub async fn create_room(&self, room: &Room) -> Result<Uuid, Error> {
        let created: SimpleValue<Uuid> = self
            .fetch(Method::POST, "/api/v1/rooms", None, Some(room))
            .await?;
        Ok(created.value)
    }

    /// Updates a room in place.
    pub async fn update_room(&self, id: Uuid, room: &Room) -> Result<Uuid, Error> {
        let updated: SimpleValue<Uuid> = self
            .fetch(
                Method::PUT,
                &format!("/api/v1/rooms/{}", id),
                None,
                Some(room),
            )
            .await?;
        Ok(updated.value)
    }

    /// Deletes a room. Fails with a `REFERENCED` conflict while a booking
    /// still points at it.
    pub async fn delete_room(&self, id: Uuid) -> Result<(), Error> {
        self.execute(Method::DELETE, &format!("/api/v1/rooms/{}", id))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
