//! The paginated, linked collection envelope returned by list endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single link reference, e.g. `{"href": "http://.../api/v1/rooms/42"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Relation name to link reference. Carried alongside entity fields;
/// link navigation itself is not part of this client.
pub type Links = BTreeMap<String, Link>;

/// Pagination metadata carried by every list envelope.
///
/// `number` is the zero-based current page; a well-formed envelope has
/// `number < max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl PageMetadata {
    pub fn is_well_formed(&self) -> bool {
        self.number < self.total_pages.max(1)
    }
}

/// Raw list response: a collection keyed by the entity's collection name
/// under `_embedded`, plus links and page metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(rename = "_embedded", default = "Option::default")]
    pub embedded: Option<BTreeMap<String, Vec<T>>>,
    #[serde(rename = "_links", default = "Option::default")]
    pub links: Option<Links>,
    pub page: PageMetadata,
}

/// The envelope named a non-zero element count but did not carry the
/// expected collection.
#[derive(Debug, thiserror::Error)]
#[error("collection '{collection}' missing from envelope with {total_elements} total elements")]
pub struct MissingCollection {
    pub collection: String,
    pub total_elements: u64,
}

impl<T> ListEnvelope<T> {
    /// Extracts the typed page under `collection`.
    ///
    /// A zero `totalElements` yields an empty page no matter what
    /// `_embedded` contains; a missing collection with elements reported
    /// is a contract violation.
    pub fn into_page(mut self, collection: &str) -> Result<ListPage<T>, MissingCollection> {
        if self.page.total_elements == 0 {
            return Ok(ListPage {
                items: Vec::new(),
                page: self.page,
            });
        }
        let items = self
            .embedded
            .as_mut()
            .and_then(|embedded| embedded.remove(collection));
        match items {
            Some(items) => Ok(ListPage {
                items,
                page: self.page,
            }),
            None => Err(MissingCollection {
                collection: collection.to_string(),
                total_elements: self.page.total_elements,
            }),
        }
    }
}

/// A fully-typed page of items: what list consumers actually see.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub page: PageMetadata,
}

/// Create and update responses wrap the persisted identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleValue<T> {
    pub value: T,
    #[serde(rename = "_links", default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
