//! List query codec: the canonical list request and its query-string form.
//!
//! The query string is the source of truth for list views; [`ListQuery`]
//! round-trips through [`ListQuery::encode`] and [`ListQuery::decode`]
//! against the owning entity's [`ListDefaults`].

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// Page size applied when the query string carries none.
/// Matches the server's default.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort order for a single sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            }
        )
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Ascending),
            "DESC" => Ok(SortDirection::Descending),
            _ => Err(()),
        }
    }
}

/// One `"field,direction"` sort entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: &str) -> Self {
        SortKey {
            field: field.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: &str) -> Self {
        SortKey {
            field: field.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

impl FromStr for SortKey {
    type Err = ();

    /// Parses `"field,ASC"` / `"field,DESC"`. A bare `"field"` sorts
    /// ascending, which is what the server does with a direction-less
    /// sort parameter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((field, direction)) => {
                if field.is_empty() {
                    return Err(());
                }
                Ok(SortKey {
                    field: field.to_string(),
                    direction: direction.parse()?,
                })
            }
            None => {
                if s.is_empty() {
                    return Err(());
                }
                Ok(SortKey::asc(s))
            }
        }
    }
}

/// Per-entity codec defaults: the page size and sort order the server
/// applies when the parameters are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDefaults {
    pub size: u32,
    pub sort: Vec<SortKey>,
}

impl ListDefaults {
    /// The usual entity defaults: server page size, single ascending sort.
    pub fn sorted_by(field: &str) -> Self {
        ListDefaults {
            size: DEFAULT_PAGE_SIZE,
            sort: vec![SortKey::asc(field)],
        }
    }
}

/// Canonical list request: zero-based page, page size, sort entries in
/// priority order, and an optional opaque filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortKey>,
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn new(defaults: &ListDefaults) -> Self {
        ListQuery {
            page: 0,
            size: defaults.size,
            sort: defaults.sort.clone(),
            filter: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Replaces the sort order with a single key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = vec![sort];
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Decodes a raw query string. Never fails: absent or malformed
    /// parameters fall back to their defaults and unknown parameters are
    /// ignored. Repeated `sort` parameters keep their order; malformed
    /// entries are dropped. An empty `filter` decodes to no filter at all,
    /// keeping "filter active" distinguishable from "no filter".
    pub fn decode(raw: &str, defaults: &ListDefaults) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let mut page = None;
        let mut size = None;
        let mut sort = Vec::new();
        let mut filter = None;

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    if page.is_none() {
                        page = value.parse::<u32>().ok();
                    }
                }
                "size" => {
                    if size.is_none() {
                        size = value.parse::<u32>().ok().filter(|s| *s > 0);
                    }
                }
                "sort" => {
                    if let Ok(key) = value.parse::<SortKey>() {
                        sort.push(key);
                    }
                }
                "filter" => {
                    if filter.is_none() && !value.is_empty() {
                        filter = Some(value.into_owned());
                    }
                }
                _ => {}
            }
        }

        ListQuery {
            page: page.unwrap_or(0),
            size: size.unwrap_or(defaults.size),
            sort: if sort.is_empty() {
                defaults.sort.clone()
            } else {
                sort
            },
            filter,
        }
    }

    /// Encodes back into a query string. `page` and `size` are always
    /// emitted so list URLs stay shareable; `sort` is omitted while it
    /// equals the entity default and `filter` is omitted when absent.
    pub fn encode(&self, defaults: &ListDefaults) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.page.to_string());
        serializer.append_pair("size", &self.size.to_string());
        if self.sort != defaults.sort {
            for key in &self.sort {
                serializer.append_pair("sort", &key.to_string());
            }
        }
        if let Some(filter) = &self.filter {
            serializer.append_pair("filter", filter);
        }
        serializer.finish()
    }
}
