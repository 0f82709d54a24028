//! CLI subcommand implementations.

pub mod bookings;
pub mod rooms;

use anyhow::{bail, Result};
use clap::Args;

use staydesk_lib::listing::{apply_filter, apply_sort, goto_page, SortOption};
use staydesk_lib::{ListDefaults, ListQuery, SortKey};

/// Resolves a `--sort` flag against the entity's offered sort orders.
pub fn parse_sort(raw: &str, options: &[SortOption]) -> Result<SortKey> {
    let Ok(key) = raw.parse::<SortKey>() else {
        bail!("invalid sort '{}', expected field or field,ASC|DESC", raw);
    };
    if !options.iter().any(|option| option.key == key) {
        let offered: Vec<String> = options.iter().map(|o| o.key.to_string()).collect();
        bail!("unsupported sort '{}', one of: {}", raw, offered.join(", "));
    }
    Ok(key)
}

/// List flags shared by both entities. The flags are folded through the
/// list-control transitions, so a sort or filter lands on page zero unless
/// `--page` asks for a later one.
#[derive(Args)]
pub struct ListArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Results per page
    #[arg(long)]
    pub size: Option<u32>,

    /// Sort order, e.g. id,ASC
    #[arg(long)]
    pub sort: Option<String>,

    /// Free-text filter passed through to the backend
    #[arg(long)]
    pub filter: Option<String>,
}

impl ListArgs {
    pub fn to_query(&self, defaults: &ListDefaults, options: &[SortOption]) -> Result<ListQuery> {
        let mut query = ListQuery::new(defaults);
        if let Some(size) = self.size {
            if size == 0 {
                bail!("--size must be greater than zero");
            }
            query = query.with_size(size);
        }
        if let Some(sort) = &self.sort {
            query = apply_sort(&query, parse_sort(sort, options)?);
        }
        if let Some(filter) = &self.filter {
            query = apply_filter(&query, filter);
        }
        Ok(goto_page(&query, self.page))
    }
}
