//! List controls: pure rewrites of the canonical query state plus the
//! pagination links derived from page metadata. Every rewrite feeds back
//! into the query string, which is what triggers the refetch.

use staydesk_api::types::PageMetadata;
use staydesk_api::{ListQuery, SortKey};

/// One pagination link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    /// Zero-based page index.
    pub index: u64,
    /// Whether this is the page currently shown.
    pub current: bool,
}

/// Links for every page of the result set. Nothing to render with a
/// single page or less.
pub fn page_links(page: &PageMetadata) -> Vec<PageLink> {
    if page.total_pages <= 1 {
        return Vec::new();
    }
    (0..page.total_pages)
        .map(|index| PageLink {
            index,
            current: index == page.number,
        })
        .collect()
}

/// Jumps to a page, leaving every other parameter untouched.
pub fn goto_page(query: &ListQuery, page: u32) -> ListQuery {
    let mut next = query.clone();
    next.page = page;
    next
}

/// Replaces the sort order with a single key. Resets the page: the old
/// page index is meaningless under a new order.
pub fn apply_sort(query: &ListQuery, sort: SortKey) -> ListQuery {
    let mut next = query.clone();
    next.sort = vec![sort];
    next.page = 0;
    next
}

/// Applies the submitted filter text and resets the page. Blank input
/// removes the filter entirely, so an active filter never looks like an
/// empty one.
pub fn apply_filter(query: &ListQuery, input: &str) -> ListQuery {
    let mut next = query.clone();
    let trimmed = input.trim();
    next.filter = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
    next.page = 0;
    next
}

/// A selectable sort order with its translation key.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub key: SortKey,
    pub label_key: &'static str,
}

/// Sort orders offered on the booking list.
pub fn booking_sort_options() -> Vec<SortOption> {
    vec![
        SortOption {
            key: SortKey::asc("id"),
            label_key: "booking.list.sort.id,ASC",
        },
        SortOption {
            key: SortKey::asc("checkinDate"),
            label_key: "booking.list.sort.checkinDate,ASC",
        },
        SortOption {
            key: SortKey::asc("checkoutDate"),
            label_key: "booking.list.sort.checkoutDate,ASC",
        },
    ]
}

/// Sort orders offered on the room list.
pub fn room_sort_options() -> Vec<SortOption> {
    vec![
        SortOption {
            key: SortKey::asc("id"),
            label_key: "room.list.sort.id,ASC",
        },
        SortOption {
            key: SortKey::asc("roomNumber"),
            label_key: "room.list.sort.roomNumber,ASC",
        },
        SortOption {
            key: SortKey::asc("roomType"),
            label_key: "room.list.sort.roomType,ASC",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use staydesk_api::ListDefaults;

    fn base_query() -> ListQuery {
        ListQuery::decode(
            "page=2&size=10&sort=checkinDate,ASC&filter=sea",
            &ListDefaults::sorted_by("id"),
        )
    }

    #[test]
    fn goto_page_touches_nothing_else() {
        let query = base_query();
        let next = goto_page(&query, 4);
        assert_eq!(next.page, 4);
        assert_eq!(next.size, query.size);
        assert_eq!(next.sort, query.sort);
        assert_eq!(next.filter, query.filter);
    }

    #[test]
    fn applying_a_sort_resets_the_page() {
        let next = apply_sort(&base_query(), SortKey::asc("checkoutDate"));
        assert_eq!(next.page, 0);
        assert_eq!(next.sort, vec![SortKey::asc("checkoutDate")]);
        assert_eq!(next.filter.as_deref(), Some("sea"));
    }

    #[test]
    fn submitting_a_filter_resets_the_page() {
        let next = apply_filter(&base_query(), "garden");
        assert_eq!(next.page, 0);
        assert_eq!(next.filter.as_deref(), Some("garden"));
    }

    #[test]
    fn clearing_the_filter_removes_the_parameter() {
        for blank in ["", "   ", "\t"] {
            let next = apply_filter(&base_query(), blank);
            assert_eq!(next.filter, None, "input: {:?}", blank);
            assert_eq!(next.page, 0);
            let raw = next.encode(&ListDefaults::sorted_by("id"));
            assert!(!raw.contains("filter"), "encoded: {}", raw);
        }
    }

    #[test]
    fn page_links_cover_every_page_and_mark_the_current_one() {
        let page = PageMetadata {
            size: 10,
            total_elements: 25,
            total_pages: 3,
            number: 2,
        };
        let links = page_links(&page);
        assert_eq!(links.len(), 3);
        assert!(links[2].current);
        assert!(!links[0].current && !links[1].current);
        // the current page is the last one; there is nothing beyond it
        assert_eq!(links.last().unwrap().index, page.number);
    }

    #[test]
    fn sort_options_carry_their_label_keys() {
        let labels: Vec<&str> = booking_sort_options().iter().map(|o| o.label_key).collect();
        assert!(labels.contains(&"booking.list.sort.checkinDate,ASC"));
        assert!(room_sort_options()
            .iter()
            .all(|option| option.label_key.starts_with("room.list.sort.")));
    }

    #[test]
    fn single_page_renders_no_links() {
        for total_pages in [0, 1] {
            let page = PageMetadata {
                size: 20,
                total_elements: total_pages * 3,
                total_pages,
                number: 0,
            };
            assert!(page_links(&page).is_empty());
        }
    }
}
