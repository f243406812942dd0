//! Incremental loading of the catalog listing.
//!
//! The paginator keeps no cursor of its own. Callers hold a [`PageCursor`]
//! and the accumulated list, pass both in, and get the next values back:
//!
//! ```text
//! (cursor, list) --fetch_next_page--> (cursor', list')
//! ```
//!
//! Only one fetch may run at a time on a paginator. A call made while another
//! is in flight is rejected without touching the service.

use crate::core::mapper::{map_list_page, MappingOptions};
use crate::models::movie::ListItem;
use crate::models::resource::ResultState;
use crate::services::catalog::CatalogService;
use tokio::sync::Mutex;

/// Highest page the catalog serves.
pub const MAX_PAGES: u32 = 500;

/// Message returned once the last page has been fetched.
pub const END_OF_LIST: &str = "end of list";

/// Message returned when a fetch overlaps another.
pub const FETCH_IN_PROGRESS: &str = "fetch already in progress";

/// Message returned when a page could not be fetched or converted.
pub const PAGE_LOAD_FAILED: &str = "could not load movies";

/// Position in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Next page to request (1-indexed).
    pub page: u32,
    /// Whether the last page has been requested.
    pub end_reached: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            end_reached: false,
        }
    }
}

impl PageCursor {
    /// Cursor positioned on the first page.
    pub fn start() -> Self {
        Self::default()
    }

    /// Whether more pages can be requested.
    pub fn is_active(&self) -> bool {
        !self.end_reached
    }
}

/// Drives fetch-and-convert cycles against a catalog service.
pub struct Paginator<S> {
    service: S,
    max_pages: u32,
    in_flight: Mutex<()>,
}

impl<S: CatalogService> Paginator<S> {
    /// Create a paginator bounded by [`MAX_PAGES`].
    pub fn new(service: S) -> Self {
        Self::with_max_pages(service, MAX_PAGES)
    }

    /// Create a paginator with a custom page bound.
    pub fn with_max_pages(service: S, max_pages: u32) -> Self {
        Self {
            service,
            max_pages: max_pages.max(1),
            in_flight: Mutex::new(()),
        }
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch the page under `cursor` and append it to `accumulated`.
    ///
    /// - On success the page is combined into the list and the cursor moves
    ///   to the next page.
    /// - On failure the list becomes an error that keeps the items loaded so
    ///   far, and the cursor stays put so the same page is requested again.
    /// - Requesting the last page ends the list whatever the outcome. A
    ///   successful response reporting fewer pages ends it early.
    /// - Once the list has ended, no request is made and the list becomes an
    ///   [`END_OF_LIST`] error.
    pub async fn fetch_next_page(
        &self,
        cursor: PageCursor,
        accumulated: ResultState<Vec<ListItem>>,
        options: &MappingOptions,
    ) -> (PageCursor, ResultState<Vec<ListItem>>) {
        if cursor.end_reached {
            return (cursor, accumulated.to_error(None, END_OF_LIST));
        }

        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("Page {} requested while another fetch is running", cursor.page);
            return (cursor, accumulated.to_error(None, FETCH_IN_PROGRESS));
        };

        let page = cursor.page;
        let previous = accumulated.to_loading(None);
        tracing::debug!("Fetching catalog page {}", page);

        let raw: ResultState<_> = match self.service.list_movies(page).await {
            Ok(raw) => ResultState::Success(raw),
            Err(e) => {
                tracing::warn!("Catalog page {} failed: {}", page, e);
                ResultState::error(e.to_string())
            }
        };
        let total_pages = raw.data().and_then(|p| p.total_pages);
        let last_page = page >= self.max_pages;

        match map_list_page(raw, options) {
            ResultState::Success(items) => {
                let reported_last = total_pages.is_some_and(|total| page >= total);
                let next = PageCursor {
                    page: page.saturating_add(1),
                    end_reached: last_page || reported_last,
                };
                tracing::debug!("Page {} added {} movies", page, items.len());
                (next, previous.combine(ResultState::Success(items)))
            }
            failed => {
                if let Some(message) = failed.message() {
                    tracing::warn!("Page {} not added: {}", page, message);
                }
                let next = PageCursor {
                    page,
                    end_reached: last_page,
                };
                (next, previous.to_error(None, PAGE_LOAD_FAILED))
            }
        }
    }

    /// Fetch up to `count` pages, stopping at the first error.
    pub async fn fetch_pages(
        &self,
        mut cursor: PageCursor,
        mut accumulated: ResultState<Vec<ListItem>>,
        count: u32,
        options: &MappingOptions,
    ) -> (PageCursor, ResultState<Vec<ListItem>>) {
        for _ in 0..count {
            let (next, list) = self.fetch_next_page(cursor, accumulated, options).await;
            cursor = next;
            accumulated = list;
            if accumulated.is_error() {
                break;
            }
        }
        (cursor, accumulated)
    }
}
