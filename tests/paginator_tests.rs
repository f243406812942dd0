//! Integration tests for paginated loading and detail lookup.
//!
//! Tests cover:
//! - Cursor movement and the page bound
//! - Failure handling and retry
//! - Single-flight rejection of overlapping fetches
//! - Concurrent detail/video lookup

use async_trait::async_trait;
use movie_finder::core::details::load_detail;
use movie_finder::core::mapper::MappingOptions;
use movie_finder::core::paginator::{
    PageCursor, Paginator, END_OF_LIST, FETCH_IN_PROGRESS, PAGE_LOAD_FAILED,
};
use movie_finder::models::movie::ListItem;
use movie_finder::models::resource::ResultState;
use movie_finder::services::catalog::{
    CatalogService, RawDetail, RawMovie, RawPage, RawVideo, RawVideoList,
};
use movie_finder::{Error, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ========== FAKE CATALOG ==========

/// In-memory catalog serving `per_page` movies on every page.
#[derive(Default)]
struct FakeCatalog {
    per_page: i64,
    total_pages: Option<u32>,
    delay: Option<Duration>,
    failing_pages: Mutex<HashSet<u32>>,
    list_calls: AtomicUsize,
    detail_fails: bool,
}

impl FakeCatalog {
    fn new(per_page: i64) -> Self {
        Self {
            per_page,
            ..Default::default()
        }
    }

    fn fail_page(&self, page: u32) {
        self.failing_pages.lock().unwrap().insert(page);
    }

    fn recover_page(&self, page: u32) {
        self.failing_pages.lock().unwrap().remove(&page);
    }

    fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_movies(&self, page: u32) -> Result<RawPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_pages.lock().unwrap().contains(&page) {
            return Err(Error::CatalogApi {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        let first = (page as i64 - 1) * self.per_page + 1;
        let results = (first..first + self.per_page)
            .map(|id| RawMovie {
                id,
                title: Some(format!("Movie {}", id)),
                genre_ids: Some(vec![18]),
                release_date: Some("2020-02-29".to_string()),
                adult: Some(false),
                ..Default::default()
            })
            .collect();

        Ok(RawPage {
            page: Some(page),
            results: Some(results),
            total_pages: self.total_pages,
            total_results: None,
        })
    }

    async fn movie_detail(&self, id: i64) -> Result<RawDetail> {
        if self.detail_fails {
            return Err(Error::CatalogApi {
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            });
        }
        Ok(RawDetail {
            id,
            title: Some("Parasite".to_string()),
            release_date: Some("2019-05-30".to_string()),
            runtime: Some(133),
            ..Default::default()
        })
    }

    async fn movie_videos(&self, id: i64) -> Result<RawVideoList> {
        Ok(RawVideoList {
            id: Some(id),
            results: Some(vec![RawVideo {
                key: Some("5xH0HfJHsaY".to_string()),
                site: Some("YouTube".to_string()),
                ..Default::default()
            }]),
        })
    }
}

fn options() -> MappingOptions {
    MappingOptions::default()
}

fn empty() -> ResultState<Vec<ListItem>> {
    ResultState::default()
}

// ========== CURSOR TESTS ==========

#[tokio::test]
async fn test_first_page_moves_cursor() {
    let paginator = Paginator::new(FakeCatalog::new(20));

    let (cursor, list) = paginator
        .fetch_next_page(PageCursor::start(), empty(), &options())
        .await;

    assert_eq!(cursor.page, 2);
    assert!(cursor.is_active());
    assert!(list.is_success());
    assert_eq!(list.data().unwrap().len(), 20);
    assert_eq!(list.data().unwrap()[0].title, "Movie 1");
}

#[tokio::test]
async fn test_pages_accumulate_in_order() {
    let paginator = Paginator::new(FakeCatalog::new(3));

    let (cursor, list) = paginator
        .fetch_pages(PageCursor::start(), empty(), 3, &options())
        .await;

    assert_eq!(cursor.page, 4);
    let ids: Vec<i64> = list.data().unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn test_end_reached_after_max_pages() {
    let catalog = Arc::new(FakeCatalog::new(1));
    let paginator = Paginator::new(catalog.clone());

    let mut cursor = PageCursor::start();
    let mut list = empty();
    for _ in 0..499 {
        let (next, merged) = paginator.fetch_next_page(cursor, list, &options()).await;
        cursor = next;
        list = merged;
    }
    assert!(cursor.is_active());
    assert_eq!(cursor.page, 500);

    let (cursor, list) = paginator.fetch_next_page(cursor, list, &options()).await;
    assert!(!cursor.is_active());
    assert!(list.is_success());
    assert_eq!(list.data().unwrap().len(), 500);
    assert_eq!(catalog.calls(), 500);
}

#[tokio::test]
async fn test_fetch_after_end_skips_service() {
    let catalog = Arc::new(FakeCatalog::new(2));
    let paginator = Paginator::with_max_pages(catalog.clone(), 1);

    let (cursor, list) = paginator
        .fetch_next_page(PageCursor::start(), empty(), &options())
        .await;
    assert!(!cursor.is_active());
    assert_eq!(catalog.calls(), 1);

    let (after, list) = paginator.fetch_next_page(cursor, list, &options()).await;

    assert_eq!(after, cursor);
    assert_eq!(list.message(), Some(END_OF_LIST));
    assert_eq!(list.data().unwrap().len(), 2);
    assert_eq!(catalog.calls(), 1);
}

#[tokio::test]
async fn test_reported_total_pages_ends_early() {
    let catalog = FakeCatalog {
        per_page: 5,
        total_pages: Some(2),
        ..Default::default()
    };
    let paginator = Paginator::new(catalog);

    let (cursor, list) = paginator
        .fetch_pages(PageCursor::start(), empty(), 10, &options())
        .await;

    assert!(!cursor.is_active());
    assert_eq!(cursor.page, 3);
    assert_eq!(list.message(), Some(END_OF_LIST));
    assert_eq!(list.data().unwrap().len(), 10);
    assert_eq!(paginator.service().calls(), 2);
}

#[tokio::test]
async fn test_cursor_at_highest_page_does_not_overflow() {
    let paginator = Paginator::new(FakeCatalog::new(1));
    let cursor = PageCursor {
        page: u32::MAX,
        end_reached: false,
    };

    let (next, list) = paginator.fetch_next_page(cursor, empty(), &options()).await;

    assert_eq!(next.page, u32::MAX);
    assert!(!next.is_active());
    assert!(list.is_success());
}

// ========== FAILURE TESTS ==========

#[tokio::test]
async fn test_failure_keeps_page_and_items() {
    let catalog = Arc::new(FakeCatalog::new(4));
    let paginator = Paginator::new(catalog.clone());

    let (cursor, list) = paginator
        .fetch_next_page(PageCursor::start(), empty(), &options())
        .await;
    catalog.fail_page(2);

    let (cursor, list) = paginator.fetch_next_page(cursor, list, &options()).await;

    assert_eq!(cursor.page, 2);
    assert!(cursor.is_active());
    assert_eq!(list.message(), Some(PAGE_LOAD_FAILED));
    assert_eq!(list.data().unwrap().len(), 4);
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let catalog = Arc::new(FakeCatalog::new(4));
    let paginator = Paginator::new(catalog.clone());
    catalog.fail_page(1);

    let (cursor, list) = paginator
        .fetch_next_page(PageCursor::start(), empty(), &options())
        .await;
    assert!(list.is_error());
    assert_eq!(cursor.page, 1);

    catalog.recover_page(1);
    let (cursor, list) = paginator.fetch_next_page(cursor, list, &options()).await;

    assert_eq!(cursor.page, 2);
    assert!(list.is_success());
    assert_eq!(list.data().unwrap().len(), 4);
}

#[tokio::test]
async fn test_failure_on_last_page_still_ends_list() {
    let catalog = Arc::new(FakeCatalog::new(1));
    let paginator = Paginator::with_max_pages(catalog.clone(), 2);
    catalog.fail_page(2);

    let (cursor, list) = paginator
        .fetch_pages(PageCursor::start(), empty(), 2, &options())
        .await;

    assert!(!cursor.is_active());
    assert_eq!(list.message(), Some(PAGE_LOAD_FAILED));
    assert_eq!(list.data().unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_pages_stops_at_first_error() {
    let catalog = Arc::new(FakeCatalog::new(2));
    let paginator = Paginator::new(catalog.clone());
    catalog.fail_page(2);

    let (cursor, list) = paginator
        .fetch_pages(PageCursor::start(), empty(), 5, &options())
        .await;

    assert_eq!(cursor.page, 2);
    assert!(list.is_error());
    assert_eq!(catalog.calls(), 2);
}

// ========== SINGLE-FLIGHT TESTS ==========

#[tokio::test]
async fn test_overlapping_fetch_is_rejected() {
    let catalog = Arc::new(FakeCatalog {
        per_page: 3,
        delay: Some(Duration::from_millis(50)),
        ..Default::default()
    });
    let paginator = Paginator::new(catalog.clone());
    let opts = options();

    let (first, second) = futures::join!(
        paginator.fetch_next_page(PageCursor::start(), empty(), &opts),
        paginator.fetch_next_page(PageCursor::start(), empty(), &opts),
    );

    assert_eq!(first.0.page, 2);
    assert!(first.1.is_success());

    assert_eq!(second.0, PageCursor::start());
    assert_eq!(second.1.message(), Some(FETCH_IN_PROGRESS));
    assert_eq!(catalog.calls(), 1);
}

#[tokio::test]
async fn test_fetch_allowed_after_previous_completes() {
    let catalog = Arc::new(FakeCatalog {
        per_page: 1,
        delay: Some(Duration::from_millis(5)),
        ..Default::default()
    });
    let paginator = Paginator::new(catalog.clone());

    let (cursor, list) = paginator
        .fetch_next_page(PageCursor::start(), empty(), &options())
        .await;
    let (cursor, list) = paginator.fetch_next_page(cursor, list, &options()).await;

    assert_eq!(cursor.page, 3);
    assert!(list.is_success());
    assert_eq!(catalog.calls(), 2);
}

// ========== DETAIL TESTS ==========

#[tokio::test]
async fn test_load_detail_combines_detail_and_videos() {
    let catalog = FakeCatalog::new(1);

    let detail = load_detail(&catalog, 496243, &options()).await;

    let detail = detail.into_data().unwrap();
    assert_eq!(detail.id, 496243);
    assert_eq!(detail.title, "Parasite");
    assert_eq!(detail.runtime, 133);
    assert_eq!(detail.release_date, "2019-05-30");
    assert_eq!(detail.videos, vec!["https://www.youtube.com/watch?v=5xH0HfJHsaY"]);
}

#[tokio::test]
async fn test_load_detail_reports_upstream_error() {
    let catalog = FakeCatalog {
        detail_fails: true,
        ..Default::default()
    };

    let detail = load_detail(&catalog, 1, &options()).await;

    assert!(detail.is_error());
    assert!(detail.data().is_none());
    assert!(detail
        .message()
        .unwrap()
        .contains("The resource you requested could not be found."));
}
