// ABOUTME: Tests for the cached data-access layer over a recording fake API
// ABOUTME: Cache hits, one retry on failed reads, invalidation after saves, and the saving lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, payload, queries, ApiCall, RecordingApi};
use std::sync::Arc;
use std::time::Duration;
use wechef::cache::{QueryCache, QueryKey};
use wechef::errors::ErrorCode;
use wechef::recipes::RecipeQueries;

#[tokio::test]
async fn test_list_is_cached() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    api.seed(&payload("Soup", 2, &[("Leek", 1.0, 2.0)]));
    let queries = queries(Arc::clone(&api));

    let first = queries.recipes().await.unwrap();
    let second = queries.recipes().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(api.count(|call| *call == ApiCall::List), 1);
    assert!(queries.cache().contains(&QueryKey::RecipeList).await);
}

#[tokio::test]
async fn test_stale_entries_are_refetched() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let queries = RecipeQueries::with_cache(Arc::clone(&api), QueryCache::new(16, Duration::ZERO))
        .with_retry_delay(Duration::ZERO);

    queries.recipes().await.unwrap();
    queries.recipes().await.unwrap();
    assert_eq!(api.count(|call| *call == ApiCall::List), 2);
}

#[tokio::test]
async fn test_failed_read_is_retried_once() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    api.seed(&payload("Soup", 2, &[("Leek", 1.0, 2.0)]));
    let queries = queries(Arc::clone(&api));

    api.fail_next_reads(1);
    let rows = queries.recipes().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(api.count(|call| *call == ApiCall::List), 2);
}

#[tokio::test]
async fn test_read_error_after_retry_is_returned() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let queries = queries(Arc::clone(&api));

    api.fail_next_reads(2);
    let err = queries.recipes().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(api.count(|call| *call == ApiCall::List), 2);
    assert!(!queries.cache().contains(&QueryKey::RecipeList).await);
}

#[tokio::test]
async fn test_missing_id_skips_the_fetch() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let queries = queries(Arc::clone(&api));

    assert!(queries.recipe(None).await.unwrap().is_none());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_create_invalidates_the_list() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let queries = queries(Arc::clone(&api));

    assert!(queries.recipes().await.unwrap().is_empty());
    let created = queries
        .create(&payload("Bread", 1, &[("Flour", 1.0, 0.8)]))
        .await
        .unwrap();
    assert!(!queries.cache().contains(&QueryKey::RecipeList).await);

    let rows = queries.recipes().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);
    assert_eq!(api.count(|call| *call == ApiCall::List), 2);
    assert_eq!(api.count(|call| matches!(call, ApiCall::Create(_))), 1);
}

#[tokio::test]
async fn test_update_invalidates_list_and_detail() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let seeded = api.seed(&payload("Bread", 1, &[("Flour", 1.0, 0.8)]));
    let queries = queries(Arc::clone(&api));

    queries.recipes().await.unwrap();
    queries.recipe(Some(seeded.id)).await.unwrap();

    queries
        .update(seeded.id, &payload("Rye Bread", 2, &[("Rye", 1.0, 1.2)]))
        .await
        .unwrap();
    assert!(!queries.cache().contains(&QueryKey::RecipeList).await);
    assert!(!queries.cache().contains(&QueryKey::Recipe(seeded.id)).await);

    let fresh = queries.recipe(Some(seeded.id)).await.unwrap().unwrap();
    assert_eq!(fresh.name, "Rye Bread");
    assert_eq!(api.count(|call| *call == ApiCall::Get(seeded.id)), 2);
}

#[tokio::test]
async fn test_failed_save_keeps_cache() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    let queries = queries(Arc::clone(&api));
    queries.recipes().await.unwrap();

    api.fail_writes(true);
    let err = queries
        .create(&payload("Bread", 1, &[("Flour", 1.0, 0.8)]))
        .await
        .unwrap_err();
    assert_eq!(err.message, "HTTP 500: database is locked");
    assert!(queries.cache().contains(&QueryKey::RecipeList).await);
    assert!(!queries.is_saving());
}

#[tokio::test]
async fn test_second_save_is_rejected_while_saving() {
    init_test_logging();
    let api = Arc::new(RecordingApi::new());
    api.delay_writes(Duration::from_millis(200));
    let queries = Arc::new(queries(Arc::clone(&api)));

    let background = {
        let queries = Arc::clone(&queries);
        tokio::spawn(async move {
            queries
                .create(&payload("Slow", 1, &[("Time", 1.0, 1.0)]))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(queries.is_saving());

    let err = queries
        .create(&payload("Fast", 1, &[("Haste", 1.0, 1.0)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);

    background.await.unwrap().unwrap();
    assert!(!queries.is_saving());
    assert_eq!(api.count(|call| matches!(call, ApiCall::Create(_))), 1);
}
