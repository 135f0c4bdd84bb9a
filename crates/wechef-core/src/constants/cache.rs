// ABOUTME: Query cache constants for stale time, retry count, and capacity
// ABOUTME: Defaults keep reads fresh for half a minute with a single retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

/// Default maximum entries held by the query cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 256;

/// Seconds a cached read stays fresh before it is fetched again
pub const DEFAULT_STALE_TIME_SECS: u64 = 30;

/// Automatic retries for a failed read query
pub const DEFAULT_QUERY_RETRY: u32 = 1;

/// Key of the recipe list query
pub const RECIPE_LIST_KEY: &str = "recipes";

/// Prefix of per-recipe detail query keys
pub const RECIPE_DETAIL_PREFIX: &str = "recipe";

/// Delay before a failed read is retried
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
