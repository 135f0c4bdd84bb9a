// ABOUTME: Core types and constants for the WeChef recipe costing client
// ABOUTME: Foundation crate with error handling, numeric helpers, wire models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

#![deny(unsafe_code)]

//! # WeChef Core
//!
//! Foundation crate shared by the WeChef client library, the command-line
//! front end and the reference backend. It changes rarely, so the heavier
//! crates that depend on it keep their incremental builds cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Defaults, environment variable names and user-facing messages
//! - **number**: Coercion, safe arithmetic, truncation and currency formatting
//! - **models**: Recipe and ingredient types exchanged with the REST backend

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Numeric coercion and currency helpers used by every cost computation
pub mod number;

/// Recipe wire models (list items, detail records, payloads)
pub mod models;
