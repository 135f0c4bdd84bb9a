// ABOUTME: Re-exports command modules for the wechef CLI
// ABOUTME: Recipe listing, display, saving, and costing commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

pub mod recipes;
