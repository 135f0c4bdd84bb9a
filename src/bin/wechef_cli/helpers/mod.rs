// ABOUTME: Helper modules for the wechef CLI
// ABOUTME: Terminal output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

pub mod display;
