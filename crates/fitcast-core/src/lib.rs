// ABOUTME: Core types and constants for the Fitcast fitness prediction platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitcast Core
//!
//! Foundation crate providing shared types and constants for the Fitcast
//! prediction platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorResponse`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: User profile, workout, metric, and prediction records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, workouts, metric snapshots, predictions)
pub mod models;
