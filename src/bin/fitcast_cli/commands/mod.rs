// ABOUTME: Re-exports command modules for fitcast-cli
// ABOUTME: Model lifecycle commands and one-shot predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod model;
pub mod predict;
