// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sanity resolver tests.
//!
//! Provides temporary project directories populated with manifests, plus the
//! canonical fixture trees used across the resolver's test suites.
//!
//! # Components
//!
//! - [`Fixture`] - Temporary project root built from [`FixtureEntry`] values
//! - [`fixtures`] - Ready-made project layouts (basic tree, deep tree, lookup order, invalid manifests)

pub mod fixture;
pub mod fixtures;

pub use fixture::{Fixture, FixtureBuilder, FixtureEntry};
