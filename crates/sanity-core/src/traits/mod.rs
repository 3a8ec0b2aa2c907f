// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams used by the resolver.
//!
//! Traits use `#[async_trait]` so implementations can be held as trait objects.

pub mod probe;

pub use probe::PathProbe;
