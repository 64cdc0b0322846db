//! Version resolution and classification layer
//!
//! This module provides the core functionality for resolving dependency
//! references to their latest upstream version and classifying the result
//! across three ecosystems (npm, deno.land, GitHub releases).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resolvers  │────▶│    Cache    │────▶│  Registries │
//! │ (reference) │     │  (memoize)  │     │   (fetch)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Checker   │────▶│    Range    │
//! │ (classify)  │     │ (gtr check) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: In-memory, process-lifetime latest-version cache
//! - [`checker`]: Outcome classification and summary items
//! - [`range`]: npm-style range parsing and range-aware comparison
//! - [`registry`]: Registry trait for fetching the latest version
//! - [`registries`]: Concrete registry implementations (npm, deno.land, GitHub)
//! - [`resolver`]: Resolver trait, version pairs and reference splitting
//! - [`resolvers`]: Per-ecosystem resolvers and the URL dispatcher
//! - [`error`]: Error types for registry and range operations
//! - [`semver`]: Shared version string helpers

pub mod cache;
pub mod checker;
pub mod error;
pub mod range;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod resolvers;
pub mod semver;
