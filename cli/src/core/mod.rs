//! # gomanifest Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Foundational pieces shared by the dependency lister and the CLI:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the `Result` alias
//!
//! ```rust
//! use gomanifest::core::config; // For loading configuration
//! use gomanifest::core::error::{GoManifestError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
