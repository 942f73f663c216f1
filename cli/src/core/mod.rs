//! # sdkport Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! The host-independent part of sdkport: the import decision logic and the
//! infrastructure (configuration, errors) every command relies on.
//!
//! ## Architecture
//!
//! - `reference`: classifying the selected reference and deciding visibility
//! - `overrides`: reading an existing solution-local SDK root from the project
//! - `manifest`: reading `extension.vsixmanifest`
//! - `planner`: destination layout and duplicate detection
//! - `host`: the capabilities the importer needs from its surroundings
//! - `importer`: the import workflow
//! - `config`: configuration loading, merging and validation
//! - `error`: error types
//!
pub mod config;
pub mod error;
pub mod host;
pub mod importer;
pub mod manifest;
pub mod overrides;
pub mod planner;
pub mod reference;
