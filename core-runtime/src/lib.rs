//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the migration core:
//! - Logging and tracing infrastructure
//! - Run configuration (path prefix, root directories, dry-run and report flags)
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the hierarchy and migration
//! crates depend on. Configuration is an explicit value passed into the tree
//! builder and reconciler; nothing here keeps process-wide mutable state apart
//! from the installed `tracing` subscriber.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
