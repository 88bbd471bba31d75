//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-migration`, `provider-google-drive`,
//! `provider-box`). Host tools can depend on `drive-migration-workspace` and
//! enable the documented features without needing to wire each crate
//! individually.

#[cfg(feature = "migration")]
pub use core_migration as migration;

#[cfg(feature = "google-drive")]
pub use provider_google_drive as google_drive;

#[cfg(feature = "box")]
pub use provider_box as box_provider;
