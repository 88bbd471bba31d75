//! # Hierarchy Module
//!
//! Builds a filesystem-like tree out of one backend's flat object listing and
//! answers path queries against it.
//!
//! ## Overview
//!
//! A backend returns folders and files intermixed, in no particular order,
//! each naming its parent by id. [`TreeBuilder`] resolves the root (optionally
//! a sub-folder given as a root directory), links every object to its
//! materialized parent and assigns each node a canonical path:
//!
//! ```text
//! D:                 root, path = path prefix
//! D:/Team            folder
//! D:/Team/plan.docx  file (extension repaired from a Docs mime type)
//! ```
//!
//! Objects that cannot be placed never receive a path. They are reported in
//! [`BuildDiagnostics`] instead of failing the build.
//!
//! ## Components
//!
//! - **Names** (`names`): `002f` unescaping and export extension repair
//! - **Users** (`user`): email-keyed user registry
//! - **Builder** (`builder`): listing to hierarchy conversion with diagnostics
//! - **Hierarchy** (`hierarchy`): path lookup and lazy tree printing
//!
//! ## Usage
//!
//! ```ignore
//! use core_hierarchy::TreeBuilder;
//! use core_runtime::config::{MigrationConfig, Side};
//!
//! let config = MigrationConfig::builder().source_root("Team").build()?;
//! let output = TreeBuilder::new(config.tree_options(Side::Source)).build(&objects)?;
//!
//! for line in output.hierarchy.print(None, config.verbose)? {
//!     println!("{}", line);
//! }
//! ```

pub mod builder;
pub mod error;
pub mod hierarchy;
pub mod names;
pub mod node;
pub mod user;

pub use builder::{BuildDiagnostics, BuildOutput, ObjectKind, OrphanedObject, TreeBuilder};
pub use error::{HierarchyError, Result};
pub use hierarchy::{Hierarchy, TreeLines};
pub use names::{normalize_name, repair_extension};
pub use node::{Node, NodeId, NodeKind};
pub use user::{User, UserRegistry};
