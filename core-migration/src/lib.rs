//! # Migration Module
//!
//! Reconciles a source hierarchy with a destination hierarchy by path and
//! copies owner and timestamp metadata onto every matched destination file.
//!
//! ## Overview
//!
//! - [`Reconciler`] walks the source files, looks each one up by exact path in
//!   the destination and calls the [`MetadataSink`] for every match
//! - [`MigrationReport`] holds the sorted matched, source-missed,
//!   destination-missed and duplicate path lists plus per-match outcomes
//! - [`run_migration`] lists both backends, builds both hierarchies from one
//!   [`MigrationConfig`] and reconciles them
//!
//! ## Usage
//!
//! ```ignore
//! use core_migration::{run_migration, write_report};
//! use core_runtime::config::MigrationConfig;
//!
//! let config = MigrationConfig::builder()
//!     .destination_root("D:/Team")
//!     .print_details(true)
//!     .build()?;
//!
//! let run = run_migration(&config, &drive_lister, &box_lister, box_sink).await?;
//! write_report(&config, &run.report)?;
//! ```

pub mod error;
pub mod reconciler;
pub mod report;

pub use error::{MigrationError, Result};
pub use reconciler::{payload_for, Reconciler};
pub use report::{MatchOutcome, MatchRecord, MigrationReport};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use bridge_traits::storage::{MetadataSink, ObjectLister};
use core_hierarchy::{BuildDiagnostics, BuildOutput, TreeBuilder};
use core_runtime::config::{MigrationConfig, Side};
use tracing::{info, instrument};

/// Everything produced by one end-to-end run
#[derive(Debug)]
pub struct MigrationRun {
    pub report: MigrationReport,
    pub source_diagnostics: BuildDiagnostics,
    pub destination_diagnostics: BuildDiagnostics,
}

/// List both backends, build both hierarchies and reconcile them.
///
/// Hierarchies are built one after the other.
///
/// # Errors
///
/// Fails on an invalid config, a listing failure or an unresolvable root
/// directory. Per-file sink failures are reported, not raised.
#[instrument(skip_all, fields(source = source.backend_name(), destination = destination.backend_name()))]
pub async fn run_migration(
    config: &MigrationConfig,
    source: &dyn ObjectLister,
    destination: &dyn ObjectLister,
    sink: Arc<dyn MetadataSink>,
) -> Result<MigrationRun> {
    config.validate()?;

    let BuildOutput {
        hierarchy: source_tree,
        diagnostics: source_diagnostics,
    } = TreeBuilder::new(config.tree_options(Side::Source))
        .build_from(source)
        .await?;

    let BuildOutput {
        hierarchy: destination_tree,
        diagnostics: destination_diagnostics,
    } = TreeBuilder::new(config.tree_options(Side::Destination))
        .build_from(destination)
        .await?;

    info!(
        source_root = %source_tree.root().id,
        destination_root = %destination_tree.root().id,
        "Matching files between {} and {}",
        source.backend_name(),
        destination.backend_name()
    );

    let report = Reconciler::from_config(sink, config)
        .migrate(&source_tree, &destination_tree)
        .await;

    Ok(MigrationRun {
        report,
        source_diagnostics,
        destination_diagnostics,
    })
}

/// Render `report` to the configured output file, or stdout when none is set.
///
/// An output file with a `.json` extension receives the serialized report
/// instead of the text rendering.
pub fn write_report(config: &MigrationConfig, report: &MigrationReport) -> Result<()> {
    match &config.output_file {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            if path.extension().is_some_and(|ext| ext == "json") {
                serde_json::to_writer_pretty(&mut writer, report)?;
            } else {
                report.render(&mut writer, config.print_details)?;
            }
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            report.render(&mut writer, config.print_details)?;
        }
    }
    Ok(())
}
