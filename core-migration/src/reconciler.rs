//! Path reconciliation between two hierarchies.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use bridge_traits::storage::{MetadataPayload, MetadataSink, WriteOutcome};
use core_hierarchy::{Hierarchy, Node};
use core_runtime::config::MigrationConfig;
use tracing::{debug, info, instrument, warn};

use crate::report::{MatchOutcome, MatchRecord, MigrationReport};

/// Payload copied from a source file onto its destination counterpart
pub fn payload_for(source: &Node) -> MetadataPayload {
    MetadataPayload {
        owner_name: source.owner.display_name.clone(),
        owner_email: source.owner.email.clone(),
        created_time: source.created_time.clone(),
        last_modified_by_name: source.last_modified_by.display_name.clone(),
        last_modified_time: source.last_modified_time.clone(),
    }
}

/// Matches source files to destination files by path and copies metadata
/// across through a [`MetadataSink`]
///
/// Only files are reconciled. A dry run produces the same match, miss and
/// duplicate lists as a real run without calling the sink.
pub struct Reconciler {
    sink: Arc<dyn MetadataSink>,
    test_only: bool,
}

impl Reconciler {
    pub fn new(sink: Arc<dyn MetadataSink>) -> Self {
        Self {
            sink,
            test_only: false,
        }
    }

    pub fn from_config(sink: Arc<dyn MetadataSink>, config: &MigrationConfig) -> Self {
        Self::new(sink).with_test_only(config.test_only)
    }

    pub fn with_test_only(mut self, test_only: bool) -> Self {
        self.test_only = test_only;
        self
    }

    pub fn is_test_only(&self) -> bool {
        self.test_only
    }

    /// Reconcile `source` against `destination`.
    ///
    /// Never fails: sink errors are recorded as [`MatchOutcome::Failed`] and
    /// the walk continues with the next file.
    #[instrument(skip_all, fields(test_only = self.test_only))]
    pub async fn migrate(&self, source: &Hierarchy, destination: &Hierarchy) -> MigrationReport {
        info!(
            source_files = source.file_count(),
            destination_files = destination.file_count(),
            "Matching files"
        );

        let mut by_path: HashMap<&str, Vec<&Node>> = HashMap::with_capacity(destination.file_count());
        for node in destination.files() {
            by_path.entry(node.path()).or_default().push(node);
        }

        let mut destination_unmatched: BTreeSet<&str> = by_path.keys().copied().collect();
        let mut report = MigrationReport {
            test_only: self.test_only,
            ..MigrationReport::default()
        };
        let mut duplicates: BTreeSet<String> = BTreeSet::new();

        for source_file in source.files() {
            let path = source_file.path();

            let Some(candidates) = by_path.get(path) else {
                debug!(path, "No destination match");
                report.source_missed.push(path.to_string());
                continue;
            };

            if !destination_unmatched.remove(path) {
                debug!(path, "Path already matched by another source file");
                duplicates.insert(path.to_string());
                continue;
            }

            if candidates.len() > 1 {
                debug!(path, count = candidates.len(), "Destination holds duplicate paths");
                duplicates.insert(path.to_string());
            }

            let target = candidates[0];
            let outcome = self.apply(source_file, target).await;

            report.matched.push(path.to_string());
            report.records.push(MatchRecord {
                path: path.to_string(),
                source_id: source_file.id.clone(),
                destination_id: target.id.clone(),
                outcome,
            });
        }

        report.destination_missed = destination_unmatched
            .into_iter()
            .map(str::to_string)
            .collect();
        report.duplicates = duplicates.into_iter().collect();
        report.matched.sort();
        report.source_missed.sort();
        report.records.sort_by(|left, right| left.path.cmp(&right.path));

        info!(
            matched = report.matched_count(),
            written = report.written_count(),
            already_present = report.already_present_count(),
            failed = report.failed_count(),
            source_missed = report.source_missed_count(),
            destination_missed = report.destination_missed_count(),
            duplicates = report.duplicate_count(),
            "Reconciliation complete"
        );

        report
    }

    async fn apply(&self, source: &Node, target: &Node) -> MatchOutcome {
        if self.test_only {
            debug!(path = source.path(), "Dry run, skipping metadata write");
            return MatchOutcome::Skipped;
        }

        let payload = payload_for(source);
        match self.sink.apply_metadata(&target.id, &payload).await {
            Ok(WriteOutcome::Written) => {
                debug!(path = source.path(), "Metadata written");
                MatchOutcome::Written
            }
            Ok(WriteOutcome::AlreadyPresent) => {
                debug!(path = source.path(), "Metadata already present");
                MatchOutcome::AlreadyPresent
            }
            Err(err) => {
                warn!(
                    path = source.path(),
                    object_id = %target.id,
                    error = %err,
                    "Failed to update metadata"
                );
                MatchOutcome::Failed(err.to_string())
            }
        }
    }
}
