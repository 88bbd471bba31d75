//! Reconciliation results and their human-readable rendering.

use std::io::{self, Write};

use serde::Serialize;

/// What happened to one matched destination file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum MatchOutcome {
    /// Metadata was written
    Written,
    /// Metadata was already there and left untouched
    AlreadyPresent,
    /// The sink reported an error; the walk went on
    Failed(String),
    /// Dry run, the sink was not called
    Skipped,
}

/// One source file matched to one destination file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub path: String,
    pub source_id: String,
    pub destination_id: String,
    pub outcome: MatchOutcome,
}

/// Outcome of one reconciler pass
///
/// Every path list is sorted. `duplicates` may repeat a path that is also in
/// `matched`: the first match at a path is kept and later collisions are only
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub test_only: bool,
    pub matched: Vec<String>,
    pub source_missed: Vec<String>,
    pub destination_missed: Vec<String>,
    pub duplicates: Vec<String>,
    pub records: Vec<MatchRecord>,
}

impl MigrationReport {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn source_missed_count(&self) -> usize {
        self.source_missed.len()
    }

    pub fn destination_missed_count(&self) -> usize {
        self.destination_missed.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Matches found during a dry run; empty for a real run
    pub fn would_match(&self) -> &[String] {
        if self.test_only {
            &self.matched
        } else {
            &[]
        }
    }

    pub fn written_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, MatchOutcome::Written))
    }

    pub fn already_present_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, MatchOutcome::AlreadyPresent))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, MatchOutcome::Failed(_)))
    }

    /// Records whose write failed
    pub fn failures(&self) -> impl Iterator<Item = &MatchRecord> + '_ {
        self.records
            .iter()
            .filter(|record| matches!(record.outcome, MatchOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&MatchOutcome) -> bool) -> usize {
        self.records
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        let mode = if self.test_only { " (dry run)" } else { "" };
        format!(
            "Matched {} files{}: {} written, {} already present, {} failed; \
             {} missed from source, {} missed from destination, {} duplicate paths",
            self.matched_count(),
            mode,
            self.written_count(),
            self.already_present_count(),
            self.failed_count(),
            self.source_missed_count(),
            self.destination_missed_count(),
            self.duplicate_count()
        )
    }

    /// Write the summary and, with `print_details`, every path list.
    pub fn render<W: Write>(&self, writer: &mut W, print_details: bool) -> io::Result<()> {
        writeln!(writer, "{}", self.summary())?;

        if !print_details {
            return Ok(());
        }

        write_list(
            writer,
            &format!("Matched {} File Paths:", self.matched_count()),
            &self.matched,
        )?;
        write_list(
            writer,
            &format!(
                "Failed to Match {} File Paths from Source:",
                self.source_missed_count()
            ),
            &self.source_missed,
        )?;
        write_list(
            writer,
            &format!(
                "Failed to Match {} File Paths from Destination:",
                self.destination_missed_count()
            ),
            &self.destination_missed,
        )?;
        write_list(
            writer,
            &format!("Found {} Duplicate File Paths:", self.duplicate_count()),
            &self.duplicates,
        )?;

        let failures: Vec<&MatchRecord> = self.failures().collect();
        if !failures.is_empty() {
            writeln!(writer, "Failed to Update {} Files:", failures.len())?;
            for record in failures {
                if let MatchOutcome::Failed(reason) = &record.outcome {
                    writeln!(writer, "\t{} ({})", record.path, reason)?;
                }
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn write_list<W: Write>(writer: &mut W, header: &str, items: &[String]) -> io::Result<()> {
    writeln!(writer, "{}", header)?;
    for item in items {
        writeln!(writer, "\t{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, outcome: MatchOutcome) -> MatchRecord {
        MatchRecord {
            path: path.to_string(),
            source_id: format!("s:{}", path),
            destination_id: format!("d:{}", path),
            outcome,
        }
    }

    fn report() -> MigrationReport {
        MigrationReport {
            test_only: false,
            matched: vec!["D:/a.txt".into(), "D:/b.txt".into(), "D:/c.txt".into()],
            source_missed: vec!["D:/only-source.txt".into()],
            destination_missed: vec![],
            duplicates: vec!["D:/b.txt".into()],
            records: vec![
                record("D:/a.txt", MatchOutcome::Written),
                record("D:/b.txt", MatchOutcome::AlreadyPresent),
                record("D:/c.txt", MatchOutcome::Failed("503".into())),
            ],
        }
    }

    #[test]
    fn test_outcome_counts() {
        let report = report();

        assert_eq!(report.written_count(), 1);
        assert_eq!(report.already_present_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.would_match().is_empty());
    }

    #[test]
    fn test_render_summary_only() {
        let mut out = Vec::new();
        report().render(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Matched 3 files: 1 written"));
    }

    #[test]
    fn test_render_details() {
        let mut out = Vec::new();
        report().render(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Matched 3 File Paths:");
        assert_eq!(lines[2], "\tD:/a.txt");
        assert_eq!(lines[5], "Failed to Match 1 File Paths from Source:");
        assert_eq!(lines[6], "\tD:/only-source.txt");
        assert_eq!(lines[7], "Failed to Match 0 File Paths from Destination:");
        assert_eq!(lines[8], "Found 1 Duplicate File Paths:");
        assert_eq!(lines[9], "\tD:/b.txt");
        assert_eq!(lines[10], "Failed to Update 1 Files:");
        assert_eq!(lines[11], "\tD:/c.txt (503)");
    }

    #[test]
    fn test_json_shape() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["matched"].as_array().unwrap().len(), 3);
        assert_eq!(value["records"][0]["outcome"]["status"], "written");
        assert_eq!(value["records"][2]["outcome"]["reason"], "503");
    }
}
