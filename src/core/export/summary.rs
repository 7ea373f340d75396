//! Export results and run summary
//!
//! This module defines the per-unit result records and the summary a run
//! reports once every unit has been attempted.

use crate::adapters::output::OutputLocation;
use crate::domain::StewardError;
use std::time::Duration;
use uuid::Uuid;

/// What a successful unit export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Unit display name
    pub unit_name: String,

    /// Where the sink put the document
    pub location: OutputLocation,

    /// Communities covered (root plus descendants)
    pub communities: usize,

    /// Domains exported
    pub domains: usize,

    /// Assets exported
    pub assets: usize,
}

/// Result of one unit's export attempt
#[derive(Debug)]
pub enum ExportResult {
    Success {
        unit_name: String,
        location: OutputLocation,
    },
    Failure {
        unit_name: String,
        error: StewardError,
    },
}

impl ExportResult {
    pub fn unit_name(&self) -> &str {
        match self {
            ExportResult::Success { unit_name, .. } | ExportResult::Failure { unit_name, .. } => {
                unit_name
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExportResult::Success { .. })
    }

    /// The failure, if this unit failed
    pub fn error(&self) -> Option<&StewardError> {
        match self {
            ExportResult::Failure { error, .. } => Some(error),
            ExportResult::Success { .. } => None,
        }
    }
}

impl From<ExportOutcome> for ExportResult {
    fn from(outcome: ExportOutcome) -> Self {
        ExportResult::Success {
            unit_name: outcome.unit_name,
            location: outcome.location,
        }
    }
}

/// Summary of an export run
#[derive(Debug)]
pub struct ExportSummary {
    /// Correlates log lines of one run
    pub run_id: Uuid,

    /// One entry per unit, in input order
    pub results: Vec<ExportResult>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            results: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the results
    pub fn with_results(mut self, results: Vec<ExportResult>) -> Self {
        self.results = results;
        self
    }

    pub fn total_units(&self) -> usize {
        self.results.len()
    }

    pub fn successful_exports(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_exports(&self) -> usize {
        self.total_units() - self.successful_exports()
    }

    /// Failed results in input order
    pub fn failures(&self) -> impl Iterator<Item = &ExportResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed_exports() == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 100.0;
        }
        (self.successful_exports() as f64 / self.total_units() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total_units = self.total_units(),
            successful = self.successful_exports(),
            failed = self.failed_exports(),
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.is_successful() {
            tracing::warn!(
                error_count = self.failed_exports(),
                "Export completed with errors"
            );
            for result in self.failures() {
                if let Some(error) = result.error() {
                    tracing::warn!(unit = %result.unit_name(), error = %error, "Unit failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn success(name: &str) -> ExportResult {
        ExportResult::Success {
            unit_name: name.to_string(),
            location: OutputLocation {
                path: PathBuf::from(format!("export/{name}.json")),
                checksum: "00".to_string(),
                bytes: 2,
                written: true,
            },
        }
    }

    fn failure(name: &str) -> ExportResult {
        ExportResult::Failure {
            unit_name: name.to_string(),
            error: StewardError::Output("disk full".to_string()),
        }
    }

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new(Uuid::new_v4());

        assert_eq!(summary.total_units(), 0);
        assert_eq!(summary.successful_exports(), 0);
        assert_eq!(summary.failed_exports(), 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.is_successful());
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new(Uuid::new_v4()).with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_counters() {
        let summary = ExportSummary::new(Uuid::new_v4()).with_results(vec![
            success("A"),
            failure("B"),
            success("C"),
            success("D"),
        ]);

        assert_eq!(summary.total_units(), 4);
        assert_eq!(summary.successful_exports(), 3);
        assert_eq!(summary.failed_exports(), 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.success_rate(), 75.0);

        let failed: Vec<&str> = summary.failures().map(ExportResult::unit_name).collect();
        assert_eq!(failed, vec!["B"]);
    }

    #[test]
    fn test_outcome_into_result() {
        let outcome = ExportOutcome {
            unit_name: "Finance".to_string(),
            location: OutputLocation {
                path: PathBuf::from("export/Finance.json"),
                checksum: "ab".to_string(),
                bytes: 10,
                written: true,
            },
            communities: 2,
            domains: 3,
            assets: 4,
        };

        let result = ExportResult::from(outcome);
        assert!(result.is_success());
        assert_eq!(result.unit_name(), "Finance");
        assert!(result.error().is_none());
    }
}
