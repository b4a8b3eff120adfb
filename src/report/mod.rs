//! Result aggregation and output projections.
//!
//! A scan produces one [`Finding`] per executed check. [`ScanReport`] holds
//! that batch and derives the two output views from it: the dashboard view
//! (summaries plus the flagged items of terse checks) and the report view
//! (summaries plus full detail listings for the measuring checks). Both are
//! projections of the same findings, so the dashboard never shows a line the
//! report lacks.

mod tips;

pub use tips::{Tip, TipStyle};

use crate::model::{CheckId, Finding, Metadata, Status};
use crate::parser::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate pass/fail counts over a finding batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of checks that produced a finding
    pub total: usize,

    /// Number of findings with pass status
    pub passed: usize,

    /// Number of findings with fail or warn status
    pub failed: usize,
}

impl ScanStats {
    /// Percentage of checks that passed, `0.0` for an empty batch.
    pub fn pass_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }

    /// True when every executed check passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// The complete result of scanning one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Profile the scan ran under
    pub profile: Profile,

    /// Metadata of the scanned document
    pub metadata: Metadata,

    /// When the scan ran
    pub generated_at: DateTime<Utc>,

    /// One finding per executed check, in display order
    pub findings: Vec<Finding>,
}

impl ScanReport {
    /// Create a report from a finding batch.
    pub fn new(profile: Profile, metadata: Metadata, findings: Vec<Finding>) -> Self {
        Self {
            profile,
            metadata,
            generated_at: Utc::now(),
            findings,
        }
    }

    /// Look up the finding of a specific check, if it ran.
    pub fn finding(&self, check: CheckId) -> Option<&Finding> {
        self.findings.iter().find(|f| f.check == check)
    }

    /// Aggregate counts over the batch.
    pub fn stats(&self) -> ScanStats {
        let total = self.findings.len();
        let passed = self
            .findings
            .iter()
            .filter(|f| f.status == Status::Pass)
            .count();
        ScanStats {
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Dashboard projection: every summary line, plus flagged detail lines
    /// for the checks whose details are terse enough for at-a-glance output.
    pub fn dashboard_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for finding in &self.findings {
            lines.push(finding.marked_summary());
            if finding.check.dashboard_details() {
                for detail in finding.flagged_details() {
                    lines.push(format!("  - {}", detail.text));
                }
            }
        }
        lines
    }

    /// Report projection: every summary line, plus the complete detail
    /// listing (passing items included) for the measuring checks and the
    /// flagged details of everything else.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for finding in &self.findings {
            lines.push(finding.marked_summary());
            if finding.check.detail_complete() {
                for detail in &finding.details {
                    lines.push(format!("  - {}", detail.text));
                }
            } else {
                for detail in finding.flagged_details() {
                    lines.push(format!("  - {}", detail.text));
                }
            }
        }
        lines
    }

    /// Remediation tips for the failing checks, in catalog order.
    ///
    /// Warnings are advisory and do not pull in tips; only hard failures do.
    pub fn tips(&self, style: TipStyle) -> Vec<Tip> {
        let failing: Vec<&str> = self
            .findings
            .iter()
            .filter(|f| f.status == Status::Fail)
            .map(|f| f.check.name())
            .collect();
        tips::tips_for(self.profile, &failing, style)
    }
}
