//! Reconciliation orchestrator.
//!
//! Sequences fetch → plan → apply as hard sequence points: mutations
//! never start until both read phases completed, so a retry-exhausted
//! fetch aborts the run with nothing written.

use tracing::{error, info, warn};

use crate::client::LinearClient;
use crate::error::SyncError;
use crate::pagination::fetch_all;
use crate::planner::{build_label_index, build_plan, PlannedUpdate};
use crate::retry::{with_retry, RetryPolicy};
use crate::rules::LabelRequirementResolver;

/// Aggregate outcome of one reconciliation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncReport {
    /// Issues fetched from the workspace
    pub issues_seen: usize,
    /// Issues selected for update
    pub planned: usize,
    /// Updates the server accepted
    pub updated: usize,
    /// Updates that failed (transport exhaustion or rejection)
    pub failed: usize,
}

/// Drives one full reconciliation pass.
pub struct SyncEngine {
    client: LinearClient,
    resolver: Box<dyn LabelRequirementResolver + Send + Sync>,
    retry: RetryPolicy,
}

impl SyncEngine {
    /// Assemble an engine from its collaborators.
    #[must_use]
    pub fn new(
        client: LinearClient,
        resolver: Box<dyn LabelRequirementResolver + Send + Sync>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            resolver,
            retry,
        }
    }

    /// Run fetch → plan → apply once.
    ///
    /// # Errors
    /// Returns an error when either fetch phase exhausts its retries;
    /// per-issue mutation failures are counted in the report instead.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let issues = fetch_all(|cursor| self.client.list_issues_page(cursor), self.retry).await?;
        info!(count = issues.len(), "Fetched issues");

        let labels = fetch_all(|cursor| self.client.list_labels_page(cursor), self.retry).await?;
        info!(count = labels.len(), "Fetched workspace labels");

        let label_index = build_label_index(&labels);
        let plan = build_plan(&issues, &label_index, self.resolver.as_ref());
        info!(count = plan.len(), "Planned label updates");

        let mut report = SyncReport {
            issues_seen: issues.len(),
            planned: plan.len(),
            ..SyncReport::default()
        };

        for planned in &plan {
            self.apply(planned, &mut report).await;
        }

        info!(
            issues = report.issues_seen,
            planned = report.planned,
            updated = report.updated,
            failed = report.failed,
            "Reconciliation complete"
        );
        Ok(report)
    }

    /// Apply one planned update. Failures are recorded, never raised,
    /// so one issue cannot abort the batch.
    async fn apply(&self, planned: &PlannedUpdate, report: &mut SyncReport) {
        let issue = &planned.issue;

        let outcome = with_retry(
            || self.client.update_issue_labels(&issue.id, &planned.label_ids),
            self.retry,
        )
        .await;

        match outcome {
            Ok(outcome) if outcome.success => {
                let names: Vec<_> = outcome
                    .issue
                    .as_ref()
                    .map(|i| i.labels.iter().map(|l| l.name.as_str()).collect())
                    .unwrap_or_default();
                info!(issue = %issue.identifier, labels = ?names, "Updated issue labels");
                report.updated += 1;
            }
            // semantic rejection from the server, no further retries
            Ok(_) => {
                warn!(issue = %issue.identifier, "Server rejected label update");
                report.failed += 1;
            }
            Err(e) => {
                error!(issue = %issue.identifier, error = %e, "Label update failed");
                report.failed += 1;
            }
        }
    }
}
