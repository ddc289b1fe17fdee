//! Reconciliation planner.
//!
//! Compares each issue's current labels against the labels its project
//! requires and computes the additive updates to submit. Labels are
//! only ever added; required labels missing from the workspace are
//! skipped with a warning, never created.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{Issue, Label};
use crate::rules::LabelRequirementResolver;

/// One planned mutation: the full label-id set `issue` should end up
/// with.
#[derive(Debug, Clone)]
pub struct PlannedUpdate {
    /// Issue to update
    pub issue: Issue,
    /// Target label ids (existing ∪ required), in submission order
    pub label_ids: Vec<String>,
}

/// Build the immutable label name → id index for one run.
#[must_use]
pub fn build_label_index(labels: &[Label]) -> HashMap<String, String> {
    labels
        .iter()
        .map(|l| (l.name.clone(), l.id.clone()))
        .collect()
}

/// Compute the set of issues needing a label update.
///
/// Issues without a project, or whose project the resolver does not
/// cover, are logged and excluded. A malformed project identifier
/// skips that issue only, never the batch.
#[must_use]
pub fn build_plan(
    issues: &[Issue],
    label_index: &HashMap<String, String>,
    resolver: &dyn LabelRequirementResolver,
) -> Vec<PlannedUpdate> {
    let mut plan = Vec::new();

    for issue in issues {
        let Some(project) = &issue.project else {
            debug!(issue = %issue.identifier, "Issue has no project, skipping");
            continue;
        };

        let requirement = match resolver.resolve(project) {
            Ok(Some(requirement)) => requirement,
            Ok(None) => continue,
            Err(e) => {
                warn!(issue = %issue.identifier, error = %e, "Skipping issue with unresolvable project");
                continue;
            }
        };

        let current_names: HashSet<&str> =
            issue.labels.iter().map(|l| l.name.as_str()).collect();
        let required = [&requirement.system_label, &requirement.area_label];

        if required.iter().all(|name| current_names.contains(name.as_str())) {
            continue;
        }

        // Monotonic union: existing ids first, then each required label
        // the workspace actually has.
        let mut target_ids: Vec<String> = issue.labels.iter().map(|l| l.id.clone()).collect();
        for name in required {
            if current_names.contains(name.as_str()) {
                continue;
            }
            match label_index.get(name.as_str()) {
                Some(id) => {
                    if !target_ids.contains(id) {
                        target_ids.push(id.clone());
                    }
                }
                None => {
                    warn!(issue = %issue.identifier, label = %name, "Required label does not exist in workspace");
                }
            }
        }

        // Size-only change signal: exact under add-only semantics.
        if target_ids.len() != issue.labels.len() {
            plan.push(PlannedUpdate {
                issue: issue.clone(),
                label_ids: target_ids,
            });
        }
    }

    plan
}
