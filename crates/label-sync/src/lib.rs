//! Reconciles canonical labels on Linear issues against the
//! classification derived from each issue's project.
//!
//! Every issue with a resolvable project must carry two labels — a
//! core system label and a core area label — inferred from project
//! metadata. This crate fetches the full issue and label sets, infers
//! the requirements, plans the additive updates, and applies them with
//! retry. Other labels on an issue are never touched, and labels are
//! never created or removed.
//!
//! Runs are not guarded against each other: invoking two reconciliation
//! passes concurrently against the same workspace is last-writer-wins
//! and is an operational responsibility of the caller.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Many async API methods can fail

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod planner;
pub mod retry;
pub mod rules;
pub mod sync;

pub use client::LinearClient;
pub use config::{Config, ResolverMode};
pub use error::SyncError;
pub use models::{Issue, Label, Project};
pub use planner::{build_label_index, build_plan, PlannedUpdate};
pub use retry::{with_retry, RetryPolicy};
pub use rules::{
    infer_area_label, infer_system_label, LabelRequirement, LabelRequirementResolver,
    MappingResolver, StaticRangeResolver,
};
pub use sync::{SyncEngine, SyncReport};
