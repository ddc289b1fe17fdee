//! Label inference rules.
//!
//! Two mutually exclusive strategies resolve a project to the pair of
//! canonical labels its issues must carry: a static numeric-range
//! derivation from the project identifier, and a lookup table keyed by
//! project name. Both are pure; the strategy is picked at startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::SyncError;
use crate::models::Project;

/// The pair of canonical label names a project resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequirement {
    /// Core system label, e.g. "[200-299]"
    pub system_label: String,
    /// Core area label, e.g. "[34]"
    pub area_label: String,
}

/// Resolves a project to its label requirement.
///
/// `Ok(None)` means the project is not covered by this strategy and
/// the issue is skipped; an error means the project metadata is
/// malformed (callers skip the issue and log, never abort the batch).
pub trait LabelRequirementResolver {
    /// Resolve the requirement for one project.
    ///
    /// # Errors
    /// Returns [`SyncError::InvalidIdentifier`] for malformed project
    /// identifiers.
    fn resolve(&self, project: &Project) -> Result<Option<LabelRequirement>, SyncError>;
}

/// Leading dot-segment of a project identifier, with its 3-digit
/// system number parsed out.
fn parse_leading_segment(identifier: &str) -> Result<(&str, u32), SyncError> {
    let segment = identifier
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SyncError::InvalidIdentifier(identifier.to_string()))?;

    let prefix: String = segment.chars().take(3).collect();
    let number: u32 = prefix
        .parse()
        .map_err(|_| SyncError::InvalidIdentifier(identifier.to_string()))?;

    Ok((segment, number))
}

/// Infer the core system label from a project identifier.
///
/// The leading segment's 3-digit number is bucketed into its century:
/// "234.5" falls in [200-299].
///
/// # Errors
/// Returns [`SyncError::InvalidIdentifier`] when the identifier is
/// empty or its leading characters are not numeric.
pub fn infer_system_label(identifier: &str) -> Result<String, SyncError> {
    let (_, number) = parse_leading_segment(identifier)?;
    let lower = number / 100 * 100;
    let upper = lower + 99;
    Ok(format!("[{lower:03}-{upper:03}]"))
}

/// Infer the core area label from a project identifier.
///
/// Takes up to 3 characters of the leading segment starting at offset
/// 1 (skipping the leading digit); a short segment yields a shorter
/// code, e.g. "234.5" → "[34]".
///
/// # Errors
/// Returns [`SyncError::InvalidIdentifier`] when the identifier is
/// empty or its leading characters are not numeric.
pub fn infer_area_label(identifier: &str) -> Result<String, SyncError> {
    let (segment, _) = parse_leading_segment(identifier)?;
    let area: String = segment.chars().skip(1).take(3).collect();
    Ok(format!("[{area}]"))
}

/// Static numeric-range strategy, keyed by project identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRangeResolver;

impl LabelRequirementResolver for StaticRangeResolver {
    fn resolve(&self, project: &Project) -> Result<Option<LabelRequirement>, SyncError> {
        let Some(identifier) = project.identifier.as_deref() else {
            debug!(project = %project.name, "Project has no identifier, skipping");
            return Ok(None);
        };

        Ok(Some(LabelRequirement {
            system_label: infer_system_label(identifier)?,
            area_label: infer_area_label(identifier)?,
        }))
    }
}

/// One entry of the external mapping document.
#[derive(Debug, Clone, Deserialize)]
struct MappingEntry {
    #[serde(rename = "001 Core Systems")]
    system_label: String,
    #[serde(rename = "002 Core Areas")]
    area_label: String,
}

/// Lookup-table strategy, keyed by project name.
///
/// Projects absent from the table are skipped, not errors.
#[derive(Debug, Clone)]
pub struct MappingResolver {
    table: HashMap<String, LabelRequirement>,
}

impl MappingResolver {
    /// Load the mapping document from a JSON file.
    ///
    /// # Errors
    /// Returns error when the file is missing or malformed; this is a
    /// startup-fatal condition.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse mapping file {}", path.display()))
    }

    /// Parse the mapping document from a JSON string.
    ///
    /// # Errors
    /// Returns error when the document is not the expected
    /// name → `{ "001 Core Systems", "002 Core Areas" }` shape.
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: HashMap<String, MappingEntry> =
            serde_json::from_str(raw).context("Malformed mapping document")?;

        let table = entries
            .into_iter()
            .map(|(name, entry)| {
                (
                    name,
                    LabelRequirement {
                        system_label: entry.system_label,
                        area_label: entry.area_label,
                    },
                )
            })
            .collect();

        Ok(Self { table })
    }

    /// Number of mapped project names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl LabelRequirementResolver for MappingResolver {
    fn resolve(&self, project: &Project) -> Result<Option<LabelRequirement>, SyncError> {
        match self.table.get(&project.name) {
            Some(requirement) => Ok(Some(requirement.clone())),
            None => {
                debug!(project = %project.name, "Project not in mapping, skipping");
                Ok(None)
            }
        }
    }
}
