//! Linear entity type definitions.

use serde::{Deserialize, Serialize};

/// Linear issue representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier
    pub id: String,
    /// Human-readable identifier (e.g., "TSK-1")
    pub identifier: String,
    /// Issue title
    pub title: String,
    /// Labels on the issue
    #[serde(default, with = "connection")]
    pub labels: Vec<Label>,
    /// Project the issue belongs to
    #[serde(default)]
    pub project: Option<Project>,
}

/// Linear label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier
    pub id: String,
    /// Label name
    pub name: String,
}

/// Linear project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: String,
    /// Project name
    pub name: String,
    /// Dot-delimited project identifier (e.g., "234.5")
    #[serde(default)]
    pub identifier: Option<String>,
}

/// One page of a cursor-paginated connection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub nodes: Vec<T>,
    /// Cursor state
    pub page_info: PageInfo,
}

/// Pagination cursor state
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page exists
    pub has_next_page: bool,
    /// Opaque cursor for the next page
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Result of an issue label update mutation.
///
/// `success: false` with no transport error is a semantic rejection by
/// the server and is handled differently from a transport failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdateOutcome {
    /// Whether the server accepted the update
    pub success: bool,
    /// The issue as updated, when returned
    #[serde(default)]
    pub issue: Option<Issue>,
}

/// (De)serialize a GraphQL connection (`{ "nodes": [...] }`) as a plain list.
mod connection {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Nodes<T> {
        nodes: Vec<T>,
    }

    pub fn serialize<T, S>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize + Clone,
        S: Serializer,
    {
        Nodes {
            nodes: items.to_vec(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Nodes::deserialize(deserializer)?.nodes)
    }
}
