//! GraphQL client for the Linear API.
//!
//! Only the three operations the reconciliation engine needs are
//! exposed: list issues (paged), list labels (paged), and update an
//! issue's label set.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::SyncError;
use crate::models::{Issue, IssueUpdateOutcome, Label, Page};

/// Linear API endpoint
const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// Issues fetched per page
pub const ISSUE_PAGE_SIZE: u32 = 50;

/// Labels fetched per page
pub const LABEL_PAGE_SIZE: u32 = 100;

/// Linear GraphQL client
#[derive(Debug, Clone)]
pub struct LinearClient {
    client: reqwest::Client,
    api_url: String,
}

/// GraphQL request body
#[derive(Debug, Serialize)]
struct GraphQLRequest<V: Serialize> {
    query: &'static str,
    variables: V,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

impl LinearClient {
    /// Create a new Linear client with access token.
    ///
    /// # Arguments
    /// * `access_token` - OAuth access token or Personal API key
    ///   - OAuth tokens: Use "Bearer" prefix (handled automatically)
    ///   - API keys (`lin_api_*`): Use token directly without prefix
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed
    pub fn new(access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        // Linear API keys (lin_api_*) should NOT use Bearer prefix
        // OAuth tokens should use Bearer prefix
        let auth_value = if access_token.starts_with("lin_api_") {
            access_token.to_string()
        } else {
            format!("Bearer {access_token}")
        };

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).context("Invalid access token")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: LINEAR_API_URL.to_string(),
        })
    }

    /// Create a client against a custom API URL (self-hosted proxies,
    /// mock servers in tests).
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed
    pub fn with_url(access_token: &str, api_url: &str) -> Result<Self> {
        let mut client = Self::new(access_token)?;
        client.api_url = api_url.to_string();
        Ok(client)
    }

    /// Execute a GraphQL query/mutation.
    ///
    /// Distinguishes three failure shapes: transport/status errors,
    /// a GraphQL error list, and a well-formed response carrying
    /// neither data nor errors.
    async fn execute<V: Serialize, R: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: V,
    ) -> Result<R, SyncError> {
        let request = GraphQLRequest { query, variables };

        let response = self.client.post(&self.api_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let gql_response: GraphQLResponse<R> = response.json().await?;

        if let Some(errors) = gql_response.errors {
            let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(SyncError::Graphql(messages.join(", ")));
        }

        gql_response.data.ok_or(SyncError::MissingData)
    }

    /// Fetch one page of issues, with labels and project metadata.
    #[instrument(skip(self))]
    pub async fn list_issues_page(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<Issue>, SyncError> {
        #[derive(Serialize)]
        struct Variables {
            first: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            after: Option<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            issues: Page<Issue>,
        }

        const QUERY: &str = r"
            query ListIssues($first: Int!, $after: String) {
                issues(first: $first, after: $after) {
                    nodes {
                        id
                        identifier
                        title
                        labels {
                            nodes {
                                id
                                name
                            }
                        }
                        project {
                            id
                            name
                            identifier
                        }
                    }
                    pageInfo {
                        hasNextPage
                        endCursor
                    }
                }
            }
        ";

        let response: Response = self
            .execute(
                QUERY,
                Variables {
                    first: ISSUE_PAGE_SIZE,
                    after: cursor,
                },
            )
            .await?;
        debug!(count = response.issues.nodes.len(), "Fetched issues page");
        Ok(response.issues)
    }

    /// Fetch one page of workspace labels.
    #[instrument(skip(self))]
    pub async fn list_labels_page(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<Label>, SyncError> {
        #[derive(Serialize)]
        struct Variables {
            first: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            after: Option<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueLabels")]
            issue_labels: Page<Label>,
        }

        const QUERY: &str = r"
            query ListLabels($first: Int!, $after: String) {
                issueLabels(first: $first, after: $after) {
                    nodes {
                        id
                        name
                    }
                    pageInfo {
                        hasNextPage
                        endCursor
                    }
                }
            }
        ";

        let response: Response = self
            .execute(
                QUERY,
                Variables {
                    first: LABEL_PAGE_SIZE,
                    after: cursor,
                },
            )
            .await?;
        debug!(
            count = response.issue_labels.nodes.len(),
            "Fetched labels page"
        );
        Ok(response.issue_labels)
    }

    /// Replace an issue's label set.
    ///
    /// A semantic rejection (`success: false`) is returned in the
    /// outcome, not raised, so the caller can tell it apart from a
    /// transport failure.
    #[instrument(skip(self, label_ids), fields(issue_id = %issue_id))]
    pub async fn update_issue_labels(
        &self,
        issue_id: &str,
        label_ids: &[String],
    ) -> Result<IssueUpdateOutcome, SyncError> {
        #[derive(Serialize)]
        struct Variables<'a> {
            id: &'a str,
            #[serde(rename = "labelIds")]
            label_ids: &'a [String],
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueUpdate")]
            issue_update: IssueUpdateOutcome,
        }

        const MUTATION: &str = r"
            mutation UpdateIssueLabels($id: String!, $labelIds: [String!]!) {
                issueUpdate(id: $id, input: { labelIds: $labelIds }) {
                    success
                    issue {
                        id
                        identifier
                        title
                        labels {
                            nodes {
                                id
                                name
                            }
                        }
                    }
                }
            }
        ";

        let response: Response = self
            .execute(
                MUTATION,
                Variables {
                    id: issue_id,
                    label_ids,
                },
            )
            .await?;
        Ok(response.issue_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let result = LinearClient::new("test-token");
        assert!(result.is_ok());
    }

    #[test]
    fn test_graphql_request_serialization() {
        #[derive(Serialize)]
        struct TestVars {
            id: String,
        }

        let request = GraphQLRequest {
            query: "query { test }",
            variables: TestVars {
                id: "test-id".to_string(),
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("query"));
        assert!(json.contains("test-id"));
    }

    #[test]
    fn test_cursor_omitted_when_absent() {
        #[derive(Serialize)]
        struct Variables {
            first: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            after: Option<String>,
        }

        let json = serde_json::to_string(&Variables {
            first: 50,
            after: None,
        })
        .unwrap();
        assert!(!json.contains("after"));
    }
}
