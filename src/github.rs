use crate::error::CardError;
use crate::types::{RawLanguageEdge, RepositoryLanguages, UserStats};
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;

/// Commit count, pull request count, and per-repository languages for one login.
///
/// Up to 100 owned non-fork repositories, most recently updated first, each with its
/// 10 largest languages.
const USER_STATS_QUERY: &str = r#"
query userInfo($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
    }
    pullRequests(first: 1) {
      totalCount
    }
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node {
              color
              name
            }
          }
        }
      }
    }
  }
}
"#;

/// Source of the aggregate numbers drawn on the card.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_user_stats(&self, login: &str) -> Result<UserStats, CardError>;
}

pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> anyhow::Result<Self> {
        Self::build(token, None)
    }

    /// Client for a GitHub API served somewhere other than `api.github.com`.
    pub fn with_base_uri(token: Option<String>, base_uri: &str) -> anyhow::Result<Self> {
        Self::build(token, Some(base_uri))
    }

    fn build(token: Option<String>, base_uri: Option<&str>) -> anyhow::Result<Self> {
        // One card, one GraphQL request: octocrab retries by default.
        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if let Some(base_uri) = base_uri {
            builder = builder.base_uri(base_uri)?;
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

#[async_trait]
impl StatsSource for GitHubClient {
    async fn fetch_user_stats(&self, login: &str) -> Result<UserStats, CardError> {
        let payload = json!({
            "query": USER_STATS_QUERY,
            "variables": { "login": login },
        });

        let response: GraphQlResponse = self.octocrab.graphql(&payload).await?;
        response.into_user_stats(login)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
    pull_requests: CountObj,
    repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    total_commit_contributions: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountObj {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryConnection {
    #[serde(default)]
    nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    languages: Option<LanguageConnection>,
}

#[derive(Debug, Deserialize)]
struct LanguageConnection {
    #[serde(default)]
    edges: Vec<Option<LanguageEdge>>,
}

#[derive(Debug, Deserialize)]
struct LanguageEdge {
    size: u64,
    node: LanguageNode,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
    color: Option<String>,
}

impl GraphQlResponse {
    fn into_user_stats(self, login: &str) -> Result<UserStats, CardError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(CardError::Upstream(format!(
                "GraphQL reported errors: {}",
                messages.join("; ")
            )));
        }

        let user = self
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| CardError::Upstream(format!("No user data returned for {login}")))?;

        let repositories = user
            .repositories
            .nodes
            .into_iter()
            .flatten()
            .map(|repo| RepositoryLanguages {
                edges: repo
                    .languages
                    .map(|langs| langs.edges)
                    .unwrap_or_default()
                    .into_iter()
                    .flatten()
                    .map(|edge| RawLanguageEdge {
                        size: edge.size,
                        name: edge.node.name,
                        color: edge.node.color,
                    })
                    .collect(),
            })
            .collect();

        Ok(UserStats {
            commits: user.contributions_collection.total_commit_contributions,
            pull_requests: user.pull_requests.total_count,
            repositories,
        })
    }
}
