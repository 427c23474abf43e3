use crate::prelude::*;
use palmblog_core::endpoints::IssueRepository;
use palmblog_core::policy::FailurePolicy;
use palmblog_core::post::{transform_issue, transform_issues, BlogPost};

pub mod fetch;
pub mod list_posts;
pub mod read_post;

pub use fetch::{IssueFetcher, IssueLookup};

/// Value sent in the `User-Agent` header; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("palmblog/", env!("CARGO_PKG_VERSION"));

/// Accept header for the GitHub REST API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Blog configuration, resolved once at startup
#[derive(Clone)]
pub struct BlogConfig {
    pub repository: IssueRepository,
    pub token: Option<String>,
    pub on_failure: FailurePolicy,
}

impl std::fmt::Debug for BlogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogConfig")
            .field("repository", &self.repository)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("on_failure", &self.on_failure)
            .finish()
    }
}

impl BlogConfig {
    /// Build the configuration from the global CLI flags (and their env vars)
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            repository: IssueRepository::new(&global.api_base, &global.owner, &global.repo),
            token: global
                .token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            on_failure: global.on_failure,
        }
    }
}

/// Create an HTTP client with the GitHub headers and optional bearer auth
pub fn create_client(config: &BlogConfig) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT as UA};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(UA, HeaderValue::from_static(USER_AGENT));

    if let Some(token) = &config.token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Client(e.to_string()))
}

/// Outcome of reading a single post
#[derive(Debug, Clone, PartialEq)]
pub enum PostLookup {
    Found(BlogPost),
    NotFound,
    /// Only produced with [`FailurePolicy::Surface`].
    Failed(Error),
}

/// Fetch every published post, newest first
///
/// With [`FailurePolicy::Degrade`] any failure yields an empty list.
pub async fn list_posts(
    fetcher: &IssueFetcher,
    policy: FailurePolicy,
) -> Result<Vec<BlogPost>, Error> {
    match fetcher.fetch_issues().await {
        Ok(issues) => Ok(transform_issues(issues)),
        Err(e) => match policy {
            FailurePolicy::Degrade => {
                log::warn!("Error fetching blog posts, showing none: {e}");
                Ok(Vec::new())
            }
            FailurePolicy::Surface => Err(e),
        },
    }
}

/// Fetch a single post by issue number
///
/// Pull requests are reported as not found. With [`FailurePolicy::Degrade`]
/// failures are reported as not found too.
pub async fn get_post(fetcher: &IssueFetcher, number: &str, policy: FailurePolicy) -> PostLookup {
    match fetcher.fetch_issue(number).await {
        Ok(IssueLookup::Found(issue)) => match transform_issue(issue) {
            Some(post) => PostLookup::Found(post),
            None => {
                log::debug!("Issue {number} is a pull request, not a post");
                PostLookup::NotFound
            }
        },
        Ok(IssueLookup::NotFound) => PostLookup::NotFound,
        Err(e) => match policy {
            FailurePolicy::Degrade => {
                log::warn!("Error fetching blog post {number}: {e}");
                PostLookup::NotFound
            }
            FailurePolicy::Surface => PostLookup::Failed(e),
        },
    }
}
