/// Query string used for the post list: open issues, newest first
pub const LIST_ISSUES_QUERY: &str = "state=open&sort=created&direction=desc";

/// Repository whose issues are published as blog posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRepository {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
}

impl IssueRepository {
    pub fn new(
        api_base: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// `GET /repos/{owner}/{repo}/issues?state=open&sort=created&direction=desc`
    pub fn list_issues_url(&self) -> String {
        format!("{}/issues?{LIST_ISSUES_QUERY}", self.repo_url())
    }

    /// `GET /repos/{owner}/{repo}/issues/{number}`
    ///
    /// `encoded_number` must already be a single, percent-encoded path segment.
    pub fn issue_url(&self, encoded_number: &str) -> String {
        format!("{}/issues/{encoded_number}", self.repo_url())
    }
}
