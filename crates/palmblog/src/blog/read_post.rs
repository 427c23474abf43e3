use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use palmblog_core::listing::{build_post_detail, PostDetail};
use palmblog_core::policy::DatePolicy;

use super::{get_post, BlogConfig, IssueFetcher, PostLookup};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReadOptions {
    /// Issue number of the post (e.g., "12")
    #[clap(env = "PALMBLOG_POST")]
    pub number: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    let config = BlogConfig::from_global(&global);

    if global.verbose {
        eprintln!("Fetching post: {}", options.number);
    }

    let spinner = (!options.json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Fetching post {}...", options.number));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let result = read_post_data(config, &options.number, &global.date_policy()).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let detail = result?.ok_or_else(|| eyre!("Post {} not found", options.number))?;

    if options.json {
        output_json(&detail)?;
    } else {
        print!("{}", format_post_text(&detail));
    }

    Ok(())
}

/// Fetches a single post and returns its detail view, or `None` if it does
/// not exist
pub async fn read_post_data(
    config: BlogConfig,
    number: &str,
    dates: &DatePolicy,
) -> Result<Option<PostDetail>> {
    let policy = config.on_failure;
    let fetcher = IssueFetcher::new(config).context("Failed to set up the issue tracker client")?;

    match get_post(&fetcher, number, policy).await {
        PostLookup::Found(post) => build_post_detail(&post, dates)
            .map(Some)
            .map_err(|e| eyre!("Failed to render post {}: {}", number, e)),
        PostLookup::NotFound => Ok(None),
        PostLookup::Failed(e) => Err(e).context(format!("Failed to fetch post {number}")),
    }
}

/// Convert post detail to JSON string
fn format_post_json(detail: &PostDetail) -> Result<String> {
    serde_json::to_string_pretty(detail).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Build formatted text output for a post
fn format_post_text(detail: &PostDetail) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}: {}\n",
        "POST".bright_cyan().bold(),
        detail.title.white().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {}\n",
        "Author".green(),
        detail.author.login.bright_white()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Published".green(),
        detail.published.bright_black()
    ));
    if detail.updated != detail.published {
        result.push_str(&format!(
            "{}: {}\n",
            "Updated".green(),
            detail.updated.bright_black()
        ));
    }
    if !detail.labels.is_empty() {
        let labels = detail
            .labels
            .iter()
            .map(|label| label.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        result.push_str(&format!("{}: {}\n", "Labels".green(), labels.bright_magenta()));
    }
    if let Some(cover) = &detail.cover_image {
        result.push_str(&format!("{}: {}\n", "Cover".green(), cover.as_str().cyan()));
    }
    result.push_str(&format!(
        "{}: {}\n",
        "URL".green(),
        detail.url.cyan().underline()
    ));

    match detail.body.as_deref() {
        Some(body) if !body.trim().is_empty() => {
            result.push_str(&format!("\n{}\n", body.trim_end()));
        }
        _ => result.push_str(&format!("\n{}\n", "(This post has no content.)".yellow())),
    }

    result
}

fn output_json(detail: &PostDetail) -> Result<()> {
    let json = format_post_json(detail)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::fetch::tests::{issue_json, test_config, unreachable_config};
    use palmblog_core::issue::{IssueLabel, IssueUser};
    use palmblog_core::policy::FailurePolicy;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_detail(body: Option<&str>) -> PostDetail {
        PostDetail {
            number: 12,
            title: "New kiln in Sumatra".to_string(),
            author: IssueUser {
                login: "palmignite".to_string(),
                avatar_url: "https://avatars.example/u/7".to_string(),
            },
            published: "March 5, 2024".to_string(),
            updated: "March 6, 2024".to_string(),
            cover_image: None,
            labels: vec![IssueLabel {
                name: "operations".to_string(),
                color: "1d76db".to_string(),
            }],
            body: body.map(str::to_string),
            url: "https://github.com/acme/blog/issues/12".to_string(),
        }
    }

    #[test]
    fn test_format_post_text_full() {
        colored::control::set_override(false);

        let text = format_post_text(&create_test_detail(Some("Our second kiln is running.")));

        assert!(text.contains("POST: New kiln in Sumatra"));
        assert!(text.contains("Author: palmignite"));
        assert!(text.contains("Published: March 5, 2024"));
        assert!(text.contains("Updated: March 6, 2024"));
        assert!(text.contains("Labels: operations"));
        assert!(text.contains("Our second kiln is running."));
    }

    #[test]
    fn test_format_post_text_without_body() {
        colored::control::set_override(false);

        let text = format_post_text(&create_test_detail(None));

        assert!(text.contains("(This post has no content.)"));
    }

    #[test]
    fn test_format_post_json() {
        let json = format_post_json(&create_test_detail(Some("Body"))).unwrap();

        assert!(json.contains("\"number\": 12"));
        assert!(json.contains("\"cover_image\": null"));
        assert!(json.contains("\"published\": \"March 5, 2024\""));
    }

    #[tokio::test]
    async fn test_read_post_data_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/blog/issues/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue_json(12)))
            .mount(&server)
            .await;

        let detail = read_post_data(test_config(&server.uri(), None), "12", &DatePolicy::Fail)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.number, 12);
        assert_eq!(detail.published, "March 5, 2024");
        assert_eq!(detail.updated, "March 6, 2024");
        assert_eq!(
            detail.cover_image.map(String::from),
            Some("https://x/12.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_read_post_data_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let detail = read_post_data(test_config(&server.uri(), None), "77", &DatePolicy::Fail)
            .await
            .unwrap();

        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_read_post_data_invalid_timestamp() {
        let server = MockServer::start().await;
        let mut issue = issue_json(5);
        issue["created_at"] = serde_json::json!("last tuesday");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue.clone()))
            .mount(&server)
            .await;

        let failed =
            read_post_data(test_config(&server.uri(), None), "5", &DatePolicy::Fail).await;
        assert!(failed.unwrap_err().to_string().contains("invalid timestamp"));

        let placeholder = DatePolicy::Placeholder("Unknown date".to_string());
        let detail = read_post_data(test_config(&server.uri(), None), "5", &placeholder)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.published, "Unknown date");
    }

    #[tokio::test]
    async fn test_read_post_data_surfaced_failure() {
        let mut config = unreachable_config();
        config.on_failure = FailurePolicy::Surface;

        let result = read_post_data(config, "1", &DatePolicy::Fail).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_post_data_degraded_failure_is_none() {
        let result = read_post_data(unreachable_config(), "1", &DatePolicy::Fail)
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
