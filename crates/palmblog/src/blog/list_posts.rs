use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use palmblog_core::listing::{build_list_output, latest_posts, ListOutput, PostCard, LATEST_POSTS};
use palmblog_core::policy::{DatePolicy, FailurePolicy};
use prettytable::row;

use super::{list_posts, BlogConfig, IssueFetcher};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of posts per page
    #[arg(short, long, env = "PALMBLOG_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Only show the newest posts, like the landing page preview
    ///
    /// Always shows the 4 newest posts, so it cannot be combined with
    /// `--page` or `--limit`.
    #[arg(long, conflicts_with_all = ["page", "limit"])]
    pub latest: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let config = BlogConfig::from_global(&global);

    if global.verbose {
        eprintln!(
            "Fetching posts from {}/{} (on failure: {})",
            config.repository.owner, config.repository.repo, config.on_failure
        );
    }

    let spinner = (!options.json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Fetching blog posts...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let result = list_posts_data(config, &options, &global.date_policy()).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let output = result?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output, &options);
    }

    Ok(())
}

/// Fetches blog posts and returns one page of cards
pub async fn list_posts_data(
    config: BlogConfig,
    options: &ListOptions,
    dates: &DatePolicy,
) -> Result<ListOutput> {
    let policy: FailurePolicy = config.on_failure;
    let fetcher = IssueFetcher::new(config).context("Failed to set up the issue tracker client")?;

    let posts = list_posts(&fetcher, policy)
        .await
        .context("Failed to fetch blog posts")?;

    let (posts, page, limit) = if options.latest {
        let latest = latest_posts(&posts, LATEST_POSTS);
        (latest, 1, LATEST_POSTS)
    } else {
        (posts.as_slice(), options.page, options.limit)
    };

    build_list_output(posts, page, limit, dates).map_err(|e| eyre!("{}", e))
}

/// Convert list output to JSON string
fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_labels(card: &PostCard) -> String {
    card.labels
        .iter()
        .map(|label| label.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert list output to formatted text with colors
fn format_list_text(output: &ListOutput, options: &ListOptions) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    let heading = if options.latest {
        "LATEST INSIGHTS".to_string()
    } else {
        format!(
            "BLOG POSTS (Page {} of {})",
            pagination.current_page,
            pagination.total_pages.max(1)
        )
    };
    result.push_str(&format!("{}\n", heading.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.posts.is_empty() {
        result.push_str(&format!("\n{}\n", "No posts published yet.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(row![b => "#", "Title", "Published", "Labels"]);
    for card in &output.posts {
        table.add_row(row![
            card.number,
            card.title,
            card.published,
            format_labels(card)
        ]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    for card in &output.posts {
        result.push_str(&format!(
            "\n{} {}\n",
            format!("[{}]", card.number).yellow().bold(),
            card.title.white().bold()
        ));
        if let Some(cover) = &card.cover_image {
            result.push_str(&format!("    {}: {}\n", "Cover".green(), cover.as_str().cyan()));
        }
        result.push_str(&format!("    {}\n", card.excerpt.bright_black()));
        result.push_str(&format!(
            "    {}: {}\n",
            "Read".green(),
            format!("palmblog read {}", card.number).cyan()
        ));
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!(
        "{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_posts.to_string().bright_cyan().bold(),
        "total posts".bright_white()
    ));
    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }

    result
}

fn output_json(output: &ListOutput) -> Result<()> {
    let json = format_list_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ListOutput, options: &ListOptions) {
    print!("{}", format_list_text(output, options));
}
