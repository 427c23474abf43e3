use crate::prelude::*;
use clap::Parser;
use palmblog_core::policy::{DatePolicy, FailurePolicy, InvalidDateMode};

mod blog;
mod error;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Read the PalmIgnite blog, published as issues of a GitHub repository"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// GitHub REST API base URL
    #[clap(
        long,
        env = "PALMBLOG_API_BASE",
        global = true,
        default_value = "https://api.github.com"
    )]
    api_base: String,

    /// Owner of the blog repository
    #[clap(
        long,
        env = "PALMBLOG_OWNER",
        global = true,
        default_value = "palmignitecharcoaltrade"
    )]
    owner: String,

    /// Repository whose open issues are the blog posts
    #[clap(
        long,
        env = "PALMBLOG_REPO",
        global = true,
        default_value = "palmignite-charcoal-blogs"
    )]
    repo: String,

    /// GitHub token, sent as a bearer token to raise the rate limit
    #[clap(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// What to do when the issue tracker cannot be read: degrade, surface
    #[clap(
        long,
        env = "PALMBLOG_ON_FAILURE",
        global = true,
        default_value = "degrade"
    )]
    on_failure: FailurePolicy,

    /// How to render malformed timestamps: fail, placeholder
    #[clap(
        long,
        env = "PALMBLOG_INVALID_DATES",
        global = true,
        default_value = "fail"
    )]
    invalid_dates: InvalidDateMode,

    /// Text shown instead of a malformed date with `--invalid-dates placeholder`
    #[clap(
        long,
        env = "PALMBLOG_DATE_PLACEHOLDER",
        global = true,
        default_value = "Unknown date"
    )]
    date_placeholder: String,

    /// Whether to display additional information.
    #[clap(long, env = "PALMBLOG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn date_policy(&self) -> DatePolicy {
        DatePolicy::new(self.invalid_dates, self.date_placeholder.clone())
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List published blog posts, newest first
    List(crate::blog::list_posts::ListOptions),

    /// Read a single blog post by its issue number
    Read(crate::blog::read_post::ReadOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::blog::list_posts::run(options, app.global).await,
        SubCommands::Read(options) => crate::blog::read_post::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
