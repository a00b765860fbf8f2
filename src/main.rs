use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use glcli::app::App;
use glcli::config::{self, Config};
use glcli::gitlab::{GitLabClient, GitLabService};
use glcli::logging;

/// Terminal dashboard for GitLab pipelines, jobs and merge requests
#[derive(Debug, Parser)]
#[command(name = "glcli", version, about)]
struct Cli {
    /// Config file to use instead of ~/.glcli/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// GitLab base URL for this session
    #[arg(long, env = "GITLAB_URL")]
    url: Option<String>,

    /// Personal access token for this session
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return Config::load_from(path);
    }
    if !io::stdin().is_terminal() {
        bail!(
            "No config found at {}; run glcli interactively to create one",
            path.display()
        );
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    config::run_setup_wizard(&mut input, &mut io::stdout(), path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config directory exists (creates logs dir too)
    config::ensure_directories()?;

    // Initialize file logging BEFORE any tracing calls
    let (log_file_info, _guard) = logging::init_file_logging(config::logs_dir())?;

    // Clean up old logs (7-day retention)
    if let Ok(count) = logging::cleanup_old_logs(&config::logs_dir()) {
        if count > 0 {
            tracing::info!("Cleaned up {} old log files", count);
        }
    }

    tracing::info!("Logging to: {}", log_file_info.path.display());

    let config_path = cli.config.unwrap_or_else(config::config_file_path);
    let config = load_config(&config_path)?;

    // Overrides apply to this session only; the file keeps its own values
    let url = cli.url.unwrap_or_else(|| config.gitlab_url.clone());
    let token = cli.token.or_else(|| Some(config.token.clone()));
    let client = GitLabClient::new(&url, token).context("Failed to create GitLab client")?;
    let service = Arc::new(GitLabService::new(Arc::new(client)));

    // Run the application
    let mut app = App::new(config, config_path, service)?;
    app.run().await
}
