//! Configuration management for glcli

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page sizes offered by the limit toggle, in cycling order
pub const LIMIT_LADDER: [usize; 4] = [20, 50, 100, 200];

/// Next page size after `current`, wrapping to the smallest
pub fn next_limit(current: usize) -> usize {
    LIMIT_LADDER
        .iter()
        .copied()
        .find(|&limit| limit > current)
        .unwrap_or(LIMIT_LADDER[0])
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the GitLab instance
    #[serde(default = "default_gitlab_url")]
    pub gitlab_url: String,

    /// Personal access token
    #[serde(default)]
    pub token: String,

    /// Tracked project paths (`group/project`)
    #[serde(default)]
    pub projects: Vec<String>,

    /// Auto-refresh period in seconds (default: 5)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Maximum number of pipelines shown in the aggregated list (default: 50)
    #[serde(default = "default_pipeline_limit")]
    pub pipeline_limit: usize,
}

fn default_gitlab_url() -> String {
    "https://gitlab.com".to_string()
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_pipeline_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gitlab_url: default_gitlab_url(),
            token: String::new(),
            projects: Vec::new(),
            refresh_interval_secs: default_refresh_interval(),
            pipeline_limit: default_pipeline_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&content).context("Failed to parse config file")?;
        if config.refresh_interval_secs == 0 {
            config.refresh_interval_secs = default_refresh_interval();
        }
        if config.pipeline_limit == 0 {
            config.pipeline_limit = default_pipeline_limit();
        }
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific file. The file holds the access
    /// token, so it is only readable by the owner.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .context("Failed to restrict config file permissions")?;
        }
        Ok(())
    }

    /// Settings the UI is allowed to change
    pub fn settings(&self) -> Settings {
        Settings {
            projects: self.projects.clone(),
            refresh_interval: Duration::from_secs(self.refresh_interval_secs.max(1)),
            pipeline_limit: self.pipeline_limit,
        }
    }

    /// Copy UI-side settings back before saving
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.projects = settings.projects.clone();
        self.refresh_interval_secs = settings.refresh_interval.as_secs().max(1);
        self.pipeline_limit = settings.pipeline_limit;
    }
}

/// The part of the configuration owned by the running UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub projects: Vec<String>,
    pub refresh_interval: Duration,
    pub pipeline_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().settings()
    }
}

/// Get the base configuration directory (~/.glcli)
/// Falls back to ./.glcli if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".glcli")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".glcli"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure all required directories exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    std::fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}

/// First-run setup: ask for URL, token and projects, then save to `path`
pub fn run_setup_wizard<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: &Path,
) -> Result<Config> {
    let mut config = Config::default();

    writeln!(output, "No config found. Let's set up glcli!")?;

    let url = prompt(input, output, "GitLab URL [https://gitlab.com]: ")?;
    if !url.is_empty() {
        config.gitlab_url = url;
    }

    config.token = prompt(input, output, "Personal Access Token: ")?;

    let projects = prompt(
        input,
        output,
        "Projects (comma-separated, e.g. group/project1,group/project2): ",
    )?;
    config.projects = parse_project_list(&projects);

    config.save_to(path)?;
    writeln!(output, "Config saved to {}", path.display())?;
    Ok(config)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn parse_project_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
