use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SRP_RUNNER_CONFIG";
/// Config file picked up from the working directory when nothing else is specified.
pub const DEFAULT_CONFIG_FILE: &str = "srp-runner.toml";
/// Placeholder replaced by the exercise identifier in `args`.
pub const ID_PLACEHOLDER: &str = "{id}";

/// How to invoke the test command for an exercise.
///
/// ```toml
/// program = "go"
/// args = ["test", "-v", "./lessons/{id}"]
/// working_dir = "."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            program: "go".to_string(),
            args: vec![
                "test".to_string(),
                "-v".to_string(),
                format!("./lessons/{}", ID_PLACEHOLDER),
            ],
            working_dir: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunnerConfig = toml::from_str(content).context("Invalid runner config")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Resolves the config: explicit path, then [`CONFIG_ENV`], then [`DEFAULT_CONFIG_FILE`]
    /// in the current directory, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve_from(explicit, env_path.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn resolve_from(
        explicit: Option<&Path>,
        from_env: Option<&Path>,
        fallback: &Path,
    ) -> Result<Self> {
        if let Some(path) = explicit.or(from_env) {
            debug!("loading runner config from {}", path.display());
            return Self::load(path);
        }
        if fallback.is_file() {
            debug!("loading runner config from {}", fallback.display());
            return Self::load(fallback);
        }
        debug!("using built-in runner config");
        Ok(Self::default())
    }
}
