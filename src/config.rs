use serde_derive::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use svc_error::extension::sentry::Config as SentryConfig;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub(crate) listener_address: SocketAddr,
    pub(crate) metrics_listener_address: SocketAddr,
    pub(crate) sentry: Option<SentryConfig>,
    pub(crate) static_files: StaticFilesConfig,
    pub(crate) roster: RosterConfig,
    pub(crate) sheet: SheetConfig,
    /// Mounts `/debug` and puts the asset root into fallback error bodies.
    #[serde(default)]
    pub(crate) diagnostics: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StaticFilesConfig {
    pub(crate) root: PathBuf,
    #[serde(default = "default_index")]
    pub(crate) index: String,
}

impl StaticFilesConfig {
    pub(crate) fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }

    /// Anchors a relative root at `cwd`. Called once at startup.
    fn resolve(&mut self, cwd: &Path) {
        if self.root.is_relative() {
            self.root = cwd.join(&self.root);
        }
    }
}

fn default_index() -> String {
    "index.html".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct RosterConfig {
    pub(crate) url: String,
    #[serde(with = "humantime_serde")]
    pub(crate) timeout: Duration,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SheetConfig {
    pub(crate) url: String,
    #[serde(with = "humantime_serde")]
    pub(crate) timeout: Duration,
}

pub(crate) fn load() -> Result<Config, config::ConfigError> {
    let mut config = config::Config::builder()
        .add_source(config::File::with_name("signin"))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize::<Config>()?;

    let cwd = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to get cwd: {e}")))?;
    config.static_files.resolve(&cwd);

    Ok(config)
}
