use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings. Per-site behavior (timeouts, page caps, store
/// metadata) lives in [`crate::SiteConfig`] instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sites_path: PathBuf,
    pub output_path: PathBuf,
    /// Upper bound on task workers running at once, across all sites.
    pub max_concurrent_tasks: usize,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
}
