use std::path::PathBuf;

pub const DATA_DIR_ENV_VAR: &str = "NUTRISCAN_DATA_DIR";
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";
pub const DEFAULT_DATA_DIR: &str = ".nutriscan";
pub const DEFAULT_LOG_FILTER: &str = "nutriscan=info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding `profile.json` and `scans.json`.
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub json_logs: bool,
}

impl AppConfig {
    /// Reads configuration from the environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: lookup(DATA_DIR_ENV_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            json_logs: lookup(LOG_FORMAT_ENV_VAR)
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Installs the global tracing subscriber. Logs go to stderr so
    /// command output on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(&self.log_filter))
            .with_writer(std::io::stderr);
        if self.json_logs {
            builder.with_target(false).json().init();
        } else {
            builder.init();
        }
    }
}
