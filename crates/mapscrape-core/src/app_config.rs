use std::path::PathBuf;
use std::time::Duration;

/// Fixed waits inserted after each browser interaction that triggers
/// asynchronous content loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    pub navigation: Duration,
    pub query_fill: Duration,
    pub query_submit: Duration,
    pub scroll: Duration,
    pub detail: Duration,
}

impl SettleDelays {
    /// All phases set to zero. Used by tests and dry runs against fakes.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            navigation: Duration::ZERO,
            query_fill: Duration::ZERO,
            query_submit: Duration::ZERO,
            scroll: Duration::ZERO,
            detail: Duration::ZERO,
        }
    }
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            navigation: Duration::from_millis(5000),
            query_fill: Duration::from_millis(3000),
            query_submit: Duration::from_millis(5000),
            scroll: Duration::from_millis(3000),
            detail: Duration::from_millis(5000),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub search_url: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub nav_timeout_secs: u64,
    pub settle: SettleDelays,
    pub scroll_step_px: f64,
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("search_url", &self.search_url)
            .field("input_path", &self.input_path)
            .field("output_dir", &self.output_dir)
            .field("nav_timeout_secs", &self.nav_timeout_secs)
            .field("settle", &self.settle)
            .field("scroll_step_px", &self.scroll_step_px)
            .field("headless", &self.headless)
            .field(
                "chrome_path",
                &self.chrome_path.as_ref().map(|p| p.display().to_string()),
            )
            .finish()
    }
}
