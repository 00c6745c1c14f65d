use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Browser launch parameters for the collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorOptions {
    /// Run Chrome without a visible window
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; autodetected when None
    pub chrome_path: Option<PathBuf>,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
        }
    }
}

/// Tunables for one load of a place page.
///
/// A timeout of zero disables that deadline entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Seconds to wait for the review panel after navigation
    pub page_timeout_secs: u64,
    /// Seconds allowed for the scroll-until-loaded loop
    pub scroll_timeout_secs: u64,
    /// Milliseconds between checks while polling the page
    pub poll_interval_ms: u64,
    /// Click the sort control and pick the "newest" entry before scrolling
    pub sort_by_newest: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            page_timeout_secs: 10,
            scroll_timeout_secs: 100,
            poll_interval_ms: 100,
            sort_by_newest: false,
        }
    }
}

impl LoadOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_load_options() {
        let opts = LoadOptions::default();
        assert_eq!(opts.page_timeout_secs, 10);
        assert_eq!(opts.scroll_timeout_secs, 100);
        assert_eq!(opts.poll_interval(), Duration::from_millis(100));
        assert!(!opts.sort_by_newest);
    }

    #[test]
    fn test_default_collector_options() {
        let opts = CollectorOptions::default();
        assert!(opts.headless);
        assert!(opts.chrome_path.is_none());
    }
}
