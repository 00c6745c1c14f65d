use thiserror::Error;

/// Fatal timeouts raised while driving the review panel.
///
/// Each variant carries the window that was configured for it, so the
/// diagnostic always names the value that actually applied.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(
        "review panel did not appear within {timeout_secs} seconds; \
         raise --page-timeout or pass 0 to wait indefinitely"
    )]
    PageLoadTimeout { timeout_secs: u64 },

    #[error(
        "sort menu did not appear within {timeout_secs} seconds; \
         raise --page-timeout or pass 0 to wait indefinitely"
    )]
    SortMenuTimeout { timeout_secs: u64 },

    #[error(
        "reviews were still loading after {timeout_secs} seconds; \
         raise --scroll-timeout or pass 0 to scroll until done"
    )]
    ScrollTimeout { timeout_secs: u64 },
}
