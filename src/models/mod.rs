use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One review extracted from the panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Display name of the reviewer
    pub reviewer: String,
    /// Star rating, 1..=5
    pub rating: u8,
    /// Review body as rendered on the page, line breaks intact
    pub text: String,
    pub scraped_at: DateTime<Utc>,
}
