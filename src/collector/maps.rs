use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use headless_chrome::browser::tab::element::Element;
use headless_chrome::protocol::cdp::DOM::NodeId;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info};

use crate::collector::error::CollectError;
use crate::collector::types::{CollectorOptions, LoadOptions};
use crate::models::Review;

// Structural selectors for the Maps review panel, matching the markup this
// tool was written against. When Google ships new markup these stop matching
// and collection comes back empty.
const REVIEW_SELECTOR: &str = ".section-review-content";
const SCROLL_REGION_SELECTOR: &str =
    ".section-layout.section-scrollbox.scrollable-y.scrollable-show";
const LOADING_SELECTOR: &str = ".section-loading.noprint";
const EXPAND_SELECTOR: &str = ".section-expand-review.blue-link";
const SORT_CONTROL_SELECTOR: &str = "button[data-value=Sort]";
const SORT_MENU_ITEM_SELECTOR: &str = "li[role=menuitemradio]";
const REVIEWER_NAME_SELECTOR: &str = ".section-review-title span";
const RATING_SELECTOR: &str = ".section-review-stars";
const REVIEW_TEXT_SELECTOR: &str = ".section-review-text";

// The sort menu is positional: entry 1 is "newest" in every locale.
const SORT_NEWEST_INDEX: usize = 1;

/// Drives one Chrome session over a Google Maps place listing and
/// accumulates review elements as the panel lazy-loads them.
pub struct MapsReviewCollector {
    // Owns the Chrome process; the tab dies when this is dropped.
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
    reviews: Vec<NodeId>,
}

impl MapsReviewCollector {
    /// Launches Chrome and opens the tab all page loads go through.
    pub fn new(options: CollectorOptions) -> Result<Self> {
        info!(
            "Launching Chrome{}",
            if options.headless { " (headless)" } else { "" }
        );

        let mut builder = LaunchOptions::default_builder();
        builder.headless(options.headless);
        if options.headless {
            builder.window_size(Some((1920, 1080)));
        }
        if let Some(path) = options.chrome_path {
            builder.path(Some(path));
        }
        let launch_options = builder.build().context("Failed to build launch options")?;

        let browser = Browser::new(launch_options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab()?;

        Ok(Self {
            browser,
            tab,
            reviews: Vec::new(),
        })
    }

    /// Loads `url` and walks its review panel: wait for the panel, optionally
    /// re-sort by newest, scroll until nothing more loads, expand truncated
    /// entries, then append every review element to the collected set.
    ///
    /// Returns the number of reviews newly appended by this call.
    pub fn load_page(&mut self, url: &str, opts: &LoadOptions) -> Result<usize> {
        info!("Opening page {}", url);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;

        if self
            .await_element(REVIEW_SELECTOR, opts.page_timeout_secs, opts.poll_interval())
            .is_none()
        {
            return Err(CollectError::PageLoadTimeout {
                timeout_secs: opts.page_timeout_secs,
            }
            .into());
        }

        if opts.sort_by_newest {
            self.sort_by_newest(opts)?;
        }

        info!("Scrolling through reviews");
        self.scroll_to_exhaustion(opts)?;

        info!("Expanding long reviews");
        self.expand_truncated()?;

        let found = self.tab.find_elements(REVIEW_SELECTOR).unwrap_or_default();
        let before = self.reviews.len();
        self.reviews.extend(found.iter().map(|element| element.node_id));
        let added = self.reviews.len() - before;
        info!("Found {} reviews ({} collected in total)", added, self.reviews.len());

        Ok(added)
    }

    /// Number of reviews collected so far across all page loads.
    pub fn collected(&self) -> usize {
        self.reviews.len()
    }

    /// Reads reviewer, rating and text out of every collected element.
    ///
    /// Handles are resolved lazily and are only valid while the page they
    /// were collected from is still loaded; any missing sub-element aborts
    /// the whole extraction.
    pub fn extract_reviews(&self) -> Result<Vec<Review>> {
        let mut reviews = Vec::with_capacity(self.reviews.len());
        for &node_id in &self.reviews {
            let handle = Element::new(&self.tab, node_id)
                .context("Collected review is no longer attached to a loaded page")?;
            reviews.push(self.read_review(&handle)?);
        }
        Ok(reviews)
    }

    fn read_review(&self, handle: &Element<'_>) -> Result<Review> {
        let reviewer = handle
            .find_element(REVIEWER_NAME_SELECTOR)
            .context("Reviewer name missing from review")?
            .get_inner_text()?
            .trim()
            .to_string();

        let label = handle
            .find_element(RATING_SELECTOR)
            .context("Star rating missing from review")?
            .get_attribute_value("aria-label")?
            .ok_or_else(|| anyhow!("Star rating element has no aria-label"))?;
        let rating = parse_rating_label(&label)?;

        let text = handle
            .find_element(REVIEW_TEXT_SELECTOR)
            .context("Review text missing from review")?
            .get_inner_text()?;

        Ok(Review {
            reviewer,
            rating,
            text,
            scraped_at: Utc::now(),
        })
    }

    /// Opens the sort menu and picks the "newest" entry by position.
    fn sort_by_newest(&self, opts: &LoadOptions) -> Result<()> {
        info!("Sorting reviews by newest");
        let control = self
            .await_element(
                SORT_CONTROL_SELECTOR,
                opts.page_timeout_secs,
                opts.poll_interval(),
            )
            .ok_or(CollectError::SortMenuTimeout {
                timeout_secs: opts.page_timeout_secs,
            })?;
        control.click()?;

        if self
            .await_element(
                SORT_MENU_ITEM_SELECTOR,
                opts.page_timeout_secs,
                opts.poll_interval(),
            )
            .is_none()
        {
            return Err(CollectError::SortMenuTimeout {
                timeout_secs: opts.page_timeout_secs,
            }
            .into());
        }

        let entries = self.tab.find_elements(SORT_MENU_ITEM_SELECTOR)?;
        let newest = entries.get(SORT_NEWEST_INDEX).ok_or_else(|| {
            anyhow!(
                "Sort menu has {} entries, expected at least {}",
                entries.len(),
                SORT_NEWEST_INDEX + 1
            )
        })?;
        newest.click()?;

        Ok(())
    }

    /// Scrolls the review region to its bottom until the loading indicator
    /// stays gone, sleeping one poll interval between rounds.
    fn scroll_to_exhaustion(&self, opts: &LoadOptions) -> Result<()> {
        self.tab
            .find_element(SCROLL_REGION_SELECTOR)
            .context("Scrollable review region not found")?;

        let scroll_js = format!(
            "const region = document.querySelector('{}'); \
             if (region) region.scrollTop = region.scrollHeight;",
            SCROLL_REGION_SELECTOR
        );

        let deadline = deadline_after(opts.scroll_timeout_secs);
        loop {
            self.tab.evaluate(&scroll_js, false)?;

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(CollectError::ScrollTimeout {
                    timeout_secs: opts.scroll_timeout_secs,
                }
                .into());
            }

            if self.tab.find_element(LOADING_SELECTOR).is_err() {
                break;
            }
            thread::sleep(opts.poll_interval());
        }

        Ok(())
    }

    /// Clicks every expand control currently in the DOM. Controls that only
    /// appear after other entries are expanded are not picked up.
    fn expand_truncated(&self) -> Result<()> {
        let controls = self.tab.find_elements(EXPAND_SELECTOR).unwrap_or_default();
        debug!("Clicking {} expand controls", controls.len());
        for control in &controls {
            control.click()?;
        }
        Ok(())
    }

    /// Polls for `selector` until it appears or the timeout elapses. A
    /// timeout of zero polls forever.
    fn await_element(
        &self,
        selector: &str,
        timeout_secs: u64,
        poll: Duration,
    ) -> Option<Element<'_>> {
        let deadline = deadline_after(timeout_secs);
        loop {
            if let Ok(element) = self.tab.find_element(selector) {
                return Some(element);
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return None;
            }
            thread::sleep(poll);
        }
    }
}

fn deadline_after(timeout_secs: u64) -> Option<Instant> {
    (timeout_secs > 0).then(|| Instant::now() + Duration::from_secs(timeout_secs))
}

/// Parses the leading star count out of a rating accessibility label,
/// e.g. `" 5 stars "` -> 5.
fn parse_rating_label(label: &str) -> Result<u8> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse()
        .map_err(|_| anyhow!("No leading star count in rating label {:?}", label))
}
