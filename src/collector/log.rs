use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::Review;

/// Replaces every embedded newline with a single space.
///
/// One space per newline; runs of blank lines are not collapsed.
pub fn flatten(text: &str) -> String {
    text.replace('\n', " ")
}

/// Renders the review set as three lines per entry, in collection order:
/// reviewer name, star rating, flattened review text. No header, no blank
/// separators.
pub fn render(reviews: &[Review]) -> String {
    let mut out = String::new();
    for review in reviews {
        out.push_str(&review.reviewer);
        out.push('\n');
        out.push_str(&review.rating.to_string());
        out.push('\n');
        out.push_str(&flatten(&review.text));
        out.push('\n');
    }
    out
}

/// Truncates `path` and writes the full review set to it in one shot.
pub async fn write_reviews(path: &Path, reviews: &[Review]) -> Result<()> {
    tokio::fs::write(path, render(reviews))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("💾 Saved {} reviews to {}", reviews.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(reviewer: &str, rating: u8, text: &str) -> Review {
        Review {
            reviewer: reviewer.to_string(),
            rating,
            text: text.to_string(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_flatten_replaces_newlines_with_spaces() {
        assert_eq!(flatten("Great food\nGreat service"), "Great food Great service");
    }

    #[test]
    fn test_flatten_does_not_collapse_blank_lines() {
        assert_eq!(flatten("a\n\nb"), "a  b");
        assert_eq!(flatten("no newlines here"), "no newlines here");
    }

    #[test]
    fn test_render_writes_three_lines_per_review() {
        let reviews = vec![
            review("Ada", 5, "Loved it"),
            review("Grace", 4, "Would come\nback"),
        ];

        let rendered = render(&reviews);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec!["Ada", "5", "Loved it", "Grace", "4", "Would come back"]
        );
    }

    #[test]
    fn test_render_of_nothing_is_empty() {
        assert!(render(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_write_truncates_existing_content() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("reviews.txt");
        tokio::fs::write(&path, "stale content that should disappear\n").await?;

        write_reviews(&path, &[review("Ada", 5, "Loved it")]).await?;

        let contents = tokio::fs::read_to_string(&path).await?;
        assert_eq!(contents, "Ada\n5\nLoved it\n");
        Ok(())
    }
}
