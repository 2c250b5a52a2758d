//! Markdown rendering of analysis results.

use std::fmt;

use chrono::Utc;
use reviewlens_core::DEFAULT_PRODUCT_TITLE;
use reviewlens_sentiment::{AggregateResult, ChartData};

/// Longest sample body printed before eliding.
const SAMPLE_BODY_CHARS: usize = 280;

/// Render a markdown results report.
#[must_use]
pub(crate) fn render_markdown(result: &AggregateResult, charts: &ChartData, samples: usize) -> String {
    Report {
        result,
        charts,
        samples,
    }
    .to_string()
}

struct Report<'a> {
    result: &'a AggregateResult,
    charts: &'a ChartData,
    samples: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
        let title = result.product_title().unwrap_or(DEFAULT_PRODUCT_TITLE);

        writeln!(f, "# Results Report")?;
        writeln!(f)?;
        writeln!(f, "**Product**: {title}")?;
        writeln!(f, "**Generated**: {now}")?;
        writeln!(f, "**Model**: {}", result.model_name())?;
        writeln!(f, "**Overall sentiment**: {}", result.overall_sentiment())?;
        writeln!(
            f,
            "**Score**: {:.2} ({} band)",
            self.charts.score_indicator.value, self.charts.score_indicator.band
        )?;
        writeln!(f, "**Reviews analyzed**: {}", result.total())?;
        if result.failed_count() > 0 {
            writeln!(
                f,
                "**Unclassified**: {} (recorded as neutral)",
                result.failed_count()
            )?;
        }
        match result.average_confidence() {
            Some(avg) => writeln!(f, "**Average confidence**: {avg:.2}")?,
            None => writeln!(f, "**Average confidence**: n/a")?,
        }
        writeln!(f)?;

        if result.total() == 0 {
            return writeln!(f, "_No reviews found; showing the neutral default._");
        }

        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "## Sentiment Distribution")?;
        writeln!(f)?;
        writeln!(f, "| Sentiment | Count | Share |")?;
        writeln!(f, "|-----------|-------|-------|")?;
        for bucket in &self.charts.distribution {
            writeln!(
                f,
                "| {} | {} | {:.1}% |",
                bucket.label,
                bucket.count,
                bucket.share * 100.0
            )?;
        }

        let shown = result.samples(self.samples);
        if !shown.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Sample Reviews")?;
            writeln!(f)?;
            for (i, item) in shown.iter().enumerate() {
                let marker = if item.fallback { " (unclassified)" } else { "" };
                writeln!(
                    f,
                    "{}. **{}** ({:.2}){marker}: {}",
                    i + 1,
                    item.classification.label,
                    item.classification.confidence,
                    elide(&item.review.body, SAMPLE_BODY_CHARS)
                )?;
            }
        }
        Ok(())
    }
}

fn elide(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use reviewlens_core::Review;
    use reviewlens_sentiment::{LexiconClassifier, SentimentAggregator};

    use super::*;

    fn report_for(bodies: &[&str], samples: usize) -> String {
        let reviews: Vec<Review> = bodies
            .iter()
            .map(|b| Review::new(*b).with_product_title("Travel Mug"))
            .collect();
        let result = SentimentAggregator::default()
            .analyze(&LexiconClassifier::new(), &reviews)
            .unwrap();
        let charts = ChartData::from_result(&result);
        render_markdown(&result, &charts, samples)
    }

    #[test]
    fn report_lists_product_and_verdict() {
        let out = report_for(&["Love it, great mug", "Excellent", "Leaks everywhere"], 5);
        assert!(out.contains("**Product**: Travel Mug"));
        assert!(out.contains("**Overall sentiment**: positive"));
        assert!(out.contains("| positive | 2 | 66.7% |"));
        assert!(out.contains("| negative | 1 | 33.3% |"));
    }

    #[test]
    fn report_limits_sample_reviews() {
        let out = report_for(&["good", "bad", "nice", "awful"], 2);
        assert!(out.contains("1. **positive**"));
        assert!(out.contains("2. **negative**"));
        assert!(!out.contains("3. **"));
    }

    #[test]
    fn report_marks_unclassified_reviews() {
        let out = report_for(&["", "great"], 5);
        assert!(out.contains("**Unclassified**: 1"));
        assert!(out.contains("(unclassified)"));
    }

    #[test]
    fn empty_report_uses_default_title_and_note() {
        let out = report_for(&[], 5);
        assert!(out.contains(&format!("**Product**: {DEFAULT_PRODUCT_TITLE}")));
        assert!(out.contains("**Average confidence**: n/a"));
        assert!(out.contains("No reviews found"));
        assert!(!out.contains("## Sample Reviews"));
    }

    #[test]
    fn report_sections_appear_in_order() {
        let out = report_for(&["great", "awful"], 1);
        let positions: Vec<usize> = [
            "# Results Report",
            "**Average confidence**",
            "## Sentiment Distribution",
            "## Sample Reviews",
        ]
        .iter()
        .map(|heading| out.find(heading).expect(heading))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{out}");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn elide_shortens_long_bodies() {
        let long = "word ".repeat(100);
        let short = elide(&long, 20);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= 23);
    }
}
