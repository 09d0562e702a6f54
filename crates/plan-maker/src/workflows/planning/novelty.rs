use serde::{Deserialize, Serialize};

use super::domain::BusinessPlan;
use super::similarity::{overlap, similarity};

/// Read-only view of a prior plan used for duplicate checks.
pub trait PlanFingerprint {
    fn title(&self) -> &str;
    fn tags(&self) -> &[String];
    fn solution(&self) -> &str;
}

impl PlanFingerprint for BusinessPlan {
    fn title(&self) -> &str {
        &self.title
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn solution(&self) -> &str {
        &self.solution
    }
}

/// Thresholds driving the novelty filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoveltyConfig {
    /// Title similarity at or above which a plan counts as a duplicate.
    pub title_similarity: f64,
    /// Tag overlap at or above which a plan counts as a duplicate.
    pub tag_overlap: f64,
    /// Theme similarity strictly above which a theme is rejected.
    pub theme_similarity: f64,
    /// Characters of the prior solution folded into the theme comparison text.
    pub solution_prefix_chars: usize,
}

impl Default for NoveltyConfig {
    fn default() -> Self {
        Self {
            title_similarity: 0.7,
            tag_overlap: 0.8,
            theme_similarity: 0.6,
            solution_prefix_chars: 200,
        }
    }
}

/// Why a candidate was matched against a prior plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "ratio", rename_all = "snake_case")]
pub enum DuplicateReason {
    TitleSimilarity(f64),
    TagOverlap(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    pub prior_title: String,
    pub reason: DuplicateReason,
}

/// Similarity-threshold filter keeping near-duplicate plans out of the corpus.
#[derive(Debug, Clone, Default)]
pub struct NoveltyFilter {
    config: NoveltyConfig,
}

impl NoveltyFilter {
    pub fn new(config: NoveltyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NoveltyConfig {
        &self.config
    }

    pub fn is_duplicate<P: PlanFingerprint>(
        &self,
        title: &str,
        tags: &[String],
        history: &[P],
    ) -> bool {
        self.duplicate_of(title, tags, history).is_some()
    }

    /// First prior plan the candidate collides with, in history order.
    pub fn duplicate_of<P: PlanFingerprint>(
        &self,
        title: &str,
        tags: &[String],
        history: &[P],
    ) -> Option<DuplicateMatch> {
        let candidate_tags = normalized_tags(tags);

        history.iter().find_map(|prior| {
            let title_ratio = similarity(title, prior.title());
            if title_ratio >= self.config.title_similarity {
                return Some(DuplicateMatch {
                    prior_title: prior.title().to_string(),
                    reason: DuplicateReason::TitleSimilarity(title_ratio),
                });
            }

            let tag_ratio = overlap(
                candidate_tags.iter().cloned(),
                normalized_tags(prior.tags()),
            );
            (tag_ratio >= self.config.tag_overlap).then(|| DuplicateMatch {
                prior_title: prior.title().to_string(),
                reason: DuplicateReason::TagOverlap(tag_ratio),
            })
        })
    }

    /// Pre-generation check of a theme against each prior plan's title, tags, and solution.
    pub fn is_near_duplicate_theme<P: PlanFingerprint>(&self, theme: &str, history: &[P]) -> bool {
        history.iter().any(|prior| {
            let comparison = self.theme_text(prior);
            similarity(theme, &comparison) > self.config.theme_similarity
        })
    }

    fn theme_text<P: PlanFingerprint>(&self, prior: &P) -> String {
        let solution_prefix: String = prior
            .solution()
            .chars()
            .take(self.config.solution_prefix_chars)
            .collect();
        format!(
            "{} {} {}",
            prior.title(),
            prior.tags().join(" "),
            solution_prefix
        )
    }
}

fn normalized_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Prior {
        title: String,
        tags: Vec<String>,
        solution: String,
    }

    impl PlanFingerprint for Prior {
        fn title(&self) -> &str {
            &self.title
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn solution(&self) -> &str {
            &self.solution
        }
    }

    fn prior(title: &str, tags: &[&str], solution: &str) -> Prior {
        Prior {
            title: title.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            solution: solution.to_string(),
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn empty_history_never_duplicates() {
        let filter = NoveltyFilter::default();
        let history: Vec<Prior> = Vec::new();
        assert!(!filter.is_duplicate("New plan", &tags(&["new"]), &history));
        assert!(!filter.is_near_duplicate_theme("AI coaching", &history));
    }

    #[test]
    fn matching_title_is_duplicate() {
        let filter = NoveltyFilter::default();
        let history = vec![prior("AI Business Plan", &["ai", "ml"], "")];

        let found = filter
            .duplicate_of("AI business plan", &tags(&["ai"]), &history)
            .expect("duplicate detected");

        assert_eq!(found.prior_title, "AI Business Plan");
        assert!(matches!(found.reason, DuplicateReason::TitleSimilarity(r) if r == 1.0));
    }

    #[test]
    fn overlapping_tags_are_duplicate_even_with_new_title() {
        let filter = NoveltyFilter::default();
        let history = vec![prior("Carbon Ledger", &["climate", "SaaS", "esg"], "")];

        let found = filter
            .duplicate_of(
                "Quarterly emissions cockpit",
                &tags(&["esg", "saas", " Climate "]),
                &history,
            )
            .expect("tag overlap detected");

        assert!(matches!(found.reason, DuplicateReason::TagOverlap(r) if r == 1.0));
    }

    #[test]
    fn distinct_plan_passes() {
        let filter = NoveltyFilter::default();
        let history = vec![prior("Carbon Ledger", &["climate", "esg"], "")];
        assert!(!filter.is_duplicate(
            "Pharmacy refill concierge",
            &tags(&["health", "retail"]),
            &history
        ));
    }

    #[test]
    fn theme_close_to_prior_plan_is_rejected() {
        let filter = NoveltyFilter::default();
        let history = vec![prior("Data privacy compliance", &[], "")];
        assert!(filter.is_near_duplicate_theme("Data privacy compliance", &history));
        assert!(!filter.is_near_duplicate_theme("Smart grid balancing", &history));
    }

    #[test]
    fn theme_text_truncates_solution_by_characters() {
        let filter = NoveltyFilter::new(NoveltyConfig {
            solution_prefix_chars: 3,
            ..NoveltyConfig::default()
        });
        let text = filter.theme_text(&prior("T", &["a", "b"], "ソリューション"));
        assert_eq!(text, "T a b ソリュ");
    }

    #[test]
    fn title_ratio_equal_to_threshold_is_duplicate() {
        assert_eq!(similarity("abcd", "bcda"), 0.75);
        let history = vec![prior("abcd", &[], "")];

        let at_threshold = NoveltyFilter::new(NoveltyConfig {
            title_similarity: 0.75,
            ..NoveltyConfig::default()
        });
        let found = at_threshold
            .duplicate_of("bcda", &[], &history)
            .expect("ratio at threshold matches");
        assert!(matches!(found.reason, DuplicateReason::TitleSimilarity(r) if r == 0.75));

        let above = NoveltyFilter::new(NoveltyConfig {
            title_similarity: 0.76,
            ..NoveltyConfig::default()
        });
        assert!(!above.is_duplicate("bcda", &[], &history));
    }

    #[test]
    fn tag_overlap_equal_to_threshold_is_duplicate() {
        let history = vec![prior("Carbon Ledger", &["a", "b", "c", "d"], "")];
        let candidate = tags(&["a", "b", "c"]);

        let at_threshold = NoveltyFilter::new(NoveltyConfig {
            tag_overlap: 0.75,
            ..NoveltyConfig::default()
        });
        let found = at_threshold
            .duplicate_of("Pharmacy refill concierge", &candidate, &history)
            .expect("overlap at threshold matches");
        assert!(matches!(found.reason, DuplicateReason::TagOverlap(r) if r == 0.75));

        let above = NoveltyFilter::new(NoveltyConfig {
            tag_overlap: 0.76,
            ..NoveltyConfig::default()
        });
        assert!(!above.is_duplicate("Pharmacy refill concierge", &candidate, &history));
    }

    #[test]
    fn theme_ratio_equal_to_threshold_is_not_rejected() {
        let history = vec![prior("bcda", &[], "")];
        let ratio = similarity("abcd", "bcda  ");
        assert_eq!(ratio, 0.6);

        let at_threshold = NoveltyFilter::new(NoveltyConfig {
            theme_similarity: ratio,
            ..NoveltyConfig::default()
        });
        assert!(!at_threshold.is_near_duplicate_theme("abcd", &history));

        let below = NoveltyFilter::new(NoveltyConfig {
            theme_similarity: 0.59,
            ..NoveltyConfig::default()
        });
        assert!(below.is_near_duplicate_theme("abcd", &history));
    }
}
