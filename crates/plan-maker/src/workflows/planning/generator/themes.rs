use rand::seq::SliceRandom;
use rand::Rng;

use super::super::domain::{BusinessPlan, PlanCategory};
use super::super::novelty::NoveltyFilter;

/// Trend themes grouped under the category a generated plan is filed as.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    trends: Vec<(PlanCategory, Vec<&'static str>)>,
    business_models: Vec<&'static str>,
    target_markets: Vec<&'static str>,
}

/// Inputs steering one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelection {
    pub category: PlanCategory,
    pub theme: String,
    pub business_model: String,
    pub target_market: String,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThemeCatalog {
    pub fn standard() -> Self {
        Self {
            trends: vec![
                (
                    PlanCategory::AiMl,
                    vec![
                        "AI coaching personalization",
                        "Generative AI content optimization",
                        "AI data privacy compliance",
                        "AI code review automation",
                        "AI multimodal analytics",
                    ],
                ),
                (
                    PlanCategory::FinTech,
                    vec![
                        "Automated bookkeeping for small businesses",
                        "Cross-border payment optimization",
                        "DeFi lending platform",
                        "ESG investment advisory",
                        "Invoice financing automation",
                    ],
                ),
                (
                    PlanCategory::HealthTech,
                    vec![
                        "Remote patient monitoring",
                        "AI-assisted mental health support",
                        "Personalized nutrition management",
                        "Clinic operations optimization SaaS",
                        "Prescription decision support AI",
                    ],
                ),
                (
                    PlanCategory::Saas,
                    vec![
                        "Workforce management for small businesses",
                        "AI project management automation",
                        "Customer support automation platform",
                        "Subscription revenue optimization",
                        "Predictive inventory management",
                    ],
                ),
                (
                    PlanCategory::CleanTech,
                    vec![
                        "Corporate carbon footprint tracking",
                        "Renewable energy trading platform",
                        "Smart grid optimization",
                        "AI waste sorting and recycling",
                        "Energy consumption optimization SaaS",
                    ],
                ),
            ],
            business_models: vec![
                "Subscription model",
                "Freemium model",
                "Transaction fee model",
                "Marketplace model",
                "Enterprise licensing model",
                "Usage-based pricing model",
                "Hybrid model",
            ],
            target_markets: vec![
                "Small businesses (10-100 employees)",
                "Enterprises (1000+ employees)",
                "Startups and VC-backed companies",
                "Freelancers and sole proprietors",
                "Vertical industry niches",
                "General consumers (B2C)",
            ],
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = PlanCategory> + '_ {
        self.trends.iter().map(|(category, _)| *category)
    }

    pub fn themes(&self, category: PlanCategory) -> &[&'static str] {
        self.trends
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, themes)| themes.as_slice())
            .unwrap_or(&[])
    }

    /// Uniform draw of category, theme, business model, and target market.
    pub fn random_theme<R: Rng + ?Sized>(&self, rng: &mut R) -> ThemeSelection {
        let (category, themes) = self
            .trends
            .choose(rng)
            .map(|(category, themes)| (*category, themes.as_slice()))
            .unwrap_or((PlanCategory::Other, &[]));

        ThemeSelection {
            category,
            theme: pick(themes, rng, "General business automation"),
            business_model: pick(&self.business_models, rng, "Subscription model"),
            target_market: pick(&self.target_markets, rng, "Small businesses"),
        }
    }

    /// Draw themes until one is not a near duplicate of `history`, giving up after
    /// `attempts` draws and returning an unfiltered draw instead.
    pub fn select_theme<R: Rng + ?Sized>(
        &self,
        history: &[BusinessPlan],
        novelty: &NoveltyFilter,
        attempts: usize,
        rng: &mut R,
    ) -> ThemeSelection {
        for _ in 0..attempts {
            let selection = self.random_theme(rng);
            if !novelty.is_near_duplicate_theme(&selection.theme, history) {
                return selection;
            }
        }

        tracing::warn!(
            attempts,
            history = history.len(),
            "no novel theme found within budget; using unfiltered theme"
        );
        self.random_theme(rng)
    }
}

fn pick<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R, fallback: &str) -> String {
    options.choose(rng).copied().unwrap_or(fallback).to_string()
}
