//! Plan drafting: theme selection, prompting an external writer, and the template fallback.

mod fallback;
mod themes;
mod writer;

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{BusinessPlan, FinancialProjection, MarketAnalysis, PlanCategory, PlanId};
use super::novelty::{NoveltyConfig, NoveltyFilter};

pub use themes::{ThemeCatalog, ThemeSelection};
pub use writer::{CliPlanWriter, PlanWriter};

/// Knobs for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Theme draws tried before accepting an unfiltered theme.
    pub theme_attempts: usize,
    /// Regenerations allowed when a finished plan duplicates history.
    pub duplicate_retries: u32,
    pub novelty: NoveltyConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            theme_attempts: 10,
            duplicate_retries: 1,
            novelty: NoveltyConfig::default(),
        }
    }
}

/// Plan body as returned by the writer, before identity and scores are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDraft {
    pub title: String,
    pub problem_statement: String,
    pub solution: String,
    pub value_proposition: String,
    pub business_model: String,
    pub market_analysis: MarketAnalysis,
    pub financial_projection: FinancialProjection,
    #[serde(default)]
    pub key_milestones: Vec<String>,
    #[serde(default)]
    pub team_requirements: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub mitigation_strategies: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PlanDraft {
    /// Attach a fresh id, the current timestamp, and zeroed scores.
    pub fn into_plan(self, category: PlanCategory, iteration: u32) -> BusinessPlan {
        BusinessPlan {
            id: PlanId::generate(),
            title: self.title,
            category,
            created_at: Utc::now(),
            iteration,
            problem_statement: self.problem_statement,
            solution: self.solution,
            value_proposition: self.value_proposition,
            business_model: self.business_model,
            market_analysis: self.market_analysis,
            financial_projection: self.financial_projection,
            key_milestones: self.key_milestones,
            team_requirements: self.team_requirements,
            risk_factors: self.risk_factors,
            mitigation_strategies: self.mitigation_strategies,
            feasibility_score: 0.0,
            profitability_score: 0.0,
            innovation_score: 0.0,
            overall_score: 0.0,
            reasoning: self.reasoning,
            references: self.references,
            tags: self.tags,
        }
    }
}

/// Failures talking to the writer or decoding its output.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("plan writer `{command}` is not installed")]
    WriterUnavailable { command: String },
    #[error("plan writer `{command}` failed: {stderr}")]
    WriterFailed { command: String, stderr: String },
    #[error("plan writer `{command}` did not finish within {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },
    #[error("plan writer io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("plan draft is not valid JSON: {0}")]
    InvalidDraft(#[from] serde_json::Error),
}

/// Produces new, unscored plans that steer clear of the existing corpus.
pub struct PlanGenerator<W> {
    writer: Arc<W>,
    catalog: ThemeCatalog,
    novelty: NoveltyFilter,
    config: GeneratorConfig,
}

impl<W> PlanGenerator<W>
where
    W: PlanWriter + 'static,
{
    pub fn new(writer: Arc<W>, config: GeneratorConfig) -> Self {
        Self::with_catalog(writer, ThemeCatalog::standard(), config)
    }

    pub fn with_catalog(writer: Arc<W>, catalog: ThemeCatalog, config: GeneratorConfig) -> Self {
        let novelty = NoveltyFilter::new(config.novelty.clone());
        Self {
            writer,
            catalog,
            novelty,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one plan. Never fails: writer problems and invalid drafts fall back to the
    /// template draft, and a duplicate that survives every retry is accepted as is.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        iteration: u32,
        history: &[BusinessPlan],
        rng: &mut R,
    ) -> BusinessPlan {
        let mut attempt = 0;
        loop {
            let plan = self.generate_once(iteration.saturating_add(attempt), history, rng);
            if attempt >= self.config.duplicate_retries {
                return plan;
            }
            match self.novelty.duplicate_of(&plan.title, &plan.tags, history) {
                None => return plan,
                Some(found) => {
                    info!(
                        title = %plan.title,
                        prior = %found.prior_title,
                        reason = ?found.reason,
                        "generated plan duplicates history; regenerating"
                    );
                    attempt += 1;
                }
            }
        }
    }

    fn generate_once<R: Rng + ?Sized>(
        &self,
        iteration: u32,
        history: &[BusinessPlan],
        rng: &mut R,
    ) -> BusinessPlan {
        let selection =
            self.catalog
                .select_theme(history, &self.novelty, self.config.theme_attempts, rng);
        debug!(
            category = %selection.category,
            theme = %selection.theme,
            iteration,
            "theme selected"
        );

        let prompt = build_prompt(&selection);
        let drafted = self
            .writer
            .draft(&prompt)
            .and_then(|response| parse_draft(&response))
            .map(|draft| draft.into_plan(selection.category, iteration));

        match drafted {
            Ok(plan) => match plan.validate() {
                Ok(()) => return plan,
                Err(error) => warn!(
                    %error,
                    theme = %selection.theme,
                    "writer draft failed validation; using template draft"
                ),
            },
            Err(error) => warn!(
                %error,
                theme = %selection.theme,
                "writer output unusable; using template draft"
            ),
        }

        fallback::fallback_draft(&selection, rng).into_plan(selection.category, iteration)
    }
}

/// Parse writer output, tolerating a surrounding Markdown code fence.
pub fn parse_draft(response: &str) -> Result<PlanDraft, GenerationError> {
    let body = strip_code_fence(response);
    Ok(serde_json::from_str(body)?)
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn build_prompt(selection: &ThemeSelection) -> String {
    format!(
        r#"You are a seasoned founder and business consultant. Write an investor-ready, realistic business plan for the brief below.

**Theme:** {theme}
**Category:** {category}
**Business model:** {business_model}
**Target market:** {target_market}

Reply with pure JSON (no Markdown) in exactly this shape:

{{
  "title": "short, memorable business name",
  "problem_statement": "clear problem statement (3-4 sentences)",
  "solution": "concrete solution (3-4 sentences)",
  "value_proposition": "value proposition with numbers (2-3 sentences)",
  "business_model": "details of the {business_model}",
  "market_analysis": {{
    "market_size": market size in billions of dollars (number),
    "market_growth_rate": annual growth rate in percent (number),
    "target_audience": "specific target audience",
    "market_stage": "emerging/growing/mature/declining",
    "competitive_landscape": "competitive analysis (3-4 sentences)",
    "key_success_factors": ["factor 1", "factor 2", "factor 3", "factor 4"]
  }},
  "financial_projection": {{
    "year1_revenue": year one revenue in dollars,
    "year3_revenue": year three revenue in dollars,
    "year5_revenue": year five revenue in dollars,
    "initial_investment": initial investment in dollars,
    "break_even_months": whole months to break even,
    "profit_margin_year3": year three profit margin in percent,
    "customer_cac": customer acquisition cost in dollars,
    "customer_ltv": customer lifetime value in dollars
  }},
  "key_milestones": ["milestone 1", "milestone 2", "milestone 3", "milestone 4"],
  "team_requirements": ["role 1", "role 2", "role 3", "role 4", "role 5"],
  "risk_factors": ["risk 1", "risk 2", "risk 3"],
  "mitigation_strategies": ["mitigation 1", "mitigation 2", "mitigation 3"],
  "reasoning": "why this business will succeed (3-4 sentences)",
  "tags": ["tag 1", "tag 2", "tag 3"]
}}

Guidelines:
- Base market size on real market data.
- Growth rates should reflect industry trends.
- Financials should be realistic yet attractive to investors.
- Aim for an LTV/CAC ratio of at least 3.
- Break even within 18-36 months.
- Stay distinct from existing plans.

Output JSON only."#,
        theme = selection.theme,
        category = selection.category.label(),
        business_model = selection.business_model,
        target_market = selection.target_market,
    )
}
