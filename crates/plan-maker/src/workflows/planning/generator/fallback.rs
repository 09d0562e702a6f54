use rand::Rng;

use super::super::domain::{FinancialProjection, MarketAnalysis, MarketStage};
use super::themes::ThemeSelection;
use super::PlanDraft;

/// Template draft used when the writer is unavailable or returns unusable output.
pub(crate) fn fallback_draft<R: Rng + ?Sized>(selection: &ThemeSelection, rng: &mut R) -> PlanDraft {
    let ThemeSelection {
        category,
        theme,
        business_model,
        target_market,
    } = selection;

    PlanDraft {
        title: format!("{theme} - {business_model}"),
        problem_statement: format!(
            "{target_market} still depend on manual processes and inefficient systems, \
             wasting time and resources."
        ),
        solution: format!("An AI and automation driven {theme} platform."),
        value_proposition: format!(
            "A {theme} solution that cuts time spent by 80% and costs by 50%."
        ),
        business_model: business_model.clone(),
        market_analysis: MarketAnalysis {
            market_size: f64::from(rng.gen_range(10..=1000u32)),
            market_growth_rate: f64::from(rng.gen_range(10..=40u32)),
            target_audience: target_market.clone(),
            market_stage: MarketStage::Growing,
            competitive_landscape: "Competitors exist, but AI-driven differentiation is possible."
                .to_string(),
            key_success_factors: strings(&[
                "Optimized user experience",
                "Improving AI model accuracy",
                "Customer acquisition cost discipline",
                "Strategic partnerships",
            ]),
        },
        financial_projection: FinancialProjection {
            year1_revenue: f64::from(rng.gen_range(100..=1000u32)) * 1_000.0,
            year3_revenue: f64::from(rng.gen_range(5..=50u32)) * 1_000_000.0,
            year5_revenue: f64::from(rng.gen_range(20..=200u32)) * 1_000_000.0,
            initial_investment: f64::from(rng.gen_range(500..=5000u32)) * 1_000.0,
            break_even_months: rng.gen_range(18..=36),
            profit_margin_year3: f64::from(rng.gen_range(20..=40u32)),
            customer_cac: f64::from(rng.gen_range(500..=5000u32)),
            customer_ltv: f64::from(rng.gen_range(3000..=30000u32)),
        },
        key_milestones: strings(&[
            "MVP build (3 months)",
            "First 10 customers (6 months)",
            "Seed round (12 months)",
            "Feature expansion and market growth (18 months)",
        ]),
        team_requirements: strings(&[
            "CEO / business lead",
            "CTO / technical lead",
            "AI engineer",
            "Product manager",
            "Sales and marketing",
        ]),
        risk_factors: strings(&[
            "Technical delivery risk",
            "Uncertain market adoption",
            "New competitors",
        ]),
        mitigation_strategies: strings(&[
            "Staged development",
            "Close collaboration with early customers",
            "Continuous innovation",
        ]),
        reasoning: format!(
            "{theme} for {target_market} meets strong demand and can be monetized through a \
             {business_model}."
        ),
        references: Vec::new(),
        tags: vec![
            theme.to_lowercase(),
            category.label().to_lowercase(),
            business_model.to_lowercase(),
        ],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
