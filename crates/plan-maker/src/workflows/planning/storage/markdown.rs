use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::super::analytics::{calculate_statistics, category_distribution};
use super::super::domain::BusinessPlan;
use super::super::ranking::rank;

/// Full Markdown rendering of a plan, as written next to its JSON record.
pub fn render_plan_markdown(plan: &BusinessPlan) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}\n", plan.title);
    let _ = writeln!(
        md,
        "**Category:** {} | **Created:** {} | **Iteration:** {}\n",
        plan.category.label(),
        plan.created_at.format("%Y-%m-%d %H:%M:%S"),
        plan.iteration
    );
    md.push_str("---\n\n## Scores\n\n");
    let _ = writeln!(md, "- **Feasibility:** {:.1}/100", plan.feasibility_score);
    let _ = writeln!(md, "- **Profitability:** {:.1}/100", plan.profitability_score);
    let _ = writeln!(md, "- **Innovation:** {:.1}/100", plan.innovation_score);
    let _ = writeln!(md, "- **Overall:** {:.1}/100\n", plan.overall_score);
    md.push_str("---\n\n");

    section(&mut md, "Problem", &plan.problem_statement);
    section(&mut md, "Solution", &plan.solution);
    section(&mut md, "Value proposition", &plan.value_proposition);
    section(&mut md, "Business model", &plan.business_model);

    let market = &plan.market_analysis;
    md.push_str("## Market analysis\n\n### Market size\n");
    let _ = writeln!(md, "- **Size:** ${}B", thousands(market.market_size));
    let _ = writeln!(md, "- **Growth rate:** {:.1}%", market.market_growth_rate);
    let _ = writeln!(md, "- **Stage:** {}\n", market.market_stage.label());
    let _ = writeln!(md, "### Target audience\n{}\n", market.target_audience);
    let _ = writeln!(
        md,
        "### Competitive landscape\n{}\n",
        market.competitive_landscape
    );
    md.push_str("### Key success factors\n");
    bullets(&mut md, &market.key_success_factors);
    md.push('\n');

    let financial = &plan.financial_projection;
    md.push_str("## Financial projection\n\n### Revenue\n");
    let _ = writeln!(md, "- **Year 1:** ${}", thousands(financial.year1_revenue));
    let _ = writeln!(md, "- **Year 3:** ${}", thousands(financial.year3_revenue));
    let _ = writeln!(md, "- **Year 5:** ${}\n", thousands(financial.year5_revenue));
    md.push_str("### Investment metrics\n");
    let _ = writeln!(
        md,
        "- **Initial investment:** ${}",
        thousands(financial.initial_investment)
    );
    let _ = writeln!(
        md,
        "- **Break-even:** {} months",
        financial.break_even_months
    );
    let _ = writeln!(
        md,
        "- **Year 3 profit margin:** {:.1}%",
        financial.profit_margin_year3
    );
    let _ = writeln!(md, "- **CAC:** ${}", thousands(financial.customer_cac));
    let _ = writeln!(md, "- **LTV:** ${}", thousands(financial.customer_ltv));
    let _ = writeln!(
        md,
        "- **LTV/CAC:** {:.2}x\n",
        financial.ltv_cac_ratio().unwrap_or(0.0)
    );

    md.push_str("## Execution plan\n\n### Key milestones\n");
    bullets(&mut md, &plan.key_milestones);
    md.push_str("\n### Team\n");
    bullets(&mut md, &plan.team_requirements);
    md.push_str("\n### Risks and mitigations\n");
    for (index, risk) in plan.risk_factors.iter().enumerate() {
        let _ = writeln!(md, "{}. **{}**", index + 1, risk);
        if let Some(mitigation) = plan.mitigation_strategies.get(index) {
            let _ = writeln!(md, "   - Mitigation: {mitigation}");
        }
    }

    if !plan.reasoning.is_empty() {
        let _ = write!(md, "\n## Reasoning\n\n{}\n", plan.reasoning);
    }
    if !plan.references.is_empty() {
        md.push_str("\n## References\n\n");
        bullets(&mut md, &plan.references);
    }
    if !plan.tags.is_empty() {
        let _ = write!(md, "\n**Tags:** {}\n", plan.tags.join(", "));
    }

    md
}

/// Corpus-wide Markdown summary: totals, score statistics, categories, and the top five.
pub fn render_summary_report(plans: &[BusinessPlan], generated_at: DateTime<Utc>) -> String {
    let Some(statistics) = calculate_statistics(plans) else {
        return "# Business plan summary\n\nNo plans have been generated yet.\n".to_string();
    };

    let mut md = String::new();
    md.push_str("# Business plan summary\n\n");
    let _ = writeln!(
        md,
        "**Generated:** {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(md, "**Total plans:** {}\n", plans.len());
    md.push_str("---\n\n## Statistics\n\n");
    let overall = &statistics.overall;
    let _ = writeln!(md, "- **Average score:** {:.1}", overall.mean);
    let _ = writeln!(md, "- **Median score:** {:.1}", overall.median);
    let _ = writeln!(md, "- **Highest score:** {:.1}", overall.max);
    let _ = writeln!(md, "- **Lowest score:** {:.1}", overall.min);
    let _ = writeln!(md, "- **Standard deviation:** {:.1}\n", overall.std_dev);

    md.push_str("## Plans per category\n\n");
    let mut categories: Vec<_> = category_distribution(plans).into_iter().collect();
    categories.sort_by(|left, right| right.1.cmp(&left.1));
    for (category, count) in categories {
        let _ = writeln!(md, "- **{}:** {}", category.label(), count);
    }

    md.push_str("\n## Top 5 plans\n\n");
    for (index, plan) in rank(plans.to_vec()).iter().take(5).enumerate() {
        let _ = writeln!(md, "### {}. {}\n", index + 1, plan.title);
        let _ = writeln!(md, "- **Score:** {:.1}", plan.overall_score);
        let _ = writeln!(md, "- **Category:** {}", plan.category.label());
        let _ = writeln!(
            md,
            "- **Market size:** ${}B",
            thousands(plan.market_analysis.market_size)
        );
        let _ = writeln!(
            md,
            "- **Year 5 revenue:** ${}\n",
            thousands(plan.financial_projection.year5_revenue)
        );
        let _ = writeln!(md, "{}\n\n---\n", plan.value_proposition);
    }

    md
}

fn section(md: &mut String, heading: &str, body: &str) {
    let _ = write!(md, "## {heading}\n\n{body}\n\n");
}

fn bullets(md: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(md, "- {item}");
    }
}

/// Round to a whole number and group digits by thousands.
fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
