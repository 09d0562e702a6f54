use std::fmt::Write;

use super::super::domain::BusinessPlan;
use super::super::evaluation::SubScore;
use super::views::EvaluationDetail;

/// Markdown evaluation report for stakeholders.
pub fn render_evaluation_report(plan: &BusinessPlan, detail: &EvaluationDetail) -> String {
    let outcome = &detail.outcome;
    let mut md = String::new();

    let _ = writeln!(md, "# Evaluation report: {}\n", plan.title);
    let _ = writeln!(
        md,
        "**Category:** {} | **Overall score:** {:.1}/100\n",
        plan.category.label(),
        outcome.overall
    );

    let weights = &outcome.weights;
    let _ = writeln!(
        md,
        "Weights: feasibility {:.2}, profitability {:.2}, innovation {:.2}{}\n",
        weights.weights.feasibility,
        weights.weights.profitability,
        weights.weights.innovation,
        if weights.default_applied {
            " (default profile)"
        } else {
            ""
        }
    );

    for sub_score in outcome.sub_scores() {
        render_sub_score(&mut md, sub_score);
    }

    render_list(&mut md, "Strengths", &detail.findings.strengths);
    render_list(&mut md, "Weaknesses", &detail.findings.weaknesses);
    render_list(&mut md, "Recommendations", &detail.findings.recommendations);

    if let Some(benchmark) = &detail.benchmark {
        let _ = writeln!(md, "## Benchmark comparison\n");
        let _ = writeln!(md, "- Benchmark plans: {}", benchmark.benchmark_size);
        let _ = writeln!(md, "- Feasibility: {:+.1}", benchmark.feasibility_diff);
        let _ = writeln!(md, "- Profitability: {:+.1}", benchmark.profitability_diff);
        let _ = writeln!(md, "- Innovation: {:+.1}", benchmark.innovation_diff);
        let _ = writeln!(md, "- Overall: {:+.1}", benchmark.overall_diff);
        let _ = writeln!(md, "- Percentile: {:.0}\n", benchmark.percentile);
    }

    if !detail.similar_plans.is_empty() {
        let _ = writeln!(md, "## Similar plans\n");
        for similar in &detail.similar_plans {
            let _ = writeln!(
                md,
                "- {} ({}) similarity {:.2}",
                similar.title,
                similar.category.label(),
                similar.similarity
            );
        }
        md.push('\n');
    }

    md
}

fn render_sub_score(md: &mut String, sub_score: &SubScore) {
    let _ = writeln!(
        md,
        "## {}: {:.1}/100\n",
        sub_score.dimension.label(),
        sub_score.score
    );
    let _ = writeln!(md, "| Criterion | Points | Notes |");
    let _ = writeln!(md, "|-----------|--------|-------|");
    let _ = writeln!(md, "| Baseline | {:.1} | |", sub_score.baseline);
    for component in &sub_score.components {
        let _ = writeln!(
            md,
            "| {} | {:.1}/{:.0} | {} |",
            component.criterion.label(),
            component.points,
            component.max_points,
            component.notes
        );
    }
    md.push('\n');
}

fn render_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(md, "## {heading}\n");
    for item in items {
        let _ = writeln!(md, "- {item}");
    }
    md.push('\n');
}
