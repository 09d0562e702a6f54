use super::common::*;
use crate::workflows::planning::domain::{MarketStage, PlanCategory, PlanValidationError};
use crate::workflows::planning::evaluation::{resolve_weights, Criterion, EvaluationOutcome};
use crate::workflows::planning::render_evaluation_report;

fn assert_in_bounds(outcome: &EvaluationOutcome) {
    for sub_score in outcome.sub_scores() {
        assert!(
            (0.0..=100.0).contains(&sub_score.score),
            "{:?} out of bounds: {}",
            sub_score.dimension,
            sub_score.score
        );
    }
    assert!((0.0..=100.0).contains(&outcome.overall));
}

#[test]
fn maximal_feasibility_clamps_to_one_hundred() {
    let engine = evaluation_engine();
    let plan = strong_plan("p-1", "Claims autopilot", PlanCategory::HealthTech);

    let outcome = engine.score(&plan).expect("plan scores");

    assert_eq!(outcome.feasibility.raw, 150.0);
    assert_eq!(outcome.feasibility.score, 100.0);
    assert_eq!(outcome.profitability.score, 100.0);
    assert_in_bounds(&outcome);
}

#[test]
fn zero_acquisition_cost_removes_only_the_ratio_points() {
    let engine = evaluation_engine();
    let plan = strong_plan("p-1", "Claims autopilot", PlanCategory::HealthTech);
    let mut free_customers = plan.clone();
    free_customers.financial_projection.customer_cac = 0.0;

    let baseline = engine.score(&plan).expect("plan scores");
    let without_cac = engine.score(&free_customers).expect("plan scores");

    assert_eq!(baseline.feasibility.raw - without_cac.feasibility.raw, 20.0);
    let ratio = without_cac
        .feasibility
        .component(Criterion::LtvCacRatio)
        .expect("ratio component present");
    assert_eq!(ratio.points, 0.0);
    assert!(without_cac.signals.ltv_cac_ratio.is_none());
}

#[test]
fn weak_plan_scores_match_rule_tables() {
    let engine = evaluation_engine();
    let plan = weak_plan("p-weak");

    let outcome = engine.score(&plan).expect("plan scores");

    assert_eq!(outcome.feasibility.score, 68.0);
    assert_eq!(outcome.profitability.score, 57.0);
    assert_eq!(outcome.innovation.score, 70.0);
    assert!(outcome.weights.default_applied);
    assert!((outcome.overall - 63.45).abs() < 1e-9);
    assert_in_bounds(&outcome);
}

#[test]
fn zero_revenue_and_investment_contribute_nothing() {
    let engine = evaluation_engine();
    let mut plan = weak_plan("p-zero");
    plan.financial_projection.year1_revenue = 0.0;
    plan.financial_projection.year5_revenue = 0.0;
    plan.financial_projection.initial_investment = 0.0;

    let outcome = engine.score(&plan).expect("plan scores");

    assert!(outcome.signals.revenue_growth.is_none());
    assert!(outcome.signals.return_on_investment.is_none());
    let growth = outcome
        .profitability
        .component(Criterion::RevenueGrowth)
        .expect("growth component present");
    assert_eq!(growth.points, 0.0);
    let roi = outcome
        .feasibility
        .component(Criterion::ReturnOnInvestment)
        .expect("roi component present");
    assert_eq!(roi.points, 0.0);
    assert_in_bounds(&outcome);
}

#[test]
fn high_innovation_categories_earn_the_category_bonus() {
    let engine = evaluation_engine();
    let ai = strong_plan("p-ai", "Model ops", PlanCategory::AiMl);
    let consumer = strong_plan("p-c", "Model ops", PlanCategory::Consumer);

    let ai_points = engine
        .score(&ai)
        .expect("plan scores")
        .innovation
        .component(Criterion::CategoryInnovation)
        .map(|component| component.points);
    let consumer_points = engine
        .score(&consumer)
        .expect("plan scores")
        .innovation
        .component(Criterion::CategoryInnovation)
        .map(|component| component.points);

    assert_eq!(ai_points, Some(20.0));
    assert_eq!(consumer_points, Some(10.0));
}

#[test]
fn keyword_points_are_capped() {
    let engine = evaluation_engine();
    let mut plan = weak_plan("p-kw");
    plan.solution = "A novel AI platform using machine learning, blockchain and automation to \
                     transform a proprietary, patent-backed ecosystem revolution."
        .to_string();

    let outcome = engine.score(&plan).expect("plan scores");

    assert!(outcome.signals.keyword_hits >= 10);
    let keywords = outcome
        .innovation
        .component(Criterion::KeywordDensity)
        .expect("keyword component present");
    assert_eq!(keywords.points, 10.0);
}

#[test]
fn evaluate_overwrites_plan_scores() {
    let engine = evaluation_engine();
    let mut plan = weak_plan("p-weak");

    let outcome = engine.evaluate(&mut plan).expect("plan evaluates");

    assert_eq!(plan.feasibility_score, outcome.feasibility.score);
    assert_eq!(plan.profitability_score, outcome.profitability.score);
    assert_eq!(plan.innovation_score, outcome.innovation.score);
    assert_eq!(plan.overall_score, outcome.overall);
}

#[test]
fn invalid_plans_are_rejected_before_scoring() {
    let engine = evaluation_engine();

    let mut untitled = weak_plan("p-1");
    untitled.title = "  ".to_string();
    assert_eq!(
        engine.score(&untitled).unwrap_err(),
        PlanValidationError::MissingField("title")
    );

    let mut negative = weak_plan("p-2");
    negative.market_analysis.market_size = -1.0;
    assert!(matches!(
        engine.score(&negative),
        Err(PlanValidationError::Negative { field, .. }) if field == "market_analysis.market_size"
    ));

    let mut not_a_number = weak_plan("p-3");
    not_a_number.financial_projection.customer_ltv = f64::NAN;
    assert!(matches!(
        engine.score(&not_a_number),
        Err(PlanValidationError::NonFinite { .. })
    ));
}

#[test]
fn detailed_evaluation_reports_findings_in_order() {
    let engine = evaluation_engine();
    let mut plan = weak_plan("p-weak");

    let detail = engine
        .evaluate_detailed(&mut plan, &[], &[])
        .expect("plan evaluates");

    assert!(detail.findings.strengths.is_empty());
    assert_eq!(detail.findings.weaknesses.len(), 2);
    assert!(detail.findings.weaknesses[0].starts_with("Low profitability"));
    assert!(detail.findings.weaknesses[1].starts_with("Declining market"));

    let recommendations = &detail.findings.recommendations;
    assert_eq!(recommendations.len(), 7);
    assert!(recommendations[0].contains("LTV/CAC"));
    assert!(recommendations[1].contains("break-even"));
    assert!(recommendations[2].contains("margins"));
    assert!(recommendations[3].contains("ROI"));
    assert!(recommendations[4].contains("year one and year three"));
    assert!(recommendations[5].contains("founding team"));
    assert!(recommendations[6].contains("mitigation"));

    assert!(detail.benchmark.is_none());
    assert!(detail.similar_plans.is_empty());
}

#[test]
fn strong_plan_lists_strengths_and_emerging_note() {
    let engine = evaluation_engine();
    let mut plan = strong_plan("p-1", "Claims autopilot", PlanCategory::HealthTech);
    plan.market_analysis.market_stage = MarketStage::Emerging;

    let detail = engine
        .evaluate_detailed(&mut plan, &[], &[])
        .expect("plan evaluates");

    assert_eq!(detail.findings.strengths.len(), 3);
    assert!(detail.findings.weaknesses.is_empty());
    assert_eq!(detail.findings.recommendations.len(), 1);
    assert!(detail.findings.recommendations[0].starts_with("Emerging market"));
}

#[test]
fn missing_acquisition_cost_adds_no_recommendation() {
    let engine = evaluation_engine();
    let mut plan = strong_plan("p-1", "Claims autopilot", PlanCategory::HealthTech);
    plan.financial_projection.customer_cac = 0.0;

    let detail = engine
        .evaluate_detailed(&mut plan, &[], &[])
        .expect("plan evaluates");

    assert!(detail.findings.recommendations.is_empty());
}

#[test]
fn detailed_evaluation_benchmarks_and_finds_similar_plans() {
    let engine = evaluation_engine();
    let benchmark = vec![scored_plan("b-1", 40.0), scored_plan("b-2", 60.0)];
    let mut history = benchmark.clone();
    let mut plan = strong_plan("p-1", "Claims autopilot", PlanCategory::HealthTech);
    history.push(plan.clone());
    history.push(strong_plan("p-2", "Claims autopilot pro", PlanCategory::HealthTech));

    let detail = engine
        .evaluate_detailed(&mut plan, &benchmark, &history)
        .expect("plan evaluates");

    let comparison = detail.benchmark.expect("benchmark present");
    assert_eq!(comparison.benchmark_size, 2);
    assert_eq!(comparison.percentile, 100.0);
    assert!((comparison.overall_diff - (plan.overall_score - 50.0)).abs() < 1e-9);

    assert_eq!(detail.similar_plans.len(), 3);
    assert!(detail
        .similar_plans
        .iter()
        .all(|similar| similar.plan_id != plan.id));
    assert_eq!(detail.similar_plans[0].plan_id.as_str(), "p-2");
}

#[test]
fn evaluation_report_renders_every_dimension() {
    let engine = evaluation_engine();
    let mut plan = weak_plan("p-weak");
    let detail = engine
        .evaluate_detailed(&mut plan, &[scored_plan("b-1", 90.0)], &[])
        .expect("plan evaluates");

    let report = render_evaluation_report(&plan, &detail);

    assert!(report.starts_with("# Evaluation report: Neighbourhood flyer drops"));
    assert!(report.contains("## Feasibility: 68.0/100"));
    assert!(report.contains("## Profitability: 57.0/100"));
    assert!(report.contains("## Innovation: 70.0/100"));
    assert!(report.contains("(default profile)"));
    assert!(report.contains("## Recommendations"));
    assert!(report.contains("- Percentile: 0"));
}

#[test]
fn every_category_resolves_weights_summing_to_one() {
    for category in PlanCategory::ordered() {
        let profile = resolve_weights(category);
        assert!((profile.weights.total() - 1.0).abs() < 1e-3, "{category}");
    }
}
