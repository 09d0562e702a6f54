use crate::infra::{planning_service, FileBackedService};
use clap::Args;
use plan_maker::config::AppConfig;
use plan_maker::error::AppError;
use plan_maker::telemetry;
use plan_maker::workflows::planning::{
    render_evaluation_report, BusinessPlan, PlanId, PlanRepository,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Number of plans to generate
    #[arg(long, default_value_t = 1)]
    pub(crate) count: usize,
    /// Iteration number assigned to the first plan
    #[arg(long, default_value_t = 1)]
    pub(crate) iteration_start: u32,
}

#[derive(Args, Debug)]
pub(crate) struct ContinuousArgs {
    /// Seconds to wait between plans
    #[arg(long, default_value_t = 60)]
    pub(crate) interval: u64,
    /// Stop after this many plans (runs until Ctrl-C when omitted)
    #[arg(long)]
    pub(crate) max_iterations: Option<u32>,
}

#[derive(Args, Debug)]
pub(crate) struct TopArgs {
    /// Number of plans to list
    #[arg(default_value_t = 10)]
    pub(crate) n: usize,
    /// Skip plans scoring below this overall score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_score: f64,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a plan JSON file
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    pub(crate) left: String,
    pub(crate) right: String,
}

fn prepare() -> Result<Arc<FileBackedService>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    planning_service(&config.planning)
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let service = prepare()?;

    println!("Generating {} plan(s)", args.count);
    let plans = service.generate_batch(args.count, args.iteration_start, &mut rand::thread_rng())?;
    for plan in &plans {
        print_plan_line(plan);
    }

    let path = service.repository().save_summary_report()?;
    println!("\nSummary report written to {}", path.display());
    Ok(())
}

pub(crate) async fn run_continuous(args: ContinuousArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let interval = Duration::from_secs(args.interval);
    let mut iteration = service
        .repository()
        .load_all()?
        .iter()
        .map(|plan| plan.iteration)
        .max()
        .map_or(1, |last| last.saturating_add(1));
    let mut produced = 0usize;
    let mut rounds = 0u32;

    println!(
        "Continuous generation every {}s starting at iteration {} (Ctrl-C to stop)",
        args.interval, iteration
    );

    loop {
        let worker = service.clone();
        let batch = tokio::task::spawn_blocking(move || {
            worker.generate_batch(1, iteration, &mut rand::thread_rng())
        });

        let outcome = tokio::select! {
            joined = batch => joined.map_err(|err| std::io::Error::other(err.to_string()))?,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted during generation");
                break;
            }
        };
        match outcome {
            Ok(plans) => {
                for plan in &plans {
                    print_plan_line(plan);
                }
                produced += plans.len();
            }
            Err(error) => warn!(%error, iteration, "plan generation failed; continuing"),
        }
        rounds += 1;
        iteration = iteration.saturating_add(1);

        if args.max_iterations.is_some_and(|max| rounds >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted while waiting");
                break;
            }
        }
    }

    match service.repository().save_summary_report() {
        Ok(path) => println!("\n{produced} plan(s) generated; summary written to {}", path.display()),
        Err(error) => warn!(%error, "failed to write final summary"),
    }
    Ok(())
}

pub(crate) fn run_summary() -> Result<(), AppError> {
    let service = prepare()?;
    let store = service.repository();

    let path = store.save_summary_report()?;
    println!("{}", store.summary_report()?);
    println!("Saved to {}", path.display());
    Ok(())
}

pub(crate) fn run_top(args: TopArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let plans = service.top(args.n, args.min_score)?;

    if plans.is_empty() {
        println!("No plans scored at least {:.1}", args.min_score);
        return Ok(());
    }

    println!("Top {} plan(s)", plans.len());
    for (rank, plan) in plans.iter().enumerate() {
        println!(
            "{:>2}. [{:.1}] {} ({}) - {}",
            rank + 1,
            plan.overall_score,
            plan.title,
            plan.category.label(),
            plan.id
        );
        println!(
            "    feasibility {:.1} | profitability {:.1} | innovation {:.1}",
            plan.feasibility_score, plan.profitability_score, plan.innovation_score
        );
    }
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let plan = read_plan(&args.path)?;

    let assessment = service.assess(plan)?;
    println!(
        "{}",
        render_evaluation_report(&assessment.plan, &assessment.detail)
    );
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let view = service.compare(&PlanId(args.left), &PlanId(args.right))?;
    println!("{}", view.report);
    Ok(())
}

fn read_plan(path: &std::path::Path) -> Result<BusinessPlan, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_plan_line(plan: &BusinessPlan) {
    println!(
        "- #{} {} [{}] overall {:.1} (F {:.1} / P {:.1} / I {:.1})",
        plan.iteration,
        plan.title,
        plan.category.label(),
        plan.overall_score,
        plan.feasibility_score,
        plan.profitability_score,
        plan.innovation_score
    );
}
