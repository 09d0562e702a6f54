use crate::commands::{
    run_compare, run_continuous, run_evaluate, run_generate, run_summary, run_top, CompareArgs,
    ContinuousArgs, EvaluateArgs, GenerateArgs, TopArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use plan_maker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Plan Maker",
    about = "Generate, score, and rank business plans from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate a batch of plans, then write a summary report
    Generate(GenerateArgs),
    /// Keep generating plans on an interval until stopped (Ctrl-C writes a final summary)
    Continuous(ContinuousArgs),
    /// Write and print the corpus summary report
    Summary,
    /// List the highest scoring stored plans
    Top(TopArgs),
    /// Score a plan JSON file against the stored corpus without storing it
    Evaluate(EvaluateArgs),
    /// Compare two stored plans side by side
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Generate(args) => run_generate(args),
        Command::Continuous(args) => run_continuous(args).await,
        Command::Summary => run_summary(),
        Command::Top(args) => run_top(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Compare(args) => run_compare(args),
    }
}
