use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use casetrack_core::{
    CaseStatus, Config, HttpClient, RunDraft, RunExecutor, RunReport, TestOps,
};

#[derive(Parser)]
#[command(name = "casetrack")]
#[command(about = "Plan, execute and export test runs", long_about = None)]
struct Cli {
    /// API base URL (overrides config and CASETRACK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides config and CASETRACK_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print a session token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List projects
    Projects,
    /// List a project's test suites
    Suites {
        #[arg(long)]
        project: u64,
    },
    /// List a suite's test cases
    Cases {
        #[arg(long)]
        suite: u64,
    },
    /// Work with test runs
    #[command(subcommand)]
    Runs(RunCommands),
    /// Download the export document for a run
    Export {
        #[arg(long)]
        project: u64,
        #[arg(long)]
        run: u64,
        /// Output file
        #[arg(long, default_value = "run-report.pdf")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum RunCommands {
    /// List a project's runs
    List {
        #[arg(long)]
        project: u64,
    },
    /// Create a run from a suite and a selection of its cases
    Create {
        #[arg(long)]
        project: u64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Source suite; selected cases must belong to it
        #[arg(long)]
        suite: Option<u64>,
        /// Case to include (repeatable)
        #[arg(long = "case")]
        cases: Vec<u64>,
    },
    /// Show a run and its execution records
    Show {
        #[arg(long)]
        project: u64,
        #[arg(long)]
        run: u64,
    },
    /// Set case statuses, save them and complete the run
    Exec {
        #[arg(long)]
        project: u64,
        #[arg(long)]
        run: u64,
        /// Case id to mark PASSED (repeatable)
        #[arg(long = "pass")]
        passed: Vec<u64>,
        /// Case id to mark FAILED (repeatable)
        #[arg(long = "fail")]
        failed: Vec<u64>,
        /// Case id to mark SKIPPED (repeatable)
        #[arg(long = "skip")]
        skipped: Vec<u64>,
    },
    /// Delete a run
    Delete {
        #[arg(long)]
        project: u64,
        #[arg(long)]
        run: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("casetrack=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn client(cli: &Cli) -> HttpClient {
    let mut config = Config::load().unwrap_or_default();
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
    }
    HttpClient::from_config(&config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let api = client(&cli);
    let executor = RunExecutor::new(client(&cli));

    match cli.command {
        Commands::Login { email, password } => {
            let session = api.login(&email, &password).await?;
            println!("Logged in.");
            println!("export CASETRACK_TOKEN={}", session.access_token);
        }
        Commands::Projects => {
            for project in api.projects().await? {
                println!("{:>6}  {}", project.id, project.name);
            }
        }
        Commands::Suites { project } => {
            for suite in executor.candidate_suites(project).await? {
                println!("{:>6}  {}", suite.id, suite.name);
            }
        }
        Commands::Cases { suite } => {
            let cases = executor.candidate_cases(suite).await?;
            if cases.is_empty() {
                println!("No test cases in suite {suite}.");
            }
            for case in cases {
                println!("{:>6}  [{}] {}", case.id, case.status, case.title);
            }
        }
        Commands::Runs(command) => run_command(&executor, command).await?,
        Commands::Export { project, run, out } => {
            let bytes = executor.export_document(project, run).await?;
            std::fs::write(&out, bytes)?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

async fn run_command(
    executor: &RunExecutor<HttpClient>,
    command: RunCommands,
) -> Result<(), Box<dyn Error>> {
    match command {
        RunCommands::List { project } => {
            for run in executor.runs(project).await? {
                let summary = run.to_summary();
                println!(
                    "{:>6}  {:<10}  {:>3} cases  {}  {}",
                    summary.id,
                    summary.status,
                    summary.case_count,
                    summary.created_at.format("%Y-%m-%d %H:%M"),
                    summary.title
                );
            }
        }
        RunCommands::Create {
            project,
            title,
            description,
            suite,
            cases,
        } => {
            let mut draft = RunDraft::new(title, description).cases(cases);
            if let Some(suite_id) = suite {
                let candidates = executor.candidate_cases(suite_id).await?;
                draft = draft
                    .suite(suite_id)
                    .candidates(candidates.iter().map(|c| c.id));
            }
            let payload = draft.build()?;

            let run = executor.create_run(project, &payload).await?;
            println!("Created run {} \"{}\"", run.id, run.title);
            println!("  Status: {}", run.status);
            println!("  Cases:  {}", run.test_cases.len());
        }
        RunCommands::Show { project, run } => {
            let execution = executor.load_execution(project, run).await?;
            println!(
                "Run {} ({})",
                execution.run_id(),
                if execution.is_open() { "open" } else { "completed" }
            );
            for record in execution.records() {
                println!("{:>6}  {:<8}  {}", record.case_id, record.status, record.title);
            }
        }
        RunCommands::Exec {
            project,
            run,
            passed,
            failed,
            skipped,
        } => {
            let mut execution = executor.load_execution(project, run).await?;

            for case_id in passed {
                execution.set_status(case_id, CaseStatus::Passed)?;
            }
            for case_id in failed {
                execution.set_status(case_id, CaseStatus::Failed)?;
            }
            for case_id in skipped {
                execution.set_status(case_id, CaseStatus::Skipped)?;
            }

            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            pb.set_message(format!("Saving {} records...", execution.records().len()));
            pb.enable_steady_tick(Duration::from_millis(100));

            let result = executor.save_and_complete(&mut execution).await;
            pb.finish_and_clear();
            let completed = result?;

            let report = RunReport::from_run(&completed)?;
            println!("Run {} completed.", completed.id);
            println!(
                "  {} passed, {} failed, {} skipped, {} not exercised",
                report.count(CaseStatus::Passed),
                report.count(CaseStatus::Failed),
                report.count(CaseStatus::Skipped),
                report.count(CaseStatus::Onwork)
            );
        }
        RunCommands::Delete { project, run } => {
            executor.delete_run(project, run).await?;
            println!("Deleted run {run}.");
        }
    }

    Ok(())
}
