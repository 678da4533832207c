use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use roadcheck_client::TaskClient;
use roadcheck_protocol::wire::AnswerSubmission;
use roadcheck_protocol::{serialize_json_pretty, TaskPayload};
use roadcheck_solver::{solve_task, ScenarioCache, SolveReport};
use serde_json::Value;
use std::env;
use std::io;
use std::time::Duration;

/// The 2024 task board. Overridable for local boards and tests.
const DEFAULT_BASE_URL: &str = "http://bitkozpont.mik.uni-pannon.hu/2024";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "roadcheck")]
#[command(
    about = "Finds the claimed road distance that deviates most from the true grid path",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Task board base URL (falls back to ROADCHECK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Team credential for the task board (falls back to ROADCHECK_TEAM_CODE)
    #[arg(long, global = true)]
    team_code: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for results)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a task, solve every question, and submit the answers
    Solve(SolveArgs),

    /// List the tasks the board currently offers
    Tasks(TasksArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Task id to fetch
    task_id: String,

    /// Solve and print, but skip the answer submission
    #[arg(long)]
    no_submit: bool,

    /// Fetch and solve this many times in sequence (repeats of the same
    /// content are answered from the scenario cache)
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Pause between repeats, in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Print the answer submission as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TasksArgs {
    /// Print the task list as JSON
    #[arg(long)]
    json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Solve(args) => args.json,
        Commands::Tasks(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env::var("ROADCHECK_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let team_code = cli
        .team_code
        .clone()
        .or_else(|| env::var("ROADCHECK_TEAM_CODE").ok())
        .context("No team code given; pass --team-code or set ROADCHECK_TEAM_CODE")?;

    let client =
        TaskClient::new(&base_url, &team_code).context("Failed to build HTTP client")?;
    log::debug!("using task board at {}", client.base_url());

    match cli.command {
        Commands::Solve(args) => run_solve(args, &client, &team_code).await?,
        Commands::Tasks(args) => run_tasks(args, &client).await?,
    }

    Ok(())
}

async fn run_solve(args: SolveArgs, client: &TaskClient, team_code: &str) -> Result<()> {
    let mut cache = ScenarioCache::new();

    for round in 0..args.repeat {
        if round > 0 && args.interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(args.interval_ms)).await;
        }

        let envelope = client
            .fetch_task(&args.task_id)
            .await
            .with_context(|| format!("Failed to fetch task {}", args.task_id))?;

        let report = solve_task(&mut cache, &envelope.data);
        let submission =
            AnswerSubmission::assemble(&envelope.data, &envelope.hash, team_code, &report.answers);

        if args.json {
            print_stdout(&serialize_json_pretty(&submission)?)?;
        } else {
            print_solve_summary(&envelope.data, &report)?;
        }

        if args.no_submit {
            log::info!("submission for task {} skipped", args.task_id);
            if !args.json {
                print_stdout("Submission skipped (--no-submit)")?;
            }
        } else {
            client
                .submit_answers(&submission)
                .await
                .with_context(|| format!("Failed to submit answers for task {}", args.task_id))?;
            if !args.json {
                print_stdout("Answers submitted")?;
            }
        }
    }

    log::debug!("scenario cache holds {} entries", cache.len());
    Ok(())
}

fn print_solve_summary(payload: &TaskPayload, report: &SolveReport) -> Result<()> {
    let origin = if report.cache_hit { "cache" } else { "fresh solve" };
    print_stdout(&format!(
        "Task {}: {} question(s), answers from {}",
        value_text(&payload.id),
        payload.questions.len(),
        origin
    ))?;
    for (question, answer) in payload.questions.iter().zip(&report.answers) {
        match answer {
            Some((from, to)) => print_stdout(&format!(
                "  question {}: {} -> {}",
                value_text(&question.id),
                from,
                to
            ))?,
            None => print_stdout(&format!(
                "  question {}: no deviating road",
                value_text(&question.id)
            ))?,
        }
    }
    Ok(())
}

async fn run_tasks(args: TasksArgs, client: &TaskClient) -> Result<()> {
    let tasks = client
        .fetch_task_list()
        .await
        .context("Failed to fetch the task list")?;

    if args.json {
        let rows: Vec<Value> = tasks
            .iter()
            .map(|task| {
                serde_json::json!({
                    "ID": task.id,
                    "points": task.points,
                    "state": task.state.map(|state| state.as_str()),
                })
            })
            .collect();
        print_stdout(&serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if tasks.is_empty() {
        print_stdout("The board offers no tasks right now")?;
        return Ok(());
    }

    print_stdout(&format!("{} task(s) on the board:", tasks.len()))?;
    for task in &tasks {
        let points = task
            .points
            .as_ref()
            .map(value_text)
            .unwrap_or_else(|| "-".to_string());
        let state = task.state.map(|state| state.as_str()).unwrap_or("?");
        print_stdout(&format!(
            "  {:<8} {:>6} points  {}",
            value_text(&task.id),
            points,
            state
        ))?;
    }

    Ok(())
}

/// Renders an opaque id-like JSON value without quoting plain strings.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text_strips_quotes_from_strings_only() {
        assert_eq!(value_text(&Value::from("9")), "9");
        assert_eq!(value_text(&Value::from(9)), "9");
        assert_eq!(value_text(&Value::from(2.5)), "2.5");
        assert_eq!(value_text(&Value::Null), "null");
    }
}
