use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use difficulty_protocol::{
    display_for, parse_records, DifficultyLevel, DifficultyResult, IssueRecord,
};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::batch::{classify_batch, Classified};
use crate::config::{validate_jobs, Config};
use crate::flags::{LevelFlag, OutputFormat, SortOrder};

mod batch;
mod config;
mod flags;
mod report;

#[derive(Parser)]
#[command(name = "issue-difficulty")]
#[command(about = "Deterministic difficulty tiers for tracked issues", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (overrides ISSUE_DIFFICULTY_CONFIG and ./issue-difficulty.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a batch of issue records read from a file or stdin
    Classify(ClassifyArgs),

    /// Classify a single issue described on the command line
    Score(ScoreArgs),

    /// Print the presentation mapping for one or all difficulty levels
    Display(DisplayArgs),

    /// Print the JSON schema of the input record and the result
    Schema,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format (default from config, else text)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Include label signal, sub-scores and the unrounded score
    #[arg(long)]
    breakdown: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Input file with issue records (JSON, GraphQL response or JSON lines); `-` for stdin
    #[arg(default_value = "-")]
    input: String,

    #[command(flatten)]
    output: OutputArgs,

    /// Only keep issues at these levels (repeatable)
    #[arg(long = "level", value_enum)]
    levels: Vec<LevelFlag>,

    /// Result ordering
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,

    /// Worker count for large batches
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Label name (repeatable)
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Number of comments on the issue
    #[arg(long, default_value_t = 0)]
    comments: u64,

    /// Issue description; its length in UTF-16 code units is scored
    #[arg(long, conflicts_with = "body_length")]
    body: Option<String>,

    /// Description length in UTF-16 code units
    #[arg(long)]
    body_length: Option<u64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct DisplayArgs {
    /// Level to show (default: all)
    #[arg(value_enum)]
    level: Option<LevelFlag>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Keep stdout clean for machine-readable output
    let format = match &cli.command {
        Commands::Classify(args) => args.output.format,
        Commands::Score(args) => args.output.format,
        Commands::Display(_) | Commands::Schema => Some(OutputFormat::Json),
    }
    .unwrap_or(config.format);
    if format.is_machine_readable() && !cli.verbose {
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

    if let Some(source) = &config.source {
        log::debug!("using config {}", source.display());
    }

    match cli.command {
        Commands::Classify(args) => run_classify(args, &config).await?,
        Commands::Score(args) => run_score(args, &config).await?,
        Commands::Display(args) => run_display(args)?,
        Commands::Schema => run_schema()?,
    }

    Ok(())
}

async fn run_classify(args: ClassifyArgs, config: &Config) -> Result<()> {
    let text = read_input(&args.input)?;
    let records = parse_records(&text)
        .with_context(|| format!("Failed to decode issue records from {}", args.input))?;
    log::info!("loaded {} issue records", records.len());

    let jobs = args.jobs.unwrap_or(config.jobs);
    validate_jobs(jobs)?;

    let mut rows = classify_batch(records, jobs).await?;
    if !args.levels.is_empty() {
        let keep: Vec<_> = args.levels.iter().map(|l| l.as_domain()).collect();
        rows.retain(|row| keep.contains(&row.assessment.result.level));
    }
    sort_rows(&mut rows, args.sort.unwrap_or(config.sort));

    let [easy, medium, hard] = report::tally(&rows).map(|(_, count)| count);
    log::info!(
        "classified {} issues: {easy} easy, {medium} medium, {hard} hard",
        rows.len()
    );

    let format = args.output.format.unwrap_or(config.format);
    let breakdown = args.output.breakdown || config.breakdown;
    write_stdout(&report::render(&rows, format, breakdown)?)
}

async fn run_score(args: ScoreArgs, config: &Config) -> Result<()> {
    let mut record =
        IssueRecord::new(args.labels, args.comments, args.body_length.unwrap_or(0));
    if let Some(body) = args.body.as_deref() {
        record = record.with_body(body);
    }

    let rows = classify_batch(vec![record], 1).await?;
    let format = args.output.format.unwrap_or(config.format);
    let breakdown = args.output.breakdown || config.breakdown;

    if format == OutputFormat::Json && !breakdown {
        // A single record prints as an object rather than a one-element array.
        let result: &DifficultyResult = &rows[0].assessment.result;
        let mut json = serde_json::to_string_pretty(result)?;
        json.push('\n');
        return write_stdout(&json);
    }
    write_stdout(&report::render(&rows, format, breakdown)?)
}

fn run_display(args: DisplayArgs) -> Result<()> {
    let json = match args.level {
        Some(level) => serde_json::to_string_pretty(&display_for(level.as_domain()))?,
        None => {
            let all: BTreeMap<&str, _> = DifficultyLevel::ALL
                .iter()
                .map(|level| (level.as_str(), display_for(*level)))
                .collect();
            serde_json::to_string_pretty(&all)?
        }
    };
    write_stdout(&format!("{json}\n"))
}

fn run_schema() -> Result<()> {
    let record = schemars::schema_for!(IssueRecord);
    let result = schemars::schema_for!(DifficultyResult);
    let schema = serde_json::json!({
        "issue_record": record,
        "difficulty_result": result,
    });
    write_stdout(&format!("{}\n", serde_json::to_string_pretty(&schema)?))
}

fn sort_rows(rows: &mut [Classified], order: SortOrder) {
    match order {
        SortOrder::Input => {}
        SortOrder::Score => rows.sort_by_key(|row| row.assessment.result.score),
        SortOrder::Comments => rows.sort_by_key(|row| row.record.comment_count),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read issue records from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("Failed to write output")?;
    stdout.flush().context("Failed to flush output")
}
