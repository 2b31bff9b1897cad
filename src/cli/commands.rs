//! CLI command definitions and dispatch.

use super::collect::StdinCollector;
use super::logging::{log, LogLevel};
use crate::data::{Dataset, DependencyForest, QuestionCatalog};
use crate::error::{CribarError, Result};
use crate::io::{load_catalog, load_dataset, load_forest};
use crate::risk::{aggregate_risk, ClassCounts};
use crate::score::WeightPolicy;
use crate::session::{run_session, SessionConfig, SessionState};
use crate::tree::{rank_questions, BuildConfig, TreeBuilder};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cribar: adaptive question selection for risk screening
#[derive(Parser, Debug, Clone)]
#[command(name = "cribar")]
#[command(version)]
#[command(about = "Rank screening questions by impurity-based utility and run adaptive interviews")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank all reachable questions by informativeness (offline pass)
    Rank(RankArgs),

    /// Print the scored question forest
    Tree(TreeArgs),

    /// Run an interactive adaptive screening session
    Ask(AskArgs),

    /// Load and check all three artifacts without running anything
    Validate(ArtifactArgs),
}

/// The three input artifacts every command consumes.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Dataset artifact (JSON table of answered questionnaires)
    pub dataset: PathBuf,

    /// Question catalog artifact (code → prompt and value kind)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Dependency forest artifact (code → child codes or null)
    #[arg(long)]
    pub forest: PathBuf,

    /// Outcome code; its forest children are the root questions
    #[arg(long)]
    pub outcome: String,
}

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Weight policy: rarity or impurity
    #[arg(long, default_value = "rarity")]
    pub policy: WeightPolicy,

    /// Maximum recursion depth for the forest build
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum sample count below which recursion stops
    #[arg(long)]
    pub min_samples: Option<usize>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Weight policy: rarity or impurity
    #[arg(long, default_value = "rarity")]
    pub policy: WeightPolicy,

    /// Maximum recursion depth for the forest build
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Emit serialized nodes instead of the text rendering
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Terminate once the live subset falls below this row count
    #[arg(long, default_value_t = 100)]
    pub min_sample: usize,

    /// Per-round pruning bound relative to the best score (>= 1.0)
    #[arg(long, default_value_t = 1.5)]
    pub reject_multiplier: f64,

    /// Weight policy: rarity or impurity
    #[arg(long, default_value = "rarity")]
    pub policy: WeightPolicy,
}

#[derive(Debug)]
struct Artifacts {
    dataset: Dataset,
    catalog: QuestionCatalog,
    forest: DependencyForest,
    roots: Vec<String>,
}

fn load_artifacts(args: &ArtifactArgs) -> Result<Artifacts> {
    let catalog = load_catalog(&args.catalog)?;
    let forest = load_forest(&args.forest)?;
    let dataset = load_dataset(&args.dataset, &catalog)?;

    let roots = forest
        .children_of(&args.outcome)
        .map(<[String]>::to_vec)
        .ok_or_else(|| {
            CribarError::InvalidParameter(format!(
                "outcome '{}' has no root questions in the dependency forest",
                args.outcome
            ))
        })?;

    // a root the catalog or dataset has never heard of would be silently
    // filtered later, leaving a mystifyingly empty session
    for root in &roots {
        if !catalog.contains(root) || dataset.column_index(root).is_none() {
            return Err(CribarError::UnknownQuestion { question: root.clone() });
        }
    }

    Ok(Artifacts { dataset, catalog, forest, roots })
}

/// Execute a parsed CLI invocation.
pub fn run_command(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    match cli.command {
        Command::Rank(args) => cmd_rank(&args, level),
        Command::Tree(args) => cmd_tree(&args, level),
        Command::Ask(args) => cmd_ask(&args, level),
        Command::Validate(args) => cmd_validate(&args, level),
    }
}

fn cmd_rank(args: &RankArgs, level: LogLevel) -> Result<()> {
    let a = load_artifacts(&args.artifacts)?;
    let config = BuildConfig {
        max_depth: args.max_depth,
        min_samples: args.min_samples,
        policy: args.policy,
    };
    let builder = TreeBuilder::new(&a.dataset, &a.forest, &a.catalog, config);
    let built = builder.build_forest(&a.roots)?;
    let ranking = rank_questions(&built);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking).map_err(serialization_error)?);
        return Ok(());
    }

    log(level, LogLevel::Verbose, &format!("scored {} questions ({})", ranking.len(), args.policy));
    log(
        level,
        LogLevel::Normal,
        &format!("{:<4} {:<28} {:<10} {:<10}", "#", "question", "score", "best"),
    );
    for (i, entry) in ranking.iter().enumerate() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{:<4} {:<28} {:<10.4} {:<10.4}",
                i + 1,
                entry.question,
                entry.score,
                entry.best_score
            ),
        );
    }
    Ok(())
}

fn cmd_tree(args: &TreeArgs, level: LogLevel) -> Result<()> {
    let a = load_artifacts(&args.artifacts)?;
    let config = BuildConfig { max_depth: args.max_depth, min_samples: None, policy: args.policy };
    let builder = TreeBuilder::new(&a.dataset, &a.forest, &a.catalog, config);
    let built = builder.build_forest(&a.roots)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&built).map_err(serialization_error)?);
        return Ok(());
    }

    for root in &built {
        log(level, LogLevel::Normal, root.render().trim_end());
    }
    Ok(())
}

fn cmd_ask(args: &AskArgs, level: LogLevel) -> Result<()> {
    let a = load_artifacts(&args.artifacts)?;
    let config = SessionConfig {
        min_sample_threshold: args.min_sample,
        reject_multiplier: args.reject_multiplier,
        policy: args.policy,
    };
    let mut collector = StdinCollector::new(&a.catalog);
    let session =
        run_session(&a.roots, &a.dataset, &a.forest, &a.catalog, &mut collector, &config)?;

    log(level, LogLevel::Normal, "");
    match session.state() {
        SessionState::DoneQueueEmpty => {
            log(level, LogLevel::Normal, "Session over: no candidate questions remain.");
        }
        SessionState::DoneSubsetTooSmall => {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Session over: matching sample shrank below {} rows.",
                    args.min_sample
                ),
            );
        }
        SessionState::Running => unreachable!("run_session returns terminal sessions"),
    }

    for (round, records) in session.score_rounds().iter().enumerate() {
        log(level, LogLevel::Verbose, &format!("\nRound {} scores:", round + 1));
        for record in records {
            log(level, LogLevel::Verbose, &format!("  {record}"));
        }
    }

    log(level, LogLevel::Normal, "\nRecorded answers:");
    for (question, answer) in session.asked() {
        log(
            level,
            LogLevel::Normal,
            &format!("  {} = {answer}", a.catalog.prompt_or_code(question)),
        );
    }

    let subset_counts = ClassCounts::from_subset(session.subset());
    let full_counts = ClassCounts::from_dataset(&a.dataset);
    let assessment = aggregate_risk(&subset_counts, &full_counts, a.dataset.n_rows());

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "matching rows: {}; rarity-adjusted scores: low={:.2} medium={:.2} high={:.2}",
            session.subset().len(),
            assessment.scores.low,
            assessment.scores.medium,
            assessment.scores.high
        ),
    );
    log(level, LogLevel::Normal, &format!("\nRisk is probably: {}", assessment.class));
    log(level, LogLevel::Normal, &format!("({})", assessment.rationale));
    Ok(())
}

fn cmd_validate(args: &ArtifactArgs, level: LogLevel) -> Result<()> {
    let a = load_artifacts(args)?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "dataset: {} rows, {} question columns",
            a.dataset.n_rows(),
            a.dataset.columns().len()
        ),
    );
    log(level, LogLevel::Normal, &format!("catalog: {} declared questions", a.catalog.len()));
    log(
        level,
        LogLevel::Normal,
        &format!("forest: {} mapped codes, acyclic, {} root questions", a.forest.len(), a.roots.len()),
    );
    Ok(())
}

fn serialization_error(e: serde_json::Error) -> CribarError {
    CribarError::InvalidParameter(format!("failed to serialize output: {e}"))
}
