use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use story_graph::{builtin, StoryGraph};
use story_session::{
    play::{self, OutputMode},
    render::Renderer,
    Config, LogFormat,
};

/// Interactive Hindi story in the terminal.
#[derive(Debug, Parser)]
#[command(name = "chand", version, about)]
struct Cli {
    /// Config file (default: ./chand.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "story_session=debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read the story interactively (default)
    Play(PlayArgs),
    /// Check a story file and print its report
    Validate(StoryArgs),
    /// Print a story as JSON
    Export(StoryArgs),
}

#[derive(Debug, Args, Default)]
struct StoryArgs {
    /// Story file (.toml or .json); the bundled story if omitted
    #[arg(long)]
    story: Option<PathBuf>,
}

#[derive(Debug, Args, Default)]
struct PlayArgs {
    #[command(flatten)]
    story: StoryArgs,

    /// Emit each screen as a JSON view instead of text
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Start with the history trail hidden
    #[arg(long)]
    hide_trail: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config);
    debug!(story = ?config.story, "configuration loaded");

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => run_play(&config, args),
        Command::Validate(args) => run_validate(&config, args),
        Command::Export(args) => run_export(&config, args),
    }
}

/// Initialize tracing/logging. Logs go to stderr; stdout is the story.
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}

/// CLI flag wins over config; neither means the bundled story.
fn load_story(config: &Config, args: &StoryArgs) -> anyhow::Result<StoryGraph> {
    match args.story.as_deref().or(config.story.as_deref()) {
        Some(path) => load_story_file(path),
        None => builtin::chand_ki_kahani().context("bundled story is invalid"),
    }
}

fn load_story_file(path: &Path) -> anyhow::Result<StoryGraph> {
    StoryGraph::load(path).with_context(|| format!("failed to load story {}", path.display()))
}

fn run_play(config: &Config, args: PlayArgs) -> anyhow::Result<()> {
    let graph = load_story(config, &args.story)?;
    debug!(clean = graph.report().is_clean(), "story checked");

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let mut renderer = Renderer::new(
        config.labels.clone(),
        config.color && !args.no_color,
        config.show_trail && !args.hide_trail,
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    play::run(&graph, &mut renderer, mode, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn run_validate(config: &Config, args: StoryArgs) -> anyhow::Result<()> {
    let graph = load_story(config, &args)?;
    let report = graph.report();
    info!(nodes = report.node_count, "story validated");

    println!("root:        {}", report.root);
    println!("nodes:       {}", report.node_count);
    println!("choices:     {}", report.choice_count);
    println!(
        "endings:     {}",
        report.terminal.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
    );
    if !report.unreachable.is_empty() {
        println!(
            "unreachable: {}",
            report.unreachable.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    if report.terminal.is_empty() {
        bail!("story has no ending");
    }
    Ok(())
}

fn run_export(config: &Config, args: StoryArgs) -> anyhow::Result<()> {
    let graph = load_story(config, &args)?;
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &graph.to_document())?;
    println!();
    Ok(())
}
