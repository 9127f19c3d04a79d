use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scene_bench::context::{BenchmarkContext, RunSettings};
use scene_bench::{AppConfig, SceneRegistry};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "scene-bench")]
#[command(about = "Widget toolkit rendering benchmark", long_about = None)]
struct Cli {
    /// Configuration file (default: ./scene-bench.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every scene and print the weighted FPS (default)
    Run(RunArgs),
    /// List the built-in scenes and their weights
    List,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Display width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Display height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Display density used to scale object sizes
    #[arg(long)]
    dpi: Option<u32>,

    /// Advance scene time instantly instead of waiting on the wall clock
    #[arg(long)]
    virtual_clock: bool,

    /// Export results to file (supports .json, .toml, .md)
    #[arg(long)]
    export_report: Option<PathBuf>,

    /// Save the last frame of every pass as PNG into this directory
    #[arg(long)]
    screenshots: Option<PathBuf>,

    /// Exit with status 1 if the weighted FPS is below this value
    #[arg(long)]
    fail_below: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::List) => {
            list_scenes();
            Ok(())
        }
        Some(Commands::Run(args)) => run(cli.config, args),
        None => run(cli.config, RunArgs::default()),
    }
}

fn list_scenes() {
    let registry = SceneRegistry::builtin();
    println!("{:>3}  {:<28} {:>6}", "#", "Scene", "Weight");
    for (index, scene) in registry.iter().enumerate() {
        println!("{:>3}  {:<28} {:>6}", index + 1, scene.name(), scene.weight());
    }
    println!("\n{} scenes, {} passes", registry.len(), registry.len() * 2);
}

fn run(config_path: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let mut config =
        AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    // CLI flags win over config
    if let Some(width) = args.width {
        config.display.width = width;
    }
    if let Some(height) = args.height {
        config.display.height = height;
    }
    if let Some(dpi) = args.dpi {
        config.display.dpi = dpi;
    }
    if args.virtual_clock {
        config.host.virtual_clock = true;
    }

    println!("🖥️  Scene Bench - rendering benchmark");

    let settings = RunSettings {
        metrics: config.display_metrics()?,
        refresh_period: config.refresh_period(),
        virtual_clock: config.host.virtual_clock,
        screenshots: args.screenshots,
    };
    let report = BenchmarkContext::run(&settings)?;

    if let Some(dir) = &settings.screenshots {
        println!("\n🖼️  Screenshots saved in: {}", dir.display());
    }

    // Export Report
    if let Some(path) = &args.export_report {
        report.export(path)?;
        println!("\n📄 Report exported to: {}", path.display());
    }

    // Fail on low score
    if let Some(threshold) = args.fail_below {
        if report.weighted_fps < threshold {
            eprintln!(
                "\n❌ Weighted FPS {} is below threshold {}",
                report.weighted_fps, threshold
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
