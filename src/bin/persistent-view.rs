use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "persistent-view", version)]
struct Cli {
    /// Emit debug-level logs on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a navigation scenario and print one JSON record per frame.
    Simulate(SimulateArgs),
    /// Convert an element box into viewport-centered position and scale.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON-lines path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long, allow_hyphen_values = true)]
    left: f64,
    #[arg(long, allow_hyphen_values = true)]
    top: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    /// Viewport width.
    #[arg(long)]
    vw: f64,
    /// Viewport height.
    #[arg(long)]
    vh: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scenario = persistent_view::Scenario::from_path(&args.in_path)?;
    let records = persistent_view::run_scenario(&scenario)?;

    let mut out: Box<dyn std::io::Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create trace '{}'", path.display()))?;
            Box::new(std::io::BufWriter::new(f))
        }
        None => Box::new(std::io::stdout().lock()),
    };
    for r in &records {
        serde_json::to_writer(&mut out, r)?;
        writeln!(out)?;
    }
    out.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {} frames to {}", records.len(), path.display());
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let viewport = persistent_view::ViewportDef {
        width: args.vw,
        height: args.vh,
    }
    .validate()?;
    let rect = persistent_view::ClientRect {
        left: args.left,
        top: args.top,
        width: args.width,
        height: args.height,
    };
    let s = persistent_view::sample_rect(rect.to_rect(), viewport.size());
    println!("{}", serde_json::to_string(&s)?);
    Ok(())
}
