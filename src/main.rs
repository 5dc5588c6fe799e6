use crate::{
    app::{App, TerminalGuard},
    config::Config,
    render::{StrokeStyle, TerminalRenderer},
    sequence::{Chain, Sequencer, StepMode, Ticker},
    trace::run_trace,
};
use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use log::info;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

mod app;
mod config;
mod render;
mod sequence;
mod trace;

/// Corner brackets stepping back and forth along a chain.
///
/// Click anywhere, or press space or enter, to step the next node. Press q to quit.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the configuration file.
    #[arg(short, long, env = "BRACKET_STEP_CONFIG")]
    config: Option<PathBuf>,

    /// The number of nodes in the chain.
    #[arg(short, long)]
    nodes: Option<usize>,

    /// The time between animation ticks, in milliseconds.
    #[arg(long)]
    period_ms: Option<u64>,

    /// How much a node grows or shrinks on every tick.
    #[arg(long)]
    increment: Option<f64>,

    /// Keep stepping from node to node until the chain turns around.
    #[arg(short, long)]
    sweep: bool,

    /// How bracket strokes are colored.
    #[arg(long, value_enum)]
    stroke: Option<StrokeStyle>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run headless, printing the events caused by this many activations.
    #[arg(long, value_name = "ACTIVATIONS")]
    trace: Option<u32>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(nodes) = self.nodes {
            config.sequence.nodes = nodes;
        }
        if let Some(period) = self.period_ms {
            config.sequence.tick_period_ms = period;
        }
        if let Some(increment) = self.increment {
            config.sequence.increment = increment;
        }
        if self.sweep {
            config.sequence.mode = StepMode::Sweep;
        }
        if let Some(stroke) = self.stroke {
            config.display.stroke = stroke;
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bracket-step").map(|dirs| dirs.config_dir().join("config.yaml"))
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, default_config_path()) {
        (Some(path), _) => {
            info!("loading config from {}", path.display());
            Config::load(path)?
        }
        (None, Some(path)) => {
            info!("looking for config in {}", path.display());
            Config::load_or_default(&path)?
        }
        (None, None) => Config::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = load_config(&cli)?;
    let chain = Chain::new(&config.sequence)?;
    let ticker = Ticker::new(config.sequence.tick_period());
    let mut sequencer = Sequencer::new(chain, ticker, config.sequence.mode);

    if let Some(activations) = cli.trace {
        run_trace(&mut sequencer, activations, io::stdout().lock()).context("writing trace")?;
        return Ok(());
    }

    let size = crossterm::terminal::size().context("querying terminal size")?;
    let guard = TerminalGuard::enter(io::stdout()).context("setting up terminal")?;
    let renderer = TerminalRenderer::new(io::stdout(), size, config.display.background, config.display.stroke);
    info!("running with {} nodes in {} mode", config.sequence.nodes, config.sequence.mode);
    let result = App::new(sequencer, renderer).run();
    drop(guard);
    result.context("running animation")
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bracket-step").chain(args.iter().copied())).expect("invalid args")
    }

    #[test]
    fn overrides_replace_file_values() {
        let cli = cli(&["--nodes", "8", "--period-ms", "20", "--increment", "0.1", "--sweep", "--stroke", "rainbow"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.sequence.nodes, 8);
        assert_eq!(config.sequence.tick_period_ms, 20);
        assert_eq!(config.sequence.increment, 0.1);
        assert_eq!(config.sequence.mode, StepMode::Sweep);
        assert_eq!(config.display.stroke, StrokeStyle::Rainbow);
    }

    #[test]
    fn no_overrides_keep_defaults() {
        let cli = cli(&[]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.sequence.nodes, 5);
        assert_eq!(config.sequence.mode, StepMode::Step);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let mut config = Config::default();
        cli(&["--nodes", "0"]).apply_overrides(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "sequence:\n  nodes: 2\n").expect("failed to write");
        let config = load_config(&cli(&["--config", path.to_str().expect("non utf8 path")])).expect("load failed");
        assert_eq!(config.sequence.nodes, 2);
    }
}
