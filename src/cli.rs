use crate::config::load_config;
use crate::context::LayoutContext;
use crate::document::SequenceDocument;
use crate::layout::layout_with_config;
use crate::layout_dump::{write_layout_dump, write_layout_dump_to};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seqlayout", version, about = "Sequence diagram auto-layout")]
pub struct Args {
    /// Input document (.json5 / .json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file with layout tunables
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let document = SequenceDocument::parse(&input).context("failed to parse input document")?;
    let mut graph = document.to_graph()?;

    let ctx = LayoutContext::new();
    layout_with_config(&ctx, &mut graph, &config)?;
    tracing::info!(
        actors = graph.actors().len(),
        edges = graph.edges.len(),
        "layout complete"
    );

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &graph, config.horizontal_pad)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => write_layout_dump_to(io::stdout().lock(), &graph, config.horizontal_pad)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
