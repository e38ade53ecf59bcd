use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nspl2tape::compiler::compile;
use nspl2tape::config::Config;

/// Compile a tokenised stage-play script (NSPL) into a tape-machine
/// program (TAPE).
#[derive(Debug, Parser)]
#[command(name = "nspl2tape", version, about)]
struct Cli {
    /// NSPL source file.
    input: PathBuf,

    /// Write the TAPE program here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Skip the peephole tidy pass.
    #[arg(long)]
    no_tidy: bool,

    /// Override the left-hand arena's nesting bound.
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))
    {
        Ok(source) => source,
        Err(err) => {
            tracing::error!("{err:#}");
            return ExitCode::from(2);
        }
    };

    let mut config = Config::default();
    config.tidy = !cli.no_tidy;
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }

    let tape = match compile(&source, &config) {
        Ok(tape) => tape,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::from(1);
        }
    };

    let write_result = match &cli.output {
        Some(path) => fs::write(path, &tape).with_context(|| format!("writing {}", path.display())),
        None => std::io::stdout()
            .write_all(tape.as_bytes())
            .context("writing to stdout"),
    };

    if let Err(err) = write_result {
        tracing::error!("{err:#}");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
