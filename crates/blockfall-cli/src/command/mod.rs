use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{auto_play::AutoPlayArg, evaluate::EvaluateArg};

mod auto_play;
mod evaluate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log search decisions and placements (overridden by RUST_LOG)
    #[clap(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let the brain play a game and report the result
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the heuristic metrics and score of an ASCII board
    Evaluate(#[clap(flatten)] EvaluateArg),
}

/// Output format of a report.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_auto_play() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "auto-play",
            "--width",
            "8",
            "--max-pieces",
            "50",
            "--seed",
            "00000000000000000000000000000001",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Mode::AutoPlay(arg) = args.mode else {
            panic!("expected auto-play");
        };
        assert_eq!(arg.width, 8);
        assert_eq!(arg.height, 20);
        assert_eq!(arg.max_pieces, Some(50));
        assert!(arg.seed.is_some());
        assert_eq!(arg.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(
            CommandArgs::try_parse_from(["blockfall", "auto-play", "--seed", "xyz"]).is_err()
        );
    }
}
