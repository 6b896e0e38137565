//! Command-line interface and logging setup.

use std::path::PathBuf;

use anyhow::Result;
use clap::{
  ArgAction,
  Parser,
};

/// Interactive fuzzy selector: candidates on stdin (one per line, optional
/// tab-separated description), the chosen candidate's text on stdout.
#[derive(Debug, Parser)]
#[command(name = "sift", about, version)]
pub struct Cli {
  /// Pre-fill the query before the first keystroke
  #[arg(short = 'q', long = "query", value_name = "QUERY")]
  pub query: Option<String>,

  /// Render on the terminal's alternate screen buffer
  #[arg(short = 'a', long = "alternate-screen")]
  pub alternate_screen: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  pub verbosity: u8,

  /// Save logs to a specific file instead of stderr
  #[arg(long = "log", value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

/// Wire up the logger: level from the `-v` count, output to `--log FILE`
/// or stderr. The tty being drawn on is never a log target.
pub fn setup_logging(cli: &Cli) -> Result<()> {
  let level = match cli.verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "[{}] [{}] {}",
        record.level(),
        record.target(),
        message
      ))
    })
    .level(level);

  let dispatch = match &cli.log_file {
    Some(path) => dispatch.chain(fern::log_file(path)?),
    None => dispatch.chain(std::io::stderr()),
  };

  dispatch.apply()?;
  Ok(())
}
