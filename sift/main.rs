use std::io::{
  self,
  BufRead,
};

use anyhow::{
  Context,
  Result,
};
use clap::Parser;
use sift_core::Choice;

use crate::{
  application::App,
  cli::Cli,
};

mod application;
mod cli;
mod input;
mod signal;
mod terminal;
mod ui;

fn main() -> Result<()> {
  let cli = Cli::parse();
  cli::setup_logging(&cli).context("cannot initialize logging")?;

  let choices = read_choices().context("cannot read candidates from stdin")?;
  log::info!("loaded {} candidates", choices.len());

  let initial_query = cli.query.as_deref().unwrap_or("");
  let app = App::new(choices, initial_query, cli.alternate_screen)?;
  let selection = app.run()?;

  println!("{selection}");
  Ok(())
}

/// One candidate per stdin line; stdin is consumed before the session
/// starts, keys come from the tty afterwards.
fn read_choices() -> io::Result<Vec<Choice>> {
  let stdin = io::stdin();
  let mut choices = Vec::new();
  for line in stdin.lock().lines() {
    choices.push(Choice::parse(&line?));
  }
  Ok(choices)
}
