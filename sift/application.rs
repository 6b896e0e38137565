//! The interactive session loop.
//!
//! Strictly synchronous: draw a frame, block on one key, apply it, repeat.
//! Every event runs to completion before the next read, so display state
//! never drifts from the picker state it was drawn from.

use anyhow::{
  Context,
  Result,
};
use sift_core::{
  Choice,
  Picker,
};

use crate::{
  input::{
    self,
    Key,
  },
  signal,
  terminal::Tty,
  ui,
};

pub struct App {
  picker: Picker,
  tty:    Tty,
}

impl App {
  pub fn new(choices: Vec<Choice>, initial_query: &str, alternate_screen: bool) -> Result<Self> {
    let tty = Tty::new(alternate_screen).context("cannot start terminal session")?;
    signal::install(tty.restore_handle()).context("cannot install interrupt handler")?;

    let mut picker = Picker::new(choices);
    let (rows, _) = tty.size().context("cannot read terminal size")?;
    picker.set_max_visible(rows.saturating_sub(1));
    picker.set_query(initial_query);

    Ok(Self { picker, tty })
  }

  /// Run until a candidate is confirmed and return its text. The terminal
  /// is restored before this returns on every path; a failed key read is
  /// fatal (the session has no key source left).
  pub fn run(mut self) -> Result<String> {
    loop {
      let (rows, _) = self.tty.size()?;
      self.picker.set_max_visible(rows.saturating_sub(1));
      ui::draw(&mut self.tty, &self.picker)?;

      let key = input::read_key(self.tty.input_mut())
        .context("terminal input stream closed")?;

      match key {
        Key::Confirm => {
          if let Some(choice) = self.picker.confirm() {
            let text = choice.text.clone();
            log::info!("confirmed {text:?}");
            self.tty.restore()?;
            return Ok(text);
          }
        },
        Key::SelectionUp => self.picker.move_selection_up(),
        Key::SelectionDown => self.picker.move_selection_down(),
        Key::CursorLeft => self.picker.move_cursor_left(),
        Key::CursorRight => self.picker.move_cursor_right(),
        Key::CursorHome => self.picker.move_cursor_home(),
        Key::CursorEnd => self.picker.move_cursor_end(),
        Key::DeleteBackward => self.picker.delete_backward(),
        Key::DeleteForward => self.picker.delete_forward(),
        Key::DeleteToStart => self.picker.delete_to_start(),
        Key::DeleteToEnd => self.picker.delete_to_end(),
        Key::DeleteWordBackward => self.picker.delete_word_backward(),
        Key::Insert(c) => self.picker.insert_char(c),
        Key::Ignored => {},
      }
    }
  }
}
