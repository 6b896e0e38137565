//! Frame rendering.
//!
//! Row 0 is the query line; the ranked matching candidates fill the rows
//! below it, the selected one in reverse video, and any leftover rows are
//! blanked. The hardware cursor parks at the query cursor column after
//! every frame.

use std::io;

use sift_core::{
  Choice,
  Picker,
};

use crate::terminal::Tty;

/// Draw one complete frame. The cursor is hidden while rows are written
/// and shown again before the single flush, so no partial frame is ever
/// visible.
pub fn draw(tty: &mut Tty, picker: &Picker) -> io::Result<()> {
  let (rows, cols) = tty.size()?;
  if rows == 0 || cols == 0 {
    return Ok(());
  }

  tty.hide_cursor()?;

  let scroll = scroll_offset(picker.cursor(), cols);
  let query: String = picker.query().chars().skip(scroll).collect();
  tty.write_line(0, cols, &query, false)?;

  let budget = rows - 1;
  let shown = picker.visible_choices().len().min(budget);
  for (index, choice) in picker.visible_choices()[..shown].iter().enumerate() {
    let row = (index + 1) as u16;
    tty.write_line(row, cols, &display_line(choice), index == picker.selected())?;
  }
  for row in shown + 1..rows {
    tty.write_line(row as u16, cols, "", false)?;
  }

  let col = picker.cursor() - scroll;
  tty.move_cursor(0, col as u16)?;
  tty.show_cursor()?;
  tty.flush()
}

fn display_line(choice: &Choice) -> String {
  if choice.description.is_empty() {
    choice.text.clone()
  } else {
    format!("{} {}", choice.text, choice.description)
  }
}

/// How far the query line scrolls left so the cursor stays on screen.
fn scroll_offset(cursor: usize, width: usize) -> usize {
  if cursor >= width {
    cursor - width + 1
  } else {
    0
  }
}
