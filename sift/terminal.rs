//! Controlling-terminal session.
//!
//! All interaction goes through `/dev/tty` so stdin can stay a data pipe
//! and stdout stays clean for the selection result. The session owns both
//! tty handles and the saved termios attributes; there is no global
//! terminal state. Restoration is idempotent and runs on drop, so every
//! exit path (normal, error, panic unwind) puts the terminal back. The
//! interrupt path gets its own copy of the restore data (see
//! [`TtyRestore`]) because it cannot reach this object from signal
//! context.

use std::{
  fs::{
    File,
    OpenOptions,
  },
  io::{
    self,
    BufWriter,
    Write,
  },
  os::fd::{
    AsRawFd,
    RawFd,
  },
};

use crossterm::{
  cursor::{
    Hide,
    MoveTo,
    Show,
  },
  queue,
  style::{
    Attribute,
    Print,
    SetAttribute,
  },
  terminal::{
    self,
    Clear,
    ClearType,
    EnterAlternateScreen,
    LeaveAlternateScreen,
  },
};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Error)]
pub enum TerminalError {
  #[error("cannot open /dev/tty: {0}")]
  Open(#[source] io::Error),

  #[error("cannot read terminal attributes: {0}")]
  Attributes(#[source] io::Error),

  #[error("cannot switch terminal to non-canonical mode: {0}")]
  RawMode(#[source] io::Error),

  #[error("terminal write failed: {0}")]
  Write(#[from] io::Error),
}

/// Everything the SIGINT handler needs to undo the session: plain copies,
/// reachable without allocation from signal context.
#[derive(Clone, Copy)]
pub struct TtyRestore {
  pub in_fd:      RawFd,
  pub out_fd:     RawFd,
  pub attributes: libc::termios,
  pub alternate:  bool,
}

pub struct Tty {
  input:     File,
  output:    BufWriter<File>,
  saved:     libc::termios,
  alternate: bool,
  restored:  bool,
}

impl Tty {
  /// Open the controlling terminal, save its attributes and disable
  /// canonical mode and echo. Interrupt generation (ISIG) stays on: Ctrl-C
  /// must keep delivering SIGINT for the interrupt exit path.
  pub fn new(alternate: bool) -> Result<Self, TerminalError> {
    let input = OpenOptions::new()
      .read(true)
      .open("/dev/tty")
      .map_err(TerminalError::Open)?;
    let output = OpenOptions::new()
      .write(true)
      .open("/dev/tty")
      .map_err(TerminalError::Open)?;

    let fd = input.as_raw_fd();
    let saved = tcgetattr(fd).map_err(TerminalError::Attributes)?;

    let mut raw = saved;
    raw.c_lflag &= !(libc::ICANON | libc::ECHO);
    tcsetattr(fd, &raw).map_err(TerminalError::RawMode)?;

    let mut tty = Self {
      input,
      output: BufWriter::new(output),
      saved,
      alternate,
      restored: false,
    };

    if tty.alternate {
      queue!(tty.output, EnterAlternateScreen)?;
    }
    queue!(tty.output, Clear(ClearType::All))?;
    tty.flush()?;

    Ok(tty)
  }

  /// The restore data the interrupt handler captures at session start.
  pub fn restore_handle(&self) -> TtyRestore {
    TtyRestore {
      in_fd:      self.input.as_raw_fd(),
      out_fd:     self.output.get_ref().as_raw_fd(),
      attributes: self.saved,
      alternate:  self.alternate,
    }
  }

  /// Put the terminal back: original attributes, cleared screen, visible
  /// cursor, primary screen buffer. Safe to call more than once; only the
  /// first call does anything.
  pub fn restore(&mut self) -> io::Result<()> {
    if self.restored {
      return Ok(());
    }
    self.restored = true;

    tcsetattr(self.input.as_raw_fd(), &self.saved)?;
    queue!(
      self.output,
      SetAttribute(Attribute::Reset),
      Clear(ClearType::All),
      MoveTo(0, 0),
      Show
    )?;
    if self.alternate {
      queue!(self.output, LeaveAlternateScreen)?;
    }
    self.output.flush()
  }

  /// The raw key source for the input dispatcher.
  pub fn input_mut(&mut self) -> &mut File {
    &mut self.input
  }

  /// Terminal dimensions as (rows, cols).
  pub fn size(&self) -> io::Result<(usize, usize)> {
    let (cols, rows) = terminal::size()?;
    Ok((rows as usize, cols as usize))
  }

  /// Write one full-width line: truncated to `width` display columns,
  /// padded with spaces, optionally in reverse video so the padding
  /// highlights the whole row.
  pub fn write_line(&mut self, row: u16, width: usize, text: &str, standout: bool) -> io::Result<()> {
    let line = fit_to_width(text, width);

    queue!(self.output, MoveTo(0, row))?;
    if standout {
      queue!(self.output, SetAttribute(Attribute::Reverse))?;
    }
    queue!(self.output, Print(line))?;
    if standout {
      queue!(self.output, SetAttribute(Attribute::NoReverse))?;
    }
    Ok(())
  }

  pub fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
    queue!(self.output, MoveTo(col, row))
  }

  pub fn show_cursor(&mut self) -> io::Result<()> {
    queue!(self.output, Show)
  }

  pub fn hide_cursor(&mut self) -> io::Result<()> {
    queue!(self.output, Hide)
  }

  pub fn flush(&mut self) -> io::Result<()> {
    self.output.flush()
  }
}

impl Drop for Tty {
  fn drop(&mut self) {
    let _ = self.restore();
  }
}

/// Truncate `text` to `width` display columns and pad with spaces. A wide
/// character that would straddle the edge is dropped, not split.
fn fit_to_width(text: &str, width: usize) -> String {
  let mut line = String::with_capacity(width);
  let mut used = 0;
  for c in text.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > width {
      break;
    }
    line.push(c);
    used += w;
  }
  line.extend(std::iter::repeat(' ').take(width - used));
  line
}

fn tcgetattr(fd: RawFd) -> io::Result<libc::termios> {
  let mut attributes = std::mem::MaybeUninit::<libc::termios>::uninit();
  if unsafe { libc::tcgetattr(fd, attributes.as_mut_ptr()) } != 0 {
    return Err(io::Error::last_os_error());
  }
  Ok(unsafe { attributes.assume_init() })
}

fn tcsetattr(fd: RawFd, attributes: &libc::termios) -> io::Result<()> {
  if unsafe { libc::tcsetattr(fd, libc::TCSANOW, attributes) } != 0 {
    return Err(io::Error::last_os_error());
  }
  Ok(())
}
