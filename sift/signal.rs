//! Interrupt cleanup.
//!
//! Ctrl-C must never leave the terminal in non-canonical mode, so a SIGINT
//! handler restores the saved attributes and screen before the process
//! dies with the conventional `128 + signal` status. The handler runs in
//! signal context and is limited to async-signal-safe calls: everything it
//! touches (file descriptors, a termios copy, static escape strings) is
//! captured by value at registration time, and it finishes with `_exit`.

use std::io;

use signal_hook::consts::SIGINT;

use crate::terminal::TtyRestore;

const INTERRUPT_STATUS: i32 = 128 + SIGINT;

/// Reset attributes, clear, home the cursor, make it visible.
const RESTORE_SCREEN: &[u8] = b"\x1b[0m\x1b[2J\x1b[H\x1b[?25h";
/// Switch back to the primary screen buffer.
const LEAVE_ALTERNATE: &[u8] = b"\x1b[?1049l";

/// Register the SIGINT handler for this session. Must be called after the
/// terminal session is set up, once per process.
pub fn install(restore: TtyRestore) -> io::Result<()> {
  unsafe {
    signal_hook::low_level::register(SIGINT, move || unsafe {
      libc::tcsetattr(restore.in_fd, libc::TCSANOW, &restore.attributes);
      libc::write(
        restore.out_fd,
        RESTORE_SCREEN.as_ptr().cast(),
        RESTORE_SCREEN.len(),
      );
      if restore.alternate {
        libc::write(
          restore.out_fd,
          LEAVE_ALTERNATE.as_ptr().cast(),
          LEAVE_ALTERNATE.len(),
        );
      }
      libc::_exit(INTERRUPT_STATUS);
    })?;
  }
  Ok(())
}
