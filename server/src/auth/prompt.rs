//! Terminal Prompts

use std::io::{self, BufRead, Write};

/// Source of interactive answers
pub trait Prompter {
    /// Ask for a value, echoing the input
    fn ask(&mut self, label: &str) -> io::Result<String>;

    /// Ask for a secret without echoing the input
    fn ask_hidden(&mut self, label: &str) -> io::Result<String>;
}

/// Prompts on stderr and reads answers from stdin
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str) -> io::Result<String> {
        write_label(label)?;
        read_line()
    }

    fn ask_hidden(&mut self, label: &str) -> io::Result<String> {
        write_label(label)?;
        read_hidden_line()
    }
}

fn write_label(label: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    stderr.write_all(label.as_bytes())?;
    stderr.flush()
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed while waiting for input",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a line with terminal echo disabled
///
/// Falls back to a plain read when stdin is not a terminal.
#[cfg(unix)]
fn read_hidden_line() -> io::Result<String> {
    let fd = libc::STDIN_FILENO;

    if unsafe { libc::isatty(fd) } != 1 {
        return read_line();
    }

    let mut term = std::mem::MaybeUninit::<libc::termios>::uninit();
    if unsafe { libc::tcgetattr(fd, term.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let original = unsafe { term.assume_init() };

    let mut hidden = original;
    hidden.c_lflag &= !libc::ECHO;
    hidden.c_lflag |= libc::ECHONL;
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &hidden) } != 0 {
        return Err(io::Error::last_os_error());
    }

    let result = read_line();

    // Restore even when the read failed
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, &original);
    }

    result
}

#[cfg(not(unix))]
fn read_hidden_line() -> io::Result<String> {
    read_line()
}
