//! # teller-console: Terminal I/O for Teller Shells
//!
//! A [`Console`] wraps one input and one output stream and provides the
//! prompt/read/print primitives both shells are built from.
//!
//! ## Prompt Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prompt("Enter PIN: ")                                                  │
//! │       │                                                                 │
//! │       ├── write label, flush (no newline)                              │
//! │       ├── read one line                                                │
//! │       │     ├── EOF      → Ok(None)   (shell treats it as Exit)        │
//! │       │     └── a line   → Ok(Some(line without "\n" / "\r\n"))        │
//! │       ▼                                                                 │
//! │  prompt_money / prompt_parsed: repeat until the line parses            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are returned verbatim apart from the line terminator: ids and PINs
//! are compared exactly, so nothing else is trimmed here.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use teller_core::Money;

/// Shown when an amount prompt receives something that isn't a number.
pub const INVALID_NUMBER: &str = "Invalid input. Please enter a numeric value.";

/// Line-oriented console over any reader/writer pair.
///
/// ## Example
/// ```rust
/// use std::io::Cursor;
/// use teller_console::Console;
///
/// let mut console = Console::new(Cursor::new("A1\n"), Vec::new());
/// let id = console.prompt("Enter account number: ").unwrap();
/// assert_eq!(id.as_deref(), Some("A1"));
/// assert_eq!(console.output(), b"Enter account number: ");
/// ```
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Console bound to the process's stdin and stdout.
pub type StdConsole = Console<io::StdinLock<'static>, io::Stdout>;

/// Creates a console on stdin/stdout.
pub fn stdio() -> StdConsole {
    Console::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Prints `label` and reads one line. `Ok(None)` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    /// Prompts until the line parses as `T`, printing `invalid` after each
    /// failed attempt. `Ok(None)` at end of input.
    pub fn prompt_parsed<T: FromStr>(
        &mut self,
        label: &str,
        invalid: &str,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(invalid)?,
            }
        }
    }

    /// Prompts for a money amount, re-prompting on non-numeric input.
    ///
    /// Any number is returned, including zero and negatives; range checks
    /// belong to the ledger.
    pub fn prompt_money(&mut self, label: &str) -> io::Result<Option<Money>> {
        self.prompt_parsed::<Money>(label, INVALID_NUMBER)
    }

    /// The output written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Unwraps the console into its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
