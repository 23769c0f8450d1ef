//! # ATM Shell
//!
//! The menu loop of the ATM.
//!
//! ## Session State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────── Main Menu (LoggedOut) ◄───────────────┐                 │
//! │   │  1. Create Account  → create, stay here           │                 │
//! │   │  2. Login ──────────── ok ──► Account Menu ───────┤ 4. Logout       │
//! │   │             └────── failed ─► stay here           │                 │
//! │   │  3. Exit            → goodbye                     │                 │
//! │   │                                                   │                 │
//! │   │                     Account Menu (LoggedIn)       │                 │
//! │   │                     1. Check Balance  2. Deposit  │                 │
//! │   │                     3. Withdraw       4. Logout ──┘                 │
//! │   └─────────────────────────────────────────────────────────────────────│
//! │                                                                         │
//! │   End of input at any prompt behaves like Exit.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The LoggedIn state is a [`Session`] value: it borrows the directory for
//! as long as the account menu runs and is consumed by Logout.

use std::io::{self, BufRead, Write};

use teller_console::Console;
use teller_core::{AccountDirectory, LedgerError, Session};
use tracing::{error, info, warn};

const GOODBYE: &str = "Thank you for using the ATM. Goodbye!";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Whether the shell keeps running after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Console ATM over an [`AccountDirectory`].
///
/// ## Usage
/// ```rust
/// use std::io::Cursor;
/// use teller_atm::AtmShell;
/// use teller_console::Console;
/// use teller_core::AccountDirectory;
///
/// let input = Cursor::new("1\nA1\n1234\n100\n3\n");
/// let mut shell = AtmShell::new(Console::new(input, Vec::new()), AccountDirectory::new());
/// shell.run().unwrap();
/// assert!(shell.directory().contains("A1"));
/// ```
pub struct AtmShell<R, W> {
    console: Console<R, W>,
    directory: AccountDirectory,
}

impl<R: BufRead, W: Write> AtmShell<R, W> {
    pub fn new(console: Console<R, W>, directory: AccountDirectory) -> Self {
        AtmShell { console, directory }
    }

    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// Runs the main menu until Exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.blank()?;
            self.console.say("Welcome to the ATM")?;
            self.console.say("1. Create Account")?;
            self.console.say("2. Login")?;
            self.console.say("3. Exit")?;

            let Some(choice) = self.console.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.create_account()?,
                "2" => self.login()?,
                "3" => Flow::Exit,
                _ => {
                    self.console.say(INVALID_CHOICE)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.console.say(GOODBYE)
    }

    fn create_account(&mut self) -> io::Result<Flow> {
        let Some(id) = self.console.prompt("Enter new account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.console.prompt("Enter new PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(initial) = self.console.prompt_money("Enter initial deposit amount: ")? else {
            return Ok(Flow::Exit);
        };

        match self.directory.create(&id, &pin, initial) {
            Ok(()) => {
                info!(account = %id, "Account created");
                self.console.say("Account created successfully!")?;
            }
            Err(LedgerError::DuplicateIdentifier(_)) => {
                self.console
                    .say("Account number already exists. Please try again.")?;
            }
            Err(e) => {
                error!(error = %e, "Account creation failed");
                self.console.say(format!("Could not create account: {e}"))?;
            }
        }

        Ok(Flow::Continue)
    }

    fn login(&mut self) -> io::Result<Flow> {
        let Some(id) = self.console.prompt("Enter account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.console.prompt("Enter PIN: ")? else {
            return Ok(Flow::Exit);
        };

        // Split borrow: the session holds the directory, the menu the console
        let AtmShell { console, directory } = self;

        match Session::open(directory, &id, &pin) {
            Ok(session) => {
                info!(account = %id, "Login");
                console.say("Login successful!")?;
                account_menu(console, session)
            }
            Err(_) => {
                warn!(account = %id, "Failed login");
                console.say("Invalid account number or PIN. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }
}

/// Runs the account menu for one session.
fn account_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    mut session: Session<'_>,
) -> io::Result<Flow> {
    loop {
        console.blank()?;
        console.say("Account Menu")?;
        console.say("1. Check Balance")?;
        console.say("2. Deposit Money")?;
        console.say("3. Withdraw Money")?;
        console.say("4. Logout")?;

        let Some(choice) = console.prompt("Enter your choice: ")? else {
            return Ok(Flow::Exit);
        };

        match choice.trim() {
            "1" => {
                console.say(format!("Your balance is: {}", session.inquire()))?;
            }
            "2" => {
                let Some(amount) = console.prompt_money("Enter amount to deposit: ")? else {
                    return Ok(Flow::Exit);
                };
                match session.deposit(amount) {
                    Ok(_) => console.say(format!("{amount} deposited successfully!"))?,
                    Err(_) => console.say("Invalid deposit amount. Please try again.")?,
                }
            }
            "3" => {
                let Some(amount) = console.prompt_money("Enter amount to withdraw: ")? else {
                    return Ok(Flow::Exit);
                };
                match session.withdraw(amount) {
                    Ok(_) => console.say(format!("{amount} withdrawn successfully!"))?,
                    Err(_) => console.say(
                        "Invalid withdrawal amount or insufficient funds. Please try again.",
                    )?,
                }
            }
            "4" => {
                info!(account = %session.account_id(), "Logout");
                session.close();
                console.say("Logged out successfully!")?;
                return Ok(Flow::Continue);
            }
            _ => console.say(INVALID_CHOICE)?,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
