//! # Inventory Shell
//!
//! The menu loop of the inventory manager.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Login Menu                         Main Menu (after login)            │
//! │  1. Login    ── ok ──────────────►  1. Add Product                     │
//! │  2. Register                        2. Edit Product                    │
//! │  3. Exit                            3. Delete Product                  │
//! │       ▲                             4. View Inventory                  │
//! │       │                             5. Record Sale                     │
//! │       │                             6. Low Stock Report                │
//! │       │                             7. Sales Summary                   │
//! │       └────────────────────────────  8. Logout                         │
//! │                                                                         │
//! │  Every action reads its fields, validates, awaits one store call and   │
//! │  prints the outcome. Store errors are shown, never fatal.              │
//! │  End of input at any prompt behaves like Exit.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use teller_console::Console;
use teller_core::{CoreError, Money, NewProduct, Product, User};
use teller_db::{Database, DbError};
use tracing::{error, info, warn};

use crate::config::InventoryConfig;

const ALL_FIELDS_REQUIRED: &str = "All fields are required";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
const GOODBYE: &str = "Goodbye!";

/// Whether the shell keeps running after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Reads one field or leaves the action with `Flow::Exit` at end of input.
macro_rules! field {
    ($console:expr, $label:expr) => {
        match $console.prompt($label)? {
            Some(value) => value,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Console inventory manager over a [`Database`].
pub struct InventoryShell<R, W> {
    console: Console<R, W>,
    db: Database,
    config: InventoryConfig,
}

impl<R: BufRead, W: Write> InventoryShell<R, W> {
    pub fn new(console: Console<R, W>, db: Database, config: InventoryConfig) -> Self {
        InventoryShell {
            console,
            db,
            config,
        }
    }

    /// Unwraps the shell into its console.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs the login menu until Exit or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.blank()?;
            self.console.say("Inventory Manager")?;
            self.console.say("1. Login")?;
            self.console.say("2. Register")?;
            self.console.say("3. Exit")?;

            let Some(choice) = self.console.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.login().await?,
                "2" => self.register().await?,
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

    // =========================================================================
    // Login Menu
    // =========================================================================

    async fn login(&mut self) -> io::Result<Flow> {
        let username = field!(self.console, "Username: ");
        let password = field!(self.console, "Password: ");

        if username.trim().is_empty() || password.is_empty() {
            self.console.say(ALL_FIELDS_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        match self.db.users().authenticate(&username, &password).await {
            Ok(Some(user)) => {
                info!(username = %user.username, "Login");
                self.console.say(format!("Welcome, {}!", user.username))?;
                self.main_menu(&user).await
            }
            Ok(None) => {
                warn!(username = %username, "Failed login");
                self.console.say("Invalid username or password")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn register(&mut self) -> io::Result<Flow> {
        let username = field!(self.console, "Username: ");
        let password = field!(self.console, "Password: ");

        if username.trim().is_empty() || password.is_empty() {
            self.console.say(ALL_FIELDS_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        match self.db.users().register(&username, &password).await {
            Ok(_) => self.console.say("User registered successfully")?,
            Err(DbError::UniqueViolation { .. }) => self.console.say("Username already exists")?,
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Main Menu
    // =========================================================================

    async fn main_menu(&mut self, user: &User) -> io::Result<Flow> {
        loop {
            self.console.blank()?;
            self.console.say("Main Menu")?;
            self.console.say("1. Add Product")?;
            self.console.say("2. Edit Product")?;
            self.console.say("3. Delete Product")?;
            self.console.say("4. View Inventory")?;
            self.console.say("5. Record Sale")?;
            self.console.say("6. Low Stock Report")?;
            self.console.say("7. Sales Summary")?;
            self.console.say("8. Logout")?;

            let Some(choice) = self.console.prompt("Enter your choice: ")? else {
                return Ok(Flow::Exit);
            };

            let flow = match choice.trim() {
                "1" => self.add_product().await?,
                "2" => self.edit_product().await?,
                "3" => self.delete_product().await?,
                "4" => self.view_inventory().await?,
                "5" => self.record_sale().await?,
                "6" => self.low_stock_report().await?,
                "7" => self.sales_summary().await?,
                "8" => {
                    info!(username = %user.username, "Logout");
                    self.console.say("Logged out successfully!")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.console.say(INVALID_CHOICE)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn add_product(&mut self) -> io::Result<Flow> {
        let name = field!(self.console, "Product name: ");
        let quantity = field!(self.console, "Quantity: ");
        let price = field!(self.console, "Price: ");

        if [&name, &quantity, &price].iter().any(|f| f.trim().is_empty()) {
            self.console.say(ALL_FIELDS_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        let (Ok(quantity), Ok(price)) = (quantity.trim().parse::<i64>(), price.parse::<Money>())
        else {
            self.console.say("Invalid quantity or price")?;
            return Ok(Flow::Continue);
        };

        match self
            .db
            .products()
            .insert(&NewProduct::new(name, quantity, price))
            .await
        {
            Ok(product) => self
                .console
                .say(format!("Product added successfully (ID {})", product.id))?,
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn edit_product(&mut self) -> io::Result<Flow> {
        let id = field!(self.console, "Product ID: ");
        let quantity = field!(self.console, "New quantity: ");
        let price = field!(self.console, "New price: ");

        if [&id, &quantity, &price].iter().any(|f| f.trim().is_empty()) {
            self.console.say(ALL_FIELDS_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        let (Ok(id), Ok(quantity), Ok(price)) = (
            id.trim().parse::<i64>(),
            quantity.trim().parse::<i64>(),
            price.parse::<Money>(),
        ) else {
            self.console.say("Invalid ID, quantity or price")?;
            return Ok(Flow::Continue);
        };

        match self.db.products().update(id, quantity, price.cents()).await {
            Ok(()) => self.console.say("Product updated successfully")?,
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn delete_product(&mut self) -> io::Result<Flow> {
        let id = field!(self.console, "Product ID: ");

        if id.trim().is_empty() {
            self.console.say("Product ID is required")?;
            return Ok(Flow::Continue);
        }

        let Ok(id) = id.trim().parse::<i64>() else {
            self.console.say("Invalid Product ID")?;
            return Ok(Flow::Continue);
        };

        match self.db.products().delete(id).await {
            Ok(()) => self.console.say("Product deleted successfully")?,
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn view_inventory(&mut self) -> io::Result<Flow> {
        match self.db.products().list().await {
            Ok(products) if products.is_empty() => self.console.say("No products in inventory")?,
            Ok(products) => self.print_products(&products)?,
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn record_sale(&mut self) -> io::Result<Flow> {
        let id = field!(self.console, "Product ID: ");
        let quantity = field!(self.console, "Quantity sold: ");

        if id.trim().is_empty() || quantity.trim().is_empty() {
            self.console.say(ALL_FIELDS_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        let (Ok(id), Ok(quantity)) = (id.trim().parse::<i64>(), quantity.trim().parse::<i64>())
        else {
            self.console.say("Invalid ID or quantity")?;
            return Ok(Flow::Continue);
        };

        match self.db.sales().record(id, quantity).await {
            Ok(sale) => {
                let total = self.config.format_currency(sale.total_price_cents);
                self.console
                    .say(format!("Sale recorded successfully (total {total})"))?;
            }
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn low_stock_report(&mut self) -> io::Result<Flow> {
        let threshold = self.config.low_stock_threshold;

        match self.db.products().low_stock(threshold).await {
            Ok(products) if products.is_empty() => self
                .console
                .say(format!("No products below {threshold} units"))?,
            Ok(products) => {
                self.console
                    .say(format!("Products below {threshold} units:"))?;
                self.print_products(&products)?;
            }
            Err(e) => self.report(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn sales_summary(&mut self) -> io::Result<Flow> {
        let lines = match self.db.sales().summary().await {
            Ok(lines) => lines,
            Err(e) => {
                self.report(&e)?;
                return Ok(Flow::Continue);
            }
        };

        if lines.is_empty() {
            self.console.say("No sales recorded")?;
            return Ok(Flow::Continue);
        }

        let mut grand_total = 0_i64;
        for line in &lines {
            grand_total = grand_total.saturating_add(line.total_price_cents);
            self.console.say(format!(
                "Product: {}, Quantity Sold: {}, Total Price: {}, Date: {}",
                line.display_name(),
                line.quantity,
                self.config.format_currency(line.total_price_cents),
                line.date.format("%Y-%m-%d %H:%M:%S")
            ))?;
        }
        self.console.say(format!(
            "{} sales, {} in total",
            lines.len(),
            self.config.format_currency(grand_total)
        ))?;

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Output Helpers
    // =========================================================================

    fn print_products(&mut self, products: &[Product]) -> io::Result<()> {
        for product in products {
            self.console.say(format!(
                "ID: {}, Name: {}, Quantity: {}, Price: {}",
                product.id,
                product.name,
                product.quantity,
                self.config.format_currency(product.price_cents)
            ))?;
        }
        Ok(())
    }

    /// Prints a store error as a user-facing message.
    fn report(&mut self, err: &DbError) -> io::Result<()> {
        let message = match err {
            DbError::NotFound { entity, .. } => format!("{entity} not found"),
            DbError::Core(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => format!("Insufficient stock (available {available}, requested {requested})"),
            DbError::Core(CoreError::Validation(v)) => format!("Invalid input: {v}"),
            other => {
                error!(error = %other, "Store operation failed");
                format!("Error: {other}")
            }
        };
        self.console.say(message)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
