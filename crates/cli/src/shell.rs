//! The menu loop.

use std::io::{self, BufRead, Write};

use stockroom_core::DomainError;
use stockroom_infra::InventoryStore;
use stockroom_inventory::{DEFAULT_MAX_CAPACITY, Inventory, MovementKind, NewProduct, Product};
use thiserror::Error;

use crate::prompt::{self, PromptError};
use crate::render;

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user chose save-and-exit and the save succeeded.
    Saved,
    /// Input ended while changes were still unsaved.
    UnsavedChanges,
    /// Input ended with nothing to save.
    Clean,
}

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl From<io::Error> for ActionError {
    fn from(err: io::Error) -> Self {
        Self::Prompt(PromptError::Io(err))
    }
}

enum Step {
    Continue,
    Exit,
}

/// Interactive session over one inventory.
pub struct Shell<'a, S, R, W> {
    inventory: Inventory,
    store: &'a S,
    input: R,
    output: W,
    dirty: bool,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: InventoryStore,
    R: BufRead,
    W: Write,
{
    pub fn new(inventory: Inventory, store: &'a S, input: R, output: W) -> Self {
        Self {
            inventory,
            store,
            input,
            output,
            dirty: false,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a one-off message before the menu starts.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "Warning: {message}")
    }

    pub fn run(&mut self) -> io::Result<Outcome> {
        writeln!(self.output, "Welcome to the Stock Management System!")?;

        loop {
            self.print_menu()?;

            let result = match prompt::ask(&mut self.input, &mut self.output, "Choose an option: ") {
                Ok(choice) => self.dispatch(&choice),
                Err(err) => Err(err.into()),
            };

            match result {
                Ok(Step::Continue) => {}
                Ok(Step::Exit) => {
                    writeln!(self.output, "\nThank you for using the system. Goodbye!")?;
                    return Ok(Outcome::Saved);
                }
                Err(ActionError::Domain(err)) => {
                    tracing::warn!(error = %err, "operation rejected");
                    writeln!(self.output, "\nError: {err}")?;
                }
                Err(ActionError::Prompt(PromptError::Closed)) => return self.finish_on_eof(),
                Err(ActionError::Prompt(PromptError::Io(err))) => return Err(err),
                Err(ActionError::Prompt(err)) => writeln!(self.output, "\nError: {err}")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== Stock Management System =====")?;
        writeln!(self.output, "1. Add New Product")?;
        writeln!(self.output, "2. Record Product Entry")?;
        writeln!(self.output, "3. Record Product Exit")?;
        writeln!(self.output, "4. Current Stock Report")?;
        writeln!(self.output, "5. Movement History")?;
        writeln!(self.output, "6. Overall Stock Occupancy")?;
        writeln!(self.output, "7. Look Up Product")?;
        writeln!(self.output, "8. Save")?;
        writeln!(self.output, "9. Save and Exit")?;
        writeln!(self.output, "===================================")
    }

    fn dispatch(&mut self, choice: &str) -> Result<Step, ActionError> {
        match choice {
            "1" => self.add_product()?,
            "2" => self.record(MovementKind::Entry)?,
            "3" => self.record(MovementKind::Exit)?,
            "4" => render::stock_report(&mut self.output, &self.inventory.stock_report())?,
            "5" => self.history()?,
            "6" => render::occupancy(&mut self.output, &self.inventory.total_occupancy())?,
            "7" => self.look_up()?,
            "8" => {
                self.save()?;
            }
            "9" => {
                if self.save()? {
                    return Ok(Step::Exit);
                }
            }
            _ => writeln!(self.output, "\nInvalid option! Please try again.")?,
        }
        Ok(Step::Continue)
    }

    fn ask(&mut self, label: &str) -> Result<String, PromptError> {
        prompt::ask(&mut self.input, &mut self.output, label)
    }

    fn add_product(&mut self) -> Result<(), ActionError> {
        writeln!(self.output, "--- Add New Product ---")?;
        let code = self.ask("Product code: ")?;
        let name = self.ask("Product name: ")?;
        let description = self.ask("Description: ")?;
        let initial = self.ask("Initial quantity [0]: ")?;
        let max_capacity = self.ask(&format!("Maximum stock capacity [{DEFAULT_MAX_CAPACITY}]: "))?;
        let initial = prompt::parse_int_or(&initial, 0)?;
        let max_capacity = prompt::parse_int_or(&max_capacity, DEFAULT_MAX_CAPACITY)?;

        let product = Product::create(
            NewProduct::new(code, name)
                .description(description)
                .initial_quantity(initial)
                .max_capacity(max_capacity),
        )?;
        let name = product.name().to_string();
        self.inventory.add_product(product)?;
        self.dirty = true;

        writeln!(self.output, "\nProduct '{name}' added successfully!")?;
        Ok(())
    }

    fn record(&mut self, kind: MovementKind) -> Result<(), ActionError> {
        let (title, quantity_label, reason_label) = match kind {
            MovementKind::Entry => (
                "--- Record Product Entry ---",
                "Entry quantity: ",
                "Reason (e.g. Purchase, Return): ",
            ),
            MovementKind::Exit => (
                "--- Record Product Exit ---",
                "Exit quantity: ",
                "Reason (e.g. Sale, Loss): ",
            ),
        };

        writeln!(self.output, "{title}")?;
        let code = self.ask("Product code: ")?;
        // Both answers are consumed even when the quantity is invalid.
        let quantity = self.ask(quantity_label)?;
        let reason = self.ask(reason_label)?;
        let quantity = prompt::parse_int(&quantity)?;

        self.inventory.record_movement(&code, kind, quantity, reason)?;
        self.dirty = true;

        let name = self
            .inventory
            .get_product(&code)
            .map(|p| p.name().to_string())
            .unwrap_or(code);
        writeln!(
            self.output,
            "\n{} for product '{name}' recorded successfully.",
            kind.label()
        )?;
        Ok(())
    }

    fn history(&mut self) -> Result<(), ActionError> {
        let filter = self.ask("Product code to filter by (blank for all): ")?;
        let code = (!filter.is_empty()).then_some(filter.as_str());
        render::movement_report(&mut self.output, &self.inventory.movement_report(code))?;
        Ok(())
    }

    fn look_up(&mut self) -> Result<(), ActionError> {
        let code = self.ask("Product code: ")?;
        match self.inventory.get_product(&code) {
            Some(product) => render::product(&mut self.output, product)?,
            None => writeln!(self.output, "\nProduct with code '{code}' not found.")?,
        }
        Ok(())
    }

    /// Persist the inventory. A failure is reported and leaves memory intact.
    fn save(&mut self) -> io::Result<bool> {
        match self.store.save(&self.inventory) {
            Ok(()) => {
                self.dirty = false;
                writeln!(self.output, "\nInventory data saved successfully!")?;
                Ok(true)
            }
            Err(err) => {
                tracing::error!(error = %err, "save failed");
                writeln!(
                    self.output,
                    "\nError: could not save inventory ({err}). Your changes are NOT saved."
                )?;
                Ok(false)
            }
        }
    }

    fn finish_on_eof(&mut self) -> io::Result<Outcome> {
        if self.dirty {
            tracing::warn!("input closed with unsaved changes");
            writeln!(
                self.output,
                "\nWarning: input closed; unsaved changes were discarded."
            )?;
            return Ok(Outcome::UnsavedChanges);
        }
        Ok(Outcome::Clean)
    }
}
