//! Interactive text shell over the inventory ledger.
//!
//! The shell owns prompting and integer parsing; everything it hands to the
//! ledger is an already-parsed primitive.

pub mod prompt;
pub mod render;
pub mod shell;

pub use shell::{Outcome, Shell};
