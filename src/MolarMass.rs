//! # Molar Mass Module
//!
//! ## Purpose
//! Computes the molecular mass of a chemical formula string such as "H2O" or "C6H12O6"
//! against a table of atomic masses supplied by the caller (see `Utils::load_from_file`).
//!
//! ## Architecture
//! - **formula_scanner**: single left-to-right scan that splits a formula into
//!   (symbol, subscript) tokens. Two-character symbols are always tried before
//!   one-character symbols, with no backtracking.
//! - **molmass**: evaluation on top of the scanner: molecular mass, element composition,
//!   batch evaluation and a printable per-element breakdown.
//!
//! ## Usage
//! ```rust, ignore
//! use MolMass::MolarMass::molmass::evaluate;
//! use MolMass::Utils::load_from_file::load_table;
//!
//! let table = load_table("periodic_table.csv")?;
//! let mass = evaluate(&table, "C6H12O6")?;
//! ```
//!
//! Supported syntax is deliberately flat: element symbols followed by optional decimal
//! subscripts. Brackets, charges, hydrates, isotopes and whitespace are rejected.
use thiserror::Error;

pub mod formula_scanner;
pub mod molmass;

pub use formula_scanner::{FormulaScanner, FormulaToken, SubscriptAdvance};

/// error types of table loading and formula evaluation
#[derive(Debug, Error)]
pub enum MolMassError {
    /// the table source could not be opened or read
    #[error("cannot read element table '{path}': {source}")]
    NotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// malformed record in the element table
    #[error("{path}:{line}: bad token '{token}': {reason}")]
    Parse {
        path: String,
        line: usize,
        token: String,
        reason: String,
    },
    /// some position of the formula cannot be resolved against the table.
    /// Carries the whole formula, not the offending fragment
    #[error("{0} is not a valid chemical formula")]
    InvalidFormula(String),
    #[error("settings error: {0}")]
    Config(String),
}
