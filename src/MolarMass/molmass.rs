/// Module to calculate the molar mass and atomic composition of a chemical formula
/// against an element table loaded by `Utils::load_from_file`
///
use crate::MolarMass::MolMassError;
use crate::MolarMass::formula_scanner::{FormulaScanner, SubscriptAdvance};
use crate::Utils::load_from_file::load_table;
use log::info;
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;
use std::path::Path;

/// Molecular mass of a formula: sum of atomic mass x subscript over all tokens.
/// The empty formula weighs 0.0. All or nothing: the first unresolved position fails the
/// whole formula.
pub fn evaluate(table: &HashMap<String, f64>, formula: &str) -> Result<f64, MolMassError> {
    evaluate_with(table, formula, SubscriptAdvance::ScannedDigits)
}

/// same as `evaluate` with an explicit subscript advance policy
pub fn evaluate_with(
    table: &HashMap<String, f64>,
    formula: &str,
    advance: SubscriptAdvance,
) -> Result<f64, MolMassError> {
    let mut molar_mass = 0.0;
    for token in FormulaScanner::new(table, formula, advance) {
        let token = token?;
        // the scanner only yields symbols that are keys of the table
        let atomic_mass = table[token.symbol];
        molar_mass += atomic_mass * token.subscript as f64;
    }
    Ok(molar_mass)
}

/// Loads the table from `periodic_table` and evaluates `formula` against it
pub fn process<P: AsRef<Path>>(periodic_table: P, formula: &str) -> Result<f64, MolMassError> {
    let table = load_table(periodic_table)?;
    evaluate(&table, formula)
}

// Number of atoms of every element of the formula, repeated symbols are summed up: CH3OH -> {C:1, H:4, O:1}
pub fn element_composition(
    table: &HashMap<String, f64>,
    formula: &str,
) -> Result<HashMap<String, u32>, MolMassError> {
    let mut counts = HashMap::new();
    for token in FormulaScanner::new(table, formula, SubscriptAdvance::ScannedDigits) {
        let token = token?;
        *counts.entry(token.symbol.to_string()).or_insert(0) += token.subscript;
    }
    Ok(counts)
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn molar_masses_of_formulas(
    table: &HashMap<String, f64>,
    formulas: &[&str],
) -> Result<Vec<f64>, MolMassError> {
    info!("calculating molar masses of {} formulas", formulas.len());
    formulas
        .iter()
        .map(|formula| evaluate(table, formula))
        .collect()
}

/// Per-element breakdown of a formula: symbol, number of atoms, atomic mass and contribution to
/// the molar mass, rows in order of first appearance, followed by the total
pub fn composition_table(
    table: &HashMap<String, f64>,
    formula: &str,
) -> Result<Table, MolMassError> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in FormulaScanner::new(table, formula, SubscriptAdvance::ScannedDigits) {
        let token = token?;
        if !counts.contains_key(token.symbol) {
            order.push(token.symbol);
        }
        *counts.entry(token.symbol).or_insert(0) += token.subscript;
    }

    let mut pretty = Table::new();
    pretty.add_row(Row::new(vec![
        Cell::new("Element"),
        Cell::new("Atoms"),
        Cell::new("Atomic mass"),
        Cell::new("Contribution"),
    ]));
    let mut total = 0.0;
    for symbol in order {
        let count = counts[symbol];
        let atomic_mass = table[symbol];
        let contribution = atomic_mass * count as f64;
        total += contribution;
        pretty.add_row(Row::new(vec![
            Cell::new(symbol),
            Cell::new(&count.to_string()),
            Cell::new(&atomic_mass.to_string()),
            Cell::new(&format!("{:.6}", contribution)),
        ]));
    }
    pretty.add_row(Row::new(vec![
        Cell::new(formula),
        Cell::new(""),
        Cell::new(""),
        Cell::new(&format!("{:.6}", total)),
    ]));
    Ok(pretty)
}
