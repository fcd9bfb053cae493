use crate::MolarMass::formula_scanner::SubscriptAdvance;
use crate::MolarMass::molmass::{composition_table, evaluate_with};
use crate::Utils::load_from_file::load_table;
use crate::settings::Settings;
use log::{error, info, warn};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// One-shot mode: prints the molar mass of every formula, or the reason it has none.
/// Returns the number of formulas that failed.
pub fn evaluate_formulas<W: Write>(
    table: &HashMap<String, f64>,
    formulas: &[String],
    advance: SubscriptAdvance,
    out: &mut W,
) -> io::Result<usize> {
    let mut failed = 0;
    for formula in formulas {
        match evaluate_with(table, formula, advance) {
            Ok(molar_mass) => writeln!(out, "{}: {:.6} g/mol", formula, molar_mass)?,
            Err(e) => {
                failed += 1;
                writeln!(out, "error: {}", e)?;
            }
        }
    }
    Ok(failed)
}

/// Loads the element table and prints every formula to `out`. A table that cannot be loaded is
/// reported on `err` too, so the message survives a disabled logger. Ok(false) if anything failed.
pub fn run_once<W: Write, E: Write>(
    table_path: &str,
    formulas: &[String],
    advance: SubscriptAdvance,
    out: &mut W,
    err: &mut E,
) -> io::Result<bool> {
    let table = match load_table(table_path) {
        Ok(table) => table,
        Err(e) => {
            error!("{}", e);
            writeln!(err, "error: {}", e)?;
            return Ok(false);
        }
    };
    evaluate_formulas(&table, formulas, advance, out).map(|failed| failed == 0)
}

pub fn run_interactive_menu(settings: &Settings) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(settings, &mut stdin.lock(), &mut stdout.lock())
}

/// Interactive loop over any input and output, returns when the user chooses 0 or input ends
pub fn run_menu<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let mut table = match load_table(&settings.table_path) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!("starting without element table: {}", e);
            writeln!(out, "\x1b[31m{}\x1b[0m", e)?;
            None
        }
    };

    loop {
        show_main_menu(out)?;
        let Some(choice) = get_user_input(input)? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(table) = table.as_ref() else {
                    writeln!(out, "No element table loaded.")?;
                    continue;
                };
                prompt(out, "Formula: ")?;
                let Some(formula) = get_user_input(input)? else {
                    break;
                };
                match evaluate_with(table, &formula, settings.subscript_advance) {
                    Ok(molar_mass) => writeln!(out, "{}: {:.6} g/mol", formula, molar_mass)?,
                    Err(e) => writeln!(out, "\x1b[31m{}\x1b[0m", e)?,
                }
            }
            "2" => {
                let Some(table) = table.as_ref() else {
                    writeln!(out, "No element table loaded.")?;
                    continue;
                };
                prompt(out, "Formula: ")?;
                let Some(formula) = get_user_input(input)? else {
                    break;
                };
                match composition_table(table, &formula) {
                    Ok(pretty) => write!(out, "{}", pretty)?,
                    Err(e) => writeln!(out, "\x1b[31m{}\x1b[0m", e)?,
                }
            }
            "3" => {
                prompt(out, "Path to element table: ")?;
                let Some(path) = get_user_input(input)? else {
                    break;
                };
                match load_table(&path) {
                    Ok(new_table) => {
                        writeln!(out, "Loaded {} elements from {}", new_table.len(), path)?;
                        table = Some(new_table);
                    }
                    Err(e) => writeln!(out, "\x1b[31m{}\x1b[0m", e)?,
                }
            }
            "0" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    info!("interactive session finished");
    Ok(())
}

fn show_main_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\x1b[34m\n MolMass: molar mass of chemical formulas \n \x1b[0m"
    )?;
    writeln!(out, "\x1b[33m1. Molar mass of a formula\x1b[0m")?;
    writeln!(out, "\x1b[33m2. Element composition table\x1b[0m")?;
    writeln!(out, "\x1b[33m3. Load another element table\x1b[0m")?;
    writeln!(out, "\x1b[33m0. Exit\x1b[0m")?;
    prompt(out, "Enter your choice: ")
}

fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "\x1b[36m{}\x1b[0m", text)?;
    out.flush()
}

/// None at end of input
fn get_user_input<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
