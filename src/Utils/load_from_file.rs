use crate::MolarMass::MolMassError;
use log::{error, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a comma-delimited table of element symbols and atomic masses, e.g.
/// ```text
/// H,1.008
/// Ce,140.1161
/// Og,294
/// ```
/// Every line is tokenized on its own as an alternating sequence symbol, mass, symbol, mass...
/// so several records may share a line ("H,1.008,He,4.0026"). Blank lines are skipped, one
/// trailing comma is allowed, empty fields abort the load. The last occurrence of a symbol wins.
pub fn load_table<P: AsRef<Path>>(file_name: P) -> Result<HashMap<String, f64>, MolMassError> {
    let path = file_name.as_ref();
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| {
        error!("failed to open element table '{}': {}", origin, e);
        MolMassError::NotFound {
            path: origin.clone(),
            source: e,
        }
    })?;
    let table = load_table_from_reader(BufReader::new(file), &origin)?;
    info!(
        "loaded {} elements from table '{}'",
        table.len(),
        origin
    );
    Ok(table)
}

/// Same as `load_table` for any buffered reader. `origin` names the source in errors.
pub fn load_table_from_reader<R: BufRead>(
    reader: R,
    origin: &str,
) -> Result<HashMap<String, f64>, MolMassError> {
    let mut periodic_table = HashMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| MolMassError::NotFound {
            path: origin.to_string(),
            source: e,
        })?;
        let line_number = i + 1;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        // one trailing comma is tolerated, any other empty field is an error
        let record = record.strip_suffix(',').unwrap_or(record);
        let mut tokens = record.split(',').map(str::trim);

        while let Some(symbol) = tokens.next() {
            if symbol.is_empty() {
                error!("{}:{}: empty symbol field", origin, line_number);
                return Err(MolMassError::Parse {
                    path: origin.to_string(),
                    line: line_number,
                    token: symbol.to_string(),
                    reason: "empty element symbol".to_string(),
                });
            }
            let Some(mass_token) = tokens.next() else {
                error!("{}:{}: symbol '{}' has no mass", origin, line_number, symbol);
                return Err(MolMassError::Parse {
                    path: origin.to_string(),
                    line: line_number,
                    token: symbol.to_string(),
                    reason: "symbol without atomic mass".to_string(),
                });
            };
            let mass: f64 = mass_token.parse().map_err(|e: std::num::ParseFloatError| {
                error!(
                    "{}:{}: cannot parse mass '{}' of '{}'",
                    origin, line_number, mass_token, symbol
                );
                MolMassError::Parse {
                    path: origin.to_string(),
                    line: line_number,
                    token: mass_token.to_string(),
                    reason: e.to_string(),
                }
            })?;
            if let Some(previous) = periodic_table.insert(symbol.to_string(), mass) {
                warn!(
                    "{}:{}: symbol '{}' redefined, {} replaced by {}",
                    origin, line_number, symbol, previous, mass
                );
            }
        }
    }
    Ok(periodic_table)
}
