//! Single-pass tokenizer of flat chemical formulas.
//!
//! At every position the scanner first looks for a two-character symbol in the element
//! table and only then for a one-character symbol. The choice is purely local: if both
//! "C" and "Co" are in the table, "Co" always wins, even when "C" followed by something
//! else would have produced a valid parse. After the symbol, a run of ASCII digits is read
//! as the subscript (1 when the run is empty).
use crate::MolarMass::MolMassError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How far the scan moves past the digits that follow a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubscriptAdvance {
    /// move past every digit actually scanned: "H007" reads as H7
    #[default]
    ScannedDigits,
    /// move by the decimal length of the parsed subscript ("007" -> 1 position), and not at
    /// all when the subscript is 0 or 1. Kept for compatibility with formulas checked by older
    /// tools: leading zeros and written subscripts 0 or 1 leave the scan on a digit, so such
    /// formulas are rejected.
    ParsedValueLength,
}

/// one (symbol, subscript) pair of a formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaToken<'a> {
    pub symbol: &'a str,
    pub subscript: u32,
    /// byte offset of the symbol in the formula
    pub position: usize,
}

/// Iterator over the tokens of a formula. Yields at most one error and then stops.
pub struct FormulaScanner<'a> {
    table: &'a HashMap<String, f64>,
    formula: &'a str,
    advance: SubscriptAdvance,
    position: usize,
    failed: bool,
}

impl<'a> FormulaScanner<'a> {
    pub fn new(
        table: &'a HashMap<String, f64>,
        formula: &'a str,
        advance: SubscriptAdvance,
    ) -> Self {
        FormulaScanner {
            table,
            formula,
            advance,
            position: 0,
            failed: false,
        }
    }

    fn invalid(&self) -> MolMassError {
        MolMassError::InvalidFormula(self.formula.to_string())
    }

    fn next_token(&mut self) -> Result<FormulaToken<'a>, MolMassError> {
        let start = self.position;
        let formula: &'a str = self.formula;
        let symbol = match_symbol(self.table, &formula[start..]).ok_or_else(|| self.invalid())?;

        let after_symbol = start + symbol.len();
        let digits_len = formula[after_symbol..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let digits = &formula[after_symbol..after_symbol + digits_len];
        let subscript: u32 = if digits.is_empty() {
            1
        } else {
            // only overflow can fail here
            digits.parse().map_err(|_| self.invalid())?
        };

        let skip = match self.advance {
            SubscriptAdvance::ScannedDigits => digits_len,
            SubscriptAdvance::ParsedValueLength if subscript > 1 => subscript.to_string().len(),
            SubscriptAdvance::ParsedValueLength => 0,
        };
        self.position = after_symbol + skip;
        debug!(
            "formula {}: symbol {} x{} at position {}",
            formula, symbol, subscript, start
        );
        Ok(FormulaToken {
            symbol,
            subscript,
            position: start,
        })
    }
}

impl<'a> Iterator for FormulaScanner<'a> {
    type Item = Result<FormulaToken<'a>, MolMassError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.formula.len() {
            return None;
        }
        let token = self.next_token();
        if token.is_err() {
            self.failed = true;
        }
        Some(token)
    }
}

/// two characters first, then one; None if neither is a key of the table
fn match_symbol<'s>(table: &HashMap<String, f64>, rest: &'s str) -> Option<&'s str> {
    let mut chars = rest.chars();
    let first = chars.next()?;
    let one_len = first.len_utf8();
    if let Some(second) = chars.next() {
        let two = &rest[..one_len + second.len_utf8()];
        if table.contains_key(two) {
            return Some(two);
        }
    }
    let one = &rest[..one_len];
    table.contains_key(one).then_some(one)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(symbols: &[&str]) -> HashMap<String, f64> {
        symbols.iter().map(|s| (s.to_string(), 1.0)).collect()
    }

    fn scan(table: &HashMap<String, f64>, formula: &str) -> Vec<(String, u32)> {
        FormulaScanner::new(table, formula, SubscriptAdvance::ScannedDigits)
            .map(|t| {
                let t = t.unwrap();
                (t.symbol.to_string(), t.subscript)
            })
            .collect()
    }

    #[test]
    fn test_tokens_of_glucose() {
        let t = table(&["C", "H", "O"]);
        assert_eq!(
            scan(&t, "C6H12O6"),
            vec![
                ("C".to_string(), 6),
                ("H".to_string(), 12),
                ("O".to_string(), 6)
            ]
        );
    }

    #[test]
    fn test_two_letter_symbol_wins() {
        let t = table(&["C", "Co", "O"]);
        assert_eq!(scan(&t, "CoO"), vec![("Co".to_string(), 1), ("O".to_string(), 1)]);
        // "CO" is carbon monoxide, not cobalt
        assert_eq!(scan(&t, "CO"), vec![("C".to_string(), 1), ("O".to_string(), 1)]);
    }

    #[test]
    fn test_greedy_match_does_not_backtrack() {
        // "C" + "o" would also be a valid parse, but "Co" is never reconsidered
        let t = table(&["C", "Co", "o"]);
        let tokens: Vec<_> =
            FormulaScanner::new(&t, "Co2", SubscriptAdvance::ScannedDigits).collect();
        assert_eq!(tokens.len(), 1);
        let token = tokens[0].as_ref().unwrap();
        assert_eq!(token.symbol, "Co");
        assert_eq!(token.subscript, 2);
    }

    #[test]
    fn test_positions() {
        let t = table(&["Na", "Cl"]);
        let positions: Vec<usize> = FormulaScanner::new(&t, "Na2Cl2", SubscriptAdvance::default())
            .map(|t| t.unwrap().position)
            .collect();
        assert_eq!(positions, vec![0, 3]);
    }

    #[test]
    fn test_scanner_stops_after_error() {
        let t = table(&["C", "H"]);
        let tokens: Vec<_> =
            FormulaScanner::new(&t, "C-H4", SubscriptAdvance::ScannedDigits).collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is_ok());
        match &tokens[1] {
            Err(MolMassError::InvalidFormula(f)) => assert_eq!(f, "C-H4"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_leading_zeros_by_policy() {
        let t = table(&["H"]);
        assert_eq!(scan(&t, "H007"), vec![("H".to_string(), 7)]);

        let legacy: Vec<_> =
            FormulaScanner::new(&t, "H007", SubscriptAdvance::ParsedValueLength).collect();
        assert!(legacy[0].is_ok());
        assert!(matches!(legacy[1], Err(MolMassError::InvalidFormula(_))));

        // written subscripts 1 and 0 are not skipped in the compatible mode
        for formula in ["H1", "H0"] {
            assert_eq!(scan(&t, formula).len(), 1);
            let legacy: Vec<_> =
                FormulaScanner::new(&t, formula, SubscriptAdvance::ParsedValueLength).collect();
            assert_eq!(legacy.len(), 2);
            assert_eq!(legacy[0].as_ref().unwrap().subscript, formula[1..].parse::<u32>().unwrap());
            assert!(matches!(legacy[1], Err(MolMassError::InvalidFormula(_))));
        }
    }

    #[test]
    fn test_non_ascii_input_is_rejected_without_panic() {
        let t = table(&["H", "O"]);
        let tokens: Vec<_> =
            FormulaScanner::new(&t, "H₂O", SubscriptAdvance::ScannedDigits).collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is_err());
    }

    #[test]
    fn test_subscript_overflow() {
        let t = table(&["H"]);
        let tokens: Vec<_> =
            FormulaScanner::new(&t, "H99999999999", SubscriptAdvance::ScannedDigits).collect();
        assert!(matches!(tokens[0], Err(MolMassError::InvalidFormula(_))));
    }
}
