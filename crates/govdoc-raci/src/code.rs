//! RACI code classification
//!
//! Cell values in a RACI matrix are free text ("R", "A/R", "R, C", ...).
//! [`RaciCode::classify`] maps a value to the single code that decides the
//! cell colour. Rules are tried in order and the first match wins:
//!
//! 1. exact `R`, `A`, `C`, `I` or `R/A` (trimmed, case-insensitive)
//! 2. contains `R/A` or `A/R`
//! 3. contains both `R` and `A`
//! 4. contains `R`
//! 5. contains `A`
//! 6. contains `C`
//! 7. contains `I`
//!
//! Anything else has no code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The responsibility a cell value expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaciCode {
    /// R
    Responsible,
    /// A
    Accountable,
    /// C
    Consulted,
    /// I
    Informed,
    /// R/A
    ResponsibleAccountable,
}

impl RaciCode {
    pub const ALL: [RaciCode; 5] = [
        RaciCode::Responsible,
        RaciCode::Accountable,
        RaciCode::Consulted,
        RaciCode::Informed,
        RaciCode::ResponsibleAccountable,
    ];

    /// Classify a cell value
    pub fn classify(value: &str) -> Option<RaciCode> {
        let value = value.trim().to_uppercase();

        if let Some(code) = Self::ALL.into_iter().find(|c| c.as_str() == value) {
            return Some(code);
        }

        let has = |c: char| value.contains(c);
        if value.contains("R/A") || value.contains("A/R") || (has('R') && has('A')) {
            Some(RaciCode::ResponsibleAccountable)
        } else if has('R') {
            Some(RaciCode::Responsible)
        } else if has('A') {
            Some(RaciCode::Accountable)
        } else if has('C') {
            Some(RaciCode::Consulted)
        } else if has('I') {
            Some(RaciCode::Informed)
        } else {
            None
        }
    }

    /// The short code as written in matrices
    pub fn as_str(self) -> &'static str {
        match self {
            RaciCode::Responsible => "R",
            RaciCode::Accountable => "A",
            RaciCode::Consulted => "C",
            RaciCode::Informed => "I",
            RaciCode::ResponsibleAccountable => "R/A",
        }
    }
}

impl fmt::Display for RaciCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
