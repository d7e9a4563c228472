//! Which markdown sections go on which worksheet
//!
//! A [`SheetMapping`] is an ordered list of sheets, each with the section
//! name fragments it collects. Every extracted section is claimed by the
//! first (sheet, fragment) pair, in configuration order, whose fragment it
//! contains case-insensitively. A section is written at most once;
//! sections nobody claims are left out of the workbook.

use govdoc_core::Section;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One worksheet and the section name fragments it collects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Worksheet name
    pub name: String,
    /// Section name fragments, matched case-insensitively
    pub sections: Vec<String>,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, sections: &[&str]) -> Self {
        Self {
            name: name.into(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered sheet mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetMapping {
    sheets: Vec<SheetSpec>,
}

impl Default for SheetMapping {
    fn default() -> Self {
        Self::new(vec![
            SheetSpec::new(
                "2. Governance",
                &["4. Strategic & Operational Governance RACI"],
            ),
            SheetSpec::new(
                "3. Gate 0 - Intake",
                &["5. Gate 0: Intake & Prioritization RACI"],
            ),
            SheetSpec::new(
                "4. Gate 1 - Discovery",
                &["6. Gate 1: Discovery & Feasibility RACI"],
            ),
            SheetSpec::new("5. Gate 2 - Design", &["7. Gate 2: Design Phase RACI"]),
            SheetSpec::new("6. Gate 3 - Build", &["8. Gate 3: Build Phase RACI"]),
            SheetSpec::new(
                "7. Gate 4 - Validation",
                &["9. Gate 4: Validation & Testing RACI"],
            ),
            SheetSpec::new("8. Gate 5 - Deployment", &["10. Gate 5: Deployment RACI"]),
            SheetSpec::new(
                "9. Post-Impl & Ops",
                &[
                    "11. Post-Implementation Review RACI",
                    "12. Ongoing Operations & Maintenance RACI",
                ],
            ),
            SheetSpec::new(
                "10. Retraining & Retire",
                &[
                    "13. Retraining & Enhancement RACI",
                    "14. Model/Bot Retirement RACI",
                ],
            ),
            SheetSpec::new("11. Copilot Mgmt", &["15. Copilot Tools Management RACI"]),
            SheetSpec::new(
                "12. Hub Mgmt",
                &["16. AI & Automation Hub Management RACI"],
            ),
            SheetSpec::new(
                "13. Variations",
                &[
                    "17. Initiative Type Variations",
                    "18. Tier-Based Variations",
                ],
            ),
            SheetSpec::new("14. Appendices", &["20. Appendices"]),
        ])
    }
}

/// Sections assigned to one sheet, in write order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetAssignment<'a> {
    pub sheet: &'a str,
    pub sections: Vec<&'a Section>,
}

impl SheetMapping {
    pub fn new(sheets: Vec<SheetSpec>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[SheetSpec] {
        &self.sheets
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Distribute sections over the configured sheets
    ///
    /// Every configured sheet gets an entry, even when nothing matches it.
    /// On a sheet, sections follow fragment order, then document order.
    pub fn assign<'a>(&'a self, sections: &'a [Section]) -> Vec<SheetAssignment<'a>> {
        let lowered: Vec<String> = sections.iter().map(|s| s.name.to_lowercase()).collect();
        let mut claimed = vec![false; sections.len()];

        let assignments: Vec<SheetAssignment<'a>> = self
            .sheets
            .iter()
            .map(|sheet| {
                let mut picked = Vec::new();
                for fragment in &sheet.sections {
                    let fragment = fragment.to_lowercase();
                    for (idx, section) in sections.iter().enumerate() {
                        if !claimed[idx] && lowered[idx].contains(&fragment) {
                            claimed[idx] = true;
                            picked.push(section);
                        }
                    }
                }
                SheetAssignment {
                    sheet: sheet.name.as_str(),
                    sections: picked,
                }
            })
            .collect();

        for (section, _) in sections.iter().zip(&claimed).filter(|(_, c)| !**c) {
            debug!(section = section.name.as_str(), "Section not mapped to any sheet");
        }

        assignments
    }
}
