//! Static reference tables for the overview sheet

use govdoc_core::RaciTable;

/// Default workbook title
pub const DEFAULT_TITLE: &str = "RACI Matrix for AI/ML & Automation Initiatives";
/// Default workbook subtitle
pub const DEFAULT_SUBTITLE: &str = "Bank ABC - Innovation & Digitization Department";

/// Label written above the legend table
pub const LEGEND_LABEL: &str = "RACI Legend";
/// Label written above the role table
pub const ROLES_LABEL: &str = "Role Abbreviations";

const LEGEND: [[&str; 3]; 6] = [
    ["Code", "Meaning", "Description"],
    ["R", "Responsible", "Person who does the work to complete the task"],
    [
        "A",
        "Accountable",
        "Person ultimately answerable for the completion and approval",
    ],
    [
        "C",
        "Consulted",
        "Person whose input is sought (two-way communication)",
    ],
    [
        "I",
        "Informed",
        "Person who is kept up-to-date on progress (one-way communication)",
    ],
    [
        "R/A",
        "Responsible & Accountable",
        "Person who both does the work and is accountable",
    ],
];

const ROLES: [[&str; 3]; 21] = [
    ["Abbreviation", "Full Role", "Description"],
    ["BizSpon", "Business Sponsor", "Senior business leader sponsoring the initiative"],
    ["BizOwn", "Business Owner", "Day-to-day business point of contact"],
    [
        "DigProdHead",
        "Head of Digital Products",
        "Backlog management, requirements, UAT coordination",
    ],
    ["AILead", "AI Engineering Lead", "Head of AI Engineering team"],
    ["BA", "Business Analyst", "Analyzes requirements, documents processes"],
    ["DS", "Data Scientist", "Develops AI/ML models"],
    ["MLE", "ML Engineer", "Implements ML pipelines, handles MLOps"],
    ["AutoDev", "Automation Developer", "Develops RPA bots, automation solutions"],
    ["SolArch", "Solution Architect", "Defines solution architecture"],
    ["DataEng", "Data Engineer", "Builds data pipelines"],
    ["ModelVal", "Model Validator", "Performs independent validation"],
    ["QA", "Quality Assurance", "Tests and validates solutions"],
    ["ItOps", "IT Operations", "Manages production infrastructure"],
    ["ItSec", "IT Security", "Reviews security requirements"],
    ["ItInfra", "IT Infrastructure", "Manages infrastructure"],
    ["Comply", "Compliance", "Ensures regulatory compliance"],
    ["Risk", "Risk Management", "Assesses and manages risks"],
    ["EntArch", "Enterprise Architecture", "Oversees enterprise architecture"],
    ["DataGov", "Data Governance", "Manages data governance"],
    [
        "SteerCom",
        "Steering Committee",
        "Senior governance body for Tier 1 initiatives",
    ],
];

fn to_table(rows: &[[&str; 3]]) -> RaciTable {
    RaciTable::new(
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

/// The RACI code legend, header first
pub fn legend_table() -> RaciTable {
    to_table(&LEGEND)
}

/// Role abbreviations used as matrix column headers, header first
pub fn roles_table() -> RaciTable {
    to_table(&ROLES)
}
