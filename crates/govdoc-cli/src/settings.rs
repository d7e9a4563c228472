//! Configuration settings
//!
//! Settings are loaded from `govdoc.toml`. Every section and field falls
//! back to the built-in defaults, so an empty file is a valid config:
//!
//! ```toml
//! [docx]
//! source_dir = "governance-docs"
//! output_dir = "governance-docs-word"
//!
//! [raci]
//! input = "RACI-Matrix.md"
//! output = "governance-docs-word/RACI-Matrix.xlsx"
//!
//! [[raci.sheets]]
//! name = "2. Governance"
//! sections = ["4. Strategic & Operational Governance RACI"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use govdoc_ooxml::DocxTheme;
use govdoc_raci::{
    SheetMapping, WorkbookBuilder, WorkbookTheme, DEFAULT_OVERVIEW_SHEET, DEFAULT_SUBTITLE,
    DEFAULT_TITLE,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "govdoc.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Markdown to Word batch conversion
    pub docx: DocxSettings,
    /// RACI workbook generation
    pub raci: RaciSettings,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxSettings {
    /// Directory scanned for `*.md` files
    pub source_dir: PathBuf,
    /// Directory receiving `<stem>.docx` files
    pub output_dir: PathBuf,
    pub theme: DocxTheme,
}

impl Default for DocxSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("governance-docs"),
            output_dir: PathBuf::from("governance-docs-word"),
            theme: DocxTheme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaciSettings {
    /// RACI matrix markdown file
    pub input: PathBuf,
    /// Workbook path
    pub output: PathBuf,
    pub title: String,
    pub subtitle: String,
    /// Sheet carrying the title and the RACI legend
    pub legend_sheet: String,
    /// Sheet carrying the role abbreviations
    pub roles_sheet: String,
    /// Worksheets and the section name fragments they collect
    pub sheets: SheetMapping,
    pub theme: WorkbookTheme,
}

impl Default for RaciSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("RACI-Matrix.md"),
            output: PathBuf::from("governance-docs-word/RACI-Matrix.xlsx"),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            legend_sheet: DEFAULT_OVERVIEW_SHEET.to_string(),
            roles_sheet: DEFAULT_OVERVIEW_SHEET.to_string(),
            sheets: SheetMapping::default(),
            theme: WorkbookTheme::default(),
        }
    }
}

impl RaciSettings {
    /// A workbook builder configured from these settings
    pub fn builder(&self) -> WorkbookBuilder {
        WorkbookBuilder::new()
            .with_theme(self.theme.clone())
            .with_mapping(self.sheets.clone())
            .with_title(self.title.as_str(), self.subtitle.as_str())
            .with_reference_sheets(self.legend_sheet.as_str(), self.roles_sheet.as_str())
    }
}

/// Load settings from a config file or use defaults
///
/// An explicit path must exist. Without one, `govdoc.toml` in the working
/// directory is used when present.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            read_settings(path)
        }
        None => {
            let candidate = Path::new(DEFAULT_CONFIG_FILE);
            if candidate.exists() {
                read_settings(candidate)
            } else {
                debug!("No config file, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let settings = Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded config");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.docx.source_dir, PathBuf::from("governance-docs"));
        assert_eq!(settings.docx.output_dir, PathBuf::from("governance-docs-word"));
        assert_eq!(settings.raci.input, PathBuf::from("RACI-Matrix.md"));
        assert_eq!(settings.raci.sheets.sheets().len(), 13);
        assert_eq!(settings.raci.legend_sheet, "Overview");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml_str(
            r#"
            [docx]
            source_dir = "docs"

            [docx.theme]
            code_font = "Courier New"

            [raci]
            roles_sheet = "Roles"

            [[raci.sheets]]
            name = "Roles"
            sections = ["Roles"]

            [raci.theme]
            consulted_fill = "00FF00"
            "#,
        )
        .unwrap();

        assert_eq!(settings.docx.source_dir, PathBuf::from("docs"));
        assert_eq!(settings.docx.output_dir, PathBuf::from("governance-docs-word"));
        assert_eq!(settings.docx.theme.code_font, "Courier New");
        assert_eq!(settings.docx.theme.body_font, "Calibri");
        assert_eq!(settings.raci.roles_sheet, "Roles");
        assert_eq!(settings.raci.sheets.sheets().len(), 1);
        assert_eq!(settings.raci.theme.consulted_fill, "00FF00");
        assert_eq!(settings.raci.theme.informed_fill, "A5A5A5");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Settings::from_toml_str("[docx\nsource_dir = 1").is_err());
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("govdoc.toml");
        fs::write(&path, "[raci]\ntitle = \"Matrix\"\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.raci.title, "Matrix");
        assert_eq!(settings.raci.subtitle, DEFAULT_SUBTITLE);
    }

    #[test]
    fn test_builder_uses_mapping() {
        let mut raci = RaciSettings::default();
        raci.sheets = SheetMapping::new(vec![]);
        assert!(raci.builder().mapping().is_empty());
    }
}
