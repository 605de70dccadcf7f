// 📂 Table Loader - File → validated PeriodTable, with built-in fallback
//
// Load once at startup, then hand the immutable table to resolvers.
// Any failure of a load attempt (I/O, parse, integrity, non-ascending
// sequence) falls back to the built-in data set unless disabled.

use crate::error::TableIntegrityError;
use crate::table::PeriodTable;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Data set shipped with the crate (last updated August 2025)
const FALLBACK_JSON: &str = r#"{
    "2024": {
        "Ene": "MNC", "Feb": "MNT", "Mar": "MPL", "Abr": "MRD", "May": "MRX",
        "Jun": "MSS", "Jul": "MTK", "Ago": "MTW", "Sep": "MVL", "Oct": "MWD",
        "Nov": "MWY", "Dic": "MXP"
    },
    "2025": {
        "Ene": "MYF", "Feb": "MYW", "Mar": "MZS", "Abr": "NBL", "May": "NCJ",
        "Jun": "NDG", "Jul": "NFC", "Ago": "NFD", "Sep": "---", "Oct": "---",
        "Nov": "---", "Dic": "---"
    }
}"#;

/// The fallback is validated as of its own update year, so its trailing
/// "---" months stay legal after that year ends.
pub const FALLBACK_REFERENCE_YEAR: i32 = 2025;

pub fn fallback_table() -> Result<PeriodTable, TableIntegrityError> {
    PeriodTable::from_json_str(FALLBACK_JSON, FALLBACK_REFERENCE_YEAR)
}

// ============================================================================
// LOAD RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum TableSource {
    File(PathBuf),
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: PeriodTable,
    pub source: TableSource,
    /// Why the configured file was not used, if it wasn't
    pub load_error: Option<String>,
}

impl LoadedTable {
    pub fn is_fallback(&self) -> bool {
        self.source == TableSource::Fallback
    }
}

// ============================================================================
// LOADER
// ============================================================================

pub struct TableLoader {
    path: Option<PathBuf>,
    use_fallback: bool,
    reference_year: i32,
}

impl TableLoader {
    pub fn new(path: Option<PathBuf>) -> Self {
        TableLoader {
            path,
            use_fallback: true,
            reference_year: crate::table::current_year(),
        }
    }

    /// Validate against a fixed year instead of the clock
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn with_fallback(mut self, use_fallback: bool) -> Self {
        self.use_fallback = use_fallback;
        self
    }

    /// Load the configured file, falling back when allowed.
    pub fn load(&self) -> Result<LoadedTable> {
        let Some(path) = &self.path else {
            tracing::info!("No table file configured, using built-in data set");
            return self.fallback(None);
        };

        match load_file(path, self.reference_year) {
            Ok(table) => {
                let stats = table.stats();
                tracing::info!(
                    path = %path.display(),
                    months = stats.total_months,
                    coverage = %format!("{:.1}%", stats.coverage),
                    fingerprint = %&stats.fingerprint[..12],
                    "Reference table loaded"
                );
                Ok(LoadedTable {
                    table,
                    source: TableSource::File(path.clone()),
                    load_error: None,
                })
            }
            Err(e) if self.use_fallback => {
                tracing::error!(path = %path.display(), error = %format!("{:#}", e), "Failed to load reference table");
                tracing::warn!("Using built-in data set after failed load");
                self.fallback(Some(format!("{:#}", e)))
            }
            Err(e) => Err(e),
        }
    }

    fn fallback(&self, load_error: Option<String>) -> Result<LoadedTable> {
        let table = fallback_table().context("Built-in data set failed validation")?;
        Ok(LoadedTable {
            table,
            source: TableSource::Fallback,
            load_error,
        })
    }
}

/// Read and validate one table file. `.csv` files are parsed as CSV,
/// everything else as JSON. A non-ascending sequence is an error here.
pub fn load_file(path: &Path, reference_year: i32) -> Result<PeriodTable> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let parsed = if is_csv {
        let file = File::open(path)
            .with_context(|| format!("Failed to open table file: {:?}", path))?;
        PeriodTable::from_csv_reader(file, reference_year)
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read table file: {:?}", path))?;
        PeriodTable::from_json_str(&content, reference_year)
    };
    let table = parsed.with_context(|| format!("Invalid reference table: {:?}", path))?;

    for warning in table.warnings() {
        tracing::warn!(
            period = %warning.period,
            suffix = %warning.suffix,
            previous = %warning.previous,
            "Non-sequential letter combination"
        );
    }

    if !table.is_monotonic() {
        return Err(anyhow!(
            "Reference table is not strictly ascending ({} violation(s))",
            table.warnings().len()
        ));
    }

    Ok(table)
}

// ============================================================================
// TESTS
// ============================================================================
