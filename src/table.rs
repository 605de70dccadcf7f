// 🗓️ Period Table - Reference data: last suffix issued per month
// Built once from a parsed source, validated, then read-only.
//
// Invariants enforced at construction:
// - year keys are 4 digits within [MIN_YEAR, reference_year + 1]
// - month keys are known codes, one entry per period
// - suffixes conform to the plate alphabet
// - no "---" gaps in years that are already over
//
// The strictly ascending order of suffixes over time is NOT fatal: every
// violation is recorded as a SequenceWarning and callers decide.

use crate::error::{TableIntegrityError, ValidationError};
use crate::period::{Month, Period};
use crate::plate::Suffix;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;

/// Sentinel used by table sources for months without data
pub const NO_DATA: &str = "---";

/// First year accepted in reference data
pub const MIN_YEAR: i32 = 2002;

/// Raw source shape: year → month code → suffix or "---"
pub type RawTable = BTreeMap<String, BTreeMap<String, String>>;

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ============================================================================
// ENTRIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "suffix", rename_all = "snake_case")]
pub enum Watermark {
    /// Last suffix issued during the period
    Issued(Suffix),
    NoData,
}

impl Watermark {
    pub fn suffix(&self) -> Option<Suffix> {
        match self {
            Watermark::Issued(s) => Some(*s),
            Watermark::NoData => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub period: Period,
    pub watermark: Watermark,
}

/// A suffix that does not exceed the last accepted one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceWarning {
    pub period: Period,
    pub suffix: Suffix,
    pub previous: Suffix,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub total_months: usize,
    pub available_months: usize,
    /// Percentage of months with data (0.0 - 100.0)
    pub coverage: f64,
    pub last_period: Option<Period>,
    pub fingerprint: String,
}

// ============================================================================
// PERIOD TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct PeriodTable {
    /// Sorted chronologically, one entry per period
    entries: Vec<TableEntry>,
    warnings: Vec<SequenceWarning>,
}

impl PeriodTable {
    /// Table with no entries at all
    pub fn empty() -> Self {
        PeriodTable {
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Build from the raw year → month → value mapping.
    ///
    /// `reference_year` is "now" for range and completeness checks.
    pub fn from_raw(raw: &RawTable, reference_year: i32) -> Result<Self, TableIntegrityError> {
        let mut entries = Vec::new();

        for (year_key, months) in raw {
            let year = parse_year(year_key, reference_year)?;
            for (month_key, value) in months {
                let period = Period::new(year, parse_month(year, month_key)?);
                entries.push(TableEntry {
                    period,
                    watermark: parse_watermark(period, value)?,
                });
            }
        }

        Self::from_entries(entries, reference_year)
    }

    /// Build from already-typed entries, in any order.
    pub fn from_entries(
        mut entries: Vec<TableEntry>,
        reference_year: i32,
    ) -> Result<Self, TableIntegrityError> {
        // Chronological order is what makes suffix comparison meaningful
        entries.sort_by_key(|e| e.period);

        for pair in entries.windows(2) {
            if pair[0].period == pair[1].period {
                return Err(TableIntegrityError::DuplicatePeriod(pair[0].period));
            }
        }

        for entry in &entries {
            check_year_range(entry.period.year, reference_year)?;
            if entry.watermark == Watermark::NoData && entry.period.year < reference_year {
                return Err(TableIntegrityError::IncompleteData(entry.period));
            }
        }

        let warnings = sequence_warnings(&entries);
        Ok(PeriodTable { entries, warnings })
    }

    /// Parse a JSON document shaped like `{"2024": {"Ene": "MNC", ...}}`
    pub fn from_json_str(json: &str, reference_year: i32) -> Result<Self, TableIntegrityError> {
        let raw: RawTable = serde_json::from_str(json)
            .map_err(|e| TableIntegrityError::Parse(e.to_string()))?;
        Self::from_raw(&raw, reference_year)
    }

    /// Parse CSV rows with header `year,month,suffix`
    pub fn from_csv_reader<R: Read>(reader: R, reference_year: i32) -> Result<Self, TableIntegrityError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut raw = RawTable::new();

        for result in rdr.deserialize() {
            let row: CsvRow = result.map_err(|e| TableIntegrityError::Parse(e.to_string()))?;
            let year = parse_year(&row.year, reference_year)?;
            let period = Period::new(year, parse_month(year, &row.month)?);

            let months = raw.entry(row.year).or_default();
            if months.insert(row.month, row.suffix).is_some() {
                return Err(TableIntegrityError::DuplicatePeriod(period));
            }
        }

        Self::from_raw(&raw, reference_year)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// All entries in chronological order, gaps included
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Periods with real data, in chronological order
    pub fn watermarks(&self) -> impl Iterator<Item = (Period, Suffix)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.watermark.suffix().map(|s| (e.period, s)))
    }

    pub fn get(&self, period: Period) -> Option<Watermark> {
        self.entries
            .binary_search_by_key(&period, |e| e.period)
            .ok()
            .map(|i| self.entries[i].watermark)
    }

    /// True when the table holds a real suffix for `period`
    pub fn has_data(&self, period: Period) -> bool {
        matches!(self.get(period), Some(Watermark::Issued(_)))
    }

    pub fn warnings(&self) -> &[SequenceWarning] {
        &self.warnings
    }

    pub fn is_monotonic(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over the canonical content, usable as a data version
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            let value = entry
                .watermark
                .suffix()
                .map(|s| s.to_string())
                .unwrap_or_else(|| NO_DATA.to_string());
            hasher.update(format!("{}-{}={}\n", entry.period.year, entry.period.month.code(), value));
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn stats(&self) -> TableStats {
        let total_months = self.entries.len();
        let available_months = self.watermarks().count();
        let coverage = if total_months == 0 {
            0.0
        } else {
            available_months as f64 / total_months as f64 * 100.0
        };

        TableStats {
            min_year: self.entries.first().map(|e| e.period.year),
            max_year: self.entries.last().map(|e| e.period.year),
            total_months,
            available_months,
            coverage,
            last_period: self.watermarks().last().map(|(p, _)| p),
            fingerprint: self.fingerprint(),
        }
    }
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

#[derive(Debug, Deserialize)]
struct CsvRow {
    year: String,
    month: String,
    suffix: String,
}

fn parse_year(key: &str, reference_year: i32) -> Result<i32, TableIntegrityError> {
    if key.len() != 4 || !key.chars().all(|c| c.is_ascii_digit()) {
        return Err(TableIntegrityError::InvalidYear(key.to_string()));
    }
    let year: i32 = key
        .parse()
        .map_err(|_| TableIntegrityError::InvalidYear(key.to_string()))?;
    check_year_range(year, reference_year)?;
    Ok(year)
}

fn parse_month(year: i32, key: &str) -> Result<Month, TableIntegrityError> {
    Month::from_code(key).map_err(|_| TableIntegrityError::InvalidMonth {
        year,
        month: key.to_string(),
    })
}

fn check_year_range(year: i32, reference_year: i32) -> Result<(), TableIntegrityError> {
    let max = reference_year.saturating_add(1);
    if year < MIN_YEAR || year > max {
        return Err(TableIntegrityError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max,
        });
    }
    Ok(())
}

fn parse_watermark(period: Period, value: &str) -> Result<Watermark, TableIntegrityError> {
    if value == NO_DATA {
        return Ok(Watermark::NoData);
    }

    Suffix::new(value).map(Watermark::Issued).map_err(|e| match e {
        ValidationError::DisallowedLetter(letter) => {
            TableIntegrityError::DisallowedLetter { period, letter }
        }
        _ => TableIntegrityError::InvalidSuffix {
            period,
            value: value.to_string(),
        },
    })
}

/// Compare each suffix against the last one that was in order.
fn sequence_warnings(entries: &[TableEntry]) -> Vec<SequenceWarning> {
    let mut warnings = Vec::new();
    let mut last: Option<Suffix> = None;

    for entry in entries {
        let Some(suffix) = entry.watermark.suffix() else {
            continue;
        };
        match last {
            Some(previous) if suffix <= previous => warnings.push(SequenceWarning {
                period: entry.period,
                suffix,
                previous,
            }),
            _ => last = Some(suffix),
        }
    }

    warnings
}

// ============================================================================
// TESTS
// ============================================================================
