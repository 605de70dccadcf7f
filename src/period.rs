// 📅 Periods - (year, month) pairs and calendar adjacency
// Pure calendar arithmetic: nothing here consults the reference table.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MONTH
// ============================================================================

/// Month of issuance, keyed by the 3-letter Spanish codes used in the
/// reference data ("Ene" .. "Dic").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Ene")]
    January,
    #[serde(rename = "Feb")]
    February,
    #[serde(rename = "Mar")]
    March,
    #[serde(rename = "Abr")]
    April,
    #[serde(rename = "May")]
    May,
    #[serde(rename = "Jun")]
    June,
    #[serde(rename = "Jul")]
    July,
    #[serde(rename = "Ago")]
    August,
    #[serde(rename = "Sep")]
    September,
    #[serde(rename = "Oct")]
    October,
    #[serde(rename = "Nov")]
    November,
    #[serde(rename = "Dic")]
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position in the year (January = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Month> {
        Month::ALL.get(index).copied()
    }

    /// Short code as it appears in table sources
    pub fn code(&self) -> &'static str {
        match self {
            Month::January => "Ene",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Abr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Ago",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dic",
        }
    }

    /// Full Spanish name for display
    pub fn full_name(&self) -> &'static str {
        match self {
            Month::January => "Enero",
            Month::February => "Febrero",
            Month::March => "Marzo",
            Month::April => "Abril",
            Month::May => "Mayo",
            Month::June => "Junio",
            Month::July => "Julio",
            Month::August => "Agosto",
            Month::September => "Septiembre",
            Month::October => "Octubre",
            Month::November => "Noviembre",
            Month::December => "Diciembre",
        }
    }

    /// Parse a month code. Codes are matched exactly ("Ene", not "ENE").
    pub fn from_code(code: &str) -> Result<Month, ValidationError> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.code() == code)
            .ok_or_else(|| ValidationError::InvalidMonth(code.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// PERIOD
// ============================================================================

/// A (year, month) pair. Field order matters: the derived `Ord` compares
/// year first, then month index, which is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    pub fn new(year: i32, month: Month) -> Self {
        Period { year, month }
    }

    /// The chronologically preceding month (January rolls back to December).
    ///
    /// Fails with `YearOutOfRange` only for January of `i32::MIN`.
    pub fn previous(&self) -> Result<Period, ValidationError> {
        match self.month {
            Month::January => self
                .year
                .checked_sub(1)
                .map(|year| Period::new(year, Month::December))
                .ok_or(ValidationError::YearOutOfRange(self.year)),
            m => Ok(Period::new(self.year, Month::ALL[m.index() - 1])),
        }
    }

    /// The chronologically following month (December rolls over to January).
    ///
    /// Fails with `YearOutOfRange` only for December of `i32::MAX`.
    pub fn next(&self) -> Result<Period, ValidationError> {
        match self.month {
            Month::December => self
                .year
                .checked_add(1)
                .map(|year| Period::new(year, Month::January))
                .ok_or(ValidationError::YearOutOfRange(self.year)),
            m => Ok(Period::new(self.year, Month::ALL[m.index() + 1])),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.code(), self.year)
    }
}

// ============================================================================
// ADJACENCY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjacentPeriods {
    pub previous: Period,
    pub next: Period,
}

pub fn previous(period: Period) -> Result<Period, ValidationError> {
    period.previous()
}

pub fn next(period: Period) -> Result<Period, ValidationError> {
    period.next()
}

/// Previous and next periods for a month given by its source code.
pub fn adjacent(month_code: &str, year: i32) -> Result<AdjacentPeriods, ValidationError> {
    let period = Period::new(year, Month::from_code(month_code)?);
    Ok(AdjacentPeriods {
        previous: period.previous()?,
        next: period.next()?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
