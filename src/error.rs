// ⚠️ Error Types - Structured failures for plates, tables and resolution
// Library errors are plain data: callers decide what the user sees.

use crate::period::Period;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// VALIDATION ERRORS (always recoverable)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    /// Normalized input is not exactly 7 characters long
    #[error("plate must be exactly 7 characters, got {found}")]
    WrongLength { found: usize },

    /// Not 4 digits followed by 3 letters
    #[error("plate must be 4 digits followed by 3 letters (e.g. 1234BCD)")]
    WrongShape,

    /// Letter excluded from the issuance alphabet
    #[error("letter not allowed in plates: {0}")]
    DisallowedLetter(char),

    /// Unknown month code (expected Ene..Dic)
    #[error("invalid month code: {0}")]
    InvalidMonth(String),

    /// Rolling over from this year would leave the representable range
    #[error("no adjacent year for {0}")]
    YearOutOfRange(i32),
}

// ============================================================================
// TABLE INTEGRITY ERRORS (fatal to a load attempt)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableIntegrityError {
    #[error("invalid year key: {0}")]
    InvalidYear(String),

    #[error("year out of range: {year} (allowed {min}..={max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("invalid month for {year}: {month}")]
    InvalidMonth { year: i32, month: String },

    #[error("invalid letter combination for {period}: {value}")]
    InvalidSuffix { period: Period, value: String },

    #[error("letter not allowed in {period}: {letter}")]
    DisallowedLetter { period: Period, letter: char },

    #[error("incomplete data for {0}")]
    IncompleteData(Period),

    #[error("duplicate entry for {0}")]
    DuplicatePeriod(Period),

    #[error("failed to parse table source: {0}")]
    Parse(String),
}

// ============================================================================
// RESOLVER ERRORS
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The table breaks the strictly ascending watermark invariant
    #[error("reference table is not strictly ascending ({count} violation(s), first at {first})")]
    NonMonotonicSequence { count: usize, first: Period },
}
