// Plate Dating - Core Library
// Estimates when a Spanish registration plate was issued.
// Exposes all modules for use in the CLI, API server, and tests.

pub mod error;
pub mod period;       // Months, periods, calendar adjacency
pub mod plate;        // Plate validation
pub mod table;        // Reference table (last suffix per month)
pub mod resolver;     // Suffix → period resolution
pub mod badge;        // Environmental badge classification
pub mod estimator;    // End-to-end pipeline
pub mod loader;       // Table files + built-in fallback
pub mod report;       // Spanish presentation text
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{ResolverError, TableIntegrityError, ValidationError};
pub use period::{adjacent, AdjacentPeriods, Month, Period};
pub use plate::{normalize, validate, PlateCode, Suffix, DISALLOWED_LETTERS};
pub use table::{PeriodTable, SequenceWarning, TableEntry, TableStats, Watermark};
pub use resolver::{DateResolver, Resolution};
pub use badge::{Badge, BadgeClassifier, BadgePolicy, BadgeResult, FuelType};
pub use estimator::{PlateEstimate, PlateEstimator};
pub use loader::{fallback_table, load_file, LoadedTable, TableLoader, TableSource};
pub use report::{Report, ReportLevel};
pub use config::AppConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
