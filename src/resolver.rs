// 🔍 Date Resolver - Suffix → most likely month of issuance
//
// Walks the table chronologically over periods with data. The first
// watermark that reaches the suffix decides:
//   watermark == suffix → Transition (last code of the month, may have
//                         been issued in the following month's first batch)
//   watermark >  suffix → Resolved
// Nothing reached     → Future (issued after the last recorded month)
// No data at all      → NotFound

use crate::error::ResolverError;
use crate::period::Period;
use crate::plate::{PlateCode, Suffix};
use crate::table::PeriodTable;
use serde::Serialize;

// ============================================================================
// RESOLUTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Resolved {
        period: Period,
    },
    Transition {
        period: Period,
        next_period: Period,
        /// Whether the table has data for `next_period`
        next_period_known: bool,
    },
    Future {
        last_known_period: Period,
    },
    NotFound,
}

impl Resolution {
    /// Earliest period the plate may have been issued in
    pub fn period(&self) -> Option<Period> {
        match self {
            Resolution::Resolved { period } | Resolution::Transition { period, .. } => Some(*period),
            Resolution::Future { last_known_period } => Some(*last_known_period),
            Resolution::NotFound => None,
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct DateResolver<'a> {
    table: &'a PeriodTable,
}

impl<'a> DateResolver<'a> {
    /// Resolver over a table whose watermarks are strictly ascending.
    ///
    /// Fails when the table carries sequence warnings: the scan only gives
    /// correct answers against an ascending sequence.
    pub fn new(table: &'a PeriodTable) -> Result<Self, ResolverError> {
        if let Some(first) = table.warnings().first() {
            return Err(ResolverError::NonMonotonicSequence {
                count: table.warnings().len(),
                first: first.period,
            });
        }
        Ok(DateResolver { table })
    }

    /// Resolver that accepts a non-ascending table as-is.
    pub fn new_unchecked(table: &'a PeriodTable) -> Self {
        DateResolver { table }
    }

    pub fn resolve(&self, suffix: Suffix) -> Resolution {
        let mut last_seen: Option<Period> = None;

        for (period, watermark) in self.table.watermarks() {
            if watermark == suffix {
                return match period.next() {
                    Ok(next_period) => Resolution::Transition {
                        period,
                        next_period,
                        next_period_known: self.table.has_data(next_period),
                    },
                    // No month follows the last representable period
                    Err(_) => Resolution::Resolved { period },
                };
            }
            if watermark > suffix {
                return Resolution::Resolved { period };
            }
            last_seen = Some(period);
        }

        match last_seen {
            Some(last_known_period) => Resolution::Future { last_known_period },
            None => Resolution::NotFound,
        }
    }

    /// Only the letters matter; the numeric part cycles within a suffix.
    pub fn resolve_plate(&self, plate: &PlateCode) -> Resolution {
        self.resolve(plate.letters)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Month;
    use crate::plate;
    use crate::table::{TableEntry, Watermark};

    fn reference_table() -> PeriodTable {
        let json = r#"{
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
        PeriodTable::from_json_str(json, 2025).unwrap()
    }

    fn suffix(s: &str) -> Suffix {
        Suffix::new(s).unwrap()
    }

    #[test]
    fn test_exact_watermark_is_transition() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("MYF")),
            Resolution::Transition {
                period: Period::new(2025, Month::January),
                next_period: Period::new(2025, Month::February),
                next_period_known: true,
            }
        );
    }

    #[test]
    fn test_transition_across_year_boundary() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("MXP")),
            Resolution::Transition {
                period: Period::new(2024, Month::December),
                next_period: Period::new(2025, Month::January),
                next_period_known: true,
            }
        );
    }

    #[test]
    fn test_transition_into_month_without_data() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("NFD")),
            Resolution::Transition {
                period: Period::new(2025, Month::August),
                next_period: Period::new(2025, Month::September),
                next_period_known: false,
            }
        );
    }

    #[test]
    fn test_between_watermarks_resolves_to_later_month() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("MYG")),
            Resolution::Resolved {
                period: Period::new(2025, Month::February)
            }
        );
        assert_eq!(
            resolver.resolve(suffix("MXR")),
            Resolution::Resolved {
                period: Period::new(2025, Month::January)
            }
        );
    }

    #[test]
    fn test_beyond_last_watermark_is_future() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("NFE")),
            Resolution::Future {
                last_known_period: Period::new(2025, Month::August)
            }
        );
        assert_eq!(
            resolver.resolve(suffix("ZZZ")),
            Resolution::Future {
                last_known_period: Period::new(2025, Month::August)
            }
        );
    }

    #[test]
    fn test_before_first_watermark_resolves_to_first_period() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        for early in ["AAA", "BBB", "MNB"] {
            assert_eq!(
                resolver.resolve(suffix(early)),
                Resolution::Resolved {
                    period: Period::new(2024, Month::January)
                }
            );
        }
    }

    #[test]
    fn test_empty_table_is_not_found() {
        let table = PeriodTable::empty();
        let resolver = DateResolver::new(&table).unwrap();
        assert_eq!(resolver.resolve(suffix("MYF")), Resolution::NotFound);
    }

    #[test]
    fn test_table_with_only_gaps_is_not_found() {
        let json = r#"{"2025": {"Ene": "---", "Feb": "---"}}"#;
        let table = PeriodTable::from_json_str(json, 2025).unwrap();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(resolver.resolve(suffix("BBB")), Resolution::NotFound);
        assert_eq!(resolver.resolve(suffix("ZZZ")), Resolution::NotFound);
    }

    #[test]
    fn test_gaps_are_skipped() {
        let json = r#"{"2025": {"Ene": "MYF", "Feb": "---", "Mar": "MZS"}}"#;
        let table = PeriodTable::from_json_str(json, 2025).unwrap();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("MZB")),
            Resolution::Resolved {
                period: Period::new(2025, Month::March)
            }
        );
    }

    #[test]
    fn test_non_monotonic_table_is_rejected() {
        let json = r#"{"2025": {"Ene": "MYF", "Feb": "MYC", "Mar": "MZS"}}"#;
        let table = PeriodTable::from_json_str(json, 2025).unwrap();

        let err = DateResolver::new(&table).err().unwrap();
        assert_eq!(
            err,
            ResolverError::NonMonotonicSequence {
                count: 1,
                first: Period::new(2025, Month::February)
            }
        );

        // Opting in still scans chronologically
        let resolver = DateResolver::new_unchecked(&table);
        assert_eq!(
            resolver.resolve(suffix("MYD")),
            Resolution::Resolved {
                period: Period::new(2025, Month::January)
            }
        );
    }

    #[test]
    fn test_resolve_plate_ignores_number() {
        let table = reference_table();
        let resolver = DateResolver::new(&table).unwrap();

        let a = plate::validate("0000MYG").unwrap();
        let b = plate::validate("9999MYG").unwrap();
        assert_eq!(resolver.resolve_plate(&a), resolver.resolve_plate(&b));
    }

    #[test]
    fn test_resolution_period() {
        let p = Period::new(2025, Month::August);
        assert_eq!(Resolution::Future { last_known_period: p }.period(), Some(p));
        assert_eq!(Resolution::NotFound.period(), None);
    }

    #[test]
    fn test_exact_watermark_in_last_representable_month() {
        let entries = vec![TableEntry {
            period: Period::new(i32::MAX, Month::December),
            watermark: Watermark::Issued(suffix("MYF")),
        }];
        let table = PeriodTable::from_entries(entries, i32::MAX).unwrap();
        let resolver = DateResolver::new(&table).unwrap();

        assert_eq!(
            resolver.resolve(suffix("MYF")),
            Resolution::Resolved {
                period: Period::new(i32::MAX, Month::December)
            }
        );
    }
}
