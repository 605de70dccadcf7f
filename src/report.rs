// 💬 Report - Spanish text for estimates, errors and table stats
// Presentation only: the core returns data, this turns it into messages.

use crate::badge::BadgeResult;
use crate::error::ValidationError;
use crate::estimator::PlateEstimate;
use crate::period::Period;
use crate::resolver::Resolution;
use crate::table::TableStats;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

impl Report {
    fn new(level: ReportLevel, message: String) -> Self {
        Report { level, message }
    }
}

/// "Enero de 2025"
pub fn format_period(period: Period) -> String {
    format!("{} de {}", period.month.full_name(), period.year)
}

pub fn describe_resolution(resolution: &Resolution) -> Report {
    match resolution {
        Resolution::Resolved { period } => Report::new(
            ReportLevel::Success,
            format!("La fecha de matriculación estimada es: {}.", format_period(*period)),
        ),
        Resolution::Transition {
            period,
            next_period,
            next_period_known,
        } => {
            let next = if *next_period_known {
                format_period(*next_period)
            } else {
                "posterior".to_string()
            };
            Report::new(
                ReportLevel::Warning,
                format!(
                    "Matrícula de transición: La fecha de matriculación podría ser {} o {}.",
                    format_period(*period),
                    next
                ),
            )
        }
        Resolution::Future { last_known_period } => Report::new(
            ReportLevel::Success,
            format!(
                "La fecha de matriculación estimada es: Después de {}.",
                format_period(*last_known_period)
            ),
        ),
        Resolution::NotFound => Report::new(
            ReportLevel::Error,
            "No se encontró la matrícula en la base de datos.".to_string(),
        ),
    }
}

pub fn describe_error(error: &ValidationError) -> Report {
    let message = match error {
        ValidationError::WrongLength { .. } => {
            "La matrícula debe tener exactamente 7 caracteres".to_string()
        }
        ValidationError::WrongShape => {
            "Formato incorrecto. Debe ser: 4 números + 3 letras (Ej: 1234BCD)".to_string()
        }
        ValidationError::DisallowedLetter(letter) => format!("Letra no permitida: {}", letter),
        ValidationError::InvalidMonth(code) => format!("Mes inválido: {}", code),
        ValidationError::YearOutOfRange(year) => format!("Año fuera de rango: {}", year),
    };
    Report::new(ReportLevel::Error, message)
}

pub fn describe_badge(badge: &BadgeResult) -> String {
    format!("Distintivo ambiental: {}", badge.label)
}

/// Multi-line summary of one estimate
pub fn describe_estimate(estimate: &PlateEstimate) -> String {
    let mut lines = vec![
        format!("Matrícula: {}", estimate.plate),
        describe_resolution(&estimate.resolution).message,
    ];
    if let Some(badge) = &estimate.badge {
        lines.push(describe_badge(badge));
    }
    lines.join("\n")
}

pub fn describe_stats(stats: &TableStats) -> String {
    let range = match (stats.min_year, stats.max_year) {
        (Some(min), Some(max)) => format!("{} - {}", min, max),
        _ => "sin datos".to_string(),
    };
    let updated = stats
        .last_period
        .map(format_period)
        .unwrap_or_else(|| "desconocida".to_string());

    format!(
        "Período cubierto: {}\nCobertura de datos: {:.1}% ({} de {} meses)\nÚltima actualización: {}\nVersión de datos: {}",
        range,
        stats.coverage,
        stats.available_months,
        stats.total_months,
        updated,
        &stats.fingerprint[..stats.fingerprint.len().min(12)]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fallback_table;
    use crate::period::Month;

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(Period::new(2025, Month::August)), "Agosto de 2025");
    }

    #[test]
    fn test_transition_messages() {
        let known = Resolution::Transition {
            period: Period::new(2025, Month::January),
            next_period: Period::new(2025, Month::February),
            next_period_known: true,
        };
        let report = describe_resolution(&known);
        assert_eq!(report.level, ReportLevel::Warning);
        assert!(report.message.ends_with("Enero de 2025 o Febrero de 2025."));

        let unknown = Resolution::Transition {
            period: Period::new(2025, Month::August),
            next_period: Period::new(2025, Month::September),
            next_period_known: false,
        };
        assert!(describe_resolution(&unknown).message.ends_with("Agosto de 2025 o posterior."));
    }

    #[test]
    fn test_future_and_not_found() {
        let future = Resolution::Future {
            last_known_period: Period::new(2025, Month::August),
        };
        assert!(describe_resolution(&future).message.contains("Después de Agosto de 2025"));
        assert_eq!(describe_resolution(&Resolution::NotFound).level, ReportLevel::Error);
    }

    #[test]
    fn test_error_messages() {
        let report = describe_error(&ValidationError::DisallowedLetter('Ñ'));
        assert_eq!(report.message, "Letra no permitida: Ñ");
        assert_eq!(report.level, ReportLevel::Error);

        let report = describe_error(&ValidationError::YearOutOfRange(i32::MAX));
        assert_eq!(report.message, format!("Año fuera de rango: {}", i32::MAX));
    }

    #[test]
    fn test_stats_summary() {
        let text = describe_stats(&fallback_table().unwrap().stats());
        assert!(text.contains("Período cubierto: 2024 - 2025"));
        assert!(text.contains("Cobertura de datos: 83.3% (20 de 24 meses)"));
        assert!(text.contains("Última actualización: Agosto de 2025"));
    }
}
