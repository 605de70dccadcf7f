use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

use plate_dating::{logging, report, AppConfig, BadgeClassifier, FuelType, PlateEstimator, TableLoader};

const USAGE: &str = "Usage:
  plate-dating <PLATE> [--fuel <FUEL>] [--table <PATH>] [--config <PATH>]
  plate-dating stats [--table <PATH>] [--config <PATH>]";

#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    fuel: Option<String>,
    table: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fuel" | "--table" | "--config" => {
                let Some(value) = iter.next() else {
                    bail!("Missing value for {}\n\n{}", arg, USAGE);
                };
                match arg.as_str() {
                    "--fuel" => parsed.fuel = Some(value.clone()),
                    "--table" => parsed.table = Some(PathBuf::from(value)),
                    _ => parsed.config = Some(PathBuf::from(value)),
                }
            }
            "-h" | "--help" => {
                parsed.command = None;
                return Ok(parsed);
            }
            other if parsed.command.is_none() => parsed.command = Some(other.to_string()),
            other => bail!("Unexpected argument: {}\n\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let Some(command) = args.command.as_deref() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(table) = &args.table {
        config.table_path = Some(table.clone());
    }

    let loaded = TableLoader::new(config.table_path.clone())
        .with_fallback(config.use_fallback)
        .load()?;
    if let Some(reason) = &loaded.load_error {
        eprintln!("⚠️  Usando datos de respaldo: {}", reason);
    }

    if command == "stats" {
        println!("📊 {}", report::describe_stats(&loaded.table.stats()));
        return Ok(());
    }

    let estimator = PlateEstimator::new(&loaded.table, BadgeClassifier::new(config.badge_policy))?;
    let fuel = args.fuel.as_deref().map(FuelType::parse);

    match estimator.estimate(command, fuel) {
        Ok(estimate) => {
            println!("{}", report::describe_estimate(&estimate));
            Ok(())
        }
        Err(e) => {
            let report = report::describe_error(&e);
            eprintln!("❌ Error: {}", report.message);
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_plate_with_options() {
        let parsed = parse_args(&args(&["1234MYG", "--fuel", "diesel", "--table", "t.csv"])).unwrap();
        assert_eq!(parsed.command.as_deref(), Some("1234MYG"));
        assert_eq!(parsed.fuel.as_deref(), Some("diesel"));
        assert_eq!(parsed.table, Some(PathBuf::from("t.csv")));
    }

    #[test]
    fn test_parse_missing_value() {
        assert!(parse_args(&args(&["1234MYG", "--fuel"])).is_err());
    }

    #[test]
    fn test_parse_extra_argument() {
        assert!(parse_args(&args(&["1234MYG", "5678BBB"])).is_err());
    }
}
