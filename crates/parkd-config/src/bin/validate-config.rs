//! Config validation CLI tool
//!
//! Validates a parkd configuration file and reports any errors.

use parkd_config::PricingPolicy;
use parkd_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a parkd configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match parkd_config::load_config(&config_path) {
        Ok(policy) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", parkd_config::CURRENT_CONFIG_VERSION);
            println!("  Lot: {}", policy.name);
            println!("  Capacity: {} slots", policy.capacity);

            let currency = &policy.desk.currency;
            let pricing = match &policy.pricing {
                PricingPolicy::PerStartedUnit { unit_rate, unit } => {
                    format!("{currency}{unit_rate} per started {}s", unit.as_secs())
                }
                PricingPolicy::Flat { amount } => format!("flat {currency}{amount}"),
                PricingPolicy::ByCategory { unit, rates } => format!(
                    "per started {}s: car {currency}{}, bike {currency}{}, truck {currency}{}",
                    unit.as_secs(),
                    rates.car,
                    rates.bike,
                    rates.truck
                ),
            };
            println!("  Pricing: {}", pricing);

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                parkd_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                parkd_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                parkd_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                parkd_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        parkd_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
