//! Front-desk command language
//!
//! One command per line, keywords are case-insensitive:
//!
//! ```text
//! park <car|bike|truck> <PLATE>
//! unpark <PLATE>
//! available
//! status
//! help
//! quit
//! ```

use parkd_util::PlateNumber;
use thiserror::Error;

use crate::{Vehicle, VehicleCategory};

/// Usage text shown by `help` and after parse errors
pub const DESK_USAGE: &str = "\
Commands:
  park <car|bike|truck> <PLATE>   park a vehicle in the first free slot
  unpark <PLATE>                  check a vehicle out and show its fee
  available                       list free slots
  status                          show occupancy and active tickets
  help                            show this text
  quit                            leave the desk";

/// A parsed front-desk command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
    Park(Vehicle),
    Unpark(PlateNumber),
    Available,
    Status,
    Help,
    Quit,
}

/// Command parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error(transparent)]
    UnknownCategory(#[from] crate::UnknownCategory),
}

impl DeskCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };

        let command = match keyword.to_lowercase().as_str() {
            "park" => {
                let category: VehicleCategory = words
                    .next()
                    .ok_or(CommandError::MissingArgument("park <car|bike|truck> <PLATE>"))?
                    .parse()?;
                let plate = words
                    .next()
                    .ok_or(CommandError::MissingArgument("park <car|bike|truck> <PLATE>"))?;
                Self::Park(Vehicle::new(plate, category))
            }
            "unpark" | "leave" => {
                let plate = words
                    .next()
                    .ok_or(CommandError::MissingArgument("unpark <PLATE>"))?;
                Self::Unpark(PlateNumber::new(plate))
            }
            "available" | "free" => Self::Available,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_park() {
        let cmd = DeskCommand::parse_line("park car KA-01-AA-1111").unwrap();
        assert_eq!(cmd, Some(DeskCommand::Park(Vehicle::car("KA-01-AA-1111"))));

        let cmd = DeskCommand::parse_line("  PARK Bike  BB-2 ").unwrap();
        assert_eq!(cmd, Some(DeskCommand::Park(Vehicle::bike("BB-2"))));
    }

    #[test]
    fn parse_unpark_keeps_plate_case() {
        let cmd = DeskCommand::parse_line("unpark ka-01").unwrap();
        assert_eq!(cmd, Some(DeskCommand::Unpark(PlateNumber::new("ka-01"))));
    }

    #[test]
    fn parse_queries() {
        assert_eq!(DeskCommand::parse_line("available").unwrap(), Some(DeskCommand::Available));
        assert_eq!(DeskCommand::parse_line("status").unwrap(), Some(DeskCommand::Status));
        assert_eq!(DeskCommand::parse_line("?").unwrap(), Some(DeskCommand::Help));
        assert_eq!(DeskCommand::parse_line("exit").unwrap(), Some(DeskCommand::Quit));
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(DeskCommand::parse_line("   ").unwrap(), None);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            DeskCommand::parse_line("fly away"),
            Err(CommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            DeskCommand::parse_line("park car"),
            Err(CommandError::MissingArgument(_))
        ));
        assert!(matches!(
            DeskCommand::parse_line("park bus X-1"),
            Err(CommandError::UnknownCategory(_))
        ));
        assert!(matches!(
            DeskCommand::parse_line("unpark X-1 now"),
            Err(CommandError::UnexpectedArgument(_))
        ));
    }
}
