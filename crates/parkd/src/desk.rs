//! Front desk: turns desk commands into lot operations and printable replies

use parkd_api::{DESK_USAGE, DeskCommand};
use parkd_core::SharedLot;
use parkd_util::{LotError, format_datetime_full, format_duration};
use tracing::debug;

/// What the desk loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

pub struct Desk {
    lot: SharedLot,
    currency: String,
}

impl Desk {
    pub fn new(lot: SharedLot, currency: impl Into<String>) -> Self {
        Self {
            lot,
            currency: currency.into(),
        }
    }

    /// Parse and run one input line. Blank lines produce no reply.
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        match DeskCommand::parse_line(line) {
            Ok(Some(command)) => Some(self.handle(command)),
            Ok(None) => None,
            Err(e) => Some(Reply::Print(format!("{e}\n\n{DESK_USAGE}"))),
        }
    }

    pub fn handle(&self, command: DeskCommand) -> Reply {
        debug!(command = ?command, "Desk command");

        let text = match command {
            DeskCommand::Park(vehicle) => match self.lot.park(vehicle) {
                Ok(ticket) => format!(
                    "Vehicle parked at slot: {} (ticket #{}, {})",
                    ticket.slot_id,
                    ticket.id,
                    format_datetime_full(&ticket.entered_at)
                ),
                Err(LotError::LotFull) => "Parking lot full!".to_string(),
                Err(e) => e.to_string(),
            },

            DeskCommand::Unpark(plate) => match self.lot.unpark(&plate) {
                Ok(receipt) => format!(
                    "Vehicle {} unparked from slot {}\nParking duration: {} seconds ({}). Fee: {}{}",
                    receipt.ticket.plate,
                    receipt.slot_id(),
                    receipt.duration_secs,
                    format_duration(receipt.duration()),
                    self.currency,
                    receipt.fee
                ),
                Err(LotError::NotFound(_)) => "Vehicle not found!".to_string(),
                Err(e) => e.to_string(),
            },

            DeskCommand::Available => {
                let mut text = String::from("Available slots:");
                let available = self.lot.list_available();
                if available.is_empty() {
                    text.push_str("\nnone");
                }
                for slot in available {
                    text.push_str(&format!("\nSlot {slot}"));
                }
                text
            }

            DeskCommand::Status => {
                let snapshot = self.lot.snapshot();
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => json,
                    Err(e) => format!("Failed to render status: {e}"),
                }
            }

            DeskCommand::Help => DESK_USAGE.to_string(),

            DeskCommand::Quit => return Reply::Quit,
        };

        Reply::Print(text)
    }
}
