use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use powerpick_core::session::TicketSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct TicketRow {
    timestamp: String,
    origin: String,
    white_balls: String,
    powerball: u8,
    average_strength: f64,
    rating: &'static str,
}

pub fn export_session(session: &TicketSession, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&session.snapshot())?;
            std::fs::write(path, json).with_context(|| format!("Cannot write {:?}", path))?;
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Cannot write {:?}", path))?;
            for ticket in session.all_tickets() {
                writer.serialize(TicketRow {
                    timestamp: ticket.timestamp.to_rfc3339(),
                    origin: ticket.origin.to_string(),
                    white_balls: ticket
                        .white_balls
                        .iter()
                        .map(|b| b.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    powerball: ticket.powerball,
                    average_strength: ticket.probabilities.average_strength,
                    rating: ticket.probabilities.rating.label(),
                })?;
            }
            writer.flush()?;
        }
    }
    log::info!("Session exported to {:?}", path);
    Ok(())
}
