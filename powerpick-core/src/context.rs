use std::collections::HashSet;

use rand::Rng;

use crate::error::{CoreError, Result};
use crate::frequency::{FrequencyData, analyze_frequency};
use crate::generator::{generate_multiple_tickets, generate_ticket, rate_ticket};
use crate::models::{Drawing, NewDrawing, Ticket, validate_new_drawing};
use crate::parser::{ParseResult, parse_content};

/// Drawing collection plus the frequency data derived from it. Every
/// mutation recomputes the frequency data before returning.
#[derive(Debug, Clone, Default)]
pub struct LotteryContext {
    drawings: Vec<Drawing>,
    frequency: Option<FrequencyData>,
}

impl LotteryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `content` and replaces the collection. Fails with
    /// `NoDrawings` when not a single line was usable; line errors alone are
    /// returned in the `ParseResult`.
    pub fn load(&mut self, content: &str) -> Result<ParseResult> {
        let result = parse_content(content);
        if result.drawings.is_empty() {
            return Err(CoreError::NoDrawings);
        }
        self.drawings = result.drawings.clone();
        self.recompute();
        log::info!("{} drawings loaded", self.drawings.len());
        Ok(result)
    }

    pub fn from_drawings(drawings: Vec<Drawing>) -> Self {
        let mut ctx = Self {
            drawings,
            frequency: None,
        };
        if !ctx.drawings.is_empty() {
            ctx.recompute();
        }
        ctx
    }

    fn recompute(&mut self) {
        self.frequency = Some(analyze_frequency(&self.drawings));
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// Date of the most recent drawing. Historical files list newest first.
    pub fn latest_date(&self) -> Option<&str> {
        self.drawings.first().map(|d| d.date.as_str())
    }

    pub fn frequency(&self) -> Result<&FrequencyData> {
        self.frequency.as_ref().ok_or(CoreError::DataNotReady)
    }

    /// Validates `entry` against the current collection without admitting it.
    pub fn check_drawing(&self, entry: &NewDrawing) -> Result<Drawing> {
        validate_new_drawing(entry, &self.drawings)
    }

    /// Validates and prepends a manually entered drawing.
    pub fn add_drawing(&mut self, entry: &NewDrawing) -> Result<Drawing> {
        let drawing = self.check_drawing(entry)?;
        self.drawings.insert(0, drawing.clone());
        self.recompute();
        log::info!("Drawing for {} added ({} total)", drawing.date, self.drawings.len());
        Ok(drawing)
    }

    /// Prepends drawings whose date is not already known and returns them.
    pub fn merge_drawings(&mut self, incoming: &[Drawing]) -> Vec<Drawing> {
        let known: HashSet<&str> = self.drawings.iter().map(|d| d.date.as_str()).collect();
        let fresh: Vec<Drawing> = incoming
            .iter()
            .filter(|d| !known.contains(d.date.as_str()))
            .cloned()
            .collect();
        if !fresh.is_empty() {
            self.drawings.splice(0..0, fresh.iter().cloned());
            self.recompute();
            log::info!("{} drawings merged ({} total)", fresh.len(), self.drawings.len());
        }
        fresh
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Ticket> {
        generate_ticket(self.frequency()?, rng)
    }

    pub fn generate_many<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Ticket>> {
        generate_multiple_tickets(self.frequency()?, count, rng)
    }

    pub fn rate(&self, white_balls: &[u32], powerball: u32) -> Result<Ticket> {
        rate_ticket(self.frequency()?, white_balls, powerball)
    }
}
