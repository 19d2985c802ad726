use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;

use crate::error::{CoreError, Result};
use crate::frequency::{FrequencyData, FrequencyTable};
use crate::models::{Pool, Ticket, TicketOrigin, validate_combination};
use crate::scoring::score_ticket;

/// Inverse-CDF pick over `(number, weight)` pairs with `uniform` in `[0, 1)`.
pub fn pick_weighted(candidates: &[(u8, u64)], uniform: f64) -> Result<u8> {
    let last = candidates.last().ok_or(CoreError::NoCandidates)?;
    let total: u64 = candidates.iter().map(|&(_, w)| w).sum();

    let mut remaining = uniform * total as f64;
    for &(number, weight) in candidates {
        remaining -= weight as f64;
        if remaining <= 0.0 {
            return Ok(number);
        }
    }
    Ok(last.0)
}

/// Every number of the table not in `exclude`, weighted `frequency + 1` so
/// that unseen numbers stay selectable.
fn candidates(table: &FrequencyTable, exclude: &HashSet<u8>) -> Vec<(u8, u64)> {
    table
        .iter()
        .filter(|(number, _)| !exclude.contains(number))
        .map(|(number, count)| (number, count as u64 + 1))
        .collect()
}

pub fn weighted_select<R: Rng + ?Sized>(
    table: &FrequencyTable,
    exclude: &HashSet<u8>,
    rng: &mut R,
) -> Result<u8> {
    let available = candidates(table, exclude);
    pick_weighted(&available, rng.random::<f64>())
}

pub fn generate_ticket<R: Rng + ?Sized>(data: &FrequencyData, rng: &mut R) -> Result<Ticket> {
    let mut selected = HashSet::with_capacity(Pool::WhiteBalls.pick_count());
    let mut white_balls = [0u8; 5];
    for slot in white_balls.iter_mut() {
        let ball = weighted_select(&data.white_ball_frequencies, &selected, rng)?;
        selected.insert(ball);
        *slot = ball;
    }
    white_balls.sort();

    let powerball = weighted_select(&data.powerball_frequencies, &HashSet::new(), rng)?;

    let probabilities = score_ticket(data, &white_balls, powerball);
    log::debug!(
        "Generated {:?} + {} ({})",
        white_balls,
        powerball,
        probabilities.rating
    );

    Ok(Ticket {
        white_balls,
        powerball,
        probabilities,
        timestamp: Utc::now(),
        origin: TicketOrigin::Generated,
    })
}

/// `count` independent tickets; duplicates are possible.
pub fn generate_multiple_tickets<R: Rng + ?Sized>(
    data: &FrequencyData,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Ticket>> {
    (0..count).map(|_| generate_ticket(data, rng)).collect()
}

/// Scores a user supplied combination with the same routine the generator
/// uses.
pub fn rate_ticket(data: &FrequencyData, white_balls: &[u32], powerball: u32) -> Result<Ticket> {
    let sorted = validate_combination(white_balls, powerball)?;
    let powerball = powerball as u8;

    Ok(Ticket {
        white_balls: sorted,
        powerball,
        probabilities: score_ticket(data, &sorted, powerball),
        timestamp: Utc::now(),
        origin: TicketOrigin::Rated,
    })
}
