use crate::frequency::{FrequencyData, FrequencyTable, sorted_by_frequency};
use crate::models::{Pool, ProbabilityRecord, Rating, TicketProbabilities};

pub const HOT_THRESHOLD: f64 = 105.0;
pub const COLD_THRESHOLD: f64 = 95.0;

/// Rounds the exact binary value of `value` to `decimals` places, ties away
/// from zero. `10.35` is stored as `10.3499...` and so becomes `10.3`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    // an exact tie is an odd multiple of 2^-(decimals + 1)
    let halves = value * 2f64.powi(decimals as i32 + 1);
    if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        let factor = 10f64.powi(decimals as i32);
        return (value * factor).round() / factor;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

pub fn calculate_probability(
    number: u8,
    table: &FrequencyTable,
    total_draws: u64,
    domain_size: usize,
) -> ProbabilityRecord {
    let frequency = table.get(number);

    let historical = if total_draws > 0 {
        frequency as f64 / total_draws as f64 * 100.0
    } else {
        0.0
    };
    let expected = if domain_size > 0 {
        1.0 / domain_size as f64 * 100.0
    } else {
        0.0
    };
    let relative = if expected > 0.0 {
        historical / expected * 100.0
    } else {
        0.0
    };

    let rank = sorted_by_frequency(table)
        .iter()
        .position(|n| n.number == number)
        .map(|i| i + 1)
        .unwrap_or(0);

    ProbabilityRecord {
        number,
        frequency,
        historical_probability: round_to(historical, 2),
        expected_probability: round_to(expected, 2),
        relative_strength: round_to(relative, 1),
        rank,
        total_numbers: domain_size,
        is_hot: relative > HOT_THRESHOLD,
        is_cold: relative < COLD_THRESHOLD,
    }
}

/// Scores a complete combination. Shared by generation and user rating so
/// both paths produce identical records.
pub fn score_ticket(
    data: &FrequencyData,
    white_balls: &[u8; 5],
    powerball: u8,
) -> TicketProbabilities {
    let white = (*white_balls).map(|n| {
        calculate_probability(
            n,
            &data.white_ball_frequencies,
            data.total_white_ball_draws,
            Pool::WhiteBalls.size(),
        )
    });
    let power = calculate_probability(
        powerball,
        &data.powerball_frequencies,
        data.total_drawings,
        Pool::Powerball.size(),
    );

    // averaged over the displayed (rounded) strengths
    let strengths: Vec<f64> = white
        .iter()
        .chain(std::iter::once(&power))
        .map(|p| p.relative_strength)
        .collect();
    let average = strengths.iter().sum::<f64>() / strengths.len() as f64;

    TicketProbabilities {
        white_balls: white,
        powerball: power,
        average_strength: round_to(average, 1),
        rating: Rating::from_strength(average),
    }
}
