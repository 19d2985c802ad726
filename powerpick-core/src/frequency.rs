use serde::{Deserialize, Serialize};

use crate::models::{Drawing, NumberCount, Pool};

/// Occurrence count for every number of a pool. Numbers never drawn are
/// present with a zero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pool: Pool,
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            counts: vec![0; pool.size()],
        }
    }

    /// Builds a table from explicit counts; missing trailing numbers are zero
    /// and extra entries are dropped.
    pub fn from_counts(pool: Pool, counts: &[u32]) -> Self {
        let mut table = Self::new(pool);
        for (slot, &c) in table.counts.iter_mut().zip(counts) {
            *slot = c;
        }
        table
    }

    pub fn pool(&self) -> Pool {
        self.pool
    }

    pub fn domain_size(&self) -> usize {
        self.counts.len()
    }

    /// Count for `number`, zero outside the domain.
    pub fn get(&self, number: u8) -> u32 {
        if self.pool.contains(number) {
            self.counts[(number - 1) as usize]
        } else {
            0
        }
    }

    /// Records one observation; out-of-domain numbers are ignored.
    pub fn record(&mut self, number: u8) {
        if self.pool.contains(number) {
            self.counts[(number - 1) as usize] += 1;
        }
    }

    /// `(number, count)` in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as u8, c))
    }

    pub fn sum(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyData {
    pub white_ball_frequencies: FrequencyTable,
    pub powerball_frequencies: FrequencyTable,
    pub total_drawings: u64,
    pub total_white_ball_draws: u64,
    pub total_powerball_draws: u64,
    pub white_ball_frequency_sum: u64,
    pub powerball_frequency_sum: u64,
}

/// Counts every white ball and powerball across `drawings`. Always a full
/// recomputation.
pub fn analyze_frequency(drawings: &[Drawing]) -> FrequencyData {
    let mut white = FrequencyTable::new(Pool::WhiteBalls);
    let mut power = FrequencyTable::new(Pool::Powerball);

    for drawing in drawings {
        for &n in Pool::WhiteBalls.numbers_from(drawing) {
            white.record(n);
        }
        for &n in Pool::Powerball.numbers_from(drawing) {
            power.record(n);
        }
    }

    let total = drawings.len() as u64;
    log::debug!("Frequency tables recomputed over {} drawings", total);

    FrequencyData {
        white_ball_frequency_sum: white.sum(),
        powerball_frequency_sum: power.sum(),
        white_ball_frequencies: white,
        powerball_frequencies: power,
        total_drawings: total,
        total_white_ball_draws: total * Pool::WhiteBalls.pick_count() as u64,
        total_powerball_draws: total * Pool::Powerball.pick_count() as u64,
    }
}

/// Count descending; equal counts keep ascending number order.
pub fn sorted_by_frequency(table: &FrequencyTable) -> Vec<NumberCount> {
    let mut sorted: Vec<NumberCount> = table
        .iter()
        .map(|(number, count)| NumberCount { number, count })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
}

pub fn hot_numbers(table: &FrequencyTable, count: usize) -> Vec<NumberCount> {
    sorted_by_frequency(table).into_iter().take(count).collect()
}

/// The `count` least frequent numbers, coldest first.
pub fn cold_numbers(table: &FrequencyTable, count: usize) -> Vec<NumberCount> {
    let sorted = sorted_by_frequency(table);
    let start = sorted.len().saturating_sub(count);
    sorted[start..].iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(balls: [u8; 5], pb: u8) -> Drawing {
        Drawing {
            date: "01/01/2024".to_string(),
            white_balls: balls,
            powerball: pb,
        }
    }

    #[test]
    fn test_single_drawing_tables() {
        let data = analyze_frequency(&[draw([1, 2, 3, 4, 5], 10)]);
        for n in 1..=5 {
            assert_eq!(data.white_ball_frequencies.get(n), 1);
        }
        for n in 6..=69 {
            assert_eq!(data.white_ball_frequencies.get(n), 0);
        }
        assert_eq!(data.powerball_frequencies.get(10), 1);
        assert_eq!(data.powerball_frequencies.sum(), 1);
        assert_eq!(data.total_drawings, 1);
        assert_eq!(data.total_white_ball_draws, 5);
        assert_eq!(data.total_powerball_draws, 1);
    }

    #[test]
    fn test_sums_match_draw_totals() {
        let drawings = vec![
            draw([1, 2, 3, 4, 5], 1),
            draw([5, 10, 15, 20, 69], 26),
            draw([1, 11, 21, 31, 41], 13),
        ];
        let data = analyze_frequency(&drawings);
        assert_eq!(data.white_ball_frequency_sum, 5 * drawings.len() as u64);
        assert_eq!(data.white_ball_frequency_sum, data.total_white_ball_draws);
        assert_eq!(data.powerball_frequency_sum, drawings.len() as u64);
        assert_eq!(data.white_ball_frequencies.get(1), 2);
        assert_eq!(data.white_ball_frequencies.get(5), 2);
    }

    #[test]
    fn test_out_of_domain_powerball_ignored() {
        let data = analyze_frequency(&[draw([1, 2, 3, 4, 5], 35)]);
        assert_eq!(data.powerball_frequency_sum, 0);
        assert_eq!(data.total_powerball_draws, 1);
    }

    #[test]
    fn test_empty_drawings_zero_tables() {
        let data = analyze_frequency(&[]);
        assert_eq!(data.white_ball_frequencies.domain_size(), 69);
        assert_eq!(data.powerball_frequencies.domain_size(), 26);
        assert_eq!(data.white_ball_frequency_sum, 0);
    }

    #[test]
    fn test_sorted_by_frequency_stable_ties() {
        let table = FrequencyTable::from_counts(Pool::Powerball, &[1, 3, 0, 3]);
        let sorted = sorted_by_frequency(&table);
        assert_eq!(sorted[0], NumberCount { number: 2, count: 3 });
        assert_eq!(sorted[1], NumberCount { number: 4, count: 3 });
        assert_eq!(sorted[2], NumberCount { number: 1, count: 1 });
        assert_eq!(sorted[3], NumberCount { number: 3, count: 0 });
        assert_eq!(sorted.len(), 26);
    }

    #[test]
    fn test_hot_and_cold() {
        let table = FrequencyTable::from_counts(Pool::Powerball, &[1, 3, 0, 3]);
        let hot: Vec<u8> = hot_numbers(&table, 2).iter().map(|n| n.number).collect();
        assert_eq!(hot, vec![2, 4]);

        // zero-count numbers 3,5..=26 trail the list in ascending order
        let cold: Vec<u8> = cold_numbers(&table, 3).iter().map(|n| n.number).collect();
        assert_eq!(cold, vec![26, 25, 24]);

        assert_eq!(cold_numbers(&table, 100).len(), 26);
        assert_eq!(cold_numbers(&table, 100).last().map(|n| n.number), Some(2));
    }
}
