use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{TOTAL_COMBINATIONS, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Hot,
    Cold,
}

/// Tickets generated or rated during one run.
#[derive(Debug, Clone, Default)]
pub struct TicketSession {
    tickets: Vec<Ticket>,
    unique_combinations: HashSet<String>,
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub total_tickets: usize,
    pub unique_combinations: usize,
    pub coverage: String,
    pub total_possible: u64,
    pub tickets: Vec<Ticket>,
}

impl TicketSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ticket(&mut self, ticket: Ticket) {
        self.unique_combinations.insert(ticket.combination_key());
        self.tickets.push(ticket);
    }

    pub fn add_tickets(&mut self, tickets: impl IntoIterator<Item = Ticket>) {
        for ticket in tickets {
            self.add_ticket(ticket);
        }
    }

    pub fn total_count(&self) -> usize {
        self.tickets.len()
    }

    pub fn unique_count(&self) -> usize {
        self.unique_combinations.len()
    }

    /// e.g. `"5 of 292,201,338"`.
    pub fn coverage(&self) -> String {
        format!(
            "{} of {}",
            format_thousands(self.unique_count() as u64),
            format_thousands(TOTAL_COMBINATIONS)
        )
    }

    pub fn all_tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    pub fn reset(&mut self) {
        self.tickets.clear();
        self.unique_combinations.clear();
    }

    /// History view; `Newest` puts the latest ticket first.
    pub fn sorted(&self, order: SortOrder) -> Vec<Ticket> {
        let mut tickets = self.tickets.clone();
        match order {
            SortOrder::Newest => tickets.reverse(),
            SortOrder::Hot => tickets.sort_by(|a, b| {
                b.probabilities
                    .average_strength
                    .total_cmp(&a.probabilities.average_strength)
            }),
            SortOrder::Cold => tickets.sort_by(|a, b| {
                a.probabilities
                    .average_strength
                    .total_cmp(&b.probabilities.average_strength)
            }),
        }
        tickets
    }

    /// First ticket with the highest average strength.
    pub fn hottest(&self) -> Option<&Ticket> {
        self.tickets.iter().fold(None, |best: Option<&Ticket>, t| match best {
            Some(b) if b.probabilities.average_strength >= t.probabilities.average_strength => {
                Some(b)
            }
            _ => Some(t),
        })
    }

    /// First ticket with the lowest average strength.
    pub fn coldest(&self) -> Option<&Ticket> {
        self.tickets.iter().fold(None, |best: Option<&Ticket>, t| match best {
            Some(b) if b.probabilities.average_strength <= t.probabilities.average_strength => {
                Some(b)
            }
            _ => Some(t),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            total_tickets: self.total_count(),
            unique_combinations: self.unique_count(),
            coverage: self.coverage(),
            total_possible: TOTAL_COMBINATIONS,
            tickets: self.all_tickets(),
        }
    }
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::analyze_frequency;
    use crate::generator::rate_ticket;
    use crate::models::Drawing;

    fn ticket(balls: [u32; 5], pb: u32) -> Ticket {
        let data = analyze_frequency(&[
            Drawing {
                date: "01/01/2024".to_string(),
                white_balls: [1, 2, 3, 4, 5],
                powerball: 10,
            },
            Drawing {
                date: "01/03/2024".to_string(),
                white_balls: [1, 7, 8, 9, 10],
                powerball: 11,
            },
        ]);
        rate_ticket(&data, &balls, pb).unwrap()
    }

    #[test]
    fn test_same_combination_counts_once() {
        let mut session = TicketSession::new();
        session.add_ticket(ticket([1, 2, 3, 4, 5], 10));
        session.add_ticket(ticket([5, 4, 3, 2, 1], 10));
        assert_eq!(session.total_count(), 2);
        assert_eq!(session.unique_count(), 1);

        session.add_ticket(ticket([1, 2, 3, 4, 5], 11));
        assert_eq!(session.total_count(), 3);
        assert_eq!(session.unique_count(), 2);
    }

    #[test]
    fn test_coverage_string() {
        let mut session = TicketSession::new();
        assert_eq!(session.coverage(), "0 of 292,201,338");
        session.add_tickets(vec![ticket([1, 2, 3, 4, 5], 10), ticket([6, 7, 8, 9, 10], 1)]);
        assert_eq!(session.coverage(), "2 of 292,201,338");
    }

    #[test]
    fn test_all_tickets_is_a_copy() {
        let mut session = TicketSession::new();
        session.add_ticket(ticket([1, 2, 3, 4, 5], 10));
        let mut copy = session.all_tickets();
        copy.clear();
        assert_eq!(session.total_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut session = TicketSession::new();
        session.add_ticket(ticket([1, 2, 3, 4, 5], 10));
        session.reset();
        assert_eq!(session.total_count(), 0);
        assert_eq!(session.unique_count(), 0);
        assert!(session.hottest().is_none());
    }

    #[test]
    fn test_sorting_and_leaderboard() {
        let mut session = TicketSession::new();
        let lukewarm = ticket([1, 20, 30, 40, 50], 10);
        let hot = ticket([1, 2, 3, 4, 5], 10);
        let cold = ticket([60, 61, 62, 63, 64], 20);
        session.add_tickets(vec![lukewarm.clone(), hot.clone(), cold.clone()]);

        let newest: Vec<String> = session.sorted(SortOrder::Newest).iter().map(|t| t.combination_key()).collect();
        assert_eq!(newest, vec![cold.combination_key(), hot.combination_key(), lukewarm.combination_key()]);

        let by_hot = session.sorted(SortOrder::Hot);
        assert_eq!(by_hot[0].combination_key(), hot.combination_key());
        let by_cold = session.sorted(SortOrder::Cold);
        assert_eq!(by_cold[0].combination_key(), cold.combination_key());

        assert_eq!(session.hottest().map(|t| t.combination_key()), Some(hot.combination_key()));
        assert_eq!(session.coldest().map(|t| t.combination_key()), Some(cold.combination_key()));
    }

    #[test]
    fn test_snapshot() {
        let mut session = TicketSession::new();
        session.add_ticket(ticket([1, 2, 3, 4, 5], 10));
        let snap = session.snapshot();
        assert_eq!(snap.total_tickets, 1);
        assert_eq!(snap.unique_combinations, 1);
        assert_eq!(snap.total_possible, 292_201_338);
        assert_eq!(snap.tickets.len(), 1);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(292_201_338), "292,201,338");
    }
}
