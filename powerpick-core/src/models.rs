use std::collections::HashSet;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Total distinct tickets: C(69,5) * 26.
pub const TOTAL_COMBINATIONS: u64 = 292_201_338;

pub const WHITE_BALL_MAX: u8 = 69;
pub const POWERBALL_MAX: u8 = 26;
/// Upper bound tolerated when reading historical records, which predate the
/// current 26-ball powerball pool.
pub const HISTORICAL_POWERBALL_MAX: u8 = 39;

lazy_static! {
    static ref DATE_RX: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Drawing {
    pub date: String,
    pub white_balls: [u8; 5],
    pub powerball: u8,
}

impl Drawing {
    /// Renders the drawing in the historical file format.
    pub fn to_line(&self) -> String {
        let balls = self
            .white_balls
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}; {}; Powerball: {}", self.date, balls, self.powerball)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    WhiteBalls,
    Powerball,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::WhiteBalls => WHITE_BALL_MAX as usize,
            Pool::Powerball => POWERBALL_MAX as usize,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::WhiteBalls => 5,
            Pool::Powerball => 1,
        }
    }

    pub fn numbers_from<'a>(&self, drawing: &'a Drawing) -> &'a [u8] {
        match self {
            Pool::WhiteBalls => &drawing.white_balls,
            Pool::Powerball => std::slice::from_ref(&drawing.powerball),
        }
    }

    pub fn contains(&self, number: u8) -> bool {
        number >= 1 && (number as usize) <= self.size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityRecord {
    pub number: u8,
    pub frequency: u32,
    /// Percentage, two decimals.
    pub historical_probability: f64,
    /// Percentage, two decimals.
    pub expected_probability: f64,
    /// Percentage of the uniform baseline, one decimal.
    pub relative_strength: f64,
    pub rank: usize,
    pub total_numbers: usize,
    pub is_hot: bool,
    pub is_cold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    VeryHot,
    Hot,
    Average,
    Cold,
    VeryCold,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::VeryHot,
        Rating::Hot,
        Rating::Average,
        Rating::Cold,
        Rating::VeryCold,
    ];

    pub fn from_strength(average_strength: f64) -> Self {
        if average_strength >= 115.0 {
            Rating::VeryHot
        } else if average_strength >= 105.0 {
            Rating::Hot
        } else if average_strength >= 95.0 {
            Rating::Average
        } else if average_strength >= 85.0 {
            Rating::Cold
        } else {
            Rating::VeryCold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::VeryHot => "Very Hot",
            Rating::Hot => "Hot",
            Rating::Average => "Average",
            Rating::Cold => "Cold",
            Rating::VeryCold => "Very Cold",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::VeryHot => "Numbers appear significantly more often than expected",
            Rating::Hot => "Numbers appear more often than expected",
            Rating::Average => "Numbers appear at expected frequency",
            Rating::Cold => "Numbers appear less often than expected",
            Rating::VeryCold => "Numbers appear significantly less often than expected",
        }
    }

    /// Human-readable strength range of the band.
    pub fn range(&self) -> &'static str {
        match self {
            Rating::VeryHot => ">= 115%",
            Rating::Hot => "105% - 115%",
            Rating::Average => "95% - 105%",
            Rating::Cold => "85% - 95%",
            Rating::VeryCold => "< 85%",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketProbabilities {
    pub white_balls: [ProbabilityRecord; 5],
    pub powerball: ProbabilityRecord,
    /// Mean relative strength of the six numbers, one decimal.
    pub average_strength: f64,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketOrigin {
    Generated,
    Rated,
}

impl std::fmt::Display for TicketOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketOrigin::Generated => write!(f, "generated"),
            TicketOrigin::Rated => write!(f, "rated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub white_balls: [u8; 5],
    pub powerball: u8,
    pub probabilities: TicketProbabilities,
    pub timestamp: DateTime<Utc>,
    pub origin: TicketOrigin,
}

impl Ticket {
    pub fn combination_key(&self) -> String {
        combination_key(&self.white_balls, self.powerball)
    }
}

/// Canonical `"w1,w2,w3,w4,w5-pb"` key, independent of white ball order.
pub fn combination_key(white_balls: &[u8; 5], powerball: u8) -> String {
    let mut sorted = *white_balls;
    sorted.sort();
    let balls = sorted
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{}-{}", balls, powerball)
}

/// A drawing as typed in by a user, before admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDrawing {
    pub date: String,
    pub white_balls: Vec<u32>,
    pub powerball: u32,
}

/// Admission rules for manually entered drawings. Stricter than the
/// historical parser: the powerball must fit the current 26-ball pool.
pub fn validate_new_drawing(entry: &NewDrawing, existing: &[Drawing]) -> Result<Drawing> {
    if !DATE_RX.is_match(&entry.date) {
        return Err(CoreError::InvalidDrawing(
            "Invalid date format. Use MM/DD/YYYY.".to_string(),
        ));
    }
    if entry.white_balls.len() != 5 {
        return Err(CoreError::InvalidDrawing(
            "Must have exactly 5 white balls.".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for &ball in &entry.white_balls {
        if ball < 1 || ball > WHITE_BALL_MAX as u32 {
            return Err(CoreError::InvalidDrawing(format!(
                "White ball \"{}\" is invalid. Must be 1-69.",
                ball
            )));
        }
        if !seen.insert(ball) {
            return Err(CoreError::InvalidDrawing(format!(
                "Duplicate white ball: {}",
                ball
            )));
        }
    }

    if entry.powerball < 1 || entry.powerball > POWERBALL_MAX as u32 {
        return Err(CoreError::InvalidDrawing(format!(
            "PowerBall \"{}\" is invalid. Must be 1-26.",
            entry.powerball
        )));
    }

    if existing.iter().any(|d| d.date == entry.date) {
        return Err(CoreError::InvalidDrawing(format!(
            "A drawing for {} already exists.",
            entry.date
        )));
    }

    let mut white_balls = [0u8; 5];
    for (slot, &ball) in white_balls.iter_mut().zip(&entry.white_balls) {
        *slot = ball as u8;
    }
    white_balls.sort();

    Ok(Drawing {
        date: entry.date.clone(),
        white_balls,
        powerball: entry.powerball as u8,
    })
}

/// Checks a user combination before rating it. Returns the sorted white balls.
pub fn validate_combination(white_balls: &[u32], powerball: u32) -> Result<[u8; 5]> {
    if white_balls.len() != 5 || white_balls.iter().any(|&n| n < 1) || powerball < 1 {
        return Err(CoreError::InvalidTicket(
            "Please enter all numbers (5 white balls 1-69, 1 PowerBall 1-26)".to_string(),
        ));
    }
    if white_balls.iter().any(|&n| n > WHITE_BALL_MAX as u32) {
        return Err(CoreError::InvalidTicket(
            "White balls must be between 1 and 69".to_string(),
        ));
    }
    if powerball > POWERBALL_MAX as u32 {
        return Err(CoreError::InvalidTicket(
            "PowerBall must be between 1 and 26".to_string(),
        ));
    }
    let unique: HashSet<u32> = white_balls.iter().copied().collect();
    if unique.len() != 5 {
        return Err(CoreError::InvalidTicket(
            "White balls must be unique (no duplicates)".to_string(),
        ));
    }

    let mut sorted = [0u8; 5];
    for (slot, &ball) in sorted.iter_mut().zip(white_balls) {
        *slot = ball as u8;
    }
    sorted.sort();
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, balls: &[u32], pb: u32) -> NewDrawing {
        NewDrawing {
            date: date.to_string(),
            white_balls: balls.to_vec(),
            powerball: pb,
        }
    }

    fn drawing(date: &str) -> Drawing {
        Drawing {
            date: date.to_string(),
            white_balls: [1, 2, 3, 4, 5],
            powerball: 10,
        }
    }

    #[test]
    fn test_validate_new_drawing_ok_sorts_balls() {
        let d = validate_new_drawing(&entry("12/15/2025", &[40, 3, 69, 1, 22], 26), &[]).unwrap();
        assert_eq!(d.white_balls, [1, 3, 22, 40, 69]);
        assert_eq!(d.powerball, 26);
        assert_eq!(d.date, "12/15/2025");
    }

    #[test]
    fn test_validate_new_drawing_duplicate_ball() {
        let err = validate_new_drawing(&entry("01/02/2024", &[1, 1, 2, 3, 4], 5), &[]).unwrap_err();
        assert_eq!(err, CoreError::InvalidDrawing("Duplicate white ball: 1".to_string()));
    }

    #[test]
    fn test_validate_new_drawing_bad_date() {
        for date in ["2024-01-01", "1/1/24", "", "01/01/2024 "] {
            let err = validate_new_drawing(&entry(date, &[1, 2, 3, 4, 5], 5), &[]).unwrap_err();
            assert_eq!(
                err,
                CoreError::InvalidDrawing("Invalid date format. Use MM/DD/YYYY.".to_string())
            );
        }
        assert!(validate_new_drawing(&entry("1/2/2024", &[1, 2, 3, 4, 5], 5), &[]).is_ok());
    }

    #[test]
    fn test_validate_new_drawing_ranges() {
        assert!(validate_new_drawing(&entry("01/01/2024", &[0, 2, 3, 4, 5], 5), &[]).is_err());
        assert!(validate_new_drawing(&entry("01/01/2024", &[1, 2, 3, 4, 70], 5), &[]).is_err());
        assert!(validate_new_drawing(&entry("01/01/2024", &[1, 2, 3, 4, 5], 0), &[]).is_err());

        let err = validate_new_drawing(&entry("01/01/2024", &[1, 2, 3, 4, 5], 27), &[]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDrawing("PowerBall \"27\" is invalid. Must be 1-26.".to_string())
        );
    }

    #[test]
    fn test_validate_new_drawing_count() {
        let err = validate_new_drawing(&entry("01/01/2024", &[1, 2, 3, 4], 5), &[]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDrawing("Must have exactly 5 white balls.".to_string())
        );
    }

    #[test]
    fn test_validate_new_drawing_existing_date() {
        let existing = vec![drawing("01/01/2024")];
        let err = validate_new_drawing(&entry("01/01/2024", &[6, 7, 8, 9, 10], 1), &existing).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDrawing("A drawing for 01/01/2024 already exists.".to_string())
        );
    }

    #[test]
    fn test_validate_combination() {
        assert_eq!(validate_combination(&[9, 3, 7, 1, 5], 26).unwrap(), [1, 3, 5, 7, 9]);
        assert!(validate_combination(&[1, 2, 3, 4], 1).is_err());
        assert!(validate_combination(&[1, 2, 3, 4, 70], 1).is_err());
        assert!(validate_combination(&[1, 2, 3, 4, 5], 27).is_err());
        assert!(validate_combination(&[1, 2, 3, 4, 4], 1).is_err());
        assert!(validate_combination(&[0, 2, 3, 4, 5], 1).is_err());
    }

    #[test]
    fn test_rating_bands_boundaries() {
        assert_eq!(Rating::from_strength(115.0), Rating::VeryHot);
        assert_eq!(Rating::from_strength(114.99), Rating::Hot);
        assert_eq!(Rating::from_strength(105.0), Rating::Hot);
        assert_eq!(Rating::from_strength(95.0), Rating::Average);
        assert_eq!(Rating::from_strength(85.0), Rating::Cold);
        assert_eq!(Rating::from_strength(84.9), Rating::VeryCold);
        assert_eq!(Rating::from_strength(0.0), Rating::VeryCold);
    }

    #[test]
    fn test_rating_descriptions() {
        assert_eq!(Rating::Hot.label(), "Hot");
        assert_eq!(serde_json::to_string(&Rating::VeryCold).unwrap(), "\"very-cold\"");
        assert_eq!(
            Rating::Average.description(),
            "Numbers appear at expected frequency"
        );
    }

    #[test]
    fn test_combination_key_order_independent() {
        assert_eq!(combination_key(&[5, 4, 3, 2, 1], 7), "1,2,3,4,5-7");
        assert_eq!(combination_key(&[1, 2, 3, 4, 5], 7), combination_key(&[3, 1, 5, 2, 4], 7));
        assert_ne!(combination_key(&[1, 2, 3, 4, 5], 7), combination_key(&[1, 2, 3, 4, 5], 8));
    }

    #[test]
    fn test_pool_numbers_from() {
        let d = drawing("01/01/2024");
        assert_eq!(Pool::WhiteBalls.numbers_from(&d), &[1, 2, 3, 4, 5]);
        assert_eq!(Pool::Powerball.numbers_from(&d), &[10]);
        assert_eq!(Pool::WhiteBalls.size(), 69);
        assert_eq!(Pool::Powerball.size(), 26);
        assert!(Pool::Powerball.contains(26));
        assert!(!Pool::Powerball.contains(27));
    }

    #[test]
    fn test_drawing_to_line() {
        assert_eq!(drawing("01/01/2024").to_line(), "01/01/2024; 1,2,3,4,5; Powerball: 10");
    }

    #[test]
    fn test_drawing_rejects_unknown_fields() {
        let json = r#"{"date":"01/01/2024","whiteBalls":[1,2,3,4,5],"powerball":3,"extra":1}"#;
        assert!(serde_json::from_str::<Drawing>(json).is_err());
    }

    #[test]
    fn test_total_combinations() {
        let c = (65u64..=69).product::<u64>() / 120;
        assert_eq!(c * 26, TOTAL_COMBINATIONS);
    }
}
