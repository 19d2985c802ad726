use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Drawing, HISTORICAL_POWERBALL_MAX, WHITE_BALL_MAX};

lazy_static! {
    static ref POWERBALL_RX: Regex = Regex::new(r"(?i)Powerball:\s*(\d+)").unwrap();
}

const SKIP_MARKERS: [&str; 3] = ["results for powerball", "information", "accuracy"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub drawings: Vec<Drawing>,
    pub errors: Vec<String>,
    pub total_lines: usize,
    pub valid_lines: usize,
}

/// Why a single line did not produce a drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    Blank,
    /// Header or disclaimer text, skipped without an error.
    Marker,
    FieldCount(usize),
    WhiteBallCount(usize),
    WhiteBallValue(String),
    DuplicateWhiteBall,
    MissingPowerball,
    PowerballRange(u32),
}

impl LineRejection {
    pub fn is_silent(&self) -> bool {
        matches!(self, LineRejection::Blank | LineRejection::Marker)
    }
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRejection::Blank => write!(f, "blank line"),
            LineRejection::Marker => write!(f, "header or disclaimer"),
            LineRejection::FieldCount(n) => write!(f, "expected 3 fields, found {}", n),
            LineRejection::WhiteBallCount(n) => write!(f, "expected 5 white balls, found {}", n),
            LineRejection::WhiteBallValue(v) => write!(f, "white ball '{}' outside 1-69", v),
            LineRejection::DuplicateWhiteBall => write!(f, "duplicate white ball"),
            LineRejection::MissingPowerball => write!(f, "missing 'Powerball: N' field"),
            LineRejection::PowerballRange(n) => write!(f, "powerball {} outside 1-39", n),
        }
    }
}

/// Reads the leading decimal digits of a token (`"5abc"` and `"5.0"` give 5).
/// `None` when the token does not start with a digit after an optional `+`.
fn leading_number(token: &str) -> Option<u32> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

fn is_marker(line: &str) -> bool {
    let lower = line.to_lowercase();
    SKIP_MARKERS.iter().any(|m| lower.contains(m))
}

/// Parses one `Date; w1,w2,w3,w4,w5; Powerball: N` line.
pub fn parse_line(line: &str) -> Result<Drawing, LineRejection> {
    let line = line.trim();
    if line.is_empty() {
        return Err(LineRejection::Blank);
    }
    if is_marker(line) {
        return Err(LineRejection::Marker);
    }

    let parts: Vec<&str> = line.split(';').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(LineRejection::FieldCount(parts.len()));
    }

    let raw_balls: Vec<&str> = parts[1].split(',').map(str::trim).collect();
    if raw_balls.len() != 5 {
        return Err(LineRejection::WhiteBallCount(raw_balls.len()));
    }

    let mut white_balls = [0u8; 5];
    for (slot, raw) in white_balls.iter_mut().zip(&raw_balls) {
        match leading_number(raw) {
            Some(n) if n >= 1 && n <= WHITE_BALL_MAX as u32 => *slot = n as u8,
            _ => return Err(LineRejection::WhiteBallValue(raw.to_string())),
        }
    }

    let unique: HashSet<u8> = white_balls.iter().copied().collect();
    if unique.len() != 5 {
        return Err(LineRejection::DuplicateWhiteBall);
    }

    let captures = POWERBALL_RX
        .captures(parts[2])
        .ok_or(LineRejection::MissingPowerball)?;
    let powerball = captures[1]
        .parse::<u32>()
        .map_err(|_| LineRejection::MissingPowerball)?;
    if powerball < 1 || powerball > HISTORICAL_POWERBALL_MAX as u32 {
        return Err(LineRejection::PowerballRange(powerball));
    }

    white_balls.sort();
    Ok(Drawing {
        date: parts[0].to_string(),
        white_balls,
        powerball: powerball as u8,
    })
}

/// Best-effort parse of a whole historical record. Bad lines are reported in
/// `errors` and never stop the parse.
pub fn parse_content(content: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for (i, line) in content.split('\n').enumerate() {
        result.total_lines += 1;
        match parse_line(line) {
            Ok(drawing) => {
                result.drawings.push(drawing);
                result.valid_lines += 1;
            }
            Err(reason) if reason.is_silent() => {}
            Err(reason) => {
                log::warn!("Line {}: {} ({})", i + 1, reason, line.trim());
                result.errors.push(format!("Line {}: Invalid format", i + 1));
            }
        }
    }

    log::debug!(
        "Parsed {} drawings from {} lines ({} errors)",
        result.valid_lines,
        result.total_lines,
        result.errors.len()
    );
    result
}
