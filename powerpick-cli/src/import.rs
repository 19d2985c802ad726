use std::path::Path;

use anyhow::{Context, Result, bail};

use powerpick_core::CoreError;
use powerpick_core::context::LotteryContext;
use powerpick_core::models::Drawing;
use powerpick_core::parser::{ParseResult, parse_content};

/// Reads the historical file and builds a ready context.
pub fn load_history(path: &Path) -> Result<(LotteryContext, ParseResult)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open {:?}", path))?;

    let mut ctx = LotteryContext::new();
    match ctx.load(&content) {
        Ok(result) => Ok((ctx, result)),
        Err(CoreError::NoDrawings) => {
            bail!("No valid drawings found in {:?}", path)
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes `drawings` right after the header line, in order, so the file stays
/// newest first.
pub fn insert_drawings(path: &Path, drawings: &[Drawing]) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open {:?}", path))?;

    let new_lines: Vec<String> = drawings.iter().map(Drawing::to_line).collect();
    let mut lines: Vec<&str> = content.split('\n').collect();
    lines.splice(1..1, new_lines.iter().map(String::as_str));

    std::fs::write(path, lines.join("\n"))
        .with_context(|| format!("Cannot write {:?}", path))?;
    for line in &new_lines {
        log::info!("Inserted '{}' into {:?}", line, path);
    }
    Ok(())
}

/// Merges the drawings of another history file whose dates are not known yet.
/// The data file is written before `ctx` changes, so a failed write leaves
/// both untouched.
pub fn merge_history(ctx: &mut LotteryContext, data_path: &Path, other: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(other)
        .with_context(|| format!("Cannot open {:?}", other))?;
    let parsed = parse_content(&content);

    let mut merged = ctx.clone();
    let fresh = merged.merge_drawings(&parsed.drawings);
    if !fresh.is_empty() {
        insert_drawings(data_path, &fresh)?;
        *ctx = merged;
    }
    Ok(fresh.len())
}
