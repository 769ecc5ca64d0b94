//! Newline-delimited JSON storage for collected records.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::StatsError;
use crate::stats::UserStats;

/// Write one JSON object per line, truncating `path`.
pub fn dump(records: &[UserStats], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open '{}' for writing", path.display()))?;
    let mut out = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut out, record)
            .and_then(|()| out.write_all(b"\n").map_err(serde_json::Error::io))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
    }

    out.flush()
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}

/// Read records back in file order. Blank lines are skipped; any other
/// line that does not hold a valid record fails the whole load.
pub fn load(path: &Path) -> Result<Vec<UserStats>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read '{}'", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(&line, path, idx + 1)?);
    }

    Ok(records)
}

fn parse_line(line: &str, path: &Path, line_no: usize) -> Result<UserStats, StatsError> {
    let record: UserStats =
        serde_json::from_str(line).map_err(|source| StatsError::MalformedLine {
            path: path.display().to_string(),
            line: line_no,
            source,
        })?;
    record.validate().map_err(|e| StatsError::RejectedLine {
        path: path.display().to_string(),
        line: line_no,
        reason: e.to_string(),
    })?;
    Ok(record)
}
