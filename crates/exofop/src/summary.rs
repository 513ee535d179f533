//! Plain-text summaries: one `key = value[,uncertainty]` line per field.

use std::io::Write;
use std::path::Path;

use crate::types::{CandidateFields, ExofopResult, FieldMap, Measurement};

/// Render a measurement map, one newline-terminated line per entry.
///
/// Values are printed from the parsed floats, not the page text, so `12.0`
/// renders as `12` and trailing zeros are dropped. Files written this way do
/// not match summaries that copied the cell text verbatim.
pub fn render(fields: &FieldMap<Measurement>) -> String {
    fields
        .iter()
        .map(|(key, m)| format!("{key} = {m}\n"))
        .collect()
}

/// Render candidates as a `[label]` line followed by that candidate's fields.
/// Empty cells render as `None`.
pub fn render_candidates(candidates: &FieldMap<CandidateFields>) -> String {
    let mut out = String::new();
    for (label, fields) in candidates.iter() {
        out.push_str(&format!("[{label}]\n"));
        for (key, value) in fields.iter() {
            match value {
                Some(v) => out.push_str(&format!("{key} = {v}\n")),
                None => out.push_str(&format!("{key} = None\n")),
            }
        }
    }
    out
}

/// Write `text` to `path`, replacing any existing file.
pub fn save(path: &Path, text: &str) -> ExofopResult<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    tracing::debug!("wrote summary to {}", path.display());
    Ok(())
}
