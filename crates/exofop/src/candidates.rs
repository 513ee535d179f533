//! Planet candidate table extraction.

use crate::document::{Document, CANDIDATE_TABLE};
use crate::types::{CandidateFields, ExofopError, ExofopResult, FieldMap, Measurement};

/// Rows before the first candidate row.
const HEADER_ROWS: usize = 2;

/// Candidate fields in column order after the label column:
/// transit epoch, period, depth (mmag), depth (ppm), duration, planet radius.
pub const CANDIDATE_FIELDS: [&str; 6] = ["t0", "per", "d_mmag", "d_ppm", "tdur", "rp"];

/// Extract every candidate row, keyed by candidate label.
///
/// A row that cannot be read is logged and skipped; the remaining candidates
/// are still returned. A later row with an already-seen label replaces the
/// earlier one.
pub fn extract_candidates(doc: &Document) -> ExofopResult<FieldMap<CandidateFields>> {
    let table = doc.table(CANDIDATE_TABLE)?;
    let mut candidates = FieldMap::new();

    for (i, row) in table.rows().into_iter().enumerate().skip(HEADER_ROWS) {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .take(CANDIDATE_FIELDS.len() + 1)
            .map(|c| c.trim().to_string())
            .collect();

        match parse_candidate_row(&cells) {
            Ok((label, fields)) => {
                if candidates.insert(label.clone(), fields).is_some() {
                    tracing::debug!("candidate {label} listed twice; keeping the later row");
                }
            }
            Err(e) => tracing::warn!("skipping candidate row {i} on {}: {e}", doc.url()),
        }
    }

    Ok(candidates)
}

/// Turn trimmed cell texts (label first) into a label and its fields.
pub fn parse_candidate_row(cells: &[String]) -> ExofopResult<(String, CandidateFields)> {
    let Some((label, values)) = cells.split_first() else {
        return Err(ExofopError::InvalidMeasurement("empty candidate row".to_string()));
    };
    if values.len() < CANDIDATE_FIELDS.len() {
        return Err(ExofopError::InvalidMeasurement(format!(
            "candidate {label}: expected {} fields, found {}",
            CANDIDATE_FIELDS.len(),
            values.len()
        )));
    }

    let mut fields = FieldMap::new();
    for (name, text) in CANDIDATE_FIELDS.iter().zip(values) {
        if text.is_empty() {
            fields.insert(name.to_string(), None);
            continue;
        }
        let measurement = Measurement::parse(text).map_err(|_| {
            ExofopError::InvalidMeasurement(format!("candidate {label} {name}: {text}"))
        })?;
        fields.insert(name.to_string(), Some(measurement.value()));
        if let Some(err) = measurement.error() {
            fields.insert(format!("{name}_err"), Some(err));
        }
    }

    Ok((label.clone(), fields))
}
