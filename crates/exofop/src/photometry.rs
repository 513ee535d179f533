//! Photometry table extraction: band name to magnitude.

use crate::document::{Document, PHOTOMETRY_TABLE};
use crate::types::{ExofopError, ExofopResult, FieldMap, Measurement};

/// Rows before the first band row.
const HEADER_ROWS: usize = 2;

/// Map a band label as printed on the page to its short name.
///
/// Labels without a short name pass through unchanged.
pub fn canonical_band(label: &str) -> &str {
    match label {
        "Kep" => "Kepler",
        "WISE 3.4 micron" => "W1",
        "WISE 4.6 micron" => "W2",
        "WISE 12 micron" => "W3",
        "WISE 22 micron" => "W4",
        other => other,
    }
}

/// Extract every band of the photometry table in page order.
pub fn extract_photometry(doc: &Document) -> ExofopResult<FieldMap<Measurement>> {
    let table = doc.table(PHOTOMETRY_TABLE)?;
    let mut bands = FieldMap::new();

    for row in table.rows().into_iter().skip(HEADER_ROWS) {
        let cells = row.cells();
        let [label, value, ..] = cells.as_slice() else {
            tracing::debug!("skipping photometry row with {} cells", cells.len());
            continue;
        };

        let band = canonical_band(label.trim());
        let measurement = Measurement::parse(value).map_err(|_| {
            ExofopError::InvalidMeasurement(format!("{band}: {}", value.trim()))
        })?;
        bands.insert(band.to_string(), measurement);
    }

    tracing::debug!("extracted {} photometry bands from {}", bands.len(), doc.url());
    Ok(bands)
}
