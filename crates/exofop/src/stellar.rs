//! Stellar parameter table extraction.
//!
//! The table can carry one row per catalogue. Values are taken from the row
//! whose provenance cell (third from last) names the preferred catalogue;
//! when no row does, extraction fails with `NoPreferredProvenance` rather
//! than guessing. Callers that want a different row can select it with
//! [`select_provenance_row`] and hand it to [`extract_stellar_from_row`].

use crate::document::{Document, Row, STELLAR_TABLE};
use crate::types::{ExofopError, ExofopResult, FieldMap, Measurement};

/// Provenance substring identifying the preferred catalogue.
pub const PREFERRED_PROVENANCE: &str = "Huber";

/// Index of the row holding the column labels.
const LABEL_ROW: usize = 1;
/// Index of the first data row.
const FIRST_DATA_ROW: usize = 2;

/// Always-extracted columns: (page label, short name).
const REQUIRED_COLUMNS: [(&str, &str); 3] =
    [("Teff(K)", "Teff"), ("log(g)", "logg"), ("[Fe/H]", "feh")];

/// Stellar radius column, extracted on request.
const RADIUS_COLUMN: (&str, &str) = ("Radius(R_Sun)", "rstar");

/// Outcome of provenance row selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvenanceMatch {
    /// Cell texts of the first row attributed to the wanted source.
    Found(Vec<String>),
    NotFound,
}

/// Pick the first row whose third-from-last cell contains `marker`.
pub fn select_provenance_row(rows: &[Vec<String>], marker: &str) -> ProvenanceMatch {
    rows.iter()
        .find(|cells| {
            cells
                .len()
                .checked_sub(3)
                .and_then(|i| cells.get(i))
                .is_some_and(|provenance| provenance.contains(marker))
        })
        .cloned()
        .map(ProvenanceMatch::Found)
        .unwrap_or(ProvenanceMatch::NotFound)
}

/// Extract Teff, logg and [Fe/H] (plus `rstar` when `include_radius`) from
/// the preferred provenance row.
pub fn extract_stellar(
    doc: &Document,
    include_radius: bool,
) -> ExofopResult<FieldMap<Measurement>> {
    let table = doc.table(STELLAR_TABLE)?;
    let rows = table.rows();

    let labels = rows
        .get(LABEL_ROW)
        .map(Row::header_cells)
        .unwrap_or_default();
    let data: Vec<Vec<String>> = rows
        .iter()
        .skip(FIRST_DATA_ROW)
        .map(Row::cells)
        .collect();

    match select_provenance_row(&data, PREFERRED_PROVENANCE) {
        ProvenanceMatch::Found(values) => {
            extract_stellar_from_row(&labels, &values, include_radius)
        }
        ProvenanceMatch::NotFound => Err(ExofopError::NoPreferredProvenance(
            PREFERRED_PROVENANCE.to_string(),
        )),
    }
}

/// Build the parameter map from column labels and one row of cell texts.
pub fn extract_stellar_from_row(
    labels: &[String],
    values: &[String],
    include_radius: bool,
) -> ExofopResult<FieldMap<Measurement>> {
    let mut params = FieldMap::new();

    for (label, name) in REQUIRED_COLUMNS {
        let idx = column_index(labels, label).ok_or_else(|| ExofopError::ColumnNotFound {
            table: STELLAR_TABLE.to_string(),
            column: label.to_string(),
        })?;
        params.insert(name.to_string(), cell_measurement(values, idx, label)?);
    }

    if include_radius {
        let (label, name) = RADIUS_COLUMN;
        match column_index(labels, label) {
            Some(idx) => {
                params.insert(name.to_string(), cell_measurement(values, idx, label)?);
            }
            None => tracing::debug!("no {label} column; omitting {name}"),
        }
    }

    Ok(params)
}

fn column_index(labels: &[String], wanted: &str) -> Option<usize> {
    labels.iter().position(|l| l.trim() == wanted)
}

fn cell_measurement(values: &[String], idx: usize, label: &str) -> ExofopResult<Measurement> {
    let text = values
        .get(idx)
        .ok_or_else(|| ExofopError::InvalidMeasurement(format!("{label}: missing cell")))?;
    Measurement::parse(text)
        .map_err(|_| ExofopError::InvalidMeasurement(format!("{label}: {}", text.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<tr><th colspan=\"8\">Stellar Parameters</th></tr>
        <tr><th>Teff(K)</th><th>log(g)</th><th>Radius(R_Sun)</th><th>[Fe/H]</th>\
        <th>Mass</th><th>Provenance</th><th>User</th><th>Date</th></tr>";

    fn page(header: &str, rows: &str) -> Document {
        let html = format!(
            r#"<html><body><table id="myTable2">{header}{rows}</table></body></html>"#
        );
        Document::parse("https://exofop.test/k2/edit_target.php?id=1", &html)
    }

    fn row(teff: &str, prov: &str) -> String {
        format!(
            "<tr><td>{teff}</td><td>4.5±0.1</td><td>0.9±0.05</td><td>-0.1±0.08</td>\
             <td>0.95</td><td>{prov}</td><td>someone</td><td>2016-01-01</td></tr>"
        )
    }

    #[test]
    fn test_preferred_row_is_selected() {
        let rows = format!(
            "{}{}{}",
            row("5000±100", "EPIC"),
            row("5480±112", "Huber et al. 2016"),
            row("5600±90", "Huber (later)")
        );
        let params = extract_stellar(&page(HEADER, &rows), true).unwrap();
        assert_eq!(params.get("Teff"), Some(&Measurement::Uncertain(5480.0, 112.0)));
        assert_eq!(params.get("logg"), Some(&Measurement::Uncertain(4.5, 0.1)));
        assert_eq!(params.get("feh"), Some(&Measurement::Uncertain(-0.1, 0.08)));
        assert_eq!(params.get("rstar"), Some(&Measurement::Uncertain(0.9, 0.05)));
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["Teff", "logg", "feh", "rstar"]
        );
    }

    #[test]
    fn test_radius_excluded_on_request() {
        let rows = row("5480±112", "Huber et al. 2016");
        let params = extract_stellar(&page(HEADER, &rows), false).unwrap();
        assert!(!params.contains_key("rstar"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_radius_omitted_without_column() {
        let header = "<tr><th>x</th></tr>
            <tr><th>Teff(K)</th><th>log(g)</th><th>[Fe/H]</th>\
            <th>Provenance</th><th>User</th><th>Date</th></tr>";
        let rows = "<tr><td>5480</td><td>4.5</td><td>0.0</td>\
            <td>Huber</td><td>u</td><td>d</td></tr>";
        let params = extract_stellar(&page(header, rows), true).unwrap();
        assert!(!params.contains_key("rstar"));
        assert_eq!(params.get("Teff"), Some(&Measurement::Value(5480.0)));
    }

    #[test]
    fn test_no_preferred_row_is_an_error() {
        let rows = format!("{}{}", row("5000±100", "EPIC"), row("5100±90", "Gaia DR2"));
        assert!(matches!(
            extract_stellar(&page(HEADER, &rows), true),
            Err(ExofopError::NoPreferredProvenance(m)) if m == "Huber"
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let header = "<tr><th>x</th></tr>
            <tr><th>Teff(K)</th><th>[Fe/H]</th><th>Provenance</th><th>User</th><th>Date</th></tr>";
        let rows = "<tr><td>5480</td><td>0.0</td><td>Huber</td><td>u</td><td>d</td></tr>";
        assert!(matches!(
            extract_stellar(&page(header, rows), false),
            Err(ExofopError::ColumnNotFound { column, .. }) if column == "log(g)"
        ));
    }

    #[test]
    fn test_select_provenance_row() {
        let rows = vec![
            vec!["a".to_string()],
            vec!["1".into(), "Huber".into(), "u".into(), "d".into()],
        ];
        assert_eq!(
            select_provenance_row(&rows, "Huber"),
            ProvenanceMatch::Found(rows[1].clone())
        );
        assert_eq!(select_provenance_row(&rows, "Gaia"), ProvenanceMatch::NotFound);
        assert_eq!(select_provenance_row(&[], "Huber"), ProvenanceMatch::NotFound);
    }
}
