//! Parsed target page and the table helpers the extractors share.

use crate::types::{ExofopError, ExofopResult};
use scraper::{ElementRef, Html, Selector};

/// Element id of the photometry table.
pub const PHOTOMETRY_TABLE: &str = "myTable1";
/// Element id of the stellar parameter table.
pub const STELLAR_TABLE: &str = "myTable2";
/// Element id of the planet candidate table.
pub const CANDIDATE_TABLE: &str = "myTable3";

/// A parsed target page.
pub struct Document {
    url: String,
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url).finish()
    }
}

impl Document {
    /// Parse raw HTML fetched from `url`.
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            html: Html::parse_document(html),
        }
    }

    /// URL the page was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Locate a table by element id.
    pub fn table(&self, id: &str) -> ExofopResult<Table<'_>> {
        let sel = Selector::parse(&format!("#{id}"))
            .map_err(|_| ExofopError::TableNotFound(id.to_string()))?;
        self.html
            .select(&sel)
            .next()
            .map(|element| Table {
                id: id.to_string(),
                element,
            })
            .ok_or_else(|| ExofopError::TableNotFound(id.to_string()))
    }

    /// `href` of every anchor in document order; `None` where it is missing.
    pub fn anchor_hrefs(&self) -> Vec<Option<String>> {
        let sel = Selector::parse("a").expect("anchor selector is valid");
        self.html
            .select(&sel)
            .map(|a| a.value().attr("href").map(|s| s.to_string()))
            .collect()
    }
}

/// A `<table>` (or any element carrying the table id) within a document.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    id: String,
    element: ElementRef<'a>,
}

impl<'a> Table<'a> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All descendant `<tr>` rows, header rows included.
    pub fn rows(&self) -> Vec<Row<'a>> {
        let sel = Selector::parse("tr").expect("row selector is valid");
        self.element.select(&sel).map(|element| Row { element }).collect()
    }
}

/// One `<tr>` row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: ElementRef<'a>,
}

impl Row<'_> {
    /// Text of every `<td>` cell, untrimmed.
    pub fn cells(&self) -> Vec<String> {
        let sel = Selector::parse("td").expect("cell selector is valid");
        self.element.select(&sel).map(text_of).collect()
    }

    /// Text of every `<th>` cell, untrimmed.
    pub fn header_cells(&self) -> Vec<String> {
        let sel = Selector::parse("th").expect("header selector is valid");
        self.element.select(&sel).map(text_of).collect()
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <table id="myTable1">
        <tr><th>Band</th><th>Value</th></tr>
        <tr><td>Kep</td><td> 12.3 </td></tr>
      </table>
      <a href="a.csv">A</a>
      <a name="anchor-only">B</a>
      <a href="files/b.fits">C</a>
    </body></html>
    "#;

    #[test]
    fn test_table_lookup_and_rows() {
        let doc = Document::parse("https://example.com/k2/edit_target.php?id=1", PAGE);
        let table = doc.table("myTable1").unwrap();
        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].header_cells(), vec!["Band", "Value"]);
        assert!(rows[0].cells().is_empty());
        assert_eq!(rows[1].cells(), vec!["Kep", " 12.3 "]);
    }

    #[test]
    fn test_missing_table() {
        let doc = Document::parse("u", PAGE);
        assert!(matches!(
            doc.table("myTable2"),
            Err(ExofopError::TableNotFound(id)) if id == "myTable2"
        ));
    }

    #[test]
    fn test_anchor_hrefs_keep_missing_entries() {
        let doc = Document::parse("u", PAGE);
        assert_eq!(
            doc.anchor_hrefs(),
            vec![
                Some("a.csv".to_string()),
                None,
                Some("files/b.fits".to_string())
            ]
        );
    }
}
