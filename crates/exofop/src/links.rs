//! Hyperlink harvesting and extension filtering.

use crate::document::Document;
use crate::types::{ExofopError, ExofopResult};

/// Every anchor `href` on the page in document order, `None` where missing.
///
/// Fails with `NoLinksFound` when the page has no anchors at all.
pub fn links_in(doc: &Document) -> ExofopResult<Vec<Option<String>>> {
    let links = doc.anchor_hrefs();
    if links.is_empty() {
        return Err(ExofopError::NoLinksFound(doc.url().to_string()));
    }
    tracing::debug!("found {} links on {}", links.len(), doc.url());
    Ok(links)
}

/// Keep links whose final dot-segment equals `extension` and resolve them to
/// `base_url + mission + "/" + link`.
///
/// Matching is exact and case-sensitive. Missing hrefs and links without a
/// dot are skipped. Returns `None` when nothing matches.
pub fn filter_by_extension(
    links: &[Option<String>],
    extension: &str,
    base_url: &str,
    mission: &str,
) -> Option<Vec<String>> {
    let wanted: Vec<String> = links
        .iter()
        .flatten()
        .filter(|link| {
            link.rsplit_once('.')
                .is_some_and(|(_, ext)| ext == extension)
        })
        .map(|link| format!("{base_url}{mission}/{link}"))
        .collect();

    if wanted.is_empty() {
        tracing::info!("no links with file extension {extension}");
        None
    } else {
        Some(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://exofop.ipac.caltech.edu/";

    fn links(items: &[Option<&str>]) -> Vec<Option<String>> {
        items.iter().map(|l| l.map(|s| s.to_string())).collect()
    }

    #[test]
    fn test_filter_preserves_order_and_prefix() {
        let input = links(&[
            Some("files/a.csv"),
            Some("edit_target.php?id=1"),
            None,
            Some("files/b.fits"),
            Some("files/c.csv"),
        ]);
        let urls = filter_by_extension(&input, "csv", BASE, "k2").unwrap();
        assert_eq!(
            urls,
            vec![
                "https://exofop.ipac.caltech.edu/k2/files/a.csv",
                "https://exofop.ipac.caltech.edu/k2/files/c.csv",
            ]
        );
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let input = links(&[Some("a.CSV"), Some("b.Csv")]);
        assert_eq!(filter_by_extension(&input, "csv", BASE, "k2"), None);
    }

    #[test]
    fn test_filter_skips_links_without_dot() {
        let input = links(&[Some("csv"), Some("#top"), None]);
        assert_eq!(filter_by_extension(&input, "csv", BASE, "k2"), None);
    }

    #[test]
    fn test_filter_uses_final_segment_only() {
        let input = links(&[Some("a.csv.gz"), Some("b.tar.csv")]);
        assert_eq!(
            filter_by_extension(&input, "csv", BASE, "tess").unwrap(),
            vec!["https://exofop.ipac.caltech.edu/tess/b.tar.csv"]
        );
    }

    #[test]
    fn test_links_in_requires_anchors() {
        let doc = Document::parse("https://exofop.test/k2/edit_target.php?id=0", "<p>x</p>");
        assert!(matches!(links_in(&doc), Err(ExofopError::NoLinksFound(_))));

        let doc = Document::parse("u", r#"<a href="x.csv">x</a><a>y</a>"#);
        assert_eq!(
            links_in(&doc).unwrap(),
            vec![Some("x.csv".to_string()), None]
        );
    }
}
