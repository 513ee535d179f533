//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};

use exofop::{summary, ExofopClient};

use crate::output::{print_json, print_text};

/// `exofop photometry <id>`
pub async fn photometry(
    client: &ExofopClient,
    id: &str,
    save: Option<&Path>,
    json: bool,
) -> Result<()> {
    let doc = client.fetch(id, &client.config().mission).await?;
    let bands = exofop::extract_photometry(&doc).with_context(|| format!("photometry for {id}"))?;

    let text = summary::render(&bands);
    save_summary(save, &text)?;
    if json {
        print_json(&bands);
    } else {
        print_text(&text);
    }
    Ok(())
}

/// `exofop stellar <id>`
pub async fn stellar(
    client: &ExofopClient,
    id: &str,
    include_radius: bool,
    save: Option<&Path>,
    json: bool,
) -> Result<()> {
    let doc = client.fetch(id, &client.config().mission).await?;
    let params = exofop::extract_stellar(&doc, include_radius)
        .with_context(|| format!("stellar parameters for {id}"))?;

    let text = summary::render(&params);
    save_summary(save, &text)?;
    if json {
        print_json(&params);
    } else {
        print_text(&text);
    }
    Ok(())
}

/// `exofop candidates <id>`
pub async fn candidates(
    client: &ExofopClient,
    id: &str,
    save: Option<&Path>,
    json: bool,
) -> Result<()> {
    let doc = client.fetch(id, &client.config().mission).await?;
    let candidates =
        exofop::extract_candidates(&doc).with_context(|| format!("planet candidates for {id}"))?;

    let text = summary::render_candidates(&candidates);
    save_summary(save, &text)?;
    if json {
        print_json(&candidates);
    } else if candidates.is_empty() {
        println!("No planet candidates listed for {id}.");
    } else {
        print_text(&text);
    }
    Ok(())
}

/// `exofop links <id> [--ext EXT]`
pub async fn links(client: &ExofopClient, id: &str, ext: Option<&str>, json: bool) -> Result<()> {
    let mission = &client.config().mission;
    let links = client.harvest_links(id, mission).await?;

    let Some(ext) = ext else {
        if json {
            print_json(&links);
        } else {
            for link in &links {
                println!("{}", link.as_deref().unwrap_or("(no href)"));
            }
        }
        return Ok(());
    };

    let urls = client.filter_by_extension(&links, ext, mission);
    if json {
        print_json(&urls);
    } else {
        match urls {
            Some(urls) => urls.iter().for_each(|u| println!("{u}")),
            None => println!("No links fetched with file extension={ext}"),
        }
    }
    Ok(())
}

/// `exofop download <id> --ext EXT`
pub async fn download(client: &ExofopClient, id: &str, ext: &str, json: bool) -> Result<()> {
    let mission = &client.config().mission;
    let links = client.harvest_links(id, mission).await?;
    let urls = client.filter_by_extension(&links, ext, mission);
    tracing::debug!(
        "{} of {} links on {id} end in .{ext}",
        urls.as_ref().map_or(0, Vec::len),
        links.len()
    );

    let report = client.save_files(id, urls.as_deref(), ext).await?;

    if json {
        print_json(&report);
    } else if report.attempted() == 0 {
        println!("No links fetched with file extension={ext}");
    } else {
        println!(
            "Saved {}, already present {}, failed {}",
            report.saved.len(),
            report.skipped.len(),
            report.failed.len()
        );
        for failure in &report.failed {
            println!("  Not saved: {failure}");
        }
    }

    if !report.is_complete() {
        bail!(
            "{} of {} .{ext} files could not be downloaded",
            report.failed.len(),
            report.attempted()
        );
    }
    Ok(())
}

fn save_summary(path: Option<&Path>, text: &str) -> Result<()> {
    if let Some(path) = path {
        summary::save(path, text).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
