//! ExoFOP target scraper — photometry, stellar parameters, planet candidates
//! and data files from ExoFOP target pages.

pub mod candidates;
pub mod client;
pub mod config;
pub mod document;
pub mod files;
pub mod links;
pub mod photometry;
pub mod stellar;
pub mod summary;
pub mod types;

pub use candidates::{extract_candidates, parse_candidate_row, CANDIDATE_FIELDS};
pub use client::ExofopClient;
pub use config::{ExofopConfig, DEFAULT_BASE_URL, DEFAULT_MISSION};
pub use document::Document;
pub use files::SaveReport;
pub use links::{filter_by_extension, links_in};
pub use photometry::{canonical_band, extract_photometry};
pub use stellar::{
    extract_stellar, extract_stellar_from_row, select_provenance_row, ProvenanceMatch,
    PREFERRED_PROVENANCE,
};
pub use types::*;
