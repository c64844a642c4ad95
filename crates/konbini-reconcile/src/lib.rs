//! Reconciliation of free-text model replies into store records.
//!
//! The model answers under a soft format contract: some lines carry the
//! `[DATA]` marker and a `name | address | lat | lng` payload, the rest is
//! prose. This crate treats that contract as a mini grammar with per-line
//! error recovery ([`line`]), cross-references the surviving records against
//! maps grounding places by fuzzy name matching ([`matching`]), and falls
//! back to grounding-only records when nothing parses ([`reconcile`]).
//!
//! Everything here is pure and deterministic: identical inputs yield
//! structurally identical output.

pub mod line;
pub mod matching;
mod reconcile;

pub use line::{parse_data_line, scan_lines, LineOutcome, ParsedLine, SkipReason};
pub use matching::{find_place, titles_match};
pub use reconcile::{reconcile, FALLBACK_ADDRESS};
