//! The `[DATA]` line grammar.
//!
//! One store per line: `[DATA] Name | Address | Latitude | Longitude`.
//! Fields are positional, pipe-separated, whitespace-trimmed. A malformed
//! line is skipped with a reason and never aborts its siblings; the upstream
//! text is generator output, not a guaranteed well-formed format.

use konbini_core::DATA_MARKER;

/// Fixed placeholder for a data line with an empty address field.
pub const ADDRESS_PLACEHOLDER: &str = "Address unavailable";

/// A successfully parsed data line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Why a marker-bearing line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than four pipe-separated fields after the marker.
    TooFewFields { found: usize },
    /// The third field is not a finite decimal number.
    BadLatitude(String),
    /// The fourth field is not a finite decimal number.
    BadLongitude(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewFields { found } => {
                write!(f, "expected 4 fields, found {found}")
            }
            SkipReason::BadLatitude(raw) => write!(f, "unparseable latitude: {raw:?}"),
            SkipReason::BadLongitude(raw) => write!(f, "unparseable longitude: {raw:?}"),
        }
    }
}

/// Outcome of parsing one marker-bearing line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(ParsedLine),
    Skipped(SkipReason),
}

/// Parses a single line. Returns `None` for lines without the `[DATA]`
/// marker (prose, not part of the grammar at all), `Some(Skipped)` for
/// marker lines that violate it, `Some(Parsed)` otherwise.
///
/// An empty name field falls back to `brand`; an empty address field falls
/// back to [`ADDRESS_PLACEHOLDER`].
#[must_use]
pub fn parse_data_line(raw: &str, brand: &str) -> Option<LineOutcome> {
    let (_, payload) = raw.split_once(DATA_MARKER)?;

    let fields: Vec<&str> = payload.split('|').map(str::trim).collect();
    if fields.len() < 4 {
        return Some(LineOutcome::Skipped(SkipReason::TooFewFields {
            found: fields.len(),
        }));
    }

    let lat = match parse_finite(fields[2]) {
        Some(v) => v,
        None => {
            return Some(LineOutcome::Skipped(SkipReason::BadLatitude(
                fields[2].to_owned(),
            )))
        }
    };
    let lng = match parse_finite(fields[3]) {
        Some(v) => v,
        None => {
            return Some(LineOutcome::Skipped(SkipReason::BadLongitude(
                fields[3].to_owned(),
            )))
        }
    };

    let name = if fields[0].is_empty() {
        brand.to_owned()
    } else {
        fields[0].to_owned()
    };
    let address = if fields[1].is_empty() {
        ADDRESS_PLACEHOLDER.to_owned()
    } else {
        fields[1].to_owned()
    };

    Some(LineOutcome::Parsed(ParsedLine {
        name,
        address,
        lat,
        lng,
    }))
}

/// Scans the whole reply, returning one outcome per marker-bearing line in
/// text order. Prose lines are not represented.
#[must_use]
pub fn scan_lines(text: &str, brand: &str) -> Vec<LineOutcome> {
    text.lines()
        .filter_map(|line| parse_data_line(line, brand))
        .collect()
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
