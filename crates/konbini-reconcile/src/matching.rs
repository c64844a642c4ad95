//! Fuzzy name matching between parsed store names and grounding titles.
//!
//! Deliberately isolated: the match rule is brittle by nature (substring
//! containment between generator output and an independent places index), so
//! it lives here as a pure function with the tie-break rule spelled out
//! rather than inline string logic at the call site.

use konbini_core::MapsPlace;

/// Case-insensitive substring containment in either direction: the title is
/// contained in the name, or the name in the title. Case folding uses
/// `str::to_lowercase`, so non-ASCII titles fold the same way on both sides.
#[must_use]
pub fn titles_match(name: &str, title: &str) -> bool {
    let name = name.to_lowercase();
    let title = title.to_lowercase();
    name.contains(&title) || title.contains(&name)
}

/// First place (in slice order) whose title matches `name`.
///
/// First-match, not best-match: when several titles qualify, the earliest
/// grounding chunk wins. No similarity scoring.
#[must_use]
pub fn find_place<'a>(name: &str, places: &'a [MapsPlace]) -> Option<&'a MapsPlace> {
    places.iter().find(|place| titles_match(name, &place.title))
}
