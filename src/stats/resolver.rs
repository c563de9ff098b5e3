// Country resolver — maps free text or an ISO2 code onto the provider's
// country directory.
//
// Two matching modes, never mixed in one call:
//   - ISO2: a two-character, all upper-case query is compared for exact
//     equality against each entry's ISO2 code.
//   - Name: query and names are lower-cased with spaces and hyphens removed,
//     and an entry matches when the query is a substring of its name.
//
// Matches keep the directory's order.

use serde::Serialize;

use super::error::StatsError;
use super::models::CountryDirectoryEntry;

/// Outcome of resolving one query against the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "countries", rename_all = "snake_case")]
pub enum ResolutionResult {
    NoMatch,
    SingleMatch(CountryDirectoryEntry),
    /// Two or more candidates, in directory order. Never empty.
    MultipleMatches(Vec<CountryDirectoryEntry>),
}

impl ResolutionResult {
    fn from_matches(mut matches: Vec<CountryDirectoryEntry>) -> Self {
        match matches.len() {
            0 => ResolutionResult::NoMatch,
            1 => ResolutionResult::SingleMatch(matches.remove(0)),
            _ => ResolutionResult::MultipleMatches(matches),
        }
    }

    /// The candidates in order; empty for `NoMatch`.
    pub fn candidates(&self) -> &[CountryDirectoryEntry] {
        match self {
            ResolutionResult::NoMatch => &[],
            ResolutionResult::SingleMatch(entry) => std::slice::from_ref(entry),
            ResolutionResult::MultipleMatches(entries) => entries,
        }
    }

    /// Narrow to exactly one country, for callers that can't work with
    /// a candidate list.
    pub fn into_single(self) -> Result<CountryDirectoryEntry, StatsError> {
        match self {
            ResolutionResult::NoMatch => Err(StatsError::NoMatch),
            ResolutionResult::SingleMatch(entry) => Ok(entry),
            ResolutionResult::MultipleMatches(entries) => Err(StatsError::AmbiguousMatch(entries)),
        }
    }
}

/// Resolve `query` against `directory`.
///
/// An empty query is a substring of every name and so matches the whole
/// directory.
pub fn resolve(query: &str, directory: &[CountryDirectoryEntry]) -> ResolutionResult {
    let matches: Vec<CountryDirectoryEntry> = if is_iso2_code(query) {
        directory
            .iter()
            .filter(|entry| entry.iso2 == query)
            .cloned()
            .collect()
    } else {
        let needle = normalize(query);
        directory
            .iter()
            .filter(|entry| normalize(&entry.name).contains(&needle))
            .cloned()
            .collect()
    };

    ResolutionResult::from_matches(matches)
}

/// A query is treated as an ISO2 code when it is exactly two characters
/// and both are upper-case letters.
pub fn is_iso2_code(query: &str) -> bool {
    query.chars().count() == 2 && query.chars().all(char::is_uppercase)
}

/// Lower-case and drop spaces and hyphens.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
