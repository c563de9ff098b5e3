// Favorites hydration — joins a user's saved slugs with provider summaries.

use tracing::warn;

use super::models::{CountrySummary, ProviderSummary, WatchLevel};

/// Build a watch-level-tagged summary for each `(slug, level)` favorite,
/// in the order given.
///
/// A favorite whose slug the provider no longer reports is skipped.
pub fn hydrate_favorites(
    favorites: &[(String, WatchLevel)],
    summary: &ProviderSummary,
) -> Vec<CountrySummary> {
    favorites
        .iter()
        .filter_map(|(slug, level)| match summary.country_by_slug(slug) {
            Some(country) => Some(country.with_watch_level(*level)),
            None => {
                warn!(slug = %slug, "Favorite country missing from provider summary");
                None
            }
        })
        .collect()
}
