use crate::constants::MAX_SEARCH_CANDIDATES;
use crate::index::{IndexedStation, StationIndex};

/// Trim and lowercase, used for both indexed text and queries
#[must_use]
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Outcome of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults<'a> {
    /// The query was blank; any previous results should be cleared
    Cleared,
    /// Matches in index order, possibly empty
    Matches(Vec<&'a IndexedStation>),
}

impl<'a> SearchResults<'a> {
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        matches!(self, SearchResults::Cleared)
    }

    #[must_use]
    pub fn matches(&self) -> &[&'a IndexedStation] {
        match self {
            SearchResults::Cleared => &[],
            SearchResults::Matches(items) => items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }

    /// The first `limit` matches
    #[must_use]
    pub fn displayed(&self, limit: usize) -> &[&'a IndexedStation] {
        let items = self.matches();
        &items[..items.len().min(limit)]
    }

    /// `Showing 12 of 40 matches` when matches were cut for display
    #[must_use]
    pub fn truncation_note(&self, limit: usize) -> Option<String> {
        let total = self.len();
        (total > limit).then(|| format!("Showing {limit} of {total} matches"))
    }
}

/// Substring search over the normalized station text, capped at
/// [`MAX_SEARCH_CANDIDATES`]
#[must_use]
pub fn search<'a>(index: &'a StationIndex, query: &str) -> SearchResults<'a> {
    search_with_limit(index, query, MAX_SEARCH_CANDIDATES)
}

#[must_use]
pub fn search_with_limit<'a>(index: &'a StationIndex, query: &str, limit: usize) -> SearchResults<'a> {
    let needle = normalize_text(query);
    if needle.is_empty() {
        return SearchResults::Cleared;
    }

    SearchResults::Matches(
        index
            .stations()
            .iter()
            .filter(|item| item.search_text.contains(&needle))
            .take(limit)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::{sample_index, station};
    use crate::index::StationIndex;

    fn keys<'a>(results: &SearchResults<'a>) -> Vec<&'a str> {
        results.matches().iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Silom "), "silom");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\t\n"), "");
    }

    #[test]
    fn test_blank_query_clears() {
        let index = sample_index();
        assert!(search(&index, "").is_cleared());
        assert!(search(&index, "   ").is_cleared());
        assert!(search(&index, "   ").is_empty());
    }

    #[test]
    fn test_no_matches_is_not_cleared() {
        let index = sample_index();
        let results = search(&index, "zzz");
        assert!(!results.is_cleared());
        assert!(results.is_empty());
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let index = sample_index();
        let a = search(&index, "Silom");
        let b = search(&index, "silom");
        let c = search(&index, "  silom ");
        assert_eq!(keys(&a), keys(&b));
        assert_eq!(keys(&b), keys(&c));
        assert_eq!(keys(&a), vec!["S2::2", "CEN::2"]);
    }

    #[test]
    fn test_substring_match() {
        let index = sample_index();
        assert_eq!(keys(&search(&index, "sil")), vec!["S2::2", "CEN::2"]);
        assert_eq!(keys(&search(&index, "sala d")), vec!["S2::2"]);
    }

    #[test]
    fn test_results_are_subset_and_contain_query() {
        let index = sample_index();
        for query in ["siam", "BTS", "e4", "สยาม", "a", "no"] {
            let needle = normalize_text(query);
            let results = search(&index, query);
            for item in results.matches() {
                assert!(item.search_text.contains(&needle));
                assert!(index.get(&item.key).is_some());
            }
        }
    }

    #[test]
    fn test_results_keep_index_order() {
        let index = sample_index();
        assert_eq!(keys(&search(&index, "bts")), vec!["CEN::1", "S2::2", "E4::1", "CEN::2"]);
    }

    #[test]
    fn test_candidates_are_capped() {
        let stations = (0..200).map(|i| station(&format!("S{i}"), "1", "13.7", "100.5")).collect();
        let index = StationIndex::build(stations, Vec::new());

        let results = search(&index, "s");
        assert_eq!(results.len(), MAX_SEARCH_CANDIDATES);
        assert_eq!(results.matches()[0].key.as_str(), "S0::1");
    }

    #[test]
    fn test_display_truncation() {
        let index = sample_index();
        let results = search(&index, "bts");

        assert_eq!(results.displayed(2).len(), 2);
        assert_eq!(results.displayed(12).len(), 4);
        assert_eq!(results.truncation_note(2).as_deref(), Some("Showing 2 of 4 matches"));
        assert_eq!(results.truncation_note(12), None);
    }
}
