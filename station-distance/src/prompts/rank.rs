//! Prompt ranking over the keyword index.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::domain::{Station, StationKeyword};

/// Number of prompts shown for an empty query.
pub const DEFAULT_EMPTY_QUERY_PROMPTS: usize = 10;

/// Rank station names for a search query.
///
/// - Empty `query`: the `max_for_empty_query` stations with the most hits.
/// - Otherwise: every keyword whose text starts with `query` (case
///   sensitive), resolved to its station. Keywords pointing at unknown
///   stations are skipped.
///
/// Results are ordered by hits, highest first. Ties keep their input order.
/// Names are not de-duplicated: a station reached by two matching keywords
/// appears twice. Callers normalize `query` and keyword text beforehand.
pub fn rank_prompts(
    stations: &[Station],
    keywords: &[StationKeyword],
    query: &str,
    max_for_empty_query: usize,
) -> Vec<String> {
    if query.is_empty() {
        prompts_for_empty_query(stations, max_for_empty_query)
    } else {
        prompts_for_query(stations, keywords, query)
    }
}

fn prompts_for_empty_query(stations: &[Station], max: usize) -> Vec<String> {
    let mut ranked: Vec<&Station> = stations.iter().collect();
    ranked.sort_by_key(|s| Reverse(s.hits));
    ranked
        .into_iter()
        .take(max)
        .map(|s| s.name.clone())
        .collect()
}

fn prompts_for_query(stations: &[Station], keywords: &[StationKeyword], query: &str) -> Vec<String> {
    if stations.is_empty() || keywords.is_empty() {
        return Vec::new();
    }

    // First station wins when ids repeat, matching a linear find.
    let mut by_id: HashMap<i64, &Station> = HashMap::with_capacity(stations.len());
    for station in stations {
        by_id.entry(station.id).or_insert(station);
    }

    let mut matched: Vec<&Station> = keywords
        .iter()
        .filter(|k| k.keyword.starts_with(query))
        .filter_map(|k| by_id.get(&k.station_id).copied())
        .collect();

    matched.sort_by_key(|s| Reverse(s.hits));
    matched.into_iter().map(|s| s.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<Station> {
        vec![
            Station::new(10, "Warszawa Centralna NAME", 1.0, 2.0, 100),
            Station::new(20, "Warszawa Zachodnia NAME", 1.0, 2.0, 200),
            Station::new(30, "Warszawa Wschodnia NAME", 1.0, 2.0, 300),
            Station::new(40, "Bydgoszcz Wschodnia NAME", 1.0, 2.0, 400),
            Station::new(50, "Bydgoszcz Główna NAME", 1.0, 2.0, 500),
        ]
    }

    fn keywords() -> Vec<StationKeyword> {
        vec![
            StationKeyword::new(1, "Warszawa Centralna", 10),
            StationKeyword::new(2, "Warszawa Zachodnia", 20),
            StationKeyword::new(3, "Warszawa Wschodnia", 30),
            StationKeyword::new(4, "Bydgoszcz Wschodnia", 40),
            StationKeyword::new(5, "Bydgoszcz Główna", 50),
        ]
    }

    #[test]
    fn empty_query_returns_most_popular() {
        let s = stations();
        let prompts = rank_prompts(&s, &keywords(), "", 3);
        assert_eq!(prompts, vec![s[4].name.clone(), s[3].name.clone(), s[2].name.clone()]);
    }

    #[test]
    fn empty_query_default_limit() {
        let many: Vec<Station> = (0..25)
            .map(|i| Station::new(i, format!("S{i}"), 0.0, 0.0, i as i32))
            .collect();
        let prompts = rank_prompts(&many, &[], "", DEFAULT_EMPTY_QUERY_PROMPTS);
        assert_eq!(prompts.len(), 10);
        assert_eq!(prompts[0], "S24");
        assert_eq!(prompts[9], "S15");
    }

    #[test]
    fn empty_query_ignores_keywords() {
        let s = stations();
        let prompts = rank_prompts(&s, &[], "", 2);
        assert_eq!(prompts, vec![s[4].name.clone(), s[3].name.clone()]);
    }

    #[test]
    fn prefix_match_sorted_by_hits() {
        let s = stations();
        let prompts = rank_prompts(&s, &keywords(), "Warszawa", DEFAULT_EMPTY_QUERY_PROMPTS);
        assert_eq!(
            prompts,
            vec![s[2].name.clone(), s[1].name.clone(), s[0].name.clone()]
        );
    }

    #[test]
    fn single_letter_prefix() {
        let s = stations();
        let prompts = rank_prompts(&s, &keywords(), "B", DEFAULT_EMPTY_QUERY_PROMPTS);
        assert_eq!(prompts, vec![s[4].name.clone(), s[3].name.clone()]);
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let prompts = rank_prompts(&stations(), &keywords(), "warszawa", 10);
        assert!(prompts.is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let prompts = rank_prompts(&stations(), &keywords(), "asdas", 10);
        assert!(prompts.is_empty());
    }

    #[test]
    fn empty_catalog_is_empty() {
        assert!(rank_prompts(&[], &[], "B", 10).is_empty());
        assert!(rank_prompts(&stations(), &[], "B", 10).is_empty());
        assert!(rank_prompts(&[], &keywords(), "B", 10).is_empty());
    }

    #[test]
    fn unresolved_keywords_are_skipped() {
        let mut k = keywords();
        k.push(StationKeyword::new(6, "Warszawa Gdańska", 999));
        let prompts = rank_prompts(&stations(), &k, "Warszawa", 10);
        assert_eq!(prompts.len(), 3);
    }

    #[test]
    fn duplicate_names_are_kept() {
        let s = stations();
        let mut k = keywords();
        k.push(StationKeyword::new(6, "Warszawa Wsch.", 30));
        let prompts = rank_prompts(&s, &k, "Warszawa", 10);
        assert_eq!(
            prompts,
            vec![
                s[2].name.clone(),
                s[2].name.clone(),
                s[1].name.clone(),
                s[0].name.clone()
            ]
        );
    }

    #[test]
    fn ties_keep_keyword_order() {
        let s = vec![
            Station::new(1, "Alpha", 0.0, 0.0, 5),
            Station::new(2, "Beta", 0.0, 0.0, 5),
            Station::new(3, "Gamma", 0.0, 0.0, 9),
        ];
        let k = vec![
            StationKeyword::new(1, "x beta", 2),
            StationKeyword::new(2, "x alpha", 1),
            StationKeyword::new(3, "x gamma", 3),
        ];
        assert_eq!(rank_prompts(&s, &k, "x", 10), vec!["Gamma", "Beta", "Alpha"]);
        assert_eq!(rank_prompts(&s, &k, "", 10), vec!["Gamma", "Alpha", "Beta"]);
    }
}
