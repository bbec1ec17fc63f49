//! Bulk search: apply the matching engine across a corpus and rank.
//!
//! Three corpus shapes share one contract: indexable slices of anything
//! [`Searchable`], keyed maps of name → payload, and the [`Searchable`]
//! trait itself for custom types. Results are sorted by descending score;
//! equal scores keep corpus order, so repeated searches over an unchanged
//! corpus are deterministic.

use indexmap::IndexMap;

use crate::candidate::Searchable;
use crate::matcher::{Match, Matcher};

/// One search result, referring back into the corpus.
#[derive(Debug)]
pub struct SearchHit<'a, T: ?Sized> {
    /// Position of the item in the original corpus.
    pub index: usize,
    /// The corpus item.
    pub item: &'a T,
    /// How the query matched it.
    pub matched: Match,
}

/// One search result over a keyed map.
#[derive(Debug)]
pub struct MapHit<'a, V> {
    /// Insertion position of the entry in the map.
    pub index: usize,
    /// The entry's key, which is what was matched.
    pub name: &'a str,
    /// The entry's payload.
    pub value: &'a V,
    /// How the query matched the key.
    pub matched: Match,
}

fn sort_hits<T: ?Sized>(hits: &mut Vec<SearchHit<'_, T>>) {
    // Stable sort: corpus order breaks score ties.
    hits.sort_by(|a, b| b.matched.score.total_cmp(&a.matched.score));
}

/// Matches every corpus element, discards non-matches and matches below
/// the matcher's minimum score, and sorts by descending score.
pub fn search<'a, T: Searchable>(matcher: &Matcher, query: &str, corpus: &'a [T]) -> Vec<SearchHit<'a, T>> {
    let mut hits: Vec<SearchHit<'a, T>> = corpus
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            matcher
                .match_item(query, &item.search_text())
                .map(|matched| SearchHit { index, item, matched })
        })
        .collect();
    sort_hits(&mut hits);
    trace!("search {query:?}: {} of {} matched", hits.len(), corpus.len());
    hits
}

/// Like [`search`], but only the top `limit` results are returned.
pub fn search_with_limit<'a, T: Searchable>(
    matcher: &Matcher,
    query: &str,
    corpus: &'a [T],
    limit: usize,
) -> Vec<SearchHit<'a, T>> {
    let mut hits = search(matcher, query, corpus);
    hits.truncate(limit);
    hits
}

/// Searches the keys of a keyed corpus, carrying each payload along.
pub fn search_map<'a, V>(matcher: &Matcher, query: &str, map: &'a IndexMap<String, V>) -> Vec<MapHit<'a, V>> {
    let mut hits: Vec<MapHit<'a, V>> = map
        .iter()
        .enumerate()
        .filter_map(|(index, (name, value))| {
            matcher.match_item(query, name).map(|matched| MapHit {
                index,
                name: name.as_str(),
                value,
                matched,
            })
        })
        .collect();
    hits.sort_by(|a, b| b.matched.score.total_cmp(&a.matched.score));
    hits
}
