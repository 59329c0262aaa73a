//! Place search result ranking.
//!
//! Orders candidate places so the most likely intended match comes first.

use std::cmp::Ordering;

use crate::domain::Place;

use super::normalize::fold_name;

/// Match strength of a place against a folded query.
#[derive(Debug, Clone, Copy)]
struct MatchKey {
    exact: bool,
    name_prefix: bool,
    display_prefix: bool,
}

impl MatchKey {
    fn of(place: &Place, folded_query: &str) -> Self {
        let name = fold_name(&place.name);
        let display = place.display_name.as_deref().map(fold_name);

        Self {
            exact: name == folded_query,
            name_prefix: name.starts_with(folded_query),
            display_prefix: display.is_some_and(|d| d.starts_with(folded_query)),
        }
    }
}

/// Compare on a flag where `true` sorts first.
fn prefer(a: bool, b: bool) -> Ordering {
    b.cmp(&a)
}

/// Rank places against a free-text query and keep the best `limit`.
///
/// Places are ordered by:
/// 1. Exact name match
/// 2. Name starts with the query
/// 3. Display name starts with the query
/// 4. Rank, highest first (unranked places last)
/// 5. Name, alphabetically
///
/// All name comparisons are accent- and case-insensitive.
pub fn rank_places(query: &str, places: Vec<Place>, limit: usize) -> Vec<Place> {
    let folded = fold_name(query);

    let mut keyed: Vec<(MatchKey, String, Place)> = places
        .into_iter()
        .map(|p| (MatchKey::of(&p, &folded), fold_name(&p.name), p))
        .collect();

    keyed.sort_by(|(ka, na, a), (kb, nb, b)| {
        let exact = prefer(ka.exact, kb.exact);
        if exact != Ordering::Equal {
            return exact;
        }

        let prefix = prefer(ka.name_prefix, kb.name_prefix);
        if prefix != Ordering::Equal {
            return prefix;
        }

        let display = prefer(ka.display_prefix, kb.display_prefix);
        if display != Ordering::Equal {
            return display;
        }

        // Some(_) > None, so reversing puts unranked places last
        let rank = b.rank.cmp(&a.rank);
        if rank != Ordering::Equal {
            return rank;
        }

        na.cmp(nb).then_with(|| a.name.cmp(&b.name))
    });

    keyed.into_iter().take(limit).map(|(_, _, p)| p).collect()
}

/// Remove later duplicates of the same place id, keeping order.
pub fn dedup_by_id(places: Vec<Place>) -> Vec<Place> {
    let mut seen = std::collections::HashSet::new();
    places
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}
