use std::hash::Hash;

use indexmap::IndexMap;

use crate::models::Scored;

/// Merges per-input ranked lists into one ranking.
///
/// Rows for which `exclude` holds are dropped before anything else, so they
/// never contribute to a mean. Rows that appear in several lists keep one
/// entry scored with the mean of their scores. The result is sorted by score
/// descending; equal scores keep the order in which rows were first seen.
/// At most `limit` rows are returned.
pub fn aggregate<K, L, I, F>(lists: L, exclude: F, limit: usize) -> Vec<Scored<K>>
where
    K: Hash + Eq,
    L: IntoIterator<Item = I>,
    I: IntoIterator<Item = Scored<K>>,
    F: Fn(&K) -> bool,
{
    let mut merged: IndexMap<K, (f64, usize)> = IndexMap::new();
    for scored in lists.into_iter().flatten() {
        if exclude(&scored.item) {
            continue;
        }
        let entry = merged.entry(scored.item).or_insert((0.0, 0));
        entry.0 += f64::from(scored.score);
        entry.1 += 1;
    }

    let mut ranked: Vec<Scored<K>> = merged
        .into_iter()
        .map(|(item, (sum, count))| Scored::new(item, (sum / count as f64) as f32))
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}
