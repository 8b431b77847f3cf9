use std::collections::HashSet;
use std::hash::Hash;

/// Concatenates `sources` in order and keeps only the first item seen for each key.
///
/// Later duplicates are dropped whole, even when they carry different data.
pub fn merge_dedup_by<T, K, I, F>(sources: I, mut key: F) -> Vec<T>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for item in sources.into_iter().flatten() {
        if seen.insert(key(&item)) {
            merged.push(item);
        }
    }
    merged
}
