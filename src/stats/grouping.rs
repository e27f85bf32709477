//! Grouping and ranking of download events
//!
//! Single-pass accumulation into locally owned maps, so every call is pure
//! and safe to run in parallel across window requests. Ordering is count
//! descending with ties kept in first-appearance order (stable sort), which
//! makes the output deterministic for a given row sequence.

use crate::stats::models::{CategoryStat, DownloadEvent, EpisodeStats};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Share of `total`, defined as 0 (not NaN) when the total is 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Number of distinct non-empty audience hashes across the row set.
pub fn unique_audience(rows: &[DownloadEvent]) -> u64 {
    let hashes: HashSet<&str> = rows.iter().filter_map(DownloadEvent::audience).collect();
    hashes.len() as u64
}

/// Groups rows by the extracted categorical value and ranks by count.
///
/// Rows whose key is absent are excluded from the grouping but still count
/// toward `window_total`, the percentage denominator — pass the size of the
/// whole filtered window, not the number of rows with a key. The cap is
/// applied after sorting so ranking never depends on truncation order.
pub fn top_categories(
    rows: &[DownloadEvent],
    window_total: u64,
    cap: Option<usize>,
    key: impl Fn(&DownloadEvent) -> Option<&str>,
) -> Vec<CategoryStat> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for row in rows {
        let Some(value) = key(row) else { continue };
        match counts.entry(value.to_string()) {
            Entry::Occupied(mut entry) => *entry.get_mut() += 1,
            Entry::Vacant(entry) => {
                first_seen.push(value.to_string());
                entry.insert(1);
            }
        }
    }

    let mut stats: Vec<CategoryStat> = first_seen
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            CategoryStat {
                key,
                count,
                percentage: percentage(count, window_total),
            }
        })
        .collect();

    // Stable: equal counts keep first-appearance order
    stats.sort_by(|a, b| b.count.cmp(&a.count));

    if let Some(cap) = cap {
        stats.truncate(cap);
    }
    stats
}

/// Per-episode variant: counts downloads and accumulates the audience-hash
/// set per episode to derive `unique_listeners`. Hashes are never exposed,
/// only the set cardinality.
pub fn episode_stats(
    rows: &[DownloadEvent],
    titles: &HashMap<String, String>,
) -> Vec<EpisodeStats> {
    #[derive(Default)]
    struct Accum {
        downloads: u64,
        listeners: HashSet<String>,
    }

    let mut accum: HashMap<String, Accum> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for row in rows {
        let Some(item) = row.item_key() else { continue };
        let entry = match accum.entry(item.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                first_seen.push(item.to_string());
                entry.insert(Accum::default())
            }
        };
        entry.downloads += 1;
        if let Some(hash) = row.audience() {
            entry.listeners.insert(hash.to_string());
        }
    }

    let mut stats: Vec<EpisodeStats> = first_seen
        .into_iter()
        .map(|episode_id| {
            let acc = &accum[&episode_id];
            EpisodeStats {
                title: titles
                    .get(&episode_id)
                    .cloned()
                    .unwrap_or_else(|| episode_id.clone()),
                downloads: acc.downloads,
                unique_listeners: acc.listeners.len() as u64,
                episode_id,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.downloads.cmp(&a.downloads));
    stats
}
