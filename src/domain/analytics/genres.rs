use std::collections::{BTreeMap, HashSet};

use super::stats::{GenreCount, MonthlyGenreBreakdown};

pub const OTHERS_LABEL: &str = "Others";

/// Keep the first `max` genres of a count-descending list and fold the rest
/// into a single "Others" entry. Lists that already fit are returned as-is.
pub fn top_genres_with_others(genres: Vec<GenreCount>, max: usize) -> Vec<GenreCount> {
    if genres.len() <= max {
        return genres;
    }

    let mut genres = genres;
    let rest = genres.split_off(max);
    let others: u64 = rest.iter().map(|g| g.count).sum();
    genres.push(GenreCount::new(OTHERS_LABEL, others));
    genres
}

/// Restrict every month to the same globally ranked top `max` genres, folding
/// the remainder of each month into "Others" when it is non-zero.
///
/// Genres are ranked by their total across all months; ties go to the
/// alphabetically first name. Month order is preserved.
pub fn monthly_top_genres_with_others(
    months: Vec<MonthlyGenreBreakdown>,
    max: usize,
) -> Vec<MonthlyGenreBreakdown> {
    let retained = global_top_genres(&months, max);

    months
        .into_iter()
        .map(|month| {
            let mut genres = BTreeMap::new();
            let mut others = 0;
            for (name, count) in month.genres {
                if retained.contains(name.as_str()) {
                    *genres.entry(name).or_insert(0) += count;
                } else {
                    others += count;
                }
            }
            if others > 0 {
                *genres.entry(OTHERS_LABEL.to_string()).or_insert(0) += others;
            }
            MonthlyGenreBreakdown {
                month: month.month,
                genres,
            }
        })
        .collect()
}

fn global_top_genres(months: &[MonthlyGenreBreakdown], max: usize) -> HashSet<String> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for month in months {
        for (name, count) in &month.genres {
            *totals.entry(name.as_str()).or_insert(0) += count;
        }
    }

    // BTreeMap iteration is alphabetical and the sort is stable, so equal
    // totals keep alphabetical order.
    let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(max)
        .map(|(name, _)| name.to_string())
        .collect()
}
