use super::stats::{DateRange, WatchAverages};

/// Average rate of `total` over the inclusive span of `range`.
///
/// The span is `whole hours between the bounds / 24 + 1` days, so a range
/// whose bounds fall on the same day is one day long. Returns all zeros
/// when the range or either bound is missing.
pub fn watch_averages(total: f64, range: Option<&DateRange>) -> WatchAverages {
    let Some(DateRange {
        min_date: Some(min),
        max_date: Some(max),
    }) = range
    else {
        return WatchAverages::default();
    };

    let days = (*max - *min).num_hours() / 24 + 1;
    if days <= 0 {
        return WatchAverages::default();
    }
    let days = days as f64;

    WatchAverages {
        per_day: total / days,
        per_week: total / (days / 7.0),
        per_month: total / (days / 30.0),
    }
}
