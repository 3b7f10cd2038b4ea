use std::ops::Sub;

use super::stats::{Period, Trend, TrendDirection};

/// Compare the two most recent periods of `series`, ordering by label.
///
/// An empty series is neutral. A series with a single period reports `Up`
/// by that period's own value.
// TODO: decide with product whether a single period should be Neutral/0.
pub fn period_trend<T>(series: &[Period<T>]) -> Trend<T>
where
    T: Copy + Default + PartialOrd + Sub<Output = T>,
{
    match series {
        [] => Trend::default(),
        [only] => Trend {
            direction: TrendDirection::Up,
            value: only.value,
        },
        _ => {
            let mut sorted: Vec<&Period<T>> = series.iter().collect();
            sorted.sort_by(|a, b| a.label.cmp(&b.label));

            let last = sorted[sorted.len() - 1].value;
            let prev = sorted[sorted.len() - 2].value;
            let diff = last - prev;
            let zero = T::default();

            let direction = if diff > zero {
                TrendDirection::Up
            } else if diff < zero {
                TrendDirection::Down
            } else {
                TrendDirection::Neutral
            };

            Trend {
                direction,
                value: diff,
            }
        }
    }
}
