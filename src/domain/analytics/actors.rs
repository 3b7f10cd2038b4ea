use super::stats::TopActor;

/// Merge the separately ranked male and female actor lists into one list
/// ordered by count, descending. Ties keep concatenation order, so male
/// entries precede female entries with the same count.
pub fn merge_actor_rankings(male: Vec<TopActor>, female: Vec<TopActor>) -> Vec<TopActor> {
    let mut merged = male;
    merged.extend(female);
    merged.sort_by(|a, b| b.count.cmp(&a.count));
    merged
}
