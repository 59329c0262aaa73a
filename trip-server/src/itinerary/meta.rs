//! Per-day stop metadata.

use serde::Serialize;

/// Which stop a day belongs to, and whether it opens that stop's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStopMeta {
    pub stop_index: usize,
    pub is_first_day: bool,
}

/// Expand a stop list and its night counts into one record per day.
///
/// Stops are walked in order and each stop emits `nights[i]` records, the
/// first flagged with `is_first_day`. If the slices differ in length only
/// the common prefix is used.
pub fn build_day_stop_meta<S>(stops: &[S], nights: &[u32]) -> Vec<DayStopMeta> {
    let total: usize = nights.iter().take(stops.len()).map(|&n| n as usize).sum();
    let mut meta = Vec::with_capacity(total);

    for (stop_index, &count) in nights.iter().enumerate().take(stops.len()) {
        for night in 0..count {
            meta.push(DayStopMeta {
                stop_index,
                is_first_day: night == 0,
            });
        }
    }

    meta
}
