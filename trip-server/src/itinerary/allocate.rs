//! Night allocation: partition trip days across route stops.

/// Distribute `total_days` across `stop_count` stops.
///
/// Each stop gets `total_days / stop_count` days, and the remainder is handed
/// out one day at a time starting from the first stop. Every stop gets at
/// least one day, so when `total_days < stop_count` the result sums to
/// `stop_count` rather than `total_days`.
///
/// Returns an empty vector when either count is not positive, or when a
/// stop's share does not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use trip_server::itinerary::allocate_nights;
///
/// assert_eq!(allocate_nights(3, 5), vec![2, 2, 1]);
/// assert_eq!(allocate_nights(2, 1), vec![1, 1]);
/// assert!(allocate_nights(0, 5).is_empty());
/// ```
pub fn allocate_nights(stop_count: usize, total_days: i64) -> Vec<u32> {
    if stop_count == 0 || total_days <= 0 {
        return Vec::new();
    }

    let total = total_days as u64;
    let stops = stop_count as u64;
    let base = total / stops;
    let remainder = total % stops;

    (0..stops)
        .map(|i| {
            let extra = u64::from(i < remainder);
            u32::try_from((base + extra).max(1)).ok()
        })
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default()
}
