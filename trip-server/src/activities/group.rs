//! Attaching activities to the days of a plan.

use serde::Serialize;

use crate::domain::{TripDay, TripPlan};
use crate::places::fold_name;

use super::types::ActivitySummary;

/// One plan day with the activities found for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayActivities {
    #[serde(flatten)]
    pub day: TripDay,
    pub activities: Vec<ActivitySummary>,
}

/// Whether an activity at `activity_location` belongs to a day spent at
/// `day_location`.
///
/// Locations are compared per comma-separated part, folded, so
/// "Earnslaw Park, Queenstown" matches a day in "Queenstown, Otago".
pub fn location_matches(day_location: &str, activity_location: &str) -> bool {
    let Some(place) = day_location.split(',').next().map(fold_name) else {
        return false;
    };
    if place.is_empty() {
        return false;
    }
    activity_location
        .split(',')
        .any(|part| fold_name(part) == place)
}

/// Merge activities into each day of `plan`.
///
/// An activity with a start time goes to the day at its location on that
/// date. One without goes to the first day at its location. Activities
/// matching no day are dropped.
pub fn group_by_day(plan: &TripPlan, activities: &[ActivitySummary]) -> Vec<DayActivities> {
    let mut grouped: Vec<DayActivities> = plan
        .days
        .iter()
        .map(|day| DayActivities {
            day: day.clone(),
            activities: Vec::new(),
        })
        .collect();

    for activity in activities {
        let slot = grouped.iter_mut().find(|g| {
            location_matches(&g.day.location, &activity.location)
                && activity
                    .starts_at
                    .is_none_or(|start| start.date() == g.day.date)
        });
        if let Some(slot) = slot {
            slot.activities.push(activity.clone());
        }
    }

    grouped
}
