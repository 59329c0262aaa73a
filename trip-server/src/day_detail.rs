//! Per-day annotations for a trip plan.
//!
//! Notes, accommodation and panel state are keyed by (date, location), so
//! regenerating a plan keeps annotations for days that didn't move. The
//! store lives in memory and is only written out when explicitly saved.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::TripPlan;

/// Errors from saving or loading day details.
#[derive(Debug, thiserror::Error)]
pub enum DayDetailError {
    #[error("failed to access day details file: {0}")]
    Io(#[from] std::io::Error),

    #[error("day details file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Composite key for a day's details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey {
    pub date: NaiveDate,
    pub location: String,
}

impl DayKey {
    pub fn new(date: NaiveDate, location: impl Into<String>) -> Self {
        Self {
            date,
            location: location.into(),
        }
    }
}

/// Whether a day's panel is shown expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPanel {
    #[default]
    Collapsed,
    Expanded,
}

impl DayPanel {
    pub fn toggled(self) -> Self {
        match self {
            DayPanel::Collapsed => DayPanel::Expanded,
            DayPanel::Expanded => DayPanel::Collapsed,
        }
    }
}

/// Free-text annotations for one day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayDetail {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub accommodation: String,
    #[serde(default)]
    pub panel: DayPanel,
}

impl DayDetail {
    fn is_blank(&self) -> bool {
        self.notes.is_empty() && self.accommodation.is_empty() && self.panel == DayPanel::Collapsed
    }
}

/// On-disk form: a list, since JSON object keys must be strings.
#[derive(Debug, Serialize, Deserialize)]
struct DayEntry {
    #[serde(flatten)]
    key: DayKey,
    #[serde(flatten)]
    detail: DayDetail,
}

/// In-memory store of day details.
#[derive(Debug, Clone, Default)]
pub struct DayDetailStore {
    entries: HashMap<DayKey, DayDetail>,
}

impl DayDetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Details for a day; blank when nothing has been recorded.
    pub fn get(&self, key: &DayKey) -> DayDetail {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    fn update(&mut self, key: DayKey, f: impl FnOnce(&mut DayDetail)) {
        let entry = self.entries.entry(key.clone()).or_default();
        f(entry);
        // Blank entries aren't kept
        if entry.is_blank() {
            self.entries.remove(&key);
        }
    }

    pub fn set_notes(&mut self, key: DayKey, notes: impl Into<String>) {
        let notes = notes.into();
        self.update(key, |d| d.notes = notes);
    }

    pub fn set_accommodation(&mut self, key: DayKey, accommodation: impl Into<String>) {
        let accommodation = accommodation.into();
        self.update(key, |d| d.accommodation = accommodation);
    }

    pub fn set_panel(&mut self, key: DayKey, panel: DayPanel) {
        self.update(key, |d| d.panel = panel);
    }

    /// Flip a day's panel and return the new state.
    pub fn toggle(&mut self, key: DayKey) -> DayPanel {
        let panel = self.get(&key).panel.toggled();
        self.set_panel(key, panel);
        panel
    }

    pub fn remove(&mut self, key: &DayKey) -> Option<DayDetail> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Details for each day of `plan`, in day order.
    pub fn entries_for_plan(&self, plan: &TripPlan) -> Vec<(DayKey, DayDetail)> {
        plan.days
            .iter()
            .map(|day| {
                let key = DayKey::new(day.date, day.location.clone());
                let detail = self.get(&key);
                (key, detail)
            })
            .collect()
    }

    /// Write all details to `path` as JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: &Path) -> Result<(), DayDetailError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut entries: Vec<DayEntry> = self
            .entries
            .iter()
            .map(|(key, detail)| DayEntry {
                key: key.clone(),
                detail: detail.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        std::fs::write(path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// Load details saved with [`DayDetailStore::save`].
    pub fn load(path: &Path) -> Result<Self, DayDetailError> {
        let contents = std::fs::read_to_string(path)?;
        let entries: Vec<DayEntry> = serde_json::from_str(&contents)?;
        Ok(Self {
            entries: entries.into_iter().map(|e| (e.key, e.detail)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::build_plan;
    use tempfile::tempdir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn key(d: u32, loc: &str) -> DayKey {
        DayKey::new(date(d), loc)
    }

    #[test]
    fn unknown_day_is_blank() {
        let store = DayDetailStore::new();
        assert_eq!(store.get(&key(1, "Christchurch")), DayDetail::default());
    }

    #[test]
    fn notes_and_accommodation_are_independent() {
        let mut store = DayDetailStore::new();
        store.set_notes(key(1, "Christchurch"), "Botanic gardens");
        store.set_accommodation(key(1, "Christchurch"), "YHA");

        let detail = store.get(&key(1, "Christchurch"));
        assert_eq!(detail.notes, "Botanic gardens");
        assert_eq!(detail.accommodation, "YHA");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_date_different_location_are_separate() {
        let mut store = DayDetailStore::new();
        store.set_notes(key(2, "Christchurch"), "a");
        store.set_notes(key(2, "Lake Tekapo"), "b");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key(2, "Lake Tekapo")).notes, "b");
    }

    #[test]
    fn toggle_flips_panel() {
        let mut store = DayDetailStore::new();
        assert_eq!(store.toggle(key(1, "A")), DayPanel::Expanded);
        assert_eq!(store.get(&key(1, "A")).panel, DayPanel::Expanded);
        assert_eq!(store.toggle(key(1, "A")), DayPanel::Collapsed);
        // Nothing left worth keeping
        assert!(store.is_empty());
    }

    #[test]
    fn clearing_fields_drops_entry() {
        let mut store = DayDetailStore::new();
        store.set_notes(key(1, "A"), "x");
        store.set_notes(key(1, "A"), "");
        assert!(store.is_empty());
    }

    #[test]
    fn entries_follow_plan_order() {
        let plan = build_plan(
            vec!["Christchurch".into(), "Queenstown".into()],
            date(1),
            3,
        )
        .unwrap();

        let mut store = DayDetailStore::new();
        store.set_accommodation(key(3, "Queenstown"), "Lakeside motel");

        let entries = store.entries_for_plan(&plan);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, key(1, "Christchurch"));
        assert_eq!(entries[2].1.accommodation, "Lakeside motel");
        assert_eq!(entries[1].1, DayDetail::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("days.json");

        let mut store = DayDetailStore::new();
        store.set_notes(key(1, "Christchurch"), "Tram ride");
        store.set_panel(key(2, "Lake Tekapo"), DayPanel::Expanded);
        store.save(&path).unwrap();

        let loaded = DayDetailStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(&key(1, "Christchurch")).notes, "Tram ride");
        assert_eq!(loaded.get(&key(2, "Lake Tekapo")).panel, DayPanel::Expanded);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = DayDetailStore::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DayDetailError::Io(_)));
    }
}
