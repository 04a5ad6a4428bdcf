//! Home dashboard numbers and the family analytics tallies.

use crate::api::models::{Activity, DashboardStats, Event, EventsOverview, Profile};
use crate::timefmt;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

pub const PALETTE: [&str; 10] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1", "#ff9999", "#66b3ff", "#99ff99", "#ffcc99", "#ff99cc",
];
pub const NO_DATA_COLOR: &str = "#cccccc";
pub const UPCOMING_LIMIT: usize = 4;
pub const RECENT_ACTIVITY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurnameSlice {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
}

/// Families grouped by surname, largest group first.
pub fn surname_tally(families: &[Profile]) -> Vec<SurnameSlice> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for family in families {
        let surname = family.surname.trim();
        let surname = if surname.is_empty() { "Unknown" } else { surname };
        *counts.entry(surname).or_default() += 1;
    }
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|(an, ac), (bn, bc)| bc.cmp(ac).then_with(|| an.cmp(bn)));

    if entries.is_empty() {
        return vec![SurnameSlice { name: "No Data".to_string(), value: 1, color: NO_DATA_COLOR }];
    }
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| SurnameSlice { name: name.to_string(), value, color: PALETTE[i % PALETTE.len()] })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub families: usize,
    pub members: usize,
}

pub fn totals(families: &[Profile]) -> Totals {
    Totals {
        families: families.len(),
        members: families.iter().map(|f| 1 + f.family_members.len()).sum(),
    }
}

/// Future events across all three lists, soonest first, minus the ones dismissed on this machine.
pub fn upcoming_events(overview: &EventsOverview, dismissed: &HashSet<i64>, now: DateTime<Utc>) -> Vec<Event> {
    let mut upcoming: Vec<(DateTime<Utc>, &Event)> = overview
        .organized_events
        .iter()
        .chain(&overview.invited_events)
        .chain(&overview.public_events)
        .filter(|e| !dismissed.contains(&e.id))
        .filter_map(|e| timefmt::parse(&e.event_date).map(|at| (at, e)))
        .filter(|(at, _)| *at > now)
        .collect();
    upcoming.sort_by_key(|(at, _)| *at);
    upcoming.into_iter().take(UPCOMING_LIMIT).map(|(_, e)| e.clone()).collect()
}

#[derive(Debug, Default)]
pub struct HomeView {
    pub stats: DashboardStats,
    pub upcoming: Vec<Event>,
    pub activities: Vec<Activity>,
    pub dismissed: HashSet<i64>,
}

impl HomeView {
    pub fn new(dismissed: HashSet<i64>) -> Self {
        Self { dismissed, ..Default::default() }
    }

    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = stats;
    }

    pub fn set_events(&mut self, overview: &EventsOverview, now: DateTime<Utc>) {
        self.upcoming = upcoming_events(overview, &self.dismissed, now);
    }

    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
    }

    pub fn recent_activities(&self) -> &[Activity] {
        &self.activities[..self.activities.len().min(RECENT_ACTIVITY_LIMIT)]
    }

    /// Hides an event card. The caller persists the id.
    pub fn dismiss(&mut self, event_id: i64) {
        self.dismissed.insert(event_id);
        self.upcoming.retain(|e| e.id != event_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::FamilyMember;

    fn family(surname: &str, members: usize) -> Profile {
        Profile {
            surname: surname.into(),
            family_members: vec![FamilyMember::default(); members],
            ..Default::default()
        }
    }

    fn event_at(id: i64, at: &str) -> Event {
        Event { id, event_date: at.into(), ..Default::default() }
    }

    #[test]
    fn tally_orders_by_count_then_name() {
        let families = vec![family("Shah", 0), family("Patel", 2), family("", 1), family("Patel", 0), family("Desai", 0)];
        let slices = surname_tally(&families);
        let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Patel", "Desai", "Shah", "Unknown"]);
        assert_eq!(slices[0].value, 2);
        assert_eq!(slices[0].color, "#8884d8");
        assert_eq!(slices[3].color, "#ff7c7c");
    }

    #[test]
    fn empty_tally_has_placeholder() {
        assert_eq!(surname_tally(&[]), vec![SurnameSlice { name: "No Data".into(), value: 1, color: NO_DATA_COLOR }]);
    }

    #[test]
    fn totals_count_heads_of_family() {
        let t = totals(&[family("Shah", 3), family("Patel", 0)]);
        assert_eq!(t, Totals { families: 2, members: 5 });
    }

    #[test]
    fn upcoming_skips_past_and_dismissed() {
        let now = timefmt::parse("2026-10-17T12:00:00Z").unwrap();
        let overview = EventsOverview {
            organized_events: vec![event_at(1, "2026-10-01T10:00:00Z"), event_at(2, "2026-12-01T10:00:00Z")],
            invited_events: vec![event_at(3, "2026-11-01T10:00:00Z"), event_at(4, "2026-10-20T10:00:00Z")],
            public_events: vec![event_at(5, "2026-10-18T10:00:00Z"), event_at(6, "2027-01-01T10:00:00Z"), event_at(7, "")],
        };
        let dismissed: HashSet<i64> = [5].into_iter().collect();
        let ids: Vec<i64> = upcoming_events(&overview, &dismissed, now).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 6]);
    }

    #[test]
    fn dismiss_removes_card() {
        let mut home = HomeView::new(HashSet::new());
        home.upcoming = vec![event_at(1, ""), event_at(2, "")];
        home.dismiss(1);
        assert_eq!(home.upcoming.len(), 1);
        assert!(home.dismissed.contains(&1));
    }
}
