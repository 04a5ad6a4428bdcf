//! Connections between families: accepted, pending and suggested.

use crate::api::models::{Connection, PendingRequests, Suggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionsTab {
    #[default]
    Accepted,
    Pending,
    Find,
}

impl ConnectionsTab {
    pub const ALL: [ConnectionsTab; 3] = [ConnectionsTab::Accepted, ConnectionsTab::Pending, ConnectionsTab::Find];

    /// Translation key for the tab label.
    pub fn label_key(self) -> &'static str {
        match self {
            ConnectionsTab::Accepted => "accepted",
            ConnectionsTab::Pending => "pending",
            ConnectionsTab::Find => "findConnections",
        }
    }
}

/// One row of whichever list the current tab shows.
#[derive(Debug, Clone, Copy)]
pub enum ConnectionRow<'a> {
    Accepted(&'a Connection),
    Received(&'a Connection),
    Sent(&'a Connection),
    Suggestion(&'a Suggestion),
}

#[derive(Debug, Default)]
pub struct ConnectionsView {
    pub tab: ConnectionsTab,
    pub accepted: Vec<Connection>,
    pub pending: PendingRequests,
    suggestions: Vec<Suggestion>,
    filtered: Vec<Suggestion>,
    pub query: String,
    pub removing: Option<i64>,
}

impl ConnectionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: ConnectionsTab) {
        self.tab = tab;
    }

    pub fn set_accepted(&mut self, list: Vec<Connection>) {
        self.accepted = list;
    }

    pub fn set_pending(&mut self, pending: PendingRequests) {
        self.pending = pending;
    }

    pub fn set_suggestions(&mut self, list: Vec<Suggestion>) {
        self.suggestions = list;
        self.apply_filter();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.apply_filter();
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn filtered_suggestions(&self) -> &[Suggestion] {
        &self.filtered
    }

    fn apply_filter(&mut self) {
        let needle = self.query.trim().to_lowercase();
        self.filtered = self
            .suggestions
            .iter()
            .filter(|s| needle.is_empty() || matches_query(s, &needle))
            .cloned()
            .collect();
    }

    /// Called once a connect request went through; the family stops being suggested.
    pub fn connected(&mut self, profile_id: i64) {
        self.suggestions.retain(|s| s.id != profile_id);
        self.apply_filter();
    }

    pub fn start_remove(&mut self, connection_id: i64) -> bool {
        if self.removing.is_some() {
            return false;
        }
        self.removing = Some(connection_id);
        true
    }

    pub fn finish_remove(&mut self, removed: bool) {
        if let (true, Some(id)) = (removed, self.removing) {
            self.accepted.retain(|c| c.id != id);
        }
        self.removing = None;
    }

    pub fn rows(&self) -> Vec<ConnectionRow<'_>> {
        match self.tab {
            ConnectionsTab::Accepted => self.accepted.iter().map(ConnectionRow::Accepted).collect(),
            ConnectionsTab::Pending => self
                .pending
                .received_requests
                .iter()
                .map(ConnectionRow::Received)
                .chain(self.pending.sent_requests.iter().map(ConnectionRow::Sent))
                .collect(),
            ConnectionsTab::Find => self.filtered.iter().map(ConnectionRow::Suggestion).collect(),
        }
    }

    /// Count shown next to each tab label.
    pub fn count(&self, tab: ConnectionsTab) -> usize {
        match tab {
            ConnectionsTab::Accepted => self.accepted.len(),
            ConnectionsTab::Pending => self.pending.received_requests.len() + self.pending.sent_requests.len(),
            ConnectionsTab::Find => self.filtered.len(),
        }
    }
}

fn matches_query(s: &Suggestion, needle: &str) -> bool {
    s.name.to_lowercase().contains(needle)
        || s.city.as_deref().is_some_and(|c| c.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ConnectionProfile;

    fn suggestion(id: i64, name: &str, city: Option<&str>) -> Suggestion {
        Suggestion { id, name: name.into(), city: city.map(Into::into), ..Default::default() }
    }

    fn connection(id: i64, name: &str) -> Connection {
        Connection { id, profile: ConnectionProfile { id: id * 10, name: name.into(), ..Default::default() }, ..Default::default() }
    }

    fn loaded() -> ConnectionsView {
        let mut view = ConnectionsView::new();
        view.set_accepted(vec![connection(1, "Shah")]);
        view.set_pending(PendingRequests {
            sent_requests: vec![connection(2, "Mehta")],
            received_requests: vec![connection(3, "Desai"), connection(4, "Joshi")],
        });
        view.set_suggestions(vec![
            suggestion(10, "Patel Family", Some("Surat")),
            suggestion(11, "Shah Family", Some("Ahmedabad")),
            suggestion(12, "Modi Family", None),
        ]);
        view
    }

    #[test]
    fn tab_decides_rows() {
        let mut view = loaded();
        assert_eq!(view.tab, ConnectionsTab::Accepted);
        assert_eq!(view.rows().len(), 1);

        view.select_tab(ConnectionsTab::Pending);
        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0], ConnectionRow::Received(c) if c.id == 3));
        assert!(matches!(rows[2], ConnectionRow::Sent(c) if c.id == 2));

        view.select_tab(ConnectionsTab::Find);
        assert_eq!(view.rows().len(), 3);
    }

    #[test]
    fn search_matches_name_or_city_ignoring_case() {
        let mut view = loaded();
        view.set_query("SURAT");
        assert_eq!(view.filtered_suggestions().len(), 1);
        assert_eq!(view.filtered_suggestions()[0].id, 10);

        view.set_query("shah");
        assert_eq!(view.filtered_suggestions()[0].id, 11);

        view.set_query("   ");
        assert_eq!(view.filtered_suggestions().len(), 3);
    }

    #[test]
    fn connecting_drops_suggestion_and_keeps_filter() {
        let mut view = loaded();
        view.set_query("family");
        view.connected(11);
        assert_eq!(view.suggestions().len(), 2);
        assert!(view.filtered_suggestions().iter().all(|s| s.id != 11));
        assert_eq!(view.count(ConnectionsTab::Find), 2);
    }

    #[test]
    fn only_one_removal_at_a_time() {
        let mut view = loaded();
        assert!(view.start_remove(1));
        assert!(!view.start_remove(1));
        view.finish_remove(true);
        assert!(view.accepted.is_empty());
        assert_eq!(view.removing, None);
    }

    #[test]
    fn failed_removal_keeps_connection() {
        let mut view = loaded();
        view.start_remove(1);
        view.finish_remove(false);
        assert_eq!(view.accepted.len(), 1);
    }
}
