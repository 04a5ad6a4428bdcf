//! Events: the three lists, the create/edit form, invitations and RSVPs.

use crate::api::models::{
    Connection, ConnectionProfile, Event, EventPayload, EventType, EventsOverview, Invitation, InvitationStatus,
    InvitationSummary,
};
use crate::timefmt;
use chrono::Local;
use std::collections::{BTreeMap, BTreeSet};

pub const NO_INVITEES: &str = "Please select at least one family to invite.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventsTab {
    #[default]
    Invited,
    Organized,
    Public,
}

impl EventsTab {
    pub const ALL: [EventsTab; 3] = [EventsTab::Invited, EventsTab::Organized, EventsTab::Public];

    pub fn label_key(self) -> &'static str {
        match self {
            EventsTab::Invited => "invitations",
            EventsTab::Organized => "myEvents",
            EventsTab::Public => "communityEvents",
        }
    }

    pub fn empty_key(self) -> &'static str {
        match self {
            EventsTab::Invited => "noInvitations",
            EventsTab::Organized => "noEventsCreated",
            EventsTab::Public => "noCommunityEvents",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventsRequest {
    Create(EventPayload),
    Update { event_id: i64, payload: EventPayload },
    Delete { event_id: i64 },
    LoadInvitations { event_id: i64 },
    Invite { event_id: i64, invitee_ids: Vec<i64> },
    RemoveInvitation { invitation_id: i64 },
    Respond { invitation_id: i64, response: InvitationStatus },
}

#[derive(Debug, Default)]
pub struct EventsView {
    pub tab: EventsTab,
    pub overview: EventsOverview,
    pub deleting: Option<i64>,
}

impl EventsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: EventsTab) {
        self.tab = tab;
    }

    pub fn set_overview(&mut self, overview: EventsOverview) {
        self.overview = overview;
    }

    pub fn list(&self, tab: EventsTab) -> &[Event] {
        match tab {
            EventsTab::Invited => &self.overview.invited_events,
            EventsTab::Organized => &self.overview.organized_events,
            EventsTab::Public => &self.overview.public_events,
        }
    }

    pub fn current(&self) -> &[Event] {
        self.list(self.tab)
    }

    /// Delete needs a confirmed dialog first; only one delete runs at a time.
    pub fn delete(&mut self, event_id: i64) -> Option<EventsRequest> {
        if self.deleting.is_some() {
            return None;
        }
        self.deleting = Some(event_id);
        Some(EventsRequest::Delete { event_id })
    }

    pub fn delete_finished(&mut self) {
        self.deleting = None;
    }
}

/// The invitation addressed to `profile_id` within an event, if any.
pub fn my_invitation(event: &Event, profile_id: i64) -> Option<&Invitation> {
    event.invitations.iter().find(|i| i.invitee.id == profile_id)
}

pub fn rsvp(invitation_id: i64, response: InvitationStatus) -> EventsRequest {
    EventsRequest::Respond { invitation_id, response }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventField {
    Title,
    Description,
    EventDate,
    Location,
    MaxAttendees,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub editing: Option<i64>,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_date: String,
    pub location: String,
    pub max_attendees: String,
    pub is_public: bool,
    pub visible_to_all: bool,
    pub errors: BTreeMap<EventField, &'static str>,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form from an existing event, converting its date to local `YYYY-MM-DDTHH:MM`.
    pub fn edit(event: &Event) -> Self {
        let event_date = timefmt::parse(&event.event_date)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string())
            .unwrap_or_default();
        Self {
            editing: Some(event.id),
            title: event.title.clone(),
            description: event.description.clone(),
            event_type: event.event_type,
            event_date,
            location: event.location.clone(),
            max_attendees: event.max_attendees.map(|n| n.to_string()).unwrap_or_default(),
            is_public: event.is_public,
            visible_to_all: event.visible_to_all,
            errors: BTreeMap::new(),
        }
    }

    /// Clears a field's error as soon as the user touches it.
    pub fn touch(&mut self, field: EventField) {
        self.errors.remove(&field);
    }

    pub fn validate(&self) -> BTreeMap<EventField, &'static str> {
        let mut errors = BTreeMap::new();
        if self.title.trim().is_empty() {
            errors.insert(EventField::Title, "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.insert(EventField::Description, "Description is required");
        }
        if self.event_date.is_empty() {
            errors.insert(EventField::EventDate, "Date and time is required");
        }
        if self.location.trim().is_empty() {
            errors.insert(EventField::Location, "Location is required");
        }
        let max = self.max_attendees.trim();
        if !max.is_empty() && max.parse::<i64>().map_or(true, |n| n < 1) {
            errors.insert(EventField::MaxAttendees, "Max attendees must be at least 1");
        }
        errors
    }

    fn payload(&self) -> EventPayload {
        EventPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            event_type: self.event_type,
            event_date: self.event_date.clone(),
            location: self.location.clone(),
            max_attendees: self.max_attendees.trim().parse().ok(),
            is_public: self.is_public,
            visible_to_all: self.visible_to_all,
        }
    }

    /// Create or update, depending on whether an event is being edited.
    pub fn submit(&mut self) -> Option<EventsRequest> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }
        let payload = self.payload();
        Some(match self.editing {
            Some(event_id) => EventsRequest::Update { event_id, payload },
            None => EventsRequest::Create(payload),
        })
    }
}

/// Picking families to invite to one event.
#[derive(Debug, Clone, Default)]
pub struct InvitePicker {
    pub event_id: i64,
    pub candidates: Vec<ConnectionProfile>,
    pub selected: BTreeSet<i64>,
    pub existing: Vec<InvitationSummary>,
    pub error: String,
}

impl InvitePicker {
    pub fn open(event_id: i64) -> (Self, EventsRequest) {
        (Self { event_id, ..Default::default() }, EventsRequest::LoadInvitations { event_id })
    }

    /// Connections not yet invited become the candidates.
    pub fn set_existing(&mut self, connections: &[Connection], existing: Vec<InvitationSummary>) {
        let invited: BTreeSet<i64> = existing.iter().map(|i| i.invitee_id).collect();
        self.candidates = connections
            .iter()
            .filter(|c| !invited.contains(&c.profile.id))
            .map(|c| c.profile.clone())
            .collect();
        self.selected.retain(|id| !invited.contains(id));
        self.existing = existing;
    }

    pub fn toggle(&mut self, profile_id: i64) {
        if !self.selected.remove(&profile_id) {
            self.selected.insert(profile_id);
        }
        self.error.clear();
    }

    pub fn submit(&mut self) -> Option<EventsRequest> {
        if self.selected.is_empty() {
            self.error = NO_INVITEES.to_string();
            return None;
        }
        Some(EventsRequest::Invite { event_id: self.event_id, invitee_ids: self.selected.iter().copied().collect() })
    }

    pub fn sent_message(&self) -> String {
        format!("Invitations sent to {} families!", self.selected.len())
    }

    pub fn remove(&self, invitation_id: i64) -> EventsRequest {
        EventsRequest::RemoveInvitation { invitation_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Profile;

    fn event(id: i64, title: &str) -> Event {
        Event { id, title: title.into(), ..Default::default() }
    }

    fn filled_form() -> EventForm {
        EventForm {
            title: "Diwali Milan".into(),
            description: "Annual get-together".into(),
            event_type: EventType::Festival,
            event_date: "2026-11-01T18:00".into(),
            location: "Community Hall".into(),
            ..Default::default()
        }
    }

    #[test]
    fn tabs_show_their_own_list() {
        let mut view = EventsView::new();
        view.set_overview(EventsOverview {
            organized_events: vec![event(1, "mine")],
            invited_events: vec![event(2, "theirs"), event(3, "also theirs")],
            public_events: vec![],
        });
        assert_eq!(view.tab, EventsTab::Invited);
        assert_eq!(view.current().len(), 2);
        view.select_tab(EventsTab::Organized);
        assert_eq!(view.current()[0].title, "mine");
        view.select_tab(EventsTab::Public);
        assert!(view.current().is_empty());
        assert_eq!(view.tab.empty_key(), "noCommunityEvents");
    }

    #[test]
    fn blank_form_reports_every_field() {
        let mut form = EventForm { title: "   ".into(), max_attendees: "0".into(), ..Default::default() };
        assert!(form.submit().is_none());
        assert_eq!(form.errors.len(), 5);
        assert_eq!(form.errors[&EventField::Title], "Title is required");
        assert_eq!(form.errors[&EventField::MaxAttendees], "Max attendees must be at least 1");
        form.touch(EventField::Title);
        assert!(!form.errors.contains_key(&EventField::Title));
    }

    #[test]
    fn valid_form_creates_or_updates() {
        let mut form = filled_form();
        form.max_attendees = "50".into();
        match form.submit() {
            Some(EventsRequest::Create(p)) => {
                assert_eq!(p.max_attendees, Some(50));
                assert_eq!(p.event_type, EventType::Festival);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut form = filled_form();
        form.editing = Some(9);
        assert!(matches!(form.submit(), Some(EventsRequest::Update { event_id: 9, .. })));
    }

    #[test]
    fn empty_max_attendees_is_unlimited() {
        let mut form = filled_form();
        let Some(EventsRequest::Create(p)) = form.submit() else { panic!("expected create") };
        assert_eq!(p.max_attendees, None);
    }

    #[test]
    fn edit_prefills_local_datetime() {
        let mut e = event(4, "Picnic");
        e.event_date = "2026-11-01T18:00:00Z".into();
        e.max_attendees = Some(20);
        let form = EventForm::edit(&e);
        assert_eq!(form.editing, Some(4));
        assert_eq!(form.event_date.len(), "2026-11-01T18:00".len());
        assert_eq!(form.max_attendees, "20");
    }

    #[test]
    fn already_invited_connections_are_excluded() {
        let connections: Vec<Connection> = [10, 11, 12]
            .into_iter()
            .map(|id| Connection { id, profile: ConnectionProfile { id, ..Default::default() }, ..Default::default() })
            .collect();
        let (mut picker, req) = InvitePicker::open(3);
        assert_eq!(req, EventsRequest::LoadInvitations { event_id: 3 });
        picker.set_existing(&connections, vec![InvitationSummary { id: 1, invitee_id: 11, ..Default::default() }]);
        let ids: Vec<i64> = picker.candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 12]);
    }

    #[test]
    fn inviting_nobody_is_refused() {
        let (mut picker, _) = InvitePicker::open(3);
        assert!(picker.submit().is_none());
        assert_eq!(picker.error, NO_INVITEES);

        picker.toggle(10);
        picker.toggle(12);
        picker.toggle(10);
        assert_eq!(picker.submit(), Some(EventsRequest::Invite { event_id: 3, invitee_ids: vec![12] }));
        assert_eq!(picker.sent_message(), "Invitations sent to 1 families!");
    }

    #[test]
    fn finds_own_invitation() {
        let mut e = event(1, "Wedding");
        e.invitations.push(Invitation {
            id: 8,
            invitee: Profile { id: 42, ..Default::default() },
            status: InvitationStatus::Maybe,
            created_at: None,
        });
        assert_eq!(my_invitation(&e, 42).map(|i| i.id), Some(8));
        assert!(my_invitation(&e, 7).is_none());
        assert_eq!(rsvp(8, InvitationStatus::Accepted), EventsRequest::Respond { invitation_id: 8, response: InvitationStatus::Accepted });
    }

    #[test]
    fn single_delete_in_flight() {
        let mut view = EventsView::new();
        assert!(view.delete(1).is_some());
        assert!(view.delete(2).is_none());
        view.delete_finished();
        assert!(view.delete(2).is_some());
    }
}
