//! Direct messages between families.
//!
//! Sending is optimistic: the line shows up as pending straight away and is either confirmed
//! or taken back once the server answers.

use crate::api::models::{Conversation, Message, Profile};
use crate::timefmt;
use chrono::Utc;

pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPartner {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

impl ChatPartner {
    pub fn from_profile(p: &Profile) -> Self {
        Self { id: p.id, name: p.display_name(), avatar: p.avatar.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Server id, absent until the send is confirmed.
    pub id: Option<i64>,
    pub local_id: Option<u64>,
    pub text: String,
    pub created_at: String,
    pub outgoing: bool,
    pub pending: bool,
}

impl ChatLine {
    fn from_message(m: &Message, partner_id: i64) -> Self {
        Self {
            id: Some(m.id),
            local_id: None,
            text: m.message.clone(),
            created_at: m.created_at.clone(),
            outgoing: m.sender.id != partner_id,
            pending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesRequest {
    LoadThread { partner_id: i64 },
    LoadPartner { partner_id: i64 },
    Send { local_id: u64, receiver_id: i64, message: String },
}

#[derive(Debug, Default)]
pub struct MessagesView {
    pub conversations: Vec<Conversation>,
    pub partner: Option<ChatPartner>,
    pub lines: Vec<ChatLine>,
    pub draft: String,
    pub sending: bool,
    pub error: String,
    next_local_id: u64,
}

impl MessagesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_conversations(&mut self, list: Vec<Conversation>) {
        self.conversations = list;
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    /// Opens the thread with `partner_id`. Known partners come from the conversation list,
    /// anyone else has to be looked up first.
    pub fn select_partner(&mut self, partner_id: i64) -> MessagesRequest {
        self.lines.clear();
        self.error.clear();
        match self.conversations.iter_mut().find(|c| c.partner.id == partner_id) {
            Some(conv) => {
                conv.unread_count = 0;
                self.partner = Some(ChatPartner {
                    id: conv.partner.id,
                    name: conv.partner.name.clone(),
                    avatar: conv.partner.avatar.clone(),
                });
                MessagesRequest::LoadThread { partner_id }
            }
            None => {
                self.partner = None;
                MessagesRequest::LoadPartner { partner_id }
            }
        }
    }

    pub fn partner_loaded(&mut self, profile: &Profile) -> MessagesRequest {
        self.partner = Some(ChatPartner::from_profile(profile));
        MessagesRequest::LoadThread { partner_id: profile.id }
    }

    /// Replaces the thread, unless the user has since moved to another partner.
    pub fn set_thread(&mut self, partner_id: i64, messages: &[Message]) {
        if self.partner.as_ref().map(|p| p.id) != Some(partner_id) {
            return;
        }
        let mut lines: Vec<ChatLine> = messages.iter().map(|m| ChatLine::from_message(m, partner_id)).collect();
        lines.sort_by_key(|l| timefmt::parse(&l.created_at));
        // Keep anything still in flight at the bottom.
        lines.extend(self.lines.iter().filter(|l| l.pending).cloned());
        self.lines = lines;
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() && self.partner.is_some() && !self.sending
    }

    pub fn send(&mut self) -> Option<MessagesRequest> {
        if !self.can_send() {
            return None;
        }
        let receiver_id = self.partner.as_ref()?.id;
        let text = self.draft.trim().to_string();
        self.next_local_id += 1;
        let local_id = self.next_local_id;
        self.lines.push(ChatLine {
            id: None,
            local_id: Some(local_id),
            text: text.clone(),
            created_at: Utc::now().to_rfc3339(),
            outgoing: true,
            pending: true,
        });
        self.draft.clear();
        self.error.clear();
        self.sending = true;
        Some(MessagesRequest::Send { local_id, receiver_id, message: text })
    }

    pub fn send_succeeded(&mut self, local_id: u64, server_id: Option<i64>) {
        self.sending = false;
        if let Some(line) = self.lines.iter_mut().find(|l| l.local_id == Some(local_id)) {
            line.pending = false;
            line.id = server_id;
        }
    }

    pub fn send_failed(&mut self, local_id: u64) {
        self.sending = false;
        if let Some(pos) = self.lines.iter().position(|l| l.local_id == Some(local_id)) {
            let line = self.lines.remove(pos);
            self.draft = line.text;
        }
        self.error = SEND_FAILED.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ConversationPartner, LatestMessage};

    fn conversation(id: i64, name: &str, unread: u32) -> Conversation {
        Conversation {
            partner: ConversationPartner { id, name: name.into(), avatar: None },
            unread_count: unread,
            latest_message: LatestMessage::default(),
        }
    }

    fn message(id: i64, from: i64, to: i64, text: &str, at: &str) -> Message {
        Message {
            id,
            sender: Profile { id: from, ..Default::default() },
            receiver: Profile { id: to, ..Default::default() },
            message: text.into(),
            created_at: at.into(),
            is_read: true,
        }
    }

    fn chatting() -> MessagesView {
        let mut view = MessagesView::new();
        view.set_conversations(vec![conversation(5, "Shah Family", 2), conversation(6, "Mehta Family", 1)]);
        assert_eq!(view.select_partner(5), MessagesRequest::LoadThread { partner_id: 5 });
        view
    }

    #[test]
    fn selecting_known_partner_clears_unread() {
        let view = chatting();
        assert_eq!(view.partner.as_ref().unwrap().name, "Shah Family");
        assert_eq!(view.total_unread(), 1);
    }

    #[test]
    fn unknown_partner_is_fetched_then_loaded() {
        let mut view = MessagesView::new();
        assert_eq!(view.select_partner(9), MessagesRequest::LoadPartner { partner_id: 9 });
        let profile = Profile { id: 9, surname: "Desai".into(), name: "Amit".into(), ..Default::default() };
        assert_eq!(view.partner_loaded(&profile), MessagesRequest::LoadThread { partner_id: 9 });
        assert_eq!(view.partner.unwrap().name, "Desai Amit");
    }

    #[test]
    fn thread_is_oldest_first_with_direction() {
        let mut view = chatting();
        view.set_thread(
            5,
            &[
                message(2, 1, 5, "and you?", "2026-10-17T10:05:00Z"),
                message(1, 5, 1, "hello", "2026-10-17T10:00:00Z"),
            ],
        );
        assert_eq!(view.lines[0].text, "hello");
        assert!(!view.lines[0].outgoing);
        assert!(view.lines[1].outgoing);
    }

    #[test]
    fn stale_thread_is_ignored() {
        let mut view = chatting();
        view.set_thread(6, &[message(1, 6, 1, "late", "2026-10-17T10:00:00Z")]);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn optimistic_send_confirms() {
        let mut view = chatting();
        view.set_draft("  namaste  ");
        let req = view.send().unwrap();
        assert_eq!(req, MessagesRequest::Send { local_id: 1, receiver_id: 5, message: "namaste".into() });
        assert!(view.draft.is_empty());
        assert!(view.lines[0].pending && view.lines[0].outgoing);
        assert!(view.send().is_none());

        view.send_succeeded(1, Some(77));
        assert!(!view.lines[0].pending);
        assert_eq!(view.lines[0].id, Some(77));
        assert!(!view.sending);
    }

    #[test]
    fn failed_send_rolls_back() {
        let mut view = chatting();
        view.set_draft("namaste");
        view.send();
        view.send_failed(1);
        assert!(view.lines.is_empty());
        assert_eq!(view.draft, "namaste");
        assert_eq!(view.error, SEND_FAILED);
    }

    #[test]
    fn blank_draft_or_no_partner_sends_nothing() {
        let mut view = MessagesView::new();
        view.set_draft("hi");
        assert!(view.send().is_none());
        let mut view = chatting();
        view.set_draft("   ");
        assert!(view.send().is_none());
    }
}
