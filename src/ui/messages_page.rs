use crate::ui::{widgets, Ctx};
use adw::prelude::*;
use chrono::Utc;
use gtk4 as gtk;
use introbook::messages::{MessagesRequest, MessagesView, SEND_FAILED};
use introbook::timefmt;
use std::cell::RefCell;
use std::rc::Rc;

pub struct MessagesPage {
    ctx: Ctx,
    view: RefCell<MessagesView>,
    root: gtk::Paned,
    conversations: gtk::ListBox,
    cache_note: gtk::Label,
    partner_avatar: adw::Avatar,
    partner_name: gtk::Label,
    thread: gtk::Box,
    scroller: gtk::ScrolledWindow,
    entry: gtk::Entry,
    send_btn: gtk::Button,
}

impl MessagesPage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let left = gtk::Box::new(gtk::Orientation::Vertical, 6);
        left.set_margin_top(12);
        left.set_margin_start(12);
        left.set_margin_bottom(12);
        left.append(&widgets::heading(&ctx.t("messages"), "title-2"));
        let cache_note = widgets::dim_label("");
        cache_note.set_visible(false);
        left.append(&cache_note);
        let conversations = gtk::ListBox::new();
        conversations.add_css_class("navigation-sidebar");
        left.append(&widgets::scrolled(&conversations));

        let right = widgets::padded_box(gtk::Orientation::Vertical, 8);
        let head = gtk::Box::new(gtk::Orientation::Horizontal, 10);
        let partner_avatar = adw::Avatar::new(40, None, true);
        let partner_name = widgets::heading("Select a conversation", "title-3");
        head.append(&partner_avatar);
        head.append(&partner_name);
        right.append(&head);

        let thread = gtk::Box::new(gtk::Orientation::Vertical, 6);
        let scroller = widgets::scrolled(&thread);
        right.append(&scroller);

        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = widgets::entry(&ctx.t("typeMessage"));
        let send_btn = gtk::Button::with_label(&ctx.t("send"));
        send_btn.add_css_class("suggested-action");
        input_row.append(&entry);
        input_row.append(&send_btn);
        right.append(&input_row);

        let root = gtk::Paned::new(gtk::Orientation::Horizontal);
        root.set_start_child(Some(&left));
        root.set_end_child(Some(&right));
        root.set_position(300);

        let page = Rc::new(Self {
            ctx: ctx.clone(),
            view: RefCell::new(MessagesView::new()),
            root,
            conversations: conversations.clone(),
            cache_note,
            partner_avatar,
            partner_name,
            thread,
            scroller,
            entry: entry.clone(),
            send_btn: send_btn.clone(),
        });

        {
            let page = page.clone();
            conversations.connect_row_activated(move |_, row| {
                let partner = page.view.borrow().conversations.get(row.index() as usize).map(|c| c.partner.id);
                if let Some(id) = partner {
                    page.open_partner(id);
                }
            });
        }
        {
            let page = page.clone();
            entry.connect_changed(move |e| {
                page.view.borrow_mut().set_draft(&e.text());
                page.send_btn.set_sensitive(page.view.borrow().can_send());
            });
        }
        let send: Rc<dyn Fn()> = {
            let page = page.clone();
            Rc::new(move || page.send())
        };
        {
            let send = send.clone();
            send_btn.connect_clicked(move |_| (send)());
        }
        entry.connect_activate(move |_| (send)());
        page
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render_conversations(&self) {
        let view = self.view.borrow();
        widgets::clear_list(&self.conversations);
        let now = Utc::now();
        for conv in &view.conversations {
            let latest = &conv.latest_message;
            let preview = if latest.is_sender { format!("You: {}", latest.message) } else { latest.message.clone() };
            let subtitle = format!("{}  {}", preview, timefmt::relative(&latest.created_at, now));
            let card = widgets::card_row(&conv.partner.name, subtitle.trim());
            card.row.set_activatable(true);
            if conv.unread_count > 0 {
                let badge = gtk::Label::new(Some(&conv.unread_count.to_string()));
                badge.add_css_class("accent");
                card.actions.append(&badge);
            }
            widgets::show_avatar(&card.avatar, conv.partner.avatar.as_deref(), &conv.partner.name);
            self.conversations.append(&card.row);
        }
        if view.conversations.is_empty() {
            widgets::placeholder_row(&self.conversations, "No conversations yet");
        }
    }

    fn render_thread(&self) {
        let (draft, can_send) = {
            let view = self.view.borrow();
            match &view.partner {
                Some(p) => {
                    self.partner_name.set_label(&p.name);
                    self.partner_avatar.set_text(Some(&p.name));
                }
                None => self.partner_name.set_label("Select a conversation"),
            }
            widgets::clear_box(&self.thread);
            for line in &view.lines {
                let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
                bubble.add_css_class("card");
                bubble.set_halign(if line.outgoing { gtk::Align::End } else { gtk::Align::Start });
                let text = gtk::Label::new(Some(&line.text));
                text.set_wrap(true);
                text.set_selectable(true);
                text.set_xalign(0.0);
                text.set_margin_top(6);
                text.set_margin_start(10);
                text.set_margin_end(10);
                bubble.append(&text);
                let stamp = if line.pending { "sending…".to_string() } else { timefmt::clock(&line.created_at) };
                let meta = widgets::dim_label(&stamp);
                meta.set_margin_start(10);
                meta.set_margin_end(10);
                meta.set_margin_bottom(6);
                bubble.append(&meta);
                self.thread.append(&bubble);
            }
            if !view.error.is_empty() {
                let err = widgets::error_label();
                widgets::set_error(&err, &view.error);
                self.thread.append(&err);
            }
            (view.draft.clone(), view.can_send())
        };
        if self.entry.text() != draft {
            self.entry.set_text(&draft);
        }
        self.send_btn.set_sensitive(can_send);
        let adj = self.scroller.vadjustment();
        adj.set_value(adj.upper());
    }

    fn perform(self: &Rc<Self>, req: MessagesRequest) {
        let page = self.clone();
        match req {
            MessagesRequest::LoadThread { partner_id } => crate::app::call(
                move |c| async move { c.messages_with(partner_id).await },
                move |res| match res {
                    Ok(messages) => {
                        page.view.borrow_mut().set_thread(partner_id, &messages);
                        page.render_thread();
                    }
                    Err(e) => {
                        log::warn!("thread with {} failed: {}", partner_id, e);
                        page.ctx.toast(&e.message_or("Failed to load messages"));
                    }
                },
            ),
            MessagesRequest::LoadPartner { partner_id } => crate::app::call(
                move |c| async move { c.family_profile(partner_id).await },
                move |res| match res {
                    Ok((profile, _)) => {
                        let next = page.view.borrow_mut().partner_loaded(&profile);
                        page.render_thread();
                        widgets::show_avatar(&page.partner_avatar, profile.avatar.as_deref(), &profile.display_name());
                        page.perform(next);
                    }
                    Err(e) => {
                        log::warn!("chat partner {} failed: {}", partner_id, e);
                        page.ctx.toast(&e.message_or("Failed to load profile"));
                    }
                },
            ),
            MessagesRequest::Send { local_id, receiver_id, message } => crate::app::call(
                move |c| async move { c.send_message(receiver_id, &message).await },
                move |res| {
                    match res {
                        Ok(server_id) => {
                            page.view.borrow_mut().send_succeeded(local_id, server_id);
                            page.perform(MessagesRequest::LoadThread { partner_id: receiver_id });
                            page.load_conversations();
                        }
                        Err(e) => {
                            log::warn!("send failed: {}", e);
                            page.view.borrow_mut().send_failed(local_id);
                            page.ctx.toast(SEND_FAILED);
                        }
                    }
                    page.render_thread();
                },
            ),
        }
    }

    fn send(self: &Rc<Self>) {
        let req = self.view.borrow_mut().send();
        self.render_thread();
        if let Some(req) = req {
            self.perform(req);
        }
    }

    /// Opens the thread with `partner_id`, looking the partner up when there is no conversation yet.
    pub fn open_partner(self: &Rc<Self>, partner_id: i64) {
        let req = self.view.borrow_mut().select_partner(partner_id);
        let avatar = self
            .view
            .borrow()
            .partner
            .as_ref()
            .map(|p| (p.avatar.clone(), p.name.clone()));
        self.render_thread();
        self.render_conversations();
        if let Some((avatar, name)) = avatar {
            widgets::show_avatar(&self.partner_avatar, avatar.as_deref(), &name);
        }
        self.perform(req);
    }

    fn load_conversations(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.conversations().await },
            move |res| match res {
                Ok(list) => {
                    if let Some(mut cache) = crate::app::cache() {
                        if let Err(e) = cache.store_conversations(&list) {
                            log::warn!("failed to cache conversations: {}", e);
                        }
                    }
                    page.view.borrow_mut().set_conversations(list);
                    page.cache_note.set_visible(false);
                    page.render_conversations();
                }
                Err(e) => {
                    log::warn!("conversations failed: {}", e);
                    page.ctx.toast(&e.message_or("Failed to load conversations"));
                }
            },
        );
    }

    pub fn refresh(self: &Rc<Self>) {
        if self.view.borrow().conversations.is_empty() {
            let cached = crate::app::cache().and_then(|c| {
                let list = c.conversations().map_err(|e| log::warn!("cached conversations unreadable: {}", e)).ok()?;
                let saved_at = c.conversations_updated_at().ok().flatten();
                Some((list, saved_at))
            });
            if let Some((list, saved_at)) = cached.filter(|(l, _)| !l.is_empty()) {
                log::debug!("showing {} cached conversations", list.len());
                if let Some(at) = saved_at {
                    self.cache_note.set_label(&format!("Saved {}, refreshing…", timefmt::relative_secs(at, Utc::now())));
                    self.cache_note.set_visible(true);
                }
                self.view.borrow_mut().set_conversations(list);
                self.render_conversations();
            }
        }
        self.load_conversations();
    }
}
