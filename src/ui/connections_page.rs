use crate::ui::{widgets, Ctx, Nav};
use adw::prelude::*;
use chrono::Utc;
use gtk4 as gtk;
use introbook::api::models::ConnectionAction;
use introbook::connections::{ConnectionRow, ConnectionsTab, ConnectionsView};
use introbook::timefmt;
use std::cell::RefCell;
use std::rc::Rc;

pub struct ConnectionsPage {
    ctx: Ctx,
    view: RefCell<ConnectionsView>,
    root: gtk::Box,
    tabs: Vec<(ConnectionsTab, gtk::ToggleButton)>,
    search: gtk::SearchEntry,
    list: gtk::ListBox,
}

impl ConnectionsPage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let root = widgets::padded_box(gtk::Orientation::Vertical, 12);
        root.append(&widgets::heading(&ctx.t("familyConnections"), "title-1"));

        let tab_row = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        tab_row.add_css_class("linked");
        let mut tabs = Vec::new();
        for tab in ConnectionsTab::ALL {
            let btn = gtk::ToggleButton::with_label(&ctx.t(tab.label_key()));
            if let Some((_, first)) = tabs.first() {
                btn.set_group(Some(first));
            }
            btn.set_active(tab == ConnectionsTab::default());
            tab_row.append(&btn);
            tabs.push((tab, btn));
        }
        root.append(&tab_row);

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some(&ctx.t("searchFamiliesByName")));
        search.set_visible(false);
        root.append(&search);

        let list = widgets::boxed_list();
        root.append(&widgets::scrolled(&list));

        let page = Rc::new(Self { ctx: ctx.clone(), view: RefCell::new(ConnectionsView::new()), root, tabs, search, list });

        for (tab, btn) in &page.tabs {
            let page_ref = page.clone();
            let tab = *tab;
            btn.connect_toggled(move |b| {
                if b.is_active() {
                    page_ref.view.borrow_mut().select_tab(tab);
                    page_ref.render();
                }
            });
        }
        {
            let page_ref = page.clone();
            page.search.connect_search_changed(move |e| {
                page_ref.view.borrow_mut().set_query(&e.text());
                page_ref.render();
            });
        }
        page
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render(self: &Rc<Self>) {
        let view = self.view.borrow();
        for (tab, btn) in &self.tabs {
            btn.set_label(&format!("{} ({})", self.ctx.t(tab.label_key()), view.count(*tab)));
        }
        self.search.set_visible(view.tab == ConnectionsTab::Find);

        widgets::clear_list(&self.list);
        let rows = view.rows();
        if rows.is_empty() {
            let empty = match view.tab {
                ConnectionsTab::Accepted => "No connections yet. Find families to connect with!",
                ConnectionsTab::Pending => "No pending requests",
                ConnectionsTab::Find if !view.query.is_empty() => "No families match your search",
                ConnectionsTab::Find => "No new families to connect with",
            };
            widgets::placeholder_row(&self.list, empty);
        }
        let now = Utc::now();
        for row in rows {
            let card = match row {
                ConnectionRow::Accepted(c) => {
                    let mut subtitle = c.profile.city.clone();
                    if let Some(at) = c.connected_at.as_deref() {
                        if !subtitle.is_empty() {
                            subtitle.push_str(" · ");
                        }
                        subtitle.push_str(&format!("connected {}", timefmt::relative(at, now)));
                    }
                    let card = widgets::card_row(&c.profile.name, &subtitle);
                    let profile_id = c.profile.id;
                    self.nav_button(&card.actions, &self.ctx.t("messages"), Nav::Chat(profile_id));
                    self.nav_button(&card.actions, "View family", Nav::FamilyProfile(profile_id));
                    let remove = gtk::Button::from_icon_name("user-trash-symbolic");
                    remove.set_tooltip_text(Some("Remove connection"));
                    remove.set_sensitive(view.removing.is_none());
                    let page = self.clone();
                    let (id, name) = (c.id, c.profile.name.clone());
                    remove.connect_clicked(move |_| page.confirm_remove(id, &name));
                    card.actions.append(&remove);
                    (card, c.profile.avatar.as_deref(), c.profile.name.as_str())
                }
                ConnectionRow::Received(c) => {
                    let subtitle = if c.message.is_empty() { "Wants to connect".to_string() } else { format!("\"{}\"", c.message) };
                    let card = widgets::card_row(&c.profile.name, &subtitle);
                    for (label, action) in [("Accept", ConnectionAction::Accept), ("Decline", ConnectionAction::Decline)] {
                        let btn = gtk::Button::with_label(label);
                        if action == ConnectionAction::Accept {
                            btn.add_css_class("suggested-action");
                        }
                        let page = self.clone();
                        let id = c.id;
                        btn.connect_clicked(move |_| page.respond(id, action));
                        card.actions.append(&btn);
                    }
                    (card, c.profile.avatar.as_deref(), c.profile.name.as_str())
                }
                ConnectionRow::Sent(c) => {
                    let subtitle = if c.message.is_empty() {
                        "Request sent".to_string()
                    } else {
                        format!("Request sent · your message: \"{}\"", c.message)
                    };
                    let card = widgets::card_row(&c.profile.name, &subtitle);
                    (card, c.profile.avatar.as_deref(), c.profile.name.as_str())
                }
                ConnectionRow::Suggestion(s) => {
                    let mut parts = vec![format!("{} member(s)", s.members_count)];
                    parts.extend(s.city.clone().filter(|c| !c.is_empty()));
                    parts.extend(s.hometown.clone().filter(|h| !h.is_empty() && Some(h) != s.city.as_ref()));
                    let card = widgets::card_row(&s.name, &parts.join(" · "));
                    let connect = gtk::Button::with_label("Connect");
                    connect.add_css_class("suggested-action");
                    let page = self.clone();
                    let id = s.id;
                    connect.connect_clicked(move |_| page.ask_connect(id));
                    card.actions.append(&connect);
                    (card, s.avatar.as_deref(), s.name.as_str())
                }
            };
            let (card, avatar, name) = card;
            widgets::show_avatar(&card.avatar, avatar, name);
            self.list.append(&card.row);
        }
    }

    fn nav_button(&self, actions: &gtk::Box, label: &str, nav: Nav) {
        let btn = gtk::Button::with_label(label);
        let ctx = self.ctx.clone();
        btn.connect_clicked(move |_| ctx.go(nav));
        actions.append(&btn);
    }

    fn ask_connect(self: &Rc<Self>, profile_id: i64) {
        let page = self.clone();
        widgets::prompt(
            &self.ctx.window,
            "Enter a message for your connection request (optional):",
            "Send request",
            move |message| {
                let page = page.clone();
                crate::app::call(
                    move |c| async move { c.connect(profile_id, &message).await },
                    move |res| match res {
                        Ok(msg) => {
                            log::info!("connection request sent to {}", profile_id);
                            page.view.borrow_mut().connected(profile_id);
                            page.ctx.toast(if msg.is_empty() { "Connection request sent" } else { &msg });
                            page.refresh();
                        }
                        Err(e) => page.ctx.toast(&e.message_or("Failed to send connection request")),
                    },
                );
            },
        );
    }

    fn respond(self: &Rc<Self>, connection_id: i64, action: ConnectionAction) {
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.respond_connection(connection_id, action).await },
            move |res| match res {
                Ok(msg) => {
                    if !msg.is_empty() {
                        page.ctx.toast(&msg);
                    }
                    page.refresh();
                }
                Err(e) => page.ctx.toast(&e.message_or("Failed to respond to connection request")),
            },
        );
    }

    fn confirm_remove(self: &Rc<Self>, connection_id: i64, name: &str) {
        let page = self.clone();
        let question = format!("Remove your connection with {}?", name);
        widgets::confirm(&self.ctx.window, &question, "Remove", move || {
            if !page.view.borrow_mut().start_remove(connection_id) {
                return;
            }
            page.render();
            let page = page.clone();
            crate::app::call(
                move |c| async move { c.remove_connection(connection_id).await },
                move |res| {
                    let removed = res.is_ok();
                    if let Err(e) = res {
                        log::warn!("remove connection failed: {}", e);
                        page.ctx.toast(&e.message_or("Failed to remove connection"));
                    }
                    page.view.borrow_mut().finish_remove(removed);
                    page.render();
                },
            );
        });
    }

    pub fn refresh(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                let (accepted, pending, found) =
                    tokio::join!(c.accepted_connections(), c.pending_requests(), c.find_connections());
                Ok((accepted?, pending?, found?))
            },
            move |res| match res {
                Ok((accepted, pending, found)) => {
                    {
                        let mut view = page.view.borrow_mut();
                        view.set_accepted(accepted);
                        view.set_pending(pending);
                        view.set_suggestions(found);
                    }
                    page.render();
                }
                Err(e) => {
                    log::warn!("connections failed: {}", e);
                    page.ctx.toast(&e.message_or("Failed to load connections"));
                }
            },
        );
    }
}
