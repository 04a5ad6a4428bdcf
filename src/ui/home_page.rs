use crate::ui::{widgets, Ctx, Nav, Page};
use adw::prelude::*;
use chrono::Utc;
use gtk4 as gtk;
use introbook::dashboard::HomeView;
use introbook::timefmt;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

pub struct HomePage {
    ctx: Ctx,
    view: RefCell<HomeView>,
    root: gtk::ScrolledWindow,
    stats: gtk::Box,
    upcoming: gtk::ListBox,
    activity: gtk::ListBox,
}

fn stat_card(value: &str, label: &str) -> gtk::Box {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 4);
    card.add_css_class("card");
    card.set_hexpand(true);
    card.set_margin_end(8);
    let v = gtk::Label::new(Some(value));
    v.add_css_class("title-1");
    v.set_margin_top(12);
    card.append(&v);
    let l = widgets::dim_label(label);
    l.set_halign(gtk::Align::Center);
    l.set_margin_bottom(12);
    card.append(&l);
    card
}

impl HomePage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let dismissed = crate::app::cache()
            .and_then(|c| c.dismissed_events().map_err(|e| log::warn!("dismissed events unreadable: {}", e)).ok())
            .unwrap_or_else(HashSet::new);

        let content = widgets::padded_box(gtk::Orientation::Vertical, 14);
        content.append(&widgets::heading(&ctx.t("home"), "title-1"));

        let stats = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        content.append(&stats);

        let quick = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        for (label, page) in [
            (ctx.t("findConnections"), Page::Connections),
            (ctx.t("messages"), Page::Messages),
            (ctx.t("events"), Page::Events),
            (ctx.t("profile"), Page::Profile),
        ] {
            let btn = gtk::Button::with_label(&label);
            let ctx = ctx.clone();
            btn.connect_clicked(move |_| ctx.go(Nav::Page(page)));
            quick.append(&btn);
        }
        content.append(&quick);

        content.append(&widgets::heading(&ctx.t("upcomingEvents"), "title-4"));
        let upcoming = widgets::boxed_list();
        content.append(&upcoming);

        content.append(&widgets::heading("Recent Activity", "title-4"));
        let activity = widgets::boxed_list();
        content.append(&activity);

        Rc::new(Self {
            ctx: ctx.clone(),
            view: RefCell::new(HomeView::new(dismissed)),
            root: widgets::scrolled(&content),
            stats,
            upcoming,
            activity,
        })
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render(self: &Rc<Self>) {
        let view = self.view.borrow();
        widgets::clear_box(&self.stats);
        self.stats.append(&stat_card(&view.stats.active_members.to_string(), &self.ctx.t("activeMembers")));
        self.stats.append(&stat_card(&view.stats.unread_messages.to_string(), &self.ctx.t("unreadMessages")));
        self.stats.append(&stat_card(&view.upcoming.len().to_string(), &self.ctx.t("upcomingEvents")));

        widgets::clear_list(&self.upcoming);
        if view.upcoming.is_empty() {
            widgets::placeholder_row(&self.upcoming, "No upcoming events");
        }
        for event in &view.upcoming {
            let subtitle = format!("{} · {}", timefmt::event_label(&event.event_date), event.location);
            let card = widgets::card_row(&event.title, &subtitle);
            let open = gtk::Button::with_label("View");
            {
                let ctx = self.ctx.clone();
                open.connect_clicked(move |_| ctx.go(Nav::Page(Page::Events)));
            }
            let dismiss = gtk::Button::from_icon_name("window-close-symbolic");
            dismiss.add_css_class("flat");
            dismiss.set_tooltip_text(Some("Hide this event"));
            {
                let page = self.clone();
                let id = event.id;
                dismiss.connect_clicked(move |_| page.dismiss(id));
            }
            card.actions.append(&open);
            card.actions.append(&dismiss);
            self.upcoming.append(&card.row);
        }

        widgets::clear_list(&self.activity);
        let now = Utc::now();
        if view.recent_activities().is_empty() {
            widgets::placeholder_row(&self.activity, "Nothing new yet");
        }
        for a in view.recent_activities() {
            let subtitle = format!("{}  {}", a.text, timefmt::relative(&a.timestamp, now));
            self.activity.append(&widgets::card_row(&a.title, subtitle.trim()).row);
        }
    }

    fn dismiss(self: &Rc<Self>, event_id: i64) {
        self.view.borrow_mut().dismiss(event_id);
        if let Some(cache) = crate::app::cache() {
            if let Err(e) = cache.dismiss_event(event_id) {
                log::warn!("failed to remember dismissed event: {}", e);
            }
        }
        self.render();
    }

    pub fn refresh(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.dashboard_stats().await },
            move |res| match res {
                Ok(stats) => {
                    page.view.borrow_mut().set_stats(stats);
                    page.render();
                }
                Err(e) => {
                    log::warn!("dashboard stats failed: {}", e);
                    page.ctx.toast(&e.user_message());
                }
            },
        );
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.events().await },
            move |res| match res {
                Ok(overview) => {
                    page.view.borrow_mut().set_events(&overview, Utc::now());
                    page.render();
                }
                Err(e) => log::warn!("events for home failed: {}", e),
            },
        );
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.activities().await },
            move |res| match res {
                Ok(list) => {
                    page.view.borrow_mut().set_activities(list);
                    page.render();
                }
                Err(e) => log::warn!("activities failed: {}", e),
            },
        );
    }
}
