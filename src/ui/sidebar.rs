use crate::ui::{widgets, Ctx, Nav, Page};
use adw::prelude::*;
use gtk4 as gtk;
use introbook::api::models::UserType;
use introbook::family::SidebarSummary;
use introbook::AppState;
use std::rc::Rc;

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
    avatar: adw::Avatar,
    name: gtk::Label,
    family_count: gtk::Label,
    unread: gtk::Label,
}

impl Sidebar {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(220);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 10);
        header.set_margin_bottom(8);
        let avatar = adw::Avatar::new(48, None, true);
        header.append(&avatar);
        let who = gtk::Box::new(gtk::Orientation::Vertical, 2);
        let name = widgets::heading("", "heading");
        let family_count = widgets::dim_label("");
        who.append(&name);
        who.append(&family_count);
        header.append(&who);
        root.append(&header);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        list.set_vexpand(true);
        let unread = gtk::Label::new(None);
        unread.add_css_class("accent");
        unread.set_visible(false);
        for page in Page::ALL {
            let row = gtk::ListBoxRow::new();
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 10);
            line.set_margin_top(6);
            line.set_margin_bottom(6);
            line.set_margin_start(6);
            line.set_margin_end(6);
            line.append(&gtk::Image::from_icon_name(page.icon()));
            let label = gtk::Label::new(Some(&ctx.t(page.name())));
            label.set_halign(gtk::Align::Start);
            label.set_hexpand(true);
            line.append(&label);
            if page == Page::Messages {
                line.append(&unread);
            }
            row.set_child(Some(&line));
            list.append(&row);
        }
        {
            let ctx = ctx.clone();
            list.connect_row_activated(move |_, row| {
                if let Some(page) = Page::ALL.get(row.index() as usize) {
                    ctx.go(Nav::Page(*page));
                }
            });
        }
        root.append(&list);

        let logout = gtk::Button::with_label(&ctx.t("logout"));
        logout.add_css_class("flat");
        {
            let ctx = ctx.clone();
            logout.connect_clicked(move |_| ctx.go(Nav::Logout));
        }
        root.append(&logout);

        Rc::new(Self { root, list, avatar, name, family_count, unread })
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Highlights the row for `page` without firing navigation.
    pub fn select(&self, page: Page) {
        if let Some(pos) = Page::ALL.iter().position(|p| *p == page) {
            if let Some(row) = self.list.row_at_index(pos as i32) {
                self.list.select_row(Some(&row));
            }
        }
    }

    pub fn set_unread(&self, count: u32) {
        self.unread.set_label(&count.to_string());
        self.unread.set_visible(count > 0);
    }

    fn set_summary(&self, summary: &SidebarSummary) {
        self.name.set_label(&summary.name);
        self.avatar.set_text(Some(&summary.name));
        self.family_count.set_label(&format!("{} family members", summary.family_count));
        widgets::load_avatar(&self.avatar, summary.avatar_url.clone());
    }

    /// Reloads the header and the unread badge.
    pub fn refresh(self: &Rc<Self>) {
        let member = AppState::load().user_type() == UserType::FamilyMember;
        let this = self.clone();
        crate::app::call(
            move |c| async move {
                if member {
                    c.family_member_family().await.map(|d| SidebarSummary::from_family_data(&d, c.base_url()))
                } else {
                    c.profile().await.map(|p| SidebarSummary::from_profile(&p, c.base_url()))
                }
            },
            move |res| match res {
                Ok(summary) => this.set_summary(&summary),
                Err(e) => {
                    log::warn!("sidebar summary failed: {}", e);
                    this.set_summary(&SidebarSummary::fallback());
                }
            },
        );

        let this = self.clone();
        crate::app::call(
            move |c| async move { c.dashboard_stats().await },
            move |res| match res {
                Ok(stats) => this.set_unread(stats.unread_messages),
                Err(e) => log::debug!("unread count unavailable: {}", e),
            },
        );
    }
}
