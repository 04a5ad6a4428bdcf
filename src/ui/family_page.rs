use crate::ui::{widgets, Ctx, Nav, Page};
use adw::prelude::*;
use gtk4 as gtk;
use introbook::api::models::{FamilyMember, UserType};
use introbook::family::{AccessView, FamilyListing};
use introbook::AppState;
use std::cell::RefCell;
use std::rc::Rc;

pub struct FamilyPage {
    ctx: Ctx,
    listing: RefCell<FamilyListing>,
    access: RefCell<AccessView>,
    viewing_other: RefCell<Option<i64>>,
    root: gtk::ScrolledWindow,
    title: gtk::Label,
    head: gtk::ListBox,
    members: gtk::ListBox,
    edit_btn: gtk::Button,
    back_btn: gtk::Button,
    message_btn: gtk::Button,
    access_box: gtk::Box,
    logins: gtk::ListBox,
    member_dd: gtk::DropDown,
    mobile: gtk::Entry,
    password: gtk::PasswordEntry,
    confirm: gtk::PasswordEntry,
    full_access: gtk::Switch,
    access_error: gtk::Label,
}

fn member_subtitle(m: &FamilyMember) -> String {
    let mut parts = vec![m.relation.label().to_string()];
    if let Some(age) = m.member_age {
        parts.push(format!("{} yrs", age));
    }
    for extra in [&m.city, &m.occupation, &m.mobile_number] {
        if !extra.is_empty() {
            parts.push(extra.clone());
        }
    }
    parts.join(" · ")
}

impl FamilyPage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let content = widgets::padded_box(gtk::Orientation::Vertical, 14);

        let top = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let title = widgets::heading(&ctx.t("family"), "title-1");
        title.set_hexpand(true);
        top.append(&title);
        let message_btn = gtk::Button::with_label(&ctx.t("messages"));
        let edit_btn = gtk::Button::with_label("Edit family");
        let back_btn = gtk::Button::with_label("Back to my family");
        top.append(&message_btn);
        top.append(&edit_btn);
        top.append(&back_btn);
        content.append(&top);

        let head = widgets::boxed_list();
        content.append(&head);
        content.append(&widgets::heading(&ctx.t("familyMembers"), "title-4"));
        let members = widgets::boxed_list();
        content.append(&members);

        let access_box = gtk::Box::new(gtk::Orientation::Vertical, 10);
        access_box.append(&widgets::heading("Member login access", "title-4"));
        let logins = widgets::boxed_list();
        access_box.append(&logins);
        access_box.append(&widgets::heading("Give a member their own login", "heading"));
        let member_dd = gtk::DropDown::from_strings(&["Select member"]);
        access_box.append(&member_dd);
        let mobile = widgets::entry("Mobile number");
        let password = widgets::password("Password");
        let confirm = widgets::password("Confirm password");
        access_box.append(&mobile);
        access_box.append(&password);
        access_box.append(&confirm);
        let switch_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let full_access = gtk::Switch::new();
        switch_row.append(&full_access);
        switch_row.append(&gtk::Label::new(Some("Full access (may edit the family profile)")));
        access_box.append(&switch_row);
        let access_error = widgets::error_label();
        access_box.append(&access_error);
        let register = gtk::Button::with_label("Grant access");
        register.add_css_class("suggested-action");
        register.set_halign(gtk::Align::Start);
        access_box.append(&register);
        content.append(&access_box);

        let page = Rc::new(Self {
            ctx: ctx.clone(),
            listing: RefCell::new(FamilyListing::default()),
            access: RefCell::new(AccessView::default()),
            viewing_other: RefCell::new(None),
            root: widgets::scrolled(&content),
            title,
            head,
            members,
            edit_btn: edit_btn.clone(),
            back_btn: back_btn.clone(),
            message_btn: message_btn.clone(),
            access_box,
            logins,
            member_dd: member_dd.clone(),
            mobile: mobile.clone(),
            password: password.clone(),
            confirm: confirm.clone(),
            full_access: full_access.clone(),
            access_error,
        });

        {
            let ctx = ctx.clone();
            edit_btn.connect_clicked(move |_| ctx.go(Nav::Page(Page::Profile)));
        }
        {
            let ctx = ctx.clone();
            back_btn.connect_clicked(move |_| ctx.go(Nav::Page(Page::Family)));
        }
        {
            let page = page.clone();
            message_btn.connect_clicked(move |_| {
                let other = *page.viewing_other.borrow();
                if let Some(id) = other {
                    page.ctx.go(Nav::Chat(id));
                }
            });
        }
        {
            let page = page.clone();
            member_dd.connect_selected_notify(move |dd| {
                let picked = {
                    let mut access = page.access.borrow_mut();
                    let member = (dd.selected() as usize).checked_sub(1).and_then(|i| access.available.get(i).cloned());
                    match member {
                        Some(m) => {
                            access.form.select_member(&m);
                            Some(access.form.mobile.clone())
                        }
                        None => {
                            access.form.member_id = None;
                            None
                        }
                    }
                };
                if let Some(mobile) = picked {
                    page.mobile.set_text(&mobile);
                }
            });
        }
        {
            let page = page.clone();
            mobile.connect_changed(move |e| page.access.borrow_mut().form.mobile = e.text().to_string());
        }
        {
            let page = page.clone();
            password.connect_changed(move |e| page.access.borrow_mut().form.password = e.text().to_string());
        }
        {
            let page = page.clone();
            confirm.connect_changed(move |e| page.access.borrow_mut().form.confirm_password = e.text().to_string());
        }
        {
            let page = page.clone();
            full_access.connect_active_notify(move |s| page.access.borrow_mut().form.full_access = s.is_active());
        }
        {
            let page = page.clone();
            register.connect_clicked(move |_| page.register());
        }
        page
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render_listing(self: &Rc<Self>) {
        let listing = self.listing.borrow();
        let other = self.viewing_other.borrow().is_some();
        self.edit_btn.set_visible(!listing.read_only);
        self.back_btn.set_visible(other);
        self.message_btn.set_visible(other);
        self.title.set_label(&match (&listing.head, other) {
            (Some(head), true) => format!("{} family", head.display_name()),
            _ => self.ctx.t("family"),
        });

        widgets::clear_list(&self.head);
        if let Some(head) = &listing.head {
            let subtitle = [head.city.as_str(), head.occupation.as_str(), head.mobile_number.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" · ");
            let card = widgets::card_row(&head.display_name(), &subtitle);
            widgets::show_avatar(&card.avatar, head.avatar.as_deref(), &head.display_name());
            card.actions.append(&widgets::dim_label("Head of family"));
            self.head.append(&card.row);
        }

        widgets::clear_list(&self.members);
        if listing.members.is_empty() {
            widgets::placeholder_row(&self.members, "No family members added yet");
        }
        for m in &listing.members {
            self.members.append(&widgets::card_row(&m.display_name(), &member_subtitle(m)).row);
        }
    }

    fn render_access(self: &Rc<Self>) {
        let (labels, error) = {
            let access = self.access.borrow();
            widgets::clear_list(&self.logins);
            if access.members.is_empty() {
                widgets::placeholder_row(&self.logins, "No member has a login yet");
            }
            for m in &access.members {
                let last = m.last_login.as_deref().map(introbook::timefmt::event_label).unwrap_or_else(|| "never".into());
                let subtitle = format!("{} · last login {}", m.mobile, last);
                let card = widgets::card_row(&m.name, &subtitle);
                let remove = gtk::Button::with_label("Remove access");
                remove.add_css_class("destructive-action");
                remove.set_sensitive(access.removing.is_none());
                let page = self.clone();
                let (id, name) = (m.id, m.name.clone());
                remove.connect_clicked(move |_| page.confirm_remove(id, &name));
                card.actions.append(&remove);
                self.logins.append(&card.row);
            }
            let mut labels = vec!["Select member".to_string()];
            labels.extend(access.available.iter().map(|m| format!("{} ({})", m.name, m.relation.label())));
            (labels, access.form.error.clone())
        };
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        self.member_dd.set_model(Some(&gtk::StringList::new(&refs)));
        widgets::set_error(&self.access_error, &error);
    }

    fn confirm_remove(self: &Rc<Self>, member_id: i64, name: &str) {
        let page = self.clone();
        let question = format!("Remove login access for {}?", name);
        widgets::confirm(&self.ctx.window, &question, "Remove", move || {
            if !page.access.borrow_mut().start_remove(member_id) {
                return;
            }
            page.render_access();
            let page = page.clone();
            crate::app::call(
                move |c| async move { c.remove_member_login(member_id).await },
                move |res| {
                    page.access.borrow_mut().finish_remove();
                    match res {
                        Ok(msg) => {
                            page.ctx.toast(if msg.is_empty() { "Access removed" } else { &msg });
                            page.load_access();
                        }
                        Err(e) => {
                            page.ctx.toast(&e.message_or("Failed to remove access"));
                            page.render_access();
                        }
                    }
                },
            );
        });
    }

    fn register(self: &Rc<Self>) {
        let req = self.access.borrow_mut().form.submit();
        let Some(req) = req else {
            self.render_access();
            return;
        };
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                c.register_member_login(req.family_member_id, &req.mobile_number, &req.password, req.full_access).await
            },
            move |res| match res {
                Ok(msg) => {
                    log::info!("member login registered");
                    page.access.borrow_mut().form.reset();
                    page.mobile.set_text("");
                    page.password.set_text("");
                    page.confirm.set_text("");
                    page.full_access.set_active(false);
                    page.ctx.toast(if msg.is_empty() { "Family member registered successfully" } else { &msg });
                    page.load_access();
                }
                Err(e) => {
                    page.access.borrow_mut().form.error = e.message_or("Registration failed");
                    page.render_access();
                }
            },
        );
    }

    fn load_access(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                let (members, available) = tokio::join!(c.member_logins(), c.available_members());
                Ok((members?, available?))
            },
            move |res| match res {
                Ok((members, available)) => {
                    page.access.borrow_mut().set_lists(members, available);
                    page.render_access();
                }
                Err(e) => log::warn!("member access lists failed: {}", e),
            },
        );
    }

    /// The signed-in user's own family.
    pub fn refresh(self: &Rc<Self>) {
        *self.viewing_other.borrow_mut() = None;
        let member = AppState::load().user_type() == UserType::FamilyMember;
        self.access_box.set_visible(!member);
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                if member {
                    c.family_member_family().await.map(FamilyListing::as_member)
                } else {
                    c.profile().await.map(FamilyListing::own)
                }
            },
            move |res| match res {
                Ok(listing) => {
                    *page.listing.borrow_mut() = listing;
                    page.render_listing();
                }
                Err(e) => {
                    log::warn!("family listing failed: {}", e);
                    page.ctx.toast(&e.message_or("Failed to load family"));
                }
            },
        );
        if !member {
            self.load_access();
        }
    }

    /// Another family's profile, reached from connections or events.
    pub fn show_family(self: &Rc<Self>, profile_id: i64) {
        *self.viewing_other.borrow_mut() = Some(profile_id);
        self.access_box.set_visible(false);
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.family_profile(profile_id).await },
            move |res| match res {
                Ok((profile, members)) => {
                    if *page.viewing_other.borrow() != Some(profile_id) {
                        return;
                    }
                    *page.listing.borrow_mut() = FamilyListing::other(profile, members);
                    page.render_listing();
                }
                Err(e) => {
                    log::warn!("family profile {} failed: {}", profile_id, e);
                    page.ctx.toast(&e.message_or("Failed to load family profile"));
                }
            },
        );
    }
}
