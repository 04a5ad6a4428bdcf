use crate::ui::{widgets, Ctx, Nav};
use adw::prelude::*;
use gtk4 as gtk;
use introbook::api::models::{Event, EventType, InvitationStatus};
use introbook::events::{my_invitation, rsvp, EventField, EventForm, EventsRequest, EventsTab, EventsView, InvitePicker};
use introbook::timefmt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct EventsPage {
    ctx: Ctx,
    view: RefCell<EventsView>,
    my_profile: Cell<Option<i64>>,
    root: gtk::Box,
    tabs: Vec<(EventsTab, gtk::ToggleButton)>,
    list: gtk::ListBox,
}

fn event_subtitle(e: &Event) -> String {
    let mut parts = vec![e.event_type.label().to_string(), timefmt::event_label(&e.event_date)];
    if !e.location.is_empty() {
        parts.push(e.location.clone());
    }
    match e.max_attendees {
        Some(max) => parts.push(format!("{}/{} attending", e.attendees_count, max)),
        None => parts.push(format!("{} attending", e.attendees_count)),
    }
    parts.join(" · ")
}

fn status_label(status: InvitationStatus) -> &'static str {
    match status {
        InvitationStatus::Pending => "Awaiting your reply",
        InvitationStatus::Accepted => "You're going",
        InvitationStatus::Declined => "You declined",
        InvitationStatus::Maybe => "Maybe",
    }
}

impl EventsPage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let root = widgets::padded_box(gtk::Orientation::Vertical, 12);
        let top = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let title = widgets::heading(&ctx.t("events"), "title-1");
        title.set_hexpand(true);
        top.append(&title);
        let create = gtk::Button::with_label("Create event");
        create.add_css_class("suggested-action");
        top.append(&create);
        root.append(&top);

        let tab_row = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        tab_row.add_css_class("linked");
        let mut tabs: Vec<(EventsTab, gtk::ToggleButton)> = Vec::new();
        for tab in EventsTab::ALL {
            let btn = gtk::ToggleButton::with_label(&ctx.t(tab.label_key()));
            if let Some((_, first)) = tabs.first() {
                btn.set_group(Some(first));
            }
            btn.set_active(tab == EventsTab::default());
            tab_row.append(&btn);
            tabs.push((tab, btn));
        }
        root.append(&tab_row);

        let list = widgets::boxed_list();
        root.append(&widgets::scrolled(&list));

        let page = Rc::new(Self {
            ctx: ctx.clone(),
            view: RefCell::new(EventsView::new()),
            my_profile: Cell::new(None),
            root,
            tabs,
            list,
        });
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
            let page = page.clone();
            create.connect_clicked(move |_| page.open_form(EventForm::new()));
        }
        page
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render(self: &Rc<Self>) {
        let view = self.view.borrow();
        for (tab, btn) in &self.tabs {
            btn.set_label(&format!("{} ({})", self.ctx.t(tab.label_key()), view.list(*tab).len()));
        }
        widgets::clear_list(&self.list);
        if view.current().is_empty() {
            widgets::placeholder_row(&self.list, &self.ctx.t(view.tab.empty_key()));
        }
        for event in view.current() {
            let card = widgets::card_row(&event.title, &event_subtitle(event));
            match view.tab {
                EventsTab::Invited => {
                    let mine = match self.my_profile.get() {
                        Some(id) => my_invitation(event, id),
                        None => event.invitations.first(),
                    };
                    if let Some(inv) = mine {
                        card.actions.append(&widgets::dim_label(status_label(inv.status)));
                        for (label, status) in [
                            ("Accept", InvitationStatus::Accepted),
                            ("Maybe", InvitationStatus::Maybe),
                            ("Decline", InvitationStatus::Declined),
                        ] {
                            let btn = gtk::Button::with_label(label);
                            btn.set_sensitive(inv.status != status);
                            let page = self.clone();
                            let id = inv.id;
                            btn.connect_clicked(move |_| page.perform(rsvp(id, status)));
                            card.actions.append(&btn);
                        }
                    }
                }
                EventsTab::Organized => {
                    let invite = gtk::Button::with_label("Invite");
                    {
                        let page = self.clone();
                        let id = event.id;
                        invite.connect_clicked(move |_| page.open_invites(id));
                    }
                    let edit = gtk::Button::from_icon_name("document-edit-symbolic");
                    edit.set_tooltip_text(Some("Edit event"));
                    {
                        let page = self.clone();
                        let form = EventForm::edit(event);
                        edit.connect_clicked(move |_| page.open_form(form.clone()));
                    }
                    let delete = gtk::Button::from_icon_name("user-trash-symbolic");
                    delete.set_tooltip_text(Some("Delete event"));
                    delete.set_sensitive(view.deleting.is_none());
                    {
                        let page = self.clone();
                        let (id, title) = (event.id, event.title.clone());
                        delete.connect_clicked(move |_| page.confirm_delete(id, &title));
                    }
                    card.actions.append(&invite);
                    card.actions.append(&edit);
                    card.actions.append(&delete);
                }
                EventsTab::Public => {
                    if let Some(org) = &event.organizer {
                        let btn = gtk::Button::with_label(&format!("By {}", org.display_name()));
                        btn.add_css_class("flat");
                        let ctx = self.ctx.clone();
                        let id = org.id;
                        btn.connect_clicked(move |_| ctx.go(Nav::FamilyProfile(id)));
                        card.actions.append(&btn);
                    }
                }
            }
            if !event.description.is_empty() {
                card.row.set_tooltip_text(Some(&event.description));
            }
            self.list.append(&card.row);
        }
    }

    fn perform(self: &Rc<Self>, req: EventsRequest) {
        self.perform_then(req, None, |_| {});
    }

    /// Runs a mutating request, toasts `notice` or the server's answer and reloads on success.
    fn perform_then(self: &Rc<Self>, req: EventsRequest, notice: Option<String>, done: impl FnOnce(bool) + 'static) {
        let page = self.clone();
        let fallback = match &req {
            EventsRequest::Create(_) => "Event created successfully!",
            EventsRequest::Update { .. } => "Event updated successfully!",
            EventsRequest::Delete { .. } => "Event deleted",
            EventsRequest::Invite { .. } => "Invitations sent",
            EventsRequest::RemoveInvitation { .. } => "Invitation removed",
            EventsRequest::Respond { .. } => "Response recorded",
            EventsRequest::LoadInvitations { .. } => "",
        };
        crate::app::call(
            move |c| async move {
                match req {
                    EventsRequest::Create(payload) => c.create_event(&payload).await,
                    EventsRequest::Update { event_id, payload } => c.update_event(event_id, &payload).await,
                    EventsRequest::Delete { event_id } => c.delete_event(event_id).await.map(|_| String::new()),
                    EventsRequest::Invite { event_id, invitee_ids } => c.invite(event_id, &invitee_ids).await,
                    EventsRequest::RemoveInvitation { invitation_id } => {
                        c.remove_invitation(invitation_id).await.map(|_| String::new())
                    }
                    EventsRequest::Respond { invitation_id, response } => {
                        c.respond_invitation(invitation_id, response).await
                    }
                    // Read-only; the invite dialog loads these itself.
                    EventsRequest::LoadInvitations { .. } => Ok(String::new()),
                }
            },
            move |res| {
                page.view.borrow_mut().delete_finished();
                match res {
                    Ok(msg) => {
                        let text = notice.unwrap_or(if msg.is_empty() { fallback.to_string() } else { msg });
                        if !text.is_empty() {
                            page.ctx.toast(&text);
                        }
                        page.refresh();
                        done(true);
                    }
                    Err(e) => {
                        log::warn!("event request failed: {}", e);
                        page.ctx.toast(&e.message_or("Request failed. Please try again."));
                        page.render();
                        done(false);
                    }
                }
            },
        );
    }

    fn confirm_delete(self: &Rc<Self>, event_id: i64, title: &str) {
        let page = self.clone();
        let question = format!("Delete \"{}\"? This cannot be undone.", title);
        widgets::confirm(&self.ctx.window, &question, "Delete", move || {
            let req = page.view.borrow_mut().delete(event_id);
            if let Some(req) = req {
                page.render();
                page.perform(req);
            }
        });
    }

    fn open_form(self: &Rc<Self>, form: EventForm) {
        let editing = form.editing.is_some();
        let dialog = gtk::Dialog::builder()
            .title(if editing { "Edit event" } else { "Create event" })
            .transient_for(&self.ctx.window)
            .modal(true)
            .default_width(460)
            .build();
        let content = widgets::padded_box(gtk::Orientation::Vertical, 8);

        let title = widgets::entry("Title *");
        title.set_text(&form.title);
        let description = gtk::TextView::new();
        description.set_wrap_mode(gtk::WrapMode::WordChar);
        description.set_height_request(80);
        description.buffer().set_text(&form.description);
        let type_labels: Vec<&str> = EventType::ALL.iter().map(|t| t.label()).collect();
        let event_type = gtk::DropDown::from_strings(&type_labels);
        if let Some(pos) = EventType::ALL.iter().position(|t| *t == form.event_type) {
            event_type.set_selected(pos as u32);
        }
        let date = widgets::entry("Date and time * (YYYY-MM-DDTHH:MM)");
        date.set_text(&form.event_date);
        let location = widgets::entry("Location *");
        location.set_text(&form.location);
        let max = widgets::entry("Max attendees (optional)");
        max.set_text(&form.max_attendees);
        let public = gtk::CheckButton::with_label("Public event");
        public.set_active(form.is_public);
        let visible = gtk::CheckButton::with_label("Visible to all families");
        visible.set_active(form.visible_to_all);

        let errors: Vec<(EventField, gtk::Label)> = [
            EventField::Title,
            EventField::Description,
            EventField::EventDate,
            EventField::Location,
            EventField::MaxAttendees,
        ]
        .into_iter()
        .map(|f| (f, widgets::error_label()))
        .collect();
        let error_for = |field: EventField| errors.iter().find(|(f, _)| *f == field).map(|(_, l)| l.clone());

        content.append(&title);
        if let Some(l) = error_for(EventField::Title) {
            content.append(&l);
        }
        content.append(&widgets::dim_label("Description *"));
        content.append(&description);
        if let Some(l) = error_for(EventField::Description) {
            content.append(&l);
        }
        content.append(&event_type);
        content.append(&date);
        if let Some(l) = error_for(EventField::EventDate) {
            content.append(&l);
        }
        content.append(&location);
        if let Some(l) = error_for(EventField::Location) {
            content.append(&l);
        }
        content.append(&max);
        if let Some(l) = error_for(EventField::MaxAttendees) {
            content.append(&l);
        }
        content.append(&public);
        content.append(&visible);
        dialog.set_child(Some(&content));
        let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
        let save = dialog.add_button(if editing { "Save changes" } else { "Create" }, gtk::ResponseType::Ok);
        save.add_css_class("suggested-action");

        let form = Rc::new(RefCell::new(form));
        for (entry, field) in [
            (title.clone(), EventField::Title),
            (date.clone(), EventField::EventDate),
            (location.clone(), EventField::Location),
            (max.clone(), EventField::MaxAttendees),
        ] {
            let form = form.clone();
            let label = error_for(field);
            entry.connect_changed(move |e| {
                let mut f = form.borrow_mut();
                let text = e.text().to_string();
                match field {
                    EventField::Title => f.title = text,
                    EventField::EventDate => f.event_date = text,
                    EventField::Location => f.location = text,
                    _ => f.max_attendees = text,
                }
                f.touch(field);
                if let Some(l) = &label {
                    widgets::set_error(l, "");
                }
            });
        }
        {
            let form = form.clone();
            let label = error_for(EventField::Description);
            description.buffer().connect_changed(move |b| {
                let mut f = form.borrow_mut();
                f.description = b.text(&b.start_iter(), &b.end_iter(), false).to_string();
                f.touch(EventField::Description);
                if let Some(l) = &label {
                    widgets::set_error(l, "");
                }
            });
        }
        {
            let form = form.clone();
            event_type.connect_selected_notify(move |dd| {
                if let Some(t) = EventType::ALL.get(dd.selected() as usize) {
                    form.borrow_mut().event_type = *t;
                }
            });
        }
        {
            let form = form.clone();
            public.connect_toggled(move |c| form.borrow_mut().is_public = c.is_active());
        }
        {
            let form = form.clone();
            visible.connect_toggled(move |c| form.borrow_mut().visible_to_all = c.is_active());
        }

        let page = self.clone();
        dialog.connect_response(move |dlg, resp| {
            if resp != gtk::ResponseType::Ok {
                dlg.close();
                return;
            }
            let req = form.borrow_mut().submit();
            match req {
                Some(req) => {
                    log::info!("saving event");
                    page.perform(req);
                    dlg.close();
                }
                None => {
                    let f = form.borrow();
                    for (field, label) in &errors {
                        widgets::set_error(label, f.errors.get(field).copied().unwrap_or(""));
                    }
                }
            }
        });
        dialog.present();
    }

    fn open_invites(self: &Rc<Self>, event_id: i64) {
        let (picker, load) = InvitePicker::open(event_id);
        let dialog = gtk::Dialog::builder()
            .title("Invite families")
            .transient_for(&self.ctx.window)
            .modal(true)
            .default_width(420)
            .default_height(520)
            .build();
        let content = widgets::padded_box(gtk::Orientation::Vertical, 8);
        content.append(&widgets::heading("Your connections", "heading"));
        let candidates = widgets::boxed_list();
        content.append(&widgets::scrolled(&candidates));
        content.append(&widgets::heading("Already invited", "heading"));
        let existing = widgets::boxed_list();
        content.append(&existing);
        let error = widgets::error_label();
        content.append(&error);
        dialog.set_child(Some(&content));
        let _ = dialog.add_button("Close", gtk::ResponseType::Cancel);
        let send = dialog.add_button("Send invitations", gtk::ResponseType::Ok);
        send.add_css_class("suggested-action");

        let invites = Rc::new(InviteDialog {
            page: self.clone(),
            picker: RefCell::new(picker),
            candidates,
            existing,
            error,
        });
        invites.load(load);

        dialog.connect_response(move |dlg, resp| {
            if resp == gtk::ResponseType::Ok {
                invites.send(dlg);
            } else {
                dlg.close();
            }
        });
        dialog.present();
    }

    pub fn refresh(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                let (events, profile) = tokio::join!(c.events(), c.profile());
                Ok((events?, profile.ok().map(|p| p.id)))
            },
            move |res| match res {
                Ok((overview, me)) => {
                    page.my_profile.set(me);
                    page.view.borrow_mut().set_overview(overview);
                    page.render();
                }
                Err(e) => {
                    log::warn!("events failed: {}", e);
                    page.ctx.toast(&e.message_or("Failed to load events"));
                }
            },
        );
    }
}

/// The invite dialog for one of the user's own events.
struct InviteDialog {
    page: Rc<EventsPage>,
    picker: RefCell<InvitePicker>,
    candidates: gtk::ListBox,
    existing: gtk::ListBox,
    error: gtk::Label,
}

impl InviteDialog {
    fn render(self: &Rc<Self>) {
        let p = self.picker.borrow();
        widgets::clear_list(&self.candidates);
        if p.candidates.is_empty() {
            widgets::placeholder_row(&self.candidates, "No connections left to invite");
        }
        for c in &p.candidates {
            let check = gtk::CheckButton::with_label(&c.name);
            check.set_active(p.selected.contains(&c.id));
            check.set_margin_top(6);
            check.set_margin_bottom(6);
            check.set_margin_start(8);
            let this = self.clone();
            let id = c.id;
            check.connect_toggled(move |_| {
                this.picker.borrow_mut().toggle(id);
                widgets::set_error(&this.error, "");
            });
            self.candidates.append(&check);
        }

        widgets::clear_list(&self.existing);
        if p.existing.is_empty() {
            widgets::placeholder_row(&self.existing, "Nobody invited yet");
        }
        for inv in &p.existing {
            let card = widgets::card_row(&inv.invitee_name, status_label(inv.status));
            let remove = gtk::Button::from_icon_name("list-remove-symbolic");
            remove.set_tooltip_text(Some("Remove invitation"));
            let req = p.remove(inv.id);
            let this = self.clone();
            let event_id = p.event_id;
            remove.connect_clicked(move |btn| {
                btn.set_sensitive(false);
                let again = this.clone();
                this.page.perform_then(req.clone(), None, move |_| {
                    again.load(EventsRequest::LoadInvitations { event_id });
                });
            });
            card.actions.append(&remove);
            self.existing.append(&card.row);
        }
    }

    fn load(self: &Rc<Self>, req: EventsRequest) {
        let EventsRequest::LoadInvitations { event_id } = req else {
            return;
        };
        let this = self.clone();
        crate::app::call(
            move |c| async move {
                let (connections, invited) = tokio::join!(c.accepted_connections(), c.event_invitations(event_id));
                Ok((connections?, invited?))
            },
            move |res| match res {
                Ok((connections, invited)) => {
                    this.picker.borrow_mut().set_existing(&connections, invited);
                    this.render();
                }
                Err(e) => this.page.ctx.toast(&e.message_or("Failed to load invitations")),
            },
        );
    }

    fn send(self: &Rc<Self>, dialog: &gtk::Dialog) {
        let req = self.picker.borrow_mut().submit();
        let Some(req) = req else {
            widgets::set_error(&self.error, &self.picker.borrow().error);
            return;
        };
        let (sent, event_id) = {
            let p = self.picker.borrow();
            (p.sent_message(), p.event_id)
        };
        let this = self.clone();
        let dialog = dialog.clone();
        self.page.perform_then(req, Some(sent), move |ok| {
            if ok {
                log::info!("invitations sent for event {}", event_id);
                dialog.close();
            } else {
                this.load(EventsRequest::LoadInvitations { event_id });
            }
        });
    }
}
