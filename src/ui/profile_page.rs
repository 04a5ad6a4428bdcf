use crate::ui::{widgets, Ctx};
use adw::prelude::*;
use gtk4 as gtk;
use introbook::api::models::Relation;
use introbook::profile_edit::{MemberDraft, PersonalFields, ProfileEditor, ProfileRequest};
use std::cell::RefCell;
use std::rc::Rc;

const PERSONAL_LABELS: [&str; 23] = [
    "Surname *",
    "Name",
    "Father's name *",
    "Mother's name",
    "Sakh",
    "Gender",
    "Date of birth (YYYY-MM-DD)",
    "Age",
    "Marital status",
    "Email",
    "Address",
    "Area",
    "City",
    "Hometown",
    "State",
    "Country",
    "Pincode",
    "Occupation",
    "Company name",
    "Education",
    "Blood group",
    "Hobbies",
    "About me",
];

fn personal_slot(p: &mut PersonalFields, i: usize) -> &mut String {
    match i {
        0 => &mut p.surname,
        1 => &mut p.name,
        2 => &mut p.father_name,
        3 => &mut p.mother_name,
        4 => &mut p.sakh,
        5 => &mut p.gender,
        6 => &mut p.date_of_birth,
        7 => &mut p.age,
        8 => &mut p.marital_status,
        9 => &mut p.email,
        10 => &mut p.address,
        11 => &mut p.area,
        12 => &mut p.city,
        13 => &mut p.hometown,
        14 => &mut p.state,
        15 => &mut p.country,
        16 => &mut p.pincode,
        17 => &mut p.occupation,
        18 => &mut p.company_name,
        19 => &mut p.education,
        20 => &mut p.blood_group,
        21 => &mut p.hobbies,
        _ => &mut p.about_me,
    }
}

const MEMBER_LABELS: [&str; 9] =
    ["Surname *", "Name", "Father's name", "Gender", "Age", "Email", "City", "Hometown", "Occupation"];

fn member_slot(m: &mut MemberDraft, i: usize) -> &mut String {
    match i {
        0 => &mut m.surname,
        1 => &mut m.name,
        2 => &mut m.father_name,
        3 => &mut m.gender,
        4 => &mut m.member_age,
        5 => &mut m.email,
        6 => &mut m.city,
        7 => &mut m.hometown,
        _ => &mut m.occupation,
    }
}

pub struct ProfilePage {
    ctx: Ctx,
    editor: RefCell<Option<ProfileEditor>>,
    can_edit: RefCell<bool>,
    chooser: RefCell<Option<gtk::FileChooserNative>>,
    root: gtk::ScrolledWindow,
    avatar: adw::Avatar,
    avatar_name: gtk::Label,
    read_only_note: gtk::Label,
    personal: Vec<gtk::Entry>,
    country: gtk::DropDown,
    mobile: gtk::Entry,
    otp_row: gtk::Box,
    otp: gtk::Entry,
    otp_status: gtk::Label,
    members: gtk::Box,
    add_member: gtk::Button,
    photo_btn: gtk::Button,
    save: gtk::Button,
    error: gtk::Label,
    message: gtk::Label,
}

impl ProfilePage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let form = widgets::padded_box(gtk::Orientation::Vertical, 10);
        form.append(&widgets::heading(&ctx.t("profile"), "title-1"));

        let head = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        let avatar = adw::Avatar::new(72, None, true);
        head.append(&avatar);
        let head_text = gtk::Box::new(gtk::Orientation::Vertical, 4);
        let avatar_name = widgets::heading("", "title-3");
        head_text.append(&avatar_name);
        let photo_btn = gtk::Button::with_label("Change photo");
        photo_btn.set_halign(gtk::Align::Start);
        head_text.append(&photo_btn);
        head.append(&head_text);
        form.append(&head);

        let read_only_note = widgets::dim_label("You can view this profile. Only the main user can edit it.");
        read_only_note.set_visible(false);
        form.append(&read_only_note);

        form.append(&widgets::heading("Personal details", "title-4"));
        let grid = gtk::Grid::new();
        grid.set_column_spacing(8);
        grid.set_row_spacing(6);
        let mut personal = Vec::new();
        for (i, label) in PERSONAL_LABELS.iter().enumerate() {
            let e = widgets::entry(label);
            grid.attach(&e, (i % 2) as i32, (i / 2) as i32, 1, 1);
            personal.push(e);
        }
        form.append(&grid);

        let mobile_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let country = widgets::country_dropdown(introbook::phone::DEFAULT_COUNTRY.code);
        let mobile = widgets::entry("Mobile number");
        let send_otp = gtk::Button::with_label("Send OTP");
        mobile_row.append(&country);
        mobile_row.append(&mobile);
        mobile_row.append(&send_otp);
        form.append(&mobile_row);
        let otp_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let otp = widgets::entry("OTP");
        let verify = gtk::Button::with_label("Verify");
        otp_row.append(&otp);
        otp_row.append(&verify);
        form.append(&otp_row);
        let otp_status = widgets::dim_label("");
        form.append(&otp_status);

        form.append(&widgets::heading(&ctx.t("familyMembers"), "title-4"));
        let members = gtk::Box::new(gtk::Orientation::Vertical, 10);
        form.append(&members);
        let add_member = gtk::Button::with_label("Add family member");
        add_member.set_halign(gtk::Align::Start);
        form.append(&add_member);

        let error = widgets::error_label();
        form.append(&error);
        let message = widgets::dim_label("");
        message.add_css_class("success");
        form.append(&message);
        let save = gtk::Button::with_label("Save profile");
        save.add_css_class("suggested-action");
        save.set_halign(gtk::Align::Start);
        form.append(&save);

        let page = Rc::new(Self {
            ctx: ctx.clone(),
            editor: RefCell::new(None),
            can_edit: RefCell::new(false),
            chooser: RefCell::new(None),
            root: widgets::scrolled(&form),
            avatar,
            avatar_name,
            read_only_note,
            personal: personal.clone(),
            country: country.clone(),
            mobile: mobile.clone(),
            otp_row,
            otp: otp.clone(),
            otp_status,
            members,
            add_member: add_member.clone(),
            photo_btn: photo_btn.clone(),
            save: save.clone(),
            error,
            message,
        });

        for (i, e) in personal.iter().enumerate() {
            let page = page.clone();
            e.connect_changed(move |e| {
                if let Some(ed) = page.editor.borrow_mut().as_mut() {
                    *personal_slot(&mut ed.personal, i) = e.text().to_string();
                }
            });
        }
        {
            let page = page.clone();
            mobile.connect_changed(move |e| {
                if let Some(ed) = page.editor.borrow_mut().as_mut() {
                    ed.set_mobile(&e.text());
                }
                page.render_otp();
            });
        }
        {
            let page = page.clone();
            country.connect_selected_notify(move |dd| {
                if let Some(ed) = page.editor.borrow_mut().as_mut() {
                    ed.set_country(widgets::dropdown_code(dd));
                }
                page.render_otp();
            });
        }
        {
            let page = page.clone();
            otp.connect_changed(move |e| {
                if let Some(ed) = page.editor.borrow_mut().as_mut() {
                    ed.otp = e.text().to_string();
                }
            });
        }
        {
            let page = page.clone();
            send_otp.connect_clicked(move |_| {
                let req = page.editor.borrow_mut().as_mut().and_then(ProfileEditor::request_otp);
                page.render_status();
                if let Some(req) = req {
                    page.perform(req);
                }
            });
        }
        {
            let page = page.clone();
            verify.connect_clicked(move |_| {
                let req = page.editor.borrow_mut().as_mut().and_then(ProfileEditor::verify_otp);
                page.render_status();
                if let Some(req) = req {
                    page.perform(req);
                }
            });
        }
        {
            let page = page.clone();
            add_member.connect_clicked(move |_| {
                if let Some(ed) = page.editor.borrow_mut().as_mut() {
                    ed.add_member();
                }
                page.render_members();
            });
        }
        {
            let page = page.clone();
            photo_btn.connect_clicked(move |_| page.choose_photo());
        }
        {
            let page = page.clone();
            save.connect_clicked(move |_| {
                let req = page.editor.borrow_mut().as_mut().and_then(ProfileEditor::submit);
                page.render_status();
                if let Some(req) = req {
                    page.perform(req);
                }
            });
        }
        page
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Pushes the whole editor into the widgets. Values are copied out first since
    /// setting entry text fires the change handlers.
    fn render(self: &Rc<Self>) {
        let snapshot = self.editor.borrow().clone();
        let Some(mut ed) = snapshot else {
            return;
        };
        for (i, e) in self.personal.iter().enumerate() {
            e.set_text(personal_slot(&mut ed.personal, i));
        }
        if let Some(pos) = introbook::phone::COUNTRIES.iter().position(|c| c.code == ed.country_code) {
            self.country.set_selected(pos as u32);
        }
        self.mobile.set_text(&ed.personal.mobile_number);
        // The handlers above reset OTP state; restore what the editor had.
        if let Some(cur) = self.editor.borrow_mut().as_mut() {
            cur.otp_sent = ed.otp_sent;
            cur.otp_verified = ed.otp_verified;
        }
        self.otp.set_text(&ed.otp);
        self.avatar_name.set_label(&format!("{} {}", ed.personal.surname, ed.personal.name));
        self.avatar.set_text(Some(&ed.personal.surname));

        let editable = *self.can_edit.borrow();
        for e in &self.personal {
            e.set_editable(editable);
        }
        self.mobile.set_editable(editable);
        self.country.set_sensitive(editable);
        self.add_member.set_visible(editable);
        self.photo_btn.set_visible(editable);
        self.save.set_visible(editable);
        self.read_only_note.set_visible(!editable);

        self.render_members();
        self.render_otp();
        self.render_status();
    }

    fn render_otp(&self) {
        let (needs, sent, verified) = match self.editor.borrow().as_ref() {
            Some(ed) => (ed.needs_otp(), ed.otp_sent, ed.otp_verified),
            None => (false, false, false),
        };
        self.otp_row.set_visible(needs && sent && !verified);
        self.otp_status.set_label(match (needs, sent, verified) {
            (false, _, _) => "",
            (true, _, true) => "Mobile number verified",
            (true, true, false) => "Enter the OTP sent to the new number",
            (true, false, false) => "A changed mobile number must be verified with an OTP",
        });
    }

    fn render_status(&self) {
        let (error, message, saving) = match self.editor.borrow().as_ref() {
            Some(ed) => (ed.error.clone(), ed.message.clone(), ed.saving),
            None => (String::new(), String::new(), false),
        };
        widgets::set_error(&self.error, &error);
        self.message.set_label(&message);
        self.message.set_visible(!message.is_empty());
        self.save.set_sensitive(!saving);
        self.save.set_label(if saving { "Saving…" } else { "Save profile" });
    }

    fn render_members(self: &Rc<Self>) {
        widgets::clear_box(&self.members);
        let drafts = match self.editor.borrow().as_ref() {
            Some(ed) => ed.members.clone(),
            None => return,
        };
        let editable = *self.can_edit.borrow();
        let relation_labels: Vec<&str> =
            std::iter::once("Relation *").chain(Relation::ALL.iter().map(|r| r.label())).collect();
        for (idx, mut draft) in drafts.into_iter().enumerate() {
            let frame = gtk::Frame::new(Some(&format!("Member {}", idx + 1)));
            let grid = gtk::Grid::new();
            grid.set_column_spacing(8);
            grid.set_row_spacing(6);
            grid.set_margin_top(8);
            grid.set_margin_bottom(8);
            grid.set_margin_start(8);
            grid.set_margin_end(8);

            for (i, label) in MEMBER_LABELS.iter().enumerate() {
                let e = widgets::entry(label);
                e.set_text(member_slot(&mut draft, i));
                e.set_editable(editable);
                let page = self.clone();
                e.connect_changed(move |e| {
                    if let Some(m) = page.editor.borrow_mut().as_mut().and_then(|ed| ed.members.get_mut(idx)) {
                        *member_slot(m, i) = e.text().to_string();
                    }
                });
                grid.attach(&e, (i % 3) as i32, (i / 3) as i32, 1, 1);
            }

            let relation = gtk::DropDown::from_strings(&relation_labels);
            if let Some(pos) = draft.relation.and_then(|r| Relation::ALL.iter().position(|x| *x == r)) {
                relation.set_selected(pos as u32 + 1);
            }
            relation.set_sensitive(editable);
            {
                let page = self.clone();
                relation.connect_selected_notify(move |dd| {
                    let picked = (dd.selected() as usize).checked_sub(1).and_then(|i| Relation::ALL.get(i).copied());
                    if let Some(m) = page.editor.borrow_mut().as_mut().and_then(|ed| ed.members.get_mut(idx)) {
                        m.relation = picked;
                    }
                });
            }
            grid.attach(&relation, 0, 3, 1, 1);

            let phone = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            let country = widgets::country_dropdown(&draft.country_code);
            country.set_sensitive(editable);
            let mobile = widgets::entry("Mobile number");
            mobile.set_text(&draft.mobile_number);
            mobile.set_editable(editable);
            phone.append(&country);
            phone.append(&mobile);
            {
                let page = self.clone();
                country.connect_selected_notify(move |dd| {
                    if let Some(m) = page.editor.borrow_mut().as_mut().and_then(|ed| ed.members.get_mut(idx)) {
                        m.country_code = widgets::dropdown_code(dd).to_string();
                    }
                });
            }
            {
                let page = self.clone();
                mobile.connect_changed(move |e| {
                    if let Some(m) = page.editor.borrow_mut().as_mut().and_then(|ed| ed.members.get_mut(idx)) {
                        m.mobile_number = introbook::phone::digits_only(&e.text());
                    }
                });
            }
            grid.attach(&phone, 1, 3, 1, 1);

            if editable {
                let remove = gtk::Button::with_label("Remove");
                remove.add_css_class("destructive-action");
                let page = self.clone();
                remove.connect_clicked(move |_| {
                    if let Some(ed) = page.editor.borrow_mut().as_mut() {
                        ed.remove_member(idx);
                    }
                    page.render_members();
                });
                grid.attach(&remove, 2, 3, 1, 1);
            }

            frame.set_child(Some(&grid));
            self.members.append(&frame);
        }
    }

    fn choose_photo(self: &Rc<Self>) {
        let page = self.clone();
        let chooser = widgets::pick_file(
            &self.ctx.window,
            "Choose a profile photo",
            "Images",
            &["*.png", "*.jpg", "*.jpeg", "*.gif", "*.webp", "*.bmp"],
            move |file| {
                let bytes = file.bytes.clone();
                let accepted = page.editor.borrow_mut().as_mut().map(|ed| ed.set_avatar(file)).unwrap_or(false);
                if accepted {
                    widgets::set_avatar_bytes(&page.avatar, bytes);
                }
                page.render_status();
            },
        );
        *self.chooser.borrow_mut() = Some(chooser);
    }

    fn perform(self: &Rc<Self>, req: ProfileRequest) {
        let page = self.clone();
        match req {
            ProfileRequest::SendOtp { mobile } => crate::app::call(
                move |c| async move { c.send_otp(&mobile, introbook::api::client::OtpPurpose::ProfileUpdate).await },
                move |res| {
                    match res {
                        Ok(_) => {
                            if let Some(ed) = page.editor.borrow_mut().as_mut() {
                                ed.otp_result(true, false);
                            }
                            page.ctx.toast("OTP sent successfully!");
                        }
                        Err(e) => {
                            if let Some(ed) = page.editor.borrow_mut().as_mut() {
                                ed.error = e.message_or("Failed to send OTP");
                            }
                        }
                    }
                    page.render_otp();
                    page.render_status();
                },
            ),
            ProfileRequest::VerifyOtp { mobile, otp } => crate::app::call(
                move |c| async move { c.verify_otp(&mobile, &otp).await },
                move |res| {
                    if let Some(ed) = page.editor.borrow_mut().as_mut() {
                        match res {
                            Ok(()) => ed.otp_result(false, true),
                            Err(e) => ed.error = e.message_or("Invalid OTP"),
                        }
                    }
                    page.render_otp();
                    page.render_status();
                },
            ),
            ProfileRequest::Save { personal, family, avatar } => {
                log::info!(
                    "saving profile with {} family members{}",
                    family.len(),
                    avatar.as_ref().map(|(name, size)| format!(", new photo {} ({} bytes)", name, size)).unwrap_or_default()
                );
                let file = self.editor.borrow().as_ref().and_then(|ed| ed.avatar.clone());
                crate::app::call(
                    move |c| async move { c.save_profile(&personal, &family, file).await },
                    move |res| {
                        if let Some(ed) = page.editor.borrow_mut().as_mut() {
                            match res {
                                Ok(msg) => ed.saved(&msg),
                                Err(e) => {
                                    log::warn!("profile save failed: {}", e);
                                    ed.save_failed(&e.message_or("Failed to update profile"));
                                }
                            }
                        }
                        page.render_status();
                        page.render_otp();
                    },
                );
            }
        }
    }

    pub fn refresh(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move {
                let (profile, permissions) = tokio::join!(c.profile(), c.user_permissions());
                Ok((profile?, permissions.map(|p| p.can_edit_profile())))
            },
            move |res| match res {
                Ok((profile, can_edit)) => {
                    let can_edit = can_edit.unwrap_or_else(|e| {
                        log::debug!("permissions unavailable, assuming main user: {}", e);
                        introbook::AppState::load().user_type() == introbook::api::models::UserType::MainUser
                    });
                    *page.can_edit.borrow_mut() = can_edit;
                    *page.editor.borrow_mut() = Some(ProfileEditor::from_profile(&profile));
                    page.render();
                    widgets::show_avatar(&page.avatar, profile.avatar.as_deref(), &profile.display_name());
                }
                Err(e) => {
                    log::warn!("profile load failed: {}", e);
                    page.ctx.toast(&e.message_or("Failed to load profile"));
                }
            },
        );
    }
}
