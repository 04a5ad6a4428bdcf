use crate::ui::widgets;
use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use introbook::api::client::OtpPurpose;
use introbook::i18n::t;
use introbook::signup::{SignupField, SignupForm};
use introbook::AppState;
use std::cell::RefCell;
use std::rc::Rc;

struct SignupWindow {
    form: RefCell<SignupForm>,
    full_name: gtk::Label,
    otp_row: gtk::Box,
    otp_status: gtk::Label,
    error: gtk::Label,
}

impl SignupWindow {
    fn render(&self) {
        let f = self.form.borrow();
        self.full_name.set_label(&format!("Full name: {}", f.full_name()));
        self.otp_row.set_visible(f.otp_sent && !f.otp_verified);
        self.otp_status.set_label(if f.otp_verified {
            "Mobile number verified"
        } else if f.otp_sent {
            "OTP sent to your mobile"
        } else {
            ""
        });
        widgets::set_error(&self.error, &f.error);
    }
}

pub fn show_signup_window(app: &Application) {
    let lang = AppState::load().language;
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(t(lang, "signup"))
        .default_width(480)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();
    let root = widgets::padded_box(gtk::Orientation::Vertical, 10);
    root.append(&widgets::heading(&t(lang, "signup"), "title-2"));

    let fields = [
        (SignupField::Surname, "Surname *"),
        (SignupField::Name, "Name"),
        (SignupField::FatherName, "Father's name *"),
        (SignupField::Sakh, "Sakh"),
        (SignupField::Email, "Email *"),
        (SignupField::Mobile, "Mobile number *"),
    ];
    let mut entries = Vec::new();
    for (field, placeholder) in fields {
        let e = widgets::entry(placeholder);
        root.append(&e);
        entries.push((field, e));
    }
    let full_name = widgets::dim_label("");
    root.append(&full_name);

    let send_otp = gtk::Button::with_label("Send OTP");
    send_otp.set_halign(gtk::Align::Start);
    root.append(&send_otp);

    let otp_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let otp = widgets::entry("OTP");
    let verify = gtk::Button::with_label("Verify");
    otp_row.append(&otp);
    otp_row.append(&verify);
    root.append(&otp_row);
    let otp_status = widgets::dim_label("");
    root.append(&otp_status);

    let password = widgets::password("Password *");
    let confirm = widgets::password("Confirm password");
    root.append(&password);
    root.append(&confirm);

    let error = widgets::error_label();
    root.append(&error);

    let submit = gtk::Button::with_label(&t(lang, "signup"));
    submit.add_css_class("suggested-action");
    root.append(&submit);
    let back = gtk::Button::with_label("Back to login");
    back.add_css_class("flat");
    root.append(&back);

    overlay.set_child(Some(&widgets::scrolled(&root)));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&adw::HeaderBar::new());
    container.append(&overlay);
    window.set_content(Some(&container));

    let page = Rc::new(SignupWindow {
        form: RefCell::new(SignupForm::new()),
        full_name,
        otp_row,
        otp_status,
        error,
    });

    entries.push((SignupField::Otp, otp.clone()));
    for (field, e) in entries {
        let page = page.clone();
        e.connect_changed(move |e| {
            page.form.borrow_mut().set(field, &e.text());
            page.render();
        });
    }
    for (field, e) in [(SignupField::Password, password.clone()), (SignupField::ConfirmPassword, confirm.clone())] {
        let page = page.clone();
        e.connect_changed(move |e| {
            page.form.borrow_mut().set(field, &e.text());
            page.render();
        });
    }

    {
        let page = page.clone();
        let overlay = overlay.clone();
        send_otp.connect_clicked(move |btn| {
            let Some(mobile) = page.form.borrow_mut().request_otp() else {
                page.render();
                return;
            };
            btn.set_sensitive(false);
            let page = page.clone();
            let overlay = overlay.clone();
            let btn = btn.clone();
            crate::app::call(
                move |c| async move { c.send_otp(&mobile, OtpPurpose::Signup).await },
                move |res| {
                    btn.set_sensitive(true);
                    match res {
                        Ok(_) => {
                            page.form.borrow_mut().otp_sent();
                            widgets::toast(&overlay, "OTP sent successfully!");
                        }
                        Err(e) => {
                            log::warn!("signup otp failed: {}", e);
                            page.form.borrow_mut().error = e.message_or("Failed to send OTP");
                        }
                    }
                    page.render();
                },
            );
        });
    }
    {
        let page = page.clone();
        verify.connect_clicked(move |_| {
            let Some((mobile, code)) = page.form.borrow_mut().verify_otp() else {
                page.render();
                return;
            };
            let page = page.clone();
            crate::app::call(
                move |c| async move { c.verify_otp(&mobile, &code).await },
                move |res| {
                    match res {
                        Ok(()) => page.form.borrow_mut().otp_verified(),
                        Err(e) => page.form.borrow_mut().error = e.message_or("Invalid OTP"),
                    }
                    page.render();
                },
            );
        });
    }
    {
        let page = page.clone();
        let app = app.clone();
        let window = window.clone();
        submit.connect_clicked(move |btn| {
            let Some(req) = page.form.borrow_mut().submit() else {
                page.render();
                return;
            };
            btn.set_sensitive(false);
            let page = page.clone();
            let app = app.clone();
            let window = window.clone();
            let btn = btn.clone();
            crate::app::call(
                move |c| async move { c.signup(&req).await },
                move |res| match res {
                    Ok(resp) => {
                        log::info!("signup completed");
                        let summary = page.form.borrow().success_summary(&resp);
                        show_summary(&window, &summary, app.clone());
                    }
                    Err(e) => {
                        log::warn!("signup failed: {}", e);
                        btn.set_sensitive(true);
                        page.form.borrow_mut().error = e.message_or("Signup failed");
                        page.render();
                    }
                },
            );
        });
    }
    {
        let app = app.clone();
        let window = window.clone();
        back.connect_clicked(move |_| {
            crate::ui::login::show_login_window(&app);
            window.close();
        });
    }

    page.render();
    window.present();
}

/// Shows the assigned user number, then returns to the login window.
fn show_summary(window: &adw::ApplicationWindow, summary: &str, app: Application) {
    let dialog = gtk::Dialog::builder().title("Welcome").transient_for(window).modal(true).build();
    let content = widgets::padded_box(gtk::Orientation::Vertical, 12);
    let label = gtk::Label::new(Some(summary));
    label.set_wrap(true);
    label.set_selectable(true);
    content.append(&label);
    dialog.set_child(Some(&content));
    let ok = dialog.add_button("Go to login", gtk::ResponseType::Ok);
    ok.add_css_class("suggested-action");
    let window = window.clone();
    dialog.connect_response(move |dlg, _| {
        dlg.close();
        crate::ui::login::show_login_window(&app);
        window.close();
    });
    dialog.present();
}
