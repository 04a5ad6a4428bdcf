use crate::ui::widgets;
use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use introbook::config::UserInfo;
use introbook::i18n::t;
use introbook::mobile_login::{MobileLogin, MobileLoginRequest, MobileLoginStep};
use introbook::signin::Route;
use introbook::{ApiError, AppState};
use std::cell::RefCell;
use std::rc::Rc;

struct MobileLoginWindow {
    app: Application,
    window: adw::ApplicationWindow,
    flow: RefCell<MobileLogin>,
    stack: gtk::Stack,
    hint: gtk::Label,
    submit: gtk::Button,
    error: gtk::Label,
}

impl MobileLoginWindow {
    fn render(&self) {
        let f = self.flow.borrow();
        let (page, hint, action) = match f.step {
            MobileLoginStep::Mobile => ("mobile", "Enter the mobile number registered for you", "Send OTP"),
            MobileLoginStep::Otp => ("otp", "Enter the OTP sent to your mobile", "Verify OTP"),
            MobileLoginStep::Password => ("password", "Choose a password for future logins", "Set password"),
        };
        self.stack.set_visible_child_name(page);
        self.hint.set_label(hint);
        self.submit.set_label(if f.busy { "Please wait…" } else { action });
        self.submit.set_sensitive(!f.busy);
        widgets::set_error(&self.error, &f.error);
    }

    fn perform(self: &Rc<Self>, req: MobileLoginRequest) {
        let page = self.clone();
        crate::app::call(
            move |client| async move {
                match req {
                    MobileLoginRequest::SendOtp { mobile } => client.mobile_login_otp(&mobile).await.map(|_| None),
                    MobileLoginRequest::VerifyOtp { mobile, otp } => {
                        client.verify_mobile_otp(&mobile, &otp).await.map(|_| None)
                    }
                    MobileLoginRequest::SetPassword { mobile, password } => {
                        client.set_mobile_password(&mobile, &password).await.map(Some)
                    }
                }
            },
            move |res: Result<Option<String>, ApiError>| page.finish(res),
        );
    }

    fn finish(&self, res: Result<Option<String>, ApiError>) {
        match res {
            Ok(Some(token)) => {
                log::info!("mobile login completed");
                let info = UserInfo { login_type: "mobile".to_string(), ..Default::default() };
                crate::app::sign_in(&self.app, token, info, Route::Home);
                self.window.close();
                return;
            }
            Ok(None) => self.flow.borrow_mut().step_succeeded(),
            Err(e) => {
                log::warn!("mobile login step failed: {}", e);
                self.flow.borrow_mut().request_failed(&e.message_or("Request failed"));
            }
        }
        self.render();
    }
}

pub fn show_mobile_login_window(app: &Application) {
    let lang = AppState::load().language;
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(t(lang, "otherLogin"))
        .default_width(420)
        .default_height(480)
        .build();

    let root = widgets::padded_box(gtk::Orientation::Vertical, 12);
    root.append(&widgets::heading(&t(lang, "otherLogin"), "title-2"));
    let hint = widgets::dim_label("");
    root.append(&hint);

    let mobile = widgets::entry("Mobile number");
    let otp = widgets::entry("OTP");
    let password = widgets::password("New password");
    let confirm = widgets::password("Confirm password");
    let pw_box = gtk::Box::new(gtk::Orientation::Vertical, 8);
    pw_box.append(&password);
    pw_box.append(&confirm);

    let stack = gtk::Stack::new();
    stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
    stack.add_named(&mobile, Some("mobile"));
    stack.add_named(&otp, Some("otp"));
    stack.add_named(&pw_box, Some("password"));
    root.append(&stack);

    let error = widgets::error_label();
    root.append(&error);
    let submit = gtk::Button::new();
    submit.add_css_class("suggested-action");
    root.append(&submit);
    let back = gtk::Button::with_label("Back to login");
    back.add_css_class("flat");
    root.append(&back);

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&adw::HeaderBar::new());
    container.append(&root);
    window.set_content(Some(&container));

    let page = Rc::new(MobileLoginWindow {
        app: app.clone(),
        window: window.clone(),
        flow: RefCell::new(MobileLogin::new()),
        stack,
        hint,
        submit: submit.clone(),
        error,
    });

    {
        let page = page.clone();
        mobile.connect_changed(move |e| {
            page.flow.borrow_mut().set_mobile(&e.text());
            page.render();
        });
    }
    {
        let page = page.clone();
        otp.connect_changed(move |e| {
            page.flow.borrow_mut().set_otp(&e.text());
            page.render();
        });
    }
    for entry in [password.clone(), confirm.clone()] {
        let page = page.clone();
        let (password, confirm) = (password.clone(), confirm.clone());
        entry.connect_changed(move |_| {
            page.flow.borrow_mut().set_passwords(&password.text(), &confirm.text());
            page.render();
        });
    }
    {
        let page = page.clone();
        submit.connect_clicked(move |_| {
            let req = page.flow.borrow_mut().submit();
            page.render();
            if let Some(req) = req {
                page.perform(req);
            }
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
