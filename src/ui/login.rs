use crate::ui::widgets;
use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use introbook::api::client::OtpPurpose;
use introbook::api::models::LoginResponse;
use introbook::config::normalize_url;
use introbook::i18n::{t, Language};
use introbook::signin::{LoginType, SigninRequest, SigninStep, SigninWizard, StepState};
use introbook::{ApiError, AppState};
use std::cell::RefCell;
use std::rc::Rc;

enum Outcome {
    OtpSent,
    OtpVerified,
    LoggedIn(LoginResponse),
    Reset,
}

struct LoginWindow {
    app: Application,
    window: adw::ApplicationWindow,
    lang: Language,
    wizard: RefCell<SigninWizard>,
    title: gtk::Label,
    steps: gtk::Label,
    stack: gtk::Stack,
    mobile: gtk::Entry,
    otp: gtk::Entry,
    password: gtk::PasswordEntry,
    mobile_btn: gtk::Button,
    verify_btn: gtk::Button,
    password_btn: gtk::Button,
    forgot_btn: gtk::Button,
    back_btn: gtk::Button,
    message: gtk::Label,
    error: gtk::Label,
}

fn step_mark(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "✓",
        StepState::Active => "●",
        StepState::Inactive => "○",
    }
}

impl LoginWindow {
    fn render(&self) {
        let w = self.wizard.borrow();
        self.title.set_label(&t(self.lang, w.title_key()));
        self.stack.set_visible_child_name(match w.step {
            SigninStep::ChooseType => "choose",
            SigninStep::Mobile => "mobile",
            SigninStep::Otp => "otp",
            SigninStep::Password => "password",
        });
        self.steps.set_label(&format!(
            "{} Mobile    {} OTP    {} Password",
            step_mark(w.step_state(1)),
            step_mark(w.step_state(2)),
            step_mark(w.step_state(3))
        ));
        self.steps.set_visible(w.step != SigninStep::ChooseType && !w.is_admin());
        self.mobile_btn.set_label(if w.is_admin() { "Continue" } else { "Send OTP" });
        self.mobile_btn.set_sensitive(!w.busy);
        self.verify_btn.set_sensitive(w.can_verify());
        self.password_btn.set_label(if w.forgot_password { "Reset Password" } else { "Login" });
        self.password_btn.set_sensitive(w.can_submit_password());
        self.forgot_btn.set_visible(w.step == SigninStep::Mobile && !w.forgot_password && !w.is_admin());
        self.back_btn.set_visible(w.step != SigninStep::ChooseType);
        self.message.set_label(&w.message);
        self.message.set_visible(!w.message.is_empty());
        widgets::set_error(&self.error, &w.error);
    }

    fn clear_entries(&self) {
        self.mobile.set_text("");
        self.otp.set_text("");
        self.password.set_text("");
    }

    fn perform(self: &Rc<Self>, req: Option<SigninRequest>) {
        self.render();
        let Some(req) = req else { return };
        let page = self.clone();
        let sent = req.clone();
        crate::app::call(
            move |client| async move {
                match req {
                    SigninRequest::SendOtp { mobile } => {
                        client.send_otp(&mobile, OtpPurpose::Login).await.map(|_| Outcome::OtpSent)
                    }
                    SigninRequest::ForgotPassword { mobile } => {
                        client.forgot_password(&mobile).await.map(|_| Outcome::OtpSent)
                    }
                    SigninRequest::VerifyOtp { mobile, otp } => {
                        client.verify_otp(&mobile, &otp).await.map(|_| Outcome::OtpVerified)
                    }
                    SigninRequest::Login { mobile, password, login_type } => {
                        client.login(&mobile, &password, login_type.as_str()).await.map(Outcome::LoggedIn)
                    }
                    SigninRequest::ResetPassword { mobile, otp, new_password } => {
                        client.reset_password(&mobile, &otp, &new_password).await.map(|_| Outcome::Reset)
                    }
                }
            },
            move |res| page.finish(&sent, res),
        );
    }

    fn finish(self: &Rc<Self>, req: &SigninRequest, res: Result<Outcome, ApiError>) {
        if matches!(res, Ok(Outcome::Reset)) {
            // Clearing the entries resets feedback, so do it before the success message is set.
            self.clear_entries();
        }
        let mut session = None;
        {
            let mut w = self.wizard.borrow_mut();
            match res {
                Ok(Outcome::OtpSent) => w.otp_sent(),
                Ok(Outcome::OtpVerified) => w.otp_verified(),
                Ok(Outcome::LoggedIn(resp)) => session = w.login_succeeded(&resp),
                Ok(Outcome::Reset) => {
                    log::info!("password reset completed");
                    w.reset_succeeded();
                }
                Err(e) => {
                    log::warn!("signin step failed: {}", e);
                    w.request_failed(req, Some(e.message_or("")));
                }
            }
        }
        self.render();
        if let Some((token, info, route)) = session {
            crate::app::sign_in(&self.app, token, info, route);
            self.window.close();
        }
    }
}

fn save_server(entry: &gtk::Entry) {
    let mut state = AppState::load();
    let url = normalize_url(&entry.text());
    if url != state.base_url {
        state.base_url = url;
        if let Err(e) = state.save() {
            log::error!("failed to save server URL: {}", e);
        }
    }
}

pub fn show_login_window(app: &Application) {
    let state = AppState::load();
    let lang = state.language;

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("IntroBook")
        .default_width(440)
        .default_height(520)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();
    let root = widgets::padded_box(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = widgets::heading("", "title-2");
    root.append(&title);
    let steps = widgets::dim_label("");
    root.append(&steps);

    let stack = gtk::Stack::new();
    stack.set_transition_type(gtk::StackTransitionType::SlideLeftRight);
    stack.set_vexpand(true);

    // Login type chooser
    let choose = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let user_btn = gtk::Button::with_label(&t(lang, "userLogin"));
    user_btn.add_css_class("suggested-action");
    let admin_btn = gtk::Button::with_label(&t(lang, "adminLogin"));
    let signup_btn = gtk::Button::with_label(&t(lang, "signUp"));
    let other_btn = gtk::Button::with_label(&t(lang, "otherLogin"));
    for b in [&user_btn, &admin_btn, &signup_btn, &other_btn] {
        b.add_css_class("pill");
        choose.append(b);
    }
    let server_entry = widgets::entry("Server URL");
    server_entry.set_text(&state.base_url);
    let server_row = gtk::Expander::new(Some("Server"));
    server_row.set_child(Some(&server_entry));
    server_row.set_margin_top(12);
    choose.append(&server_row);
    stack.add_named(&choose, Some("choose"));

    // Mobile number
    let mobile_page = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let country = widgets::country_dropdown(introbook::phone::DEFAULT_COUNTRY.code);
    let mobile = widgets::entry("Mobile number");
    mobile.set_input_purpose(gtk::InputPurpose::Phone);
    let mobile_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    mobile_row.append(&country);
    mobile_row.append(&mobile);
    mobile_page.append(&mobile_row);
    let mobile_btn = gtk::Button::with_label("Send OTP");
    mobile_btn.add_css_class("suggested-action");
    mobile_page.append(&mobile_btn);
    let forgot_btn = gtk::Button::with_label("Forgot password?");
    forgot_btn.add_css_class("flat");
    mobile_page.append(&forgot_btn);
    stack.add_named(&mobile_page, Some("mobile"));

    // OTP
    let otp_page = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let otp = widgets::entry("6-digit OTP");
    otp.set_max_length(introbook::signin::OTP_LEN as i32);
    otp.set_input_purpose(gtk::InputPurpose::Digits);
    otp_page.append(&otp);
    let verify_btn = gtk::Button::with_label("Verify OTP");
    verify_btn.add_css_class("suggested-action");
    otp_page.append(&verify_btn);
    stack.add_named(&otp_page, Some("otp"));

    // Password
    let password_page = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let password = widgets::password("Password");
    password_page.append(&password);
    let password_btn = gtk::Button::with_label("Login");
    password_btn.add_css_class("suggested-action");
    password_page.append(&password_btn);
    stack.add_named(&password_page, Some("password"));

    root.append(&stack);

    let message = widgets::dim_label("");
    root.append(&message);
    let error = widgets::error_label();
    root.append(&error);

    let back_btn = gtk::Button::with_label("Back");
    back_btn.add_css_class("flat");
    back_btn.set_halign(gtk::Align::Start);
    root.append(&back_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&gtk::Label::new(Some("IntroBook"))));
    let lang_btn = gtk::Button::with_label(lang.toggle_label());
    lang_btn.add_css_class("flat");
    header.pack_end(&lang_btn);
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let page = Rc::new(LoginWindow {
        app: app.clone(),
        window: window.clone(),
        lang,
        wizard: RefCell::new(SigninWizard::new()),
        title,
        steps,
        stack,
        mobile: mobile.clone(),
        otp: otp.clone(),
        password: password.clone(),
        mobile_btn: mobile_btn.clone(),
        verify_btn: verify_btn.clone(),
        password_btn: password_btn.clone(),
        forgot_btn: forgot_btn.clone(),
        back_btn: back_btn.clone(),
        message,
        error,
    });
    page.wizard.borrow_mut().set_country(widgets::dropdown_code(&country));

    for (btn, login_type) in [(&user_btn, LoginType::User), (&admin_btn, LoginType::Admin)] {
        let page = page.clone();
        let server_entry = server_entry.clone();
        btn.connect_clicked(move |_| {
            save_server(&server_entry);
            page.wizard.borrow_mut().choose(login_type);
            page.render();
        });
    }
    {
        let app = app.clone();
        let window = window.clone();
        let server_entry = server_entry.clone();
        signup_btn.connect_clicked(move |_| {
            save_server(&server_entry);
            crate::ui::signup::show_signup_window(&app);
            window.close();
        });
    }
    {
        let app = app.clone();
        let window = window.clone();
        other_btn.connect_clicked(move |_| {
            save_server(&server_entry);
            crate::ui::mobile_login::show_mobile_login_window(&app);
            window.close();
        });
    }

    {
        let page = page.clone();
        country.connect_selected_notify(move |dd| {
            page.wizard.borrow_mut().set_country(widgets::dropdown_code(dd));
            page.render();
        });
    }
    {
        let page = page.clone();
        mobile.connect_changed(move |e| {
            page.wizard.borrow_mut().set_mobile(&e.text());
            page.render();
        });
    }
    {
        let page = page.clone();
        otp.connect_changed(move |e| {
            page.wizard.borrow_mut().set_otp(&e.text());
            page.render();
        });
    }
    {
        let page = page.clone();
        password.connect_changed(move |e| {
            page.wizard.borrow_mut().set_password(&e.text());
            page.render();
        });
    }

    let submit_mobile: Rc<dyn Fn()> = {
        let page = page.clone();
        Rc::new(move || {
            let req = page.wizard.borrow_mut().submit_mobile();
            page.perform(req);
        })
    };
    let submit_otp: Rc<dyn Fn()> = {
        let page = page.clone();
        Rc::new(move || {
            if !page.wizard.borrow().can_verify() {
                return;
            }
            let req = page.wizard.borrow_mut().submit_otp();
            page.perform(req);
        })
    };
    let submit_password: Rc<dyn Fn()> = {
        let page = page.clone();
        Rc::new(move || {
            let req = page.wizard.borrow_mut().submit_password();
            page.perform(req);
        })
    };
    for (btn, entry_submit) in [(&mobile_btn, &submit_mobile), (&verify_btn, &submit_otp)] {
        let f = entry_submit.clone();
        btn.connect_clicked(move |_| (f)());
    }
    {
        let f = submit_mobile.clone();
        mobile.connect_activate(move |_| (f)());
    }
    {
        let f = submit_otp.clone();
        otp.connect_activate(move |_| (f)());
    }
    {
        let f = submit_password.clone();
        password_btn.connect_clicked(move |_| (f)());
    }
    {
        let f = submit_password.clone();
        password.connect_activate(move |_| (f)());
    }

    {
        let page = page.clone();
        forgot_btn.connect_clicked(move |_| {
            page.wizard.borrow_mut().start_forgot_password();
            page.clear_entries();
            page.render();
        });
    }
    {
        let page = page.clone();
        back_btn.connect_clicked(move |_| {
            let forgot = page.wizard.borrow().forgot_password;
            if forgot {
                page.wizard.borrow_mut().back_to_login();
            } else {
                page.wizard.borrow_mut().back();
            }
            page.clear_entries();
            page.render();
        });
    }
    {
        let app = app.clone();
        let window = window.clone();
        lang_btn.connect_clicked(move |_| {
            let mut state = AppState::load();
            state.language = state.language.toggled();
            if let Err(e) = state.save() {
                log::error!("failed to save language: {}", e);
            }
            show_login_window(&app);
            window.close();
        });
    }

    page.render();
    window.present();
}
