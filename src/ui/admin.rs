use crate::ui::widgets;
use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use introbook::admin::AdminUpload;
use introbook::i18n::t;
use introbook::AppState;
use std::cell::RefCell;
use std::rc::Rc;

struct AdminWindow {
    upload: RefCell<AdminUpload>,
    chooser: RefCell<Option<gtk::FileChooserNative>>,
    window: adw::ApplicationWindow,
    file_label: gtk::Label,
    upload_btn: gtk::Button,
    spinner: gtk::Spinner,
    message: gtk::Label,
    error: gtk::Label,
}

impl AdminWindow {
    fn render(&self) {
        let u = self.upload.borrow();
        self.file_label.set_label(u.file_name().unwrap_or("No file selected"));
        self.upload_btn.set_sensitive(!u.uploading && u.file_name().is_some());
        self.upload_btn.set_label(if u.uploading { "Uploading…" } else { "Upload" });
        self.spinner.set_spinning(u.uploading);
        self.message.set_label(&u.message);
        self.message.set_visible(!u.message.is_empty());
        widgets::set_error(&self.error, &u.error);
    }

    fn choose(self: &Rc<Self>) {
        let this = self.clone();
        let chooser = widgets::pick_file(&self.window, "Choose a workbook", "Excel workbooks", &["*.xlsx"], move |file| {
            log::debug!("picked {} ({} bytes)", file.file_name, file.bytes.len());
            this.upload.borrow_mut().select(file);
            this.render();
        });
        *self.chooser.borrow_mut() = Some(chooser);
    }

    fn upload(self: &Rc<Self>) {
        let file = self.upload.borrow_mut().start();
        self.render();
        let Some(file) = file else {
            return;
        };
        log::info!("uploading {}", file.file_name);
        let this = self.clone();
        crate::app::call(
            move |c| async move { c.upload_excel(file).await },
            move |res| {
                if let Ok(summary) = &res {
                    log::info!(
                        "upload done: {} created, {} skipped",
                        summary.records_created,
                        summary.records_skipped
                    );
                }
                this.upload.borrow_mut().finish(res);
                this.render();
            },
        );
    }
}

pub fn show_admin_window(app: &Application) {
    let lang = AppState::load().language;
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("IntroBook Admin")
        .default_width(560)
        .default_height(420)
        .build();

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let logout = gtk::Button::with_label(&t(lang, "logout"));
    header.pack_end(&logout);
    container.append(&header);

    let root = widgets::padded_box(gtk::Orientation::Vertical, 12);
    root.append(&widgets::heading("Member data upload", "title-2"));
    root.append(&widgets::dim_label(
        "Upload an .xlsx workbook of families. Existing records are kept and new ones are created.",
    ));

    let pick_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let pick_btn = gtk::Button::with_label("Choose file…");
    let file_label = widgets::dim_label("No file selected");
    pick_row.append(&pick_btn);
    pick_row.append(&file_label);
    root.append(&pick_row);

    let action_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let upload_btn = gtk::Button::with_label("Upload");
    upload_btn.add_css_class("suggested-action");
    let spinner = gtk::Spinner::new();
    action_row.append(&upload_btn);
    action_row.append(&spinner);
    root.append(&action_row);

    let message = widgets::dim_label("");
    message.set_wrap(true);
    message.add_css_class("success");
    root.append(&message);
    let error = widgets::error_label();
    root.append(&error);

    container.append(&root);
    window.set_content(Some(&container));

    let admin = Rc::new(AdminWindow {
        upload: RefCell::new(AdminUpload::new()),
        chooser: RefCell::new(None),
        window: window.clone(),
        file_label,
        upload_btn: upload_btn.clone(),
        spinner,
        message,
        error,
    });
    admin.render();

    {
        let admin = admin.clone();
        pick_btn.connect_clicked(move |_| admin.choose());
    }
    {
        let admin = admin.clone();
        upload_btn.connect_clicked(move |_| admin.upload());
    }
    {
        let app = app.clone();
        let window = window.clone();
        logout.connect_clicked(move |_| {
            crate::app::sign_out(&app);
            window.close();
        });
    }
    window.present();
}
