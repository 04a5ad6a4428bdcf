use adw::prelude::*;
use gtk4 as gtk;
use gtk4::{gdk, glib};

pub fn padded_box(orientation: gtk::Orientation, spacing: i32) -> gtk::Box {
    let b = gtk::Box::new(orientation, spacing);
    b.set_margin_top(12);
    b.set_margin_bottom(12);
    b.set_margin_start(12);
    b.set_margin_end(12);
    b
}

pub fn heading(text: &str, css: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class(css);
    label.set_halign(gtk::Align::Start);
    label
}

pub fn dim_label(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("dim-label");
    label.set_halign(gtk::Align::Start);
    label.set_wrap(true);
    label.set_xalign(0.0);
    label
}

/// Inline red text under a form; hidden while empty.
pub fn error_label() -> gtk::Label {
    let label = gtk::Label::new(None);
    label.add_css_class("error");
    label.set_halign(gtk::Align::Start);
    label.set_wrap(true);
    label.set_visible(false);
    label
}

pub fn set_error(label: &gtk::Label, text: &str) {
    label.set_label(text);
    label.set_visible(!text.is_empty());
}

pub fn entry(placeholder: &str) -> gtk::Entry {
    let e = gtk::Entry::new();
    e.set_placeholder_text(Some(placeholder));
    e.set_hexpand(true);
    e
}

pub fn password(placeholder: &str) -> gtk::PasswordEntry {
    let e = gtk::PasswordEntry::new();
    e.set_placeholder_text(Some(placeholder));
    e.set_show_peek_icon(true);
    e.set_hexpand(true);
    e
}

pub fn clear_box(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

pub fn clear_list(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

pub fn toast(overlay: &adw::ToastOverlay, text: &str) {
    overlay.add_toast(adw::Toast::new(text));
}

pub fn scrolled(child: &impl IsA<gtk::Widget>) -> gtk::ScrolledWindow {
    let s = gtk::ScrolledWindow::builder().vexpand(true).hexpand(true).hscrollbar_policy(gtk::PolicyType::Never).build();
    s.set_child(Some(child));
    s
}

pub struct CardRow {
    pub row: gtk::ListBoxRow,
    pub avatar: adw::Avatar,
    /// Trailing buttons go here.
    pub actions: gtk::Box,
}

/// A boxed-list row with an avatar, a title and an optional subtitle.
pub fn card_row(title: &str, subtitle: &str) -> CardRow {
    let row = gtk::ListBoxRow::new();
    row.set_activatable(false);
    let line = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    line.set_margin_top(8);
    line.set_margin_bottom(8);
    line.set_margin_start(12);
    line.set_margin_end(12);

    let avatar = adw::Avatar::new(36, Some(title), true);
    line.append(&avatar);

    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text.set_hexpand(true);
    let t = gtk::Label::new(Some(title));
    t.set_halign(gtk::Align::Start);
    t.set_wrap(true);
    t.add_css_class("heading");
    text.append(&t);
    if !subtitle.is_empty() {
        text.append(&dim_label(subtitle));
    }
    line.append(&text);

    let actions = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    actions.set_valign(gtk::Align::Center);
    line.append(&actions);

    row.set_child(Some(&line));
    CardRow { row, avatar, actions }
}

pub fn boxed_list() -> gtk::ListBox {
    let list = gtk::ListBox::new();
    list.add_css_class("boxed-list");
    list.set_selection_mode(gtk::SelectionMode::None);
    list
}

pub fn placeholder_row(list: &gtk::ListBox, text: &str) {
    let label = dim_label(text);
    label.set_margin_top(18);
    label.set_margin_bottom(18);
    label.set_halign(gtk::Align::Center);
    list.append(&label);
}

/// Modal yes/no question; `on_yes` runs only when confirmed.
pub fn confirm(parent: &impl IsA<gtk::Window>, question: &str, action: &str, on_yes: impl Fn() + 'static) {
    let dialog = gtk::Dialog::builder().title("Confirm").transient_for(parent).modal(true).build();
    let content = padded_box(gtk::Orientation::Vertical, 12);
    let label = gtk::Label::new(Some(question));
    label.set_wrap(true);
    content.append(&label);
    dialog.set_child(Some(&content));
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ok = dialog.add_button(action, gtk::ResponseType::Ok);
    ok.add_css_class("destructive-action");
    dialog.connect_response(move |dlg, resp| {
        if resp == gtk::ResponseType::Ok {
            on_yes();
        }
        dlg.close();
    });
    dialog.present();
}

/// Sets a downloaded picture on an avatar; undecodable bytes keep the initials.
pub fn set_avatar_bytes(avatar: &adw::Avatar, bytes: Vec<u8>) {
    match gdk::Texture::from_bytes(&glib::Bytes::from_owned(bytes)) {
        Ok(texture) => avatar.set_custom_image(Some(&texture)),
        Err(e) => log::debug!("avatar image not decodable: {}", e),
    }
}

/// Country code picker shared by the phone number forms.
pub fn country_dropdown(selected: &str) -> gtk::DropDown {
    let labels: Vec<String> = introbook::phone::COUNTRIES.iter().map(introbook::phone::option_label).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let dd = gtk::DropDown::from_strings(&refs);
    if let Some(pos) = introbook::phone::COUNTRIES.iter().position(|c| c.code == selected) {
        dd.set_selected(pos as u32);
    }
    dd
}

pub fn dropdown_code(dd: &gtk::DropDown) -> &'static str {
    introbook::phone::COUNTRIES
        .get(dd.selected() as usize)
        .map(|c| c.code)
        .unwrap_or(introbook::phone::DEFAULT_COUNTRY.code)
}

/// Downloads `url` in the background and shows it on `avatar` once it arrives.
pub fn load_avatar(avatar: &adw::Avatar, url: String) {
    let avatar = avatar.clone();
    crate::app::call(
        move |c| async move { c.download(&url).await },
        move |res| match res {
            Ok(bytes) => set_avatar_bytes(&avatar, bytes),
            Err(e) => log::debug!("avatar download failed: {}", e),
        },
    );
}

/// Shows an uploaded profile picture; without one the avatar keeps its initials.
pub fn show_avatar(avatar: &adw::Avatar, path: Option<&str>, name: &str) {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return;
    };
    match url::Url::parse(&introbook::AppState::load().api_url()) {
        Ok(base) => load_avatar(avatar, introbook::family::resolve_avatar(Some(path), name, &base)),
        Err(e) => log::debug!("bad api url: {}", e),
    }
}

/// Asks for one line of optional text; `on_ok` gets whatever was typed.
pub fn prompt(parent: &impl IsA<gtk::Window>, question: &str, action: &str, on_ok: impl Fn(String) + 'static) {
    let dialog = gtk::Dialog::builder().title(action).transient_for(parent).modal(true).build();
    let content = padded_box(gtk::Orientation::Vertical, 12);
    let label = gtk::Label::new(Some(question));
    label.set_wrap(true);
    content.append(&label);
    let input = entry("");
    content.append(&input);
    dialog.set_child(Some(&content));
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ok = dialog.add_button(action, gtk::ResponseType::Ok);
    ok.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);
    dialog.connect_response(move |dlg, resp| {
        if resp == gtk::ResponseType::Ok {
            on_ok(input.text().trim().to_string());
        }
        dlg.close();
    });
    dialog.present();
}

/// Opens a native file chooser; the picked file is read and handed to `on_pick`.
/// The chooser is returned so the caller can keep it alive while it is showing.
pub fn pick_file(
    parent: &impl IsA<gtk::Window>,
    title: &str,
    filter_name: &str,
    patterns: &[&str],
    on_pick: impl Fn(introbook::api::client::UploadFile) + 'static,
) -> gtk::FileChooserNative {
    let chooser =
        gtk::FileChooserNative::new(Some(title), Some(parent), gtk::FileChooserAction::Open, Some("Open"), Some("Cancel"));
    let filter = gtk::FileFilter::new();
    filter.set_name(Some(filter_name));
    for p in patterns {
        filter.add_pattern(p);
    }
    chooser.add_filter(&filter);
    chooser.connect_response(move |dlg, resp| {
        if resp != gtk::ResponseType::Accept {
            return;
        }
        let Some(path) = dlg.file().and_then(|f| f.path()) else {
            return;
        };
        match std::fs::read(&path) {
            Ok(bytes) => {
                let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                on_pick(introbook::api::client::UploadFile { file_name, bytes });
            }
            Err(e) => log::warn!("failed to read {}: {}", path.display(), e),
        }
    });
    chooser.show();
    chooser
}
