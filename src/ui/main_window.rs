use crate::ui::connections_page::ConnectionsPage;
use crate::ui::dashboard_page::DashboardPage;
use crate::ui::events_page::EventsPage;
use crate::ui::family_page::FamilyPage;
use crate::ui::home_page::HomePage;
use crate::ui::messages_page::MessagesPage;
use crate::ui::profile_page::ProfilePage;
use crate::ui::sidebar::Sidebar;
use crate::ui::{Ctx, Nav, Navigate, Page};
use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use introbook::AppState;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct MainWindow {
    app: Application,
    ctx: Ctx,
    stack: gtk::Stack,
    sidebar: Rc<Sidebar>,
    home: Rc<HomePage>,
    profile: Rc<ProfilePage>,
    family: Rc<FamilyPage>,
    connections: Rc<ConnectionsPage>,
    messages: Rc<MessagesPage>,
    events: Rc<EventsPage>,
    dashboard: Rc<DashboardPage>,
}

impl MainWindow {
    fn go(&self, nav: Nav) {
        log::debug!("navigate to {:?}", nav);
        match nav {
            Nav::Page(page) => self.show(page),
            Nav::Chat(partner_id) => {
                self.show_only(Page::Messages);
                self.messages.refresh();
                self.messages.open_partner(partner_id);
            }
            Nav::FamilyProfile(profile_id) => {
                self.show_only(Page::Family);
                self.family.show_family(profile_id);
            }
            Nav::Logout => {
                crate::app::sign_out(&self.app);
                self.ctx.window.close();
            }
        }
    }

    fn show_only(&self, page: Page) {
        self.stack.set_visible_child_name(page.name());
        self.sidebar.select(page);
    }

    fn show(&self, page: Page) {
        self.show_only(page);
        match page {
            Page::Home => self.home.refresh(),
            Page::Profile => self.profile.refresh(),
            Page::Family => self.family.refresh(),
            Page::Connections => self.connections.refresh(),
            Page::Messages => self.messages.refresh(),
            Page::Events => self.events.refresh(),
            Page::Dashboard => self.dashboard.refresh(),
        }
        self.sidebar.refresh();
    }
}

pub fn show_main_window(app: &Application) {
    let state = AppState::load();
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("IntroBook")
        .default_width(1100)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();
    let flap = adw::Flap::builder()
        .reveal_flap(state.sidebar_pinned)
        .locked(true)
        .modal(false)
        .build();

    let main = Rc::new_cyclic(|weak: &Weak<MainWindow>| {
        let weak = weak.clone();
        let navigate: Navigate = Rc::new(move |nav| {
            if let Some(main) = weak.upgrade() {
                main.go(nav);
            }
        });
        let ctx = Ctx { window: window.clone(), overlay: overlay.clone(), lang: state.language, navigate };

        let stack = gtk::Stack::new();
        stack.set_transition_type(gtk::StackTransitionType::Crossfade);
        let sidebar = Sidebar::new(&ctx);
        let home = HomePage::new(&ctx);
        let profile = ProfilePage::new(&ctx);
        let family = FamilyPage::new(&ctx);
        let connections = ConnectionsPage::new(&ctx);
        let messages = MessagesPage::new(&ctx);
        let events = EventsPage::new(&ctx);
        let dashboard = DashboardPage::new(&ctx);
        stack.add_named(&home.widget(), Some(Page::Home.name()));
        stack.add_named(&profile.widget(), Some(Page::Profile.name()));
        stack.add_named(&family.widget(), Some(Page::Family.name()));
        stack.add_named(&connections.widget(), Some(Page::Connections.name()));
        stack.add_named(&messages.widget(), Some(Page::Messages.name()));
        stack.add_named(&events.widget(), Some(Page::Events.name()));
        stack.add_named(&dashboard.widget(), Some(Page::Dashboard.name()));

        MainWindow {
            app: app.clone(),
            ctx,
            stack,
            sidebar,
            home,
            profile,
            family,
            connections,
            messages,
            events,
            dashboard,
        }
    });

    flap.set_flap(Some(&main.sidebar.widget()));
    flap.set_content(Some(&main.stack));
    overlay.set_child(Some(&flap));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&gtk::Label::new(Some("IntroBook"))));

    let pin = gtk::ToggleButton::new();
    pin.set_icon_name("sidebar-show-symbolic");
    pin.set_tooltip_text(Some("Keep sidebar open"));
    pin.set_active(state.sidebar_pinned);
    {
        let flap = flap.clone();
        pin.connect_toggled(move |btn| {
            flap.set_reveal_flap(btn.is_active());
            let mut state = AppState::load();
            state.sidebar_pinned = btn.is_active();
            if let Err(e) = state.save() {
                log::warn!("failed to save sidebar preference: {}", e);
            }
        });
    }
    header.pack_start(&pin);

    let lang_btn = gtk::Button::with_label(state.language.toggle_label());
    {
        let app = app.clone();
        let window = window.clone();
        lang_btn.connect_clicked(move |_| {
            let mut state = AppState::load();
            state.language = state.language.toggled();
            if let Err(e) = state.save() {
                log::warn!("failed to save language: {}", e);
            }
            show_main_window(&app);
            window.close();
        });
    }
    header.pack_end(&lang_btn);

    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    main.go(Nav::Page(Page::Home));
    // Page callbacks hold a weak handle; the window owns the only strong one.
    let owner = RefCell::new(Some(main));
    window.connect_destroy(move |_| {
        log::debug!("main window closed");
        owner.borrow_mut().take();
    });
}
