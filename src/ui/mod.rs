pub mod admin;
pub mod connections_page;
pub mod dashboard_page;
pub mod events_page;
pub mod family_page;
pub mod home_page;
pub mod login;
pub mod main_window;
pub mod messages_page;
pub mod mobile_login;
pub mod profile_page;
pub mod sidebar;
pub mod signup;
pub mod widgets;

use introbook::i18n::{t, Language};
use std::rc::Rc;

/// Where a page asks the main window to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Page(Page),
    Chat(i64),
    FamilyProfile(i64),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Profile,
    Family,
    Connections,
    Messages,
    Events,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 7] =
        [Page::Home, Page::Profile, Page::Family, Page::Connections, Page::Messages, Page::Events, Page::Dashboard];

    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Profile => "profile",
            Page::Family => "family",
            Page::Connections => "connections",
            Page::Messages => "messages",
            Page::Events => "events",
            Page::Dashboard => "dashboard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Home => "go-home-symbolic",
            Page::Profile => "avatar-default-symbolic",
            Page::Family => "system-users-symbolic",
            Page::Connections => "network-workgroup-symbolic",
            Page::Messages => "mail-unread-symbolic",
            Page::Events => "x-office-calendar-symbolic",
            Page::Dashboard => "utilities-system-monitor-symbolic",
        }
    }
}

pub type Navigate = Rc<dyn Fn(Nav)>;

/// What every page of the main window gets handed.
#[derive(Clone)]
pub struct Ctx {
    pub window: adw::ApplicationWindow,
    pub overlay: adw::ToastOverlay,
    pub lang: Language,
    pub navigate: Navigate,
}

impl Ctx {
    pub fn t(&self, key: &str) -> String {
        t(self.lang, key)
    }

    pub fn toast(&self, text: &str) {
        widgets::toast(&self.overlay, text);
    }

    pub fn go(&self, nav: Nav) {
        (self.navigate)(nav)
    }
}
