//! IntroBook client core: the REST client, persisted state and the view models behind each screen.
//!
//! Nothing in here depends on GTK. The `introbook-gtk` binary wires these types to widgets.

pub mod admin;
pub mod api;
pub mod config;
pub mod connections;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod family;
pub mod i18n;
pub mod messages;
pub mod mobile_login;
pub mod phone;
pub mod profile_edit;
pub mod signin;
pub mod signup;
pub mod storage;
pub mod timefmt;

pub use api::client::ApiClient;
pub use config::AppState;
pub use error::ApiError;
