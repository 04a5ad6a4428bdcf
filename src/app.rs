use adw::prelude::*;
use adw::Application;
use introbook::api::models::UserType;
use introbook::config::UserInfo;
use introbook::signin::Route;
use introbook::storage::Cache;
use introbook::{ApiClient, ApiError, AppState};
use std::future::Future;

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    match (state.is_signed_in(), state.user_type()) {
        (true, UserType::Admin) => crate::ui::admin::show_admin_window(app),
        (true, _) => crate::ui::main_window::show_main_window(app),
        _ => crate::ui::login::show_login_window(app),
    }
}

/// Runs one backend call off the main thread with a client for the current session.
pub fn call<T, Fut, F, D>(request: F, done: D)
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    F: FnOnce(ApiClient) -> Fut,
    D: FnOnce(Result<T, ApiError>) + 'static,
{
    match ApiClient::from_state(&AppState::load()) {
        Ok(client) => crate::utils::run_async_to_main(request(client), done),
        Err(e) => done(Err(e)),
    }
}

/// Stores the session and opens the screen for the account type.
pub fn sign_in(app: &Application, token: String, info: UserInfo, route: Route) {
    let mut state = AppState::load();
    state.sign_in(token, info);
    if let Err(e) = state.save() {
        log::error!("failed to save session: {}", e);
    }
    log::info!("signed in as {:?}", state.user_type());
    if route == Route::Admin || state.user_type() == UserType::Admin {
        crate::ui::admin::show_admin_window(app);
    } else {
        crate::ui::main_window::show_main_window(app);
    }
}

pub fn sign_out(app: &Application) {
    let mut state = AppState::load();
    state.sign_out();
    if let Err(e) = state.save() {
        log::error!("failed to clear session: {}", e);
    }
    match Cache::open_default() {
        Ok(cache) => {
            if let Err(e) = cache.clear() {
                log::warn!("failed to clear cache: {}", e);
            }
        }
        Err(e) => log::warn!("cache unavailable: {}", e),
    }
    log::info!("signed out");
    crate::ui::login::show_login_window(app);
}

/// The local cache, or `None` with a log line when it cannot be opened.
pub fn cache() -> Option<Cache> {
    Cache::open_default().map_err(|e| log::warn!("cache unavailable: {}", e)).ok()
}
