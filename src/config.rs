use crate::api::models::UserType;
use crate::i18n::Language;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";
pub const API_URL_ENV: &str = "INTROBOOK_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// What the server told us about the signed in account at login time.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserInfo {
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub login_type: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub family_member_id: Option<i64>,
    #[serde(default)]
    pub family_member_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub base_url: String,
    pub token: Option<String>,
    pub language: Language,
    pub sidebar_pinned: bool,
    pub user_info: Option<UserInfo>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            language: Language::default(),
            sidebar_pinned: true,
            user_info: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("introbook.toml"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            if let Some(state) = Self::load_from(&path) {
                return state;
            }
        }
        Self::new()
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let text = fs::read_to_string(path).ok()?;
        match toml::from_str::<AppState>(&text) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {e}", path.display());
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::toml_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Base URL of the REST API, with the environment override applied.
    pub fn api_url(&self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(v) if !v.trim().is_empty() => normalize_url(&v),
            _ => normalize_url(&self.base_url),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn user_type(&self) -> UserType {
        self.user_info.as_ref().map(|u| u.user_type).unwrap_or_default()
    }

    pub fn sign_in(&mut self, token: String, info: UserInfo) {
        self.token = Some(token);
        self.user_info = Some(info);
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.user_info = None;
    }
}

/// Turns whatever the user typed into `scheme://host[:port]/.../api/`.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let base = with_scheme.trim_end_matches('/');
    if base.ends_with("/api") {
        format!("{}/", base)
    } else {
        format!("{}/api/", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_adds_scheme_and_api_suffix() {
        assert_eq!(normalize_url("example.org"), "https://example.org/api/");
        assert_eq!(normalize_url(" http://localhost:8000/ "), "http://localhost:8000/api/");
        assert_eq!(normalize_url("http://localhost:8000/api"), "http://localhost:8000/api/");
        assert_eq!(normalize_url(""), DEFAULT_BASE_URL);
    }

    #[test]
    fn save_and_load_round_trip_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("introbook.toml");

        let mut state = AppState::new();
        state.language = Language::Gujarati;
        state.sign_in(
            "abc123".into(),
            UserInfo { user_type: UserType::FamilyMember, login_type: "user".into(), family_member_id: Some(4), ..Default::default() },
        );
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert!(loaded.is_signed_in());
        assert_eq!(loaded.token.as_deref(), Some("abc123"));
        assert_eq!(loaded.user_type(), UserType::FamilyMember);
        assert_eq!(loaded.language, Language::Gujarati);
        assert_eq!(loaded.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("introbook.toml");
        fs::write(&path, "base_url = \"https://intro.example\"\n").unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "https://intro.example");
        assert!(loaded.sidebar_pinned);
        assert!(!loaded.is_signed_in());
        assert_eq!(loaded.user_type(), UserType::MainUser);
    }

    #[test]
    fn missing_or_broken_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("introbook.toml");
        fs::write(dir.path().join("state.json"), r#"{"token": "old"}"#).unwrap();
        assert!(AppState::load_from(&path).is_none());

        fs::write(&path, "token = [not toml").unwrap();
        assert!(AppState::load_from(&path).is_none());
    }

    #[test]
    fn sign_out_clears_token_and_user_info() {
        let mut state = AppState::new();
        state.sign_in("t".into(), UserInfo::default());
        state.sign_out();
        assert!(!state.is_signed_in());
        assert!(state.user_info.is_none());
    }
}
