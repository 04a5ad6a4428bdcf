//! Family members: login access management, the sidebar summary and the family listing.

use crate::api::models::{AvailableMember, FamilyData, FamilyMember, MemberLogin, Profile};
use url::Url;

pub const MIN_PASSWORD_LEN: usize = 6;
const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Generated initials avatar for people without a photo.
pub fn placeholder_avatar(name: &str) -> String {
    match Url::parse(AVATAR_SERVICE) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("name", name)
                .append_pair("background", "e3f2fd")
                .append_pair("color", "1976d2")
                .append_pair("size", "128");
            url.to_string()
        }
        Err(_) => AVATAR_SERVICE.to_string(),
    }
}

/// Absolute avatar URL. Relative media paths are served from the API host.
pub fn resolve_avatar(avatar: Option<&str>, name: &str, api_base: &Url) -> String {
    match avatar.map(str::trim).filter(|a| !a.is_empty()) {
        Some(a) if a.starts_with("http://") || a.starts_with("https://") => a.to_string(),
        Some(a) => {
            let origin = api_base.origin().ascii_serialization();
            if a.starts_with('/') {
                format!("{}{}", origin, a)
            } else {
                format!("{}/{}", origin, a)
            }
        }
        None => placeholder_avatar(name),
    }
}

/// Name, picture and family size shown at the top of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSummary {
    pub name: String,
    pub avatar_url: String,
    pub family_count: usize,
}

impl SidebarSummary {
    pub fn from_profile(profile: &Profile, api_base: &Url) -> Self {
        let name = [profile.name.trim(), profile.surname.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("User")
            .to_string();
        Self {
            avatar_url: resolve_avatar(profile.avatar.as_deref(), &name, api_base),
            family_count: profile.family_members.len() + 1,
            name,
        }
    }

    /// Family members see the main user's family, not their own profile.
    pub fn from_family_data(data: &FamilyData, api_base: &Url) -> Self {
        Self { family_count: data.family_members.len() + 1, ..Self::from_profile(&data.main_user, api_base) }
    }

    /// What the sidebar shows when the profile could not be loaded.
    pub fn fallback() -> Self {
        Self { name: "User".to_string(), avatar_url: placeholder_avatar("User"), family_count: 1 }
    }
}

/// The members of a family as shown on the family page.
#[derive(Debug, Clone, Default)]
pub struct FamilyListing {
    pub head: Option<Profile>,
    pub members: Vec<FamilyMember>,
    pub read_only: bool,
}

impl FamilyListing {
    /// A main user's own family, editable through the profile editor.
    pub fn own(profile: Profile) -> Self {
        let members = profile.family_members.clone();
        Self { head: Some(profile), members, read_only: false }
    }

    /// A family member looking at the family they belong to.
    pub fn as_member(data: FamilyData) -> Self {
        Self { head: Some(data.main_user), members: data.family_members, read_only: true }
    }

    /// Another family's public profile.
    pub fn other(profile: Profile, members: Vec<FamilyMember>) -> Self {
        Self { head: Some(profile), members, read_only: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub family_member_id: i64,
    pub mobile_number: String,
    pub password: String,
    pub full_access: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AccessForm {
    pub member_id: Option<i64>,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
    pub full_access: bool,
    pub error: String,
}

impl AccessForm {
    /// Picking a member prefills the mobile number the family already recorded.
    pub fn select_member(&mut self, member: &AvailableMember) {
        self.member_id = Some(member.id);
        if self.mobile.is_empty() {
            self.mobile = member.mobile.clone();
        }
        self.error.clear();
    }

    pub fn submit(&mut self) -> Option<AccessRequest> {
        let error = match self.member_id {
            None => Some("All fields are required".to_string()),
            Some(_) if self.mobile.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() => {
                Some("All fields are required".to_string())
            }
            Some(_) if self.password != self.confirm_password => Some("Passwords do not match".to_string()),
            Some(_) if self.password.chars().count() < MIN_PASSWORD_LEN => {
                Some(format!("Password must be at least {} characters", MIN_PASSWORD_LEN))
            }
            Some(_) => None,
        };
        if let Some(error) = error {
            self.error = error;
            return None;
        }
        self.error.clear();
        Some(AccessRequest {
            family_member_id: self.member_id?,
            mobile_number: self.mobile.clone(),
            password: self.password.clone(),
            full_access: self.full_access,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Who can log in, and who could be given access.
#[derive(Debug, Default)]
pub struct AccessView {
    pub members: Vec<MemberLogin>,
    pub available: Vec<AvailableMember>,
    pub form: AccessForm,
    pub removing: Option<i64>,
}

impl AccessView {
    pub fn set_lists(&mut self, members: Vec<MemberLogin>, available: Vec<AvailableMember>) {
        self.members = members;
        self.available = available;
        if let Some(id) = self.form.member_id {
            if !self.available.iter().any(|m| m.id == id) {
                self.form.member_id = None;
            }
        }
    }

    pub fn start_remove(&mut self, member_id: i64) -> bool {
        if self.removing.is_some() {
            return false;
        }
        self.removing = Some(member_id);
        true
    }

    pub fn finish_remove(&mut self) {
        self.removing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8000/api/").unwrap()
    }

    #[test]
    fn summary_prefers_name_then_surname() {
        let p = Profile { surname: "Patel".into(), family_members: vec![FamilyMember::default(); 2], ..Default::default() };
        let s = SidebarSummary::from_profile(&p, &base());
        assert_eq!(s.name, "Patel");
        assert_eq!(s.family_count, 3);
        assert!(s.avatar_url.starts_with("https://ui-avatars.com/api/?name=Patel&background=e3f2fd"));

        let s = SidebarSummary::from_profile(&Profile::default(), &base());
        assert_eq!(s.name, "User");
        assert_eq!(s.family_count, 1);
    }

    #[test]
    fn relative_avatar_uses_server_origin() {
        let url = resolve_avatar(Some("/media/avatars/a.jpg"), "x", &base());
        assert_eq!(url, "http://localhost:8000/media/avatars/a.jpg");
        let url = resolve_avatar(Some("https://cdn.example.com/a.jpg"), "x", &base());
        assert_eq!(url, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn member_summary_counts_main_family() {
        let data = FamilyData {
            main_user: Profile { name: "Ramesh".into(), ..Default::default() },
            family_members: vec![FamilyMember::default(); 4],
        };
        let s = SidebarSummary::from_family_data(&data, &base());
        assert_eq!(s.name, "Ramesh");
        assert_eq!(s.family_count, 5);
    }

    #[test]
    fn fallback_summary() {
        let s = SidebarSummary::fallback();
        assert_eq!((s.name.as_str(), s.family_count), ("User", 1));
        assert!(s.avatar_url.contains("name=User"));
    }

    #[test]
    fn access_form_checks_in_order() {
        let mut form = AccessForm::default();
        assert!(form.submit().is_none());
        assert_eq!(form.error, "All fields are required");

        form.select_member(&AvailableMember { id: 3, mobile: "9999999999".into(), ..Default::default() });
        form.password = "abc".into();
        form.confirm_password = "abd".into();
        assert!(form.submit().is_none());
        assert_eq!(form.error, "Passwords do not match");

        form.confirm_password = "abc".into();
        assert!(form.submit().is_none());
        assert_eq!(form.error, "Password must be at least 6 characters");

        form.password = "abcdef".into();
        form.confirm_password = "abcdef".into();
        let req = form.submit().unwrap();
        assert_eq!(req.family_member_id, 3);
        assert_eq!(req.mobile_number, "9999999999");
        assert!(!req.full_access);
    }

    #[test]
    fn listings_mark_read_only() {
        let p = Profile { family_members: vec![FamilyMember::default()], ..Default::default() };
        let own = FamilyListing::own(p.clone());
        assert!(!own.read_only);
        assert_eq!(own.members.len(), 1);
        assert!(FamilyListing::as_member(FamilyData::default()).read_only);
        assert!(FamilyListing::other(p, vec![]).read_only);
    }
}
