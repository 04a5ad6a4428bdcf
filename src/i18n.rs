//! English and Gujarati UI strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "gu")]
    Gujarati,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Gujarati,
            Language::Gujarati => Language::English,
        }
    }

    /// Label for the toggle button, naming the language you would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::English => "ગુજરાતી",
            Language::Gujarati => "English",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::English => EN,
            Language::Gujarati => GU,
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("selectLoginType", "Select Login Type"),
    ("userLogin", "User Login"),
    ("signUp", "New User Login"),
    ("otherLogin", "Other Login"),
    ("adminLogin", "Admin Login"),
    ("resetPassword", "Reset Password"),
    ("signup", "Sign Up"),
    ("home", "Home"),
    ("profile", "Profile"),
    ("family", "Family"),
    ("connections", "Connections"),
    ("messages", "Messages"),
    ("events", "Events"),
    ("dashboard", "Dashboard"),
    ("logout", "Logout"),
    ("familyConnections", "Family Connections"),
    ("accepted", "Connected"),
    ("pending", "Pending"),
    ("findConnections", "Find Families"),
    ("searchFamiliesByName", "Search families by name or city..."),
    ("invitations", "Invitations"),
    ("myEvents", "My Events"),
    ("communityEvents", "Community Events"),
    ("noInvitations", "No invitations"),
    ("noEventsCreated", "No events created"),
    ("noCommunityEvents", "No community events"),
    ("activeMembers", "Active Members"),
    ("unreadMessages", "Unread Messages"),
    ("upcomingEvents", "Upcoming Events"),
    ("familyMembers", "Family Members"),
    ("typeMessage", "Type a message…"),
    ("send", "Send"),
];

const GU: &[(&str, &str)] = &[
    ("selectLoginType", "લોગિન પ્રકાર પસંદ કરો"),
    ("userLogin", "યુઝર લોગિન"),
    ("signUp", "નવા યુઝર લોગિન"),
    ("otherLogin", "અન્ય લોગિન"),
    ("adminLogin", "એડમિન લોગિન"),
    ("resetPassword", "પાસવર્ડ રીસેટ કરો"),
    ("signup", "સાઇન અપ"),
    ("home", "હોમ"),
    ("profile", "પ્રોફાઇલ"),
    ("family", "પરિવાર"),
    ("connections", "જોડાણો"),
    ("messages", "સંદેશા"),
    ("events", "કાર્યક્રમો"),
    ("dashboard", "ડેશબોર્ડ"),
    ("logout", "લોગઆઉટ"),
    ("familyConnections", "પરિવાર જોડાણો"),
    ("accepted", "જોડાયેલા"),
    ("pending", "બાકી"),
    ("findConnections", "પરિવારો શોધો"),
    ("searchFamiliesByName", "નામ અથવા શહેર દ્વારા પરિવારો શોધો..."),
    ("invitations", "આમંત્રણો"),
    ("myEvents", "મારા કાર્યક્રમો"),
    ("communityEvents", "સમુદાય કાર્યક્રમો"),
    ("noInvitations", "કોઈ આમંત્રણ નથી"),
    ("noEventsCreated", "કોઈ કાર્યક્રમ બનાવ્યો નથી"),
    ("noCommunityEvents", "કોઈ સમુદાય કાર્યક્રમ નથી"),
    ("activeMembers", "સક્રિય સભ્યો"),
    ("unreadMessages", "ન વાંચેલા સંદેશા"),
    ("upcomingEvents", "આગામી કાર્યક્રમો"),
    ("familyMembers", "પરિવારના સભ્યો"),
    ("typeMessage", "સંદેશ લખો…"),
    ("send", "મોકલો"),
];

/// Looks up `key`, falling back to English and then to the key itself.
pub fn t(lang: Language, key: &str) -> String {
    lookup(lang.table(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
        .to_string()
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_selected_language() {
        assert_eq!(t(Language::English, "userLogin"), "User Login");
        assert_eq!(t(Language::Gujarati, "userLogin"), "યુઝર લોગિન");
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(t(Language::Gujarati, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn tables_cover_the_same_keys() {
        for (key, _) in EN {
            assert!(lookup(GU, key).is_some(), "missing gujarati string for {key}");
        }
    }

    #[test]
    fn toggle_flips_language() {
        assert_eq!(Language::English.toggled(), Language::Gujarati);
        assert_eq!(Language::Gujarati.toggled().toggle_label(), "ગુજરાતી");
    }
}
