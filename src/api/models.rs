use serde::{Deserialize, Deserializer, Serialize};

// Django hands back `null` for blank optional columns; treat that as the empty value.
fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

// Display numbers like "A12" or "007" arrive as strings from most views and as bare ints from a few.
fn display_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }
    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Raw::Int(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    FamilyMember,
    Admin,
    #[default]
    #[serde(other)]
    MainUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Spouse,
    Son,
    Daughter,
    Father,
    Mother,
    Brother,
    Sister,
    Grandfather,
    Grandmother,
    Uncle,
    Aunt,
    Cousin,
    Nephew,
    Niece,
    SonInLaw,
    DaughterInLaw,
    FatherInLaw,
    MotherInLaw,
    Grandson,
    Granddaughter,
    #[default]
    #[serde(other)]
    Other,
}

impl Relation {
    pub const ALL: [Relation; 21] = [
        Relation::Spouse,
        Relation::Son,
        Relation::Daughter,
        Relation::Father,
        Relation::Mother,
        Relation::Brother,
        Relation::Sister,
        Relation::Grandfather,
        Relation::Grandmother,
        Relation::Uncle,
        Relation::Aunt,
        Relation::Cousin,
        Relation::Nephew,
        Relation::Niece,
        Relation::SonInLaw,
        Relation::DaughterInLaw,
        Relation::FatherInLaw,
        Relation::MotherInLaw,
        Relation::Grandson,
        Relation::Granddaughter,
        Relation::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Relation::Spouse => "Spouse",
            Relation::Son => "Son",
            Relation::Daughter => "Daughter",
            Relation::Father => "Father",
            Relation::Mother => "Mother",
            Relation::Brother => "Brother",
            Relation::Sister => "Sister",
            Relation::Grandfather => "Grandfather",
            Relation::Grandmother => "Grandmother",
            Relation::Uncle => "Uncle",
            Relation::Aunt => "Aunt",
            Relation::Cousin => "Cousin",
            Relation::Nephew => "Nephew",
            Relation::Niece => "Niece",
            Relation::SonInLaw => "Son-in-law",
            Relation::DaughterInLaw => "Daughter-in-law",
            Relation::FatherInLaw => "Father-in-law",
            Relation::MotherInLaw => "Mother-in-law",
            Relation::Grandson => "Grandson",
            Relation::Granddaughter => "Granddaughter",
            Relation::Other => "Other",
        }
    }
}

/// A main family profile as served by `profile/edit/` and `all-families/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: i64,
    #[serde(deserialize_with = "display_number")]
    pub user_number: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub surname: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(rename = "fatherName", deserialize_with = "null_default")]
    pub father_name: String,
    #[serde(rename = "motherName", deserialize_with = "null_default")]
    pub mother_name: String,
    #[serde(deserialize_with = "null_default")]
    pub sakh: String,
    #[serde(deserialize_with = "null_default")]
    pub gender: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    #[serde(rename = "maritalStatus", deserialize_with = "null_default")]
    pub marital_status: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(rename = "mobileNumber", deserialize_with = "null_default")]
    pub mobile_number: String,
    #[serde(deserialize_with = "null_default")]
    pub address: String,
    #[serde(deserialize_with = "null_default")]
    pub area: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub hometown: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub country: String,
    #[serde(deserialize_with = "null_default")]
    pub pincode: String,
    #[serde(deserialize_with = "null_default")]
    pub occupation: String,
    #[serde(rename = "companyName", deserialize_with = "null_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_default")]
    pub education: String,
    #[serde(rename = "bloodGroup", deserialize_with = "null_default")]
    pub blood_group: String,
    #[serde(deserialize_with = "null_default")]
    pub hobbies: String,
    #[serde(rename = "aboutMe", deserialize_with = "null_default")]
    pub about_me: String,
    pub avatar: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub family_members: Vec<FamilyMember>,
}

impl Profile {
    /// "surname name", the way the server labels families everywhere else.
    pub fn display_name(&self) -> String {
        join_names(&[&self.surname, &self.name])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyMember {
    pub id: i64,
    #[serde(deserialize_with = "display_number")]
    pub member_number: Option<String>,
    pub profile: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub surname: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(rename = "fatherName", deserialize_with = "null_default")]
    pub father_name: String,
    #[serde(deserialize_with = "null_default")]
    pub relation: Relation,
    #[serde(deserialize_with = "null_default")]
    pub gender: String,
    #[serde(rename = "memberAge")]
    pub member_age: Option<u32>,
    #[serde(rename = "mobileNumber", deserialize_with = "null_default")]
    pub mobile_number: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub hometown: String,
    #[serde(deserialize_with = "null_default")]
    pub occupation: String,
}

impl FamilyMember {
    pub fn display_name(&self) -> String {
        join_names(&[&self.surname, &self.name])
    }
}

fn join_names(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Family member with login access, from `family-members/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberLogin {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub mobile: String,
    pub can_login: bool,
    pub last_login: Option<String>,
    #[serde(deserialize_with = "display_number")]
    pub member_number: Option<String>,
}

/// Family member without login access yet, from `family-members/available/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableMember {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub relation: Relation,
    #[serde(deserialize_with = "null_default")]
    pub mobile: String,
    #[serde(deserialize_with = "display_number")]
    pub member_number: Option<String>,
}

/// What a family member login sees from `family-member/family/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyData {
    pub main_user: Profile,
    pub family_members: Vec<FamilyMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionAction {
    Accept,
    Decline,
}

/// The other side of a connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionProfile {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub id: i64,
    pub profile: ConnectionProfile,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
    pub connected_at: Option<String>,
    pub created_at: Option<String>,
    pub status: ConnectionStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingRequests {
    pub sent_requests: Vec<Connection>,
    pub received_requests: Vec<Connection>,
}

/// A family the server suggests connecting with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub city: Option<String>,
    pub hometown: Option<String>,
    pub avatar: Option<String>,
    #[serde(rename = "membersCount")]
    pub members_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationPartner {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestMessage {
    #[serde(deserialize_with = "null_default")]
    pub message: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    pub is_sender: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub partner: ConversationPartner,
    pub unread_count: u32,
    pub latest_message: LatestMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: i64,
    pub sender: Profile,
    pub receiver: Profile,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    pub is_read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Festival,
    Birthday,
    Wedding,
    #[default]
    Gathering,
    Picnic,
    Religious,
    Cultural,
    #[serde(other)]
    Other,
}

impl EventType {
    pub const ALL: [EventType; 8] = [
        EventType::Festival,
        EventType::Birthday,
        EventType::Wedding,
        EventType::Gathering,
        EventType::Picnic,
        EventType::Religious,
        EventType::Cultural,
        EventType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::Festival => "Festival",
            EventType::Birthday => "Birthday",
            EventType::Wedding => "Wedding",
            EventType::Gathering => "Family Gathering",
            EventType::Picnic => "Picnic",
            EventType::Religious => "Religious Event",
            EventType::Cultural => "Cultural Event",
            EventType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Maybe,
}

impl InvitationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Maybe => "maybe",
        }
    }
}

/// An invitation nested inside an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invitation {
    pub id: i64,
    pub invitee: Profile,
    pub status: InvitationStatus,
    pub created_at: Option<String>,
}

/// An invitation as listed by `community/events/{id}/invitations/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationSummary {
    pub id: i64,
    pub invitee_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub invitee_name: String,
    pub status: InvitationStatus,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub event_type: EventType,
    #[serde(deserialize_with = "null_default")]
    pub event_date: String,
    #[serde(deserialize_with = "null_default")]
    pub location: String,
    pub max_attendees: Option<u32>,
    pub is_public: bool,
    pub visible_to_all: bool,
    pub organizer: Option<Profile>,
    pub invitations: Vec<Invitation>,
    pub attendees_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsOverview {
    pub organized_events: Vec<Event>,
    pub invited_events: Vec<Event>,
    pub public_events: Vec<Event>,
}

/// Body for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_date: String,
    pub location: String,
    pub max_attendees: Option<u32>,
    pub is_public: bool,
    pub visible_to_all: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub active_members: u32,
    pub unread_messages: u32,
    pub upcoming_events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
    pub user_type: Option<UserType>,
    pub user_id: Option<i64>,
    pub family_member_id: Option<i64>,
    pub family_member_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupResponse {
    #[serde(deserialize_with = "display_number")]
    pub user_number: Option<String>,
    pub full_name: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionFlags {
    pub can_edit_profile: Option<bool>,
}

/// Answer of `user-permissions/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub user_type: UserType,
    pub permissions: PermissionFlags,
}

impl Permissions {
    /// Main users may edit unless told otherwise; family members only when granted.
    pub fn can_edit_profile(&self) -> bool {
        self.permissions.can_edit_profile.unwrap_or(self.user_type == UserType::MainUser)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSummary {
    pub records_created: u64,
    pub records_skipped: u64,
    pub total_database_records: u64,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_tolerates_nulls_and_camel_case() {
        let p: Profile = serde_json::from_value(json!({
            "id": 7,
            "surname": "Patel",
            "name": "Ramesh",
            "fatherName": "Kanu",
            "city": null,
            "avatar": null,
            "family_members": [{"id": 1, "surname": "Patel", "name": "Gita", "relation": "spouse"}]
        }))
        .unwrap();
        assert_eq!(p.father_name, "Kanu");
        assert_eq!(p.city, "");
        assert_eq!(p.display_name(), "Patel Ramesh");
        assert_eq!(p.family_members[0].relation, Relation::Spouse);
    }

    #[test]
    fn unknown_tags_fall_back() {
        let m: FamilyMember = serde_json::from_value(json!({"relation": "step_cousin"})).unwrap();
        assert_eq!(m.relation, Relation::Other);
        let e: Event = serde_json::from_value(json!({"event_type": "concert"})).unwrap();
        assert_eq!(e.event_type, EventType::Other);
        let l: LoginResponse = serde_json::from_value(json!({"success": true, "user_type": "family_member"})).unwrap();
        assert_eq!(l.user_type, Some(UserType::FamilyMember));
    }

    #[test]
    fn display_numbers_accept_strings_and_ints() {
        let p: Profile = serde_json::from_value(json!({
            "id": 3,
            "user_number": "A12",
            "surname": "Shah",
            "family_members": [{"id": 9, "member_number": "007", "relation": "son"}]
        }))
        .unwrap();
        assert_eq!(p.user_number.as_deref(), Some("A12"));
        assert_eq!(p.family_members[0].member_number.as_deref(), Some("007"));

        let data: FamilyData = serde_json::from_value(json!({
            "main_user": {"id": 3, "user_number": 12},
            "family_members": [{"id": 4, "member_number": "002"}]
        }))
        .unwrap();
        assert_eq!(data.main_user.user_number.as_deref(), Some("12"));
        assert_eq!(data.family_members[0].member_number.as_deref(), Some("002"));

        let s: SignupResponse =
            serde_json::from_value(json!({"success": true, "user_number": "A5", "full_name": "Shah Mira"})).unwrap();
        assert_eq!(s.user_number.as_deref(), Some("A5"));
        let m: MemberLogin = serde_json::from_value(json!({"id": 1, "member_number": null})).unwrap();
        assert_eq!(m.member_number, None);
    }

    #[test]
    fn unknown_user_type_is_main_user() {
        let p: Permissions = serde_json::from_value(json!({"user_type": "something_new"})).unwrap();
        assert_eq!(p.user_type, UserType::MainUser);
        let l: LoginResponse = serde_json::from_value(json!({"success": true, "user_type": "admin"})).unwrap();
        assert_eq!(l.user_type, Some(UserType::Admin));
    }

    #[test]
    fn permissions_default_by_user_type() {
        let p: Permissions = serde_json::from_value(json!({"user_type": "family_member"})).unwrap();
        assert!(!p.can_edit_profile());
        let p: Permissions = serde_json::from_value(json!({"user_type": "main_user"})).unwrap();
        assert!(p.can_edit_profile());
        let p: Permissions =
            serde_json::from_value(json!({"user_type": "family_member", "permissions": {"can_edit_profile": true}})).unwrap();
        assert!(p.can_edit_profile());
    }

    #[test]
    fn event_payload_serializes_snake_case_type() {
        let payload = EventPayload {
            title: "Diwali".into(),
            description: "Lights".into(),
            event_type: EventType::Festival,
            event_date: "2026-11-01T18:00".into(),
            location: "Hall".into(),
            max_attendees: None,
            is_public: false,
            visible_to_all: true,
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["event_type"], "festival");
        assert!(v["max_attendees"].is_null());
    }
}
