//! Profile editor: personal details, the family member list and the avatar.
//!
//! Saving replaces the whole family list on the server, so the editor always submits every
//! member it holds. Changing the mobile number needs an OTP round first.

use crate::api::client::UploadFile;
use crate::api::models::{FamilyMember, Profile, Relation};
use crate::phone::{self, COUNTRIES, DEFAULT_COUNTRY};
use serde_json::{json, Map, Value};

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileRequest {
    SendOtp { mobile: String },
    VerifyOtp { mobile: String, otp: String },
    Save { personal: Map<String, Value>, family: Vec<Value>, avatar: Option<(String, usize)> },
}

/// Splits a stored "+91987..." number into dialling code and local digits.
pub fn split_mobile(full: &str) -> (String, String) {
    let full = full.trim();
    let mut codes: Vec<&str> = COUNTRIES.iter().map(|c| c.code).collect();
    codes.sort_by_key(|c| std::cmp::Reverse(c.len()));
    for code in codes {
        if let Some(rest) = full.strip_prefix(code) {
            return (code.to_string(), phone::digits_only(rest));
        }
    }
    (DEFAULT_COUNTRY.code.to_string(), phone::digits_only(full))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalFields {
    pub surname: String,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub sakh: String,
    pub gender: String,
    pub date_of_birth: String,
    pub age: String,
    pub marital_status: String,
    pub email: String,
    pub mobile_number: String,
    pub address: String,
    pub area: String,
    pub city: String,
    pub hometown: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub occupation: String,
    pub company_name: String,
    pub education: String,
    pub blood_group: String,
    pub hobbies: String,
    pub about_me: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberDraft {
    pub surname: String,
    pub name: String,
    pub father_name: String,
    pub relation: Option<Relation>,
    pub gender: String,
    pub member_age: String,
    pub country_code: String,
    pub mobile_number: String,
    pub email: String,
    pub city: String,
    pub hometown: String,
    pub occupation: String,
}

impl MemberDraft {
    pub fn blank() -> Self {
        Self { country_code: DEFAULT_COUNTRY.code.to_string(), ..Default::default() }
    }

    fn from_member(m: &FamilyMember) -> Self {
        let (country_code, mobile_number) = split_mobile(&m.mobile_number);
        Self {
            surname: m.surname.clone(),
            name: m.name.clone(),
            father_name: m.father_name.clone(),
            relation: Some(m.relation),
            gender: m.gender.clone(),
            member_age: m.member_age.map(|a| a.to_string()).unwrap_or_default(),
            country_code,
            mobile_number,
            email: m.email.clone(),
            city: m.city.clone(),
            hometown: m.hometown.clone(),
            occupation: m.occupation.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        self.surname.is_empty() && self.name.is_empty() && self.relation.is_none() && self.member_age.is_empty()
    }

    fn is_incomplete(&self) -> bool {
        (!self.surname.is_empty() || !self.name.is_empty()) && (self.surname.is_empty() || self.relation.is_none())
    }

    fn to_json(&self) -> Value {
        let mobile = if self.mobile_number.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.country_code, self.mobile_number)
        };
        json!({
            "surname": self.surname,
            "name": self.name,
            "fatherName": self.father_name,
            "gender": self.gender,
            "memberAge": self.member_age.trim().parse::<u32>().unwrap_or(18),
            "relation": self.relation.unwrap_or_default(),
            "email": self.email,
            "mobileNumber": mobile,
            "city": self.city,
            "hometown": self.hometown,
            "occupation": self.occupation,
            "country": "India",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    pub personal: PersonalFields,
    pub country_code: String,
    pub members: Vec<MemberDraft>,
    original_mobile: String,
    pub otp: String,
    pub otp_sent: bool,
    pub otp_verified: bool,
    pub avatar: Option<UploadFile>,
    pub saving: bool,
    pub error: String,
    pub message: String,
}

impl ProfileEditor {
    pub fn from_profile(p: &Profile) -> Self {
        let (country_code, mobile_number) = split_mobile(&p.mobile_number);
        let personal = PersonalFields {
            surname: p.surname.clone(),
            name: p.name.clone(),
            father_name: p.father_name.clone(),
            mother_name: p.mother_name.clone(),
            sakh: p.sakh.clone(),
            gender: p.gender.clone(),
            date_of_birth: p.date_of_birth.clone().unwrap_or_default(),
            age: p.age.map(|a| a.to_string()).unwrap_or_default(),
            marital_status: p.marital_status.clone(),
            email: p.email.clone(),
            mobile_number,
            address: p.address.clone(),
            area: p.area.clone(),
            city: p.city.clone(),
            hometown: p.hometown.clone(),
            state: p.state.clone(),
            country: p.country.clone(),
            pincode: p.pincode.clone(),
            occupation: p.occupation.clone(),
            company_name: p.company_name.clone(),
            education: p.education.clone(),
            blood_group: p.blood_group.clone(),
            hobbies: p.hobbies.clone(),
            about_me: p.about_me.clone(),
        };
        Self {
            original_mobile: p.mobile_number.trim().to_string(),
            country_code,
            personal,
            members: p.family_members.iter().map(MemberDraft::from_member).collect(),
            ..Default::default()
        }
    }

    fn full_mobile(&self) -> String {
        if self.personal.mobile_number.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.country_code, self.personal.mobile_number)
        }
    }

    pub fn set_mobile(&mut self, input: &str) {
        self.personal.mobile_number = phone::digits_only(input);
        self.otp_verified = false;
        self.otp_sent = false;
    }

    pub fn set_country(&mut self, code: &str) {
        self.country_code = code.to_string();
        self.otp_verified = false;
        self.otp_sent = false;
    }

    /// A changed, non-empty mobile number has to be verified before saving.
    pub fn needs_otp(&self) -> bool {
        let full = self.full_mobile();
        !full.is_empty() && full != self.original_mobile
    }

    pub fn add_member(&mut self) {
        self.members.push(MemberDraft::blank());
    }

    pub fn remove_member(&mut self, index: usize) {
        if index < self.members.len() {
            self.members.remove(index);
        }
    }

    pub fn request_otp(&mut self) -> Option<ProfileRequest> {
        if !phone::is_valid_mobile(&self.country_code, &self.personal.mobile_number) {
            self.error = format!(
                "Personal mobile number should be {} digits for {}",
                phone::digits_for(&self.country_code),
                self.country_code
            );
            return None;
        }
        self.error.clear();
        Some(ProfileRequest::SendOtp { mobile: self.full_mobile() })
    }

    pub fn verify_otp(&mut self) -> Option<ProfileRequest> {
        if self.otp.is_empty() {
            self.error = "Please enter OTP".to_string();
            return None;
        }
        Some(ProfileRequest::VerifyOtp { mobile: self.full_mobile(), otp: self.otp.clone() })
    }

    pub fn otp_result(&mut self, sent: bool, verified: bool) {
        self.otp_sent |= sent;
        self.otp_verified |= verified;
        if verified {
            self.error.clear();
        }
    }

    /// Accepts a picked image if it looks like one and is small enough.
    pub fn set_avatar(&mut self, file: UploadFile) -> bool {
        let ext = file.file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        if !file.file_name.contains('.') || !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            self.error = "Please select a valid image file.".to_string();
            return false;
        }
        if file.bytes.len() > MAX_AVATAR_BYTES {
            self.error = "Image size should be less than 5MB.".to_string();
            return false;
        }
        self.error.clear();
        self.avatar = Some(file);
        true
    }

    fn validate(&self) -> Result<(), String> {
        if self.personal.surname.trim().is_empty() || self.personal.father_name.trim().is_empty() {
            return Err("Please fill in required fields: Surname and Father Name".to_string());
        }
        if self.needs_otp() && !self.otp_verified {
            return Err("Please verify your mobile number with OTP first.".to_string());
        }
        if self.members.iter().any(MemberDraft::is_incomplete) {
            return Err(
                "Please complete all required fields for family members (Surname and Relation are required).".to_string(),
            );
        }
        if !self.personal.mobile_number.is_empty()
            && !phone::is_valid_mobile(&self.country_code, &self.personal.mobile_number)
        {
            return Err(format!(
                "Personal mobile number should be {} digits for {}",
                phone::digits_for(&self.country_code),
                self.country_code
            ));
        }
        for (i, m) in self.members.iter().enumerate() {
            if !m.mobile_number.is_empty() && !phone::is_valid_mobile(&m.country_code, &m.mobile_number) {
                return Err(format!(
                    "Family member {} mobile number should be {} digits for {}",
                    i + 1,
                    phone::digits_for(&m.country_code),
                    m.country_code
                ));
            }
        }
        Ok(())
    }

    pub fn personal_map(&self) -> Map<String, Value> {
        let p = &self.personal;
        let or = |v: &str, d: &str| if v.is_empty() { d.to_string() } else { v.to_string() };
        let mut map = Map::new();
        let fields: [(&str, String); 24] = [
            ("surname", p.surname.clone()),
            ("name", p.name.clone()),
            ("fatherName", p.father_name.clone()),
            ("motherName", p.mother_name.clone()),
            ("sakh", p.sakh.clone()),
            ("gender", p.gender.clone()),
            ("dateOfBirth", p.date_of_birth.clone()),
            ("age", or(&p.age, "18")),
            ("maritalStatus", p.marital_status.clone()),
            ("email", p.email.clone()),
            ("mobileNumber", self.full_mobile()),
            ("address", p.address.clone()),
            ("area", p.area.clone()),
            ("city", p.city.clone()),
            ("hometown", p.hometown.clone()),
            ("state", p.state.clone()),
            ("country", or(&p.country, "India")),
            ("pincode", p.pincode.clone()),
            ("occupation", p.occupation.clone()),
            ("companyName", p.company_name.clone()),
            ("education", p.education.clone()),
            ("bloodGroup", p.blood_group.clone()),
            ("hobbies", p.hobbies.clone()),
            ("aboutMe", p.about_me.clone()),
        ];
        for (key, value) in fields {
            if key == "dateOfBirth" && value.is_empty() {
                continue;
            }
            map.insert(key.to_string(), Value::String(value));
        }
        map
    }

    pub fn family_json(&self) -> Vec<Value> {
        self.members.iter().filter(|m| !m.is_blank()).map(MemberDraft::to_json).collect()
    }

    /// Validates and builds the save request; the avatar itself stays in `self.avatar`.
    pub fn submit(&mut self) -> Option<ProfileRequest> {
        self.message.clear();
        if let Err(e) = self.validate() {
            self.error = e;
            return None;
        }
        self.error.clear();
        self.saving = true;
        Some(ProfileRequest::Save {
            personal: self.personal_map(),
            family: self.family_json(),
            avatar: self.avatar.as_ref().map(|f| (f.file_name.clone(), f.bytes.len())),
        })
    }

    pub fn saved(&mut self, message: &str) {
        self.saving = false;
        self.original_mobile = self.full_mobile();
        self.otp_sent = false;
        self.otp_verified = false;
        self.avatar = None;
        self.message = if message.is_empty() { "Profile updated successfully!".to_string() } else { message.to_string() };
    }

    pub fn save_failed(&mut self, message: &str) {
        self.saving = false;
        self.error = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: 1,
            surname: "Patel".into(),
            name: "Ramesh".into(),
            father_name: "Kanubhai".into(),
            mobile_number: "+919876543210".into(),
            family_members: vec![FamilyMember {
                surname: "Patel".into(),
                name: "Gita".into(),
                relation: Relation::Spouse,
                mobile_number: "+14155550123".into(),
                member_age: Some(40),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn splits_country_code() {
        assert_eq!(split_mobile("+919876543210"), ("+91".into(), "9876543210".into()));
        assert_eq!(split_mobile("+971501234567"), ("+971".into(), "501234567".into()));
        assert_eq!(split_mobile("9876543210"), ("+91".into(), "9876543210".into()));
    }

    #[test]
    fn unchanged_profile_saves_whole_family() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.add_member();
        let Some(ProfileRequest::Save { personal, family, avatar }) = editor.submit() else {
            panic!("expected save, got error {:?}", editor.error)
        };
        assert_eq!(personal["fatherName"], "Kanubhai");
        assert_eq!(personal["mobileNumber"], "+919876543210");
        assert_eq!(personal["age"], "18");
        assert!(!personal.contains_key("dateOfBirth"));
        assert_eq!(family.len(), 1, "blank rows are dropped");
        assert_eq!(family[0]["relation"], "spouse");
        assert_eq!(family[0]["mobileNumber"], "+14155550123");
        assert!(avatar.is_none());
    }

    #[test]
    fn requires_surname_and_father_name() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.personal.father_name.clear();
        assert!(editor.submit().is_none());
        assert_eq!(editor.error, "Please fill in required fields: Surname and Father Name");
    }

    #[test]
    fn half_filled_member_is_rejected() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.add_member();
        editor.members[1].name = "Ravi".into();
        assert!(editor.submit().is_none());
        assert!(editor.error.starts_with("Please complete all required fields"));
    }

    #[test]
    fn changed_mobile_needs_otp() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.set_mobile("9123456789");
        assert!(editor.needs_otp());
        assert!(editor.submit().is_none());
        assert_eq!(editor.error, "Please verify your mobile number with OTP first.");

        assert_eq!(editor.request_otp(), Some(ProfileRequest::SendOtp { mobile: "+919123456789".into() }));
        editor.otp = "123456".into();
        assert!(editor.verify_otp().is_some());
        editor.otp_result(true, true);
        assert!(editor.submit().is_some());
    }

    #[test]
    fn switching_country_after_verification_needs_a_new_otp() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.set_mobile("9123456789");
        editor.otp_result(true, true);
        assert!(editor.otp_verified);

        editor.set_country("+44");
        assert!(!editor.otp_sent && !editor.otp_verified);
        assert!(editor.needs_otp());
        assert!(editor.submit().is_none());
        assert_eq!(editor.error, "Please verify your mobile number with OTP first.");
        assert_eq!(editor.request_otp(), Some(ProfileRequest::SendOtp { mobile: "+449123456789".into() }));
    }

    #[test]
    fn member_mobile_length_follows_country() {
        let mut editor = ProfileEditor::from_profile(&profile());
        editor.members[0].mobile_number = "12345".into();
        assert!(editor.submit().is_none());
        assert_eq!(editor.error, "Family member 1 mobile number should be 10 digits for +1");
    }

    #[test]
    fn avatar_must_be_a_small_image() {
        let mut editor = ProfileEditor::default();
        assert!(!editor.set_avatar(UploadFile { file_name: "notes.txt".into(), bytes: vec![0; 10] }));
        assert_eq!(editor.error, "Please select a valid image file.");
        assert!(!editor.set_avatar(UploadFile { file_name: "big.png".into(), bytes: vec![0; MAX_AVATAR_BYTES + 1] }));
        assert_eq!(editor.error, "Image size should be less than 5MB.");
        assert!(editor.set_avatar(UploadFile { file_name: "me.JPG".into(), bytes: vec![0; 10] }));
    }
}
