use crate::api::client::SignupRequest;
use crate::api::models::SignupResponse;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Surname,
    Name,
    FatherName,
    Sakh,
    Email,
    Mobile,
    Otp,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub surname: String,
    pub name: String,
    pub father_name: String,
    pub sakh: String,
    pub email: String,
    pub mobile: String,
    pub otp: String,
    pub password: String,
    pub confirm_password: String,
    pub otp_sent: bool,
    pub otp_verified: bool,
    pub error: String,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: SignupField, value: &str) {
        let slot = match field {
            SignupField::Surname => &mut self.surname,
            SignupField::Name => &mut self.name,
            SignupField::FatherName => &mut self.father_name,
            SignupField::Sakh => &mut self.sakh,
            SignupField::Email => &mut self.email,
            SignupField::Mobile => &mut self.mobile,
            SignupField::Otp => &mut self.otp,
            SignupField::Password => &mut self.password,
            SignupField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.to_string();
        self.error.clear();
    }

    /// Read-only "full name" shown under the name fields.
    pub fn full_name(&self) -> String {
        [&self.surname, &self.name, &self.father_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mobile number to request an OTP for, if one was entered.
    pub fn request_otp(&mut self) -> Option<String> {
        if self.mobile.is_empty() {
            self.error = "Please enter mobile number".to_string();
            return None;
        }
        Some(self.mobile.clone())
    }

    pub fn otp_sent(&mut self) {
        self.otp_sent = true;
    }

    pub fn verify_otp(&mut self) -> Option<(String, String)> {
        if self.otp.is_empty() {
            self.error = "Please enter OTP".to_string();
            return None;
        }
        Some((self.mobile.clone(), self.otp.clone()))
    }

    pub fn otp_verified(&mut self) {
        self.otp_verified = true;
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("surname", &self.surname),
            ("father_name", &self.father_name),
            ("email", &self.email),
            ("mobile", &self.mobile),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    /// Validates the form and builds the signup request. On failure `error` is set and nothing is sent.
    pub fn submit(&mut self) -> Option<SignupRequest> {
        let missing = self.missing_fields();
        let error = if !missing.is_empty() {
            Some(format!("Please fill in all required fields: {}", missing.join(", ")))
        } else if !self.otp_verified {
            Some("Please verify OTP first".to_string())
        } else if self.password != self.confirm_password {
            Some("Passwords do not match".to_string())
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            Some(format!("Password must be at least {} characters long", MIN_PASSWORD_LEN))
        } else {
            None
        };
        if let Some(error) = error {
            self.error = error;
            return None;
        }

        Some(SignupRequest {
            first_name: self.surname.clone(),
            middle_name: self.name.clone(),
            last_name: self.father_name.clone(),
            sakh: self.sakh.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
            username: self.mobile.clone(),
            password: self.password.clone(),
        })
    }

    /// Text shown once the account exists.
    pub fn success_summary(&self, resp: &SignupResponse) -> String {
        let number = resp.user_number.clone().unwrap_or_else(|| "Assigned".to_string());
        let full_name = resp.full_name.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| self.full_name());
        format!(
            "Signup successful!\n\nUser Number: #{}\nFull Name: {}\nMobile Number: {}\n\nRemember your mobile number and password for login.\nWelcome email sent to {}!",
            number, full_name, self.mobile, self.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SignupForm {
        let mut f = SignupForm::new();
        f.set(SignupField::Surname, "Patel");
        f.set(SignupField::Name, "Ramesh");
        f.set(SignupField::FatherName, "Kanubhai");
        f.set(SignupField::Email, "r@example.com");
        f.set(SignupField::Mobile, "9876543210");
        f.set(SignupField::Password, "secret1");
        f.set(SignupField::ConfirmPassword, "secret1");
        f.otp_verified();
        f
    }

    #[test]
    fn full_name_skips_blank_parts() {
        let mut f = SignupForm::new();
        f.set(SignupField::Surname, "Patel");
        f.set(SignupField::FatherName, "Kanubhai");
        assert_eq!(f.full_name(), "Patel Kanubhai");
    }

    #[test]
    fn mismatched_passwords_block_submission() {
        let mut f = filled();
        f.set(SignupField::ConfirmPassword, "different");
        assert!(f.submit().is_none());
        assert_eq!(f.error, "Passwords do not match");
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let mut f = SignupForm::new();
        f.set(SignupField::Surname, "Patel");
        assert!(f.submit().is_none());
        assert_eq!(f.error, "Please fill in all required fields: father_name, email, mobile, password");
    }

    #[test]
    fn otp_must_be_verified_before_submit() {
        let mut f = filled();
        f.otp_verified = false;
        assert!(f.submit().is_none());
        assert_eq!(f.error, "Please verify OTP first");
    }

    #[test]
    fn short_password_is_rejected() {
        let mut f = filled();
        f.set(SignupField::Password, "abc");
        f.set(SignupField::ConfirmPassword, "abc");
        assert!(f.submit().is_none());
        assert_eq!(f.error, "Password must be at least 6 characters long");
    }

    #[test]
    fn valid_form_maps_to_backend_names() {
        let mut f = filled();
        let req = f.submit().unwrap();
        assert_eq!(req.first_name, "Patel");
        assert_eq!(req.middle_name, "Ramesh");
        assert_eq!(req.last_name, "Kanubhai");
        assert_eq!(req.username, "9876543210");
        assert!(f.error.is_empty());
    }

    #[test]
    fn otp_requests_need_input() {
        let mut f = SignupForm::new();
        assert_eq!(f.request_otp(), None);
        assert_eq!(f.error, "Please enter mobile number");
        f.set(SignupField::Mobile, "9876543210");
        assert_eq!(f.request_otp().as_deref(), Some("9876543210"));
        assert_eq!(f.verify_otp(), None);
        assert_eq!(f.error, "Please enter OTP");
    }

    #[test]
    fn summary_falls_back_to_local_name() {
        let f = filled();
        let text = f.success_summary(&SignupResponse { user_number: Some("A42".into()), ..Default::default() });
        assert!(text.contains("User Number: #A42"));
        assert!(text.contains("Full Name: Patel Ramesh Kanubhai"));
    }
}
