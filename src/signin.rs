//! Signin wizard: pick a login type, enter a mobile number, verify the OTP, then enter a password.
//!
//! The wizard never talks to the network itself. Each action either records a validation error
//! or returns the [`SigninRequest`] the page should send, and the page reports the outcome back.

use crate::api::models::{LoginResponse, UserType};
use crate::config::UserInfo;
use crate::phone::{self, DEFAULT_COUNTRY};

pub const ADMIN_MOBILE: &str = "9876543210";
pub const OTP_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SigninStep {
    ChooseType = 0,
    Mobile = 1,
    Otp = 2,
    Password = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    User,
    Admin,
}

impl LoginType {
    pub fn as_str(self) -> &'static str {
        match self {
            LoginType::User => "user",
            LoginType::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Inactive,
}

/// Where the app goes after a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninRequest {
    SendOtp { mobile: String },
    ForgotPassword { mobile: String },
    VerifyOtp { mobile: String, otp: String },
    Login { mobile: String, password: String, login_type: LoginType },
    ResetPassword { mobile: String, otp: String, new_password: String },
}

#[derive(Debug, Clone)]
pub struct SigninWizard {
    pub step: SigninStep,
    pub login_type: Option<LoginType>,
    pub forgot_password: bool,
    pub country_code: String,
    pub mobile: String,
    pub otp: String,
    pub password: String,
    pub new_password: String,
    pub otp_sent: bool,
    pub otp_verified: bool,
    pub busy: bool,
    pub message: String,
    pub error: String,
}

impl Default for SigninWizard {
    fn default() -> Self {
        Self {
            step: SigninStep::ChooseType,
            login_type: None,
            forgot_password: false,
            country_code: DEFAULT_COUNTRY.code.to_string(),
            mobile: String::new(),
            otp: String::new(),
            password: String::new(),
            new_password: String::new(),
            otp_sent: false,
            otp_verified: false,
            busy: false,
            message: String::new(),
            error: String::new(),
        }
    }
}

impl SigninWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.login_type == Some(LoginType::Admin)
    }

    pub fn choose(&mut self, login_type: LoginType) {
        self.login_type = Some(login_type);
        self.step = SigninStep::Mobile;
    }

    pub fn set_country(&mut self, code: &str) {
        self.country_code = code.to_string();
        self.clear_feedback();
    }

    pub fn set_mobile(&mut self, input: &str) {
        self.mobile = phone::digits_only(input);
        self.clear_feedback();
    }

    pub fn set_otp(&mut self, input: &str) {
        self.otp = phone::digits_only(input).chars().take(OTP_LEN).collect();
        self.error.clear();
    }

    pub fn set_password(&mut self, input: &str) {
        if self.forgot_password {
            self.new_password = input.to_string();
        } else {
            self.password = input.to_string();
        }
        self.error.clear();
    }

    pub fn is_mobile_valid(&self) -> bool {
        phone::is_valid_mobile(&self.country_code, &self.mobile)
    }

    pub fn can_verify(&self) -> bool {
        self.otp.len() == OTP_LEN && !self.busy
    }

    pub fn can_submit_password(&self) -> bool {
        let value = if self.forgot_password { &self.new_password } else { &self.password };
        !value.is_empty() && !self.busy
    }

    fn full_mobile(&self) -> String {
        format!("{}{}", self.country_code, self.mobile)
    }

    fn clear_feedback(&mut self) {
        self.error.clear();
        self.message.clear();
    }

    fn fail(&mut self, error: &str) -> Option<SigninRequest> {
        self.error = error.to_string();
        None
    }

    /// The mobile step's primary button: admins go straight to the password, everyone else gets an OTP.
    pub fn submit_mobile(&mut self) -> Option<SigninRequest> {
        if !self.is_mobile_valid() {
            return self.fail("Please enter a valid mobile number");
        }
        if self.is_admin() {
            if self.mobile != ADMIN_MOBILE {
                return self.fail("Invalid admin mobile number");
            }
            self.error.clear();
            self.step = SigninStep::Password;
            return None;
        }
        self.error.clear();
        self.busy = true;
        let mobile = self.full_mobile();
        Some(if self.forgot_password {
            SigninRequest::ForgotPassword { mobile }
        } else {
            SigninRequest::SendOtp { mobile }
        })
    }

    pub fn otp_sent(&mut self) {
        self.busy = false;
        self.otp_sent = true;
        self.step = SigninStep::Otp;
        self.message = if self.forgot_password {
            "Password reset OTP sent!".to_string()
        } else {
            "OTP sent successfully!".to_string()
        };
    }

    pub fn submit_otp(&mut self) -> Option<SigninRequest> {
        if self.otp.is_empty() {
            return self.fail("Please enter OTP");
        }
        self.error.clear();
        self.busy = true;
        Some(SigninRequest::VerifyOtp { mobile: self.full_mobile(), otp: self.otp.clone() })
    }

    pub fn otp_verified(&mut self) {
        self.busy = false;
        self.otp_verified = true;
        self.step = SigninStep::Password;
        self.message = if self.forgot_password {
            "OTP verified! Please enter your new password.".to_string()
        } else {
            "OTP verified! Please enter your password.".to_string()
        };
    }

    pub fn submit_password(&mut self) -> Option<SigninRequest> {
        if self.forgot_password {
            if self.new_password.is_empty() {
                return self.fail("Please enter your new password");
            }
            self.error.clear();
            self.busy = true;
            return Some(SigninRequest::ResetPassword {
                mobile: self.full_mobile(),
                otp: self.otp.clone(),
                new_password: self.new_password.clone(),
            });
        }
        if self.password.is_empty() {
            return self.fail("Please enter your password");
        }
        let login_type = self.login_type.unwrap_or(LoginType::User);
        let mobile = match login_type {
            LoginType::Admin => self.mobile.clone(),
            LoginType::User => self.full_mobile(),
        };
        self.error.clear();
        self.busy = true;
        Some(SigninRequest::Login { mobile, password: self.password.clone(), login_type })
    }

    /// Accepts a login response; returns the token and session info to persist plus where to go next.
    pub fn login_succeeded(&mut self, resp: &LoginResponse) -> Option<(String, UserInfo, Route)> {
        self.busy = false;
        let token = match resp.token.as_deref() {
            Some(t) if resp.success && !t.is_empty() => t.to_string(),
            _ => {
                self.fail("Login failed: Invalid credentials");
                return None;
            }
        };
        let login_type = self.login_type.unwrap_or(LoginType::User);
        let info = UserInfo {
            user_type: resp.user_type.unwrap_or(UserType::MainUser),
            login_type: login_type.as_str().to_string(),
            user_id: resp.user_id,
            family_member_id: resp.family_member_id,
            family_member_name: resp.family_member_name.clone(),
        };
        self.message = "Login successful".to_string();
        let route = if login_type == LoginType::Admin { Route::Admin } else { Route::Home };
        Some((token, info, route))
    }

    pub fn reset_succeeded(&mut self) {
        *self = Self::new();
        self.message = "Password reset successful! You can now login with your new password.".to_string();
    }

    /// Records a failed request. `message` is the server's text when it sent one.
    pub fn request_failed(&mut self, request: &SigninRequest, message: Option<String>) {
        self.busy = false;
        let fallback = match request {
            SigninRequest::SendOtp { .. } | SigninRequest::ForgotPassword { .. } => "Failed to send OTP",
            SigninRequest::VerifyOtp { .. } => "Invalid OTP",
            SigninRequest::Login { .. } => "Login failed: Invalid credentials",
            SigninRequest::ResetPassword { .. } => "Password reset failed",
        };
        self.error = message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_string());
    }

    /// Back button: from the mobile step return to the type chooser, otherwise to the mobile step.
    pub fn back(&mut self) {
        let leaving_mobile = self.step == SigninStep::Mobile;
        self.step = if leaving_mobile { SigninStep::ChooseType } else { SigninStep::Mobile };
        if leaving_mobile {
            self.login_type = None;
            self.forgot_password = false;
        }
        self.clear_inputs();
    }

    pub fn start_forgot_password(&mut self) {
        self.forgot_password = true;
        self.step = SigninStep::Mobile;
        self.clear_inputs();
    }

    pub fn back_to_login(&mut self) {
        let country = std::mem::take(&mut self.country_code);
        *self = Self::new();
        self.country_code = country;
    }

    fn clear_inputs(&mut self) {
        self.mobile.clear();
        self.otp.clear();
        self.password.clear();
        self.new_password.clear();
        self.otp_sent = false;
        self.otp_verified = false;
        self.clear_feedback();
    }

    /// Indicator state for wizard steps 1 to 3.
    pub fn step_state(&self, step: u8) -> StepState {
        let current = self.step as u8;
        if current > step {
            StepState::Completed
        } else if current == step {
            StepState::Active
        } else {
            StepState::Inactive
        }
    }

    /// Translation key for the wizard heading.
    pub fn title_key(&self) -> &'static str {
        if self.forgot_password {
            "resetPassword"
        } else if self.step == SigninStep::ChooseType {
            "selectLoginType"
        } else if self.is_admin() {
            "adminLogin"
        } else {
            "userLogin"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_mobile(kind: LoginType) -> SigninWizard {
        let mut w = SigninWizard::new();
        w.choose(kind);
        w
    }

    #[test]
    fn invalid_mobile_sets_error_and_sends_nothing() {
        let mut w = at_mobile(LoginType::User);
        w.set_mobile("12345");
        assert_eq!(w.submit_mobile(), None);
        assert_eq!(w.error, "Please enter a valid mobile number");
        assert_eq!(w.step, SigninStep::Mobile);
        assert!(!w.busy);
    }

    #[test]
    fn user_flow_walks_all_steps() {
        let mut w = at_mobile(LoginType::User);
        w.set_mobile("98765-43210");
        assert_eq!(w.submit_mobile(), Some(SigninRequest::SendOtp { mobile: "+919876543210".into() }));
        w.otp_sent();
        assert_eq!(w.step, SigninStep::Otp);
        assert_eq!(w.message, "OTP sent successfully!");

        w.set_otp("12a3456789");
        assert_eq!(w.otp, "123456");
        assert!(w.can_verify());
        assert!(matches!(w.submit_otp(), Some(SigninRequest::VerifyOtp { .. })));
        w.otp_verified();
        assert_eq!(w.step, SigninStep::Password);

        assert_eq!(w.submit_password(), None);
        assert_eq!(w.error, "Please enter your password");
        w.set_password("secret");
        assert_eq!(
            w.submit_password(),
            Some(SigninRequest::Login { mobile: "+919876543210".into(), password: "secret".into(), login_type: LoginType::User })
        );

        let resp = LoginResponse { success: true, token: Some("abc".into()), ..Default::default() };
        let (token, info, route) = w.login_succeeded(&resp).unwrap();
        assert_eq!(token, "abc");
        assert_eq!(info.user_type, UserType::MainUser);
        assert_eq!(info.login_type, "user");
        assert_eq!(route, Route::Home);
    }

    #[test]
    fn admin_skips_otp_and_logs_in_with_raw_number() {
        let mut w = at_mobile(LoginType::Admin);
        w.set_mobile(ADMIN_MOBILE);
        assert_eq!(w.submit_mobile(), None);
        assert_eq!(w.step, SigninStep::Password);
        assert!(w.error.is_empty());

        w.set_password("admin123");
        match w.submit_password() {
            Some(SigninRequest::Login { mobile, login_type, .. }) => {
                assert_eq!(mobile, ADMIN_MOBILE);
                assert_eq!(login_type, LoginType::Admin);
            }
            other => panic!("unexpected {other:?}"),
        }
        let resp = LoginResponse { success: true, token: Some("t".into()), user_type: Some(UserType::Admin), ..Default::default() };
        assert_eq!(w.login_succeeded(&resp).unwrap().2, Route::Admin);
    }

    #[test]
    fn admin_with_other_number_is_refused() {
        let mut w = at_mobile(LoginType::Admin);
        w.set_mobile("9123456780");
        assert_eq!(w.submit_mobile(), None);
        assert_eq!(w.error, "Invalid admin mobile number");
        assert_eq!(w.step, SigninStep::Mobile);
    }

    #[test]
    fn forgot_password_uses_reset_endpoints() {
        let mut w = at_mobile(LoginType::User);
        w.start_forgot_password();
        w.set_mobile("9876543210");
        assert_eq!(w.submit_mobile(), Some(SigninRequest::ForgotPassword { mobile: "+919876543210".into() }));
        w.otp_sent();
        assert_eq!(w.message, "Password reset OTP sent!");
        w.set_otp("654321");
        w.submit_otp();
        w.otp_verified();
        assert_eq!(w.submit_password(), None);
        assert_eq!(w.error, "Please enter your new password");
        w.set_password("fresh-pass");
        assert!(matches!(w.submit_password(), Some(SigninRequest::ResetPassword { ref new_password, .. }) if new_password == "fresh-pass"));
        w.reset_succeeded();
        assert_eq!(w.step, SigninStep::ChooseType);
        assert!(!w.forgot_password);
        assert!(w.message.starts_with("Password reset successful!"));
    }

    #[test]
    fn back_from_mobile_returns_to_type_choice() {
        let mut w = at_mobile(LoginType::User);
        w.set_mobile("98765");
        w.back();
        assert_eq!(w.step, SigninStep::ChooseType);
        assert_eq!(w.login_type, None);
        assert!(w.mobile.is_empty());
    }

    #[test]
    fn back_from_otp_returns_to_mobile() {
        let mut w = at_mobile(LoginType::User);
        w.set_mobile("9876543210");
        w.submit_mobile();
        w.otp_sent();
        w.back();
        assert_eq!(w.step, SigninStep::Mobile);
        assert_eq!(w.login_type, Some(LoginType::User));
        assert!(!w.otp_sent);
    }

    #[test]
    fn failure_prefers_server_message() {
        let mut w = at_mobile(LoginType::User);
        w.set_mobile("9876543210");
        let req = w.submit_mobile().unwrap();
        w.request_failed(&req, Some("Mobile number not found in system".into()));
        assert_eq!(w.error, "Mobile number not found in system");
        assert!(!w.busy);
        w.request_failed(&req, None);
        assert_eq!(w.error, "Failed to send OTP");
    }

    #[test]
    fn step_indicator_tracks_progress() {
        let mut w = at_mobile(LoginType::User);
        w.step = SigninStep::Otp;
        assert_eq!(w.step_state(1), StepState::Completed);
        assert_eq!(w.step_state(2), StepState::Active);
        assert_eq!(w.step_state(3), StepState::Inactive);
    }
}
