//! "Other login": a family member sets a password for their mobile number in three steps.

use crate::phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileLoginStep {
    Mobile,
    Otp,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileLoginRequest {
    SendOtp { mobile: String },
    VerifyOtp { mobile: String, otp: String },
    SetPassword { mobile: String, password: String },
}

#[derive(Debug, Clone)]
pub struct MobileLogin {
    pub step: MobileLoginStep,
    pub mobile: String,
    pub otp: String,
    pub password: String,
    pub confirm_password: String,
    pub busy: bool,
    pub error: String,
}

impl Default for MobileLogin {
    fn default() -> Self {
        Self {
            step: MobileLoginStep::Mobile,
            mobile: String::new(),
            otp: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            busy: false,
            error: String::new(),
        }
    }
}

impl MobileLogin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mobile(&mut self, input: &str) {
        self.mobile = phone::digits_only(input);
        self.error.clear();
    }

    pub fn set_otp(&mut self, input: &str) {
        self.otp = phone::digits_only(input);
        self.error.clear();
    }

    pub fn set_passwords(&mut self, password: &str, confirm: &str) {
        self.password = password.to_string();
        self.confirm_password = confirm.to_string();
        self.error.clear();
    }

    fn fail(&mut self, error: &str) -> Option<MobileLoginRequest> {
        self.error = error.to_string();
        None
    }

    /// The request for whichever step is showing, or `None` when the input is rejected.
    pub fn submit(&mut self) -> Option<MobileLoginRequest> {
        if self.busy {
            return None;
        }
        let req = match self.step {
            MobileLoginStep::Mobile => {
                if self.mobile.is_empty() {
                    return self.fail("Please enter mobile number");
                }
                MobileLoginRequest::SendOtp { mobile: self.mobile.clone() }
            }
            MobileLoginStep::Otp => {
                if self.otp.is_empty() {
                    return self.fail("Please enter OTP");
                }
                MobileLoginRequest::VerifyOtp { mobile: self.mobile.clone(), otp: self.otp.clone() }
            }
            MobileLoginStep::Password => {
                if self.password.is_empty() {
                    return self.fail("Please enter a password");
                }
                if self.password != self.confirm_password {
                    return self.fail("Passwords do not match");
                }
                MobileLoginRequest::SetPassword { mobile: self.mobile.clone(), password: self.password.clone() }
            }
        };
        self.error.clear();
        self.busy = true;
        Some(req)
    }

    /// Moves to the next step after the server accepted the current one.
    pub fn step_succeeded(&mut self) {
        self.busy = false;
        self.step = match self.step {
            MobileLoginStep::Mobile => MobileLoginStep::Otp,
            MobileLoginStep::Otp | MobileLoginStep::Password => MobileLoginStep::Password,
        };
    }

    pub fn request_failed(&mut self, message: &str) {
        self.busy = false;
        self.error = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_three_steps() {
        let mut flow = MobileLogin::new();
        flow.set_mobile("98765 43210");
        assert_eq!(flow.submit(), Some(MobileLoginRequest::SendOtp { mobile: "9876543210".into() }));
        assert_eq!(flow.submit(), None, "in-flight request blocks resubmission");
        flow.step_succeeded();
        assert_eq!(flow.step, MobileLoginStep::Otp);

        flow.set_otp("123456");
        assert!(matches!(flow.submit(), Some(MobileLoginRequest::VerifyOtp { .. })));
        flow.step_succeeded();

        flow.set_passwords("hunter22", "hunter22");
        assert_eq!(
            flow.submit(),
            Some(MobileLoginRequest::SetPassword { mobile: "9876543210".into(), password: "hunter22".into() })
        );
    }

    #[test]
    fn mismatched_confirmation_sends_nothing() {
        let mut flow = MobileLogin { step: MobileLoginStep::Password, mobile: "9876543210".into(), ..Default::default() };
        flow.set_passwords("hunter22", "hunter23");
        assert_eq!(flow.submit(), None);
        assert_eq!(flow.error, "Passwords do not match");
        assert!(!flow.busy);
    }

    #[test]
    fn failure_keeps_step_and_shows_message() {
        let mut flow = MobileLogin::new();
        flow.set_mobile("9876543210");
        flow.submit();
        flow.request_failed("Mobile number not registered");
        assert_eq!(flow.step, MobileLoginStep::Mobile);
        assert_eq!(flow.error, "Mobile number not registered");
        assert!(flow.submit().is_some());
    }
}
