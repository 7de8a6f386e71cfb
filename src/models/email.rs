use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub email: String,
    pub subject: String,
    // required by the request contract; the templated OTP body is what gets sent
    pub body: String,
    pub use_case: String,
}

#[derive(Debug, Deserialize)]
pub struct SendOtpQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpQuery {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Register,
    Login,
    Reset,
}

impl UseCase {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "register" => Some(UseCase::Register),
            "login" => Some(UseCase::Login),
            "reset" => Some(UseCase::Reset),
            _ => None,
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            UseCase::Register => "otp/register",
            UseCase::Login => "otp/login",
            UseCase::Reset => "otp/reset",
        }
    }
}
