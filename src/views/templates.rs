use handlebars::Handlebars;
use serde_json::json;
use std::sync::Arc;

use crate::models::UseCase;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);

    // OTP mails, one per use case
    hb.register_template_string("otp/register", include_str!("../../templates/otp/register.hbs"))
        .expect("template otp/register");
    hb.register_template_string("otp/login", include_str!("../../templates/otp/login.hbs"))
        .expect("template otp/login");
    hb.register_template_string("otp/reset", include_str!("../../templates/otp/reset.hbs"))
        .expect("template otp/reset");

    Arc::new(hb)
}

pub fn render_otp(hbs: &Hbs, use_case: UseCase, name: &str, otp: &str) -> Result<String, String> {
    hbs.render(use_case.template_name(), &json!({ "name": name, "otp": otp }))
        .map_err(|e| e.to_string())
}
