pub mod home_controller;
pub mod user_controller;
pub mod holdings_controller;
pub mod trades_controller;
pub mod journals_controller;
pub mod email_controller;
