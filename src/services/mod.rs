pub mod store;
pub mod db_init;

pub mod auth_service;
pub mod ownership;
pub mod cross_write;
pub mod holding_service;
pub mod trade_service;
pub mod journal_service;
pub mod otp_service;
pub mod mail_service;
