//! Library entrypoint for the trading journal service.
//!
//! Integration tests under `tests/` build the router from here against the
//! in-memory store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod response;

// Keep the gate at crate root as `crate::auth`.
#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

use services::{
    mail_service::{LogMailer, Mailer},
    otp_service::OtpCache,
    store::Db,
};

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub db: Db,
    pub settings: config::Settings,
    pub otp: OtpCache,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(db: Db, settings: config::Settings) -> Self {
        let mailer = Arc::new(LogMailer::new(settings.mail.clone()));
        AppState {
            hbs: templates::build_handlebars(),
            db,
            settings,
            otp: OtpCache::default(),
            mailer,
        }
    }
}
