//! One-time codes for the register/login/reset mail flows.
//!
//! Codes live in an [`OtpStore`], one slot per email. A new code overwrites
//! the previous one; a successful or expired verification removes it; a
//! wrong code leaves it in place so the user can retry.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::error::ApiError;

/// Lifetime of an issued code, in seconds.
pub const OTP_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

/// Keyed slot storage. Swap for a shared backend with TTL when running
/// more than one process.
pub trait OtpStore: Send + Sync {
    fn put(&self, email: &str, entry: OtpEntry);
    fn get(&self, email: &str) -> Option<OtpEntry>;
    fn remove(&self, email: &str);
}

#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryOtpStore {
    // a panic elsewhere must not turn writes into silent no-ops
    fn entries(&self) -> MutexGuard<'_, HashMap<String, OtpEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, email: &str, entry: OtpEntry) {
        self.entries().insert(email.to_string(), entry);
    }

    fn get(&self, email: &str) -> Option<OtpEntry> {
        self.entries().get(email).cloned()
    }

    fn remove(&self, email: &str) {
        self.entries().remove(email);
    }
}

#[derive(Clone)]
pub struct OtpCache {
    store: Arc<dyn OtpStore>,
    ttl: Duration,
}

impl Default for OtpCache {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryOtpStore::new()))
    }
}

pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

impl OtpCache {
    pub fn new(store: Arc<dyn OtpStore>) -> Self {
        Self {
            store,
            ttl: Duration::seconds(OTP_TTL_SECS),
        }
    }

    pub fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> String {
        let code = generate_code();
        self.store.put(
            email,
            OtpEntry {
                code: code.clone(),
                issued_at: now,
            },
        );
        tracing::info!(%email, "otp issued");
        code
    }

    pub fn verify(&self, email: &str, code: &str) -> Result<(), ApiError> {
        self.verify_at(email, code, Utc::now())
    }

    pub fn verify_at(&self, email: &str, code: &str, now: DateTime<Utc>) -> Result<(), ApiError> {
        let Some(entry) = self.store.get(email) else {
            return Err(ApiError::not_found("OTP not found"));
        };

        if entry.code != code {
            tracing::info!(%email, "otp mismatch");
            return Err(ApiError::bad_request("Invalid OTP"));
        }

        if now - entry.issued_at > self.ttl {
            self.store.remove(email);
            tracing::info!(%email, "otp expired");
            return Err(ApiError::bad_request("OTP expired"));
        }

        self.store.remove(email);
        tracing::info!(%email, "otp verified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn cache() -> (OtpCache, Arc<InMemoryOtpStore>) {
        let store = Arc::new(InMemoryOtpStore::new());
        (OtpCache::new(store.clone()), store)
    }

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn correct_code_verifies_exactly_once() {
        let (otp, _) = cache();
        let t0 = Utc::now();
        let code = otp.issue_at("a@x.com", t0);

        assert!(otp.verify_at("a@x.com", &code, t0 + Duration::seconds(10)).is_ok());

        let again = otp.verify_at("a@x.com", &code, t0 + Duration::seconds(11)).unwrap_err();
        assert_eq!(again.status, StatusCode::NOT_FOUND);
        assert_eq!(again.message, "OTP not found");
    }

    #[test]
    fn wrong_code_keeps_entry() {
        let (otp, store) = cache();
        let t0 = Utc::now();
        let code = otp.issue_at("a@x.com", t0);
        let wrong = if code == "123456" { "654321" } else { "123456" };

        let err = otp.verify_at("a@x.com", wrong, t0).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid OTP");
        assert!(store.get("a@x.com").is_some());

        assert!(otp.verify_at("a@x.com", &code, t0).is_ok());
    }

    #[test]
    fn expired_code_is_removed() {
        let (otp, store) = cache();
        let t0 = Utc::now();
        let code = otp.issue_at("a@x.com", t0);

        let err = otp
            .verify_at("a@x.com", &code, t0 + Duration::seconds(301))
            .unwrap_err();
        assert_eq!(err.message, "OTP expired");
        assert!(store.get("a@x.com").is_none());
    }

    #[test]
    fn boundary_second_is_still_valid() {
        let (otp, _) = cache();
        let t0 = Utc::now();
        let code = otp.issue_at("a@x.com", t0);
        assert!(otp.verify_at("a@x.com", &code, t0 + Duration::seconds(300)).is_ok());
    }

    #[test]
    fn reissue_overwrites_previous_code() {
        let (otp, store) = cache();
        let t0 = Utc::now();
        otp.issue_at("a@x.com", t0);
        let second = otp.issue_at("a@x.com", t0 + Duration::seconds(1));

        assert_eq!(store.get("a@x.com").unwrap().code, second);
    }

    #[test]
    fn unknown_email_is_not_found() {
        let (otp, _) = cache();
        assert_eq!(
            otp.verify_at("nobody@x.com", "123456", Utc::now()).unwrap_err().status,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn poisoned_lock_still_stores_codes() {
        let store = Arc::new(InMemoryOtpStore::new());
        let held = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = held.entries.lock().unwrap();
            panic!("panicked while holding the otp lock");
        })
        .join();
        assert!(store.entries.is_poisoned());

        let otp = OtpCache::new(store.clone());
        let code = otp.issue("a@x.com");
        assert_eq!(store.get("a@x.com").unwrap().code, code);

        assert!(otp.verify("a@x.com", &code).is_ok());
        assert!(store.get("a@x.com").is_none());
    }
}
