use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub username: String,
    pub password: String,
    pub from: String,
    pub server: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_days: i64,
    pub bcrypt_cost: u32,

    pub mail: MailSettings,

    // when set, the path user must be the token subject
    pub strict_ownership: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_db: "journalpro".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            jwt_secret: "change-me-dev-secret".to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_days: 7,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            mail: MailSettings {
                username: String::new(),
                password: String::new(),
                from: String::new(),
                server: String::new(),
                port: 587,
            },
            strict_ownership: false,
        }
    }
}

/// Only the HMAC family works with a shared secret.
pub fn parse_algorithm(raw: &str) -> Option<Algorithm> {
    match Algorithm::from_str(raw.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Some(alg),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let mongodb_uri = env::var("MONGO_URL").unwrap_or(defaults.mongodb_uri);
    let mongodb_db = env::var("MONGO_DB").unwrap_or(defaults.mongodb_db);

    let host = env::var("HOST").unwrap_or(defaults.host);
    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let jwt_secret = env::var("SECRET_KEY").unwrap_or(defaults.jwt_secret);

    let jwt_algorithm = match env::var("ALGORITHM") {
        Ok(raw) => parse_algorithm(&raw).unwrap_or_else(|| {
            tracing::warn!(algorithm = %raw, "unsupported JWT algorithm, falling back to HS256");
            Algorithm::HS256
        }),
        Err(_) => defaults.jwt_algorithm,
    };

    let access_token_expire_days = env::var("ACCESS_TOKEN_EXPIRE_DAYS")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(defaults.access_token_expire_days);

    let bcrypt_cost = env::var("BCRYPT_COST")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(defaults.bcrypt_cost);

    let mail = MailSettings {
        username: env::var("MAIL_USERNAME").unwrap_or_default(),
        password: env::var("MAIL_PASSWORD").unwrap_or_default(),
        from: env::var("MAIL_FROM").unwrap_or_default(),
        server: env::var("MAIL_SERVER").unwrap_or_default(),
        port: env::var("MAIL_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.mail.port),
    };

    let strict_ownership = env::var("STRICT_OWNERSHIP")
        .map(|s| parse_bool(&s))
        .unwrap_or(defaults.strict_ownership);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        jwt_algorithm,
        access_token_expire_days,
        bcrypt_cost,
        mail,
        strict_ownership,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_algorithms_are_accepted() {
        assert_eq!(parse_algorithm("HS256"), Some(Algorithm::HS256));
        assert_eq!(parse_algorithm(" HS512 "), Some(Algorithm::HS512));
    }

    #[test]
    fn asymmetric_or_unknown_algorithms_are_rejected() {
        assert_eq!(parse_algorithm("RS256"), None);
        assert_eq!(parse_algorithm("nope"), None);
    }

    #[test]
    fn bool_flags() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
