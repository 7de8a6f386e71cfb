use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub email: String,

    // bcrypt digest; echoed by the register route as-is
    pub password_hash: String,

    // back-references, hex ids of owned records
    #[serde(default)]
    pub holdings: Vec<String>,
    #[serde(default)]
    pub trades: Vec<String>,
    #[serde(default)]
    pub journal: Vec<String>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub ban_time: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: &str, email: &str, password_hash: String) -> Self {
        User {
            id: ObjectId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            holdings: vec![],
            trades: vec![],
            journal: vec![],
            created_at: Utc::now(),
            is_banned: false,
            ban_time: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPassword {
    pub email: String,
    pub password: String,
}
