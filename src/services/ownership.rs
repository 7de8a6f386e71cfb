//! Existence and ownership gates run before every record operation.
//!
//! Order matters and each step returns on failure: parse ids, load the path
//! user, then load the target record.

use mongodb::bson::oid::ObjectId;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::User,
    services::store::{Collection, Filter, Record},
    AppState,
};

/// How a record lookup is scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupScope {
    /// Existence only; any id resolves regardless of owner.
    Unscoped,
    /// `_id` and owner must both match.
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Holding,
    Trade,
    Journal,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Holding => "Holding",
            RecordKind::Trade => "Trade",
            RecordKind::Journal => "Journal",
        }
    }

    /// Holdings and trades resolve by id alone unless strict ownership is on.
    pub fn scope(self, strict: bool) -> LookupScope {
        match (self, strict) {
            (RecordKind::Journal, _) | (_, true) => LookupScope::Owner,
            _ => LookupScope::Unscoped,
        }
    }

    pub fn not_found(self) -> ApiError {
        ApiError::not_found(format!(
            "{} does not exist or does not belong to the user",
            self.label()
        ))
    }
}

pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid ID format"))
}

/// Loads the path user. With strict ownership the caller must be that user.
pub async fn resolve_user(state: &AppState, user_id: ObjectId, caller: &AuthUser) -> Result<User, ApiError> {
    let Some(user) = state.db.users.find_one(&Filter::Id(user_id)).await? else {
        return Err(ApiError::not_found("User does not exist"));
    };

    if state.settings.strict_ownership && user.email != caller.username {
        tracing::warn!(%user_id, caller = %caller.username, "cross-user access rejected");
        return Err(ApiError::forbidden("Not allowed to access this user's records"));
    }

    Ok(user)
}

/// Loads a child record of `kind` for `owner` under the kind's lookup scope.
pub async fn resolve_record<T: Record>(
    state: &AppState,
    collection: &dyn Collection<T>,
    kind: RecordKind,
    owner: ObjectId,
    record_id: ObjectId,
) -> Result<T, ApiError> {
    let filter = match kind.scope(state.settings.strict_ownership) {
        LookupScope::Unscoped => Filter::Id(record_id),
        LookupScope::Owner => Filter::IdAndOwner(record_id, owner.to_hex()),
    };

    collection
        .find_one(&filter)
        .await?
        .ok_or_else(|| kind.not_found())
}

/// Parses `user_id` and resolves the user in one step.
pub async fn user_from_path(state: &AppState, raw_user_id: &str, caller: &AuthUser) -> Result<User, ApiError> {
    let user_id = parse_id(raw_user_id)?;
    resolve_user(state, user_id, caller).await
}

/// Parses both path ids up front (any malformed id is a 400 before any lookup),
/// then resolves the user.
pub async fn user_and_record_id(
    state: &AppState,
    raw_user_id: &str,
    raw_record_id: &str,
    caller: &AuthUser,
) -> Result<(User, ObjectId), ApiError> {
    let user_id = parse_id(raw_user_id)?;
    let record_id = parse_id(raw_record_id)?;
    let user = resolve_user(state, user_id, caller).await?;
    Ok((user, record_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_ids_are_bad_requests() {
        let err = parse_id("not-an-id").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid ID format");

        assert!(parse_id("0123456789abcdef01234567").is_ok());
        assert!(parse_id("0123456789abcdef0123456").is_err());
    }

    #[test]
    fn default_scopes() {
        assert_eq!(RecordKind::Holding.scope(false), LookupScope::Unscoped);
        assert_eq!(RecordKind::Trade.scope(false), LookupScope::Unscoped);
        assert_eq!(RecordKind::Journal.scope(false), LookupScope::Owner);
        assert_eq!(RecordKind::Holding.scope(true), LookupScope::Owner);
    }

    #[test]
    fn not_found_messages() {
        assert_eq!(
            RecordKind::Trade.not_found().message,
            "Trade does not exist or does not belong to the user"
        );
    }
}
