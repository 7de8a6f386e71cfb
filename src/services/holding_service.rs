use mongodb::bson::oid::ObjectId;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{Holding, NewHolding, UpdateHolding},
    services::{
        cross_write::{self, BackRef, CrossWrite, Primary},
        ownership::{self, RecordKind},
        store::{Filter, Update},
    },
    AppState,
};

pub async fn create_holding(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    req: NewHolding,
) -> Result<Holding, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;

    let holding = Holding::new(user.id, req);
    let journal = cross_write::journal_for_new_holding(user.id, &holding);

    cross_write::apply(
        &state.db,
        state.db.holdings.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Insert {
                id: holding.id,
                record: &holding,
            },
            back_ref: BackRef::Holdings,
            companion: Some(journal),
        },
    )
    .await?;

    Ok(holding)
}

/// Resolved through the user's `holdings` back-references, not the owner field.
pub async fn list_holdings(state: &AppState, caller: &AuthUser, raw_user_id: &str) -> Result<Vec<Holding>, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;

    let ids: Vec<ObjectId> = user
        .holdings
        .iter()
        .filter_map(|h| ObjectId::parse_str(h).ok())
        .collect();

    Ok(state.db.holdings.find(&Filter::IdIn(ids)).await?)
}

pub async fn get_holding(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_holding_id: &str,
) -> Result<Holding, ApiError> {
    let (user, holding_id) = ownership::user_and_record_id(state, raw_user_id, raw_holding_id, caller).await?;

    ownership::resolve_record(state, state.db.holdings.as_ref(), RecordKind::Holding, user.id, holding_id).await
}

pub async fn update_holding(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_holding_id: &str,
    patch: UpdateHolding,
) -> Result<Holding, ApiError> {
    let (user, holding_id) = ownership::user_and_record_id(state, raw_user_id, raw_holding_id, caller).await?;

    let mut holding =
        ownership::resolve_record(state, state.db.holdings.as_ref(), RecordKind::Holding, user.id, holding_id).await?;

    holding.merge(patch);

    state
        .db
        .holdings
        .update_one(&Filter::Id(holding_id), &Update::set_record(&holding)?)
        .await?;

    // read back what was stored
    state
        .db
        .holdings
        .find_one(&Filter::Id(holding_id))
        .await?
        .ok_or_else(|| RecordKind::Holding.not_found())
}

pub async fn delete_holding(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_holding_id: &str,
) -> Result<(), ApiError> {
    let (user, holding_id) = ownership::user_and_record_id(state, raw_user_id, raw_holding_id, caller).await?;

    let holding =
        ownership::resolve_record(state, state.db.holdings.as_ref(), RecordKind::Holding, user.id, holding_id).await?;
    let journal = cross_write::journal_for_removed_holding(user.id, &holding);

    cross_write::apply::<Holding>(
        &state.db,
        state.db.holdings.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Delete { id: holding.id },
            back_ref: BackRef::Holdings,
            companion: Some(journal),
        },
    )
    .await?;

    Ok(())
}
