use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{Journal, NewTrade, Trade},
    services::{
        cross_write::{self, BackRef, CrossWrite, Primary},
        ownership::{self, RecordKind},
        store::{Filter, Update},
    },
    AppState,
};

#[derive(Debug)]
pub enum TradeCreated {
    /// Day trades only ever become a journal entry.
    DayTrade(Journal),
    Trade(Trade),
}

pub async fn create_trade(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    req: NewTrade,
) -> Result<TradeCreated, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;

    if req.is_day_trade() {
        let journal = cross_write::journal_for_day_trade(user.id, &req);

        cross_write::apply::<Trade>(
            &state.db,
            state.db.trades.as_ref(),
            CrossWrite {
                owner: user.id,
                primary: Primary::None,
                back_ref: BackRef::Trades,
                companion: Some(journal.clone()),
            },
        )
        .await?;

        return Ok(TradeCreated::DayTrade(journal));
    }

    let trade = Trade::new(user.id, req);

    cross_write::apply(
        &state.db,
        state.db.trades.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Insert {
                id: trade.id,
                record: &trade,
            },
            back_ref: BackRef::Trades,
            companion: None,
        },
    )
    .await?;

    Ok(TradeCreated::Trade(trade))
}

pub async fn list_trades(state: &AppState, caller: &AuthUser, raw_user_id: &str) -> Result<Vec<Trade>, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;
    Ok(state.db.trades.find(&Filter::Owner(user.id.to_hex())).await?)
}

pub async fn get_trade(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_trade_id: &str,
) -> Result<Trade, ApiError> {
    let (user, trade_id) = ownership::user_and_record_id(state, raw_user_id, raw_trade_id, caller).await?;

    ownership::resolve_record(state, state.db.trades.as_ref(), RecordKind::Trade, user.id, trade_id).await
}

/// Replaces every editable field with the payload and recomputes totals.
pub async fn update_trade(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_trade_id: &str,
    req: NewTrade,
) -> Result<Trade, ApiError> {
    let (user, trade_id) = ownership::user_and_record_id(state, raw_user_id, raw_trade_id, caller).await?;

    let mut trade =
        ownership::resolve_record(state, state.db.trades.as_ref(), RecordKind::Trade, user.id, trade_id).await?;

    trade.replace_with(req);

    let modified = state
        .db
        .trades
        .update_one(&Filter::Id(trade_id), &Update::set_record(&trade)?)
        .await?;

    if modified == 0 {
        return Err(ApiError::internal("Failed to update trade"));
    }

    Ok(trade)
}

pub async fn delete_trade(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_trade_id: &str,
) -> Result<(), ApiError> {
    let (user, trade_id) = ownership::user_and_record_id(state, raw_user_id, raw_trade_id, caller).await?;

    let trade =
        ownership::resolve_record(state, state.db.trades.as_ref(), RecordKind::Trade, user.id, trade_id).await?;
    let journal = cross_write::journal_for_removed_trade(user.id, &trade);

    cross_write::apply::<Trade>(
        &state.db,
        state.db.trades.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Delete { id: trade.id },
            back_ref: BackRef::Trades,
            companion: Some(journal),
        },
    )
    .await?;

    Ok(())
}
