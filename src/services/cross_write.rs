//! Holding/trade lifecycle writes and their journal side effects.
//!
//! A cross-write touches up to three documents in a fixed order:
//!
//! 1. the companion journal entry (insert),
//! 2. the primary record (insert or delete),
//! 3. the owner's back-reference arrays (one `$push`/`$pull` update).
//!
//! There is no transaction across them. When a later step fails the earlier
//! ones stay committed; the error is logged with the committed steps and the
//! caller gets a 500. Nothing is rolled back.

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    error::ApiError,
    models::{Holding, Journal, NewTrade, Trade},
    services::store::{Collection, Db, Filter, Record, StoreError, Update},
};

/// Back-reference array on the user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackRef {
    Holdings,
    Trades,
    Journal,
}

impl BackRef {
    pub fn field(self) -> &'static str {
        match self {
            BackRef::Holdings => "holdings",
            BackRef::Trades => "trades",
            BackRef::Journal => "journal",
        }
    }
}

pub enum Primary<'a, T> {
    Insert { id: ObjectId, record: &'a T },
    Delete { id: ObjectId },
    None,
}

pub struct CrossWrite<'a, T> {
    pub owner: ObjectId,
    pub primary: Primary<'a, T>,
    pub back_ref: BackRef,
    pub companion: Option<Journal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CompanionJournal,
    Primary,
    BackReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossWriteOutcome {
    pub journal_id: Option<ObjectId>,
    pub committed: Vec<Step>,
}

fn failed(step: Step, committed: &[Step], owner: ObjectId, e: StoreError) -> ApiError {
    if committed.is_empty() {
        tracing::warn!(?step, %owner, error = %e, "cross-write failed before any write");
    } else {
        tracing::error!(
            ?step,
            ?committed,
            %owner,
            error = %e,
            "cross-write left partially applied"
        );
    }
    ApiError::from(e)
}

/// Runs one cross-write against `primary`, the collection of the record being
/// created or removed.
pub async fn apply<T: Record>(
    db: &Db,
    primary: &dyn Collection<T>,
    plan: CrossWrite<'_, T>,
) -> Result<CrossWriteOutcome, ApiError> {
    let owner = plan.owner;
    let mut committed: Vec<Step> = vec![];
    let mut update = Update::new();

    let journal_id = match &plan.companion {
        Some(journal) => {
            let id = db
                .journals
                .insert_one(journal)
                .await
                .map_err(|e| failed(Step::CompanionJournal, &committed, owner, e))?;
            committed.push(Step::CompanionJournal);
            Some(id)
        }
        None => None,
    };

    match plan.primary {
        Primary::Insert { id, record } => {
            primary
                .insert_one(record)
                .await
                .map_err(|e| failed(Step::Primary, &committed, owner, e))?;
            committed.push(Step::Primary);
            update = update.push(plan.back_ref.field(), id.to_hex());
        }
        Primary::Delete { id } => {
            primary
                .delete_one(&Filter::Id(id))
                .await
                .map_err(|e| failed(Step::Primary, &committed, owner, e))?;
            committed.push(Step::Primary);
            update = update.pull(plan.back_ref.field(), id.to_hex());
        }
        Primary::None => {}
    }

    if let Some(id) = journal_id {
        update = update.push(BackRef::Journal.field(), id.to_hex());
    }

    if !update.is_empty() {
        db.users
            .update_one(&Filter::Id(owner), &update)
            .await
            .map_err(|e| failed(Step::BackReference, &committed, owner, e))?;
        committed.push(Step::BackReference);
    }

    Ok(CrossWriteOutcome {
        journal_id,
        committed,
    })
}

// ---------------- companion journal templates ----------------

fn holding_journal(owner: ObjectId, h: &Holding, trade_category: &str) -> Journal {
    Journal {
        id: ObjectId::new(),
        asset_name: h.asset_name.clone(),
        quantity: h.quantity,
        asset_type: "equity".to_string(),
        journal_for: "Holding".to_string(),
        trade_category: trade_category.to_string(),
        enter_price: h.bought_price,
        exit_price: h.current_price,
        stop_loss: 0.0,
        strategy_name: "Longterm".to_string(),
        strategy_description: "Longterm".to_string(),
        owner: owner.to_hex(),
        date: Utc::now(),
    }
}

pub fn journal_for_new_holding(owner: ObjectId, h: &Holding) -> Journal {
    holding_journal(owner, h, "buy")
}

pub fn journal_for_removed_holding(owner: ObjectId, h: &Holding) -> Journal {
    holding_journal(owner, h, "sell")
}

/// Day trades are recorded only as a journal entry.
pub fn journal_for_day_trade(owner: ObjectId, t: &NewTrade) -> Journal {
    Journal {
        id: ObjectId::new(),
        asset_name: t.asset_name.clone(),
        quantity: t.quantity,
        asset_type: "equity".to_string(),
        journal_for: "Trade".to_string(),
        trade_category: t.trade_category.clone(),
        enter_price: t.enter_price,
        exit_price: t.exit_price,
        stop_loss: 0.0,
        strategy_name: t.strategy_name.clone(),
        strategy_description: t.strategy_description.clone(),
        owner: owner.to_hex(),
        date: Utc::now(),
    }
}

pub fn journal_for_removed_trade(owner: ObjectId, t: &Trade) -> Journal {
    Journal {
        id: ObjectId::new(),
        asset_name: t.asset_name.clone(),
        quantity: t.quantity,
        // trades do not keep an asset type
        asset_type: "unknown".to_string(),
        journal_for: "Deleted Trade".to_string(),
        trade_category: "sell".to_string(),
        enter_price: t.enter_price,
        exit_price: t.exit_price,
        stop_loss: t.stop_loss,
        strategy_name: t.strategy_name.clone(),
        strategy_description: t.strategy_description.clone(),
        owner: owner.to_hex(),
        date: Utc::now(),
    }
}
